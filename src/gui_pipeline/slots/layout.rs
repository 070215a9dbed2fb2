//! Row grouping and normalisation of slot candidates.

use std::cmp::Ordering;

use tracing::debug;

use crate::gui_pipeline::slots::strategy::SlotStrategy;
use crate::gui_pipeline::slots::types::SlotRect;

/// Mean candidate width, or `None` for an empty list.
pub fn average_size(slots: &[SlotRect]) -> Option<f64> {
    if slots.is_empty() {
        return None;
    }
    let total: usize = slots.iter().map(|s| s.width).sum();
    Some(total as f64 / slots.len() as f64)
}

/// Partitions `slots` into rows, each sorted by x.
///
/// A slot joins the first row whose first member lies less than
/// `row_threshold` pixels away vertically; rows come out in order of
/// their first member's y.
pub fn group_rows(slots: &[SlotRect], row_threshold: f64) -> Vec<Vec<SlotRect>> {
    let mut rows: Vec<Vec<SlotRect>> = Vec::new();

    for slot in slots {
        let existing = rows
            .iter_mut()
            .find(|row| (slot.y as f64 - row[0].y as f64).abs() < row_threshold);

        match existing {
            Some(row) => row.push(*slot),
            None => rows.push(vec![*slot]),
        }
    }

    rows.sort_by_key(|row| row[0].y);
    for row in &mut rows {
        row.sort_by_key(|s| s.x);
    }
    rows
}

/// Reading order of two slots: by x when their y values are less than
/// `row_threshold` apart, by y otherwise.
///
/// Not transitive, so it must not be handed to `slice::sort_by`.
pub fn reading_order(a: &SlotRect, b: &SlotRect, row_threshold: f64) -> Ordering {
    let dy = a.y as f64 - b.y as f64;
    if dy.abs() < row_threshold {
        a.x.cmp(&b.x)
    } else {
        a.y.cmp(&b.y)
    }
}

/// Stable insertion sort by [`reading_order`].
///
/// Every adjacent pair of the result compares `Less` or `Equal`.
pub fn sort_reading_order(slots: &mut [SlotRect], row_threshold: f64) {
    for i in 1..slots.len() {
        let mut j = i;
        while j > 0 && reading_order(&slots[j - 1], &slots[j], row_threshold) == Ordering::Greater {
            slots.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Groups candidates into rows, normalises each row with `strategy` and
/// sorts the result into reading order.
pub fn arrange<S: SlotStrategy>(
    candidates: &[SlotRect],
    strategy: &S,
    row_threshold_factor: f64,
) -> Vec<SlotRect> {
    let Some(avg_size) = average_size(candidates) else {
        return Vec::new();
    };

    let row_threshold = avg_size * row_threshold_factor;
    let rows = group_rows(candidates, row_threshold);
    debug!(
        rows = rows.len(),
        avg_size = format_args!("{:.2}", avg_size),
        "Grouped slot candidates"
    );

    let mut slots: Vec<SlotRect> = rows
        .into_iter()
        .flat_map(|row| {
            if row.len() > 1 {
                strategy.normalize_row(&row, avg_size)
            } else {
                row
            }
        })
        .collect();

    // row membership is anchored to a row's first member, so staggered rows
    // can interleave after flattening
    sort_reading_order(&mut slots, row_threshold);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui_pipeline::pixels::Color;
    use crate::gui_pipeline::slots::strategy::{ExactStrategy, ToleranceStrategy};

    #[test]
    fn test_average_size() {
        assert_eq!(average_size(&[]), None);
        let slots = [SlotRect::square(0, 0, 16), SlotRect::square(0, 0, 20)];
        assert_eq!(average_size(&slots), Some(18.0));
    }

    #[test]
    fn test_group_rows_uses_first_member_as_reference() {
        let slots = [
            SlotRect::square(40, 10, 16),
            SlotRect::square(10, 13, 16),
            // 7px from the row reference, 4px from its nearest neighbour
            SlotRect::square(70, 17, 16),
            SlotRect::square(10, 50, 16),
        ];
        let rows = group_rows(&slots, 8.0);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].iter().map(|s| s.x).collect::<Vec<_>>(),
            vec![10, 40, 70]
        );
        assert_eq!(rows[1], vec![SlotRect::square(10, 50, 16)]);
    }

    #[test]
    fn test_group_rows_threshold_is_strict() {
        let slots = [SlotRect::square(0, 0, 16), SlotRect::square(20, 8, 16)];
        assert_eq!(group_rows(&slots, 8.0).len(), 2);
        assert_eq!(group_rows(&slots, 8.5).len(), 1);
    }

    #[test]
    fn test_arrange_reading_order() {
        let strategy = ExactStrategy::new(Color::new(139, 139, 139), 2);
        let candidates = [
            SlotRect::square(50, 40, 18),
            SlotRect::square(10, 10, 18),
            SlotRect::square(10, 40, 18),
            SlotRect::square(50, 11, 18),
        ];
        let arranged = arrange(&candidates, &strategy, 0.5);

        assert_eq!(
            arranged,
            vec![
                SlotRect::square(10, 10, 18),
                SlotRect::square(50, 11, 18),
                SlotRect::square(10, 40, 18),
                SlotRect::square(50, 40, 18),
            ]
        );
    }

    #[test]
    fn test_arrange_leaves_single_slot_rows_alone() {
        let strategy = ToleranceStrategy::new(Color::new(128, 128, 128), 10.0, 0.5);
        let candidates = [
            SlotRect::square(10, 10, 16),
            SlotRect::square(40, 10, 20),
            SlotRect::square(10, 60, 24),
        ];
        let arranged = arrange(&candidates, &strategy, 0.5);

        assert_eq!(arranged[0], SlotRect::square(10, 10, 20));
        assert_eq!(arranged[1], SlotRect::square(40, 10, 20));
        // alone in its row, keeps the detected size
        assert_eq!(arranged[2], SlotRect::square(10, 60, 24));
    }

    #[test]
    fn test_reading_order_comparator() {
        let a = SlotRect::square(40, 10, 16);
        assert_eq!(reading_order(&a, &SlotRect::square(4, 17, 16), 8.0), Ordering::Greater);
        assert_eq!(reading_order(&a, &SlotRect::square(4, 18, 16), 8.0), Ordering::Less);
        assert_eq!(reading_order(&a, &a, 8.0), Ordering::Equal);
    }

    #[test]
    fn test_sort_reading_order_is_stable() {
        let mut slots = [
            SlotRect::square(10, 12, 16),
            SlotRect::square(10, 10, 18),
            SlotRect::square(0, 40, 16),
        ];
        sort_reading_order(&mut slots, 8.0);

        // equal under the comparator, input order kept
        assert_eq!(slots[0], SlotRect::square(10, 12, 16));
        assert_eq!(slots[1], SlotRect::square(10, 10, 18));
        assert_eq!(slots[2], SlotRect::square(0, 40, 16));
    }

    #[test]
    fn test_arrange_interleaves_staggered_rows() {
        let strategy = ExactStrategy::new(Color::new(139, 139, 139), 2);
        let candidates = [
            SlotRect::square(40, 10, 16),
            SlotRect::square(80, 16, 16),
            SlotRect::square(4, 20, 16),
        ];
        let arranged = arrange(&candidates, &strategy, 0.5);

        assert_eq!(
            arranged,
            vec![
                SlotRect::square(40, 10, 16),
                SlotRect::square(4, 20, 16),
                SlotRect::square(80, 16, 16),
            ]
        );
    }

    #[test]
    fn test_arrange_empty() {
        let strategy = ExactStrategy::new(Color::new(139, 139, 139), 2);
        assert!(arrange(&[], &strategy, 0.5).is_empty());
    }
}
