use std::path::PathBuf;

use anyhow::{Context, bail};
use mcgui_slots_rs::gui_pipeline::catalog::{HttpCatalogSource, global_cache, DEFAULT_ITEM_BASE_URL};
use mcgui_slots_rs::gui_pipeline::compose::{FsIconSource, HttpIconSource, IconSource};
use mcgui_slots_rs::gui_pipeline::{
    Arrangement, ColorMode, DetectionConfig, ExportConfig, PlacedItem, SlotPipeline,
    detect_slots, load_image_pixels,
};
use mcgui_slots_rs::logger;

use tracing::{info, warn};

const USAGE: &str = "usage: mcgui_slots_rs <gui-image> [--tolerance <threshold>] [--min-size <n>] \
[--export <out.png> [--icons <dir>] [--item <slot>=<icon>]...] [--search <query>]";

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    tolerance: Option<f64>,
    min_size: Option<usize>,
    export: Option<PathBuf>,
    icons: Option<PathBuf>,
    items: Vec<(usize, String)>,
    search: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| iter.next().with_context(|| format!("{} needs a value", flag));
        match arg.as_str() {
            "--tolerance" => {
                args.tolerance = Some(value("--tolerance")?.parse().context("invalid --tolerance")?)
            }
            "--min-size" => {
                args.min_size = Some(value("--min-size")?.parse().context("invalid --min-size")?)
            }
            "--export" => args.export = Some(value("--export")?.into()),
            "--icons" => args.icons = Some(value("--icons")?.into()),
            "--item" => {
                let placement = value("--item")?;
                let (slot, icon) = placement
                    .split_once('=')
                    .with_context(|| format!("--item expects <slot>=<icon>, got {}", placement))?;
                let slot = slot.parse().with_context(|| format!("invalid slot index {}", slot))?;
                args.items.push((slot, icon.to_string()));
            }
            "--search" => args.search = Some(value("--search")?),
            "-h" | "--help" => bail!(USAGE),
            _ if arg.starts_with("--") => bail!("unknown option {}\n{}", arg, USAGE),
            _ => args.input = Some(arg.clone()),
        }
    }

    Ok(args)
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = parse_args()?;

    if let Some(query) = &args.search {
        let catalog = global_cache().get_or_load(&HttpCatalogSource::default())?;
        let matches = catalog.search(query);
        info!("{} of {} catalog items match {:?}", matches.len(), catalog.len(), query);
        println!("{}", serde_json::to_string_pretty(&matches)?);
    }

    let Some(input) = args.input.as_deref() else {
        if args.search.is_some() {
            return Ok(());
        }
        bail!(USAGE);
    };

    let mut builder = DetectionConfig::builder();
    if let Some(threshold) = args.tolerance {
        builder = builder.color_mode(ColorMode::tolerance(threshold));
    }
    if let Some(min_size) = args.min_size {
        builder = builder.min_slot_size(min_size);
    }
    let detection = builder.build();
    info!("Detection settings: {:?}", detection.color_mode);

    let slots = match &args.export {
        None => {
            let image = load_image_pixels(input)?;
            detect_slots(&image, &detection)?
        }
        Some(output) => {
            let pipeline = SlotPipeline::new(detection, ExportConfig::default())?;
            let mut arrangement = Arrangement::new(pipeline.detect_file(input)?.len());
            for (slot, icon) in &args.items {
                let id = format!("{}-{}", icon, slot);
                arrangement
                    .assign(*slot, PlacedItem::new(id, icon.as_str()))
                    .with_context(|| format!("cannot place {}", icon))?;
            }
            if arrangement.is_empty() {
                warn!("No --item placements given, exporting the bare texture");
            }

            let icons: Box<dyn IconSource> = match &args.icons {
                Some(dir) => Box::new(FsIconSource::new(dir)),
                None => Box::new(HttpIconSource::with_base_url(DEFAULT_ITEM_BASE_URL)),
            };
            let slots = pipeline.compose_file(input, &arrangement, icons.as_ref(), output)?;
            info!("Wrote {}", output.display());
            slots
        }
    };

    println!("{}", serde_json::to_string_pretty(&slots)?);
    Ok(())
}
