use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Failed to load image: {0}")]
    ImageLoadError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode PNG image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Slot index {index} out of range (slot count: {slot_count})")]
    SlotOutOfRange { index: usize, slot_count: usize },

    #[error("Item catalog error: {0}")]
    CatalogError(String),

    #[error("Slot detection cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
