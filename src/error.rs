use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParcelAddressError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("No images found in: {0}")]
    NoImagesFound(String),

    #[error("OCR command failed: {0}")]
    OcrExecution(String),

    #[error("OCR timed out after {seconds}s: {file}")]
    OcrTimeout { file: String, seconds: u64 },

    #[error("Input dialog error: {0}")]
    Dialog(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] parcel_address_common::Error),
}

pub type Result<T> = std::result::Result<T, ParcelAddressError>;
