use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no files were provided")]
    NoFilesProvided,
    #[error("unsupported media type: {0}")]
    UnsupportedType(String),
    #[error("file not found")]
    NotFound,
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
