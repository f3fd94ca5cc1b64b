use thiserror::Error;

/// Errors produced by the capture pipeline.
///
/// `Tile` is the only recoverable variant: the collector logs it and skips
/// the offending tile. Everything else terminates the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("selector `{selector}` did not appear within {timeout_secs}s")]
    SelectorTimeout { selector: String, timeout_secs: u64 },

    #[error("tile read failed: {0}")]
    Tile(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Workbook open/parse/write failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("workbook I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
