use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Any network, server or transport failure while converting.
    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
