use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    #[error("Image source error: {0}")]
    ImageSource(#[from] bridge_artwork::ImageSourceError),

    #[error("Session event channel closed")]
    SessionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
