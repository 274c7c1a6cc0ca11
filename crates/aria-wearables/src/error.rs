use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WearableError {
    #[error("Unknown device '{0}'")]
    UnknownDevice(String),

    #[error("Device '{0}' is not connected")]
    NotConnected(String),
}

pub type Result<T> = std::result::Result<T, WearableError>;
