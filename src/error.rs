use alloc::string::String;

use thiserror::Error;

/// Wrong number of colors supplied for an effect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("effect `{effect}` expects {expected} colors, got {actual}")]
pub struct ValidationError {
    pub effect: &'static str,
    pub expected: usize,
    pub actual: usize,
}

/// Device configuration blob could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("configuration is {actual} bytes, expected at least {expected}")]
    TooShort { expected: usize, actual: usize },
    #[error("addressable channel {index} lies outside the configuration")]
    ChannelOutOfRange { index: u8 },
}

/// Failure reported by the controller while talking to the device
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("device is not connected")]
    NotConnected,
    #[error("report write failed: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
