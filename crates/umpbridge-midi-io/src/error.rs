//! Error types for the transport boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("UMP conversion error: {0}")]
    Conversion(#[from] umpbridge_midi::ConversionError),

    #[error("Event list full: {needed} words needed, capacity {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    #[error("Transport queue full")]
    TransportFull,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
