//! Centralized error type for the umpbridge umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Conversion(#[from] umpbridge_midi::ConversionError),

    #[cfg(feature = "io")]
    #[error("Transport: {0}")]
    Io(#[from] umpbridge_midi_io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
