//! Error types for the facade.

use thiserror::Error;
use word_core::{CoreError, DecodeError, RecoveryError, SigningError};

/// Errors returned by [`Word`](crate::Word) operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Decode error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Signing error.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),

    /// Recovery error.
    #[error("recovery error: {0}")]
    Recovery(#[from] RecoveryError),
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Decode(e) => Error::Decode(e),
            CoreError::Signing(e) => Error::Signing(e),
            CoreError::Recovery(e) => Error::Recovery(e),
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Collect the messages along an error's `source()` chain, outermost first.
pub fn causes(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut out = Vec::new();
    let mut next = Some(err);
    while let Some(e) = next {
        out.push(e.to_string());
        next = e.source();
    }
    out
}
