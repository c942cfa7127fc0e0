//! Error types for word core.
//!
//! Every failure driven by caller input is one of these values. Contract
//! breaches inside the crate go through [`aver!`](crate::aver) instead.

use thiserror::Error;

/// Errors produced while decoding a rolled blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("item at offset {offset} declares {declared} bytes but only {available} remain in its container")]
    Overrun {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("length prefix at offset {offset} has a leading zero byte")]
    LeadingZero { offset: usize },

    #[error("long-form header at offset {offset} used for length {len} (< 56)")]
    LongFormTooShort { offset: usize, len: usize },

    #[error("single byte 0x{byte:02x} at offset {offset} must encode as itself")]
    WrappedSingleByte { offset: usize, byte: u8 },

    #[error("length prefix at offset {offset} does not fit in usize")]
    LengthOverflow { offset: usize },

    #[error("{trailing} trailing bytes after top-level value ending at offset {consumed}")]
    TrailingBytes { consumed: usize, trailing: usize },

    #[error("nesting exceeds maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },

    #[error("input of {len} bytes exceeds maximum of {max_len}")]
    TooLarge { len: usize, max_len: usize },

    #[error("integer blob has a leading zero byte")]
    NonCanonicalInteger,

    #[error("integer blob of {0} bytes does not fit in u64")]
    IntegerOverflow(usize),
}

/// Errors produced while signing.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("private key is zero")]
    ZeroKey,

    #[error("private key is not below the curve order")]
    KeyOutOfRange,

    #[error("recovery id needs the reduced-x bit and cannot be encoded in one parity byte")]
    ReducedX,

    #[error("curve rejected signing")]
    Curve(#[source] k256::ecdsa::Error),
}

/// Errors produced while recovering a public key from a signature.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("signature must be 65 bytes, got {got}")]
    InvalidLength { got: usize },

    #[error("signature component {0} is zero")]
    ZeroComponent(&'static str),

    #[error("signature component {0} is not below the curve order")]
    ComponentOutOfRange(&'static str),

    #[error("recovery id {0} is not 0 or 1")]
    InvalidRecoveryId(u8),

    #[error("malformed signature scalars")]
    Curve(#[source] k256::ecdsa::Error),

    #[error("no curve point reconstructs from the signature")]
    NoPoint(#[source] k256::ecdsa::Error),
}

/// Any error raised by word core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("signing error: {0}")]
    Signing(#[from] SigningError),

    #[error("recovery error: {0}")]
    Recovery(#[from] RecoveryError),
}
