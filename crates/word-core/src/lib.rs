//! # Word Core
//!
//! Pure primitives for word: a recursive length-prefixed byte encoding,
//! Keccak-256 hashing, and recoverable secp256k1 signatures.
//!
//! This crate does no I/O. Every operation is a function of its inputs.
//!
//! ## Key Types
//!
//! - [`Roll`] - A tree of byte strings and lists
//! - [`Blob`] - An immutable byte string
//! - [`Hash`] - A 32-byte Keccak-256 digest
//! - [`Seck`] / [`Pubk`] / [`Sign`] - Private key, compressed public key, and
//!   65-byte `r || s || v` signature
//!
//! ## Encoding
//!
//! [`roll`] and [`unroll`] convert between a [`Roll`] and its canonical byte
//! form. Decoding accepts only the canonical encoding, so
//! `roll(&unroll(b)?) == b` for every accepted `b`. See the [`roll`](mod@roll)
//! module.
//!
//! ## Signatures
//!
//! [`sign`] and [`scry`] both hash the message before use. Signatures are
//! deterministic (RFC 6979) and always carry a low `s`.

pub mod crypto;
pub mod error;
pub mod hash;
pub mod invariant;
pub mod roll;
pub mod types;

pub use crypto::{context, scry, sign, CurveContext};
pub use error::{CoreError, DecodeError, RecoveryError, SigningError};
pub use hash::hash;
pub use roll::{roll, unroll, unroll_with, Roll, UnrollLimits};
pub use types::{Blob, Hash, Pubk, Seck, Sign};
