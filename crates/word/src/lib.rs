//! # Word
//!
//! The unified API for word: the byte-level primitives a larger protocol
//! builds on.
//!
//! ## Overview
//!
//! - **Rolls**: Trees of byte strings with one canonical RLP encoding
//! - **Hashes**: Keccak-256 digests of arbitrary bytes
//! - **Signatures**: Deterministic, low-S, recoverable secp256k1 signatures
//!   over the Keccak-256 digest of a message
//!
//! ## Usage
//!
//! ```rust
//! use word::{Roll, Seck, Word, WordConfig};
//!
//! let word = Word::new(WordConfig::default());
//!
//! // Encode a tree and read it back
//! let tree = Roll::list([Roll::blob(*b"cat"), Roll::blob(*b"dog")]);
//! let bytes = word.roll(&tree);
//! assert_eq!(word.unroll(bytes.as_bytes()).unwrap(), tree);
//!
//! // Sign the encoding and recover the signer
//! let seck = Seck::from_bytes([0x42; 32]);
//! let sig = word.sign(bytes.as_bytes(), &seck).unwrap();
//! assert_eq!(word.scry(bytes.as_bytes(), &sig).unwrap(), seck.pubk().unwrap());
//! ```
//!
//! ## Re-exports
//!
//! - `word::core` - The primitives crate, usable without a [`Word`] handle

pub mod error;
pub mod word;

pub use word_core as core;

pub use error::{causes, Error, Result};
pub use word::{Word, WordConfig};

pub use word_core::{
    hash, roll, scry, sign, unroll, unroll_with, Blob, DecodeError, Hash, Pubk, RecoveryError,
    Roll, Seck, Sign, SigningError, UnrollLimits,
};
