//! # Word Testkit
//!
//! Testing utilities for word.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known encodings, digests, and signatures for cross-implementation checks
//! - **Generators**: Proptest strategies for blobs, rolls, keys, and messages
//! - **Fixtures**: Deterministic and random signers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use word_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, got) in verify_all_vectors() {
//!     assert!(ok, "{name}: got {got}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use word_testkit::generators::{message, seck};
//!
//! proptest! {
//!     #[test]
//!     fn signatures_recover(key in seck(), msg in message(64)) {
//!         let sig = word_core::sign(&msg, &key).unwrap();
//!         prop_assert_eq!(word_core::scry(&msg, &sig).unwrap(), key.pubk().unwrap());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_signers, TestSigner};
pub use vectors::{all_hash_vectors, all_roll_vectors, all_sign_vectors, verify_all_vectors};
