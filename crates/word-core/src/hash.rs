//! Keccak-256 content hashing.
//!
//! This is the original Keccak padding used by Ethereum, not NIST SHA3-256.

use sha3::{Digest, Keccak256};

use crate::types::Hash;

/// Compute the Keccak-256 digest of `data`.
pub fn hash(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash(hasher.finalize().into())
}

impl Hash {
    /// Compute the Keccak-256 digest of `data`.
    pub fn of(data: &[u8]) -> Self {
        hash(data)
    }

    /// The zero hash (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}
