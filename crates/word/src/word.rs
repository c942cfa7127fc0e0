//! The Word handle: the primitives behind one configuration.
//!
//! [`Word`] applies the decode limits from [`WordConfig`] to every
//! [`unroll`](Word::unroll) and logs input it rejects. The other operations
//! are thin wrappers over `word_core`, so a handle and the free functions
//! always agree on output.

use serde::Deserialize;
use word_core::{Blob, Hash, Pubk, Roll, Seck, Sign, UnrollLimits};

use crate::error::Result;

/// Configuration for a [`Word`] handle.
///
/// Both limits default to unbounded. Missing fields deserialize to their
/// defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WordConfig {
    /// Deepest list nesting `unroll` accepts.
    pub max_depth: Option<usize>,
    /// Largest input, in bytes, `unroll` accepts.
    pub max_len: Option<usize>,
}

impl WordConfig {
    /// A configuration suited to untrusted network input.
    pub fn untrusted() -> Self {
        Self {
            max_depth: Some(64),
            max_len: Some(16 * 1024 * 1024),
        }
    }

    /// The decoder limits this configuration describes.
    pub fn limits(&self) -> UnrollLimits {
        UnrollLimits {
            max_depth: self.max_depth,
            max_len: self.max_len,
        }
    }
}

impl From<&WordConfig> for UnrollLimits {
    fn from(config: &WordConfig) -> Self {
        config.limits()
    }
}

/// Entry point for encoding, hashing, signing, and recovery.
#[derive(Debug, Clone)]
pub struct Word {
    config: WordConfig,
    limits: UnrollLimits,
}

impl Word {
    /// Create a handle with the given configuration.
    pub fn new(config: WordConfig) -> Self {
        let limits = config.limits();
        tracing::debug!(
            max_depth = ?limits.max_depth,
            max_len = ?limits.max_len,
            "word handle configured"
        );
        Self { config, limits }
    }

    /// The handle's configuration.
    pub fn config(&self) -> &WordConfig {
        &self.config
    }

    /// Encode a roll.
    pub fn roll(&self, r: &Roll) -> Blob {
        word_core::roll(r)
    }

    /// Decode a roll, enforcing the configured limits.
    pub fn unroll(&self, bytes: &[u8]) -> Result<Roll> {
        word_core::unroll_with(bytes, &self.limits).map_err(|e| {
            tracing::warn!(len = bytes.len(), error = %e, "rejected encoded roll");
            e.into()
        })
    }

    /// Keccak-256 digest of `data`.
    pub fn hash(&self, data: &[u8]) -> Hash {
        word_core::hash(data)
    }

    /// Sign `msg` with `key`.
    pub fn sign(&self, msg: &[u8], key: &Seck) -> Result<Sign> {
        word_core::sign(msg, key).map_err(|e| {
            tracing::warn!(error = %e, "refused to sign");
            e.into()
        })
    }

    /// Recover the public key that signed `msg`.
    pub fn scry(&self, msg: &[u8], sig: &Sign) -> Result<Pubk> {
        word_core::scry(msg, sig).map_err(|e| {
            tracing::warn!(error = %e, "rejected signature");
            e.into()
        })
    }

    /// Whether `sig` over `msg` recovers to `signer`.
    ///
    /// A signature that recovers to nothing is reported as an error, not as `false`.
    pub fn is_signed_by(&self, msg: &[u8], sig: &Sign, signer: &Pubk) -> Result<bool> {
        Ok(self.scry(msg, sig)? == *signer)
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::new(WordConfig::default())
    }
}
