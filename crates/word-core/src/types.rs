//! Strong type definitions for word.
//!
//! Every byte string with a fixed meaning is a newtype so widths are checked
//! at construction and can't be mixed up later.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::aver;
use crate::error::{DecodeError, RecoveryError};

/// An immutable, arbitrary-length byte sequence.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Blob(Bytes);

impl Blob {
    /// The empty blob.
    pub const fn empty() -> Self {
        Self(Bytes::new())
    }

    /// Create from a static byte slice without copying.
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }

    /// Copy from a byte slice.
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to lower-case hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex. An odd number of digits is read as if it had a leading `0`.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = if s.len() % 2 == 1 {
            hex::decode(format!("0{s}"))?
        } else {
            hex::decode(s)?
        };
        Ok(Self::from(bytes))
    }

    /// The UTF-8 bytes of `text`.
    pub fn from_text(text: &str) -> Self {
        Self(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Read as UTF-8, replacing invalid sequences.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }

    /// The last `k` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `k` exceeds the blob length.
    pub fn chop(&self, k: usize) -> Blob {
        let len = self.len();
        aver!(k <= len, "chop: cannot take {} bytes from a blob of {}", k, len);
        Self(self.0.slice(len - k..))
    }

    /// Encode an integer as a minimal big-endian blob (`0` is the empty blob).
    pub fn from_uint(n: u64) -> Self {
        let bytes = n.to_be_bytes();
        let skip = (n.leading_zeros() / 8) as usize;
        Self::copy_from_slice(&bytes[skip..])
    }

    /// Decode a minimal big-endian integer blob.
    pub fn to_uint(&self) -> Result<u64, DecodeError> {
        if self.len() > 8 {
            return Err(DecodeError::IntegerOverflow(self.len()));
        }
        if self.0.first() == Some(&0) {
            return Err(DecodeError::NonCanonicalInteger);
        }
        Ok(self.0.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob(0x{})", self.to_hex())
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from_slice(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Blob {
    fn from(bytes: [u8; N]) -> Self {
        Self::copy_from_slice(&bytes)
    }
}

impl From<Bytes> for Blob {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Blob> for Bytes {
    fn from(blob: Blob) -> Self {
        blob.0
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Blob::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Implements the shared surface of a fixed-width byte newtype.
macro_rules! fixed_bytes {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Width in bytes.
            pub const LEN: usize = $len;

            /// Create from raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Get the raw bytes.
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Convert to hex string.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Parse from hex string.
            pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
                let bytes = hex::decode(s)?;
                let arr: [u8; $len] = bytes
                    .try_into()
                    .map_err(|_| hex::FromHexError::InvalidStringLength)?;
                Ok(Self(arr))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = std::array::TryFromSliceError;

            fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
                let arr: [u8; $len] = slice.try_into()?;
                Ok(Self(arr))
            }
        }
    };
}

/// Serialize a fixed-width newtype as a hex string.
macro_rules! hex_serde {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(pub [u8; 32]);

fixed_bytes!(Hash, 32);
hex_serde!(Hash);

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 32-byte secp256k1 private key.
///
/// The bytes are not range-checked here; signing rejects zero and values not
/// below the curve order.
#[derive(Clone, PartialEq, Eq)]
pub struct Seck(pub [u8; 32]);

fixed_bytes!(Seck, 32);

impl fmt::Debug for Seck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seck(..)")
    }
}

/// A 33-byte SEC1-compressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubk(pub [u8; 33]);

fixed_bytes!(Pubk, 33);
hex_serde!(Pubk);

impl Pubk {
    /// Whether the y coordinate of the point is odd.
    pub fn is_odd(&self) -> bool {
        self.0[0] == 0x03
    }
}

impl fmt::Debug for Pubk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubk({})", &self.to_hex()[..18])
    }
}

impl fmt::Display for Pubk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 65-byte recoverable signature laid out as `r || s || v`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sign(pub [u8; 65]);

fixed_bytes!(Sign, 65);
hex_serde!(Sign);

impl Sign {
    /// Build from untrusted bytes, which must be exactly 65 long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RecoveryError> {
        Self::try_from(bytes).map_err(|_| RecoveryError::InvalidLength { got: bytes.len() })
    }

    /// Assemble from components.
    pub fn from_parts(r: &[u8; 32], s: &[u8; 32], v: u8) -> Self {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(r);
        out[32..64].copy_from_slice(s);
        out[64] = v;
        Self(out)
    }

    /// The `r` component, big-endian.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[..32]);
        r
    }

    /// The `s` component, big-endian.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..64]);
        s
    }

    /// The recovery id.
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl fmt::Debug for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sign({}...)", &self.to_hex()[..16])
    }
}
