//! Recoverable ECDSA over secp256k1.
//!
//! [`sign`] hashes the message with Keccak-256 and signs the digest with an
//! RFC 6979 deterministic nonce. [`scry`] hashes the same message and recovers
//! the signer's compressed public key from the 65-byte signature.
//!
//! Signatures are always low-S. When the raw `s` lands in the upper half of
//! the group order it is negated and the recovery parity flipped, so the pair
//! still recovers the same key.

use std::sync::LazyLock;

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::FieldBytes;

use crate::aver;
use crate::error::{RecoveryError, SigningError};
use crate::hash::hash;
use crate::types::{Pubk, Seck, Sign};

/// The secp256k1 group order n, big-endian.
const ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Read-only curve parameters shared by every call.
///
/// Scalars are compared as big-endian byte arrays, which orders them numerically.
#[derive(Debug)]
pub struct CurveContext {
    order: [u8; 32],
    half_order: [u8; 32],
}

static CONTEXT: LazyLock<CurveContext> = LazyLock::new(CurveContext::new);

/// The process-wide curve context, built on first use.
pub fn context() -> &'static CurveContext {
    &CONTEXT
}

impl CurveContext {
    fn new() -> Self {
        let half_order = shr1(&ORDER);
        tracing::debug!(target: "word::crypto", "secp256k1 context initialized");
        Self {
            order: ORDER,
            half_order,
        }
    }

    /// The group order n.
    pub fn order(&self) -> &[u8; 32] {
        &self.order
    }

    /// floor(n / 2), the largest `s` a canonical signature may carry.
    pub fn half_order(&self) -> &[u8; 32] {
        &self.half_order
    }

    /// Whether `x` is a valid non-zero scalar.
    pub fn is_scalar(&self, x: &[u8; 32]) -> bool {
        !is_zero(x) && x < &self.order
    }

    /// Whether `s` is in the lower half of the order.
    pub fn is_low_s(&self, s: &[u8; 32]) -> bool {
        s <= &self.half_order
    }

    fn check_component(&self, name: &'static str, x: &[u8; 32]) -> Result<(), RecoveryError> {
        if is_zero(x) {
            return Err(RecoveryError::ZeroComponent(name));
        }
        if x >= &self.order {
            return Err(RecoveryError::ComponentOutOfRange(name));
        }
        Ok(())
    }

    fn signing_key(&self, key: &Seck) -> Result<SigningKey, SigningError> {
        if is_zero(key.as_bytes()) {
            return Err(SigningError::ZeroKey);
        }
        if key.as_bytes() >= &self.order {
            return Err(SigningError::KeyOutOfRange);
        }
        SigningKey::from_slice(key.as_bytes()).map_err(SigningError::Curve)
    }
}

/// Sign `msg` with `key`.
///
/// The message is hashed with Keccak-256 first. Output is `r || s || v` with
/// `s` in the lower half of the order and `v` in `{0, 1}`.
pub fn sign(msg: &[u8], key: &Seck) -> Result<Sign, SigningError> {
    let ctx = context();
    let dig = hash(msg);
    let signing_key = ctx.signing_key(key)?;

    let (signature, recid) = signing_key
        .sign_prehash_recoverable(dig.as_bytes())
        .map_err(SigningError::Curve)?;

    let (signature, recid) = match signature.normalize_s() {
        Some(low) => (low, RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced())),
        None => (signature, recid),
    };
    if recid.is_x_reduced() {
        return Err(SigningError::ReducedX);
    }

    let (r, s) = signature.split_bytes();
    let sig = Sign::from_parts(&r.into(), &s.into(), recid.to_byte());
    aver!(ctx.is_low_s(&sig.s()), "sign produced a high-S signature");
    aver!(sig.v() <= 1, "sign produced recovery id {}", sig.v());
    Ok(sig)
}

/// Recover the compressed public key that signed `msg`.
///
/// `msg` must be the original message, not its digest. A high-S signature
/// recovers the same key as its low-S counterpart.
pub fn scry(msg: &[u8], sig: &Sign) -> Result<Pubk, RecoveryError> {
    let ctx = context();
    let dig = hash(msg);

    let r = sig.r();
    let s = sig.s();
    ctx.check_component("r", &r)?;
    ctx.check_component("s", &s)?;

    let v = sig.v();
    let recid = match v {
        0 | 1 => RecoveryId::from_byte(v),
        _ => None,
    }
    .ok_or(RecoveryError::InvalidRecoveryId(v))?;

    let signature = Signature::from_scalars(FieldBytes::from(r), FieldBytes::from(s))
        .map_err(RecoveryError::Curve)?;
    // (r, n - s) with the parity flipped names the same key; k256 only
    // recovers from the low-S form.
    let (signature, recid) = match signature.normalize_s() {
        Some(low) => (low, RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced())),
        None => (signature, recid),
    };
    let key = VerifyingKey::recover_from_prehash(dig.as_bytes(), &signature, recid)
        .map_err(RecoveryError::NoPoint)?;

    Ok(compress(&key))
}

impl Seck {
    /// Derive the compressed public key for this private key.
    pub fn pubk(&self) -> Result<Pubk, SigningError> {
        let signing_key = context().signing_key(self)?;
        Ok(compress(signing_key.verifying_key()))
    }
}

fn compress(key: &VerifyingKey) -> Pubk {
    let point = key.as_affine().to_encoded_point(true);
    let bytes = point.as_bytes();
    aver!(
        bytes.len() == Pubk::LEN,
        "compressed point is {} bytes",
        bytes.len()
    );
    let mut out = [0u8; 33];
    out.copy_from_slice(bytes);
    Pubk(out)
}

fn is_zero(x: &[u8; 32]) -> bool {
    x.iter().all(|&b| b == 0)
}

/// Shift a big-endian integer right by one bit.
fn shr1(x: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry = 0u8;
    for (o, &b) in out.iter_mut().zip(x.iter()) {
        *o = (b >> 1) | carry;
        carry = b << 7;
    }
    out
}
