//! Proptest generators for property-based testing.

use proptest::prelude::*;

use word_core::{crypto::context, Blob, Roll, Seck};

/// Generate a blob of at most `max_len` bytes.
pub fn blob(max_len: usize) -> impl Strategy<Value = Blob> {
    prop::collection::vec(any::<u8>(), 0..=max_len).prop_map(Blob::from)
}

/// Generate a blob biased toward the encoding's length boundaries.
pub fn boundary_blob() -> impl Strategy<Value = Blob> {
    prop_oneof![
        any::<u8>().prop_map(|b| Blob::from([b])),
        prop::collection::vec(any::<u8>(), 54..=57).prop_map(Blob::from),
        prop::collection::vec(any::<u8>(), 255..=257).prop_map(Blob::from),
        Just(Blob::empty()),
    ]
}

/// Generate a roll up to a few levels deep.
pub fn roll() -> impl Strategy<Value = Roll> {
    let leaf = prop_oneof![blob(64), boundary_blob()].prop_map(Roll::Blob);
    leaf.prop_recursive(6, 128, 8, |inner| {
        prop::collection::vec(inner, 0..8).prop_map(Roll::List)
    })
}

/// Generate a private key in `[1, n)`.
pub fn seck() -> impl Strategy<Value = Seck> {
    any::<[u8; 32]>()
        .prop_filter("key must be a valid scalar", |b| context().is_scalar(b))
        .prop_map(Seck)
}

/// Generate a message of at most `max_len` bytes.
pub fn message(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}
