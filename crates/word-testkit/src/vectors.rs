//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding, the Keccak-256 digest, and the
//! RFC 6979 signatures, so every implementation produces identical bytes.

use serde::Serialize;
use word_core::{hash, roll, scry, sign, unroll, Blob, Roll, Seck, Sign};

/// An encoding vector: a roll and its canonical bytes.
#[derive(Debug, Clone, Serialize)]
pub struct RollVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Builds the input roll.
    #[serde(skip)]
    pub build: fn() -> Roll,
    /// Expected encoding (hex).
    pub encoded: &'static str,
}

/// A digest vector.
#[derive(Debug, Clone, Serialize)]
pub struct HashVector {
    pub name: &'static str,
    /// Input bytes (hex).
    pub input: &'static str,
    /// Expected Keccak-256 digest (hex).
    pub digest: &'static str,
}

/// A signature vector. The message is signed as-is; hashing happens inside `sign`.
#[derive(Debug, Clone, Serialize)]
pub struct SignVector {
    pub name: &'static str,
    /// Private key (hex).
    pub seck: &'static str,
    /// Message (hex).
    pub msg: &'static str,
    /// Expected compressed public key (hex).
    pub pubk: &'static str,
    /// Expected `r || s || v` signature (hex).
    pub sign: &'static str,
}

/// A blob from a hex literal in the vector table.
///
/// # Panics
///
/// Panics on malformed hex in the table.
fn b(hex: &str) -> Roll {
    match Blob::from_hex(hex) {
        Ok(blob) => Roll::Blob(blob),
        Err(e) => panic!("malformed blob hex {hex:?} in vector table: {e}"),
    }
}

fn t(text: &'static str) -> Roll {
    Roll::Blob(Blob::from_static(text.as_bytes()))
}

fn l<const N: usize>(items: [Roll; N]) -> Roll {
    Roll::list(items)
}

/// Get all encoding vectors.
pub fn all_roll_vectors() -> Vec<RollVector> {
    vec![
        RollVector {
            name: "mixed nesting",
            build: || l([b("00"), b(""), l([b("ffff"), l([])])]),
            encoded: "c70080c482ffffc0",
        },
        RollVector {
            name: "short string",
            build: || t("dog"),
            encoded: "83646f67",
        },
        RollVector {
            name: "list of strings",
            build: || l([t("cat"), t("dog")]),
            encoded: "c88363617483646f67",
        },
        RollVector {
            name: "set theoretic three",
            build: || l([l([]), l([l([])]), l([l([]), l([l([])])])]),
            encoded: "c7c0c1c0c3c0c1c0",
        },
        RollVector {
            name: "56 byte string",
            build: || t("Lorem ipsum dolor sit amet, consectetur adipisicing elit"),
            encoded: "b8384c6f72656d20697073756d20646f6c6f722073697420616d65742c20636f6e\
                      7365637465747572206164697069736963696e6720656c6974",
        },
        RollVector {
            name: "empty string",
            build: || b(""),
            encoded: "80",
        },
        RollVector {
            name: "empty list",
            build: || l([]),
            encoded: "c0",
        },
        RollVector {
            name: "single low byte",
            build: || b("0f"),
            encoded: "0f",
        },
        RollVector {
            name: "single high byte",
            build: || b("80"),
            encoded: "8180",
        },
        RollVector {
            name: "integer 1024",
            build: || Roll::Blob(Blob::from_uint(1024)),
            encoded: "820400",
        },
        RollVector {
            name: "nested empty lists",
            build: || l([l([l([])])]),
            encoded: "c2c1c0",
        },
    ]
}

/// Get all digest vectors.
pub fn all_hash_vectors() -> Vec<HashVector> {
    vec![
        HashVector {
            name: "empty",
            input: "",
            digest: "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
        },
        HashVector {
            name: "abc",
            input: "616263",
            digest: "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45",
        },
        HashVector {
            name: "hello",
            input: "68656c6c6f",
            digest: "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8",
        },
        HashVector {
            name: "mixed nesting encoding",
            input: "c70080c482ffffc0",
            digest: "d79baae67cc9a523cc18fe056d51da91a9555202ebbaffe8e5f978139a3604d7",
        },
    ]
}

/// Get all signature vectors.
pub fn all_sign_vectors() -> Vec<SignVector> {
    vec![
        SignVector {
            name: "key one, empty message",
            seck: "0000000000000000000000000000000000000000000000000000000000000001",
            msg: "",
            pubk: "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            sign: "03925438bf9bdfed9cb8d9d9467f8fc624f389846f0db71f4f5c84b483077da6\
                   2ca68cb1027ace392bc6a84fe0ba29288aa07942f571f56201dd33c009ee3886\
                   01",
        },
        SignVector {
            name: "repeated key, hello",
            seck: "4242424242424242424242424242424242424242424242424242424242424242",
            msg: "68656c6c6f",
            pubk: "0324653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c",
            sign: "005c1c71b88b2285aea296e0b7add93e2bdd583cdcfbf2e29927652640f5e0a5\
                   2349ff46eb75026c22c9e4c49c2bf111f5647dc17cd51ddaa5c01e10d9f80209\
                   00",
        },
        SignVector {
            name: "largest key, encoded roll",
            seck: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140",
            msg: "c70080c482ffffc0",
            pubk: "0379be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            sign: "eb3b3cc52a1f44dff09e1f5462f92063b22289fc8a10281b347be16472c6d12f\
                   517caf75f02d21d0d74c44ac755ba149c02f02fe271262124af78d73f249678e\
                   01",
        },
        SignVector {
            name: "sevens, 50 byte message",
            seck: "0707070707070707070707070707070707070707070707070707070707070707",
            msg: "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f\
                  202122232425262728292a2b2c2d2e2f3031",
            pubk: "02989c0b76cb563971fdc9bef31ec06c3560f3249d6ee9e5d83c57625596e05f6f",
            sign: "9801f71812710694e24692bf174d649b0bfb08467c6caad713af9b40e0bd5a83\
                   2fcd9740d387251b510cc5bc0e04dc8f0dd451a0470733deb44253f4df0d567f\
                   01",
        },
    ]
}

fn check_roll(v: &RollVector) -> (bool, String) {
    let input = (v.build)();
    let encoded = roll(&input);
    let decodes = unroll(encoded.as_bytes()).is_ok_and(|r| r == input);
    let hex = encoded.to_hex();
    (decodes && hex == v.encoded, hex)
}

fn check_hash(v: &HashVector) -> (bool, String) {
    let Ok(input) = hex::decode(v.input) else {
        return (false, "malformed vector".to_string());
    };
    let hex = hash(&input).to_hex();
    (hex == v.digest, hex)
}

fn check_sign(v: &SignVector) -> (bool, String) {
    let (Ok(seck), Ok(msg)) = (Seck::from_hex(v.seck), hex::decode(v.msg)) else {
        return (false, "malformed vector".to_string());
    };
    let sig = match sign(&msg, &seck) {
        Ok(sig) => sig,
        Err(e) => return (false, e.to_string()),
    };
    let recovers = scry(&msg, &sig).is_ok_and(|p| p.to_hex() == v.pubk);
    let pubk_matches = seck.pubk().is_ok_and(|p| p.to_hex() == v.pubk);
    let hex = sig.to_hex();
    (recovers && pubk_matches && hex == v.sign, hex)
}

/// Check every vector against this build.
///
/// Returns `(name, matches, actual)` per vector, where `actual` is the
/// produced encoding, digest, or signature in hex.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let rolls = all_roll_vectors()
        .into_iter()
        .map(|v| (v.name, check_roll(&v)));
    let hashes = all_hash_vectors()
        .into_iter()
        .map(|v| (v.name, check_hash(&v)));
    let signs = all_sign_vectors()
        .into_iter()
        .map(|v| (v.name, check_sign(&v)));

    rolls
        .chain(hashes)
        .chain(signs)
        .map(|(name, (ok, got))| (name.to_string(), ok, got))
        .collect()
}

/// All vectors as one JSON document, for other implementations to consume.
pub fn vectors_json() -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Bundle {
        roll: Vec<RollVector>,
        hash: Vec<HashVector>,
        sign: Vec<SignVector>,
    }
    serde_json::to_string_pretty(&Bundle {
        roll: all_roll_vectors(),
        hash: all_hash_vectors(),
        sign: all_sign_vectors(),
    })
}

/// Parse a vector's signature field.
pub fn expected_sign(v: &SignVector) -> Option<Sign> {
    Sign::from_hex(v.sign).ok()
}
