//! Test fixtures and helpers.

use rand::RngCore;
use word_core::{hash, Pubk, Seck, Sign, SigningError};

/// A private key together with its public key.
#[derive(Debug, Clone)]
pub struct TestSigner {
    pub seck: Seck,
    pub pubk: Pubk,
}

impl TestSigner {
    /// Wrap an existing key, deriving its public key.
    pub fn new(seck: Seck) -> Result<Self, SigningError> {
        let pubk = seck.pubk()?;
        Ok(Self { seck, pubk })
    }

    /// A deterministic signer: the key is the Keccak-256 chain of `seed`,
    /// rehashed until it lands on a valid scalar.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let mut candidate = seed;
        loop {
            candidate = hash(&candidate).0;
            if let Ok(signer) = Self::new(Seck(candidate)) {
                return signer;
            }
        }
    }

    /// A signer with a key from the thread-local RNG.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            if let Ok(signer) = Self::new(Seck(bytes)) {
                return signer;
            }
        }
    }

    /// Sign `msg` with this signer's key.
    pub fn sign(&self, msg: &[u8]) -> Sign {
        match word_core::sign(msg, &self.seck) {
            Ok(sig) => sig,
            Err(e) => panic!("test signer failed to sign: {e}"),
        }
    }
}

impl Default for TestSigner {
    fn default() -> Self {
        Self::random()
    }
}

/// Create several deterministic signers for multi-party tests.
pub fn multi_signers(count: usize) -> Vec<TestSigner> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_be_bytes());
            TestSigner::from_seed(seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_seed_deterministic() {
        let a = TestSigner::from_seed([0x42; 32]);
        let b = TestSigner::from_seed([0x42; 32]);
        assert_eq!(a.seck, b.seck);
        assert_eq!(a.pubk, b.pubk);
        assert_ne!(a.pubk, TestSigner::from_seed([0x43; 32]).pubk);
    }

    #[test]
    fn test_zero_seed_still_valid() {
        let signer = TestSigner::from_seed([0; 32]);
        assert_eq!(signer.seck.pubk().unwrap(), signer.pubk);
    }

    #[test]
    fn test_new_rejects_zero_key() {
        assert!(matches!(
            TestSigner::new(Seck([0; 32])),
            Err(SigningError::ZeroKey)
        ));
    }

    #[test]
    fn test_multi_signers_distinct() {
        let signers = multi_signers(5);
        assert_eq!(signers.len(), 5);
        for (i, a) in signers.iter().enumerate() {
            for b in &signers[i + 1..] {
                assert_ne!(a.pubk, b.pubk);
            }
        }
    }

    #[test]
    fn test_random_signer_round_trip() {
        let signer = TestSigner::random();
        let sig = signer.sign(b"payload");
        assert_eq!(word_core::scry(b"payload", &sig).unwrap(), signer.pubk);
    }
}
