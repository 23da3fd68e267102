//! Hashing of byte strings to integers.
//!
//! Two strategies implement [`HashToInteger`]: the current wide Keccak hash,
//! whose 448-bit output is left unreduced, and the legacy keyed MAC reduced
//! mod the field prime. Both are pure functions of their input.

use curve::{reduce_mod_order, CurveParameters, U256};
use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use sha2::Sha256;
use sha3::{Digest, Keccak256};

use crate::constants::{
    DIGEST_SIZE, LEGACY_MAC_KEY, WIDE_HASH_HIGH_TAG, WIDE_HASH_LOW_TAG, WIDE_HASH_PREFIX_BYTES,
};

/// A deterministic map from bytes to a non-negative integer.
///
/// Outputs are not reduced mod the group order; callers reduce as needed.
pub trait HashToInteger {
    fn map_to_integer(&self, message: &[u8]) -> BigUint;
}

/// `d1[0..24] ‖ d0` with `d_i = keccak256(i ‖ message)`, as a 448-bit integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeccakWideHash;

impl HashToInteger for KeccakWideHash {
    fn map_to_integer(&self, message: &[u8]) -> BigUint {
        map_to_integer(message)
    }
}

/// HMAC-SHA256 under [`LEGACY_MAC_KEY`], read as an unsigned big-endian
/// integer and reduced mod the field prime of the given curve.
#[derive(Clone, Debug)]
pub struct HmacLegacyHash {
    field_modulus: BigUint,
}

impl HmacLegacyHash {
    pub fn new(curve: &'static CurveParameters) -> Self {
        HmacLegacyHash {
            field_modulus: curve.field_modulus().to_biguint(),
        }
    }
}

impl HashToInteger for HmacLegacyHash {
    fn map_to_integer(&self, message: &[u8]) -> BigUint {
        BigUint::from_bytes_be(&legacy_mac(message)) % &self.field_modulus
    }
}

/// Keccak-256 (the pre-standard padding, not NIST SHA3-256).
pub fn keccak256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Keccak256::digest(data).into()
}

fn tagged_digests(message: &[u8]) -> ([u8; DIGEST_SIZE], [u8; DIGEST_SIZE]) {
    let digest = |tag: u8| -> [u8; DIGEST_SIZE] {
        let mut hasher = Keccak256::new();
        hasher.update([tag]);
        hasher.update(message);
        hasher.finalize().into()
    };
    (digest(WIDE_HASH_LOW_TAG), digest(WIDE_HASH_HIGH_TAG))
}

/// The 448-bit wide hash of `message`.
pub fn map_to_integer(message: &[u8]) -> BigUint {
    let (low, high) = tagged_digests(message);
    let mut wide = [0u8; WIDE_HASH_PREFIX_BYTES + DIGEST_SIZE];
    wide[..WIDE_HASH_PREFIX_BYTES].copy_from_slice(&high[..WIDE_HASH_PREFIX_BYTES]);
    wide[WIDE_HASH_PREFIX_BYTES..].copy_from_slice(&low);
    BigUint::from_bytes_be(&wide)
}

/// The wide hash reduced mod the BN254 order with the on-chain Barrett
/// routine. Agrees with `map_to_integer(message) % n`.
pub fn barrett_map_to_integer(message: &[u8]) -> U256 {
    let (low, high) = tagged_digests(message);
    reduce_mod_order(&U256::from_be_bytes(&high), &U256::from_be_bytes(&low))
}

fn legacy_mac(message: &[u8]) -> [u8; DIGEST_SIZE] {
    // Short HMAC keys are zero-padded to the block size.
    let mut key = Key::<Hmac<Sha256>>::default();
    key[..LEGACY_MAC_KEY.len()].copy_from_slice(LEGACY_MAC_KEY);
    let mut mac = <Hmac<Sha256> as KeyInit>::new(&key);
    mac.update(message);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve::{bn254, secp256k1};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn hex_int(hex: &str) -> BigUint {
        BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
    }

    #[test]
    fn test_keccak_empty_digest() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_wide_hash_vectors() {
        assert_eq!(
            map_to_integer(b"hello"),
            hex_int(
                "742fee43ec710419ee4508dccfacf28c3598a9ba7cdf90faa872873635ad305d25327a952b25396b95b3ddfcfd661ab26241a853f70451c"
            )
        );
        assert_eq!(
            map_to_integer(b""),
            hex_int(
                "5fe7f977e71dba2ea1a68e21057beebb9be2ac30c6410aa3bc36789e7a1e281436464229828f817d6612f7b477d66591ff96a9e064bcc98a"
            )
        );
        assert!(map_to_integer(b"hello").bits() <= 448);
    }

    #[test]
    fn test_legacy_mac_vector() {
        let hasher = HmacLegacyHash::new(secp256k1());
        assert_eq!(
            hasher.map_to_integer(b"hello"),
            hex_int("610c6676b0e13fc34e265799328f5004a99b793ae39037540b2dc51db3a442d4")
        );
    }

    #[test]
    fn test_barrett_agrees_with_wide_hash() {
        let n = bn254().order_biguint();
        let mut rng = StdRng::seed_from_u64(42);
        for len in 0..64 {
            let message: Vec<u8> = (0..len).map(|_| rng.random()).collect();
            let expected = map_to_integer(&message) % &n;
            assert_eq!(barrett_map_to_integer(&message).to_biguint(), expected);
        }
    }

    #[test]
    fn test_no_collisions_mod_order() {
        let n = bn254().order_biguint();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        let mut inputs = HashSet::new();
        while inputs.len() < 1000 {
            let message: [u8; 16] = rng.random();
            if !inputs.insert(message) {
                continue;
            }
            assert!(seen.insert(map_to_integer(&message) % &n));
        }
    }

    #[test]
    fn test_strategies_are_deterministic() {
        let legacy = HmacLegacyHash::new(secp256k1());
        assert_eq!(legacy.map_to_integer(b"x"), legacy.map_to_integer(b"x"));
        assert_ne!(legacy.map_to_integer(b"x"), legacy.map_to_integer(b"y"));
        assert_eq!(KeccakWideHash.map_to_integer(b"x"), map_to_integer(b"x"));
    }
}
