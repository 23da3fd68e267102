//! Barrett reduction modulo the BN254 group order.
//!
//! Mirrors the fixed-point reducer run by the on-chain verifier, which has no
//! native division: byte-wise Barrett with `b = 2^8`, `k = 31` and
//! `mu = floor(2^496 / n)`. The input is the 448-bit value formed by the 192
//! most significant bits of `high` followed by all of `low`, which is exactly
//! the width of the wide identifier hash.
//!
//! The final correction subtracts `n` while `r >= n`. The on-chain reducer
//! stops at `r > n`, so for an input that is an exact multiple of `n` it
//! returns `n` where this function returns 0. Every other input agrees.

use crate::uint::{karatsuba_mul, U256};

/// n = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001
pub const BN254_ORDER: U256 = U256::from_limbs([
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

/// floor(2^496 / n)
pub const BARRETT_MU: U256 = U256::from_limbs([
    0x0ae620703a6be1de,
    0x0147144852009e88,
    0x4a7ab074a5868073,
    0x00054a47462623a0,
]);

/// Computes `((high >> 64) * 2^256 + low) mod n`.
///
/// The estimate `q1` is the top 192 bits of `high` followed by the two most
/// significant bytes of `low`. The Barrett estimate undershoots the quotient
/// by at most one, so a single correction step normally suffices.
pub fn reduce_mod_order(high: &U256, low: &U256) -> U256 {
    let q1 = ((*high >> 64) << 16) | (*low >> 240);
    let (q3, _) = karatsuba_mul(q1, BARRETT_MU);
    let (_, q3_times_n) = karatsuba_mul(q3, BN254_ORDER);

    // Wrapping subtraction adds 2^256 whenever the difference is negative.
    let mut r = low.wrapping_sub(q3_times_n);
    while r >= BN254_ORDER {
        r = r.wrapping_sub(BN254_ORDER);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn reference(high: &U256, low: &U256) -> U256 {
        let wide = ((high.to_biguint() >> 64) << 256) + low.to_biguint();
        U256::from_biguint(&(wide % BN254_ORDER.to_biguint())).unwrap()
    }

    fn split(value: &BigUint) -> (U256, U256) {
        let two_256 = BigUint::from(1u8) << 256;
        let low = U256::from_biguint(&(value % &two_256)).unwrap();
        let high = U256::from_biguint(&((value >> 256) << 64)).unwrap();
        (high, low)
    }

    #[test]
    fn test_mu_constant() {
        let expected = (BigUint::from(1u8) << 496) / BN254_ORDER.to_biguint();
        assert_eq!(BARRETT_MU.to_biguint(), expected);
    }

    #[test]
    fn test_matches_reference_on_random_inputs() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..10_000 {
            let high = U256::from_limbs(rng.random());
            let low = U256::from_limbs(rng.random());
            assert_eq!(reduce_mod_order(&high, &low), reference(&high, &low));
        }
    }

    #[test]
    fn test_zero_high() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..256 {
            let low = U256::from_limbs(rng.random());
            assert_eq!(reduce_mod_order(&U256::ZERO, &low), reference(&U256::ZERO, &low));
        }
        assert_eq!(reduce_mod_order(&U256::ZERO, &U256::MAX), reference(&U256::ZERO, &U256::MAX));
        assert_eq!(reduce_mod_order(&U256::ZERO, &U256::ZERO), U256::ZERO);
    }

    #[test]
    fn test_values_near_order() {
        let n_minus_one = BN254_ORDER.wrapping_sub(U256::ONE);
        assert_eq!(reduce_mod_order(&U256::ZERO, &n_minus_one), n_minus_one);
        assert_eq!(reduce_mod_order(&U256::ZERO, &BN254_ORDER), U256::ZERO);
        let n_plus_one = BN254_ORDER.wrapping_add(U256::ONE);
        assert_eq!(reduce_mod_order(&U256::ZERO, &n_plus_one), U256::ONE);
    }

    #[test]
    fn test_exact_multiples_reduce_to_zero() {
        let n = BN254_ORDER.to_biguint();
        let max_multiplier = ((BigUint::from(1u8) << 448) - 1u8) / &n;
        let multipliers = [
            BigUint::from(1u8),
            BigUint::from(2u8),
            BigUint::from(12345u32),
            BigUint::from(1u8) << 150,
            BigUint::from(1u8) << 193,
            max_multiplier,
        ];
        for k in multipliers.iter() {
            let (high, low) = split(&(k * &n));
            assert_eq!(reduce_mod_order(&high, &low), U256::ZERO, "multiplier {k}");
        }
    }

    #[test]
    fn test_ignores_low_64_bits_of_high() {
        let high = U256::from_limbs([0xdead_beef, 1, 2, 3]);
        let masked = U256::from_limbs([0, 1, 2, 3]);
        let low = U256::from_limbs([9, 8, 7, 6]);
        assert_eq!(reduce_mod_order(&high, &low), reduce_mod_order(&masked, &low));
    }
}
