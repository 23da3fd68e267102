//! Prime field arithmetic over a runtime modulus.
//!
//! Elements are kept in Montgomery form (`value * R mod m`, `R = 2^256`) as
//! `[u64; 4]` in little-endian order, and carry a `'static` reference to the
//! modulus they live in. Moduli are built once per parameter set and shared.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;

use crate::errors::{CurveError, Result};
use crate::uint::{borrowing_sub, carrying_add, U256};

/// An odd modulus together with its Montgomery constants.
#[derive(Clone, PartialEq, Eq)]
pub struct Modulus {
    limbs: [u64; 4],
    /// R = 2^256 mod m
    r: [u64; 4],
    /// R^2 = 2^512 mod m
    r2: [u64; 4],
    /// -m^{-1} mod 2^64
    inv: u64,
}

impl Modulus {
    pub fn new(value: U256) -> Result<Self> {
        if !value.is_odd() || value == U256::ONE {
            return Err(CurveError::InvalidModulus);
        }

        let m = value.to_biguint();
        let r = U256::from_biguint(&((BigUint::from(1u8) << 256) % &m))
            .ok_or(CurveError::InvalidModulus)?;
        let r2 = U256::from_biguint(&((BigUint::from(1u8) << 512) % &m))
            .ok_or(CurveError::InvalidModulus)?;

        // Newton iteration: m0^(2^63 - 1) = m0^{-1} mod 2^64
        let m0 = value.limbs()[0];
        let mut inv = 1u64;
        for _ in 0..63 {
            inv = inv.wrapping_mul(inv);
            inv = inv.wrapping_mul(m0);
        }

        Ok(Modulus {
            limbs: value.limbs(),
            r: r.limbs(),
            r2: r2.limbs(),
            inv: inv.wrapping_neg(),
        })
    }

    #[inline]
    pub fn value(&self) -> U256 {
        U256::from_limbs(self.limbs)
    }

    #[inline]
    pub fn bits(&self) -> u32 {
        self.value().bits()
    }

    pub fn to_biguint(&self) -> BigUint {
        self.value().to_biguint()
    }
}

impl Debug for Modulus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Modulus({})", self.value())
    }
}

/// Element of the prime field defined by its modulus.
#[derive(Copy, Clone)]
pub struct FieldElement {
    /// Montgomery form: value * R mod m
    limbs: [u64; 4],
    modulus: &'static Modulus,
}

/// Helper: Add two 256-bit numbers mod m
#[inline]
fn add_mod(a: [u64; 4], b: [u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);

    let (s0, borrow) = r0.overflowing_sub(m[0]);
    let (s1, borrow) = borrowing_sub(r1, m[1], borrow);
    let (s2, borrow) = borrowing_sub(r2, m[2], borrow);
    let (s3, borrow) = borrowing_sub(r3, m[3], borrow);

    // Subtract when the sum overflowed 2^256 or is at least m
    if carry || !borrow {
        [s0, s1, s2, s3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// Helper: Subtract two 256-bit numbers mod m
#[inline]
fn sub_mod(a: [u64; 4], b: [u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);

    if borrow {
        let (r0, carry) = r0.overflowing_add(m[0]);
        let (r1, carry) = carrying_add(r1, m[1], carry);
        let (r2, carry) = carrying_add(r2, m[2], carry);
        let (r3, _) = carrying_add(r3, m[3], carry);
        [r0, r1, r2, r3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// Montgomery multiplication: (a * b * R^{-1}) mod m
///
/// Requires `a * b < m * 2^256`, which holds whenever one operand is reduced.
#[inline]
fn montgomery_mul(a: &[u64; 4], b: &[u64; 4], modulus: &Modulus) -> [u64; 4] {
    let m = &modulus.limbs;
    let mut t = [0u64; 8];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    // Moduli close to 2^256 can push the running sum past 2^512 once.
    let mut overflow = false;
    for i in 0..4 {
        let k = t[i].wrapping_mul(modulus.inv);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (m[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for limb in t.iter_mut().skip(i + 4) {
            let sum = (*limb as u128) + carry;
            *limb = sum as u64;
            carry = sum >> 64;
        }
        overflow |= carry != 0;
    }

    let result = [t[4], t[5], t[6], t[7]];
    let (s0, borrow) = result[0].overflowing_sub(m[0]);
    let (s1, borrow) = borrowing_sub(result[1], m[1], borrow);
    let (s2, borrow) = borrowing_sub(result[2], m[2], borrow);
    let (s3, borrow) = borrowing_sub(result[3], m[3], borrow);

    if overflow || !borrow {
        [s0, s1, s2, s3]
    } else {
        result
    }
}

impl FieldElement {
    #[inline]
    pub fn zero(modulus: &'static Modulus) -> Self {
        FieldElement {
            limbs: [0; 4],
            modulus,
        }
    }

    #[inline]
    pub fn one(modulus: &'static Modulus) -> Self {
        FieldElement {
            limbs: modulus.r,
            modulus,
        }
    }

    #[inline]
    pub fn from_u64(value: u64, modulus: &'static Modulus) -> Self {
        Self::from_u256(&U256::from_u64(value), modulus)
    }

    /// Reduces any 256-bit value into the field.
    #[inline]
    pub fn from_u256(value: &U256, modulus: &'static Modulus) -> Self {
        // value * R^2 * R^{-1} = value * R; R^2 < m keeps the product in range.
        FieldElement {
            limbs: montgomery_mul(&value.limbs(), &modulus.r2, modulus),
            modulus,
        }
    }

    /// Accepts only values already below the modulus.
    pub fn from_canonical_u256(value: &U256, modulus: &'static Modulus) -> Option<Self> {
        if *value >= modulus.value() {
            return None;
        }
        Some(Self::from_u256(value, modulus))
    }

    pub fn from_biguint(value: &BigUint, modulus: &'static Modulus) -> Self {
        let reduced = value % modulus.to_biguint();
        // Reduced values always fit in 256 bits.
        let reduced = U256::from_biguint(&reduced).unwrap_or_default();
        Self::from_u256(&reduced, modulus)
    }

    /// Canonical (non-Montgomery) value.
    #[inline]
    pub fn to_u256(&self) -> U256 {
        U256::from_limbs(montgomery_mul(&self.limbs, &[1, 0, 0, 0], self.modulus))
    }

    pub fn to_biguint(&self) -> BigUint {
        self.to_u256().to_biguint()
    }

    /// Canonical value as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.to_u256().to_be_bytes()
    }

    #[inline]
    pub fn modulus(&self) -> &'static Modulus {
        self.modulus
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 4]
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Variable-time exponentiation
    pub fn pow(&self, exp: &U256) -> Self {
        let mut result = Self::one(self.modulus);
        let mut base = *self;

        for &limb in exp.limbs().iter() {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base.square();
                remaining >>= 1;
            }
        }

        result
    }

    /// Multiplicative inverse via Fermat's little theorem.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let exp = self.modulus.value().wrapping_sub(U256::from_u64(2));
        Some(self.pow(&exp))
    }

    /// Square root for moduli `m ≡ 3 (mod 4)`, using the candidate
    /// `self^((m + 1) / 4)`; `None` when `self` is a non-residue.
    pub fn sqrt(&self) -> Option<Self> {
        // (m + 1) / 4 = (m >> 2) + 1 when m ≡ 3 (mod 4)
        let exp = (self.modulus.value() >> 2).wrapping_add(U256::ONE);
        let candidate = self.pow(&exp);
        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }

    #[inline]
    fn same_field(&self, other: &Self) -> bool {
        core::ptr::eq(self.modulus, other.modulus) || self.modulus == other.modulus
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.limbs == other.limbs && self.same_field(other)
    }
}

impl Eq for FieldElement {}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        debug_assert!(self.same_field(&rhs), "field elements from different moduli");
        FieldElement {
            limbs: add_mod(self.limbs, rhs.limbs, &self.modulus.limbs),
            modulus: self.modulus,
        }
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        debug_assert!(self.same_field(&rhs), "field elements from different moduli");
        FieldElement {
            limbs: sub_mod(self.limbs, rhs.limbs, &self.modulus.limbs),
            modulus: self.modulus,
        }
    }
}

impl SubAssign for FieldElement {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.is_zero() {
            return self;
        }
        FieldElement {
            limbs: sub_mod(self.modulus.limbs, self.limbs, &self.modulus.limbs),
            modulus: self.modulus,
        }
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        debug_assert!(self.same_field(&rhs), "field elements from different moduli");
        FieldElement {
            limbs: montgomery_mul(&self.limbs, &rhs.limbs, self.modulus),
            modulus: self.modulus,
        }
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u256())
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::LazyLock;

    // BN254 base field and secp256k1 base field, the latter close to 2^256.
    static SMALL: LazyLock<Modulus> = LazyLock::new(|| {
        Modulus::new(U256::from_limbs([
            0x3c208c16d87cfd47,
            0x97816a916871ca8d,
            0xb85045b68181585d,
            0x30644e72e131a029,
        ]))
        .unwrap()
    });
    static WIDE: LazyLock<Modulus> = LazyLock::new(|| {
        Modulus::new(U256::from_limbs([
            0xfffffffefffffc2f,
            0xffffffffffffffff,
            0xffffffffffffffff,
            0xffffffffffffffff,
        ]))
        .unwrap()
    });

    fn moduli() -> [&'static Modulus; 2] {
        [&SMALL, &WIDE]
    }

    #[test]
    fn test_rejects_even_modulus() {
        assert_eq!(
            Modulus::new(U256::from_u64(10)).unwrap_err(),
            CurveError::InvalidModulus
        );
        assert!(Modulus::new(U256::ONE).is_err());
    }

    #[test]
    fn test_zero_one() {
        for m in moduli() {
            let zero = FieldElement::zero(m);
            let one = FieldElement::one(m);
            assert_eq!(zero + zero, zero);
            assert_eq!(one * one, one);
            assert_eq!(zero * one, zero);
            assert_eq!(one.to_u256(), U256::ONE);
        }
    }

    #[test]
    fn test_small_arithmetic() {
        for m in moduli() {
            let a = FieldElement::from_u64(6, m);
            let b = FieldElement::from_u64(7, m);
            assert_eq!(a * b, FieldElement::from_u64(42, m));
            assert_eq!(a + b, FieldElement::from_u64(13, m));
            assert_eq!(b - a, FieldElement::one(m));
            assert_eq!(a + (-a), FieldElement::zero(m));
        }
    }

    #[test]
    fn test_matches_biguint() {
        let mut rng = StdRng::seed_from_u64(11);
        for m in moduli() {
            let modulus = m.to_biguint();
            for _ in 0..500 {
                let x = U256::from_limbs(rng.random());
                let y = U256::from_limbs(rng.random());
                let fx = FieldElement::from_u256(&x, m);
                let fy = FieldElement::from_u256(&y, m);
                let bx = x.to_biguint() % &modulus;
                let by = y.to_biguint() % &modulus;

                assert_eq!(fx.to_biguint(), bx);
                assert_eq!((fx * fy).to_biguint(), (&bx * &by) % &modulus);
                assert_eq!((fx + fy).to_biguint(), (&bx + &by) % &modulus);
                assert_eq!((fx - fy).to_biguint(), (&bx + &modulus - &by) % &modulus);
            }
        }
    }

    #[test]
    fn test_top_of_range_products() {
        for m in moduli() {
            let max = FieldElement::from_u256(&m.value().wrapping_sub(U256::ONE), m);
            // (-1) * (-1) = 1
            assert_eq!(max * max, FieldElement::one(m));
            assert_eq!(max + FieldElement::one(m), FieldElement::zero(m));
        }
    }

    #[test]
    fn test_inverse() {
        for m in moduli() {
            let a = FieldElement::from_u64(5, m);
            assert_eq!(a * a.inverse().unwrap(), FieldElement::one(m));
            assert!(FieldElement::zero(m).inverse().is_none());
        }
    }

    #[test]
    fn test_sqrt() {
        for m in moduli() {
            let a = FieldElement::from_u64(123_456_789, m);
            let square = a.square();
            let root = square.sqrt().unwrap();
            assert!(root == a || root == -a);
            // -1 is a non-residue when m ≡ 3 (mod 4).
            assert!((-FieldElement::one(m)).sqrt().is_none());
        }
    }

    #[test]
    fn test_canonical_check() {
        let m: &'static Modulus = &SMALL;
        assert!(FieldElement::from_canonical_u256(&m.value(), m).is_none());
        assert!(FieldElement::from_canonical_u256(&m.value().wrapping_sub(U256::ONE), m).is_some());
    }

    #[test]
    fn test_from_biguint_reduces() {
        let m: &'static Modulus = &SMALL;
        let wide = (m.to_biguint() * 3u8) + 17u8;
        assert_eq!(FieldElement::from_biguint(&wide, m), FieldElement::from_u64(17, m));
    }
}
