//! Scalars modulo the group order.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use rand::TryCryptoRng;

use crate::errors::{CurveError, Result};
use crate::field::{FieldElement, Modulus};
use crate::group::ScalarBits;
use crate::params::CurveParameters;
use crate::uint::U256;

/// Extra bits sampled beyond the order so that reducing mod `n` leaves a
/// statistically negligible bias.
pub const SAMPLE_SECURITY_MARGIN_BITS: u32 = 128;

/// An element of `Z_n` where `n` is the order of a curve group.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Scalar(FieldElement);

impl Scalar {
    #[inline]
    pub fn zero(curve: &'static CurveParameters) -> Self {
        Scalar(FieldElement::zero(curve.order()))
    }

    #[inline]
    pub fn one(curve: &'static CurveParameters) -> Self {
        Scalar(FieldElement::one(curve.order()))
    }

    #[inline]
    pub fn from_u64(value: u64, curve: &'static CurveParameters) -> Self {
        Scalar(FieldElement::from_u64(value, curve.order()))
    }

    /// Reduces a 256-bit value mod `n`.
    #[inline]
    pub fn from_u256(value: &U256, curve: &'static CurveParameters) -> Self {
        Scalar(FieldElement::from_u256(value, curve.order()))
    }

    /// Reduces an arbitrary-width integer mod `n`.
    pub fn from_biguint(value: &BigUint, curve: &'static CurveParameters) -> Self {
        Scalar(FieldElement::from_biguint(value, curve.order()))
    }

    /// Samples `bits(n) + 128` uniform bits and reduces them mod `n`.
    ///
    /// Fails when the randomness source fails; no fallback source is used.
    pub fn random<R: TryCryptoRng + ?Sized>(
        curve: &'static CurveParameters,
        rng: &mut R,
    ) -> Result<Self> {
        let width = (curve.order().bits() + SAMPLE_SECURITY_MARGIN_BITS).div_ceil(8) as usize;
        let mut bytes = vec![0u8; width];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|err| CurveError::RandomnessFailure(err.to_string()))?;
        Ok(Self::from_biguint(&BigUint::from_bytes_be(&bytes), curve))
    }

    /// Canonical value in `[0, n)`.
    #[inline]
    pub fn to_u256(&self) -> U256 {
        self.0.to_u256()
    }

    pub fn to_biguint(&self) -> BigUint {
        self.0.to_biguint()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The group order this scalar is reduced by.
    #[inline]
    pub fn modulus(&self) -> &'static Modulus {
        self.0.modulus()
    }

    /// Whether this scalar was reduced by the order of `curve`.
    pub fn belongs_to(&self, curve: &'static CurveParameters) -> bool {
        let order = curve.order();
        core::ptr::eq(self.modulus(), order) || self.modulus() == order
    }

    pub fn inverse(&self) -> Option<Self> {
        self.0.inverse().map(Scalar)
    }

    /// Shortest big-endian two's-complement form of the (non-negative) value:
    /// leading zeros stripped, one `0x00` kept when the top bit would
    /// otherwise be set. Zero encodes as `[0x00]`.
    pub fn to_minimal_bytes(&self) -> Vec<u8> {
        let bytes = self.0.to_be_bytes();
        let start = bytes.iter().position(|&byte| byte != 0).unwrap_or(bytes.len());
        let mut out = Vec::with_capacity(33 - start);
        if start == bytes.len() || bytes[start] & 0x80 != 0 {
            out.push(0);
        }
        out.extend_from_slice(&bytes[start..]);
        out
    }

    /// Inverse of [`Scalar::to_minimal_bytes`]. Rejects negative encodings and
    /// values that are not below the group order.
    pub fn from_minimal_bytes(bytes: &[u8], curve: &'static CurveParameters) -> Result<Self> {
        match bytes.first() {
            None => return Err(CurveError::InvalidEncoding("empty scalar")),
            Some(byte) if byte & 0x80 != 0 => {
                return Err(CurveError::InvalidEncoding("negative scalar"))
            }
            _ => {}
        }
        let start = bytes.iter().position(|&byte| byte != 0).unwrap_or(bytes.len());
        let value = U256::from_be_slice(&bytes[start..])
            .ok_or(CurveError::InvalidEncoding("scalar wider than 256 bits"))?;
        FieldElement::from_canonical_u256(&value, curve.order())
            .map(Scalar)
            .ok_or(CurveError::InvalidEncoding("scalar not below the group order"))
    }
}

impl ScalarBits for Scalar {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_u256().limbs()
    }
}

impl Add for Scalar {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Scalar(self.0 + rhs.0)
    }
}

impl AddAssign for Scalar {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Scalar {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Scalar(self.0 - rhs.0)
    }
}

impl SubAssign for Scalar {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul for Scalar {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Scalar(self.0 * rhs.0)
    }
}

impl MulAssign for Scalar {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

impl Neg for Scalar {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Scalar(-self.0)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{bn254, secp256k1};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reduction_mod_order() {
        let curve = bn254();
        let n = curve.order_biguint();
        let wrapped = Scalar::from_biguint(&(&n + 5u8), curve);
        assert_eq!(wrapped, Scalar::from_u64(5, curve));
        assert!(Scalar::from_biguint(&n, curve).is_zero());
    }

    #[test]
    fn test_arithmetic() {
        let curve = secp256k1();
        let a = Scalar::from_u64(10, curve);
        let b = Scalar::from_u64(4, curve);
        assert_eq!(a - b, Scalar::from_u64(6, curve));
        assert_eq!(b - a + a, b);
        assert_eq!(a * b, Scalar::from_u64(40, curve));
        assert_eq!(a * a.inverse().unwrap(), Scalar::one(curve));
        assert_eq!(a + (-a), Scalar::zero(curve));
    }

    #[test]
    fn test_random_is_reduced_and_varies() {
        let curve = bn254();
        let mut rng = StdRng::seed_from_u64(42);
        let n = curve.order_biguint();
        let a = Scalar::random(curve, &mut rng).unwrap();
        let b = Scalar::random(curve, &mut rng).unwrap();
        assert_ne!(a, b);
        assert!(a.to_biguint() < n);
        assert!(b.to_biguint() < n);
    }

    #[test]
    fn test_minimal_bytes() {
        let curve = bn254();
        assert_eq!(Scalar::zero(curve).to_minimal_bytes(), vec![0x00]);
        assert_eq!(Scalar::from_u64(0x7f, curve).to_minimal_bytes(), vec![0x7f]);
        assert_eq!(Scalar::from_u64(0x80, curve).to_minimal_bytes(), vec![0x00, 0x80]);
        assert_eq!(Scalar::from_u64(0x0100, curve).to_minimal_bytes(), vec![0x01, 0x00]);

        // secp256k1 order has its top bit set, so large scalars need the pad.
        let wide = -Scalar::one(secp256k1());
        let bytes = wide.to_minimal_bytes();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(Scalar::from_minimal_bytes(&bytes, secp256k1()).unwrap(), wide);
    }

    #[test]
    fn test_belongs_to_its_own_curve_only() {
        let on_bn = Scalar::from_u64(5, bn254());
        let on_secp = Scalar::from_u64(5, secp256k1());
        assert!(on_bn.belongs_to(bn254()));
        assert!(!on_bn.belongs_to(secp256k1()));
        assert!(on_secp.belongs_to(secp256k1()));
        assert!(!on_secp.belongs_to(bn254()));
        assert!(core::ptr::eq(on_bn.modulus(), bn254().order()));
    }

    #[test]
    fn test_minimal_bytes_rejections() {
        let curve = bn254();
        assert!(Scalar::from_minimal_bytes(&[], curve).is_err());
        assert!(Scalar::from_minimal_bytes(&[0x80], curve).is_err());
        let order = curve.order().value().to_be_bytes();
        assert!(Scalar::from_minimal_bytes(&order, curve).is_err());
        assert_eq!(
            Scalar::from_minimal_bytes(&[0x00, 0x00, 0x2a], curve).unwrap(),
            Scalar::from_u64(42, curve)
        );
    }
}
