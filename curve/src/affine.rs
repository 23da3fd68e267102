use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::errors::{CurveError, Result};
use crate::field::FieldElement;
use crate::group::{Group, ScalarBits};
use crate::params::CurveParameters;
use crate::projective::Projective;
use crate::scalar::Scalar;
use crate::uint::U256;

/// Leading byte of the one-byte identity encoding.
pub const IDENTITY_TAG: u8 = 0x00;
/// Leading byte of a compressed point with even y.
pub const COMPRESSED_EVEN_TAG: u8 = 0x02;
/// Leading byte of a compressed point with odd y.
pub const COMPRESSED_ODD_TAG: u8 = 0x03;
/// Leading byte of an uncompressed point.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// Affine point on a short Weierstrass curve, or the point at infinity.
///
/// Group arithmetic is carried out in Jacobian coordinates; the affine form
/// is what gets encoded, compared and handed around.
#[derive(Copy, Clone)]
pub struct Affine {
    x: FieldElement,
    y: FieldElement,
    infinity: bool,
    curve: &'static CurveParameters,
}

impl Affine {
    pub fn identity(curve: &'static CurveParameters) -> Self {
        let zero = FieldElement::zero(curve.field_modulus());
        Affine {
            x: zero,
            y: zero,
            infinity: true,
            curve,
        }
    }

    /// Builds a point without checking the curve equation.
    pub(crate) fn new_unchecked(
        x: FieldElement,
        y: FieldElement,
        curve: &'static CurveParameters,
    ) -> Self {
        Affine {
            x,
            y,
            infinity: false,
            curve,
        }
    }

    /// Builds a point from canonical coordinates, rejecting values outside
    /// the field and points off the curve.
    pub fn from_coordinates(x: &U256, y: &U256, curve: &'static CurveParameters) -> Result<Self> {
        let p = curve.field_modulus();
        let x = FieldElement::from_canonical_u256(x, p)
            .ok_or(CurveError::InvalidEncoding("x-coordinate not below the field modulus"))?;
        let y = FieldElement::from_canonical_u256(y, p)
            .ok_or(CurveError::InvalidEncoding("y-coordinate not below the field modulus"))?;
        let point = Affine::new_unchecked(x, y, curve);
        if !point.is_on_curve() {
            return Err(CurveError::InvalidEncoding("point is not on the curve"));
        }
        Ok(point)
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    /// The x-coordinate; zero for the point at infinity.
    #[inline]
    pub fn x(&self) -> FieldElement {
        self.x
    }

    /// The y-coordinate; zero for the point at infinity.
    #[inline]
    pub fn y(&self) -> FieldElement {
        self.y
    }

    #[inline]
    pub fn curve(&self) -> &'static CurveParameters {
        self.curve
    }

    /// Check if a point is on the curve: y^2 = x^3 + a*x + b.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        self.y.square() == curve_rhs(&self.x, self.curve)
    }

    #[inline]
    pub fn to_projective(&self) -> Projective {
        Projective::from_affine(self)
    }

    pub fn double(&self) -> Self {
        self.to_projective().double().to_affine()
    }

    pub fn negate(&self) -> Self {
        if self.infinity {
            return *self;
        }
        Affine::new_unchecked(self.x, -self.y, self.curve)
    }

    /// `0x04 ‖ x ‖ y` with fixed-width big-endian coordinates, or `[0x00]`
    /// for the point at infinity.
    pub fn encode(&self) -> Vec<u8> {
        if self.infinity {
            return vec![IDENTITY_TAG];
        }
        let width = self.curve.coordinate_bytes();
        let mut out = Vec::with_capacity(1 + 2 * width);
        out.push(UNCOMPRESSED_TAG);
        out.extend_from_slice(&self.x.to_be_bytes()[32 - width..]);
        out.extend_from_slice(&self.y.to_be_bytes()[32 - width..]);
        out
    }

    /// `0x02 ‖ x` or `0x03 ‖ x` depending on the parity of y, or `[0x00]`
    /// for the point at infinity.
    pub fn encode_compressed(&self) -> Vec<u8> {
        if self.infinity {
            return vec![IDENTITY_TAG];
        }
        let width = self.curve.coordinate_bytes();
        let tag = if self.y.to_u256().is_odd() {
            COMPRESSED_ODD_TAG
        } else {
            COMPRESSED_EVEN_TAG
        };
        let mut out = Vec::with_capacity(1 + width);
        out.push(tag);
        out.extend_from_slice(&self.x.to_be_bytes()[32 - width..]);
        out
    }

    /// Parses any of the encodings produced by [`Affine::encode`] and
    /// [`Affine::encode_compressed`].
    pub fn decode(bytes: &[u8], curve: &'static CurveParameters) -> Result<Self> {
        let width = curve.coordinate_bytes();
        let (&tag, body) = bytes
            .split_first()
            .ok_or(CurveError::InvalidEncoding("empty point encoding"))?;

        match tag {
            IDENTITY_TAG if body.is_empty() => Ok(Affine::identity(curve)),
            UNCOMPRESSED_TAG if body.len() == 2 * width => {
                let (x, y) = body.split_at(width);
                Affine::from_coordinates(&coordinate(x)?, &coordinate(y)?, curve)
            }
            COMPRESSED_EVEN_TAG | COMPRESSED_ODD_TAG if body.len() == width => {
                decompress(&coordinate(body)?, tag == COMPRESSED_ODD_TAG, curve)
            }
            IDENTITY_TAG | UNCOMPRESSED_TAG | COMPRESSED_EVEN_TAG | COMPRESSED_ODD_TAG => {
                Err(CurveError::InvalidEncoding("wrong length for point tag"))
            }
            _ => Err(CurveError::InvalidEncoding("unknown point tag")),
        }
    }

    /// Like [`Affine::decode`] but rejects the point at infinity.
    pub fn decode_non_identity(bytes: &[u8], curve: &'static CurveParameters) -> Result<Self> {
        let point = Self::decode(bytes, curve)?;
        if point.infinity {
            return Err(CurveError::InvalidEncoding("identity point not allowed"));
        }
        Ok(point)
    }
}

/// x^3 + a*x + b
pub(crate) fn curve_rhs(x: &FieldElement, curve: &'static CurveParameters) -> FieldElement {
    x.square() * *x + curve.a() * *x + curve.b()
}

fn coordinate(bytes: &[u8]) -> Result<U256> {
    U256::from_be_slice(bytes).ok_or(CurveError::InvalidEncoding("coordinate wider than 256 bits"))
}

fn decompress(x: &U256, odd: bool, curve: &'static CurveParameters) -> Result<Affine> {
    let x = FieldElement::from_canonical_u256(x, curve.field_modulus())
        .ok_or(CurveError::InvalidEncoding("x-coordinate not below the field modulus"))?;
    let mut y = curve_rhs(&x, curve)
        .sqrt()
        .ok_or(CurveError::InvalidEncoding("point is not on the curve"))?;
    if y.to_u256().is_odd() != odd {
        if y.is_zero() {
            return Err(CurveError::InvalidEncoding("no odd root for zero y"));
        }
        y = -y;
    }
    Ok(Affine::new_unchecked(x, y, curve))
}

impl Group for Affine {
    #[inline]
    fn identity(curve: &'static CurveParameters) -> Self {
        Affine::identity(curve)
    }

    #[inline]
    fn generator(curve: &'static CurveParameters) -> Self {
        curve.generator()
    }

    #[inline]
    fn curve(&self) -> &'static CurveParameters {
        self.curve
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.infinity
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }

    // Affine ladders would pay an inversion per step.
    fn scalar_mul<S: ScalarBits>(&self, scalar: &S) -> Self {
        self.to_projective().scalar_mul_windowed(scalar).to_affine()
    }

    fn scalar_mul_windowed<S: ScalarBits>(&self, scalar: &S) -> Self {
        self.to_projective().scalar_mul_windowed(scalar).to_affine()
    }
}

impl PartialEq for Affine {
    fn eq(&self, other: &Self) -> bool {
        let same_curve = core::ptr::eq(self.curve, other.curve) || self.curve == other.curve;
        same_curve
            && self.infinity == other.infinity
            && (self.infinity || (self.x == other.x && self.y == other.y))
    }
}

impl Eq for Affine {}

impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        (self.to_projective() + other.to_projective()).to_affine()
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<&Scalar> for Affine {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Scalar> for Affine {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Debug for Affine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.infinity {
            return write!(f, "Affine(infinity, {})", self.curve.name());
        }
        f.debug_struct("Affine")
            .field("curve", &self.curve.name())
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{bn254, secp256k1};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_infinity() {
        let inf = Affine::identity(bn254());
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
        assert_eq!(inf.encode(), vec![0x00]);
    }

    #[test]
    fn test_generator_encoding_layout() {
        let g = bn254().generator();
        let bytes = g.encode();
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], UNCOMPRESSED_TAG);
        assert_eq!(&bytes[1..33], &g.x().to_be_bytes());
        assert_eq!(&bytes[33..], &g.y().to_be_bytes());
    }

    #[test]
    fn test_decode_recovers_points() {
        for curve in [bn254(), secp256k1()] {
            let p = curve.generator() * Scalar::from_u64(77, curve);
            assert_eq!(Affine::decode(&p.encode(), curve).unwrap(), p);
            assert_eq!(Affine::decode(&p.encode_compressed(), curve).unwrap(), p);
            assert_eq!(Affine::decode(&(-p).encode_compressed(), curve).unwrap(), -p);
        }
    }

    #[test]
    fn test_encode_decode_random_points() {
        let mut rng = StdRng::seed_from_u64(7);
        for curve in [bn254(), secp256k1()] {
            for _ in 0..16 {
                let k = Scalar::random(curve, &mut rng).unwrap();
                let p = curve.generator() * k;
                assert_eq!(Affine::decode(&p.encode(), curve).unwrap(), p);
                assert_eq!(Affine::decode(&p.encode_compressed(), curve).unwrap(), p);
                assert_eq!(Affine::decode_non_identity(&p.encode(), curve).unwrap(), p);
            }
        }
    }

    #[test]
    fn test_decode_identity() {
        let curve = bn254();
        assert!(Affine::decode(&[0x00], curve).unwrap().is_infinity());
        assert_eq!(
            Affine::decode_non_identity(&[0x00], curve).unwrap_err(),
            CurveError::InvalidEncoding("identity point not allowed")
        );
    }

    #[test]
    fn test_decode_rejections() {
        let curve = bn254();
        let good = curve.generator().encode();

        assert!(Affine::decode(&[], curve).is_err());
        assert!(Affine::decode(&good[..64], curve).is_err());
        assert!(Affine::decode(&[0x00, 0x00], curve).is_err());

        let mut bad_tag = good.clone();
        bad_tag[0] = 0x05;
        assert_eq!(
            Affine::decode(&bad_tag, curve).unwrap_err(),
            CurveError::InvalidEncoding("unknown point tag")
        );

        let mut off_curve = good.clone();
        off_curve[64] ^= 1;
        assert_eq!(
            Affine::decode(&off_curve, curve).unwrap_err(),
            CurveError::InvalidEncoding("point is not on the curve")
        );

        // x = p is outside the field even though x mod p = 0 would be.
        let mut out_of_range = vec![UNCOMPRESSED_TAG];
        out_of_range.extend_from_slice(&curve.field_modulus().value().to_be_bytes());
        out_of_range.extend_from_slice(&good[33..]);
        assert!(Affine::decode(&out_of_range, curve).is_err());
    }

    #[test]
    fn test_affine_arithmetic_matches_projective() {
        let curve = secp256k1();
        let g = curve.generator();
        let three = Scalar::from_u64(3, curve);
        assert_eq!(g + g + g, g * three);
        assert_eq!(g.double() - g, g);
        assert!((g - g).is_infinity());
        assert_eq!(g + Affine::identity(curve), g);
    }

    #[test]
    fn test_points_on_different_curves_differ() {
        assert_ne!(Affine::identity(bn254()), Affine::identity(secp256k1()));
    }
}
