use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::affine::Affine;
use crate::field::FieldElement;
use crate::group::Group;
use crate::params::CurveParameters;
use crate::scalar::Scalar;

/// Point in Jacobian coordinates (X:Y:Z) where (x,y) = (X/Z^2, Y/Z^3).
/// The point at infinity is any point with Z = 0; we build it as (1:1:0).
#[derive(Copy, Clone)]
pub struct Projective {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    curve: &'static CurveParameters,
}

impl Projective {
    /// The point at infinity (identity element)
    pub fn identity(curve: &'static CurveParameters) -> Self {
        let one = FieldElement::one(curve.field_modulus());
        Projective {
            x: one,
            y: one,
            z: FieldElement::zero(curve.field_modulus()),
            curve,
        }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    #[inline]
    pub fn curve(&self) -> &'static CurveParameters {
        self.curve
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> Affine {
        let Some(z_inv) = self.z.inverse() else {
            return Affine::identity(self.curve);
        };
        let z_inv2 = z_inv.square();
        Affine::new_unchecked(self.x * z_inv2, self.y * z_inv2 * z_inv, self.curve)
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine) -> Self {
        if point.is_infinity() {
            return Self::identity(point.curve());
        }
        Projective {
            x: point.x(),
            y: point.y(),
            z: FieldElement::one(point.curve().field_modulus()),
            curve: point.curve(),
        }
    }

    /// Check Y^2 = X^3 + a*X*Z^4 + b*Z^6.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }

        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = z4 * z2;
        let lhs = self.y.square();
        let rhs = self.x.square() * self.x + self.curve.a() * self.x * z4 + self.curve.b() * z6;

        lhs == rhs
    }

    /// Point doubling, "dbl-2007-bl". A point with Y = 0 doubles to Z = 0.
    pub fn double(&self) -> Self {
        if self.is_infinity() {
            return *self;
        }

        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();

        // S = 2*((X1+YY)^2-XX-YYYY)
        let s = ((self.x + yy).square() - xx - yyyy).double();
        // M = 3*XX + a*ZZ^2
        let m = xx.double() + xx + self.curve.a() * zz.square();
        // T = M^2 - 2*S
        let t = m.square() - s.double();

        let eight_yyyy = yyyy.double().double().double();
        let y3 = m * (s - t) - eight_yyyy;
        let z3 = (self.y + self.z).square() - yy - zz;

        Projective {
            x: t,
            y: y3,
            z: z3,
            curve: self.curve,
        }
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        Projective {
            y: -self.y,
            ..*self
        }
    }
}

impl Group for Projective {
    #[inline]
    fn identity(curve: &'static CurveParameters) -> Self {
        Projective::identity(curve)
    }

    #[inline]
    fn generator(curve: &'static CurveParameters) -> Self {
        Projective::from_affine(&curve.generator())
    }

    #[inline]
    fn curve(&self) -> &'static CurveParameters {
        self.curve
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

impl PartialEq for Projective {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }

        // X1*Z2^2 == X2*Z1^2 and Y1*Z2^3 == Y2*Z1^3
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x * z2z2 == other.x * z1z1 && self.y * z2z2 * other.z == other.y * z1z1 * self.z
    }
}

impl Eq for Projective {}

impl Add for Projective {
    type Output = Self;

    /// "add-2007-bl", falling back to doubling for equal inputs.
    fn add(self, other: Self) -> Self {
        if self.is_infinity() {
            return other;
        }
        if other.is_infinity() {
            return self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;

        let h = u2 - u1;
        let s_diff = s2 - s1;
        if h.is_zero() {
            return if s_diff.is_zero() {
                self.double()
            } else {
                Self::identity(self.curve)
            };
        }

        let i = h.double().square();
        let j = h * i;
        let r = s_diff.double();
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + other.z).square() - z1z1 - z2z2) * h;

        Projective {
            x: x3,
            y: y3,
            z: z3,
            curve: self.curve,
        }
    }
}

impl AddAssign for Projective {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Projective {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<&Scalar> for Projective {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        self.scalar_mul_windowed(scalar)
    }
}

impl Mul<Scalar> for Projective {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        self.scalar_mul_windowed(&scalar)
    }
}

impl From<Affine> for Projective {
    fn from(point: Affine) -> Self {
        Projective::from_affine(&point)
    }
}

impl From<&Affine> for Projective {
    fn from(point: &Affine) -> Self {
        Projective::from_affine(point)
    }
}

impl From<Projective> for Affine {
    fn from(point: Projective) -> Self {
        point.to_affine()
    }
}

impl Debug for Projective {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Projective({:?})", self.to_affine())
    }
}
