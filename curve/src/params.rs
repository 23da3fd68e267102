//! Short Weierstrass parameter sets `y^2 = x^3 + a*x + b`.
//!
//! BN254 (alt_bn128): prime field of 254 bits, prime order, cofactor 1.
//! Carries a second generator `H` used as the hiding base for commitments;
//! nobody knows `log_G(H)`.
//!
//! secp256k1: SEC 2 parameters, kept for the legacy hashing path and for
//! account addresses. It has no hiding generator.
//!
//! Both fields satisfy `p ≡ 3 (mod 4)`, which the square-root routine relies on.

use core::fmt::{self, Debug, Formatter};
use std::sync::LazyLock;

use num_bigint::BigUint;

use crate::affine::Affine;
use crate::barrett::BN254_ORDER as BN254_N;
use crate::errors::{CurveError, Result};
use crate::field::{FieldElement, Modulus};
use crate::uint::U256;

const BN254_P: U256 = U256::from_limbs([
    0x3c208c16d87cfd47,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);
const BN254_G: (U256, U256) = (
    U256::from_limbs([
        0x9944c4ec78897d9e,
        0x499b2f64dc7805b3,
        0x648537d8e3cf04d5,
        0x1a9449ca47cc506a,
    ]),
    U256::from_limbs([
        0x63a9ef4e634fc194,
        0xa17d7b4968a7523b,
        0xc80a1ec642534a4f,
        0x0ef509e2a14889dc,
    ]),
);
const BN254_H: (U256, U256) = (
    U256::from_limbs([
        0x584bafce8ab12640,
        0x218535456edae58a,
        0x62f6cfa23908ced0,
        0x1b1d1f9e8941478b,
    ]),
    U256::from_limbs([
        0x0184f8c85d02c9cd,
        0x004ef9bf5f55a8d7,
        0x269b896b6f4a6312,
        0x039ef9123701f96d,
    ]),
);

const SECP256K1_P: U256 = U256::from_limbs([
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
]);
const SECP256K1_N: U256 = U256::from_limbs([
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
]);
const SECP256K1_G: (U256, U256) = (
    U256::from_limbs([
        0x59f2815b16f81798,
        0x029bfcdb2dce28d9,
        0x55a06295ce870b07,
        0x79be667ef9dcbbac,
    ]),
    U256::from_limbs([
        0x9c47d08ffb10d4b8,
        0xfd17b448a6855419,
        0x5da4fbfc0e1108a8,
        0x483ada7726a3c465,
    ]),
);

static BN254: LazyLock<CurveParameters> = LazyLock::new(|| {
    CurveParameters::new(
        "bn254",
        BN254_P,
        BN254_N,
        U256::ZERO,
        U256::from_u64(3),
        BN254_G,
        Some(BN254_H),
    )
    .expect("bn254 parameters are well formed")
});

static SECP256K1: LazyLock<CurveParameters> = LazyLock::new(|| {
    CurveParameters::new(
        "secp256k1",
        SECP256K1_P,
        SECP256K1_N,
        U256::ZERO,
        U256::from_u64(7),
        SECP256K1_G,
        None,
    )
    .expect("secp256k1 parameters are well formed")
});

/// The BN254 curve with generators `G` and `H`.
pub fn bn254() -> &'static CurveParameters {
    &BN254
}

/// The secp256k1 curve with its standard base point.
pub fn secp256k1() -> &'static CurveParameters {
    &SECP256K1
}

/// A prime-order curve: field, group order, coefficients and generators.
///
/// Points and scalars hold a `&'static` reference to their parameter set, so
/// instances are expected to live in statics such as [`bn254`] and [`secp256k1`].
#[derive(PartialEq, Eq)]
pub struct CurveParameters {
    name: &'static str,
    field: Modulus,
    order: Modulus,
    a: U256,
    b: U256,
    generator: (U256, U256),
    hiding_generator: Option<(U256, U256)>,
}

impl CurveParameters {
    /// Validates and builds a parameter set.
    ///
    /// The field modulus must be odd and `≡ 3 (mod 4)`, coefficients must be
    /// reduced, and every generator must satisfy the curve equation.
    pub fn new(
        name: &'static str,
        field_modulus: U256,
        order: U256,
        a: U256,
        b: U256,
        generator: (U256, U256),
        hiding_generator: Option<(U256, U256)>,
    ) -> Result<Self> {
        let field = Modulus::new(field_modulus)?;
        let order = Modulus::new(order)?;
        if field_modulus.limbs()[0] & 3 != 3 {
            return Err(CurveError::UnsupportedFieldModulus);
        }
        if a >= field_modulus || b >= field_modulus {
            return Err(CurveError::InvalidGenerator);
        }

        let p = field_modulus.to_biguint();
        let (a_big, b_big) = (a.to_biguint(), b.to_biguint());
        let on_curve = |(x, y): &(U256, U256)| {
            if *x >= field_modulus || *y >= field_modulus {
                return false;
            }
            let (x, y) = (x.to_biguint(), y.to_biguint());
            let lhs = (&y * &y) % &p;
            let rhs = (&x * &x * &x + &a_big * &x + &b_big) % &p;
            lhs == rhs
        };

        if !on_curve(&generator) || !hiding_generator.as_ref().is_none_or(|point| on_curve(point)) {
            return Err(CurveError::InvalidGenerator);
        }

        Ok(CurveParameters {
            name,
            field,
            order,
            a,
            b,
            generator,
            hiding_generator,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn field_modulus(&'static self) -> &'static Modulus {
        &self.field
    }

    /// Order `n` of the group, which is also the scalar modulus.
    #[inline]
    pub fn order(&'static self) -> &'static Modulus {
        &self.order
    }

    pub fn order_biguint(&self) -> BigUint {
        self.order.to_biguint()
    }

    #[inline]
    pub fn a(&'static self) -> FieldElement {
        FieldElement::from_u256(&self.a, &self.field)
    }

    #[inline]
    pub fn b(&'static self) -> FieldElement {
        FieldElement::from_u256(&self.b, &self.field)
    }

    /// Width of one encoded coordinate.
    pub fn coordinate_bytes(&self) -> usize {
        self.field.bits().div_ceil(8) as usize
    }

    /// The base point `G`.
    pub fn generator(&'static self) -> Affine {
        self.affine_from_validated(self.generator)
    }

    /// The hiding base `H`, if this curve carries one.
    pub fn hiding_generator(&'static self) -> Option<Affine> {
        self.hiding_generator
            .map(|coordinates| self.affine_from_validated(coordinates))
    }

    pub fn identity(&'static self) -> Affine {
        Affine::identity(self)
    }

    fn affine_from_validated(&'static self, (x, y): (U256, U256)) -> Affine {
        Affine::new_unchecked(
            FieldElement::from_u256(&x, &self.field),
            FieldElement::from_u256(&y, &self.field),
            self,
        )
    }
}

impl Debug for CurveParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveParameters")
            .field("name", &self.name)
            .field("p", &self.field)
            .field("n", &self.order)
            .finish()
    }
}
