//! Prime-order short Weierstrass curves over 256-bit fields.
//!
//! This crate provides 256-bit integer arithmetic (including a Karatsuba
//! split multiplier and Barrett reduction modulo the BN254 group order),
//! Montgomery field arithmetic over a runtime modulus, affine and Jacobian
//! points, and deterministic point derivation. Parameter sets for BN254 and
//! secp256k1 live in the `params` module.

mod affine;
mod barrett;
mod derivation;
mod errors;
mod field;
mod group;
mod msm;
mod params;
mod projective;
mod scalar;
mod uint;

pub use affine::{
    Affine, COMPRESSED_EVEN_TAG, COMPRESSED_ODD_TAG, IDENTITY_TAG, UNCOMPRESSED_TAG,
};
pub use barrett::{reduce_mod_order, BARRETT_MU, BN254_ORDER};
pub use derivation::{derive_point, DEFAULT_MAX_DERIVATION_ITERATIONS};
pub use errors::{CurveError, Result};
pub use field::{FieldElement, Modulus};
pub use group::{Group, ScalarBits};
pub use msm::double_scalar_mul;
pub use params::{bn254, secp256k1, CurveParameters};
pub use projective::Projective;
pub use scalar::{Scalar, SAMPLE_SECURITY_MARGIN_BITS};
pub use uint::{mul_high_256, mul_low_256, U256};
