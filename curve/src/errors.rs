//! Error types for curve arithmetic and point handling.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, CurveError>;

/// Errors raised by field, group and derivation routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A byte string does not describe a point of the curve, or describes
    /// the identity where a proper point is required.
    #[error("invalid point encoding: {0}")]
    InvalidEncoding(&'static str),

    /// A Karatsuba operand lies outside `(2^128, 2^256)`.
    #[error("karatsuba operand of {bits} bits is outside (2^128, 2^256)")]
    ArithmeticRange { bits: u32 },

    /// Try-and-increment ran out of candidates.
    #[error("no curve point found after {iterations} candidates")]
    GeneratorDerivationFailed { iterations: usize },

    /// The field modulus is not congruent to 3 mod 4.
    #[error("field modulus must be congruent to 3 mod 4")]
    UnsupportedFieldModulus,

    /// A modulus is zero or even and cannot back Montgomery arithmetic.
    #[error("modulus must be odd and non-zero")]
    InvalidModulus,

    /// A configured generator does not satisfy the curve equation.
    #[error("generator is not on the curve")]
    InvalidGenerator,

    /// The randomness source failed to produce bytes.
    #[error("randomness source failure: {0}")]
    RandomnessFailure(String),
}
