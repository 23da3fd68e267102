//! Error types for commitments, proofs and addressing.

use curve::CurveError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, AttestationError>;

/// Errors raised while building or decoding commitments and proofs.
///
/// A proof that decodes but does not check out is not an error: verification
/// returns `false` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttestationError {
    /// Malformed encodings, failed randomness and derivation failures from
    /// the curve layer.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// The configured curve has no hiding generator `H`, so commitments and
    /// equality proofs cannot be formed on it.
    #[error("curve has no hiding generator")]
    MissingHidingGenerator,

    /// The point at infinity appeared where a proper point is required.
    ///
    /// This covers an identity base, a zero exponent, and the (negligibly
    /// likely) identity nonce commitment.
    #[error("identity element where a proper point is required")]
    IdentityElement,

    /// An attestation type name that is neither `phone` nor `mail`.
    #[error("unknown attestation type: {0}")]
    UnknownAttestationType(String),

    /// A point or scalar from one parameter set was handed to an engine
    /// configured for another.
    #[error("value on {found} passed to an engine for {expected}")]
    CurveMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
