//! Deterministic point derivation by try-and-increment.
//!
//! Starting from a seed, candidate x-coordinates `seed + 1, seed + 2, ...`
//! are tested until `x^3 + a*x + b` is a square. The first hit is returned
//! with the root `rhs^((p+1)/4)`, so the result is a pure function of the seed.

use num_bigint::BigUint;
use tracing::{debug, warn};

use crate::affine::{curve_rhs, Affine};
use crate::errors::{CurveError, Result};
use crate::field::FieldElement;
use crate::params::CurveParameters;

/// Candidates tried before giving up. Roughly half of all x-coordinates
/// lift to a point, so exhausting this bound does not happen in practice.
pub const DEFAULT_MAX_DERIVATION_ITERATIONS: usize = 1024;

/// Derives a curve point from `seed`, trying at most `max_iterations`
/// candidates.
pub fn derive_point(
    curve: &'static CurveParameters,
    seed: &BigUint,
    max_iterations: usize,
) -> Result<Affine> {
    let p = curve.field_modulus();
    let one = FieldElement::one(p);
    let mut x = FieldElement::from_biguint(seed, p);

    for iteration in 1..=max_iterations {
        x += one;
        if let Some(y) = curve_rhs(&x, curve).sqrt() {
            debug!(curve = curve.name(), iterations = iteration, "derived curve point");
            return Ok(Affine::new_unchecked(x, y, curve));
        }
    }

    warn!(
        curve = curve.name(),
        iterations = max_iterations,
        "point derivation exhausted its candidates"
    );
    Err(CurveError::GeneratorDerivationFailed {
        iterations: max_iterations,
    })
}
