//! Sigma-protocol transcripts and their wire form.

use curve::{Affine, CurveParameters, Scalar, bn254, secp256k1};
use serde::{Deserialize, Serialize};

use crate::errors::{AttestationError, Result};

/// A non-interactive proof of knowledge of `x` with `riddle = base * x`.
///
/// The transcript is `(base, riddle, auxiliary, response)` where `auxiliary`
/// is the prover's nonce commitment `base * r` and `response = r + c * x`
/// for the Fiat-Shamir challenge `c`. None of the points is the identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProofOfExponent {
    base: Affine,
    riddle: Affine,
    auxiliary: Affine,
    response: Scalar,
}

/// Byte form of a [`ProofOfExponent`]: three encoded points and a minimal
/// big-endian response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedProof {
    pub base: Vec<u8>,
    pub riddle: Vec<u8>,
    pub auxiliary: Vec<u8>,
    pub response: Vec<u8>,
}

impl ProofOfExponent {
    /// Assembles a transcript, rejecting identity points, and points or a
    /// response taken from different curves.
    pub fn new(base: Affine, riddle: Affine, auxiliary: Affine, response: Scalar) -> Result<Self> {
        let curve = base.curve();
        for point in [&base, &riddle, &auxiliary] {
            if point.is_infinity() {
                return Err(AttestationError::IdentityElement);
            }
            if !same_curve(point.curve(), curve) {
                return Err(AttestationError::CurveMismatch {
                    expected: curve.name(),
                    found: point.curve().name(),
                });
            }
        }
        if !response.belongs_to(curve) {
            return Err(AttestationError::CurveMismatch {
                expected: curve.name(),
                found: scalar_curve_name(&response),
            });
        }
        Ok(ProofOfExponent {
            base,
            riddle,
            auxiliary,
            response,
        })
    }

    pub fn base(&self) -> &Affine {
        &self.base
    }

    pub fn riddle(&self) -> &Affine {
        &self.riddle
    }

    pub fn auxiliary(&self) -> &Affine {
        &self.auxiliary
    }

    pub fn response(&self) -> &Scalar {
        &self.response
    }

    pub fn curve(&self) -> &'static CurveParameters {
        self.base.curve()
    }

    pub fn encode(&self) -> EncodedProof {
        EncodedProof {
            base: self.base.encode(),
            riddle: self.riddle.encode(),
            auxiliary: self.auxiliary.encode(),
            response: self.response.to_minimal_bytes(),
        }
    }

    /// Parses an encoded transcript. Every point must decode to a proper
    /// point of `curve` and the response must lie in `[0, n)`.
    pub fn decode(encoded: &EncodedProof, curve: &'static CurveParameters) -> Result<Self> {
        Ok(ProofOfExponent {
            base: Affine::decode_non_identity(&encoded.base, curve)?,
            riddle: Affine::decode_non_identity(&encoded.riddle, curve)?,
            auxiliary: Affine::decode_non_identity(&encoded.auxiliary, curve)?,
            response: Scalar::from_minimal_bytes(&encoded.response, curve)?,
        })
    }
}

impl EncodedProof {
    /// The four byte strings in wire order.
    pub fn fields(&self) -> [&[u8]; 4] {
        [&self.base, &self.riddle, &self.auxiliary, &self.response]
    }
}

/// Name of the built-in curve whose order reduces `scalar`.
pub(crate) fn scalar_curve_name(scalar: &Scalar) -> &'static str {
    [bn254(), secp256k1()]
        .into_iter()
        .find(|curve| scalar.belongs_to(*curve))
        .map_or("another curve", |curve| curve.name())
}

pub(crate) fn same_curve(a: &'static CurveParameters, b: &'static CurveParameters) -> bool {
    core::ptr::eq(a, b) || a == b
}
