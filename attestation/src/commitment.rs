//! Pedersen commitments to typed identifiers.

use core::fmt::{self, Debug, Formatter};

use curve::{Affine, CurveParameters, Projective, Scalar, double_scalar_mul};
use serde::{Deserialize, Serialize};

use crate::crypto::AttestationCrypto;
use crate::errors::{AttestationError, Result};
use crate::hash::HashToInteger;
use crate::identifier::AttestationType;

/// Encoded commitment point `C = G*m + H*r`.
///
/// Commitments travel as opaque bytes; they are decoded only when an
/// equality proof is built or checked.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(Vec<u8>);

impl Commitment {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Commitment(bytes)
    }

    pub(crate) fn from_point(point: &Affine) -> Self {
        Commitment(point.encode())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decodes the committed point; the identity is rejected.
    pub fn to_point(&self, curve: &'static CurveParameters) -> Result<Affine> {
        Ok(Affine::decode_non_identity(&self.0, curve)?)
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Commitment {
    fn from(bytes: Vec<u8>) -> Self {
        Commitment(bytes)
    }
}

impl Debug for Commitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment(0x{})", hex::encode(&self.0))
    }
}

impl<H: HashToInteger> AttestationCrypto<H> {
    /// Commits to `identifier` under blinding `secret`: `G*m + H*secret`
    /// with `m` the typed identifier hash.
    pub fn commit(
        &self,
        identifier: &str,
        attestation_type: AttestationType,
        secret: &Scalar,
    ) -> Result<Commitment> {
        self.ensure_scalar(secret)?;
        let hiding = Projective::from_affine(&self.hiding_generator()?);
        let generator = Projective::from_affine(&self.generator());
        let message = self.hash_identifier(attestation_type, identifier);

        let point = double_scalar_mul(&message, &generator, secret, &hiding).to_affine();
        if point.is_infinity() {
            return Err(AttestationError::IdentityElement);
        }
        Ok(Commitment::from_point(&point))
    }

    /// Commits with a blinding term supplied already multiplied by its
    /// owner: `G*m + hiding_point`. The owner's exponent stays private.
    pub fn commit_with_hiding_point(
        &self,
        identifier: &str,
        attestation_type: AttestationType,
        hiding_point: &Affine,
    ) -> Result<Commitment> {
        self.ensure_curve(hiding_point)?;
        let message = self.hash_identifier(attestation_type, identifier);

        let point = self.generator() * message + *hiding_point;
        if point.is_infinity() {
            return Err(AttestationError::IdentityElement);
        }
        Ok(Commitment::from_point(&point))
    }
}
