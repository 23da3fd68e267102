//! Identifier riddles on per-identifier generators.
//!
//! Each typed identifier gets its own generator, derived by try-and-increment
//! from the identifier hash. A riddle is that generator raised to the user's
//! secret, and a knowledge proof over it shows the secret is held.
//! [`AttestationCrypto::legacy`] gives the secp256k1 engine these were
//! issued with.

use curve::{Affine, DEFAULT_MAX_DERIVATION_ITERATIONS, Scalar, derive_point};
use rand::TryCryptoRng;

use crate::crypto::AttestationCrypto;
use crate::errors::{AttestationError, Result};
use crate::hash::HashToInteger;
use crate::identifier::{AttestationType, map_typed_identifier};
use crate::proof::ProofOfExponent;

impl<H: HashToInteger> AttestationCrypto<H> {
    /// The generator derived from the hashed typed identifier.
    pub fn identifier_generator(
        &self,
        attestation_type: AttestationType,
        identifier: &str,
    ) -> Result<Affine> {
        let seed = map_typed_identifier(self.hasher(), attestation_type, identifier);
        Ok(derive_point(
            self.curve(),
            &seed,
            DEFAULT_MAX_DERIVATION_ITERATIONS,
        )?)
    }

    /// Encoded `identifier_generator * secret`.
    pub fn make_riddle(
        &self,
        identifier: &str,
        attestation_type: AttestationType,
        secret: &Scalar,
    ) -> Result<Vec<u8>> {
        self.ensure_scalar(secret)?;
        let riddle = self.identifier_generator(attestation_type, identifier)? * secret;
        if riddle.is_infinity() {
            return Err(AttestationError::IdentityElement);
        }
        Ok(riddle.encode())
    }

    /// Proves knowledge of `secret` for the riddle of `identifier`.
    pub fn construct_legacy_proof<R: TryCryptoRng + ?Sized>(
        &self,
        identifier: &str,
        attestation_type: AttestationType,
        secret: &Scalar,
        rng: &mut R,
    ) -> Result<ProofOfExponent> {
        let base = self.identifier_generator(attestation_type, identifier)?;
        self.prove_knowledge(&base, secret, rng)
    }

    /// Checks a proof from [`AttestationCrypto::construct_legacy_proof`]
    /// against the generator of `identifier`.
    pub fn verify_legacy_proof(
        &self,
        identifier: &str,
        attestation_type: AttestationType,
        proof: &ProofOfExponent,
    ) -> Result<bool> {
        let base = self.identifier_generator(attestation_type, identifier)?;
        Ok(self.verify(proof, &base))
    }
}
