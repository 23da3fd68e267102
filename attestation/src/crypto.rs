//! The attestation engine: secrets, proofs of knowledge and their checks.

use curve::{Affine, CurveParameters, Scalar, bn254, secp256k1};
use rand::TryCryptoRng;
use tracing::{debug, trace};

use crate::commitment::Commitment;
use crate::constants::ENCODED_POINT_SIZE;
use crate::errors::{AttestationError, Result};
use crate::hash::{HashToInteger, HmacLegacyHash, KeccakWideHash};
use crate::identifier::{AttestationType, map_typed_identifier};
use crate::proof::{ProofOfExponent, same_curve, scalar_curve_name};

/// Proves and verifies knowledge of discrete logarithms over one curve,
/// with challenges drawn from one hashing strategy.
///
/// The engine holds no mutable state. Randomness is passed to each call
/// that needs it, so a seeded generator gives reproducible transcripts.
///
/// # Example
///
/// ```
/// use attestation::AttestationCrypto;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let crypto = AttestationCrypto::new();
/// let mut rng = StdRng::seed_from_u64(42);
/// let secret = crypto.make_secret(&mut rng).expect("secret");
/// let proof = crypto.prove_attestation_request(&secret, &mut rng).expect("prove");
/// assert!(crypto.verify_attestation_request(&proof).expect("verify"));
/// ```
#[derive(Clone, Debug)]
pub struct AttestationCrypto<H = KeccakWideHash> {
    curve: &'static CurveParameters,
    hasher: H,
}

impl AttestationCrypto<KeccakWideHash> {
    /// BN254 with the wide Keccak hash.
    pub fn new() -> Self {
        Self::with_parts(bn254(), KeccakWideHash)
    }
}

impl Default for AttestationCrypto<KeccakWideHash> {
    fn default() -> Self {
        Self::new()
    }
}

impl AttestationCrypto<HmacLegacyHash> {
    /// secp256k1 with the legacy keyed MAC. This curve has no hiding
    /// generator, so only knowledge proofs are available.
    pub fn legacy() -> Self {
        let curve = secp256k1();
        Self::with_parts(curve, HmacLegacyHash::new(curve))
    }
}

impl<H: HashToInteger> AttestationCrypto<H> {
    pub fn with_parts(curve: &'static CurveParameters, hasher: H) -> Self {
        AttestationCrypto { curve, hasher }
    }

    pub fn curve(&self) -> &'static CurveParameters {
        self.curve
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The base point `G`.
    pub fn generator(&self) -> Affine {
        self.curve.generator()
    }

    /// The hiding base `H`.
    pub fn hiding_generator(&self) -> Result<Affine> {
        self.curve
            .hiding_generator()
            .ok_or(AttestationError::MissingHidingGenerator)
    }

    /// Draws a uniformly distributed secret scalar.
    ///
    /// 384 bits are sampled and reduced mod `n`, keeping the bias below
    /// `2^-128`. A failing randomness source is reported, never papered over.
    pub fn make_secret<R: TryCryptoRng + ?Sized>(&self, rng: &mut R) -> Result<Scalar> {
        Ok(Scalar::random(self.curve, rng)?)
    }

    /// The typed identifier hash, reduced mod `n`.
    pub fn hash_identifier(&self, attestation_type: AttestationType, identifier: &str) -> Scalar {
        let wide = map_typed_identifier(&self.hasher, attestation_type, identifier);
        Scalar::from_biguint(&wide, self.curve)
    }

    /// Proves knowledge of `exponent` with `riddle = base * exponent`.
    ///
    /// The challenge binds `(G, base, riddle, auxiliary)`.
    pub fn prove_knowledge<R: TryCryptoRng + ?Sized>(
        &self,
        base: &Affine,
        exponent: &Scalar,
        rng: &mut R,
    ) -> Result<ProofOfExponent> {
        self.ensure_curve(base)?;
        self.ensure_scalar(exponent)?;
        if base.is_infinity() {
            return Err(AttestationError::IdentityElement);
        }

        let riddle = *base * exponent;
        let generator = self.generator();
        self.prove_with(base, exponent, riddle, rng, |auxiliary| {
            self.challenge(&[&generator, base, &riddle, auxiliary])
        })
    }

    /// Proves that two commitments hide the same identifier.
    ///
    /// With `A = G*m + H*rand_a` and `B = G*m + H*rand_b`, the riddle
    /// `A - B = H*(rand_a - rand_b)` is proven against base `H`. The
    /// challenge binds `(G, H, A, B, auxiliary)`, which keeps these proofs
    /// apart from plain knowledge proofs.
    pub fn prove_equality<R: TryCryptoRng + ?Sized>(
        &self,
        commitment_a: &Commitment,
        commitment_b: &Commitment,
        rand_a: &Scalar,
        rand_b: &Scalar,
        rng: &mut R,
    ) -> Result<ProofOfExponent> {
        self.ensure_scalar(rand_a)?;
        self.ensure_scalar(rand_b)?;
        let hiding = self.hiding_generator()?;
        let point_a = commitment_a.to_point(self.curve)?;
        let point_b = commitment_b.to_point(self.curve)?;

        let riddle = point_a - point_b;
        let exponent = *rand_a - *rand_b;
        let generator = self.generator();
        self.prove_with(&hiding, &exponent, riddle, rng, |auxiliary| {
            self.challenge(&[&generator, &hiding, &point_a, &point_b, auxiliary])
        })
    }

    /// Proves knowledge of the blinding exponent behind `H * exponent`.
    pub fn prove_attestation_request<R: TryCryptoRng + ?Sized>(
        &self,
        exponent: &Scalar,
        rng: &mut R,
    ) -> Result<ProofOfExponent> {
        let hiding = self.hiding_generator()?;
        self.prove_knowledge(&hiding, exponent, rng)
    }

    /// Checks a knowledge proof against the base the verifier expects.
    ///
    /// Returns `false` for a foreign base, an identity on either side of the
    /// verification equation, or unequal sides.
    pub fn verify(&self, proof: &ProofOfExponent, expected_base: &Affine) -> bool {
        if !same_curve(proof.curve(), self.curve) {
            debug!(
                expected = self.curve.name(),
                found = proof.curve().name(),
                "proof is on a different curve"
            );
            return false;
        }
        if proof.base() != expected_base {
            debug!("proof base does not match the expected base");
            return false;
        }

        let challenge = self.challenge(&[
            &self.generator(),
            proof.base(),
            proof.riddle(),
            proof.auxiliary(),
        ]);
        self.check_transcript(proof, &challenge)
    }

    /// Checks an equality proof for two commitments.
    ///
    /// Malformed commitment bytes are errors; a proof that does not match
    /// the commitments yields `Ok(false)`.
    pub fn verify_equality(
        &self,
        commitment_a: &Commitment,
        commitment_b: &Commitment,
        proof: &ProofOfExponent,
    ) -> Result<bool> {
        let hiding = self.hiding_generator()?;
        let point_a = commitment_a.to_point(self.curve)?;
        let point_b = commitment_b.to_point(self.curve)?;

        if !same_curve(proof.curve(), self.curve) {
            debug!("equality proof is on a different curve");
            return Ok(false);
        }
        if *proof.base() != hiding {
            debug!("equality proof base is not the hiding generator");
            return Ok(false);
        }
        if *proof.riddle() != point_a - point_b {
            debug!("equality proof riddle does not match the commitments");
            return Ok(false);
        }

        let challenge = self.challenge(&[
            &self.generator(),
            &hiding,
            &point_a,
            &point_b,
            proof.auxiliary(),
        ]);
        Ok(self.check_transcript(proof, &challenge))
    }

    /// Checks a proof produced by [`AttestationCrypto::prove_attestation_request`].
    pub fn verify_attestation_request(&self, proof: &ProofOfExponent) -> Result<bool> {
        let hiding = self.hiding_generator()?;
        Ok(self.verify(proof, &hiding))
    }

    pub(crate) fn ensure_curve(&self, point: &Affine) -> Result<()> {
        if same_curve(point.curve(), self.curve) {
            Ok(())
        } else {
            Err(AttestationError::CurveMismatch {
                expected: self.curve.name(),
                found: point.curve().name(),
            })
        }
    }

    pub(crate) fn ensure_scalar(&self, scalar: &Scalar) -> Result<()> {
        if scalar.belongs_to(self.curve) {
            Ok(())
        } else {
            Err(AttestationError::CurveMismatch {
                expected: self.curve.name(),
                found: scalar_curve_name(scalar),
            })
        }
    }

    /// Shared prover: samples the nonce, commits to it and answers the
    /// challenge that `challenge` derives from the nonce commitment.
    fn prove_with<R, F>(
        &self,
        base: &Affine,
        exponent: &Scalar,
        riddle: Affine,
        rng: &mut R,
        challenge: F,
    ) -> Result<ProofOfExponent>
    where
        R: TryCryptoRng + ?Sized,
        F: FnOnce(&Affine) -> Scalar,
    {
        let nonce = self.make_secret(rng)?;
        let auxiliary = *base * nonce;
        let c = challenge(&auxiliary);
        let response = nonce + c * *exponent;

        trace!(curve = self.curve.name(), "built proof of exponent");
        ProofOfExponent::new(*base, riddle, auxiliary, response)
    }

    /// Hash of the concatenated uncompressed encodings, reduced mod `n`.
    fn challenge(&self, points: &[&Affine]) -> Scalar {
        let mut transcript = Vec::with_capacity(points.len() * ENCODED_POINT_SIZE);
        for point in points {
            transcript.extend_from_slice(&point.encode());
        }
        Scalar::from_biguint(&self.hasher.map_to_integer(&transcript), self.curve)
    }

    /// `base * response == riddle * c + auxiliary`, with neither side the
    /// identity.
    fn check_transcript(&self, proof: &ProofOfExponent, challenge: &Scalar) -> bool {
        let lhs = proof.base().to_projective() * proof.response();
        if lhs.is_infinity() {
            debug!("base * response is the identity");
            return false;
        }

        let rhs = proof.riddle().to_projective() * challenge + proof.auxiliary().to_projective();
        if rhs.is_infinity() {
            debug!("riddle * challenge + auxiliary is the identity");
            return false;
        }

        let valid = lhs == rhs;
        if !valid {
            debug!("verification equation does not hold");
        }
        valid
    }
}
