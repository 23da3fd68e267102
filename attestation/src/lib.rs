//! Identity attestations built from Pedersen commitments and Fiat-Shamir
//! proofs of knowledge.
//!
//! This library implements the cryptographic core of an attestation flow:
//! - A typed identifier (phone number or e-mail address) is hashed to an
//!   integer `m` with a wide Keccak construction
//! - The identifier is committed to as `C = G*m + H*r` on BN254, where no
//!   discrete-log relation between `G` and `H` is known
//! - Two commitments to the same identifier are linked by a proof that
//!   `C1 - C2` is a multiple of `H` whose exponent the prover knows
//!
//! A legacy mode on secp256k1 proves knowledge of the secret behind an
//! identifier "riddle" on a generator derived from the identifier itself.
//! Account addresses for secp256k1 keys are derived as on Ethereum.
//!
//! # Example
//!
//! ```
//! use attestation::{AttestationCrypto, AttestationType};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let crypto = AttestationCrypto::new();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! // The user and the issuer blind the same address independently
//! let user_secret = crypto.make_secret(&mut rng).expect("secret");
//! let issuer_secret = crypto.make_secret(&mut rng).expect("secret");
//! let user = crypto
//!     .commit("alice@example.com", AttestationType::Mail, &user_secret)
//!     .expect("commit");
//! let issuer = crypto
//!     .commit("Alice@Example.com", AttestationType::Mail, &issuer_secret)
//!     .expect("commit");
//!
//! // Link them without revealing the address
//! let proof = crypto
//!     .prove_equality(&user, &issuer, &user_secret, &issuer_secret, &mut rng)
//!     .expect("prove");
//! assert!(crypto.verify_equality(&user, &issuer, &proof).expect("verify"));
//! ```
//!
//! # Security Considerations
//!
//! - Use a cryptographically secure random number generator; every proof
//!   draws a fresh nonce from it
//! - Discard blinding scalars once the commitments and proofs are built
//! - Verification returns `false` for any transcript that does not check
//!   out; only malformed encodings are reported as errors

mod address;
mod commitment;
mod constants;
mod crypto;
mod errors;
mod hash;
mod identifier;
mod legacy;
mod proof;


pub use address::{address_from_encoded_key, address_from_public_key};
pub use commitment::Commitment;
pub use constants::{ADDRESS_SIZE, DIGEST_SIZE, ENCODED_POINT_SIZE, LEGACY_MAC_KEY};
pub use crypto::AttestationCrypto;
pub use errors::{AttestationError, Result};
pub use hash::{
    HashToInteger, HmacLegacyHash, KeccakWideHash, barrett_map_to_integer, keccak256,
    map_to_integer,
};
pub use identifier::{AttestationType, map_typed_identifier, typed_identifier_bytes};
pub use proof::{EncodedProof, ProofOfExponent};
