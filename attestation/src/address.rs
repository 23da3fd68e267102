//! Account addresses derived from public keys.

use curve::{Affine, CurveParameters};

use crate::constants::{ADDRESS_SIZE, DIGEST_SIZE};
use crate::errors::{AttestationError, Result};
use crate::hash::keccak256;

/// `0x` followed by the upper-case hex of the last 20 bytes of
/// `keccak256(x ‖ y)`, the uncompressed key without its tag byte.
pub fn address_from_public_key(public_key: &Affine) -> Result<String> {
    if public_key.is_infinity() {
        return Err(AttestationError::IdentityElement);
    }
    let encoded = public_key.encode();
    let digest = keccak256(&encoded[1..]);
    Ok(format!(
        "0x{}",
        hex::encode_upper(&digest[DIGEST_SIZE - ADDRESS_SIZE..])
    ))
}

/// Decodes a public key in any supported point encoding and derives its
/// address.
pub fn address_from_encoded_key(bytes: &[u8], curve: &'static CurveParameters) -> Result<String> {
    address_from_public_key(&Affine::decode_non_identity(bytes, curve)?)
}
