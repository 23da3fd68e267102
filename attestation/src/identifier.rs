//! Attestation types and the typed encoding of identifiers.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::AttestationError;
use crate::hash::HashToInteger;

/// Kind of identifier an attestation vouches for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum AttestationType {
    Phone = 0,
    Mail = 1,
}

impl AttestationType {
    /// The numeric code hashed in front of the identifier.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Parses `"phone"` or `"mail"`, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, AttestationError> {
        match name.to_ascii_lowercase().as_str() {
            "phone" => Ok(AttestationType::Phone),
            "mail" => Ok(AttestationType::Mail),
            _ => Err(AttestationError::UnknownAttestationType(name.to_owned())),
        }
    }
}

impl FromStr for AttestationType {
    type Err = AttestationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Display for AttestationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttestationType::Phone => f.write_str("phone"),
            AttestationType::Mail => f.write_str("mail"),
        }
    }
}

/// `type as 4 big-endian bytes ‖ utf8(lowercase(trim(identifier)))`
pub fn typed_identifier_bytes(attestation_type: AttestationType, identifier: &str) -> Vec<u8> {
    let normalized = identifier.trim().to_lowercase();
    let mut bytes = Vec::with_capacity(4 + normalized.len());
    bytes.extend_from_slice(&attestation_type.code().to_be_bytes());
    bytes.extend_from_slice(normalized.as_bytes());
    bytes
}

/// Hashes a typed identifier with the given strategy.
pub fn map_typed_identifier<H: HashToInteger + ?Sized>(
    hasher: &H,
    attestation_type: AttestationType,
    identifier: &str,
) -> BigUint {
    hasher.map_to_integer(&typed_identifier_bytes(attestation_type, identifier))
}
