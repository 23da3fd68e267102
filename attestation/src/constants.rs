//! Constants used across the attestation engine.

/// Size of a Keccak-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Bytes of the second digest prepended to the first by the wide hash.
///
/// 24 bytes (192 bits) widen the 256-bit digest to 448 bits, 128 bits more
/// than the curve order needs.
pub(crate) const WIDE_HASH_PREFIX_BYTES: usize = 24;

/// Domain-separation prefixes of the two wide-hash digests.
pub(crate) const WIDE_HASH_LOW_TAG: u8 = 0x00;
pub(crate) const WIDE_HASH_HIGH_TAG: u8 = 0x01;

/// Key of the legacy HMAC-SHA256 hash.
pub const LEGACY_MAC_KEY: &[u8] = b"static_key";

/// Size of an uncompressed point on a 256-bit field:
/// one tag byte and two 32-byte coordinates.
pub const ENCODED_POINT_SIZE: usize = 65;

/// Size of an account address in bytes (the tail of a Keccak-256 digest).
pub const ADDRESS_SIZE: usize = 20;
