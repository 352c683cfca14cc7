//! Base58, varint, and checksum primitives shared by the Seed, Account, and
//! KIF text encodings (spec §4.1, §4.2).
//!
//! Base58 itself is delegated to the `bs58` crate (same alphabet the donor
//! crate already uses for its `did:key` encoding); only the varint scheme is
//! hand-rolled, since nothing in the reference corpus implements this exact
//! LEB128-like layout.

mod varint;

pub use varint::{decode_varint, encode_varint, VarintError};

use sha3::{Digest, Sha3_256};

/// Length in bytes of every checksum tag used across Seed, Account, and KIF.
pub const CHECKSUM_LEN: usize = 4;

/// `SHA3-256(payload)[..4]`, the checksum tag used throughout the core.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha3_256::digest(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Constant-time equality for checksum tags. Does not short-circuit on the
/// first differing byte, so the comparison time does not leak which byte
/// first diverged.
pub fn checksum_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Encodes bytes as base58 using the Bitcoin alphabet (leading zero bytes
/// become leading `'1'` characters).
pub fn encode_base58(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decodes a base58 string. Invalid characters yield an empty result per
/// spec §4.1; callers detect malformed input via length checks.
pub fn decode_base58(s: &str) -> Vec<u8> {
    bs58::decode(s).into_vec().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base58_roundtrip() {
        let data = b"hello bitmark";
        let encoded = encode_base58(data);
        let decoded = decode_base58(&encoded);
        assert_eq!(decoded, data);
    }

    #[test]
    fn base58_preserves_leading_zeros() {
        let data = [0u8, 0u8, 1u8, 2u8];
        let encoded = encode_base58(&data);
        assert!(encoded.starts_with("11"));
        assert_eq!(decode_base58(&encoded), data);
    }

    #[test]
    fn checksum_is_four_bytes_of_sha3() {
        let payload = b"payload";
        let full = Sha3_256::digest(payload);
        assert_eq!(checksum(payload), full[..4]);
    }
}
