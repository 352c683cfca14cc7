//! Account / public-key text codec (spec §3, §4.5).
//!
//! Bytes = `variant(1) || publicKey(32) || checksum(4)`, base58-encoded.
//! The variant byte is bit-packed: bit0 = 0 (public-key record), bit1 =
//! test-network flag, bits4..7 = algorithm tag.

use crate::codec::{checksum, checksum_eq, decode_base58, encode_base58};
use crate::crypto::seed::Network;
use crate::error::{Error, Result};

const ALGORITHM_ED25519: u8 = 0x1;
const TEST_BIT: u8 = 1 << 1;
const ALGORITHM_SHIFT: u8 = 4;
const ACCOUNT_DECODED_LEN: usize = 37; // variant(1) + pubkey(32) + checksum(4)

fn variant_byte(network: Network, algorithm: u8) -> u8 {
    let mut v = 0u8; // bit0 = 0: public-key record
    if network.is_test() {
        v |= TEST_BIT;
    }
    v |= algorithm << ALGORITHM_SHIFT;
    v
}

/// Encodes a 32-byte Ed25519 public key as a base58 account string.
pub fn encode_account(public_key: &[u8; 32], network: Network) -> String {
    let variant = variant_byte(network, ALGORITHM_ED25519);

    let mut payload = Vec::with_capacity(33);
    payload.push(variant);
    payload.extend_from_slice(public_key);

    let tag = checksum(&payload);
    let mut full = payload;
    full.extend_from_slice(&tag);
    encode_base58(&full)
}

/// A decoded Account/PublicKey string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAccount {
    /// The 32-byte Ed25519 public key.
    pub public_key: [u8; 32],
    /// Which network this account belongs to.
    pub network: Network,
}

/// Decodes a base58 account string (spec §4.5).
pub fn decode_account(s: &str) -> Result<DecodedAccount> {
    let bytes = decode_base58(s);
    if bytes.len() != ACCOUNT_DECODED_LEN {
        return Err(Error::InvalidKeyType);
    }

    let (payload, tag) = bytes.split_at(33);
    if !checksum_eq(&checksum(payload), tag) {
        tracing::warn!("account decode: checksum mismatch");
        return Err(Error::ChecksumMismatch);
    }

    let variant = payload[0];
    if variant & 0x1 != 0 {
        return Err(Error::InvalidKeyType);
    }
    let algorithm = variant >> ALGORITHM_SHIFT;
    if algorithm != ALGORITHM_ED25519 {
        return Err(Error::InvalidAlgorithm);
    }
    let network = if variant & TEST_BIT != 0 {
        Network::Testnet
    } else {
        Network::Livenet
    };

    let mut public_key = [0u8; 32];
    public_key.copy_from_slice(&payload[1..33]);
    Ok(DecodedAccount {
        public_key,
        network,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_livenet() {
        let pubkey = [42u8; 32];
        let encoded = encode_account(&pubkey, Network::Livenet);
        let decoded = decode_account(&encoded).unwrap();
        assert_eq!(decoded.public_key, pubkey);
        assert_eq!(decoded.network, Network::Livenet);
    }

    #[test]
    fn roundtrip_testnet_flag() {
        let pubkey = [7u8; 32];
        let encoded = encode_account(&pubkey, Network::Testnet);
        let decoded = decode_account(&encoded).unwrap();
        assert_eq!(decoded.network, Network::Testnet);
    }

    #[test]
    fn decoded_length_is_normative() {
        let encoded = encode_account(&[1u8; 32], Network::Livenet);
        let raw = bs58::decode(&encoded).into_vec().unwrap();
        assert_eq!(raw.len(), ACCOUNT_DECODED_LEN);
    }

    #[test]
    fn tampered_checksum_rejected() {
        let encoded = encode_account(&[1u8; 32], Network::Livenet);
        let mut raw = bs58::decode(&encoded).into_vec().unwrap();
        *raw.last_mut().unwrap() ^= 0xFF;
        let tampered = bs58::encode(raw).into_string();
        assert!(matches!(
            decode_account(&tampered),
            Err(Error::ChecksumMismatch)
        ));
    }

    #[test]
    fn private_key_bit_set_is_rejected() {
        let mut raw = bs58::decode(encode_account(&[1u8; 32], Network::Livenet))
            .into_vec()
            .unwrap();
        raw[0] |= 0x1;
        let tag = checksum(&raw[..33]);
        raw[33..].copy_from_slice(&tag);
        let tampered = bs58::encode(raw).into_string();
        assert!(matches!(
            decode_account(&tampered),
            Err(Error::InvalidKeyType)
        ));
    }
}
