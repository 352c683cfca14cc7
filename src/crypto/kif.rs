//! Key-Import Format (KIF) text codec (spec §3, §4.6).
//!
//! Bytes = `varint(variant64) || seed_core(32) || checksum(4)`, base58-encoded.
//! The 64-bit variant shares its bit layout with the Account variant byte:
//! bit0 = 0 (private-key record), bit1 = test-network flag, bits4..7 =
//! algorithm tag.

use crate::codec::{
    checksum, checksum_eq, decode_base58, decode_varint, encode_base58, encode_varint,
};
use crate::crypto::seed::{Network, Seed};
use crate::error::{Error, Result};

const ALGORITHM_ED25519: u64 = 0x1;
const TEST_BIT: u64 = 1 << 1;
const ALGORITHM_SHIFT: u64 = 4;
const SEED_CORE_LEN: usize = 32;

fn variant64(network: Network, algorithm: u64) -> u64 {
    let mut v = 0u64; // bit0 = 0: private-key record
    if network.is_test() {
        v |= TEST_BIT;
    }
    v |= algorithm << ALGORITHM_SHIFT;
    v
}

/// Encodes a Seed as a KIF string (spec §4.6).
pub fn encode_kif(seed: &Seed) -> String {
    let variant = variant64(seed.network(), ALGORITHM_ED25519);
    let mut payload = encode_varint(variant);
    payload.extend_from_slice(seed.core());

    let tag = checksum(&payload);
    let mut full = payload;
    full.extend_from_slice(&tag);
    encode_base58(&full)
}

/// Decodes a KIF string back into a Seed (spec §4.6). Deriving the
/// corresponding [`super::KeyPair`] is then a matter of calling
/// [`super::KeyPair::from_seed`].
pub fn decode_kif(s: &str) -> Result<Seed> {
    let bytes = decode_base58(s);
    let (variant, varint_len) = decode_varint(&bytes).map_err(|_| Error::KIFLength)?;

    if bytes.len() != varint_len + SEED_CORE_LEN + 4 {
        return Err(Error::KIFLength);
    }

    let (payload, tag) = bytes.split_at(varint_len + SEED_CORE_LEN);
    if !checksum_eq(&checksum(payload), tag) {
        tracing::warn!("kif decode: checksum mismatch");
        return Err(Error::ChecksumMismatch);
    }

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

    let mut core = [0u8; SEED_CORE_LEN];
    core.copy_from_slice(&payload[varint_len..]);
    Ok(Seed::from_core(network, core))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;

    #[test]
    fn roundtrip_preserves_core_and_network() {
        let seed = Seed::from_core(Network::Testnet, [3u8; 32]);
        let kif = encode_kif(&seed);
        let decoded = decode_kif(&kif).unwrap();
        assert_eq!(decoded.core(), seed.core());
        assert_eq!(decoded.network(), Network::Testnet);
    }

    #[test]
    fn roundtrip_rederives_identical_keypair() {
        let seed = Seed::from_core(Network::Livenet, [9u8; 32]);
        let kif = encode_kif(&seed);
        let decoded = decode_kif(&kif).unwrap();

        let original = KeyPair::from_seed(&seed);
        let rederived = KeyPair::from_seed(&decoded);
        assert_eq!(
            original.auth.private_key_bytes(),
            rederived.auth.private_key_bytes()
        );
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let tampered = bs58::encode([0u8; 5]).into_string();
        assert!(matches!(decode_kif(&tampered), Err(Error::KIFLength)));
    }

    #[test]
    fn tampered_checksum_is_rejected() {
        let seed = Seed::from_core(Network::Livenet, [1u8; 32]);
        let kif = encode_kif(&seed);
        let mut raw = bs58::decode(&kif).into_vec().unwrap();
        *raw.last_mut().unwrap() ^= 0xFF;
        let tampered = bs58::encode(raw).into_string();
        assert!(matches!(
            decode_kif(&tampered),
            Err(Error::ChecksumMismatch)
        ));
    }
}
