//! Seed: the 32-byte root of entropy every keypair is derived from
//! (spec §3, §4.3).

use crate::codec::{checksum, checksum_eq, decode_base58, encode_base58};
use crate::error::{Error, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// `5A FE 01`, the fixed header of every encoded seed.
const SEED_HEADER: [u8; 3] = [0x5A, 0xFE, 0x01];
/// Total decoded length: header(3) + network(1) + core(32) + checksum(4).
const SEED_ENCODED_LEN: usize = 40;
const SEED_CORE_LEN: usize = 32;

/// Which Bitmark network a Seed/Account/KIF belongs to.
///
/// Modeled as an enum rather than a bare `bool` so call sites read `Network::Testnet`
/// instead of an unlabeled `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// The production Bitmark network.
    Livenet,
    /// The test network.
    Testnet,
}

impl Network {
    fn prefix_byte(self) -> u8 {
        match self {
            Network::Livenet => 0x00,
            Network::Testnet => 0x01,
        }
    }

    fn from_prefix_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(Network::Livenet),
            0x01 => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Whether this network sets the `test` flag bit used in variant bytes.
    pub fn is_test(self) -> bool {
        matches!(self, Network::Testnet)
    }
}

/// 32 bytes of root entropy plus version/network metadata (spec §3).
///
/// Immutable once constructed; the `core` buffer is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    #[zeroize(skip)]
    network: Network,
    core: [u8; SEED_CORE_LEN],
}

impl Seed {
    /// Draws fresh entropy from the platform CSPRNG for the given network.
    pub fn new(network: Network) -> Self {
        let mut core = [0u8; SEED_CORE_LEN];
        OsRng.fill_bytes(&mut core);
        tracing::debug!(?network, "generated new seed");
        Seed { network, core }
    }

    /// Constructs a Seed from an already-known 32-byte core (e.g. in tests,
    /// or when reconstructing from a KIF).
    pub fn from_core(network: Network, core: [u8; SEED_CORE_LEN]) -> Self {
        Seed { network, core }
    }

    /// The seed's 32-byte entropy core.
    pub fn core(&self) -> &[u8; SEED_CORE_LEN] {
        &self.core
    }

    /// Which network this seed belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Encodes this seed as base58(header‖network‖core‖checksum).
    pub fn to_base58(&self) -> String {
        let mut payload = Vec::with_capacity(36);
        payload.extend_from_slice(&SEED_HEADER);
        payload.push(self.network.prefix_byte());
        payload.extend_from_slice(&self.core);
        let tag = checksum(&payload);

        let mut full = payload;
        full.extend_from_slice(&tag);
        encode_base58(&full)
    }

    /// Parses a seed previously produced by [`Seed::to_base58`].
    pub fn from_base58(s: &str) -> Result<Self> {
        let bytes = decode_base58(s);
        if bytes.len() != SEED_ENCODED_LEN {
            tracing::warn!(len = bytes.len(), "seed decode: size mismatch");
            return Err(Error::SeedSizeMismatch(bytes.len()));
        }
        if bytes[..3] != SEED_HEADER {
            tracing::warn!("seed decode: header mismatch");
            return Err(Error::SeedHeaderMismatch);
        }
        let network = Network::from_prefix_byte(bytes[3]).ok_or_else(|| {
            tracing::warn!("seed decode: unknown network prefix");
            Error::InvalidSeed("unknown network prefix".into())
        })?;

        let (payload, tag) = bytes.split_at(36);
        if !checksum_eq(&checksum(payload), tag) {
            tracing::warn!("seed decode: checksum mismatch");
            return Err(Error::SeedChecksumMismatch);
        }

        let mut core = [0u8; SEED_CORE_LEN];
        core.copy_from_slice(&bytes[4..36]);
        Ok(Seed { network, core })
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed")
            .field("network", &self.network)
            .field("core", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testnet_zero_core_roundtrip() {
        let seed = Seed::from_core(Network::Testnet, [0u8; 32]);
        let encoded = seed.to_base58();
        let decoded = Seed::from_base58(&encoded).unwrap();
        assert_eq!(decoded.network(), Network::Testnet);
        assert_eq!(decoded.core(), seed.core());
    }

    #[test]
    fn decoded_length_and_header_are_normative() {
        let seed = Seed::new(Network::Livenet);
        let raw = bs58::decode(seed.to_base58()).into_vec().unwrap();
        assert_eq!(raw.len(), SEED_ENCODED_LEN);
        assert_eq!(&raw[..3], &SEED_HEADER);
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let seed = Seed::new(Network::Livenet);
        let mut raw = bs58::decode(seed.to_base58()).into_vec().unwrap();
        *raw.last_mut().unwrap() ^= 0xFF;
        let tampered = bs58::encode(raw).into_string();
        assert!(matches!(
            Seed::from_base58(&tampered),
            Err(Error::SeedChecksumMismatch)
        ));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let tampered = bs58::encode([0u8; 10]).into_string();
        assert!(matches!(
            Seed::from_base58(&tampered),
            Err(Error::SeedSizeMismatch(10))
        ));
    }

    #[test]
    fn random_seeds_are_not_equal() {
        let a = Seed::new(Network::Livenet);
        let b = Seed::new(Network::Livenet);
        assert_ne!(a.core(), b.core());
    }
}
