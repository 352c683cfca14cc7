//! AuthKey (Ed25519) and EncrKey (X25519), deterministically derived from a
//! [`Seed`] (spec §3, §4.4).

use ed25519_dalek::{SigningKey, VerifyingKey};
use x25519_dalek::{PublicKey as XPublicKey, StaticSecret};
use zeroize::ZeroizeOnDrop;

use crate::crypto::account::encode_account;
use crate::crypto::kdf::{derive_auth_seed, derive_encr_seed};
use crate::crypto::seed::{Network, Seed};
use crate::crypto::signing::{self, Signature};
use crate::error::Result;

/// The Ed25519 signing keypair used to author and attest records and
/// envelopes (spec §3 `AuthKey`).
#[derive(ZeroizeOnDrop)]
pub struct AuthKey {
    #[zeroize(skip)]
    signing_key: SigningKey,
    #[zeroize(skip)]
    network: Network,
}

impl AuthKey {
    pub(crate) fn derive(seed: &Seed) -> Self {
        let auth_seed = derive_auth_seed(seed.core());
        let mut ed25519_seed = [0u8; 32];
        ed25519_seed.copy_from_slice(&auth_seed[..32]);
        let signing_key = SigningKey::from_bytes(&ed25519_seed);
        tracing::debug!(network = ?seed.network(), "derived auth key");
        AuthKey {
            signing_key,
            network: seed.network(),
        }
    }

    /// The 64-byte expanded private key (32-byte seed ‖ 32-byte public key),
    /// matching Ed25519's conventional private-key encoding.
    pub fn private_key_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(self.signing_key.as_bytes());
        out[32..].copy_from_slice(self.verifying_key().as_bytes());
        out
    }

    /// The 32-byte Ed25519 public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.verifying_key().to_bytes()
    }

    /// Whether this key was derived for the test network.
    pub fn is_test(&self) -> bool {
        self.network.is_test()
    }

    fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// The base58 account-number string for this key's public key (spec §4.5).
    pub fn account_number(&self) -> String {
        encode_account(&self.public_key_bytes(), self.network)
    }

    /// Signs `message`, returning a 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        signing::sign(&self.signing_key, message)
    }

    /// Verifies a signature produced by this key's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        signing::verify_with_key(&self.verifying_key(), message, signature)
    }
}

/// The X25519 key-agreement keypair used for sealed-box session-key wraps
/// (spec §3 `EncrKey`).
#[derive(ZeroizeOnDrop)]
pub struct EncrKey {
    secret: StaticSecret,
}

impl EncrKey {
    pub(crate) fn derive(seed: &Seed) -> Self {
        let encr_seed = derive_encr_seed(seed.core());
        tracing::debug!(network = ?seed.network(), "derived encr key");
        EncrKey {
            secret: StaticSecret::from(encr_seed),
        }
    }

    /// The 32-byte X25519 private scalar.
    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }

    /// The 32-byte X25519 public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        XPublicKey::from(&self.secret).to_bytes()
    }
}

/// The combined signing + key-agreement keypair derived from one Seed.
pub struct KeyPair {
    /// The Ed25519 signing keypair.
    pub auth: AuthKey,
    /// The X25519 key-agreement keypair.
    pub encr: EncrKey,
}

impl KeyPair {
    /// Derives both keypairs from a Seed (spec §4.4).
    pub fn from_seed(seed: &Seed) -> Self {
        KeyPair {
            auth: AuthKey::derive(seed),
            encr: EncrKey::derive(seed),
        }
    }

    /// Generates a fresh random Seed for `network` and derives a keypair
    /// from it, returning both.
    pub fn generate(network: Network) -> (Self, Seed) {
        let seed = Seed::new(network);
        (Self::from_seed(&seed), seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic_across_instances() {
        let seed = Seed::from_core(Network::Livenet, [5u8; 32]);
        let a = KeyPair::from_seed(&seed);
        let b = KeyPair::from_seed(&seed);
        assert_eq!(a.auth.public_key_bytes(), b.auth.public_key_bytes());
        assert_eq!(a.encr.public_key_bytes(), b.encr.public_key_bytes());
        assert_eq!(a.auth.private_key_bytes(), b.auth.private_key_bytes());
        assert_eq!(a.encr.private_key_bytes(), b.encr.private_key_bytes());
    }

    #[test]
    fn auth_and_encr_public_keys_differ() {
        let seed = Seed::from_core(Network::Livenet, [5u8; 32]);
        let kp = KeyPair::from_seed(&seed);
        assert_ne!(kp.auth.public_key_bytes(), kp.encr.public_key_bytes());
    }

    #[test]
    fn sign_and_verify_via_authkey() {
        let seed = Seed::from_core(Network::Livenet, [8u8; 32]);
        let kp = KeyPair::from_seed(&seed);
        let sig = kp.auth.sign(b"a bitmark record");
        kp.auth.verify(b"a bitmark record", &sig).unwrap();
    }

    #[test]
    fn account_number_reflects_network_flag() {
        let seed = Seed::from_core(Network::Testnet, [1u8; 32]);
        let kp = KeyPair::from_seed(&seed);
        assert!(kp.auth.is_test());
        // Decoding the produced account string must roundtrip the test flag;
        // exercised fully in crypto::account's own tests.
        assert!(!kp.auth.account_number().is_empty());
    }
}
