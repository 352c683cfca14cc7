//! Deterministic key derivation (spec §4.4).
//!
//! AuthKey and EncrKey are both derived from a Seed's 32-byte `core` by
//! using XSalsa20-Poly1305 "secretbox" as a keyed PRF: the core is the
//! secretbox key, the nonce is fixed at all-zero, and the "plaintext" is a
//! 16-byte big-endian counter distinguishing the two keys. The sealed
//! output (16-byte Poly1305 tag ‖ 16-byte encrypted counter = 32 bytes) is
//! fed whole as the downstream keypair's seed.
//!
//! This is unusual but intentional for interop with the source
//! implementation (`original_source/key.go`'s `NewAuthKey`/`NewEncrKey`).
//! It is a PRF application, not a confidentiality use: the MAC-tagged
//! ciphertext only ever supplies pseudo-random material.

use crypto_secretbox::{aead::Aead, KeyInit, XSalsa20Poly1305};

/// Counter value (999) selected for the Ed25519 signing key.
const COUNTER_AUTH: u128 = 0x03e7;
/// Counter value (1000) selected for the X25519 encryption key.
const COUNTER_ENCR: u128 = 0x03e8;

/// Fixed all-zero 24-byte nonce used for every secretbox-PRF call. Safe
/// because the key (the seed core) is never reused across two different
/// counters that collide.
fn seed_nonce() -> crypto_secretbox::Nonce {
    crypto_secretbox::Nonce::default()
}

fn counter_bytes(counter: u128) -> [u8; 16] {
    counter.to_be_bytes()
}

fn secretbox_seal(core: &[u8; 32], counter: u128) -> [u8; 32] {
    let cipher = XSalsa20Poly1305::new(crypto_secretbox::Key::from_slice(core));
    let plaintext = counter_bytes(counter);
    let sealed = cipher
        .encrypt(&seed_nonce(), plaintext.as_ref())
        .expect("secretbox seal over a fixed 16-byte buffer cannot fail");
    let mut out = [0u8; 32];
    out.copy_from_slice(&sealed);
    out
}

/// Derives the 32-byte seed fed to Ed25519 keypair generation.
pub(crate) fn derive_auth_seed(core: &[u8; 32]) -> [u8; 32] {
    secretbox_seal(core, COUNTER_AUTH)
}

/// Derives the 32-byte seed fed to X25519 keypair generation.
pub(crate) fn derive_encr_seed(core: &[u8; 32]) -> [u8; 32] {
    secretbox_seal(core, COUNTER_ENCR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let core = [7u8; 32];
        assert_eq!(derive_auth_seed(&core), derive_auth_seed(&core));
        assert_eq!(derive_encr_seed(&core), derive_encr_seed(&core));
    }

    #[test]
    fn auth_and_encr_seeds_differ() {
        let core = [7u8; 32];
        assert_ne!(derive_auth_seed(&core), derive_encr_seed(&core));
    }

    #[test]
    fn different_cores_derive_different_seeds() {
        assert_ne!(derive_auth_seed(&[1u8; 32]), derive_auth_seed(&[2u8; 32]));
    }

    #[test]
    fn counter_bytes_are_big_endian() {
        let bytes = counter_bytes(0x03e7);
        assert_eq!(&bytes[14..], &[0x03, 0xe7]);
        assert!(bytes[..14].iter().all(|&b| b == 0));
    }
}
