//! Session key AEAD and the SessionData sealed-box envelope (spec §4.7, §4.8).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     SESSION ENVELOPE ARCHITECTURE                       │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. SessionKey::new() draws 32 random bytes.                            │
//! │  2. Payload is sealed with ChaCha20-Poly1305, fixed all-zero nonce      │
//! │     (safe: a session key is single-use).                                │
//! │  3. The session key itself is wrapped to the recipient with a NaCl      │
//! │     sealed box (X25519 + XSalsa20-Poly1305, random nonce).              │
//! │  4. The sender's AuthKey signs both the wrapped blob and the raw key,   │
//! │     producing the two-signature SessionData envelope.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chacha20poly1305::{ChaCha20Poly1305, KeyInit as _};
use crypto_box::aead::Aead as BoxAead;
use crypto_box::{PublicKey as BoxPublicKey, SalsaBox, SecretKey as BoxSecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::crypto::keys::{AuthKey, EncrKey};
use crate::crypto::signing::{self, Signature};
use crate::error::{Error, Result};

/// Size of a session key in bytes.
pub const SESSION_KEY_SIZE: usize = 32;
/// Size of the ChaCha20-Poly1305 nonce (always zero in this scheme).
pub const NONCE_SIZE: usize = 12;
/// Size of a NaCl box nonce.
pub const BOX_NONCE_SIZE: usize = 24;
/// Total size of `SessionData.encrypted_session_key`: nonce(24) + key(32) + tag(16).
pub const WRAPPED_SESSION_KEY_SIZE: usize = BOX_NONCE_SIZE + SESSION_KEY_SIZE + 16;

/// A single-use symmetric key for the ChaCha20-Poly1305 AEAD (spec §3 `SessionKey`).
///
/// Session keys are single-use by construction: the AEAD nonce is fixed at
/// all-zero, so reusing a `SessionKey` across two encryptions would reuse a
/// nonce under the same key. Callers MUST NOT encrypt more than one payload
/// with the same `SessionKey`.
#[derive(ZeroizeOnDrop)]
pub struct SessionKey([u8; SESSION_KEY_SIZE]);

impl SessionKey {
    /// Draws a fresh session key from the platform CSPRNG.
    pub fn new() -> Self {
        let mut bytes = [0u8; SESSION_KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        SessionKey(bytes)
    }

    /// Wraps raw bytes as a session key (e.g. after unwrapping a SessionData envelope).
    pub fn from_bytes(bytes: [u8; SESSION_KEY_SIZE]) -> Self {
        SessionKey(bytes)
    }

    /// The raw 32 key bytes.
    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.0
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new(chacha20poly1305::Key::from_slice(&self.0))
    }

    /// Encrypts `plaintext`, returning the raw AEAD output (tag appended, no framing).
    fn encrypt_raw(&self, plaintext: &[u8]) -> Vec<u8> {
        self.cipher()
            .encrypt(&chacha20poly1305::Nonce::default(), plaintext)
            .expect("ChaCha20-Poly1305 encryption over an in-memory buffer cannot fail")
    }

    fn decrypt_raw(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.cipher()
            .decrypt(&chacha20poly1305::Nonce::default(), ciphertext)
            .map_err(|_| {
                tracing::warn!("chacha20poly1305 AEAD open failed");
                Error::InvalidCiphertext
            })
    }

    /// Framed form (spec §4.7): `u64_le(len) || aead_output`.
    pub fn encrypt_framed(&self, plaintext: &[u8]) -> Vec<u8> {
        let ct = self.encrypt_raw(plaintext);
        let mut out = Vec::with_capacity(8 + ct.len());
        out.extend_from_slice(&(ct.len() as u64).to_le_bytes());
        out.extend_from_slice(&ct);
        out
    }

    /// Decrypts the framed form.
    pub fn decrypt_framed(&self, framed: &[u8]) -> Result<Vec<u8>> {
        if framed.len() < 8 {
            return Err(Error::InvalidCiphertextCount);
        }
        let len = u64::from_le_bytes(framed[..8].try_into().unwrap()) as usize;
        if framed.len() != 8 + len {
            return Err(Error::InvalidCiphertextCount);
        }
        self.decrypt_raw(&framed[8..])
    }

    /// Unframed form (spec §4.7): the raw AEAD output with no length prefix,
    /// used for asset-file envelopes.
    pub fn encrypt_unframed(&self, plaintext: &[u8]) -> Vec<u8> {
        self.encrypt_raw(plaintext)
    }

    /// Decrypts the unframed form.
    pub fn decrypt_unframed(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_raw(ciphertext)
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Sign-then-encrypt an asset file (spec §4.7 `encrypt_asset`).
///
/// Output is `ciphertext || signature`, where `signature` is the 64-byte
/// Ed25519 signature of the *plaintext* (not the ciphertext).
pub fn encrypt_asset(plaintext: &[u8], session_key: &SessionKey, auth: &AuthKey) -> Vec<u8> {
    let ct = session_key.encrypt_unframed(plaintext);
    let sig = auth.sign(plaintext);
    let mut out = Vec::with_capacity(ct.len() + signing::SIGNATURE_SIZE);
    out.extend_from_slice(&ct);
    out.extend_from_slice(sig.as_bytes());
    out
}

/// Decrypts and verifies an asset-file envelope (spec §4.7 `decrypt_asset`).
pub fn decrypt_asset(
    envelope: &[u8],
    session_key: &SessionKey,
    auth_public: &[u8; 32],
) -> Result<Vec<u8>> {
    if envelope.len() < signing::SIGNATURE_SIZE {
        tracing::warn!(len = envelope.len(), "encrypted asset envelope too short");
        return Err(Error::InvalidEncryptedFileSize);
    }
    let (ct, sig_bytes) = envelope.split_at(envelope.len() - signing::SIGNATURE_SIZE);
    let signature = Signature::from_slice(sig_bytes)?;

    let plaintext = session_key.decrypt_unframed(ct)?;
    signing::verify(auth_public, &plaintext, &signature)?;
    Ok(plaintext)
}

/// The three-field sealed-box envelope that accompanies a SessionKey
/// (spec §3 `SessionData`, §4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// `nonce(24) || sealed_box(session_key)`.
    #[serde(with = "hex_bytes", rename = "enc_skey")]
    pub encrypted_session_key: Vec<u8>,
    /// Ed25519 signature over `encrypted_session_key`.
    #[serde(rename = "enc_skey_sig")]
    pub encrypted_session_key_signature: Signature,
    /// Ed25519 signature over the raw session-key bytes.
    #[serde(rename = "skey_sig")]
    pub session_key_signature: Signature,
}

/// Wraps a SessionKey to `recipient_encr_pub` and attests it with the
/// sender's AuthKey (spec §4.8 `create_session_data`).
pub fn create_session_data(
    session_key: &SessionKey,
    recipient_encr_pub: &[u8; 32],
    sender_encr: &EncrKey,
    sender_auth: &AuthKey,
) -> SessionData {
    let sealed_box = SalsaBox::new(
        &BoxPublicKey::from(*recipient_encr_pub),
        &BoxSecretKey::from(sender_encr.private_key_bytes()),
    );
    let mut nonce_bytes = [0u8; BOX_NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = crypto_box::Nonce::from(nonce_bytes);

    let ciphertext = sealed_box
        .encrypt(&nonce, session_key.as_bytes().as_ref())
        .expect("sealed-box encryption over a 32-byte key cannot fail");

    let mut wrapped = Vec::with_capacity(WRAPPED_SESSION_KEY_SIZE);
    wrapped.extend_from_slice(&nonce_bytes);
    wrapped.extend_from_slice(&ciphertext);

    let enc_sig = sender_auth.sign(&wrapped);
    let key_sig = sender_auth.sign(session_key.as_bytes());

    SessionData {
        encrypted_session_key: wrapped,
        encrypted_session_key_signature: enc_sig,
        session_key_signature: key_sig,
    }
}

/// Verifies and unwraps a SessionData envelope, returning the SessionKey
/// (spec §4.8 `parse_session_data`).
pub fn parse_session_data(
    sd: &SessionData,
    sender_encr_pub: &[u8; 32],
    recipient_encr: &EncrKey,
    sender_auth_pub: &[u8; 32],
) -> Result<SessionKey> {
    signing::verify(
        sender_auth_pub,
        &sd.encrypted_session_key,
        &sd.encrypted_session_key_signature,
    )
    .map_err(|_| {
        tracing::warn!("encrypted_session_key signature verification failed");
        Error::InvalidEncryptedSessionKeySignature
    })?;

    if sd.encrypted_session_key.len() < BOX_NONCE_SIZE {
        tracing::warn!("encrypted_session_key shorter than its nonce prefix");
        return Err(Error::UnableToDecrypt);
    }
    let (nonce_bytes, ciphertext) = sd.encrypted_session_key.split_at(BOX_NONCE_SIZE);
    let nonce = crypto_box::Nonce::clone_from_slice(nonce_bytes);

    let sealed_box = SalsaBox::new(
        &BoxPublicKey::from(*sender_encr_pub),
        &BoxSecretKey::from(recipient_encr.private_key_bytes()),
    );
    let skey_bytes = sealed_box.decrypt(&nonce, ciphertext).map_err(|_| {
        tracing::warn!("sealed-box open failed while unwrapping session key");
        Error::UnableToDecrypt
    })?;

    signing::verify(sender_auth_pub, &skey_bytes, &sd.session_key_signature).map_err(|_| {
        tracing::warn!("session_key signature verification failed");
        Error::InvalidSessionKeySignature
    })?;

    let bytes: [u8; SESSION_KEY_SIZE] =
        skey_bytes.try_into().map_err(|_| Error::UnableToDecrypt)?;
    Ok(SessionKey::from_bytes(bytes))
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Tolerant of decode errors on this individual field (spec §6/§9):
        // callers are required to verify by signature, not by parse success.
        let s = String::deserialize(deserializer)?;
        Ok(hex::decode(&s).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::crypto::seed::{Network, Seed};

    #[test]
    fn unframed_roundtrip() {
        let key = SessionKey::new();
        let ct = key.encrypt_unframed(b"hello world");
        assert_eq!(key.decrypt_unframed(&ct).unwrap(), b"hello world");
    }

    #[test]
    fn framed_roundtrip() {
        let key = SessionKey::new();
        let framed = key.encrypt_framed(b"hello world");
        assert_eq!(key.decrypt_framed(&framed).unwrap(), b"hello world");
    }

    #[test]
    fn framed_tamper_is_detected() {
        let key = SessionKey::new();
        let mut framed = key.encrypt_framed(b"hello world");
        let last = framed.len() - 1;
        framed[last] ^= 0xFF;
        assert!(key.decrypt_framed(&framed).is_err());
    }

    #[test]
    fn asset_roundtrip() {
        let seed = Seed::from_core(Network::Livenet, [4u8; 32]);
        let kp = KeyPair::from_seed(&seed);
        let key = SessionKey::new();

        let envelope = encrypt_asset(b"hello world", &key, &kp.auth);
        let plaintext = decrypt_asset(&envelope, &key, &kp.auth.public_key_bytes()).unwrap();
        assert_eq!(plaintext, b"hello world");
    }

    #[test]
    fn asset_truncation_is_rejected() {
        let seed = Seed::from_core(Network::Livenet, [4u8; 32]);
        let kp = KeyPair::from_seed(&seed);
        let key = SessionKey::new();

        let mut envelope = encrypt_asset(b"hello world", &key, &kp.auth);
        envelope.pop();
        assert!(decrypt_asset(&envelope, &key, &kp.auth.public_key_bytes()).is_err());
    }

    fn matched_pair() -> (KeyPair, KeyPair) {
        let sender_seed = Seed::from_core(Network::Livenet, [1u8; 32]);
        let recipient_seed = Seed::from_core(Network::Livenet, [2u8; 32]);
        (
            KeyPair::from_seed(&sender_seed),
            KeyPair::from_seed(&recipient_seed),
        )
    }

    #[test]
    fn session_data_roundtrip() {
        let (sender, recipient) = matched_pair();
        let key = SessionKey::new();

        let sd = create_session_data(
            &key,
            &recipient.encr.public_key_bytes(),
            &sender.encr,
            &sender.auth,
        );

        let unwrapped = parse_session_data(
            &sd,
            &sender.encr.public_key_bytes(),
            &recipient.encr,
            &sender.auth.public_key_bytes(),
        )
        .unwrap();

        assert_eq!(unwrapped.as_bytes(), key.as_bytes());
    }

    #[test]
    fn tampering_encrypted_session_key_breaks_its_signature() {
        let (sender, recipient) = matched_pair();
        let key = SessionKey::new();
        let mut sd = create_session_data(
            &key,
            &recipient.encr.public_key_bytes(),
            &sender.encr,
            &sender.auth,
        );
        sd.encrypted_session_key[0] ^= 0xFF;

        let result = parse_session_data(
            &sd,
            &sender.encr.public_key_bytes(),
            &recipient.encr,
            &sender.auth.public_key_bytes(),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidEncryptedSessionKeySignature)
        ));
    }

    #[test]
    fn tampering_session_key_signature_is_detected() {
        let (sender, recipient) = matched_pair();
        let key = SessionKey::new();
        let mut sd = create_session_data(
            &key,
            &recipient.encr.public_key_bytes(),
            &sender.encr,
            &sender.auth,
        );
        sd.session_key_signature.0[0] ^= 0xFF;

        let result = parse_session_data(
            &sd,
            &sender.encr.public_key_bytes(),
            &recipient.encr,
            &sender.auth.public_key_bytes(),
        );
        assert!(matches!(result, Err(Error::InvalidSessionKeySignature)));
    }

    #[test]
    fn session_data_json_roundtrip() {
        let (sender, recipient) = matched_pair();
        let key = SessionKey::new();
        let sd = create_session_data(
            &key,
            &recipient.encr.public_key_bytes(),
            &sender.encr,
            &sender.auth,
        );

        let json = serde_json::to_string(&sd).unwrap();
        assert!(json.contains("enc_skey"));
        let parsed: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.encrypted_session_key, sd.encrypted_session_key);
    }
}
