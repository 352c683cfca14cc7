//! Ed25519 signatures (spec §3 `AuthKey`, used by envelopes and records).

use ed25519_dalek::{Signature as Ed25519Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// An Ed25519 digital signature, hex-encoded at serde boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_bytes")] pub [u8; SIGNATURE_SIZE]);

impl Signature {
    /// Builds a signature from raw bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a signature from a slice, requiring exactly 64 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != SIGNATURE_SIZE {
            return Err(Error::InvalidSignatureSize(slice.len()));
        }
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// The raw 64 bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a lowercase hex signature.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|_| Error::InvalidSignatureSize(0))?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Signs `message` with an Ed25519 signing key.
///
/// Ed25519 signatures are deterministic: the same key and message always
/// produce the same signature.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> Signature {
    let sig = signing_key.sign(message);
    Signature(sig.to_bytes())
}

/// Verifies an Ed25519 signature against a 32-byte public key.
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &Signature) -> Result<()> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key).map_err(|_| Error::InvalidSignature)?;
    verify_with_key(&verifying_key, message, signature)
}

/// Verifies an Ed25519 signature against an already-parsed [`VerifyingKey`].
pub fn verify_with_key(
    verifying_key: &VerifyingKey,
    message: &[u8],
    signature: &Signature,
) -> Result<()> {
    let sig = Ed25519Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &sig).map_err(|_| {
        tracing::warn!("ed25519 signature verification failed");
        Error::InvalidSignature
    })
}

mod signature_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 64], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<[u8; 64], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_: Vec<u8>| serde::de::Error::custom("invalid signature length"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let signing_key = SigningKey::from_bytes(&[3u8; 32]);
        let verifying_key = signing_key.verifying_key();
        let sig = sign(&signing_key, b"hello world");
        verify_with_key(&verifying_key, b"hello world", &sig).unwrap();
    }

    #[test]
    fn tampered_message_fails_verification() {
        let signing_key = SigningKey::from_bytes(&[3u8; 32]);
        let verifying_key = signing_key.verifying_key();
        let sig = sign(&signing_key, b"hello world");
        assert!(verify_with_key(&verifying_key, b"goodbye world", &sig).is_err());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let signing_key = SigningKey::from_bytes(&[9u8; 32]);
        let sig = sign(&signing_key, b"payload");
        let hex = sig.to_hex();
        assert_eq!(Signature::from_hex(&hex).unwrap(), sig);
    }

    #[test]
    fn wrong_length_slice_is_rejected() {
        assert!(matches!(
            Signature::from_slice(&[0u8; 10]),
            Err(Error::InvalidSignatureSize(10))
        ));
    }
}
