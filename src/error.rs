//! # Error Handling
//!
//! This module provides the typed error taxonomy for bitmark-core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Seed Errors                                                       │
//! │  │   ├── SeedSizeMismatch     - decoded seed is not 40 bytes           │
//! │  │   ├── SeedHeaderMismatch   - header bytes are not 5A FE 01          │
//! │  │   └── SeedChecksumMismatch - trailing 4 bytes don't match SHA3-256  │
//! │  │                                                                      │
//! │  ├── Text codec Errors (Account / KIF)                                │
//! │  │   ├── KIFLength                - decoded KIF is the wrong length    │
//! │  │   ├── InvalidKeyType           - private/public bit unexpected      │
//! │  │   ├── InvalidAlgorithm         - unknown algorithm tag              │
//! │  │   └── ChecksumMismatch         - trailing checksum doesn't match    │
//! │  │                                                                      │
//! │  ├── Record Errors                                                     │
//! │  │   ├── EmptyMetaKeyValue    - Asset metadata key or value is empty   │
//! │  │   └── PackFailure          - external record codec returned nil    │
//! │  │                                                                      │
//! │  └── Envelope / AEAD Errors                                           │
//! │      ├── InvalidCiphertextCount           - framed length doesn't fit  │
//! │      ├── InvalidCiphertext                - AEAD open failed           │
//! │      ├── InvalidEncryptedFileSize         - asset envelope too short   │
//! │      ├── InvalidSignatureSize             - signature is not 64 bytes  │
//! │      ├── InvalidSignature                 - Ed25519 verify failed     │
//! │      ├── InvalidEncryptedSessionKeySignature - enc_skey_sig failed     │
//! │      ├── InvalidSessionKeySignature          - skey_sig failed        │
//! │      ├── UnableToDecrypt                  - sealed-box open failed     │
//! │      └── UnsupportedAlgorithm             - unknown session algorithm  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for bitmark-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy exposed by bitmark-core (spec §6/§7).
///
/// Cryptographic failures are surfaced verbatim: the core never substitutes
/// a zero/empty success for a failed verification, decrypt, or checksum.
#[derive(Error, Debug)]
pub enum Error {
    // ------------------------------------------------------------------
    // Seed (§4.3)
    // ------------------------------------------------------------------
    /// A seed was not constructed from valid 32 bytes of entropy.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// Decoded seed bytes are not exactly 40 bytes long.
    #[error("seed has wrong length: expected 40 bytes, got {0}")]
    SeedSizeMismatch(usize),

    /// Decoded seed header did not match `5A FE 01`.
    #[error("seed header mismatch")]
    SeedHeaderMismatch,

    /// Decoded seed's trailing checksum did not match `SHA3-256(..)[..4]`.
    #[error("seed checksum mismatch")]
    SeedChecksumMismatch,

    // ------------------------------------------------------------------
    // KIF (§4.6)
    // ------------------------------------------------------------------
    /// Decoded KIF bytes are not `varint_len + 32 + 4` bytes long.
    #[error("KIF has wrong length")]
    KIFLength,

    // ------------------------------------------------------------------
    // Account / KIF variant byte (§4.5, §4.6)
    // ------------------------------------------------------------------
    /// The variant byte's private/public bit did not match what the caller expected.
    #[error("invalid key type in variant byte")]
    InvalidKeyType,

    /// The variant byte's algorithm tag is not a recognized suite.
    #[error("invalid or unsupported algorithm tag")]
    InvalidAlgorithm,

    /// A trailing 4-byte checksum did not match `SHA3-256(payload)[..4]`.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    // ------------------------------------------------------------------
    // Records (§3, §4.9)
    // ------------------------------------------------------------------
    /// Asset metadata contained an empty key or empty value.
    #[error("asset metadata key or value must not be empty")]
    EmptyMetaKeyValue,

    /// The external record codec returned a packing failure.
    #[error("record packing failed")]
    PackFailure,

    // ------------------------------------------------------------------
    // Session key / AEAD (§4.7)
    // ------------------------------------------------------------------
    /// The framed ciphertext's declared length does not fit the buffer.
    #[error("invalid ciphertext length prefix")]
    InvalidCiphertextCount,

    /// ChaCha20-Poly1305 AEAD open failed.
    #[error("invalid ciphertext: AEAD authentication failed")]
    InvalidCiphertext,

    /// An asset-file envelope is shorter than the trailing 64-byte signature.
    #[error("encrypted asset envelope is too short to contain a signature")]
    InvalidEncryptedFileSize,

    /// A signature buffer is not exactly 64 bytes.
    #[error("signature has wrong length: expected 64 bytes, got {0}")]
    InvalidSignatureSize(usize),

    /// Ed25519 signature verification failed.
    #[error("signature verification failed")]
    InvalidSignature,

    // ------------------------------------------------------------------
    // SessionData envelope (§4.8)
    // ------------------------------------------------------------------
    /// `encrypted_session_key_signature` did not verify over the wrapped key.
    #[error("encrypted session key signature is invalid")]
    InvalidEncryptedSessionKeySignature,

    /// `session_key_signature` did not verify over the raw session key.
    #[error("session key signature is invalid")]
    InvalidSessionKeySignature,

    /// The NaCl sealed-box open failed (wrong keys, tampered ciphertext, or wrong nonce).
    #[error("unable to decrypt: sealed-box open failed")]
    UnableToDecrypt,

    /// An algorithm tag was recognized as a variant but is not implemented.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------
    /// Base58 decoding failed at the text-encoding boundary.
    #[error("base58 decode error: {0}")]
    Base58Decode(#[from] bs58::decode::Error),
}

impl Error {
    /// A stable numeric code for each variant, for FFI/boundary use.
    ///
    /// Grouped by domain, matching the donor crate's `Error::code()` convention.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidSeed(_) => 100,
            Error::SeedSizeMismatch(_) => 101,
            Error::SeedHeaderMismatch => 102,
            Error::SeedChecksumMismatch => 103,
            Error::KIFLength => 110,
            Error::InvalidKeyType => 111,
            Error::InvalidAlgorithm => 112,
            Error::ChecksumMismatch => 113,
            Error::EmptyMetaKeyValue => 120,
            Error::PackFailure => 121,
            Error::InvalidCiphertextCount => 130,
            Error::InvalidCiphertext => 131,
            Error::InvalidEncryptedFileSize => 132,
            Error::InvalidSignatureSize(_) => 133,
            Error::InvalidSignature => 134,
            Error::InvalidEncryptedSessionKeySignature => 140,
            Error::InvalidSessionKeySignature => 141,
            Error::UnableToDecrypt => 142,
            Error::UnsupportedAlgorithm => 143,
            Error::Base58Decode(_) => 150,
        }
    }
}
