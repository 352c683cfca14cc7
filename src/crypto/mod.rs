//! # Cryptography Module
//!
//! This module provides all cryptographic primitives used by the Bitmark
//! client-side core.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    KEY HIERARCHY                                │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  Seed (32 bytes of entropy, base58 with header/network/checksum)│   │
//! │  │                          │                                      │   │
//! │  │            ┌─────────────┴─────────────┐                       │   │
//! │  │            ▼                           ▼                       │   │
//! │  │  ┌─────────────────┐         ┌─────────────────┐              │   │
//! │  │  │  AuthKey        │         │  EncrKey        │              │   │
//! │  │  │  (Ed25519)      │         │  (X25519)       │              │   │
//! │  │  │                 │         │                 │              │   │
//! │  │  │ • Identity      │         │ • Key Exchange  │              │   │
//! │  │  │ • Signatures    │         │ • Session wraps │              │   │
//! │  │  └─────────────────┘         └─────────────────┘              │   │
//! │  │                                                                 │   │
//! │  │  Both are derived via a secretbox-PRF over the seed's core,    │   │
//! │  │  keyed on a fixed counter (999 for auth, 1000 for encr).       │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SESSION ENVELOPE SCHEME                         │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  1. SessionKey: random 256-bit ChaCha20-Poly1305 key, single-use│   │
//! │  │  2. Payload: ChaCha20-Poly1305(session_key, zero_nonce, data)   │   │
//! │  │  3. Key wrap: NaCl sealed box (X25519 + XSalsa20-Poly1305)      │   │
//! │  │  4. Attestation: dual Ed25519 signatures (wrap + raw key)       │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices & Rationale
//!
//! | Algorithm | Purpose | Why Chosen |
//! |-----------|---------|------------|
//! | Ed25519 | Signing | Fast, small keys, widely audited |
//! | X25519 | Key Exchange | Fast ECDH, same curve as Ed25519 |
//! | ChaCha20-Poly1305 | Session payload AEAD | Fast in software, constant-time |
//! | NaCl sealed box (`crypto_box`) | Session-key wrap | Matches spec's wire format |
//! | XSalsa20-Poly1305 secretbox | Key-derivation PRF | Interop with the source implementation |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: secret key material is zeroized when dropped
//! 2. **Constant-Time Operations**: using dalek/RustCrypto for constant-time crypto
//! 3. **Secure Random**: using `rand::rngs::OsRng` for cryptographic randomness
//! 4. **No Nonce Reuse**: session keys are single-use, so a fixed AEAD nonce is safe

pub mod account;
mod encryption;
mod kdf;
pub mod keys;
pub mod kif;
pub mod seed;
pub mod signing;

pub use encryption::{
    create_session_data, decrypt_asset, encrypt_asset, parse_session_data, SessionData, SessionKey,
    BOX_NONCE_SIZE, NONCE_SIZE, SESSION_KEY_SIZE, WRAPPED_SESSION_KEY_SIZE,
};
pub use keys::{AuthKey, EncrKey, KeyPair};
pub use seed::{Network, Seed};
pub use signing::{sign, verify, Signature, SIGNATURE_SIZE};

pub use account::{decode_account, encode_account, DecodedAccount};
pub use kif::{decode_kif, encode_kif};
