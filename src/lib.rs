//! # Bitmark Core
//!
//! Client-side cryptographic core for the Bitmark digital-property platform:
//! deterministic keypair derivation, account/KIF text encodings, a hybrid
//! session-key encryption envelope, and Asset/Issue/Transfer record signing.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BITMARK CORE MODULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────────────────┐   │
//! │  │   Seed      │  │   Codec     │  │           Crypto             │   │
//! │  │             │  │             │  │                              │   │
//! │  │ - Entropy   │  │ - base58    │  │ - AuthKey (Ed25519)          │   │
//! │  │ - Network   │  │ - varint    │  │ - EncrKey (X25519)           │   │
//! │  │ - Checksum  │  │ - checksum  │  │ - SessionKey / SessionData  │   │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────────┬───────────────┘   │
//! │         │                │                        │                   │
//! │         └────────────────┴────────────────────────┘                   │
//! │                                   │                                     │
//! │                          ┌────────┴────────┐                          │
//! │                          │      Record     │                          │
//! │                          │                 │                          │
//! │                          │ - Asset         │                          │
//! │                          │ - Issue         │                          │
//! │                          │ - Transfer      │                          │
//! │                          └─────────────────┘                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error taxonomy for the entire library
//! - [`crypto`] - Seed, AuthKey/EncrKey derivation, account/KIF codecs, session envelope
//! - [`codec`] - base58, varint, and checksum primitives shared across text encodings
//! - [`record`] - Asset / Issue / Transfer record signing
//!
//! ## Security Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECURITY LAYERS                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Layer 1: Key derivation (secretbox-PRF over the Seed core)             │
//! │  ─────────────────────────────────────────────────────────              │
//! │  AuthKey (Ed25519) and EncrKey (X25519) are derived from the same       │
//! │  32-byte Seed core using distinct fixed counters, so a Seed alone       │
//! │  recovers both keypairs deterministically.                              │
//! │                                                                         │
//! │  Layer 2: Session envelope (ChaCha20-Poly1305 + NaCl sealed box)        │
//! │  ─────────────────────────────────────────────────────────────          │
//! │  Payloads are encrypted under a random, single-use SessionKey; the      │
//! │  SessionKey itself is wrapped to the recipient's EncrKey and doubly     │
//! │  attested by the sender's AuthKey.                                      │
//! │                                                                         │
//! │  Layer 3: Record signing (Ed25519)                                     │
//! │  ───────────────────────────────────                                   │
//! │  Every Asset/Issue/Transfer is signed by its author's AuthKey over      │
//! │  a canonical packed byte string, preventing forgery.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Non-goals
//!
//! This crate does not provide networking, persistence, key rotation,
//! multi-party protocols, or hardware-backed key storage. It also does not
//! implement the over-the-wire packing of Asset/Issue/Transfer records —
//! that is delegated to an external [`record::RecordPacker`] implementation.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod codec;
pub mod crypto;
pub mod error;
pub mod record;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{
    create_session_data, decrypt_asset, encrypt_asset, parse_session_data, sign, verify, AuthKey,
    EncrKey, KeyPair, Network, Seed, SessionData, SessionKey, Signature,
};
pub use error::{Error, Result};
pub use record::{Asset, Issue, RecordPacker, ReferencePacker, Transfer};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of bitmark-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns build information for debugging.
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        #[cfg(target_os = "ios")]
        target: "ios",
        #[cfg(target_os = "android")]
        target: "android",
        #[cfg(target_os = "macos")]
        target: "macos",
        #[cfg(target_os = "linux")]
        target: "linux",
        #[cfg(target_os = "windows")]
        target: "windows",
        #[cfg(target_arch = "wasm32")]
        target: "wasm32",
        #[cfg(not(any(
            target_os = "ios",
            target_os = "android",
            target_os = "macos",
            target_os = "linux",
            target_os = "windows",
            target_arch = "wasm32"
        )))]
        target: "unknown",
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    }
}

/// Build information for debugging.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Crate version.
    pub version: &'static str,
    /// Target triple.
    pub target: &'static str,
    /// Build profile (debug/release).
    pub profile: &'static str,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert_eq!(info.version, version());
    }
}
