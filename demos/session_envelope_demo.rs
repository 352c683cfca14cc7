//! # Session Envelope Demo
//!
//! This example demonstrates the hybrid session-key encryption envelope:
//! 1. Sender generates a random SessionKey and wraps it to the recipient
//! 2. Recipient unwraps the SessionData envelope and recovers the key
//! 3. Both sides use the recovered key to exchange an encrypted asset file
//!
//! ## Run
//!
//! ```bash
//! cargo run --example session_envelope_demo
//! ```

use bitmark_core::crypto::{create_session_data, decrypt_asset, encrypt_asset, parse_session_data};
use bitmark_core::{KeyPair, Network, Seed, SessionKey};

fn main() {
    println!("=================================================");
    println!("          BITMARK SESSION ENVELOPE DEMO");
    println!("=================================================\n");

    println!("1. Deriving sender and recipient keypairs...\n");
    let sender = KeyPair::from_seed(&Seed::new(Network::Livenet));
    let recipient = KeyPair::from_seed(&Seed::new(Network::Livenet));
    println!("   Sender account: {}", sender.auth.account_number());
    println!("   Recipient account: {}", recipient.auth.account_number());
    println!();

    println!("2. Sender creates a SessionKey and wraps it...\n");
    let session_key = SessionKey::new();
    let envelope = create_session_data(
        &session_key,
        &recipient.encr.public_key_bytes(),
        &sender.encr,
        &sender.auth,
    );
    let json = serde_json::to_string_pretty(&envelope).expect("serialize SessionData");
    println!("{json}\n");

    println!("3. Recipient unwraps the SessionData envelope...\n");
    let unwrapped = parse_session_data(
        &envelope,
        &sender.encr.public_key_bytes(),
        &recipient.encr,
        &sender.auth.public_key_bytes(),
    )
    .expect("SessionData must parse");
    assert_eq!(unwrapped.as_bytes(), session_key.as_bytes());
    println!("   Recovered SessionKey matches original: true");
    println!();

    println!("4. Sender encrypts an asset file with the SessionKey...\n");
    let plaintext = b"a digital-property asset payload";
    let asset_envelope = encrypt_asset(plaintext, &session_key, &sender.auth);
    println!("   Envelope length: {} bytes", asset_envelope.len());

    let decrypted = decrypt_asset(&asset_envelope, &unwrapped, &sender.auth.public_key_bytes())
        .expect("asset must decrypt and verify");
    assert_eq!(decrypted, plaintext);
    println!("   Decrypted payload matches original: true");
    println!();

    println!("=================================================");
    println!("          DEMO COMPLETE");
    println!("=================================================");
}
