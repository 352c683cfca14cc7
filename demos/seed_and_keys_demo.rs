//! # Seed and Key Derivation Demo
//!
//! This example demonstrates:
//! 1. Generating a fresh Seed and encoding it as base58
//! 2. Deriving the AuthKey (Ed25519) and EncrKey (X25519) keypairs from it
//! 3. Encoding the AuthKey's public key as an Account string
//! 4. Exporting and re-importing the Seed as a KIF string
//!
//! ## Run
//!
//! ```bash
//! cargo run --example seed_and_keys_demo
//! ```

use bitmark_core::crypto::kif;
use bitmark_core::{KeyPair, Network, Seed};

fn main() {
    println!("=================================================");
    println!("          BITMARK SEED & KEY DERIVATION DEMO");
    println!("=================================================\n");

    println!("1. Generating a fresh Seed...\n");
    let seed = Seed::new(Network::Livenet);
    let seed_base58 = seed.to_base58();
    println!("   Seed (base58): {}", seed_base58);
    println!();

    println!("2. Deriving AuthKey and EncrKey...\n");
    let keypair = KeyPair::from_seed(&seed);
    println!("   Account number: {}", keypair.auth.account_number());
    println!(
        "   EncrKey public: {}",
        hex::encode(keypair.encr.public_key_bytes())
    );
    println!();

    println!("3. Signing a message with AuthKey...\n");
    let message = b"hello bitmark";
    let signature = keypair.auth.sign(message);
    keypair
        .auth
        .verify(message, &signature)
        .expect("signature must verify");
    println!("   Signature: {}", signature.to_hex());
    println!("   Verified: true");
    println!();

    println!("4. Exporting the Seed as a KIF string and re-importing...\n");
    let exported = kif::encode_kif(&seed);
    println!("   KIF: {}", exported);
    let recovered = kif::decode_kif(&exported).expect("KIF must decode");
    let recovered_keypair = KeyPair::from_seed(&recovered);
    assert_eq!(
        keypair.auth.account_number(),
        recovered_keypair.auth.account_number()
    );
    println!("   Recovered account matches original: true");
    println!();

    println!("=================================================");
    println!("          DEMO COMPLETE");
    println!("=================================================");
}
