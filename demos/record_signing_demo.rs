//! # Record Signing Demo
//!
//! This example demonstrates signing and verifying the three domain
//! records: Asset, Issue, Transfer.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example record_signing_demo
//! ```

use bitmark_core::record::{
    sign_asset, sign_issue, sign_transfer, verify_asset, verify_issue, verify_transfer,
};
use bitmark_core::{Asset, Issue, KeyPair, Network, ReferencePacker, Seed, Transfer};

fn main() {
    println!("=================================================");
    println!("          BITMARK RECORD SIGNING DEMO");
    println!("=================================================\n");

    let registrant = KeyPair::from_seed(&Seed::new(Network::Livenet));
    let packer = ReferencePacker;

    println!("1. Registering an Asset...\n");
    let mut asset = Asset::new("a painting", "sha256:deadbeef")
        .with_metadata("artist", "jane doe")
        .with_metadata("year", "2026");
    sign_asset(
        &mut asset,
        &registrant.auth.account_number(),
        &registrant.auth,
        &packer,
    )
    .expect("asset must sign");
    verify_asset(&asset, &registrant.auth.public_key_bytes(), &packer)
        .expect("asset signature must verify");
    println!("   Asset registrant: {}", asset.registrant);
    println!("   Asset signature: {}", asset.signature.unwrap().to_hex());
    println!();

    println!("2. Issuing the Asset...\n");
    let mut issue = Issue::new([7u8; 64]);
    sign_issue(
        &mut issue,
        &registrant.auth.account_number(),
        &registrant.auth,
        &packer,
    )
    .expect("issue must sign");
    verify_issue(&issue, &registrant.auth.public_key_bytes(), &packer)
        .expect("issue signature must verify");
    println!("   Issue nonce: {}", issue.nonce);
    println!();

    println!("3. Transferring ownership...\n");
    let new_owner = KeyPair::from_seed(&Seed::new(Network::Livenet));
    let mut transfer = Transfer::new([9u8; 32]);
    sign_transfer(
        &mut transfer,
        &new_owner.auth.account_number(),
        &new_owner.auth,
        &packer,
    )
    .expect("transfer must sign");
    verify_transfer(&transfer, &new_owner.auth.public_key_bytes(), &packer)
        .expect("transfer signature must verify");
    println!("   New owner: {}", transfer.owner);
    println!();

    println!("=================================================");
    println!("          DEMO COMPLETE");
    println!("=================================================");
}
