//! Offline Transfer Example
//!
//! Walks the full pipeline on the Croeseid testnet:
//! - Derive a keypair from a mnemonic
//! - Look up the sender's account number and sequence
//! - Build, sign, and seal a bank transfer
//! - Broadcast the hex payload in commit mode

use cro_signer::{
    compute_fee, ChainClient, Coin, CroSignerResult, KeyPair, MsgSend, RawTransaction, Signer,
    Unit, TESTNET_CROESEID_4,
};

// Demo wallet only. Never hold funds on a mnemonic committed to a repository.
const DEMO_MNEMONIC: &str = "curtain maid fetch push pilot frozen speak motion \
    island pigeon habit suffer gap purse royal hollow among orange pluck mutual \
    eager cement void panther";

#[tokio::main]
async fn main() -> CroSignerResult<()> {
    tracing_subscriber::fmt::init();

    let network = TESTNET_CROESEID_4;
    println!("=== Offline Transfer on {} ===\n", network.name);

    let keypair = KeyPair::from_mnemonic(DEMO_MNEMONIC, &network.derivation_path(0))?;
    let from_address = keypair.address(&network)?;
    println!("Sender address: {from_address}");

    let client = ChainClient::new(&network)?;
    let account = client.get_account(&from_address).await?;
    println!(
        "Account number: {}, sequence: {}",
        account.account_number, account.sequence
    );

    let gas_limit = 500_000;
    let fee = compute_fee(gas_limit, "0.025", &network)?;
    println!("Fee: {fee}");

    let msg = MsgSend::new(
        &from_address,
        "tcro165tzcrh2yl83g8qeqxueg2g5gzgu57y3fe3kc3",
        vec![Coin::new("1000", Unit::Base, &network)?],
    );

    let signable = RawTransaction::new()
        .append_message(&msg)
        .set_fee(fee)
        .set_gas_limit(gas_limit)
        .set_memo("Random Memo")
        .set_timeout_height(0)
        .add_signer(Signer {
            public_key: *keypair.public_key(),
            account_number: account.account_number,
            account_sequence: account.sequence,
        })
        .to_signable(&network)?;

    let signature = keypair.sign(&signable.to_sign_doc(0)?)?;
    let signed = signable
        .set_signature(0, signature)?
        .to_signed()?;

    println!("\nTx hash: {}", signed.tx_hash());
    println!("Hex payload: {}", signed.to_hex());

    println!("\n--- Broadcasting ---");
    let response = client.broadcast_tx_commit(&signed.to_hex()).await?;
    println!("{}", serde_json::to_string_pretty(&response).unwrap_or_default());

    Ok(())
}
