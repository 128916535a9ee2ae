//! End-to-end pipeline tests
//!
//! Drives the full offline path, mnemonic through broadcast payload, with
//! fixed inputs and checks every stage against the others: the derived
//! address, the exact fee, the canonical bytes, and that the hex payload
//! decodes back to the same transaction content.

use cro_signer::tx::types::{AuthInfo, TxBody, TxRaw};
use cro_signer::{
    compute_fee, derive_priv_key, derive_priv_key_at, validate_address, ChainClient, Coin,
    CroSignerError, KeyPair, MsgSend, RawTransaction, SignableTransaction, SignedTransaction,
    Signer, Unit, MAINNET, TESTNET_CROESEID_4,
};

const MNEMONIC: &str = "curtain maid fetch push pilot frozen speak motion island pigeon \
    habit suffer gap purse royal hollow among orange pluck mutual eager cement void panther";

const RECIPIENT: &str = "tcro165tzcrh2yl83g8qeqxueg2g5gzgu57y3fe3kc3";

fn testnet_keypair() -> KeyPair {
    KeyPair::from_mnemonic(MNEMONIC, &TESTNET_CROESEID_4.derivation_path(0)).unwrap()
}

fn build_transfer(keypair: &KeyPair, account_number: u64, sequence: u64) -> SignableTransaction {
    let network = TESTNET_CROESEID_4;
    let msg = MsgSend::new(
        keypair.address(&network).unwrap(),
        RECIPIENT,
        vec![Coin::new("1000", Unit::Base, &network).unwrap()],
    );
    RawTransaction::new()
        .append_message(&msg)
        .set_fee(compute_fee(500_000, "0.025", &network).unwrap())
        .set_gas_limit(500_000)
        .set_memo("Random Memo")
        .set_timeout_height(0)
        .add_signer(Signer {
            public_key: *keypair.public_key(),
            account_number,
            account_sequence: sequence,
        })
        .to_signable(&network)
        .unwrap()
}

#[test]
fn derivation_path_follows_network_coin_type() {
    assert_eq!(TESTNET_CROESEID_4.derivation_path(0), "m/44'/1'/0'/0/0");
    assert_eq!(MAINNET.derivation_path(0), "m/44'/394'/0'/0/0");

    let explicit = derive_priv_key(MNEMONIC, "m/44'/1'/0'/0/0").unwrap();
    let by_network = derive_priv_key_at(MNEMONIC, &TESTNET_CROESEID_4, 0).unwrap();
    assert_eq!(explicit, by_network);

    // Different coin types must yield different keys
    let mainnet_key = derive_priv_key_at(MNEMONIC, &MAINNET, 0).unwrap();
    assert_ne!(by_network, mainnet_key);
}

#[test]
fn derived_address_is_valid_for_the_network() {
    let keypair = testnet_keypair();
    let address = keypair.address(&TESTNET_CROESEID_4).unwrap();
    let (prefix, data) = validate_address(&address, Some("tcro")).unwrap();
    assert_eq!(prefix, "tcro");
    assert_eq!(data.len(), 20);

    // Address derivation is deterministic
    let again = testnet_keypair().address(&TESTNET_CROESEID_4).unwrap();
    assert_eq!(address, again);
}

#[test]
fn fee_matches_gas_times_price() {
    let fee = compute_fee(500_000, "0.025", &TESTNET_CROESEID_4).unwrap();
    assert_eq!(fee.to_u64().unwrap(), 12_500);
    assert_eq!(fee.denom(), "basecro");
}

#[test]
fn sign_and_seal_produces_broadcastable_payload() {
    let keypair = testnet_keypair();
    let signable = build_transfer(&keypair, 5, 2);

    let signature = keypair.sign(&signable.to_sign_doc(0).unwrap()).unwrap();
    let signable = signable.set_signature(0, signature).unwrap();
    signable.verify_signatures().unwrap();
    let signed = signable.to_signed().unwrap();

    let hash = signed.tx_hash();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

    let hex_payload = signed.to_hex();
    assert_eq!(hex_payload, hex_payload.to_lowercase());
    assert_eq!(hex::decode(&hex_payload).unwrap(), signed.encoded());
}

#[test]
fn hex_payload_decodes_back_to_the_same_content() {
    let keypair = testnet_keypair();
    let signable = build_transfer(&keypair, 5, 2);
    let signature = keypair.sign(&signable.to_sign_doc(0).unwrap()).unwrap();
    let signed = signable.set_signature(0, signature).unwrap().to_signed().unwrap();

    let reparsed = SignedTransaction::from_hex(&signed.to_hex()).unwrap();
    assert_eq!(reparsed.tx_hash(), signed.tx_hash());

    let raw: &TxRaw = reparsed.tx_raw();
    assert_eq!(raw.signatures.len(), 1);
    assert_eq!(raw.signatures[0].len(), 64);

    let body = TxBody::decode(&raw.body_bytes).unwrap();
    assert_eq!(body.memo, "Random Memo");
    assert_eq!(body.timeout_height, 0);
    assert_eq!(body.messages.len(), 1);

    let msg = MsgSend::from_any(&body.messages[0]).unwrap();
    assert_eq!(msg.from_address, keypair.address(&TESTNET_CROESEID_4).unwrap());
    assert_eq!(msg.to_address, RECIPIENT);
    assert_eq!(msg.amount.len(), 1);
    assert_eq!(msg.amount[0].to_u64().unwrap(), 1000);
    assert_eq!(msg.amount[0].denom(), "basecro");

    let auth_info = AuthInfo::decode(&raw.auth_info_bytes).unwrap();
    assert_eq!(auth_info.signer_infos.len(), 1);
    assert_eq!(auth_info.signer_infos[0].sequence, 2);
    assert_eq!(auth_info.fee.gas_limit, 500_000);
    assert_eq!(auth_info.fee.amount.len(), 1);
    assert_eq!(auth_info.fee.amount[0].to_u64().unwrap(), 12_500);
}

#[test]
fn independently_built_transactions_canonicalize_identically() {
    let keypair = testnet_keypair();
    let a = build_transfer(&keypair, 5, 2);
    let b = build_transfer(&keypair, 5, 2);
    assert_eq!(a.body_bytes(), b.body_bytes());
    assert_eq!(a.auth_info_bytes(), b.auth_info_bytes());
    assert_eq!(a.to_sign_doc(0).unwrap(), b.to_sign_doc(0).unwrap());

    // A different account number changes the SignDoc but not the shared bytes
    let c = build_transfer(&keypair, 6, 2);
    assert_eq!(a.body_bytes(), c.body_bytes());
    assert_ne!(a.to_sign_doc(0).unwrap(), c.to_sign_doc(0).unwrap());
}

#[test]
fn incomplete_transactions_are_rejected() {
    let network = TESTNET_CROESEID_4;
    let keypair = testnet_keypair();
    let msg = MsgSend::new(
        keypair.address(&network).unwrap(),
        RECIPIENT,
        vec![Coin::new("1000", Unit::Base, &network).unwrap()],
    );
    let signer = Signer {
        public_key: *keypair.public_key(),
        account_number: 5,
        account_sequence: 2,
    };

    let no_msg = RawTransaction::new()
        .set_fee(compute_fee(500_000, "0.025", &network).unwrap())
        .add_signer(signer.clone())
        .to_signable(&network);
    assert!(matches!(no_msg, Err(CroSignerError::IncompleteTransaction { .. })));

    let no_fee = RawTransaction::new()
        .append_message(&msg)
        .add_signer(signer.clone())
        .to_signable(&network);
    assert!(matches!(no_fee, Err(CroSignerError::IncompleteTransaction { .. })));

    let no_signer = RawTransaction::new()
        .append_message(&msg)
        .set_fee(compute_fee(500_000, "0.025", &network).unwrap())
        .to_signable(&network);
    assert!(matches!(no_signer, Err(CroSignerError::IncompleteTransaction { .. })));
}

#[test]
fn client_binds_to_its_network() {
    let client = ChainClient::new(&TESTNET_CROESEID_4).unwrap();
    assert_eq!(client.network().chain_id, "testnet-croeseid-4");
}
