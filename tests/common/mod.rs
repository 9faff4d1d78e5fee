//! Common Test Utilities
//!
//! Deterministic keys and redeem-script builders shared by the unit and
//! integration suites. Scripts are assembled with `bitcoin::script::Builder`
//! so the classifier is exercised against independently encoded bytes.

#![allow(dead_code)]

use bitcoin::opcodes::all::{OP_CHECKMULTISIG, OP_CSV, OP_DROP, OP_ELSE, OP_ENDIF, OP_NOTIF};
use bitcoin::opcodes::OP_0;
use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
use redeem_script_parser::{tokenize, ScriptChunk};
use sha2::{Digest, Sha256};

/// Relative timelock used by the emergency branch in fixtures
pub const ERP_CSV_VALUE: i64 = 500;

/// Testnet ERP redeem script with OP_CHECKMULTISIG hoisted after OP_ENDIF
pub const ERP_TESTNET_REDEEM_SCRIPT_HEX: &str = "6453210208f40073a9e43b3e9103acec79767a6de9b0409749884e989960fee578012fce210225e892391625854128c5c4ea4340de0c2a70570f33db53426fc9c746597a03f42102afc230c2d355b1a577682b07bc2646041b5d0177af0f98395a46018da699b6da210344a3c38cd59afcba3edcebe143e025574594b001700dec41e59409bdbd0f2a0921039a060badbeb24bee49eb2063f616c0f0f0765d4ca646b20a88ce828f259fcdb955670300cd50b27552210216c23b2ea8e4f11c3f9e22711addb1d16a93964796913830856b568cc3ea21d3210275562901dd8faae20de0a4166362a4f82188db77dbed4ca887422ea1ec185f1421034db69f2112f4fb1bb6141bf6e2bd6631f0484d0bd95b16767902c9fe219d4a6f5368ae";

fn secret_key(seed: u64) -> SecretKey {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&seed.to_be_bytes());
    SecretKey::from_slice(&bytes).expect("seed is a valid secret key")
}

/// Compressed public key for the private key `seed`
pub fn key_from_seed(seed: u64) -> Vec<u8> {
    let secp = Secp256k1::new();
    PublicKey::from_secret_key(&secp, &secret_key(seed))
        .serialize()
        .to_vec()
}

/// Uncompressed public key for the private key `seed`
pub fn uncompressed_key_from_seed(seed: u64) -> Vec<u8> {
    let secp = Secp256k1::new();
    PublicKey::from_secret_key(&secp, &secret_key(seed))
        .serialize_uncompressed()
        .to_vec()
}

/// Default federation: private keys 100, 200, 300
pub fn default_fed_keys() -> Vec<Vec<u8>> {
    [100, 200, 300].into_iter().map(key_from_seed).collect()
}

/// Emergency federation: private keys 400 through 800
pub fn erp_fed_keys() -> Vec<Vec<u8>> {
    [400, 500, 600, 700, 800]
        .into_iter()
        .map(key_from_seed)
        .collect()
}

/// `count` distinct compressed keys
pub fn generated_keys(count: usize) -> Vec<Vec<u8>> {
    (1..=count as u64).map(|i| key_from_seed(i * 1000)).collect()
}

/// SHA-256 of `[1]`, the commitment used by fast bridge fixtures
pub fn derivation_hash() -> [u8; 32] {
    Sha256::digest([1u8]).into()
}

fn push_bytes(data: &[u8]) -> PushBytesBuf {
    PushBytesBuf::try_from(data.to_vec()).expect("push fits")
}

fn push_multisig(mut builder: Builder, threshold: usize, keys: &[Vec<u8>]) -> Builder {
    builder = builder.push_int(threshold as i64);
    for key in keys {
        builder = builder.push_slice(push_bytes(key));
    }
    builder
        .push_int(keys.len() as i64)
        .push_opcode(OP_CHECKMULTISIG)
}

fn push_erp(
    builder: Builder,
    default_keys: &[Vec<u8>],
    erp_keys: &[Vec<u8>],
    csv_value: i64,
) -> Builder {
    let builder = builder.push_opcode(OP_NOTIF);
    let builder = push_multisig(builder, default_keys.len() / 2 + 1, default_keys);
    let builder = builder
        .push_opcode(OP_ELSE)
        .push_int(csv_value)
        .push_opcode(OP_CSV)
        .push_opcode(OP_DROP);
    push_multisig(builder, erp_keys.len() / 2 + 1, erp_keys).push_opcode(OP_ENDIF)
}

/// `M <keys> N OP_CHECKMULTISIG`
pub fn standard_redeem_script(threshold: usize, keys: &[Vec<u8>]) -> Vec<u8> {
    push_multisig(Builder::new(), threshold, keys).into_bytes()
}

/// Majority standard multisig over `keys`
pub fn standard_majority_redeem_script(keys: &[Vec<u8>]) -> Vec<u8> {
    standard_redeem_script(keys.len() / 2 + 1, keys)
}

pub fn fast_bridge_redeem_script(hash: &[u8], keys: &[Vec<u8>]) -> Vec<u8> {
    let builder = Builder::new().push_slice(push_bytes(hash));
    push_multisig(builder, keys.len() / 2 + 1, keys).into_bytes()
}

/// ERP script with majority thresholds on both branches
pub fn erp_redeem_script(default_keys: &[Vec<u8>], erp_keys: &[Vec<u8>], csv_value: i64) -> Vec<u8> {
    push_erp(Builder::new(), default_keys, erp_keys, csv_value).into_bytes()
}

pub fn fast_bridge_erp_redeem_script(
    hash: &[u8],
    default_keys: &[Vec<u8>],
    erp_keys: &[Vec<u8>],
    csv_value: i64,
) -> Vec<u8> {
    let builder = Builder::new().push_slice(push_bytes(hash));
    push_erp(builder, default_keys, erp_keys, csv_value).into_bytes()
}

/// A script built from federation keys that is not a multisig template
pub fn custom_redeem_script(keys: &[Vec<u8>]) -> Vec<u8> {
    let mut builder = Builder::new();
    for key in keys {
        builder = builder
            .push_slice(push_bytes(key))
            .push_opcode(bitcoin::opcodes::all::OP_CHECKSIGVERIFY);
    }
    builder.push_int(1).into_bytes()
}

/// Unsigned P2SH spending script: OP_0, one empty signature slot per
/// required signer, then the serialized redeem script
pub fn p2sh_input_script(signature_slots: usize, redeem_script: &[u8]) -> Vec<u8> {
    let mut builder = Builder::new().push_opcode(OP_0);
    for _ in 0..signature_slots {
        builder = builder.push_opcode(OP_0);
    }
    builder.push_slice(push_bytes(redeem_script)).into_bytes()
}

/// Tokenize fixture bytes
pub fn chunks_of(bytes: &[u8]) -> Vec<ScriptChunk> {
    tokenize(bytes).expect("fixture tokenizes")
}
