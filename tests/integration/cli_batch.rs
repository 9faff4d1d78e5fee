//! Batch Classification Tests
//!
//! CSV in, CSV out, both in memory and through files on disk.

use redeem_script_parser::cli::commands::batch::{classify_records, BatchCommand};
use redeem_script_parser::config::AppConfig;
use redeem_script_parser::errors::AppError;
use redeem_script_parser::types::{BatchResultRow, BatchSummary};
use redeem_script_parser::{MultiSigType, RedeemScriptParserFactory, ScriptType};
use std::fs;
use tempfile::TempDir;

use crate::common::{
    default_fed_keys, derivation_hash, erp_fed_keys, erp_redeem_script,
    fast_bridge_erp_redeem_script, p2sh_input_script, standard_majority_redeem_script,
    ERP_CSV_VALUE, ERP_TESTNET_REDEEM_SCRIPT_HEX,
};

fn sample_csv() -> String {
    let standard = standard_majority_redeem_script(&default_fed_keys());
    let erp = erp_redeem_script(&default_fed_keys(), &erp_fed_keys(), ERP_CSV_VALUE);
    let fast_bridge_erp = fast_bridge_erp_redeem_script(
        &derivation_hash(),
        &default_fed_keys(),
        &erp_fed_keys(),
        ERP_CSV_VALUE,
    );

    let mut csv = String::from("id,script_hex\n");
    csv.push_str(&format!("standard,{}\n", hex::encode(&standard)));
    csv.push_str(&format!("erp_p2sh,{}\n", hex::encode(p2sh_input_script(2, &erp))));
    csv.push_str(&format!("fast_bridge_erp,0x{}\n", hex::encode(&fast_bridge_erp)));
    csv.push_str(&format!("testnet,{}\n", ERP_TESTNET_REDEEM_SCRIPT_HEX));
    csv.push_str("bad_hex,zz\n");
    csv.push_str("truncated,2102\n");
    csv
}

fn read_rows(output: &[u8]) -> Vec<BatchResultRow> {
    csv::Reader::from_reader(output)
        .deserialize()
        .collect::<Result<Vec<BatchResultRow>, _>>()
        .unwrap()
}

#[test]
fn test_classify_records_in_memory() {
    let input = sample_csv();
    let mut output = Vec::new();
    let summary = classify_records(
        input.as_bytes(),
        &mut output,
        &RedeemScriptParserFactory::default(),
    )
    .unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            total: 6,
            recognized: 3,
            unrecognized: 3,
            malformed: 2,
        }
    );

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 6);

    assert_eq!(rows[0].id, "standard");
    assert_eq!(rows[0].multisig_type, MultiSigType::StandardMultisig);
    assert_eq!(rows[0].script_type, ScriptType::RedeemScript);
    assert_eq!(rows[0].threshold, Some(2));
    assert_eq!(rows[0].pubkey_count, 3);

    assert_eq!(rows[1].multisig_type, MultiSigType::ErpFed);
    assert_eq!(rows[1].script_type, ScriptType::P2sh);
    assert_eq!(rows[1].erp_threshold, Some(3));
    assert_eq!(rows[1].erp_pubkey_count, 5);
    assert_eq!(rows[1].csv_value, Some(500));

    assert_eq!(rows[2].multisig_type, MultiSigType::FastBridgeErpFed);
    assert_eq!(
        rows[2].derivation_hash.as_deref(),
        Some(hex::encode(derivation_hash()).as_str())
    );

    for row in &rows[3..] {
        assert_eq!(row.multisig_type, MultiSigType::NoMultisigType, "{}", row.id);
        assert_eq!(row.script_type, ScriptType::Undefined, "{}", row.id);
        assert_eq!(row.pubkey_count, 0);
    }
}

#[test]
fn test_classify_records_rejects_invalid_record() {
    let input = "id,script_hex\nonly_one_column\n";
    let mut output = Vec::new();
    let result = classify_records(
        input.as_bytes(),
        &mut output,
        &RedeemScriptParserFactory::default(),
    );

    match result {
        Err(AppError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected InvalidRecord, got {:?}", other),
    }
}

#[test]
fn test_classify_records_empty_input() {
    let mut output = Vec::new();
    let summary = classify_records(
        "id,script_hex\n".as_bytes(),
        &mut output,
        &RedeemScriptParserFactory::default(),
    )
    .unwrap();
    assert_eq!(summary, BatchSummary::default());
}

#[test]
fn test_batch_command_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("scripts.csv");
    let output_path = temp_dir.path().join("results.csv");
    fs::write(&input_path, sample_csv()).unwrap();

    let command = BatchCommand {
        input: input_path,
        output: Some(output_path.clone()),
    };
    let summary = command.run(&AppConfig::default()).unwrap();
    assert_eq!(summary.total, 6);
    assert_eq!(summary.recognized, 3);

    let rows = read_rows(&fs::read(&output_path).unwrap());
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[1].id, "erp_p2sh");
}

#[test]
fn test_batch_command_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let command = BatchCommand {
        input: temp_dir.path().join("missing.csv"),
        output: None,
    };
    assert!(matches!(
        command.run(&AppConfig::default()),
        Err(AppError::Io(_))
    ));
}
