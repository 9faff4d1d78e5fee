//! CSV row types for batch classification

use serde::{Deserialize, Serialize};

use super::report::ClassificationReport;
use crate::parser::{MultiSigType, ScriptType};

/// One input row: an identifier and the script to classify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInputRow {
    pub id: String,
    pub script_hex: String,
}

/// One output row, flattened for CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResultRow {
    pub id: String,
    pub multisig_type: MultiSigType,
    pub script_type: ScriptType,
    pub threshold: Option<u8>,
    pub pubkey_count: usize,
    pub erp_threshold: Option<u8>,
    pub erp_pubkey_count: usize,
    pub csv_value: Option<u64>,
    pub derivation_hash: Option<String>,
}

impl BatchResultRow {
    pub fn from_report(id: String, report: &ClassificationReport) -> Self {
        Self {
            id,
            multisig_type: report.multisig_type,
            script_type: report.script_type,
            threshold: report.threshold,
            pubkey_count: report.pub_keys.len(),
            erp_threshold: report.erp_threshold,
            erp_pubkey_count: report.erp_pub_keys.len(),
            csv_value: report.csv_value,
            derivation_hash: report.derivation_hash.clone(),
        }
    }
}

/// Totals for a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub recognized: usize,
    pub unrecognized: usize,
    /// Rows whose script hex or bytes could not be decoded
    pub malformed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, report: &ClassificationReport) {
        self.total += 1;
        if report.is_recognized() {
            self.recognized += 1;
        } else {
            self.unrecognized += 1;
        }
    }
}
