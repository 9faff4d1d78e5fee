//! Serializable classification reports shared by the CLI commands

use serde::{Deserialize, Serialize};

use crate::parser::{MultiSigType, RedeemScriptParser, ScriptType};
use crate::script::encode_chunks;

/// Everything a caller needs to act on a classification, hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub multisig_type: MultiSigType,
    pub script_type: ScriptType,
    /// Threshold of the default signer set
    pub threshold: Option<u8>,
    pub pub_keys: Vec<String>,
    /// Threshold of the emergency signer set (ERP variants)
    pub erp_threshold: Option<u8>,
    pub erp_pub_keys: Vec<String>,
    /// Relative timelock guarding the emergency signer set
    pub csv_value: Option<u64>,
    /// Fast bridge derivation hash
    pub derivation_hash: Option<String>,
    /// Matched redeem script, unwrapped from the spending script for P2SH
    pub redeem_script: Option<String>,
    /// Default signer set as a bare standard multisig
    pub standard_redeem_script: Option<String>,
}

impl From<&RedeemScriptParser> for ClassificationReport {
    fn from(parser: &RedeemScriptParser) -> Self {
        let redeem_script = parser
            .is_recognized()
            .then(|| hex::encode(encode_chunks(parser.redeem_script_chunks())));

        Self {
            multisig_type: parser.multi_sig_type(),
            script_type: parser.script_type(),
            threshold: parser.m(),
            pub_keys: parser.pub_keys().iter().map(hex::encode).collect(),
            erp_threshold: parser.erp_m(),
            erp_pub_keys: parser.erp_pub_keys().iter().map(hex::encode).collect(),
            csv_value: parser.csv_value(),
            derivation_hash: parser.derivation_hash().map(hex::encode),
            redeem_script,
            standard_redeem_script: parser
                .extract_standard_redeem_script()
                .map(|chunks| hex::encode(encode_chunks(&chunks))),
        }
    }
}

impl ClassificationReport {
    pub fn is_recognized(&self) -> bool {
        self.multisig_type != MultiSigType::NoMultisigType
    }
}
