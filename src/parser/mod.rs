//! Federation redeem script classification
//!
//! Four fixed templates are recognised:
//!
//! - **Standard multisig**: `M <pubkey>{N} N OP_CHECKMULTISIG`
//! - **Fast bridge multisig**: `<32-byte hash>` followed by a standard multisig
//! - **ERP federation**: a standard multisig default branch and a timelocked
//!   emergency branch inside `OP_NOTIF .. OP_ELSE .. OP_ENDIF`
//! - **Fast bridge ERP federation**: `<32-byte hash>` followed by an ERP federation
//!
//! A sequence is recognised only when a template spans it completely, either
//! directly (a redeem script) or as the last push of a push-only spending script
//! (P2SH). Anything else is reported as [`MultiSigType::NoMultisigType`] /
//! [`ScriptType::Undefined`].

pub mod erp;
pub mod factory;
pub mod fast_bridge;
pub mod standard;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::script::ScriptChunk;

pub use erp::ErpMultisig;
pub use factory::{classify, RedeemScriptParserFactory};
pub use fast_bridge::{FastBridge, DERIVATION_HASH_LEN};
pub use standard::StandardMultisig;

/// Template detected in a redeem script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultiSigType {
    StandardMultisig,
    FastBridgeMultisig,
    ErpFed,
    FastBridgeErpFed,
    NoMultisigType,
}

impl MultiSigType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MultiSigType::StandardMultisig => "STANDARD_MULTISIG",
            MultiSigType::FastBridgeMultisig => "FAST_BRIDGE_MULTISIG",
            MultiSigType::ErpFed => "ERP_FED",
            MultiSigType::FastBridgeErpFed => "FAST_BRIDGE_ERP_FED",
            MultiSigType::NoMultisigType => "NO_MULTISIG_TYPE",
        }
    }
}

impl fmt::Display for MultiSigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the template was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptType {
    /// The input sequence is itself the template
    RedeemScript,
    /// The template is the last push of a spending script
    P2sh,
    /// Nothing matched
    Undefined,
}

impl ScriptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::RedeemScript => "REDEEM_SCRIPT",
            ScriptType::P2sh => "P2SH",
            ScriptType::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matcher result: the matched value and the end-exclusive chunk index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched<T> {
    pub value: T,
    pub end: usize,
}

impl<T> Matched<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Matched<U> {
        Matched {
            value: f(self.value),
            end: self.end,
        }
    }
}

/// A fully matched template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RedeemTemplate {
    Standard(StandardMultisig),
    FastBridge(FastBridge<StandardMultisig>),
    Erp(ErpMultisig),
    FastBridgeErp(FastBridge<ErpMultisig>),
}

impl RedeemTemplate {
    pub fn multi_sig_type(&self) -> MultiSigType {
        match self {
            RedeemTemplate::Standard(_) => MultiSigType::StandardMultisig,
            RedeemTemplate::FastBridge(_) => MultiSigType::FastBridgeMultisig,
            RedeemTemplate::Erp(_) => MultiSigType::ErpFed,
            RedeemTemplate::FastBridgeErp(_) => MultiSigType::FastBridgeErpFed,
        }
    }

    /// Signer set that needs no timelock
    pub fn default_multisig(&self) -> &StandardMultisig {
        match self {
            RedeemTemplate::Standard(multisig) => multisig,
            RedeemTemplate::FastBridge(fast_bridge) => &fast_bridge.inner,
            RedeemTemplate::Erp(erp) => &erp.default,
            RedeemTemplate::FastBridgeErp(fast_bridge) => &fast_bridge.inner.default,
        }
    }

    pub fn erp(&self) -> Option<&ErpMultisig> {
        match self {
            RedeemTemplate::Erp(erp) => Some(erp),
            RedeemTemplate::FastBridgeErp(fast_bridge) => Some(&fast_bridge.inner),
            _ => None,
        }
    }

    pub fn derivation_hash(&self) -> Option<&[u8; DERIVATION_HASH_LEN]> {
        match self {
            RedeemTemplate::FastBridge(fast_bridge) => Some(&fast_bridge.derivation_hash),
            RedeemTemplate::FastBridgeErp(fast_bridge) => Some(&fast_bridge.derivation_hash),
            _ => None,
        }
    }
}

/// Immutable classification result
///
/// Holds owned copies of everything it reports; nothing borrows from the
/// sequence that was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScriptParser {
    script_type: ScriptType,
    template: Option<RedeemTemplate>,
    redeem_chunks: Vec<ScriptChunk>,
}

impl RedeemScriptParser {
    pub(crate) fn matched(
        template: RedeemTemplate,
        script_type: ScriptType,
        redeem_chunks: Vec<ScriptChunk>,
    ) -> Self {
        Self {
            script_type,
            template: Some(template),
            redeem_chunks,
        }
    }

    pub(crate) fn no_match() -> Self {
        Self {
            script_type: ScriptType::Undefined,
            template: None,
            redeem_chunks: Vec::new(),
        }
    }

    pub fn multi_sig_type(&self) -> MultiSigType {
        self.template
            .as_ref()
            .map_or(MultiSigType::NoMultisigType, RedeemTemplate::multi_sig_type)
    }

    pub fn script_type(&self) -> ScriptType {
        self.script_type
    }

    pub fn template(&self) -> Option<&RedeemTemplate> {
        self.template.as_ref()
    }

    pub fn is_recognized(&self) -> bool {
        self.template.is_some()
    }

    /// Threshold of the default signer set
    pub fn m(&self) -> Option<u8> {
        self.default_multisig().map(|multisig| multisig.threshold)
    }

    /// Key count of the default signer set
    pub fn n(&self) -> Option<usize> {
        self.default_multisig().map(StandardMultisig::n)
    }

    /// Keys of the default signer set, empty when nothing matched
    pub fn pub_keys(&self) -> &[Vec<u8>] {
        self.default_multisig()
            .map(|multisig| multisig.pub_keys.as_slice())
            .unwrap_or_default()
    }

    pub fn erp_m(&self) -> Option<u8> {
        self.erp().map(|erp| erp.emergency.threshold)
    }

    /// Keys of the emergency signer set, empty unless an ERP template matched
    pub fn erp_pub_keys(&self) -> &[Vec<u8>] {
        self.erp()
            .map(|erp| erp.emergency.pub_keys.as_slice())
            .unwrap_or_default()
    }

    pub fn csv_value(&self) -> Option<u64> {
        self.erp().map(|erp| erp.csv_value)
    }

    pub fn derivation_hash(&self) -> Option<&[u8; DERIVATION_HASH_LEN]> {
        self.template.as_ref()?.derivation_hash()
    }

    /// Position of `key` in the default signer set
    pub fn find_key_in_redeem(&self, key: &[u8]) -> Option<usize> {
        self.pub_keys()
            .iter()
            .position(|candidate| candidate.as_slice() == key)
    }

    /// The default signer set as a bare standard multisig
    ///
    /// Drops the fast bridge prefix and the emergency branch.
    pub fn extract_standard_redeem_script(&self) -> Option<Vec<ScriptChunk>> {
        self.default_multisig()?.to_chunks()
    }

    /// Chunks of the matched redeem script (the embedded one for P2SH)
    pub fn redeem_script_chunks(&self) -> &[ScriptChunk] {
        &self.redeem_chunks
    }

    fn default_multisig(&self) -> Option<&StandardMultisig> {
        self.template.as_ref().map(RedeemTemplate::default_multisig)
    }

    fn erp(&self) -> Option<&ErpMultisig> {
        self.template.as_ref()?.erp()
    }
}
