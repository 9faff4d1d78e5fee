//! Federation Redeem Script Classifier
//!
//! Recognises the four federation multisig redeem-script templates, either as
//! a bare redeem script or as the last push of a P2SH spending script.

pub mod cli;
pub mod config;
pub mod errors;
pub mod parser;
pub mod script;
pub mod types;

pub use parser::{classify, MultiSigType, RedeemScriptParser, RedeemScriptParserFactory, ScriptType};
pub use script::{tokenize, ScriptChunk};
