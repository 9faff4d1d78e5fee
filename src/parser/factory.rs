//! Priority-ordered template dispatch
//!
//! Matchers run most specific first and a match only counts when it consumes
//! the whole sequence, so a standard multisig prefix can never shadow a longer
//! template. If no template spans the input it is retried as a P2SH spending
//! script whose last push carries the serialized redeem script.

use tracing::{debug, trace};

use super::erp::match_erp;
use super::fast_bridge::{match_fast_bridge_erp, match_fast_bridge_multisig};
use super::standard::match_standard_multisig;
use super::{Matched, RedeemScriptParser, RedeemTemplate, ScriptType};
use crate::config::ClassifierConfig;
use crate::script::predicates::is_push_only;
use crate::script::{tokenize_bounded, ScriptChunk};

/// Shortest sequence worth matching
pub const MIN_CHUNKS: usize = 2;

type TemplateMatcher = fn(&[ScriptChunk]) -> Option<Matched<RedeemTemplate>>;

/// Dispatch order, most specific first
const TEMPLATE_MATCHERS: [TemplateMatcher; 4] = [
    fast_bridge_erp_template,
    erp_template,
    fast_bridge_template,
    standard_template,
];

fn fast_bridge_erp_template(chunks: &[ScriptChunk]) -> Option<Matched<RedeemTemplate>> {
    match_fast_bridge_erp(chunks, 0).map(|matched| matched.map(RedeemTemplate::FastBridgeErp))
}

fn erp_template(chunks: &[ScriptChunk]) -> Option<Matched<RedeemTemplate>> {
    match_erp(chunks, 0).map(|matched| matched.map(RedeemTemplate::Erp))
}

fn fast_bridge_template(chunks: &[ScriptChunk]) -> Option<Matched<RedeemTemplate>> {
    match_fast_bridge_multisig(chunks, 0).map(|matched| matched.map(RedeemTemplate::FastBridge))
}

fn standard_template(chunks: &[ScriptChunk]) -> Option<Matched<RedeemTemplate>> {
    match_standard_multisig(chunks, 0).map(|matched| matched.map(RedeemTemplate::Standard))
}

/// Builds [`RedeemScriptParser`] results from chunk sequences
///
/// Holds only the input bounds, so one instance can be shared freely across
/// threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedeemScriptParserFactory {
    max_chunks: usize,
    max_script_size: usize,
}

impl Default for RedeemScriptParserFactory {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl RedeemScriptParserFactory {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            max_chunks: config.max_chunks,
            max_script_size: config.max_script_size,
        }
    }

    pub fn max_script_size(&self) -> usize {
        self.max_script_size
    }

    /// Classify a chunk sequence
    pub fn get(&self, chunks: &[ScriptChunk]) -> RedeemScriptParser {
        if !self.within_bounds(chunks) {
            debug!(
                "Sequence of {} chunks outside bounds [{}, {}]",
                chunks.len(),
                MIN_CHUNKS,
                self.max_chunks
            );
            return RedeemScriptParser::no_match();
        }

        if let Some(template) = self.match_template(chunks) {
            debug!("Matched {} redeem script", template.multi_sig_type());
            return RedeemScriptParser::matched(
                template,
                ScriptType::RedeemScript,
                chunks.to_vec(),
            );
        }

        if let Some(parser) = self.match_p2sh_input(chunks) {
            debug!("Matched {} inside P2SH input", parser.multi_sig_type());
            return parser;
        }

        debug!("No multisig template matched {} chunks", chunks.len());
        RedeemScriptParser::no_match()
    }

    /// Tokenize raw script bytes and classify them
    ///
    /// Bytes that do not tokenize are reported as unrecognised.
    pub fn get_from_bytes(&self, script: &[u8]) -> RedeemScriptParser {
        match tokenize_bounded(script, self.max_script_size) {
            Ok(chunks) => self.get(&chunks),
            Err(e) => {
                debug!("Script does not tokenize: {}", e);
                RedeemScriptParser::no_match()
            }
        }
    }

    fn within_bounds(&self, chunks: &[ScriptChunk]) -> bool {
        (MIN_CHUNKS..=self.max_chunks).contains(&chunks.len())
    }

    fn match_template(&self, chunks: &[ScriptChunk]) -> Option<RedeemTemplate> {
        TEMPLATE_MATCHERS
            .iter()
            .filter_map(|matcher| matcher(chunks))
            .find(|matched| matched.end == chunks.len())
            .map(|matched| matched.value)
    }

    fn match_p2sh_input(&self, chunks: &[ScriptChunk]) -> Option<RedeemScriptParser> {
        if !chunks.iter().all(is_push_only) {
            trace!("Not a push-only spending script");
            return None;
        }

        let payload = chunks.last()?.push_data()?;
        let redeem_chunks = match tokenize_bounded(payload, self.max_script_size) {
            Ok(redeem_chunks) => redeem_chunks,
            Err(e) => {
                debug!("Embedded redeem script does not tokenize: {}", e);
                return None;
            }
        };

        if !self.within_bounds(&redeem_chunks) {
            return None;
        }

        let template = self.match_template(&redeem_chunks)?;
        Some(RedeemScriptParser::matched(
            template,
            ScriptType::P2sh,
            redeem_chunks,
        ))
    }
}

/// Classify with the default bounds
pub fn classify(chunks: &[ScriptChunk]) -> RedeemScriptParser {
    RedeemScriptParserFactory::default().get(chunks)
}
