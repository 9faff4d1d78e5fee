//! Fast bridge templates: a 32-byte derivation hash push followed by another
//! template

use super::erp::{match_erp, ErpMultisig};
use super::standard::{match_standard_multisig, StandardMultisig};
use super::Matched;
use crate::script::ScriptChunk;

/// Length of the fast bridge derivation hash
pub const DERIVATION_HASH_LEN: usize = 32;

/// A template tagged with a fast bridge derivation hash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FastBridge<T> {
    pub derivation_hash: [u8; DERIVATION_HASH_LEN],
    pub inner: T,
}

/// Match the hash prefix at `start` and hand the rest of the window to `delegate`
pub fn match_fast_bridge<T, F>(
    chunks: &[ScriptChunk],
    start: usize,
    delegate: F,
) -> Option<Matched<FastBridge<T>>>
where
    F: FnOnce(&[ScriptChunk], usize) -> Option<Matched<T>>,
{
    let derivation_hash: [u8; DERIVATION_HASH_LEN] =
        chunks.get(start)?.push_data()?.try_into().ok()?;

    let inner = delegate(chunks, start + 1)?;
    Some(inner.map(|inner| FastBridge {
        derivation_hash,
        inner,
    }))
}

pub fn match_fast_bridge_multisig(
    chunks: &[ScriptChunk],
    start: usize,
) -> Option<Matched<FastBridge<StandardMultisig>>> {
    match_fast_bridge(chunks, start, match_standard_multisig)
}

pub fn match_fast_bridge_erp(
    chunks: &[ScriptChunk],
    start: usize,
) -> Option<Matched<FastBridge<ErpMultisig>>> {
    match_fast_bridge(chunks, start, match_erp)
}
