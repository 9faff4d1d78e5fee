//! Standard multisig template: `M <pubkey>{N} N OP_CHECKMULTISIG`

use bitcoin::opcodes::all::OP_CHECKMULTISIG;
use tracing::trace;

use super::Matched;
use crate::script::predicates::{is_check_multisig_op, is_pubkey_push, small_int_value};
use crate::script::ScriptChunk;

/// Upper bound on N imposed by the OP_1..OP_16 encoding
pub const MAX_MULTISIG_KEYS: usize = 16;

/// A matched M-of-N signer set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StandardMultisig {
    /// Required signatures (M)
    pub threshold: u8,
    /// Public key pushes in script order (N = len)
    pub pub_keys: Vec<Vec<u8>>,
}

impl StandardMultisig {
    /// Total number of keys (N)
    pub fn n(&self) -> usize {
        self.pub_keys.len()
    }

    /// Rebuild the bare template for this signer set
    pub fn to_chunks(&self) -> Option<Vec<ScriptChunk>> {
        let mut chunks = Vec::with_capacity(self.n() + 3);
        chunks.push(ScriptChunk::small_int(self.threshold)?);
        chunks.extend(self.pub_keys.iter().map(|key| ScriptChunk::push(key)));
        chunks.push(ScriptChunk::small_int(u8::try_from(self.n()).ok()?)?);
        chunks.push(ScriptChunk::op(OP_CHECKMULTISIG));
        Some(chunks)
    }
}

/// Match a standard multisig region starting at `start`
///
/// `end` of the returned match is the index just past `OP_CHECKMULTISIG`; the
/// region need not extend to the end of `chunks`.
pub fn match_standard_multisig(
    chunks: &[ScriptChunk],
    start: usize,
) -> Option<Matched<StandardMultisig>> {
    let threshold = small_int_value(chunks.get(start)?)?;

    let keys_start = start + 1;
    let key_count = chunks
        .get(keys_start..)?
        .iter()
        .take(MAX_MULTISIG_KEYS + 1)
        .take_while(|chunk| is_pubkey_push(chunk))
        .count();
    if key_count == 0 || key_count > MAX_MULTISIG_KEYS {
        trace!("Rejecting multisig at {}: {} key pushes", start, key_count);
        return None;
    }

    let n_index = keys_start + key_count;
    let n = small_int_value(chunks.get(n_index)?)?;
    if usize::from(n) != key_count || threshold > n {
        trace!(
            "Rejecting multisig at {}: M={} N={} with {} keys",
            start,
            threshold,
            n,
            key_count
        );
        return None;
    }

    if !is_check_multisig_op(chunks.get(n_index + 1)?) {
        return None;
    }

    let pub_keys = chunks[keys_start..n_index]
        .iter()
        .filter_map(|chunk| chunk.push_data().map(<[u8]>::to_vec))
        .collect();

    Some(Matched {
        value: StandardMultisig {
            threshold,
            pub_keys,
        },
        end: n_index + 2,
    })
}
