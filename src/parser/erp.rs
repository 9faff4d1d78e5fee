//! Emergency recovery (ERP) federation template
//!
//! ```text
//! OP_NOTIF
//!     M <pubkey>{N} N OP_CHECKMULTISIG
//! OP_ELSE
//!     <csv> OP_CHECKSEQUENCEVERIFY OP_DROP
//!     M' <pubkey>{N'} N' OP_CHECKMULTISIG
//! OP_ENDIF
//! ```
//!
//! Every element is position exact. Scripts that reorder the branches, move
//! OP_CHECKMULTISIG outside the conditional, or insert anything in between do
//! not match.

use tracing::trace;

use super::standard::{match_standard_multisig, StandardMultisig};
use super::Matched;
use crate::script::predicates::{
    is_check_sequence_verify_op, is_drop_op, is_else_op, is_end_if_op, is_not_if_op,
    minimal_number_value,
};
use crate::script::ScriptChunk;

/// A matched ERP federation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErpMultisig {
    /// Signer set active without any timelock
    pub default: StandardMultisig,
    /// Signer set unlocked after `csv_value`
    pub emergency: StandardMultisig,
    /// Relative timelock operand of OP_CHECKSEQUENCEVERIFY
    pub csv_value: u64,
}

/// Match an ERP region starting at `start`
pub fn match_erp(chunks: &[ScriptChunk], start: usize) -> Option<Matched<ErpMultisig>> {
    if !is_not_if_op(chunks.get(start)?) {
        return None;
    }

    let default = match_standard_multisig(chunks, start + 1)?;
    let else_index = default.end;
    if !is_else_op(chunks.get(else_index)?) {
        trace!("ERP default branch at {} not followed by OP_ELSE", start);
        return None;
    }

    let Some(csv_value) = minimal_number_value(chunks.get(else_index + 1)?) else {
        trace!("ERP timelock operand at {} is not a canonical number", else_index + 1);
        return None;
    };
    if !is_check_sequence_verify_op(chunks.get(else_index + 2)?)
        || !is_drop_op(chunks.get(else_index + 3)?)
    {
        return None;
    }

    let emergency = match_standard_multisig(chunks, else_index + 4)?;
    if !is_end_if_op(chunks.get(emergency.end)?) {
        return None;
    }

    Some(Matched {
        value: ErpMultisig {
            default: default.value,
            emergency: emergency.value,
            csv_value,
        },
        end: emergency.end + 1,
    })
}
