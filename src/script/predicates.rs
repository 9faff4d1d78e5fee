//! Chunk predicates shared by the template matchers
//!
//! Every predicate is total: a chunk of the wrong kind simply does not match.

use bitcoin::opcodes::all::{
    OP_CHECKMULTISIG, OP_CSV, OP_DROP, OP_ELSE, OP_ENDIF, OP_NOTIF, OP_PUSHBYTES_0, OP_PUSHNUM_1,
    OP_PUSHNUM_16,
};

use super::chunk::ScriptChunk;

/// Compressed secp256k1 public key length
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Uncompressed secp256k1 public key length
pub const UNCOMPRESSED_PUBKEY_LEN: usize = 65;

/// Longest operand OP_CHECKSEQUENCEVERIFY accepts
pub const MAX_SEQUENCE_NUM_LEN: usize = 5;

/// Whether the chunk pushes exactly `len` bytes
pub fn is_push_of_len(chunk: &ScriptChunk, len: usize) -> bool {
    chunk.push_data().is_some_and(|data| data.len() == len)
}

/// Whether the chunk pushes something shaped like a public key (33 or 65 bytes)
pub fn is_pubkey_push(chunk: &ScriptChunk) -> bool {
    is_push_of_len(chunk, COMPRESSED_PUBKEY_LEN) || is_push_of_len(chunk, UNCOMPRESSED_PUBKEY_LEN)
}

/// Value of an `OP_1`..`OP_16` chunk
pub fn small_int_value(chunk: &ScriptChunk) -> Option<u8> {
    let opcode = chunk.bare_opcode()?;
    let first = OP_PUSHNUM_1.to_u8();
    let last = OP_PUSHNUM_16.to_u8();
    (first..=last).contains(&opcode).then(|| opcode - first + 1)
}

/// Push-only in the consensus sense: any opcode up to and including `OP_16`
pub fn is_push_only(chunk: &ScriptChunk) -> bool {
    chunk.is_well_formed() && chunk.opcode() <= OP_PUSHNUM_16.to_u8()
}

pub fn is_check_multisig_op(chunk: &ScriptChunk) -> bool {
    chunk.is_opcode(OP_CHECKMULTISIG)
}

pub fn is_check_sequence_verify_op(chunk: &ScriptChunk) -> bool {
    chunk.is_opcode(OP_CSV)
}

pub fn is_drop_op(chunk: &ScriptChunk) -> bool {
    chunk.is_opcode(OP_DROP)
}

pub fn is_not_if_op(chunk: &ScriptChunk) -> bool {
    chunk.is_opcode(OP_NOTIF)
}

pub fn is_else_op(chunk: &ScriptChunk) -> bool {
    chunk.is_opcode(OP_ELSE)
}

pub fn is_end_if_op(chunk: &ScriptChunk) -> bool {
    chunk.is_opcode(OP_ENDIF)
}

/// Decode a non-negative script number pushed with its canonical encoding
///
/// Canonical means what a minimal-data script builder emits: `OP_0` for zero,
/// `OP_1`..`OP_16` for small values, otherwise a direct push of the shortest
/// little-endian sign-magnitude form (at most 5 bytes). Negative values and
/// every non-canonical form return `None`.
pub fn minimal_number_value(chunk: &ScriptChunk) -> Option<u64> {
    if let Some(value) = small_int_value(chunk) {
        return Some(u64::from(value));
    }

    let data = chunk.push_data()?;
    if data.is_empty() {
        return (chunk.opcode() == OP_PUSHBYTES_0.to_u8()).then_some(0);
    }

    // Only a direct push is minimal for 1..=5 byte payloads
    if usize::from(chunk.opcode()) != data.len() || data.len() > MAX_SEQUENCE_NUM_LEN {
        return None;
    }

    let last = data[data.len() - 1];
    if last & 0x80 != 0 {
        return None;
    }
    if last == 0x00 && (data.len() == 1 || data[data.len() - 2] & 0x80 == 0) {
        return None;
    }
    if data.len() == 1 && data[0] <= 16 {
        // Should have been OP_1..OP_16
        return None;
    }

    Some(
        data.iter()
            .rev()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)),
    )
}
