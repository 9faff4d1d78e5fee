//! Owned script chunks and the tokenizer adapter
//!
//! A chunk is either a bare opcode or a data push carrying the push opcode and
//! its payload. Tokenization is delegated to `bitcoin::Script`; this module only
//! copies each instruction out into an owned [`ScriptChunk`] so classification
//! results never borrow from caller buffers.

use std::fmt;

use bitcoin::opcodes::all::{OP_PUSHBYTES_0, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, OP_PUSHNUM_1};
use bitcoin::opcodes::Opcode;
use bitcoin::script::{Instruction, Script};

use super::error::{ScriptError, ScriptResult};

/// Largest payload that fits a direct push (`OP_PUSHBYTES_75`)
const MAX_DIRECT_PUSH_LEN: usize = 0x4b;

/// A single tokenized element of a script
///
/// Built only by [`tokenize`] and the constructors below. A chunk whose
/// payload disagrees with its opcode is neither a push nor an opcode to the
/// accessors, so no predicate matches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptChunk {
    /// Opcode byte. For direct pushes this is the payload length.
    opcode: u8,
    /// Payload for push chunks, `None` for every other opcode
    data: Option<Vec<u8>>,
}

/// Whether `opcode` is a push opcode able to encode a payload of `len` bytes
fn push_opcode_fits(opcode: u8, len: usize) -> bool {
    if usize::from(opcode) <= MAX_DIRECT_PUSH_LEN {
        usize::from(opcode) == len
    } else if opcode == OP_PUSHDATA1.to_u8() {
        len <= 0xff
    } else if opcode == OP_PUSHDATA2.to_u8() {
        len <= 0xffff
    } else if opcode == OP_PUSHDATA4.to_u8() {
        u32::try_from(len).is_ok()
    } else {
        false
    }
}

impl ScriptChunk {
    /// Bare opcode chunk
    pub fn op(opcode: Opcode) -> Self {
        Self {
            opcode: opcode.to_u8(),
            data: None,
        }
    }

    /// Push chunk using the smallest push opcode able to carry `data`
    pub fn push(data: &[u8]) -> Self {
        let opcode = match data.len() {
            0 => OP_PUSHBYTES_0.to_u8(),
            len if len <= MAX_DIRECT_PUSH_LEN => len as u8,
            len if len <= 0xff => OP_PUSHDATA1.to_u8(),
            len if len <= 0xffff => OP_PUSHDATA2.to_u8(),
            _ => OP_PUSHDATA4.to_u8(),
        };
        Self {
            opcode,
            data: Some(data.to_vec()),
        }
    }

    /// `OP_1`..`OP_16` chunk for a value in `1..=16`
    pub fn small_int(value: u8) -> Option<Self> {
        if !(1..=16).contains(&value) {
            return None;
        }
        Some(Self {
            opcode: OP_PUSHNUM_1.to_u8() + value - 1,
            data: None,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(opcode: u8, data: Option<Vec<u8>>) -> Self {
        Self { opcode, data }
    }

    /// Raw opcode byte
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Payload length agrees with the opcode, and non-push opcodes carry none
    pub fn is_well_formed(&self) -> bool {
        match &self.data {
            Some(data) => push_opcode_fits(self.opcode, data.len()),
            None => self.opcode > OP_PUSHDATA4.to_u8(),
        }
    }

    /// Whether this chunk is a well-formed push
    pub fn is_push(&self) -> bool {
        self.push_data().is_some()
    }

    /// Payload of a well-formed push chunk
    pub fn push_data(&self) -> Option<&[u8]> {
        self.data
            .as_deref()
            .filter(|data| push_opcode_fits(self.opcode, data.len()))
    }

    /// Opcode of a well-formed non-push chunk
    pub fn bare_opcode(&self) -> Option<u8> {
        (self.data.is_none() && self.is_well_formed()).then_some(self.opcode)
    }

    /// Whether this is the bare opcode `opcode`
    pub fn is_opcode(&self, opcode: Opcode) -> bool {
        self.bare_opcode() == Some(opcode.to_u8())
    }

    /// Append the serialized form of this chunk to `out`
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode);
        let Some(data) = &self.data else {
            return;
        };

        if self.opcode == OP_PUSHDATA1.to_u8() {
            out.push(data.len() as u8);
        } else if self.opcode == OP_PUSHDATA2.to_u8() {
            out.extend_from_slice(&(data.len() as u16).to_le_bytes());
        } else if self.opcode == OP_PUSHDATA4.to_u8() {
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        }
        out.extend_from_slice(data);
    }
}

impl fmt::Display for ScriptChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(data) if !data.is_empty() => write!(f, "{}", hex::encode(data)),
            _ => write!(f, "{}", Opcode::from(self.opcode)),
        }
    }
}

/// Tokenize raw script bytes into owned chunks
///
/// Fails if a push runs past the end of the buffer.
pub fn tokenize(bytes: &[u8]) -> ScriptResult<Vec<ScriptChunk>> {
    let script = Script::from_bytes(bytes);

    script
        .instruction_indices()
        .map(|instruction| {
            let (index, instruction) = instruction?;
            let chunk = match instruction {
                Instruction::PushBytes(push) => ScriptChunk {
                    opcode: *bytes
                        .get(index)
                        .ok_or(ScriptError::InstructionOutOfRange { index })?,
                    data: Some(push.as_bytes().to_vec()),
                },
                Instruction::Op(op) => ScriptChunk::op(op),
            };
            Ok(chunk)
        })
        .collect()
}

/// Tokenize, refusing buffers longer than `max_size` before touching them
pub fn tokenize_bounded(bytes: &[u8], max_size: usize) -> ScriptResult<Vec<ScriptChunk>> {
    if bytes.len() > max_size {
        return Err(ScriptError::TooLarge {
            size: bytes.len(),
            max: max_size,
        });
    }
    tokenize(bytes)
}

/// Serialize a chunk sequence back into script bytes
pub fn encode_chunks(chunks: &[ScriptChunk]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in chunks {
        chunk.write_into(&mut out);
    }
    out
}

/// Space separated ASM-style rendering of a chunk sequence
pub fn to_asm(chunks: &[ScriptChunk]) -> String {
    chunks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
