//! Tokenized script representation
//!
//! Raw bytes are decoded by the `bitcoin` crate and copied into owned
//! [`ScriptChunk`] values. The predicates module holds the per-chunk checks the
//! template matchers are built from.

pub mod chunk;
pub mod error;
pub mod predicates;

pub use chunk::{encode_chunks, to_asm, tokenize, tokenize_bounded, ScriptChunk};
pub use error::{ScriptError, ScriptResult};
