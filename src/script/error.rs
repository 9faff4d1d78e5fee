//! Script tokenization error types

/// Result type for script tokenization
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors raised while turning raw script bytes into chunks
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Malformed script: {0}")]
    Malformed(#[from] bitcoin::script::Error),

    #[error("Instruction at byte {index} lies outside the script")]
    InstructionOutOfRange { index: usize },

    #[error("Script is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
}
