//! Fatal setup errors: the ones that are not part of the recoverable
//! parse/codegen diagnostic taxonomy and therefore end the process (`spec.md`
//! §7: "JIT-engine creation failure is fatal").

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WtfError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Could not create JIT execution engine: {0}")]
    JitEngineCreation(String),
}

pub type WtfResult<T> = std::result::Result<T, WtfError>;
