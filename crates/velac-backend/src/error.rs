//! Backend/JIT error types. The `Display` impls feed directly into the
//! diagnostics a caller prints before choosing an exit code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The module failed LLVM's verifier.
    #[error("module rejected by the backend: {0}")]
    ModuleRejected(String),

    /// The execution engine could not be created for the module.
    #[error("failed to create the JIT execution engine: {0}")]
    EngineCreationFailed(String),

    /// A requested symbol was not present in the compiled module.
    #[error("symbol '{0}' not found in the compiled module")]
    SymbolNotFound(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;
