//! Backend adapter: the only place in the workspace that knows a compiled
//! module is handed to a JIT rather than an AOT linker.

mod error;
mod jit;

pub use error::{BackendError, Result};
pub use jit::Jit;
