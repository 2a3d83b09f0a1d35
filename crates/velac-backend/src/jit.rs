//! A thin facade over inkwell's `ExecutionEngine`: add a finished module,
//! bind the runtime's external symbols, and invoke the compiled entry
//! point. The core never reaches past this module into inkwell's JIT
//! internals directly.

use inkwell::execution_engine::ExecutionEngine;
use inkwell::module::Module;
use inkwell::OptimizationLevel;

use crate::error::{BackendError, Result};

/// Owns a compiled module handed off to the JIT. Once constructed, the
/// core retains no references into the module's IR.
pub struct Jit<'ctx> {
    engine: ExecutionEngine<'ctx>,
}

impl<'ctx> Jit<'ctx> {
    /// Verifies `module`, builds an execution engine over it, and binds the
    /// `printf` declaration to the host process's real `printf`.
    pub fn add_module(module: Module<'ctx>) -> Result<Self> {
        module.verify().map_err(|e| BackendError::ModuleRejected(e.to_string()))?;

        let engine = module
            .create_jit_execution_engine(OptimizationLevel::None)
            .map_err(|e| BackendError::EngineCreationFailed(e.to_string()))?;

        if let Some(printf_decl) = module.get_function("printf") {
            engine.add_global_mapping(&printf_decl, velac_runtime::printf_addr());
        }

        Ok(Self { engine })
    }

    /// Looks up `name` and invokes it as a `void (*)()` function, the only
    /// calling shape the entry point and `void`-returning user functions
    /// need.
    pub fn invoke_void(&self, name: &str) -> Result<()> {
        let function = unsafe {
            self.engine
                .get_function::<unsafe extern "C" fn()>(name)
                .map_err(|_| BackendError::SymbolNotFound(name.to_string()))?
        };
        unsafe {
            function.call();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell::context::Context;

    #[test]
    fn missing_symbol_is_reported() {
        let context = Context::create();
        let module = context.create_module("test");
        let jit = Jit::add_module(module).expect("an empty module still verifies");
        let err = jit.invoke_void("does_not_exist").unwrap_err();
        assert!(matches!(err, BackendError::SymbolNotFound(_)));
    }

    #[test]
    fn entry_function_runs() {
        let context = Context::create();
        let module = context.create_module("test");
        let fn_type = context.void_type().fn_type(&[], false);
        let function = module.add_function("entry", fn_type, None);
        let block = context.append_basic_block(function, "entry");
        let builder = context.create_builder();
        builder.position_at_end(block);
        builder.build_return(None).unwrap();

        let jit = Jit::add_module(module).unwrap();
        jit.invoke_void("entry").unwrap();
    }
}
