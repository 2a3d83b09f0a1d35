//! Runtime support linked into a JIT-compiled program.
//!
//! The language needs exactly one external symbol at run time: a
//! `printf`-shaped formatted-print function. There is no garbage collector
//! here — the surface language has no heap-allocated, cyclic, or
//! dynamically-sized data beyond fixed arrays and string literals, both of
//! which are owned by the compiled module or a stack frame.

/// Address of the host process's `printf`, handed to the backend so a
/// compiled `print` statement resolves against the real libc
/// implementation once the JIT binds it.
pub fn printf_addr() -> usize {
    libc::printf as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printf_addr_is_a_real_function_pointer() {
        assert_ne!(printf_addr(), 0);
    }
}
