//! Driver: wires the scanner, parser, lowering pass, and JIT backend
//! together behind a single-file command-line entry point.
//!
//! There is no multi-file compilation, no incremental cache, and no
//! intermediate object/assembly emission here — the pipeline reads one
//! source file, lowers it straight to backend IR in memory, and hands the
//! finished module to the JIT. `--emit` exists purely for inspecting an
//! intermediate stage; it never changes what gets executed.

use std::fmt;
use std::path::{Path, PathBuf};

use inkwell::context::Context;

use velac_lex::{Lexer, Token};
use velac_parse::Parser;
use velac_util::{Diagnostic, Handler};

/// Process exited normally; the program ran to completion.
pub const EXIT_SUCCESS: i32 = 0;
/// Bad command-line usage (missing or unrecognized arguments).
pub const EXIT_USAGE_ERROR: i32 = 1;
/// The source file could not be read.
pub const EXIT_IO_ERROR: i32 = 2;
/// Scanning, parsing, or lowering reported at least one error.
pub const EXIT_COMPILE_ERROR: i32 = 3;
/// The backend rejected the module or the JIT could not run it.
pub const EXIT_BACKEND_ERROR: i32 = 4;

/// What to print before (or, for `Ir`, immediately before) execution.
/// Printing never suppresses execution; an `--emit` is purely observational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmitKind {
    Tokens,
    Ast,
    Ir,
}

impl EmitKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "tokens" => Some(EmitKind::Tokens),
            "ast" => Some(EmitKind::Ast),
            "ir" => Some(EmitKind::Ir),
            _ => None,
        }
    }
}

struct Options {
    input: PathBuf,
    emit: Option<EmitKind>,
}

/// Top-level driver error. Implemented by hand rather than with a derive
/// macro so the `Display` text is exactly what gets printed to stderr,
/// with no dependence on the error's debug representation.
#[derive(Debug)]
pub enum DriverError {
    Usage(String),
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Usage(msg) => write!(f, "usage error: {msg}"),
            DriverError::Io { path, source } => {
                write!(f, "could not read '{}': {source}", path.display())
            },
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io { source, .. } => Some(source),
            DriverError::Usage(_) => None,
        }
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options, DriverError> {
    let mut input = None;
    let mut emit = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--emit" => {
                let kind = iter
                    .next()
                    .ok_or_else(|| DriverError::Usage("--emit requires a value".into()))?;
                emit = Some(EmitKind::parse(&kind).ok_or_else(|| {
                    DriverError::Usage(format!(
                        "unknown --emit value '{kind}' (expected tokens, ast, or ir)"
                    ))
                })?);
            },
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            other => {
                return Err(DriverError::Usage(format!("unexpected argument '{other}'")));
            },
        }
    }
    let input = input.ok_or_else(|| DriverError::Usage("expected a source file path".into()))?;
    Ok(Options { input, emit })
}

fn print_diagnostics(handler: &Handler) {
    for diag in handler.diagnostics() {
        print_diagnostic(&diag);
    }
}

fn print_diagnostic(diag: &Diagnostic) {
    eprintln!(
        "{}:{}:{}: {}: {}",
        "<input>", diag.span.line, diag.span.column, diag.level, diag.message
    );
    for note in &diag.notes {
        eprintln!("  note: {note}");
    }
    for help in &diag.helps {
        eprintln!("  help: {help}");
    }
}

fn dump_tokens(source: &str, handler: &mut Handler) {
    let mut lexer = Lexer::new(source, handler);
    loop {
        let tok = lexer.next_token();
        let eof = tok == Token::Eof;
        println!("{tok:?}");
        if eof {
            break;
        }
    }
}

/// Runs the full pipeline over `args` (the process argument list, excluding
/// `argv[0]`) and returns the process exit code.
pub fn run<I: IntoIterator<Item = String>>(args: I) -> i32 {
    let opts = match parse_args(args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{e}");
            return EXIT_USAGE_ERROR;
        },
    };

    match compile_and_run(&opts) {
        Ok(()) => EXIT_SUCCESS,
        Err(code) => code,
    }
}

fn read_source(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::Io { path: path.to_path_buf(), source })
}

fn compile_and_run(opts: &Options) -> Result<(), i32> {
    let source = read_source(&opts.input).map_err(|e| {
        eprintln!("{e}");
        EXIT_IO_ERROR
    })?;

    let mut handler = Handler::new();

    if opts.emit == Some(EmitKind::Tokens) {
        dump_tokens(&source, &mut handler);
        handler = Handler::new();
    }

    let ast = {
        let mut parser = Parser::from_source(&source, &mut handler);
        parser.parse()
    };

    if opts.emit == Some(EmitKind::Ast) {
        println!("{ast:#?}");
    }

    if handler.has_errors() {
        log::debug!("parsing produced {} error(s)", handler.error_count());
        print_diagnostics(&handler);
        return Err(EXIT_COMPILE_ERROR);
    }

    let context = Context::create();
    let lowering = velac_lower::LoweringContext::new(&context, "velac_module", &handler);
    let module = lowering.lower_program(&ast);

    let module = match module {
        Some(module) => module,
        None => {
            print_diagnostics(&handler);
            return Err(EXIT_COMPILE_ERROR);
        },
    };

    if opts.emit == Some(EmitKind::Ir) {
        println!("{}", module.print_to_string().to_string());
    }

    let jit = velac_backend::Jit::add_module(module).map_err(|e| {
        eprintln!("backend error: {e}");
        EXIT_BACKEND_ERROR
    })?;

    jit.invoke_void(velac_lower::ENTRY_FN_NAME).map_err(|e| {
        eprintln!("backend error: {e}");
        EXIT_BACKEND_ERROR
    })?;

    Ok(())
}
