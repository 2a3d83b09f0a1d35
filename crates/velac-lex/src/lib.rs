//! Lexical scanner: source text to an ordered token stream.
//!
//! A single cursor walks the source once. Lexemes are copied out of the
//! source (interned where the token carries a name or string) rather than
//! borrowed, so the token stream outlives the scanner. Unterminated
//! literals and unrecognized bytes are reported through a diagnostic
//! handler and scanning continues, per the scanner's continue-and-collect
//! failure policy.

pub mod classify;
pub mod cursor;
pub mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use cursor::{Cursor, CursorSnapshot};
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token};
