//! The token model: a closed enumeration of lexical categories.

use velac_util::Symbol;

/// A single lexical unit produced by the scanner.
///
/// Every variant that carries data owns it; the scanner never returns
/// references into the source it read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    // Literals and identifiers.
    Ident(Symbol),
    IntLiteral(i32),
    FloatLiteral(f32),
    StringLiteral(Symbol),
    CharLiteral(u8),
    True,
    False,

    // Type keywords.
    KwInt,
    KwBigInt,
    KwFloat,
    KwString,
    KwChar,
    KwBool,
    KwVoid,
    KwArray,

    // Control keywords.
    KwIf,
    KwElse,
    KwReturn,
    KwFor,
    KwWhile,
    KwFunction,
    KwPrint,

    // Punctuation.
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semicolon,
    Colon,

    // Arithmetic.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Logical.
    AndAnd,
    OrOr,
    Bang,

    // Bitwise.
    Ampersand,
    Pipe,
    Caret,

    // Assignment.
    Eq,

    // Function arrow.
    Arrow,

    // Relational.
    EqEq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,

    /// A byte the scanner could not classify. Carries the offending
    /// character so a diagnostic can quote it; scanning continues past it.
    Invalid(char),

    /// The end-of-input marker. Always the last token in a stream.
    Eof,
}

/// Looks up `text` in the keyword table, returning the keyword's token if
/// it is one of the exact spellings in the language's reserved-word set.
pub fn keyword_from_ident(text: &str) -> Option<Token> {
    Some(match text {
        "int" => Token::KwInt,
        "bigint" => Token::KwBigInt,
        "float" => Token::KwFloat,
        "string" => Token::KwString,
        "char" => Token::KwChar,
        "bool" => Token::KwBool,
        "void" => Token::KwVoid,
        "array" => Token::KwArray,
        "true" => Token::True,
        "false" => Token::False,
        "if" => Token::KwIf,
        "else" => Token::KwElse,
        "return" => Token::KwReturn,
        "for" => Token::KwFor,
        "while" => Token::KwWhile,
        "function" => Token::KwFunction,
        "print" => Token::KwPrint,
        _ => return None,
    })
}
