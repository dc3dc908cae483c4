//! Lexical token kinds for the contract IDL.

use std::fmt;

/// A single lexical token: its kind plus the literal text that produced it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Illegal,
    EndOfInput,

    Identifier,
    IntLiteral,

    LBrace,
    RBrace,
    LParen,
    RParen,
    Semicolon,
    Assign,

    Message,
    Service,
    Method,
    Returns,

    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Char,
    String,
}

impl TokenKind {
    /// Whether this kind is one of the primitive-type keywords (`bool`,
    /// `int8` … `int64`, `char`, `string`).
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Int8
                | TokenKind::Int16
                | TokenKind::Int32
                | TokenKind::Int64
                | TokenKind::Char
                | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelling = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::EndOfInput => "EOF",
            TokenKind::Identifier => "IDENT",
            TokenKind::IntLiteral => "INT",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Semicolon => ";",
            TokenKind::Assign => "=",
            TokenKind::Message => "message",
            TokenKind::Service => "service",
            TokenKind::Method => "method",
            TokenKind::Returns => "returns",
            TokenKind::Bool => "bool",
            TokenKind::Int8 => "int8",
            TokenKind::Int16 => "int16",
            TokenKind::Int32 => "int32",
            TokenKind::Int64 => "int64",
            TokenKind::Char => "char",
            TokenKind::String => "string",
        };
        f.write_str(spelling)
    }
}

/// Keyword spellings, checked linearly at lookup time — the set is small
/// and fixed, so this avoids a heap-allocated static map.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("message", TokenKind::Message),
    ("service", TokenKind::Service),
    ("method", TokenKind::Method),
    ("returns", TokenKind::Returns),
    ("bool", TokenKind::Bool),
    ("int8", TokenKind::Int8),
    ("int16", TokenKind::Int16),
    ("int32", TokenKind::Int32),
    ("int64", TokenKind::Int64),
    ("char", TokenKind::Char),
    ("string", TokenKind::String),
];

/// Looks up `ident` in the keyword table, falling back to `Identifier`.
pub fn lookup_identifier(ident: &str) -> TokenKind {
    for (spelling, kind) in KEYWORDS {
        if *spelling == ident {
            return *kind;
        }
    }
    TokenKind::Identifier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_resolve_to_their_kind() {
        assert_eq!(lookup_identifier("message"), TokenKind::Message);
        assert_eq!(lookup_identifier("int64"), TokenKind::Int64);
    }

    #[test]
    fn non_keyword_is_an_identifier() {
        assert_eq!(lookup_identifier("number"), TokenKind::Identifier);
    }
}
