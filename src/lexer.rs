//! Character cursor over the contract IDL source, producing a token stream.

use crate::token::{lookup_identifier, Token, TokenKind};

/// Walks a source string byte-by-byte (contracts are ASCII, matching the
/// original reference, so indexing by byte rather than `char` is safe).
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    input: &'a [u8],
    position: usize,
    read_position: usize,
    ch: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Self {
            input: source.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() {
            self.read_char();
        }
    }

    fn read_while(&mut self, pred: fn(u8) -> bool) -> &'a [u8] {
        let start = self.position;
        while pred(self.ch) {
            self.read_char();
        }
        &self.input[start..self.position]
    }

    /// Produces the next token, skipping leading whitespace. Idempotent at
    /// end of input: repeated calls keep yielding `EndOfInput`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            b'{' => Token::new(TokenKind::LBrace, "{"),
            b'}' => Token::new(TokenKind::RBrace, "}"),
            b'(' => Token::new(TokenKind::LParen, "("),
            b')' => Token::new(TokenKind::RParen, ")"),
            b';' => Token::new(TokenKind::Semicolon, ";"),
            b'=' => Token::new(TokenKind::Assign, "="),
            0 => Token::new(TokenKind::EndOfInput, ""),
            ch if ch.is_ascii_alphabetic() || ch == b'_' => {
                let literal = self.read_while(|c| c.is_ascii_alphanumeric() || c == b'_');
                let literal = std::str::from_utf8(literal).unwrap_or_default();
                return Token::new(lookup_identifier(literal), literal);
            }
            ch if ch.is_ascii_digit() => {
                let literal = self.read_while(|c| c.is_ascii_digit());
                let literal = std::str::from_utf8(literal).unwrap_or_default();
                return Token::new(TokenKind::IntLiteral, literal);
            }
            ch => Token::new(TokenKind::Illegal, (ch as char).to_string()),
        };

        // Single-character tokens above didn't advance past `ch` yet; the
        // identifier/digit/illegal branches return early since `read_while`
        // already consumed their run (illegal consumes nothing further).
        match token.kind {
            TokenKind::Illegal => {
                self.read_char();
                Token::new(TokenKind::Illegal, "[UNRECOGNIZED]")
            }
            _ => {
                self.read_char();
                token
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::EndOfInput;
            kinds.push(tok.kind);
            if done {
                break;
            }
        }
        kinds
    }

    #[test]
    fn lexes_a_message_declaration() {
        let kinds = collect("message number { int64 num; }");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Message,
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::Int64,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn field_number_suffix_lexes_as_assign_then_int() {
        let kinds = collect("int8 arg1 = 1;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int8,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn end_of_input_is_idempotent() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn unrecognized_character_is_illegal() {
        let mut lexer = Lexer::new("@");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Illegal);
        assert_eq!(tok.literal, "[UNRECOGNIZED]");
    }

    #[test]
    fn identifier_boundary_at_punctuation() {
        let kinds = collect("foo;bar");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::EndOfInput,
            ]
        );
    }
}
