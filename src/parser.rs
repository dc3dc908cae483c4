//! Token stream → contract IR, with two-token lookahead and accumulated
//! diagnostics. Never panics on malformed input; it reports and continues.

use crate::ir::{ContractElement, ContractTable, FieldDef, MessageDef, MethodDef, ServiceDef};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<String>,
    table: ContractTable,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
            table: ContractTable::new(),
        }
    }

    /// Parses `source` into a [`ContractTable`], failing if any diagnostic
    /// was raised along the way.
    pub fn parse(source: &'a str) -> Result<ContractTable, Vec<String>> {
        let mut parser = Self::new(source);
        let table = parser.parse_contract();
        if parser.errors.is_empty() {
            Ok(table)
        } else {
            Err(parser.errors)
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn advance(&mut self) {
        std::mem::swap(&mut self.cur, &mut self.peek);
        self.peek = self.lexer.next_token();
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.cur.kind == kind {
            self.advance();
            true
        } else {
            self.errors.push(format!(
                "expected next token to be {kind}, got {} instead",
                self.cur.kind
            ));
            false
        }
    }

    pub fn parse_contract(&mut self) -> ContractTable {
        while self.cur.kind != TokenKind::EndOfInput {
            match self.cur.kind {
                TokenKind::Message => {
                    if let Some(m) = self.parse_message() {
                        let name = m.name.clone();
                        if self.table.insert(ContractElement::Message(m)).is_err() {
                            self.errors.push(format!("duplicate element name {name}"));
                        }
                    }
                }
                TokenKind::Service => {
                    if let Some(s) = self.parse_service() {
                        let name = s.name.clone();
                        if self.table.insert(ContractElement::Service(s)).is_err() {
                            self.errors.push(format!("duplicate element name {name}"));
                        }
                    }
                }
                other => {
                    self.errors.push(format!(
                        "expected next token to be {} or {}, got {other} instead",
                        TokenKind::Message,
                        TokenKind::Service
                    ));
                    self.advance();
                }
            }
        }
        std::mem::take(&mut self.table)
    }

    fn parse_message(&mut self) -> Option<MessageDef> {
        self.expect(TokenKind::Message);
        let name = self.cur.literal.clone();
        if !self.expect(TokenKind::Identifier) {
            return None;
        }
        if !self.expect(TokenKind::LBrace) {
            return None;
        }

        let mut fields = Vec::new();
        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::EndOfInput {
            if let Some(field) = self.parse_field() {
                fields.push(field);
            } else {
                self.advance();
            }
        }
        self.expect(TokenKind::RBrace);

        Some(MessageDef { name, fields })
    }

    fn parse_field(&mut self) -> Option<FieldDef> {
        let is_primitive = self.cur.kind.is_primitive_type();
        let type_name = self.cur.literal.clone();

        if is_primitive {
            self.advance();
        } else if self.cur.kind == TokenKind::Identifier {
            if !self.table.contains(&type_name) {
                self.errors.push(format!(
                    "undefined message {type_name} referenced in field {}",
                    self.peek.literal
                ));
            }
            self.advance();
        } else {
            self.errors.push(format!(
                "expected next token to be a field type, got {} instead",
                self.cur.kind
            ));
            return None;
        }

        let name = self.cur.literal.clone();
        if !self.expect(TokenKind::Identifier) {
            return None;
        }

        let mut field_number = 0;
        if self.cur.kind == TokenKind::Assign {
            self.advance();
            field_number = self.cur.literal.parse().unwrap_or(0);
            if !self.expect(TokenKind::IntLiteral) {
                return None;
            }
        }

        if !self.expect(TokenKind::Semicolon) {
            return None;
        }

        Some(FieldDef {
            is_primitive,
            name,
            type_name,
            field_number,
        })
    }

    fn parse_service(&mut self) -> Option<ServiceDef> {
        self.expect(TokenKind::Service);
        let name = self.cur.literal.clone();
        if !self.expect(TokenKind::Identifier) {
            return None;
        }
        if !self.expect(TokenKind::LBrace) {
            return None;
        }

        let mut service = ServiceDef::new(name);
        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::EndOfInput {
            if let Some(method) = self.parse_method() {
                service.add_method(method);
            } else {
                self.advance();
            }
        }
        self.expect(TokenKind::RBrace);

        Some(service)
    }

    fn parse_method(&mut self) -> Option<MethodDef> {
        self.expect(TokenKind::Method);
        let name = self.cur.literal.clone();
        if !self.expect(TokenKind::Identifier) {
            return None;
        }

        if !self.expect(TokenKind::LParen) {
            return None;
        }
        let input_type = self.cur.literal.clone();
        if !self.expect(TokenKind::Identifier) {
            return None;
        }
        if !self.expect(TokenKind::RParen) {
            return None;
        }

        if !self.expect(TokenKind::Returns) {
            return None;
        }
        if !self.expect(TokenKind::LParen) {
            return None;
        }
        let output_type = self.cur.literal.clone();
        if !self.expect(TokenKind::Identifier) {
            return None;
        }
        if !self.expect(TokenKind::RParen) {
            return None;
        }
        if !self.expect(TokenKind::Semicolon) {
            return None;
        }

        Some(MethodDef {
            name,
            input_type,
            output_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_message_and_a_service() {
        let source = r#"
            message number { int64 num; }
            service calculate { method square(number) returns (number); }
        "#;
        let table = Parser::parse(source).unwrap();

        assert!(table.contains("number"));
        let svc = table.services().next().unwrap();
        assert_eq!(svc.name, "calculate");
        assert_eq!(svc.methods[0].name, "square");
        assert_eq!(svc.message_dependencies, vec!["number"]);
    }

    #[test]
    fn field_number_suffix_is_parsed_and_discarded_from_wire_concerns() {
        let source = "message m { int8 arg1 = 1; }";
        let table = Parser::parse(source).unwrap();
        let msg = table.messages().next().unwrap();
        assert_eq!(msg.fields[0].field_number, 1);
    }

    #[test]
    fn field_without_number_suffix_also_parses() {
        let source = "message m { int8 arg1; }";
        let table = Parser::parse(source).unwrap();
        assert_eq!(table.messages().next().unwrap().fields.len(), 1);
    }

    #[test]
    fn undefined_message_reference_is_a_diagnostic() {
        let source = "message wrapper { ghost inner; }";
        let errors = Parser::parse(source).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("undefined message ghost")));
    }

    #[test]
    fn malformed_input_accumulates_diagnostics_without_panicking() {
        let source = "message { int8 arg1; }";
        let result = Parser::parse(source);
        assert!(result.is_err());
    }

    #[test]
    fn nested_message_field_resolves_when_declared_first() {
        let source = r#"
            message single_primitive { int8 arg1; }
            message nested_message { int64 n; single_primitive s; }
        "#;
        let table = Parser::parse(source).unwrap();
        let nested = table.get("nested_message").unwrap();
        assert!(matches!(nested, crate::ir::ContractElement::Message(_)));
    }
}
