// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grammar-level parsing into term lists.
//!
//! ```text
//! file      := (graph | rule)*
//! graph     := atom_list '.'
//! rule      := RULE_ID atom_list? ':-' guard? atom_list? '.'
//! guard     := 'int' '(' CAP_NAME ')' (',' 'int' '(' CAP_NAME ')')* '|'
//! atom_list := atom (',' atom)*
//! atom      := '{' content* '}' | 'h' '{' hcontent* '}'
//! content   := 'c' '(' value ')' | 'e^i' '(' value ')' | '+' CAP_NAME
//! ```
//!
//! Errors do not abort the parse: each is recorded with its position and the
//! parser resynchronizes at the next `.`, so one malformed term never blocks
//! the rest of a file.

use smol_str::SmolStr;

use super::token::{tokenize, SyntaxError, Token, TokenKind};

/// A color or phase argument as written in the source.
///
/// `symbolic` marks upper-initial names, which denote free variables rather
/// than literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub text: SmolStr,
    pub symbolic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Color(Value),
    Phase(Value),
    Link(SmolStr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Spider(Vec<Content>),
    /// Link names of a Hadamard gate term; the fixed `e^i(180)` argument is
    /// recognized and dropped.
    Hadamard(Vec<SmolStr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    pub name: SmolStr,
    pub lhs: Vec<Atom>,
    /// Canonical guard text (`int(Cv1),int(Pv1)`), used verbatim when pairing
    /// mirrored rules.
    pub guard: Option<String>,
    pub rhs: Vec<Atom>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Graph(Vec<Atom>),
    Rule(RawRule),
}

pub fn parse_source(source: &str) -> (Vec<Item>, Vec<SyntaxError>) {
    let (tokens, mut errors) = tokenize(source);
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        errors: Vec::new(),
    };

    let items = parser.parse_file();
    errors.append(&mut parser.errors);
    (items, errors)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &'a Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &'a Token {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'a Token, ()> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        self.error_at_current(format!("expected {what}"));
        Err(())
    }

    fn error_at_current(&mut self, message: String) {
        let token = self.peek();
        self.errors.push(SyntaxError {
            line: token.line,
            col: token.col,
            message,
        });
    }

    /// Skips to just past the next `.` so the next item can be attempted.
    fn synchronize(&mut self) {
        loop {
            match self.peek().kind {
                TokenKind::Eof => return,
                TokenKind::Dot => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_file(&mut self) -> Vec<Item> {
        let mut items = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::RuleName => {
                    let name = self.advance().text.clone();
                    match self.parse_rule(name) {
                        Ok(rule) => items.push(Item::Rule(rule)),
                        Err(()) => self.synchronize(),
                    }
                }
                _ => match self.parse_graph() {
                    Ok(atoms) => items.push(Item::Graph(atoms)),
                    Err(()) => self.synchronize(),
                },
            }
        }
        items
    }

    fn parse_graph(&mut self) -> Result<Vec<Atom>, ()> {
        let atoms = self.parse_atom_list()?;
        self.expect(TokenKind::Dot, "'.'")?;
        Ok(atoms)
    }

    fn parse_rule(&mut self, name: SmolStr) -> Result<RawRule, ()> {
        let lhs = if self.check(TokenKind::Turnstile) {
            Vec::new()
        } else {
            self.parse_atom_list()?
        };
        self.expect(TokenKind::Turnstile, "':-'")?;

        let guard = if self.check(TokenKind::Name) && self.peek().text == "int" {
            Some(self.parse_guard()?)
        } else {
            None
        };

        let rhs = if self.check(TokenKind::Dot) {
            Vec::new()
        } else {
            self.parse_atom_list()?
        };
        self.expect(TokenKind::Dot, "'.'")?;

        Ok(RawRule {
            name,
            lhs,
            guard,
            rhs,
        })
    }

    fn parse_guard(&mut self) -> Result<String, ()> {
        let mut text = String::new();
        loop {
            let keyword = self.expect(TokenKind::Name, "'int'")?;
            if keyword.text != "int" {
                self.errors.push(SyntaxError {
                    line: keyword.line,
                    col: keyword.col,
                    message: format!("expected 'int', found '{}'", keyword.text),
                });
                return Err(());
            }
            self.expect(TokenKind::LParen, "'('")?;
            let variable = self.expect(TokenKind::CapName, "variable name")?;
            self.expect(TokenKind::RParen, "')'")?;

            if !text.is_empty() {
                text.push(',');
            }
            text.push_str("int(");
            text.push_str(&variable.text);
            text.push(')');

            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::Bar, "'|'")?;
            return Ok(text);
        }
    }

    fn parse_atom_list(&mut self) -> Result<Vec<Atom>, ()> {
        let mut atoms = vec![self.parse_atom()?];
        while self.eat(TokenKind::Comma) {
            atoms.push(self.parse_atom()?);
        }
        Ok(atoms)
    }

    fn parse_atom(&mut self) -> Result<Atom, ()> {
        if self.check(TokenKind::Name)
            && self.peek().text == "h"
            && self.peek_at(1).kind == TokenKind::LBrace
        {
            self.advance();
            return self.parse_hadamard();
        }

        if self.check(TokenKind::LBrace) {
            return self.parse_spider();
        }

        self.error_at_current("expected a spider term or a hadamard gate".to_owned());
        Err(())
    }

    fn parse_spider(&mut self) -> Result<Atom, ()> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut contents = Vec::new();

        loop {
            if self.eat(TokenKind::RBrace) {
                break;
            }

            match self.peek().kind {
                TokenKind::Name if self.peek().text == "c" => {
                    self.advance();
                    self.expect(TokenKind::LParen, "'('")?;
                    let value = self.parse_value()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    contents.push(Content::Color(value));
                }
                TokenKind::PhaseHead => {
                    self.advance();
                    self.expect(TokenKind::LParen, "'('")?;
                    let value = self.parse_value()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    contents.push(Content::Phase(value));
                }
                TokenKind::Plus => {
                    self.advance();
                    let link = self.expect(TokenKind::CapName, "link name")?;
                    contents.push(Content::Link(link.text.clone()));
                }
                _ => {
                    self.error_at_current(
                        "expected c(..), e^i(..) or a link in spider term".to_owned(),
                    );
                    return Err(());
                }
            }

            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RBrace, "'}'")?;
            break;
        }

        Ok(Atom::Spider(contents))
    }

    fn parse_hadamard(&mut self) -> Result<Atom, ()> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut links = Vec::new();

        loop {
            if self.eat(TokenKind::RBrace) {
                break;
            }

            match self.peek().kind {
                TokenKind::PhaseHead => {
                    self.advance();
                    self.expect(TokenKind::LParen, "'('")?;
                    self.parse_value()?;
                    self.expect(TokenKind::RParen, "')'")?;
                }
                TokenKind::Plus => {
                    self.advance();
                    let link = self.expect(TokenKind::CapName, "link name")?;
                    links.push(link.text.clone());
                }
                _ => {
                    self.error_at_current(
                        "expected e^i(..) or a link in hadamard gate".to_owned(),
                    );
                    return Err(());
                }
            }

            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RBrace, "'}'")?;
            break;
        }

        Ok(Atom::Hadamard(links))
    }

    fn parse_value(&mut self) -> Result<Value, ()> {
        match self.peek().kind {
            TokenKind::Plus => {
                self.advance();
                let number = self.expect(TokenKind::Number, "number")?;
                Ok(Value {
                    text: SmolStr::new(format!("+{}", number.text)),
                    symbolic: false,
                })
            }
            TokenKind::Minus => {
                self.advance();
                let number = self.expect(TokenKind::Number, "number")?;
                Ok(Value {
                    text: SmolStr::new(format!("-{}", number.text)),
                    symbolic: false,
                })
            }
            TokenKind::Number | TokenKind::Name => {
                let token = self.advance();
                Ok(Value {
                    text: token.text.clone(),
                    symbolic: false,
                })
            }
            TokenKind::CapName => {
                let token = self.advance();
                Ok(Value {
                    text: token.text.clone(),
                    symbolic: true,
                })
            }
            _ => {
                self.error_at_current("expected a value".to_owned());
                Err(())
            }
        }
    }
}
