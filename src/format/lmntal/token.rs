// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use memchr::memchr;
use smol_str::SmolStr;

/// A recoverable lexer/parser error with its source position.
///
/// Columns are 0-based, lines 1-based, matching the error strings the
/// importer surfaces (`line 3:14 ..`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{} {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for SyntaxError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Lower-initial identifier (`c`, `h`, `int`, phase words).
    Name,
    /// Upper-initial identifier; link names and symbolic values.
    CapName,
    /// Digit run.
    Number,
    /// `name@@` rule head; the token text is the bare name.
    RuleName,
    /// `e^i`.
    PhaseHead,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Comma,
    Dot,
    Plus,
    Minus,
    Bar,
    /// `:-`.
    Turnstile,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub line: u32,
    pub col: u32,
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(byte)
    }

    fn skip_line(&mut self) {
        match memchr(b'\n', &self.bytes[self.pos..]) {
            Some(offset) => {
                self.pos += offset + 1;
                self.line += 1;
                self.col = 0;
            }
            None => {
                self.col += (self.bytes.len() - self.pos) as u32;
                self.pos = self.bytes.len();
            }
        }
    }

    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.bump();
        }
        &self.source[start..self.pos]
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Tokenizes LMNtal source. Unknown characters are reported and skipped; the
/// token stream always ends with a single `Eof` token.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    loop {
        let Some(byte) = lexer.peek() else {
            break;
        };

        if byte.is_ascii_whitespace() {
            lexer.bump();
            continue;
        }

        if byte == b'/' && lexer.peek_at(1) == Some(b'/') {
            lexer.skip_line();
            continue;
        }
        if byte == b'%' {
            lexer.skip_line();
            continue;
        }

        let line = lexer.line;
        let col = lexer.col;

        let simple = match byte {
            b'{' => Some(TokenKind::LBrace),
            b'}' => Some(TokenKind::RBrace),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b',' => Some(TokenKind::Comma),
            b'.' => Some(TokenKind::Dot),
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'|' => Some(TokenKind::Bar),
            _ => None,
        };
        if let Some(kind) = simple {
            lexer.bump();
            tokens.push(Token {
                kind,
                text: SmolStr::new(&source[lexer.pos - 1..lexer.pos]),
                line,
                col,
            });
            continue;
        }

        if byte == b':' {
            if lexer.peek_at(1) == Some(b'-') {
                lexer.bump();
                lexer.bump();
                tokens.push(Token {
                    kind: TokenKind::Turnstile,
                    text: SmolStr::new(":-"),
                    line,
                    col,
                });
            } else {
                lexer.bump();
                errors.push(SyntaxError {
                    line,
                    col,
                    message: "expected ':-'".to_owned(),
                });
            }
            continue;
        }

        if byte.is_ascii_digit() {
            let digits = lexer.take_while(|b| b.is_ascii_digit());
            tokens.push(Token {
                kind: TokenKind::Number,
                text: SmolStr::new(digits),
                line,
                col,
            });
            continue;
        }

        if is_ident_start(byte) {
            // `e^i` is the one identifier-like token containing '^'.
            if byte == b'e'
                && lexer.peek_at(1) == Some(b'^')
                && lexer.peek_at(2) == Some(b'i')
                && !lexer.peek_at(3).is_some_and(is_ident_continue)
            {
                lexer.bump();
                lexer.bump();
                lexer.bump();
                tokens.push(Token {
                    kind: TokenKind::PhaseHead,
                    text: SmolStr::new("e^i"),
                    line,
                    col,
                });
                continue;
            }

            let ident = lexer.take_while(is_ident_continue);
            if byte.is_ascii_uppercase() {
                tokens.push(Token {
                    kind: TokenKind::CapName,
                    text: SmolStr::new(ident),
                    line,
                    col,
                });
            } else if lexer.peek() == Some(b'@') && lexer.peek_at(1) == Some(b'@') {
                lexer.bump();
                lexer.bump();
                tokens.push(Token {
                    kind: TokenKind::RuleName,
                    text: SmolStr::new(ident),
                    line,
                    col,
                });
            } else {
                tokens.push(Token {
                    kind: TokenKind::Name,
                    text: SmolStr::new(ident),
                    line,
                    col,
                });
            }
            continue;
        }

        let skipped = lexer.bump().unwrap_or(b'?');
        errors.push(SyntaxError {
            line,
            col,
            message: format!("unexpected character '{}'", skipped as char),
        });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: SmolStr::default(),
        line: lexer.line,
        col: lexer.col,
    });
    (tokens, errors)
}
