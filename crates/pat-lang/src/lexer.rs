//! Lexer for PatternScript source text.
//!
//! Comments (`note>` to end of line) and whitespace are consumed here and
//! never reach the parser. Tokens carry byte spans plus the 1-based
//! line:column of their first character for error reporting.

use crate::ast::Span;
use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Str(String),
    Ident(String),

    // Keywords
    Loop,
    Check,
    Else,
    Choose,
    Default,
    In,
    Plot,
    Ask,

    // Punctuation and operators
    Colon,
    Arrow,
    DotDot,
    Tilde,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    Ne,

    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer '{}'", n),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("'{}'", name),
            TokenKind::Loop => "'loop'".to_string(),
            TokenKind::Check => "'check'".to_string(),
            TokenKind::Else => "'else'".to_string(),
            TokenKind::Choose => "'choose'".to_string(),
            TokenKind::Default => "'default'".to_string(),
            TokenKind::In => "'in'".to_string(),
            TokenKind::Plot => "'plot'".to_string(),
            TokenKind::Ask => "'ask'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Arrow => "'->'".to_string(),
            TokenKind::DotDot => "'..'".to_string(),
            TokenKind::Tilde => "'~'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Lt => "'<'".to_string(),
            TokenKind::Gt => "'>'".to_string(),
            TokenKind::Le => "'<='".to_string(),
            TokenKind::Ge => "'>='".to_string(),
            TokenKind::EqEq => "'=='".to_string(),
            TokenKind::Ne => "'!='".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: u32,
    pub col: u32,
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

/// Tokenize source text. The result always ends with an `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        line: 1,
        col: 1,
    };
    lexer.run()
}

impl<'a> Lexer<'a> {
    fn run(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(b) = self.skip_trivia() {
            tokens.push(self.next_token(b)?);
        }
        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.pos, self.pos),
            line: self.line,
            col: self.col,
        });
        Ok(tokens)
    }

    /// Skip whitespace and `note>` comments. Returns the next significant
    /// byte, or `None` at end of input.
    fn skip_trivia(&mut self) -> Option<u8> {
        loop {
            let b = *self.bytes.get(self.pos)?;
            match b {
                b' ' | b'\t' | b'\r' => self.advance(1),
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.col = 1;
                }
                _ if self.src[self.pos..].starts_with("note>") => {
                    while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                        self.advance(1);
                    }
                }
                _ => return Some(b),
            }
        }
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
        self.col += n as u32;
    }

    fn next_token(&mut self, first: u8) -> Result<Token, SyntaxError> {
        let start = self.pos;
        let (line, col) = (self.line, self.col);
        let kind = match first {
            b'0'..=b'9' => self.lex_int()?,
            b'"' => self.lex_string()?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.lex_word(),
            b':' => self.single(TokenKind::Colon),
            b'~' => self.single(TokenKind::Tilde),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'+' => self.single(TokenKind::Plus),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'-' => {
                if self.peek_at(1) == Some(b'>') {
                    self.advance(2);
                    TokenKind::Arrow
                } else {
                    self.single(TokenKind::Minus)
                }
            }
            b'.' => {
                if self.peek_at(1) == Some(b'.') {
                    self.advance(2);
                    TokenKind::DotDot
                } else {
                    return Err(self.unexpected(first, line, col));
                }
            }
            b'<' => {
                if self.peek_at(1) == Some(b'=') {
                    self.advance(2);
                    TokenKind::Le
                } else {
                    self.single(TokenKind::Lt)
                }
            }
            b'>' => {
                if self.peek_at(1) == Some(b'=') {
                    self.advance(2);
                    TokenKind::Ge
                } else {
                    self.single(TokenKind::Gt)
                }
            }
            b'=' => {
                if self.peek_at(1) == Some(b'=') {
                    self.advance(2);
                    TokenKind::EqEq
                } else {
                    return Err(self.unexpected(first, line, col));
                }
            }
            b'!' => {
                if self.peek_at(1) == Some(b'=') {
                    self.advance(2);
                    TokenKind::Ne
                } else {
                    return Err(self.unexpected(first, line, col));
                }
            }
            _ => return Err(self.unexpected(first, line, col)),
        };
        Ok(Token {
            kind,
            span: Span::new(start, self.pos),
            line,
            col,
        })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance(1);
        kind
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn lex_int(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        let (line, col) = (self.line, self.col);
        while matches!(self.bytes.get(self.pos), Some(b'0'..=b'9')) {
            self.advance(1);
        }
        let text = &self.src[start..self.pos];
        text.parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| SyntaxError::new(format!("integer literal '{}' is too large", text), line, col))
    }

    fn lex_string(&mut self) -> Result<TokenKind, SyntaxError> {
        let (line, col) = (self.line, self.col);
        self.advance(1); // opening quote
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'"' => {
                    let text = self.src[start..self.pos].to_string();
                    self.advance(1); // closing quote
                    return Ok(TokenKind::Str(text));
                }
                b'\n' => break,
                _ => self.advance(1),
            }
        }
        Err(SyntaxError::new("unterminated string literal", line, col))
    }

    fn lex_word(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(
            self.bytes.get(self.pos),
            Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_')
        ) {
            self.advance(1);
        }
        match &self.src[start..self.pos] {
            "loop" => TokenKind::Loop,
            "check" => TokenKind::Check,
            "else" => TokenKind::Else,
            "choose" => TokenKind::Choose,
            "default" => TokenKind::Default,
            "in" => TokenKind::In,
            "plot" => TokenKind::Plot,
            "ask" => TokenKind::Ask,
            word => TokenKind::Ident(word.to_string()),
        }
    }

    fn unexpected(&self, b: u8, line: u32, col: u32) -> SyntaxError {
        SyntaxError::new(format!("unexpected character '{}'", b as char), line, col)
    }
}
