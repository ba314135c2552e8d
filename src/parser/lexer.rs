//! Scanner for OpenDDL text.
//!
//! Produces the full token sequence up front. Whitespace and comments are
//! skipped; any lexical error aborts with a syntax error at its position.

use crate::error::{DdlError, Result};

use super::span::{Location, Span, Spanned};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare identifier: structure/property keywords, `true`, `null`, type names
    Ident(String),
    /// `$name`
    GlobalName(String),
    /// `%name`
    LocalName(String),
    /// Unsigned integer magnitude and the radix it was written in
    Integer { value: u64, radix: u32 },
    /// Character literal, already folded to its integer value
    Char(u64),
    Float(f64),
    Str(String),
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Equals,
    Plus,
    Minus,
    Eof,
}

impl Token {
    /// Short description used in "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(s) => format!("identifier '{}'", s),
            Token::GlobalName(s) => format!("name '${}'", s),
            Token::LocalName(s) => format!("name '%{}'", s),
            Token::Integer { .. } | Token::Char(_) => "integer literal".to_string(),
            Token::Float(_) => "float literal".to_string(),
            Token::Str(_) => "string literal".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Equals => "'='".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

pub struct Lexer<'s> {
    src: &'s str,
    loc: Location,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            loc: Location::start(),
        }
    }

    /// Scan the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Spanned<Token>>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let start = self.loc;
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(Spanned::new(token, Span::new(start, self.loc)));
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'s str {
        let src = self.src;
        &src[self.loc.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.loc.advance(ch);
        Some(ch)
    }

    fn error_at(&self, start: Location, message: impl Into<String>) -> DdlError {
        DdlError::syntax(message, Span::new(start, self.loc))
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            if self.rest().starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.rest().starts_with("/*") {
                let start = self.loc;
                self.advance();
                self.advance();
                loop {
                    if self.rest().starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.advance().is_none() {
                        return Err(self.error_at(start, "unterminated block comment"));
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        let ch = match self.peek() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        let punct = match ch {
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            ',' => Some(Token::Comma),
            '=' => Some(Token::Equals),
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            _ => None,
        };
        if let Some(token) = punct {
            self.advance();
            return Ok(token);
        }

        match ch {
            '"' => self.lex_string(),
            '\'' => self.lex_char(),
            '$' | '%' => self.lex_name(ch),
            c if c.is_ascii_digit() => self.lex_number(),
            '.' if matches!(self.peek_second(), Some(c) if c.is_ascii_digit()) => self.lex_number(),
            c if is_ident_start(c) => Ok(Token::Ident(self.lex_ident().to_string())),
            other => {
                let start = self.loc;
                self.advance();
                Err(self.error_at(start, format!("invalid character {:?}", other)))
            }
        }
    }

    fn lex_ident(&mut self) -> &'s str {
        let src = self.src;
        let start = self.loc.offset;
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.advance();
        }
        &src[start..self.loc.offset]
    }

    fn lex_name(&mut self, sigil: char) -> Result<Token> {
        let start = self.loc;
        self.advance();
        if !matches!(self.peek(), Some(c) if is_ident_start(c)) {
            return Err(self.error_at(start, format!("expected identifier after '{}'", sigil)));
        }
        let ident = self.lex_ident().to_string();
        Ok(if sigil == '$' {
            Token::GlobalName(ident)
        } else {
            Token::LocalName(ident)
        })
    }

    fn lex_number(&mut self) -> Result<Token> {
        let start = self.loc;

        if self.peek() == Some('0') {
            let radix = match self.peek_second() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                self.advance();
                let digits_start = self.loc.offset;
                while matches!(self.peek(), Some(c) if c.is_digit(radix)) {
                    self.advance();
                }
                let digits_end = self.loc.offset;
                self.reject_trailing_ident_chars(start)?;
                let digits = &self.src[digits_start..digits_end];
                if digits.is_empty() {
                    return Err(self.error_at(start, "missing digits in integer literal"));
                }
                let value = u64::from_str_radix(digits, radix)
                    .map_err(|_| self.error_at(start, "integer literal is too large"))?;
                return Ok(Token::Integer { value, radix });
            }
        }

        let text_start = self.loc.offset;
        let mut is_float = false;
        self.skip_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            self.skip_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error_at(start, "missing exponent digits in float literal"));
            }
            self.skip_digits();
        }
        self.reject_trailing_ident_chars(start)?;

        let text = &self.src[text_start..self.loc.offset];
        if is_float {
            text.parse::<f64>()
                .map(Token::Float)
                .map_err(|_| self.error_at(start, format!("malformed float literal '{}'", text)))
        } else {
            text.parse::<u64>()
                .map(|value| Token::Integer { value, radix: 10 })
                .map_err(|_| self.error_at(start, "integer literal is too large"))
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn reject_trailing_ident_chars(&mut self, start: Location) -> Result<()> {
        if matches!(self.peek(), Some(c) if is_ident_continue(c) || c == '.') {
            while matches!(self.peek(), Some(c) if is_ident_continue(c) || c == '.') {
                self.advance();
            }
            let text = &self.src[start.offset..self.loc.offset];
            return Err(self.error_at(start, format!("malformed number '{}'", text)));
        }
        Ok(())
    }

    fn lex_string(&mut self) -> Result<Token> {
        let start = self.loc;
        self.advance();
        let mut s = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error_at(start, "unterminated string literal")),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => s.push(self.lex_escape()?),
                Some(c) if c.is_control() => {
                    let at = self.loc;
                    self.advance();
                    return Err(self.error_at(
                        at,
                        format!("control character {:?} in string literal", c),
                    )
                    .with_help("use an escape sequence such as \\n"));
                }
                Some(c) => {
                    self.advance();
                    s.push(c);
                }
            }
        }
        Ok(Token::Str(s))
    }

    /// Character literals: one or more ASCII characters folded big-endian.
    fn lex_char(&mut self) -> Result<Token> {
        let start = self.loc;
        self.advance();
        let mut value: u64 = 0;
        let mut count = 0;
        loop {
            let ch = match self.peek() {
                None | Some('\n') => return Err(self.error_at(start, "unterminated character literal")),
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some('\\') => self.lex_escape()?,
                Some(c) => {
                    self.advance();
                    c
                }
            };
            if !ch.is_ascii() {
                return Err(self.error_at(start, "character literals must be ASCII"));
            }
            count += 1;
            if count > 8 {
                return Err(self.error_at(start, "character literal is too long"));
            }
            value = (value << 8) | ch as u64;
        }
        if count == 0 {
            return Err(self.error_at(start, "empty character literal"));
        }
        Ok(Token::Char(value))
    }

    fn lex_escape(&mut self) -> Result<char> {
        let start = self.loc;
        self.advance();
        let ch = match self.advance() {
            Some('"') => '"',
            Some('\'') => '\'',
            Some('?') => '?',
            Some('\\') => '\\',
            Some('a') => '\u{07}',
            Some('b') => '\u{08}',
            Some('f') => '\u{0C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('v') => '\u{0B}',
            Some('x') => self.lex_hex_escape(start, 2)?,
            Some('u') => self.lex_hex_escape(start, 4)?,
            Some('U') => self.lex_hex_escape(start, 6)?,
            Some(other) => {
                return Err(self.error_at(start, format!("invalid escape sequence '\\{}'", other)))
            }
            None => return Err(self.error_at(start, "unterminated escape sequence")),
        };
        Ok(ch)
    }

    fn lex_hex_escape(&mut self, start: Location, digits: usize) -> Result<char> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| {
                    self.error_at(start, format!("escape sequence needs {} hex digits", digits))
                })?;
            self.advance();
            value = value * 16 + digit;
        }
        char::from_u32(value)
            .ok_or_else(|| self.error_at(start, format!("invalid code point U+{:X}", value)))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize a complete input.
pub fn tokenize(source: &str) -> Result<Vec<Spanned<Token>>> {
    Lexer::new(source).tokenize()
}
