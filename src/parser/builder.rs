//! Recursive-descent parser building a [`Document`] from tokens.

use crate::config::ParseOptions;
use crate::document::{Document, Payload, PropertyData, StringId, StructureData, NONE};
use crate::error::{DdlError, Result};
use crate::types::{Identifier, Type};

use super::lexer::Token;
use super::literal::{infer_type, push_literal, Literal};
use super::span::{Span, Spanned};
use super::vocabulary::{StructureKind, Vocabulary};

/// Parser state for one document.
pub struct Builder<'t, 'v> {
    tokens: &'t [Spanned<Token>],
    pos: usize,
    vocabulary: &'v Vocabulary,
    options: &'v ParseOptions,
    document: Document,
    depth: usize,
}

impl<'t, 'v> Builder<'t, 'v> {
    /// `tokens` must end with `Token::Eof`, as produced by the lexer.
    pub fn new(
        tokens: &'t [Spanned<Token>],
        vocabulary: &'v Vocabulary,
        options: &'v ParseOptions,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            vocabulary,
            options,
            document: Document::new(vocabulary),
            depth: 0,
        }
    }

    /// Parse all root structures.
    pub fn build(mut self) -> Result<Document> {
        let mut last = NONE;
        while !self.at(&Token::Eof) {
            let index = self.parse_structure()?;
            self.link_child(NONE, last, index);
            last = index;
        }
        Ok(self.document)
    }

    fn peek(&self) -> &'t Spanned<Token> {
        let tokens = self.tokens;
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    fn advance(&mut self) -> &'t Spanned<Token> {
        let token = self.peek();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at(&self, token: &Token) -> bool {
        &self.peek().value == token
    }

    fn expect(&mut self, expected: Token, context: &str) -> Result<Span> {
        let token = self.advance();
        if token.value == expected {
            Ok(token.span)
        } else {
            Err(DdlError::syntax(
                format!(
                    "expected {} {}, found {}",
                    expected.describe(),
                    context,
                    token.value.describe()
                ),
                token.span,
            ))
        }
    }

    fn intern(&mut self, text: &str) -> StringId {
        self.document.strings.intern(text)
    }

    fn link_child(&mut self, parent: usize, last: usize, child: usize) {
        if last == NONE {
            if let Payload::Custom { first_child, .. } =
                &mut self.document.structures[parent].payload
            {
                *first_child = child;
            }
        } else {
            self.document.structures[last].next = child;
        }
    }

    fn parse_structure(&mut self) -> Result<usize> {
        let token = self.advance();
        let Token::Ident(keyword) = &token.value else {
            return Err(DdlError::syntax(
                format!("expected structure identifier, found {}", token.value.describe()),
                token.span,
            ));
        };

        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(DdlError::syntax(
                format!(
                    "structure '{}' is nested deeper than {} levels",
                    keyword, self.options.max_depth
                ),
                token.span,
            )
            .with_help("raise ParseOptions::max_depth to accept deeper documents"));
        }

        let index = match self.vocabulary.lookup_structure(keyword) {
            Some(StructureKind::Custom(identifier)) => {
                self.parse_custom(keyword, identifier, token.span)?
            }
            Some(StructureKind::Primitive(ty)) => self.parse_primitive(keyword, ty, token.span)?,
            None => {
                return Err(DdlError::syntax(
                    format!("unknown structure identifier '{}'", keyword),
                    token.span,
                )
                .with_help("custom structures must be registered in the vocabulary"))
            }
        };

        self.depth -= 1;
        Ok(index)
    }

    fn parse_name(&mut self) -> StringId {
        let name = match &self.peek().value {
            Token::GlobalName(name) => format!("${}", name),
            Token::LocalName(name) => format!("%{}", name),
            _ => return 0,
        };
        self.advance();
        self.intern(&name)
    }

    fn parse_custom(&mut self, keyword: &str, identifier: Identifier, span: Span) -> Result<usize> {
        let keyword_id = self.intern(keyword);
        let name = self.parse_name();

        // Parents precede their children in the arena.
        let index = self.document.structures.len();
        self.document.structures.push(StructureData {
            tag: Type::Custom.tag(),
            keyword: keyword_id,
            name,
            payload: Payload::Custom {
                identifier,
                first_child: NONE,
                first_property: NONE,
                property_count: 0,
            },
            next: NONE,
            span,
        });

        if self.at(&Token::LParen) {
            let (first, count) = self.parse_properties()?;
            if let Payload::Custom {
                first_property,
                property_count,
                ..
            } = &mut self.document.structures[index].payload
            {
                *first_property = first;
                *property_count = count;
            }
        }

        self.expect(Token::LBrace, &format!("to open '{}'", keyword))?;
        let mut last = NONE;
        while !self.at(&Token::RBrace) {
            if self.at(&Token::Eof) {
                return Err(DdlError::syntax(
                    format!("unterminated structure '{}'", keyword),
                    span,
                ));
            }
            let child = self.parse_structure()?;
            self.link_child(index, last, child);
            last = child;
        }
        self.advance();

        Ok(index)
    }

    fn parse_properties(&mut self) -> Result<(usize, usize)> {
        self.advance();
        let mut first = NONE;
        let mut last = NONE;
        let mut count = 0;

        if self.at(&Token::RParen) {
            self.advance();
            return Ok((first, count));
        }

        loop {
            let index = self.parse_property()?;
            if last == NONE {
                first = index;
            } else {
                self.document.properties[last].next = index;
            }
            last = index;
            count += 1;

            let token = self.advance();
            match token.value {
                Token::Comma => continue,
                Token::RParen => break,
                _ => {
                    return Err(DdlError::syntax(
                        format!(
                            "expected ',' or ')' in property list, found {}",
                            token.value.describe()
                        ),
                        token.span,
                    ))
                }
            }
        }

        Ok((first, count))
    }

    fn parse_property(&mut self) -> Result<usize> {
        let token = self.advance();
        let Token::Ident(keyword) = &token.value else {
            return Err(DdlError::syntax(
                format!("expected property identifier, found {}", token.value.describe()),
                token.span,
            ));
        };
        let Some(kind) = self.vocabulary.lookup_property(keyword) else {
            return Err(DdlError::syntax(
                format!("unknown property '{}'", keyword),
                token.span,
            )
            .with_help("properties must be registered in the vocabulary"));
        };
        self.expect(Token::Equals, &format!("after property '{}'", keyword))?;

        let mut literals = Vec::new();
        let mut spans = Vec::new();
        if self.at(&Token::LBrace) {
            self.advance();
            if !self.at(&Token::RBrace) {
                loop {
                    let literal = self.parse_literal()?;
                    literals.push(literal.value);
                    spans.push(literal.span);
                    if self.at(&Token::Comma) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            self.expect(Token::RBrace, "to close the property value list")?;
        } else {
            let literal = self.parse_literal()?;
            literals.push(literal.value);
            spans.push(literal.span);
        }

        let ty = match kind.ty {
            Some(ty) => ty,
            None => infer_type(&literals).map_err(|message| {
                DdlError::syntax(
                    format!("cannot store property '{}': {}", keyword, message),
                    token.span,
                )
            })?,
        };

        let begin = self.document.data.len_of(ty);
        for (literal, span) in literals.iter().zip(&spans) {
            self.store(ty, literal, *span)?;
        }

        let keyword_id = self.intern(keyword);
        self.document.properties.push(PropertyData {
            identifier: kind.identifier,
            keyword: keyword_id,
            tag: ty.tag(),
            begin,
            size: literals.len(),
            next: NONE,
            span: token.span,
        });
        Ok(self.document.properties.len() - 1)
    }

    fn parse_primitive(&mut self, keyword: &str, ty: Type, span: Span) -> Result<usize> {
        let declared = if self.at(&Token::LBracket) {
            self.advance();
            let token = self.advance();
            let size = match token.value {
                Token::Integer { value, .. } => u32::try_from(value)
                    .ok()
                    .and_then(|size| usize::try_from(size).ok())
                    .ok_or_else(|| DdlError::syntax("sub-array size is too large", token.span))?,
                _ => {
                    return Err(DdlError::syntax(
                        format!("expected sub-array size, found {}", token.value.describe()),
                        token.span,
                    ))
                }
            };
            if size == 0 {
                return Err(DdlError::syntax(
                    "sub-array size must be at least 1",
                    token.span,
                ));
            }
            self.expect(Token::RBracket, "after sub-array size")?;
            Some(size)
        } else {
            None
        };

        let keyword_id = self.intern(keyword);
        let name = self.parse_name();

        if self.at(&Token::LParen) {
            return Err(DdlError::syntax(
                format!("properties are not allowed on primitive structure '{}'", keyword),
                self.peek().span,
            ));
        }
        self.expect(Token::LBrace, &format!("to open '{}'", keyword))?;

        let begin = self.document.data.len_of(ty);
        let sub_array_size = if self.at(&Token::RBrace) {
            declared.unwrap_or(0)
        } else if self.at(&Token::LBrace) {
            self.parse_sub_arrays(ty, declared)?
        } else if let Some(size) = declared {
            return Err(DdlError::syntax(
                format!("data of '{}[{}]' must be written as sub-arrays", keyword, size),
                self.peek().span,
            ));
        } else {
            self.parse_flat_data(ty)?;
            0
        };
        let size = self.document.data.len_of(ty) - begin;

        self.expect(Token::RBrace, &format!("to close '{}'", keyword))?;

        self.document.structures.push(StructureData {
            tag: ty.tag(),
            keyword: keyword_id,
            name,
            payload: Payload::Primitive {
                begin,
                size,
                sub_array_size,
            },
            next: NONE,
            span,
        });
        Ok(self.document.structures.len() - 1)
    }

    fn parse_flat_data(&mut self, ty: Type) -> Result<()> {
        loop {
            if self.at(&Token::LBrace) {
                return Err(mixed_data(self.peek().span));
            }
            let literal = self.parse_literal()?;
            self.store(ty, &literal.value, literal.span)?;
            if !self.at(&Token::Comma) {
                return Ok(());
            }
            self.advance();
        }
    }

    /// Parse `{…}, {…}, …` and return the common sub-array length.
    fn parse_sub_arrays(&mut self, ty: Type, declared: Option<usize>) -> Result<usize> {
        let mut expected = declared;
        loop {
            let open = self.peek().span;
            if !self.at(&Token::LBrace) {
                return Err(mixed_data(open));
            }
            self.advance();

            let mut count = 0;
            if !self.at(&Token::RBrace) {
                loop {
                    let literal = self.parse_literal()?;
                    self.store(ty, &literal.value, literal.span)?;
                    count += 1;
                    if !self.at(&Token::Comma) {
                        break;
                    }
                    self.advance();
                }
            }
            let close = self.expect(Token::RBrace, "to close the sub-array")?;
            let span = open.merge(close);

            match expected {
                Some(size) if count != size => {
                    let message = if declared.is_some() {
                        format!("sub-array has {} elements, expected {}", count, size)
                    } else {
                        format!(
                            "sub-arrays must all have the same length (expected {}, found {})",
                            size, count
                        )
                    };
                    return Err(DdlError::syntax(message, span));
                }
                Some(_) => {}
                None if count == 0 => {
                    return Err(DdlError::syntax("sub-array must not be empty", span));
                }
                None => expected = Some(count),
            }

            if !self.at(&Token::Comma) {
                return Ok(expected.unwrap_or(0));
            }
            self.advance();
        }
    }

    fn store(&mut self, ty: Type, literal: &Literal, span: Span) -> Result<()> {
        push_literal(&mut self.document.data, &mut self.document.strings, ty, literal)
            .map_err(|message| DdlError::syntax(message, span))
    }

    fn parse_literal(&mut self) -> Result<Spanned<Literal>> {
        let token = self.advance();
        let literal = match &token.value {
            Token::Plus | Token::Minus => return self.parse_signed(token),
            Token::Integer { value, radix } => Literal::Integer {
                value: i128::from(*value),
                bits: *radix != 10,
            },
            Token::Char(value) => Literal::Integer {
                value: i128::from(*value),
                bits: false,
            },
            Token::Float(value) => Literal::Float(*value),
            Token::Str(first) => {
                let mut text = first.clone();
                let mut span = token.span;
                while let Token::Str(next) = &self.peek().value {
                    text.push_str(next);
                    span = span.merge(self.advance().span);
                }
                return Ok(Spanned::new(Literal::String(text), span));
            }
            Token::GlobalName(_) | Token::LocalName(_) => return Ok(self.parse_reference(token)),
            Token::Ident(word) => self.parse_word(word, token.span)?,
            other => {
                return Err(DdlError::syntax(
                    format!("expected a literal, found {}", other.describe()),
                    token.span,
                ))
            }
        };
        Ok(Spanned::new(literal, token.span))
    }

    fn parse_signed(&mut self, sign: &'t Spanned<Token>) -> Result<Spanned<Literal>> {
        let negative = sign.value == Token::Minus;
        let token = self.advance();
        let span = sign.span.merge(token.span);
        let literal = match &token.value {
            Token::Integer { value, radix } => {
                let value = i128::from(*value);
                Literal::Integer {
                    value: if negative { -value } else { value },
                    bits: *radix != 10,
                }
            }
            Token::Char(value) => {
                let value = i128::from(*value);
                Literal::Integer {
                    value: if negative { -value } else { value },
                    bits: false,
                }
            }
            Token::Float(value) => Literal::Float(if negative { -value } else { *value }),
            Token::Ident(word) if word == "inf" => {
                self.check_special_float(word, span)?;
                Literal::Float(if negative {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                })
            }
            other => {
                return Err(DdlError::syntax(
                    format!("expected a number after sign, found {}", other.describe()),
                    token.span,
                ))
            }
        };
        Ok(Spanned::new(literal, span))
    }

    fn parse_reference(&mut self, first: &'t Spanned<Token>) -> Spanned<Literal> {
        let mut path = String::new();
        let mut span = first.span;
        let mut token = first;
        loop {
            match &token.value {
                Token::GlobalName(name) => {
                    path.push('$');
                    path.push_str(name);
                }
                Token::LocalName(name) => {
                    path.push('%');
                    path.push_str(name);
                }
                _ => {}
            }
            if !matches!(self.peek().value, Token::LocalName(_)) {
                break;
            }
            token = self.advance();
            span = span.merge(token.span);
        }
        Spanned::new(Literal::Reference(path), span)
    }

    fn parse_word(&self, word: &str, span: Span) -> Result<Literal> {
        match word {
            "true" => Ok(Literal::Bool(true)),
            "false" => Ok(Literal::Bool(false)),
            "null" => Ok(Literal::Reference(String::new())),
            "inf" => {
                self.check_special_float(word, span)?;
                Ok(Literal::Float(f64::INFINITY))
            }
            "nan" => {
                self.check_special_float(word, span)?;
                Ok(Literal::Float(f64::NAN))
            }
            _ => self.vocabulary.lookup_type(word).map(Literal::Type).ok_or_else(|| {
                DdlError::syntax(format!("unexpected identifier '{}' in data", word), span)
            }),
        }
    }

    fn check_special_float(&self, word: &str, span: Span) -> Result<()> {
        if self.options.special_floats {
            Ok(())
        } else {
            Err(DdlError::syntax(
                format!("special float literal '{}' is disabled", word),
                span,
            )
            .with_help("enable ParseOptions::special_floats or write the value as a hex bit pattern"))
        }
    }
}

fn mixed_data(span: Span) -> DdlError {
    DdlError::syntax("cannot mix flat values and sub-arrays in one data list", span)
}
