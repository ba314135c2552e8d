//! OpenDDL text parsing.
//!
//! Parsing runs in two passes: the [`lexer`] turns the whole input into
//! tokens, then a recursive-descent builder consumes them and fills a
//! [`Document`]. Keyword meaning comes from a caller-supplied [`Vocabulary`].
//!
//! # Grammar
//!
//! ```text
//! document   := structure*
//! custom     := KEYWORD [name] ["(" [property ("," property)*] ")"] "{" structure* "}"
//! primitive  := KEYWORD ["[" integer "]"] [name] "{" data "}"
//! property   := IDENT "=" (literal | "{" [literal ("," literal)*] "}")
//! data       := ε | literal ("," literal)* | sublist ("," sublist)*
//! reference  := null | name (LOCAL_NAME)*
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use openddl::{parse_document, ParseOptions, Vocabulary};
//!
//! let vocabulary = Vocabulary::new().structure("Metric", METRIC).property("key", KEY);
//! let document = parse_document(source, &vocabulary, &ParseOptions::default())?;
//! ```

mod builder;
pub mod lexer;
mod literal;
pub mod span;
mod vocabulary;

pub use lexer::{tokenize, Token};
pub use span::{Location, Span, Spanned};
pub use vocabulary::{PropertyKind, StructureKind, Vocabulary};

use crate::config::ParseOptions;
use crate::document::Document;
use crate::error::Result;

/// Parse a complete OpenDDL document.
///
/// Fails with a syntax error on the first lexical or grammatical problem;
/// no partial document is returned.
pub fn parse_document(
    source: &str,
    vocabulary: &Vocabulary,
    options: &ParseOptions,
) -> Result<Document> {
    let tokens = tokenize(source)?;
    log::trace!("scanned {} tokens", tokens.len());

    let document = builder::Builder::new(&tokens, vocabulary, options).build()?;
    log::debug!(
        "parsed {} structures ({} properties, {} pooled strings)",
        document.structure_count(),
        document.properties.len() - 1,
        document.strings().len()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_input() {
        let document = parse_document("", &Vocabulary::new(), &ParseOptions::default()).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_comments_only() {
        let source = "// nothing here\n/* still\nnothing */";
        let document =
            parse_document(source, &Vocabulary::new(), &ParseOptions::default()).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_lexical_errors_are_syntax_errors() {
        let err = parse_document("float { \"open", &Vocabulary::new(), &ParseOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_primitive_at_root() {
        let document =
            parse_document("int32 { 7 }", &Vocabulary::new(), &ParseOptions::default()).unwrap();
        assert_eq!(document.first_child().as_value::<i32>(), 7);
    }
}
