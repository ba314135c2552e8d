use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::parser::span::{Location, Span};

/// Broad category of a [`DdlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input text could not be tokenized or parsed.
    Syntax,
    /// A well-formed document violates the caller's schema.
    Schema,
    /// Parse options could not be loaded.
    Config,
}

/// Main error type for OpenDDL operations
#[derive(Error, Diagnostic, Debug)]
pub enum DdlError {
    #[error("syntax error at {location}: {message}")]
    #[diagnostic(code(openddl::syntax))]
    Syntax {
        message: String,
        location: Location,
        #[label("here")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("schema violation at {location}: {message}")]
    #[diagnostic(code(openddl::schema))]
    Schema {
        message: String,
        location: Location,
        #[label("in this structure")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("invalid parse options: {message}")]
    #[diagnostic(code(openddl::config))]
    Config { message: String },
}

impl DdlError {
    pub(crate) fn syntax(message: impl Into<String>, span: Span) -> Self {
        DdlError::Syntax {
            message: message.into(),
            location: span.start,
            span: span.into(),
            help: None,
        }
    }

    pub(crate) fn schema(message: impl Into<String>, span: Span) -> Self {
        DdlError::Schema {
            message: message.into(),
            location: span.start,
            span: span.into(),
            help: None,
        }
    }

    /// Attach help text to a syntax or schema error.
    pub(crate) fn with_help(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            DdlError::Syntax { help, .. } | DdlError::Schema { help, .. } => {
                *help = Some(text.into());
            }
            DdlError::Config { .. } => {}
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DdlError::Syntax { .. } => ErrorKind::Syntax,
            DdlError::Schema { .. } => ErrorKind::Schema,
            DdlError::Config { .. } => ErrorKind::Config,
        }
    }

    /// Source position the error refers to, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            DdlError::Syntax { location, .. } | DdlError::Schema { location, .. } => {
                Some(*location)
            }
            DdlError::Config { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DdlError::Syntax { message, .. }
            | DdlError::Schema { message, .. }
            | DdlError::Config { message } => message,
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.offset.into(), span.len())
    }
}

pub type Result<T> = std::result::Result<T, DdlError>;
