//! Error type for code generation.
//!
//! Generation only fails on malformed input trees or when the output sink
//! rejects a write. Every [`GenError`] names its category through
//! [`GenErrorKind`] and, where a node is at fault, carries that node's
//! source [`Span`].

use crate::ast::span::Span;
use std::sync::Arc;
use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

/// An error raised while compiling a template tree to source.
///
/// ```rust
/// use tplgen::{GenError, GenErrorKind, Span};
///
/// let err = GenError::empty_name("template").with_span(Span::new(4, 9));
/// assert_eq!(err.kind, GenErrorKind::MalformedTree);
/// assert_eq!(err.to_string(), "template name is empty (at 4..9)");
/// ```
#[derive(Debug, Clone, Error)]
#[error("{message}{}", location(.span))]
pub struct GenError {
    pub kind: GenErrorKind,
    pub span: Option<Span>,
    pub message: String,
    /// The underlying error, for sink failures.
    ///
    /// Wrapped in `Arc` so that `GenError` remains `Clone`.
    #[source]
    pub source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl GenError {
    pub fn new(kind: GenErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            span: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    // Convenience constructors for common error types

    pub fn empty_name(what: &str) -> Self {
        Self::new(GenErrorKind::MalformedTree, format!("{what} name is empty"))
    }

    pub fn duplicate_definition(what: &str, name: &str) -> Self {
        Self::new(
            GenErrorKind::DuplicateDefinition,
            format!("{what} `{name}` is defined more than once"),
        )
    }

    pub fn unknown_wrapper(name: &str) -> Self {
        Self::new(
            GenErrorKind::UnknownWrapper,
            format!("wrapper `{name}` is not defined in this unit"),
        )
    }

    pub fn wrapper_arity(name: &str, expected: usize, got: usize) -> Self {
        Self::new(
            GenErrorKind::WrapperArity,
            format!("wrapper `{name}` takes {expected} argument(s), got {got}"),
        )
    }

    pub fn invalid_filter_qualifier(module: &str) -> Self {
        Self::new(
            GenErrorKind::InvalidOptions,
            format!(
                "filter module `{module}` does not yield a Go package qualifier; \
                 set one with `GenOptions::filter_qualifier`"
            ),
        )
    }

    pub fn reserved_param(name: &str) -> Self {
        Self::new(
            GenErrorKind::MalformedTree,
            format!("parameter name `{name}` is reserved by the generated signature"),
        )
    }

    pub fn misplaced_wrapped_body() -> Self {
        Self::new(
            GenErrorKind::MisplacedWrappedBody,
            "wrapped-body placeholder used outside a wrapper",
        )
    }

    pub fn literal_collision(name: &str) -> Self {
        Self::new(
            GenErrorKind::LiteralCollision,
            format!("two different string literals map to the pool name `{name}`"),
        )
    }

    pub fn io(err: std::io::Error) -> Self {
        Self::new(GenErrorKind::Io, format!("failed to write output: {err}")).with_source(err)
    }
}

fn location(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" (at {span})"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenErrorKind {
    /// A required part of a node is missing or empty.
    MalformedTree,
    /// Two templates or two wrappers share a name.
    DuplicateDefinition,
    /// A template uses a wrapper that is neither defined in the unit nor
    /// declared external.
    UnknownWrapper,
    /// A wrapper use-clause passes the wrong number of arguments.
    WrapperArity,
    /// `EmitWrappedBody` appears outside a wrapper body.
    MisplacedWrappedBody,
    /// Two distinct literals hashed to the same pool name.
    LiteralCollision,
    /// The options cannot produce valid source for this tree.
    InvalidOptions,
    /// The output sink failed.
    Io,
}
