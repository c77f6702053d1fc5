use std::fmt;

/// Byte-offset range into the template source the node was parsed from.
///
/// The parser fills these in; trees built by hand (tests, tools) can use
/// [`Span::default`], which renders as `0..0` in diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Wraps any AST node with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Wrap a node that has no source location.
    pub fn bare(node: T) -> Self {
        Self::new(node, Span::default())
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(4, 9).to_string(), "4..9");
        assert_eq!(Span::default().to_string(), "0..0");
    }

    #[test]
    fn test_with_span_replaces_location() {
        let node = Spanned::bare("x").with_span(Span::new(1, 2));
        assert_eq!(node, Spanned::new("x", Span::new(1, 2)));
    }
}
