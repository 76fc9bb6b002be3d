//! Token shapes consumed from the external lexer.

/// The kind of a source token, as far as this crate cares.
///
/// The lexer distinguishes many more shapes; offset arithmetic only needs
/// to know whether a token is filler (whitespace, comments, line breaks)
/// or real content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTokenKind {
    /// Horizontal whitespace: spaces and tabs.
    Space,
    /// Newline: `\n` or `\r\n`.
    Newline,
    /// A comment, including its leading marker.
    Comment,
    /// Scalar content of any style.
    Scalar,
    /// Structural content: indicators, anchors, tags, brackets.
    Marker,
}

impl SourceTokenKind {
    /// Whether this token is filler (whitespace, comment, or newline).
    pub fn is_filler(&self) -> bool {
        matches!(
            self,
            SourceTokenKind::Space | SourceTokenKind::Newline | SourceTokenKind::Comment
        )
    }
}

/// A token with its kind and source text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceToken<'src> {
    /// The kind of token.
    pub kind: SourceTokenKind,
    /// The source text of this token.
    pub text: &'src str,
}

impl<'src> SourceToken<'src> {
    /// Create a new token.
    pub fn new(kind: SourceTokenKind, text: &'src str) -> Self {
        Self { kind, text }
    }

    /// Length of the token's source text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the token's source text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
