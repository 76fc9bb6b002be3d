//! Stringification options.

use crate::comment::stringify_comment;

/// Options for stringifying a document tree.
#[derive(Debug, Clone)]
pub struct StringifyOptions {
    /// Indentation step (default: two spaces).
    pub indent: &'static str,

    /// Max line width before wrapping; 0 disables the check (default: 80).
    pub line_width: usize,

    /// Minimum content width kept even at deep indentation (default: 20).
    pub min_content_width: usize,

    /// Whether single-line flow collections get inner padding,
    /// `{ a: 1 }` rather than `{a: 1}` (default: true).
    pub flow_padding: bool,

    /// Converts a raw comment body into its textual form.
    pub comment_string: fn(&str) -> String,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            indent: "  ",
            line_width: 80,
            min_content_width: 20,
            flow_padding: true,
            comment_string: stringify_comment,
        }
    }
}

impl StringifyOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom indentation step.
    pub fn indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    /// Set the max line width.
    pub fn line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Set the minimum content width.
    pub fn min_content_width(mut self, width: usize) -> Self {
        self.min_content_width = width;
        self
    }

    /// Disable inner padding in single-line flow collections.
    pub fn without_flow_padding(mut self) -> Self {
        self.flow_padding = false;
        self
    }
}
