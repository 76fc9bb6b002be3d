//! Per-call stringification state.

use crate::codec::ByteCodec;
use crate::options::StringifyOptions;

/// State carried through one stringification call.
///
/// A context is scoped to a single top-level call; sharing one across
/// independent calls is not supported. Child contexts are derived per
/// collection item with [`StringifyContext::child`].
#[derive(Clone)]
pub struct StringifyContext<'a> {
    /// Current accumulated indentation.
    pub indent: String,
    /// Flow override: `Some(true)` forces flow for nested collections,
    /// `None` lets each collection's own flag decide.
    pub in_flow: Option<bool>,
    /// Stringification options.
    pub options: StringifyOptions,
    /// Injected byte codec, if the caller supplied one.
    pub codec: Option<&'a dyn ByteCodec>,
}

impl<'a> StringifyContext<'a> {
    /// Create a context with the given options and no indentation.
    pub fn new(options: StringifyOptions) -> Self {
        Self {
            indent: String::new(),
            in_flow: None,
            options,
            codec: None,
        }
    }

    /// Attach a byte codec.
    pub fn with_codec(mut self, codec: &'a dyn ByteCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    /// The indentation step from the options.
    pub fn indent_step(&self) -> &'static str {
        self.options.indent
    }

    /// Padding inside single-line flow brackets.
    pub fn flow_padding(&self) -> &'static str {
        if self.options.flow_padding { " " } else { "" }
    }

    /// Derive a context for a nested item.
    pub fn child(&self, indent: String, in_flow: Option<bool>) -> Self {
        Self {
            indent,
            in_flow: in_flow.or(self.in_flow),
            options: self.options.clone(),
            codec: self.codec,
        }
    }
}

impl std::fmt::Debug for StringifyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringifyContext")
            .field("indent", &self.indent)
            .field("in_flow", &self.in_flow)
            .field("options", &self.options)
            .field("codec", &self.codec.map(|_| "dyn ByteCodec"))
            .finish()
    }
}
