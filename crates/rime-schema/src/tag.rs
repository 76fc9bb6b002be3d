//! The tag descriptor contract.
//!
//! A tag descriptor claims native shapes via `identify`, converts in
//! both directions, and may carry a custom stringifier. Descriptors are
//! plain function-pointer tables so a schema is a priority-ordered list
//! that can be scanned and copied freely.

use rime_format::{ByteCodec, StringifyContext, StringifyError};
use rime_tree::{Diagnostic, Native, Node, Scalar, ScalarValue};

use crate::convert::{ConvertError, CreateNodeContext};

/// Canonical tag namespace for the short `!!name` form.
pub const TAG_NAMESPACE: &str = "tag:yaml.org,2002:";

/// Custom scalar stringifier.
pub type ScalarStringifyFn = fn(
    &Scalar,
    &StringifyContext<'_>,
    &mut dyn FnMut(),
    &mut dyn FnMut(),
) -> Result<String, StringifyError>;

/// Node construction for a tag.
pub type CreateNodeFn = fn(&Native, &mut CreateNodeContext<'_>) -> Result<Node, ConvertError>;

/// A tag over scalar values.
#[derive(Clone, Copy)]
pub struct ScalarTag {
    /// Canonical tag name.
    pub tag: &'static str,
    /// Whether this is the default handler for its kind; defaults leave
    /// the node tag implicit.
    pub default: bool,
    /// Format qualifier, e.g. a radix variant of a number tag.
    pub format: Option<&'static str>,
    /// Whether this tag claims the given native value.
    pub identify: fn(&Native) -> bool,
    /// Resolve source text to a value. Data-quality problems are
    /// reported through the callback, never raised.
    pub resolve: fn(&str, Option<&dyn ByteCodec>, &mut dyn FnMut(Diagnostic)) -> ScalarValue,
    /// Node construction override; absent means a bare scalar wrapper.
    pub create_node: Option<CreateNodeFn>,
    /// Stringify override; absent means the generic scalar stringifier.
    pub stringify: Option<ScalarStringifyFn>,
}

/// A tag over collections.
#[derive(Clone, Copy)]
pub struct CollectionTag {
    /// Canonical tag name.
    pub tag: &'static str,
    /// Whether this is the default handler for its kind.
    pub default: bool,
    /// Format qualifier.
    pub format: Option<&'static str>,
    /// Whether this tag claims the given native value.
    pub identify: fn(&Native) -> bool,
    /// Normalize a parsed collection node. Absent means the node is
    /// already in canonical shape.
    pub resolve: Option<fn(Node, &mut dyn FnMut(Diagnostic)) -> Node>,
    /// Node construction for this tag.
    pub create_node: CreateNodeFn,
}

/// A schema catalog entry.
#[derive(Clone, Copy)]
pub enum TagDescriptor {
    Scalar(ScalarTag),
    Collection(CollectionTag),
}

impl TagDescriptor {
    /// Canonical tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            TagDescriptor::Scalar(t) => t.tag,
            TagDescriptor::Collection(t) => t.tag,
        }
    }

    /// Whether this is a default handler.
    pub fn is_default(&self) -> bool {
        match self {
            TagDescriptor::Scalar(t) => t.default,
            TagDescriptor::Collection(t) => t.default,
        }
    }

    /// Format qualifier, if any.
    pub fn format(&self) -> Option<&'static str> {
        match self {
            TagDescriptor::Scalar(t) => t.format,
            TagDescriptor::Collection(t) => t.format,
        }
    }

    /// Whether this tag claims the given native value.
    pub fn identify(&self, value: &Native) -> bool {
        match self {
            TagDescriptor::Scalar(t) => (t.identify)(value),
            TagDescriptor::Collection(t) => (t.identify)(value),
        }
    }
}

impl std::fmt::Debug for TagDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            TagDescriptor::Scalar(_) => "Scalar",
            TagDescriptor::Collection(_) => "Collection",
        };
        f.debug_struct("TagDescriptor")
            .field("kind", &kind)
            .field("tag", &self.tag())
            .field("default", &self.is_default())
            .finish()
    }
}

/// Normalize a short-form `!!name` tag to its canonical long form.
pub fn normalize_tag(tag: &str) -> String {
    match tag.strip_prefix("!!") {
        Some(short) => format!("{TAG_NAMESPACE}{short}"),
        None => tag.to_string(),
    }
}
