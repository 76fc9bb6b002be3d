//! Node types for Rime documents.
//!
//! Every node carries the same metadata in [`Props`]:
//! - An optional tag (semantic type, independent of rendering)
//! - An optional anchor (name other nodes can alias)
//! - An optional trailing comment (same line) and comment-before block
//! - A spacing flag (blank line before the node)
//!
//! Collections additionally remember whether they were written in flow
//! style, and block scalars remember their chomping indicator.

use rime_cst::Span;

/// Metadata shared by every node kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    /// Semantic type tag (e.g. `tag:yaml.org,2002:binary`).
    pub tag: Option<String>,
    /// Anchor name, if other nodes alias this one.
    pub anchor: Option<String>,
    /// Trailing comment on the same line as the node.
    pub comment: Option<String>,
    /// Comment line(s) immediately preceding the node.
    pub comment_before: Option<String>,
    /// Whether a blank line precedes the node.
    pub space_before: bool,
    /// Source span (None if programmatically constructed).
    pub span: Option<Span>,
}

/// How a scalar should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Unquoted.
    Plain,
    /// Double-quoted with escapes.
    QuoteDouble,
    /// Block literal (`|`): newlines preserved.
    BlockLiteral,
    /// Block folded (`>`): newlines folded to spaces.
    BlockFolded,
}

/// Chomping indicator for block scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chomp {
    /// Keep a single trailing newline.
    #[default]
    Clip,
    /// Strip all trailing newlines.
    Strip,
    /// Keep trailing blank lines verbatim.
    Keep,
}

/// A resolved scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl ScalarValue {
    /// Whether this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Get as string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as byte slice, if this is a byte sequence.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ScalarValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(v: Vec<u8>) -> Self {
        ScalarValue::Bytes(v)
    }
}

impl Default for ScalarValue {
    fn default() -> Self {
        ScalarValue::Null
    }
}

/// A scalar node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scalar {
    /// Shared metadata.
    pub props: Props,
    /// The resolved value.
    pub value: ScalarValue,
    /// Requested rendering style (None lets the stringifier choose).
    pub style: Option<ScalarStyle>,
    /// Chomping indicator, meaningful for block styles.
    pub chomp: Chomp,
}

impl Scalar {
    /// Create a scalar wrapping a value.
    pub fn new(value: impl Into<ScalarValue>) -> Self {
        Scalar {
            value: value.into(),
            ..Scalar::default()
        }
    }

    /// Create a null scalar.
    pub fn null() -> Self {
        Scalar::new(ScalarValue::Null)
    }
}

/// A named back-reference to an anchored node.
///
/// An alias is a lookup key, never ownership of the referenced node.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    /// Shared metadata.
    pub props: Props,
    /// Name of the anchor this alias refers to.
    pub source: String,
}

impl Alias {
    /// Create an alias referring to an anchor name.
    pub fn new(source: impl Into<String>) -> Self {
        Alias {
            props: Props::default(),
            source: source.into(),
        }
    }
}

/// An ordered mapping of key/value pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    /// Shared metadata.
    pub props: Props,
    /// Entries in insertion order.
    pub items: Vec<Pair>,
    /// Whether this map was written in flow style.
    pub flow: bool,
}

/// An ordered sequence of nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sequence {
    /// Shared metadata.
    pub props: Props,
    /// Items in insertion order. For the pairs tag these are
    /// [`Node::Pair`] items.
    pub items: Vec<Node>,
    /// Whether this sequence was written in flow style.
    pub flow: bool,
}

/// An owned key/value tuple. The value may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    /// The key node.
    pub key: Node,
    /// The value node, if any.
    pub value: Option<Node>,
}

impl Pair {
    /// Create a pair from a key and an optional value.
    pub fn new(key: Node, value: Option<Node>) -> Self {
        Pair { key, value }
    }
}

/// An element of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Alias(Alias),
    Map(Map),
    Sequence(Sequence),
    Pair(Box<Pair>),
}

impl Node {
    /// Create a null scalar node.
    pub fn null() -> Self {
        Node::Scalar(Scalar::null())
    }

    /// Create a scalar node wrapping a value.
    pub fn scalar(value: impl Into<ScalarValue>) -> Self {
        Node::Scalar(Scalar::new(value))
    }

    /// Create an alias node referring to an anchor name.
    pub fn alias(source: impl Into<String>) -> Self {
        Node::Alias(Alias::new(source))
    }

    /// Shared metadata for this node.
    ///
    /// A pair carries no metadata of its own; its key's props stand in
    /// for it, which is where comment-before and spacing live.
    pub fn props(&self) -> &Props {
        match self {
            Node::Scalar(n) => &n.props,
            Node::Alias(n) => &n.props,
            Node::Map(n) => &n.props,
            Node::Sequence(n) => &n.props,
            Node::Pair(p) => p.key.props(),
        }
    }

    /// Mutable shared metadata for this node.
    pub fn props_mut(&mut self) -> &mut Props {
        match self {
            Node::Scalar(n) => &mut n.props,
            Node::Alias(n) => &mut n.props,
            Node::Map(n) => &mut n.props,
            Node::Sequence(n) => &mut n.props,
            Node::Pair(p) => p.key.props_mut(),
        }
    }

    /// Get as scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(n) => Some(n),
            _ => None,
        }
    }

    /// Get as alias.
    pub fn as_alias(&self) -> Option<&Alias> {
        match self {
            Node::Alias(n) => Some(n),
            _ => None,
        }
    }

    /// Get as map.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(n) => Some(n),
            _ => None,
        }
    }

    /// Get as mutable map.
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Node::Map(n) => Some(n),
            _ => None,
        }
    }

    /// Get as sequence.
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(n) => Some(n),
            _ => None,
        }
    }

    /// Get as mutable sequence.
    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Node::Sequence(n) => Some(n),
            _ => None,
        }
    }

    /// Get as pair.
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Node::Pair(p) => Some(p),
            _ => None,
        }
    }

    /// Whether this is a collection (map or sequence).
    pub fn is_collection(&self) -> bool {
        matches!(self, Node::Map(_) | Node::Sequence(_))
    }

    /// Whether the flow flag is set on this collection.
    pub fn is_flow(&self) -> bool {
        match self {
            Node::Map(m) => m.flow,
            Node::Sequence(s) => s.flow,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_constructors() {
        assert_eq!(Node::null().as_scalar().unwrap().value, ScalarValue::Null);
        assert_eq!(
            Node::scalar("hi").as_scalar().unwrap().value.as_str(),
            Some("hi")
        );
        assert_eq!(Node::scalar(42).as_scalar().unwrap().value, ScalarValue::Int(42));
        assert_eq!(
            Node::scalar(true).as_scalar().unwrap().value,
            ScalarValue::Bool(true)
        );
    }

    #[test]
    fn test_alias_holds_name_only() {
        let alias = Node::alias("a1");
        assert_eq!(alias.as_alias().unwrap().source, "a1");
        assert!(alias.props().anchor.is_none());
    }

    #[test]
    fn test_pair_props_delegate_to_key() {
        let mut key = Node::scalar("k");
        key.props_mut().comment_before = Some(" leading".to_string());
        let pair = Node::Pair(Box::new(Pair::new(key, Some(Node::scalar(1)))));
        assert_eq!(pair.props().comment_before.as_deref(), Some(" leading"));
    }

    #[test]
    fn test_collection_accessors() {
        let mut map = Map::default();
        map.items.push(Pair::new(Node::scalar("a"), Some(Node::scalar(1))));
        let node = Node::Map(map);
        assert!(node.is_collection());
        assert!(!node.is_flow());
        assert_eq!(node.as_map().unwrap().items.len(), 1);
    }
}
