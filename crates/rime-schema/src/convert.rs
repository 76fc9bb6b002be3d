//! Native value to node conversion.
//!
//! Conversion is a recursive descent over the native value graph. When
//! duplicate-object aliasing is enabled, every identity-bearing object
//! is entered into a side table before its children are converted, so a
//! second encounter (shared substructure or a cycle) yields an alias to
//! the first node instead of a second expansion. Anchor names are
//! allocated lazily, only when an alias actually needs one, and stamped
//! onto the owning node in a fix-up pass once the tree is complete.
//!
//! With aliasing disabled, repeated objects are re-expanded and a
//! cyclic graph recurses without bound; callers opting out take on that
//! hazard.

use std::collections::HashMap;

use rime_tree::{Map, Native, Node, Scalar};
use tracing::trace;

use crate::schema::Schema;
use crate::tag::{TagDescriptor, normalize_tag};

/// Fatal conversion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// An explicit tag name matched no descriptor in the schema.
    UnknownTag(String),
    /// A pairs element shape cannot be coerced to a key/value tuple.
    PairShape(String),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::UnknownTag(tag) => write!(f, "tag {tag} is not present in the schema"),
            ConvertError::PairShape(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// One step down the node tree being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathStep {
    /// Sequence item index.
    Item(usize),
    /// Map (or pair-sequence) entry key.
    Key(usize),
    /// Map (or pair-sequence) entry value.
    Value(usize),
}

struct SourceRecord {
    anchor: Option<String>,
    /// Where the first encounter's node sits in the finished tree.
    path: Vec<PathStep>,
}

/// State for one top-level conversion call.
///
/// The identity table inside is scoped to this call; contexts are not
/// reusable across independent conversions.
pub struct CreateNodeContext<'a> {
    /// Active schema.
    pub schema: &'a Schema,
    /// Whether repeated objects become aliases.
    pub alias_duplicates: bool,
    /// Allocates a fresh anchor name for a source object. Invoked at
    /// most once per distinct object.
    pub on_anchor: &'a mut dyn FnMut(&Native) -> String,
    /// Value transform applied to every candidate key/value.
    pub replacer: Option<&'a dyn Fn(&Native, &Native) -> Native>,
    /// One-shot hook observing which descriptor handled the root value;
    /// consumed on first use.
    pub on_tag: Option<Box<dyn FnOnce(&'static str) + 'a>>,
    sources: HashMap<usize, SourceRecord>,
    path: Vec<PathStep>,
    anchors: Vec<(Vec<PathStep>, String)>,
}

impl<'a> CreateNodeContext<'a> {
    /// Create a context with aliasing enabled and no replacer.
    pub fn new(schema: &'a Schema, on_anchor: &'a mut dyn FnMut(&Native) -> String) -> Self {
        CreateNodeContext {
            schema,
            alias_duplicates: true,
            on_anchor,
            replacer: None,
            on_tag: None,
            sources: HashMap::new(),
            path: Vec::new(),
            anchors: Vec::new(),
        }
    }

    /// Disable duplicate-object aliasing.
    pub fn without_alias_duplicates(mut self) -> Self {
        self.alias_duplicates = false;
        self
    }

    /// Set the per-value transform.
    pub fn with_replacer(mut self, replacer: &'a dyn Fn(&Native, &Native) -> Native) -> Self {
        self.replacer = Some(replacer);
        self
    }

    /// Set the one-shot descriptor observer.
    pub fn with_on_tag(mut self, on_tag: impl FnOnce(&'static str) + 'a) -> Self {
        self.on_tag = Some(Box::new(on_tag));
        self
    }

    pub(crate) fn push(&mut self, step: PathStep) {
        self.path.push(step);
    }

    pub(crate) fn pop(&mut self) {
        self.path.pop();
    }

    fn take_anchors(&mut self) -> Vec<(Vec<PathStep>, String)> {
        std::mem::take(&mut self.anchors)
    }
}

/// Convert a native value into a node under the context's schema.
///
/// This is the primary construction seam: an explicit `tag_name` forces
/// descriptor selection by name and fails when the schema has no such
/// descriptor; otherwise descriptors are selected by their `identify`
/// predicates in catalog order.
pub fn create_node(
    value: &Native,
    tag_name: Option<&str>,
    ctx: &mut CreateNodeContext<'_>,
) -> Result<Node, ConvertError> {
    let mut node = convert_value(value, tag_name, ctx)?;
    // Anchors are known only once every alias has been seen; stamp them
    // onto the nodes they belong to now that the tree is complete.
    for (path, anchor) in ctx.take_anchors() {
        match navigate_mut(&mut node, &path) {
            Some(target) => target.props_mut().anchor = Some(anchor),
            // A descriptor that reshapes its node invalidates the
            // recorded path; the emitted alias is left dangling.
            None => trace!(%anchor, ?path, "anchor target not found at its recorded path"),
        }
    }
    Ok(node)
}

pub(crate) fn convert_value(
    value: &Native,
    tag_name: Option<&str>,
    ctx: &mut CreateNodeContext<'_>,
) -> Result<Node, ConvertError> {
    // Already a node: idempotent pass-through.
    if let Native::Node(node) = value {
        return Ok(node.as_ref().clone());
    }
    // A bare pair becomes the sole item of a fresh map.
    if let Native::Pair(pair) = value {
        let mut map = Map::default();
        map.items.push(pair.as_ref().clone());
        return Ok(Node::Map(map));
    }

    if ctx.alias_duplicates {
        if let Some(identity) = value.identity() {
            let CreateNodeContext {
                sources,
                on_anchor,
                anchors,
                ..
            } = &mut *ctx;
            if let Some(record) = sources.get_mut(&identity) {
                let anchor = match &record.anchor {
                    Some(name) => name.clone(),
                    None => {
                        let name = on_anchor(value);
                        record.anchor = Some(name.clone());
                        anchors.push((record.path.clone(), name.clone()));
                        name
                    }
                };
                trace!(%anchor, "repeated object, emitting alias");
                return Ok(Node::alias(anchor));
            }
            // Register before recursing so a cycle through this value's
            // own children resolves here.
            let path = ctx.path.clone();
            ctx.sources.insert(identity, SourceRecord { anchor: None, path });
        }
    }

    let schema = ctx.schema;
    let normalized = tag_name.map(normalize_tag);

    let tag_obj: Option<&TagDescriptor> = match &normalized {
        Some(name) => {
            let matches: Vec<&TagDescriptor> = schema
                .tags()
                .iter()
                .filter(|t| t.tag() == name)
                .collect();
            if matches.is_empty() {
                return Err(ConvertError::UnknownTag(name.clone()));
            }
            Some(
                matches
                    .iter()
                    .copied()
                    .find(|t| t.format().is_none())
                    .unwrap_or(matches[0]),
            )
        }
        None => schema
            .tags()
            .iter()
            .find(|t| t.identify(value) && t.format().is_none()),
    };

    let json_owned;
    let mut value = value;
    let tag_obj: &TagDescriptor = match tag_obj {
        Some(t) => t,
        None => {
            if let Some(json_repr) = schema.json_repr {
                if let Some(replaced) = json_repr(value) {
                    json_owned = replaced;
                    value = &json_owned;
                }
            }
            match value.to_scalar_value() {
                // Plain scalars bottom out here.
                Some(scalar) => return Ok(Node::Scalar(Scalar::new(scalar))),
                None => match value {
                    Native::Seq(_) => schema.seq_tag(),
                    _ => schema.map_tag(),
                },
            }
        }
    };

    if let Some(on_tag) = ctx.on_tag.take() {
        on_tag(tag_obj.tag());
    }
    trace!(tag = tag_obj.tag(), "selected descriptor");

    let mut node = match tag_obj {
        TagDescriptor::Collection(t) => (t.create_node)(value, ctx)?,
        TagDescriptor::Scalar(t) => match t.create_node {
            Some(create) => create(value, ctx)?,
            None => match value.to_scalar_value() {
                Some(scalar) => Node::Scalar(Scalar::new(scalar)),
                None => Node::Scalar(Scalar::default()),
            },
        },
    };

    if let Some(name) = normalized {
        node.props_mut().tag = Some(name);
    } else if !tag_obj.is_default() {
        node.props_mut().tag = Some(tag_obj.tag().to_string());
    }
    Ok(node)
}

/// Follow a recorded path down the finished tree.
fn navigate_mut<'n>(node: &'n mut Node, path: &[PathStep]) -> Option<&'n mut Node> {
    let mut current = node;
    for &step in path {
        let next = match (step, current) {
            (PathStep::Item(i), Node::Sequence(seq)) => seq.items.get_mut(i),
            (PathStep::Key(i), Node::Map(map)) => map.items.get_mut(i).map(|p| &mut p.key),
            (PathStep::Value(i), Node::Map(map)) => {
                map.items.get_mut(i).and_then(|p| p.value.as_mut())
            }
            // Pair-sequence entries live behind a pair node.
            (PathStep::Key(i), Node::Sequence(seq)) => match seq.items.get_mut(i) {
                Some(Node::Pair(p)) => Some(&mut p.key),
                _ => None,
            },
            (PathStep::Value(i), Node::Sequence(seq)) => match seq.items.get_mut(i) {
                Some(Node::Pair(p)) => p.value.as_mut(),
                _ => None,
            },
            _ => None,
        };
        current = next?;
    }
    Some(current)
}
