//! Tag resolution and native value conversion for the Rime document
//! library.
//!
//! A [`Schema`] is a priority-ordered catalog of [`TagDescriptor`]s.
//! [`create_node`] converts a native value graph into a node tree under
//! a schema, turning shared and circular structure into anchors and
//! aliases. [`NodeStringifier`] renders any node back to text through
//! the layout engine in `rime-format`. Two non-default tags ship here:
//! `!!binary` for byte scalars and `!!pairs` for ordered key/value
//! lists.

mod binary;
mod convert;
mod core;
mod pairs;
mod schema;
mod stringify;
mod tag;

pub use binary::{Base64Codec, binary_tag};
pub use convert::{ConvertError, CreateNodeContext, create_node};
pub use pairs::{pairs_tag, resolve_pairs};
pub use schema::Schema;
pub use stringify::NodeStringifier;
pub use tag::{
    CollectionTag, CreateNodeFn, ScalarStringifyFn, ScalarTag, TAG_NAMESPACE, TagDescriptor,
    normalize_tag,
};
