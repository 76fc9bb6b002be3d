//! Node tree and native value vocabulary for the Rime document library.
//!
//! A document is a tree of [`Node`]s: scalars, aliases, maps, sequences,
//! and pairs, each carrying commentary and anchor metadata in [`Props`].
//! [`Native`] is the in-memory value graph the converter starts from;
//! shared and circular structure is expressed with `Rc` cells so that
//! object identity is observable.

mod diagnostic;
mod native;
mod node;

pub use diagnostic::Diagnostic;
pub use native::{Native, SharedMap, SharedSeq};
pub use node::{Alias, Chomp, Map, Node, Pair, Props, Scalar, ScalarStyle, ScalarValue, Sequence};
pub use rime_cst::Span;
