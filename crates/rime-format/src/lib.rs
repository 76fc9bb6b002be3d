//! Layout engine and stringification primitives for the Rime document
//! library.
//!
//! This crate turns nodes into formatted text. It owns the per-call
//! stringify context and options, the comment re-attachment helpers, the
//! scalar stringifier, and the collection stringifier that decides
//! between block and flow layout. Rendering an arbitrary node is the job
//! of a dispatcher implementing [`StringifyItem`], which the collection
//! stringifier calls back into for each item.

mod codec;
mod collection;
mod comment;
mod context;
mod options;
mod scalar;

pub use codec::ByteCodec;
pub use collection::{CollectionStyle, ItemRef, StringifyItem, stringify_collection};
pub use comment::{indent_comment, line_comment, stringify_comment};
pub use context::StringifyContext;
pub use options::StringifyOptions;
pub use scalar::{scalar_text, stringify_string};

/// Fatal failure while stringifying.
///
/// Data-quality problems travel through diagnostic callbacks instead;
/// these errors abort the stringification call because the output could
/// not be produced correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringifyError {
    /// A byte scalar had to be encoded but no codec is configured.
    MissingByteCodec,
    /// The collection stringifier was handed a non-collection node.
    NotACollection,
}

impl std::fmt::Display for StringifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StringifyError::MissingByteCodec => {
                write!(f, "cannot write binary content without a byte codec")
            }
            StringifyError::NotACollection => {
                write!(f, "expected a map or sequence node")
            }
        }
    }
}

impl std::error::Error for StringifyError {}
