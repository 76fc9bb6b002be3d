//! Token vocabulary and offset arithmetic for the Rime document library.
//!
//! The lexer itself lives elsewhere; this crate defines the token shapes
//! Rime consumes from it, plus the byte-offset arithmetic used when a
//! composer needs to place a node for content that has no token of its
//! own (an empty scalar).

mod position;
mod span;
mod token;

pub use position::empty_scalar_position;
pub use span::Span;
pub use token::{SourceToken, SourceTokenKind};
