//! Schema catalogs.

use rime_tree::Native;

use crate::core;
use crate::tag::TagDescriptor;

/// An ordered catalog of tag descriptors plus the built-in defaults.
///
/// The tag list is scanned front to back when identifying an untagged
/// value, so registration order is a priority order.
#[derive(Debug, Clone)]
pub struct Schema {
    tags: Vec<TagDescriptor>,
    map: TagDescriptor,
    seq: TagDescriptor,
    /// Capability hook: a value that is not claimed by any tag may
    /// expose an alternate representation to convert instead.
    pub json_repr: Option<fn(&Native) -> Option<Native>>,
}

impl Schema {
    /// The core schema: default map, sequence and string handlers.
    pub fn core() -> Self {
        let map = core::map_tag();
        let seq = core::seq_tag();
        Schema {
            tags: vec![map, seq, core::str_tag()],
            map,
            seq,
            json_repr: None,
        }
    }

    /// Register an additional tag at the end of the catalog.
    pub fn with_tag(mut self, tag: TagDescriptor) -> Self {
        self.tags.push(tag);
        self
    }

    /// Set the alternate-representation hook.
    pub fn with_json_repr(mut self, json_repr: fn(&Native) -> Option<Native>) -> Self {
        self.json_repr = Some(json_repr);
        self
    }

    /// The descriptor catalog in priority order.
    pub fn tags(&self) -> &[TagDescriptor] {
        &self.tags
    }

    /// The built-in map descriptor.
    pub fn map_tag(&self) -> &TagDescriptor {
        &self.map
    }

    /// The built-in sequence descriptor.
    pub fn seq_tag(&self) -> &TagDescriptor {
        &self.seq
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::core()
    }
}
