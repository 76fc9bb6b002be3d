//! The native value graph the converter starts from.
//!
//! Shared and circular structure is expressed with `Rc` cells: two
//! `Native::Map` values clone-share the same cell exactly when they are
//! the same object, which is what duplicate detection keys on.

use std::cell::RefCell;
use std::rc::Rc;

use crate::node::{Node, Pair, ScalarValue};

/// A shared native sequence cell.
pub type SharedSeq = Rc<RefCell<Vec<Native>>>;

/// A shared native map cell (ordered entries).
pub type SharedMap = Rc<RefCell<Vec<(Native, Native)>>>;

/// A native in-memory value.
#[derive(Debug, Clone)]
pub enum Native {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    /// A sequence; shared so identity is observable.
    Seq(SharedSeq),
    /// An ordered map; shared so identity is observable.
    Map(SharedMap),
    /// An already-converted node (pass-through).
    Node(Box<Node>),
    /// A key/value pair wrapper.
    Pair(Box<Pair>),
}

impl Native {
    /// Create a sequence from items.
    pub fn seq(items: Vec<Native>) -> Self {
        Native::Seq(Rc::new(RefCell::new(items)))
    }

    /// Create a map from ordered entries.
    pub fn map(entries: Vec<(Native, Native)>) -> Self {
        Native::Map(Rc::new(RefCell::new(entries)))
    }

    /// The identity key of this value, if it is an object.
    ///
    /// Two values share an identity exactly when they are clones of the
    /// same cell; structural equality plays no part.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Native::Seq(cell) => Some(Rc::as_ptr(cell) as *const () as usize),
            Native::Map(cell) => Some(Rc::as_ptr(cell) as *const () as usize),
            _ => None,
        }
    }

    /// Whether this value is an object (identity-bearing collection).
    pub fn is_object(&self) -> bool {
        matches!(self, Native::Seq(_) | Native::Map(_))
    }

    /// The scalar value this native wraps, if it is not a collection.
    pub fn to_scalar_value(&self) -> Option<ScalarValue> {
        match self {
            Native::Null => Some(ScalarValue::Null),
            Native::Bool(v) => Some(ScalarValue::Bool(*v)),
            Native::Int(v) => Some(ScalarValue::Int(*v)),
            Native::Float(v) => Some(ScalarValue::Float(*v)),
            Native::String(s) => Some(ScalarValue::String(s.clone())),
            Native::Bytes(b) => Some(ScalarValue::Bytes(b.clone())),
            Native::Seq(_) | Native::Map(_) | Native::Node(_) | Native::Pair(_) => None,
        }
    }
}

impl From<&str> for Native {
    fn from(s: &str) -> Self {
        Native::String(s.to_string())
    }
}

impl From<String> for Native {
    fn from(s: String) -> Self {
        Native::String(s)
    }
}

impl From<i64> for Native {
    fn from(v: i64) -> Self {
        Native::Int(v)
    }
}

impl From<f64> for Native {
    fn from(v: f64) -> Self {
        Native::Float(v)
    }
}

impl From<bool> for Native {
    fn from(v: bool) -> Self {
        Native::Bool(v)
    }
}

impl From<Vec<u8>> for Native {
    fn from(v: Vec<u8>) -> Self {
        Native::Bytes(v)
    }
}

impl From<Node> for Native {
    fn from(node: Node) -> Self {
        Native::Node(Box::new(node))
    }
}

impl From<Pair> for Native {
    fn from(pair: Pair) -> Self {
        Native::Pair(Box::new(pair))
    }
}
