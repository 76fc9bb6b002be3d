//! The `tag:yaml.org,2002:pairs` collection tag.
//!
//! An ordered list of key/value pairs, written as a sequence whose
//! items are single-entry maps. Resolution coerces each item into a
//! pair; construction accepts `[key, value]` tuples, single-entry maps,
//! or bare keys.

use rime_tree::{Diagnostic, Native, Node, Pair, Sequence};

use crate::convert::{ConvertError, CreateNodeContext, PathStep, convert_value};
use crate::tag::{CollectionTag, TagDescriptor};

pub fn pairs_tag() -> TagDescriptor {
    TagDescriptor::Collection(CollectionTag {
        tag: "tag:yaml.org,2002:pairs",
        default: false,
        format: None,
        identify: |_| false,
        resolve: Some(resolve_pairs),
        create_node: create_pairs,
    })
}

/// Coerce every item of a parsed pairs sequence into a pair.
///
/// A single-entry map collapses to its one pair; its wrapper comments
/// are merged onto the pair's key and value so nothing is lost. Extra
/// entries and a non-sequence outer node are data-quality problems:
/// they are reported and resolution continues best-effort.
pub fn resolve_pairs(mut node: Node, on_error: &mut dyn FnMut(Diagnostic)) -> Node {
    match node.as_sequence_mut() {
        Some(seq) => {
            for item in &mut seq.items {
                let replacement = match &mut *item {
                    Node::Pair(_) => continue,
                    Node::Map(map) => {
                        if map.items.len() > 1 {
                            let mut diagnostic = Diagnostic::new(
                                "Each pair must have its own sequence indicator",
                            );
                            if let Some(span) = map.props.span {
                                diagnostic = diagnostic.with_span(span);
                            }
                            on_error(diagnostic);
                        }
                        let mut pair = if map.items.is_empty() {
                            Pair::new(Node::null(), None)
                        } else {
                            map.items.remove(0)
                        };
                        if let Some(before) = map.props.comment_before.take() {
                            let props = pair.key.props_mut();
                            props.comment_before = Some(match props.comment_before.take() {
                                Some(own) => format!("{before}\n{own}"),
                                None => before,
                            });
                        }
                        if let Some(comment) = map.props.comment.take() {
                            let target = pair.value.as_mut().unwrap_or(&mut pair.key);
                            let props = target.props_mut();
                            props.comment = Some(match props.comment.take() {
                                Some(own) => format!("{comment}\n{own}"),
                                None => comment,
                            });
                        }
                        Node::Pair(Box::new(pair))
                    }
                    other => {
                        let key = std::mem::replace(other, Node::null());
                        Node::Pair(Box::new(Pair::new(key, None)))
                    }
                };
                *item = replacement;
            }
        }
        None => {
            let mut diagnostic = Diagnostic::new("Expected a sequence for this tag");
            if let Some(span) = node.props().span {
                diagnostic = diagnostic.with_span(span);
            }
            on_error(diagnostic);
        }
    }
    node
}

/// Build a pairs sequence from a native sequence of tuple-shaped items.
///
/// Shape violations here are caller programming errors, so they fail
/// the conversion instead of traveling the diagnostic path.
fn create_pairs(value: &Native, ctx: &mut CreateNodeContext<'_>) -> Result<Node, ConvertError> {
    let mut seq = Sequence::default();
    if let Native::Seq(cell) = value {
        let items = cell.borrow().clone();
        for (i, item) in items.iter().enumerate() {
            let item = match ctx.replacer {
                Some(replacer) => replacer(&Native::Int(i as i64), item),
                None => item.clone(),
            };
            let (key, val) = pair_parts(&item)?;
            ctx.push(PathStep::Key(i));
            let key_node = convert_value(&key, None, ctx)?;
            ctx.pop();
            let value_node = match val {
                Some(val) => {
                    ctx.push(PathStep::Value(i));
                    let node = convert_value(&val, None, ctx)?;
                    ctx.pop();
                    Some(node)
                }
                None => None,
            };
            seq.items
                .push(Node::Pair(Box::new(Pair::new(key_node, value_node))));
        }
    }
    Ok(Node::Sequence(seq))
}

fn pair_parts(item: &Native) -> Result<(Native, Option<Native>), ConvertError> {
    match item {
        Native::Seq(cell) => {
            let tuple = cell.borrow();
            if tuple.len() == 2 {
                Ok((tuple[0].clone(), Some(tuple[1].clone())))
            } else {
                Err(ConvertError::PairShape(format!(
                    "expected a [key, value] tuple, found {} items",
                    tuple.len()
                )))
            }
        }
        Native::Map(cell) => {
            let entries = cell.borrow();
            if entries.len() == 1 {
                Ok((entries[0].0.clone(), Some(entries[0].1.clone())))
            } else {
                Err(ConvertError::PairShape(format!(
                    "expected a map with one key, found {} keys",
                    entries.len()
                )))
            }
        }
        other => Ok((other.clone(), None)),
    }
}
