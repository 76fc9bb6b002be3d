//! Built-in map, sequence and string tags.

use rime_format::stringify_string;
use rime_tree::{Map, Native, Node, Pair, ScalarValue, Sequence};

use crate::convert::{ConvertError, CreateNodeContext, PathStep, convert_value};
use crate::tag::{CollectionTag, ScalarTag, TagDescriptor};

pub(crate) fn map_tag() -> TagDescriptor {
    TagDescriptor::Collection(CollectionTag {
        tag: "tag:yaml.org,2002:map",
        default: true,
        format: None,
        identify: |value| matches!(value, Native::Map(_)),
        resolve: None,
        create_node: create_map,
    })
}

pub(crate) fn seq_tag() -> TagDescriptor {
    TagDescriptor::Collection(CollectionTag {
        tag: "tag:yaml.org,2002:seq",
        default: true,
        format: None,
        identify: |value| matches!(value, Native::Seq(_)),
        resolve: None,
        create_node: create_seq,
    })
}

pub(crate) fn str_tag() -> TagDescriptor {
    TagDescriptor::Scalar(ScalarTag {
        tag: "tag:yaml.org,2002:str",
        default: true,
        format: None,
        identify: |value| matches!(value, Native::String(_)),
        resolve: |text, _codec, _on_error| ScalarValue::String(text.to_string()),
        create_node: None,
        stringify: Some(|scalar, ctx, _on_comment, on_chomp_keep| {
            Ok(stringify_string(scalar, ctx, on_chomp_keep))
        }),
    })
}

fn create_map(value: &Native, ctx: &mut CreateNodeContext<'_>) -> Result<Node, ConvertError> {
    let mut map = Map::default();
    if let Native::Map(cell) = value {
        // Entries are copied out before recursing so a cycle back into
        // this map does not hit a live borrow of the cell.
        let entries = cell.borrow().clone();
        for (i, (key, item)) in entries.iter().enumerate() {
            let item = match ctx.replacer {
                Some(replacer) => replacer(key, item),
                None => item.clone(),
            };
            ctx.push(PathStep::Key(i));
            let key_node = convert_value(key, None, ctx)?;
            ctx.pop();
            ctx.push(PathStep::Value(i));
            let value_node = convert_value(&item, None, ctx)?;
            ctx.pop();
            map.items.push(Pair::new(key_node, Some(value_node)));
        }
    }
    Ok(Node::Map(map))
}

fn create_seq(value: &Native, ctx: &mut CreateNodeContext<'_>) -> Result<Node, ConvertError> {
    let mut seq = Sequence::default();
    if let Native::Seq(cell) = value {
        let items = cell.borrow().clone();
        for (i, item) in items.iter().enumerate() {
            let item = match ctx.replacer {
                Some(replacer) => replacer(&Native::Int(i as i64), item),
                None => item.clone(),
            };
            ctx.push(PathStep::Item(i));
            let node = convert_value(&item, None, ctx)?;
            ctx.pop();
            seq.items.push(node);
        }
    }
    Ok(Node::Sequence(seq))
}
