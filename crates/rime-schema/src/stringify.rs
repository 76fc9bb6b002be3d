//! The generic node-to-text dispatcher.
//!
//! [`NodeStringifier`] renders any node: scalars through their tag's
//! stringifier (or the generic one), collections through the layout
//! engine, aliases and pairs directly. The layout engine calls back
//! into it for every collection item.

use rime_format::{
    ItemRef, StringifyContext, StringifyError, StringifyItem, indent_comment, line_comment,
    stringify_collection, stringify_string,
};
use rime_tree::{Node, Pair, Props, Scalar};

use crate::schema::Schema;
use crate::tag::{ScalarStringifyFn, TAG_NAMESPACE, TagDescriptor};

pub struct NodeStringifier<'s> {
    schema: &'s Schema,
}

impl<'s> NodeStringifier<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        NodeStringifier { schema }
    }

    /// Render a node as a complete fragment, including its own
    /// surrounding comments.
    pub fn stringify(
        &self,
        node: &Node,
        ctx: &StringifyContext<'_>,
    ) -> Result<String, StringifyError> {
        let comment_string = ctx.options.comment_string;
        let mut out = String::new();
        if let Some(before) = &node.props().comment_before {
            out.push_str(&indent_comment(&comment_string(before), &ctx.indent));
            out.push('\n');
        }
        let mut consumed = false;
        let body = self.node_text(node, ctx, &mut || consumed = true, &mut || {})?;
        out.push_str(&body);
        if !consumed {
            if let Some(comment) = &node.props().comment {
                out.push_str(&line_comment(&out, &ctx.indent, &comment_string(comment)));
            }
        }
        Ok(out)
    }

    /// Render a node with its anchor and tag prefix.
    fn node_text(
        &self,
        node: &Node,
        ctx: &StringifyContext<'_>,
        on_comment: &mut dyn FnMut(),
        on_chomp_keep: &mut dyn FnMut(),
    ) -> Result<String, StringifyError> {
        let body = self.body_text(node, ctx, on_comment, on_chomp_keep)?;
        if matches!(node, Node::Pair(_) | Node::Alias(_)) {
            return Ok(body);
        }
        let props = props_prefix(node.props());
        if props.is_empty() {
            return Ok(body);
        }
        let flow = ctx.in_flow.unwrap_or_else(|| node.is_flow());
        if node.is_collection() && !flow && !collection_is_empty(node) {
            // Block collections start on the line below their anchor
            // and tag.
            Ok(format!("{props}\n{}{body}", ctx.indent))
        } else {
            Ok(format!("{props} {body}"))
        }
    }

    /// Render a node without its prefix; pairs place the prefix of
    /// their value themselves.
    fn body_text(
        &self,
        node: &Node,
        ctx: &StringifyContext<'_>,
        on_comment: &mut dyn FnMut(),
        on_chomp_keep: &mut dyn FnMut(),
    ) -> Result<String, StringifyError> {
        match node {
            Node::Alias(alias) => Ok(format!("*{}", alias.source)),
            Node::Pair(pair) => self.pair_text(pair, ctx, on_comment, on_chomp_keep),
            Node::Scalar(scalar) => match self.scalar_tag_stringify(scalar) {
                Some(stringify) => stringify(scalar, ctx, on_comment, on_chomp_keep),
                None => Ok(stringify_string(scalar, ctx, on_chomp_keep)),
            },
            Node::Map(_) | Node::Sequence(_) => {
                stringify_collection(node, ctx, self, on_comment, on_chomp_keep)
            }
        }
    }

    fn pair_text(
        &self,
        pair: &Pair,
        ctx: &StringifyContext<'_>,
        on_comment: &mut dyn FnMut(),
        on_chomp_keep: &mut dyn FnMut(),
    ) -> Result<String, StringifyError> {
        let comment_string = ctx.options.comment_string;
        let key_text = self.node_text(&pair.key, ctx, &mut || {}, &mut || {})?;
        let mut out = format!("{key_text}:");

        let key_comment = pair.key.props().comment.as_deref();
        let Some(value) = &pair.value else {
            if let Some(comment) = key_comment {
                let suffix = line_comment(&out, &ctx.indent, &comment_string(comment));
                out.push_str(&suffix);
                on_comment();
            }
            return Ok(out);
        };

        // A key comment sits after the colon and pushes the value to
        // its own line.
        if let Some(comment) = key_comment {
            out.push(' ');
            out.push_str(&comment_string(comment));
        }

        let child_indent = format!("{}{}", ctx.indent, ctx.indent_step());
        let child_ctx = ctx.child(child_indent.clone(), None);
        let props = value.props();
        if let Some(before) = &props.comment_before {
            out.push('\n');
            out.push_str(&indent_comment(&comment_string(before), &child_indent));
        }

        let value_props = match value {
            Node::Pair(_) | Node::Alias(_) => String::new(),
            _ => props_prefix(props),
        };
        let mut consumed = false;
        let body = self.body_text(value, &child_ctx, &mut || consumed = true, on_chomp_keep)?;
        let in_flow = ctx.in_flow.unwrap_or(false);
        let block_value =
            value.is_collection() && !value.is_flow() && !in_flow && !collection_is_empty(value);

        if key_comment.is_some() || props.comment_before.is_some() {
            // A comment already forced the value off the key line.
            out.push('\n');
            out.push_str(&child_indent);
            if !value_props.is_empty() {
                out.push_str(&value_props);
                if block_value {
                    out.push('\n');
                    out.push_str(&child_indent);
                } else {
                    out.push(' ');
                }
            }
            out.push_str(&body);
        } else if block_value {
            // The anchor and tag stay on the key line; the collection
            // body starts below.
            if !value_props.is_empty() {
                out.push(' ');
                out.push_str(&value_props);
            }
            out.push('\n');
            out.push_str(&child_indent);
            out.push_str(&body);
        } else {
            out.push(' ');
            if !value_props.is_empty() {
                out.push_str(&value_props);
                out.push(' ');
            }
            out.push_str(&body);
        }

        if !consumed {
            if let Some(comment) = &props.comment {
                let suffix = line_comment(&out, &child_indent, &comment_string(comment));
                out.push_str(&suffix);
                on_comment();
            }
        }
        Ok(out)
    }

    fn scalar_tag_stringify(&self, scalar: &Scalar) -> Option<ScalarStringifyFn> {
        let tag = scalar.props.tag.as_deref()?;
        self.schema.tags().iter().find_map(|t| match t {
            TagDescriptor::Scalar(s) if s.tag == tag => s.stringify,
            _ => None,
        })
    }
}

impl StringifyItem for NodeStringifier<'_> {
    fn stringify_item(
        &self,
        item: ItemRef<'_>,
        ctx: &StringifyContext<'_>,
        on_comment: &mut dyn FnMut(),
        on_chomp_keep: &mut dyn FnMut(),
    ) -> Result<String, StringifyError> {
        match item {
            ItemRef::Node(node) => self.node_text(node, ctx, on_comment, on_chomp_keep),
            ItemRef::Pair(pair) => self.pair_text(pair, ctx, on_comment, on_chomp_keep),
        }
    }
}

fn collection_is_empty(node: &Node) -> bool {
    match node {
        Node::Map(map) => map.items.is_empty(),
        Node::Sequence(seq) => seq.items.is_empty(),
        _ => false,
    }
}

/// The anchor and tag prefix of a node, without a trailing separator.
fn props_prefix(props: &Props) -> String {
    let mut out = String::new();
    if let Some(anchor) = &props.anchor {
        out.push('&');
        out.push_str(anchor);
    }
    if let Some(tag) = &props.tag {
        if !out.is_empty() {
            out.push(' ');
        }
        if let Some(short) = tag.strip_prefix(TAG_NAMESPACE) {
            out.push_str("!!");
            out.push_str(short);
        } else if tag.starts_with('!') {
            out.push_str(tag);
        } else {
            out.push_str("!<");
            out.push_str(tag);
            out.push('>');
        }
    }
    out
}
