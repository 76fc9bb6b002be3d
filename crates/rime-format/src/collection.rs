//! Block and flow layout for collections.
//!
//! The collection stringifier owns layout only: item prefixes, indent,
//! comment re-attachment, blank-line spacing and the block/flow choice.
//! Rendering each item is delegated back to a [`StringifyItem`]
//! dispatcher, which keeps this crate independent of tag resolution.

use rime_tree::{Node, Pair};
use tracing::trace;

use crate::StringifyError;
use crate::comment::{indent_comment, line_comment};
use crate::context::StringifyContext;

/// A borrowed collection item handed to the dispatcher.
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Node(&'a Node),
    Pair(&'a Pair),
}

impl<'a> ItemRef<'a> {
    /// The pair behind this item, if it is one. Sequence items produced
    /// by the pairs tag are pairs wrapped in nodes; they count too.
    pub fn as_pair(self) -> Option<&'a Pair> {
        match self {
            ItemRef::Pair(p) => Some(p),
            ItemRef::Node(Node::Pair(p)) => Some(p),
            ItemRef::Node(_) => None,
        }
    }
}

/// Renders a single collection item.
///
/// `on_comment` signals that the item consumed its own trailing comment;
/// `on_chomp_keep` signals that the item ended with a kept trailing
/// blank line, so the collection skips the next blank separator.
pub trait StringifyItem {
    fn stringify_item(
        &self,
        item: ItemRef<'_>,
        ctx: &StringifyContext<'_>,
        on_comment: &mut dyn FnMut(),
        on_chomp_keep: &mut dyn FnMut(),
    ) -> Result<String, StringifyError>;
}

/// Layout characters for one collection kind.
#[derive(Debug, Clone, Copy)]
pub struct CollectionStyle {
    /// Prefix before each block item (`"- "` for sequences).
    pub block_item_prefix: &'static str,
    /// Opening flow bracket.
    pub flow_start: char,
    /// Closing flow bracket.
    pub flow_end: char,
    /// Extra indent appended to the current indent for items. Covers
    /// the width of the block item prefix.
    pub item_indent: &'static str,
}

impl CollectionStyle {
    pub fn sequence() -> Self {
        CollectionStyle {
            block_item_prefix: "- ",
            flow_start: '[',
            flow_end: ']',
            item_indent: "  ",
        }
    }

    pub fn map() -> Self {
        CollectionStyle {
            block_item_prefix: "",
            flow_start: '{',
            flow_end: '}',
            item_indent: "",
        }
    }
}

/// Stringify a map or sequence node.
///
/// Flow is chosen when the surrounding context forces it or the node's
/// own flow flag is set. An empty collection always renders as its
/// bracket pair, even in block context.
pub fn stringify_collection(
    node: &Node,
    ctx: &StringifyContext<'_>,
    dispatcher: &dyn StringifyItem,
    on_comment: &mut dyn FnMut(),
    on_chomp_keep: &mut dyn FnMut(),
) -> Result<String, StringifyError> {
    let (style, items): (CollectionStyle, Vec<ItemRef<'_>>) = match node {
        Node::Map(map) => (
            CollectionStyle::map(),
            map.items.iter().map(ItemRef::Pair).collect(),
        ),
        Node::Sequence(seq) => (
            CollectionStyle::sequence(),
            seq.items.iter().map(ItemRef::Node).collect(),
        ),
        _ => return Err(StringifyError::NotACollection),
    };

    let flow = ctx.in_flow.unwrap_or_else(|| node.is_flow());
    trace!(flow, items = items.len(), "stringify collection");
    if flow {
        stringify_flow(&items, ctx, &style, dispatcher)
    } else {
        stringify_block(node, &items, ctx, &style, dispatcher, on_comment, on_chomp_keep)
    }
}

fn stringify_block(
    node: &Node,
    items: &[ItemRef<'_>],
    ctx: &StringifyContext<'_>,
    style: &CollectionStyle,
    dispatcher: &dyn StringifyItem,
    on_comment: &mut dyn FnMut(),
    on_chomp_keep: &mut dyn FnMut(),
) -> Result<String, StringifyError> {
    let comment_string = ctx.options.comment_string;
    let item_indent = format!("{}{}", ctx.indent, style.item_indent);
    let item_ctx = ctx.child(item_indent.clone(), None);

    let mut chomp_keep = false;
    let mut lines: Vec<String> = Vec::with_capacity(items.len());
    for &item in items {
        let mut comment: Option<&str> = None;
        match item.as_pair() {
            Some(pair) => {
                let kp = pair.key.props();
                if !chomp_keep && kp.space_before {
                    lines.push(String::new());
                }
                add_comment_before(ctx, &mut lines, kp.comment_before.as_deref(), chomp_keep);
            }
            None => {
                let ItemRef::Node(n) = item else { unreachable!() };
                let props = n.props();
                if !chomp_keep && props.space_before {
                    lines.push(String::new());
                }
                add_comment_before(ctx, &mut lines, props.comment_before.as_deref(), chomp_keep);
                comment = props.comment.as_deref();
            }
        }
        chomp_keep = false;
        let mut consumed = false;
        let mut kept = false;
        let mut text =
            dispatcher.stringify_item(item, &item_ctx, &mut || consumed = true, &mut || {
                kept = true
            })?;
        if consumed {
            comment = None;
        }
        chomp_keep = kept;
        if let Some(c) = comment {
            let suffix = line_comment(&text, &item_indent, &comment_string(c));
            text.push_str(&suffix);
            // The comment ends the line, so kept blank lines are moot.
            chomp_keep = false;
        }
        lines.push(format!("{}{}", style.block_item_prefix, text));
    }

    // An empty collection still carries its trailing comment below.
    let mut out = match lines.split_first() {
        None => format!("{}{}", style.flow_start, style.flow_end),
        Some((first, rest)) => {
            let mut out = first.clone();
            for line in rest {
                if line.is_empty() {
                    out.push('\n');
                } else {
                    out.push('\n');
                    out.push_str(&ctx.indent);
                    out.push_str(line);
                }
            }
            out
        }
    };

    if let Some(c) = &node.props().comment {
        out.push('\n');
        out.push_str(&indent_comment(&comment_string(c), &ctx.indent));
        on_comment();
    } else if chomp_keep {
        on_chomp_keep();
    }
    Ok(out)
}

fn stringify_flow(
    items: &[ItemRef<'_>],
    ctx: &StringifyContext<'_>,
    style: &CollectionStyle,
    dispatcher: &dyn StringifyItem,
) -> Result<String, StringifyError> {
    let comment_string = ctx.options.comment_string;
    let item_indent = format!("{}{}{}", ctx.indent, style.item_indent, ctx.indent_step());
    let item_ctx = ctx.child(item_indent.clone(), Some(true));

    let mut req_newline = false;
    let mut lines_at_value = 0;
    let mut lines: Vec<String> = Vec::with_capacity(items.len());
    for (i, &item) in items.iter().enumerate() {
        let mut comment: Option<&str> = None;
        match item.as_pair() {
            Some(pair) => {
                let kp = pair.key.props();
                if kp.space_before {
                    lines.push(String::new());
                }
                add_comment_before(ctx, &mut lines, kp.comment_before.as_deref(), false);
                if kp.comment.is_some() {
                    req_newline = true;
                }
                match &pair.value {
                    Some(value) => {
                        let vp = value.props();
                        comment = vp.comment.as_deref();
                        if vp.comment_before.is_some() {
                            req_newline = true;
                        }
                    }
                    // A pair without a value shows the key's comment.
                    None => comment = kp.comment.as_deref(),
                }
            }
            None => {
                let ItemRef::Node(n) = item else { unreachable!() };
                let props = n.props();
                if props.space_before {
                    lines.push(String::new());
                }
                add_comment_before(ctx, &mut lines, props.comment_before.as_deref(), false);
                comment = props.comment.as_deref();
            }
        }
        if comment.is_some() {
            req_newline = true;
        }
        let mut consumed = false;
        let mut text =
            dispatcher.stringify_item(item, &item_ctx, &mut || consumed = true, &mut || {})?;
        if consumed {
            comment = None;
        }
        if i < items.len() - 1 {
            text.push(',');
        }
        if let Some(c) = comment {
            let suffix = line_comment(&text, &item_indent, &comment_string(c));
            text.push_str(&suffix);
        }
        if !req_newline && (lines.len() > lines_at_value || text.contains('\n')) {
            req_newline = true;
        }
        lines.push(text);
        lines_at_value = lines.len();
    }

    if lines.is_empty() {
        return Ok(format!("{}{}", style.flow_start, style.flow_end));
    }
    if !req_newline && ctx.options.line_width > 0 {
        let len = lines.iter().map(|line| line.len() + 2).sum::<usize>() + 2;
        req_newline = len > ctx.options.line_width;
    }
    if req_newline {
        let mut out = String::new();
        out.push(style.flow_start);
        for line in &lines {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push('\n');
                out.push_str(ctx.indent_step());
                out.push_str(&ctx.indent);
                out.push_str(line);
            }
        }
        out.push('\n');
        out.push_str(&ctx.indent);
        out.push(style.flow_end);
        Ok(out)
    } else {
        let pad = ctx.flow_padding();
        Ok(format!(
            "{}{pad}{}{pad}{}",
            style.flow_start,
            lines.join(" "),
            style.flow_end
        ))
    }
}

/// Queue an item's comment-before lines ahead of the item itself.
///
/// After a kept trailing blank line the comment's own leading blank
/// lines are dropped so the separation is not doubled.
fn add_comment_before(
    ctx: &StringifyContext<'_>,
    lines: &mut Vec<String>,
    comment: Option<&str>,
    chomp_keep: bool,
) {
    let Some(mut comment) = comment else { return };
    if chomp_keep {
        comment = comment.trim_start_matches('\n');
    }
    if comment.is_empty() {
        return;
    }
    let text = indent_comment(&(ctx.options.comment_string)(comment), &ctx.indent);
    // The join re-indents the first line.
    lines.push(text.trim_start().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StringifyOptions;
    use crate::scalar::stringify_string;
    use rime_tree::{Map, ScalarStyle, Sequence};

    struct TestDispatcher;

    impl TestDispatcher {
        fn node(
            &self,
            node: &Node,
            ctx: &StringifyContext<'_>,
            on_comment: &mut dyn FnMut(),
            on_chomp_keep: &mut dyn FnMut(),
        ) -> Result<String, StringifyError> {
            match node {
                Node::Scalar(s) => Ok(stringify_string(s, ctx, on_chomp_keep)),
                Node::Alias(a) => Ok(format!("*{}", a.source)),
                Node::Map(_) | Node::Sequence(_) => {
                    stringify_collection(node, ctx, self, on_comment, on_chomp_keep)
                }
                Node::Pair(p) => self.pair(p, ctx, on_comment, on_chomp_keep),
            }
        }

        fn pair(
            &self,
            pair: &Pair,
            ctx: &StringifyContext<'_>,
            on_comment: &mut dyn FnMut(),
            on_chomp_keep: &mut dyn FnMut(),
        ) -> Result<String, StringifyError> {
            let key = self.node(&pair.key, ctx, &mut || {}, &mut || {})?;
            match &pair.value {
                None => Ok(format!("{key}:")),
                Some(value) => {
                    let child = ctx.child(
                        format!("{}{}", ctx.indent, ctx.indent_step()),
                        None,
                    );
                    let text = self.node(value, &child, on_comment, on_chomp_keep)?;
                    Ok(format!("{key}: {text}"))
                }
            }
        }
    }

    impl StringifyItem for TestDispatcher {
        fn stringify_item(
            &self,
            item: ItemRef<'_>,
            ctx: &StringifyContext<'_>,
            on_comment: &mut dyn FnMut(),
            on_chomp_keep: &mut dyn FnMut(),
        ) -> Result<String, StringifyError> {
            match item {
                ItemRef::Node(n) => self.node(n, ctx, on_comment, on_chomp_keep),
                ItemRef::Pair(p) => self.pair(p, ctx, on_comment, on_chomp_keep),
            }
        }
    }

    fn ctx<'a>() -> StringifyContext<'a> {
        StringifyContext::new(StringifyOptions::default())
    }

    fn render(node: &Node) -> String {
        stringify_collection(node, &ctx(), &TestDispatcher, &mut || {}, &mut || {}).unwrap()
    }

    fn seq_of(items: Vec<Node>) -> Node {
        Node::Sequence(Sequence {
            items,
            ..Sequence::default()
        })
    }

    fn map_of(pairs: Vec<(&str, i64)>) -> Node {
        Node::Map(Map {
            items: pairs
                .into_iter()
                .map(|(k, v)| Pair::new(Node::scalar(k), Some(Node::scalar(v))))
                .collect(),
            ..Map::default()
        })
    }

    #[test]
    fn test_empty_collections_use_brackets() {
        assert_eq!(render(&seq_of(vec![])), "[]");
        assert_eq!(render(&map_of(vec![])), "{}");
        let mut flow = seq_of(vec![]);
        flow.as_sequence_mut().unwrap().flow = true;
        assert_eq!(render(&flow), "[]");
    }

    #[test]
    fn test_block_sequence() {
        let node = seq_of(vec![Node::scalar(1), Node::scalar(2), Node::scalar(3)]);
        assert_eq!(render(&node), "- 1\n- 2\n- 3");
    }

    #[test]
    fn test_block_map() {
        let node = map_of(vec![("a", 1), ("b", 2)]);
        assert_eq!(render(&node), "a: 1\nb: 2");
    }

    #[test]
    fn test_comment_before_item() {
        let mut node = map_of(vec![("a", 1), ("b", 2)]);
        node.as_map_mut().unwrap().items[1].key.props_mut().comment_before =
            Some(" note".to_string());
        assert_eq!(render(&node), "a: 1\n# note\nb: 2");
    }

    #[test]
    fn test_space_before_item() {
        let mut node = map_of(vec![("a", 1), ("b", 2)]);
        node.as_map_mut().unwrap().items[1].key.props_mut().space_before = true;
        assert_eq!(render(&node), "a: 1\n\nb: 2");
    }

    #[test]
    fn test_item_trailing_comment() {
        let mut node = seq_of(vec![Node::scalar(1), Node::scalar(2)]);
        node.as_sequence_mut().unwrap().items[0].props_mut().comment = Some(" one".to_string());
        assert_eq!(render(&node), "- 1 # one\n- 2");
    }

    #[test]
    fn test_collection_comment_fires_callback() {
        let mut node = map_of(vec![("a", 1)]);
        node.props_mut().comment = Some(" tail".to_string());
        let mut commented = false;
        let text = stringify_collection(&node, &ctx(), &TestDispatcher, &mut || commented = true, &mut || {})
            .unwrap();
        assert_eq!(text, "a: 1\n# tail");
        assert!(commented);
    }

    #[test]
    fn test_empty_collection_keeps_trailing_comment() {
        let mut node = map_of(vec![]);
        node.props_mut().comment = Some(" tail".to_string());
        let mut commented = false;
        let text =
            stringify_collection(&node, &ctx(), &TestDispatcher, &mut || commented = true, &mut || {})
                .unwrap();
        assert_eq!(text, "{}\n# tail");
        assert!(commented);
    }

    #[test]
    fn test_flow_sequence_single_line() {
        let mut node = seq_of(vec![Node::scalar(1), Node::scalar(2), Node::scalar(3)]);
        node.as_sequence_mut().unwrap().flow = true;
        assert_eq!(render(&node), "[ 1, 2, 3 ]");
    }

    #[test]
    fn test_flow_map_single_line() {
        let mut node = map_of(vec![("a", 1), ("b", 2)]);
        node.as_map_mut().unwrap().flow = true;
        assert_eq!(render(&node), "{ a: 1, b: 2 }");
    }

    #[test]
    fn test_flow_padding_disabled() {
        let mut node = seq_of(vec![Node::scalar(1), Node::scalar(2)]);
        node.as_sequence_mut().unwrap().flow = true;
        let ctx = StringifyContext::new(StringifyOptions::new().without_flow_padding());
        let text =
            stringify_collection(&node, &ctx, &TestDispatcher, &mut || {}, &mut || {}).unwrap();
        assert_eq!(text, "[1, 2]");
    }

    #[test]
    fn test_flow_width_boundary() {
        let items = vec![
            Node::scalar("aaaa"),
            Node::scalar("bbbb"),
            Node::scalar("cccc"),
        ];
        let mut node = seq_of(items);
        node.as_sequence_mut().unwrap().flow = true;

        // Estimated width is sum(len + 2) + 2 = 20. At the limit the
        // line stays intact; one under it wraps.
        let at = StringifyContext::new(StringifyOptions::new().line_width(20));
        let text =
            stringify_collection(&node, &at, &TestDispatcher, &mut || {}, &mut || {}).unwrap();
        assert_eq!(text, "[ aaaa, bbbb, cccc ]");

        let over = StringifyContext::new(StringifyOptions::new().line_width(19));
        let text =
            stringify_collection(&node, &over, &TestDispatcher, &mut || {}, &mut || {}).unwrap();
        assert_eq!(text, "[\n  aaaa,\n  bbbb,\n  cccc\n]");
    }

    #[test]
    fn test_flow_width_zero_disables_wrapping() {
        let mut node = seq_of(vec![
            Node::scalar("a".repeat(60)),
            Node::scalar("b".repeat(60)),
        ]);
        node.as_sequence_mut().unwrap().flow = true;
        let ctx = StringifyContext::new(StringifyOptions::new().line_width(0));
        let text =
            stringify_collection(&node, &ctx, &TestDispatcher, &mut || {}, &mut || {}).unwrap();
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_flow_item_comment_forces_newlines() {
        let mut node = seq_of(vec![Node::scalar(1), Node::scalar(2)]);
        {
            let seq = node.as_sequence_mut().unwrap();
            seq.flow = true;
            seq.items[0].props_mut().comment = Some(" one".to_string());
        }
        assert_eq!(render(&node), "[\n  1, # one\n  2\n]");
    }

    #[test]
    fn test_in_flow_context_forces_flow() {
        // Block collection nested inside a flow context renders flow.
        let node = seq_of(vec![Node::scalar(1), Node::scalar(2)]);
        let mut flow_ctx = ctx();
        flow_ctx.in_flow = Some(true);
        let text =
            stringify_collection(&node, &flow_ctx, &TestDispatcher, &mut || {}, &mut || {})
                .unwrap();
        assert_eq!(text, "[ 1, 2 ]");
    }

    #[test]
    fn test_chomp_keep_suppresses_blank_line() {
        let mut block = Node::scalar("x\n\n");
        if let Node::Scalar(s) = &mut block {
            s.style = Some(ScalarStyle::BlockLiteral);
        }
        let mut second = Node::scalar(2);
        second.props_mut().space_before = true;
        let node = seq_of(vec![block, second]);
        assert_eq!(render(&node), "- |+\n    x\n\n- 2");
    }

    #[test]
    fn test_nested_block_collections() {
        let inner = seq_of(vec![Node::scalar(1), Node::scalar(2)]);
        let node = Node::Map(Map {
            items: vec![Pair::new(Node::scalar("k"), Some(inner))],
            ..Map::default()
        });
        // The test dispatcher inlines collection values after the key.
        assert_eq!(render(&node), "k: - 1\n  - 2");
    }
}
