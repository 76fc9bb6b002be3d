//! End-to-end conversion and stringification tests for rime-schema.

use rime_format::{StringifyContext, StringifyOptions};
use rime_schema::{
    Base64Codec, CreateNodeContext, NodeStringifier, Schema, binary_tag, create_node, pairs_tag,
};
use rime_tree::{Native, Node};

fn schema() -> Schema {
    Schema::core().with_tag(binary_tag()).with_tag(pairs_tag())
}

/// Helper to convert a native value with predictable anchor names.
fn convert(value: &Native, tag: Option<&str>, schema: &Schema) -> Node {
    let mut n = 0;
    let mut on_anchor = |_: &Native| {
        n += 1;
        format!("a{n}")
    };
    let mut ctx = CreateNodeContext::new(schema, &mut on_anchor);
    create_node(value, tag, &mut ctx).expect("conversion should succeed")
}

fn render(node: &Node, schema: &Schema, options: StringifyOptions) -> String {
    let codec = Base64Codec;
    let ctx = StringifyContext::new(options).with_codec(&codec);
    NodeStringifier::new(schema)
        .stringify(node, &ctx)
        .expect("stringification should succeed")
}

#[test]
fn test_block_document() {
    let schema = schema();
    let value = Native::map(vec![
        (Native::from("name"), Native::from("rime")),
        (
            Native::from("tags"),
            Native::seq(vec![Native::from("document"), Native::from("library")]),
        ),
        (
            Native::from("limits"),
            Native::map(vec![
                (Native::from("depth"), Native::from(8)),
                (Native::from("width"), Native::from(80)),
            ]),
        ),
    ]);
    let node = convert(&value, None, &schema);
    assert_eq!(
        render(&node, &schema, StringifyOptions::default()),
        "name: rime\n\
         tags:\n  - document\n  - library\n\
         limits:\n  depth: 8\n  width: 80"
    );
}

#[test]
fn test_flow_document() {
    let schema = schema();
    let value = Native::map(vec![
        (Native::from("a"), Native::from(1)),
        (Native::from("b"), Native::seq(vec![Native::from(2), Native::from(3)])),
    ]);
    let mut node = convert(&value, None, &schema);
    if let Node::Map(map) = &mut node {
        map.flow = true;
    }
    // Flow context propagates into the nested sequence.
    assert_eq!(
        render(&node, &schema, StringifyOptions::default()),
        "{ a: 1, b: [ 2, 3 ] }"
    );
}

#[test]
fn test_shared_structure_document() {
    let schema = schema();
    let shared = Native::map(vec![(Native::from("port"), Native::from(80))]);
    let value = Native::map(vec![
        (Native::from("primary"), shared.clone()),
        (Native::from("fallback"), shared),
    ]);
    let node = convert(&value, None, &schema);
    assert_eq!(
        render(&node, &schema, StringifyOptions::default()),
        "primary: &a1\n  port: 80\nfallback: *a1"
    );
}

#[test]
fn test_binary_and_pairs_together() {
    let schema = schema();
    let pairs = Native::seq(vec![
        Native::seq(vec![Native::from("a"), Native::from(1)]),
        Native::seq(vec![Native::from("a"), Native::from(2)]),
    ]);
    let node = convert(&pairs, Some("!!pairs"), &schema);
    assert_eq!(
        render(&node, &schema, StringifyOptions::default()),
        "!!pairs\n- a: 1\n- a: 2"
    );

    let node = convert(&Native::from(b"rime".to_vec()), None, &schema);
    assert_eq!(
        render(&node, &schema, StringifyOptions::default()),
        "!!binary |-\n  cmltZQ=="
    );
}

#[test]
fn test_flow_wrap_at_line_width() {
    let schema = schema();
    let value = Native::seq(vec![
        Native::from("aaaa"),
        Native::from("bbbb"),
        Native::from("cccc"),
    ]);
    let mut node = convert(&value, None, &schema);
    if let Node::Sequence(seq) = &mut node {
        seq.flow = true;
    }
    assert_eq!(
        render(&node, &schema, StringifyOptions::new().line_width(20)),
        "[ aaaa, bbbb, cccc ]"
    );
    assert_eq!(
        render(&node, &schema, StringifyOptions::new().line_width(19)),
        "[\n  aaaa,\n  bbbb,\n  cccc\n]"
    );
}

#[test]
fn test_comments_survive_rendering() {
    let schema = schema();
    let value = Native::map(vec![
        (Native::from("a"), Native::from(1)),
        (Native::from("b"), Native::from(2)),
    ]);
    let mut node = convert(&value, None, &schema);
    if let Node::Map(map) = &mut node {
        map.items[1].key.props_mut().comment_before = Some(" section two".to_string());
        map.items[1].key.props_mut().space_before = true;
    }
    assert_eq!(
        render(&node, &schema, StringifyOptions::default()),
        "a: 1\n\n# section two\nb: 2"
    );
}
