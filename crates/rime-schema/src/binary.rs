//! The `tag:yaml.org,2002:binary` scalar tag.
//!
//! Byte scalars travel as base64 text. The codec is an injected
//! capability: without one, decoding degrades to a diagnostic plus
//! passthrough of the raw text, while encoding fails fatally since the
//! output would otherwise be silently wrong.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rime_format::{ByteCodec, StringifyContext, StringifyError, stringify_string};
use rime_tree::{Diagnostic, Native, Scalar, ScalarStyle, ScalarValue};

use crate::tag::{ScalarTag, TagDescriptor};

/// The standard base64 codec.
pub struct Base64Codec;

impl ByteCodec for Base64Codec {
    fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, String> {
        // Encoded scalars arrive wrapped to the line width.
        let compact: String = text.split_whitespace().collect();
        STANDARD.decode(compact.as_bytes()).map_err(|e| e.to_string())
    }
}

pub fn binary_tag() -> TagDescriptor {
    TagDescriptor::Scalar(ScalarTag {
        tag: "tag:yaml.org,2002:binary",
        default: false,
        format: None,
        identify: |value| matches!(value, Native::Bytes(_)),
        resolve: resolve_binary,
        create_node: None,
        stringify: Some(stringify_binary),
    })
}

fn resolve_binary(
    text: &str,
    codec: Option<&dyn ByteCodec>,
    on_error: &mut dyn FnMut(Diagnostic),
) -> ScalarValue {
    let Some(codec) = codec else {
        on_error(Diagnostic::new(
            "No byte codec available to read this binary scalar",
        ));
        return ScalarValue::String(text.to_string());
    };
    match codec.decode(text) {
        Ok(bytes) => ScalarValue::Bytes(bytes),
        Err(message) => {
            on_error(Diagnostic::new(format!(
                "Failed to decode binary scalar: {message}"
            )));
            ScalarValue::String(text.to_string())
        }
    }
}

fn stringify_binary(
    scalar: &Scalar,
    ctx: &StringifyContext<'_>,
    _on_comment: &mut dyn FnMut(),
    on_chomp_keep: &mut dyn FnMut(),
) -> Result<String, StringifyError> {
    let Some(bytes) = scalar.value.as_bytes() else {
        // Unresolved passthrough text renders as an ordinary string.
        return Ok(stringify_string(scalar, ctx, on_chomp_keep));
    };
    let codec = ctx.codec.ok_or(StringifyError::MissingByteCodec)?;
    let encoded = codec.encode(bytes);

    let style = scalar.style.unwrap_or(ScalarStyle::BlockLiteral);
    let width = ctx
        .options
        .line_width
        .saturating_sub(ctx.indent.len())
        .max(ctx.options.min_content_width);
    // A zero width disables wrapping, as it does for flow lines.
    let text = if style == ScalarStyle::QuoteDouble || width == 0 {
        encoded
    } else {
        // Base64 is ASCII, so byte slicing cannot split a character.
        let chunks: Vec<&str> = (0..encoded.len().div_ceil(width))
            .map(|i| &encoded[i * width..encoded.len().min((i + 1) * width)])
            .collect();
        let sep = if style == ScalarStyle::BlockLiteral { "\n" } else { " " };
        chunks.join(sep)
    };

    let wrapped = Scalar {
        props: scalar.props.clone(),
        value: ScalarValue::String(text),
        style: Some(style),
        chomp: scalar.chomp,
    };
    Ok(stringify_string(&wrapped, ctx, on_chomp_keep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rime_format::StringifyOptions;

    fn scalar_of(bytes: Vec<u8>) -> Scalar {
        let mut scalar = Scalar::new(bytes);
        scalar.props.tag = Some("tag:yaml.org,2002:binary".to_string());
        scalar
    }

    fn render(scalar: &Scalar, options: StringifyOptions) -> Result<String, StringifyError> {
        let codec = Base64Codec;
        let ctx = StringifyContext::new(options).with_codec(&codec);
        stringify_binary(scalar, &ctx, &mut || {}, &mut || {})
    }

    #[test]
    fn test_round_trip_wraps_lines() {
        let bytes: Vec<u8> = (0..100).collect();
        let scalar = scalar_of(bytes.clone());
        let text = render(&scalar, StringifyOptions::new().line_width(76)).unwrap();

        // 100 bytes encode to 136 base64 chars, wrapped at 76.
        let body: Vec<&str> = text.lines().skip(1).map(str::trim_start).collect();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].len(), 76);
        assert_eq!(body[1].len(), 60);

        let joined = body.join("\n");
        let TagDescriptor::Scalar(tag) = binary_tag() else {
            unreachable!()
        };
        let codec: &dyn ByteCodec = &Base64Codec;
        let mut errors = Vec::new();
        let value = (tag.resolve)(&joined, Some(codec), &mut |d| errors.push(d));
        assert!(errors.is_empty());
        assert_eq!(value, ScalarValue::Bytes(bytes));
    }

    #[test]
    fn test_quote_double_style_stays_unwrapped() {
        let mut scalar = scalar_of(vec![0u8; 90]);
        scalar.style = Some(ScalarStyle::QuoteDouble);
        let text = render(&scalar, StringifyOptions::new().line_width(40)).unwrap();
        assert!(text.starts_with('"'));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_folded_style_joins_with_spaces() {
        let mut scalar = scalar_of((0..60).collect());
        scalar.style = Some(ScalarStyle::BlockFolded);
        let text = render(&scalar, StringifyOptions::new().line_width(40)).unwrap();
        assert!(text.starts_with('>'));
        assert!(text.lines().nth(1).unwrap().trim_start().contains(' '));
    }

    #[test]
    fn test_minimum_content_width_applies_at_deep_indent() {
        let scalar = scalar_of((0..30).collect());
        let codec = Base64Codec;
        let mut ctx = StringifyContext::new(StringifyOptions::new().line_width(24))
            .with_codec(&codec);
        ctx.indent = " ".repeat(16);
        // Width would be 8 but the floor of 20 wins.
        let text = stringify_binary(&scalar, &ctx, &mut || {}, &mut || {}).unwrap();
        let first = text.lines().nth(1).unwrap().trim_start();
        assert_eq!(first.len(), 20);
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        let scalar = scalar_of((0..60).collect());
        let options = StringifyOptions::new().line_width(0).min_content_width(0);
        let text = render(&scalar, options).unwrap();
        // Header line plus one unwrapped content line.
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.lines().nth(1).unwrap().trim_start().len(), 80);
    }

    #[test]
    fn test_missing_codec_fails_encoding() {
        let scalar = scalar_of(vec![1, 2, 3]);
        let ctx = StringifyContext::new(StringifyOptions::default());
        let err = stringify_binary(&scalar, &ctx, &mut || {}, &mut || {}).unwrap_err();
        assert_eq!(err, StringifyError::MissingByteCodec);
    }

    #[test]
    fn test_missing_codec_degrades_decoding() {
        let mut errors = Vec::new();
        let value = resolve_binary("aGk=", None, &mut |d| errors.push(d));
        assert_eq!(value, ScalarValue::String("aGk=".to_string()));
        assert_eq!(errors.len(), 1);
    }
}
