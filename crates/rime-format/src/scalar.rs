//! Scalar stringification.

use rime_tree::{Chomp, Scalar, ScalarStyle, ScalarValue};

use crate::context::StringifyContext;

/// The bare textual form of a scalar value, before quoting decisions.
pub fn scalar_text(value: &ScalarValue) -> String {
    match value {
        ScalarValue::Null => "null".to_string(),
        ScalarValue::Bool(true) => "true".to_string(),
        ScalarValue::Bool(false) => "false".to_string(),
        ScalarValue::Int(v) => v.to_string(),
        ScalarValue::Float(v) => {
            if v.is_nan() {
                ".nan".to_string()
            } else if v.is_infinite() {
                if *v < 0.0 { "-.inf" } else { ".inf" }.to_string()
            } else if v.fract() == 0.0 {
                format!("{v:.1}")
            } else {
                v.to_string()
            }
        }
        ScalarValue::String(s) => s.clone(),
        // Byte scalars are routed through the binary tag by the
        // dispatcher; lossy text is a last-resort fallback.
        ScalarValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

/// Stringify a scalar node, honoring its requested style.
///
/// Block styles fall back to double quoting inside flow collections and
/// for empty values. `on_chomp_keep` fires when a block scalar keeps
/// trailing blank lines, so the enclosing collection can avoid doubling
/// them.
pub fn stringify_string(
    scalar: &Scalar,
    ctx: &StringifyContext<'_>,
    on_chomp_keep: &mut dyn FnMut(),
) -> String {
    let in_flow = ctx.in_flow.unwrap_or(false);
    let text = scalar_text(&scalar.value);
    match scalar.style {
        Some(ScalarStyle::QuoteDouble) => quote_double(&text),
        Some(ScalarStyle::BlockLiteral | ScalarStyle::BlockFolded) if in_flow || text.is_empty() => {
            quote_double(&text)
        }
        Some(style @ (ScalarStyle::BlockLiteral | ScalarStyle::BlockFolded)) => {
            block_scalar(style, &text, scalar.chomp, ctx, on_chomp_keep)
        }
        Some(ScalarStyle::Plain) | None => {
            let needs_quote = match &scalar.value {
                ScalarValue::String(s) => !plain_safe(s, in_flow) || ambiguous_plain(s),
                _ => false,
            };
            if needs_quote { quote_double(&text) } else { text }
        }
    }
}

/// Whether a string survives plain (unquoted) rendering.
fn plain_safe(s: &str, in_flow: bool) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if s.contains('\n') || s.starts_with(' ') || s.ends_with(' ') {
        return false;
    }
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        return false;
    }
    if s.contains(": ") || s.ends_with(':') || s.contains(" #") {
        return false;
    }
    if in_flow
        && s.chars()
            .any(|c| matches!(c, ',' | '[' | ']' | '{' | '}'))
    {
        return false;
    }
    true
}

/// Whether a plain rendering would re-resolve to a different value.
fn ambiguous_plain(s: &str) -> bool {
    matches!(
        s,
        "null" | "Null" | "NULL" | "~" | "true" | "True" | "TRUE" | "false" | "False" | "FALSE"
    ) || s.parse::<f64>().is_ok()
}

/// Double-quoted rendering with escapes.
fn quote_double(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if (c as u32) < 0x20 => {
                let code = c as u32;
                out.push_str(&format!("\\x{code:02x}"));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Block literal/folded rendering.
fn block_scalar(
    style: ScalarStyle,
    text: &str,
    chomp: Chomp,
    ctx: &StringifyContext<'_>,
    on_chomp_keep: &mut dyn FnMut(),
) -> String {
    let header = if style == ScalarStyle::BlockLiteral { '|' } else { '>' };
    let mut out = String::new();
    out.push(header);

    if !text.ends_with('\n') {
        out.push('-');
    } else if text.ends_with("\n\n") || chomp == Chomp::Keep {
        out.push('+');
        on_chomp_keep();
    }

    let body = text.strip_suffix('\n').unwrap_or(text);
    let content_indent = format!("{}{}", ctx.indent, ctx.indent_step());
    for line in body.split('\n') {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&content_indent);
            out.push_str(line);
        }
    }
    out
}
