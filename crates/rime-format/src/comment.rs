//! Comment text helpers.
//!
//! Comment bodies are stored without their `#` markers; these helpers
//! produce the textual form and re-indent multi-line comments so each
//! line lands under the right column.

/// Convert a raw comment body into its textual form.
///
/// Each non-empty line gets a `#` marker; a line holding a single space
/// collapses to a bare `#`; empty lines stay empty.
pub fn stringify_comment(comment: &str) -> String {
    let mut out = String::with_capacity(comment.len() + 8);
    for (i, line) in comment.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.is_empty() {
            continue;
        }
        out.push('#');
        if line != " " {
            out.push_str(line);
        }
    }
    out
}

/// Indent every content line of an already-stringified comment.
///
/// Lines consisting only of spaces are left alone; a comment that is
/// nothing but newlines loses its first one.
pub fn indent_comment(comment: &str, indent: &str) -> String {
    if !comment.is_empty() && comment.chars().all(|c| c == '\n') {
        return comment[1..].to_string();
    }
    if indent.is_empty() {
        return comment.to_string();
    }
    comment
        .split('\n')
        .map(|line| {
            if line.chars().all(|c| c == ' ') {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The text to append after `text` to attach an end-of-line comment.
///
/// A comment after text that already ends in a newline, or a multi-line
/// comment, moves to its own indented line(s); otherwise it follows on
/// the same line separated by a single space.
pub fn line_comment(text: &str, indent: &str, comment: &str) -> String {
    if text.ends_with('\n') {
        indent_comment(comment, indent)
    } else if comment.contains('\n') {
        format!("\n{}", indent_comment(comment, indent))
    } else {
        let sep = if text.ends_with(' ') { "" } else { " " };
        format!("{sep}{comment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_comment() {
        assert_eq!(stringify_comment(" note"), "# note");
        assert_eq!(stringify_comment("note"), "#note");
        assert_eq!(stringify_comment(" a\n b"), "# a\n# b");
        assert_eq!(stringify_comment(" a\n\n b"), "# a\n\n# b");
        assert_eq!(stringify_comment(" "), "#");
        assert_eq!(stringify_comment(""), "");
    }

    #[test]
    fn test_indent_comment() {
        assert_eq!(indent_comment("# a\n# b", "  "), "  # a\n  # b");
        assert_eq!(indent_comment("# a\n\n# b", "  "), "  # a\n\n  # b");
        assert_eq!(indent_comment("# a", ""), "# a");
        assert_eq!(indent_comment("\n\n", "  "), "\n");
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(line_comment("value", "  ", "# c"), " # c");
        assert_eq!(line_comment("value ", "  ", "# c"), "# c");
        assert_eq!(line_comment("value\n", "  ", "# c"), "  # c");
        assert_eq!(line_comment("value", "  ", "# a\n# b"), "\n  # a\n  # b");
    }
}
