//! Offset arithmetic for empty scalars.

use crate::token::{SourceToken, SourceTokenKind};

/// Compute the byte offset at which an empty (implicit) scalar starts.
///
/// `offset` is the position the surrounding parse reached; `before` holds
/// the tokens that appeared before that point, and `pos` optionally
/// limits the scan to the first `pos` tokens (defaulting to all of them).
///
/// Walks backward over trailing space/comment/newline tokens, subtracting
/// each token's length, until real content (or the start of the list) is
/// reached, then steps forward again over any run of pure-space tokens
/// immediately after that boundary.
///
/// Technically, an empty scalar is immediately after the last non-empty
/// node, but it's more useful to place it after any whitespace.
pub fn empty_scalar_position(
    mut offset: usize,
    before: &[SourceToken<'_>],
    pos: Option<usize>,
) -> usize {
    let pos = pos.unwrap_or(before.len()).min(before.len());
    let mut i = pos;
    while i > 0 {
        i -= 1;
        let token = &before[i];
        if token.kind.is_filler() {
            offset = offset.saturating_sub(token.len());
            continue;
        }

        i += 1;
        while let Some(token) = before.get(i) {
            if token.kind != SourceTokenKind::Space {
                break;
            }
            offset += token.len();
            i += 1;
        }
        break;
    }
    offset
}
