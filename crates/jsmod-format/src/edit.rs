//! Space rewrites shared by the formatting passes. Every function reuses
//! the input when the rewrite is a no-op, so update-if-changed reconstruction
//! in the callers stays cheap.

use jsmod_tree::Space;

/// A single space where there is currently no trivia at all. Used for the
/// minimum-viable separators between tokens that would otherwise merge; an
/// existing space or comment already separates them.
pub(crate) fn space_if_empty(space: &Space) -> Space {
    if space.is_empty() {
        Space::single_space()
    } else {
        space.clone()
    }
}

/// Pad the leading whitespace run to at least `min` line breaks.
pub(crate) fn with_min_newlines(space: &Space, min: usize) -> Space {
    let count = space.newline_count();
    if count >= min {
        return space.clone();
    }
    let mut whitespace = "\n".repeat(min - count);
    whitespace.push_str(&space.whitespace);
    space.with_whitespace(whitespace)
}

/// Trim the leading whitespace run to at most `max` line breaks, keeping the
/// trailing indent after the last break.
pub(crate) fn with_max_newlines(space: &Space, max: usize) -> Space {
    let count = space.newline_count();
    if count <= max {
        return space.clone();
    }
    let drop = count - max;
    let mut seen = 0;
    let mut start = 0;
    for (i, ch) in space.whitespace.char_indices() {
        if ch == '\n' {
            seen += 1;
            if seen > drop {
                start = i;
                break;
            }
        }
    }
    space.with_whitespace(space.whitespace[start..].to_string())
}

/// Style-driven single-space-or-nothing. Spaces carrying comments or line
/// breaks are left alone; only plain horizontal spacing is rewritten.
pub(crate) fn spacing(space: &Space, want: bool) -> Space {
    if !space.comments.is_empty() || space.has_newline() {
        return space.clone();
    }
    let desired = if want { " " } else { "" };
    space.with_whitespace(desired.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_newlines_prepends_missing_breaks() {
        let padded = with_min_newlines(&Space::format("\n    "), 2);
        assert_eq!(padded.whitespace, "\n\n    ");
        assert_eq!(with_min_newlines(&padded, 2), padded);
    }

    #[test]
    fn max_newlines_keeps_trailing_indent() {
        let trimmed = with_max_newlines(&Space::format("\n\n\n\n    "), 3);
        assert_eq!(trimmed.whitespace, "\n\n\n    ");
        let trimmed = with_max_newlines(&Space::format("  \n \n "), 1);
        assert_eq!(trimmed.whitespace, "\n ");
    }

    #[test]
    fn spacing_preserves_comments_and_breaks() {
        let with_break = Space::format("\n  ");
        assert_eq!(spacing(&with_break, false), with_break);
        assert_eq!(spacing(&Space::format("   "), true).whitespace, " ");
        assert_eq!(spacing(&Space::single_space(), false).whitespace, "");
    }
}
