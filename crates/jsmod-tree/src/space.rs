//! Trivia model: whitespace and comments attached to tree edges.
//!
//! A [`Space`] captures everything between two syntactically meaningful
//! tokens — whitespace plus an ordered run of comments, each carrying its own
//! trailing `suffix` whitespace. Attaching trivia to edges (node prefixes and
//! padding wrappers) instead of tokens is what makes the tree lossless: the
//! printer reassembles the original text from these values alone and never
//! invents whitespace of its own.

use serde::{Deserialize, Serialize};

use crate::marker::Markers;

/// All trivia between two syntactically meaningful tokens.
///
/// `whitespace` comes first in source order, followed by `comments`. The
/// whitespace *after* a comment lives in that comment's [`Comment::suffix`],
/// so the last suffix (or `whitespace`, when there are no comments) is what
/// directly precedes the next token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub whitespace: String,
    pub comments: Vec<Comment>,
}

/// A single `//` or `/* */` comment, stored without its delimiters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub multiline: bool,
    /// Whitespace between the end of this comment and whatever follows it.
    pub suffix: String,
    pub markers: Markers,
}

impl Comment {
    pub fn new(text: impl Into<String>, multiline: bool, suffix: impl Into<String>) -> Comment {
        Comment {
            text: text.into(),
            multiline,
            suffix: suffix.into(),
            markers: Markers::EMPTY,
        }
    }

    /// Replace the suffix whitespace, reusing the comment when unchanged.
    pub fn with_suffix(&self, suffix: String) -> Comment {
        if self.suffix == suffix {
            self.clone()
        } else {
            Comment {
                suffix,
                ..self.clone()
            }
        }
    }
}

/// True for the only characters allowed in [`Space::whitespace`]. Anything
/// else between tokens is a parser defect.
pub fn is_whitespace_char(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\n' || ch == '\r'
}

impl Space {
    pub const EMPTY: Space = Space {
        whitespace: String::new(),
        comments: Vec::new(),
    };

    pub fn new(whitespace: String, comments: Vec<Comment>) -> Space {
        debug_assert!(
            whitespace.chars().all(is_whitespace_char),
            "Space whitespace may only contain space/tab/newline/carriage-return, got {whitespace:?}"
        );
        Space {
            whitespace,
            comments,
        }
    }

    /// A comment-free space from raw whitespace text.
    pub fn format(whitespace: &str) -> Space {
        Space::new(whitespace.to_string(), Vec::new())
    }

    /// Exactly one ASCII space, no comments.
    pub fn single_space() -> Space {
        Space::format(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.whitespace.is_empty() && self.comments.is_empty()
    }

    /// Whether the whitespace run (not counting comment suffixes) contains a
    /// line break.
    pub fn has_newline(&self) -> bool {
        self.whitespace.contains('\n')
    }

    /// Whether any part of this space — the leading whitespace or any comment
    /// suffix — contains a line break.
    pub fn any_newline(&self) -> bool {
        self.has_newline() || self.comments.iter().any(|c| c.suffix.contains('\n'))
    }

    /// Number of `\n` characters in the leading whitespace run.
    pub fn newline_count(&self) -> usize {
        self.whitespace.matches('\n').count()
    }

    /// The text that directly precedes the next token: the last comment's
    /// suffix, or the whitespace run when there are no comments.
    pub fn last_segment(&self) -> &str {
        match self.comments.last() {
            Some(c) => &c.suffix,
            None => &self.whitespace,
        }
    }

    /// Replace the whitespace run, reusing the space when unchanged.
    pub fn with_whitespace(&self, whitespace: String) -> Space {
        if self.whitespace == whitespace {
            self.clone()
        } else {
            Space::new(whitespace, self.comments.clone())
        }
    }

    /// Replace the comment list, reusing the space when unchanged.
    pub fn with_comments(&self, comments: Vec<Comment>) -> Space {
        if self.comments == comments {
            self.clone()
        } else {
            Space {
                whitespace: self.whitespace.clone(),
                comments,
            }
        }
    }

    /// Join two spaces in source order. Used when trivia is hoisted from a
    /// child's prefix onto its parent: the result reads exactly as the two
    /// spaces did back to back.
    pub fn concat(first: &Space, second: &Space) -> Space {
        if first.is_empty() {
            return second.clone();
        }
        if second.is_empty() {
            return first.clone();
        }
        match first.comments.last() {
            None => Space {
                whitespace: format!("{}{}", first.whitespace, second.whitespace),
                comments: second.comments.clone(),
            },
            Some(last) => {
                let mut comments = first.comments.clone();
                let joined = last.with_suffix(format!("{}{}", last.suffix, second.whitespace));
                *comments.last_mut().unwrap() = joined;
                comments.extend(second.comments.iter().cloned());
                Space {
                    whitespace: first.whitespace.clone(),
                    comments,
                }
            }
        }
    }
}
