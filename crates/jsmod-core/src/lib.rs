//! jsmod core: a source-to-source rewriting engine for JavaScript and
//! TypeScript.
//!
//! This crate aggregates the engine's public surface:
//! - [`jsmod_tree`] — the lossless syntax tree, markers, padding, and style
//!   objects
//! - [`jsmod_visitor`] — the traversal engine and cursor every pass is built
//!   on
//! - [`jsmod_printer`] — exact source-text reconstruction
//! - [`jsmod_format`] — the six-pass autoformatting pipeline
//!
//! The usual client flow: obtain a parsed tree from a front-end, run a
//! transformation (a [`JsVisitor`] subclass), and when the result is a new
//! tree, pass both revisions to [`maybe_autoformat`] and [`print`] the
//! outcome. A transformation that changes nothing returns the same reference
//! it was given, so the formatting cost is skipped entirely.

pub use jsmod_format;
pub use jsmod_printer;
pub use jsmod_tree;
pub use jsmod_visitor;

pub use jsmod_format::{AutoformatVisitor, autoformat, maybe_autoformat, resolve_style};
pub use jsmod_printer::print;
pub use jsmod_visitor::{Cursor, JsVisitor, Message};
