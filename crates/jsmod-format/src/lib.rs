//! Autoformatting passes for the jsmod rewriting engine.
//!
//! After a structural edit, stylistic consistency is restored by a fixed
//! sequence of six visitor passes: whitespace normalization, minimum viable
//! spacing, blank lines, wrapping and braces, inter-token spaces, and
//! tabs/indents. Each pass is an ordinary [`jsmod_visitor::JsVisitor`] and
//! honors an optional stop scope, so a caller can bound reformatting to the
//! region an edit actually touched.
//!
//! [`maybe_autoformat`] is the usual entry point: it skips the whole
//! pipeline when the before/after trees are the same reference, so
//! formatting cost is only paid when something changed.

mod edit;

pub mod styles;
pub use styles::resolve_style;

pub mod normalize_whitespace;
pub use normalize_whitespace::NormalizeWhitespaceVisitor;

pub mod minimum_viable_spacing;
pub use minimum_viable_spacing::MinimumViableSpacingVisitor;

pub mod blank_lines;
pub use blank_lines::BlankLinesVisitor;

pub mod wrapping_and_braces;
pub use wrapping_and_braces::WrappingAndBracesVisitor;

pub mod spaces;
pub use spaces::SpacesVisitor;

pub mod tabs_and_indents;
pub use tabs_and_indents::TabsAndIndentsVisitor;

pub mod autoformat;
pub use autoformat::{AutoformatVisitor, autoformat, maybe_autoformat};
