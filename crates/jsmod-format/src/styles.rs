//! Style resolution for the formatting passes.

use jsmod_tree::{FromStyles, Style, Tree, TreeExt};

/// Resolve one style kind through the fallback chain: the first matching
/// entry in `overrides`, then a `NamedStyles` marker attached to the tree
/// root, then the built-in defaults. A lookup miss is never an error.
pub fn resolve_style<S: FromStyles>(root: &Tree, overrides: &[Style]) -> S {
    if let Some(style) = S::from_styles(overrides) {
        return style;
    }
    if let Some(styles) = root.markers().named_styles() {
        if let Some(style) = S::from_styles(styles) {
            return style;
        }
    }
    S::default()
}
