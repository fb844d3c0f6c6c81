//! Markers: an open side-channel of tagged facts attached to nodes and
//! padding wrappers.
//!
//! Punctuation and dialect quirks that are not worth a dedicated node kind —
//! an explicit statement-terminating semicolon, a trailing comma in a list,
//! `?.` optional chaining, a generator's `*` — are recorded here instead of
//! widening the node union. Marker kinds are globally namespaced strings;
//! kinds this engine version does not recognize are carried opaquely in
//! [`Marker::Unknown`] and must survive every traversal and print untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::space::Space;
use crate::style::Style;

/// A single tagged fact. Every marker carries its own identity so that
/// tooling can correlate markers across tree revisions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Marker {
    /// The statement this is attached to ends in an explicit `;`.
    Semicolon { id: Uuid },
    /// The delimited list ends in a trailing comma; `suffix` is the
    /// whitespace after that comma, before the closing delimiter.
    TrailingComma { id: Uuid, suffix: Space },
    /// The member access or call uses `?.` instead of `.`.
    OptionalChain { id: Uuid },
    /// The function or method is a generator; `prefix` is the whitespace
    /// before the `*`.
    Generator { id: Uuid, prefix: Space },
    /// A style set attached to a source file, consulted by style resolution.
    NamedStyles {
        id: Uuid,
        name: String,
        styles: Vec<Style>,
    },
    /// A marker kind this engine version does not know. Round-tripped
    /// opaquely, never dropped.
    Unknown {
        id: Uuid,
        kind: String,
        data: serde_json::Value,
    },
}

impl Marker {
    pub fn semicolon() -> Marker {
        Marker::Semicolon { id: Uuid::new_v4() }
    }

    pub fn trailing_comma(suffix: Space) -> Marker {
        Marker::TrailingComma {
            id: Uuid::new_v4(),
            suffix,
        }
    }

    pub fn optional_chain() -> Marker {
        Marker::OptionalChain { id: Uuid::new_v4() }
    }

    pub fn generator(prefix: Space) -> Marker {
        Marker::Generator {
            id: Uuid::new_v4(),
            prefix,
        }
    }

    pub fn named_styles(name: impl Into<String>, styles: Vec<Style>) -> Marker {
        Marker::NamedStyles {
            id: Uuid::new_v4(),
            name: name.into(),
            styles,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Marker::Semicolon { id }
            | Marker::TrailingComma { id, .. }
            | Marker::OptionalChain { id }
            | Marker::Generator { id, .. }
            | Marker::NamedStyles { id, .. }
            | Marker::Unknown { id, .. } => *id,
        }
    }

    /// The globally namespaced kind string for this marker.
    pub fn kind(&self) -> &str {
        match self {
            Marker::Semicolon { .. } => "jsmod.marker.Semicolon",
            Marker::TrailingComma { .. } => "jsmod.marker.TrailingComma",
            Marker::OptionalChain { .. } => "jsmod.marker.OptionalChain",
            Marker::Generator { .. } => "jsmod.marker.Generator",
            Marker::NamedStyles { .. } => "jsmod.marker.NamedStyles",
            Marker::Unknown { kind, .. } => kind,
        }
    }
}

/// Ordered marker set attached to a node or padding wrapper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Markers {
    pub markers: Vec<Marker>,
}

impl Markers {
    pub const EMPTY: Markers = Markers {
        markers: Vec::new(),
    };

    pub fn new(markers: Vec<Marker>) -> Markers {
        Markers { markers }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn has_semicolon(&self) -> bool {
        self.markers
            .iter()
            .any(|m| matches!(m, Marker::Semicolon { .. }))
    }

    /// The trailing-comma suffix space, when a trailing comma is recorded.
    pub fn trailing_comma(&self) -> Option<&Space> {
        self.markers.iter().find_map(|m| match m {
            Marker::TrailingComma { suffix, .. } => Some(suffix),
            _ => None,
        })
    }

    pub fn is_optional_chain(&self) -> bool {
        self.markers
            .iter()
            .any(|m| matches!(m, Marker::OptionalChain { .. }))
    }

    /// The generator `*` prefix space, when the node is a generator.
    pub fn generator(&self) -> Option<&Space> {
        self.markers.iter().find_map(|m| match m {
            Marker::Generator { prefix, .. } => Some(prefix),
            _ => None,
        })
    }

    pub fn named_styles(&self) -> Option<&[Style]> {
        self.markers.iter().find_map(|m| match m {
            Marker::NamedStyles { styles, .. } => Some(styles.as_slice()),
            _ => None,
        })
    }

    /// Append a marker, returning the extended set.
    pub fn add(&self, marker: Marker) -> Markers {
        let mut markers = self.markers.clone();
        markers.push(marker);
        Markers { markers }
    }

    /// Remove every marker of the given kind, reusing the set when nothing
    /// matched.
    pub fn remove_by_kind(&self, kind: &str) -> Markers {
        if !self.markers.iter().any(|m| m.kind() == kind) {
            return self.clone();
        }
        Markers {
            markers: self
                .markers
                .iter()
                .filter(|m| m.kind() != kind)
                .cloned()
                .collect(),
        }
    }

    /// Ensure a semicolon marker is present, reusing the set when it already
    /// is.
    pub fn with_semicolon(&self) -> Markers {
        if self.has_semicolon() {
            self.clone()
        } else {
            self.add(Marker::semicolon())
        }
    }

    pub fn without_semicolon(&self) -> Markers {
        self.remove_by_kind("jsmod.marker.Semicolon")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_marker_keeps_its_kind_and_payload() {
        let marker = Marker::Unknown {
            id: Uuid::new_v4(),
            kind: "vendor.marker.Experimental".to_string(),
            data: serde_json::json!({ "flag": true }),
        };
        assert_eq!(marker.kind(), "vendor.marker.Experimental");
        let markers = Markers::EMPTY.add(marker.clone());
        assert_eq!(markers.markers, vec![marker]);
    }

    #[test]
    fn with_semicolon_is_idempotent() {
        let once = Markers::EMPTY.with_semicolon();
        let twice = once.with_semicolon();
        assert_eq!(once.markers.len(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn remove_by_kind_reuses_unmatched_set() {
        let markers = Markers::EMPTY.add(Marker::optional_chain());
        let removed = markers.remove_by_kind("jsmod.marker.Semicolon");
        assert_eq!(markers, removed);
    }
}
