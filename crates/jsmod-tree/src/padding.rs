//! Padding wrappers: trivia attached around elements rather than to them.
//!
//! A token that *precedes* an element (`=`, `from`, a binary operator) is
//! modeled by [`LeftPadded`]: the space before the element is stored, not
//! space around the preceding token. List items and statements use
//! [`RightPadded`]: the space after the element, which is also where a
//! trailing separator marker (comma, semicolon) hangs. A bracketed list is a
//! [`Container`]: one leading space before the opening delimiter plus the
//! right-padded elements.

use serde::{Deserialize, Serialize};

use crate::marker::Markers;
use crate::space::Space;

/// An element preceded by a token: the space *before* the element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeftPadded<T> {
    pub before: Space,
    pub element: T,
    pub markers: Markers,
}

impl<T> LeftPadded<T> {
    pub fn new(before: Space, element: T) -> LeftPadded<T> {
        LeftPadded {
            before,
            element,
            markers: Markers::EMPTY,
        }
    }

    pub fn build(element: T) -> LeftPadded<T> {
        LeftPadded::new(Space::EMPTY, element)
    }

    pub fn with_element(self, element: T) -> LeftPadded<T> {
        LeftPadded { element, ..self }
    }
}

impl<T: Clone> LeftPadded<T> {
    /// Replace the before-space, reusing nothing but avoiding an unequal
    /// rebuild when the space did not change.
    pub fn with_before(&self, before: Space) -> LeftPadded<T> {
        if self.before == before {
            self.clone()
        } else {
            LeftPadded {
                before,
                element: self.element.clone(),
                markers: self.markers.clone(),
            }
        }
    }
}

/// An element followed by trailing space, accommodating a separator marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RightPadded<T> {
    pub element: T,
    pub after: Space,
    pub markers: Markers,
}

impl<T> RightPadded<T> {
    pub fn new(element: T, after: Space) -> RightPadded<T> {
        RightPadded {
            element,
            after,
            markers: Markers::EMPTY,
        }
    }

    pub fn build(element: T) -> RightPadded<T> {
        RightPadded::new(element, Space::EMPTY)
    }

    pub fn with_element(self, element: T) -> RightPadded<T> {
        RightPadded { element, ..self }
    }
}

impl<T: Clone> RightPadded<T> {
    pub fn with_after(&self, after: Space) -> RightPadded<T> {
        if self.after == after {
            self.clone()
        } else {
            RightPadded {
                element: self.element.clone(),
                after,
                markers: self.markers.clone(),
            }
        }
    }
}

/// A delimited list as one logical unit: leading space before the opening
/// delimiter plus right-padded elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container<T> {
    pub before: Space,
    pub elements: Vec<RightPadded<T>>,
    pub markers: Markers,
}

impl<T> Container<T> {
    pub fn new(before: Space, elements: Vec<RightPadded<T>>) -> Container<T> {
        Container {
            before,
            elements,
            markers: Markers::EMPTY,
        }
    }

    pub fn build(elements: Vec<RightPadded<T>>) -> Container<T> {
        Container::new(Space::EMPTY, elements)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn with_elements(self, elements: Vec<RightPadded<T>>) -> Container<T> {
        Container { elements, ..self }
    }
}

impl<T: Clone> Container<T> {
    pub fn with_before(&self, before: Space) -> Container<T> {
        if self.before == before {
            self.clone()
        } else {
            Container {
                before,
                elements: self.elements.clone(),
                markers: self.markers.clone(),
            }
        }
    }
}
