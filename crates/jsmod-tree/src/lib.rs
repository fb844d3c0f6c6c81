//! Lossless syntax tree types for the jsmod rewriting engine.
//!
//! This crate provides the data model every other jsmod crate builds on:
//! - Trivia and padding (`Space`, `Comment`, `LeftPadded`, `RightPadded`,
//!   `Container`)
//! - Markers (`Markers`, `Marker`) — the open side-channel for punctuation
//!   and dialect facts
//! - The closed node-kind union (`Js`, `Tree`, `TreeId`)
//! - Space/padding source locations (`SpaceLoc` and friends)
//! - Style configuration objects (`IndentsStyle`, `SpacesStyle`, ...)
//! - Construction helpers for front-ends and tests (`build`)

pub mod space;
pub use space::{Comment, Space};

pub mod marker;
pub use marker::{Marker, Markers};

pub mod padding;
pub use padding::{Container, LeftPadded, RightPadded};

pub mod tree;
pub use tree::{
    BinaryOp, ClassKind, Js, ModifierKind, OperatorCategory, SameElement, Tree, TreeExt, TreeId,
    UnaryOp, UnicodeEscape, VariableKind, same_list,
};

pub mod location;
pub use location::{ContainerLoc, LeftLoc, RightLoc, SpaceLoc};

pub mod style;
pub use style::{
    BlankLinesStyle, FromStyles, IndentsStyle, SpacesStyle, Style, WrappingAndBracesStyle,
};

pub mod build;
