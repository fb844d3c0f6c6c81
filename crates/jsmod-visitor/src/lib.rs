//! Tree traversal engine for the jsmod rewriting engine.
//!
//! Higher-level passes — the printer, the formatting pipeline, and client
//! recipes — all subclass [`JsVisitor`] and rely on two contracts: trees are
//! rebuilt with update-if-changed semantics (an untouched subtree comes back
//! as the same `Rc`), and the [`Cursor`] ancestor chain carries typed
//! messages between passes for the lifetime of one traversal.

pub mod cursor;
pub use cursor::{Cursor, Message};

pub mod visitor;
pub use visitor::{JsVisitor, STOP_AFTER_KEY, is_stopped};
