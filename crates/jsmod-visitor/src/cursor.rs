//! The traversal-time ancestor chain and its message map.
//!
//! A [`Cursor`] is built fresh for the root of every top-level visit,
//! extended by one link per descent, and discarded on return — it is a
//! traversal-local control structure, never part of the tree. Passes use the
//! per-cursor message map for top-down/bottom-up signaling (indentation
//! depth, stop-after-scope, dangling-else alignment). Messages are a closed
//! [`Message`] enum rather than arbitrary values, so every signal a pass can
//! send has a compile-checked shape.
//!
//! Cursors are `Rc`/`RefCell`-based and therefore single-threaded by
//! construction, which matches the engine's scheduling model: one visitor
//! instance, one traversal at a time.

use std::cell::RefCell;
use std::rc::Rc;

use jsmod_tree::{Js, Tree};
use rustc_hash::FxHashMap;

/// A typed message stored on a cursor.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Flag(bool),
    Indent(i64),
    Text(String),
}

impl Message {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Message::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_indent(&self) -> Option<i64> {
        match self {
            Message::Indent(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum CursorValue {
    Root,
    Tree(Tree),
}

#[derive(Debug)]
struct CursorNode {
    value: CursorValue,
    parent: Option<Cursor>,
    messages: RefCell<FxHashMap<&'static str, Message>>,
}

/// A cheap handle onto one link of the ancestor chain.
#[derive(Clone, Debug)]
pub struct Cursor {
    node: Rc<CursorNode>,
}

impl Cursor {
    /// The chain head for a new top-level traversal.
    pub fn root() -> Cursor {
        Cursor {
            node: Rc::new(CursorNode {
                value: CursorValue::Root,
                parent: None,
                messages: RefCell::new(FxHashMap::default()),
            }),
        }
    }

    /// Extend the chain by one link for a descent into `tree`.
    pub fn child(&self, tree: Tree) -> Cursor {
        Cursor {
            node: Rc::new(CursorNode {
                value: CursorValue::Tree(tree),
                parent: Some(self.clone()),
                messages: RefCell::new(FxHashMap::default()),
            }),
        }
    }

    /// The tree value at this link, `None` at the chain head.
    pub fn tree(&self) -> Option<&Tree> {
        match &self.node.value {
            CursorValue::Tree(t) => Some(t),
            CursorValue::Root => None,
        }
    }

    pub fn parent(&self) -> Option<Cursor> {
        self.node.parent.clone()
    }

    /// Walk to the head of the chain.
    pub fn root_cursor(&self) -> Cursor {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    pub fn put_message(&self, key: &'static str, message: Message) {
        self.node.messages.borrow_mut().insert(key, message);
    }

    /// The message stored on this cursor itself, if any.
    pub fn message(&self, key: &str) -> Option<Message> {
        self.node.messages.borrow().get(key).cloned()
    }

    pub fn has_own_message(&self, key: &str) -> bool {
        self.node.messages.borrow().contains_key(key)
    }

    /// Walk parent links to the first cursor carrying `key`.
    pub fn nearest_message(&self, key: &str) -> Option<Message> {
        let mut current = Some(self.clone());
        while let Some(cursor) = current {
            if let Some(message) = cursor.message(key) {
                return Some(message);
            }
            current = cursor.parent();
        }
        None
    }

    /// The nearest ancestor value (including this one) satisfying the
    /// predicate.
    pub fn first_enclosing(&self, predicate: impl Fn(&Js) -> bool) -> Option<Tree> {
        let mut current = Some(self.clone());
        while let Some(cursor) = current {
            if let Some(tree) = cursor.tree() {
                if predicate(tree) {
                    return Some(Rc::clone(tree));
                }
            }
            current = cursor.parent();
        }
        None
    }

    /// Store a message on the nearest enclosing value satisfying the
    /// predicate. Returns false when no ancestor matches.
    pub fn put_message_on_first_enclosing(
        &self,
        predicate: impl Fn(&Js) -> bool,
        key: &'static str,
        message: Message,
    ) -> bool {
        let mut current = Some(self.clone());
        while let Some(cursor) = current {
            if let Some(tree) = cursor.tree() {
                if predicate(tree) {
                    cursor.put_message(key, message);
                    return true;
                }
            }
            current = cursor.parent();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsmod_tree::build;

    #[test]
    fn nearest_message_walks_ancestors() {
        let root = Cursor::root();
        let outer = root.child(build::ident("a"));
        outer.put_message("depth", Message::Indent(1));
        let inner = outer.child(build::ident("b"));

        assert_eq!(inner.nearest_message("depth"), Some(Message::Indent(1)));
        assert_eq!(inner.message("depth"), None);
        assert!(outer.has_own_message("depth"));
    }

    #[test]
    fn first_enclosing_finds_nearest_match() {
        let root = Cursor::root();
        let block = build::block(vec![]);
        let cursor = root.child(block.clone()).child(build::ident("x"));

        let found = cursor
            .first_enclosing(|js| matches!(js, Js::Block(_)))
            .expect("block in chain");
        assert!(Rc::ptr_eq(&found, &block));
        assert!(cursor.first_enclosing(|js| matches!(js, Js::If(_))).is_none());
    }

    #[test]
    fn message_lands_on_the_nearest_matching_ancestor() {
        let root = Cursor::root();
        let block_cursor = root.child(build::block(vec![]));
        let inner = block_cursor.child(build::ident("x"));

        let placed = inner.put_message_on_first_enclosing(
            |js| matches!(js, Js::Block(_)),
            "align",
            Message::Indent(2),
        );
        assert!(placed);
        assert_eq!(block_cursor.message("align"), Some(Message::Indent(2)));
        assert!(!inner.has_own_message("align"));

        let missed = inner.put_message_on_first_enclosing(
            |js| matches!(js, Js::Switch(_)),
            "align",
            Message::Indent(3),
        );
        assert!(!missed, "no matching ancestor means nothing is written");
    }

    #[test]
    fn root_cursor_reaches_chain_head() {
        let root = Cursor::root();
        let deep = root.child(build::ident("a")).child(build::ident("b"));
        deep.root_cursor().put_message("stop", Message::Flag(true));
        assert_eq!(root.message("stop"), Some(Message::Flag(true)));
    }
}
