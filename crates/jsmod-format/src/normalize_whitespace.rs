//! Pass 1: migrate trivia to the outermost syntactically-equivalent
//! position.
//!
//! A line break that a front-end attached to the leftmost token of a deeply
//! nested expression reads the same as one attached to the enclosing
//! statement's prefix. Hoisting it outward gives the later passes one
//! canonical place to look when they count blank lines or rewrite indents.

use std::rc::Rc;

use jsmod_tree::tree::*;
use jsmod_tree::{Space, Tree, TreeExt};
use jsmod_visitor::visitor::{
    walk_class_declaration, walk_expression_statement, walk_function_declaration,
    walk_method_declaration, walk_variable_declarations,
};
use jsmod_visitor::{Cursor, JsVisitor, is_stopped};

pub struct NormalizeWhitespaceVisitor {
    stop_after: Option<Tree>,
}

impl NormalizeWhitespaceVisitor {
    pub fn new(stop_after: Option<Tree>) -> NormalizeWhitespaceVisitor {
        NormalizeWhitespaceVisitor { stop_after }
    }
}

/// Pull all trivia printed before a node's first token out of the node and
/// its leftmost descendants. Member/call/binary chains print their own
/// prefix immediately followed by the leftmost child's, so those positions
/// are all equivalent.
fn take_leading(tree: &Tree) -> (Space, Tree) {
    match &**tree {
        Js::Call(n) => {
            let (inner, callee) = take_leading(&n.callee);
            let leading = Space::concat(&n.prefix, &inner);
            if leading.is_empty() {
                return (Space::EMPTY, Rc::clone(tree));
            }
            let node = Rc::new(Js::Call(Call {
                prefix: Space::EMPTY,
                callee,
                ..n.clone()
            }));
            (leading, node)
        }
        Js::Member(n) => {
            let (inner, object) = take_leading(&n.object);
            let leading = Space::concat(&n.prefix, &inner);
            if leading.is_empty() {
                return (Space::EMPTY, Rc::clone(tree));
            }
            let node = Rc::new(Js::Member(Member {
                prefix: Space::EMPTY,
                object,
                ..n.clone()
            }));
            (leading, node)
        }
        Js::Binary(n) => {
            let (inner, left) = take_leading(&n.left);
            let leading = Space::concat(&n.prefix, &inner);
            if leading.is_empty() {
                return (Space::EMPTY, Rc::clone(tree));
            }
            let node = Rc::new(Js::Binary(Binary {
                prefix: Space::EMPTY,
                left,
                ..n.clone()
            }));
            (leading, node)
        }
        _ => (tree.prefix().clone(), tree.with_prefix(Space::EMPTY)),
    }
}

impl JsVisitor for NormalizeWhitespaceVisitor {
    fn stop_after(&self) -> Option<&Tree> {
        self.stop_after.as_ref()
    }

    fn visit_expression_statement(
        &mut self,
        n: &ExpressionStatement,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_expression_statement(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::ExpressionStatement(n) = &*visited else {
            unreachable!()
        };
        let (leading, expression) = take_leading(&n.expression);
        if leading.is_empty() {
            return Some(visited);
        }
        Some(Rc::new(Js::ExpressionStatement(ExpressionStatement {
            prefix: Space::concat(&n.prefix, &leading),
            expression,
            ..n.clone()
        })))
    }

    fn visit_variable_declarations(
        &mut self,
        n: &VariableDeclarations,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_variable_declarations(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::VariableDeclarations(n) = &*visited else {
            unreachable!()
        };
        if let Some(first) = n.modifiers.first() {
            if first.prefix().is_empty() {
                return Some(visited);
            }
            let prefix = Space::concat(&n.prefix, first.prefix());
            let mut modifiers = n.modifiers.clone();
            modifiers[0] = first.with_prefix(Space::EMPTY);
            Some(Rc::new(Js::VariableDeclarations(VariableDeclarations {
                prefix,
                modifiers,
                ..n.clone()
            })))
        } else {
            if n.kind.before.is_empty() {
                return Some(visited);
            }
            let prefix = Space::concat(&n.prefix, &n.kind.before);
            let mut kind = n.kind.clone();
            kind.before = Space::EMPTY;
            Some(Rc::new(Js::VariableDeclarations(VariableDeclarations {
                prefix,
                kind,
                ..n.clone()
            })))
        }
    }

    fn visit_class_declaration(
        &mut self,
        n: &ClassDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_class_declaration(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::ClassDeclaration(n) = &*visited else {
            unreachable!()
        };
        if let Some(first) = n.decorators.first() {
            if first.prefix().is_empty() {
                return Some(visited);
            }
            let prefix = Space::concat(&n.prefix, first.prefix());
            let mut decorators = n.decorators.clone();
            decorators[0] = first.with_prefix(Space::EMPTY);
            Some(Rc::new(Js::ClassDeclaration(ClassDeclaration {
                prefix,
                decorators,
                ..n.clone()
            })))
        } else if let Some(first) = n.modifiers.first() {
            if first.prefix().is_empty() {
                return Some(visited);
            }
            let prefix = Space::concat(&n.prefix, first.prefix());
            let mut modifiers = n.modifiers.clone();
            modifiers[0] = first.with_prefix(Space::EMPTY);
            Some(Rc::new(Js::ClassDeclaration(ClassDeclaration {
                prefix,
                modifiers,
                ..n.clone()
            })))
        } else {
            Some(visited)
        }
    }

    fn visit_method_declaration(
        &mut self,
        n: &MethodDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_method_declaration(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::MethodDeclaration(n) = &*visited else {
            unreachable!()
        };
        if let Some(first) = n.decorators.first() {
            if first.prefix().is_empty() {
                return Some(visited);
            }
            let prefix = Space::concat(&n.prefix, first.prefix());
            let mut decorators = n.decorators.clone();
            decorators[0] = first.with_prefix(Space::EMPTY);
            Some(Rc::new(Js::MethodDeclaration(MethodDeclaration {
                prefix,
                decorators,
                ..n.clone()
            })))
        } else if let Some(first) = n.modifiers.first() {
            if first.prefix().is_empty() {
                return Some(visited);
            }
            let prefix = Space::concat(&n.prefix, first.prefix());
            let mut modifiers = n.modifiers.clone();
            modifiers[0] = first.with_prefix(Space::EMPTY);
            Some(Rc::new(Js::MethodDeclaration(MethodDeclaration {
                prefix,
                modifiers,
                ..n.clone()
            })))
        } else {
            Some(visited)
        }
    }

    fn visit_function_declaration(
        &mut self,
        n: &FunctionDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_function_declaration(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::FunctionDeclaration(n) = &*visited else {
            unreachable!()
        };
        if let Some(first) = n.modifiers.first() {
            if first.prefix().is_empty() {
                return Some(visited);
            }
            let prefix = Space::concat(&n.prefix, first.prefix());
            let mut modifiers = n.modifiers.clone();
            modifiers[0] = first.with_prefix(Space::EMPTY);
            Some(Rc::new(Js::FunctionDeclaration(FunctionDeclaration {
                prefix,
                modifiers,
                ..n.clone()
            })))
        } else {
            Some(visited)
        }
    }
}
