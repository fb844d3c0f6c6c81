//! Pass 4: brace and line-placement policy.
//!
//! Statements inside a block start on their own line and the closing brace
//! gets a line of its own; a run of leading decorators is split one per
//! line; `else` sits on the closing brace or on a fresh line per
//! configuration.

use std::rc::Rc;

use jsmod_tree::tree::*;
use jsmod_tree::{
    RightPadded, SameElement, Space, Tree, TreeExt, WrappingAndBracesStyle, same_list,
};
use jsmod_visitor::visitor::{
    walk_block, walk_case, walk_class_declaration, walk_compilation_unit, walk_if,
    walk_method_declaration,
};
use jsmod_visitor::{Cursor, JsVisitor, is_stopped};

use crate::edit::with_min_newlines;

pub struct WrappingAndBracesVisitor {
    style: WrappingAndBracesStyle,
    stop_after: Option<Tree>,
}

impl WrappingAndBracesVisitor {
    pub fn new(style: WrappingAndBracesStyle, stop_after: Option<Tree>) -> WrappingAndBracesVisitor {
        WrappingAndBracesVisitor { style, stop_after }
    }
}

/// Put every statement of the list on its own line.
fn on_own_lines(list: &[RightPadded<Tree>]) -> Vec<RightPadded<Tree>> {
    list.iter()
        .map(|padded| {
            let prefix = with_min_newlines(padded.element.prefix(), 1);
            if prefix == *padded.element.prefix() {
                padded.clone()
            } else {
                padded
                    .clone()
                    .with_element(padded.element.with_prefix(prefix))
            }
        })
        .collect()
}

/// Decorators after the first each get their own line. The caller puts the
/// declaration itself on the line after the last one.
fn split_decorators(decorators: &[Tree]) -> Vec<Tree> {
    decorators
        .iter()
        .enumerate()
        .map(|(i, d)| {
            if i == 0 {
                Rc::clone(d)
            } else {
                d.with_prefix(with_min_newlines(d.prefix(), 1))
            }
        })
        .collect()
}

impl JsVisitor for WrappingAndBracesVisitor {
    fn stop_after(&self) -> Option<&Tree> {
        self.stop_after.as_ref()
    }

    fn visit_compilation_unit(
        &mut self,
        n: &CompilationUnit,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_compilation_unit(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::CompilationUnit(n) = &*visited else {
            unreachable!()
        };
        let statements: Vec<RightPadded<Tree>> = n
            .statements
            .iter()
            .enumerate()
            .map(|(i, padded)| {
                if i == 0 {
                    return padded.clone();
                }
                let prefix = with_min_newlines(padded.element.prefix(), 1);
                if prefix == *padded.element.prefix() {
                    padded.clone()
                } else {
                    padded
                        .clone()
                        .with_element(padded.element.with_prefix(prefix))
                }
            })
            .collect();
        if same_list(&n.statements, &statements) {
            return Some(visited);
        }
        Some(Rc::new(Js::CompilationUnit(CompilationUnit {
            statements,
            ..n.clone()
        })))
    }

    fn visit_block(&mut self, n: &Block, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_block(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Block(n) = &*visited else {
            unreachable!()
        };
        if n.statements.is_empty() {
            return Some(visited);
        }
        let statements = on_own_lines(&n.statements);
        let end = with_min_newlines(&n.end, 1);
        if same_list(&n.statements, &statements) && end == n.end {
            return Some(visited);
        }
        Some(Rc::new(Js::Block(Block {
            statements,
            end,
            ..n.clone()
        })))
    }

    fn visit_case(&mut self, n: &Case, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_case(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Case(n) = &*visited else {
            unreachable!()
        };
        let statements = on_own_lines(&n.statements);
        if same_list(&n.statements, &statements) {
            return Some(visited);
        }
        Some(Rc::new(Js::Case(Case {
            statements,
            ..n.clone()
        })))
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
        if n.decorators.len() < 2 {
            return Some(visited);
        }
        let decorators = split_decorators(&n.decorators);
        let mut modifiers = n.modifiers.clone();
        let mut kind = n.kind.clone();
        match modifiers.first() {
            Some(first) => {
                modifiers[0] = first.with_prefix(with_min_newlines(first.prefix(), 1));
            }
            None => kind = kind.with_before(with_min_newlines(&kind.before, 1)),
        }
        if same_list(&n.decorators, &decorators)
            && same_list(&n.modifiers, &modifiers)
            && kind.same_element(&n.kind)
        {
            return Some(visited);
        }
        Some(Rc::new(Js::ClassDeclaration(ClassDeclaration {
            decorators,
            modifiers,
            kind,
            ..n.clone()
        })))
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
        if n.decorators.len() < 2 {
            return Some(visited);
        }
        let decorators = split_decorators(&n.decorators);
        let mut modifiers = n.modifiers.clone();
        let mut name = Rc::clone(&n.name);
        match modifiers.first() {
            Some(first) => {
                modifiers[0] = first.with_prefix(with_min_newlines(first.prefix(), 1));
            }
            None => name = name.with_prefix(with_min_newlines(name.prefix(), 1)),
        }
        if same_list(&n.decorators, &decorators)
            && same_list(&n.modifiers, &modifiers)
            && name.same_element(&n.name)
        {
            return Some(visited);
        }
        Some(Rc::new(Js::MethodDeclaration(MethodDeclaration {
            decorators,
            modifiers,
            name,
            ..n.clone()
        })))
    }

    fn visit_if(&mut self, n: &If, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_if(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::If(n) = &*visited else {
            unreachable!()
        };
        let Some(else_part) = &n.else_part else {
            return Some(visited);
        };
        let then_is_block = matches!(&*n.then_part.element, Js::Block(_));
        let prefix = else_part.prefix();
        let new_prefix = if self.style.else_on_new_line || !then_is_block {
            with_min_newlines(prefix, 1)
        } else if prefix.comments.is_empty() {
            Space::single_space()
        } else {
            prefix.clone()
        };
        if new_prefix == *prefix {
            return Some(visited);
        }
        Some(Rc::new(Js::If(If {
            else_part: Some(else_part.with_prefix(new_prefix)),
            ..n.clone()
        })))
    }
}
