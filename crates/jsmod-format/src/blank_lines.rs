//! Pass 3: blank-line minima and maxima.
//!
//! Blank lines are counted as embedded line breaks in a statement's prefix
//! whitespace and padded or trimmed to the configured bounds: a minimum
//! after the import block, around class declarations, and around fields and
//! methods (with separate minima for interface members), and a hard cap on
//! consecutive blank lines everywhere in code. The first statement of a
//! block or file is never forced apart from its opening delimiter.

use std::rc::Rc;

use jsmod_tree::tree::*;
use jsmod_tree::{BlankLinesStyle, ClassKind, RightPadded, Tree, TreeExt, same_list};
use jsmod_visitor::visitor::{walk_block, walk_case, walk_compilation_unit};
use jsmod_visitor::{Cursor, JsVisitor, is_stopped};

use crate::edit::{with_max_newlines, with_min_newlines};

pub struct BlankLinesVisitor {
    style: BlankLinesStyle,
    stop_after: Option<Tree>,
}

impl BlankLinesVisitor {
    pub fn new(style: BlankLinesStyle, stop_after: Option<Tree>) -> BlankLinesVisitor {
        BlankLinesVisitor { style, stop_after }
    }

    /// Minimum blank lines a class member wants around itself.
    fn member_minimum(&self, js: &Js, interface: bool) -> usize {
        let minimum = &self.style.minimum;
        match js {
            Js::MethodDeclaration(_) | Js::FunctionDeclaration(_) => {
                if interface {
                    minimum.around_method_in_interface
                } else {
                    minimum.around_method
                }
            }
            Js::PropertyDeclaration(_) => {
                if interface {
                    minimum.around_field_in_interface
                } else {
                    minimum.around_field
                }
            }
            Js::ClassDeclaration(_) => minimum.around_class,
            _ => 0,
        }
    }

    /// Apply the bounds to a statement list. `class_kind` is set when the
    /// list is a class or interface body.
    fn constrain(
        &self,
        list: &[RightPadded<Tree>],
        class_kind: Option<ClassKind>,
    ) -> Vec<RightPadded<Tree>> {
        let max = self.style.keep_maximum_in_code + 1;
        list.iter()
            .enumerate()
            .map(|(i, padded)| {
                let current = &padded.element;
                let mut min = 0;
                if i > 0 {
                    let prev = &list[i - 1].element;
                    match class_kind {
                        Some(kind) => {
                            let interface = kind == ClassKind::Interface;
                            min = self
                                .member_minimum(prev, interface)
                                .max(self.member_minimum(current, interface));
                        }
                        None => {
                            if matches!(&**prev, Js::Import(_)) && !matches!(&**current, Js::Import(_))
                            {
                                min = min.max(self.style.minimum.after_imports);
                            }
                            if matches!(&**prev, Js::ClassDeclaration(_))
                                || matches!(&**current, Js::ClassDeclaration(_))
                            {
                                min = min.max(self.style.minimum.around_class);
                            }
                        }
                    }
                }
                let mut prefix = current.prefix().clone();
                if min > 0 {
                    prefix = with_min_newlines(&prefix, min + 1);
                }
                prefix = with_max_newlines(&prefix, max.max(min + 1));
                if prefix == *current.prefix() {
                    padded.clone()
                } else {
                    padded.clone().with_element(current.with_prefix(prefix))
                }
            })
            .collect()
    }
}

impl JsVisitor for BlankLinesVisitor {
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
        let statements = self.constrain(&n.statements, None);
        if same_list(&n.statements, &statements) {
            return Some(visited);
        }
        Some(Rc::new(Js::CompilationUnit(CompilationUnit {
            statements,
            ..n.clone()
        })))
    }

    fn visit_block(&mut self, n: &Block, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let class_kind = cursor
            .parent()
            .and_then(|p| p.tree().cloned())
            .and_then(|p| match &*p {
                Js::ClassDeclaration(c) if Rc::ptr_eq(&c.body, tree) => Some(c.kind.element),
                _ => None,
            });
        let visited = walk_block(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Block(n) = &*visited else {
            unreachable!()
        };
        let statements = self.constrain(&n.statements, class_kind);
        let end = with_max_newlines(&n.end, self.style.keep_maximum_in_code + 1);
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
        let statements = self.constrain(&n.statements, None);
        if same_list(&n.statements, &statements) {
            return Some(visited);
        }
        Some(Rc::new(Js::Case(Case {
            statements,
            ..n.clone()
        })))
    }
}
