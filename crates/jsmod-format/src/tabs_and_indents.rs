//! Pass 6: indentation.
//!
//! Every space that contains a line break — a prefix, a padding's
//! before-space, a container's before-space, or a comment suffix — is
//! rewritten to end in the indent for its nesting depth. Depth is tracked
//! as an `Indent` message on the cursor: entering a block or a `case` body
//! raises it by one, as does a non-block `if`/`else`/loop body (dangling
//! style). A block's own prefix and its closing brace sit at the enclosing
//! depth, and a dangling `if` publishes an else-alignment depth so a paired
//! `else` lines up with its `if` even though the then-body was raised.

use jsmod_tree::tree::*;
use jsmod_tree::{IndentsStyle, LeftLoc, Space, SpaceLoc, Tree};
use jsmod_visitor::{Cursor, JsVisitor, Message, is_stopped};

/// Cursor message carrying the indent depth for the subtree below it.
pub const INDENT_KEY: &str = "jsmod.format.indentToUse";
/// Cursor message carrying the depth a paired `else` should align to.
pub const ELSE_INDENT_KEY: &str = "jsmod.format.elseIndent";

pub struct TabsAndIndentsVisitor {
    style: IndentsStyle,
    stop_after: Option<Tree>,
}

impl TabsAndIndentsVisitor {
    pub fn new(style: IndentsStyle, stop_after: Option<Tree>) -> TabsAndIndentsVisitor {
        TabsAndIndentsVisitor { style, stop_after }
    }

    fn indent_text(&self, depth: i64, continuation: bool) -> String {
        let mut text = self.style.single_indent().repeat(depth.max(0) as usize);
        if continuation {
            if self.style.use_tab_character {
                text.push('\t');
            } else {
                text.push_str(&" ".repeat(self.style.continuation_indent));
            }
        }
        text
    }

    /// The depth governing a space at `loc` under `cursor`.
    fn depth_for(&self, loc: SpaceLoc, cursor: &Cursor) -> i64 {
        match loc {
            // A node's own prefix sits before the node's scope opens; read
            // the depth from the ancestors, not from any message the node
            // put on its own cursor. A dangling if leaves an alignment
            // depth for its else.
            SpaceLoc::Prefix => {
                if cursor.tree().is_some_and(|t| matches!(&**t, Js::Else(_))) {
                    if let Some(depth) = cursor
                        .nearest_message(ELSE_INDENT_KEY)
                        .and_then(|m| m.as_indent())
                    {
                        return depth;
                    }
                }
                enclosing_depth(cursor)
            }
            // The closing brace aligns with the statement owning the block.
            SpaceLoc::BlockEnd => enclosing_depth(cursor),
            SpaceLoc::CompilationUnitEof => 0,
            _ => nearest_depth(cursor),
        }
    }
}

/// Depth visible from this cursor, its own message included.
fn nearest_depth(cursor: &Cursor) -> i64 {
    cursor
        .nearest_message(INDENT_KEY)
        .and_then(|m| m.as_indent())
        .unwrap_or(0)
}

/// Depth visible from the ancestors only.
fn enclosing_depth(cursor: &Cursor) -> i64 {
    cursor
        .parent()
        .map(|p| nearest_depth(&p))
        .unwrap_or(0)
}

/// Wrapped operands and chained member accesses hang past the statement
/// indent by the continuation amount.
fn is_continuation(loc: SpaceLoc, cursor: &Cursor) -> bool {
    match loc {
        SpaceLoc::Before(LeftLoc::BinaryOperator) | SpaceLoc::Before(LeftLoc::MemberName) => true,
        SpaceLoc::Prefix => cursor
            .parent()
            .and_then(|p| p.tree().cloned())
            .is_some_and(|p| matches!(&*p, Js::Binary(_) | Js::Member(_))),
        _ => false,
    }
}

/// Rewrite the run after the last line break to `indent`. `None` when the
/// text has no break or already ends in the right indent.
fn reindent(text: &str, indent: &str) -> Option<String> {
    let last = text.rfind('\n')?;
    let rebuilt = format!("{}{}", &text[..=last], indent);
    if rebuilt == text { None } else { Some(rebuilt) }
}

impl JsVisitor for TabsAndIndentsVisitor {
    fn stop_after(&self) -> Option<&Tree> {
        self.stop_after.as_ref()
    }

    fn pre_visit(&mut self, tree: &Tree, cursor: &Cursor) {
        match &**tree {
            Js::Block(_) | Js::Case(_) => {
                let inner = enclosing_depth(cursor) + 1;
                cursor.put_message(INDENT_KEY, Message::Indent(inner));
            }
            Js::If(n) => {
                if !matches!(&*n.then_part.element, Js::Block(_)) {
                    let outer = enclosing_depth(cursor);
                    cursor.put_message(INDENT_KEY, Message::Indent(outer + 1));
                    cursor.put_message(ELSE_INDENT_KEY, Message::Indent(outer));
                }
            }
            Js::Else(n) => {
                // Reset the depth a dangling if raised for its then-body;
                // the else subtree starts over at the alignment depth.
                let own = cursor
                    .nearest_message(ELSE_INDENT_KEY)
                    .and_then(|m| m.as_indent())
                    .unwrap_or_else(|| enclosing_depth(cursor));
                let raised = !matches!(&*n.body.element, Js::Block(_) | Js::If(_));
                let depth = if raised { own + 1 } else { own };
                cursor.put_message(INDENT_KEY, Message::Indent(depth));
            }
            Js::While(n) => {
                if !matches!(&*n.body.element, Js::Block(_)) {
                    let inner = enclosing_depth(cursor) + 1;
                    cursor.put_message(INDENT_KEY, Message::Indent(inner));
                }
            }
            Js::For(n) => {
                if !matches!(&*n.body.element, Js::Block(_)) {
                    let inner = enclosing_depth(cursor) + 1;
                    cursor.put_message(INDENT_KEY, Message::Indent(inner));
                }
            }
            _ => {}
        }
    }

    fn visit_space(&mut self, space: &Space, loc: SpaceLoc, cursor: &Cursor) -> Space {
        // Spaces owned by ancestors of the stop node are still revisited
        // after the stop flag lands; leave those untouched too.
        if is_stopped(cursor) {
            return space.clone();
        }
        let breaks_in_suffixes = space.comments.iter().any(|c| c.suffix.contains('\n'));
        if !space.has_newline() && !breaks_in_suffixes {
            return space.clone();
        }
        let depth = self.depth_for(loc, cursor);
        let indent = self.indent_text(depth, is_continuation(loc, cursor));
        let whitespace = reindent(&space.whitespace, &indent)
            .unwrap_or_else(|| space.whitespace.clone());
        let comments = space
            .comments
            .iter()
            .map(|c| match reindent(&c.suffix, &indent) {
                Some(suffix) => c.with_suffix(suffix),
                None => c.clone(),
            })
            .collect();
        Space {
            whitespace,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use jsmod_tree::{Markers, RightPadded, Space, TreeExt, build};

    fn semi(tree: Tree) -> RightPadded<Tree> {
        RightPadded {
            element: tree,
            after: Space::EMPTY,
            markers: Markers::EMPTY.with_semicolon(),
        }
    }

    fn reindented(unit: &Tree) -> Tree {
        TabsAndIndentsVisitor::new(IndentsStyle::default(), None)
            .visit_root(unit)
            .expect("root survives")
    }

    #[test]
    fn nested_blocks_indent_by_depth() {
        let inner = build::block(vec![semi(
            build::return_stmt(Some(build::literal("1").with_prefix(Space::single_space())))
                .with_prefix(Space::format("\n")),
        )]);
        let inner = match &*inner {
            Js::Block(n) => Rc::new(Js::Block(Block {
                end: Space::format("\n"),
                ..n.clone()
            })),
            _ => unreachable!(),
        };
        let outer = build::block(vec![RightPadded::build(
            inner.with_prefix(Space::format("\n")),
        )]);
        let outer = match &*outer {
            Js::Block(n) => Rc::new(Js::Block(Block {
                end: Space::format("\n"),
                ..n.clone()
            })),
            _ => unreachable!(),
        };
        let unit = build::compilation_unit("m.js", vec![RightPadded::build(outer)]);

        let result = reindented(&unit);
        let Js::CompilationUnit(unit) = &*result else {
            unreachable!()
        };
        let Js::Block(outer) = &*unit.statements[0].element else {
            unreachable!()
        };
        let Js::Block(inner) = &*outer.statements[0].element else {
            unreachable!()
        };
        assert_eq!(
            inner.prefix.whitespace, "\n    ",
            "inner block opens at depth one"
        );
        assert_eq!(
            inner.statements[0].element.prefix().whitespace,
            "\n        ",
            "statement inside it sits at depth two"
        );
        assert_eq!(
            inner.end.whitespace, "\n    ",
            "closing brace returns to the enclosing depth"
        );
        assert_eq!(outer.end.whitespace, "\n", "outer closing brace at depth zero");
    }

    #[test]
    fn dangling_else_aligns_with_its_if() {
        let then_body = semi(
            build::return_stmt(Some(build::literal("1").with_prefix(Space::single_space())))
                .with_prefix(Space::format("\n")),
        );
        let else_body = semi(
            build::return_stmt(Some(build::literal("2").with_prefix(Space::single_space())))
                .with_prefix(Space::format("\n")),
        );
        let else_part = build::else_part(else_body).with_prefix(Space::format("\n"));
        let if_stmt = build::if_stmt(
            build::control_parens(RightPadded::build(build::ident("x")))
                .with_prefix(Space::single_space()),
            then_body,
            Some(else_part),
        );
        let block = build::block(vec![RightPadded::build(
            if_stmt.with_prefix(Space::format("\n")),
        )]);
        let block = match &*block {
            Js::Block(n) => Rc::new(Js::Block(Block {
                end: Space::format("\n"),
                ..n.clone()
            })),
            _ => unreachable!(),
        };
        let unit = build::compilation_unit("m.js", vec![RightPadded::build(block)]);

        let result = reindented(&unit);
        let Js::CompilationUnit(unit) = &*result else {
            unreachable!()
        };
        let Js::Block(block) = &*unit.statements[0].element else {
            unreachable!()
        };
        let Js::If(if_stmt) = &*block.statements[0].element else {
            unreachable!()
        };
        assert_eq!(if_stmt.prefix.whitespace, "\n    ", "if at block depth");
        assert_eq!(
            if_stmt.then_part.element.prefix().whitespace,
            "\n        ",
            "dangling then-body raised one level"
        );
        let else_part = if_stmt.else_part.as_ref().expect("else kept");
        assert_eq!(
            else_part.prefix().whitespace,
            "\n    ",
            "else aligns with its if, not the raised body"
        );
        let Js::Else(else_part) = &**else_part else {
            unreachable!()
        };
        assert_eq!(
            else_part.body.element.prefix().whitespace,
            "\n        ",
            "dangling else-body raised one level too"
        );
    }
}
