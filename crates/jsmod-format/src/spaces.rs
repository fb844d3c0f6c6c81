//! Pass 5: fine-grained inter-token spacing from a `SpacesStyle`.
//!
//! Covers spacing around binary operators (bucketed by operator category),
//! around the ternary's `?` and `:`, before the opening parenthesis of
//! calls, function declarations, and control constructs, just inside those
//! parentheses and inside brackets, and around list separators. Edges that
//! carry comments or line breaks are never rewritten; the pass only adjusts
//! plain horizontal spacing.

use std::rc::Rc;

use jsmod_tree::tree::*;
use jsmod_tree::{
    Container, OperatorCategory, RightPadded, SameElement, SpacesStyle, Tree, TreeExt, same_list,
};
use jsmod_visitor::visitor::{
    walk_array_literal, walk_binary, walk_block, walk_call, walk_control_parentheses,
    walk_for_control, walk_function_declaration, walk_method_declaration, walk_ternary,
    walk_variable_declarations,
};
use jsmod_visitor::{Cursor, JsVisitor, is_stopped};

use crate::edit::spacing;

pub struct SpacesVisitor {
    style: SpacesStyle,
    stop_after: Option<Tree>,
}

impl SpacesVisitor {
    pub fn new(style: SpacesStyle, stop_after: Option<Tree>) -> SpacesVisitor {
        SpacesVisitor { style, stop_after }
    }

    /// Keyword operators keep their spaces no matter what the style says;
    /// removing them would merge tokens.
    fn operator_want(&self, op: BinaryOp) -> bool {
        if op.is_keyword() {
            return true;
        }
        let around = &self.style.around_operators;
        match op.category() {
            OperatorCategory::Assignment => around.assignment,
            OperatorCategory::Logical => around.logical,
            OperatorCategory::Equality => around.equality,
            OperatorCategory::Relational => around.relational,
            OperatorCategory::Bitwise => around.bitwise,
            OperatorCategory::Additive => around.additive,
            OperatorCategory::Multiplicative => around.multiplicative,
            OperatorCategory::Shift => around.shift,
        }
    }

    /// Rewrite a delimited list's edges: the space before the opening
    /// delimiter (when configured), the spaces just inside the delimiters,
    /// and the separator spacing between elements. An empty list — one
    /// `Empty` placeholder — keeps its delimiters tight.
    fn format_container(
        &self,
        container: &Container<Tree>,
        before_want: Option<bool>,
        within_want: Option<bool>,
    ) -> Container<Tree> {
        let before = match before_want {
            Some(want) => spacing(&container.before, want),
            None => container.before.clone(),
        };
        let only_empty = container.elements.len() == 1
            && matches!(&*container.elements[0].element, Js::Empty(_));
        let last = container.elements.len().saturating_sub(1);
        let elements: Vec<RightPadded<Tree>> = container
            .elements
            .iter()
            .enumerate()
            .map(|(i, padded)| {
                let mut element = Rc::clone(&padded.element);
                let mut after = padded.after.clone();
                if i > 0 {
                    element =
                        element.with_prefix(spacing(element.prefix(), self.style.other.after_comma));
                } else if let Some(want) = within_want {
                    element = element.with_prefix(spacing(element.prefix(), want && !only_empty));
                }
                if i < last {
                    after = spacing(&after, self.style.other.before_comma);
                } else if let Some(want) = within_want {
                    after = spacing(&after, want && !only_empty);
                }
                if element.same_element(&padded.element) && after == padded.after {
                    padded.clone()
                } else {
                    RightPadded {
                        element,
                        after,
                        markers: padded.markers.clone(),
                    }
                }
            })
            .collect();
        if before == container.before && same_list(&container.elements, &elements) {
            container.clone()
        } else {
            Container {
                before,
                elements,
                markers: container.markers.clone(),
            }
        }
    }
}

impl JsVisitor for SpacesVisitor {
    fn stop_after(&self) -> Option<&Tree> {
        self.stop_after.as_ref()
    }

    fn visit_binary(&mut self, n: &Binary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_binary(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Binary(n) = &*visited else {
            unreachable!()
        };
        let want = self.operator_want(n.operator.element);
        let operator = n.operator.with_before(spacing(&n.operator.before, want));
        let right = n.right.with_prefix(spacing(n.right.prefix(), want));
        if operator.same_element(&n.operator) && right.same_element(&n.right) {
            return Some(visited);
        }
        Some(Rc::new(Js::Binary(Binary {
            operator,
            right,
            ..n.clone()
        })))
    }

    fn visit_ternary(&mut self, n: &Ternary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_ternary(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Ternary(n) = &*visited else {
            unreachable!()
        };
        let ternary = &self.style.ternary_operator;
        let true_part = n
            .true_part
            .with_before(spacing(&n.true_part.before, ternary.before_question))
            .with_element(
                n.true_part
                    .element
                    .with_prefix(spacing(n.true_part.element.prefix(), ternary.after_question)),
            );
        let false_part = n
            .false_part
            .with_before(spacing(&n.false_part.before, ternary.before_colon))
            .with_element(
                n.false_part
                    .element
                    .with_prefix(spacing(n.false_part.element.prefix(), ternary.after_colon)),
            );
        if true_part.same_element(&n.true_part) && false_part.same_element(&n.false_part) {
            return Some(visited);
        }
        Some(Rc::new(Js::Ternary(Ternary {
            true_part,
            false_part,
            ..n.clone()
        })))
    }

    fn visit_call(&mut self, n: &Call, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_call(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Call(n) = &*visited else {
            unreachable!()
        };
        let arguments = self.format_container(
            &n.arguments,
            Some(self.style.before_parentheses.function_call),
            Some(self.style.within.function_call_parentheses),
        );
        if arguments.same_element(&n.arguments) {
            return Some(visited);
        }
        Some(Rc::new(Js::Call(Call {
            arguments,
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
        let parameters = self.format_container(
            &n.parameters,
            Some(self.style.before_parentheses.function_declaration),
            Some(self.style.within.function_declaration_parentheses),
        );
        if parameters.same_element(&n.parameters) {
            return Some(visited);
        }
        Some(Rc::new(Js::MethodDeclaration(MethodDeclaration {
            parameters,
            ..n.clone()
        })))
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
        let parameters = self.format_container(
            &n.parameters,
            Some(self.style.before_parentheses.function_declaration),
            Some(self.style.within.function_declaration_parentheses),
        );
        if parameters.same_element(&n.parameters) {
            return Some(visited);
        }
        Some(Rc::new(Js::FunctionDeclaration(FunctionDeclaration {
            parameters,
            ..n.clone()
        })))
    }

    fn visit_array_literal(
        &mut self,
        n: &ArrayLiteral,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_array_literal(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::ArrayLiteral(n) = &*visited else {
            unreachable!()
        };
        let elements = self.format_container(&n.elements, None, Some(self.style.within.brackets));
        if elements.same_element(&n.elements) {
            return Some(visited);
        }
        Some(Rc::new(Js::ArrayLiteral(ArrayLiteral {
            elements,
            ..n.clone()
        })))
    }

    fn visit_block(&mut self, n: &Block, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_block(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Some(parent) = cursor.parent().and_then(|p| p.tree().cloned()) else {
            return Some(visited);
        };
        let braces = &self.style.before_left_brace;
        let want = match &*parent {
            Js::ClassDeclaration(p) if Rc::ptr_eq(&p.body, tree) => braces.class_left_brace,
            Js::MethodDeclaration(p)
                if p.body.as_ref().is_some_and(|b| Rc::ptr_eq(b, tree)) =>
            {
                braces.function_left_brace
            }
            Js::FunctionDeclaration(p)
                if p.body.as_ref().is_some_and(|b| Rc::ptr_eq(b, tree)) =>
            {
                braces.function_left_brace
            }
            Js::If(p) if Rc::ptr_eq(&p.then_part.element, tree) => braces.if_left_brace,
            Js::Else(p) if Rc::ptr_eq(&p.body.element, tree) => braces.else_left_brace,
            Js::For(p) if Rc::ptr_eq(&p.body.element, tree) => braces.for_left_brace,
            Js::While(p) if Rc::ptr_eq(&p.body.element, tree) => braces.while_left_brace,
            Js::Switch(p) if Rc::ptr_eq(&p.cases, tree) => braces.switch_left_brace,
            Js::Try(p) if Rc::ptr_eq(&p.body, tree) => braces.try_left_brace,
            Js::Try(p)
                if p.finally_block
                    .as_ref()
                    .is_some_and(|f| Rc::ptr_eq(&f.element, tree)) =>
            {
                braces.finally_left_brace
            }
            Js::Catch(p) if Rc::ptr_eq(&p.body, tree) => braces.catch_left_brace,
            _ => return Some(visited),
        };
        let Js::Block(n) = &*visited else {
            unreachable!()
        };
        let prefix = spacing(&n.prefix, want);
        if prefix == n.prefix {
            return Some(visited);
        }
        Some(Rc::new(Js::Block(Block {
            prefix,
            ..n.clone()
        })))
    }

    fn visit_control_parentheses(
        &mut self,
        n: &ControlParentheses,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_control_parentheses(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Some(parent) = cursor.parent().and_then(|p| p.tree().cloned()) else {
            return Some(visited);
        };
        let before = &self.style.before_parentheses;
        let within = &self.style.within;
        let (before_want, within_want) = match &*parent {
            Js::If(p) if Rc::ptr_eq(&p.condition, tree) => (before.if_, within.if_parentheses),
            Js::While(p) if Rc::ptr_eq(&p.condition, tree) => (before.while_, within.while_parentheses),
            Js::Switch(p) if Rc::ptr_eq(&p.selector, tree) => {
                (before.switch_, within.switch_parentheses)
            }
            Js::Catch(p) if p.parameter.as_ref().is_some_and(|c| Rc::ptr_eq(c, tree)) => {
                (before.catch_, within.catch_parentheses)
            }
            _ => return Some(visited),
        };
        let Js::ControlParentheses(n) = &*visited else {
            unreachable!()
        };
        let prefix = spacing(&n.prefix, before_want);
        let inner = n
            .tree
            .with_after(spacing(&n.tree.after, within_want))
            .with_element(
                n.tree
                    .element
                    .with_prefix(spacing(n.tree.element.prefix(), within_want)),
            );
        if prefix == n.prefix && inner.same_element(&n.tree) {
            return Some(visited);
        }
        Some(Rc::new(Js::ControlParentheses(ControlParentheses {
            prefix,
            tree: inner,
            ..n.clone()
        })))
    }

    fn visit_for_control(&mut self, n: &ForControl, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_for_control(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::ForControl(n) = &*visited else {
            unreachable!()
        };
        let want_within = self.style.within.for_parentheses;
        let prefix = spacing(&n.prefix, self.style.before_parentheses.for_);
        let init = if matches!(&*n.init.element, Js::Empty(_)) {
            n.init.clone()
        } else {
            n.init.clone().with_element(
                n.init
                    .element
                    .with_prefix(spacing(n.init.element.prefix(), want_within)),
            )
        };
        let update = if matches!(&*n.update.element, Js::Empty(_)) {
            n.update.clone()
        } else {
            n.update.with_after(spacing(&n.update.after, want_within))
        };
        if prefix == n.prefix && init.same_element(&n.init) && update.same_element(&n.update) {
            return Some(visited);
        }
        Some(Rc::new(Js::ForControl(ForControl {
            prefix,
            init,
            update,
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
        let last = n.variables.len().saturating_sub(1);
        let variables: Vec<RightPadded<Tree>> = n
            .variables
            .iter()
            .enumerate()
            .map(|(i, padded)| {
                let mut element = Rc::clone(&padded.element);
                let mut after = padded.after.clone();
                if i > 0 {
                    element =
                        element.with_prefix(spacing(element.prefix(), self.style.other.after_comma));
                }
                if i < last {
                    after = spacing(&after, self.style.other.before_comma);
                }
                if element.same_element(&padded.element) && after == padded.after {
                    padded.clone()
                } else {
                    RightPadded {
                        element,
                        after,
                        markers: padded.markers.clone(),
                    }
                }
            })
            .collect();
        if same_list(&n.variables, &variables) {
            return Some(visited);
        }
        Some(Rc::new(Js::VariableDeclarations(VariableDeclarations {
            variables,
            ..n.clone()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsmod_tree::{LeftPadded, Space, build};

    #[test]
    fn operator_spacing_follows_category_configuration() {
        let sum = build::binary(
            build::ident("a"),
            LeftPadded::build(BinaryOp::Add),
            build::ident("b"),
        );
        let unit =
            build::compilation_unit("m.js", vec![RightPadded::build(build::expr_stmt(sum))]);

        let spaced = SpacesVisitor::new(SpacesStyle::default(), None)
            .visit_root(&unit)
            .expect("root survives");
        let Js::CompilationUnit(unit) = &*spaced else {
            unreachable!()
        };
        let Js::ExpressionStatement(statement) = &*unit.statements[0].element else {
            unreachable!()
        };
        let Js::Binary(sum) = &*statement.expression else {
            unreachable!()
        };
        assert_eq!(sum.operator.before.whitespace, " ");
        assert_eq!(sum.right.prefix().whitespace, " ");

        let mut no_additive = SpacesStyle::default();
        no_additive.around_operators.additive = false;
        let tightened = SpacesVisitor::new(no_additive, None)
            .visit_root(&spaced)
            .expect("root survives");
        let Js::CompilationUnit(unit) = &*tightened else {
            unreachable!()
        };
        let Js::ExpressionStatement(statement) = &*unit.statements[0].element else {
            unreachable!()
        };
        let Js::Binary(sum) = &*statement.expression else {
            unreachable!()
        };
        assert_eq!(sum.operator.before.whitespace, "");
        assert_eq!(sum.right.prefix().whitespace, "");
    }

    #[test]
    fn if_condition_gains_space_before_parenthesis() {
        let condition = build::control_parens(RightPadded::build(build::ident("x")));
        let if_stmt = build::if_stmt(
            condition,
            RightPadded::build(build::block(vec![]).with_prefix(Space::single_space())),
            None,
        );
        let unit = build::compilation_unit("m.js", vec![RightPadded::build(if_stmt)]);

        let spaced = SpacesVisitor::new(SpacesStyle::default(), None)
            .visit_root(&unit)
            .expect("root survives");
        let Js::CompilationUnit(unit) = &*spaced else {
            unreachable!()
        };
        let Js::If(if_stmt) = &*unit.statements[0].element else {
            unreachable!()
        };
        assert_eq!(
            if_stmt.condition.prefix().whitespace,
            " ",
            "if_ before-parentheses defaults on"
        );
    }

    #[test]
    fn comma_spacing_in_call_arguments() {
        let call = build::call(
            build::ident("f"),
            vec![
                RightPadded::new(build::ident("a"), Space::single_space()),
                RightPadded::build(build::ident("b")),
            ],
        );
        let unit =
            build::compilation_unit("m.js", vec![RightPadded::build(build::expr_stmt(call))]);

        let spaced = SpacesVisitor::new(SpacesStyle::default(), None)
            .visit_root(&unit)
            .expect("root survives");
        let Js::CompilationUnit(unit) = &*spaced else {
            unreachable!()
        };
        let Js::ExpressionStatement(statement) = &*unit.statements[0].element else {
            unreachable!()
        };
        let Js::Call(call) = &*statement.expression else {
            unreachable!()
        };
        assert_eq!(
            call.arguments.elements[0].after.whitespace, "",
            "no space before comma by default"
        );
        assert_eq!(
            call.arguments.elements[1].element.prefix().whitespace,
            " ",
            "one space after comma by default"
        );
    }
}
