//! Pass 2: the correctness floor beneath the stylistic passes.
//!
//! Wherever two adjacent tokens would merge into one if concatenated —
//! `exportclass`, `returnx`, `elseif` — a single space is inserted. The pass
//! is independent of style configuration and only acts when the edge carries
//! no trivia at all; an existing space or comment already separates the
//! tokens.

use std::rc::Rc;

use jsmod_tree::tree::*;
use jsmod_tree::{SameElement, Space, Tree, TreeExt, same_list};
use jsmod_visitor::visitor::{
    walk_alias, walk_binary, walk_case, walk_class_declaration, walk_else,
    walk_function_declaration, walk_if, walk_import, walk_method_declaration,
    walk_property_declaration, walk_return, walk_unary, walk_variable_declarations,
};
use jsmod_visitor::{Cursor, JsVisitor, is_stopped};

use crate::edit::space_if_empty;

pub struct MinimumViableSpacingVisitor {
    stop_after: Option<Tree>,
}

impl MinimumViableSpacingVisitor {
    pub fn new(stop_after: Option<Tree>) -> MinimumViableSpacingVisitor {
        MinimumViableSpacingVisitor { stop_after }
    }
}

/// Every modifier after the first needs separation from the one before it.
fn separate_modifiers(list: &[Tree]) -> Vec<Tree> {
    list.iter()
        .enumerate()
        .map(|(i, m)| {
            if i > 0 && m.prefix().is_empty() {
                m.with_prefix(Space::single_space())
            } else {
                Rc::clone(m)
            }
        })
        .collect()
}

/// Whether no trivia at all is printed before `tree`'s first token. Chains
/// emit their own prefix immediately followed by the leftmost child's, so
/// the check walks the same path the printer prints.
fn leading_is_empty(tree: &Tree) -> bool {
    if !tree.prefix().is_empty() {
        return false;
    }
    match &**tree {
        Js::Binary(n) => leading_is_empty(&n.left),
        Js::Member(n) => leading_is_empty(&n.object),
        Js::Call(n) => leading_is_empty(&n.callee),
        Js::Ternary(n) => leading_is_empty(&n.condition),
        Js::NamedVariable(n) => leading_is_empty(&n.name),
        Js::ExpressionStatement(n) => leading_is_empty(&n.expression),
        Js::Unary(n) if n.operator.element.is_postfix() => leading_is_empty(&n.expression),
        _ => true,
    }
}

/// A single leading space when the tree touches the token before it.
fn separate(tree: &Tree) -> Tree {
    if leading_is_empty(tree) {
        tree.with_prefix(Space::single_space())
    } else {
        Rc::clone(tree)
    }
}

impl JsVisitor for MinimumViableSpacingVisitor {
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
        if !n.operator.element.is_keyword() {
            return Some(visited);
        }
        let operator = n.operator.with_before(space_if_empty(&n.operator.before));
        let right = separate(&n.right);
        if operator.same_element(&n.operator) && right.same_element(&n.right) {
            return Some(visited);
        }
        Some(Rc::new(Js::Binary(Binary {
            operator,
            right,
            ..n.clone()
        })))
    }

    fn visit_unary(&mut self, n: &Unary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_unary(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Unary(n) = &*visited else {
            unreachable!()
        };
        if !n.operator.element.is_keyword() || n.operator.element.is_postfix() {
            return Some(visited);
        }
        let expression = separate(&n.expression);
        if expression.same_element(&n.expression) {
            return Some(visited);
        }
        Some(Rc::new(Js::Unary(Unary {
            expression,
            ..n.clone()
        })))
    }

    fn visit_return(&mut self, n: &Return, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_return(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Return(n) = &*visited else {
            unreachable!()
        };
        let Some(expression) = &n.expression else {
            return Some(visited);
        };
        let separated = separate(expression);
        if separated.same_element(expression) {
            return Some(visited);
        }
        Some(Rc::new(Js::Return(Return {
            expression: Some(separated),
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
        let Some(pattern) = &n.pattern else {
            return Some(visited);
        };
        let separated = separate(pattern);
        if separated.same_element(pattern) {
            return Some(visited);
        }
        Some(Rc::new(Js::Case(Case {
            pattern: Some(separated),
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
        let separated = matches!(&*n.then_part.element, Js::Block(_))
            || n.then_part.markers.has_semicolon()
            || !n.then_part.after.is_empty()
            || !else_part.prefix().is_empty();
        if separated {
            return Some(visited);
        }
        Some(Rc::new(Js::If(If {
            else_part: Some(else_part.with_prefix(Space::single_space())),
            ..n.clone()
        })))
    }

    fn visit_else(&mut self, n: &Else, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_else(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Else(n) = &*visited else {
            unreachable!()
        };
        if matches!(&*n.body.element, Js::Block(_)) {
            return Some(visited);
        }
        let element = separate(&n.body.element);
        if element.same_element(&n.body.element) {
            return Some(visited);
        }
        let body = n.body.clone().with_element(element);
        Some(Rc::new(Js::Else(Else { body, ..n.clone() })))
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
        let modifiers = separate_modifiers(&n.modifiers);
        let kind = if !n.modifiers.is_empty() {
            n.kind.with_before(space_if_empty(&n.kind.before))
        } else {
            n.kind.clone()
        };
        let mut variables = n.variables.clone();
        if let Some(first) = variables.first_mut() {
            let element = separate(&first.element);
            if !element.same_element(&first.element) {
                *first = first.clone().with_element(element);
            }
        }
        if same_list(&n.modifiers, &modifiers)
            && kind.same_element(&n.kind)
            && same_list(&n.variables, &variables)
        {
            return Some(visited);
        }
        Some(Rc::new(Js::VariableDeclarations(VariableDeclarations {
            modifiers,
            kind,
            variables,
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
        let modifiers = separate_modifiers(&n.modifiers);
        let kind = if !n.decorators.is_empty() || !n.modifiers.is_empty() {
            n.kind.with_before(space_if_empty(&n.kind.before))
        } else {
            n.kind.clone()
        };
        let name = separate(&n.name);
        let extends = n.extends.as_ref().map(|e| {
            let element = separate(&e.element);
            e.with_before(space_if_empty(&e.before)).with_element(element)
        });
        if same_list(&n.modifiers, &modifiers)
            && kind.same_element(&n.kind)
            && name.same_element(&n.name)
            && extends.same_element(&n.extends)
        {
            return Some(visited);
        }
        Some(Rc::new(Js::ClassDeclaration(ClassDeclaration {
            modifiers,
            kind,
            name,
            extends,
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
        let modifiers = separate_modifiers(&n.modifiers);
        let has_leading = !n.decorators.is_empty() || !n.modifiers.is_empty();
        let name = if has_leading && n.markers.generator().is_none() {
            n.name.with_prefix(space_if_empty(n.name.prefix()))
        } else {
            Rc::clone(&n.name)
        };
        if same_list(&n.modifiers, &modifiers) && name.same_element(&n.name) {
            return Some(visited);
        }
        Some(Rc::new(Js::MethodDeclaration(MethodDeclaration {
            modifiers,
            name,
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
        let modifiers = separate_modifiers(&n.modifiers);
        let keyword_prefix = if !n.modifiers.is_empty() {
            space_if_empty(&n.keyword_prefix)
        } else {
            n.keyword_prefix.clone()
        };
        let name = if n.markers.generator().is_none() {
            n.name.with_prefix(space_if_empty(n.name.prefix()))
        } else {
            Rc::clone(&n.name)
        };
        if same_list(&n.modifiers, &modifiers)
            && keyword_prefix == n.keyword_prefix
            && name.same_element(&n.name)
        {
            return Some(visited);
        }
        Some(Rc::new(Js::FunctionDeclaration(FunctionDeclaration {
            modifiers,
            keyword_prefix,
            name,
            ..n.clone()
        })))
    }

    fn visit_property_declaration(
        &mut self,
        n: &PropertyDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        let visited = walk_property_declaration(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::PropertyDeclaration(n) = &*visited else {
            unreachable!()
        };
        if n.modifiers.is_empty() {
            return Some(visited);
        }
        let modifiers = separate_modifiers(&n.modifiers);
        let name = n.name.with_prefix(space_if_empty(n.name.prefix()));
        if same_list(&n.modifiers, &modifiers) && name.same_element(&n.name) {
            return Some(visited);
        }
        Some(Rc::new(Js::PropertyDeclaration(PropertyDeclaration {
            modifiers,
            name,
            ..n.clone()
        })))
    }

    fn visit_import(&mut self, n: &Import, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_import(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Import(n) = &*visited else {
            unreachable!()
        };
        let Some(default_binding) = &n.default_binding else {
            return Some(visited);
        };
        let mut binding = default_binding.clone();
        if binding.element.prefix().is_empty() {
            binding = binding
                .clone()
                .with_element(binding.element.with_prefix(Space::single_space()));
        }
        // `import d from` with nothing between the binding and `from`.
        if n.named.is_none() && binding.after.is_empty() && binding.markers.is_empty() {
            binding = binding.with_after(Space::single_space());
        }
        if binding.same_element(default_binding) {
            return Some(visited);
        }
        Some(Rc::new(Js::Import(Import {
            default_binding: Some(binding),
            ..n.clone()
        })))
    }

    fn visit_alias(&mut self, n: &Alias, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        let visited = walk_alias(self, n, tree, cursor)?;
        if is_stopped(cursor) {
            return Some(visited);
        }
        let Js::Alias(n) = &*visited else {
            unreachable!()
        };
        let property = n.property.with_after(space_if_empty(&n.property.after));
        let alias = separate(&n.alias);
        if property.same_element(&n.property) && alias.same_element(&n.alias) {
            return Some(visited);
        }
        Some(Rc::new(Js::Alias(Alias {
            property,
            alias,
            ..n.clone()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsmod_tree::{ClassKind, LeftPadded, ModifierKind, RightPadded, UnaryOp, build};

    #[test]
    fn separates_modifiers_keyword_and_name() {
        let class = build::class_decl(ClassKind::Class, build::ident("A"), build::block(vec![]));
        let class = match &*class {
            Js::ClassDeclaration(n) => Rc::new(Js::ClassDeclaration(ClassDeclaration {
                modifiers: vec![
                    build::modifier(ModifierKind::Export),
                    build::modifier(ModifierKind::Default),
                ],
                ..n.clone()
            })),
            _ => unreachable!(),
        };
        let unit = build::compilation_unit("m.js", vec![RightPadded::build(class)]);

        let spaced = MinimumViableSpacingVisitor::new(None)
            .visit_root(&unit)
            .expect("root survives");
        let Js::CompilationUnit(unit) = &*spaced else {
            unreachable!()
        };
        let Js::ClassDeclaration(class) = &*unit.statements[0].element else {
            unreachable!()
        };
        assert_eq!(class.modifiers[1].prefix().whitespace, " ");
        assert_eq!(class.kind.before.whitespace, " ");
        assert_eq!(class.name.prefix().whitespace, " ");
    }

    #[test]
    fn return_value_and_keyword_unary_gain_separation() {
        let unary = build::unary(LeftPadded::build(UnaryOp::TypeOf), build::ident("x"));
        let statement = build::return_stmt(Some(unary));
        let unit = build::compilation_unit("m.js", vec![RightPadded::build(statement)]);

        let spaced = MinimumViableSpacingVisitor::new(None)
            .visit_root(&unit)
            .expect("root survives");
        let Js::CompilationUnit(unit) = &*spaced else {
            unreachable!()
        };
        let Js::Return(ret) = &*unit.statements[0].element else {
            unreachable!()
        };
        let expression = ret.expression.as_ref().expect("return value kept");
        assert_eq!(expression.prefix().whitespace, " ");
        let Js::Unary(unary) = &**expression else {
            unreachable!()
        };
        assert_eq!(unary.expression.prefix().whitespace, " ");
    }

    #[test]
    fn existing_trivia_is_left_alone() {
        let statement = build::return_stmt(Some(
            build::ident("x").with_prefix(Space::format("  ")),
        ));
        let unit = build::compilation_unit("m.js", vec![RightPadded::build(statement)]);
        let spaced = MinimumViableSpacingVisitor::new(None)
            .visit_root(&unit)
            .expect("root survives");
        assert!(Rc::ptr_eq(&unit, &spaced));
    }

    #[test]
    fn trivia_on_the_leftmost_descendant_counts_as_separation() {
        // The space sits on the variable's name, not the variable itself;
        // the printed text is separated either way.
        let declaration = build::var_decl(
            jsmod_tree::VariableKind::Const,
            vec![RightPadded::build(build::named_var(
                build::ident("a").with_prefix(Space::single_space()),
                None,
            ))],
        );
        let unit = build::compilation_unit("m.js", vec![RightPadded::build(declaration)]);
        let spaced = MinimumViableSpacingVisitor::new(None)
            .visit_root(&unit)
            .expect("root survives");
        assert!(
            Rc::ptr_eq(&unit, &spaced),
            "nested leading trivia must not trigger a second space"
        );
    }
}
