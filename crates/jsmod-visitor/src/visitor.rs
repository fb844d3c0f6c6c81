//! The generic traversal engine.
//!
//! [`JsVisitor`] dispatches over the closed node-kind union and rebuilds
//! each node with update-if-changed semantics: a visit that changes nothing
//! returns the *original* `Rc`, so `before`/`after` pointer comparisons stay
//! meaningful and cheap. Default per-kind methods delegate to `walk_*` free
//! functions (the identity traversal); overrides call the matching walker to
//! keep descending, then apply their own edits.
//!
//! Traversal is strict pre-order: a node's prefix and markers are revisited
//! before any child, children in declared field order, list elements in
//! index order. Returning `None` from a visit means "delete this node";
//! list-visiting callers drop the element, while callers that cannot stand
//! without the child treat it as a malformed transformation and fail fast.
//!
//! A pass may carry a stop scope ([`JsVisitor::stop_after`]). Once the
//! default `post_visit` sees the scope node (by id, surviving rebuilds), a
//! stop flag is written on the root cursor and every later `visit` call in
//! that traversal short-circuits, returning nodes unchanged.

use std::rc::Rc;

use jsmod_tree::tree::*;
use jsmod_tree::{
    Container, ContainerLoc, LeftLoc, LeftPadded, Markers, RightLoc, RightPadded, SameElement,
    Space, SpaceLoc, same_list,
};
use tracing::trace;

use crate::cursor::{Cursor, Message};

/// Root-cursor message key for the stop-after-scope short-circuit.
pub const STOP_AFTER_KEY: &str = "jsmod.visitor.stopAfter";

/// Whether a stop flag has been recorded for this traversal.
pub fn is_stopped(cursor: &Cursor) -> bool {
    cursor
        .root_cursor()
        .message(STOP_AFTER_KEY)
        .and_then(|m| m.as_flag())
        .unwrap_or(false)
}

pub trait JsVisitor {
    /// When set, the pass stops rewriting once this node (matched by id, in
    /// pre-order) has been fully visited.
    fn stop_after(&self) -> Option<&Tree> {
        None
    }

    /// Run a full traversal from a fresh root cursor.
    fn visit_root(&mut self, tree: &Tree) -> Option<Tree> {
        self.visit(tree, &Cursor::root())
    }

    /// Visit one node under `cursor`. Returns `None` to signal deletion.
    fn visit(&mut self, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        if is_stopped(cursor) {
            return Some(Rc::clone(tree));
        }
        let cursor = cursor.child(Rc::clone(tree));
        self.pre_visit(tree, &cursor);
        let visited = self.accept(tree, &cursor);
        if let Some(result) = &visited {
            self.post_visit(result, &cursor);
        }
        visited
    }

    /// Dispatch on the node kind. The match is exhaustive over the closed
    /// union: a kind this engine version does not know cannot be
    /// constructed, so there is no silently-ignored default arm.
    fn accept(&mut self, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        match &**tree {
            Js::CompilationUnit(n) => self.visit_compilation_unit(n, tree, cursor),
            Js::Identifier(n) => self.visit_identifier(n, tree, cursor),
            Js::Literal(n) => self.visit_literal(n, tree, cursor),
            Js::Binary(n) => self.visit_binary(n, tree, cursor),
            Js::Unary(n) => self.visit_unary(n, tree, cursor),
            Js::Ternary(n) => self.visit_ternary(n, tree, cursor),
            Js::Parentheses(n) => self.visit_parentheses(n, tree, cursor),
            Js::Call(n) => self.visit_call(n, tree, cursor),
            Js::Member(n) => self.visit_member(n, tree, cursor),
            Js::ArrayLiteral(n) => self.visit_array_literal(n, tree, cursor),
            Js::Alias(n) => self.visit_alias(n, tree, cursor),
            Js::Empty(n) => self.visit_empty(n, tree, cursor),
            Js::Block(n) => self.visit_block(n, tree, cursor),
            Js::If(n) => self.visit_if(n, tree, cursor),
            Js::Else(n) => self.visit_else(n, tree, cursor),
            Js::While(n) => self.visit_while(n, tree, cursor),
            Js::For(n) => self.visit_for(n, tree, cursor),
            Js::ForControl(n) => self.visit_for_control(n, tree, cursor),
            Js::ControlParentheses(n) => self.visit_control_parentheses(n, tree, cursor),
            Js::Return(n) => self.visit_return(n, tree, cursor),
            Js::ExpressionStatement(n) => self.visit_expression_statement(n, tree, cursor),
            Js::VariableDeclarations(n) => self.visit_variable_declarations(n, tree, cursor),
            Js::NamedVariable(n) => self.visit_named_variable(n, tree, cursor),
            Js::ClassDeclaration(n) => self.visit_class_declaration(n, tree, cursor),
            Js::MethodDeclaration(n) => self.visit_method_declaration(n, tree, cursor),
            Js::FunctionDeclaration(n) => self.visit_function_declaration(n, tree, cursor),
            Js::PropertyDeclaration(n) => self.visit_property_declaration(n, tree, cursor),
            Js::Import(n) => self.visit_import(n, tree, cursor),
            Js::Switch(n) => self.visit_switch(n, tree, cursor),
            Js::Case(n) => self.visit_case(n, tree, cursor),
            Js::Try(n) => self.visit_try(n, tree, cursor),
            Js::Catch(n) => self.visit_catch(n, tree, cursor),
            Js::Annotation(n) => self.visit_annotation(n, tree, cursor),
            Js::Modifier(n) => self.visit_modifier(n, tree, cursor),
        }
    }

    /// Hook invoked before dispatch on every node.
    fn pre_visit(&mut self, _tree: &Tree, _cursor: &Cursor) {}

    /// Hook invoked after dispatch on every node. The default performs
    /// stop-scope bookkeeping; overrides that want that behavior must keep
    /// calling it.
    fn post_visit(&mut self, tree: &Tree, cursor: &Cursor) {
        if let Some(stop) = self.stop_after() {
            if stop.id() == tree.id() {
                trace!(kind = tree.kind_name(), "reached stop scope");
                cursor
                    .root_cursor()
                    .put_message(STOP_AFTER_KEY, Message::Flag(true));
            }
        }
    }

    /// Primary mutation point for formatting passes; identity by default.
    fn visit_space(&mut self, space: &Space, _loc: SpaceLoc, _cursor: &Cursor) -> Space {
        space.clone()
    }

    /// Identity by default. Unknown marker kinds ride along untouched.
    fn visit_markers(&mut self, markers: &Markers, _cursor: &Cursor) -> Markers {
        markers.clone()
    }

    // =========================================================================
    // Child-visiting helpers
    // =========================================================================

    /// Visit a child the parent cannot stand without.
    fn visit_required(&mut self, tree: &Tree, cursor: &Cursor) -> Tree {
        self.visit(tree, cursor).unwrap_or_else(|| {
            panic!(
                "visitor deleted a required {} child; the parent cannot be rebuilt",
                tree.kind_name()
            )
        })
    }

    fn visit_optional(&mut self, tree: &Option<Tree>, cursor: &Cursor) -> Option<Tree> {
        tree.as_ref().and_then(|t| self.visit(t, cursor))
    }

    fn visit_right_padded(
        &mut self,
        padded: &RightPadded<Tree>,
        loc: RightLoc,
        cursor: &Cursor,
    ) -> Option<RightPadded<Tree>> {
        let element = self.visit(&padded.element, cursor)?;
        let after = self.visit_space(&padded.after, SpaceLoc::After(loc), cursor);
        let markers = self.visit_markers(&padded.markers, cursor);
        Some(
            if element.same_element(&padded.element)
                && after == padded.after
                && markers == padded.markers
            {
                padded.clone()
            } else {
                RightPadded {
                    element,
                    after,
                    markers,
                }
            },
        )
    }

    fn visit_right_padded_required(
        &mut self,
        padded: &RightPadded<Tree>,
        loc: RightLoc,
        cursor: &Cursor,
    ) -> RightPadded<Tree> {
        let kind = padded.element.kind_name();
        self.visit_right_padded(padded, loc, cursor).unwrap_or_else(|| {
            panic!("visitor deleted a required padded {kind} element")
        })
    }

    fn visit_left_padded(
        &mut self,
        padded: &LeftPadded<Tree>,
        loc: LeftLoc,
        cursor: &Cursor,
    ) -> Option<LeftPadded<Tree>> {
        let before = self.visit_space(&padded.before, SpaceLoc::Before(loc), cursor);
        let element = self.visit(&padded.element, cursor)?;
        let markers = self.visit_markers(&padded.markers, cursor);
        Some(
            if element.same_element(&padded.element)
                && before == padded.before
                && markers == padded.markers
            {
                padded.clone()
            } else {
                LeftPadded {
                    before,
                    element,
                    markers,
                }
            },
        )
    }

    fn visit_left_padded_required(
        &mut self,
        padded: &LeftPadded<Tree>,
        loc: LeftLoc,
        cursor: &Cursor,
    ) -> LeftPadded<Tree> {
        let kind = padded.element.kind_name();
        self.visit_left_padded(padded, loc, cursor).unwrap_or_else(|| {
            panic!("visitor deleted a required padded {kind} element")
        })
    }

    /// Revisit the padding around a non-tree token payload (an operator or
    /// keyword); only the space and markers are visitable.
    fn visit_token_padding<T: Clone + PartialEq>(
        &mut self,
        padded: &LeftPadded<T>,
        loc: LeftLoc,
        cursor: &Cursor,
    ) -> LeftPadded<T> {
        let before = self.visit_space(&padded.before, SpaceLoc::Before(loc), cursor);
        let markers = self.visit_markers(&padded.markers, cursor);
        if before == padded.before && markers == padded.markers {
            padded.clone()
        } else {
            LeftPadded {
                before,
                element: padded.element.clone(),
                markers,
            }
        }
    }

    fn visit_container(
        &mut self,
        container: &Container<Tree>,
        loc: ContainerLoc,
        cursor: &Cursor,
    ) -> Container<Tree> {
        let before = self.visit_space(&container.before, SpaceLoc::ContainerBefore(loc), cursor);
        let markers = self.visit_markers(&container.markers, cursor);
        let elements: Vec<RightPadded<Tree>> = container
            .elements
            .iter()
            .filter_map(|p| self.visit_right_padded(p, RightLoc::ContainerElement, cursor))
            .collect();
        if before == container.before
            && markers == container.markers
            && same_list(&container.elements, &elements)
        {
            container.clone()
        } else {
            Container {
                before,
                elements,
                markers,
            }
        }
    }

    /// Order-preserving list visit; elements filtered to `None` are dropped.
    fn visit_stmt_list(
        &mut self,
        list: &[RightPadded<Tree>],
        loc: RightLoc,
        cursor: &Cursor,
    ) -> Vec<RightPadded<Tree>> {
        list.iter()
            .filter_map(|p| self.visit_right_padded(p, loc, cursor))
            .collect()
    }

    /// Order-preserving visit of a plain tree list (modifiers, decorators).
    fn visit_trees(&mut self, list: &[Tree], cursor: &Cursor) -> Vec<Tree> {
        list.iter().filter_map(|t| self.visit(t, cursor)).collect()
    }

    // =========================================================================
    // Per-kind visits (identity traversal by default)
    // =========================================================================

    fn visit_compilation_unit(
        &mut self,
        n: &CompilationUnit,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_compilation_unit(self, n, tree, cursor)
    }

    fn visit_identifier(&mut self, n: &Identifier, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_identifier(self, n, tree, cursor)
    }

    fn visit_literal(&mut self, n: &Literal, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_literal(self, n, tree, cursor)
    }

    fn visit_binary(&mut self, n: &Binary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_binary(self, n, tree, cursor)
    }

    fn visit_unary(&mut self, n: &Unary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_unary(self, n, tree, cursor)
    }

    fn visit_ternary(&mut self, n: &Ternary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_ternary(self, n, tree, cursor)
    }

    fn visit_parentheses(&mut self, n: &Parentheses, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_parentheses(self, n, tree, cursor)
    }

    fn visit_call(&mut self, n: &Call, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_call(self, n, tree, cursor)
    }

    fn visit_member(&mut self, n: &Member, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_member(self, n, tree, cursor)
    }

    fn visit_array_literal(
        &mut self,
        n: &ArrayLiteral,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_array_literal(self, n, tree, cursor)
    }

    fn visit_alias(&mut self, n: &Alias, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_alias(self, n, tree, cursor)
    }

    fn visit_empty(&mut self, n: &Empty, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_empty(self, n, tree, cursor)
    }

    fn visit_block(&mut self, n: &Block, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_block(self, n, tree, cursor)
    }

    fn visit_if(&mut self, n: &If, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_if(self, n, tree, cursor)
    }

    fn visit_else(&mut self, n: &Else, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_else(self, n, tree, cursor)
    }

    fn visit_while(&mut self, n: &While, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_while(self, n, tree, cursor)
    }

    fn visit_for(&mut self, n: &For, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_for(self, n, tree, cursor)
    }

    fn visit_for_control(&mut self, n: &ForControl, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_for_control(self, n, tree, cursor)
    }

    fn visit_control_parentheses(
        &mut self,
        n: &ControlParentheses,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_control_parentheses(self, n, tree, cursor)
    }

    fn visit_return(&mut self, n: &Return, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_return(self, n, tree, cursor)
    }

    fn visit_expression_statement(
        &mut self,
        n: &ExpressionStatement,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_expression_statement(self, n, tree, cursor)
    }

    fn visit_variable_declarations(
        &mut self,
        n: &VariableDeclarations,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_variable_declarations(self, n, tree, cursor)
    }

    fn visit_named_variable(
        &mut self,
        n: &NamedVariable,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_named_variable(self, n, tree, cursor)
    }

    fn visit_class_declaration(
        &mut self,
        n: &ClassDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_class_declaration(self, n, tree, cursor)
    }

    fn visit_method_declaration(
        &mut self,
        n: &MethodDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_method_declaration(self, n, tree, cursor)
    }

    fn visit_function_declaration(
        &mut self,
        n: &FunctionDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_function_declaration(self, n, tree, cursor)
    }

    fn visit_property_declaration(
        &mut self,
        n: &PropertyDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        walk_property_declaration(self, n, tree, cursor)
    }

    fn visit_import(&mut self, n: &Import, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_import(self, n, tree, cursor)
    }

    fn visit_switch(&mut self, n: &Switch, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_switch(self, n, tree, cursor)
    }

    fn visit_case(&mut self, n: &Case, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_case(self, n, tree, cursor)
    }

    fn visit_try(&mut self, n: &Try, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_try(self, n, tree, cursor)
    }

    fn visit_catch(&mut self, n: &Catch, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_catch(self, n, tree, cursor)
    }

    fn visit_annotation(&mut self, n: &Annotation, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_annotation(self, n, tree, cursor)
    }

    fn visit_modifier(&mut self, n: &Modifier, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        walk_modifier(self, n, tree, cursor)
    }
}

// =============================================================================
// Identity walkers
// =============================================================================

macro_rules! leaf_walk {
    ($name:ident, $struct:ident, $variant:ident) => {
        pub fn $name<V: JsVisitor + ?Sized>(
            v: &mut V,
            n: &$struct,
            tree: &Tree,
            cursor: &Cursor,
        ) -> Option<Tree> {
            let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
            let markers = v.visit_markers(&n.markers, cursor);
            if prefix == n.prefix && markers == n.markers {
                return Some(Rc::clone(tree));
            }
            Some(Rc::new(Js::$variant($struct {
                prefix,
                markers,
                ..n.clone()
            })))
        }
    };
}

leaf_walk!(walk_identifier, Identifier, Identifier);
leaf_walk!(walk_literal, Literal, Literal);
leaf_walk!(walk_empty, Empty, Empty);
leaf_walk!(walk_modifier, Modifier, Modifier);

pub fn walk_compilation_unit<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &CompilationUnit,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let statements = v.visit_stmt_list(&n.statements, RightLoc::Statement, cursor);
    let eof = v.visit_space(&n.eof, SpaceLoc::CompilationUnitEof, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && same_list(&n.statements, &statements)
        && eof == n.eof
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::CompilationUnit(CompilationUnit {
        id: n.id,
        prefix,
        markers,
        source_path: n.source_path.clone(),
        statements,
        eof,
    })))
}

pub fn walk_binary<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Binary,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let left = v.visit_required(&n.left, cursor);
    let operator = v.visit_token_padding(&n.operator, LeftLoc::BinaryOperator, cursor);
    let right = v.visit_required(&n.right, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && left.same_element(&n.left)
        && operator.same_element(&n.operator)
        && right.same_element(&n.right)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Binary(Binary {
        id: n.id,
        prefix,
        markers,
        left,
        operator,
        right,
    })))
}

pub fn walk_unary<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Unary,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let operator = v.visit_token_padding(&n.operator, LeftLoc::UnaryOperator, cursor);
    let expression = v.visit_required(&n.expression, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && operator.same_element(&n.operator)
        && expression.same_element(&n.expression)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Unary(Unary {
        id: n.id,
        prefix,
        markers,
        operator,
        expression,
    })))
}

pub fn walk_ternary<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Ternary,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let condition = v.visit_required(&n.condition, cursor);
    let true_part = v.visit_left_padded_required(&n.true_part, LeftLoc::TernaryTrue, cursor);
    let false_part = v.visit_left_padded_required(&n.false_part, LeftLoc::TernaryFalse, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && condition.same_element(&n.condition)
        && true_part.same_element(&n.true_part)
        && false_part.same_element(&n.false_part)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Ternary(Ternary {
        id: n.id,
        prefix,
        markers,
        condition,
        true_part,
        false_part,
    })))
}

pub fn walk_parentheses<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Parentheses,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let inner = v.visit_right_padded_required(&n.tree, RightLoc::ParenthesizedTree, cursor);
    if prefix == n.prefix && markers == n.markers && inner.same_element(&n.tree) {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Parentheses(Parentheses {
        id: n.id,
        prefix,
        markers,
        tree: inner,
    })))
}

pub fn walk_call<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Call,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let callee = v.visit_required(&n.callee, cursor);
    let arguments = v.visit_container(&n.arguments, ContainerLoc::CallArguments, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && callee.same_element(&n.callee)
        && arguments.same_element(&n.arguments)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Call(Call {
        id: n.id,
        prefix,
        markers,
        callee,
        arguments,
    })))
}

pub fn walk_member<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Member,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let object = v.visit_required(&n.object, cursor);
    let name = v.visit_left_padded_required(&n.name, LeftLoc::MemberName, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && object.same_element(&n.object)
        && name.same_element(&n.name)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Member(Member {
        id: n.id,
        prefix,
        markers,
        object,
        name,
    })))
}

pub fn walk_array_literal<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &ArrayLiteral,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let elements = v.visit_container(&n.elements, ContainerLoc::ArrayElements, cursor);
    if prefix == n.prefix && markers == n.markers && elements.same_element(&n.elements) {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::ArrayLiteral(ArrayLiteral {
        id: n.id,
        prefix,
        markers,
        elements,
    })))
}

pub fn walk_alias<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Alias,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let property = v.visit_right_padded_required(&n.property, RightLoc::AliasProperty, cursor);
    let alias = v.visit_required(&n.alias, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && property.same_element(&n.property)
        && alias.same_element(&n.alias)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Alias(Alias {
        id: n.id,
        prefix,
        markers,
        property,
        alias,
    })))
}

pub fn walk_block<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Block,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let statements = v.visit_stmt_list(&n.statements, RightLoc::BlockStatement, cursor);
    let end = v.visit_space(&n.end, SpaceLoc::BlockEnd, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && same_list(&n.statements, &statements)
        && end == n.end
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Block(Block {
        id: n.id,
        prefix,
        markers,
        statements,
        end,
    })))
}

pub fn walk_if<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &If,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let condition = v.visit_required(&n.condition, cursor);
    let then_part = v.visit_right_padded_required(&n.then_part, RightLoc::IfThen, cursor);
    let else_part = v.visit_optional(&n.else_part, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && condition.same_element(&n.condition)
        && then_part.same_element(&n.then_part)
        && else_part.same_element(&n.else_part)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::If(If {
        id: n.id,
        prefix,
        markers,
        condition,
        then_part,
        else_part,
    })))
}

pub fn walk_else<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Else,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let body = v.visit_right_padded_required(&n.body, RightLoc::ElseBody, cursor);
    if prefix == n.prefix && markers == n.markers && body.same_element(&n.body) {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Else(Else {
        id: n.id,
        prefix,
        markers,
        body,
    })))
}

pub fn walk_while<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &While,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let condition = v.visit_required(&n.condition, cursor);
    let body = v.visit_right_padded_required(&n.body, RightLoc::LoopBody, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && condition.same_element(&n.condition)
        && body.same_element(&n.body)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::While(While {
        id: n.id,
        prefix,
        markers,
        condition,
        body,
    })))
}

pub fn walk_for<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &For,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let control = v.visit_required(&n.control, cursor);
    let body = v.visit_right_padded_required(&n.body, RightLoc::LoopBody, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && control.same_element(&n.control)
        && body.same_element(&n.body)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::For(For {
        id: n.id,
        prefix,
        markers,
        control,
        body,
    })))
}

pub fn walk_for_control<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &ForControl,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let init = v.visit_right_padded_required(&n.init, RightLoc::ForInit, cursor);
    let condition = v.visit_right_padded_required(&n.condition, RightLoc::ForCondition, cursor);
    let update = v.visit_right_padded_required(&n.update, RightLoc::ForUpdate, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && init.same_element(&n.init)
        && condition.same_element(&n.condition)
        && update.same_element(&n.update)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::ForControl(ForControl {
        id: n.id,
        prefix,
        markers,
        init,
        condition,
        update,
    })))
}

pub fn walk_control_parentheses<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &ControlParentheses,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let inner = v.visit_right_padded_required(&n.tree, RightLoc::ControlCondition, cursor);
    if prefix == n.prefix && markers == n.markers && inner.same_element(&n.tree) {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::ControlParentheses(ControlParentheses {
        id: n.id,
        prefix,
        markers,
        tree: inner,
    })))
}

pub fn walk_return<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Return,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let expression = v.visit_optional(&n.expression, cursor);
    if prefix == n.prefix && markers == n.markers && expression.same_element(&n.expression) {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Return(Return {
        id: n.id,
        prefix,
        markers,
        expression,
    })))
}

pub fn walk_expression_statement<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &ExpressionStatement,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let expression = v.visit(&n.expression, cursor)?;
    if prefix == n.prefix && markers == n.markers && expression.same_element(&n.expression) {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::ExpressionStatement(ExpressionStatement {
        id: n.id,
        prefix,
        markers,
        expression,
    })))
}

pub fn walk_variable_declarations<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &VariableDeclarations,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let modifiers = v.visit_trees(&n.modifiers, cursor);
    let kind = v.visit_token_padding(&n.kind, LeftLoc::VariableKind, cursor);
    let variables = v.visit_stmt_list(&n.variables, RightLoc::NamedVariable, cursor);
    if variables.is_empty() {
        // All declarators were filtered out, so the statement is gone too.
        return None;
    }
    if prefix == n.prefix
        && markers == n.markers
        && same_list(&n.modifiers, &modifiers)
        && kind.same_element(&n.kind)
        && same_list(&n.variables, &variables)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::VariableDeclarations(VariableDeclarations {
        id: n.id,
        prefix,
        markers,
        modifiers,
        kind,
        variables,
    })))
}

pub fn walk_named_variable<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &NamedVariable,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let name = v.visit_required(&n.name, cursor);
    let initializer = n
        .initializer
        .as_ref()
        .and_then(|i| v.visit_left_padded(i, LeftLoc::Initializer, cursor));
    if prefix == n.prefix
        && markers == n.markers
        && name.same_element(&n.name)
        && initializer.same_element(&n.initializer)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::NamedVariable(NamedVariable {
        id: n.id,
        prefix,
        markers,
        name,
        initializer,
    })))
}

pub fn walk_class_declaration<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &ClassDeclaration,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let decorators = v.visit_trees(&n.decorators, cursor);
    let modifiers = v.visit_trees(&n.modifiers, cursor);
    let kind = v.visit_token_padding(&n.kind, LeftLoc::ClassKind, cursor);
    let name = v.visit_required(&n.name, cursor);
    let extends = n
        .extends
        .as_ref()
        .and_then(|e| v.visit_left_padded(e, LeftLoc::ClassExtends, cursor));
    let body = v.visit_required(&n.body, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && same_list(&n.decorators, &decorators)
        && same_list(&n.modifiers, &modifiers)
        && kind.same_element(&n.kind)
        && name.same_element(&n.name)
        && extends.same_element(&n.extends)
        && body.same_element(&n.body)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::ClassDeclaration(ClassDeclaration {
        id: n.id,
        prefix,
        markers,
        decorators,
        modifiers,
        kind,
        name,
        extends,
        body,
    })))
}

pub fn walk_method_declaration<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &MethodDeclaration,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let decorators = v.visit_trees(&n.decorators, cursor);
    let modifiers = v.visit_trees(&n.modifiers, cursor);
    let name = v.visit_required(&n.name, cursor);
    let parameters = v.visit_container(&n.parameters, ContainerLoc::MethodParameters, cursor);
    let body = v.visit_optional(&n.body, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && same_list(&n.decorators, &decorators)
        && same_list(&n.modifiers, &modifiers)
        && name.same_element(&n.name)
        && parameters.same_element(&n.parameters)
        && body.same_element(&n.body)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::MethodDeclaration(MethodDeclaration {
        id: n.id,
        prefix,
        markers,
        decorators,
        modifiers,
        name,
        parameters,
        body,
    })))
}

pub fn walk_function_declaration<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &FunctionDeclaration,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let modifiers = v.visit_trees(&n.modifiers, cursor);
    let keyword_prefix = v.visit_space(&n.keyword_prefix, SpaceLoc::FunctionKeyword, cursor);
    let name = v.visit_required(&n.name, cursor);
    let parameters = v.visit_container(&n.parameters, ContainerLoc::MethodParameters, cursor);
    let body = v.visit_optional(&n.body, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && same_list(&n.modifiers, &modifiers)
        && keyword_prefix == n.keyword_prefix
        && name.same_element(&n.name)
        && parameters.same_element(&n.parameters)
        && body.same_element(&n.body)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::FunctionDeclaration(FunctionDeclaration {
        id: n.id,
        prefix,
        markers,
        modifiers,
        keyword_prefix,
        name,
        parameters,
        body,
    })))
}

pub fn walk_property_declaration<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &PropertyDeclaration,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let modifiers = v.visit_trees(&n.modifiers, cursor);
    let name = v.visit_required(&n.name, cursor);
    let initializer = n
        .initializer
        .as_ref()
        .and_then(|i| v.visit_left_padded(i, LeftLoc::Initializer, cursor));
    if prefix == n.prefix
        && markers == n.markers
        && same_list(&n.modifiers, &modifiers)
        && name.same_element(&n.name)
        && initializer.same_element(&n.initializer)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::PropertyDeclaration(PropertyDeclaration {
        id: n.id,
        prefix,
        markers,
        modifiers,
        name,
        initializer,
    })))
}

pub fn walk_import<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Import,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let default_binding = n
        .default_binding
        .as_ref()
        .and_then(|d| v.visit_right_padded(d, RightLoc::ImportDefault, cursor));
    let named = n
        .named
        .as_ref()
        .map(|c| v.visit_container(c, ContainerLoc::ImportSpecifiers, cursor));
    let module = v.visit_left_padded_required(&n.module, LeftLoc::ImportModule, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && default_binding.same_element(&n.default_binding)
        && named.same_element(&n.named)
        && module.same_element(&n.module)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Import(Import {
        id: n.id,
        prefix,
        markers,
        default_binding,
        named,
        module,
    })))
}

pub fn walk_switch<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Switch,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let selector = v.visit_required(&n.selector, cursor);
    let cases = v.visit_required(&n.cases, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && selector.same_element(&n.selector)
        && cases.same_element(&n.cases)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Switch(Switch {
        id: n.id,
        prefix,
        markers,
        selector,
        cases,
    })))
}

pub fn walk_case<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Case,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let pattern = v.visit_optional(&n.pattern, cursor);
    let colon_prefix = v.visit_space(&n.colon_prefix, SpaceLoc::CaseColon, cursor);
    let statements = v.visit_stmt_list(&n.statements, RightLoc::CaseStatement, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && pattern.same_element(&n.pattern)
        && colon_prefix == n.colon_prefix
        && same_list(&n.statements, &statements)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Case(Case {
        id: n.id,
        prefix,
        markers,
        pattern,
        colon_prefix,
        statements,
    })))
}

pub fn walk_try<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Try,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let body = v.visit_required(&n.body, cursor);
    let catch_clause = v.visit_optional(&n.catch_clause, cursor);
    let finally_block = n
        .finally_block
        .as_ref()
        .and_then(|f| v.visit_left_padded(f, LeftLoc::FinallyBlock, cursor));
    if prefix == n.prefix
        && markers == n.markers
        && body.same_element(&n.body)
        && catch_clause.same_element(&n.catch_clause)
        && finally_block.same_element(&n.finally_block)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Try(Try {
        id: n.id,
        prefix,
        markers,
        body,
        catch_clause,
        finally_block,
    })))
}

pub fn walk_catch<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Catch,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let parameter = v.visit_optional(&n.parameter, cursor);
    let body = v.visit_required(&n.body, cursor);
    if prefix == n.prefix
        && markers == n.markers
        && parameter.same_element(&n.parameter)
        && body.same_element(&n.body)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Catch(Catch {
        id: n.id,
        prefix,
        markers,
        parameter,
        body,
    })))
}

pub fn walk_annotation<V: JsVisitor + ?Sized>(
    v: &mut V,
    n: &Annotation,
    tree: &Tree,
    cursor: &Cursor,
) -> Option<Tree> {
    let prefix = v.visit_space(&n.prefix, SpaceLoc::Prefix, cursor);
    let markers = v.visit_markers(&n.markers, cursor);
    let name = v.visit_required(&n.name, cursor);
    let arguments = n
        .arguments
        .as_ref()
        .map(|a| v.visit_container(a, ContainerLoc::AnnotationArguments, cursor));
    if prefix == n.prefix
        && markers == n.markers
        && name.same_element(&n.name)
        && arguments.same_element(&n.arguments)
    {
        return Some(Rc::clone(tree));
    }
    Some(Rc::new(Js::Annotation(Annotation {
        id: n.id,
        prefix,
        markers,
        name,
        arguments,
    })))
}
