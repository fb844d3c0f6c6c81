//! Deterministic serialization of a tree back to source text.

use std::rc::Rc;

use jsmod_tree::tree::*;
use jsmod_tree::{Container, LeftPadded, Markers, RightPadded, Space, Tree};
use jsmod_visitor::{Cursor, JsVisitor};

/// Print a tree to source text. Re-parsing the output and printing again is
/// a no-op; an unedited tree prints back exactly the text it was parsed
/// from.
pub fn print(tree: &Tree) -> String {
    let mut printer = JsPrinter::new();
    printer.visit_root(tree);
    printer.finish()
}

/// The printing visitor. One instance per print, like any other visitor.
pub struct JsPrinter {
    out: String,
}

impl JsPrinter {
    pub fn new() -> JsPrinter {
        JsPrinter { out: String::new() }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Emit a space: the whitespace run, then each comment with its
    /// delimiters and suffix.
    fn space(&mut self, space: &Space) {
        self.out.push_str(&space.whitespace);
        for comment in &space.comments {
            if comment.multiline {
                self.out.push_str("/*");
                self.out.push_str(&comment.text);
                self.out.push_str("*/");
            } else {
                self.out.push_str("//");
                self.out.push_str(&comment.text);
            }
            self.out.push_str(&comment.suffix);
        }
    }

    fn tree(&mut self, tree: &Tree, cursor: &Cursor) {
        let _ = self.visit(tree, cursor);
    }

    fn optional_tree(&mut self, tree: &Option<Tree>, cursor: &Cursor) {
        if let Some(t) = tree {
            self.tree(t, cursor);
        }
    }

    fn trees(&mut self, list: &[Tree], cursor: &Cursor) {
        for t in list {
            self.tree(t, cursor);
        }
    }

    /// A statement-position element: the element, its after-space, then the
    /// `;` its semicolon marker contributes.
    fn statement(&mut self, padded: &RightPadded<Tree>, cursor: &Cursor) {
        self.tree(&padded.element, cursor);
        self.space(&padded.after);
        if padded.markers.has_semicolon() {
            self.write(";");
        }
    }

    fn statements(&mut self, list: &[RightPadded<Tree>], cursor: &Cursor) {
        for padded in list {
            self.statement(padded, cursor);
        }
    }

    /// A delimited list: before-space, opening delimiter, comma-separated
    /// elements (a trailing-comma marker on the last element contributes one
    /// more `,` plus its stored suffix), closing delimiter.
    fn container(&mut self, container: &Container<Tree>, open: &str, close: &str, cursor: &Cursor) {
        self.space(&container.before);
        self.write(open);
        let last = container.elements.len().saturating_sub(1);
        for (i, padded) in container.elements.iter().enumerate() {
            self.tree(&padded.element, cursor);
            self.space(&padded.after);
            if i < last {
                self.write(",");
            } else if let Some(suffix) = padded.markers.trailing_comma() {
                self.write(",");
                self.space(suffix);
            }
        }
        self.write(close);
    }

    /// A left-padded element introduced by a literal token (`=`, `from`,
    /// `extends`): before-space, token, element.
    fn left_padded(&mut self, padded: &LeftPadded<Tree>, token: &str, cursor: &Cursor) {
        self.space(&padded.before);
        self.write(token);
        self.tree(&padded.element, cursor);
    }

    /// The `*` contributed by a generator marker, if present.
    fn generator_star(&mut self, markers: &Markers) {
        if let Some(prefix) = markers.generator() {
            self.space(prefix);
            self.write("*");
        }
    }
}

/// A literal's source text with recorded `\u` escapes re-interleaved at
/// their char indices.
fn literal_text(n: &Literal) -> String {
    let Some(escapes) = &n.unicode_escapes else {
        return n.value_source.clone();
    };
    let mut escapes = escapes.iter().peekable();
    let mut out = String::with_capacity(n.value_source.len());
    for (i, ch) in n.value_source.chars().enumerate() {
        if escapes.peek().is_some_and(|e| e.index == i) {
            let escape = escapes.next().unwrap();
            out.push_str("\\u");
            out.push_str(&escape.code_point);
        } else {
            out.push(ch);
        }
    }
    out
}

impl JsVisitor for JsPrinter {
    fn visit_compilation_unit(
        &mut self,
        n: &CompilationUnit,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.statements(&n.statements, cursor);
        self.space(&n.eof);
        Some(Rc::clone(tree))
    }

    fn visit_identifier(&mut self, n: &Identifier, tree: &Tree, _cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write(&n.name);
        Some(Rc::clone(tree))
    }

    fn visit_literal(&mut self, n: &Literal, tree: &Tree, _cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        let text = literal_text(n);
        self.write(&text);
        Some(Rc::clone(tree))
    }

    fn visit_binary(&mut self, n: &Binary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.tree(&n.left, cursor);
        self.space(&n.operator.before);
        self.write(n.operator.element.token());
        self.tree(&n.right, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_unary(&mut self, n: &Unary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        if n.operator.element.is_postfix() {
            self.tree(&n.expression, cursor);
            self.space(&n.operator.before);
            self.write(n.operator.element.token());
        } else {
            self.space(&n.operator.before);
            self.write(n.operator.element.token());
            self.tree(&n.expression, cursor);
        }
        Some(Rc::clone(tree))
    }

    fn visit_ternary(&mut self, n: &Ternary, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.tree(&n.condition, cursor);
        self.space(&n.true_part.before);
        self.write("?");
        self.tree(&n.true_part.element, cursor);
        self.space(&n.false_part.before);
        self.write(":");
        self.tree(&n.false_part.element, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_parentheses(&mut self, n: &Parentheses, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("(");
        self.tree(&n.tree.element, cursor);
        self.space(&n.tree.after);
        self.write(")");
        Some(Rc::clone(tree))
    }

    fn visit_call(&mut self, n: &Call, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.tree(&n.callee, cursor);
        if n.markers.is_optional_chain() {
            self.write("?.");
        }
        self.container(&n.arguments, "(", ")", cursor);
        Some(Rc::clone(tree))
    }

    fn visit_member(&mut self, n: &Member, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.tree(&n.object, cursor);
        self.space(&n.name.before);
        if n.markers.is_optional_chain() {
            self.write("?.");
        } else {
            self.write(".");
        }
        self.tree(&n.name.element, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_array_literal(
        &mut self,
        n: &ArrayLiteral,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.container(&n.elements, "[", "]", cursor);
        Some(Rc::clone(tree))
    }

    fn visit_alias(&mut self, n: &Alias, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.tree(&n.property.element, cursor);
        self.space(&n.property.after);
        self.write("as");
        self.tree(&n.alias, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_empty(&mut self, n: &Empty, tree: &Tree, _cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        Some(Rc::clone(tree))
    }

    fn visit_block(&mut self, n: &Block, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("{");
        self.statements(&n.statements, cursor);
        self.space(&n.end);
        self.write("}");
        Some(Rc::clone(tree))
    }

    fn visit_if(&mut self, n: &If, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("if");
        self.tree(&n.condition, cursor);
        self.statement(&n.then_part, cursor);
        self.optional_tree(&n.else_part, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_else(&mut self, n: &Else, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("else");
        self.statement(&n.body, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_while(&mut self, n: &While, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("while");
        self.tree(&n.condition, cursor);
        self.statement(&n.body, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_for(&mut self, n: &For, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("for");
        self.tree(&n.control, cursor);
        self.statement(&n.body, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_for_control(&mut self, n: &ForControl, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("(");
        self.tree(&n.init.element, cursor);
        self.space(&n.init.after);
        self.write(";");
        self.tree(&n.condition.element, cursor);
        self.space(&n.condition.after);
        self.write(";");
        self.tree(&n.update.element, cursor);
        self.space(&n.update.after);
        self.write(")");
        Some(Rc::clone(tree))
    }

    fn visit_control_parentheses(
        &mut self,
        n: &ControlParentheses,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("(");
        self.tree(&n.tree.element, cursor);
        self.space(&n.tree.after);
        self.write(")");
        Some(Rc::clone(tree))
    }

    fn visit_return(&mut self, n: &Return, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("return");
        self.optional_tree(&n.expression, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_expression_statement(
        &mut self,
        n: &ExpressionStatement,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.tree(&n.expression, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_variable_declarations(
        &mut self,
        n: &VariableDeclarations,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.trees(&n.modifiers, cursor);
        self.space(&n.kind.before);
        self.write(n.kind.element.token());
        let last = n.variables.len().saturating_sub(1);
        for (i, variable) in n.variables.iter().enumerate() {
            self.tree(&variable.element, cursor);
            self.space(&variable.after);
            if i < last {
                self.write(",");
            }
        }
        Some(Rc::clone(tree))
    }

    fn visit_named_variable(
        &mut self,
        n: &NamedVariable,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.tree(&n.name, cursor);
        if let Some(initializer) = &n.initializer {
            self.left_padded(initializer, "=", cursor);
        }
        Some(Rc::clone(tree))
    }

    fn visit_class_declaration(
        &mut self,
        n: &ClassDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.trees(&n.decorators, cursor);
        self.trees(&n.modifiers, cursor);
        self.space(&n.kind.before);
        self.write(n.kind.element.token());
        self.tree(&n.name, cursor);
        if let Some(extends) = &n.extends {
            self.left_padded(extends, "extends", cursor);
        }
        self.tree(&n.body, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_method_declaration(
        &mut self,
        n: &MethodDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.trees(&n.decorators, cursor);
        self.trees(&n.modifiers, cursor);
        self.generator_star(&n.markers);
        self.tree(&n.name, cursor);
        self.container(&n.parameters, "(", ")", cursor);
        self.optional_tree(&n.body, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_function_declaration(
        &mut self,
        n: &FunctionDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.trees(&n.modifiers, cursor);
        self.space(&n.keyword_prefix);
        self.write("function");
        self.generator_star(&n.markers);
        self.tree(&n.name, cursor);
        self.container(&n.parameters, "(", ")", cursor);
        self.optional_tree(&n.body, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_property_declaration(
        &mut self,
        n: &PropertyDeclaration,
        tree: &Tree,
        cursor: &Cursor,
    ) -> Option<Tree> {
        self.space(&n.prefix);
        self.trees(&n.modifiers, cursor);
        self.tree(&n.name, cursor);
        if let Some(initializer) = &n.initializer {
            self.left_padded(initializer, "=", cursor);
        }
        Some(Rc::clone(tree))
    }

    fn visit_import(&mut self, n: &Import, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("import");
        if let Some(default_binding) = &n.default_binding {
            self.tree(&default_binding.element, cursor);
            self.space(&default_binding.after);
            if n.named.is_some() {
                self.write(",");
            }
        }
        if let Some(named) = &n.named {
            self.container(named, "{", "}", cursor);
        }
        // `from` only appears when something was bound; the bare
        // `import "m"` form goes straight to the module literal.
        if n.default_binding.is_some() || n.named.is_some() {
            self.space(&n.module.before);
            self.write("from");
        }
        self.tree(&n.module.element, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_switch(&mut self, n: &Switch, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("switch");
        self.tree(&n.selector, cursor);
        self.tree(&n.cases, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_case(&mut self, n: &Case, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        match &n.pattern {
            Some(pattern) => {
                self.write("case");
                self.tree(pattern, cursor);
            }
            None => self.write("default"),
        }
        self.space(&n.colon_prefix);
        self.write(":");
        self.statements(&n.statements, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_try(&mut self, n: &Try, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("try");
        self.tree(&n.body, cursor);
        self.optional_tree(&n.catch_clause, cursor);
        if let Some(finally_block) = &n.finally_block {
            self.left_padded(finally_block, "finally", cursor);
        }
        Some(Rc::clone(tree))
    }

    fn visit_catch(&mut self, n: &Catch, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("catch");
        self.optional_tree(&n.parameter, cursor);
        self.tree(&n.body, cursor);
        Some(Rc::clone(tree))
    }

    fn visit_annotation(&mut self, n: &Annotation, tree: &Tree, cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write("@");
        self.tree(&n.name, cursor);
        if let Some(arguments) = &n.arguments {
            self.container(arguments, "(", ")", cursor);
        }
        Some(Rc::clone(tree))
    }

    fn visit_modifier(&mut self, n: &Modifier, tree: &Tree, _cursor: &Cursor) -> Option<Tree> {
        self.space(&n.prefix);
        self.write(n.keyword.token());
        Some(Rc::clone(tree))
    }
}
