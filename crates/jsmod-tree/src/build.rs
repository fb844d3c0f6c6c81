//! Construction helpers for front-ends and tests.
//!
//! A parser front-end (out of scope here) assembles trees from these
//! constructors; tests use them to build fixtures by hand. Every
//! constructor allocates a fresh [`TreeId`] and starts with empty trivia —
//! callers place whitespace afterwards via [`TreeExt::with_prefix`] and the
//! padding rebuilders, mirroring how the original text read.

use std::rc::Rc;

use crate::marker::Markers;
use crate::padding::{Container, LeftPadded, RightPadded};
use crate::space::Space;
use crate::tree::*;

fn base() -> (TreeId, Space, Markers) {
    (TreeId::random(), Space::EMPTY, Markers::EMPTY)
}

pub fn compilation_unit(source_path: &str, statements: Vec<RightPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::CompilationUnit(CompilationUnit {
        id,
        prefix,
        markers,
        source_path: source_path.to_string(),
        statements,
        eof: Space::EMPTY,
    }))
}

pub fn ident(name: &str) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Identifier(Identifier {
        id,
        prefix,
        markers,
        name: name.to_string(),
    }))
}

pub fn literal(value_source: &str) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Literal(Literal {
        id,
        prefix,
        markers,
        value_source: value_source.to_string(),
        unicode_escapes: None,
    }))
}

pub fn binary(left: Tree, operator: LeftPadded<BinaryOp>, right: Tree) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Binary(Binary {
        id,
        prefix,
        markers,
        left,
        operator,
        right,
    }))
}

pub fn unary(operator: LeftPadded<UnaryOp>, expression: Tree) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Unary(Unary {
        id,
        prefix,
        markers,
        operator,
        expression,
    }))
}

pub fn ternary(condition: Tree, true_part: LeftPadded<Tree>, false_part: LeftPadded<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Ternary(Ternary {
        id,
        prefix,
        markers,
        condition,
        true_part,
        false_part,
    }))
}

pub fn parens(tree: RightPadded<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Parentheses(Parentheses {
        id,
        prefix,
        markers,
        tree,
    }))
}

/// A call with explicit argument padding. Pass an empty vec for `f()`; the
/// hole inside the parentheses is modeled as an [`Empty`] element.
pub fn call(callee: Tree, arguments: Vec<RightPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    let elements = if arguments.is_empty() {
        vec![RightPadded::build(empty())]
    } else {
        arguments
    };
    Rc::new(Js::Call(Call {
        id,
        prefix,
        markers,
        callee,
        arguments: Container::build(elements),
    }))
}

pub fn member(object: Tree, name: LeftPadded<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Member(Member {
        id,
        prefix,
        markers,
        object,
        name,
    }))
}

pub fn array(elements: Vec<RightPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::ArrayLiteral(ArrayLiteral {
        id,
        prefix,
        markers,
        elements: Container::build(elements),
    }))
}

pub fn alias(property: RightPadded<Tree>, target: Tree) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Alias(Alias {
        id,
        prefix,
        markers,
        property,
        alias: target,
    }))
}

pub fn empty() -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Empty(Empty {
        id,
        prefix,
        markers,
    }))
}

pub fn block(statements: Vec<RightPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Block(Block {
        id,
        prefix,
        markers,
        statements,
        end: Space::EMPTY,
    }))
}

pub fn if_stmt(condition: Tree, then_part: RightPadded<Tree>, else_part: Option<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::If(If {
        id,
        prefix,
        markers,
        condition,
        then_part,
        else_part,
    }))
}

pub fn else_part(body: RightPadded<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Else(Else {
        id,
        prefix,
        markers,
        body,
    }))
}

pub fn while_stmt(condition: Tree, body: RightPadded<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::While(While {
        id,
        prefix,
        markers,
        condition,
        body,
    }))
}

pub fn for_stmt(control: Tree, body: RightPadded<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::For(For {
        id,
        prefix,
        markers,
        control,
        body,
    }))
}

pub fn for_control(
    init: RightPadded<Tree>,
    condition: RightPadded<Tree>,
    update: RightPadded<Tree>,
) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::ForControl(ForControl {
        id,
        prefix,
        markers,
        init,
        condition,
        update,
    }))
}

pub fn control_parens(tree: RightPadded<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::ControlParentheses(ControlParentheses {
        id,
        prefix,
        markers,
        tree,
    }))
}

pub fn return_stmt(expression: Option<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Return(Return {
        id,
        prefix,
        markers,
        expression,
    }))
}

pub fn expr_stmt(expression: Tree) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::ExpressionStatement(ExpressionStatement {
        id,
        prefix,
        markers,
        expression,
    }))
}

pub fn var_decl(kind: VariableKind, variables: Vec<RightPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::VariableDeclarations(VariableDeclarations {
        id,
        prefix,
        markers,
        modifiers: Vec::new(),
        kind: LeftPadded::build(kind),
        variables,
    }))
}

pub fn named_var(name: Tree, initializer: Option<LeftPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::NamedVariable(NamedVariable {
        id,
        prefix,
        markers,
        name,
        initializer,
    }))
}

pub fn class_decl(kind: ClassKind, name: Tree, body: Tree) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::ClassDeclaration(ClassDeclaration {
        id,
        prefix,
        markers,
        decorators: Vec::new(),
        modifiers: Vec::new(),
        kind: LeftPadded::build(kind),
        name,
        extends: None,
        body,
    }))
}

/// A class member method. Pass an empty vec for `()`.
pub fn method(name: Tree, parameters: Vec<RightPadded<Tree>>, body: Option<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    let elements = if parameters.is_empty() {
        vec![RightPadded::build(empty())]
    } else {
        parameters
    };
    Rc::new(Js::MethodDeclaration(MethodDeclaration {
        id,
        prefix,
        markers,
        decorators: Vec::new(),
        modifiers: Vec::new(),
        name,
        parameters: Container::build(elements),
        body,
    }))
}

pub fn function_decl(name: Tree, parameters: Vec<RightPadded<Tree>>, body: Option<Tree>) -> Tree {
    let (id, prefix, markers) = base();
    let elements = if parameters.is_empty() {
        vec![RightPadded::build(empty())]
    } else {
        parameters
    };
    Rc::new(Js::FunctionDeclaration(FunctionDeclaration {
        id,
        prefix,
        markers,
        modifiers: Vec::new(),
        keyword_prefix: Space::EMPTY,
        name,
        parameters: Container::build(elements),
        body,
    }))
}

pub fn property(name: Tree, initializer: Option<LeftPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::PropertyDeclaration(PropertyDeclaration {
        id,
        prefix,
        markers,
        modifiers: Vec::new(),
        name,
        initializer,
    }))
}

pub fn import_decl(
    default_binding: Option<RightPadded<Tree>>,
    named: Option<Container<Tree>>,
    module: LeftPadded<Tree>,
) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Import(Import {
        id,
        prefix,
        markers,
        default_binding,
        named,
        module,
    }))
}

pub fn switch_stmt(selector: Tree, cases: Tree) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Switch(Switch {
        id,
        prefix,
        markers,
        selector,
        cases,
    }))
}

pub fn case_clause(pattern: Option<Tree>, statements: Vec<RightPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Case(Case {
        id,
        prefix,
        markers,
        pattern,
        colon_prefix: Space::EMPTY,
        statements,
    }))
}

pub fn try_stmt(body: Tree, catch_clause: Option<Tree>, finally_block: Option<LeftPadded<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Try(Try {
        id,
        prefix,
        markers,
        body,
        catch_clause,
        finally_block,
    }))
}

pub fn catch_clause(parameter: Option<Tree>, body: Tree) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Catch(Catch {
        id,
        prefix,
        markers,
        parameter,
        body,
    }))
}

pub fn annotation(name: Tree, arguments: Option<Container<Tree>>) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Annotation(Annotation {
        id,
        prefix,
        markers,
        name,
        arguments,
    }))
}

pub fn modifier(keyword: ModifierKind) -> Tree {
    let (id, prefix, markers) = base();
    Rc::new(Js::Modifier(Modifier {
        id,
        prefix,
        markers,
        keyword,
    }))
}
