//! Round-trip printing: trees built the way a front-end would build them
//! must print back their exact source text.

use std::rc::Rc;

use jsmod_printer::print;
use jsmod_tree::tree::{Block, ClassDeclaration, Literal, PropertyDeclaration};
use jsmod_tree::{
    BinaryOp, ClassKind, Comment, Container, Js, LeftPadded, Marker, Markers, ModifierKind,
    RightPadded, Space, Tree, TreeExt, TreeId, UnaryOp, UnicodeEscape, VariableKind, build,
};

fn semi(tree: Tree) -> RightPadded<Tree> {
    RightPadded {
        element: tree,
        after: Space::EMPTY,
        markers: Markers::EMPTY.with_semicolon(),
    }
}

fn prefixed(tree: &Tree, whitespace: &str) -> Tree {
    tree.with_prefix(Space::format(whitespace))
}

fn block(statements: Vec<RightPadded<Tree>>, end: &str) -> Tree {
    match &*build::block(statements) {
        Js::Block(n) => Rc::new(Js::Block(Block {
            end: Space::format(end),
            ..n.clone()
        })),
        _ => unreachable!(),
    }
}

fn unit(statements: Vec<RightPadded<Tree>>, eof: &str) -> Tree {
    match &*build::compilation_unit("test.js", statements) {
        Js::CompilationUnit(n) => Rc::new(Js::CompilationUnit(
            jsmod_tree::tree::CompilationUnit {
                eof: Space::format(eof),
                ..n.clone()
            },
        )),
        _ => unreachable!(),
    }
}

#[test]
fn variable_declaration_with_header_comment() {
    let declaration = build::var_decl(
        VariableKind::Const,
        vec![RightPadded::build(build::named_var(
            prefixed(&build::ident("a"), " "),
            Some(LeftPadded::new(
                Space::single_space(),
                prefixed(&build::literal("1"), " "),
            )),
        ))],
    );
    let unit = unit(vec![semi(declaration)], "\n").with_prefix(Space::new(
        String::new(),
        vec![Comment::new(" header", false, "\n")],
    ));

    assert_eq!(
        print(&unit),
        "// header\nconst a = 1;\n",
        "comment text, keyword spacing, and semicolon marker must round-trip"
    );
}

#[test]
fn member_call_with_arguments() {
    let callee = build::member(build::ident("a"), LeftPadded::build(build::ident("b")));
    let call = build::call(
        callee,
        vec![
            RightPadded::build(build::ident("c")),
            RightPadded::build(prefixed(&build::ident("d"), " ")),
        ],
    );
    let unit = unit(vec![semi(build::expr_stmt(call))], "");

    assert_eq!(print(&unit), "a.b(c, d);");
}

#[test]
fn optional_chaining_prints_question_dot() {
    let member = build::member(build::ident("a"), LeftPadded::build(build::ident("b")))
        .with_markers(Markers::EMPTY.add(Marker::optional_chain()));
    let call =
        build::call(member, vec![]).with_markers(Markers::EMPTY.add(Marker::optional_chain()));
    let unit = unit(vec![semi(build::expr_stmt(call))], "");

    assert_eq!(print(&unit), "a?.b?.();");
}

#[test]
fn trailing_comma_marker_prints_comma_and_suffix() {
    let last = RightPadded {
        element: prefixed(&build::literal("2"), " "),
        after: Space::EMPTY,
        markers: Markers::EMPTY.add(Marker::trailing_comma(Space::EMPTY)),
    };
    let array = build::array(vec![RightPadded::build(build::literal("1")), last]);
    let unit = unit(vec![semi(build::expr_stmt(array))], "");

    assert_eq!(print(&unit), "[1, 2,];");
}

#[test]
fn unicode_escapes_reinterleaved_at_recorded_indices() {
    let literal: Tree = Rc::new(Js::Literal(Literal {
        id: TreeId::random(),
        prefix: Space::EMPTY,
        markers: Markers::EMPTY,
        value_source: "'é'".to_string(),
        unicode_escapes: Some(vec![UnicodeEscape {
            index: 1,
            code_point: "00e9".to_string(),
        }]),
    }));
    let unit = unit(vec![semi(build::expr_stmt(literal))], "");

    assert_eq!(
        print(&unit),
        "'\\u00e9';",
        "the escape replaces the char at its recorded index"
    );
}

#[test]
fn generator_function_round_trip() {
    let body = block(
        vec![semi(prefixed(
            &build::return_stmt(Some(prefixed(&build::literal("1"), " "))),
            " ",
        ))],
        " ",
    );
    let function = build::function_decl(
        prefixed(&build::ident("gen"), " "),
        vec![],
        Some(prefixed(&body, " ")),
    )
    .with_markers(Markers::EMPTY.add(Marker::generator(Space::EMPTY)));
    let unit = unit(vec![RightPadded::build(function)], "");

    assert_eq!(print(&unit), "function* gen() { return 1; }");
}

#[test]
fn import_with_default_named_and_alias() {
    let alias = build::alias(
        RightPadded::new(build::ident("a"), Space::single_space()),
        prefixed(&build::ident("b"), " "),
    );
    let named = Container::new(
        Space::single_space(),
        vec![RightPadded::new(prefixed(&alias, " "), Space::single_space())],
    );
    let import = build::import_decl(
        Some(RightPadded::build(prefixed(&build::ident("d"), " "))),
        Some(named),
        LeftPadded::new(
            Space::single_space(),
            prefixed(&build::literal("\"m\""), " "),
        ),
    );
    let unit = unit(vec![semi(import)], "");

    assert_eq!(print(&unit), "import d, { a as b } from \"m\";");
}

#[test]
fn bare_import_has_no_from() {
    let import = build::import_decl(
        None,
        None,
        LeftPadded::build(prefixed(&build::literal("\"m\""), " ")),
    );
    let unit = unit(vec![semi(import)], "");

    assert_eq!(print(&unit), "import \"m\";");
}

#[test]
fn switch_with_case_and_default() {
    let call_f = semi(prefixed(
        &build::expr_stmt(build::call(build::ident("f"), vec![])),
        " ",
    ));
    let call_g = semi(prefixed(
        &build::expr_stmt(build::call(build::ident("g"), vec![])),
        " ",
    ));
    let case_one = build::case_clause(Some(prefixed(&build::literal("1"), " ")), vec![call_f]);
    let case_default = build::case_clause(None, vec![call_g]);
    let cases = block(
        vec![
            RightPadded::build(prefixed(&case_one, " ")),
            RightPadded::build(prefixed(&case_default, " ")),
        ],
        " ",
    );
    let switch = build::switch_stmt(
        prefixed(
            &build::control_parens(RightPadded::build(build::ident("x"))),
            " ",
        ),
        prefixed(&cases, " "),
    );
    let unit = unit(vec![RightPadded::build(switch)], "");

    assert_eq!(print(&unit), "switch (x) { case 1: f(); default: g(); }");
}

#[test]
fn try_catch_finally_round_trip() {
    let catch = build::catch_clause(
        Some(prefixed(
            &build::control_parens(RightPadded::build(build::ident("e"))),
            " ",
        )),
        prefixed(&block(vec![], " "), " "),
    );
    let try_stmt = build::try_stmt(
        prefixed(&block(vec![], " "), " "),
        Some(prefixed(&catch, " ")),
        Some(LeftPadded::new(
            Space::single_space(),
            prefixed(&block(vec![], " "), " "),
        )),
    );
    let unit = unit(vec![RightPadded::build(try_stmt)], "");

    assert_eq!(print(&unit), "try { } catch (e) { } finally { }");
}

#[test]
fn for_loop_with_postfix_update() {
    let init = build::var_decl(
        VariableKind::Let,
        vec![RightPadded::build(build::named_var(
            prefixed(&build::ident("i"), " "),
            Some(LeftPadded::new(
                Space::single_space(),
                prefixed(&build::literal("0"), " "),
            )),
        ))],
    );
    let condition = build::binary(
        prefixed(&build::ident("i"), " "),
        LeftPadded::new(Space::single_space(), BinaryOp::LessThan),
        prefixed(&build::literal("10"), " "),
    );
    let update = build::unary(
        LeftPadded::build(UnaryOp::PostIncrement),
        prefixed(&build::ident("i"), " "),
    );
    let control = prefixed(
        &build::for_control(
            RightPadded::build(init),
            RightPadded::build(condition),
            RightPadded::build(update),
        ),
        " ",
    );
    let body = semi(prefixed(
        &build::expr_stmt(build::call(build::ident("f"), vec![])),
        " ",
    ));
    let unit = unit(
        vec![RightPadded::build(build::for_stmt(control, body))],
        "",
    );

    assert_eq!(print(&unit), "for (let i = 0; i < 10; i++) f();");
}

#[test]
fn ternary_with_keyword_unary_condition() {
    let condition = build::unary(
        LeftPadded::build(UnaryOp::TypeOf),
        prefixed(&build::ident("a"), " "),
    );
    let ternary = build::ternary(
        condition,
        LeftPadded::new(Space::single_space(), prefixed(&build::ident("b"), " ")),
        LeftPadded::new(Space::single_space(), prefixed(&build::ident("c"), " ")),
    );
    let unit = unit(vec![semi(build::expr_stmt(ternary))], "");

    assert_eq!(print(&unit), "typeof a ? b : c;");
}

#[test]
fn decorated_exported_class_with_static_field() {
    let property: Tree = Rc::new(Js::PropertyDeclaration(PropertyDeclaration {
        id: TreeId::random(),
        prefix: Space::format("\n    "),
        markers: Markers::EMPTY,
        modifiers: vec![build::modifier(ModifierKind::Static)],
        name: prefixed(&build::ident("count"), " "),
        initializer: Some(LeftPadded::new(
            Space::single_space(),
            prefixed(&build::literal("0"), " "),
        )),
    }));
    let body = block(vec![semi(property)], "\n");
    let class: Tree = Rc::new(Js::ClassDeclaration(ClassDeclaration {
        id: TreeId::random(),
        prefix: Space::EMPTY,
        markers: Markers::EMPTY,
        decorators: vec![build::annotation(build::ident("dec"), None)],
        modifiers: vec![prefixed(&build::modifier(ModifierKind::Export), "\n")],
        kind: LeftPadded::new(Space::single_space(), ClassKind::Class),
        name: prefixed(&build::ident("A"), " "),
        extends: Some(LeftPadded::new(
            Space::single_space(),
            prefixed(&build::ident("B"), " "),
        )),
        body: prefixed(&body, " "),
    }));
    let unit = unit(vec![RightPadded::build(class)], "");

    assert_eq!(
        print(&unit),
        "@dec\nexport class A extends B {\n    static count = 0;\n}"
    );
}
