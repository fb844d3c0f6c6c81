//! Printed blank-line bounds for the blank-lines pass in isolation.

use std::rc::Rc;

use jsmod_format::BlankLinesVisitor;
use jsmod_printer::print;
use jsmod_tree::tree::{Block, Js};
use jsmod_tree::{
    BlankLinesStyle, ClassKind, LeftPadded, Markers, RightPadded, Space, Tree, TreeExt, build,
};
use jsmod_visitor::JsVisitor;

fn semi(tree: Tree) -> RightPadded<Tree> {
    RightPadded {
        element: tree,
        after: Space::EMPTY,
        markers: Markers::EMPTY.with_semicolon(),
    }
}

fn block_ending(statements: Vec<RightPadded<Tree>>, end: &str) -> Tree {
    match &*build::block(statements) {
        Js::Block(n) => Rc::new(Js::Block(Block {
            end: Space::format(end),
            ..n.clone()
        })),
        _ => unreachable!(),
    }
}

fn bounded(unit: &Tree, style: BlankLinesStyle) -> String {
    let out = BlankLinesVisitor::new(style, None)
        .visit_root(unit)
        .expect("root survives");
    print(&out)
}

/// `name() {}`, prefixed for a class body.
fn empty_method(name: &str, prefix: &str) -> Tree {
    build::method(
        build::ident(name),
        vec![],
        Some(build::block(vec![]).with_prefix(Space::single_space())),
    )
    .with_prefix(Space::format(prefix))
}

/// `name();` signature, prefixed for an interface body.
fn signature(name: &str, prefix: &str) -> RightPadded<Tree> {
    semi(build::method(build::ident(name), vec![], None).with_prefix(Space::format(prefix)))
}

fn declaration(kind: ClassKind, name: &str, body: Tree) -> Tree {
    build::class_decl(
        kind,
        build::ident(name).with_prefix(Space::single_space()),
        body.with_prefix(Space::single_space()),
    )
}

#[test]
fn methods_in_a_class_body_get_a_blank_line_between_them() {
    let body = block_ending(
        vec![
            RightPadded::build(empty_method("a", "\n    ")),
            RightPadded::build(empty_method("b", "\n    ")),
        ],
        "\n",
    );
    let unit = build::compilation_unit(
        "c.js",
        vec![RightPadded::build(declaration(ClassKind::Class, "C", body))],
    );
    assert_eq!(print(&unit), "class C {\n    a() {}\n    b() {}\n}");

    assert_eq!(
        bounded(&unit, BlankLinesStyle::default()),
        "class C {\n    a() {}\n\n    b() {}\n}",
        "around_method pads one blank line; the first member stays on the brace line"
    );
}

#[test]
fn interface_members_use_their_own_minimum() {
    let body = block_ending(
        vec![signature("a", "\n    "), signature("b", "\n    ")],
        "\n",
    );
    let unit = build::compilation_unit(
        "i.js",
        vec![RightPadded::build(declaration(
            ClassKind::Interface,
            "I",
            body,
        ))],
    );

    assert_eq!(
        bounded(&unit, BlankLinesStyle::default()),
        "interface I {\n    a();\n\n    b();\n}"
    );

    let mut tight = BlankLinesStyle::default();
    tight.minimum.around_method_in_interface = 0;
    assert_eq!(
        bounded(&unit, tight),
        "interface I {\n    a();\n    b();\n}",
        "a zero interface minimum leaves adjacent signatures alone"
    );
}

#[test]
fn excess_blank_lines_in_a_block_are_capped() {
    fn call(name: &str, prefix: &str) -> RightPadded<Tree> {
        semi(
            build::expr_stmt(build::call(build::ident(name), vec![]))
                .with_prefix(Space::format(prefix)),
        )
    }

    let block = block_ending(vec![call("f", "\n    "), call("g", "\n\n\n\n\n    ")], "\n");
    let unit = build::compilation_unit("b.js", vec![RightPadded::build(block)]);

    assert_eq!(
        bounded(&unit, BlankLinesStyle::default()),
        "{\n    f();\n\n\n    g();\n}",
        "keep_maximum_in_code caps the run at two blank lines"
    );
}

#[test]
fn import_block_is_separated_from_the_code_below() {
    let import = build::import_decl(
        None,
        None,
        LeftPadded::build(build::literal("\"m\"").with_prefix(Space::single_space())),
    );
    let statement = build::expr_stmt(build::call(build::ident("f"), vec![]))
        .with_prefix(Space::format("\n"));
    let unit = build::compilation_unit("m.js", vec![semi(import), semi(statement)]);

    assert_eq!(
        bounded(&unit, BlankLinesStyle::default()),
        "import \"m\";\n\nf();"
    );
}
