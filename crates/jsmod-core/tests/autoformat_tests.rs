//! End-to-end pipeline scenarios: the IntelliJ-default class layout,
//! idempotence, the reference-equality skip, import insertion, and
//! stop-scoped formatting.

use std::rc::Rc;

use jsmod_core::{Cursor, JsVisitor, autoformat, maybe_autoformat, print};
use jsmod_tree::tree::{CompilationUnit, Js};
use jsmod_tree::{
    BinaryOp, ClassKind, Container, LeftPadded, Markers, RightPadded, Space, Tree, TreeExt, build,
};

fn semi(tree: Tree) -> RightPadded<Tree> {
    RightPadded {
        element: tree,
        after: Space::EMPTY,
        markers: Markers::EMPTY.with_semicolon(),
    }
}

/// The tree for the unformatted `class A{foo(){return 1;}}`.
fn cramped_class() -> Tree {
    let ret = build::return_stmt(Some(build::literal("1").with_prefix(Space::single_space())));
    let method = build::method(
        build::ident("foo"),
        vec![],
        Some(build::block(vec![semi(ret)])),
    );
    let class = build::class_decl(
        ClassKind::Class,
        build::ident("A").with_prefix(Space::single_space()),
        build::block(vec![RightPadded::build(method)]),
    );
    build::compilation_unit("a.js", vec![RightPadded::build(class)])
}

#[test]
fn cramped_class_formats_to_intellij_defaults() {
    let unit = cramped_class();
    assert_eq!(print(&unit), "class A{foo(){return 1;}}");

    let formatted = autoformat(&unit, &[], None);
    assert_eq!(
        print(&formatted),
        "class A {\n    foo() {\n        return 1;\n    }\n}",
        "brace on the same line, four-space indent, semicolon emitted"
    );
}

#[test]
fn autoformat_is_idempotent() {
    let once = autoformat(&cramped_class(), &[], None);
    let twice = autoformat(&once, &[], None);
    assert_eq!(
        print(&twice),
        print(&once),
        "formatting an already-formatted tree must not change the text"
    );
}

#[test]
fn unchanged_tree_skips_the_pipeline() {
    let before = cramped_class();
    let after = Rc::clone(&before);
    let out = maybe_autoformat(&before, &after, &[], None);
    assert!(
        Rc::ptr_eq(&out, &before),
        "identical references mean no formatting cost at all"
    );
    assert_eq!(print(&out), "class A{foo(){return 1;}}");
}

/// Inserts `import { c } from "n"` after the last existing import.
struct AddImport;

impl JsVisitor for AddImport {
    fn visit_compilation_unit(
        &mut self,
        n: &CompilationUnit,
        _tree: &Tree,
        _cursor: &Cursor,
    ) -> Option<Tree> {
        let last_import = n
            .statements
            .iter()
            .rposition(|s| matches!(&*s.element, Js::Import(_)));
        let index = last_import.map_or(0, |i| i + 1);
        let named = Container::new(
            Space::single_space(),
            vec![RightPadded::new(
                build::ident("c").with_prefix(Space::single_space()),
                Space::single_space(),
            )],
        );
        let import = build::import_decl(
            None,
            Some(named),
            LeftPadded::new(
                Space::single_space(),
                build::literal("\"n\"").with_prefix(Space::single_space()),
            ),
        );
        let mut statements = n.statements.clone();
        statements.insert(index, semi(import));
        Some(Rc::new(Js::CompilationUnit(CompilationUnit {
            statements,
            ..n.clone()
        })))
    }
}

#[test]
fn inserted_import_lands_after_the_import_block() {
    fn default_import(binding: &str, module: &str) -> Tree {
        build::import_decl(
            Some(RightPadded::new(
                build::ident(binding).with_prefix(Space::single_space()),
                Space::single_space(),
            )),
            None,
            LeftPadded::build(build::literal(module).with_prefix(Space::single_space())),
        )
    }

    let before = build::compilation_unit(
        "m.js",
        vec![
            semi(default_import("a", "\"m\"")),
            semi(default_import("b", "\"o\"").with_prefix(Space::format("\n"))),
            semi(
                build::expr_stmt(build::call(build::ident("f"), vec![]))
                    .with_prefix(Space::format("\n")),
            ),
        ],
    );
    assert_eq!(
        print(&before),
        "import a from \"m\";\nimport b from \"o\";\nf();"
    );

    let mut pass = AddImport;
    let after = pass.visit_root(&before).expect("root survives");
    assert!(!Rc::ptr_eq(&before, &after));

    let formatted = maybe_autoformat(&before, &after, &[], None);
    assert_eq!(
        print(&formatted),
        "import a from \"m\";\nimport b from \"o\";\nimport { c } from \"n\";\n\nf();",
        "new import follows the block; the next statement gains its blank line"
    );
}

#[test]
fn stop_scope_bounds_formatting_to_the_edited_region() {
    fn sum_statement(name: &str) -> Tree {
        build::expr_stmt(build::binary(
            build::ident(name),
            LeftPadded::build(BinaryOp::Add),
            build::literal("1"),
        ))
    }

    let edited = sum_statement("a");
    let untouched = sum_statement("b").with_prefix(Space::format("\n"));
    let unit = build::compilation_unit(
        "m.js",
        vec![semi(Rc::clone(&edited)), semi(Rc::clone(&untouched))],
    );
    assert_eq!(print(&unit), "a+1;\nb+1;");

    let formatted = autoformat(&unit, &[], Some(&edited));
    let Js::CompilationUnit(out) = &*formatted else {
        unreachable!()
    };
    assert!(
        Rc::ptr_eq(&out.statements[1].element, &untouched),
        "the statement past the stop scope must keep its identity"
    );
    assert_eq!(
        print(&formatted),
        "a + 1;\nb+1;",
        "only the edited region is restyled"
    );
}
