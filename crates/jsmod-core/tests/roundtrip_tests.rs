//! Round-trip fidelity across the whole engine: an unedited tree prints back
//! its exact source text, identity traversal returns the same reference, and
//! unknown markers survive every pass untouched.

use std::rc::Rc;

use jsmod_core::{JsVisitor, autoformat, print};
use jsmod_tree::tree::Js;
use jsmod_tree::{
    Comment, LeftPadded, Marker, Markers, RightPadded, Space, Tree, TreeExt, VariableKind, build,
};
use uuid::Uuid;

struct IdentityVisitor;

impl JsVisitor for IdentityVisitor {}

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

const SAMPLE_SOURCE: &str = "// utilities\nimport helpers from \"./helpers\";\n\nconst limit = 10;\n";

/// The tree a front-end would produce for [`SAMPLE_SOURCE`].
fn sample_unit() -> Tree {
    let import = build::import_decl(
        Some(RightPadded::new(
            prefixed(&build::ident("helpers"), " "),
            Space::single_space(),
        )),
        None,
        LeftPadded::build(prefixed(&build::literal("\"./helpers\""), " ")),
    );
    let declaration = build::var_decl(
        VariableKind::Const,
        vec![RightPadded::build(build::named_var(
            prefixed(&build::ident("limit"), " "),
            Some(LeftPadded::new(
                Space::single_space(),
                prefixed(&build::literal("10"), " "),
            )),
        ))],
    )
    .with_prefix(Space::format("\n\n"));

    let unit = build::compilation_unit("sample.js", vec![semi(import), semi(declaration)])
        .with_prefix(Space::new(
            String::new(),
            vec![Comment::new(" utilities", false, "\n")],
        ));
    match &*unit {
        Js::CompilationUnit(n) => Rc::new(Js::CompilationUnit(jsmod_tree::tree::CompilationUnit {
            eof: Space::format("\n"),
            ..n.clone()
        })),
        _ => unreachable!(),
    }
}

#[test]
fn unedited_tree_prints_its_source_text() {
    assert_eq!(print(&sample_unit()), SAMPLE_SOURCE);
}

#[test]
fn identity_traversal_returns_the_same_reference() {
    let unit = sample_unit();
    let mut pass = IdentityVisitor;
    let revisited = pass.visit_root(&unit).expect("root survives");
    assert!(
        Rc::ptr_eq(&unit, &revisited),
        "a visit that changes nothing must return the original reference"
    );
    assert_eq!(print(&revisited), SAMPLE_SOURCE);
}

#[test]
fn unknown_marker_survives_the_full_pipeline() {
    let marker = Marker::Unknown {
        id: Uuid::new_v4(),
        kind: "vendor.marker.Region".to_string(),
        data: serde_json::json!({ "begin": true }),
    };
    let unit = sample_unit();
    let Js::CompilationUnit(n) = &*unit else {
        unreachable!()
    };
    let mut statements = n.statements.clone();
    let tagged = statements[1]
        .element
        .with_markers(Markers::EMPTY.add(marker.clone()));
    statements[1] = statements[1].clone().with_element(tagged);
    let unit: Tree = Rc::new(Js::CompilationUnit(jsmod_tree::tree::CompilationUnit {
        statements,
        ..n.clone()
    }));

    let formatted = autoformat(&unit, &[], None);
    let Js::CompilationUnit(out) = &*formatted else {
        unreachable!()
    };
    assert_eq!(
        out.statements[1].element.markers().markers,
        vec![marker],
        "an unrecognized marker kind must ride through every pass opaquely"
    );
    assert_eq!(
        print(&formatted),
        SAMPLE_SOURCE,
        "the sample is already well formatted, so the pipeline is a no-op"
    );
}

#[test]
fn block_comment_round_trips_with_its_suffix() {
    let statement = build::expr_stmt(build::call(build::ident("setup"), vec![])).with_prefix(
        Space::new("\n".to_string(), vec![Comment::new(" once ", true, "\n")]),
    );
    let unit = build::compilation_unit("c.js", vec![semi(statement)]);

    assert_eq!(print(&unit), "\n/* once */\nsetup();");
}
