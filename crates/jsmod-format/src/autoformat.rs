//! Pipeline entry points: the ordered composition of the six passes.

use std::rc::Rc;

use jsmod_tree::tree::CompilationUnit;
use jsmod_tree::{
    BlankLinesStyle, IndentsStyle, SpacesStyle, Style, Tree, WrappingAndBracesStyle,
};
use jsmod_visitor::{Cursor, JsVisitor};
use tracing::debug;

use crate::blank_lines::BlankLinesVisitor;
use crate::minimum_viable_spacing::MinimumViableSpacingVisitor;
use crate::normalize_whitespace::NormalizeWhitespaceVisitor;
use crate::spaces::SpacesVisitor;
use crate::styles::resolve_style;
use crate::tabs_and_indents::TabsAndIndentsVisitor;
use crate::wrapping_and_braces::WrappingAndBracesVisitor;

fn run<V: JsVisitor>(name: &str, mut pass: V, tree: &Tree) -> Tree {
    debug!(pass = name, "autoformat pass");
    pass.visit_root(tree)
        .unwrap_or_else(|| panic!("formatting pass {name} deleted the tree root"))
}

/// Run the six formatting passes in order. Styles resolve through the
/// override list, then any `NamedStyles` marker on the root, then the
/// built-in defaults. Each pass independently honors `stop_after`.
pub fn autoformat(tree: &Tree, styles: &[Style], stop_after: Option<&Tree>) -> Tree {
    let stop = stop_after.cloned();
    let blank_lines: BlankLinesStyle = resolve_style(tree, styles);
    let wrapping: WrappingAndBracesStyle = resolve_style(tree, styles);
    let spaces: SpacesStyle = resolve_style(tree, styles);
    let indents: IndentsStyle = resolve_style(tree, styles);

    let tree = run(
        "normalize-whitespace",
        NormalizeWhitespaceVisitor::new(stop.clone()),
        tree,
    );
    let tree = run(
        "minimum-viable-spacing",
        MinimumViableSpacingVisitor::new(stop.clone()),
        &tree,
    );
    let tree = run(
        "blank-lines",
        BlankLinesVisitor::new(blank_lines, stop.clone()),
        &tree,
    );
    let tree = run(
        "wrapping-and-braces",
        WrappingAndBracesVisitor::new(wrapping, stop.clone()),
        &tree,
    );
    let tree = run("spaces", SpacesVisitor::new(spaces, stop.clone()), &tree);
    run(
        "tabs-and-indents",
        TabsAndIndentsVisitor::new(indents, stop),
        &tree,
    )
}

/// Format only when a transformation actually changed something: if
/// `before` and `after` are the same reference the pipeline is skipped
/// entirely.
pub fn maybe_autoformat(
    before: &Tree,
    after: &Tree,
    styles: &[Style],
    stop_after: Option<&Tree>,
) -> Tree {
    if Rc::ptr_eq(before, after) {
        Rc::clone(after)
    } else {
        autoformat(after, styles, stop_after)
    }
}

/// The pipeline packaged as a visitor, for embedding autoformatting inside
/// a larger pass: visiting a compilation unit formats it.
pub struct AutoformatVisitor {
    styles: Vec<Style>,
    stop_after: Option<Tree>,
}

impl AutoformatVisitor {
    pub fn new(styles: Vec<Style>, stop_after: Option<Tree>) -> AutoformatVisitor {
        AutoformatVisitor { styles, stop_after }
    }
}

impl JsVisitor for AutoformatVisitor {
    fn stop_after(&self) -> Option<&Tree> {
        self.stop_after.as_ref()
    }

    fn visit_compilation_unit(
        &mut self,
        _n: &CompilationUnit,
        tree: &Tree,
        _cursor: &Cursor,
    ) -> Option<Tree> {
        Some(autoformat(tree, &self.styles, self.stop_after.as_ref()))
    }
}
