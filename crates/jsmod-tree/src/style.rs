//! Style configuration objects consumed by the autoformat passes.
//!
//! Defaults follow the IntelliJ JavaScript code style. Styles reach a pass
//! through a fallback chain: explicit overrides, then a `NamedStyles` marker
//! attached to the source file, then these built-in defaults — a lookup miss
//! is never an error.

use serde::{Deserialize, Serialize};

/// Indentation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentsStyle {
    pub use_tab_character: bool,
    pub tab_size: usize,
    pub indent_size: usize,
    /// Extra indent for wrapped continuation lines (operands of a broken
    /// binary expression, chained member accesses).
    pub continuation_indent: usize,
}

impl Default for IndentsStyle {
    fn default() -> IndentsStyle {
        IndentsStyle {
            use_tab_character: false,
            tab_size: 4,
            indent_size: 4,
            continuation_indent: 8,
        }
    }
}

impl IndentsStyle {
    /// The indent text for one nesting level.
    pub fn single_indent(&self) -> String {
        if self.use_tab_character {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_size)
        }
    }
}

/// Blank-line minima by context.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankLinesMinimum {
    pub after_imports: usize,
    pub around_class: usize,
    pub around_field: usize,
    pub around_method: usize,
    pub around_field_in_interface: usize,
    pub around_method_in_interface: usize,
}

/// Blank-line configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankLinesStyle {
    /// Hard cap on consecutive blank lines anywhere in code.
    pub keep_maximum_in_code: usize,
    pub minimum: BlankLinesMinimum,
}

impl Default for BlankLinesStyle {
    fn default() -> BlankLinesStyle {
        BlankLinesStyle {
            keep_maximum_in_code: 2,
            minimum: BlankLinesMinimum {
                after_imports: 1,
                around_class: 1,
                around_field: 0,
                around_method: 1,
                around_field_in_interface: 0,
                around_method_in_interface: 1,
            },
        }
    }
}

/// Spacing around binary operators, bucketed by operator category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AroundOperators {
    pub assignment: bool,
    pub logical: bool,
    pub equality: bool,
    pub relational: bool,
    pub bitwise: bool,
    pub additive: bool,
    pub multiplicative: bool,
    pub shift: bool,
}

impl Default for AroundOperators {
    fn default() -> AroundOperators {
        AroundOperators {
            assignment: true,
            logical: true,
            equality: true,
            relational: true,
            bitwise: true,
            additive: true,
            multiplicative: true,
            shift: true,
        }
    }
}

/// Spacing before the opening `{` of specific constructs. All on by
/// default: `class A {`, `foo() {`, `} else {`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeLeftBrace {
    pub class_left_brace: bool,
    pub function_left_brace: bool,
    pub if_left_brace: bool,
    pub else_left_brace: bool,
    pub for_left_brace: bool,
    pub while_left_brace: bool,
    pub switch_left_brace: bool,
    pub try_left_brace: bool,
    pub catch_left_brace: bool,
    pub finally_left_brace: bool,
}

impl Default for BeforeLeftBrace {
    fn default() -> BeforeLeftBrace {
        BeforeLeftBrace {
            class_left_brace: true,
            function_left_brace: true,
            if_left_brace: true,
            else_left_brace: true,
            for_left_brace: true,
            while_left_brace: true,
            switch_left_brace: true,
            try_left_brace: true,
            catch_left_brace: true,
            finally_left_brace: true,
        }
    }
}

/// Spacing before the opening `(` of specific constructs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeParentheses {
    pub function_declaration: bool,
    pub function_call: bool,
    pub if_: bool,
    pub for_: bool,
    pub while_: bool,
    pub switch_: bool,
    pub catch_: bool,
}

impl Default for BeforeParentheses {
    fn default() -> BeforeParentheses {
        BeforeParentheses {
            function_declaration: false,
            function_call: false,
            if_: true,
            for_: true,
            while_: true,
            switch_: true,
            catch_: true,
        }
    }
}

/// Spacing just inside the delimiters of specific constructs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithinDelimiters {
    pub function_declaration_parentheses: bool,
    pub function_call_parentheses: bool,
    pub if_parentheses: bool,
    pub for_parentheses: bool,
    pub while_parentheses: bool,
    pub switch_parentheses: bool,
    pub catch_parentheses: bool,
    pub brackets: bool,
}

/// Spacing around the ternary's `?` and `:`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TernaryOperatorSpaces {
    pub before_question: bool,
    pub after_question: bool,
    pub before_colon: bool,
    pub after_colon: bool,
}

impl Default for TernaryOperatorSpaces {
    fn default() -> TernaryOperatorSpaces {
        TernaryOperatorSpaces {
            before_question: true,
            after_question: true,
            before_colon: true,
            after_colon: true,
        }
    }
}

/// Separator spacing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSpaces {
    pub before_comma: bool,
    pub after_comma: bool,
}

impl Default for OtherSpaces {
    fn default() -> OtherSpaces {
        OtherSpaces {
            before_comma: false,
            after_comma: true,
        }
    }
}

/// Fine-grained inter-token spacing configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacesStyle {
    pub around_operators: AroundOperators,
    pub before_parentheses: BeforeParentheses,
    pub before_left_brace: BeforeLeftBrace,
    pub within: WithinDelimiters,
    pub ternary_operator: TernaryOperatorSpaces,
    pub other: OtherSpaces,
}

/// Brace and line-placement policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappingAndBracesStyle {
    /// Place `else` on its own line instead of after the closing `}`.
    pub else_on_new_line: bool,
}

/// One style object, tagged by kind so a style set can hold a heterogeneous
/// list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Style {
    Indents(IndentsStyle),
    BlankLines(BlankLinesStyle),
    Spaces(SpacesStyle),
    WrappingAndBraces(WrappingAndBracesStyle),
}

impl Style {
    pub fn kind(&self) -> &'static str {
        match self {
            Style::Indents(_) => "indents",
            Style::BlankLines(_) => "blankLines",
            Style::Spaces(_) => "spaces",
            Style::WrappingAndBraces(_) => "wrappingAndBraces",
        }
    }
}

/// Pull one style kind out of a style list.
pub trait FromStyles: Default + Clone {
    fn from_styles(styles: &[Style]) -> Option<Self>;
}

impl FromStyles for IndentsStyle {
    fn from_styles(styles: &[Style]) -> Option<IndentsStyle> {
        styles.iter().find_map(|s| match s {
            Style::Indents(v) => Some(v.clone()),
            _ => None,
        })
    }
}

impl FromStyles for BlankLinesStyle {
    fn from_styles(styles: &[Style]) -> Option<BlankLinesStyle> {
        styles.iter().find_map(|s| match s {
            Style::BlankLines(v) => Some(v.clone()),
            _ => None,
        })
    }
}

impl FromStyles for SpacesStyle {
    fn from_styles(styles: &[Style]) -> Option<SpacesStyle> {
        styles.iter().find_map(|s| match s {
            Style::Spaces(v) => Some(v.clone()),
            _ => None,
        })
    }
}

impl FromStyles for WrappingAndBracesStyle {
    fn from_styles(styles: &[Style]) -> Option<WrappingAndBracesStyle> {
        styles.iter().find_map(|s| match s {
            Style::WrappingAndBraces(v) => Some(v.clone()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intellij_defaults() {
        let indents = IndentsStyle::default();
        assert_eq!(indents.indent_size, 4);
        assert_eq!(indents.single_indent(), "    ");

        let blank = BlankLinesStyle::default();
        assert_eq!(blank.keep_maximum_in_code, 2);
        assert_eq!(blank.minimum.around_method, 1);

        let spaces = SpacesStyle::default();
        assert!(spaces.around_operators.additive);
        assert!(spaces.before_parentheses.if_);
        assert!(!spaces.before_parentheses.function_call);
        assert!(spaces.before_left_brace.class_left_brace);
        assert!(spaces.before_left_brace.function_left_brace);
        assert!(!spaces.other.before_comma);
        assert!(spaces.other.after_comma);
    }

    #[test]
    fn from_styles_picks_matching_kind() {
        let styles = vec![
            Style::Spaces(SpacesStyle::default()),
            Style::Indents(IndentsStyle {
                indent_size: 2,
                ..IndentsStyle::default()
            }),
        ];
        let indents = IndentsStyle::from_styles(&styles).expect("indents style present");
        assert_eq!(indents.indent_size, 2);
        assert!(BlankLinesStyle::from_styles(&styles).is_none());
    }
}
