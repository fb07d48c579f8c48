//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a tree-sitter syntax tree.
///
/// Rules receive the parsed tree together with the [`FileContext`] holding
/// the source it was parsed from, and return every violation they find.
///
/// # Example
///
/// ```ignore
/// use rn_lint_core::{FileContext, Rule, Violation};
///
/// pub struct NoInlineStyles;
///
/// impl Rule for NoInlineStyles {
///     fn name(&self) -> &'static str { "no-inline-styles" }
///     fn code(&self) -> &'static str { "RN002" }
///
///     fn check(&self, ctx: &FileContext, tree: &tree_sitter::Tree) -> Vec<Violation> {
///         let mut visitor = StyleVisitor::new(ctx);
///         visitor.walk(tree.root_node());
///         visitor.violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-raw-text").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "RN001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// Implementations must not panic on unexpected tree shapes; anything
    /// they do not understand is reported as nothing.
    fn check(&self, ctx: &FileContext, tree: &tree_sitter::Tree) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
