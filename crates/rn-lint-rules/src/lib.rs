//! # rn-lint-rules
//!
//! Built-in lint rules for rn-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | RN001 | `no-raw-text` | Forbids raw text outside of `<Text>` components |
//!
//! ## Usage
//!
//! ```ignore
//! use rn_lint_core::Analyzer;
//! use rn_lint_rules::NoRawText;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app")
//!     .rule(NoRawText::new().skip(["Title", "Button"]))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod no_raw_text;

pub use no_raw_text::NoRawText;

/// Re-export core types for convenience.
pub use rn_lint_core::{Rule, Severity, Violation};

use rn_lint_core::{Config, RuleBox};

/// Returns every built-in rule, configured from the `[rules.*]` tables.
///
/// Disabled rules are still returned; the analyzer skips them.
#[must_use]
pub fn all_rules(config: &Config) -> Vec<RuleBox> {
    let no_raw_text = config
        .rule(no_raw_text::NAME)
        .map_or_else(NoRawText::new, NoRawText::from_config);

    vec![Box::new(no_raw_text)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_default() {
        let rules = all_rules(&Config::default());
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["no-raw-text"]);
        assert_eq!(rules[0].code(), "RN001");
        assert_eq!(rules[0].default_severity(), Severity::Error);
    }

    #[test]
    fn test_all_rules_from_config() {
        let config = Config::parse(
            "[rules.no-raw-text]\nseverity = \"info\"\nskip = [\"Label\"]\n",
        )
        .unwrap();
        let rules = all_rules(&config);
        assert_eq!(rules[0].default_severity(), Severity::Info);
    }
}
