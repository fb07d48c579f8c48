//! Rule to forbid literal text outside text-capable elements.
//!
//! # Rationale
//!
//! React Native only renders strings inside `<Text>` (and `<TSpan>` for
//! SVG). A string placed directly in a `<View>` crashes at runtime with
//! "Text strings must be rendered within a <Text> component".
//!
//! # Configuration
//!
//! - `skip`: component names that wrap their children in `<Text>`
//!   themselves (default: empty)
//!
//! Styled aliases declared at the top of the file
//! (`const Title = styled.Text\`...\``) are recognized automatically.
//!
//! # Suppression
//!
//! - `{/* rn-lint: allow(no-raw-text) reason="..." */}` on the line above
//! - `// rn-lint: allow(no-raw-text) reason="..."` at the end of the line

mod content;
mod registry;
mod walker;

pub use content::{Finding, FindingKind};
pub use registry::{CapabilityRegistry, SkipSet, TEXT_ELEMENTS};

use rn_lint_core::utils::allowance::check_allow_with_reason;
use rn_lint_core::{FileContext, Rule, RuleConfig, Severity, Suggestion, Violation};
use walker::TreeWalker;

/// Rule code for no-raw-text.
pub const CODE: &str = "RN001";

/// Rule name for no-raw-text.
pub const NAME: &str = "no-raw-text";

const HELP: &str = "wrap the text in <Text> or add the component to the rule's skip list";

/// Forbids raw text and whitespace outside `<Text>`-like elements.
#[derive(Debug, Clone)]
pub struct NoRawText {
    /// Components allowed to receive raw text.
    pub skip: SkipSet,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoRawText {
    fn default() -> Self {
        Self::new()
    }
}

impl NoRawText {
    /// Creates a new rule with an empty skip list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            skip: SkipSet::default(),
            severity: Severity::Error,
        }
    }

    /// Adds component names to the skip list.
    #[must_use]
    pub fn skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(names);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Creates the rule from its `[rules.no-raw-text]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let rule = Self::new().skip(config.get_str_array("skip"));
        match config.severity {
            Some(severity) => rule.severity(severity),
            None => rule,
        }
    }

    fn report(&self, ctx: &FileContext, finding: &Finding) -> Option<Violation> {
        let location = ctx.location(finding.start, finding.end);

        let allow = check_allow_with_reason(ctx.content, location.line, NAME);
        if allow.is_allowed() {
            if self.requires_allow_reason() && allow.reason().is_none() {
                return Some(
                    Violation::new(
                        CODE,
                        NAME,
                        Severity::Warning,
                        location,
                        format!("Allow directive for '{NAME}' is missing required reason"),
                    )
                    .with_suggestion(Suggestion::new(
                        "Add reason=\"...\" to explain why this exception is necessary",
                    )),
                );
            }
            return None;
        }

        Some(
            Violation::new(CODE, NAME, self.severity, location, finding.message())
                .with_suggestion(Suggestion::new(HELP)),
        )
    }
}

impl Rule for NoRawText {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids raw text outside of <Text> components"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &tree_sitter::Tree) -> Vec<Violation> {
        let root = tree.root_node();
        let registry = CapabilityRegistry::scan(root, ctx.content);

        TreeWalker::new(ctx.content, &registry, &self.skip)
            .run(root)
            .iter()
            .filter_map(|finding| self.report(ctx, finding))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_lint_core::syntax::{parse, Dialect};
    use rn_lint_core::Config;
    use std::path::{Path, PathBuf};

    fn check_with(rule: &NoRawText, code: &str) -> Vec<Violation> {
        let tree = parse(code, Dialect::Tsx).unwrap();
        let ctx = FileContext {
            path: Path::new("App.tsx"),
            content: code,
            relative_path: PathBuf::from("App.tsx"),
        };
        rule.check(&ctx, &tree)
    }

    fn check_code(code: &str) -> Vec<Violation> {
        check_with(&NoRawText::new(), code)
    }

    #[test]
    fn test_detects_raw_text() {
        let violations = check_code("const A = () => <View>some text</View>;");
        assert_eq!(violations.len(), 1);

        let v = &violations[0];
        assert_eq!(v.code, CODE);
        assert_eq!(v.rule, NAME);
        assert_eq!(v.severity, Severity::Error);
        assert_eq!((v.location.line, v.location.column), (1, 23));
        assert_eq!(v.location.length, "some text".len());
        assert_eq!(v.suggestion.as_ref().map(|s| s.message.as_str()), Some(HELP));
    }

    #[test]
    fn test_messages() {
        let code = r"
const A = () => (
  <View>
    some text
    {'literal'}
    {`${name}!`}
    {children}
    <View>   </View>
  </View>
);
";
        let messages: Vec<String> = check_code(code).into_iter().map(|v| v.message).collect();
        insta::assert_snapshot!(messages.join("\n"), @r"
        Raw text (some text) cannot be used outside of a text tag.
        Raw text (literal) cannot be used outside of a text tag.
        Raw text (TemplateLiteral: name) cannot be used outside of a text tag.
        Raw text (children) cannot be used outside of a text tag.
        Whitespace(s) cannot be used outside of a text tag.
        ");
    }

    #[test]
    fn test_location_of_indented_text() {
        let code = "<View>\n    some text\n</View>;";
        let violations = check_code(code);
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].location.line, violations[0].location.column), (2, 5));
    }

    #[test]
    fn test_valid_text_usage() {
        let code = r"
const StyledText = styled.Text`
  color: red;
`;
const A = () => (
  <View>
    <Text>some text</Text>
    <StyledText>styled</StyledText>
    <Svg><Text><TSpan>svg</TSpan></Text></Svg>
  </View>
);
";
        assert!(check_code(code).is_empty());
    }

    #[test]
    fn test_skip_list() {
        let rule = NoRawText::new().skip(["Title"]);
        assert!(check_with(&rule, "<Title>Hello</Title>;").is_empty());
        assert_eq!(check_with(&rule, "<Button>Hello</Button>;").len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = Config::parse(
            r#"
[rules.no-raw-text]
severity = "warning"
skip = ["Title", "Button"]
"#,
        )
        .unwrap();
        let rule = NoRawText::from_config(config.rule(NAME).unwrap());
        assert_eq!(rule.skip.names(), ["Title", "Button"]);
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert!(!rule.requires_allow_reason());

        let violations = check_with(&rule, "<View>Hi</View>;");
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_allow_with_reason() {
        let code = r#"
const A = () => (
  <View>
    {/* rn-lint: allow(no-raw-text) reason="Legacy screen, removed in next release" */}
    some text
  </View>
);
"#;
        assert!(check_code(code).is_empty());
    }

    #[test]
    fn test_allow_without_reason() {
        let code = "<View>some text</View>; // rn-lint: allow(no-raw-text)";
        let violations = check_code(code);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].message.contains("missing required reason"));

        let lenient = NoRawText::new().severity(Severity::Warning);
        assert!(check_with(&lenient, code).is_empty());
    }

    #[test]
    fn test_typescript_dialect_reports_nothing() {
        let code = "const n = <number>value;";
        let tree = parse(code, Dialect::TypeScript).unwrap();
        let ctx = FileContext {
            path: Path::new("util.ts"),
            content: code,
            relative_path: PathBuf::from("util.ts"),
        };
        assert!(NoRawText::new().check(&ctx, &tree).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let code = "<View>a{b}<Text><View>c</View></Text>  </View>;";
        assert_eq!(check_code(code), check_code(code));
    }
}
