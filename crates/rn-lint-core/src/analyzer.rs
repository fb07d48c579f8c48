//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::syntax::{self, Dialect};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Error while walking the source tree.
    #[error("File discovery failed: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether files with syntax errors abort the run (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.analyzer.exclude.iter().cloned());
        let exclude_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file has
    /// syntax errors while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            result.violations.extend(self.analyze_source(file_path, &content)?);
            result.files_checked += 1;
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes in-memory source as if it were the file at `path`.
    ///
    /// Files with an unsupported extension yield no violations.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded, or if the source has
    /// syntax errors while `fail_on_parse_error` is set.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let Some(dialect) = Dialect::from_path(path) else {
            debug!("Unsupported file type: {}", path.display());
            return Ok(Vec::new());
        };

        let tree = syntax::parse(content, dialect).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if tree.root_node().has_error() {
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: "source contains syntax errors".to_string(),
                });
            }
            warn!(
                "Syntax errors in {}, results may be incomplete",
                path.display()
            );
        }

        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &tree);
            violations.extend(self.apply_severity_override(&**rule, rule_violations));
        }

        Ok(violations)
    }

    /// Applies severity overrides from configuration.
    ///
    /// Only violations at the rule's own severity are overridden; anything
    /// the rule raised at another level (such as a warning about an allow
    /// directive without a reason) keeps it.
    fn apply_severity_override(
        &self,
        rule: &dyn Rule,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule.name()) {
            let own = rule.default_severity();
            for v in violations.iter_mut().filter(|v| v.severity == own) {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all JavaScript and TypeScript sources to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || Dialect::from_path(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};
    use std::fs;
    use tempfile::TempDir;

    /// Flags every `jsx_text` token, enough to exercise the pipeline.
    struct FlagJsxText;

    impl Rule for FlagJsxText {
        fn name(&self) -> &'static str {
            "flag-jsx-text"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn check(&self, ctx: &FileContext, tree: &tree_sitter::Tree) -> Vec<Violation> {
            let mut out = Vec::new();
            let mut stack = vec![tree.root_node()];
            while let Some(node) = stack.pop() {
                if node.kind() == "jsx_text" {
                    let (line, column) = ctx.position_of(node.start_byte());
                    out.push(Violation::new(
                        self.code(),
                        self.name(),
                        Severity::Error,
                        Location::new(ctx.relative_path.clone(), line, column),
                        syntax::text(&node, ctx.content).to_string(),
                    ));
                }
                let mut cursor = node.walk();
                stack.extend(node.children(&mut cursor));
            }
            out
        }
    }

    /// Reports every `jsx_text` as an error plus one fixed warning per file.
    struct FlagWithWarning;

    impl Rule for FlagWithWarning {
        fn name(&self) -> &'static str {
            "flag-with-warning"
        }
        fn code(&self) -> &'static str {
            "TEST002"
        }
        fn check(&self, ctx: &FileContext, tree: &tree_sitter::Tree) -> Vec<Violation> {
            let mut out = FlagJsxText.check(ctx, tree);
            out.push(Violation::new(
                self.code(),
                self.name(),
                Severity::Warning,
                Location::new(ctx.relative_path.clone(), 1, 1),
                "Allow directive is missing required reason",
            ));
            out
        }
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/coverage/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert!(analyzer.root().is_absolute());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = Analyzer::builder().root(".").exclude("[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/project")
            .excludes(["**/generated/**"])
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/project/node_modules/react/index.js")));
        assert!(analyzer.should_exclude(Path::new("/project/src/generated/Icons.tsx")));
        assert!(!analyzer.should_exclude(Path::new("/project/src/App.tsx")));
    }

    #[test]
    fn test_analyze_discovers_supported_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/App.tsx", "const a = <View>hello</View>;\n");
        write(tmp.path(), "src/util.ts", "export const n = <number>x;\n");
        write(tmp.path(), "src/notes.md", "<View>ignored</View>\n");
        write(
            tmp.path(),
            "node_modules/lib/index.js",
            "const b = <View>vendored</View>;\n",
        );

        let result = Analyzer::builder()
            .root(tmp.path())
            .rule(FlagJsxText)
            .build()
            .unwrap()
            .analyze()
            .unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 1);
        let v = &result.violations[0];
        assert_eq!(v.message, "hello");
        assert_eq!(v.location.file, PathBuf::from("src/App.tsx"));
        assert_eq!((v.location.line, v.location.column), (1, 17));
    }

    #[test]
    fn test_disabled_rule_and_severity_override() {
        let tmp = TempDir::new().unwrap();
        let analyzer = |toml: &str| {
            Analyzer::builder()
                .root(tmp.path())
                .config(Config::parse(toml).unwrap())
                .rule(FlagJsxText)
                .build()
                .unwrap()
        };
        let path = tmp.path().join("A.jsx");
        let src = "<View>hi</View>";

        let disabled = analyzer("[rules.flag-jsx-text]\nenabled = false\n");
        assert!(disabled.analyze_source(&path, src).unwrap().is_empty());

        let downgraded = analyzer("[rules.flag-jsx-text]\nseverity = \"info\"\n");
        let violations = downgraded.analyze_source(&path, src).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Info);
    }

    #[test]
    fn test_severity_override_keeps_rule_chosen_levels() {
        let config = Config::parse("[rules.flag-with-warning]\nseverity = \"info\"\n").unwrap();
        let analyzer = Analyzer::builder()
            .root("/project")
            .config(config)
            .rule(FlagWithWarning)
            .build()
            .unwrap();

        let violations = analyzer
            .analyze_source(Path::new("/project/A.jsx"), "<View>hi</View>")
            .unwrap();
        let levels: Vec<Severity> = violations.iter().map(|v| v.severity).collect();
        assert_eq!(levels, vec![Severity::Info, Severity::Warning]);
    }

    #[test]
    fn test_syntax_errors_fail_open_by_default() {
        let path = Path::new("/project/Broken.tsx");
        let src = "const = <View>hi</View";

        let lenient = Analyzer::builder().root("/project").build().unwrap();
        assert!(lenient.analyze_source(path, src).is_ok());

        let strict = Analyzer::builder()
            .root("/project")
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        assert!(matches!(
            strict.analyze_source(path, src),
            Err(AnalyzerError::Parse { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension_is_skipped() {
        let analyzer = Analyzer::builder().root(".").rule(FlagJsxText).build().unwrap();
        let violations = analyzer
            .analyze_source(Path::new("README.md"), "<View>hi</View>")
            .unwrap();
        assert!(violations.is_empty());
    }
}
