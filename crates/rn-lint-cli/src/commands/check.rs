//! Check command implementation.

use anyhow::{Context, Result};
use rn_lint_core::{Analyzer, Config, RuleConfig};
use rn_lint_rules::{all_rules, no_raw_text};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when violations at or above the configured `fail_on`
/// threshold were found.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    skip: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let mut config = load_config(source)?;
    add_skip(&mut config, skip);

    let threshold = config.fail_threshold();
    let rules = all_rules(&config);

    let mut builder = Analyzer::builder().root(path).config(config).excludes(exclude);
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    Ok(result.has_violations_at(threshold))
}

/// Loads the configuration the resolver pointed at.
fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };

    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }

    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Appends `--skip` names to the `[rules.no-raw-text]` skip list.
fn add_skip(config: &mut Config, skip: Vec<String>) {
    if skip.is_empty() {
        return;
    }

    let rule = config
        .rules
        .entry(no_raw_text::NAME.to_string())
        .or_insert_with(RuleConfig::default);

    let mut names = rule.get_str_array("skip");
    names.extend(skip);
    rule.options.insert(
        "skip".to_string(),
        toml::Value::Array(names.into_iter().map(toml::Value::String).collect()),
    );
}
