//! # rn-lint-core
//!
//! Core framework for linting React Native sources with tree-sitter.
//!
//! This crate provides the foundational traits and types the rules are
//! built on. It includes:
//!
//! - [`Rule`] trait for per-file rules over a tree-sitter [`tree_sitter::Tree`]
//! - [`syntax`] front-end choosing the TSX or TypeScript grammar per file
//! - [`Analyzer`] for discovering files and orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use rn_lint_core::Analyzer;
//! use rn_lint_rules::NoRawText;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app")
//!     .rule(NoRawText::new().skip(["Title"]))
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod syntax;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use utils::allowance::AllowCheck;
