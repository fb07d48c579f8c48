//! Name tables deciding which elements may hold raw text.
//!
//! Two tables with different provenance are kept apart: the
//! [`CapabilityRegistry`] is inferred from the file (built-ins plus styled
//! aliases), the [`SkipSet`] is declared by the user and only consulted
//! where an element tag is tested.

use std::collections::BTreeSet;

use rn_lint_core::syntax::{named_children, text};
use tree_sitter::Node;

/// Elements that render literal text in every file.
pub const TEXT_ELEMENTS: &[&str] = &["Text", "TSpan"];

/// Text-capable element names for one file.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    aliases: BTreeSet<String>,
}

impl CapabilityRegistry {
    /// Registry holding only the built-in text elements.
    #[must_use]
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Builds the registry by scanning the file's top-level declarations.
    ///
    /// A binding is an alias when it is a plain identifier initialized with a
    /// tagged template whose tag is `X.Text` / `X.TSpan` or `f(Text)` /
    /// `f(TSpan)`. Aliases of aliases are not followed.
    #[must_use]
    pub fn scan(program: Node<'_>, source: &str) -> Self {
        let mut registry = Self::builtin();

        for statement in named_children(&program) {
            for declarator in declarators(statement) {
                if let Some(alias) = styled_alias(declarator, source) {
                    tracing::debug!("Registered text alias `{alias}`");
                    registry.aliases.insert(alias.to_string());
                }
            }
        }

        registry
    }

    /// Whether `name` may directly contain literal text.
    #[must_use]
    pub fn is_capable(&self, name: &str) -> bool {
        TEXT_ELEMENTS.contains(&name) || self.aliases.contains(name)
    }

    /// Aliases discovered in the file, in name order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }
}

/// Variable declarators of a top-level statement, looking through `export`.
fn declarators(statement: Node<'_>) -> Vec<Node<'_>> {
    match statement.kind() {
        "lexical_declaration" | "variable_declaration" => named_children(&statement)
            .into_iter()
            .filter(|n| n.kind() == "variable_declarator")
            .collect(),
        "export_statement" => statement
            .child_by_field_name("declaration")
            .map(declarators)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Name bound by `declarator` if its initializer is a styled text element.
fn styled_alias<'s>(declarator: Node<'_>, source: &'s str) -> Option<&'s str> {
    let name = declarator.child_by_field_name("name")?;
    if name.kind() != "identifier" {
        return None;
    }

    let tag = template_tag(declarator.child_by_field_name("value")?)?;
    let target = match tag.kind() {
        "member_expression" => text(&tag.child_by_field_name("property")?, source),
        "call_expression" => {
            let args = tag.child_by_field_name("arguments")?;
            match named_children(&args).as_slice() {
                [only] if only.kind() == "identifier" => text(only, source),
                _ => return None,
            }
        }
        _ => return None,
    };

    TEXT_ELEMENTS
        .contains(&target)
        .then(|| text(&name, source))
}

/// Tag of a tagged template expression.
///
/// With type arguments the grammar reads `tag<Props>\`...\`` as the
/// comparison `(tag < Props) > \`...\``, so that shape is unwrapped too.
fn template_tag(value: Node<'_>) -> Option<Node<'_>> {
    match value.kind() {
        "call_expression" => {
            if value.child_by_field_name("arguments")?.kind() != "template_string" {
                return None;
            }
            value.child_by_field_name("function")
        }
        "binary_expression" => {
            let left = value.child_by_field_name("left")?;
            let is_typed = operator(value) == Some(">")
                && value.child_by_field_name("right")?.kind() == "template_string"
                && left.kind() == "binary_expression"
                && operator(left) == Some("<");
            if !is_typed {
                return None;
            }
            left.child_by_field_name("left")
        }
        _ => None,
    }
}

fn operator(binary: Node<'_>) -> Option<&'static str> {
    binary.child_by_field_name("operator").map(|op| op.kind())
}

/// Custom element names allowed to receive raw text at their call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    names: Vec<String>,
}

impl SkipSet {
    /// Creates a skip set, keeping the first occurrence of each name.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.extend(names);
        set
    }

    /// Adds names to the set.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
    }

    /// Whether `name` is skip-listed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Configured names, in configuration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
