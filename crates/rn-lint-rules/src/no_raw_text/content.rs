//! What a markup child holds, and the label reported when it is raw text.
//!
//! Children are classified once into [`Content`]; the walker decides what
//! to do with each variant and asks [`extract`] / [`extract_text`] for a
//! [`Finding`] when the parent element cannot hold text.

use rn_lint_core::syntax::{named_children, text};
use tree_sitter::Node;

/// Prefix of labels derived from template literals.
pub const TEMPLATE_LABEL_PREFIX: &str = "TemplateLiteral: ";

/// Kind of offending content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// Displayable text outside a text element.
    RawText,
    /// Blank text outside a text element.
    Whitespace,
}

/// Offending literal content located by byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Raw text or whitespace.
    pub kind: FindingKind,
    /// Human-readable description of the content; empty for whitespace.
    pub label: String,
    /// Start byte of the offending content.
    pub start: usize,
    /// End byte of the offending content.
    pub end: usize,
}

impl Finding {
    /// Diagnostic message for this finding.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            FindingKind::RawText => format!(
                "Raw text ({}) cannot be used outside of a text tag.",
                self.label
            ),
            FindingKind::Whitespace => {
                "Whitespace(s) cannot be used outside of a text tag.".to_string()
            }
        }
    }
}

/// One child position of a markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'t> {
    /// Literal markup text between two structural children, as a byte range.
    Text {
        /// Start byte of the run.
        start: usize,
        /// End byte of the run.
        end: usize,
    },
    /// A named element, checked as a markup root of its own.
    Element(Node<'t>),
    /// A nested `<>...</>`; its children belong to the enclosing element.
    Fragment(Node<'t>),
    /// Conditional, logical, array or parenthesized expression.
    Group {
        /// Branches whose value is rendered in place.
        rendered: Vec<Node<'t>>,
        /// Parts that are evaluated but never rendered (conditions).
        hidden: Vec<Node<'t>>,
    },
    /// `{'text'}`
    StringLiteral(Node<'t>),
    /// `` {`text ${value}`} ``
    TemplateLiteral(Node<'t>),
    /// `{children}`
    Identifier(Node<'t>),
    /// Any other expression. Never text itself, but may contain markup.
    Opaque(Node<'t>),
    /// `{}` or `{/* comment */}`
    Empty,
}

/// Whether `node` is a `<>...</>` fragment.
#[must_use]
pub fn is_fragment(node: Node<'_>) -> bool {
    node.kind() == "jsx_element"
        && node
            .child_by_field_name("open_tag")
            .is_some_and(|tag| tag.child_by_field_name("name").is_none())
}

/// Splits the body of a `jsx_element` into classified children.
///
/// Text runs are rebuilt from the source between structural children, so
/// whitespace the grammar does not tokenize is still seen. Self-closing
/// elements have no children.
#[must_use]
pub fn markup_children(element: Node<'_>) -> Vec<Content<'_>> {
    if element.kind() != "jsx_element" {
        return Vec::new();
    }

    let mut contents = Vec::new();
    let mut text_start = element
        .child_by_field_name("open_tag")
        .map_or(element.start_byte(), |tag| tag.end_byte());

    let mut cursor = element.walk();
    for child in element.named_children(&mut cursor) {
        if matches!(
            child.kind(),
            "jsx_opening_element"
                | "jsx_closing_element"
                | "jsx_text"
                | "html_character_reference"
                | "comment"
        ) {
            continue;
        }

        push_text(&mut contents, text_start, child.start_byte());
        contents.push(classify_child(child));
        text_start = child.end_byte();
    }

    let text_end = element
        .child_by_field_name("close_tag")
        .map_or(element.end_byte(), |tag| tag.start_byte());
    push_text(&mut contents, text_start, text_end);

    contents
}

fn push_text(contents: &mut Vec<Content<'_>>, start: usize, end: usize) {
    if start < end {
        contents.push(Content::Text { start, end });
    }
}

fn classify_child(child: Node<'_>) -> Content<'_> {
    if child.kind() != "jsx_expression" {
        return classify(child);
    }
    named_children(&child)
        .into_iter()
        .next()
        .map_or(Content::Empty, classify)
}

/// Classifies an expression (or markup node) found in a child position.
#[must_use]
pub fn classify(node: Node<'_>) -> Content<'_> {
    match node.kind() {
        "jsx_element" if is_fragment(node) => Content::Fragment(node),
        "jsx_element" | "jsx_self_closing_element" => Content::Element(node),
        "string" => Content::StringLiteral(node),
        "template_string" => Content::TemplateLiteral(node),
        "identifier" => Content::Identifier(node),
        "parenthesized_expression" => match named_children(&node).into_iter().next() {
            Some(inner) => Content::Group {
                rendered: vec![inner],
                hidden: Vec::new(),
            },
            None => Content::Empty,
        },
        "array" => Content::Group {
            rendered: named_children(&node),
            hidden: Vec::new(),
        },
        "ternary_expression" => Content::Group {
            rendered: fields(node, &["consequence", "alternative"]),
            hidden: fields(node, &["condition"]),
        },
        "binary_expression" => {
            let operator = node.child_by_field_name("operator").map(|op| op.kind());
            match operator {
                Some("&&") => Content::Group {
                    rendered: fields(node, &["right"]),
                    hidden: fields(node, &["left"]),
                },
                Some("||" | "??") => Content::Group {
                    rendered: fields(node, &["left", "right"]),
                    hidden: Vec::new(),
                },
                _ => Content::Opaque(node),
            }
        }
        _ => Content::Opaque(node),
    }
}

fn fields<'t>(node: Node<'t>, names: &[&str]) -> Vec<Node<'t>> {
    names
        .iter()
        .filter_map(|name| node.child_by_field_name(name))
        .collect()
}

/// Finding for a literal text run `source[start..end]`, if it is visible.
///
/// Blank runs that contain a line break are layout whitespace, which JSX
/// drops when compiling, and yield nothing.
#[must_use]
pub fn extract_text(source: &str, start: usize, end: usize) -> Option<Finding> {
    let raw = source.get(start..end)?;
    if raw.trim().is_empty() && raw.contains(['\n', '\r']) {
        return None;
    }
    literal(raw, start)
}

/// Finding for a string, template or identifier child; `None` for anything
/// that cannot be shown to render text.
#[must_use]
pub fn extract(content: &Content<'_>, source: &str) -> Option<Finding> {
    match content {
        Content::StringLiteral(node) => {
            let value = unquote(text(node, source));
            literal(value, node.start_byte() + 1)
        }
        Content::TemplateLiteral(node) => template(*node, source),
        Content::Identifier(node) => Some(raw_text(
            text(node, source),
            node.start_byte(),
            node.end_byte(),
        )),
        _ => None,
    }
}

/// Classifies literal `value` that starts at byte `start`.
fn literal(value: &str, start: usize) -> Option<Finding> {
    if value.is_empty() {
        return None;
    }

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(Finding {
            kind: FindingKind::Whitespace,
            label: String::new(),
            start,
            end: start + value.len(),
        });
    }

    let lead = value.len() - value.trim_start().len();
    Some(raw_text(trimmed, start + lead, start + lead + trimmed.len()))
}

fn raw_text(label: &str, start: usize, end: usize) -> Finding {
    Finding {
        kind: FindingKind::RawText,
        label: label.to_string(),
        start,
        end,
    }
}

fn template(node: Node<'_>, source: &str) -> Option<Finding> {
    let substitutions: Vec<Node<'_>> = named_children(&node)
        .into_iter()
        .filter(|n| n.kind() == "template_substitution")
        .collect();

    let Some(first) = substitutions.first() else {
        return literal(unquote(text(&node, source)), node.start_byte() + 1);
    };

    let reference = substitutions
        .iter()
        .find_map(|s| first_identifier(*s))
        .map_or_else(
            || {
                text(first, source)
                    .trim_start_matches("${")
                    .trim_end_matches('}')
                    .trim()
            },
            |ident| text(&ident, source),
        );

    Some(raw_text(
        &format!("{TEMPLATE_LABEL_PREFIX}{reference}"),
        node.start_byte(),
        node.end_byte(),
    ))
}

/// First `identifier` below `node` in source order.
fn first_identifier(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() == "identifier" {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(first_identifier)
}

/// Strips the delimiters of a string or template literal.
fn unquote(literal: &str) -> &str {
    let mut chars = literal.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
