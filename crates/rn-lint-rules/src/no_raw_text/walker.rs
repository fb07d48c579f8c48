//! Walks a tree to every markup root and checks each element's children
//! against that element's own capability.

use rn_lint_core::syntax::text;
use tree_sitter::Node;

use super::content::{classify, extract, extract_text, markup_children, Content, Finding};
use super::registry::{CapabilityRegistry, SkipSet};

/// Collects raw-text findings for one file.
pub struct TreeWalker<'a> {
    source: &'a str,
    registry: &'a CapabilityRegistry,
    skip: &'a SkipSet,
    findings: Vec<Finding>,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker over `source` with the file's registry.
    #[must_use]
    pub fn new(source: &'a str, registry: &'a CapabilityRegistry, skip: &'a SkipSet) -> Self {
        Self {
            source,
            registry,
            skip,
            findings: Vec::new(),
        }
    }

    /// Checks every markup element under `root`, in source order.
    #[must_use]
    pub fn run(mut self, root: Node<'_>) -> Vec<Finding> {
        self.walk(root);
        self.findings
    }

    /// Searches `node` for markup roots. Nothing outside markup is text.
    fn walk(&mut self, node: Node<'_>) {
        if matches!(node.kind(), "jsx_element" | "jsx_self_closing_element") {
            self.visit_markup(node);
            return;
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for child in children {
            self.walk(child);
        }
    }

    fn visit_markup(&mut self, element: Node<'_>) {
        let name = element_name(element, self.source);
        let permitted = name
            .as_deref()
            .is_some_and(|n| self.registry.is_capable(n) || self.skip.contains(n));

        // Attribute values can hold markup of their own.
        let tag = if element.kind() == "jsx_element" {
            element.child_by_field_name("open_tag")
        } else {
            Some(element)
        };
        if let Some(tag) = tag {
            let name_node = tag.child_by_field_name("name");
            let mut cursor = tag.walk();
            let attributes: Vec<Node<'_>> = tag
                .named_children(&mut cursor)
                .filter(|n| Some(*n) != name_node)
                .collect();
            for attribute in attributes {
                self.walk(attribute);
            }
        }

        for child in markup_children(element) {
            self.check(child, permitted);
        }
    }

    fn check(&mut self, content: Content<'_>, permitted: bool) {
        match content {
            Content::Element(node) => self.visit_markup(node),
            Content::Fragment(node) => {
                for child in markup_children(node) {
                    self.check(child, permitted);
                }
            }
            Content::Group { rendered, hidden } => {
                for node in hidden {
                    self.walk(node);
                }
                for node in rendered {
                    self.check(classify(node), permitted);
                }
            }
            Content::Opaque(node) => self.walk(node),
            Content::Empty => {}
            Content::Text { start, end } => {
                if !permitted {
                    self.findings.extend(extract_text(self.source, start, end));
                }
            }
            literal @ (Content::StringLiteral(_)
            | Content::TemplateLiteral(_)
            | Content::Identifier(_)) => {
                if !permitted {
                    self.findings.extend(extract(&literal, self.source));
                }
            }
        }
    }
}

/// Tag name of an element with whitespace removed (`Animated . Text`
/// reads as `Animated.Text`); `None` for fragments.
fn element_name(element: Node<'_>, source: &str) -> Option<String> {
    let name = match element.kind() {
        "jsx_element" => element
            .child_by_field_name("open_tag")?
            .child_by_field_name("name")?,
        _ => element.child_by_field_name("name")?,
    };
    Some(
        text(&name, source)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect(),
    )
}
