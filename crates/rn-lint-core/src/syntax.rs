//! Tree-sitter front-end for JavaScript and TypeScript sources.
//!
//! Picks a grammar from the file extension and hands back the parsed
//! [`Tree`]. Rules walk the tree directly; this module only owns grammar
//! selection and a couple of node helpers shared between rules.

use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

/// File extensions rn-lint analyzes.
pub const EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Source dialect, which decides the grammar used for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// JavaScript or TypeScript with JSX.
    Tsx,
    /// Plain TypeScript. Angle brackets are type assertions, not markup.
    TypeScript,
}

impl Dialect {
    /// Selects the dialect for a path, or `None` for unsupported files.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn language(self) -> Language {
        match self {
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }
}

/// Errors raised by the front-end.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    /// The grammar was built for an incompatible tree-sitter version.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser gave up without producing a tree.
    #[error("parser returned no tree")]
    Aborted,
}

/// Parses `source` with the grammar for `dialect`.
///
/// Syntax errors do not fail the parse; they show up as `ERROR` nodes and
/// `tree.root_node().has_error()`.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded or the parser aborts.
pub fn parse(source: &str, dialect: Dialect) -> Result<Tree, SyntaxError> {
    let mut parser = Parser::new();
    parser.set_language(&dialect.language())?;
    parser.parse(source, None).ok_or(SyntaxError::Aborted)
}

/// Returns the source text covered by `node`.
///
/// Yields an empty string rather than panicking when the node's range is
/// not a valid UTF-8 slice of `source`.
#[must_use]
pub fn text<'s>(node: &Node<'_>, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Returns the named children of `node`, skipping comments.
#[must_use]
pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_from_extension() {
        assert_eq!(Dialect::from_path(Path::new("App.tsx")), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_path(Path::new("App.jsx")), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_path(Path::new("index.js")), Some(Dialect::Tsx));
        assert_eq!(
            Dialect::from_path(Path::new("types.ts")),
            Some(Dialect::TypeScript)
        );
        assert_eq!(Dialect::from_path(Path::new("README.md")), None);
        assert_eq!(Dialect::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn every_listed_extension_has_a_dialect() {
        for ext in EXTENSIONS {
            let path = format!("file.{ext}");
            assert!(Dialect::from_path(Path::new(&path)).is_some(), "{ext}");
        }
    }

    #[test]
    fn parses_jsx() {
        let src = "const a = <View><Text>hi</Text></View>;";
        let tree = parse(src, Dialect::Tsx).unwrap();
        let root = tree.root_node();
        assert_eq!(root.kind(), "program");
        assert!(!root.has_error());
        assert!(root.to_sexp().contains("jsx_element"));
    }

    #[test]
    fn typescript_dialect_has_no_markup() {
        let src = "const n = <number>value;";
        let tree = parse(src, Dialect::TypeScript).unwrap();
        assert!(!tree.root_node().has_error());
        assert!(!tree.root_node().to_sexp().contains("jsx"));
    }

    #[test]
    fn broken_source_still_parses() {
        let tree = parse("const = <View>", Dialect::Tsx).unwrap();
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn text_slices_node() {
        let src = "let greeting = 'hi';";
        let tree = parse(src, Dialect::Tsx).unwrap();
        let decl = tree.root_node().named_child(0).unwrap();
        assert_eq!(text(&decl, src), src);
    }
}
