//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::types::Location;

/// Context provided to per-file rules.
///
/// Carries the source text the tree was parsed from, so rules can slice
/// node text and turn byte offsets into reportable locations.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        // A single-file run uses the file itself as the root.
        let relative_path = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ if path == root => path
                .file_name()
                .map_or_else(|| path.to_path_buf(), PathBuf::from),
            _ => path.to_path_buf(),
        };

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Returns the 1-indexed `(line, column)` of a byte offset.
    ///
    /// Columns count bytes, matching tree-sitter points. Offsets past the
    /// end of the file clamp to the last position.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let before = &self.content.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        (line, offset - line_start + 1)
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 1-indexed column number
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or 0 if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.split('\n').enumerate() {
            if i + 1 == line {
                return offset + column.saturating_sub(1);
            }
            offset += line_content.len() + 1;
        }

        offset
    }

    /// Builds a [`Location`] for the byte range `start..end`.
    #[must_use]
    pub fn location(&self, start: usize, end: usize) -> Location {
        let (line, column) = self.position_of(start);
        Location::new(self.relative_path.clone(), line, column)
            .with_span(start, end.saturating_sub(start))
    }
}
