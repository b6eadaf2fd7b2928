use crate::error::{Result, RewriteError};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A source file being edited.
///
/// Read fully into memory once, mutated zero or more times in memory, and
/// written back at most once. Nothing touches disk until [`Self::save`], so a
/// failed run leaves the file untouched.
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    content: String,
    edits: Vec<Edit>,
}

#[derive(Debug, Clone)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

impl SourceDocument {
    /// Read a document from disk
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)?;
        Ok(Self {
            path,
            content,
            edits: Vec::new(),
        })
    }

    /// Create a document from in-memory content
    pub fn from_string(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            edits: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether any edit is queued but not yet applied
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Queue a byte-range replacement. Ranges refer to the content as it is
    /// now; all queued edits are applied together by [`Self::apply_edits`].
    pub fn queue_edit(&mut self, range: Range<usize>, replacement: impl Into<String>) {
        self.edits.push(Edit {
            range,
            replacement: replacement.into(),
        });
    }

    /// Apply all queued edits in one pass, highest offset first so earlier
    /// spans stay valid. Overlapping or out-of-bounds spans are rejected
    /// before any text changes.
    pub fn apply_edits(&mut self) -> Result<()> {
        if self.edits.is_empty() {
            return Ok(());
        }
        let mut edits = std::mem::take(&mut self.edits);
        edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));

        for edit in &edits {
            if edit.range.start > edit.range.end
                || edit.range.end > self.content.len()
                || !self.content.is_char_boundary(edit.range.start)
                || !self.content.is_char_boundary(edit.range.end)
            {
                return Err(RewriteError::InvalidSpan {
                    start: edit.range.start,
                    end: edit.range.end,
                });
            }
        }
        for pair in edits.windows(2) {
            if pair[1].range.end > pair[0].range.start {
                return Err(RewriteError::InvalidSpan {
                    start: pair[1].range.start,
                    end: pair[1].range.end,
                });
            }
        }

        for edit in &edits {
            self.content
                .replace_range(edit.range.clone(), &edit.replacement);
        }
        Ok(())
    }

    /// Replace the entire content (whole-text substitutions)
    pub fn replace_content(&mut self, content: String) {
        self.content = content;
    }

    /// Persist the current content back to the document's path
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.content)?;
        Ok(())
    }
}
