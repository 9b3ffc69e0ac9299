//! Document model for slowPad
//!
//! The buffer is a plain `String` so egui's `TextEdit` can edit it in place.
//! Edits are recorded after the fact against a copy of the last committed
//! text, which gives snapshot undo for both typed and programmatic changes.

use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Undo snapshots kept per document.
const UNDO_LIMIT: usize = 100;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Clone, Debug)]
struct UndoState {
    text: String,
    caret: usize,
}

/// A plain-text document with its file binding and history.
#[derive(Clone, Debug)]
pub struct Document {
    /// Buffer contents, edited directly by the editor widget
    pub text: String,
    /// File the buffer is bound to, if any
    pub path: Option<PathBuf>,
    /// Whether the buffer differs from the text last opened or saved
    pub modified: bool,
    committed: String,
    saved: String,
    undo_stack: Vec<UndoState>,
    redo_stack: Vec<UndoState>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::from_text(String::new())
    }

    pub fn from_text(text: String) -> Self {
        Self {
            committed: text.clone(),
            saved: text.clone(),
            text,
            path: None,
            modified: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Read a file as UTF-8. Invalid sequences are replaced, not rejected.
    pub fn open(path: PathBuf) -> Result<Self> {
        let bytes = std::fs::read(&path).map_err(|source| DocumentError::Read {
            path: path.clone(),
            source,
        })?;
        let mut doc = Self::from_text(String::from_utf8_lossy(&bytes).into_owned());
        doc.path = Some(path);
        Ok(doc)
    }

    /// Write the buffer as UTF-8 and bind the document to `path`.
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        std::fs::write(&path, self.text.as_bytes()).map_err(|source| DocumentError::Write {
            path: path.clone(),
            source,
        })?;
        self.path = Some(path);
        self.saved = self.text.clone();
        self.modified = false;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Name shown in the title bar and prompts: the bound path, or `untitled`.
    pub fn display_name(&self, untitled: &str) -> String {
        match &self.path {
            Some(path) => path.to_string_lossy().to_string(),
            None => untitled.to_string(),
        }
    }

    /// Record that `text` changed since the last commit.
    ///
    /// `caret` is where the cursor was before the edit; undo returns there.
    /// A call with no actual change does nothing.
    pub fn record_edit(&mut self, caret: usize) {
        if self.text == self.committed {
            return;
        }
        let previous = std::mem::replace(&mut self.committed, self.text.clone());
        self.undo_stack.push(UndoState { text: previous, caret });
        if self.undo_stack.len() > UNDO_LIMIT {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.modified = self.text != self.saved;
    }

    /// Replace the whole buffer as one undoable edit.
    pub fn replace_text(&mut self, text: String, caret: usize) {
        self.text = text;
        self.record_edit(caret);
    }

    /// Restore the previous snapshot. Returns the caret to show.
    pub fn undo(&mut self) -> Option<usize> {
        let state = self.undo_stack.pop()?;
        self.redo_stack.push(UndoState {
            text: std::mem::take(&mut self.text),
            caret: state.caret,
        });
        self.text = state.text;
        self.committed = self.text.clone();
        self.modified = self.text != self.saved;
        Some(state.caret.min(self.char_count()))
    }

    pub fn redo(&mut self) -> Option<usize> {
        let state = self.redo_stack.pop()?;
        self.undo_stack.push(UndoState {
            text: std::mem::take(&mut self.text),
            caret: state.caret,
        });
        self.text = state.text;
        self.committed = self.text.clone();
        self.modified = self.text != self.saved;
        Some(state.caret.min(self.char_count()))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.text.unicode_words().count()
    }

    /// One-based line and column of a character offset.
    pub fn line_col(&self, char_idx: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;
        for c in self.text.chars().take(char_idx) {
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("slowpad-doc-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(!doc.modified);
        assert!(doc.path.is_none());
        assert!(!doc.can_undo());
        assert_eq!(doc.display_name("untitled"), "untitled");
    }

    #[test]
    fn test_record_edit_and_undo() {
        let mut doc = Document::new();
        doc.text.push_str("hello");
        doc.record_edit(0);
        assert!(doc.modified);
        assert!(doc.can_undo());

        doc.text.push_str(" world");
        doc.record_edit(5);

        assert_eq!(doc.undo(), Some(5));
        assert_eq!(doc.text, "hello");
        assert_eq!(doc.undo(), Some(0));
        assert_eq!(doc.text, "");
        assert_eq!(doc.undo(), None);

        assert_eq!(doc.redo(), Some(0));
        assert_eq!(doc.text, "hello");
        assert_eq!(doc.redo(), Some(5));
        assert_eq!(doc.text, "hello world");
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_undo_to_saved_text_is_clean() {
        let mut doc = Document::from_text("saved".to_string());
        doc.text.push('!');
        doc.record_edit(5);
        assert!(doc.modified);

        assert_eq!(doc.undo(), Some(5));
        assert_eq!(doc.text, "saved");
        assert!(!doc.modified);

        doc.redo();
        assert!(doc.modified);
    }

    #[test]
    fn test_edit_back_to_saved_text_is_clean() {
        let mut doc = Document::from_text("abc".to_string());
        doc.replace_text("abcd".to_string(), 3);
        doc.replace_text("abc".to_string(), 4);
        assert!(!doc.modified);
        assert!(doc.can_undo());
    }

    #[test]
    fn test_save_moves_clean_point() {
        let path = scratch("clean-point.txt");
        let mut doc = Document::new();
        doc.replace_text("draft".to_string(), 0);
        doc.save_as(path).unwrap();
        doc.undo();
        assert_eq!(doc.text, "");
        assert!(doc.modified);
        doc.redo();
        assert!(!doc.modified);
    }

    #[test]
    fn test_unchanged_text_records_nothing() {
        let mut doc = Document::from_text("abc".to_string());
        doc.record_edit(1);
        assert!(!doc.modified);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut doc = Document::new();
        doc.replace_text("a".to_string(), 0);
        doc.undo();
        assert!(doc.can_redo());
        doc.replace_text("b".to_string(), 0);
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_undo_limit() {
        let mut doc = Document::new();
        for i in 0..(UNDO_LIMIT + 20) {
            doc.replace_text(i.to_string(), 0);
        }
        let mut undone = 0;
        while doc.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, UNDO_LIMIT);
    }

    #[test]
    fn test_save_and_open() {
        let path = scratch("roundtrip.txt");
        let mut doc = Document::new();
        doc.replace_text("line one\nстрока два\n".to_string(), 0);
        doc.save_as(path.clone()).unwrap();
        assert!(!doc.modified);
        assert_eq!(doc.path(), Some(path.as_path()));

        let reopened = Document::open(path.clone()).unwrap();
        assert_eq!(reopened.text, "line one\nстрока два\n");
        assert!(!reopened.modified);
        assert_eq!(reopened.display_name("untitled"), path.to_string_lossy());
    }

    #[test]
    fn test_open_invalid_utf8_is_lossy() {
        let path = scratch("latin1.txt");
        std::fs::write(&path, [b'c', b'a', b'f', 0xe9]).unwrap();
        let doc = Document::open(path).unwrap();
        assert_eq!(doc.text, "caf\u{fffd}");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let err = Document::open(scratch("does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_counts() {
        let doc = Document::from_text("one two\nthree".to_string());
        assert_eq!(doc.char_count(), 13);
        assert_eq!(doc.word_count(), 3);
        assert_eq!(doc.line_col(0), (1, 1));
        assert_eq!(doc.line_col(3), (1, 4));
        assert_eq!(doc.line_col(8), (2, 1));
        assert_eq!(doc.line_col(13), (2, 6));
    }
}
