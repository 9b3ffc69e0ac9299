//! Dialog view-models
//!
//! Each dialog exists only while it is open. The egui front end draws them
//! and turns their buttons into commands.

use crate::print::PrintPreview;
use crate::settings::{FontSettings, FONT_FAMILIES, FONT_SIZES};
use padcore::storage::{documents_dir, FileBrowser, FileFilter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Find,
    Replace,
    Font,
    PrintPreview,
    File,
    Message,
    About,
}

/// Work deferred behind the unsaved-changes prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    New,
    /// Show the open dialog
    Open,
    /// Open a known file (recent files)
    OpenPath(PathBuf),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct FindDialog {
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReplaceDialog {
    pub query: String,
    pub replacement: String,
}

impl ReplaceDialog {
    /// Replace and replace-all need something to look for.
    pub fn actions_enabled(&self) -> bool {
        !self.query.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FontDialog {
    /// Edited copy; applied only on ok
    pub draft: FontSettings,
}

impl FontDialog {
    pub fn new(current: &FontSettings) -> Self {
        Self { draft: current.clone() }
    }

    /// Offered families, with the current one first when it is not a preset.
    pub fn families(&self) -> Vec<String> {
        let mut families: Vec<String> = FONT_FAMILIES.iter().map(|f| f.to_string()).collect();
        if !families.iter().any(|f| f == &self.draft.family) {
            families.insert(0, self.draft.family.clone());
        }
        families
    }

    pub fn sizes(&self) -> &'static [u32] {
        FONT_SIZES
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogMode {
    Open,
    Save,
}

pub struct FileDialog {
    pub mode: FileDialogMode,
    pub browser: FileBrowser,
    /// Save mode file name
    pub filename: String,
    /// Continues after a successful save
    pub then: Option<PendingAction>,
}

impl FileDialog {
    pub fn new(mode: FileDialogMode, start_dir: Option<PathBuf>) -> Self {
        let dir = start_dir.unwrap_or_else(documents_dir);
        Self {
            mode,
            browser: FileBrowser::new(dir).with_filter(FileFilter::Text),
            filename: String::new(),
            then: None,
        }
    }

    pub fn filter(&self) -> FileFilter {
        self.browser.filter
    }

    pub fn set_filter(&mut self, filter: FileFilter) {
        self.browser.set_filter(filter);
    }

    /// Path the confirm button would act on, if any.
    pub fn target(&self) -> Option<PathBuf> {
        match self.mode {
            FileDialogMode::Open => self
                .browser
                .selected_entry()
                .filter(|e| !e.is_directory)
                .map(|e| e.path.clone()),
            FileDialogMode::Save => {
                let name = self.filename.trim();
                if name.is_empty() {
                    return None;
                }
                let mut name = name.to_string();
                if self.filter() == FileFilter::Text && !name.contains('.') {
                    name.push_str(".txt");
                }
                Some(self.browser.save_directory().join(name))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SavePrompt {
    pub action: PendingAction,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct MessageBox {
    pub title: String,
    pub text: String,
}

/// Every dialog that can be open. At most one of each.
#[derive(Default)]
pub struct Dialogs {
    pub find: Option<FindDialog>,
    pub replace: Option<ReplaceDialog>,
    pub font: Option<FontDialog>,
    pub preview: Option<PrintPreview>,
    pub file: Option<FileDialog>,
    pub prompt: Option<SavePrompt>,
    pub message: Option<MessageBox>,
    pub about: bool,
}

impl Dialogs {
    pub fn close(&mut self, kind: DialogKind) {
        match kind {
            DialogKind::Find => self.find = None,
            DialogKind::Replace => self.replace = None,
            DialogKind::Font => self.font = None,
            DialogKind::PrintPreview => self.preview = None,
            DialogKind::File => self.file = None,
            DialogKind::Message => self.message = None,
            DialogKind::About => self.about = false,
        }
    }

    /// A modal dialog is up; the editor and menus should not take input.
    pub fn is_modal_open(&self) -> bool {
        self.file.is_some() || self.prompt.is_some() || self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("slowpad-dialogs-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_replace_actions_need_query() {
        let mut dialog = ReplaceDialog::default();
        assert!(!dialog.actions_enabled());
        dialog.replacement = "x".to_string();
        assert!(!dialog.actions_enabled());
        dialog.query = "a".to_string();
        assert!(dialog.actions_enabled());
    }

    #[test]
    fn test_font_dialog_keeps_custom_family() {
        let font = FontSettings { family: "Fira Code".to_string(), ..Default::default() };
        let dialog = FontDialog::new(&font);
        let families = dialog.families();
        assert_eq!(families[0], "Fira Code");
        assert_eq!(families.iter().filter(|f| *f == "Consolas").count(), 1);

        let dialog = FontDialog::new(&FontSettings::default());
        assert_eq!(dialog.families().len(), FONT_FAMILIES.len());
    }

    #[test]
    fn test_save_target_adds_extension() {
        let dir = scratch_dir("save");
        let mut dialog = FileDialog::new(FileDialogMode::Save, Some(dir.clone()));
        assert_eq!(dialog.target(), None);

        dialog.filename = "notes".to_string();
        assert_eq!(dialog.target(), Some(dir.join("notes.txt")));

        dialog.filename = "notes.md".to_string();
        assert_eq!(dialog.target(), Some(dir.join("notes.md")));

        dialog.set_filter(FileFilter::All);
        dialog.filename = "README".to_string();
        assert_eq!(dialog.target(), Some(dir.join("README")));
    }

    #[test]
    fn test_open_target_is_selected_file() {
        let dir = scratch_dir("open");
        std::fs::write(dir.join("a.txt"), "a").unwrap();
        std::fs::create_dir_all(dir.join("sub")).unwrap();

        let mut dialog = FileDialog::new(FileDialogMode::Open, Some(dir.clone()));
        assert_eq!(dialog.target(), None);

        // "..", then directories, then files
        dialog.browser.selected_index = Some(1);
        assert_eq!(dialog.target(), None);
        dialog.browser.selected_index = Some(2);
        assert_eq!(dialog.target(), Some(dir.join("a.txt")));
    }

    #[test]
    fn test_close_and_modal() {
        let mut dialogs = Dialogs::default();
        assert!(!dialogs.is_modal_open());
        dialogs.message = Some(MessageBox { title: "t".to_string(), text: "x".to_string() });
        dialogs.about = true;
        assert!(dialogs.is_modal_open());
        dialogs.close(DialogKind::Message);
        dialogs.close(DialogKind::About);
        assert!(!dialogs.is_modal_open());
        assert!(!dialogs.about);
    }
}
