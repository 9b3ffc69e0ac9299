//! Application state and command dispatch
//!
//! Everything the window shows is derived from [`AppState`]. The egui layer
//! only draws it and feeds back [`Command`]s; no egui types live here.

use crate::clipboard::Clipboard;
use crate::command::{Command, Enablement};
use crate::dialogs::{
    Dialogs, FileDialog, FileDialogMode, FindDialog, FontDialog, MessageBox,
    PendingAction, PromptChoice, ReplaceDialog, SavePrompt,
};
use crate::document::Document;
use crate::locale::Strings;
use crate::print::PrintPreview;
use crate::settings::Settings;
use padcore::search::{self, char_to_byte, SearchError};
use padcore::storage::RecentFiles;
use padcore::Selection;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const RECENT_LIMIT: usize = 10;
const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// Side effects the window itself must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CloseWindow,
}

/// Last query and the offset the next search starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub last_query: String,
    pub anchor: usize,
    /// A non-empty search has run since the buffer was last emptied
    pub has_searched: bool,
}

/// Transient status bar message.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    message: String,
    expires: Option<Instant>,
}

impl StatusLine {
    pub fn flash(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.expires = Some(Instant::now() + STATUS_TIMEOUT);
    }

    pub fn current(&self, now: Instant) -> Option<&str> {
        match self.expires {
            Some(t) if now < t => Some(&self.message),
            _ => None,
        }
    }
}

pub struct AppState {
    pub document: Document,
    pub selection: Selection,
    pub search: SearchState,
    pub settings: Settings,
    pub recent: RecentFiles,
    pub dialogs: Dialogs,
    pub status: StatusLine,
    pub word_wrap: bool,
    strings: &'static Strings,
    clipboard: Box<dyn Clipboard>,
    recent_path: Option<PathBuf>,
    selection_pushed: Option<Selection>,
    close_confirmed: bool,
}

impl AppState {
    pub fn new(settings: Settings, strings: &'static Strings, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            document: Document::new(),
            selection: Selection::default(),
            search: SearchState::default(),
            settings,
            recent: RecentFiles::new(RECENT_LIMIT),
            dialogs: Dialogs::default(),
            status: StatusLine::default(),
            word_wrap: false,
            strings,
            clipboard,
            recent_path: None,
            selection_pushed: None,
            close_confirmed: false,
        }
    }

    /// Use a persisted recent-files list, saved back to `path` on change.
    pub fn with_recent(mut self, recent: RecentFiles, path: PathBuf) -> Self {
        self.recent = recent;
        self.recent.set_limit(RECENT_LIMIT);
        self.recent_path = Some(path);
        self
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    pub fn close_confirmed(&self) -> bool {
        self.close_confirmed
    }

    /// `"<name> - slowPad"`, with `*` after the name while modified.
    pub fn title(&self) -> String {
        let name = self.document.display_name(self.strings.untitled);
        let marker = if self.document.modified { "*" } else { "" };
        format!("{}{} - {}", name, marker, self.strings.app_name)
    }

    /// Selection set by a command that the editor widget has not seen yet.
    pub fn take_selection_update(&mut self) -> Option<Selection> {
        self.selection_pushed.take()
    }

    pub fn enablement(&self) -> Enablement {
        let has_text = !self.document.is_empty();
        Enablement {
            find: has_text,
            find_next: has_text && self.search.has_searched && !self.search.last_query.is_empty(),
            undo: self.document.can_undo(),
            redo: self.document.can_redo(),
            cut: !self.selection.is_empty(),
            copy: !self.selection.is_empty(),
            paste: true,
            select_all: true,
            replace_actions: self
                .dialogs
                .replace
                .as_ref()
                .map_or(false, ReplaceDialog::actions_enabled),
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Option<Effect> {
        if !self.enablement().allows(&command) {
            return None;
        }

        match command {
            Command::New => return self.guard(PendingAction::New),
            Command::Open => return self.guard(PendingAction::Open),
            Command::OpenRecent(path) => return self.guard(PendingAction::OpenPath(path)),
            Command::Save => {
                self.save();
            }
            Command::SaveAs => self.show_file_dialog(FileDialogMode::Save, None),
            Command::Print | Command::PrintPreview => {
                self.dialogs.preview = Some(PrintPreview::new(
                    &self.document.text,
                    self.settings.font.size,
                    self.word_wrap,
                ));
            }
            Command::Quit => return self.guard(PendingAction::Quit),

            Command::Undo => {
                if let Some(caret) = self.document.undo() {
                    self.select(Selection::caret(caret));
                }
            }
            Command::Redo => {
                if let Some(caret) = self.document.redo() {
                    self.select(Selection::caret(caret));
                }
            }
            Command::Cut => self.cut(),
            Command::Copy => {
                let text = self.selection.text(&self.document.text).to_string();
                self.clipboard.set_text(&text);
            }
            Command::Paste => self.paste(),
            Command::SelectAll => self.select(Selection::new(0, self.document.char_count())),
            Command::Find => {
                self.search.anchor = 0;
                self.dialogs.find = Some(FindDialog { query: self.search.last_query.clone() });
            }
            Command::FindNext => {
                let query = self.search.last_query.clone();
                self.run_search(query);
            }
            Command::Replace => {
                self.search.anchor = 0;
                self.dialogs.replace = Some(ReplaceDialog::default());
            }

            Command::ToggleWordWrap => self.word_wrap = !self.word_wrap,
            Command::ChooseFont => self.dialogs.font = Some(FontDialog::new(&self.settings.font)),
            Command::About => self.dialogs.about = true,

            Command::FindFromDialog => {
                if let Some(query) = self.dialogs.find.as_ref().map(|d| d.query.clone()) {
                    self.run_search(query);
                }
            }
            Command::ReplaceFindNext => {
                if let Some(query) = self.dialogs.replace.as_ref().map(|d| d.query.clone()) {
                    self.run_search(query);
                }
            }
            Command::ReplaceOne => self.replace_one(),
            Command::ReplaceAll => self.replace_all(),
            Command::ApplyFont(font) => {
                self.settings.font = font;
                self.dialogs.font = None;
            }
            Command::AnswerPrompt(choice) => return self.answer_prompt(choice),
            Command::ConfirmFile(path) => return self.confirm_file(path),
            Command::CloseDialog(kind) => self.dialogs.close(kind),

            Command::TextEdited { before, after } => {
                self.document.record_edit(before.head);
                if self.document.is_empty() {
                    self.search.has_searched = false;
                }
                self.set_selection(after);
            }
            Command::SelectionChanged(selection) => self.set_selection(selection),
        }
        None
    }

    // -- document lifecycle --

    /// Run `action` now, or ask first when there are unsaved changes.
    /// While a prompt is already showing, the action it holds stays.
    fn guard(&mut self, action: PendingAction) -> Option<Effect> {
        if self.dialogs.prompt.is_some() {
            return None;
        }
        if self.document.modified {
            let name = self.document.display_name(self.strings.untitled);
            self.dialogs.prompt = Some(SavePrompt {
                action,
                message: self.strings.save_prompt_message(&name),
            });
            None
        } else {
            self.proceed(action)
        }
    }

    fn proceed(&mut self, action: PendingAction) -> Option<Effect> {
        match action {
            PendingAction::New => {
                self.document = Document::new();
                self.select(Selection::caret(0));
                self.search.anchor = 0;
                self.search.has_searched = false;
            }
            PendingAction::Open => self.show_file_dialog(FileDialogMode::Open, None),
            PendingAction::OpenPath(path) => self.open(path),
            PendingAction::Quit => {
                self.shutdown();
                return Some(Effect::CloseWindow);
            }
        }
        None
    }

    fn answer_prompt(&mut self, choice: PromptChoice) -> Option<Effect> {
        let prompt = self.dialogs.prompt.take()?;
        match choice {
            PromptChoice::Cancel => None,
            PromptChoice::Discard => self.proceed(prompt.action),
            PromptChoice::Save => {
                if self.document.path.is_some() {
                    if self.save() {
                        return self.proceed(prompt.action);
                    }
                    None
                } else {
                    self.show_file_dialog(FileDialogMode::Save, Some(prompt.action));
                    None
                }
            }
        }
    }

    fn confirm_file(&mut self, path: PathBuf) -> Option<Effect> {
        let dialog = self.dialogs.file.take()?;
        match dialog.mode {
            FileDialogMode::Open => {
                self.open(path);
                None
            }
            FileDialogMode::Save => {
                if self.write_document(path) {
                    if let Some(action) = dialog.then {
                        return self.proceed(action);
                    }
                }
                None
            }
        }
    }

    fn show_file_dialog(&mut self, mode: FileDialogMode, then: Option<PendingAction>) {
        let mut dialog = FileDialog::new(mode, self.settings.start_dir());
        if mode == FileDialogMode::Save {
            dialog.filename = self
                .document
                .path()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
        }
        dialog.then = then;
        self.dialogs.file = Some(dialog);
    }

    fn open(&mut self, path: PathBuf) {
        match Document::open(path.clone()) {
            Ok(doc) => {
                info!(path = %path.display(), "opened document");
                self.document = doc;
                self.select(Selection::caret(0));
                self.search.anchor = 0;
                self.remember(path);
            }
            Err(e) => warn!("open failed: {}", e),
        }
    }

    /// Save to the bound path, or show the save dialog. True when written.
    fn save(&mut self) -> bool {
        match self.document.path.clone() {
            Some(path) => self.write_document(path),
            None => {
                self.show_file_dialog(FileDialogMode::Save, None);
                false
            }
        }
    }

    fn write_document(&mut self, path: PathBuf) -> bool {
        match self.document.save_as(path.clone()) {
            Ok(()) => {
                info!(path = %path.display(), "saved document");
                self.status.flash(self.strings.saved);
                self.remember(path);
                true
            }
            Err(e) => {
                warn!("save failed: {}", e);
                self.status.flash(self.strings.save_failed);
                false
            }
        }
    }

    fn remember(&mut self, path: PathBuf) {
        self.settings.remember_dir_of(&path);
        self.recent.add(path);
        if let Some(recent_path) = &self.recent_path {
            if let Err(e) = self.recent.save(recent_path) {
                warn!("could not save recent files: {}", e);
            }
        }
    }

    fn shutdown(&mut self) {
        self.close_confirmed = true;
        if let Err(e) = self.settings.save() {
            warn!("could not save settings: {}", e);
        }
    }

    // -- editing --

    fn select(&mut self, selection: Selection) {
        self.set_selection(selection);
        self.selection_pushed = Some(selection);
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.document.char_count());
        self.search.anchor = self.selection.anchor;
    }

    /// Replace the selection with `text` as one undoable edit.
    fn replace_selection(&mut self, text: &str) {
        let before = self.selection;
        let range = before.range();
        let start = char_to_byte(&self.document.text, range.start);
        let end = char_to_byte(&self.document.text, range.end);
        self.document.text.replace_range(start..end, text);
        self.document.record_edit(before.head);
        self.select(Selection::caret(range.start + text.chars().count()));
    }

    fn cut(&mut self) {
        let text = self.selection.text(&self.document.text).to_string();
        self.clipboard.set_text(&text);
        self.replace_selection("");
    }

    fn paste(&mut self) {
        if let Some(text) = self.clipboard.get_text() {
            self.replace_selection(&text);
        }
    }

    // -- search --

    fn run_search(&mut self, query: String) {
        match search::find_next(&self.document.text, &query, self.search.anchor) {
            Ok(Some(found)) => self.select(Selection::of_match(found)),
            Ok(None) => self.report_not_found(&query),
            Err(SearchError::EmptyQuery) => {
                self.status.flash(self.strings.empty_query);
                return;
            }
        }
        self.search.last_query = query;
        self.search.has_searched = true;
    }

    fn report_not_found(&mut self, query: &str) {
        self.dialogs.message = Some(MessageBox {
            title: self.strings.app_name.to_string(),
            text: self.strings.not_found_message(query),
        });
    }

    fn replace_one(&mut self) {
        let Some(dialog) = self.dialogs.replace.clone() else {
            return;
        };
        let before = self.selection;
        // an unconfirmed selection searches from the anchor instead
        let start = if before.text(&self.document.text) == dialog.query {
            before
        } else {
            Selection::caret(self.search.anchor)
        };

        match search::replace_one(&mut self.document.text, &dialog.query, &dialog.replacement, start) {
            Ok(outcome) => {
                if outcome.replaced {
                    self.document.record_edit(before.head);
                }
                self.select(outcome.selection);
                if outcome.found.is_none() {
                    self.report_not_found(&dialog.query);
                }
                self.search.last_query = dialog.query;
                self.search.has_searched = true;
            }
            Err(SearchError::EmptyQuery) => self.status.flash(self.strings.empty_query),
        }
    }

    fn replace_all(&mut self) {
        let Some(dialog) = self.dialogs.replace.as_ref() else {
            return;
        };
        match search::replace_all(&self.document.text, &dialog.query, &dialog.replacement) {
            Ok(text) => {
                let caret = self.selection.head;
                self.document.replace_text(text, caret);
                self.select(Selection::caret(self.document.char_count()));
            }
            Err(SearchError::EmptyQuery) => self.status.flash(self.strings.empty_query),
        }
    }
}
