//! Commands and their enablement
//!
//! Every menu item, shortcut, toolbar button and dialog button is turned into
//! a [`Command`] and handed to `AppState::dispatch`.

use crate::dialogs::{DialogKind, PromptChoice};
use crate::settings::FontSettings;
use egui::{Key, Modifiers};
use padcore::Selection;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // File
    New,
    Open,
    OpenRecent(PathBuf),
    Save,
    SaveAs,
    Print,
    PrintPreview,
    Quit,

    // Edit
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Find,
    FindNext,
    Replace,

    // Format / help
    ToggleWordWrap,
    ChooseFont,
    About,

    // Dialog buttons
    FindFromDialog,
    ReplaceFindNext,
    ReplaceOne,
    ReplaceAll,
    ApplyFont(FontSettings),
    AnswerPrompt(PromptChoice),
    ConfirmFile(PathBuf),
    CloseDialog(DialogKind),

    // Editor notifications
    TextEdited { before: Selection, after: Selection },
    SelectionChanged(Selection),
}

impl Command {
    /// Shortcut hint shown next to the menu label.
    pub fn shortcut_label(&self) -> Option<&'static str> {
        let label = match self {
            Command::New => "ctrl+n",
            Command::Open => "ctrl+o",
            Command::Save => "ctrl+s",
            Command::SaveAs => "shift+ctrl+s",
            Command::Print => "ctrl+p",
            Command::Quit => "ctrl+q",
            Command::Undo => "ctrl+z",
            Command::Redo => "shift+ctrl+z",
            Command::Cut => "ctrl+x",
            Command::Copy => "ctrl+c",
            Command::Paste => "ctrl+v",
            Command::SelectAll => "ctrl+a",
            Command::Find => "ctrl+f",
            Command::FindNext => "f3",
            Command::Replace => "ctrl+h",
            _ => return None,
        };
        Some(label)
    }
}

/// Shortcut intercepted before the editor widget sees the key.
///
/// Cut, copy, paste and select all are left to the widget. Undo and redo
/// are taken so the document history stays the only one, except while
/// another text field (`field_focused`) has focus and owns its own history.
pub fn command_for_key(key: Key, modifiers: Modifiers, field_focused: bool) -> Option<Command> {
    let cmd = modifiers.command;
    let shift = modifiers.shift;
    let command = match key {
        Key::N if cmd => Command::New,
        Key::O if cmd => Command::Open,
        Key::S if cmd && shift => Command::SaveAs,
        Key::S if cmd => Command::Save,
        Key::P if cmd => Command::Print,
        Key::Q if cmd => Command::Quit,
        Key::Z | Key::Y if cmd && field_focused => return None,
        Key::Z if cmd && shift => Command::Redo,
        Key::Z if cmd => Command::Undo,
        Key::Y if cmd => Command::Redo,
        Key::F if cmd => Command::Find,
        Key::H if cmd => Command::Replace,
        Key::F3 if !cmd => Command::FindNext,
        _ => return None,
    };
    Some(command)
}

/// Which actions are available right now. Recomputed from state every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enablement {
    pub find: bool,
    pub find_next: bool,
    pub undo: bool,
    pub redo: bool,
    pub cut: bool,
    pub copy: bool,
    pub paste: bool,
    pub select_all: bool,
    /// Replace and replace-all buttons of the replace dialog
    pub replace_actions: bool,
}

impl Enablement {
    pub fn allows(&self, command: &Command) -> bool {
        match command {
            Command::Find => self.find,
            Command::FindNext => self.find_next,
            Command::Undo => self.undo,
            Command::Redo => self.redo,
            Command::Cut => self.cut,
            Command::Copy => self.copy,
            Command::Paste => self.paste,
            Command::SelectAll => self.select_all,
            Command::ReplaceOne | Command::ReplaceAll => self.replace_actions,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_shortcuts() {
        assert_eq!(command_for_key(Key::N, Modifiers::COMMAND, false), Some(Command::New));
        assert_eq!(command_for_key(Key::S, Modifiers::COMMAND, false), Some(Command::Save));
        assert_eq!(
            command_for_key(Key::S, Modifiers::COMMAND | Modifiers::SHIFT, false),
            Some(Command::SaveAs)
        );
        assert_eq!(command_for_key(Key::N, Modifiers::NONE, false), None);
    }

    #[test]
    fn test_edit_shortcuts() {
        assert_eq!(command_for_key(Key::Z, Modifiers::COMMAND, false), Some(Command::Undo));
        assert_eq!(
            command_for_key(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT, false),
            Some(Command::Redo)
        );
        assert_eq!(command_for_key(Key::F3, Modifiers::NONE, false), Some(Command::FindNext));
        assert_eq!(command_for_key(Key::H, Modifiers::COMMAND, false), Some(Command::Replace));
        // left to the text widget
        assert_eq!(command_for_key(Key::C, Modifiers::COMMAND, false), None);
        assert_eq!(command_for_key(Key::A, Modifiers::COMMAND, false), None);
    }

    #[test]
    fn test_field_keeps_its_own_undo() {
        assert_eq!(command_for_key(Key::Z, Modifiers::COMMAND, true), None);
        assert_eq!(command_for_key(Key::Y, Modifiers::COMMAND, true), None);
        assert_eq!(
            command_for_key(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT, true),
            None
        );
        assert_eq!(command_for_key(Key::F, Modifiers::COMMAND, true), Some(Command::Find));
        assert_eq!(command_for_key(Key::F3, Modifiers::NONE, true), Some(Command::FindNext));
    }

    #[test]
    fn test_allows() {
        let en = Enablement { paste: true, select_all: true, ..Default::default() };
        assert!(!en.allows(&Command::Find));
        assert!(!en.allows(&Command::Cut));
        assert!(!en.allows(&Command::ReplaceAll));
        assert!(en.allows(&Command::Paste));
        assert!(en.allows(&Command::New));
        assert!(en.allows(&Command::About));
    }

    #[test]
    fn test_shortcut_labels() {
        assert_eq!(Command::FindNext.shortcut_label(), Some("f3"));
        assert_eq!(Command::About.shortcut_label(), None);
    }
}
