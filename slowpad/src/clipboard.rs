//! Clipboard access for the edit menu
//!
//! Keyboard cut/copy/paste go through egui; the menu, toolbar and context
//! menu go through a [`Clipboard`].

use tracing::debug;

pub trait Clipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// System clipboard via arboard, with an in-process fallback when no
/// clipboard service is reachable.
#[derive(Default)]
pub struct SystemClipboard {
    internal: String,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        let text = arboard::Clipboard::new()
            .ok()
            .and_then(|mut c| c.get_text().ok())
            .unwrap_or_else(|| self.internal.clone());
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn set_text(&mut self, text: &str) {
        self.internal = text.to_string();
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text.to_string()) {
                    debug!("system clipboard rejected text: {}", e);
                }
            }
            Err(e) => debug!("system clipboard unavailable: {}", e),
        }
    }
}

/// Shared in-memory clipboard; clones see the same text.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    pub text: std::rc::Rc<std::cell::RefCell<String>>,
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        let text = self.text.borrow();
        if text.is_empty() {
            None
        } else {
            Some(text.clone())
        }
    }

    fn set_text(&mut self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
}
