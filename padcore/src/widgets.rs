//! Black and white widgets for the toolbar, status bar and file dialog

use crate::theme::SlowColors;
use egui::{Align2, FontId, Rect, Response, Sense, Stroke, Ui, Widget};

fn ink() -> Stroke {
    Stroke::new(1.0, SlowColors::BLACK)
}

/// Fill and text color for a clickable cell.
///
/// Pressed or selected cells are inverted. Disabled ones write their label
/// in the selection grey.
fn cell_colors(enabled: bool, inverted: bool) -> (egui::Color32, egui::Color32) {
    match (enabled, inverted) {
        (false, _) => (SlowColors::WHITE, SlowColors::SELECTION),
        (true, true) => (SlowColors::BLACK, SlowColors::WHITE),
        (true, false) => (SlowColors::WHITE, SlowColors::BLACK),
    }
}

/// Outlined toolbar button that ignores clicks while disabled.
pub struct ToolButton<'a> {
    label: &'a str,
    enabled: bool,
}

impl<'a> ToolButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self { label, enabled: true }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for ToolButton<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = FontId::proportional(13.0);
        let galley = ui.painter().layout_no_wrap(self.label.to_owned(), font, SlowColors::BLACK);
        let size = egui::vec2(galley.size().x + 14.0, ui.spacing().interact_size.y);
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);
        if !ui.is_rect_visible(rect) {
            return response;
        }

        let pressed = self.enabled && response.is_pointer_button_down_on();
        let (fill, text) = cell_colors(self.enabled, pressed);
        let painter = ui.painter();
        painter.rect(rect, 0.0, fill, ink());
        if self.enabled && !pressed && response.hovered() {
            painter.rect_stroke(rect.shrink(2.0), 0.0, ink());
        }
        let origin = rect.center() - galley.size() / 2.0;
        painter.galley_with_override_text_color(origin, galley, text);
        response
    }
}

/// One-pixel vertical rule between toolbar groups.
pub fn toolbar_separator(ui: &mut Ui) {
    let size = egui::vec2(8.0, ui.spacing().interact_size.y);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    ui.painter().vline(rect.center().x, rect.y_range(), ink());
}

/// Outlined bottom strip: `message` at the left, `details` pinned right.
pub fn status_bar(ui: &mut Ui, message: &str, details: &str) {
    crate::theme::menu_bar(ui, |ui| {
        ui.label(message);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(details);
        });
    });
}

/// Row in the open/save file list. Folders get a trailing slash.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool) -> Self {
        Self { name, is_directory, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn display_name(&self) -> String {
        if self.is_directory && self.name != ".." {
            format!("{}/", self.name)
        } else {
            self.name.to_owned()
        }
    }
}

impl Widget for FileListItem<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = egui::vec2(ui.available_width(), 20.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        if !ui.is_rect_visible(rect) {
            return response;
        }

        let (mut fill, text) = cell_colors(true, self.selected);
        if !self.selected && response.hovered() {
            fill = SlowColors::SELECTION;
        }
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, fill);
        let text_rect = Rect::from_min_max(rect.min + egui::vec2(6.0, 0.0), rect.max);
        painter.text(
            text_rect.left_center(),
            Align2::LEFT_CENTER,
            self.display_name(),
            FontId::proportional(12.0),
            text,
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_colors() {
        assert_eq!(cell_colors(true, false), (SlowColors::WHITE, SlowColors::BLACK));
        assert_eq!(cell_colors(true, true), (SlowColors::BLACK, SlowColors::WHITE));
        assert_eq!(cell_colors(false, true).1, SlowColors::SELECTION);
    }

    #[test]
    fn test_directory_names_get_slash() {
        assert_eq!(FileListItem::new("notes", true).display_name(), "notes/");
        assert_eq!(FileListItem::new("..", true).display_name(), "..");
        assert_eq!(FileListItem::new("a.txt", false).display_name(), "a.txt");
    }
}
