//! slowPad look: black ink on white paper
//!
//! Every widget state shares one flat outline, nothing is rounded and
//! nothing casts a shadow. Text selection is the only grey on screen.

use egui::style::{WidgetVisuals, Widgets};
use egui::{Color32, FontFamily, FontId, Margin, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

pub struct SlowColors;

impl SlowColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const SELECTION: Color32 = Color32::from_rgb(160, 160, 160);
}

fn outline() -> Stroke {
    Stroke::new(1.0, SlowColors::BLACK)
}

/// Sizes for the chrome around the editor. The editor font itself comes
/// from the user's settings, not from here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowTheme {
    /// Body and button text; small and heading scale from it
    pub ui_font_size: f32,
    pub margin: f32,
    pub spacing: f32,
}

impl Default for SlowTheme {
    fn default() -> Self {
        Self { ui_font_size: 14.0, margin: 8.0, spacing: 4.0 }
    }
}

impl SlowTheme {
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style {
            text_styles: self.text_styles(),
            visuals: Self::visuals(),
            ..Style::default()
        };
        style.spacing.window_margin = Margin::same(self.margin);
        style.spacing.item_spacing = egui::vec2(self.spacing, self.spacing);
        style.spacing.button_padding = egui::vec2(2.0 * self.spacing, self.spacing);
        ctx.set_style(style);
    }

    fn text_styles(&self) -> BTreeMap<TextStyle, FontId> {
        let body = self.ui_font_size;
        let proportional = |size: f32| FontId::new(size, FontFamily::Proportional);
        BTreeMap::from([
            (TextStyle::Small, proportional((body * 0.8).round())),
            (TextStyle::Body, proportional(body)),
            (TextStyle::Button, proportional(body)),
            (TextStyle::Heading, proportional((body * 1.4).round())),
            (TextStyle::Monospace, FontId::new(body, FontFamily::Monospace)),
        ])
    }

    fn visuals() -> Visuals {
        let flat = WidgetVisuals {
            bg_fill: SlowColors::WHITE,
            weak_bg_fill: SlowColors::WHITE,
            bg_stroke: outline(),
            fg_stroke: outline(),
            rounding: Rounding::ZERO,
            expansion: 0.0,
        };
        let mut visuals = Visuals {
            window_fill: SlowColors::WHITE,
            panel_fill: SlowColors::WHITE,
            faint_bg_color: SlowColors::WHITE,
            extreme_bg_color: SlowColors::WHITE,
            window_rounding: Rounding::ZERO,
            menu_rounding: Rounding::ZERO,
            window_stroke: outline(),
            window_shadow: egui::epaint::Shadow::NONE,
            popup_shadow: egui::epaint::Shadow::NONE,
            widgets: Widgets {
                noninteractive: flat,
                inactive: flat,
                hovered: flat,
                active: flat,
                open: flat,
            },
            ..Visuals::light()
        };
        visuals.selection.bg_fill = SlowColors::SELECTION;
        visuals.selection.stroke = outline();
        visuals
    }

    /// Outlined strip used for the toolbar and status bar.
    pub fn title_bar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(SlowColors::WHITE)
            .stroke(outline())
            .inner_margin(Margin::symmetric(8.0, 4.0))
    }

    /// Borderless paper behind the text area.
    pub fn editor_frame() -> egui::Frame {
        egui::Frame::none().fill(SlowColors::WHITE).inner_margin(Margin::same(4.0))
    }
}

/// Lay out `add_contents` in a row inside an outlined strip.
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    egui::Frame::none()
        .fill(SlowColors::WHITE)
        .stroke(outline())
        .inner_margin(Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner)
}

/// Rewrite Tab input before any widget sees it, and drop the Cmd +/-
/// zoom shortcuts.
///
/// A bare Tab press, or a tab inside typed text, becomes `tab_spaces`
/// spaces. With `tab_spaces` 0 tabs are swallowed. Tab never moves focus.
pub fn consume_special_keys_with_tab(ctx: &egui::Context, tab_spaces: usize) {
    let spaces = " ".repeat(tab_spaces);
    let mut saw_tab = false;
    ctx.input_mut(|i| {
        let events = std::mem::take(&mut i.events);
        i.events = events
            .into_iter()
            .filter_map(|event| match event {
                egui::Event::Key { key: egui::Key::Tab, pressed, modifiers, .. } => {
                    saw_tab = true;
                    (pressed && tab_spaces > 0 && modifiers.is_none())
                        .then(|| egui::Event::Text(spaces.clone()))
                }
                egui::Event::Text(text) if text.contains('\t') => {
                    (tab_spaces > 0).then(|| egui::Event::Text(text.replace('\t', &spaces)))
                }
                egui::Event::Key { key: egui::Key::Plus | egui::Key::Minus | egui::Key::Equals, modifiers, .. }
                    if modifiers.command => None,
                other => Some(other),
            })
            .collect();
    });
    if saw_tab {
        if let Some(id) = ctx.memory(|mem| mem.focused()) {
            ctx.memory_mut(|mem| mem.request_focus(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_scale_from_body() {
        let theme = SlowTheme { ui_font_size: 10.0, ..SlowTheme::default() };
        let styles = theme.text_styles();
        assert_eq!(styles[&TextStyle::Body].size, 10.0);
        assert_eq!(styles[&TextStyle::Small].size, 8.0);
        assert_eq!(styles[&TextStyle::Heading].size, 14.0);
        assert_eq!(styles[&TextStyle::Monospace].family, FontFamily::Monospace);
    }

    #[test]
    fn test_visuals_are_black_and_white() {
        let visuals = SlowTheme::visuals();
        assert_eq!(visuals.panel_fill, SlowColors::WHITE);
        assert_eq!(visuals.widgets.hovered.bg_fill, SlowColors::WHITE);
        assert_eq!(visuals.widgets.active.fg_stroke.color, SlowColors::BLACK);
        assert_eq!(visuals.window_rounding, Rounding::ZERO);
    }

    #[test]
    fn test_tab_becomes_spaces() {
        let ctx = egui::Context::default();
        let tab = egui::Event::Key {
            key: egui::Key::Tab,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        let input = egui::RawInput { events: vec![tab, egui::Event::Text("a\tb".into())], ..Default::default() };
        let _ = ctx.run(input, |ctx| {
            consume_special_keys_with_tab(ctx, 4);
            let events = ctx.input(|i| i.events.clone());
            assert_eq!(events, vec![egui::Event::Text("    ".into()), egui::Event::Text("a    b".into())]);
        });
    }
}
