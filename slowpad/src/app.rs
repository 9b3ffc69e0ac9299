//! slowPad window
//!
//! Draws [`AppState`] with egui: menu bar, title bar, toolbar, the editor
//! (egui's `TextEdit::multiline` with a layouter for the chosen font), the
//! status bar and the dialogs. Input is turned into commands and dispatched
//! once per frame after drawing.

use crate::command::{command_for_key, Command, Enablement};
use crate::dialogs::{DialogKind, FileDialogMode, PromptChoice};
use crate::print::{LINE_SPACING, MARGIN_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::settings::{FontSettings, WindowGeometry};
use crate::state::{AppState, Effect};
use egui::text::{CCursor, CCursorRange, LayoutJob, TextFormat};
use egui::{Align2, Color32, Context, Key, Stroke};
use padcore::storage::FileFilter;
use padcore::theme::{consume_special_keys_with_tab, menu_bar, SlowColors};
use padcore::widgets::{status_bar, toolbar_separator, FileListItem, ToolButton};
use padcore::{Selection, SlowTheme};
use std::time::{Duration, Instant};

/// Spaces inserted for Tab in the editor
const TAB_SPACES: usize = 4;

pub struct SlowPadApp {
    state: AppState,
    editor_id: egui::Id,
    /// Last title sent to the viewport
    title: String,
    /// Commands gathered while drawing this frame
    pending: Vec<Command>,
}

impl SlowPadApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        Self {
            title: state.title(),
            state,
            editor_id: egui::Id::new("slowpad_editor"),
            pending: Vec::new(),
        }
    }

    /// Take file and search shortcuts before the editor sees them.
    /// Undo/redo are taken too unless a dialog field has focus.
    fn handle_keyboard(&mut self, ctx: &Context) {
        let focused = ctx.memory(|m| m.focused());
        let editor_focused = focused == Some(self.editor_id);
        let field_focused = focused.is_some() && !editor_focused;
        consume_special_keys_with_tab(ctx, if editor_focused { TAB_SPACES } else { 0 });

        if self.state.dialogs.is_modal_open() {
            return;
        }

        let pending = &mut self.pending;
        ctx.input_mut(|i| {
            let events = std::mem::take(&mut i.events);
            let mut remaining = Vec::new();
            for event in events {
                if let egui::Event::Key { key, pressed: true, modifiers, .. } = &event {
                    if let Some(command) = command_for_key(*key, *modifiers, field_focused) {
                        pending.push(command);
                        continue;
                    }
                }
                remaining.push(event);
            }
            i.events = remaining;
        });
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui, en: Enablement) {
        let s = self.state.strings();
        let word_wrap = self.state.word_wrap;
        let recent = &self.state.recent.files;
        let out = &mut self.pending;

        menu_bar(ui, |ui| {
            ui.menu_button(s.menu_file, |ui| {
                menu_item(ui, s.new, Command::New, true, out);
                menu_item(ui, s.open, Command::Open, true, out);
                ui.menu_button(s.open_recent, |ui| {
                    if recent.is_empty() {
                        ui.label(s.no_recent);
                    }
                    for path in recent {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| path.to_string_lossy().to_string());
                        if ui.button(name).on_hover_text(path.to_string_lossy().to_string()).clicked() {
                            out.push(Command::OpenRecent(path.clone()));
                            ui.close_menu();
                        }
                    }
                });
                ui.separator();
                menu_item(ui, s.save, Command::Save, true, out);
                menu_item(ui, s.save_as, Command::SaveAs, true, out);
                ui.separator();
                menu_item(ui, s.print, Command::Print, true, out);
                menu_item(ui, s.print_preview, Command::PrintPreview, true, out);
                ui.separator();
                menu_item(ui, s.quit, Command::Quit, true, out);
            });

            ui.menu_button(s.menu_edit, |ui| {
                menu_item(ui, s.undo, Command::Undo, en.undo, out);
                menu_item(ui, s.redo, Command::Redo, en.redo, out);
                ui.separator();
                edit_items(ui, s, en, out);
                ui.separator();
                menu_item(ui, s.find, Command::Find, en.find, out);
                menu_item(ui, s.find_next, Command::FindNext, en.find_next, out);
                menu_item(ui, s.replace, Command::Replace, true, out);
            });

            ui.menu_button(s.menu_format, |ui| {
                let mut wrap = word_wrap;
                if ui.checkbox(&mut wrap, s.word_wrap).clicked() {
                    out.push(Command::ToggleWordWrap);
                    ui.close_menu();
                }
                menu_item(ui, s.font, Command::ChooseFont, true, out);
            });

            ui.menu_button(s.menu_help, |ui| {
                menu_item(ui, s.about, Command::About, true, out);
            });
        });
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui, en: Enablement) {
        let s = self.state.strings();
        let out = &mut self.pending;
        egui::Frame::none()
            .fill(SlowColors::WHITE)
            .stroke(Stroke::new(1.0, SlowColors::BLACK))
            .inner_margin(egui::Margin::symmetric(6.0, 3.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    tool_button(ui, s.new, Command::New, true, out);
                    tool_button(ui, s.open, Command::Open, true, out);
                    tool_button(ui, s.save, Command::Save, true, out);
                    toolbar_separator(ui);
                    tool_button(ui, s.cut, Command::Cut, en.cut, out);
                    tool_button(ui, s.copy, Command::Copy, en.copy, out);
                    tool_button(ui, s.paste, Command::Paste, en.paste, out);
                    toolbar_separator(ui);
                    tool_button(ui, s.undo, Command::Undo, en.undo, out);
                    tool_button(ui, s.redo, Command::Redo, en.redo, out);
                    toolbar_separator(ui);
                    tool_button(ui, s.find, Command::Find, en.find, out);
                });
            });
    }

    /// Hand a selection made by a command to the editor widget.
    fn push_selection(&mut self, ctx: &Context) {
        let Some(sel) = self.state.take_selection_update() else {
            return;
        };
        let mut state = egui::text_edit::TextEditState::load(ctx, self.editor_id).unwrap_or_default();
        state.cursor.set_char_range(Some(CCursorRange::two(
            CCursor::new(sel.anchor),
            CCursor::new(sel.head),
        )));
        state.store(ctx, self.editor_id);
        ctx.memory_mut(|m| m.request_focus(self.editor_id));
    }

    fn render_editor(&mut self, ui: &mut egui::Ui, en: Enablement, interactive: bool) {
        self.push_selection(ui.ctx());

        let s = self.state.strings();
        let font = self.state.settings.font.clone();
        let wrap = self.state.word_wrap;
        let color = if font.bold {
            ui.visuals().strong_text_color()
        } else {
            ui.visuals().text_color()
        };
        let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
            let mut job = LayoutJob::single_section(text.to_owned(), text_format(&font, color));
            job.wrap.max_width = if wrap { wrap_width } else { f32::INFINITY };
            ui.fonts(|f| f.layout_job(job))
        };

        let before = self.state.selection;
        let text = &mut self.state.document.text;
        let editor_id = self.editor_id;
        let out = &mut self.pending;

        let scroll = if wrap {
            egui::ScrollArea::vertical()
        } else {
            egui::ScrollArea::both()
        };
        scroll.auto_shrink([false, false]).show(ui, |ui| {
            let available = ui.available_size();
            let output = egui::TextEdit::multiline(text)
                .id(editor_id)
                .font(font.font_id())
                .desired_width(if wrap { available.x } else { f32::INFINITY })
                .desired_rows((available.y / font.pixel_size().max(1.0)).max(4.0) as usize)
                .frame(false)
                .lock_focus(true)
                .interactive(interactive)
                .layouter(&mut layouter)
                .show(ui);

            let after = output
                .cursor_range
                .map(|cr| Selection::new(cr.secondary.ccursor.index, cr.primary.ccursor.index));
            if output.response.changed() {
                out.push(Command::TextEdited { before, after: after.unwrap_or(before) });
            } else if let Some(after) = after {
                if after != before {
                    out.push(Command::SelectionChanged(after));
                }
            }

            output.response.context_menu(|ui| {
                menu_item(ui, s.undo, Command::Undo, en.undo, out);
                menu_item(ui, s.redo, Command::Redo, en.redo, out);
                ui.separator();
                edit_items(ui, s, en, out);
            });
        });
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        let s = self.state.strings();
        let doc = &self.state.document;
        let (line, col) = doc.line_col(self.state.selection.head);
        let message = self.state.status.current(Instant::now()).unwrap_or(s.ready);
        let details = format!(
            "{} {}, {} {}  |  {} {}, {} {}",
            s.line,
            line,
            s.column,
            col,
            doc.word_count(),
            s.words,
            doc.char_count(),
            s.chars
        );
        status_bar(ui, message, &details);
    }

    fn render_find_dialog(&mut self, ctx: &Context) {
        let s = self.state.strings();
        let out = &mut self.pending;
        let Some(dialog) = self.state.dialogs.find.as_mut() else {
            return;
        };
        egui::Window::new(s.find.trim_end_matches('.'))
            .id(egui::Id::new("find_dialog"))
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(s.find_label);
                    let field = ui.text_edit_singleline(&mut dialog.query);
                    if field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        out.push(Command::FindFromDialog);
                    }
                });
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let can_find = !dialog.query.is_empty();
                    if ui.add_enabled(can_find, egui::Button::new(s.find_next)).clicked() {
                        out.push(Command::FindFromDialog);
                    }
                    if ui.button(s.close).clicked() {
                        out.push(Command::CloseDialog(DialogKind::Find));
                    }
                });
            });
    }

    fn render_replace_dialog(&mut self, ctx: &Context, en: Enablement) {
        let s = self.state.strings();
        let out = &mut self.pending;
        let Some(dialog) = self.state.dialogs.replace.as_mut() else {
            return;
        };
        egui::Window::new(s.replace.trim_end_matches('.'))
            .id(egui::Id::new("replace_dialog"))
            .collapsible(false)
            .resizable(false)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::Grid::new("replace_fields").num_columns(2).show(ui, |ui| {
                    ui.label(s.find_label);
                    ui.text_edit_singleline(&mut dialog.query);
                    ui.end_row();
                    ui.label(s.replace_label);
                    ui.text_edit_singleline(&mut dialog.replacement);
                    ui.end_row();
                });
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let can_find = !dialog.query.is_empty();
                    if ui.add_enabled(can_find, egui::Button::new(s.find_next)).clicked() {
                        out.push(Command::ReplaceFindNext);
                    }
                    let replace = s.replace.trim_end_matches('.');
                    if ui.add_enabled(en.replace_actions, egui::Button::new(replace)).clicked() {
                        out.push(Command::ReplaceOne);
                    }
                    if ui.add_enabled(en.replace_actions, egui::Button::new(s.replace_all)).clicked() {
                        out.push(Command::ReplaceAll);
                    }
                    if ui.button(s.close).clicked() {
                        out.push(Command::CloseDialog(DialogKind::Replace));
                    }
                });
            });
    }

    fn render_font_dialog(&mut self, ctx: &Context) {
        let s = self.state.strings();
        let out = &mut self.pending;
        let Some(dialog) = self.state.dialogs.font.as_mut() else {
            return;
        };
        let families = dialog.families();
        let sizes = dialog.sizes();
        egui::Window::new(s.font_title)
            .id(egui::Id::new("font_dialog"))
            .collapsible(false)
            .resizable(false)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.label(s.font_family);
                        egui::ScrollArea::vertical()
                            .id_source("font_families")
                            .max_height(160.0)
                            .show(ui, |ui| {
                                for family in &families {
                                    ui.selectable_value(&mut dialog.draft.family, family.clone(), family.as_str());
                                }
                            });
                    });
                    ui.add_space(12.0);
                    ui.vertical(|ui| {
                        ui.label(s.font_size);
                        egui::ScrollArea::vertical()
                            .id_source("font_sizes")
                            .max_height(160.0)
                            .show(ui, |ui| {
                                for &size in sizes {
                                    ui.selectable_value(&mut dialog.draft.size, size, size.to_string());
                                }
                            });
                    });
                    ui.add_space(12.0);
                    ui.vertical(|ui| {
                        ui.checkbox(&mut dialog.draft.bold, s.bold);
                        ui.checkbox(&mut dialog.draft.italic, s.italic);
                        ui.checkbox(&mut dialog.draft.strikeout, s.strikeout);
                        ui.checkbox(&mut dialog.draft.underline, s.underline);
                    });
                });
                ui.separator();
                ui.add_sized(
                    [ui.available_width(), 48.0],
                    egui::Label::new(sample_text(s.sample, &dialog.draft)),
                );
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(s.cancel).clicked() {
                        out.push(Command::CloseDialog(DialogKind::Font));
                    }
                    if ui.button(s.ok).clicked() {
                        out.push(Command::ApplyFont(dialog.draft.clone()));
                    }
                });
            });
    }

    fn render_print_preview(&mut self, ctx: &Context) {
        let s = self.state.strings();
        let out = &mut self.pending;
        let Some(preview) = self.state.dialogs.preview.as_mut() else {
            return;
        };
        egui::Window::new(s.print_preview)
            .id(egui::Id::new("print_preview"))
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                let width = 380.0;
                let scale = width / PAGE_WIDTH_PT;
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(width, PAGE_HEIGHT_PT * scale),
                    egui::Sense::hover(),
                );
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, SlowColors::WHITE);
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, SlowColors::BLACK));

                if let Some(page) = preview.page() {
                    let size = (preview.font_size as f32 * scale).max(1.0);
                    let font = egui::FontId::monospace(size);
                    let margin = MARGIN_PT * scale;
                    let mut y = rect.min.y + margin;
                    for line in &page.lines {
                        painter.text(
                            egui::pos2(rect.min.x + margin, y),
                            Align2::LEFT_TOP,
                            line,
                            font.clone(),
                            SlowColors::BLACK,
                        );
                        y += size * LINE_SPACING;
                    }
                }

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.add_enabled(preview.has_previous(), egui::Button::new(s.previous)).clicked() {
                        preview.previous();
                    }
                    let number = preview.page().map_or(1, |p| p.number);
                    ui.label(s.page_label(number, preview.page_count()));
                    if ui.add_enabled(preview.has_next(), egui::Button::new(s.next)).clicked() {
                        preview.next();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(s.close).clicked() {
                            out.push(Command::CloseDialog(DialogKind::PrintPreview));
                        }
                    });
                });
            });
    }

    fn render_file_dialog(&mut self, ctx: &Context) {
        let s = self.state.strings();
        let out = &mut self.pending;
        let Some(dialog) = self.state.dialogs.file.as_mut() else {
            return;
        };
        let title = match dialog.mode {
            FileDialogMode::Open => s.open_title,
            FileDialogMode::Save => s.save_title,
        };
        egui::Window::new(title)
            .id(egui::Id::new("file_dialog"))
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(s.location);
                    ui.label(dialog.browser.current_dir.to_string_lossy().to_string());
                });
                ui.separator();
                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    let entries = dialog.browser.entries.clone();
                    for (idx, entry) in entries.iter().enumerate() {
                        let selected = dialog.browser.selected_index == Some(idx);
                        let response = ui.add(FileListItem::new(&entry.name, entry.is_directory).selected(selected));
                        if response.clicked() {
                            dialog.browser.selected_index = Some(idx);
                            if dialog.mode == FileDialogMode::Save && !entry.is_directory {
                                dialog.filename = entry.name.clone();
                            }
                        }
                        if response.double_clicked() {
                            if entry.is_directory {
                                dialog.browser.navigate_to(entry.path.clone());
                            } else if dialog.mode == FileDialogMode::Open {
                                out.push(Command::ConfirmFile(entry.path.clone()));
                            }
                        }
                    }
                });
                ui.separator();
                if dialog.mode == FileDialogMode::Save {
                    ui.horizontal(|ui| {
                        ui.label(s.filename);
                        ui.text_edit_singleline(&mut dialog.filename);
                    });
                }
                let mut filter = dialog.filter();
                egui::ComboBox::from_id_source("file_filter")
                    .selected_text(filter_label(s, filter))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut filter, FileFilter::Text, s.filter_text);
                        ui.selectable_value(&mut filter, FileFilter::All, s.filter_all);
                    });
                if filter != dialog.filter() {
                    dialog.set_filter(filter);
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(s.cancel).clicked() {
                        out.push(Command::CloseDialog(DialogKind::File));
                    }
                    let action = match dialog.mode {
                        FileDialogMode::Open => s.open.trim_end_matches('.'),
                        FileDialogMode::Save => s.save,
                    };
                    let target = dialog.target();
                    if ui.add_enabled(target.is_some(), egui::Button::new(action)).clicked() {
                        if let Some(path) = target {
                            out.push(Command::ConfirmFile(path));
                        }
                    }
                });
            });
    }

    fn render_save_prompt(&mut self, ctx: &Context) {
        let s = self.state.strings();
        let out = &mut self.pending;
        let Some(prompt) = self.state.dialogs.prompt.as_ref() else {
            return;
        };
        egui::Window::new(s.app_name)
            .id(egui::Id::new("save_prompt"))
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&prompt.message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(s.prompt_save).clicked() {
                        out.push(Command::AnswerPrompt(PromptChoice::Save));
                    }
                    if ui.button(s.prompt_discard).clicked() {
                        out.push(Command::AnswerPrompt(PromptChoice::Discard));
                    }
                    if ui.button(s.cancel).clicked() {
                        out.push(Command::AnswerPrompt(PromptChoice::Cancel));
                    }
                });
            });
    }

    fn render_message(&mut self, ctx: &Context) {
        let s = self.state.strings();
        let out = &mut self.pending;
        let Some(message) = self.state.dialogs.message.as_ref() else {
            return;
        };
        egui::Window::new(message.title.as_str())
            .id(egui::Id::new("message_box"))
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message.text);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button(s.ok).clicked() {
                        out.push(Command::CloseDialog(DialogKind::Message));
                    }
                });
            });
    }

    fn render_about(&mut self, ctx: &Context) {
        let s = self.state.strings();
        let out = &mut self.pending;
        egui::Window::new(s.about)
            .id(egui::Id::new("about"))
            .collapsible(false)
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(s.app_name);
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label(s.about_text);
                    ui.add_space(8.0);
                    if ui.button(s.ok).clicked() {
                        out.push(Command::CloseDialog(DialogKind::About));
                    }
                });
            });
    }

    /// Keep the stored geometry in step with the real window.
    fn track_window(&mut self, ctx: &Context) {
        let (inner, outer) = ctx.input(|i| (i.viewport().inner_rect, i.viewport().outer_rect));
        if let Some(inner) = inner {
            let origin = outer.unwrap_or(inner).min;
            self.state.settings.window = WindowGeometry {
                width: inner.width().round() as i32,
                height: inner.height().round() as i32,
                x: origin.x.round() as i32,
                y: origin.y.round() as i32,
            };
        }
    }
}

fn menu_item(ui: &mut egui::Ui, label: &str, command: Command, enabled: bool, out: &mut Vec<Command>) {
    let text = match command.shortcut_label() {
        Some(keys) => format!("{:<20}{}", label, keys),
        None => label.to_string(),
    };
    if ui.add_enabled(enabled, egui::Button::new(text)).clicked() {
        out.push(command);
        ui.close_menu();
    }
}

/// Cut, copy, paste and select all, shared by the edit and context menus.
fn edit_items(ui: &mut egui::Ui, s: &crate::locale::Strings, en: Enablement, out: &mut Vec<Command>) {
    menu_item(ui, s.cut, Command::Cut, en.cut, out);
    menu_item(ui, s.copy, Command::Copy, en.copy, out);
    menu_item(ui, s.paste, Command::Paste, en.paste, out);
    ui.separator();
    menu_item(ui, s.select_all, Command::SelectAll, en.select_all, out);
}

fn tool_button(ui: &mut egui::Ui, label: &str, command: Command, enabled: bool, out: &mut Vec<Command>) {
    if ui.add(ToolButton::new(label.trim_end_matches('.')).enabled(enabled)).clicked() {
        out.push(command);
    }
}

fn filter_label(s: &crate::locale::Strings, filter: FileFilter) -> &'static str {
    match filter {
        FileFilter::Text => s.filter_text,
        FileFilter::All => s.filter_all,
    }
}

/// Editor text format for the chosen font. egui has no bold face, so bold
/// uses the strong text color.
fn text_format(font: &FontSettings, color: Color32) -> TextFormat {
    let line = Stroke::new(1.0, color);
    TextFormat {
        font_id: font.font_id(),
        color,
        italics: font.italic,
        underline: if font.underline { line } else { Stroke::NONE },
        strikethrough: if font.strikeout { line } else { Stroke::NONE },
        ..Default::default()
    }
}

fn sample_text(sample: &str, font: &FontSettings) -> egui::RichText {
    let mut text = egui::RichText::new(sample).font(font.font_id());
    if font.bold {
        text = text.strong();
    }
    if font.italic {
        text = text.italics();
    }
    if font.underline {
        text = text.underline();
    }
    if font.strikeout {
        text = text.strikethrough();
    }
    text
}

impl eframe::App for SlowPadApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        let en = self.state.enablement();
        let modal = self.state.dialogs.is_modal_open();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| self.render_menu_bar(ui, en));
        });
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            SlowTheme::title_bar_frame().show(ui, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(self.state.title());
                });
            });
        });
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| self.render_toolbar(ui, en));
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });
        egui::CentralPanel::default()
            .frame(SlowTheme::editor_frame())
            .show(ctx, |ui| {
                self.render_editor(ui, en, !modal);
            });

        self.render_find_dialog(ctx);
        self.render_replace_dialog(ctx, en);
        self.render_font_dialog(ctx);
        self.render_print_preview(ctx);
        self.render_file_dialog(ctx);
        self.render_save_prompt(ctx);
        self.render_message(ctx);
        if self.state.dialogs.about {
            self.render_about(ctx);
        }

        self.track_window(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && !self.state.close_confirmed() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            if self.state.dialogs.prompt.is_none() {
                self.pending.push(Command::Quit);
            }
        }

        let commands = std::mem::take(&mut self.pending);
        if !commands.is_empty() {
            ctx.request_repaint();
        }
        for command in commands {
            if let Some(Effect::CloseWindow) = self.state.dispatch(command) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                break;
            }
        }

        let title = self.state.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        if self.state.status.current(Instant::now()).is_some() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}
