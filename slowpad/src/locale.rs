//! UI string tables
//!
//! The locale comes from the single optional command-line argument, or from
//! `LC_ALL` / `LC_MESSAGES` / `LANG` when none is given.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Russian,
}

impl Locale {
    /// Map a locale name such as `ru`, `ru_RU.UTF-8` or `en-US`.
    /// Unknown names fall back to English.
    pub fn from_name(name: &str) -> Self {
        let lang = name
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match lang.as_str() {
            "ru" => Locale::Russian,
            _ => Locale::English,
        }
    }

    pub fn system() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty())
            .map(|v| Self::from_name(&v))
            .unwrap_or(Locale::English)
    }

    /// Explicit argument wins over the environment.
    pub fn detect(arg: Option<String>) -> Self {
        match arg {
            Some(name) => Self::from_name(&name),
            None => Self::system(),
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::English => &ENGLISH,
            Locale::Russian => &RUSSIAN,
        }
    }
}

pub struct Strings {
    pub app_name: &'static str,
    pub untitled: &'static str,
    pub ready: &'static str,

    pub menu_file: &'static str,
    pub menu_edit: &'static str,
    pub menu_format: &'static str,
    pub menu_help: &'static str,

    pub new: &'static str,
    pub open: &'static str,
    pub open_recent: &'static str,
    pub no_recent: &'static str,
    pub save: &'static str,
    pub save_as: &'static str,
    pub print: &'static str,
    pub print_preview: &'static str,
    pub quit: &'static str,

    pub undo: &'static str,
    pub redo: &'static str,
    pub cut: &'static str,
    pub copy: &'static str,
    pub paste: &'static str,
    pub select_all: &'static str,
    pub find: &'static str,
    pub find_next: &'static str,
    pub replace: &'static str,
    pub replace_all: &'static str,

    pub word_wrap: &'static str,
    pub font: &'static str,
    pub about: &'static str,

    pub find_label: &'static str,
    pub replace_label: &'static str,
    pub not_found: &'static str,
    pub empty_query: &'static str,

    pub save_prompt: &'static str,
    pub prompt_save: &'static str,
    pub prompt_discard: &'static str,
    pub cancel: &'static str,
    pub ok: &'static str,
    pub close: &'static str,

    pub open_title: &'static str,
    pub save_title: &'static str,
    pub location: &'static str,
    pub filename: &'static str,
    pub filter_text: &'static str,
    pub filter_all: &'static str,

    pub font_title: &'static str,
    pub font_family: &'static str,
    pub font_size: &'static str,
    pub bold: &'static str,
    pub italic: &'static str,
    pub strikeout: &'static str,
    pub underline: &'static str,
    pub sample: &'static str,

    pub page: &'static str,
    pub previous: &'static str,
    pub next: &'static str,

    pub about_text: &'static str,
    pub saved: &'static str,
    pub save_failed: &'static str,
    pub line: &'static str,
    pub column: &'static str,
    pub words: &'static str,
    pub chars: &'static str,
}

impl Strings {
    pub fn not_found_message(&self, query: &str) -> String {
        format!("{} \"{}\"", self.not_found, query)
    }

    pub fn save_prompt_message(&self, name: &str) -> String {
        format!("{} {}?", self.save_prompt, name)
    }

    pub fn page_label(&self, current: usize, total: usize) -> String {
        format!("{} {} / {}", self.page, current, total)
    }
}

static ENGLISH: Strings = Strings {
    app_name: "slowPad",
    untitled: "untitled",
    ready: "ready",

    menu_file: "file",
    menu_edit: "edit",
    menu_format: "format",
    menu_help: "help",

    new: "new",
    open: "open...",
    open_recent: "open recent",
    no_recent: "no recent files",
    save: "save",
    save_as: "save as...",
    print: "print...",
    print_preview: "print preview",
    quit: "quit",

    undo: "undo",
    redo: "redo",
    cut: "cut",
    copy: "copy",
    paste: "paste",
    select_all: "select all",
    find: "find...",
    find_next: "find next",
    replace: "replace...",
    replace_all: "replace all",

    word_wrap: "word wrap",
    font: "font...",
    about: "about slowPad",

    find_label: "find:",
    replace_label: "replace with:",
    not_found: "cannot find",
    empty_query: "enter text to find",

    save_prompt: "save changes to",
    prompt_save: "save",
    prompt_discard: "don't save",
    cancel: "cancel",
    ok: "ok",
    close: "close",

    open_title: "open document",
    save_title: "save document",
    location: "location:",
    filename: "filename:",
    filter_text: "text (*.txt)",
    filter_all: "all files (*.*)",

    font_title: "font",
    font_family: "family",
    font_size: "size",
    bold: "bold",
    italic: "italic",
    strikeout: "strikeout",
    underline: "underline",
    sample: "AaBbYyZz 0123",

    page: "page",
    previous: "< prev",
    next: "next >",

    about_text: "a minimal plain-text notepad for the slow computer",
    saved: "saved",
    save_failed: "could not save",
    line: "line",
    column: "col",
    words: "words",
    chars: "chars",
};

static RUSSIAN: Strings = Strings {
    app_name: "Блокнот",
    untitled: "Без названия",
    ready: "готово",

    menu_file: "файл",
    menu_edit: "правка",
    menu_format: "формат",
    menu_help: "помощь",

    new: "новый",
    open: "открыть...",
    open_recent: "недавние",
    no_recent: "нет недавних файлов",
    save: "сохранить",
    save_as: "сохранить как...",
    print: "печать...",
    print_preview: "предварительный просмотр",
    quit: "выход",

    undo: "отменить",
    redo: "вернуть",
    cut: "вырезать",
    copy: "копировать",
    paste: "вставить",
    select_all: "выбрать всё",
    find: "найти...",
    find_next: "найти далее",
    replace: "заменить...",
    replace_all: "заменить всё",

    word_wrap: "перенос по словам",
    font: "шрифт...",
    about: "о программе",

    find_label: "найти:",
    replace_label: "заменить на:",
    not_found: "не найдено",
    empty_query: "введите текст для поиска",

    save_prompt: "сохранить изменения",
    prompt_save: "да",
    prompt_discard: "нет",
    cancel: "отмена",
    ok: "ок",
    close: "закрыть",

    open_title: "открыть файл",
    save_title: "сохранить файл",
    location: "папка:",
    filename: "имя файла:",
    filter_text: "текст (*.txt)",
    filter_all: "все файлы (*.*)",

    font_title: "выбор шрифта",
    font_family: "шрифт",
    font_size: "размер",
    bold: "жирный",
    italic: "курсив",
    strikeout: "зачёркнутый",
    underline: "подчёркнутый",
    sample: "АаБбЯя AaBb 0123",

    page: "страница",
    previous: "< назад",
    next: "далее >",

    about_text: "минимальный текстовый редактор",
    saved: "сохранено",
    save_failed: "не удалось сохранить",
    line: "стр",
    column: "стлб",
    words: "слов",
    chars: "симв",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Locale::from_name("ru"), Locale::Russian);
        assert_eq!(Locale::from_name("ru_RU.UTF-8"), Locale::Russian);
        assert_eq!(Locale::from_name("RU-ru"), Locale::Russian);
        assert_eq!(Locale::from_name("en_US.UTF-8"), Locale::English);
        assert_eq!(Locale::from_name("de_DE"), Locale::English);
        assert_eq!(Locale::from_name(""), Locale::English);
    }

    #[test]
    fn test_argument_wins() {
        assert_eq!(Locale::detect(Some("ru_RU".to_string())), Locale::Russian);
        assert_eq!(Locale::detect(Some("C".to_string())), Locale::English);
    }

    #[test]
    fn test_messages() {
        let s = Locale::English.strings();
        assert_eq!(s.not_found_message("foo"), "cannot find \"foo\"");
        assert_eq!(s.save_prompt_message("notes.txt"), "save changes to notes.txt?");
        assert_eq!(s.page_label(2, 5), "page 2 / 5");
    }
}
