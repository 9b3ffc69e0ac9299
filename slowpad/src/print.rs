//! Print preview pagination
//!
//! Lays the buffer out on A4 pages (595 x 842 pt, 56 pt margins) using the
//! editor font size. With word wrap on, long lines are broken at the last
//! space that fits, or hard at the page width when there is none.

pub const PAGE_WIDTH_PT: f32 = 595.0;
pub const PAGE_HEIGHT_PT: f32 = 842.0;
pub const MARGIN_PT: f32 = 56.0;

/// Line height and average glyph width as multiples of the font size.
pub const LINE_SPACING: f32 = 1.2;
const GLYPH_WIDTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub lines_per_page: usize,
    /// `None` leaves long lines running past the right margin
    pub chars_per_line: Option<usize>,
}

impl PageLayout {
    pub fn for_font(size_pt: u32, wrap: bool) -> Self {
        let size = size_pt.max(1) as f32;
        let printable_h = PAGE_HEIGHT_PT - 2.0 * MARGIN_PT;
        let printable_w = PAGE_WIDTH_PT - 2.0 * MARGIN_PT;
        let lines_per_page = ((printable_h / (size * LINE_SPACING)) as usize).max(1);
        let chars_per_line = wrap.then(|| ((printable_w / (size * GLYPH_WIDTH)) as usize).max(1));
        Self { lines_per_page, chars_per_line }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// One-based
    pub number: usize,
    pub lines: Vec<String>,
}

/// Split `text` into pages. There is always at least one page.
pub fn paginate(text: &str, layout: PageLayout) -> Vec<Page> {
    let mut lines = Vec::new();
    for line in text.lines() {
        match layout.chars_per_line {
            Some(width) => lines.extend(wrap_line(line, width)),
            None => lines.push(line.to_string()),
        }
    }

    if lines.is_empty() {
        return vec![Page { number: 1, lines: Vec::new() }];
    }

    lines
        .chunks(layout.lines_per_page)
        .enumerate()
        .map(|(i, chunk)| Page { number: i + 1, lines: chunk.to_vec() })
        .collect()
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut rest: Vec<char> = line.chars().collect();
    let mut out = Vec::new();
    while rest.len() > width {
        let split = rest[..=width]
            .iter()
            .rposition(|c| c.is_whitespace())
            .filter(|&p| p > 0)
            .unwrap_or(width);
        out.push(rest[..split].iter().collect());
        let skip = if rest[split].is_whitespace() { split + 1 } else { split };
        rest.drain(..skip);
    }
    out.push(rest.into_iter().collect());
    out
}

/// Print preview view-model: the pages and the one on screen.
#[derive(Debug, Clone)]
pub struct PrintPreview {
    pub pages: Vec<Page>,
    pub current: usize,
    pub font_size: u32,
}

impl PrintPreview {
    pub fn new(text: &str, font_size: u32, wrap: bool) -> Self {
        Self {
            pages: paginate(text, PageLayout::for_font(font_size, wrap)),
            current: 0,
            font_size,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        self.pages.get(self.current)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.pages.len()
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.current -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }
}
