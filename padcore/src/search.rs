//! Literal find / replace over a plain-text buffer
//!
//! All offsets are character indices, matching egui's `CCursor`. Searches are
//! case-sensitive and forward-only; they never wrap to the start of the
//! buffer. An empty query is rejected with [`SearchError::EmptyQuery`].

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Half-open `[start, end)` character range of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

/// Editor selection. `anchor` is the fixed end, `head` the caret.
///
/// A selection made by a search keeps its anchor on the match end, so the
/// next search continues past the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn caret(pos: usize) -> Self {
        Self { anchor: pos, head: pos }
    }

    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Selection covering a match, anchored on its end.
    pub fn of_match(range: MatchRange) -> Self {
        Self { anchor: range.end, head: range.start }
    }

    pub fn range(&self) -> MatchRange {
        MatchRange {
            start: self.anchor.min(self.head),
            end: self.anchor.max(self.head),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Selected text, clamped to the buffer.
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        let range = self.range();
        let start = char_to_byte(buffer, range.start);
        let end = char_to_byte(buffer, range.end);
        &buffer[start..end]
    }

    /// Clamp both ends to `len` characters.
    pub fn clamped(self, len: usize) -> Self {
        Self { anchor: self.anchor.min(len), head: self.head.min(len) }
    }
}

/// Byte offset of the `char_idx`-th character, or `text.len()` past the end.
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Character index of a byte offset. `byte_idx` must be a char boundary.
pub fn byte_to_char(text: &str, byte_idx: usize) -> usize {
    text[..byte_idx].chars().count()
}

/// First occurrence of `query` at or after character offset `from`.
pub fn find_next(buffer: &str, query: &str, from: usize) -> Result<Option<MatchRange>> {
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let total = buffer.chars().count();
    if from > total {
        return Ok(None);
    }
    let start_byte = char_to_byte(buffer, from);
    Ok(buffer[start_byte..].find(query).map(|rel| {
        let start = from + byte_to_char(&buffer[start_byte..], rel);
        MatchRange { start, end: start + query.chars().count() }
    }))
}

/// Result of one replace activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Whether the selection was replaced.
    pub replaced: bool,
    /// Match selected after the step, if any.
    pub found: Option<MatchRange>,
    /// Selection to show afterwards.
    pub selection: Selection,
}

/// Two-step replace.
///
/// If the selected text equals `query` it is swapped for `replacement` and
/// the search continues from the end of the insertion. Otherwise nothing is
/// replaced and the next match after the selection anchor is selected.
/// On a miss the selection is left where the step put it.
pub fn replace_one(
    buffer: &mut String,
    query: &str,
    replacement: &str,
    selection: Selection,
) -> Result<ReplaceOutcome> {
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let selection = selection.clamped(buffer.chars().count());

    let (replaced, selection) = if !selection.is_empty() && selection.text(buffer) == query {
        let range = selection.range();
        let start = char_to_byte(buffer, range.start);
        let end = char_to_byte(buffer, range.end);
        buffer.replace_range(start..end, replacement);
        let caret = range.start + replacement.chars().count();
        (true, Selection::caret(caret))
    } else {
        (false, selection)
    };

    let found = find_next(buffer, query, selection.anchor)?;
    Ok(ReplaceOutcome {
        replaced,
        found,
        selection: found.map(Selection::of_match).unwrap_or(selection),
    })
}

/// Replace every non-overlapping occurrence, left to right.
pub fn replace_all(buffer: &str, query: &str, replacement: &str) -> Result<String> {
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(buffer.replace(query, replacement))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize) -> MatchRange {
        MatchRange { start, end }
    }

    #[test]
    fn test_find_first_at_or_after() {
        let buf = "abcabcabc";
        assert_eq!(find_next(buf, "abc", 0), Ok(Some(range(0, 3))));
        assert_eq!(find_next(buf, "abc", 1), Ok(Some(range(3, 6))));
        assert_eq!(find_next(buf, "abc", 3), Ok(Some(range(3, 6))));
        assert_eq!(find_next(buf, "abc", 7), Ok(None));
    }

    #[test]
    fn test_find_never_wraps() {
        assert_eq!(find_next("foo bar", "foo", 1), Ok(None));
        assert_eq!(find_next("foo", "foo", 99), Ok(None));
    }

    #[test]
    fn test_find_is_case_sensitive_and_literal() {
        assert_eq!(find_next("Hello hello", "hello", 0), Ok(Some(range(6, 11))));
        assert_eq!(find_next("a.c abc", "a.c", 1), Ok(None));
        assert_eq!(find_next("x[1] y", "[1]", 0), Ok(Some(range(1, 4))));
    }

    #[test]
    fn test_find_uses_char_offsets() {
        // 'é' and 'ж' are multi-byte
        let buf = "café жук café";
        assert_eq!(find_next(buf, "café", 1), Ok(Some(range(9, 13))));
        assert_eq!(find_next(buf, "жук", 0), Ok(Some(range(5, 8))));
    }

    #[test]
    fn test_empty_query_rejected() {
        assert_eq!(find_next("abc", "", 0), Err(SearchError::EmptyQuery));
        assert_eq!(replace_all("abc", "", "x"), Err(SearchError::EmptyQuery));
        let mut buf = String::from("abc");
        assert_eq!(
            replace_one(&mut buf, "", "x", Selection::default()),
            Err(SearchError::EmptyQuery)
        );
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(replace_all("abcabc", "a", "X").unwrap(), "XbcXbc");
        assert_eq!(replace_all("banana", "a", "b").unwrap(), "bbnbnb");
        assert_eq!(replace_all("aaaa", "aa", "b").unwrap(), "bb");
        assert_eq!(replace_all("none here", "zzz", "y").unwrap(), "none here");
    }

    #[test]
    fn test_replace_confirm_sequence() {
        let mut buf = String::from("foo bar foo");

        // first activation only selects
        let step = replace_one(&mut buf, "foo", "baz", Selection::caret(0)).unwrap();
        assert!(!step.replaced);
        assert_eq!(step.found, Some(range(0, 3)));
        assert_eq!(buf, "foo bar foo");

        // second activation confirms and chains to the next match
        let step = replace_one(&mut buf, "foo", "baz", step.selection).unwrap();
        assert!(step.replaced);
        assert_eq!(buf, "baz bar foo");
        assert_eq!(step.found, Some(range(8, 11)));
        assert_eq!(step.selection.range(), range(8, 11));
    }

    #[test]
    fn test_replace_last_match_leaves_caret() {
        let mut buf = String::from("one foo");
        let sel = Selection::of_match(range(4, 7));
        let step = replace_one(&mut buf, "foo", "longer", sel).unwrap();
        assert!(step.replaced);
        assert_eq!(buf, "one longer");
        assert_eq!(step.found, None);
        assert_eq!(step.selection, Selection::caret(10));
    }

    #[test]
    fn test_replace_with_mismatched_selection_only_selects() {
        let mut buf = String::from("foo bar foo");
        let step = replace_one(&mut buf, "foo", "x", Selection::new(4, 7)).unwrap();
        assert!(!step.replaced);
        assert_eq!(buf, "foo bar foo");
        assert_eq!(step.found, Some(range(8, 11)));
    }

    #[test]
    fn test_replacement_containing_query_does_not_loop() {
        let mut buf = String::from("a a");
        let step = replace_one(&mut buf, "a", "aa", Selection::of_match(range(0, 1))).unwrap();
        assert_eq!(buf, "aa a");
        assert_eq!(step.found, Some(range(3, 4)));
    }

    #[test]
    fn test_selection_text() {
        let sel = Selection::new(6, 2);
        assert_eq!(sel.range(), range(2, 6));
        assert_eq!(sel.text("héllo world"), "llo ");
        assert_eq!(Selection::new(3, 50).text("abcdef"), "def");
    }
}
