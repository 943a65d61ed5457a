//! Local part tokenizer
//!
//! Consumes an address one character at a time until the unescaped `@`,
//! decoding quoted strings and escapes and dropping comments. The committed
//! characters are case-folded; whether they need quoting to be written back
//! out is tracked alongside.

use crate::charclass;

/// Tokenizer state. `Start` is re-entered once the `@` is consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum State {
    #[default]
    Start,
    Simple,
    QuotedText,
    QuotedEscape,
    Comment,
    CommentQuotedText,
    CommentQuotedEscape,
}

#[derive(Debug, Default)]
pub struct LocalPart {
    state: State,
    chars: Vec<char>,
    last_committed: Option<char>,
    need_quote: bool,
    has_unsafe_character: bool,
    has_non_ascii_character: bool,
    /// First offset of each character of the 0x20..=0x2F block, by low nibble
    punctuation_offsets: [Option<usize>; 16],
}

impl LocalPart {
    /// Builds a local part from already committed characters, as done for
    /// the normalized form. Dots are skipped when `skip_dots` is set.
    pub fn from_committed(chars: &[char], skip_dots: bool) -> Self {
        let mut local = Self::default();
        for &ch in chars {
            if ch == '.' {
                if skip_dots {
                    continue;
                }
                if local.chars.is_empty() {
                    local.need_quote = true;
                }
            }
            local.commit(ch);
        }
        local.stop_check();
        local
    }

    /// Feeds one character. Returns `true` once the separating `@` has been
    /// consumed; the remaining input belongs to the domain.
    pub fn put_character(&mut self, ch: char) -> bool {
        let (next, stop) = match (self.state, ch) {
            (State::Start, '"') => (State::QuotedText, false),
            (State::Start, '(') => (State::Comment, false),
            (State::Start, '.') => {
                self.need_quote = true;
                self.commit(ch);
                (State::Simple, false)
            }
            (State::Start, '@') => {
                self.need_quote = true;
                (State::Start, true)
            }
            (State::Start, _) => {
                self.commit(ch);
                (State::Simple, false)
            }
            (State::Simple, '@') => {
                self.stop_check();
                (State::Start, true)
            }
            (State::Simple, '(') => (State::Comment, false),
            (State::Simple, _) => {
                self.commit(ch);
                (State::Simple, false)
            }
            (State::QuotedText, '"') => (State::Simple, false),
            (State::QuotedText, '\\') => (State::QuotedEscape, false),
            (State::QuotedText, _) => {
                self.commit(ch);
                (State::QuotedText, false)
            }
            (State::QuotedEscape, _) => {
                self.commit(ch);
                (State::QuotedText, false)
            }
            (State::Comment, '"') => (State::CommentQuotedText, false),
            (State::Comment, ')') => (State::Simple, false),
            (State::Comment, _) => (State::Comment, false),
            (State::CommentQuotedText, '"') => (State::Comment, false),
            (State::CommentQuotedText, '\\') => (State::CommentQuotedEscape, false),
            (State::CommentQuotedText, _) | (State::CommentQuotedEscape, _) => {
                (State::CommentQuotedText, false)
            }
        };
        self.state = next;
        stop
    }

    /// A trailing dot is only valid inside quotes.
    pub fn stop_check(&mut self) {
        if self.last_committed == Some('.') {
            self.need_quote = true;
        }
    }

    fn commit(&mut self, ch: char) {
        let ch = if charclass::is_letter_or_digit(ch) {
            charclass::to_lower(ch)
        } else if !charclass::is_printable(ch) {
            return;
        } else {
            if charclass::needs_quote(ch) {
                self.need_quote = true;
            } else if ch == '.' && self.last_committed == Some('.') {
                self.need_quote = true;
            } else if charclass::is_not_very_safe(ch) {
                self.has_unsafe_character = true;
            }
            ch
        };
        if !ch.is_ascii() {
            self.has_non_ascii_character = true;
        }
        if let Some(slot) = charclass::punctuation_slot(ch)
            && self.punctuation_offsets[slot].is_none()
        {
            self.punctuation_offsets[slot] = Some(self.chars.len());
        }
        self.chars.push(ch);
        self.last_committed = Some(ch);
    }

    /// Offset of the first committed occurrence of `ch`.
    pub fn first_offset_of(&self, ch: char) -> Option<usize> {
        match charclass::punctuation_slot(ch) {
            Some(slot) => self.punctuation_offsets[slot],
            None => self.chars.iter().position(|&c| c == ch),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub const fn need_quote(&self) -> bool {
        self.need_quote
    }

    pub const fn has_unsafe_character(&self) -> bool {
        self.has_unsafe_character
    }

    pub const fn has_non_ascii_character(&self) -> bool {
        self.has_non_ascii_character
    }

    /// Writes the local part back out, quoting and escaping when needed.
    pub fn render(&self) -> String {
        if !self.need_quote {
            return self.chars.iter().collect();
        }
        let mut result = String::with_capacity(self.chars.len() + 2);
        result.push('"');
        for &ch in &self.chars {
            if ch == '\\' || ch == '"' {
                result.push('\\');
            }
            result.push(ch);
        }
        result.push('"');
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(given: &str, expect_stop: bool) -> LocalPart {
        let mut local = LocalPart::default();
        let mut last_stop = false;
        for ch in given.chars() {
            last_stop = local.put_character(ch);
        }
        if expect_stop {
            assert!(last_stop, "expecting stop sign: {given:?}");
        } else {
            assert!(!last_stop, "not expecting stop sign: {given:?}");
            local.stop_check();
        }
        local
    }

    fn assert_rendered(given: &str, expect: &str, expect_stop: bool) {
        let local = tokenize(given, expect_stop);
        assert_eq!(local.render(), expect, "rendered from {given:?}");
    }

    const CASES: &[(&str, &str)] = &[
        ("localpart", "localpart"),
        ("LocalPart", "localpart"),
        ("local.part", "local.part"),
        (".local", "\".local\""),
        ("local.", "\"local.\""),
        ("\"local.\"", "\"local.\""),
        ("local..part", "\"local..part\""),
        ("\"local..part\"", "\"local..part\""),
        ("local part", "\"local part\""),
        ("\"local part\"", "\"local part\""),
        ("\"local_part.addr\"", "local_part.addr"),
        ("\"local_part\\\\.addr\"", "\"local_part\\\\.addr\""),
    ];

    #[test]
    fn render_without_stop() {
        for (given, expect) in CASES {
            assert_rendered(given, expect, false);
        }
    }

    #[test]
    fn render_with_stop() {
        for (given, expect) in CASES {
            assert_rendered(&format!("{given}@"), expect, true);
        }
    }

    #[test]
    fn comments_are_dropped() {
        assert_rendered("john(comment)doe@", "johndoe", true);
        assert_rendered("(lead)john@", "john", true);
        assert_rendered("john(a \"quoted ) \\\" text\" b)@", "john", true);
    }

    #[test]
    fn escaped_quote_in_quoted_text() {
        let local = tokenize("\"a\\\"b\"@", true);
        assert_eq!(local.chars(), &['a', '"', 'b']);
        assert_eq!(local.render(), "\"a\\\"b\"");
    }

    #[test]
    fn at_sign_inside_quotes_does_not_stop() {
        let local = tokenize("\"a@b\"@", true);
        assert_eq!(local.render(), "\"a@b\"");
    }

    #[test]
    fn empty_local_part_stops_at_once() {
        let mut local = LocalPart::default();
        assert!(local.put_character('@'));
        assert!(local.is_empty());
        assert!(local.need_quote());
    }

    #[test]
    fn flags_unsafe_and_non_ascii() {
        let local = tokenize("a%b@", true);
        assert!(local.has_unsafe_character());
        assert!(!local.need_quote());

        let local = tokenize("Jürgen@", true);
        assert!(local.has_non_ascii_character());
        assert_eq!(local.render(), "jürgen");

        let local = tokenize("\"a\\\\b\"@", true);
        assert!(local.need_quote());
        assert!(!local.has_unsafe_character());
    }

    #[test]
    fn non_printables_are_dropped() {
        let local = tokenize("us\ter\u{0}@", true);
        assert_eq!(local.render(), "user");
    }

    #[test]
    fn invisible_characters_are_dropped() {
        let local = tokenize("us\u{200B}e\u{00AD}r\u{E000}@", true);
        assert_eq!(local.render(), "user");
        assert!(!local.has_non_ascii_character());
    }

    #[test]
    fn first_offsets() {
        let local = tokenize("a.b+c+d_e@", true);
        assert_eq!(local.first_offset_of('.'), Some(1));
        assert_eq!(local.first_offset_of('+'), Some(3));
        assert_eq!(local.first_offset_of('_'), Some(7));
        assert_eq!(local.first_offset_of('%'), None);
        assert_eq!(local.first_offset_of('z'), None);

        let local = tokenize("+tag@", true);
        assert_eq!(local.first_offset_of('+'), Some(0));
    }

    #[test]
    fn from_committed_skips_dots() {
        let local = tokenize("u.se..r@", true);
        assert!(local.need_quote());

        let stripped = LocalPart::from_committed(local.chars(), true);
        assert_eq!(stripped.render(), "user");

        let kept = LocalPart::from_committed(local.chars(), false);
        assert_eq!(kept.render(), "\"u.se..r\"");

        let leading = LocalPart::from_committed(&['.', 'a'], false);
        assert_eq!(leading.render(), "\".a\"");
    }

    #[test]
    fn quoting_round_trip() {
        for given in ["\"a b\\\\c\"", "\"x\\\"y\"", "\"(a)\"", "\"..\""] {
            let local = tokenize(given, false);
            let rendered = local.render();
            let inner = &rendered[1..rendered.len() - 1];
            let mut decoded = Vec::new();
            let mut escaped = false;
            for ch in inner.chars() {
                if !escaped && ch == '\\' {
                    escaped = true;
                    continue;
                }
                escaped = false;
                decoded.push(ch);
            }
            assert_eq!(decoded, local.chars(), "round trip of {given:?}");
        }
    }
}
