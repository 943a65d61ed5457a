//! Domain part tokenizer

use crate::charclass;
use crate::classify::DomainFlags;

/// Domains longer than this are truncated.
pub const DOMAIN_LENGTH_LIMIT: usize = 255;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum State {
    #[default]
    Simple,
    IpLiteral,
}

#[derive(Debug, Default)]
pub struct DomainPart {
    state: State,
    chars: Vec<char>,
    last_committed: Option<char>,
    flags: DomainFlags,
}

impl DomainPart {
    /// Feeds one character. Brackets switch in and out of the IP literal
    /// state and are never committed.
    pub fn put_character(&mut self, ch: char) {
        self.state = match (self.state, ch) {
            (State::Simple, '[') => State::IpLiteral,
            (State::IpLiteral, ']') => State::Simple,
            (state, _) => {
                self.commit(ch);
                state
            }
        };
    }

    fn commit(&mut self, ch: char) {
        if self.chars.len() >= DOMAIN_LENGTH_LIMIT {
            return;
        }
        if ch == ' ' || !charclass::is_printable(ch) {
            return;
        }
        let ch = if charclass::is_ideographic_full_stop(ch) {
            '.'
        } else if !ch.is_ascii() {
            self.flags.is_internationalized = true;
            if charclass::is_letter_or_digit(ch) {
                charclass::to_lower(ch)
            } else {
                ch
            }
        } else if ch.is_ascii_alphanumeric() {
            ch.to_ascii_lowercase()
        } else if ch == '-' || ch == ':' {
            ch
        } else if ch == '.' {
            if self.chars.is_empty() || self.last_committed == Some('.') {
                return;
            }
            ch
        } else {
            return;
        };
        match ch {
            '0'..='9' => self.flags.has_decimal_digit = true,
            'a'..='f' => self.flags.has_hex_letter = true,
            '.' => self.flags.has_dot = true,
            ':' => self.flags.has_colon = true,
            _ => self.flags.has_other_character = true,
        }
        self.chars.push(ch);
        self.last_committed = Some(ch);
    }

    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub const fn flags(&self) -> DomainFlags {
        self.flags
    }

    /// The committed domain, bracketed when it is an IP literal.
    pub fn render(&self, ip_literal: bool) -> String {
        let mut result = String::with_capacity(self.chars.len() + 2);
        if ip_literal {
            result.push('[');
        }
        result.extend(self.chars.iter());
        if ip_literal {
            result.push(']');
        }
        result
    }
}
