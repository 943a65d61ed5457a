//! Character predicates shared by the local and domain tokenizers

use unicode_general_category::{GeneralCategory, get_general_category};

/// Characters that can only appear inside a quoted local part.
const NEED_QUOTE: &[char] = &['"', '(', ')', ',', ':', ';', '<', '>', '@', '[', '\\', ']'];

/// Characters accepted by RFC 5322 but rejected by many mail systems.
const NOT_VERY_SAFE: &[char] = &['%', '|', '!', '#', '$', '*', '/', '\\'];

pub fn needs_quote(ch: char) -> bool {
    ch == ' ' || NEED_QUOTE.contains(&ch)
}

pub fn is_not_very_safe(ch: char) -> bool {
    NOT_VERY_SAFE.contains(&ch)
}

/// Letters, marks, numbers, punctuation and symbols, plus the ASCII space.
/// Format, private use, unassigned and separator characters are not
/// printable.
pub fn is_printable(ch: char) -> bool {
    ch == ' '
        || matches!(
            get_general_category(ch),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
                | GeneralCategory::DecimalNumber
                | GeneralCategory::LetterNumber
                | GeneralCategory::OtherNumber
                | GeneralCategory::ConnectorPunctuation
                | GeneralCategory::DashPunctuation
                | GeneralCategory::OpenPunctuation
                | GeneralCategory::ClosePunctuation
                | GeneralCategory::InitialPunctuation
                | GeneralCategory::FinalPunctuation
                | GeneralCategory::OtherPunctuation
                | GeneralCategory::MathSymbol
                | GeneralCategory::CurrencySymbol
                | GeneralCategory::ModifierSymbol
                | GeneralCategory::OtherSymbol
        )
}

pub fn is_letter_or_digit(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric()
}

/// Lower-cases `ch` when the mapping is a single character.
pub fn to_lower(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// U+3002, U+FF0E and U+FF61 act as label separators in IDNA.
pub const fn is_ideographic_full_stop(ch: char) -> bool {
    matches!(ch, '\u{3002}' | '\u{FF0E}' | '\u{FF61}')
}

/// Slot in the first-offset table for characters in the 0x20..=0x2F block.
pub const fn punctuation_slot(ch: char) -> Option<usize> {
    let code = ch as u32;
    if matches!(code, 0x20..=0x2F) {
        Some((code & 0xF) as usize)
    } else {
        None
    }
}
