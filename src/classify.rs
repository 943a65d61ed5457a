//! Domain classification from character-class flags

use crate::error::{NormalizeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character classes seen while tokenizing a domain
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DomainFlags {
    /// `0`-`9`
    pub has_decimal_digit: bool,

    /// ASCII `a`-`f`
    pub has_hex_letter: bool,

    pub has_dot: bool,

    pub has_colon: bool,

    /// Any other committed character, including non-ASCII letters
    pub has_other_character: bool,

    /// A non-ASCII character other than an ideographic full stop was seen
    pub is_internationalized: bool,
}

impl DomainFlags {
    /// Decides what kind of domain produced these flags.
    ///
    /// Hostname detection wins over IP literal detection so that an
    /// internationalized name is never taken for an address.
    pub const fn classify(self) -> Result<DomainKind> {
        if (self.is_internationalized || self.has_other_character) && !self.has_colon {
            Ok(DomainKind::Hostname)
        } else if self.has_decimal_digit && self.has_dot && !self.has_hex_letter && !self.has_colon
        {
            Ok(DomainKind::Ipv4Literal)
        } else if (self.has_decimal_digit || self.has_hex_letter) && self.has_colon && !self.has_dot
        {
            Ok(DomainKind::Ipv6Literal)
        } else {
            Err(NormalizeError::UnknownDomainCharacterCombination(self))
        }
    }
}

impl fmt::Display for DomainFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decimal={} hex={} dot={} colon={} other={} idna={}",
            self.has_decimal_digit,
            self.has_hex_letter,
            self.has_dot,
            self.has_colon,
            self.has_other_character,
            self.is_internationalized
        )
    }
}

/// Kind of domain in an accepted address
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// Ordinary host name, possibly internationalized
    Hostname,
    Ipv4Literal,
    Ipv6Literal,
}

impl DomainKind {
    #[must_use]
    pub const fn is_ip_literal(self) -> bool {
        matches!(self, Self::Ipv4Literal | Self::Ipv6Literal)
    }
}
