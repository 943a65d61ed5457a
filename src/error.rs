//! Error types for address normalization

use crate::classify::DomainFlags;
use thiserror::Error;

/// Reasons an address is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Fewer than three characters were given
    #[error("Given email address is too short")]
    TooShort,

    /// The domain is an IP literal and the options forbid it
    #[error("Given email address has an IP literal domain")]
    HasIpLiteral,

    /// The local part must be quoted and the options forbid it
    #[error("Given email address needs a quoted local part")]
    NeedsQuoting,

    /// The local part contains one of `% | ! # $ * / \`
    #[error("Given email address contains special characters in the local part")]
    ContainsSpecialCharacter,

    /// The local part contains non-ASCII characters
    #[error("Given email address contains international characters in the local part")]
    ContainsInternationalCharacter,

    /// The domain characters match neither a hostname nor an IP literal
    #[error("Unknown domain character combination: {0}")]
    UnknownDomainCharacterCombination(DomainFlags),

    /// Nothing survived in the local part
    #[error("Local part is empty after check")]
    EmptyLocalPartAfterCheck,

    /// Nothing survived in the domain part
    #[error("Domain part is empty after check")]
    EmptyDomainAfterCheck,

    /// Sub-address or dot removal left nothing in the local part
    #[error("Local part is empty after normalize")]
    EmptyLocalPartAfterNormalize,
}

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, NormalizeError>;
