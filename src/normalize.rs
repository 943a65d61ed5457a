//! Address checking and normalization

use crate::classify::DomainKind;
use crate::domain_part::DomainPart;
use crate::error::{NormalizeError, Result};
use crate::local_part::LocalPart;
use crate::options::NormalizeOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Minimum number of characters in an address: `a@b`.
const MIN_ADDRESS_LENGTH: usize = 3;

/// An accepted address in its checked and normalized forms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NormalizedAddress {
    /// Case-folded address with the local part quoted when required
    pub checked: String,

    /// Checked address with sub-address tags and dots removed as configured.
    /// Two addresses with the same normalized form reach the same mailbox.
    pub normalized: String,

    /// What the domain part was classified as
    pub domain_kind: DomainKind,
}

impl NormalizedAddress {
    /// Domain part shared by both forms, bracketed for IP literals.
    #[must_use]
    pub fn domain(&self) -> &str {
        split_domain(&self.checked).1
    }

    #[must_use]
    pub fn checked_local_part(&self) -> &str {
        split_domain(&self.checked).0
    }

    #[must_use]
    pub fn normalized_local_part(&self) -> &str {
        split_domain(&self.normalized).0
    }
}

/// The domain never contains `@`, so the last one separates the parts.
fn split_domain(address: &str) -> (&str, &str) {
    address.rsplit_once('@').unwrap_or((address, ""))
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl FromStr for NormalizedAddress {
    type Err = NormalizeError;

    /// Normalizes with [`NormalizeOptions::default`].
    fn from_str(s: &str) -> Result<Self> {
        normalize(s, &NormalizeOptions::default())
    }
}

/// Check and normalize an email address
///
/// # Example
///
/// ```rust
/// use email_normalize::{normalize, NormalizeOptions};
///
/// let address = normalize("U.se.r_Name+subAddr@Example.Net", &NormalizeOptions::default()).unwrap();
///
/// assert_eq!(address.checked, "u.se.r_name+subaddr@example.net");
/// assert_eq!(address.normalized, "user_name@example.net");
/// ```
pub fn normalize(address: &str, options: &NormalizeOptions) -> Result<NormalizedAddress> {
    normalize_inner(address, options).inspect_err(|err| {
        debug!("Rejected email address {:?}: {}", address, err);
    })
}

fn normalize_inner(address: &str, options: &NormalizeOptions) -> Result<NormalizedAddress> {
    if address.chars().count() < MIN_ADDRESS_LENGTH {
        return Err(NormalizeError::TooShort);
    }

    let (local, domain) = tokenize(address);
    if local.is_empty() {
        return Err(NormalizeError::EmptyLocalPartAfterCheck);
    }
    if domain.is_empty() {
        return Err(NormalizeError::EmptyDomainAfterCheck);
    }

    let domain_kind = domain.flags().classify()?;
    if domain_kind.is_ip_literal() && !options.allow_ip_literal {
        return Err(NormalizeError::HasIpLiteral);
    }
    if local.need_quote() && !options.allow_quoted_local_part {
        return Err(NormalizeError::NeedsQuoting);
    }
    if local.has_unsafe_character() && !options.allow_local_part_special_chars {
        return Err(NormalizeError::ContainsSpecialCharacter);
    }
    if local.has_non_ascii_character() && !options.allow_local_part_international_chars {
        return Err(NormalizeError::ContainsInternationalCharacter);
    }

    let domain = domain.render(domain_kind.is_ip_literal());
    let checked = format!("{}@{}", local.render(), domain);

    let normalized_local = normalize_local_part(&local, &domain, options);
    if normalized_local.is_empty() {
        return Err(NormalizeError::EmptyLocalPartAfterNormalize);
    }
    let normalized = format!("{}@{}", normalized_local.render(), domain);

    debug!("Normalized email address: {} as {}", checked, normalized);

    Ok(NormalizedAddress {
        checked,
        normalized,
        domain_kind,
    })
}

/// Runs the local tokenizer up to the separating `@` and the domain
/// tokenizer over the rest, in a single pass.
fn tokenize(address: &str) -> (LocalPart, DomainPart) {
    let mut local = LocalPart::default();
    let mut domain = DomainPart::default();
    let mut in_domain = false;

    for ch in address.chars() {
        if in_domain {
            domain.put_character(ch);
        } else {
            in_domain = local.put_character(ch);
        }
    }
    if !in_domain {
        local.stop_check();
    }

    (local, domain)
}

/// Cuts the local part at the earliest sub-addressing separator and drops
/// dots when asked to.
fn normalize_local_part(local: &LocalPart, domain: &str, options: &NormalizeOptions) -> LocalPart {
    let chars = local.chars();
    let cut = options
        .sub_addressing_chars(domain)
        .into_iter()
        .filter_map(|separator| local.first_offset_of(separator))
        .min()
        .unwrap_or(chars.len());
    if cut < chars.len() {
        trace!("Removing sub-address tag at offset {} for {}", cut, domain);
    }
    LocalPart::from_committed(&chars[..cut], options.remove_local_part_dots)
}

/// Whether two addresses normalize to the same mailbox.
pub fn is_same_mailbox(a: &str, b: &str, options: &NormalizeOptions) -> Result<bool> {
    let a = normalize(a, options)?;
    let b = normalize(b, options)?;
    Ok(a.normalized == b.normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_at_unescaped_at() {
        let (local, domain) = tokenize("\"a@b\"@Example.Net");
        assert_eq!(local.render(), "\"a@b\"");
        assert_eq!(domain.render(false), "example.net");
    }

    #[test]
    fn tokenize_without_at_leaves_domain_empty() {
        let (local, domain) = tokenize("user.");
        assert!(domain.is_empty());
        assert!(local.need_quote());
    }

    #[test]
    fn earliest_separator_wins() {
        let options = NormalizeOptions::default().with_sub_addressing_chars(['%', '-', '+']);
        let (local, _) = tokenize("ab+cd-ef%gh@x");
        let normalized = normalize_local_part(&local, "x", &options);
        assert_eq!(normalized.render(), "ab");

        let (local, _) = tokenize("ab-cd+ef@x");
        let normalized = normalize_local_part(&local, "x", &options);
        assert_eq!(normalized.render(), "ab");
    }

    #[test]
    fn separator_outside_punctuation_block() {
        let options = NormalizeOptions::default().with_sub_addressing_chars(['=', '_']);
        let (local, _) = tokenize("first_last=tag@x");
        let normalized = normalize_local_part(&local, "x", &options);
        assert_eq!(normalized.render(), "first");
    }

    #[test]
    fn split_domain_uses_last_at() {
        assert_eq!(split_domain("\"a@b\"@example.net"), ("\"a@b\"", "example.net"));
    }
}
