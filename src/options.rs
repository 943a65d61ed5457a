//! Normalization options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Returns the sub-addressing separators used for a normalized domain.
pub type SubAddressingFn = Arc<dyn Fn(&str) -> Vec<char> + Send + Sync>;

/// Separators stripped by the default options, for every domain.
#[must_use]
pub fn default_sub_addressing_chars(_domain: &str) -> Vec<char> {
    vec!['+', '%']
}

fn default_sub_addressing() -> Option<SubAddressingFn> {
    Some(Arc::new(default_sub_addressing_chars))
}

/// Controls which addresses are accepted and how the normalized form is
/// derived.
///
/// The boolean switches can be loaded from any serde format. The
/// sub-addressing callback cannot; it is set to the `+ %` default when
/// deserialized and replaced with [`NormalizeOptions::with_sub_addressing`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Accept local parts that must be quoted
    pub allow_quoted_local_part: bool,

    /// Accept `% | ! # $ * / \` in the local part
    pub allow_local_part_special_chars: bool,

    /// Accept non-ASCII characters in the local part
    pub allow_local_part_international_chars: bool,

    /// Accept IPv4 and IPv6 literal domains
    pub allow_ip_literal: bool,

    /// Sub-addressing separators, chosen per domain. `None` keeps tags.
    #[serde(skip, default = "default_sub_addressing")]
    pub remove_sub_addressing_with: Option<SubAddressingFn>,

    /// Remove dots from the normalized local part
    pub remove_local_part_dots: bool,
}

impl Default for NormalizeOptions {
    /// Rejects everything optional, strips `+` and `%` tags and dots.
    fn default() -> Self {
        Self {
            allow_quoted_local_part: false,
            allow_local_part_special_chars: false,
            allow_local_part_international_chars: false,
            allow_ip_literal: false,
            remove_sub_addressing_with: default_sub_addressing(),
            remove_local_part_dots: true,
        }
    }
}

impl NormalizeOptions {
    /// Accepts every address the tokenizers can read and applies no
    /// deduplication transforms, so the normalized form equals the checked
    /// one.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            allow_quoted_local_part: true,
            allow_local_part_special_chars: true,
            allow_local_part_international_chars: true,
            allow_ip_literal: true,
            remove_sub_addressing_with: None,
            remove_local_part_dots: false,
        }
    }

    #[must_use]
    pub const fn with_quoted_local_part(mut self, allow: bool) -> Self {
        self.allow_quoted_local_part = allow;
        self
    }

    #[must_use]
    pub const fn with_local_part_special_chars(mut self, allow: bool) -> Self {
        self.allow_local_part_special_chars = allow;
        self
    }

    #[must_use]
    pub const fn with_local_part_international_chars(mut self, allow: bool) -> Self {
        self.allow_local_part_international_chars = allow;
        self
    }

    #[must_use]
    pub const fn with_ip_literal(mut self, allow: bool) -> Self {
        self.allow_ip_literal = allow;
        self
    }

    #[must_use]
    pub const fn with_local_part_dots_removed(mut self, remove: bool) -> Self {
        self.remove_local_part_dots = remove;
        self
    }

    /// Picks sub-addressing separators per domain.
    #[must_use]
    pub fn with_sub_addressing<F>(mut self, separators: F) -> Self
    where
        F: Fn(&str) -> Vec<char> + Send + Sync + 'static,
    {
        self.remove_sub_addressing_with = Some(Arc::new(separators));
        self
    }

    /// Uses the same separators for every domain.
    #[must_use]
    pub fn with_sub_addressing_chars(self, separators: impl Into<Vec<char>>) -> Self {
        let separators: Vec<char> = separators.into();
        self.with_sub_addressing(move |_| separators.clone())
    }

    #[must_use]
    pub fn without_sub_addressing(mut self) -> Self {
        self.remove_sub_addressing_with = None;
        self
    }

    pub(crate) fn sub_addressing_chars(&self, domain: &str) -> Vec<char> {
        self.remove_sub_addressing_with
            .as_ref()
            .map_or_else(Vec::new, |separators| separators(domain))
    }
}

impl fmt::Debug for NormalizeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizeOptions")
            .field("allow_quoted_local_part", &self.allow_quoted_local_part)
            .field(
                "allow_local_part_special_chars",
                &self.allow_local_part_special_chars,
            )
            .field(
                "allow_local_part_international_chars",
                &self.allow_local_part_international_chars,
            )
            .field("allow_ip_literal", &self.allow_ip_literal)
            .field(
                "remove_sub_addressing_with",
                &self.remove_sub_addressing_with.as_ref().map(|_| "Fn"),
            )
            .field("remove_local_part_dots", &self.remove_local_part_dots)
            .finish()
    }
}
