// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Address Normalizer
//!
//! Parses an email address into two canonical forms: a *checked* address,
//! validated, case-folded and quoted where needed, and a *normalized*
//! address with sub-addressing tags and dots removed, usable as a key to
//! tell whether two addresses reach the same mailbox.
//!
//! # Features
//!
//! - Single pass tokenizer for quoted strings, escapes and comments
//! - IPv4 and IPv6 literal detection, with or without brackets
//! - Internationalized domain detection
//! - Configurable rejection of quoted, special or non-ASCII local parts
//! - Per-domain sub-addressing separators
//!
//! # Example
//!
//! ```rust
//! use email_normalize::{normalize, NormalizeError, NormalizeOptions};
//!
//! let options = NormalizeOptions::default();
//!
//! let address = normalize("User+newsletter@Example.Net", &options).unwrap();
//! assert_eq!(address.checked, "user+newsletter@example.net");
//! assert_eq!(address.normalized, "user@example.net");
//!
//! assert_eq!(
//!     normalize("user@127.0.0.1", &options),
//!     Err(NormalizeError::HasIpLiteral)
//! );
//! ```

mod charclass;
mod classify;
mod domain_part;
mod error;
mod local_part;
mod normalize;
mod options;

pub use classify::{DomainFlags, DomainKind};
pub use domain_part::DOMAIN_LENGTH_LIMIT;
pub use error::{NormalizeError, Result};
pub use normalize::{NormalizedAddress, is_same_mailbox, normalize};
pub use options::{NormalizeOptions, SubAddressingFn, default_sub_addressing_chars};
