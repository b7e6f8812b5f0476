//! # ENS Naming - Labels and Node Identifiers
//!
//! Pure functions that turn free-text display names into registry
//! labels and compute the recursive node identifier (namehash) for a
//! dotted name.
//!
//! ## Properties
//!
//! - NO I/O operations
//! - NO async code
//! - Total functions only: normalization never fails, the empty name
//!   hashes to the all-zero node
//!
//! ## Namehash
//!
//! `namehash` folds labels right to left (top-level domain first):
//!
//! ```text
//! node = 0x00..00
//! for label in labels.reverse():
//!     node = keccak256(node ++ keccak256(label))
//! ```
//!
//! Traversal direction matters: `namehash("a.b") != namehash("b.a")`.
//! The output is bit-exact against the reference vectors for `eth` and
//! `foo.eth`.

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

// =============================================================================
// NAMEHASH (32-byte node identifier)
// =============================================================================

/// A 32-byte identifier addressing one position in the hierarchical
/// name tree.
///
/// Only ever derived via [`namehash`]; there is no constructor from
/// arbitrary bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Namehash([u8; 32]);

impl Namehash {
    /// The root node (hash of the empty name).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the root node.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Namehash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Namehash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namehash({self})")
    }
}

// =============================================================================
// LABEL
// =============================================================================

/// A single normalized segment of a dotted name.
///
/// Guaranteed to contain only `[a-z0-9-]`; may be empty when the input
/// had no usable characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if normalization produced no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PURE FUNCTIONS
// =============================================================================

/// Normalizes a free-text display name into a registry label.
///
/// Lowercases, collapses each run of whitespace into a single hyphen,
/// then strips every character outside `[a-z0-9-]`. Total and
/// idempotent; empty input yields the empty label.
#[must_use]
pub fn normalize_label(display_name: &str) -> Label {
    let lowered = display_name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                out.push(c);
            }
        }
    }
    Label(out)
}

/// Computes keccak256 of a single label's UTF-8 bytes.
#[must_use]
pub fn labelhash(label: &str) -> [u8; 32] {
    Keccak256::digest(label.as_bytes()).into()
}

/// Computes the node identifier for a dotted name.
///
/// Splits on `.` and folds right to left starting from the all-zero
/// node. The empty name yields [`Namehash::ZERO`].
#[must_use]
pub fn namehash(dotted_name: &str) -> Namehash {
    if dotted_name.is_empty() {
        return Namehash::ZERO;
    }
    let mut node = [0u8; 32];
    for label in dotted_name.rsplit('.') {
        let mut hasher = Keccak256::new();
        hasher.update(node);
        hasher.update(labelhash(label));
        node = hasher.finalize().into();
    }
    Namehash(node)
}

/// Formats the full registered name for a display name under a TLD.
///
/// `"Kathmandu Flood Relief"` with tld `"eth"` becomes
/// `"kathmandu-flood-relief.eth"`.
#[must_use]
pub fn format_registered_name(display_name: &str, tld: &str) -> String {
    format!("{}.{}", normalize_label(display_name), tld)
}
