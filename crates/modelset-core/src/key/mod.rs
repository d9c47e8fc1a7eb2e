//! Key naming.
//!
//! Every key the query layer reads or materializes is derived here from the
//! entity name and the query terms. Derivation is pure: identical inputs
//! always produce identical keys, so concurrent identical queries overwrite
//! the same materialized key.

mod space;

pub use space::KeySpace;

use derive_more::{Deref, Display};
use std::fmt::Write as _;

///
/// StoreKey
/// Name of one store-resident structure.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StoreKey(String);

impl StoreKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StoreKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for StoreKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Escape a stored value so it can be embedded in a key segment.
///
/// Bytes outside `[A-Za-z0-9._-]` become `%XX`; the output never contains a
/// key delimiter.
#[must_use]
pub fn encode_value(stored: &str) -> String {
    let mut out = String::with_capacity(stored.len());

    for byte in stored.bytes() {
        if is_unescaped(byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }

    out
}

const fn is_unescaped(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-')
}

/// Whether `byte` can appear in the output of [`encode_value`].
#[must_use]
pub const fn may_appear_encoded(byte: u8) -> bool {
    is_unescaped(byte) || byte == b'%'
}

#[cfg(test)]
mod tests;
