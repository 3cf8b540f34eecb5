//! Lookup keys handed to the user in place of staged hits

use crate::hit::KEY_DELIMITER;
use crate::Namespace;
use std::fmt::{self, Display};

/// Encoded reference to a staged candidate: `<namespace>:<query>:<ordinal>`.
///
/// `query` is the exact text that produced the staged candidate. It may itself
/// contain the delimiter; the namespace is split at the first delimiter and
/// the ordinal at the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub namespace: Namespace,
    pub query: String,
    pub ordinal: usize,
}

impl LookupKey {
    pub fn new(namespace: Namespace, query: impl Into<String>, ordinal: usize) -> Self {
        Self {
            namespace,
            query: query.into(),
            ordinal,
        }
    }

    /// Parse the three-part key shape. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let (namespace, rest) = value.split_once(KEY_DELIMITER)?;
        let (query, ordinal) = rest.rsplit_once(KEY_DELIMITER)?;
        if query.is_empty() {
            return None;
        }
        let ordinal = ordinal.parse().ok()?;
        let namespace = Namespace::new(namespace).ok()?;
        Some(Self::new(namespace, query, ordinal))
    }
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{KEY_DELIMITER}{}{KEY_DELIMITER}{}",
            self.namespace, self.query, self.ordinal
        )
    }
}

/// What the user submitted in the resolution phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A value with the lookup key shape, whichever source minted it.
    Key(LookupKey),
    /// Free text.
    Text(String),
}

impl Selection {
    pub fn parse(value: &str) -> Self {
        match LookupKey::parse(value) {
            Some(key) => Selection::Key(key),
            None => Selection::Text(value.to_string()),
        }
    }

    /// Query text to search with when the cache cannot answer.
    ///
    /// For a key this is the embedded query, never the full encoded key.
    pub fn query(&self) -> &str {
        match self {
            Selection::Key(key) => &key.query,
            Selection::Text(text) => text,
        }
    }
}
