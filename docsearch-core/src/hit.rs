//! Search hit and namespace types

use crate::DocsearchError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Delimiter between the segments of a lookup key.
pub const KEY_DELIMITER: char = ':';

/// Breadcrumb of a hit inside its documentation tree.
///
/// `lvl0` is the broadest level (category), `lvl3` the narrowest (anchor or
/// sub-heading). Deeper levels returned by the backend are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    #[serde(default)]
    pub lvl0: Option<String>,
    #[serde(default)]
    pub lvl1: Option<String>,
    #[serde(default)]
    pub lvl2: Option<String>,
    #[serde(default)]
    pub lvl3: Option<String>,
}

impl Hierarchy {
    /// Levels in broad-to-narrow order, blank strings treated as absent.
    pub fn levels(&self) -> [Option<&str>; 4] {
        [
            present(&self.lvl0),
            present(&self.lvl1),
            present(&self.lvl2),
            present(&self.lvl3),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.levels().iter().all(Option::is_none)
    }
}

fn present(level: &Option<String>) -> Option<&str> {
    level.as_deref().filter(|s| !s.trim().is_empty())
}

/// One ranked result from the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(default)]
    pub hierarchy: Hierarchy,
    pub url: String,
}

/// Identifier of a documentation source inside the result cache and lookup keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    pub fn new(value: impl Into<String>) -> crate::Result<Self> {
        let value = value.into();
        if value.is_empty() || value.contains(KEY_DELIMITER) {
            return Err(DocsearchError::InvalidNamespace(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = DocsearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = DocsearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}
