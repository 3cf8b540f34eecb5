//! Docsearch Client - search backend implementations
//!
//! Provides the Algolia DocSearch client used as the ranked-search backend
//! for every configured documentation source.

pub mod algolia;

pub use algolia::{AlgoliaClient, USER_AGENT};
