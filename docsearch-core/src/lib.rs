//! Docsearch Core - two-phase documentation search and selection
//!
//! This library stages ranked search hits behind short-lived lookup keys
//! while a user types, and resolves the key they pick into a shareable,
//! formatted reference.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod hit;
pub mod key;
pub mod render;
pub mod source;

pub use backend::SearchBackend;
pub use cache::{MemoryCache, ResultCache, DEFAULT_STAGE_TTL};
pub use config::{Config, SourceConfig};
pub use error::{DocsearchError, ErrorEnvelope};
pub use hierarchy::build_hierarchical_name;
pub use hit::{Hierarchy, Hit, Namespace};
pub use key::{LookupKey, Selection};
pub use render::{Branding, ResponseMessage};
pub use source::{DocSource, Outcome, Resolved, Suggestion};

/// Result type alias for docsearch operations
pub type Result<T> = std::result::Result<T, DocsearchError>;
