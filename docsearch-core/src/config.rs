//! Configuration for docsearch

use crate::render::Branding;
use crate::{DocsearchError, Namespace};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Default configuration as TOML
pub const DEFAULT_CONFIG: &str = r#"# docsearch configuration

[service]
bind = "127.0.0.1"
port = 3000

[cache]
# Lifetime of staged suggestions (e.g., "60s", "5m")
ttl = "60s"

# Credentials may be left empty here and supplied through
# DOCSEARCH_<NAMESPACE>_APPLICATION_ID / DOCSEARCH_<NAMESPACE>_API_KEY.

[[sources]]
name = "discord-developer-docs"
description = "Search Discord Developer documentation"
namespace = "discord-docs"
index = "discord"
application_id = ""
api_key = ""
title = "Discord Developer docs"
root_url = "https://discord.com/developers/docs"
icon = "📘"

[[sources]]
name = "discordjs-guide"
description = "Search discord.js guides"
namespace = "discordjs-guide"
index = "discordjs"
application_id = ""
api_key = ""
title = "Discord.js Guide"
root_url = "https://discordjs.guide"
icon = "📗"
"#;

/// docsearch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl")]
    pub ttl: String,
}

/// One documentation source: where to search and how to present results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Route/command name, e.g. `discord-developer-docs`.
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub namespace: Namespace,
    /// Backend index name.
    pub index: String,
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub api_key: String,
    pub title: String,
    pub root_url: String,
    #[serde(default)]
    pub icon: String,
    /// Overrides the backend host derived from `application_id`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl SourceConfig {
    pub fn branding(&self) -> Branding {
        Branding {
            title: self.title.clone(),
            root_url: self.root_url.clone(),
            icon: self.icon.clone(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.application_id.is_empty() && !self.api_key.is_empty()
    }

    /// Environment variable prefix for this source's credentials.
    pub fn env_prefix(&self) -> String {
        format!(
            "DOCSEARCH_{}",
            self.namespace.as_str().to_ascii_uppercase().replace('-', "_")
        )
    }
}

// Default value functions
fn default_bind() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_ttl() -> String {
    "60s".to_string()
}
fn default_sources() -> Vec<SourceConfig> {
    toml::from_str::<Config>(DEFAULT_CONFIG)
        .map(|config| config.sources)
        .unwrap_or_default()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            cache: CacheConfig::default(),
            sources: default_sources(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate config from a TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| DocsearchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        let mut names = HashSet::new();
        let mut namespaces = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                return Err(DocsearchError::ConfigParse(format!(
                    "duplicate source name {:?}",
                    source.name
                )));
            }
            if !namespaces.insert(source.namespace.as_str()) {
                return Err(DocsearchError::ConfigParse(format!(
                    "duplicate namespace {:?}",
                    source.namespace.as_str()
                )));
            }
        }
        if parse_duration(&self.cache.ttl).is_none() {
            return Err(DocsearchError::ConfigParse(format!(
                "invalid cache ttl {:?}",
                self.cache.ttl
            )));
        }
        Ok(())
    }

    /// Fill credentials from `DOCSEARCH_<NAMESPACE>_APPLICATION_ID` and `_API_KEY`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for source in &mut self.sources {
            let prefix = source.env_prefix();
            if let Some(id) = lookup(&format!("{prefix}_APPLICATION_ID")) {
                source.application_id = id;
            }
            if let Some(key) = lookup(&format!("{prefix}_API_KEY")) {
                source.api_key = key;
            }
        }
    }

    /// Get the staging TTL as Duration
    pub fn stage_ttl(&self) -> Duration {
        parse_duration(&self.cache.ttl).unwrap_or(crate::cache::DEFAULT_STAGE_TTL)
    }

    pub fn source(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.name == name)
    }
}

/// Parse duration string (e.g., "60s", "5m", "1h")
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (unit_start, _) = s.char_indices().last()?;
    let (num_str, unit) = s.split_at(unit_start);
    let num: u64 = num_str.parse().ok()?;

    match unit {
        "s" => Some(num),
        "m" => num.checked_mul(60),
        "h" => num.checked_mul(3600),
        _ => None,
    }
    .map(Duration::from_secs)
}
