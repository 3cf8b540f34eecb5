//! Chat-message rendering for resolved hits

use crate::hierarchy::decode_entities;
use crate::Hit;
use serde::{Deserialize, Serialize};

/// Outbound message produced by the resolution phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
    /// User IDs the message may notify. Empty means no notifications.
    pub allowed_mentions: Vec<String>,
    /// Only visible to the requesting user.
    #[serde(default)]
    pub ephemeral: bool,
}

/// Per-source header shown above every rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub title: String,
    pub root_url: String,
    pub icon: String,
}

impl Branding {
    pub fn header_text(&self) -> String {
        format!("{} results:", hyperlink(&self.title, &self.root_url))
    }
}

/// Markdown link with the embed preview suppressed.
pub fn hyperlink(text: &str, url: &str) -> String {
    format!("[{text}](<{url}>)")
}

pub fn inline_code(text: &str) -> String {
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}

pub fn user_mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}

fn mentions(target: Option<&str>) -> Vec<String> {
    target.map(|id| vec![id.to_string()]).unwrap_or_default()
}

fn with_header(branding: &Branding, body: &str, target: Option<&str>) -> String {
    let mut content = String::new();
    if let Some(id) = target {
        content.push_str(&format!("*Documentation suggestion for {}:*\n", user_mention(id)));
    }
    if branding.icon.is_empty() {
        content.push_str(&branding.header_text());
    } else {
        content.push_str(&format!("{} {}", branding.icon, branding.header_text()));
    }
    content.push('\n');
    content.push_str(body);
    content
}

/// Message linking one selected hit under its verbose name.
pub fn single_link(
    branding: &Branding,
    name: &str,
    hit: &Hit,
    target: Option<&str>,
) -> ResponseMessage {
    ResponseMessage {
        content: with_header(branding, &hyperlink(name, &hit.url), target),
        allowed_mentions: mentions(target),
        ephemeral: false,
    }
}

/// One bullet line per hit: `• category: [page](<url>) - anchor`.
pub fn hit_line(hit: &Hit) -> String {
    let [lvl0, lvl1, lvl2, lvl3] = hit.hierarchy.levels();
    let category = lvl0.or(lvl1).unwrap_or_default();
    let link_text = lvl2.or(lvl1).unwrap_or("click here");
    let anchor = lvl3.map(|a| format!(" - {a}")).unwrap_or_default();
    decode_entities(&format!(
        "• {category}: {}{anchor}",
        hyperlink(link_text, &hit.url)
    ))
}

/// Message listing every hit of a fresh search.
pub fn hit_list(branding: &Branding, hits: &[Hit], target: Option<&str>) -> ResponseMessage {
    let body = hits.iter().map(hit_line).collect::<Vec<_>>().join("\n");
    ResponseMessage {
        content: with_header(branding, &body, target),
        allowed_mentions: mentions(target),
        ephemeral: false,
    }
}

/// Ephemeral "nothing found" reply.
pub fn not_found(query: &str, target: Option<&str>) -> ResponseMessage {
    ResponseMessage {
        content: format!("no results were found for {}", inline_code(query)),
        allowed_mentions: mentions(target),
        ephemeral: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hierarchy;

    fn branding() -> Branding {
        Branding {
            title: "Discord Developer docs".to_string(),
            root_url: "https://discord.com/developers/docs".to_string(),
            icon: "📘".to_string(),
        }
    }

    fn hit(levels: [Option<&str>; 4], url: &str) -> Hit {
        let [lvl0, lvl1, lvl2, lvl3] = levels.map(|l| l.map(str::to_string));
        Hit {
            hierarchy: Hierarchy {
                lvl0,
                lvl1,
                lvl2,
                lvl3,
            },
            url: url.to_string(),
        }
    }

    #[test]
    fn header_links_to_source_root() {
        assert_eq!(
            branding().header_text(),
            "[Discord Developer docs](<https://discord.com/developers/docs>) results:"
        );
    }

    #[test]
    fn hit_line_uses_fallbacks_and_decodes() {
        let full = hit(
            [Some("Topics"), Some("Rate Limits"), Some("Global &amp; Shared"), Some("Headers")],
            "https://d.example/rl",
        );
        assert_eq!(
            hit_line(&full),
            "• Topics: [Global & Shared](<https://d.example/rl>) - Headers"
        );

        let sparse = hit([None, Some("Intro"), None, None], "https://d.example/intro");
        assert_eq!(hit_line(&sparse), "• Intro: [Intro](<https://d.example/intro>)");

        let bare = hit([Some("Guide"), None, None, None], "https://d.example/");
        assert_eq!(hit_line(&bare), "• Guide: [click here](<https://d.example/>)");
    }

    #[test]
    fn target_adds_mention_line_and_allowed_mention() {
        let h = hit([None, Some("Intro"), None, None], "https://d.example/intro");
        let message = single_link(&branding(), "Intro", &h, Some("1234"));
        assert!(message.content.starts_with("*Documentation suggestion for <@1234>:*\n📘 "));
        assert!(message.content.ends_with("[Intro](<https://d.example/intro>)"));
        assert_eq!(message.allowed_mentions, vec!["1234".to_string()]);

        let message = single_link(&branding(), "Intro", &h, None);
        assert!(message.content.starts_with("📘 [Discord Developer docs]"));
        assert!(message.allowed_mentions.is_empty());
    }

    #[test]
    fn not_found_quotes_query() {
        let message = not_found("rate limit", None);
        assert_eq!(message.content, "no results were found for `rate limit`");
        assert!(message.allowed_mentions.is_empty());
        assert!(message.ephemeral);

        let message = not_found("a`b", Some("42"));
        assert_eq!(message.content, "no results were found for `` a`b ``");
        assert_eq!(message.allowed_mentions, vec!["42".to_string()]);
    }
}
