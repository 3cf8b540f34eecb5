//! Display names for hit hierarchies

use crate::Hierarchy;

/// Separator between levels in the compact breadcrumb.
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// Render a hierarchy into a single display string.
///
/// Compact mode (`verbose == false`) joins the deepest one or two present
/// levels into a breadcrumb such as `"Rate Limits > Global Rate Limit"`.
/// Verbose mode produces link text: the deepest of `lvl2`, `lvl1`, `lvl0`,
/// followed by `" - lvl3"` when an anchor is present.
///
/// Returns `None` when no level is present; such hits are not displayable.
pub fn build_hierarchical_name(hierarchy: &Hierarchy, verbose: bool) -> Option<String> {
    let name = if verbose {
        verbose_name(hierarchy)
    } else {
        let present: Vec<&str> = hierarchy.levels().into_iter().flatten().collect();
        if present.is_empty() {
            return None;
        }
        let start = present.len().saturating_sub(2);
        present[start..].join(BREADCRUMB_SEPARATOR)
    };

    if name.is_empty() {
        return None;
    }
    Some(decode_entities(&name))
}

fn verbose_name(hierarchy: &Hierarchy) -> String {
    let [lvl0, lvl1, lvl2, lvl3] = hierarchy.levels();
    match (lvl2.or(lvl1).or(lvl0), lvl3) {
        (Some(primary), Some(anchor)) => format!("{primary} - {anchor}"),
        (Some(primary), None) => primary.to_string(),
        (None, Some(anchor)) => anchor.to_string(),
        (None, None) => String::new(),
    }
}

/// Decode HTML entities (`&amp;`, `&#39;`, ...) the backend leaves in titles.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Truncate `text` to at most `max_chars` characters.
///
/// Cuts at the last word boundary when one exists in the second half of the
/// allowed range and terminates the result with an ellipsis.
pub fn cut_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let prefix: String = text.chars().take(max_chars - 1).collect();
    let cut = match prefix.rfind(char::is_whitespace) {
        Some(idx) if prefix[..idx].chars().count() >= max_chars / 2 => prefix[..idx].trim_end(),
        _ => prefix.as_str(),
    };
    format!("{cut}…")
}
