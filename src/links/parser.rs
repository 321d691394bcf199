//! Wikilink parsing and the "already inside a wikilink" test.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ParsedLink;
use crate::types::utils::compile_regex;

static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(!?)\[\[([^\]]+)\]\]"));

/// Parse every top-level wikilink in `text`, left to right.
///
/// Content is split on the first `|` (alias), then the target on the first
/// `#` (heading), then on `^` (block id). A heading of the form `H^B` also
/// yields block id `B`, so `[[T#H^B]]` and `[[T#^B]]` both parse. Unterminated
/// `[[` sequences produce no match.
pub fn parse_wikilinks(text: &str) -> Vec<ParsedLink> {
    WIKILINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let content = caps.get(2)?.as_str();
            let mut link = parse_link_content(content);
            link.is_embed = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            link.original = whole.as_str().to_string();
            Some(link)
        })
        .collect()
}

/// Parse the text between `[[` and `]]`
pub fn parse_link_content(content: &str) -> ParsedLink {
    let (target, alias) = match content.split_once('|') {
        Some((target, alias)) => (target, Some(alias.to_string())),
        None => (content, None),
    };

    let (target, heading) = match target.split_once('#') {
        Some((target, heading)) => (target, Some(heading)),
        None => (target, None),
    };

    let (target, mut block_id) = match target.split_once('^') {
        Some((target, block)) => (target, Some(block.to_string())),
        None => (target, None),
    };

    let heading = heading.and_then(|h| match h.split_once('^') {
        Some((h, block)) => {
            if block_id.is_none() {
                block_id = Some(block.to_string());
            }
            non_empty(h)
        }
        None => non_empty(h),
    });

    ParsedLink {
        target: target.to_string(),
        alias,
        heading,
        block_id,
        is_embed: false,
        original: String::new(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

// =============================================================================
// Conflict Detection
// =============================================================================

/// Whether the first occurrence of `needle` in `text` lies inside `[[...]]`.
///
/// Returns `false` when `needle` does not occur.
pub fn is_inside_wikilink(text: &str, needle: &str) -> bool {
    match text.find(needle) {
        Some(start) => is_inside_wikilink_at(text, start, needle.len()),
        None => false,
    }
}

/// Whether the span `start..start + len` of `text` lies inside `[[...]]`.
///
/// The span is inside when the nearest `[[` before it is not closed before the
/// span starts and a `]]` follows the span.
pub fn is_inside_wikilink_at(text: &str, start: usize, len: usize) -> bool {
    let (Some(before), Some(after)) = (text.get(..start), text.get(start + len..)) else {
        return false;
    };
    let Some(open) = before.rfind("[[") else {
        return false;
    };
    if !after.contains("]]") {
        return false;
    }
    !before[open + 2..].contains("]]")
}
