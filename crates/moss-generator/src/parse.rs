//! Turning raw model output into pools and chat replies.
//!
//! Models wrap JSON in prose, fence it in markdown, or leave trailing
//! commas. Each parse walks a fixed chain of candidates: the trimmed
//! text, the body of a fenced code block, and the first balanced
//! `{...}` object, each as-is and with trailing commas removed.

use std::collections::BTreeMap;

use moss_types::{Category, ChatReply, MessagePool};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::GenerationError;

/// Parse a generated message pool.
///
/// Unknown keys are ignored, non-string entries and blank lines are
/// dropped, and a category left with no lines is omitted so selection
/// falls through to the static pools.
///
/// # Errors
///
/// Returns [`GenerationError::Parse`] when no JSON object can be
/// recovered or it names no known category.
pub fn parse_pool(raw: &str) -> Result<MessagePool, GenerationError> {
    let object: BTreeMap<String, serde_json::Value> = parse_json(raw)?;

    let mut pool = MessagePool::new();
    for (key, value) in object {
        let Some(category) = Category::from_name(&key) else {
            debug!(key = %key, "ignoring unknown pool category");
            continue;
        };
        let lines: Vec<String> = value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        if !lines.is_empty() {
            pool.insert(category, lines);
        }
    }

    if pool.is_empty() {
        return Err(GenerationError::Parse(
            "pool response contained no known categories".to_owned(),
        ));
    }
    debug!(covered = pool.covered(), "parsed generated pool");
    Ok(pool)
}

/// Parse a chat reply.
///
/// A structured `{response, mysteryUpdate}` object wins when it has a
/// non-empty response. Otherwise the text itself, with any embedded JSON
/// objects removed, becomes the response and carries no update.
///
/// # Errors
///
/// Returns [`GenerationError::Parse`] when the output is blank.
pub fn parse_chat(raw: &str) -> Result<ChatReply, GenerationError> {
    match parse_json::<ChatReply>(raw) {
        Ok(reply) if !reply.response.trim().is_empty() => return Ok(reply),
        Ok(_) => debug!("structured chat reply had an empty response"),
        Err(e) => debug!(error = %e, "chat reply is not structured"),
    }

    let stripped = strip_json(raw);
    let text = if stripped.is_empty() { raw.trim() } else { stripped.as_str() };
    if text.is_empty() {
        warn!("model returned an empty chat reply");
        return Err(GenerationError::Parse("empty chat reply".to_owned()));
    }
    Ok(ChatReply {
        response: text.to_owned(),
        mystery_update: None,
    })
}

/// Deserialize the first candidate in the recovery chain that fits `T`.
fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let trimmed = raw.trim();
    let mut candidates: Vec<&str> = vec![trimmed];
    if let Some(block) = extract_json_from_codeblock(trimmed) {
        candidates.push(block);
    }
    if let Some(object) = extract_json(trimmed) {
        candidates.push(object);
    }

    let mut last_error = None;
    for candidate in candidates {
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
        if let Ok(value) = serde_json::from_str::<T>(&strip_trailing_commas(candidate)) {
            return Ok(value);
        }
    }

    Err(GenerationError::Parse(format!(
        "all parse strategies failed: {}",
        last_error.map_or_else(|| "no candidates".to_owned(), |e| e.to_string())
    )))
}

/// Byte range of the first balanced `{...}` at or after `from`.
///
/// Braces inside string literals are ignored.
fn balanced_object(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut start = None;
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text.get(from..)?.char_indices() {
        let i = from.checked_add(offset)?;
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if start.is_some() => in_string = true,
            '{' => {
                start.get_or_insert(i);
                depth = depth.saturating_add(1);
            }
            '}' if start.is_some() => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some((start?, i.checked_add(1)?));
                }
            }
            _ => {}
        }
    }
    None
}

/// The first balanced JSON object embedded in `text`.
pub fn extract_json(text: &str) -> Option<&str> {
    let (start, end) = balanced_object(text, 0)?;
    text.get(start..end)
}

/// `text` with every balanced JSON object removed, trimmed.
pub fn strip_json(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some((start, end)) = balanced_object(text, cursor) {
        result.push_str(text.get(cursor..start).unwrap_or_default());
        cursor = end;
    }
    result.push_str(text.get(cursor..).unwrap_or_default());
    result.trim().to_owned()
}

/// Body of the first fenced code block, preferring a `json` fence.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let body_start = |tag_at: usize, tag_len: usize| {
        let after_tag = tag_at.checked_add(tag_len).unwrap_or(tag_at);
        text.get(after_tag..)
            .and_then(|s| s.find('\n'))
            .and_then(|nl| after_tag.checked_add(nl))
            .and_then(|pos| pos.checked_add(1))
            .unwrap_or(after_tag)
    };

    let start = text
        .find("```json")
        .map(|i| body_start(i, 7))
        .or_else(|| text.find("```").map(|i| body_start(i, 3)))?;
    let remaining = text.get(start..)?;
    let end = remaining.find("```")?;
    remaining.get(..end).map(str::trim)
}

/// Strip trailing commas before closing braces and brackets.
fn strip_trailing_commas(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ',' {
            let rest: String = chars.clone().skip_while(|n| n.is_whitespace()).take(1).collect();
            if rest == "}" || rest == "]" {
                continue;
            }
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pool_parses_direct_json() {
        let raw = r#"{"feedSuccess": ["yum", "  ", 3], "idleHappy": ["la la"], "bogus": ["x"]}"#;
        let pool = parse_pool(raw).unwrap();
        assert_eq!(pool.get(Category::FeedSuccess), Some(&["yum".to_owned()][..]));
        assert_eq!(pool.covered(), 2);
    }

    #[test]
    fn pool_recovers_from_prose_and_trailing_commas() {
        let raw = "Sure! Here you go:\n{\"petSuccess\": [\"purr\", \"wiggle\",],}\nEnjoy.";
        let pool = parse_pool(raw).unwrap();
        assert_eq!(pool.get(Category::PetSuccess).map(<[String]>::len), Some(2));
    }

    #[test]
    fn pool_recovers_from_code_block() {
        let raw = "```json\n{\"needsFood\": [\"snack?\"]}\n```";
        let pool = parse_pool(raw).unwrap();
        assert!(pool.get(Category::NeedsFood).is_some());
    }

    #[test]
    fn pool_without_known_categories_fails() {
        assert!(parse_pool(r#"{"nope": ["x"]}"#).is_err());
        assert!(parse_pool("no json here").is_err());
        assert!(parse_pool(r#"{"feedFull": []}"#).is_err());
    }

    #[test]
    fn chat_structured_reply() {
        let raw = r#"{"response": "Warmer!", "mysteryUpdate": {"solved": false, "failed": false, "hintGiven": "cold mornings"}}"#;
        let reply = parse_chat(raw).unwrap();
        assert_eq!(reply.response, "Warmer!");
        assert_eq!(
            reply.mystery_update.and_then(|u| u.hint_given).as_deref(),
            Some("cold mornings")
        );
    }

    #[test]
    fn chat_plain_text_drops_fragments() {
        let raw = "Hmm, maybe! {\"debug\": {\"x\": 1}} Keep guessing.";
        let reply = parse_chat(raw).unwrap();
        assert_eq!(reply.response, "Hmm, maybe!  Keep guessing.");
        assert!(reply.mystery_update.is_none());
    }

    #[test]
    fn chat_empty_response_falls_back_to_text() {
        let reply = parse_chat(r#"{"response": ""}"#).unwrap();
        assert_eq!(reply.response, r#"{"response": ""}"#);
    }

    #[test]
    fn chat_blank_is_an_error() {
        assert!(parse_chat("   ").is_err());
    }

    #[test]
    fn extraction_ignores_braces_in_strings() {
        let text = r#"note {"response": "a } b", "x": {"y": 1}} tail {"z": 2}"#;
        assert_eq!(extract_json(text), Some(r#"{"response": "a } b", "x": {"y": 1}}"#));
        assert_eq!(strip_json(text), "note  tail");
    }

    #[test]
    fn strip_trailing_commas_basic() {
        assert_eq!(strip_trailing_commas(r#"{"a": 1, "b": 2,}"#), r#"{"a": 1, "b": 2}"#);
        assert_eq!(strip_trailing_commas("[1, 2, 3,\n]"), "[1, 2, 3\n]");
    }
}
