//! Typed extraction of JSON payloads from free-form LLM replies.
//!
//! Models often wrap JSON in Markdown fences or surround it with prose even
//! when asked not to. Two strategies are offered:
//!
//! * [`parse_fenced`] strips the first Markdown code fence, then parses.
//! * [`parse_braced`] parses the span from the first `{` to the last `}`,
//!   falling back to the whole text.
//!
//! Both return an explicit [`ParseError`] so callers can pick a fallback
//! without treating a bad reply as an exceptional condition.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model reply was empty")]
    Empty,

    #[error("model reply contained no JSON object")]
    NoJson,

    #[error("model reply contained malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Return the body of the first Markdown code fence, or the trimmed text
///
/// A ```` ```json ```` fence wins over a bare ```` ``` ```` fence. When several
/// fenced blocks are present only the first is considered.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();

    if let Some((_, rest)) = text.split_once("```json") {
        let body = rest.split("```").next().unwrap_or(rest);
        return body.trim();
    }

    let mut pieces = text.split("```");
    if let (Some(_), Some(body)) = (pieces.next(), pieces.next()) {
        return body.trim();
    }

    text
}

/// Slice from the first `{` to the last `}` (inclusive)
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Strip a Markdown fence then deserialize
pub fn parse_fenced<T: DeserializeOwned>(text: &str) -> Result<T, ParseError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(serde_json::from_str(body)?)
}

/// Deserialize the outermost `{...}` span, falling back to the whole text
pub fn parse_braced<T: DeserializeOwned>(text: &str) -> Result<T, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    match extract_json_object(trimmed) {
        Some(candidate) => Ok(serde_json::from_str(candidate)?),
        None => serde_json::from_str(trimmed).map_err(|e| {
            if e.is_syntax() || e.is_eof() {
                ParseError::NoJson
            } else {
                ParseError::Malformed(e)
            }
        }),
    }
}
