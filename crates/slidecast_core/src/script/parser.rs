//! Script tokenizer.
//!
//! Recognizes the exact, case-sensitive marker vocabulary interleaved with
//! free narration text:
//!
//! ```text
//! [slide_01] [long_pause]
//! Welcome to the course.
//! [slide_02] [short_pause]
//! [vignette]
//! ```
//!
//! Any other bracketed content (`[Slide_01]`, `[slide_1]`, `[note]`) is
//! literal text, never an error. A script without slide markers is also not
//! an error; it signals fallback ordering downstream.

use std::collections::BTreeMap;

use crate::models::{PauseKind, SlideId};

use super::types::ScriptToken;

/// Parse a script document into its ordered token sequence.
pub fn parse(text: &str) -> Vec<ScriptToken> {
    let mut tokens: Vec<ScriptToken> = Vec::new();
    let mut buffer = String::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let (before, bracketed) = rest.split_at(open);
        buffer.push_str(before);

        match bracketed[1..].find(']') {
            Some(close) => {
                let inner = &bracketed[1..close + 1];
                match recognize_marker(inner) {
                    Some(token) => {
                        flush_text(&mut buffer, &mut tokens);
                        tokens.push(token);
                    }
                    // Unrecognized bracket form stays literal.
                    None => buffer.push_str(&bracketed[..close + 2]),
                }
                rest = &bracketed[close + 2..];
            }
            None => {
                // Unclosed bracket: the remainder is literal text.
                buffer.push_str(bracketed);
                rest = "";
            }
        }
    }
    buffer.push_str(rest);
    flush_text(&mut buffer, &mut tokens);

    tokens
}

/// Match the exact tag vocabulary. Returns None for any other content.
fn recognize_marker(inner: &str) -> Option<ScriptToken> {
    match inner {
        "short_pause" => return Some(ScriptToken::Pause(PauseKind::Short)),
        "long_pause" => return Some(ScriptToken::Pause(PauseKind::Long)),
        "vignette" => return Some(ScriptToken::Vignette),
        _ => {}
    }

    let index = inner.strip_prefix("slide_")?;
    if index.len() < 2 || !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    index.parse().ok().map(|n| ScriptToken::Slide(SlideId::new(n)))
}

/// Push the accumulated narration text as a token, if non-blank.
fn flush_text(buffer: &mut String, tokens: &mut Vec<ScriptToken>) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        tokens.push(ScriptToken::Text(trimmed.to_string()));
    }
    buffer.clear();
}

/// Extract per-slide narration text for the external audio-generation step.
///
/// Text between a slide marker and the next slide marker is aggregated as
/// that slide's narration; pause and vignette markers are transparent.
/// Text before the first slide marker is dropped.
pub fn slide_texts(text: &str) -> BTreeMap<SlideId, String> {
    let mut texts: BTreeMap<SlideId, Vec<String>> = BTreeMap::new();
    let mut current: Option<SlideId> = None;

    for token in parse(text) {
        match token {
            ScriptToken::Slide(id) => {
                texts.entry(id).or_default();
                current = Some(id);
            }
            ScriptToken::Text(span) => {
                if let Some(id) = current {
                    texts.entry(id).or_default().push(span);
                }
            }
            ScriptToken::Pause(_) | ScriptToken::Vignette => {}
        }
    }

    texts
        .into_iter()
        .map(|(id, spans)| (id, spans.join(" ")))
        .collect()
}
