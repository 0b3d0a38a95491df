//! Post-processing of raw model output.
//!
//! Reasoning models wrap their chain of thought in `<think>...</think>`
//! before the actual answer. That block is dropped, then the remaining text
//! is normalized in two phases: whitespace collapse over the whole text,
//! followed by heading spacing on the resulting lines.
//!
//! The collapse runs first, so newlines are already gone when headings are
//! looked for. Only a heading at the very start of the text gets a blank
//! line in front of it and every other paragraph break is flattened. Output
//! consumers rely on this exact shape.

use crate::error::GenerationError;

pub const THINK_OPEN: &str = "<think>";
pub const THINK_CLOSE: &str = "</think>";

/// Drop the reasoning block, keeping the trimmed text after the last
/// closing delimiter.
///
/// Text without an opening delimiter is returned unchanged. An opening
/// delimiter with no closing one (typically a generation cut off mid-thought)
/// is rejected as malformed.
pub fn strip_reasoning(content: &str) -> Result<String, GenerationError> {
    if !content.contains(THINK_OPEN) {
        return Ok(content.to_string());
    }

    match content.rsplit_once(THINK_CLOSE) {
        Some((_, answer)) => Ok(answer.trim().to_string()),
        None => Err(GenerationError::MalformedContent {
            reason: format!(
                "reasoning block opened with {THINK_OPEN} but never closed ({} chars)",
                content.len()
            ),
        }),
    }
}

/// Separators treated as whitespace by the collapse phase: Unicode
/// whitespace plus the ASCII file, group, record and unit separators.
fn is_collapsible_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Collapse whitespace runs to single spaces, then put a blank line before
/// every line that starts with a heading marker.
pub fn format_markdown(content: &str) -> String {
    let collapsed = content
        .split(is_collapsible_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    collapsed
        .split('\n')
        .map(|line| {
            if line.starts_with('#') {
                format!("\n{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full cleanup applied to every backend response.
pub fn normalize_content(raw: &str) -> Result<String, GenerationError> {
    let stripped = strip_reasoning(raw)?;
    Ok(format_markdown(&stripped))
}
