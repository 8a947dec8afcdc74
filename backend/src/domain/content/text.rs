//! Field normalisation shared by every content draft.
//!
//! Blank text is stored as `NULL`, titles are bounded to 255 characters and
//! link fields must be absolute `http`/`https` URLs.

use std::sync::OnceLock;

use regex::Regex;

/// Upper bound for short text columns (`VARCHAR(255)`).
pub const SHORT_TEXT_MAX: usize = 255;

/// Validation failures raised while normalising a content draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be an absolute http or https URL")]
    InvalidUrl { field: &'static str },
}

impl ContentValidationError {
    /// Name of the offending field, for error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TooLong { field, .. } | Self::InvalidUrl { field } => field,
        }
    }
}

fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| {
        Regex::new(concat!(
            r"^https?://[^\s/?#]+\.[^\s/?#]+(?:[/?#]\S*)?$",
            r"|^https?://localhost(?::\d+)?(?:[/?#]\S*)?$",
        ))
        .unwrap_or_else(|error| panic!("url regex failed to compile: {error}"))
    })
}

/// Trim `value`, mapping blank input to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// [`optional_text`] plus a character limit.
pub fn bounded_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ContentValidationError> {
    let value = optional_text(value);
    match value {
        Some(text) if text.chars().count() > max => {
            Err(ContentValidationError::TooLong { field, max })
        }
        other => Ok(other),
    }
}

/// [`optional_text`] plus an absolute URL check.
pub fn optional_url(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, ContentValidationError> {
    let value = optional_text(value);
    match value {
        Some(url) if !url_regex().is_match(&url) => {
            Err(ContentValidationError::InvalidUrl { field })
        }
        other => Ok(other),
    }
}
