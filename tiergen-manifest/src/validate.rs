//! Validation of parsed configuration values.

use std::path::{Component, Path};

use miette::SourceSpan;

use crate::{Config, Error, Result};

/// Validate a parsed configuration against its source text.
pub(crate) fn validate_config(config: &Config, src: &str, filename: &str) -> Result<()> {
    if config.version != "1" {
        return Err(Error::validation(
            format!("unsupported configuration version '{}'", config.version),
            src,
            filename,
        ));
    }

    for (key, value) in config.paths.entries() {
        if let Some(reason) = invalid_path_reason(value) {
            let span = find_value_span(src, key, value);
            return Err(Error::invalid_path(key, value, reason, src, filename, span));
        }
    }

    Ok(())
}

/// Returns why `value` is unusable as an output directory, or `None` if valid.
pub(crate) fn invalid_path_reason(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("path is empty");
    }

    let path = Path::new(value);
    if path.is_absolute() || path.has_root() {
        return Some("path is absolute");
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Some("path leaves the project root");
    }

    None
}

/// Find the span of the quoted value assigned to `key`.
fn find_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let assigns_key = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if assigns_key {
            let quoted = format!("\"{value}\"");
            if let Some(pos) = line.find(&quoted) {
                // +1 to skip the opening quote
                return Some(SourceSpan::from((offset + pos + 1, value.len())));
            }
        }
        offset += line.len();
    }
    None
}
