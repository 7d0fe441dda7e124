// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with "did you mean" suggestions.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a key to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error rendered through miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(trivia::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(trivia::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("invalid value for key `{key}`: {detail}")]
    #[diagnostic(code(trivia::config::invalid_value))]
    InvalidValue {
        key: String,
        detail: String,
        #[label("unsupported value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(trivia::config::missing_key),
        help("add `{key} = <value>` to your trivia.toml")
    )]
    MissingKey { key: String },

    #[error("validation error: {message}")]
    #[diagnostic(code(trivia::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(trivia::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

fn error_path(error: &figment::error::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
                let (span, src) = locate(&error, &section, field, toml_sources);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error_path(&error),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            Kind::UnknownVariant(variant, expected) => {
                // The path ends with the offending key, e.g. `storage.backend`.
                let (span, src) = match error.path.split_last() {
                    Some((key, section)) => locate(&error, section, key, toml_sources),
                    None => (None, None),
                };
                ConfigError::InvalidValue {
                    key: error_path(&error),
                    detail: format!("`{variant}` is not one of {}", expected.join(", ")),
                    span,
                    src,
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Span of `field` under `section` in whichever loaded TOML source produced
/// `error`. Both halves are `None` when the key cannot be found.
fn locate(
    error: &figment::error::Error,
    section: &[String],
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some((path, content)) = error_source(error, toml_sources) else {
        return (None, None);
    };
    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// The `(path, content)` pair an error came from. Inline strings carry no
/// file path, so a lone source is assumed to be the one.
fn error_source<'a>(
    error: &figment::error::Error,
    toml_sources: &'a [(String, String)],
) -> Option<&'a (String, String)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });
    match file {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    }
}

/// Byte offset of `field` in TOML `content`, searched after the `[section]`
/// header named by `path[0]` (or from the start for top-level keys).
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header).map(|pos| pos + header.len())?
        }
    };

    let remaining = &content[search_start..];
    let mut byte_offset = 0;
    for line in remaining.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field)
            && (after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t'))
        {
            let field_start_in_line = line.len() - trimmed.len();
            return Some(search_start + byte_offset + field_start_in_line);
        }
        byte_offset += line.len();
    }

    None
}

/// Best Jaro-Winkler match for `unknown` among `valid_keys`, if close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render every diagnostic into one report with `handler`.
pub fn render_report(errors: &[ConfigError], handler: &miette::GraphicalReportHandler) -> String {
    errors
        .iter()
        .map(|error| {
            let mut out = String::new();
            match handler.render_report(&mut out, error as &dyn Diagnostic) {
                Ok(()) => out,
                Err(_) => format!("Error: {error}\n"),
            }
        })
        .collect()
}

/// Print configuration errors to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    eprint!(
        "{}",
        render_report(errors, &miette::GraphicalReportHandler::new())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_max_attempts_for_typo() {
        let valid = &["expire_sec", "max_attempts", "delay_ms"];
        assert_eq!(
            suggest_key("max_atempts", valid),
            Some("max_attempts".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["name", "log_level", "trace_states"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[bot]\nname = \"a\"\n\n[lock]\ndelay_mss = 5\n";
        let path = vec!["lock".to_string()];
        let o = find_key_offset(content, &path, "delay_mss").unwrap();
        assert_eq!(&content[o..o + 9], "delay_mss");
    }

    #[test]
    fn unsupported_backend_points_at_its_key() {
        let content = "[storage]\nbackend = \"redis\"\n";
        let err = crate::loader::load_config_from_str(content).unwrap_err();
        let errors = figment_to_config_errors(err, &[("trivia.toml".into(), content.into())]);

        let ConfigError::InvalidValue { key, span, src, .. } = &errors[0] else {
            panic!("expected InvalidValue, got {errors:?}");
        };
        assert_eq!(key, "storage.backend");
        let span = span.expect("span for the backend key");
        assert_eq!(&content[span.offset()..span.offset() + span.len()], "backend");
        assert!(src.is_some());
    }

    #[test]
    fn report_names_key_and_suggestion() {
        let content = "[lock]\nmax_atempts = 3\n";
        let err = crate::loader::load_config_from_str(content).unwrap_err();
        let errors = figment_to_config_errors(err, &[("trivia.toml".into(), content.into())]);
        let handler = miette::GraphicalReportHandler::new_themed(
            miette::GraphicalTheme::unicode_nocolor(),
        );

        let report = render_report(&errors, &handler);
        assert!(report.contains("max_atempts"));
        assert!(report.contains("did you mean `max_attempts`?"));
    }

    #[test]
    fn find_key_offset_missing_section() {
        let content = "[bot]\nname = \"a\"\n";
        let path = vec!["lock".to_string()];
        assert_eq!(find_key_offset(content, &path, "name"), None);
    }
}
