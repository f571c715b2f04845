// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment errors into miette diagnostics, and renders unknown
//! plugin names with "did you mean?" suggestions using Jaro-Winkler string
//! similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `mfe` -> `mfe2` or `indigio` -> `indigo`
/// while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(patchbay::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// The key with the wrong type.
        key: String,
        /// Description of the type mismatch.
        detail: String,
        /// What type was expected.
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(patchbay::config::missing_key),
        help("add `{key} = <value>` to your config.toml")
    )]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// A plugin name that no installed source provides.
    #[error("plugin `{name}` is not installed")]
    #[diagnostic(
        code(patchbay::plugins::not_installed),
        help("{}", format_unknown_plugin_help(suggestion.as_deref(), installed))
    )]
    UnknownPlugin {
        /// The requested plugin name.
        name: String,
        /// Closest installed plugin name, if any.
        suggestion: Option<String>,
        /// Comma-separated list of installed plugins.
        installed: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(patchbay::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(patchbay::config::other))]
    Other(String),
}

impl ConfigError {
    /// Build an [`ConfigError::UnknownPlugin`] with a suggestion drawn from
    /// the installed plugin names.
    pub fn unknown_plugin(name: &str, installed: &[&str]) -> Self {
        ConfigError::UnknownPlugin {
            name: name.to_string(),
            suggestion: suggest_key(name, installed),
            installed: installed.join(", "),
        }
    }
}

fn format_unknown_plugin_help(suggestion: Option<&str>, installed: &str) -> String {
    match (suggestion, installed.is_empty()) {
        (Some(s), _) => format!("did you mean `{s}`? Installed plugins: {installed}"),
        (None, true) => "no plugins are installed".to_string(),
        (None, false) => format!("installed plugins: {installed}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// Iterates through all errors in the figment error (which may contain
/// multiple).
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let config_error = match &error.kind {
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => {
                let key = error
                    .path
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(".");
                ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// no candidate is close enough.
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

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_close_plugin_name() {
        let installed = &["indigo", "mfe", "android"];
        assert_eq!(
            suggest_key("indigio", installed),
            Some("indigo".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_name() {
        let installed = &["indigo", "mfe", "android"];
        assert_eq!(suggest_key("zzzzzz", installed), None);
    }

    #[test]
    fn unknown_plugin_help_lists_installed() {
        let err = ConfigError::unknown_plugin("indigio", &["indigo", "mfe"]);
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("did you mean `indigo`"));
        assert!(help.contains("indigo, mfe"));
    }

    #[test]
    fn unknown_plugin_help_without_installed_plugins() {
        let err = ConfigError::unknown_plugin("demo", &[]);
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert_eq!(help, "no plugins are installed");
    }

    #[test]
    fn toml_syntax_error_becomes_other() {
        let err = crate::loader::load_config_from_str("PLUGINS = [").unwrap_err();
        let errors = figment_to_config_errors(err);
        assert!(!errors.is_empty());
        assert!(matches!(errors[0], ConfigError::Other(_)));
    }
}
