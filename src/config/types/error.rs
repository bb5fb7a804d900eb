//! Configuration error types.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Why a configuration artifact could not be turned into a `SiteConfig`.
///
/// Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// Bad TOML syntax, a missing required key, or a value of the wrong shape.
    #[error("config schema error: {0}")]
    Toml(#[from] toml::de::Error),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

impl ConfigError {
    /// Field-level diagnostics, if this is a rule violation.
    pub fn diagnostics(&self) -> Option<&ConfigDiagnostics> {
        match self {
            Self::Diagnostics(diag) => Some(diag),
            _ => None,
        }
    }
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// A single configuration diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    /// Config field path (e.g., "sidebar")
    pub field: FieldPath,
    /// Element index for array fields.
    pub index: Option<usize>,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field,
            index: None,
            message: message.into(),
            hint: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// `sidebar[3]` for indexed diagnostics, `sidebar` otherwise.
    pub fn location(&self) -> String {
        match self.index {
            Some(index) => self.field.item(index),
            None => self.field.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.location().cyan(),
            "]".dimmed()
        )?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Everything found while checking one config file.
///
/// Errors make the load fail; warnings and unknown keys are printed and
/// the load goes on.
#[derive(Debug, Default, Clone)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<ConfigDiagnostic>,
    /// Keys present in the file but not part of the schema.
    unknown_fields: Vec<String>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic::new(field, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(ConfigDiagnostic::new(field, message).with_hint(hint));
    }

    /// Add a fully built error (indexed entries, optional hint).
    pub fn push_error(&mut self, diagnostic: ConfigDiagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push(ConfigDiagnostic::new(field, message));
    }

    pub fn push_warning(&mut self, diagnostic: ConfigDiagnostic) {
        self.warnings.push(diagnostic);
    }

    pub fn unknown_field(&mut self, path: impl Into<String>) {
        self.unknown_fields.push(path.into());
    }

    /// Print collected warnings and unknown keys in a grouped format.
    pub fn print_warnings(&self, file_name: &str) {
        if !self.unknown_fields.is_empty() {
            crate::log!("warning"; "unknown fields in {}, ignoring:", file_name);
            for field in &self.unknown_fields {
                eprintln!("- {field}");
            }
        }

        for warning in &self.warnings {
            crate::log!("warning"; "[{}] {}", warning.location(), warning.message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigDiagnostic] {
        &self.warnings
    }

    pub fn unknown_fields(&self) -> &[String] {
        &self.unknown_fields
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    const SIDEBAR: FieldPath = FieldPath::new("sidebar");

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("site.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("site.toml"));
        assert!(io_err.diagnostics().is_none());
    }

    #[test]
    fn test_indexed_location() {
        let diag = ConfigDiagnostic::new(SIDEBAR, "bad").at(3);
        assert_eq!(diag.location(), "sidebar[3]");
        assert_eq!(ConfigDiagnostic::new(SIDEBAR, "bad").location(), "sidebar");
    }

    #[test]
    fn test_errors_and_warnings_are_separate() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(SIDEBAR, "duplicate");
        diag.unknown_field("theme.color");
        assert!(!diag.has_errors());
        assert!(diag.is_empty());

        diag.error_with_hint(SIDEBAR, "missing slash", "write `/a`");
        assert!(diag.has_errors());
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.unknown_fields(), ["theme.color"]);
        assert_eq!(diag.errors()[0].hint.as_deref(), Some("write `/a`"));
    }

    #[test]
    fn test_display_lists_every_error() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(SIDEBAR, "first problem");
        diag.push_error(ConfigDiagnostic::new(SIDEBAR, "second problem").at(1));

        let display = format!("{diag}");
        assert!(display.contains("config validation failed"));
        assert!(display.contains("first problem"));
        assert!(display.contains("second problem"));
        assert!(display.contains("sidebar[1]"));
    }
}
