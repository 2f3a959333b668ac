//! Schema validation error types.

use owo_colors::OwoColorize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// SchemaError
// ============================================================================

/// Errors produced while turning raw CMS payloads into typed documents
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("payload is not valid JSON")]
    Json(#[from] serde_json::Error),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Mismatch(SchemaDiagnostics),
}

// ============================================================================
// SchemaDiagnostic
// ============================================================================

/// A single field-level validation failure
#[derive(Debug, Clone)]
pub struct SchemaDiagnostic {
    /// Field path into the raw payload (e.g., "data.body[3].primary.heading")
    pub path: String,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl SchemaDiagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.path.cyan(),
            "]".dimmed()
        )?;
        // Error message with red bullet
        write!(f, "{} {}", "→".red(), self.message)?;
        // Hint in yellow
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// SchemaDiagnostics
// ============================================================================

/// Aggregate of every field path that failed validation.
///
/// Validation never stops at the first bad field - a caller gets all
/// problems in one pass.
#[derive(Debug, Default, Clone)]
pub struct SchemaDiagnostics {
    errors: Vec<SchemaDiagnostic>,
}

impl SchemaDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(SchemaDiagnostic::new(path, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(SchemaDiagnostic::new(path, message).with_hint(hint));
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

    pub fn errors(&self) -> &[SchemaDiagnostic] {
        &self.errors
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for SchemaDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "document validation failed:".red().bold())?;
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

impl std::error::Error for SchemaDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_aggregate() {
        let mut diag = SchemaDiagnostics::new();
        diag.error("data.title", "required string is missing");
        diag.error_with_hint(
            "data.body[0].slice_type",
            "unknown slice type `banner`",
            "known types: hero, metrics, quote, ...",
        );

        assert_eq!(diag.len(), 2);
        let display = format!("{diag}");
        assert!(display.contains("data.title"));
        assert!(display.contains("data.body[0].slice_type"));
        assert!(display.contains("2"));
    }

    #[test]
    fn test_into_result() {
        assert!(SchemaDiagnostics::new().into_result().is_ok());

        let mut diag = SchemaDiagnostics::new();
        diag.error("id", "required string is missing");
        assert!(diag.into_result().is_err());
    }

    #[test]
    fn test_schema_error_display() {
        let mut diag = SchemaDiagnostics::new();
        diag.error("data.year", "expected a number, found a string");
        let err = SchemaError::Mismatch(diag);
        let display = format!("{err}");
        assert!(display.contains("data.year"));
    }
}
