//! Diagnostic rendering for emission errors.
//!
//! Wraps [`EmitError`] values in rich diagnostics with source context:
//! terminal output with colors for humans, and a JSON form for IDE
//! integration.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use ridl_schema::Span;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::EmitError;

/// Error code for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    /// The code as text
    pub fn as_str(&self) -> &str {
        self.0
    }
}

/// A diagnostic message with source code context
pub struct Diagnostic {
    /// The underlying codespan diagnostic
    inner: CsDiagnostic<usize>,
    /// Error code (e.g., "E0101")
    code: Option<ErrorCode>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(severity).with_message(message),
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a bug diagnostic (internal invariant violations)
    pub fn bug(message: impl Into<String>) -> Self {
        Self::new(Severity::Bug, message)
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code.clone());
        self.inner = self.inner.with_code(code.0);
        self
    }

    /// Add a primary label (main error location)
    pub fn with_primary_label(
        mut self,
        file_id: usize,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let label = Label::primary(file_id, span.start..span.end).with_message(message);
        self.inner.labels.push(label);
        self
    }

    /// Add a note (additional context)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Create a diagnostic from an [`EmitError`].
    ///
    /// `file_id` must identify the offending unit's source in `files`; for
    /// `Internal` errors (which carry no user location) it is unused.
    pub fn from_emit_error(error: &EmitError, file_id: usize) -> Self {
        use EmitError::*;

        match error {
            InvalidLiteral {
                expected,
                literal,
                loc,
            } => Diagnostic::error(format!("invalid {} constant {}", expected, literal))
                .with_code(error_code(error))
                .with_primary_label(file_id, loc.span, format!("not a valid {} value", expected)),

            UnresolvedReference {
                name,
                expected,
                loc,
            } => Diagnostic::error(format!("cannot resolve '{}'", name))
                .with_code(error_code(error))
                .with_primary_label(file_id, loc.span, "not found")
                .with_note(format!(
                    "no enum member or constant of type {} matches '{}'",
                    expected, name
                )),

            UnresolvedEnumMember {
                enum_name,
                value,
                loc,
            } => Diagnostic::error(format!(
                "no member of enum {} with value {}",
                enum_name, value
            ))
            .with_code(error_code(error))
            .with_primary_label(file_id, loc.span, "not a member")
            .with_help(format!("check the members declared by {}", enum_name)),

            Unsupported { construct, loc } => {
                Diagnostic::error(format!("{} are not supported", construct))
                    .with_code(error_code(error))
                    .with_primary_label(file_id, loc.span, "unsupported construct")
                    .with_note("this is a known limitation, not a malformed declaration")
            }

            Internal { message } => Diagnostic::bug(format!(
                "internal invariant violated: {}",
                message
            ))
            .with_code(error_code(error))
            .with_note("this indicates a compiler defect; please report it"),
        }
    }

    /// Emit the diagnostic to stderr with colors
    pub fn emit(
        &self,
        files: &SimpleFiles<String, String>,
    ) -> Result<(), codespan_reporting::files::Error> {
        let mut writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        term::emit(&mut writer, &config, files, &self.inner)
    }

    /// Get the underlying codespan diagnostic (for testing/custom rendering)
    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }

    /// Convert to JSON representation for IDE integration
    pub fn to_json(
        &self,
        files: &SimpleFiles<String, String>,
    ) -> Result<String, serde_json::Error> {
        let json_diag = JsonDiagnostic::from_diagnostic(self, files);
        serde_json::to_string_pretty(&json_diag)
    }
}

/// JSON representation of a diagnostic for IDE integration
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Error code (e.g., "E0101")
    pub code: Option<String>,
    /// Severity level
    pub severity: String,
    /// Main error message
    pub message: String,
    /// Source locations with labels
    pub labels: Vec<JsonLabel>,
    /// Additional notes and help
    pub notes: Vec<String>,
}

/// JSON representation of a diagnostic label
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLabel {
    /// File path
    pub file: String,
    /// Start line (1-indexed)
    pub start_line: usize,
    /// Start column (1-indexed)
    pub start_column: usize,
    /// End line (1-indexed)
    pub end_line: usize,
    /// End column (1-indexed)
    pub end_column: usize,
    /// Label message
    pub message: Option<String>,
    /// Label style (primary or secondary)
    pub style: String,
}

impl JsonDiagnostic {
    /// Convert a Diagnostic to JSON representation
    pub fn from_diagnostic(diag: &Diagnostic, files: &SimpleFiles<String, String>) -> Self {
        let severity = match diag.inner.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Help => "help",
            Severity::Bug => "bug",
        };

        let labels = diag
            .inner
            .labels
            .iter()
            .filter_map(|label| {
                let file_id = label.file_id;
                let file_name = files.get(file_id).ok()?.name().to_string();

                let start = files.get(file_id).ok()?.location((), label.range.start).ok()?;
                let end = files.get(file_id).ok()?.location((), label.range.end).ok()?;

                Some(JsonLabel {
                    file: file_name,
                    start_line: start.line_number,
                    start_column: start.column_number,
                    end_line: end.line_number,
                    end_column: end.column_number,
                    message: Some(label.message.clone()),
                    style: match label.style {
                        codespan_reporting::diagnostic::LabelStyle::Primary => "primary",
                        codespan_reporting::diagnostic::LabelStyle::Secondary => "secondary",
                    }
                    .to_string(),
                })
            })
            .collect();

        JsonDiagnostic {
            code: diag.code.as_ref().map(|c| c.0.to_string()),
            severity: severity.to_string(),
            message: diag.inner.message.clone(),
            labels,
            notes: diag.inner.notes.clone(),
        }
    }
}

/// Get the error code for an [`EmitError`]
pub fn error_code(error: &EmitError) -> ErrorCode {
    use EmitError::*;

    match error {
        InvalidLiteral { .. } => ErrorCode("E0101"),
        UnresolvedReference { .. } => ErrorCode("E0102"),
        UnresolvedEnumMember { .. } => ErrorCode("E0103"),
        Unsupported { .. } => ErrorCode("E0104"),
        Internal { .. } => ErrorCode("E0105"),
    }
}

/// Helper to create a SimpleFiles instance from source code
pub fn create_files(path: impl Into<PathBuf>, source: impl Into<String>) -> SimpleFiles<String, String> {
    let mut files = SimpleFiles::new();
    files.add(path.into().display().to_string(), source.into());
    files
}
