use std::fmt;

use serde::{Deserialize, Serialize};
pub use text_size::{TextRange, TextSize};

/// Numeric identifier of a diagnostic, rendered as `VD0042`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiagnosticCode(pub u16);

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VD{:04}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hidden => "hidden",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A diagnostic attached to a green element.
///
/// `offset` and `width` are relative to the start of the element's full span,
/// leading trivia included. Message text is produced elsewhere from `code` and
/// `arguments`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyntaxDiagnostic {
    code: DiagnosticCode,
    severity: Severity,
    offset: TextSize,
    width: TextSize,
    arguments: Vec<Box<str>>,
}

impl SyntaxDiagnostic {
    pub fn new(code: DiagnosticCode, severity: Severity, offset: TextSize, width: TextSize) -> Self {
        Self { code, severity, offset, width, arguments: Vec::new() }
    }

    pub fn error(code: DiagnosticCode, offset: TextSize, width: TextSize) -> Self {
        Self::new(code, Severity::Error, offset, width)
    }

    pub fn warning(code: DiagnosticCode, offset: TextSize, width: TextSize) -> Self {
        Self::new(code, Severity::Warning, offset, width)
    }

    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<Box<str>>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn offset(&self) -> TextSize {
        self.offset
    }

    pub fn width(&self) -> TextSize {
        self.width
    }

    pub fn arguments(&self) -> &[Box<str>] {
        &self.arguments
    }

    /// Resolves the diagnostic against the absolute start of its element.
    pub fn range_at(&self, element_start: TextSize) -> TextRange {
        TextRange::at(element_start + self.offset, self.width)
    }
}

impl fmt::Display for SyntaxDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity, self.code)?;
        if !self.arguments.is_empty() {
            f.write_str(" (")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(argument)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
