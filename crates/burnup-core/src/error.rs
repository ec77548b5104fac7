//! Error codes shared by every failure the tool reports.
//!
//! Library errors stay typed per concern and implement [`Classify`] so the
//! CLI can print a stable code and a hint:
//!
//! ```
//! use burnup_core::error::ErrorCode;
//!
//! assert_eq!(ErrorCode::MissingScope.code(), "E1003");
//! assert!(ErrorCode::MissingScope.hint().is_some());
//! ```

use std::fmt;

/// Machine-readable error codes for structured CLI error output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    MissingWindow,
    MissingScope,
    InvalidWindow,
    InvalidScopeSchedule,
    ExportReadFailed,
    ExportDecodeFailed,
    OutputWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::MissingWindow => "E1002",
            Self::MissingScope => "E1003",
            Self::InvalidWindow => "E1004",
            Self::InvalidScopeSchedule => "E1005",
            Self::ExportReadFailed => "E2001",
            Self::ExportDecodeFailed => "E2002",
            Self::OutputWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::MissingWindow => "Reporting window not configured",
            Self::MissingScope => "Scope not configured",
            Self::InvalidWindow => "Invalid reporting window",
            Self::InvalidScopeSchedule => "Invalid scope schedule",
            Self::ExportReadFailed => "Board export could not be read",
            Self::ExportDecodeFailed => "Board export could not be decoded",
            Self::OutputWriteFailed => "Chart data write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in burnup.toml and retry."),
            Self::MissingWindow => Some(
                "Pass --start and --end, or set [window] start/end in burnup.toml.",
            ),
            Self::MissingScope => Some("Pass --scope, or set scope in burnup.toml."),
            Self::InvalidWindow => Some(
                "The end must follow the start and the break must lie inside the window.",
            ),
            Self::InvalidScopeSchedule => {
                Some("Use `day,value[;day,value...]` where value is N, +N or -N.")
            }
            Self::ExportReadFailed => Some("Check the export path and read permissions."),
            Self::ExportDecodeFailed => {
                Some("Re-export the board as JSON; only the board export format is supported.")
            }
            Self::OutputWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that carry an [`ErrorCode`] classification.
pub trait Classify {
    /// The code the CLI reports for this error.
    fn error_code(&self) -> ErrorCode;
}
