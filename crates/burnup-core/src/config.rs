//! Report configuration: `burnup.toml` plus command-line overrides.
//!
//! The file is looked up at an explicit path, then `./burnup.toml`, then
//! `<user config dir>/burnup/config.toml`. Flags override file values
//! field by field, and [`ReportConfig::resolve`] checks the result.
//!
//! ```
//! use burnup_core::config::{ReportConfig, ReportOverrides};
//!
//! let config: ReportConfig = toml::from_str(
//!     r#"
//!     title = "Fall Sprint"
//!     scope = 40
//!
//!     [window]
//!     start = "2025-09-15"
//!     end = "2025-11-26"
//!     "#,
//! )
//! .expect("valid config");
//!
//! let resolved = config.resolve(&ReportOverrides::default()).expect("complete config");
//! assert_eq!(resolved.title, "Fall Sprint");
//! assert_eq!(resolved.window.end_day(), 72);
//! assert_eq!(resolved.scope.total(), 40);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Classify, ErrorCode};
use crate::report::{BreakInterval, ReportWindow, ScopeParseError, ScopeSpec, WindowError};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "burnup.toml";

pub const DEFAULT_TITLE: &str = "Burnup Chart";

/// Contents of `burnup.toml`. Every field is optional; command-line flags
/// fill in or override what the file leaves out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub scope: Option<ScopeValue>,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub break_start: Option<NaiveDate>,
    #[serde(default)]
    pub break_end: Option<NaiveDate>,
}

/// `scope = 40` or `scope = "0,10;30,+5"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeValue {
    Points(i64),
    Schedule(String),
}

/// Values given on the command line. `Some` wins over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOverrides {
    pub title: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub break_start: Option<NaiveDate>,
    pub break_end: Option<NaiveDate>,
    pub scope: Option<String>,
}

/// Fully validated report settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReport {
    pub title: String,
    pub window: ReportWindow,
    pub scope: ScopeSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("window {field} date is not set")]
    MissingWindow { field: &'static str },

    #[error("total scope is not set")]
    MissingScope,

    #[error("break needs both break_start and break_end")]
    PartialBreak,

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Scope(#[from] ScopeParseError),
}

impl Classify for ConfigError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingWindow { .. } => ErrorCode::MissingWindow,
            Self::MissingScope => ErrorCode::MissingScope,
            Self::PartialBreak => ErrorCode::InvalidWindow,
            Self::Window(e) => e.error_code(),
            Self::Scope(e) => e.error_code(),
        }
    }
}

/// Errors from reading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Classify for ConfigFileError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::ConfigParseError
    }
}

impl ReportConfig {
    /// Merge `overrides` over the file values and validate the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the window or scope is missing or
    /// invalid after merging.
    pub fn resolve(&self, overrides: &ReportOverrides) -> Result<ResolvedReport, ConfigError> {
        let title = overrides
            .title
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let start = overrides
            .start
            .or(self.window.start)
            .ok_or(ConfigError::MissingWindow { field: "start" })?;
        let end = overrides
            .end
            .or(self.window.end)
            .ok_or(ConfigError::MissingWindow { field: "end" })?;

        let break_interval = match (
            overrides.break_start.or(self.window.break_start),
            overrides.break_end.or(self.window.break_end),
        ) {
            (Some(start), Some(end)) => Some(BreakInterval { start, end }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialBreak),
        };
        let window = ReportWindow::new(start, end, break_interval)?;

        let scope: ScopeSpec = match (&overrides.scope, &self.scope) {
            (Some(raw), _) => raw.parse()?,
            (None, Some(ScopeValue::Schedule(raw))) => raw.parse()?,
            (None, Some(ScopeValue::Points(points))) => points.to_string().parse()?,
            (None, None) => return Err(ConfigError::MissingScope),
        };

        Ok(ResolvedReport {
            title,
            window,
            scope,
        })
    }
}

/// Read and parse one config file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid TOML for
/// [`ReportConfig`].
pub fn load_config(path: &Path) -> Result<ReportConfig, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<ReportConfig>(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the config file to use.
///
/// An explicit path always wins (even if missing, so the read error
/// surfaces). Otherwise `<cwd>/burnup.toml`, then
/// `<config_dir>/burnup/config.toml`.
#[must_use]
pub fn discover_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("burnup/config.toml");
    user.exists().then_some(user)
}

/// Discover and load the config, defaulting to an empty one when no file
/// is found.
///
/// # Errors
///
/// Propagates [`load_config`] failures for a discovered file.
pub fn load_report_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<ReportConfig, ConfigFileError> {
    match discover_config(explicit, cwd) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)
        }
        None => {
            debug!("no config file found; using flags only");
            Ok(ReportConfig::default())
        }
    }
}
