//! Error types and exit codes for marksheet
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, unusable spreadsheet, unknown weights)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

use crate::apportion::ApportionError;

/// Exit codes for the marksheet CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for MarksheetError {
    fn from(err: rusqlite::Error) -> Self {
        MarksheetError::Other(err.to_string())
    }
}

impl From<calamine::Error> for MarksheetError {
    fn from(err: calamine::Error) -> Self {
        MarksheetError::Spreadsheet(err.to_string())
    }
}

/// Errors that can occur during marksheet operations
#[derive(Error, Debug)]
pub enum MarksheetError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    #[error("spreadsheet missing required columns: {}", missing.join(", "))]
    MissingRequiredColumns { missing: Vec<String> },

    #[error("no weight configuration for phase {phase} review {review}")]
    UnknownWeightConfig { phase: u32, review: u32 },

    #[error("malformed marks in column {field:?}: {value:?}")]
    MalformedMarkValue { field: String, value: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("unreadable spreadsheet: {0}")]
    Spreadsheet(String),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("apportionment defect: {0}")]
    Apportionment(#[from] ApportionError),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl MarksheetError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        MarksheetError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed transaction operation
    pub fn transaction(operation: &str, error: impl std::fmt::Display) -> Self {
        MarksheetError::FailedOperation {
            operation: format!("{} transaction", operation),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        MarksheetError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        MarksheetError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a cell that should hold a mark but does not
    pub fn malformed_mark(field: &str, value: impl std::fmt::Display) -> Self {
        MarksheetError::MalformedMarkValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// True for errors that only disqualify a single spreadsheet row
    pub fn is_row_level(&self) -> bool {
        matches!(self, MarksheetError::MalformedMarkValue { .. })
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            MarksheetError::UnknownFormat(_)
            | MarksheetError::UsageError(_)
            | MarksheetError::InvalidValue { .. } => ExitCode::Usage,

            MarksheetError::StoreNotFound { .. }
            | MarksheetError::InvalidStore { .. }
            | MarksheetError::MissingRequiredColumns { .. }
            | MarksheetError::UnknownWeightConfig { .. }
            | MarksheetError::MalformedMarkValue { .. }
            | MarksheetError::NotFound { .. }
            | MarksheetError::Spreadsheet(_) => ExitCode::Data,

            MarksheetError::Io(_)
            | MarksheetError::Json(_)
            | MarksheetError::Toml(_)
            | MarksheetError::Csv(_)
            | MarksheetError::Apportionment(_)
            | MarksheetError::FailedOperation { .. }
            | MarksheetError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            MarksheetError::UnknownFormat(_) => "unknown_format",
            MarksheetError::UsageError(_) => "usage_error",
            MarksheetError::InvalidValue { .. } => "invalid_value",
            MarksheetError::StoreNotFound { .. } => "store_not_found",
            MarksheetError::InvalidStore { .. } => "invalid_store",
            MarksheetError::MissingRequiredColumns { .. } => "missing_required_columns",
            MarksheetError::UnknownWeightConfig { .. } => "unknown_weight_config",
            MarksheetError::MalformedMarkValue { .. } => "malformed_mark_value",
            MarksheetError::NotFound { .. } => "not_found",
            MarksheetError::Spreadsheet(_) => "spreadsheet_error",
            MarksheetError::Io(_) => "io_error",
            MarksheetError::Json(_) => "json_error",
            MarksheetError::Toml(_) => "toml_error",
            MarksheetError::Csv(_) => "csv_error",
            MarksheetError::Apportionment(_) => "apportionment_defect",
            MarksheetError::FailedOperation { .. } => "failed_operation",
            MarksheetError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let MarksheetError::MissingRequiredColumns { missing } = self {
            error_obj["missing"] = serde_json::json!(missing);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for marksheet operations
pub type Result<T> = std::result::Result<T, MarksheetError>;
