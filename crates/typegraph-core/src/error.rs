//! Error types and exit codes for typegraph
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (misconfigured or misused algorithm, bad flags)
//! - 3: Data error (missing node/edge/type/attribute, malformed stored data)

mod macros;

use thiserror::Error;

/// Exit codes for the typegraph CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - misuse of an algorithm or bad flags (2)
    Usage = 2,
    /// Data error - dangling ids, bad attributes (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while configuring or running graph algorithms
#[derive(Error, Debug)]
pub enum GraphError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("{algorithm} has already been run")]
    AlreadyRun { algorithm: &'static str },

    #[error("{algorithm} has not been run yet")]
    NotRun { algorithm: &'static str },

    #[error("cannot {operation}: {algorithm} configuration is frozen once running starts")]
    ConfigurationFrozen {
        algorithm: &'static str,
        operation: &'static str,
    },

    #[error("{algorithm} requires at least one allowed node type")]
    MissingNodeTypes { algorithm: &'static str },

    #[error("{algorithm} requires at least one allowed edge type")]
    MissingEdgeTypes { algorithm: &'static str },

    #[error("attribute name already in use: {name}")]
    AttributeInUse { name: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("node not found: {id}")]
    NodeNotFound { id: u64 },

    #[error("edge not found: {id}")]
    EdgeNotFound { id: u64 },

    #[error("{kind} type not found: {id}")]
    TypeNotFound { kind: &'static str, id: u32 },

    #[error("attribute not found: {name}")]
    AttributeNotFound { name: String },

    #[error("attribute {name} holds {found} values, expected {expected}")]
    AttributeTypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("node {id} was not part of the computed scope")]
    NotInScope { id: u64 },

    #[error("component attribute {name} is malformed: {reason}")]
    MalformedComponents { name: String, reason: String },

    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight { edge: u64, weight: f64 },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Iteration past the end
    #[error("no more elements in {algorithm}")]
    NoSuchElement { algorithm: &'static str },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl GraphError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GraphError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        GraphError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        GraphError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GraphError::FailedOperation {
            operation: format!("{} {}", operation, path),
            reason: error.to_string(),
        }
    }

    /// True for programmer misuse of an algorithm (as opposed to bad data)
    pub fn is_usage(&self) -> bool {
        self.exit_code() == ExitCode::Usage
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GraphError::UsageError(_)
            | GraphError::AlreadyRun { .. }
            | GraphError::NotRun { .. }
            | GraphError::ConfigurationFrozen { .. }
            | GraphError::MissingNodeTypes { .. }
            | GraphError::MissingEdgeTypes { .. }
            | GraphError::AttributeInUse { .. }
            | GraphError::InvalidValue { .. }
            | GraphError::NoSuchElement { .. } => ExitCode::Usage,

            GraphError::NodeNotFound { .. }
            | GraphError::EdgeNotFound { .. }
            | GraphError::TypeNotFound { .. }
            | GraphError::AttributeNotFound { .. }
            | GraphError::AttributeTypeMismatch { .. }
            | GraphError::NotInScope { .. }
            | GraphError::MalformedComponents { .. }
            | GraphError::NegativeWeight { .. }
            | GraphError::NotFound { .. }
            | GraphError::AlreadyExists { .. } => ExitCode::Data,

            GraphError::Io(_)
            | GraphError::Json(_)
            | GraphError::Toml(_)
            | GraphError::FailedOperation { .. }
            | GraphError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GraphError::UsageError(_) => "usage_error",
            GraphError::AlreadyRun { .. } => "already_run",
            GraphError::NotRun { .. } => "not_run",
            GraphError::ConfigurationFrozen { .. } => "configuration_frozen",
            GraphError::MissingNodeTypes { .. } => "missing_node_types",
            GraphError::MissingEdgeTypes { .. } => "missing_edge_types",
            GraphError::AttributeInUse { .. } => "attribute_in_use",
            GraphError::InvalidValue { .. } => "invalid_value",
            GraphError::NodeNotFound { .. } => "node_not_found",
            GraphError::EdgeNotFound { .. } => "edge_not_found",
            GraphError::TypeNotFound { .. } => "type_not_found",
            GraphError::AttributeNotFound { .. } => "attribute_not_found",
            GraphError::AttributeTypeMismatch { .. } => "attribute_type_mismatch",
            GraphError::NotInScope { .. } => "not_in_scope",
            GraphError::MalformedComponents { .. } => "malformed_components",
            GraphError::NegativeWeight { .. } => "negative_weight",
            GraphError::NotFound { .. } => "not_found",
            GraphError::AlreadyExists { .. } => "already_exists",
            GraphError::NoSuchElement { .. } => "no_such_element",
            GraphError::Io(_) => "io_error",
            GraphError::Json(_) => "json_error",
            GraphError::Toml(_) => "toml_error",
            GraphError::FailedOperation { .. } => "failed_operation",
            GraphError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for typegraph operations
pub type Result<T> = std::result::Result<T, GraphError>;
