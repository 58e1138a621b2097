//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hcx_config::ConfigError;
use hcx_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const OPERATION_FAILED: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CONFIG: i32 = 9;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(hcx::connection_failed),
        help(
            "Check that the connector is running and reachable.\n\
             Appliances use self-signed certificates: try --insecure (-k)\n\
             or configure ca_cert in your profile.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("HCX API error: {message}")]
    #[diagnostic(code(hcx::api_error))]
    Api { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hcx::auth_failed),
        help(
            "Verify the credentials of profile '{profile}'.\n\
             Connector calls use HCX_USER/HCX_PASSWORD, admin calls\n\
             HCX_ADMIN_USER/HCX_ADMIN_PASSWORD, SDDC calls VMC_API_TOKEN."
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(hcx::no_credentials),
        help(
            "Configure credentials with: hcx config init --keyring\n\
             Or set HCX_USER and HCX_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{kind} '{identifier}' not found")]
    #[diagnostic(
        code(hcx::not_found),
        help("Names are matched exactly, including case.")
    )]
    NotFound { kind: String, identifier: String },

    #[error("Cannot assemble request: {message}")]
    #[diagnostic(code(hcx::composition))]
    Composition { message: String },

    #[error("HCX is already activated on SDDC {sddc}")]
    #[diagnostic(
        code(hcx::already_active),
        help("Deactivate first with: hcx vmc deactivate --id {sddc}")
    )]
    AlreadyActive { sddc: String },

    // ── Operations ───────────────────────────────────────────────────

    #[error("{operation} {id} failed: {reason}")]
    #[diagnostic(code(hcx::operation_failed))]
    OperationFailed {
        operation: String,
        id: String,
        reason: String,
    },

    #[error("{operation} {id} still running after {attempts} polls")]
    #[diagnostic(
        code(hcx::poll_limit),
        help("The operation may still finish; check the connector before retrying.")
    )]
    PollLimit {
        operation: String,
        id: String,
        attempts: u32,
    },

    #[error("{operation} cancelled")]
    #[diagnostic(code(hcx::cancelled))]
    Cancelled { operation: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hcx::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hcx::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hcx config init --name {name} --url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(hcx::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Cannot render output: {0}")]
    #[diagnostic(code(hcx::json))]
    Json(#[from] serde_json::Error),

    #[error("Cannot render output: {0}")]
    #[diagnostic(code(hcx::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::OperationFailed { .. } => exit_code::OPERATION_FAILED,
            Self::AlreadyActive { .. } => exit_code::CONFLICT,
            Self::PollLimit { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::Composition { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } => exit_code::CONFIG,
            Self::Config(_) => exit_code::CONFIG,
            Self::Cancelled { .. } => exit_code::CANCELLED,
            Self::Api { .. } | Self::Io(_) | Self::Json(_) | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        // The step chain reads as "outer: inner: cause" and is kept for the
        // generic variants; typed variants use the root cause alone.
        let full = err.to_string();
        match err.root_cause() {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url: url.clone(),
                reason: reason.clone(),
            },
            CoreError::Authentication { message } => CliError::AuthFailed {
                profile: "current".into(),
                message: message.clone(),
            },
            CoreError::NotFound { kind, identifier } => CliError::NotFound {
                kind: kind.clone(),
                identifier: identifier.clone(),
            },
            CoreError::Composition { message } => CliError::Composition {
                message: message.clone(),
            },
            CoreError::AlreadyActive { sddc } => CliError::AlreadyActive { sddc: sddc.clone() },
            CoreError::OperationFailed {
                operation,
                id,
                reason,
            } => CliError::OperationFailed {
                operation: operation.clone(),
                id: id.clone(),
                reason: reason.clone(),
            },
            CoreError::PollLimitReached {
                operation,
                id,
                attempts,
            } => CliError::PollLimit {
                operation: operation.clone(),
                id: id.clone(),
                attempts: *attempts,
            },
            CoreError::Cancelled { operation } => CliError::Cancelled {
                operation: operation.clone(),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "input".into(),
                reason: message.clone(),
            },
            CoreError::Transport { .. }
            | CoreError::RetriesExhausted { .. }
            | CoreError::Context { .. } => CliError::Api { message: full },
        }
    }
}
