// ── Core error types ──
//
// Orchestration errors from hcx-core. Consumers see the failure class
// (transport, authentication, not found, failed operation, composition)
// and the identifier involved, never raw reqwest or serde errors. The
// `From<hcx_api::Error>` impl translates transport-layer errors.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("HCX API error: {message}")]
    Transport { message: String, status: Option<u16> },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Resolution errors ────────────────────────────────────────────
    #[error("{kind} not found: {identifier}")]
    NotFound { kind: String, identifier: String },

    /// A cross-reference needed to build a request body is missing.
    #[error("Cannot assemble request: {message}")]
    Composition { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{operation} {id} failed: {reason}")]
    OperationFailed {
        operation: String,
        id: String,
        reason: String,
    },

    #[error("HCX is already activated on SDDC {sddc}")]
    AlreadyActive { sddc: String },

    #[error("{operation} cancelled")]
    Cancelled { operation: String },

    #[error("{operation} gave up after {attempts} failed attempts: {source}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: Box<CoreError>,
    },

    #[error("{operation} {id} not finished after {attempts} polls")]
    PollLimitReached {
        operation: String,
        id: String,
        attempts: u32,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Names the sub-step of a composite operation that failed.
    #[error("{step}: {source}")]
    Context {
        step: String,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    pub(crate) fn not_found(kind: impl ToString, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            identifier: identifier.into(),
        }
    }

    /// The innermost error, skipping step context and retry wrappers.
    pub fn root_cause(&self) -> &CoreError {
        match self {
            Self::Context { source, .. } | Self::RetriesExhausted { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Returns `true` if a lookup found no match.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound { .. })
    }

    /// Returns `true` if the error is an authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.root_cause(), Self::Authentication { .. })
    }

    /// HTTP status of the underlying response, if any.
    pub fn status(&self) -> Option<u16> {
        match self.root_cause() {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hcx_api::Error> for CoreError {
    fn from(err: hcx_api::Error) -> Self {
        match err {
            hcx_api::Error::Authentication { message } => CoreError::Authentication { message },
            hcx_api::Error::MissingAdminCredentials | hcx_api::Error::MissingToken { .. } => {
                CoreError::Authentication {
                    message: err.to_string(),
                }
            }
            hcx_api::Error::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.origin().ascii_serialization())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else if e.is_timeout() {
                    CoreError::Transport {
                        message: "request timed out".into(),
                        status: None,
                    }
                } else {
                    CoreError::Transport {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            hcx_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hcx_api::Error::InvalidBaseUrl { url } => CoreError::Config {
                message: format!("URL cannot be used as an HCX host: {url}"),
            },
            hcx_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            hcx_api::Error::UnexpectedStatus {
                status: status @ (401 | 403),
                url,
                ..
            } => CoreError::Authentication {
                message: format!("HTTP {status} from {url}"),
            },
            hcx_api::Error::UnexpectedStatus { status, url, body } => CoreError::Transport {
                message: format!("HTTP {status} from {url}: {body}"),
                status: Some(status),
            },
            hcx_api::Error::Deserialization { message, body: _ } => CoreError::Transport {
                message: format!("unexpected response body: {message}"),
                status: None,
            },
        }
    }
}

// ── Step context ─────────────────────────────────────────────────────

/// Attach the name of the failing sub-step to an error.
pub trait ErrorContext<T> {
    fn context(self, step: &str) -> Result<T, CoreError>;

    fn with_context<F: FnOnce() -> String>(self, step: F) -> Result<T, CoreError>;
}

impl<T, E: Into<CoreError>> ErrorContext<T> for Result<T, E> {
    fn context(self, step: &str) -> Result<T, CoreError> {
        self.map_err(|e| CoreError::Context {
            step: step.to_owned(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F: FnOnce() -> String>(self, step: F) -> Result<T, CoreError> {
        self.map_err(|e| CoreError::Context {
            step: step(),
            source: Box::new(e.into()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_root_cause() {
        let result: Result<(), CoreError> = Err(CoreError::not_found("cluster", "Cluster-1"));
        let err = result.context("resolving cluster").unwrap_err();

        assert_eq!(err.to_string(), "resolving cluster: cluster not found: Cluster-1");
        assert!(err.is_not_found());
    }

    #[test]
    fn forbidden_status_maps_to_authentication() {
        let err = CoreError::from(hcx_api::Error::UnexpectedStatus {
            status: 403,
            url: "https://hcx.local/hybridity/api/jobs/1".into(),
            body: String::new(),
        });
        assert!(err.is_auth_error());
    }

    #[test]
    fn server_error_keeps_status() {
        let err = CoreError::from(hcx_api::Error::UnexpectedStatus {
            status: 502,
            url: "https://connect.hcx.vmware.com/api/sddcs".into(),
            body: "<html>proxy error</html>".into(),
        });
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_not_found());
    }
}
