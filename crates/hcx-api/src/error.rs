use thiserror::Error;

/// Top-level error type for the `hcx-api` crate.
///
/// Covers every failure mode across the three backends: the connector
/// session API, the admin API on port 9443 and the cloud-services API.
/// `hcx-core` maps these into its orchestration error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected, or the login handshake could not complete.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An admin API call was attempted without admin credentials.
    #[error("admin_username or admin_password is empty")]
    MissingAdminCredentials,

    /// A login response was accepted but carried no token header.
    #[error("Response carried no `{header}` token")]
    MissingToken { header: &'static str },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The host URL cannot be used as a base (no host, or no port allowed).
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The backend answered with a status outside its accepted set.
    #[error("Unexpected HTTP {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error came from credential handling rather
    /// than from the network.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::MissingAdminCredentials | Self::MissingToken { .. }
        ) || matches!(self, Self::UnexpectedStatus { status: 401 | 403, .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::UnexpectedStatus { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
