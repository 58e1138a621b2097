use reqwest::StatusCode;
use secrecy::SecretString;

/// Header carrying the bearer token on the connector and HCX cloud backends.
pub const TOKEN_HEADER: &str = "x-hm-authorization";

/// Which backend (and therefore which credential material) a call targets.
///
/// Marker enum (no data) -- the secrets live in [`SessionCredentials`].
/// Each variant has its own accepted-status set; anything outside it is
/// reported as [`Error::UnexpectedStatus`](crate::Error::UnexpectedStatus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    /// Connector application API -- token from `POST /hybridity/api/sessions`.
    Consumer,
    /// Appliance admin API on port 9443 -- HTTP basic auth.
    Admin,
    /// Cloud-services API -- token from the cloud session flow, when present.
    Cloud,
    /// Cloud token exchange and session login. Nothing is attached: the
    /// secret travels in the request itself, and a held HCX cloud token
    /// must never reach the token-exchange host.
    CloudLogin,
}

impl AuthKind {
    /// Whether `status` counts as success for this backend.
    pub fn accepts(self, status: StatusCode) -> bool {
        match self {
            Self::Consumer | Self::Cloud | Self::CloudLogin => {
                status == StatusCode::OK || status == StatusCode::ACCEPTED
            }
            Self::Admin => {
                status == StatusCode::OK
                    || status == StatusCode::ACCEPTED
                    || status == StatusCode::NO_CONTENT
            }
        }
    }
}

/// A username/password pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// All credential material one session may use.
///
/// The three sets are disjoint: consumer credentials never reach the admin
/// API and vice versa.
#[derive(Debug, Clone, Default)]
pub struct SessionCredentials {
    /// vCenter/SSO user for the connector session login.
    pub consumer: Option<Credentials>,
    /// Appliance admin user for port 9443.
    pub admin: Option<Credentials>,
    /// Cloud-services refresh token (API token) for SDDC management.
    pub cloud_refresh_token: Option<SecretString>,
}
