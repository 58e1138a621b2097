// Connector session login
//
// `POST /hybridity/api/sessions` issues the bearer token returned in the
// `x-hm-authorization` header. Right after appliance deployment the SSO
// service may not have its trusted roots yet; the login endpoint then
// answers with an XML error-entry list, and login is retried until the
// condition clears.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::auth::{AuthKind, TOKEN_HEADER};
use crate::client::HcxClient;
use crate::error::Error;

/// Message text the login endpoint returns while SSO trust is not configured.
pub const TRUSTED_ROOT_CERTIFICATES_PENDING: &str =
    "'Trusted root certificates' value should not be empty";

/// Mutable per-session state, guarded by the client's mutex.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub token: Option<SecretString>,
    pub cloud_token: Option<SecretString>,
    pub authenticated: bool,
}

/// Timing of the login handshake.
#[derive(Debug, Clone)]
pub struct LoginPolicy {
    /// Pause between logins while trusted root certificates are pending.
    pub certificate_wait: Duration,
    /// Upper bound on certificate waits. `None` waits forever.
    pub max_certificate_waits: Option<u32>,
    /// Pause before the single retry of a login that failed in transport.
    pub transport_retry_delay: Duration,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            certificate_wait: Duration::from_secs(10),
            max_certificate_waits: None,
            transport_retry_delay: Duration::from_secs(180),
        }
    }
}

/// One `<entry>` of the XML error body: `<string>key</string><string>value</string>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginErrorEntry {
    pub key: String,
    pub value: String,
}

#[derive(Deserialize)]
struct XmlEntries {
    #[serde(rename = "entry", default)]
    entries: Vec<XmlEntry>,
}

#[derive(Deserialize)]
struct XmlEntry {
    #[serde(rename = "string", default)]
    strings: Vec<String>,
}

/// Parse the XML error-entry list the login endpoint returns on rejection.
pub fn parse_login_errors(body: &str) -> Result<Vec<LoginErrorEntry>, quick_xml::DeError> {
    let parsed: XmlEntries = quick_xml::de::from_str(body)?;
    Ok(parsed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let mut strings = entry.strings.into_iter();
            let key = strings.next()?;
            let value = strings.next().unwrap_or_default();
            Some(LoginErrorEntry { key, value })
        })
        .collect())
}

/// Whether any `message` entry reports missing trusted root certificates.
pub fn is_certificate_pending(entries: &[LoginErrorEntry]) -> bool {
    entries
        .iter()
        .any(|e| e.key == "message" && e.value == TRUSTED_ROOT_CERTIFICATES_PENDING)
}

impl HcxClient {
    /// Log in to the connector and store the issued token.
    ///
    /// A transport failure is retried exactly once after
    /// `transport_retry_delay`. A rejection whose error entries report
    /// pending trusted root certificates is retried every
    /// `certificate_wait` (bounded only by `max_certificate_waits`);
    /// any other rejection is fatal.
    pub async fn login(&self) -> Result<(), Error> {
        let mut session = self.session.lock().await;
        let token = self.perform_login().await?;
        session.token = Some(token);
        session.authenticated = true;
        Ok(())
    }

    /// Log in if no token is held yet, and return the current token.
    pub async fn ensure_authenticated(&self) -> Result<SecretString, Error> {
        let mut session = self.session.lock().await;
        if session.authenticated {
            if let Some(token) = session.token.as_ref() {
                return Ok(token.clone());
            }
        }
        let token = self.perform_login().await?;
        session.token = Some(token.clone());
        session.authenticated = true;
        Ok(token)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.authenticated
    }

    /// The current connector token, if logged in.
    pub async fn token(&self) -> Option<SecretString> {
        self.session.lock().await.token.clone()
    }

    /// Drop the connector token; the next consumer call logs in again.
    pub async fn reset_session(&self) {
        let mut session = self.session.lock().await;
        session.token = None;
        session.authenticated = false;
    }

    async fn perform_login(&self) -> Result<SecretString, Error> {
        let creds = self
            .credentials()
            .consumer
            .as_ref()
            .ok_or_else(|| Error::Authentication {
                message: "no connector username/password configured".into(),
            })?;
        let url = self.api_url("/hybridity/api/sessions")?;
        let body = json!({
            "username": creds.username,
            "password": creds.password.expose_secret(),
        });
        let policy = &self.login_policy;
        let mut certificate_waits: u32 = 0;

        debug!("logging in at {}", url);

        loop {
            let resp = match self.http().post(url.clone()).json(&body).send().await {
                Ok(resp) => resp,
                Err(first) => {
                    warn!(error = %first, delay = ?policy.transport_retry_delay, "login request failed, retrying once");
                    tokio::time::sleep(policy.transport_retry_delay).await;
                    self.http()
                        .post(url.clone())
                        .json(&body)
                        .send()
                        .await
                        .map_err(|e| Error::Authentication {
                            message: format!(
                                "unable to authenticate, check vCenter user / SSO configuration: {e}"
                            ),
                        })?
                }
            };

            let status = resp.status();
            if AuthKind::Consumer.accepts(status) {
                let token = resp
                    .headers()
                    .get(TOKEN_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .filter(|v| !v.is_empty())
                    .ok_or(Error::MissingToken {
                        header: TOKEN_HEADER,
                    })?;
                info!("connector session established");
                return Ok(SecretString::from(token.to_owned()));
            }

            let text = resp.text().await.map_err(Error::Transport)?;
            let entries = parse_login_errors(&text).map_err(|_| Error::Authentication {
                message: format!("login failed (HTTP {status}): {text}"),
            })?;
            if !is_certificate_pending(&entries) {
                return Err(Error::Authentication {
                    message: format!("login failed (HTTP {status}): {text}"),
                });
            }

            certificate_waits += 1;
            if let Some(max) = policy.max_certificate_waits {
                if certificate_waits > max {
                    return Err(Error::Authentication {
                        message: format!(
                            "trusted root certificates still not configured after {max} waits"
                        ),
                    });
                }
            }
            warn!(
                attempt = certificate_waits,
                wait = ?policy.certificate_wait,
                "trusted root certificates not configured yet, waiting before next login"
            );
            tokio::time::sleep(policy.certificate_wait).await;
        }
    }

    /// Store the HCX cloud token obtained from [`cloud_login`](Self::cloud_login).
    pub(crate) async fn set_cloud_token(&self, token: SecretString) {
        self.session.lock().await.cloud_token = Some(token);
    }

    pub async fn has_cloud_token(&self) -> bool {
        self.session.lock().await.cloud_token.is_some()
    }
}
