// HCX HTTP client
//
// Wraps `reqwest::Client` with per-backend URL construction, credential
// attachment and accepted-status enforcement. Endpoint groups (site pairing,
// profiles, inventory, admin, cloud...) are implemented as inherent methods
// in separate files to keep this module focused on transport mechanics.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{AuthKind, SessionCredentials, TOKEN_HEADER};
use crate::error::Error;
use crate::session::{LoginPolicy, SessionState};
use crate::transport::TransportConfig;

/// Port the appliance admin API listens on.
pub const ADMIN_PORT: u16 = 9443;

/// Base URLs of the cloud-services backends used for SDDC management.
#[derive(Debug, Clone)]
pub struct CloudEndpoints {
    /// Token exchange: `{vmc_auth}/auth/api-tokens/authorize`.
    pub vmc_auth: Url,
    /// HCX cloud session login: `{hcx_cloud_auth}/api/sessions`.
    pub hcx_cloud_auth: Url,
    /// SDDC listing and activation: `{hcx_cloud_consumer}/api/sddcs`.
    pub hcx_cloud_consumer: Url,
}

impl CloudEndpoints {
    pub const VMC_AUTH: &'static str = "https://console.cloud.vmware.com/csp/gateway/am/api";
    pub const HCX_CLOUD_AUTH: &'static str = "https://connect.hcx.vmware.com/provider/csp";
    pub const HCX_CLOUD_CONSUMER: &'static str =
        "https://connect.hcx.vmware.com/provider/csp/consumer";

    /// The public VMware cloud-services endpoints.
    pub fn public() -> Result<Self, Error> {
        Ok(Self {
            vmc_auth: Url::parse(Self::VMC_AUTH)?,
            hcx_cloud_auth: Url::parse(Self::HCX_CLOUD_AUTH)?,
            hcx_cloud_consumer: Url::parse(Self::HCX_CLOUD_CONSUMER)?,
        })
    }
}

/// A response that passed the accepted-status check.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub headers: HeaderMap,
    pub body: String,
}

/// Async client for one HCX connector, its admin API, and the cloud services.
///
/// One client is one session: the connector token and the cloud token live
/// behind a `tokio::sync::Mutex`, so flows sharing a client never race on
/// login. Every method returns typed payloads; the accepted-status set of
/// the targeted backend is enforced before the body is decoded.
pub struct HcxClient {
    http: reqwest::Client,
    base_url: Url,
    admin_url: Url,
    cloud: CloudEndpoints,
    credentials: SessionCredentials,
    admin_timeout: Duration,
    pub(crate) login_policy: LoginPolicy,
    pub(crate) session: Mutex<SessionState>,
}

impl HcxClient {
    /// Create a client for the connector at `base_url` (e.g. `https://hcx.corp.local`).
    ///
    /// The admin API defaults to the same host on port 9443 and the cloud
    /// endpoints to the public VMware services.
    pub fn new(
        base_url: Url,
        credentials: SessionCredentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials)?.with_admin_timeout(transport.admin_timeout))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: SessionCredentials,
    ) -> Result<Self, Error> {
        let admin_url = admin_url_for(&base_url)?;
        Ok(Self {
            http,
            base_url,
            admin_url,
            cloud: CloudEndpoints::public()?,
            credentials,
            admin_timeout: TransportConfig::default().admin_timeout,
            login_policy: LoginPolicy::default(),
            session: Mutex::new(SessionState::default()),
        })
    }

    /// Point the admin API somewhere other than `{host}:9443`.
    pub fn with_admin_url(mut self, admin_url: Url) -> Self {
        self.admin_url = admin_url;
        self
    }

    pub fn with_cloud_endpoints(mut self, cloud: CloudEndpoints) -> Self {
        self.cloud = cloud;
        self
    }

    pub fn with_login_policy(mut self, policy: LoginPolicy) -> Self {
        self.login_policy = policy;
        self
    }

    pub fn with_admin_timeout(mut self, timeout: Duration) -> Self {
        self.admin_timeout = timeout;
        self
    }

    /// The connector base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The admin API base URL.
    pub fn admin_url(&self) -> &Url {
        &self.admin_url
    }

    pub fn cloud_endpoints(&self) -> &CloudEndpoints {
        &self.cloud
    }

    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    /// The underlying HTTP client (for flows that bypass credential attachment).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}{path}` on the connector application API.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        join_path(&self.base_url, path)
    }

    /// `{admin}{path}` on the admin API.
    pub(crate) fn admin_api_url(&self, path: &str) -> Result<Url, Error> {
        join_path(&self.admin_url, path)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, kind: AuthKind, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let builder = self.http.get(url.clone());
        let resp = self.dispatch(kind, builder, &url).await?;
        decode(&url, &resp.body)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        kind: AuthKind,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let builder = self.http.post(url.clone()).json(body);
        let resp = self.dispatch(kind, builder, &url).await?;
        decode(&url, &resp.body)
    }

    /// POST without a request body (action endpoints).
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        kind: AuthKind,
        url: Url,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let builder = self.http.post(url.clone());
        let resp = self.dispatch(kind, builder, &url).await?;
        decode(&url, &resp.body)
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        kind: AuthKind,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let builder = self.http.put(url.clone()).json(body);
        let resp = self.dispatch(kind, builder, &url).await?;
        decode(&url, &resp.body)
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        kind: AuthKind,
        url: Url,
    ) -> Result<T, Error> {
        debug!("DELETE {}", url);
        let builder = self.http.delete(url.clone());
        let resp = self.dispatch(kind, builder, &url).await?;
        decode(&url, &resp.body)
    }

    pub(crate) async fn delete_with_body<T: DeserializeOwned>(
        &self,
        kind: AuthKind,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("DELETE {}", url);
        let builder = self.http.delete(url.clone()).json(body);
        let resp = self.dispatch(kind, builder, &url).await?;
        decode(&url, &resp.body)
    }

    /// Attach credentials, send, and enforce the backend's accepted statuses.
    pub(crate) async fn dispatch(
        &self,
        kind: AuthKind,
        builder: RequestBuilder,
        url: &Url,
    ) -> Result<RawResponse, Error> {
        let builder = self
            .authorize(kind, builder)
            .await?
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%status, bytes = body.len(), "response received");

        if !kind.accepts(status) {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                url: without_query(url),
                body,
            });
        }

        Ok(RawResponse {
            headers,
            body,
        })
    }

    async fn authorize(&self, kind: AuthKind, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        match kind {
            AuthKind::Consumer => {
                let token = self.ensure_authenticated().await?;
                Ok(builder.header(TOKEN_HEADER, token.expose_secret()))
            }
            AuthKind::Admin => {
                let admin = self
                    .credentials
                    .admin
                    .as_ref()
                    .filter(|c| !c.username.is_empty() && !c.password.expose_secret().is_empty())
                    .ok_or(Error::MissingAdminCredentials)?;
                Ok(builder
                    .basic_auth(&admin.username, Some(admin.password.expose_secret()))
                    .timeout(self.admin_timeout))
            }
            AuthKind::Cloud => {
                let session = self.session.lock().await;
                Ok(match session.cloud_token.as_ref() {
                    Some(token) => builder.header(TOKEN_HEADER, token.expose_secret()),
                    None => builder,
                })
            }
            AuthKind::CloudLogin => Ok(builder),
        }
    }
}

/// `{host}:9443` with the connector URL's scheme and host.
fn admin_url_for(base_url: &Url) -> Result<Url, Error> {
    let mut admin = base_url.clone();
    admin.set_path("");
    admin.set_query(None);
    admin
        .set_port(Some(ADMIN_PORT))
        .map_err(|()| Error::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;
    Ok(admin)
}

/// Append an absolute path (with optional query) to a base URL, keeping
/// any path the base already carries.
pub(crate) fn join_path(base: &Url, path: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}{path}"))?)
}

/// The URL as shown in errors. Queries can carry secrets (cloud API token).
fn without_query(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

/// Decode a JSON body. An empty body decodes as `null`, so `()` and
/// `Option<T>` work for endpoints that answer 204.
pub(crate) fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, Error> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| Error::Deserialization {
        message: format!("{e} (from {})", without_query(url)),
        body: body.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_uses_port_9443() {
        let base = Url::parse("https://hcx.corp.local/ignored?x=1").unwrap();
        let admin = admin_url_for(&base).unwrap();
        assert_eq!(admin.as_str(), "https://hcx.corp.local:9443/");
    }

    #[test]
    fn join_path_keeps_base_path_and_query() {
        let base = Url::parse("https://connect.hcx.vmware.com/provider/csp/consumer").unwrap();
        let url = join_path(&base, "/api/sddcs/abc?action=activate").unwrap();
        assert_eq!(
            url.as_str(),
            "https://connect.hcx.vmware.com/provider/csp/consumer/api/sddcs/abc?action=activate"
        );
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let url = Url::parse("https://hcx/x").unwrap();
        decode::<()>(&url, "").unwrap();
        let none: Option<serde_json::Value> = decode(&url, "  ").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn bad_json_keeps_raw_body() {
        let url = Url::parse("https://hcx/x").unwrap();
        let err = decode::<serde_json::Value>(&url, "<html>").unwrap_err();
        assert!(matches!(err, Error::Deserialization { body, .. } if body == "<html>"));
    }
}
