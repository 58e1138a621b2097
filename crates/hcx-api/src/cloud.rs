// Cloud-services endpoints (SDDC activation)
//
// Two-step authentication: a cloud API (refresh) token is exchanged for an
// access token, which then opens an HCX cloud session whose token comes
// back in the `x-hm-authorization` header.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::auth::{AuthKind, TOKEN_HEADER};
use crate::client::{HcxClient, decode, join_path};
use crate::error::Error;
use crate::models::{CloudSessionRequest, JobRef, Sddc, SddcList, VmcAccessToken};

impl HcxClient {
    /// Exchange a cloud API token for an access token.
    ///
    /// `POST {vmc_auth}/auth/api-tokens/authorize?refresh_token=...`
    pub async fn vmc_authorize(&self, refresh_token: &SecretString) -> Result<VmcAccessToken, Error> {
        let mut url = join_path(&self.cloud_endpoints().vmc_auth, "/auth/api-tokens/authorize")?;
        url.query_pairs_mut()
            .append_pair("refresh_token", refresh_token.expose_secret());
        // Not routed through `post_empty`: the query carries the secret and must not be logged.
        debug!("exchanging cloud API token");
        let builder = self.http().post(url.clone());
        let resp = self.dispatch(AuthKind::CloudLogin, builder, &url).await?;
        decode(&url, &resp.body)
    }

    /// Open an HCX cloud session and keep its token for later cloud calls.
    ///
    /// `POST {hcx_cloud_auth}/api/sessions`
    pub async fn cloud_login(&self, access_token: &SecretString) -> Result<(), Error> {
        let url = join_path(&self.cloud_endpoints().hcx_cloud_auth, "/api/sessions")?;
        debug!("opening HCX cloud session");
        let body = CloudSessionRequest {
            token: access_token.clone(),
        };
        let builder = self.http().post(url.clone()).json(&body);
        let resp = self.dispatch(AuthKind::CloudLogin, builder, &url).await?;
        let token = resp
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingToken {
                header: TOKEN_HEADER,
            })?;
        self.set_cloud_token(SecretString::from(token.to_owned())).await;
        info!("HCX cloud session established");
        Ok(())
    }

    /// Run both authentication steps with the configured cloud API token.
    pub async fn authenticate_cloud(&self) -> Result<(), Error> {
        let refresh = self
            .credentials()
            .cloud_refresh_token
            .clone()
            .ok_or_else(|| Error::Authentication {
                message: "no cloud API token configured".into(),
            })?;
        let access = self.vmc_authorize(&refresh).await?;
        self.cloud_login(&SecretString::from(access.access_token)).await
    }

    /// `GET {hcx_cloud_consumer}/api/sddcs`
    pub async fn list_sddcs(&self) -> Result<Vec<Sddc>, Error> {
        let url = join_path(&self.cloud_endpoints().hcx_cloud_consumer, "/api/sddcs")?;
        debug!("listing SDDCs");
        let resp: SddcList = self.get(AuthKind::Cloud, url).await?;
        Ok(resp.sddcs)
    }

    /// `POST {hcx_cloud_consumer}/api/sddcs/{id}?action=activate`
    pub async fn activate_sddc(&self, sddc_id: &str) -> Result<JobRef, Error> {
        let url = join_path(
            &self.cloud_endpoints().hcx_cloud_consumer,
            &format!("/api/sddcs/{sddc_id}?action=activate"),
        )?;
        debug!(sddc_id, "activating HCX on SDDC");
        self.post_empty(AuthKind::Cloud, url).await
    }

    /// `POST {hcx_cloud_consumer}/api/sddcs/{id}?action=deactivate`
    pub async fn deactivate_sddc(&self, sddc_id: &str) -> Result<JobRef, Error> {
        let url = join_path(
            &self.cloud_endpoints().hcx_cloud_consumer,
            &format!("/api/sddcs/{sddc_id}?action=deactivate"),
        )?;
        debug!(sddc_id, "deactivating HCX on SDDC");
        self.post_empty(AuthKind::Cloud, url).await
    }
}
