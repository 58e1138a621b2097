// Site pairing endpoints
//
// A pairing is created through `cloudConfigs` but deleted through
// `endpointPairing/{endpointId}`.

use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{
    Data, Items, RemoteSite, SitePairing, SitePairingRequest, SitePairingResult, SuccessFlag,
};

impl HcxClient {
    /// Submit a pairing with a remote site.
    ///
    /// `POST /hybridity/api/cloudConfigs`. Structured failures (bad remote
    /// credentials, untrusted remote certificate) come back in `errors`
    /// with an accepted status, so callers must inspect the result.
    pub async fn insert_site_pairing(&self, remote: &RemoteSite) -> Result<SitePairingResult, Error> {
        let url = self.api_url("/hybridity/api/cloudConfigs")?;
        debug!(remote = %remote.url, "submitting site pairing");
        let body = SitePairingRequest {
            remote: remote.clone(),
        };
        self.post(AuthKind::Consumer, url, &body).await
    }

    /// `GET /hybridity/api/cloudConfigs`
    pub async fn list_site_pairings(&self) -> Result<Vec<SitePairing>, Error> {
        let url = self.api_url("/hybridity/api/cloudConfigs")?;
        debug!("listing site pairings");
        let resp: Data<Items<SitePairing>> = self.get(AuthKind::Consumer, url).await?;
        Ok(resp.data.items)
    }

    /// `DELETE /hybridity/api/endpointPairing/{endpointId}`
    pub async fn delete_site_pairing(&self, endpoint_id: &str) -> Result<SuccessFlag, Error> {
        let url = self.api_url(&format!("/hybridity/api/endpointPairing/{endpoint_id}"))?;
        debug!(endpoint_id, "deleting site pairing");
        self.delete(AuthKind::Consumer, url).await
    }
}
