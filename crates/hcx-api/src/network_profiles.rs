// Network profile endpoints
//
// Profiles are created under the `/admin/hybridity` prefix but updated,
// deleted and listed under `/hybridity`. Listing is a POST query that
// returns a bare array.

use serde_json::json;
use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{NetworkProfile, NetworkProfileResult, NetworkQueryFilter};

impl HcxClient {
    /// `POST /admin/hybridity/api/networks`
    pub async fn insert_network_profile(
        &self,
        profile: &NetworkProfile,
    ) -> Result<NetworkProfileResult, Error> {
        let url = self.api_url("/admin/hybridity/api/networks")?;
        debug!(name = %profile.name, "creating network profile");
        self.post(AuthKind::Consumer, url, profile).await
    }

    /// `PUT /hybridity/api/networks/{objectId}`, keyed by `profile.object_id`.
    pub async fn update_network_profile(
        &self,
        profile: &NetworkProfile,
    ) -> Result<NetworkProfileResult, Error> {
        let url = self.api_url(&format!("/hybridity/api/networks/{}", profile.object_id))?;
        debug!(name = %profile.name, object_id = %profile.object_id, "updating network profile");
        self.put(AuthKind::Consumer, url, profile).await
    }

    /// `DELETE /hybridity/api/networks/{objectId}`
    pub async fn delete_network_profile(&self, object_id: &str) -> Result<NetworkProfileResult, Error> {
        let url = self.api_url(&format!("/hybridity/api/networks/{object_id}"))?;
        debug!(object_id, "deleting network profile");
        self.delete(AuthKind::Consumer, url).await
    }

    /// All system-owned network profiles.
    ///
    /// `POST /hybridity/api/networks?action=queryIpUsage`
    pub async fn query_network_profiles(&self) -> Result<Vec<NetworkProfile>, Error> {
        let url = self.api_url("/hybridity/api/networks?action=queryIpUsage")?;
        debug!("querying network profiles");
        let body = json!({ "filter": NetworkQueryFilter::default() });
        self.post(AuthKind::Consumer, url, &body).await
    }
}
