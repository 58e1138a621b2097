use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{ComputeProfile, ComputeProfileTask, Data, Items};

impl HcxClient {
    /// `POST /hybridity/api/interconnect/computeProfiles`
    ///
    /// Returns the interconnect task tracking the creation, plus the new
    /// profile id.
    pub async fn insert_compute_profile(
        &self,
        profile: &ComputeProfile,
    ) -> Result<ComputeProfileTask, Error> {
        let url = self.api_url("/hybridity/api/interconnect/computeProfiles")?;
        debug!(name = %profile.name, "creating compute profile");
        let resp: Data<ComputeProfileTask> = self.post(AuthKind::Consumer, url, profile).await?;
        Ok(resp.data)
    }

    /// `DELETE /hybridity/api/interconnect/computeProfiles/{id}`
    pub async fn delete_compute_profile(
        &self,
        compute_profile_id: &str,
    ) -> Result<ComputeProfileTask, Error> {
        let url = self.api_url(&format!(
            "/hybridity/api/interconnect/computeProfiles/{compute_profile_id}"
        ))?;
        debug!(compute_profile_id, "deleting compute profile");
        let resp: Data<ComputeProfileTask> = self.delete(AuthKind::Consumer, url).await?;
        Ok(resp.data)
    }

    /// `GET /hybridity/api/interconnect/computeProfiles?endpointId={id}`
    pub async fn list_compute_profiles(&self, endpoint_id: &str) -> Result<Vec<ComputeProfile>, Error> {
        let mut url = self.api_url("/hybridity/api/interconnect/computeProfiles")?;
        url.query_pairs_mut().append_pair("endpointId", endpoint_id);
        debug!(endpoint_id, "listing compute profiles");
        let resp: Items<ComputeProfile> = self.get(AuthKind::Consumer, url).await?;
        Ok(resp.items)
    }
}
