use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{Items, L2Extension, L2ExtensionJob, L2ExtensionRequest};

impl HcxClient {
    /// `POST /hybridity/api/l2Extensions`, answering with the tracking job id.
    pub async fn insert_l2_extension(
        &self,
        extension: &L2ExtensionRequest,
    ) -> Result<L2ExtensionJob, Error> {
        let url = self.api_url("/hybridity/api/l2Extensions")?;
        debug!(network = %extension.source_network.network_name, "creating L2 extension");
        self.post(AuthKind::Consumer, url, extension).await
    }

    /// `GET /hybridity/api/l2Extensions`
    pub async fn list_l2_extensions(&self) -> Result<Vec<L2Extension>, Error> {
        let url = self.api_url("/hybridity/api/l2Extensions")?;
        debug!("listing L2 extensions");
        let resp: Items<L2Extension> = self.get(AuthKind::Consumer, url).await?;
        Ok(resp.items)
    }

    /// `DELETE /hybridity/api/l2Extensions/{stretchId}`
    pub async fn delete_l2_extension(&self, stretch_id: &str) -> Result<L2ExtensionJob, Error> {
        let url = self.api_url(&format!("/hybridity/api/l2Extensions/{stretch_id}"))?;
        debug!(stretch_id, "deleting L2 extension");
        self.delete(AuthKind::Consumer, url).await
    }
}
