// Inventory query endpoints
//
// Everything under `/hybridity/api/service/inventory` is a POST query
// returning the complete result set in one response (no paging).

use serde_json::json;
use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{
    CloudEndpoint, CloudScope, CloudSideFilter, ComputeFilter, Data, Datastore, Dvs, Items,
    NetworkBacking, QueryResult, ResourceContainer, VcInventoryNode,
};

impl HcxClient {
    /// The local vCenter inventory tree (vCenter > datacenters > clusters).
    ///
    /// `POST /hybridity/api/service/inventory/vc/list`
    pub async fn vc_inventory(&self) -> Result<Vec<VcInventoryNode>, Error> {
        let url = self.api_url("/hybridity/api/service/inventory/vc/list")?;
        debug!("fetching vCenter inventory");
        let resp: Data<Items<VcInventoryNode>> =
            self.post(AuthKind::Consumer, url, &json!({})).await?;
        Ok(resp.data.items)
    }

    /// `POST /hybridity/api/service/inventory/vc/datastores/query`
    pub async fn query_datastores(&self, filter: &ComputeFilter) -> Result<Vec<Datastore>, Error> {
        let url = self.api_url("/hybridity/api/service/inventory/vc/datastores/query")?;
        debug!(compute_ids = ?filter.compute_ids, "querying datastores");
        let resp: QueryResult<Items<Datastore>> = self
            .post(AuthKind::Consumer, url, &json!({ "filter": filter }))
            .await?;
        Ok(resp.data.items)
    }

    /// `POST /hybridity/api/service/inventory/vc/dvs/query`
    pub async fn query_dvs(&self, filter: &ComputeFilter) -> Result<Vec<Dvs>, Error> {
        let url = self.api_url("/hybridity/api/service/inventory/vc/dvs/query")?;
        debug!(compute_ids = ?filter.compute_ids, "querying distributed switches");
        let resp: QueryResult<Items<Dvs>> = self
            .post(AuthKind::Consumer, url, &json!({ "filter": filter }))
            .await?;
        Ok(resp.data.items)
    }

    /// Network backings visible to an endpoint.
    ///
    /// `POST /hybridity/api/service/inventory/networks`
    pub async fn list_network_backings(&self, endpoint_id: &str) -> Result<Vec<NetworkBacking>, Error> {
        let url = self.api_url("/hybridity/api/service/inventory/networks")?;
        debug!(endpoint_id, "listing network backings");
        let cloud = CloudEndpoint {
            endpoint_id: endpoint_id.into(),
            ..CloudEndpoint::default()
        };
        let resp: Data<Items<NetworkBacking>> = self
            .post(AuthKind::Consumer, url, &json!({ "filter": { "cloud": cloud } }))
            .await?;
        Ok(resp.data.items)
    }

    /// `POST /hybridity/api/service/inventory/cloud/list`
    pub async fn list_clouds(&self, scope: CloudScope) -> Result<Vec<CloudEndpoint>, Error> {
        let url = self.api_url("/hybridity/api/service/inventory/cloud/list")?;
        debug!(?scope, "listing cloud endpoints");
        let filter = CloudSideFilter::from(scope);
        let resp: QueryResult<Items<CloudEndpoint>> = self
            .post(AuthKind::Consumer, url, &json!({ "filter": filter }))
            .await?;
        Ok(resp.data.items)
    }

    /// `POST /hybridity/api/service/inventory/resourcecontainer/list`
    pub async fn list_resource_containers(
        &self,
        scope: CloudScope,
    ) -> Result<Vec<ResourceContainer>, Error> {
        let url = self.api_url("/hybridity/api/service/inventory/resourcecontainer/list")?;
        debug!(?scope, "listing resource containers");
        let filter = CloudSideFilter::from(scope);
        let resp: QueryResult<Items<ResourceContainer>> = self
            .post(
                AuthKind::Consumer,
                url,
                &json!({ "filter": { "cloud": filter } }),
            )
            .await?;
        Ok(resp.data.items)
    }
}
