use tracing::debug;

use serde_json::json;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{Appliance, ApplianceFilter, Items, NETWORK_EXTENSION_APPLIANCE};

impl HcxClient {
    /// Network-extension appliances of an endpoint, optionally narrowed to
    /// one service mesh.
    ///
    /// `POST /hybridity/api/interconnect/appliances/query`
    pub async fn query_appliances(
        &self,
        endpoint_id: &str,
        service_mesh_id: Option<&str>,
    ) -> Result<Vec<Appliance>, Error> {
        let url = self.api_url("/hybridity/api/interconnect/appliances/query")?;
        debug!(endpoint_id, ?service_mesh_id, "querying network extension appliances");
        let body = json!({
            "filter": ApplianceFilter {
                appliance_type: NETWORK_EXTENSION_APPLIANCE.into(),
                endpoint_id: endpoint_id.into(),
                service_mesh_id: service_mesh_id.map(str::to_owned),
            }
        });
        let resp: Items<Appliance> = self.post(AuthKind::Consumer, url, &body).await?;
        Ok(resp.items)
    }
}
