use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{Data, ServiceMeshRequest, ServiceMeshTask};

impl HcxClient {
    /// `POST /hybridity/api/interconnect/serviceMesh`
    pub async fn insert_service_mesh(
        &self,
        mesh: &ServiceMeshRequest,
    ) -> Result<ServiceMeshTask, Error> {
        let url = self.api_url("/hybridity/api/interconnect/serviceMesh")?;
        debug!(name = %mesh.name, "creating service mesh");
        let resp: Data<ServiceMeshTask> = self.post(AuthKind::Consumer, url, mesh).await?;
        Ok(resp.data)
    }

    /// `DELETE /hybridity/api/interconnect/serviceMesh/{id}?force={force}`
    pub async fn delete_service_mesh(
        &self,
        service_mesh_id: &str,
        force: bool,
    ) -> Result<ServiceMeshTask, Error> {
        let mut url = self.api_url(&format!(
            "/hybridity/api/interconnect/serviceMesh/{service_mesh_id}"
        ))?;
        url.query_pairs_mut()
            .append_pair("force", if force { "true" } else { "false" });
        debug!(service_mesh_id, force, "deleting service mesh");
        let resp: Data<ServiceMeshTask> = self.delete(AuthKind::Consumer, url).await?;
        Ok(resp.data)
    }
}
