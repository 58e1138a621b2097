// ── Service mesh ──
//
// A service mesh pairs a local and a remote compute profile over an
// existing site pairing. The first switch of each profile forms the switch
// pair the network-extension appliances are deployed on.

use hcx_api::models::{
    ComputeProfile, MeshComputeProfile, ServiceMeshRequest, ServiceRef, SwitchPairCount,
    SwitchRef, TrafficEngineering, WanoptConfig,
};
use serde::Serialize;
use tracing::info;

use crate::error::{CoreError, ErrorContext};
use crate::ops::site_pairing::PairingContext;
use crate::orchestrator::Orchestrator;
use crate::poller::await_task;

/// Uplink bandwidth cap (Mbit/s) when none is configured.
pub const DEFAULT_UPLINK_MAX_BANDWIDTH: u32 = 10_000;

/// A service mesh to create.
#[derive(Debug, Clone)]
pub struct NewServiceMesh {
    pub name: String,
    pub local_compute_profile: String,
    pub remote_compute_profile: String,
    pub services: Vec<String>,
    pub uplink_max_bandwidth: u32,
    pub app_path_resiliency: bool,
    pub tcp_flow_conditioning: bool,
    /// Network-extension appliances to deploy on the switch pair.
    pub appliance_count: u32,
}

impl Default for NewServiceMesh {
    fn default() -> Self {
        Self {
            name: String::new(),
            local_compute_profile: String::new(),
            remote_compute_profile: String::new(),
            services: Vec::new(),
            uplink_max_bandwidth: DEFAULT_UPLINK_MAX_BANDWIDTH,
            app_path_resiliency: false,
            tcp_flow_conditioning: false,
            appliance_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceMeshCreated {
    pub id: String,
    /// Network-extension appliances bound to the new mesh.
    pub appliance_ids: Vec<String>,
}

fn first_switch(profile: &ComputeProfile) -> Result<SwitchRef, CoreError> {
    profile
        .switches
        .first()
        .cloned()
        .ok_or_else(|| CoreError::Composition {
            message: format!("compute profile {} has no switch", profile.name),
        })
}

fn mesh_profile(profile: &ComputeProfile, endpoint_id: &str, endpoint_name: &str) -> MeshComputeProfile {
    MeshComputeProfile {
        compute_profile_id: profile.compute_profile_id.clone(),
        compute_profile_name: profile.name.clone(),
        endpoint_id: endpoint_id.to_owned(),
        endpoint_name: endpoint_name.to_owned(),
    }
}

/// Assemble the request body from both resolved compute profiles.
pub(crate) fn mesh_request(
    mesh: &NewServiceMesh,
    pairing: &PairingContext,
    local: &ComputeProfile,
    remote: &ComputeProfile,
) -> Result<ServiceMeshRequest, CoreError> {
    Ok(ServiceMeshRequest {
        name: mesh.name.clone(),
        compute_profiles: vec![
            mesh_profile(local, &pairing.local_endpoint_id, &pairing.local_name),
            mesh_profile(remote, &pairing.remote_endpoint_id, &pairing.remote_name),
        ],
        wanopt_config: WanoptConfig {
            uplink_max_bandwidth: mesh.uplink_max_bandwidth,
        },
        traffic_engineering: TrafficEngineering {
            app_path_resiliency: mesh.app_path_resiliency,
            tcp_flow_conditioning: mesh.tcp_flow_conditioning,
        },
        services: mesh.services.iter().map(ServiceRef::new).collect(),
        switch_pair_count: vec![SwitchPairCount {
            switches: vec![first_switch(local)?, first_switch(remote)?],
            l2c_appliance_count: mesh.appliance_count,
        }],
    })
}

impl Orchestrator {
    /// Create a service mesh over `pairing`, wait for its task and
    /// collect the appliances deployed for it.
    pub async fn create_service_mesh(
        &self,
        pairing: &PairingContext,
        mesh: &NewServiceMesh,
    ) -> Result<ServiceMeshCreated, CoreError> {
        let client = self.client();
        let resolver = self.resolver();
        let remote = resolver
            .compute_profile(&pairing.remote_endpoint_id, &mesh.remote_compute_profile)
            .await
            .context("resolving remote compute profile")?;
        let local = resolver
            .compute_profile(&pairing.local_endpoint_id, &mesh.local_compute_profile)
            .await
            .context("resolving local compute profile")?;
        let body = mesh_request(mesh, pairing, &local, &remote)?;

        let task = client
            .insert_service_mesh(&body)
            .await
            .context("creating service mesh")?;
        await_task(client, &task.interconnect_task_id, &self.polling().job_policy())
            .await
            .context("waiting for service mesh creation")?;

        let appliances = client
            .query_appliances(&pairing.local_endpoint_id, Some(&task.service_mesh_id))
            .await
            .context("listing service mesh appliances")?;
        let appliance_ids: Vec<String> = appliances.into_iter().map(|a| a.appliance_id).collect();
        info!(
            name = %mesh.name,
            id = %task.service_mesh_id,
            appliances = appliance_ids.len(),
            "service mesh created"
        );

        Ok(ServiceMeshCreated {
            id: task.service_mesh_id,
            appliance_ids,
        })
    }

    /// Delete a service mesh. `force` removes it even when the remote
    /// site is unreachable.
    pub async fn delete_service_mesh(&self, service_mesh_id: &str, force: bool) -> Result<(), CoreError> {
        let client = self.client();
        let task = client
            .delete_service_mesh(service_mesh_id, force)
            .await
            .context("deleting service mesh")?;
        await_task(client, &task.interconnect_task_id, &self.polling().job_policy())
            .await
            .context("waiting for service mesh deletion")?;
        info!(service_mesh_id, force, "service mesh deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(id: &str, switch: Option<&str>) -> ComputeProfile {
        ComputeProfile {
            compute_profile_id: id.into(),
            name: format!("cp-{id}"),
            switches: switch
                .map(|name| SwitchRef {
                    id: format!("dvs-{name}"),
                    name: name.into(),
                    ..SwitchRef::default()
                })
                .into_iter()
                .collect(),
            ..ComputeProfile::default()
        }
    }

    fn pairing() -> PairingContext {
        PairingContext {
            local_endpoint_id: "ep-local".into(),
            local_name: "onprem".into(),
            remote_endpoint_id: "ep-remote".into(),
            remote_name: "cloud".into(),
            ..PairingContext::default()
        }
    }

    #[test]
    fn request_pairs_local_then_remote() {
        let mesh = NewServiceMesh {
            name: "mesh".into(),
            services: vec!["INTERCONNECT".into()],
            appliance_count: 2,
            ..NewServiceMesh::default()
        };
        let body = mesh_request(&mesh, &pairing(), &profile("1", Some("a")), &profile("2", Some("b")))
            .unwrap();

        assert_eq!(body.compute_profiles[0].endpoint_id, "ep-local");
        assert_eq!(body.compute_profiles[1].compute_profile_id, "2");
        let pair = &body.switch_pair_count[0];
        assert_eq!(pair.l2c_appliance_count, 2);
        assert_eq!(
            pair.switches.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(body.wanopt_config.uplink_max_bandwidth, 10_000);
    }

    #[test]
    fn profile_without_switch_cannot_be_meshed() {
        let err = mesh_request(
            &NewServiceMesh::default(),
            &pairing(),
            &profile("1", Some("a")),
            &profile("2", None),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Composition { .. }));
    }
}
