// ── Compute profiles ──
//
// A compute profile names where interconnect appliances are placed: the
// cluster and datastore they run on, the switch they attach to and the
// networks (by role) they use. The request body repeats the vCenter
// reference in every compute, storage and switch entry.

use std::collections::BTreeMap;

use hcx_api::models::{
    ComputeFilter, ComputeProfile, ComputeRef, DeploymentContainer, ServiceRef, SwitchRef,
};
use tracing::{debug, info};

use crate::entity::{EntityKind, NamedEntity};
use crate::error::{CoreError, ErrorContext};
use crate::network_roles::{NetworkRole, build_network_list, to_profile_networks};
use crate::orchestrator::Orchestrator;
use crate::poller::await_task;
use crate::resolver::Resolvable;

/// Compute type of vCenter-backed references.
pub const VCENTER_COMPUTE_TYPE: &str = "VC";

/// A compute profile to create, in user terms.
#[derive(Debug, Clone, Default)]
pub struct NewComputeProfile {
    pub name: String,
    /// Datacenter holding the cluster. The first one when unset.
    pub datacenter: Option<String>,
    pub cluster: String,
    pub datastore: String,
    /// Distributed switch the appliances attach to.
    pub dvs: String,
    /// Services enabled on the profile (`INTERCONNECT`, `WANOPT`, ...).
    pub services: Vec<String>,
    /// Network profile id per role. Management is required.
    pub networks: BTreeMap<NetworkRole, String>,
}

fn vcenter_ref(vcenter: &NamedEntity, id: &str, name: &str, ref_type: &str) -> ComputeRef {
    ComputeRef {
        cmp_id: vcenter.id.clone(),
        cmp_name: vcenter.name.clone(),
        cmp_type: VCENTER_COMPUTE_TYPE.into(),
        id: id.to_owned(),
        name: name.to_owned(),
        ref_type: ref_type.to_owned(),
    }
}

impl Orchestrator {
    /// Resolve every name of `profile` and assemble the request body
    /// without submitting it.
    pub async fn compose_compute_profile(
        &self,
        profile: &NewComputeProfile,
    ) -> Result<ComputeProfile, CoreError> {
        let mut resolver = self.resolver();
        let vcenter = resolver.vcenter().await.context("reading vCenter inventory")?;
        let datacenter = resolver
            .datacenter(profile.datacenter.as_deref())
            .await
            .context("resolving datacenter")?;
        let cluster = resolver
            .cluster(&datacenter, &profile.cluster)
            .await
            .context("resolving cluster")?;
        let datastore = resolver
            .datastore(&vcenter, &cluster, &profile.datastore)
            .await
            .context("resolving datastore")?;
        let dvs = resolver
            .dvs(&vcenter, &cluster, &profile.dvs)
            .await
            .context("resolving distributed switch")?;

        let mut roles = BTreeMap::new();
        for (role, profile_id) in profile.networks.iter().filter(|(_, id)| !id.is_empty()) {
            let network = match resolver.network_profile_by_id(profile_id).await {
                Ok(network) => network,
                Err(e) if e.is_not_found() => {
                    return Err(CoreError::Composition {
                        message: format!("{role} network profile {profile_id} does not exist"),
                    });
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("resolving {role} network profile"));
                }
            };
            roles.insert(*role, network.to_entity(EntityKind::NetworkProfile));
        }
        let networks = to_profile_networks(&build_network_list(&roles)?);
        debug!(networks = networks.len(), "network roles assigned");

        Ok(ComputeProfile {
            compute: vec![vcenter_ref(
                &vcenter,
                &datacenter.id,
                &datacenter.name,
                &datacenter.entity_type,
            )],
            compute_profile_id: String::new(),
            deployment_container: DeploymentContainer {
                compute: vec![vcenter_ref(
                    &vcenter,
                    &cluster.id,
                    &cluster.name,
                    ComputeFilter::CLUSTER,
                )],
                cpu_reservation: 0,
                memory_reservation: 0,
                storage: vec![vcenter_ref(
                    &vcenter,
                    &datastore.id,
                    &datastore.name,
                    &datastore.entity_type,
                )],
            },
            name: profile.name.clone(),
            networks,
            services: profile.services.iter().map(ServiceRef::new).collect(),
            state: String::new(),
            switches: vec![SwitchRef {
                cmp_id: vcenter.id.clone(),
                id: dvs.id,
                max_mtu: Some(dvs.max_mtu),
                name: dvs.name,
                switch_type: dvs.switch_type,
            }],
        })
    }

    /// Create a compute profile and wait for its task. Returns the
    /// submitted profile with its new id.
    pub async fn create_compute_profile(
        &self,
        profile: &NewComputeProfile,
    ) -> Result<ComputeProfile, CoreError> {
        let client = self.client();
        let mut body = self.compose_compute_profile(profile).await?;

        let task = client
            .insert_compute_profile(&body)
            .await
            .context("creating compute profile")?;
        await_task(client, &task.interconnect_task_id, &self.polling().job_policy())
            .await
            .context("waiting for compute profile creation")?;
        info!(name = %body.name, id = %task.compute_profile_id, "compute profile created");

        body.compute_profile_id = task.compute_profile_id;
        Ok(body)
    }

    pub async fn delete_compute_profile(&self, compute_profile_id: &str) -> Result<(), CoreError> {
        let client = self.client();
        let task = client
            .delete_compute_profile(compute_profile_id)
            .await
            .context("deleting compute profile")?;
        await_task(client, &task.interconnect_task_id, &self.polling().job_policy())
            .await
            .context("waiting for compute profile deletion")?;
        info!(compute_profile_id, "compute profile deleted");
        Ok(())
    }

    /// A compute profile of `endpoint_id` by name.
    pub async fn compute_profile(
        &self,
        endpoint_id: &str,
        name: &str,
    ) -> Result<ComputeProfile, CoreError> {
        self.resolver().compute_profile(endpoint_id, name).await
    }
}
