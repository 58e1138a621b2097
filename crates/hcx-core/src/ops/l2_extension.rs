// ── L2 extensions ──

use hcx_api::models::{
    DestinationNetwork, L2Destination, L2Extension, L2ExtensionRequest, L2Features,
    SourceAppliance, SourceNetwork,
};
use tracing::{debug, info};

use crate::appliance::{ApplianceChoice, select_appliance};
use crate::entity::NamedEntity;
use crate::error::{CoreError, ErrorContext};
use crate::ops::network_profile::{DISTRIBUTED_PORT_GROUP, check_network_type};
use crate::ops::site_pairing::PairingContext;
use crate::orchestrator::Orchestrator;
use crate::poller::await_job;

/// A local network to stretch to the remote site.
#[derive(Debug, Clone)]
pub struct NewL2Extension {
    /// Port group or segment to extend.
    pub source_network: String,
    pub network_type: String,
    /// Tier-1 gateway on the remote site the network attaches to.
    pub destination_t1: String,
    pub gateway: String,
    pub netmask: String,
    /// Service mesh whose appliances carry the extension.
    pub service_mesh_id: Option<String>,
    /// Skip appliance selection and use this one.
    pub appliance_id: Option<String>,
    pub egress_optimization: bool,
    /// Mobility optimized networking.
    pub mon: bool,
}

impl Default for NewL2Extension {
    fn default() -> Self {
        Self {
            source_network: String::new(),
            network_type: DISTRIBUTED_PORT_GROUP.into(),
            destination_t1: String::new(),
            gateway: String::new(),
            netmask: String::new(),
            service_mesh_id: None,
            appliance_id: None,
            egress_optimization: false,
            mon: false,
        }
    }
}

pub(crate) fn extension_request(
    extension: &NewL2Extension,
    pairing: &PairingContext,
    backing: &NamedEntity,
    appliance: &ApplianceChoice,
) -> L2ExtensionRequest {
    L2ExtensionRequest {
        vc_guid: pairing.local_vc.clone(),
        gateway: extension.gateway.clone(),
        netmask: extension.netmask.clone(),
        dns: Vec::new(),
        destination: L2Destination {
            endpoint_id: pairing.remote_endpoint_id.clone(),
            endpoint_name: pairing.remote_name.clone(),
            endpoint_type: pairing.remote_endpoint_type.clone(),
            resource_id: pairing.remote_resource_id.clone(),
            resource_name: pairing.remote_resource_name.clone(),
            resource_type: pairing.remote_resource_type.clone(),
        },
        destination_network: DestinationNetwork {
            gateway_id: extension.destination_t1.clone(),
        },
        features: L2Features {
            egress_optimization: extension.egress_optimization,
            mobility_optimized_networking: extension.mon,
        },
        source_appliance: SourceAppliance {
            appliance_id: appliance.appliance_id().to_owned(),
        },
        source_network: SourceNetwork {
            network_id: backing.id.clone(),
            network_name: backing.name.clone(),
            network_type: backing.entity_type.clone(),
        },
    }
}

impl Orchestrator {
    async fn choose_appliance(
        &self,
        pairing: &PairingContext,
        extension: &NewL2Extension,
    ) -> Result<ApplianceChoice, CoreError> {
        if let Some(id) = extension.appliance_id.as_deref().filter(|id| !id.is_empty()) {
            return Ok(ApplianceChoice::Explicit(id.to_owned()));
        }
        let appliances = self
            .client()
            .query_appliances(&pairing.local_endpoint_id, None)
            .await
            .context("listing network extension appliances")?;
        let choice = select_appliance(&appliances, extension.service_mesh_id.as_deref());
        debug!(appliance = choice.appliance_id(), "appliance selected");
        Ok(choice)
    }

    /// Extend a local network over the service mesh and wait for the job.
    /// Returns the new extension as listed by the connector.
    pub async fn create_l2_extension(
        &self,
        pairing: &PairingContext,
        extension: &NewL2Extension,
    ) -> Result<L2Extension, CoreError> {
        check_network_type(&extension.network_type)?;
        let client = self.client();
        let resolver = self.resolver();
        let backing = resolver
            .network_backing(
                &pairing.local_endpoint_id,
                &extension.source_network,
                &extension.network_type,
            )
            .await
            .context("resolving source network")?;
        let appliance = self.choose_appliance(pairing, extension).await?;
        let body = extension_request(extension, pairing, &backing, &appliance);

        let job = client
            .insert_l2_extension(&body)
            .await
            .context("creating L2 extension")?;
        await_job(client, &job.id, &self.polling().job_policy())
            .await
            .context("waiting for L2 extension creation")?;

        let created = resolver
            .l2_extension(&backing.name)
            .await
            .context("reading created L2 extension")?;
        info!(network = %backing.name, stretch_id = %created.stretch_id, "L2 extension created");
        Ok(created)
    }

    pub async fn delete_l2_extension(&self, stretch_id: &str) -> Result<(), CoreError> {
        let client = self.client();
        let job = client
            .delete_l2_extension(stretch_id)
            .await
            .context("deleting L2 extension")?;
        await_job(client, &job.id, &self.polling().job_policy())
            .await
            .context("waiting for L2 extension deletion")?;
        info!(stretch_id, "L2 extension deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use hcx_api::models::Appliance;

    #[test]
    fn request_targets_the_paired_site() {
        let pairing = PairingContext {
            local_vc: "vc-uuid".into(),
            remote_endpoint_id: "ep-remote".into(),
            remote_resource_type: "VCENTER".into(),
            ..PairingContext::default()
        };
        let backing = NamedEntity::new(EntityKind::NetworkBacking, "dvportgroup-12", "VM-NET")
            .with_type(DISTRIBUTED_PORT_GROUP);
        let appliance = ApplianceChoice::Existing(Appliance {
            appliance_id: "app-1".into(),
            ..Appliance::default()
        });
        let extension = NewL2Extension {
            destination_t1: "T1".into(),
            mon: true,
            ..NewL2Extension::default()
        };

        let body = extension_request(&extension, &pairing, &backing, &appliance);
        assert_eq!(body.vc_guid, "vc-uuid");
        assert_eq!(body.destination.endpoint_id, "ep-remote");
        assert_eq!(body.destination.resource_type, "VCENTER");
        assert_eq!(body.destination_network.gateway_id, "T1");
        assert_eq!(body.source_appliance.appliance_id, "app-1");
        assert_eq!(body.source_network.network_id, "dvportgroup-12");
        assert!(body.features.mobility_optimized_networking);
        assert!(body.dns.is_empty());
    }

    #[test]
    fn fresh_appliance_sends_empty_id() {
        let backing = NamedEntity::new(EntityKind::NetworkBacking, "seg-1", "SEG");
        let body = extension_request(
            &NewL2Extension::default(),
            &PairingContext::default(),
            &backing,
            &ApplianceChoice::Fresh,
        );
        assert_eq!(body.source_appliance.appliance_id, "");
    }
}
