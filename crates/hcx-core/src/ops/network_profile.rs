// ── Network profiles ──
//
// A network profile binds a port group or NSX segment of the local site to
// an IP pool the appliances draw their addresses from. Profiles of VMware
// Cloud SDDCs are pre-created by the cloud; they are updated in place and
// never created or deleted.

use hcx_api::models::{Backing, IpRange, IpScope, NetworkProfile};
use tracing::info;

use crate::entity::NamedEntity;
use crate::error::{CoreError, ErrorContext};
use crate::ops::site_pairing::PairingContext;
use crate::orchestrator::Orchestrator;
use crate::poller::await_job;

pub const DISTRIBUTED_PORT_GROUP: &str = "DistributedVirtualPortgroup";
pub const NSXT_SEGMENT: &str = "NsxtSegment";

/// Network backing types a profile or an extension can use.
pub const NETWORK_TYPES: [&str; 2] = [DISTRIBUTED_PORT_GROUP, NSXT_SEGMENT];

/// Organization every connector-owned profile belongs to.
const DEFAULT_ORGANIZATION: &str = "DEFAULT";

pub(crate) fn check_network_type(network_type: &str) -> Result<(), CoreError> {
    if NETWORK_TYPES.contains(&network_type) {
        Ok(())
    } else {
        Err(CoreError::Config {
            message: format!(
                "network type {network_type} is not one of {}",
                NETWORK_TYPES.join(", ")
            ),
        })
    }
}

/// Desired state of a network profile.
#[derive(Debug, Clone)]
pub struct NetworkProfileSettings {
    pub name: String,
    /// Port group or segment the profile is backed by.
    pub network_name: String,
    pub network_type: String,
    pub mtu: u32,
    pub prefix_length: u8,
    pub gateway: String,
    pub primary_dns: String,
    pub secondary_dns: String,
    pub dns_suffix: String,
    pub ip_ranges: Vec<IpRange>,
    /// The profile is owned by VMware Cloud.
    pub vmc: bool,
}

impl NetworkProfileSettings {
    fn ip_scope(&self, pool_id: String) -> IpScope {
        IpScope {
            dns_suffix: self.dns_suffix.clone(),
            gateway: self.gateway.clone(),
            prefix_length: self.prefix_length,
            primary_dns: self.primary_dns.clone(),
            secondary_dns: self.secondary_dns.clone(),
            network_ip_ranges: self.ip_ranges.clone(),
            pool_id,
        }
    }
}

impl Orchestrator {
    async fn profile_backing(
        &self,
        pairing: &PairingContext,
        settings: &NetworkProfileSettings,
    ) -> Result<Backing, CoreError> {
        check_network_type(&settings.network_type)?;
        let backing = self
            .resolver()
            .network_backing(
                &pairing.local_endpoint_id,
                &settings.network_name,
                &settings.network_type,
            )
            .await
            .context("resolving network backing")?;
        Ok(Backing {
            backing_id: backing.id,
            backing_name: settings.network_name.clone(),
            backing_type: settings.network_type.clone(),
            vcenter_instance_uuid: pairing.local_vc.clone(),
            vcenter_name: String::new(),
        })
    }

    /// A port group or segment of `endpoint_id` by name and type.
    pub async fn network_backing(
        &self,
        endpoint_id: &str,
        name: &str,
        network_type: &str,
    ) -> Result<NamedEntity, CoreError> {
        check_network_type(network_type)?;
        self.resolver()
            .network_backing(endpoint_id, name, network_type)
            .await
    }

    /// Create a network profile and wait for the job. A VMware Cloud
    /// profile already exists and is updated instead.
    pub async fn create_network_profile(
        &self,
        pairing: &PairingContext,
        settings: &NetworkProfileSettings,
    ) -> Result<NetworkProfile, CoreError> {
        if settings.vmc {
            return self.update_network_profile(pairing, settings).await;
        }
        let client = self.client();
        let backing = self.profile_backing(pairing, settings).await?;
        let profile = NetworkProfile {
            backings: vec![backing],
            description: String::new(),
            organization: DEFAULT_ORGANIZATION.into(),
            ip_scopes: vec![settings.ip_scope(String::new())],
            mtu: settings.mtu,
            name: settings.name.clone(),
            l3_tenant_managed: false,
            owned_by_system: true,
            object_id: String::new(),
        };

        let created = client
            .insert_network_profile(&profile)
            .await
            .context("creating network profile")?;
        await_job(client, &created.data.job_id, &self.polling().job_policy())
            .await
            .context("waiting for network profile creation")?;
        info!(name = %settings.name, "network profile created");

        self.resolver()
            .network_profile_by_name(&settings.name)
            .await
            .context("reading created network profile")
    }

    /// Rewrite the backing (except for VMware Cloud profiles), MTU and IP
    /// scope of an existing profile. The IP pool keeps its id.
    pub async fn update_network_profile(
        &self,
        pairing: &PairingContext,
        settings: &NetworkProfileSettings,
    ) -> Result<NetworkProfile, CoreError> {
        let client = self.client();
        let mut profile = self
            .resolver()
            .network_profile_by_name(&settings.name)
            .await
            .context("looking up network profile")?;

        if !settings.vmc {
            profile.backings = vec![self.profile_backing(pairing, settings).await?];
        }
        let pool_id = profile
            .ip_scopes
            .first()
            .map(|scope| scope.pool_id.clone())
            .unwrap_or_default();
        profile.mtu = settings.mtu;
        profile.ip_scopes = vec![settings.ip_scope(pool_id)];

        let updated = client
            .update_network_profile(&profile)
            .await
            .context("updating network profile")?;
        await_job(client, &updated.data.job_id, &self.polling().job_policy())
            .await
            .context("waiting for network profile update")?;
        info!(name = %settings.name, vmc = settings.vmc, "network profile updated");

        self.resolver()
            .network_profile_by_name(&settings.name)
            .await
            .context("reading updated network profile")
    }

    /// Delete a profile by name and wait for the job. VMware Cloud
    /// profiles are left in place.
    pub async fn delete_network_profile(&self, name: &str, vmc: bool) -> Result<(), CoreError> {
        if vmc {
            info!(name, "network profile is owned by VMware Cloud, leaving it in place");
            return Ok(());
        }
        let client = self.client();
        let profile = self
            .resolver()
            .network_profile_by_name(name)
            .await
            .context("looking up network profile")?;
        let deleted = client
            .delete_network_profile(&profile.object_id)
            .await
            .context("deleting network profile")?;
        await_job(client, &deleted.data.job_id, &self.polling().job_policy())
            .await
            .context("waiting for network profile deletion")?;
        info!(name, "network profile deleted");
        Ok(())
    }
}
