// ── Appliance administration ──
//
// Global configuration through the admin API: activation, the SSO lookup
// service, vCenter registration, location and role mappings. Registering
// a vCenter only takes effect once the app engine has been restarted.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hcx_api::models::{
    ActivationConfig, AppEngineStatus, Location, LookupServiceConfig, RoleMapping,
    RoleMappingResult, VcenterConfig, VcenterRegistration,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CoreError, ErrorContext};
use crate::orchestrator::Orchestrator;

/// Identity provider type of a vCenter SSO lookup service.
pub const SSO_PROVIDER_TYPE: &str = "PSC";

pub const SYSTEM_ADMINISTRATOR: &str = "System Administrator";
pub const ENTERPRISE_ADMINISTRATOR: &str = "Enterprise Administrator";

/// User groups granted each connector role. Empty lists revoke the role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGroups {
    pub admin: Vec<String>,
    pub enterprise: Vec<String>,
}

impl RoleGroups {
    pub fn mappings(&self) -> Vec<RoleMapping> {
        vec![
            RoleMapping {
                role: SYSTEM_ADMINISTRATOR.into(),
                user_groups: self.admin.clone(),
            },
            RoleMapping {
                role: ENTERPRISE_ADMINISTRATOR.into(),
                user_groups: self.enterprise.clone(),
            },
        ]
    }
}

fn first_config<T: Clone>(list: &hcx_api::models::AdminConfigList<T>) -> Option<T> {
    list.configs().next().cloned()
}

impl Orchestrator {
    // ── Activation ───────────────────────────────────────────────────

    /// Activate the connector with `activation_key`. A connector that is
    /// already activated keeps its activation, which is returned as-is.
    pub async fn activate(
        &self,
        url: &str,
        activation_key: &str,
    ) -> Result<ActivationConfig, CoreError> {
        let client = self.client();
        let current = client
            .get_activation()
            .await
            .context("reading activation")?;
        if let Some(existing) = first_config(&current) {
            info!(url = %existing.url, "connector already activated");
            return Ok(existing);
        }

        let created = client
            .insert_activation(&ActivationConfig {
                url: url.to_owned(),
                activation_key: activation_key.to_owned(),
                uuid: String::new(),
            })
            .await
            .context("activating connector")?;
        info!(url, "connector activated");
        first_config(&created).ok_or_else(|| CoreError::OperationFailed {
            operation: "activation".into(),
            id: url.to_owned(),
            reason: "no activation returned".into(),
        })
    }

    pub async fn activation(&self) -> Result<Option<ActivationConfig>, CoreError> {
        let current = self
            .client()
            .get_activation()
            .await
            .context("reading activation")?;
        Ok(first_config(&current))
    }

    // ── SSO ──────────────────────────────────────────────────────────

    /// Point the connector at the SSO lookup service at `url`, replacing
    /// any lookup service already configured.
    pub async fn configure_sso(&self, url: &str) -> Result<LookupServiceConfig, CoreError> {
        let client = self.client();
        let current = client
            .get_lookup_service()
            .await
            .context("reading lookup service")?;
        let mut config = LookupServiceConfig {
            lookup_service_url: url.to_owned(),
            provider_type: SSO_PROVIDER_TYPE.into(),
            uuid: String::new(),
        };

        let saved = match first_config(&current) {
            Some(existing) => {
                config.uuid = existing.uuid;
                client
                    .update_lookup_service(&config)
                    .await
                    .context("updating lookup service")?
            }
            None => client
                .insert_lookup_service(&config)
                .await
                .context("registering lookup service")?,
        };
        info!(url, "lookup service configured");
        Ok(first_config(&saved).unwrap_or(config))
    }

    pub async fn remove_sso(&self, uuid: &str) -> Result<(), CoreError> {
        self.client()
            .delete_lookup_service(uuid)
            .await
            .context("removing lookup service")?;
        info!(uuid, "lookup service removed");
        Ok(())
    }

    // ── vCenter ──────────────────────────────────────────────────────

    /// Register a vCenter, then restart the app engine so the connector
    /// picks it up.
    pub async fn register_vcenter(
        &self,
        url: &str,
        username: &str,
        password: &SecretString,
    ) -> Result<VcenterRegistration, CoreError> {
        let encoded = STANDARD.encode(password.expose_secret().as_bytes());
        let config = VcenterConfig {
            url: url.to_owned(),
            user_name: username.to_owned(),
            password: SecretString::from(encoded),
            vcuuid: String::new(),
            uuid: String::new(),
        };
        let created = self
            .client()
            .insert_vcenter(&config)
            .await
            .context("registering vCenter")?;
        let registration = first_config(&created).ok_or_else(|| CoreError::OperationFailed {
            operation: "vCenter registration".into(),
            id: url.to_owned(),
            reason: "no registration returned".into(),
        })?;
        info!(url, uuid = %registration.uuid, "vCenter registered");

        self.restart_app_engine().await?;
        Ok(registration)
    }

    pub async fn remove_vcenter(&self, uuid: &str) -> Result<(), CoreError> {
        self.client()
            .delete_vcenter(uuid)
            .await
            .context("removing vCenter")?;
        info!(uuid, "vCenter removed");
        Ok(())
    }

    async fn restart_app_engine(&self) -> Result<(), CoreError> {
        let client = self.client();
        if let Err(e) = client.stop_app_engine().await {
            warn!(error = %e, "app engine stop request failed, waiting for it anyway");
        }
        self.await_app_engine(AppEngineStatus::STOPPED).await?;

        if let Err(e) = client.start_app_engine().await {
            warn!(error = %e, "app engine start request failed, waiting for it anyway");
        }
        self.await_app_engine(AppEngineStatus::RUNNING).await?;

        let settle = self.polling().app_engine_settle;
        debug!(?settle, "app engine running, letting it settle");
        tokio::time::sleep(settle).await;
        info!("app engine restarted");
        Ok(())
    }

    async fn await_app_engine(&self, wanted: &str) -> Result<(), CoreError> {
        let polling = self.polling();
        let mut polls: u32 = 0;
        loop {
            let status = self
                .client()
                .app_engine_status()
                .await
                .context("reading app engine status")?;
            polls += 1;
            if status.result == wanted {
                return Ok(());
            }
            if polling.job_max_attempts.is_some_and(|max| polls >= max) {
                return Err(CoreError::PollLimitReached {
                    operation: "app engine".into(),
                    id: wanted.to_owned(),
                    attempts: polls,
                });
            }
            debug!(status = %status.result, wanted, "waiting for app engine");
            tokio::time::sleep(polling.app_engine_interval).await;
        }
    }

    // ── Location and roles ───────────────────────────────────────────

    pub async fn location(&self) -> Result<Location, CoreError> {
        self.client()
            .get_location()
            .await
            .context("reading location")
    }

    /// Set the connector location. `Location::default()` clears it.
    pub async fn set_location(&self, location: &Location) -> Result<(), CoreError> {
        self.client()
            .set_location(location)
            .await
            .context("setting location")?;
        info!(city = %location.city, country = %location.country, "location set");
        Ok(())
    }

    pub async fn set_role_mappings(&self, groups: &RoleGroups) -> Result<RoleMappingResult, CoreError> {
        let result = self
            .client()
            .put_role_mappings(&groups.mappings())
            .await
            .context("setting role mappings")?;
        info!(
            admin = groups.admin.len(),
            enterprise = groups.enterprise.len(),
            "role mappings set"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_groups_map_to_both_roles() {
        let groups = RoleGroups {
            admin: vec!["vsphere.local\\Administrators".into()],
            enterprise: Vec::new(),
        };
        let mappings = groups.mappings();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].role, "System Administrator");
        assert_eq!(mappings[0].user_groups, groups.admin);
        assert_eq!(mappings[1].role, "Enterprise Administrator");
        assert!(mappings[1].user_groups.is_empty());
    }

    #[test]
    fn vcenter_password_is_standard_base64() {
        assert_eq!(STANDARD.encode("VMware1!".as_bytes()), "Vk13YXJlMSE=");
    }
}
