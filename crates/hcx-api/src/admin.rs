// Appliance admin API (port 9443)
//
// Global configuration of the connector appliance: activation, SSO lookup
// service, vCenter registration, location, role mappings, and the app
// engine service. Every call uses HTTP basic auth with the admin user and
// the longer admin timeout.

use serde::de::IgnoredAny;
use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{
    ActivationConfig, AdminConfigList, AppEngineStatus, Location, LookupServiceConfig,
    RoleMapping, RoleMappingResult, VcenterConfig, VcenterRegistration,
};

const CONFIG_ROOT: &str = "/api/admin/global/config";

impl HcxClient {
    // ── Activation ───────────────────────────────────────────────────

    pub async fn get_activation(&self) -> Result<AdminConfigList<ActivationConfig>, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/hcx"))?;
        debug!("fetching activation config");
        self.get(AuthKind::Admin, url).await
    }

    pub async fn insert_activation(
        &self,
        config: &ActivationConfig,
    ) -> Result<AdminConfigList<ActivationConfig>, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/hcx"))?;
        debug!(url = %config.url, "activating connector");
        self.post(AuthKind::Admin, url, &AdminConfigList::single(config.clone()))
            .await
    }

    pub async fn delete_activation(
        &self,
        config: &ActivationConfig,
    ) -> Result<AdminConfigList<ActivationConfig>, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/hcx"))?;
        debug!("removing activation config");
        self.delete_with_body(AuthKind::Admin, url, &AdminConfigList::single(config.clone()))
            .await
    }

    // ── SSO lookup service ───────────────────────────────────────────

    pub async fn get_lookup_service(&self) -> Result<AdminConfigList<LookupServiceConfig>, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/lookupservice"))?;
        debug!("fetching lookup service config");
        self.get(AuthKind::Admin, url).await
    }

    pub async fn insert_lookup_service(
        &self,
        config: &LookupServiceConfig,
    ) -> Result<AdminConfigList<LookupServiceConfig>, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/lookupservice"))?;
        debug!(url = %config.lookup_service_url, "registering lookup service");
        self.post(AuthKind::Admin, url, &AdminConfigList::single(config.clone()))
            .await
    }

    /// Update the lookup service identified by `config.uuid`.
    pub async fn update_lookup_service(
        &self,
        config: &LookupServiceConfig,
    ) -> Result<AdminConfigList<LookupServiceConfig>, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/lookupservice/{}", config.uuid))?;
        debug!(uuid = %config.uuid, "updating lookup service");
        self.post(AuthKind::Admin, url, &AdminConfigList::single(config.clone()))
            .await
    }

    pub async fn delete_lookup_service(&self, uuid: &str) -> Result<(), Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/lookupservice/{uuid}"))?;
        debug!(uuid, "removing lookup service");
        let _: IgnoredAny = self.delete(AuthKind::Admin, url).await?;
        Ok(())
    }

    // ── vCenter ──────────────────────────────────────────────────────

    /// Register a vCenter. `config.password` must already be base64-encoded.
    pub async fn insert_vcenter(
        &self,
        config: &VcenterConfig,
    ) -> Result<AdminConfigList<VcenterRegistration>, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/vcenter"))?;
        debug!(url = %config.url, "registering vCenter");
        self.post(AuthKind::Admin, url, &AdminConfigList::single(config.clone()))
            .await
    }

    pub async fn delete_vcenter(&self, uuid: &str) -> Result<(), Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/vcenter/{uuid}"))?;
        debug!(uuid, "removing vCenter");
        let _: IgnoredAny = self.delete(AuthKind::Admin, url).await?;
        Ok(())
    }

    // ── Location ─────────────────────────────────────────────────────

    pub async fn get_location(&self) -> Result<Location, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/location"))?;
        debug!("fetching location");
        self.get(AuthKind::Admin, url).await
    }

    pub async fn set_location(&self, location: &Location) -> Result<(), Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/location"))?;
        debug!(city = %location.city, "setting location");
        let _: IgnoredAny = self.put(AuthKind::Admin, url, location).await?;
        Ok(())
    }

    // ── Role mappings ────────────────────────────────────────────────

    pub async fn put_role_mappings(
        &self,
        mappings: &[RoleMapping],
    ) -> Result<RoleMappingResult, Error> {
        let url = self.admin_api_url(&format!("{CONFIG_ROOT}/roleMappings"))?;
        debug!(count = mappings.len(), "setting role mappings");
        self.put(AuthKind::Admin, url, &mappings).await
    }

    // ── App engine ───────────────────────────────────────────────────

    /// `POST /components/appengine?action=start`
    pub async fn start_app_engine(&self) -> Result<AppEngineStatus, Error> {
        let url = self.admin_api_url("/components/appengine?action=start")?;
        debug!("starting app engine");
        self.post_empty(AuthKind::Admin, url).await
    }

    /// `POST /components/appengine?action=stop`
    pub async fn stop_app_engine(&self) -> Result<AppEngineStatus, Error> {
        let url = self.admin_api_url("/components/appengine?action=stop")?;
        debug!("stopping app engine");
        self.post_empty(AuthKind::Admin, url).await
    }

    /// `GET /components/appengine/status`
    pub async fn app_engine_status(&self) -> Result<AppEngineStatus, Error> {
        let url = self.admin_api_url("/components/appengine/status")?;
        self.get(AuthKind::Admin, url).await
    }
}
