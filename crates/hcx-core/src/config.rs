// ── Runtime connection configuration ──
//
// These types describe how to reach one HCX connector (and the cloud
// services behind it) and how patiently to wait on it. They carry
// credential data and polling policy, but never touch disk. The CLI
// builds an `HcxConfig` and hands it to `Orchestrator::new`.

use std::path::PathBuf;
use std::time::Duration;

use hcx_api::{CloudEndpoints, Credentials, HcxClient, LoginPolicy, SessionCredentials};
use hcx_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::backoff::BackoffConfig;
use crate::error::CoreError;
use crate::poller::PollPolicy;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Appliances ship with self-signed certificates,
    /// so this is common, but it must be asked for explicitly.
    DangerAcceptInvalid,
}

/// Intervals and bounds of every wait loop.
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Pause between job and task status polls.
    pub job_interval: Duration,
    /// Upper bound on job/task polls. `None` polls until a terminal state.
    pub job_max_attempts: Option<u32>,
    /// Pause between logins while trusted root certificates are pending.
    pub certificate_wait: Duration,
    /// Upper bound on certificate waits at login. `None` waits forever.
    pub max_certificate_waits: Option<u32>,
    /// Pause before the single retry of a login that failed in transport.
    pub login_retry_delay: Duration,
    pub pairing_interval: Duration,
    /// Polls of a pairing job before it is submitted once more.
    pub pairing_attempts: u32,
    /// Pause between pairing-list checks after a pairing delete.
    pub pairing_delete_interval: Duration,
    /// Pairing-list checks before a delete is reported as stuck.
    pub pairing_delete_attempts: u32,
    /// Pause between SDDC status polls that returned a status.
    pub sddc_interval: Duration,
    /// Backoff for SDDC status polls that failed.
    pub sddc_backoff: BackoffConfig,
    pub app_engine_interval: Duration,
    /// Pause after the app engine restarts, before the vCenter is usable.
    pub app_engine_settle: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            job_interval: Duration::from_secs(5),
            job_max_attempts: None,
            certificate_wait: Duration::from_secs(10),
            max_certificate_waits: None,
            login_retry_delay: Duration::from_secs(180),
            pairing_interval: Duration::from_secs(10),
            pairing_attempts: 5,
            pairing_delete_interval: Duration::from_secs(5),
            pairing_delete_attempts: 60,
            sddc_interval: Duration::from_secs(10),
            sddc_backoff: BackoffConfig::default(),
            app_engine_interval: Duration::from_secs(5),
            app_engine_settle: Duration::from_secs(60),
        }
    }
}

impl PollingConfig {
    /// Policy of ordinary job and task waits.
    pub fn job_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.job_interval,
            max_attempts: self.job_max_attempts,
        }
    }

    /// Bounded policy of pairing job waits.
    pub fn pairing_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.pairing_interval,
            max_attempts: Some(self.pairing_attempts),
        }
    }

    pub fn login_policy(&self) -> LoginPolicy {
        LoginPolicy {
            certificate_wait: self.certificate_wait,
            max_certificate_waits: self.max_certificate_waits,
            transport_retry_delay: self.login_retry_delay,
        }
    }
}

/// Configuration for one HCX connector.
///
/// Built by the CLI, passed to `Orchestrator`. Core never reads config files.
#[derive(Debug, Clone)]
pub struct HcxConfig {
    /// Connector URL (e.g., `https://hcx.corp.local`).
    pub url: Url,
    /// Admin API URL. Defaults to the connector host on port 9443.
    pub admin_url: Option<Url>,
    /// vCenter/SSO user for the connector session API.
    pub consumer: Option<Credentials>,
    /// Appliance admin user for the port-9443 API.
    pub admin: Option<Credentials>,
    /// Cloud services API token, needed for SDDC activation.
    pub cloud_token: Option<SecretString>,
    pub tls: TlsVerification,
    /// Timeout of connector and cloud requests.
    pub timeout: Duration,
    /// Timeout of admin API requests.
    pub admin_timeout: Duration,
    /// Cloud-services endpoints. Defaults to the public VMware services.
    pub cloud_endpoints: Option<CloudEndpoints>,
    pub polling: PollingConfig,
}

impl HcxConfig {
    /// A config for `url` with no credentials and default policies.
    pub fn new(url: Url) -> Self {
        let transport = TransportConfig::default();
        Self {
            url,
            admin_url: None,
            consumer: None,
            admin: None,
            cloud_token: None,
            tls: TlsVerification::default(),
            timeout: transport.timeout,
            admin_timeout: transport.admin_timeout,
            cloud_endpoints: None,
            polling: PollingConfig::default(),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
            admin_timeout: self.admin_timeout,
        }
    }

    /// Build the API client this config describes.
    pub fn build_client(&self) -> Result<HcxClient, CoreError> {
        let credentials = SessionCredentials {
            consumer: self.consumer.clone(),
            admin: self.admin.clone(),
            cloud_refresh_token: self.cloud_token.clone(),
        };
        let mut client = HcxClient::new(self.url.clone(), credentials, &self.transport())?
            .with_login_policy(self.polling.login_policy());
        if let Some(admin_url) = &self.admin_url {
            client = client.with_admin_url(admin_url.clone());
        }
        if let Some(cloud) = &self.cloud_endpoints {
            client = client.with_cloud_endpoints(cloud.clone());
        }
        Ok(client)
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_connector_timings() {
        let config = HcxConfig::new("https://hcx.corp.local".parse().unwrap());
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
        assert_eq!(config.polling.job_interval, Duration::from_secs(5));
        assert_eq!(config.polling.pairing_attempts, 5);
        assert_eq!(config.polling.pairing_delete_attempts, 60);
        assert!(config.polling.job_policy().max_attempts.is_none());
        assert_eq!(config.polling.pairing_policy().max_attempts, Some(5));
    }

    #[test]
    fn admin_url_override_reaches_client() {
        let mut config = HcxConfig::new("https://hcx.corp.local".parse().unwrap());
        config.admin_url = Some("https://hcx-admin.corp.local:9443".parse().unwrap());
        let client = config.build_client().unwrap();
        assert_eq!(client.admin_url().as_str(), "https://hcx-admin.corp.local:9443/");
    }
}
