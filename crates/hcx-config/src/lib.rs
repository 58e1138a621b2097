//! Shared configuration for HCX tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `hcx_core::HcxConfig`. The CLI layers its own
//! flag overrides on top of the config built here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hcx_core::{BackoffConfig, Credentials, HcxConfig, PollingConfig, TlsVerification};

/// Keyring service every stored secret lives under.
pub const KEYRING_SERVICE: &str = "hcx";

// Environment variables shared with other HCX automation.
pub const ENV_URL: &str = "HCX_URL";
pub const ENV_USER: &str = "HCX_USER";
pub const ENV_PASSWORD: &str = "HCX_PASSWORD";
pub const ENV_ADMIN_USER: &str = "HCX_ADMIN_USER";
pub const ENV_ADMIN_PASSWORD: &str = "HCX_ADMIN_PASSWORD";
pub const ENV_ALLOW_UNVERIFIED_SSL: &str = "HCX_ALLOW_UNVERIFIED_SSL";
pub const ENV_VMC_API_TOKEN: &str = "VMC_API_TOKEN";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named connector profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format: "json" or "yaml".
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "json".into()
}
fn default_timeout() -> u64 {
    30
}

/// One HCX connector and the accounts used against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Connector URL (e.g., "https://hcx.corp.local"). `HCX_URL` wins.
    pub url: Option<String>,

    /// Admin API URL, when it is not the connector host on port 9443.
    pub admin_url: Option<String>,

    /// vCenter/SSO user for the connector API.
    pub username: Option<String>,

    /// Password of `username` (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Appliance admin user for the port-9443 API.
    pub admin_username: Option<String>,

    pub admin_password: Option<String>,

    /// VMware Cloud services API token.
    pub cloud_token: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,

    /// Admin API request timeout in seconds.
    pub admin_timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "PollingOverrides::is_empty")]
    pub polling: PollingOverrides,
}

/// Per-profile overrides of the wait loops. Durations are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PollingOverrides {
    pub job_interval: Option<u64>,
    pub job_max_attempts: Option<u32>,
    pub certificate_wait: Option<u64>,
    pub max_certificate_waits: Option<u32>,
    pub pairing_interval: Option<u64>,
    pub pairing_attempts: Option<u32>,
    pub pairing_delete_attempts: Option<u32>,
    pub sddc_interval: Option<u64>,
    pub sddc_backoff_base: Option<u64>,
    pub sddc_backoff_max: Option<u64>,
    pub sddc_max_retries: Option<u32>,
    pub app_engine_settle: Option<u64>,
}

impl PollingOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Default polling policy with these overrides applied.
    pub fn apply(&self) -> PollingConfig {
        let mut polling = PollingConfig::default();
        let secs = Duration::from_secs;

        if let Some(v) = self.job_interval {
            polling.job_interval = secs(v);
        }
        if self.job_max_attempts.is_some() {
            polling.job_max_attempts = self.job_max_attempts;
        }
        if let Some(v) = self.certificate_wait {
            polling.certificate_wait = secs(v);
        }
        if self.max_certificate_waits.is_some() {
            polling.max_certificate_waits = self.max_certificate_waits;
        }
        if let Some(v) = self.pairing_interval {
            polling.pairing_interval = secs(v);
        }
        if let Some(v) = self.pairing_attempts {
            polling.pairing_attempts = v;
        }
        if let Some(v) = self.pairing_delete_attempts {
            polling.pairing_delete_attempts = v;
        }
        if let Some(v) = self.sddc_interval {
            polling.sddc_interval = secs(v);
        }
        let backoff: &mut BackoffConfig = &mut polling.sddc_backoff;
        if let Some(v) = self.sddc_backoff_base {
            backoff.base = secs(v);
        }
        if let Some(v) = self.sddc_backoff_max {
            backoff.max = secs(v);
        }
        if let Some(v) = self.sddc_max_retries {
            backoff.max_retries = v;
        }
        if let Some(v) = self.app_engine_settle {
            polling.app_engine_settle = secs(v);
        }
        polling
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "hcx", "hcx")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hcx");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then the TOML file at `path`, then `HCX_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HCX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// The profile name in effect: explicit, then the config's default.
pub fn active_profile_name(explicit: Option<&str>, config: &Config) -> String {
    explicit
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

// ── Credential resolution ───────────────────────────────────────────

/// Secrets a profile can keep in the OS keyring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Password,
    AdminPassword,
    CloudToken,
}

impl SecretKind {
    fn env_var(self) -> &'static str {
        match self {
            Self::Password => ENV_PASSWORD,
            Self::AdminPassword => ENV_ADMIN_PASSWORD,
            Self::CloudToken => ENV_VMC_API_TOKEN,
        }
    }

    /// Keyring entry name, `"{profile}/{kind}"`.
    pub fn keyring_user(self, profile_name: &str) -> String {
        let kind = match self {
            Self::Password => "password",
            Self::AdminPassword => "admin-password",
            Self::CloudToken => "cloud-token",
        };
        format!("{profile_name}/{kind}")
    }

    fn plaintext(self, profile: &Profile) -> Option<&String> {
        match self {
            Self::Password => profile.password.as_ref(),
            Self::AdminPassword => profile.admin_password.as_ref(),
            Self::CloudToken => profile.cloud_token.as_ref(),
        }
    }
}

/// Store a secret in the OS keyring for `profile_name`.
pub fn store_secret(profile_name: &str, kind: SecretKind, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &kind.keyring_user(profile_name))?;
    entry.set_password(secret)?;
    Ok(())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Resolve one secret: environment, then keyring, then plaintext.
pub fn resolve_secret(profile: &Profile, profile_name: &str, kind: SecretKind) -> Option<SecretString> {
    // 1. Env var
    if let Some(val) = env_value(kind.env_var()) {
        return Some(SecretString::from(val));
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &kind.keyring_user(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    kind.plaintext(profile).map(|s| SecretString::from(s.clone()))
}

fn resolve_account(
    profile_name: &str,
    username: Option<String>,
    password: Option<SecretString>,
) -> Result<Option<Credentials>, ConfigError> {
    match (username, password) {
        (Some(user), Some(pw)) => Ok(Some(Credentials::new(user, pw))),
        (None, _) => Ok(None),
        (Some(_), None) => Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        }),
    }
}

/// Connector (vCenter/SSO) credentials. `None` when no user is configured.
pub fn resolve_consumer_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<Credentials>, ConfigError> {
    let username = env_value(ENV_USER).or_else(|| profile.username.clone());
    let password = resolve_secret(profile, profile_name, SecretKind::Password);
    resolve_account(profile_name, username, password)
}

/// Admin API credentials. `None` when no admin user is configured.
pub fn resolve_admin_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<Credentials>, ConfigError> {
    let username = env_value(ENV_ADMIN_USER).or_else(|| profile.admin_username.clone());
    let password = resolve_secret(profile, profile_name, SecretKind::AdminPassword);
    resolve_account(profile_name, username, password)
}

fn parse_flag(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

fn parse_url(field: &str, raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build an `HcxConfig` from a profile and the environment.
///
/// At least one of the connector account, the admin account or the cloud
/// token must resolve.
pub fn profile_to_hcx_config(profile: &Profile, profile_name: &str) -> Result<HcxConfig, ConfigError> {
    let raw_url = env_value(ENV_URL)
        .or_else(|| profile.url.clone())
        .ok_or_else(|| ConfigError::Validation {
            field: "url".into(),
            reason: format!("no connector URL (set {ENV_URL} or the profile's url)"),
        })?;
    let mut config = HcxConfig::new(parse_url("url", &raw_url)?);

    if let Some(ref admin) = profile.admin_url {
        config.admin_url = Some(parse_url("admin_url", admin)?);
    }

    config.consumer = resolve_consumer_credentials(profile, profile_name)?;
    config.admin = resolve_admin_credentials(profile, profile_name)?;
    config.cloud_token = resolve_secret(profile, profile_name, SecretKind::CloudToken);
    if config.consumer.is_none() && config.admin.is_none() && config.cloud_token.is_none() {
        return Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        });
    }

    let insecure = match env_value(ENV_ALLOW_UNVERIFIED_SSL) {
        Some(flag) => parse_flag(ENV_ALLOW_UNVERIFIED_SSL, &flag)?,
        None => profile.insecure.unwrap_or(false),
    };
    config.tls = if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    if let Some(secs) = profile.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = profile.admin_timeout {
        config.admin_timeout = Duration::from_secs(secs);
    }
    config.polling = profile.polling.apply();

    Ok(config)
}
