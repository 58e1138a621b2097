//! CLI-side configuration: global flag overrides on top of `hcx-config`.
//!
//! Core never sees these types -- it receives a pre-built `HcxConfig`.

use std::time::Duration;

use hcx_config::{Config, Profile};
use hcx_core::{HcxConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use hcx_config::{config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    hcx_config::active_profile_name(global.profile.as_deref(), config)
}

/// The profile to build from. A profile named on the command line must
/// exist; otherwise a missing profile means "environment only".
fn select_profile(global: &GlobalOpts, config: &Config, name: &str) -> Result<Profile, CliError> {
    if let Some(profile) = config.profiles.get(name) {
        return Ok(profile.clone());
    }
    if global.profile.is_some() {
        let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: name.into(),
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }
    Ok(Profile::default())
}

/// Build an `HcxConfig` from the config file, profile, and CLI overrides.
pub fn build_hcx_config(global: &GlobalOpts) -> Result<HcxConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let mut profile = select_profile(global, &cfg, &profile_name)?;

    if profile.timeout.is_none() {
        profile.timeout = Some(cfg.defaults.timeout);
    }
    if profile.insecure.is_none() && cfg.defaults.insecure {
        profile.insecure = Some(true);
    }
    // A URL flag has to beat HCX_URL, so it is applied after resolution.
    if global.connector.is_some() && profile.url.is_none() {
        profile.url.clone_from(&global.connector);
    }

    let mut config = hcx_config::profile_to_hcx_config(&profile, &profile_name)?;
    apply_overrides(&mut config, global)?;
    Ok(config)
}

fn apply_overrides(config: &mut HcxConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref raw) = global.connector {
        config.url = raw.parse().map_err(|_| CliError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn global() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            connector: None,
            output: OutputFormat::Json,
            verbose: 0,
            quiet: false,
            insecure: false,
            timeout: None,
        }
    }

    #[test]
    fn flags_override_the_profile() {
        let mut config = HcxConfig::new("https://hcx.file.local".parse().unwrap());
        let opts = GlobalOpts {
            connector: Some("https://hcx.flag.local".into()),
            insecure: true,
            timeout: Some(5),
            ..global()
        };
        apply_overrides(&mut config, &opts).unwrap();
        assert_eq!(config.url.as_str(), "https://hcx.flag.local/");
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn named_profile_must_exist() {
        let mut cfg = Config::default();
        cfg.profiles.insert("lab".into(), Profile::default());
        let opts = GlobalOpts {
            profile: Some("prod".into()),
            ..global()
        };
        let err = select_profile(&opts, &cfg, "prod").unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "lab"));
    }

    #[test]
    fn missing_default_profile_falls_back_to_environment() {
        let cfg = Config::default();
        let profile = select_profile(&global(), &cfg, "default").unwrap();
        assert_eq!(profile, Profile::default());
    }
}
