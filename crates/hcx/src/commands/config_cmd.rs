//! Config subcommand handlers.

use std::fmt::Write as _;

use hcx_config::{Config, Profile, SecretKind};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;

// ── Helpers ─────────────────────────────────────────────────────────

fn mask(secret: Option<&str>) -> Option<&'static str> {
    secret.map(|_| "****")
}

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let strings = [
            ("url", p.url.as_deref()),
            ("admin_url", p.admin_url.as_deref()),
            ("username", p.username.as_deref()),
            ("password", mask(p.password.as_deref())),
            ("admin_username", p.admin_username.as_deref()),
            ("admin_password", mask(p.admin_password.as_deref())),
            ("cloud_token", mask(p.cloud_token.as_deref())),
        ];
        for (key, value) in strings
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
        {
            let _ = writeln!(out, "{key} = \"{value}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Copy secrets from the environment into the keyring.
fn store_env_secrets(profile_name: &str) -> Result<Vec<&'static str>, CliError> {
    let sources = [
        (hcx_config::ENV_PASSWORD, SecretKind::Password),
        (hcx_config::ENV_ADMIN_PASSWORD, SecretKind::AdminPassword),
        (hcx_config::ENV_VMC_API_TOKEN, SecretKind::CloudToken),
    ];
    let mut stored = Vec::new();
    for (var, kind) in sources {
        if let Some(secret) = std::env::var(var).ok().filter(|s| !s.is_empty()) {
            hcx_config::store_secret(profile_name, kind, &secret)?;
            stored.push(var);
        }
    }
    Ok(stored)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            name,
            url,
            username,
            admin_username,
            ca_cert,
            keyring,
            default,
        } => {
            let mut cfg = config::load_config_or_default();
            let name = name.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let profile = Profile {
                url: Some(url),
                username,
                admin_username,
                ca_cert,
                ..Profile::default()
            };
            cfg.profiles.insert(name.clone(), profile);
            if default || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(name.clone());
            }
            config::save_config(&cfg)?;

            if keyring {
                for var in store_env_secrets(&name)? {
                    if !global.quiet {
                        eprintln!("Stored {var} in the system keyring");
                    }
                }
            }
            if !global.quiet {
                eprintln!(
                    "Profile '{name}' written to {}",
                    config::config_path().display()
                );
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            print!("{}", format_config_redacted(&cfg));
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_masked() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                url: Some("https://hcx.lab.local".into()),
                username: Some("administrator@vsphere.local".into()),
                password: Some("VMware1!".into()),
                cloud_token: Some("token".into()),
                ..Profile::default()
            },
        );
        let shown = format_config_redacted(&cfg);
        assert!(shown.contains("[profiles.lab]"));
        assert!(shown.contains("username = \"administrator@vsphere.local\""));
        assert!(shown.contains("password = \"****\""));
        assert!(shown.contains("cloud_token = \"****\""));
        assert!(!shown.contains("VMware1!"));
        assert!(!shown.contains("admin_password"));
    }
}
