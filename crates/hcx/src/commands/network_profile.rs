//! Network profile command handlers.

use hcx_core::{NetworkProfileSettings, Orchestrator};

use crate::cli::{GlobalOpts, NetworkProfileArgs, NetworkProfileCommand, NetworkProfileOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn settings(opts: NetworkProfileOpts) -> Result<NetworkProfileSettings, CliError> {
    let ip_ranges = opts
        .ip_ranges
        .iter()
        .map(|raw| util::parse_ip_range(raw))
        .collect::<Result<Vec<_>, _>>()?;
    if !opts.vmc && opts.network.is_empty() {
        return Err(CliError::Validation {
            field: "network".into(),
            reason: "required unless --vmc is set".into(),
        });
    }
    Ok(NetworkProfileSettings {
        name: opts.name,
        network_name: opts.network,
        network_type: opts.network_type,
        mtu: opts.mtu,
        prefix_length: opts.prefix_length,
        gateway: opts.gateway,
        primary_dns: opts.primary_dns,
        secondary_dns: opts.secondary_dns,
        dns_suffix: opts.dns_suffix,
        ip_ranges,
        vmc: opts.vmc,
    })
}

pub async fn handle(
    orchestrator: &Orchestrator,
    args: NetworkProfileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NetworkProfileCommand::Create(opts) => {
            let pairing = opts.site_pairing.clone();
            let settings = settings(opts)?;
            let context = util::pairing_context(orchestrator, pairing.as_deref(), settings.vmc).await?;
            let profile = orchestrator.create_network_profile(&context, &settings).await?;
            output::emit(global, &profile)
        }

        NetworkProfileCommand::Update(opts) => {
            let pairing = opts.site_pairing.clone();
            let settings = settings(opts)?;
            let context = util::pairing_context(orchestrator, pairing.as_deref(), settings.vmc).await?;
            let profile = orchestrator.update_network_profile(&context, &settings).await?;
            output::emit(global, &profile)
        }

        NetworkProfileCommand::Delete { name, vmc } => {
            orchestrator.delete_network_profile(&name, vmc).await?;
            output::status(global, &format!("Network profile {name} deleted"));
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn opts(network: &str, vmc: bool) -> NetworkProfileOpts {
        NetworkProfileOpts {
            name: "np-mgmt".into(),
            site_pairing: None,
            network: network.into(),
            network_type: "DistributedVirtualPortgroup".into(),
            mtu: 1500,
            prefix_length: 24,
            gateway: "10.0.0.1".into(),
            primary_dns: String::new(),
            secondary_dns: String::new(),
            dns_suffix: String::new(),
            ip_ranges: vec!["10.0.0.10-10.0.0.20".into(), "10.0.0.30-10.0.0.40".into()],
            vmc,
        }
    }

    #[test]
    fn ranges_are_parsed_in_order() {
        let settings = settings(opts("VM-MGMT", false)).unwrap();
        assert_eq!(settings.ip_ranges.len(), 2);
        assert_eq!(settings.ip_ranges[1].start_address, "10.0.0.30");
    }

    #[test]
    fn connector_profiles_need_a_network() {
        assert!(matches!(
            settings(opts("", false)),
            Err(CliError::Validation { .. })
        ));
        assert!(settings(opts("", true)).is_ok());
    }
}
