//! Compute profile command handlers.

use std::collections::BTreeMap;

use hcx_core::{NetworkRole, NewComputeProfile, Orchestrator};

use crate::cli::{ComputeProfileArgs, ComputeProfileCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// Role assignments from the per-role flags. Unset roles are left out.
fn role_networks(
    management: String,
    replication: Option<String>,
    uplink: Option<String>,
    vmotion: Option<String>,
) -> BTreeMap<NetworkRole, String> {
    let mut networks = BTreeMap::from([(NetworkRole::Management, management)]);
    let optional = [
        (NetworkRole::Replication, replication),
        (NetworkRole::Uplink, uplink),
        (NetworkRole::Vmotion, vmotion),
    ];
    for (role, id) in optional {
        if let Some(id) = id {
            networks.insert(role, id);
        }
    }
    networks
}

pub async fn handle(
    orchestrator: &Orchestrator,
    args: ComputeProfileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ComputeProfileCommand::Create {
            name,
            datacenter,
            cluster,
            datastore,
            dvs,
            services,
            management_network,
            replication_network,
            uplink_network,
            vmotion_network,
            dry_run,
        } => {
            let profile = NewComputeProfile {
                name,
                datacenter,
                cluster,
                datastore,
                dvs,
                services,
                networks: role_networks(
                    management_network,
                    replication_network,
                    uplink_network,
                    vmotion_network,
                ),
            };
            let result = if dry_run {
                orchestrator.compose_compute_profile(&profile).await?
            } else {
                orchestrator.create_compute_profile(&profile).await?
            };
            output::emit(global, &result)
        }

        ComputeProfileCommand::Delete { id } => {
            orchestrator.delete_compute_profile(&id).await?;
            output::status(global, &format!("Compute profile {id} deleted"));
            Ok(())
        }

        ComputeProfileCommand::Show { name, endpoint } => {
            let endpoint = util::endpoint_or_local(orchestrator, endpoint).await?;
            let profile = orchestrator.compute_profile(&endpoint, &name).await?;
            output::emit(global, &profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_roles_are_left_out() {
        let networks = role_networks("np-mgmt".into(), None, Some("np-up".into()), None);
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[&NetworkRole::Management], "np-mgmt");
        assert_eq!(networks[&NetworkRole::Uplink], "np-up");
    }
}
