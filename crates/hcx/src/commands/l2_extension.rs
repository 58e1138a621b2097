//! L2 extension command handlers.

use hcx_core::{NewL2Extension, Orchestrator};

use crate::cli::{GlobalOpts, L2ExtensionArgs, L2ExtensionCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    orchestrator: &Orchestrator,
    args: L2ExtensionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        L2ExtensionCommand::Create {
            network,
            site_pairing,
            network_type,
            destination_t1,
            gateway,
            netmask,
            service_mesh,
            appliance,
            egress_optimization,
            mon,
        } => {
            let context = orchestrator.site_pairing(&site_pairing).await?;
            let extension = NewL2Extension {
                source_network: network,
                network_type,
                destination_t1,
                gateway,
                netmask,
                service_mesh_id: service_mesh,
                appliance_id: appliance,
                egress_optimization,
                mon,
            };
            let created = orchestrator.create_l2_extension(&context, &extension).await?;
            output::emit(global, &created)
        }

        L2ExtensionCommand::Delete { stretch_id } => {
            orchestrator.delete_l2_extension(&stretch_id).await?;
            output::status(global, &format!("L2 extension {stretch_id} deleted"));
            Ok(())
        }
    }
}
