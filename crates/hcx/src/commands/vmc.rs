//! VMware Cloud SDDC command handlers.

use hcx_core::{Orchestrator, SddcSelector};

use crate::cli::{GlobalOpts, SddcArgs, VmcArgs, VmcCommand};
use crate::error::CliError;
use crate::output;

fn selector(args: SddcArgs) -> Result<SddcSelector, CliError> {
    match (args.id, args.name) {
        (Some(id), _) => Ok(SddcSelector::Id(id)),
        (None, Some(name)) => Ok(SddcSelector::Name(name)),
        (None, None) => Err(CliError::Validation {
            field: "sddc".into(),
            reason: "one of --id or --name is required".into(),
        }),
    }
}

pub async fn handle(
    orchestrator: &Orchestrator,
    args: VmcArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VmcCommand::Activate(sddc) => {
            let selector = selector(sddc)?;
            output::status(global, &format!("Activating HCX on SDDC {selector}, this takes a while"));
            let active = orchestrator.activate_sddc(&selector).await?;
            output::emit(global, &active)
        }

        VmcCommand::Deactivate(sddc) => {
            let selector = selector(sddc)?;
            output::status(global, &format!("Deactivating HCX on SDDC {selector}, this takes a while"));
            orchestrator.deactivate_sddc(&selector).await?;
            output::status(global, &format!("HCX deactivated on SDDC {selector}"));
            Ok(())
        }

        VmcCommand::Show(sddc) => {
            let sddc = orchestrator.sddc(&selector(sddc)?).await?;
            output::emit(global, &sddc)
        }
    }
}
