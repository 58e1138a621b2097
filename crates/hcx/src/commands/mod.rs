//! Command dispatch: bridges CLI args -> orchestrator operations -> output.

pub mod admin;
pub mod compute_profile;
pub mod config_cmd;
pub mod l2_extension;
pub mod network_backing;
pub mod network_profile;
pub mod service_mesh;
pub mod site_pairing;
pub mod util;
pub mod vmc;

use hcx_core::Orchestrator;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a connector-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    orchestrator: &Orchestrator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::SitePairing(args) => site_pairing::handle(orchestrator, args, global).await,
        Command::NetworkProfile(args) => network_profile::handle(orchestrator, args, global).await,
        Command::ComputeProfile(args) => compute_profile::handle(orchestrator, args, global).await,
        Command::ServiceMesh(args) => service_mesh::handle(orchestrator, args, global).await,
        Command::L2Extension(args) => l2_extension::handle(orchestrator, args, global).await,
        Command::Vmc(args) => vmc::handle(orchestrator, args, global).await,
        Command::Activation(args) => admin::activation(orchestrator, args, global).await,
        Command::Sso(args) => admin::sso(orchestrator, args, global).await,
        Command::Vcenter(args) => admin::vcenter(orchestrator, args, global).await,
        Command::Location(args) => admin::location(orchestrator, args, global).await,
        Command::RoleMapping(args) => admin::role_mapping(orchestrator, args, global).await,
        Command::NetworkBacking(args) => network_backing::handle(orchestrator, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not talk to a connector".into(),
        }),
    }
}
