//! Network backing lookup.

use hcx_core::Orchestrator;

use crate::cli::{GlobalOpts, NetworkBackingArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    orchestrator: &Orchestrator,
    args: NetworkBackingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let endpoint = util::endpoint_or_local(orchestrator, args.endpoint).await?;
    let backing = orchestrator
        .network_backing(&endpoint, &args.name, &args.network_type)
        .await?;
    output::emit(global, &backing)
}
