//! Site pairing command handlers.

use hcx_core::{NewSitePairing, Orchestrator};
use secrecy::SecretString;

use crate::cli::{GlobalOpts, SitePairingArgs, SitePairingCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    orchestrator: &Orchestrator,
    args: SitePairingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SitePairingCommand::Create {
            url,
            username,
            password,
        } => {
            let pairing = NewSitePairing {
                url,
                username,
                password: SecretString::from(password),
            };
            let context = orchestrator.create_site_pairing(&pairing).await?;
            output::emit(global, &context)
        }

        SitePairingCommand::Show { url } => {
            let context = orchestrator.site_pairing(&url).await?;
            output::emit(global, &context)
        }

        SitePairingCommand::Delete { url } => {
            orchestrator.delete_site_pairing(&url).await?;
            output::status(global, &format!("Site pairing with {url} deleted"));
            Ok(())
        }
    }
}
