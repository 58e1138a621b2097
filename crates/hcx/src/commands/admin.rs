//! Admin API command handlers: activation, SSO, vCenter, location, roles.

use hcx_core::models::Location;
use hcx_core::{Orchestrator, RoleGroups};
use secrecy::SecretString;

use crate::cli::{
    ActivationArgs, ActivationCommand, GlobalOpts, LocationArgs, LocationCommand,
    RoleMappingArgs, SsoArgs, SsoCommand, VcenterArgs, VcenterCommand,
};
use crate::error::CliError;
use crate::output;

pub async fn activation(
    orchestrator: &Orchestrator,
    args: ActivationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ActivationCommand::Set { url, key } => {
            let activation = orchestrator.activate(&url, &key).await?;
            output::emit(global, &activation)
        }
        ActivationCommand::Show => {
            let activation = orchestrator.activation().await?;
            output::emit(global, &activation)
        }
    }
}

pub async fn sso(
    orchestrator: &Orchestrator,
    args: SsoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SsoCommand::Set { url } => {
            let config = orchestrator.configure_sso(&url).await?;
            output::emit(global, &config)
        }
        SsoCommand::Remove { uuid } => {
            orchestrator.remove_sso(&uuid).await?;
            output::status(global, &format!("Lookup service {uuid} removed"));
            Ok(())
        }
    }
}

pub async fn vcenter(
    orchestrator: &Orchestrator,
    args: VcenterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VcenterCommand::Register {
            url,
            username,
            password,
        } => {
            output::status(global, "Registering vCenter, the app engine restarts afterwards");
            let registration = orchestrator
                .register_vcenter(&url, &username, &SecretString::from(password))
                .await?;
            output::emit(global, &registration)
        }
        VcenterCommand::Remove { uuid } => {
            orchestrator.remove_vcenter(&uuid).await?;
            output::status(global, &format!("vCenter {uuid} removed"));
            Ok(())
        }
    }
}

pub async fn location(
    orchestrator: &Orchestrator,
    args: LocationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LocationCommand::Set {
            city,
            country,
            city_ascii,
            province,
            latitude,
            longitude,
        } => {
            let location = Location {
                city_ascii: city_ascii.unwrap_or_else(|| city.clone()),
                city,
                country,
                province,
                latitude,
                longitude,
            };
            orchestrator.set_location(&location).await?;
            output::emit(global, &location)
        }
        LocationCommand::Clear => {
            orchestrator.set_location(&Location::default()).await?;
            output::status(global, "Location cleared");
            Ok(())
        }
        LocationCommand::Show => {
            let location = orchestrator.location().await?;
            output::emit(global, &location)
        }
    }
}

pub async fn role_mapping(
    orchestrator: &Orchestrator,
    args: RoleMappingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let groups = RoleGroups {
        admin: args.admin,
        enterprise: args.enterprise,
    };
    let result = orchestrator.set_role_mappings(&groups).await?;
    output::emit(global, &result)
}
