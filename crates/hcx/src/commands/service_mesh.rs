//! Service mesh command handlers.

use hcx_core::{NewServiceMesh, Orchestrator};

use crate::cli::{GlobalOpts, ServiceMeshArgs, ServiceMeshCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    orchestrator: &Orchestrator,
    args: ServiceMeshArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ServiceMeshCommand::Create {
            name,
            site_pairing,
            local_compute_profile,
            remote_compute_profile,
            services,
            uplink_max_bandwidth,
            app_path_resiliency,
            tcp_flow_conditioning,
            appliance_count,
        } => {
            let context = orchestrator.site_pairing(&site_pairing).await?;
            let mesh = NewServiceMesh {
                name,
                local_compute_profile,
                remote_compute_profile,
                services,
                uplink_max_bandwidth,
                app_path_resiliency,
                tcp_flow_conditioning,
                appliance_count,
            };
            let created = orchestrator.create_service_mesh(&context, &mesh).await?;
            output::emit(global, &created)
        }

        ServiceMeshCommand::Delete { id, force } => {
            orchestrator.delete_service_mesh(&id, force).await?;
            output::status(global, &format!("Service mesh {id} deleted"));
            Ok(())
        }
    }
}
