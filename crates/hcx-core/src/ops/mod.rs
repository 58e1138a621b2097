// Composite operations, one module per remote object kind. Each module
// adds an `impl Orchestrator` block.

pub mod admin;
pub mod compute_profile;
pub mod l2_extension;
pub mod network_profile;
pub mod service_mesh;
pub mod site_pairing;
pub mod vmc;
