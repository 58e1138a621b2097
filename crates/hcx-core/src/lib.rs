// hcx-core: Orchestration of multi-step HCX changes on top of hcx-api.

pub mod appliance;
pub mod backoff;
pub mod config;
pub mod entity;
pub mod error;
pub mod network_roles;
pub mod ops;
pub mod orchestrator;
pub mod poller;
pub mod resolver;

// ── Primary re-exports ──────────────────────────────────────────────
pub use appliance::{ApplianceChoice, select_appliance};
pub use backoff::{BackoffConfig, RetryBudget, calculate_backoff};
pub use config::{HcxConfig, PollingConfig, TlsVerification};
pub use entity::{EntityKind, NamedEntity};
pub use error::{CoreError, ErrorContext};
pub use network_roles::{NetworkRole, TaggedNetwork, build_network_list};
pub use orchestrator::Orchestrator;
pub use poller::{OperationKind, OperationState, OperationStatus, PollPolicy, await_completion};
pub use resolver::{Query, Resolver, SddcSelector};

pub use ops::admin::RoleGroups;
pub use ops::compute_profile::NewComputeProfile;
pub use ops::l2_extension::NewL2Extension;
pub use ops::network_profile::NetworkProfileSettings;
pub use ops::service_mesh::{NewServiceMesh, ServiceMeshCreated};
pub use ops::site_pairing::{NewSitePairing, PairingContext};

// Wire types and credentials, for consumers that build requests.
pub use hcx_api::models;
pub use hcx_api::{CloudEndpoints, Credentials};
