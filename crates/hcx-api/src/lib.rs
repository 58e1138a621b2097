// hcx-api: Async Rust client for the HCX connector, admin and cloud-services APIs

pub mod admin;
pub mod appliances;
pub mod auth;
pub mod certificates;
pub mod client;
pub mod cloud;
pub mod compute_profiles;
pub mod error;
pub mod inventory;
pub mod jobs;
pub mod l2_extensions;
pub mod models;
pub mod network_profiles;
pub mod service_mesh;
pub mod session;
pub mod site_pairing;
pub mod transport;

pub use auth::{AuthKind, Credentials, SessionCredentials};
pub use client::{CloudEndpoints, HcxClient};
pub use error::Error;
pub use session::LoginPolicy;
pub use transport::{TlsMode, TransportConfig};
