//! Clap derive structures for the `hcx` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hcx -- drive HCX connectors from the command line
#[derive(Debug, Parser)]
#[command(
    name = "hcx",
    version,
    about = "Orchestrate HCX site pairing, profiles, service meshes and L2 extensions",
    long_about = "Runs the multi-step HCX changes (site pairing, network and compute\n\
        profiles, service meshes, L2 extensions, VMware Cloud SDDC activation and\n\
        appliance administration) and waits for each one to finish.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Connector profile to use
    #[arg(long, short = 'p', env = "HCX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Connector URL (overrides profile and HCX_URL)
    #[arg(long, short = 'c', global = true)]
    pub connector: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "HCX_OUTPUT", default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pair with a remote HCX site
    #[command(alias = "sp")]
    SitePairing(SitePairingArgs),

    /// Manage network profiles
    #[command(alias = "np")]
    NetworkProfile(NetworkProfileArgs),

    /// Manage compute profiles
    #[command(alias = "cp")]
    ComputeProfile(ComputeProfileArgs),

    /// Manage service meshes
    #[command(alias = "sm")]
    ServiceMesh(ServiceMeshArgs),

    /// Manage L2 network extensions
    #[command(alias = "l2")]
    L2Extension(L2ExtensionArgs),

    /// Activate or deactivate HCX on a VMware Cloud SDDC
    Vmc(VmcArgs),

    /// Activate the connector with a license key (admin API)
    Activation(ActivationArgs),

    /// Configure the SSO lookup service (admin API)
    Sso(SsoArgs),

    /// Register or remove the vCenter (admin API)
    Vcenter(VcenterArgs),

    /// Show or set the connector location (admin API)
    Location(LocationArgs),

    /// Map user groups to connector roles (admin API)
    RoleMapping(RoleMappingArgs),

    /// Look up a port group or NSX segment
    NetworkBacking(NetworkBackingArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Site pairing ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitePairingArgs {
    #[command(subcommand)]
    pub command: SitePairingCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitePairingCommand {
    /// Pair with the remote connector at URL and wait for the job
    Create {
        /// Remote connector URL
        url: String,

        /// User on the remote site
        #[arg(long)]
        username: String,

        /// Password of the remote user
        #[arg(long, env = "HCX_REMOTE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the pairing with URL and the endpoints around it
    Show {
        /// Remote connector URL
        url: String,
    },

    /// Remove the pairing with URL
    Delete {
        /// Remote connector URL
        url: String,
    },
}

// ── Network profiles ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworkProfileArgs {
    #[command(subcommand)]
    pub command: NetworkProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworkProfileCommand {
    /// Create a network profile (VMware Cloud profiles are updated)
    Create(NetworkProfileOpts),

    /// Rewrite an existing network profile
    Update(NetworkProfileOpts),

    /// Delete a network profile by name
    Delete {
        name: String,

        /// The profile belongs to VMware Cloud and is left in place
        #[arg(long)]
        vmc: bool,
    },
}

#[derive(Debug, Args)]
pub struct NetworkProfileOpts {
    /// Profile name
    pub name: String,

    /// Remote URL of the site pairing the profile belongs to
    #[arg(long)]
    pub site_pairing: Option<String>,

    /// Port group or segment backing the profile
    #[arg(long, default_value = "")]
    pub network: String,

    /// Backing type
    #[arg(long, default_value = "DistributedVirtualPortgroup")]
    pub network_type: String,

    #[arg(long, default_value_t = 1500)]
    pub mtu: u32,

    #[arg(long)]
    pub prefix_length: u8,

    #[arg(long)]
    pub gateway: String,

    #[arg(long, default_value = "")]
    pub primary_dns: String,

    #[arg(long, default_value = "")]
    pub secondary_dns: String,

    #[arg(long, default_value = "")]
    pub dns_suffix: String,

    /// IP range START-END (repeatable)
    #[arg(long = "ip-range", value_name = "START-END", required = true)]
    pub ip_ranges: Vec<String>,

    /// The profile belongs to VMware Cloud
    #[arg(long)]
    pub vmc: bool,
}

// ── Compute profiles ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ComputeProfileArgs {
    #[command(subcommand)]
    pub command: ComputeProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ComputeProfileCommand {
    /// Create a compute profile and wait for its task
    Create {
        name: String,

        /// Datacenter (defaults to the first one)
        #[arg(long)]
        datacenter: Option<String>,

        #[arg(long)]
        cluster: String,

        #[arg(long)]
        datastore: String,

        /// Distributed switch
        #[arg(long)]
        dvs: String,

        /// Service to enable (repeatable)
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,

        /// Network profile id of the management role
        #[arg(long)]
        management_network: String,

        #[arg(long)]
        replication_network: Option<String>,

        #[arg(long)]
        uplink_network: Option<String>,

        #[arg(long)]
        vmotion_network: Option<String>,

        /// Print the request body instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a compute profile by id
    Delete { id: String },

    /// Show a compute profile by name
    Show {
        name: String,

        /// Endpoint the profile belongs to (defaults to the local one)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

// ── Service meshes ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServiceMeshArgs {
    #[command(subcommand)]
    pub command: ServiceMeshCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServiceMeshCommand {
    /// Create a service mesh over a site pairing
    Create {
        name: String,

        /// Remote URL of the site pairing
        #[arg(long)]
        site_pairing: String,

        #[arg(long)]
        local_compute_profile: String,

        #[arg(long)]
        remote_compute_profile: String,

        /// Service to enable (repeatable)
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,

        /// Uplink bandwidth cap in Mbit/s
        #[arg(long, default_value_t = hcx_core::ops::service_mesh::DEFAULT_UPLINK_MAX_BANDWIDTH)]
        uplink_max_bandwidth: u32,

        #[arg(long)]
        app_path_resiliency: bool,

        #[arg(long)]
        tcp_flow_conditioning: bool,

        /// Network extension appliances per switch
        #[arg(long, default_value_t = 1)]
        appliance_count: u32,
    },

    /// Delete a service mesh by id
    Delete {
        id: String,

        /// Remove it even when the remote site is unreachable
        #[arg(long)]
        force: bool,
    },
}

// ── L2 extensions ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct L2ExtensionArgs {
    #[command(subcommand)]
    pub command: L2ExtensionCommand,
}

#[derive(Debug, Subcommand)]
pub enum L2ExtensionCommand {
    /// Extend a local network to the paired site
    Create {
        /// Port group or segment to extend
        network: String,

        /// Remote URL of the site pairing
        #[arg(long)]
        site_pairing: String,

        #[arg(long, default_value = "DistributedVirtualPortgroup")]
        network_type: String,

        /// Tier-1 gateway on the remote site
        #[arg(long)]
        destination_t1: String,

        #[arg(long)]
        gateway: String,

        #[arg(long)]
        netmask: String,

        /// Service mesh whose appliances carry the extension
        #[arg(long)]
        service_mesh: Option<String>,

        /// Use this appliance instead of selecting one
        #[arg(long)]
        appliance: Option<String>,

        #[arg(long)]
        egress_optimization: bool,

        /// Mobility optimized networking
        #[arg(long)]
        mon: bool,
    },

    /// Remove an extension by stretch id
    Delete { stretch_id: String },
}

// ── VMware Cloud ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VmcArgs {
    #[command(subcommand)]
    pub command: VmcCommand,
}

#[derive(Debug, Subcommand)]
pub enum VmcCommand {
    /// Activate HCX on an SDDC and wait until it is active
    Activate(SddcArgs),
    /// Deactivate HCX on an SDDC and wait until it is gone
    Deactivate(SddcArgs),
    /// Show an SDDC and its HCX status
    Show(SddcArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SddcArgs {
    /// SDDC id
    #[arg(long)]
    pub id: Option<String>,

    /// SDDC name
    #[arg(long)]
    pub name: Option<String>,
}

// ── Admin API ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ActivationArgs {
    #[command(subcommand)]
    pub command: ActivationCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActivationCommand {
    /// Activate the connector (no-op when already activated)
    Set {
        /// Activation server URL
        #[arg(long, default_value = "https://connect.hcx.vmware.com")]
        url: String,

        #[arg(long, env = "HCX_ACTIVATION_KEY", hide_env_values = true)]
        key: String,
    },
    /// Show the current activation
    Show,
}

#[derive(Debug, Args)]
pub struct SsoArgs {
    #[command(subcommand)]
    pub command: SsoCommand,
}

#[derive(Debug, Subcommand)]
pub enum SsoCommand {
    /// Point the connector at a lookup service
    Set {
        /// Lookup service URL
        url: String,
    },
    /// Remove a lookup service by uuid
    Remove { uuid: String },
}

#[derive(Debug, Args)]
pub struct VcenterArgs {
    #[command(subcommand)]
    pub command: VcenterCommand,
}

#[derive(Debug, Subcommand)]
pub enum VcenterCommand {
    /// Register a vCenter and restart the app engine
    Register {
        url: String,

        #[arg(long)]
        username: String,

        #[arg(long, env = "HCX_VCENTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Remove a registered vCenter by uuid
    Remove { uuid: String },
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    #[command(subcommand)]
    pub command: LocationCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocationCommand {
    /// Set the connector location
    Set {
        #[arg(long)]
        city: String,

        #[arg(long)]
        country: String,

        /// ASCII spelling of the city (defaults to --city)
        #[arg(long)]
        city_ascii: Option<String>,

        #[arg(long, default_value = "")]
        province: String,

        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,

        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
    },
    /// Clear the connector location
    Clear,
    /// Show the connector location
    Show,
}

#[derive(Debug, Args)]
pub struct RoleMappingArgs {
    /// User group granted System Administrator (repeatable)
    #[arg(long = "admin", value_name = "GROUP")]
    pub admin: Vec<String>,

    /// User group granted Enterprise Administrator (repeatable)
    #[arg(long = "enterprise", value_name = "GROUP")]
    pub enterprise: Vec<String>,
}

// ── Inventory ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworkBackingArgs {
    /// Port group or segment name
    pub name: String,

    #[arg(long, default_value = "DistributedVirtualPortgroup")]
    pub network_type: String,

    /// Endpoint to search (defaults to the local one)
    #[arg(long)]
    pub endpoint: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or replace a profile
    Init {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        name: Option<String>,

        /// Connector URL
        #[arg(long)]
        url: String,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        admin_username: Option<String>,

        #[arg(long)]
        ca_cert: Option<PathBuf>,

        /// Store secrets read from HCX_PASSWORD, HCX_ADMIN_PASSWORD and
        /// VMC_API_TOKEN in the system keyring
        #[arg(long)]
        keyring: bool,

        /// Make this the default profile
        #[arg(long)]
        default: bool,
    },

    /// Show the configuration with secrets masked
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
