// HCX wire types
//
// Request and response bodies for the connector, admin and cloud APIs.
// Field names are fixed by the remote API. Response fields use
// `#[serde(default)]` liberally because the API omits empty values.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

// ── Envelopes ────────────────────────────────────────────────────────

/// `{ "items": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// `{ "config": ... }`, the element type of admin configuration lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigItem<T> {
    pub config: T,
}

/// `{ "data": { "items": [ { "config": ... } ] } }`, the admin config shape.
pub type AdminConfigList<T> = Data<Items<ConfigItem<T>>>;

impl<T> AdminConfigList<T> {
    /// Wrap a single config object.
    pub fn single(config: T) -> Self {
        Data {
            data: Items {
                items: vec![ConfigItem { config }],
            },
        }
    }

    pub fn configs(&self) -> impl Iterator<Item = &T> {
        self.data.items.iter().map(|item| &item.config)
    }
}

/// `{ "state": "..." }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateField {
    #[serde(default)]
    pub state: String,
}

// ── Jobs and tasks ───────────────────────────────────────────────────

/// `{ "jobId": "..." }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRef {
    #[serde(default)]
    pub job_id: String,
}

/// Status of a job, from `GET /hybridity/api/jobs/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobResult {
    pub job_id: String,
    pub enterprise: String,
    pub organization: String,
    pub username: String,
    pub is_queued: bool,
    pub is_cancelled: bool,
    pub is_rolled_back: bool,
    pub create_time_epoch: i64,
    pub absolute_expire_time_epoch: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub percent_complete: i32,
    pub is_done: bool,
    pub did_fail: bool,
    pub time_to_execute: i64,
}

/// Task status vocabulary, from `GET /hybridity/api/interconnect/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Success,
    Failed,
    /// Any other value (`QUEUED`, `RUNNING`, ...): not terminal.
    InProgress(String),
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            _ => Self::InProgress(value),
        }
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from(raw.unwrap_or_default()))
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Failed => f.write_str("FAILED"),
            Self::InProgress(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    #[serde(default)]
    pub interconnect_task_id: String,
    #[serde(default = "in_progress")]
    pub status: TaskStatus,
}

fn in_progress() -> TaskStatus {
    TaskStatus::InProgress(String::new())
}

// ── Inventory ────────────────────────────────────────────────────────

/// Which side of a pairing an inventory query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudScope {
    Local,
    Remote,
}

/// `{ "filter": { "cloud": { "local": .., "remote": .. } } }`
#[derive(Debug, Clone, Serialize)]
pub struct CloudSideFilter {
    pub local: bool,
    pub remote: bool,
}

impl From<CloudScope> for CloudSideFilter {
    fn from(scope: CloudScope) -> Self {
        Self {
            local: scope == CloudScope::Local,
            remote: scope == CloudScope::Remote,
        }
    }
}

/// A vCenter resource container (local or remote site).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceContainer {
    pub url: String,
    pub vcuuid: String,
    pub version: String,
    pub build_number: String,
    pub os_type: String,
    pub name: String,
    pub resource_id: String,
    pub resource_type: String,
    pub resource_name: String,
    pub vim_id: String,
    pub vim_server_uuid: String,
}

/// A site endpoint from `cloud/list`. Also used as the network-backing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudEndpoint {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint_type: String,
}

/// A network backing (port group, NSX segment) from `service/inventory/networks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkBacking {
    #[serde(rename = "entity_id")]
    pub entity_id: String,
    pub name: String,
    #[serde(rename = "entityType")]
    pub entity_type: String,
}

/// A node in the vCenter inventory tree (vCenter > datacenter > cluster).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VcInventoryNode {
    #[serde(rename = "vcenter_instanceId")]
    pub vcenter_instance_id: String,
    #[serde(rename = "entity_id")]
    pub entity_id: String,
    pub name: String,
    #[serde(rename = "entityType")]
    pub entity_type: String,
    pub children: Vec<VcInventoryNode>,
}

/// Filter for datastore and switch queries scoped to one cluster.
#[derive(Debug, Clone, Serialize)]
pub struct ComputeFilter {
    #[serde(rename = "computeType")]
    pub compute_type: String,
    #[serde(rename = "vcenter_instanceId")]
    pub vcenter_instance_id: String,
    #[serde(rename = "computeIds")]
    pub compute_ids: Vec<String>,
}

impl ComputeFilter {
    pub const CLUSTER: &'static str = "ClusterComputeResource";

    pub fn cluster(vcenter_instance_id: &str, cluster_id: &str) -> Self {
        Self {
            compute_type: Self::CLUSTER.into(),
            vcenter_instance_id: vcenter_instance_id.into(),
            compute_ids: vec![cluster_id.into()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Datastore {
    pub id: String,
    pub name: String,
    #[serde(rename = "entity_type")]
    pub entity_type: String,
}

/// A distributed virtual switch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dvs {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub switch_type: String,
    pub max_mtu: u32,
}

/// `{ "success": .., "completed": .., "data": ... }` wrapper of inventory queries.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub completed: bool,
    pub data: T,
}

// ── Appliances ───────────────────────────────────────────────────────

/// Appliance type of network-extension appliances.
pub const NETWORK_EXTENSION_APPLIANCE: &str = "HCX-NET-EXT";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceFilter {
    pub appliance_type: String,
    pub endpoint_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_mesh_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appliance {
    pub appliance_id: String,
    pub service_mesh_id: String,
    pub network_extension_count: u32,
}

// ── Site pairing ─────────────────────────────────────────────────────

/// The remote side of a pairing request.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSite {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_type: String,
}

impl std::fmt::Debug for RemoteSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSite")
            .field("username", &self.username)
            .field("url", &self.url)
            .field("endpoint_id", &self.endpoint_id)
            .field("cloud_type", &self.cloud_type)
            .finish_non_exhaustive()
    }
}

/// `POST /hybridity/api/cloudConfigs` body.
#[derive(Debug, Clone, Serialize)]
pub struct SitePairingRequest {
    pub remote: RemoteSite,
}

/// One structured error of a pairing submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitePairingError {
    pub error: String,
    pub text: String,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl SitePairingError {
    /// Error code the server uses for rejected remote credentials.
    pub const LOGIN_FAILURE: &'static str = "Login failure";

    /// The certificate the remote site presented, if this error carries one.
    pub fn certificate(&self) -> Option<&str> {
        self.data
            .first()?
            .get("certificate")?
            .as_str()
            .filter(|c| !c.is_empty())
    }
}

/// Response of a pairing submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitePairingResult {
    pub success: bool,
    pub completed: bool,
    pub version: String,
    pub data: JobRef,
    pub errors: Vec<SitePairingError>,
}

/// An existing pairing from `GET /hybridity/api/cloudConfigs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SitePairing {
    pub username: String,
    pub url: String,
    pub endpoint_id: String,
    pub cloud_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuccessFlag {
    pub success: bool,
    pub completed: bool,
}

// ── Certificates ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CertificateRequest {
    pub certificate: String,
}

// ── Network profiles ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkProfile {
    pub backings: Vec<Backing>,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub organization: String,
    pub ip_scopes: Vec<IpScope>,
    pub mtu: u32,
    pub name: String,
    pub l3_tenant_managed: bool,
    pub owned_by_system: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub object_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backing {
    #[serde(rename = "backingId")]
    pub backing_id: String,
    #[serde(rename = "backingName")]
    pub backing_name: String,
    #[serde(rename = "type")]
    pub backing_type: String,
    #[serde(rename = "vCenterInstanceUuid")]
    pub vcenter_instance_uuid: String,
    #[serde(rename = "vCenterName", skip_serializing_if = "String::is_empty")]
    pub vcenter_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpScope {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_suffix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gateway: String,
    pub prefix_length: u8,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub primary_dns: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secondary_dns: String,
    #[serde(rename = "networkIpRanges", skip_serializing_if = "Vec::is_empty")]
    pub network_ip_ranges: Vec<IpRange>,
    pub pool_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpRange {
    pub start_address: String,
    pub end_address: String,
}

/// Filter of `POST /hybridity/api/networks?action=queryIpUsage`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkQueryFilter {
    pub owned_by_system: bool,
    pub allow_trunk_interfaces: bool,
}

impl Default for NetworkQueryFilter {
    fn default() -> Self {
        Self {
            owned_by_system: true,
            allow_trunk_interfaces: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkProfileJob {
    pub job_id: String,
    pub object_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkProfileResult {
    pub success: bool,
    pub completed: bool,
    pub data: NetworkProfileJob,
}

// ── Compute profiles ─────────────────────────────────────────────────

/// A compute or storage reference inside a compute profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeRef {
    #[serde(rename = "cmpId")]
    pub cmp_id: String,
    #[serde(rename = "cmpName")]
    pub cmp_name: String,
    #[serde(rename = "cmpType")]
    pub cmp_type: String,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ref_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentContainer {
    pub compute: Vec<ComputeRef>,
    pub cpu_reservation: u32,
    pub memory_reservation: u32,
    pub storage: Vec<ComputeRef>,
}

/// A tagged network of a compute profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileNetwork {
    pub name: String,
    pub id: String,
    pub static_routes: Vec<serde_json::Value>,
    pub status: StateField,
    pub tags: Vec<String>,
}

/// `{ "name": "..." }` entry of a service list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub name: String,
}

impl ServiceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchRef {
    #[serde(rename = "cmpId")]
    pub cmp_id: String,
    pub id: String,
    #[serde(rename = "maxMtu", skip_serializing_if = "Option::is_none")]
    pub max_mtu: Option<u32>,
    pub name: String,
    #[serde(rename = "type")]
    pub switch_type: String,
}

/// A compute profile, as submitted and as listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeProfile {
    pub compute: Vec<ComputeRef>,
    pub compute_profile_id: String,
    pub deployment_container: DeploymentContainer,
    pub name: String,
    pub networks: Vec<ProfileNetwork>,
    pub services: Vec<ServiceRef>,
    pub state: String,
    pub switches: Vec<SwitchRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeProfileTask {
    pub interconnect_task_id: String,
    pub compute_profile_id: String,
}

// ── Service mesh ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshComputeProfile {
    pub compute_profile_id: String,
    pub compute_profile_name: String,
    pub endpoint_id: String,
    pub endpoint_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WanoptConfig {
    pub uplink_max_bandwidth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficEngineering {
    #[serde(rename = "isAppPathResiliencyEnabled")]
    pub app_path_resiliency: bool,
    #[serde(rename = "isTcpFlowConditioningEnabled")]
    pub tcp_flow_conditioning: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPairCount {
    pub switches: Vec<SwitchRef>,
    pub l2c_appliance_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeshRequest {
    pub name: String,
    pub compute_profiles: Vec<MeshComputeProfile>,
    pub wanopt_config: WanoptConfig,
    #[serde(rename = "trafficEnggCfg")]
    pub traffic_engineering: TrafficEngineering,
    pub services: Vec<ServiceRef>,
    pub switch_pair_count: Vec<SwitchPairCount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceMeshTask {
    pub interconnect_task_id: String,
    pub service_mesh_id: String,
}

// ── L2 extensions ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2Destination {
    pub endpoint_id: String,
    pub endpoint_name: String,
    pub endpoint_type: String,
    pub resource_id: String,
    pub resource_name: String,
    pub resource_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationNetwork {
    pub gateway_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2Features {
    pub egress_optimization: bool,
    pub mobility_optimized_networking: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAppliance {
    pub appliance_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceNetwork {
    pub network_id: String,
    pub network_name: String,
    pub network_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2ExtensionRequest {
    #[serde(rename = "vcGuid")]
    pub vc_guid: String,
    pub gateway: String,
    pub netmask: String,
    pub dns: Vec<String>,
    pub destination: L2Destination,
    pub destination_network: DestinationNetwork,
    pub features: L2Features,
    pub source_appliance: SourceAppliance,
    pub source_network: SourceNetwork,
}

/// `{ "id": "..." }`: the job tracking an L2 extension mutation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct L2ExtensionJob {
    pub id: String,
}

/// An existing extension from `GET /hybridity/api/l2Extensions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct L2Extension {
    pub stretch_id: String,
    pub operation_status: StateField,
    pub source_network: SourceNetwork,
}

// ── Admin configuration ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivationConfig {
    pub url: String,
    pub activation_key: String,
    #[serde(rename = "UUID", skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupServiceConfig {
    pub lookup_service_url: String,
    pub provider_type: String,
    #[serde(rename = "UUID", skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

/// vCenter registration. The password travels base64-encoded.
#[derive(Clone, Serialize)]
pub struct VcenterConfig {
    pub url: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vcuuid: String,
    #[serde(rename = "UUID", skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

impl std::fmt::Debug for VcenterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VcenterConfig")
            .field("url", &self.url)
            .field("user_name", &self.user_name)
            .field("vcuuid", &self.vcuuid)
            .field("uuid", &self.uuid)
            .finish_non_exhaustive()
    }
}

/// A registered vCenter as echoed back by the admin API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VcenterRegistration {
    pub url: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub vcuuid: String,
    #[serde(rename = "UUID")]
    pub uuid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub city_ascii: String,
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMapping {
    pub role: String,
    pub user_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleMappingResult {
    pub is_success: bool,
    pub message: String,
    pub http_status_code: u16,
}

/// App engine state from `/components/appengine/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppEngineStatus {
    pub result: String,
}

impl AppEngineStatus {
    pub const RUNNING: &'static str = "RUNNING";
    pub const STOPPED: &'static str = "STOPPED";
}

// ── Cloud services ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VmcAccessToken {
    pub access_token: String,
    pub id_token: String,
    pub expires_in: i64,
    pub scope: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Clone, Serialize)]
pub struct CloudSessionRequest {
    #[serde(serialize_with = "expose")]
    pub token: SecretString,
}

/// SDDC deployment status vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeploymentStatus {
    Active,
    ActivationFailed,
    Deactivated,
    DeactivationFailed,
    /// Empty status: the SDDC no longer reports HCX at all.
    #[default]
    Missing,
    /// Any other value (`ACTIVATING`, `DE-ACTIVATING`, ...): not terminal.
    Other(String),
}

impl From<String> for DeploymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ACTIVE" => Self::Active,
            "ACTIVATION_FAILED" => Self::ActivationFailed,
            "DE-ACTIVATED" => Self::Deactivated,
            "DEACTIVATION_FAILED" => Self::DeactivationFailed,
            "" => Self::Missing,
            _ => Self::Other(value),
        }
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("ACTIVE"),
            Self::ActivationFailed => f.write_str("ACTIVATION_FAILED"),
            Self::Deactivated => f.write_str("DE-ACTIVATED"),
            Self::DeactivationFailed => f.write_str("DEACTIVATION_FAILED"),
            Self::Missing => Ok(()),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for DeploymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from(raw.unwrap_or_default()))
    }
}

impl Serialize for DeploymentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sddc {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_id: String,
    #[serde(skip_serializing)]
    pub activation_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subscription_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub activation_status: String,
    pub deployment_status: DeploymentStatus,
    pub state: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SddcList {
    pub sddcs: Vec<Sddc>,
}
