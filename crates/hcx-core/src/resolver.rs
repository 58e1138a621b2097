// ── Name resolution ──
//
// Turns the names a user writes (cluster "Cluster-1", port group "VM-NET")
// into the ids the API wants. Every lookup is a full-list fetch followed by
// a linear scan for the first exact match; there is no paging and no
// prefix matching. A `Resolver` memoizes the vCenter inventory and the
// network-profile list for its own lifetime only, so one composite
// operation never refetches them but the next operation starts fresh.

use std::fmt;

use hcx_api::HcxClient;
use hcx_api::models::{
    CloudEndpoint, CloudScope, ComputeFilter, ComputeProfile, Datastore, Dvs,
    L2Extension, NetworkBacking, NetworkProfile, ResourceContainer, Sddc, SitePairing,
    VcInventoryNode,
};
use tracing::debug;

use crate::entity::{EntityKind, NamedEntity};
use crate::error::CoreError;

// ── Matching ─────────────────────────────────────────────────────────

/// What a lookup matches on. Always exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'q> {
    Name(&'q str),
    NameAndType { name: &'q str, entity_type: &'q str },
    Id(&'q str),
}

impl Query<'_> {
    pub fn matches<R: Resolvable + ?Sized>(&self, item: &R) -> bool {
        match *self {
            Query::Name(name) => item.name() == name,
            Query::NameAndType { name, entity_type } => {
                item.name() == name && item.entity_type() == entity_type
            }
            Query::Id(id) => item.id() == id,
        }
    }
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Name(name) => write!(f, "'{name}'"),
            Query::NameAndType { name, entity_type } => write!(f, "'{name}' of type {entity_type}"),
            Query::Id(id) => write!(f, "id {id}"),
        }
    }
}

/// A record that can be matched by id, name and type.
pub trait Resolvable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn entity_type(&self) -> &str {
        ""
    }

    fn to_entity(&self, kind: EntityKind) -> NamedEntity {
        NamedEntity::new(kind, self.id(), self.name()).with_type(self.entity_type())
    }
}

impl Resolvable for VcInventoryNode {
    fn id(&self) -> &str {
        &self.entity_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn entity_type(&self) -> &str {
        &self.entity_type
    }
}

impl Resolvable for Datastore {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn entity_type(&self) -> &str {
        &self.entity_type
    }
}

impl Resolvable for Dvs {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn entity_type(&self) -> &str {
        &self.switch_type
    }
}

impl Resolvable for NetworkBacking {
    fn id(&self) -> &str {
        &self.entity_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn entity_type(&self) -> &str {
        &self.entity_type
    }
}

impl Resolvable for ComputeProfile {
    fn id(&self) -> &str {
        &self.compute_profile_id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Resolvable for NetworkProfile {
    fn id(&self) -> &str {
        &self.object_id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Resolvable for Sddc {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Pairings are known by the remote URL.
impl Resolvable for SitePairing {
    fn id(&self) -> &str {
        &self.endpoint_id
    }
    fn name(&self) -> &str {
        &self.url
    }
}

impl Resolvable for CloudEndpoint {
    fn id(&self) -> &str {
        &self.endpoint_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn entity_type(&self) -> &str {
        &self.endpoint_type
    }
}

impl Resolvable for ResourceContainer {
    fn id(&self) -> &str {
        &self.resource_id
    }
    fn name(&self) -> &str {
        &self.resource_name
    }
    fn entity_type(&self) -> &str {
        &self.resource_type
    }
}

/// Extensions are known by the name of the network they stretch.
impl Resolvable for L2Extension {
    fn id(&self) -> &str {
        &self.stretch_id
    }
    fn name(&self) -> &str {
        &self.source_network.network_name
    }
    fn entity_type(&self) -> &str {
        &self.source_network.network_type
    }
}

/// First item satisfying `predicate`, or a not-found error naming `identifier`.
pub fn select_by<'a, R, P>(
    kind: EntityKind,
    items: &'a [R],
    identifier: &dyn fmt::Display,
    predicate: P,
) -> Result<&'a R, CoreError>
where
    P: Fn(&R) -> bool,
{
    items
        .iter()
        .find(|item| predicate(item))
        .ok_or_else(|| CoreError::not_found(kind, identifier.to_string()))
}

/// First item exactly matching `query`.
pub fn select_exact<'a, R: Resolvable>(
    kind: EntityKind,
    items: &'a [R],
    query: &Query<'_>,
) -> Result<&'a R, CoreError> {
    select_by(kind, items, query, |item| query.matches(item))
}

/// First item of a list the API scopes to exactly one relevant record.
pub fn select_first<'a, R>(kind: EntityKind, items: &'a [R], scope: &str) -> Result<&'a R, CoreError> {
    items
        .first()
        .ok_or_else(|| CoreError::not_found(kind, format!("<empty {scope}>")))
}

fn find_node<'n>(nodes: &'n [VcInventoryNode], id: &str) -> Option<&'n VcInventoryNode> {
    nodes.iter().find_map(|node| {
        if node.entity_id == id {
            Some(node)
        } else {
            find_node(&node.children, id)
        }
    })
}

/// How an SDDC is designated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SddcSelector {
    Id(String),
    Name(String),
}

impl SddcSelector {
    pub fn query(&self) -> Query<'_> {
        match self {
            Self::Id(id) => Query::Id(id),
            Self::Name(name) => Query::Name(name),
        }
    }
}

impl fmt::Display for SddcSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.query(), f)
    }
}

// ── Resolver ─────────────────────────────────────────────────────────

/// Per-operation lookup scope over one client.
pub struct Resolver<'a> {
    client: &'a HcxClient,
    inventory: Option<Vec<VcInventoryNode>>,
    network_profiles: Option<Vec<NetworkProfile>>,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a HcxClient) -> Self {
        Self {
            client,
            inventory: None,
            network_profiles: None,
        }
    }

    async fn inventory(&mut self) -> Result<&[VcInventoryNode], CoreError> {
        if self.inventory.is_none() {
            self.inventory = Some(self.client.vc_inventory().await?);
        }
        Ok(self.inventory.as_deref().unwrap_or_default())
    }

    async fn network_profiles(&mut self) -> Result<&[NetworkProfile], CoreError> {
        if self.network_profiles.is_none() {
            self.network_profiles = Some(self.client.query_network_profiles().await?);
        }
        Ok(self.network_profiles.as_deref().unwrap_or_default())
    }

    // ── vCenter inventory ────────────────────────────────────────

    /// The local vCenter: the root of the inventory tree.
    pub async fn vcenter(&mut self) -> Result<NamedEntity, CoreError> {
        let nodes = self.inventory().await?;
        let vc = select_first(EntityKind::Vcenter, nodes, "vCenter inventory")?;
        Ok(vc.to_entity(EntityKind::Vcenter))
    }

    /// A datacenter of the local vCenter, or its first one when `name` is `None`.
    pub async fn datacenter(&mut self, name: Option<&str>) -> Result<NamedEntity, CoreError> {
        let nodes = self.inventory().await?;
        let vc = select_first(EntityKind::Vcenter, nodes, "vCenter inventory")?;
        let dc = match name {
            Some(name) => select_exact(EntityKind::Datacenter, &vc.children, &Query::Name(name))?,
            None => select_first(EntityKind::Datacenter, &vc.children, "datacenter list")?,
        };
        Ok(dc
            .to_entity(EntityKind::Datacenter)
            .with_parent(vc.entity_id.clone()))
    }

    pub async fn cluster(
        &mut self,
        datacenter: &NamedEntity,
        name: &str,
    ) -> Result<NamedEntity, CoreError> {
        let nodes = self.inventory().await?;
        let dc = find_node(nodes, &datacenter.id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Datacenter, datacenter.id.clone()))?;
        let cluster = select_exact(EntityKind::Cluster, &dc.children, &Query::Name(name))?;
        debug!(cluster = %cluster.entity_id, name, "resolved cluster");
        Ok(cluster
            .to_entity(EntityKind::Cluster)
            .with_parent(dc.entity_id.clone()))
    }

    pub async fn datastore(
        &self,
        vcenter: &NamedEntity,
        cluster: &NamedEntity,
        name: &str,
    ) -> Result<NamedEntity, CoreError> {
        let filter = ComputeFilter::cluster(&vcenter.id, &cluster.id);
        let items = self.client.query_datastores(&filter).await?;
        let ds = select_exact(EntityKind::Datastore, &items, &Query::Name(name))?;
        Ok(ds
            .to_entity(EntityKind::Datastore)
            .with_parent(cluster.id.clone()))
    }

    /// A distributed switch reachable from `cluster`. Returns the full
    /// record; compute profiles need its MTU.
    pub async fn dvs(
        &self,
        vcenter: &NamedEntity,
        cluster: &NamedEntity,
        name: &str,
    ) -> Result<Dvs, CoreError> {
        let filter = ComputeFilter::cluster(&vcenter.id, &cluster.id);
        let items = self.client.query_dvs(&filter).await?;
        select_exact(EntityKind::DistributedSwitch, &items, &Query::Name(name)).cloned()
    }

    // ── Connector objects ────────────────────────────────────────

    /// A network backing of `endpoint_id`, matched on name and type.
    pub async fn network_backing(
        &self,
        endpoint_id: &str,
        name: &str,
        network_type: &str,
    ) -> Result<NamedEntity, CoreError> {
        let items = self.client.list_network_backings(endpoint_id).await?;
        let query = Query::NameAndType {
            name,
            entity_type: network_type,
        };
        let backing = select_exact(EntityKind::NetworkBacking, &items, &query)?;
        Ok(backing
            .to_entity(EntityKind::NetworkBacking)
            .with_parent(endpoint_id))
    }

    pub async fn compute_profile(
        &self,
        endpoint_id: &str,
        name: &str,
    ) -> Result<ComputeProfile, CoreError> {
        let items = self.client.list_compute_profiles(endpoint_id).await?;
        select_exact(EntityKind::ComputeProfile, &items, &Query::Name(name)).cloned()
    }

    pub async fn network_profile_by_id(&mut self, id: &str) -> Result<NetworkProfile, CoreError> {
        let items = self.network_profiles().await?;
        select_exact(EntityKind::NetworkProfile, items, &Query::Id(id)).cloned()
    }

    pub async fn network_profile_by_name(&mut self, name: &str) -> Result<NetworkProfile, CoreError> {
        let items = self.network_profiles().await?;
        select_exact(EntityKind::NetworkProfile, items, &Query::Name(name)).cloned()
    }

    pub async fn l2_extension(&self, network_name: &str) -> Result<L2Extension, CoreError> {
        let items = self.client.list_l2_extensions().await?;
        select_exact(EntityKind::L2Extension, &items, &Query::Name(network_name)).cloned()
    }

    // ── Site pairing context ─────────────────────────────────────

    /// The pairing with the remote site at `url`.
    pub async fn site_pairing(&self, url: &str) -> Result<SitePairing, CoreError> {
        let items = self.client.list_site_pairings().await?;
        select_exact(EntityKind::SitePairing, &items, &Query::Name(url)).cloned()
    }

    /// The local site endpoint.
    pub async fn local_cloud(&self) -> Result<CloudEndpoint, CoreError> {
        let items = self.client.list_clouds(CloudScope::Local).await?;
        select_first(EntityKind::CloudEndpoint, &items, "local cloud list").cloned()
    }

    /// The remote site endpoint reachable at `url`.
    pub async fn remote_cloud(&self, url: &str) -> Result<CloudEndpoint, CoreError> {
        let items = self.client.list_clouds(CloudScope::Remote).await?;
        select_by(EntityKind::CloudEndpoint, &items, &url, |c| c.url == url).cloned()
    }

    pub async fn container(&self, scope: CloudScope) -> Result<ResourceContainer, CoreError> {
        let items = self.client.list_resource_containers(scope).await?;
        let label = match scope {
            CloudScope::Local => "local resource container list",
            CloudScope::Remote => "remote resource container list",
        };
        select_first(EntityKind::ResourceContainer, &items, label).cloned()
    }

    // ── Cloud services ───────────────────────────────────────────

    /// An SDDC by id or name. The cloud session must be open.
    pub async fn sddc(&self, selector: &SddcSelector) -> Result<Sddc, CoreError> {
        let items = self.client.list_sddcs().await?;
        select_exact(EntityKind::Sddc, &items, &selector.query()).cloned()
    }
}
