// ── Resolved remote objects ──
//
// The API returns a different record shape for every inventory kind.
// `NamedEntity` is the common projection: what was found, under which
// id, and inside which parent. It is built fresh by each lookup and
// never mutated afterwards.

use serde::Serialize;
use strum::{Display, EnumString};

/// Kind of remote object a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[strum(serialize = "vCenter")]
    Vcenter,
    #[strum(serialize = "datacenter")]
    Datacenter,
    #[strum(serialize = "cluster")]
    Cluster,
    #[strum(serialize = "datastore")]
    Datastore,
    #[strum(serialize = "distributed switch")]
    DistributedSwitch,
    #[strum(serialize = "network backing")]
    NetworkBacking,
    #[strum(serialize = "compute profile")]
    ComputeProfile,
    #[strum(serialize = "network profile")]
    NetworkProfile,
    #[strum(serialize = "appliance")]
    Appliance,
    #[strum(serialize = "SDDC")]
    Sddc,
    #[strum(serialize = "site pairing")]
    SitePairing,
    #[strum(serialize = "cloud endpoint")]
    CloudEndpoint,
    #[strum(serialize = "resource container")]
    ResourceContainer,
    #[strum(serialize = "L2 extension")]
    L2Extension,
}

/// A resolved remote object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    /// The API's own type tag (`DistributedVirtualPortgroup`, ...), if it has one.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
    /// Id of the enclosing object the lookup was scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl NamedEntity {
    pub fn new(kind: EntityKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            entity_type: String::new(),
            parent: None,
        }
    }

    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = entity_type.into();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl std::fmt::Display for NamedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}' ({})", self.kind, self.name, self.id)
    }
}
