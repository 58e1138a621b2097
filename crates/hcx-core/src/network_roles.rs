// ── Compute profile network roles ──
//
// A compute profile lists its networks once each, tagged with every role
// the network serves. Two roles pointing at the same network therefore
// collapse into one entry carrying both tags.

use std::collections::{BTreeMap, BTreeSet};

use hcx_api::models::{ProfileNetwork, StateField};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entity::NamedEntity;
use crate::error::CoreError;

/// Network state telling the API the binding already exists.
pub const REALIZED: &str = "REALIZED";

/// Logical purpose of a network inside a compute profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NetworkRole {
    Management,
    Replication,
    Uplink,
    Vmotion,
}

impl NetworkRole {
    /// Management always comes first; the rest merge into earlier entries.
    pub const PROCESSING_ORDER: [NetworkRole; 4] = [
        NetworkRole::Management,
        NetworkRole::Replication,
        NetworkRole::Uplink,
        NetworkRole::Vmotion,
    ];
}

/// One network of a compute profile with the roles it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedNetwork {
    pub network: NamedEntity,
    pub roles: BTreeSet<NetworkRole>,
}

/// Build the tagged network list of a compute profile.
///
/// Networks are compared by name. The management role is required.
pub fn build_network_list(
    assignments: &BTreeMap<NetworkRole, NamedEntity>,
) -> Result<Vec<TaggedNetwork>, CoreError> {
    if !assignments.contains_key(&NetworkRole::Management) {
        return Err(CoreError::Composition {
            message: "a management network is required".into(),
        });
    }

    let mut list: Vec<TaggedNetwork> = Vec::with_capacity(assignments.len());
    for role in NetworkRole::PROCESSING_ORDER {
        let Some(target) = assignments.get(&role) else {
            continue;
        };
        let existing = if role == NetworkRole::Management {
            None
        } else {
            list.iter_mut()
                .find(|entry| entry.network.name == target.name)
        };
        match existing {
            Some(entry) => {
                entry.roles.insert(role);
            }
            None => list.push(TaggedNetwork {
                network: target.clone(),
                roles: BTreeSet::from([role]),
            }),
        }
    }
    Ok(list)
}

/// Wire form of a tagged network list.
pub fn to_profile_networks(list: &[TaggedNetwork]) -> Vec<ProfileNetwork> {
    list.iter()
        .map(|entry| ProfileNetwork {
            name: entry.network.name.clone(),
            id: entry.network.id.clone(),
            static_routes: Vec::new(),
            status: StateField {
                state: REALIZED.into(),
            },
            tags: entry.roles.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use pretty_assertions::assert_eq;

    fn net(name: &str) -> NamedEntity {
        NamedEntity::new(EntityKind::NetworkProfile, format!("id-{name}"), name)
    }

    fn tags(entry: &TaggedNetwork) -> Vec<NetworkRole> {
        entry.roles.iter().copied().collect()
    }

    #[test]
    fn shared_network_carries_both_roles() {
        let assignments = BTreeMap::from([
            (NetworkRole::Management, net("net-a")),
            (NetworkRole::Replication, net("net-a")),
            (NetworkRole::Uplink, net("net-b")),
        ]);

        let list = build_network_list(&assignments).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].network.name, "net-a");
        assert_eq!(tags(&list[0]), vec![NetworkRole::Management, NetworkRole::Replication]);
        assert_eq!(list[1].network.name, "net-b");
        assert_eq!(tags(&list[1]), vec![NetworkRole::Uplink]);
    }

    #[test]
    fn later_role_merges_into_any_earlier_entry() {
        let assignments = BTreeMap::from([
            (NetworkRole::Management, net("mgmt")),
            (NetworkRole::Uplink, net("uplink")),
            (NetworkRole::Vmotion, net("mgmt")),
        ]);

        let list = build_network_list(&assignments).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(tags(&list[0]), vec![NetworkRole::Management, NetworkRole::Vmotion]);
        assert_eq!(tags(&list[1]), vec![NetworkRole::Uplink]);
    }

    #[test]
    fn single_network_for_every_role() {
        let assignments: BTreeMap<_, _> = NetworkRole::PROCESSING_ORDER
            .into_iter()
            .map(|role| (role, net("shared")))
            .collect();

        let list = build_network_list(&assignments).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(tags(&list[0]), NetworkRole::PROCESSING_ORDER.to_vec());
    }

    #[test]
    fn management_is_required() {
        let assignments = BTreeMap::from([(NetworkRole::Uplink, net("uplink"))]);
        let err = build_network_list(&assignments).unwrap_err();
        assert!(matches!(err, CoreError::Composition { .. }));
    }

    #[test]
    fn wire_form_is_realized_with_lowercase_tags() {
        let assignments = BTreeMap::from([
            (NetworkRole::Management, net("net-a")),
            (NetworkRole::Vmotion, net("net-a")),
        ]);
        let networks = to_profile_networks(&build_network_list(&assignments).unwrap());

        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].id, "id-net-a");
        assert_eq!(networks[0].status.state, "REALIZED");
        assert_eq!(networks[0].tags, vec!["management", "vmotion"]);
    }
}
