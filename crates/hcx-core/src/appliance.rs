// ── Network extension appliance allocation ──

use hcx_api::models::Appliance;

/// Extensions one network-extension appliance carries before it is full.
pub const APPLIANCE_CAPACITY: u32 = 9;

/// Which appliance an L2 extension is placed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplianceChoice {
    /// Configured by the user; used as-is.
    Explicit(String),
    /// An existing appliance found by query.
    Existing(Appliance),
    /// No appliance exists yet. The request goes out without one and the
    /// server places the extension itself.
    Fresh,
}

impl ApplianceChoice {
    /// The appliance id to put in the request body (empty for `Fresh`).
    pub fn appliance_id(&self) -> &str {
        match self {
            Self::Explicit(id) => id,
            Self::Existing(appliance) => &appliance.appliance_id,
            Self::Fresh => "",
        }
    }
}

/// Pick an appliance of `service_mesh_id` with spare capacity.
///
/// When no appliance of the mesh has room, the first appliance of the
/// endpoint is used whatever mesh it belongs to.
// TODO: confirm with the HCX team whether the cross-mesh fallback should
// become an error instead.
pub fn select_appliance(appliances: &[Appliance], service_mesh_id: Option<&str>) -> ApplianceChoice {
    let with_room = service_mesh_id.and_then(|mesh| {
        appliances
            .iter()
            .find(|a| a.service_mesh_id == mesh && a.network_extension_count < APPLIANCE_CAPACITY)
    });
    match with_room.or_else(|| appliances.first()) {
        Some(appliance) => ApplianceChoice::Existing(appliance.clone()),
        None => ApplianceChoice::Fresh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appliance(id: &str, mesh: &str, count: u32) -> Appliance {
        Appliance {
            appliance_id: id.into(),
            service_mesh_id: mesh.into(),
            network_extension_count: count,
        }
    }

    #[test]
    fn prefers_mesh_appliance_with_room() {
        let appliances = vec![
            appliance("ne-1", "mesh-a", 9),
            appliance("ne-2", "mesh-b", 0),
            appliance("ne-3", "mesh-a", 8),
        ];
        let choice = select_appliance(&appliances, Some("mesh-a"));
        assert_eq!(choice.appliance_id(), "ne-3");
    }

    #[test]
    fn full_mesh_falls_back_to_first_listed() {
        let appliances = vec![appliance("ne-1", "mesh-b", 2), appliance("ne-2", "mesh-a", 9)];
        let choice = select_appliance(&appliances, Some("mesh-a"));
        assert_eq!(choice.appliance_id(), "ne-1");
    }

    #[test]
    fn without_mesh_takes_first() {
        let appliances = vec![appliance("ne-1", "mesh-a", 9), appliance("ne-2", "mesh-a", 0)];
        assert_eq!(select_appliance(&appliances, None).appliance_id(), "ne-1");
    }

    #[test]
    fn no_appliance_requests_fresh_one() {
        let choice = select_appliance(&[], Some("mesh-a"));
        assert_eq!(choice, ApplianceChoice::Fresh);
        assert_eq!(choice.appliance_id(), "");
    }
}
