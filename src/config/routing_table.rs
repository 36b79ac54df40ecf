// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::config::consts::DEFAULT_ROUTES;

/// Where a change group is announced and how early.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    pub group: String,
    pub forwarding_name: String,
    /// Lower values are planned first.
    pub priority: u32,
    /// Whether terminal success on this route may stop the cascade.
    #[serde(default = "default_settles")]
    pub settles: bool,
}

fn default_settles() -> bool {
    true
}

impl RouteConfig {
    pub fn new(group: impl Into<String>, forwarding_name: impl Into<String>, priority: u32) -> Self {
        Self {
            group: group.into(),
            forwarding_name: forwarding_name.into(),
            priority,
            settles: true,
        }
    }

    /// Mark the route as notification only: its answers never settle the cascade.
    pub fn non_settling(mut self) -> Self {
        self.settles = false;
        self
    }
}

/// Newtype wrapper for the routing table providing type safety
///
/// The table is injected into the planner; forwarding names never appear as
/// literals in planning logic.
///
/// # Examples
///
/// ```
/// use peer_cascade::config::{RouteConfig, RoutingTable};
///
/// let table = RoutingTable::from(vec![
///     RouteConfig::new("network", "ServiceRequestCausesLtpUpdateRequest", 20),
///     RouteConfig::new("identity", "ServiceRequestCausesLtpUpdateRequest", 10),
/// ]);
///
/// assert_eq!(table.priority_of("identity"), Some(10));
/// assert!(table.route_for("operation").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable(pub Vec<RouteConfig>);

impl RoutingTable {
    /// Create a new empty routing table
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Get the route for a group label
    pub fn route_for(&self, group: &str) -> Option<&RouteConfig> {
        self.0.iter().find(|route| route.group == group)
    }

    pub fn priority_of(&self, group: &str) -> Option<u32> {
        self.route_for(group).map(|route| route.priority)
    }

    /// Get iterator over routes
    pub fn iter(&self) -> impl Iterator<Item = &RouteConfig> {
        self.0.iter()
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self(
            DEFAULT_ROUTES
                .iter()
                .map(|(group, forwarding_name, priority, settles)| {
                    let route = RouteConfig::new(*group, *forwarding_name, *priority);
                    if *settles {
                        route
                    } else {
                        route.non_settling()
                    }
                })
                .collect(),
        )
    }
}

impl From<Vec<RouteConfig>> for RoutingTable {
    fn from(routes: Vec<RouteConfig>) -> Self {
        Self(routes)
    }
}

impl From<RoutingTable> for Vec<RouteConfig> {
    fn from(table: RoutingTable) -> Self {
        table.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::{
        GROUP_HANDOFF, GROUP_IDENTITY, GROUP_NETWORK, GROUP_PREDECESSOR, GROUP_REGISTRATION,
    };

    #[test]
    fn default_table_orders_identity_before_network_before_handoff() {
        let table = RoutingTable::default();
        let identity = table.priority_of(GROUP_IDENTITY).unwrap();
        let network = table.priority_of(GROUP_NETWORK).unwrap();
        let predecessor = table.priority_of(GROUP_PREDECESSOR).unwrap();
        let handoff = table.priority_of(GROUP_HANDOFF).unwrap();

        assert!(identity < network);
        assert!(network < predecessor);
        assert!(predecessor < handoff);
    }

    #[test]
    fn only_registration_and_handoff_settle_by_default() {
        let table = RoutingTable::default();
        let settling: Vec<&str> = table
            .iter()
            .filter(|route| route.settles)
            .map(|route| route.group.as_str())
            .collect();

        assert_eq!(settling, vec![GROUP_REGISTRATION, GROUP_HANDOFF]);
    }

    #[test]
    fn settles_defaults_to_true_when_omitted() {
        let table: RoutingTable = serde_yaml::from_str(
            "- { group: network, forwarding_name: A, priority: 1 }\n\
             - { group: registration, forwarding_name: B, priority: 2, settles: false }\n",
        )
        .unwrap();

        assert!(table.route_for(GROUP_NETWORK).unwrap().settles);
        assert!(!table.route_for(GROUP_REGISTRATION).unwrap().settles);
    }
}
