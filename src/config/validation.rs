// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for routing and topology integrity.
//!
//! A configuration is checked before any runtime is built so that every
//! problem is reported at once instead of surfacing mid-cascade. Checks run
//! in three groups:
//!
//! 1. **Routing**: group labels are unique and priorities are unambiguous
//! 2. **Endpoints**: ids are unique and seeded attributes match the role
//! 3. **References**: stacks and constructs only point at seeded endpoints,
//!    and stack slots are filled by endpoints of the matching role
//!
//! Findings that do not make a configuration unusable (a construct with no
//! output port) are reported separately by [`config_warnings`].
//!
//! # Examples
//!
//! ```rust
//! use peer_cascade::config::{validate_config, Config, StackConfig};
//! use peer_cascade::errors::ValidationError;
//!
//! let config = Config {
//!     stacks: vec![StackConfig {
//!         name: "Registration".to_string(),
//!         identity: None,
//!         network: Some("ro-tcp-c".into()),
//!         operation: None,
//!         local_server: None,
//!     }],
//!     ..Config::default()
//! };
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert!(matches!(
//!     &errors[0],
//!     ValidationError::UnknownEndpoint { endpoint, .. } if endpoint == "ro-tcp-c"
//! ));
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::Config;
use crate::errors::ValidationError;
use crate::model::{EndpointId, EndpointRole};

/// Validates a configuration, accumulating every error found.
///
/// Warnings are never returned here; use [`config_warnings`] for those.
///
/// # Returns
///
/// * `Ok(())` - the configuration can be turned into a runtime
/// * `Err(Vec<ValidationError>)` - every problem found, in check order
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(validate_routing(config));
    errors.extend(validate_endpoints(config));

    let roles: HashMap<&EndpointId, EndpointRole> = config
        .endpoints
        .iter()
        .map(|seed| (&seed.id, seed.role))
        .collect();
    errors.extend(validate_stacks(config, &roles));
    errors.extend(validate_constructs(config, &roles));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal findings worth logging at startup.
pub fn config_warnings(config: &Config) -> Vec<ValidationError> {
    config
        .constructs
        .iter()
        .filter(|fc| fc.output_targets().next().is_none())
        .map(|fc| ValidationError::ConstructWithoutOutputWarning {
            construct: fc.name.clone(),
        })
        .collect()
}

fn validate_routing(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_groups = HashSet::new();
    let mut by_priority: BTreeMap<u32, Vec<String>> = BTreeMap::new();

    for route in config.routing.iter() {
        if !seen_groups.insert(route.group.as_str()) {
            errors.push(ValidationError::DuplicateGroup {
                group: route.group.clone(),
            });
            continue;
        }
        by_priority
            .entry(route.priority)
            .or_default()
            .push(route.group.clone());
    }

    errors.extend(
        by_priority
            .into_iter()
            .filter(|(_, groups)| groups.len() > 1)
            .map(|(priority, groups)| ValidationError::DuplicatePriority { priority, groups }),
    );

    errors
}

fn validate_endpoints(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for seed in &config.endpoints {
        if !seen.insert(&seed.id) {
            errors.push(ValidationError::DuplicateEndpointId {
                endpoint: seed.id.to_string(),
            });
        }

        for (attribute, _) in seed.attributes.to_pairs() {
            if attribute.role() != seed.role {
                errors.push(ValidationError::AttributeNotApplicable {
                    endpoint: seed.id.to_string(),
                    role: seed.role,
                    attribute,
                });
            }
        }
    }

    errors
}

fn validate_stacks(
    config: &Config,
    roles: &HashMap<&EndpointId, EndpointRole>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for stack in &config.stacks {
        if !seen.insert(stack.name.as_str()) {
            errors.push(ValidationError::DuplicateStackName {
                stack: stack.name.clone(),
            });
        }

        for (expected, endpoint) in stack.members() {
            match roles.get(endpoint) {
                None => errors.push(ValidationError::UnknownEndpoint {
                    referenced_by: stack.name.clone(),
                    endpoint: endpoint.to_string(),
                }),
                Some(actual) if *actual != expected => {
                    errors.push(ValidationError::RoleMismatch {
                        stack: stack.name.clone(),
                        endpoint: endpoint.to_string(),
                        expected,
                        actual: *actual,
                    })
                }
                Some(_) => {}
            }
        }
    }

    errors
}

fn validate_constructs(
    config: &Config,
    roles: &HashMap<&EndpointId, EndpointRole>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for construct in &config.constructs {
        if !seen.insert(construct.name.as_str()) {
            errors.push(ValidationError::DuplicateConstructName {
                construct: construct.name.clone(),
            });
        }

        for port in &construct.ports {
            if !roles.contains_key(&port.endpoint) {
                errors.push(ValidationError::UnknownEndpoint {
                    referenced_by: construct.name.clone(),
                    endpoint: port.endpoint.to_string(),
                });
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EndpointSeed, RouteConfig, RoutingTable, SeedAttributes, StackConfig};
    use crate::model::{Attribute, ForwardingConstruct, Port};

    fn seed(id: &str, role: EndpointRole) -> EndpointSeed {
        EndpointSeed {
            id: id.into(),
            role,
            attributes: SeedAttributes::default(),
        }
    }

    fn stack(name: &str, network: Option<&str>, operation: Option<&str>) -> StackConfig {
        StackConfig {
            name: name.to_string(),
            identity: None,
            network: network.map(EndpointId::from),
            operation: operation.map(EndpointId::from),
            local_server: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
        assert!(config_warnings(&Config::default()).is_empty());
    }

    #[test]
    fn test_valid_topology() {
        let config = Config {
            endpoints: vec![
                seed("ro-tcp-c", EndpointRole::Network),
                seed("ro-op-c", EndpointRole::Operation),
            ],
            stacks: vec![stack("Registration", Some("ro-tcp-c"), Some("ro-op-c"))],
            constructs: vec![ForwardingConstruct::new("fc-1", "Registration")
                .with_port(Port::management("ro-op-c"))
                .with_port(Port::output("ro-op-c"))],
            ..Config::default()
        };

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicate_routing_entries() {
        let config = Config {
            routing: RoutingTable::from(vec![
                RouteConfig::new("network", "A", 10),
                RouteConfig::new("network", "B", 20),
                RouteConfig::new("identity", "A", 30),
                RouteConfig::new("operation", "A", 30),
            ]),
            ..Config::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0],
            ValidationError::DuplicateGroup {
                group: "network".to_string()
            }
        );
        assert_eq!(
            errors[1],
            ValidationError::DuplicatePriority {
                priority: 30,
                groups: vec!["identity".to_string(), "operation".to_string()],
            }
        );
    }

    #[test]
    fn test_seed_attribute_must_match_role() {
        let mut operation = seed("ro-op-c", EndpointRole::Operation);
        operation.attributes.remote_port = Some(8443);

        let config = Config {
            endpoints: vec![operation],
            ..Config::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::AttributeNotApplicable {
                endpoint: "ro-op-c".to_string(),
                role: EndpointRole::Operation,
                attribute: Attribute::RemotePort,
            }]
        );
    }

    #[test]
    fn test_stack_references_are_checked() {
        let config = Config {
            endpoints: vec![seed("ro-op-c", EndpointRole::Operation)],
            stacks: vec![
                stack("Registration", Some("ro-op-c"), Some("missing")),
                stack("Registration", None, None),
            ],
            ..Config::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::RoleMismatch {
            stack: "Registration".to_string(),
            endpoint: "ro-op-c".to_string(),
            expected: EndpointRole::Network,
            actual: EndpointRole::Operation,
        }));
        assert!(errors.contains(&ValidationError::UnknownEndpoint {
            referenced_by: "Registration".to_string(),
            endpoint: "missing".to_string(),
        }));
        assert!(errors.contains(&ValidationError::DuplicateStackName {
            stack: "Registration".to_string()
        }));
    }

    #[test]
    fn test_construct_without_output_is_only_a_warning() {
        let config = Config {
            endpoints: vec![seed("ro-op-c", EndpointRole::Operation)],
            constructs: vec![
                ForwardingConstruct::new("fc-1", "Silent").with_port(Port::input("ro-op-c")),
            ],
            ..Config::default()
        };

        assert!(validate_config(&config).is_ok());
        let warnings = config_warnings(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].is_warning());
    }

    #[test]
    fn test_duplicate_construct_and_unknown_port() {
        let config = Config {
            endpoints: vec![seed("peer-op-c", EndpointRole::Operation)],
            constructs: vec![
                ForwardingConstruct::new("fc-1", "Update").with_port(Port::output("peer-op-c")),
                ForwardingConstruct::new("fc-2", "Update").with_port(Port::input("ghost")),
            ],
            ..Config::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateConstructName {
                    construct: "Update".to_string()
                },
                ValidationError::UnknownEndpoint {
                    referenced_by: "Update".to_string(),
                    endpoint: "ghost".to_string(),
                },
            ]
        );
    }
}
