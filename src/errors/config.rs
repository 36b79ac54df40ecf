// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

use crate::model::{Attribute, EndpointRole};

/// Problems found while validating a routing configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two routing entries claim the same group label
    DuplicateGroup {
        group: String,
    },
    /// Two routing entries share a priority, which would make plan order ambiguous
    DuplicatePriority {
        priority: u32,
        groups: Vec<String>,
    },
    /// An endpoint id is seeded more than once
    DuplicateEndpointId {
        endpoint: String,
    },
    /// A stack name is declared more than once
    DuplicateStackName {
        stack: String,
    },
    /// A forwarding construct name is declared more than once
    DuplicateConstructName {
        construct: String,
    },
    /// A stack member or construct port points at an endpoint that is not seeded
    UnknownEndpoint {
        /// The stack or construct holding the reference
        referenced_by: String,
        endpoint: String,
    },
    /// A stack slot is filled by an endpoint of a different role
    RoleMismatch {
        stack: String,
        endpoint: String,
        expected: EndpointRole,
        actual: EndpointRole,
    },
    /// A seeded endpoint carries an attribute its role does not hold
    AttributeNotApplicable {
        endpoint: String,
        role: EndpointRole,
        attribute: Attribute,
    },
    /// A construct has no OUTPUT port, so steps routed through it send nothing
    ConstructWithoutOutputWarning {
        construct: String,
    },
}

impl ValidationError {
    /// Warnings are logged but do not reject the configuration.
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationError::ConstructWithoutOutputWarning { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateGroup { group } => {
                write!(f, "Duplicate routing group: '{}'", group)
            }
            ValidationError::DuplicatePriority { priority, groups } => {
                write!(
                    f,
                    "Routing priority {} is shared by groups [{}]",
                    priority,
                    groups.join(", ")
                )
            }
            ValidationError::DuplicateEndpointId { endpoint } => {
                write!(f, "Duplicate endpoint ID: '{}'", endpoint)
            }
            ValidationError::DuplicateStackName { stack } => {
                write!(f, "Duplicate stack name: '{}'", stack)
            }
            ValidationError::DuplicateConstructName { construct } => {
                write!(f, "Duplicate forwarding construct name: '{}'", construct)
            }
            ValidationError::UnknownEndpoint {
                referenced_by,
                endpoint,
            } => {
                write!(
                    f,
                    "'{}' references endpoint '{}' which does not exist",
                    referenced_by, endpoint
                )
            }
            ValidationError::RoleMismatch {
                stack,
                endpoint,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Stack '{}' expects a {} endpoint but '{}' is {}",
                    stack, expected, endpoint, actual
                )
            }
            ValidationError::AttributeNotApplicable {
                endpoint,
                role,
                attribute,
            } => {
                write!(
                    f,
                    "Endpoint '{}' is {} and cannot hold '{}'",
                    endpoint, role, attribute
                )
            }
            ValidationError::ConstructWithoutOutputWarning { construct } => {
                write!(
                    f,
                    "Forwarding construct '{}' has no output port; steps routed through it will not notify anyone",
                    construct
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config extension '{0}' (expected yaml, yml or toml)")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
