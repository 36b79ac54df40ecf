// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::consts::{
    BEQUEATH_FORWARDING, DEFAULT_SIMULATED_STATUS, DEREGISTRATION_FORWARDING,
    LOCAL_HTTP_SERVER_STACK, OPERATION_UPDATE_FORWARDING, REGISTRATION_FORWARDING,
    SERVER_REPLACEMENT_FORWARDING,
};
use crate::config::RoutingTable;
use crate::errors::ConfigError;
use crate::model::{
    Address, Attribute, AttributeValue, EndpointId, EndpointRole, EndpointStack,
    ForwardingConstruct, Protocol,
};
use crate::observability::messages::validation::{ValidationFailed, ValidationWarning};
use crate::observability::messages::StructuredLog;

/// Main configuration structure for the reconciliation-and-cascade engine.
///
/// Every section is optional; an empty document yields the built-in routing
/// table, default interaction names and no seeded endpoints.
///
/// # Example
/// ```yaml
/// settle_policy: any_terminal
/// routing:
///   - group: network
///     forwarding_name: ServiceRequestCausesLtpUpdateRequest
///     priority: 20
/// endpoints:
///   - id: ro-tcp-c
///     role: network
///     attributes:
///       remote_address: { ip-address: { ipv-4-address: 10.0.0.1 } }
///       remote_port: 8443
/// stacks:
///   - name: PromptForRegisteringCausesRegistrationRequest
///     network: ro-tcp-c
/// constructs:
///   - uuid: fc-ltp-update
///     name: ServiceRequestCausesLtpUpdateRequest
///     ports:
///       - direction: output
///         endpoint: alt-op-c
/// simulation:
///   default_status: 200
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settle_policy: SettlePolicy,
    #[serde(default)]
    pub routing: RoutingTable,
    #[serde(default)]
    pub interactions: InteractionNames,
    #[serde(default)]
    pub endpoints: Vec<EndpointSeed>,
    #[serde(default)]
    pub stacks: Vec<StackConfig>,
    #[serde(default)]
    pub constructs: Vec<ForwardingConstruct>,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// When a cascade step counts as terminal success.
///
/// # Variants
/// * `AnyTerminal` - one terminal-success dispatch in a step settles the cascade
/// * `AllTerminal` - every dispatch of the step must report terminal success
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlePolicy {
    #[default]
    AnyTerminal,
    AllTerminal,
}

/// Symbolic names of the interactions the lifecycle operations reconcile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InteractionNames {
    pub registration: String,
    pub local_http_server: String,
    pub predecessor: String,
    pub server_replacement_broadcast: String,
    pub operation_update_broadcast: String,
    pub old_release_deregistration: String,
}

impl Default for InteractionNames {
    fn default() -> Self {
        Self {
            registration: REGISTRATION_FORWARDING.to_string(),
            local_http_server: LOCAL_HTTP_SERVER_STACK.to_string(),
            predecessor: BEQUEATH_FORWARDING.to_string(),
            server_replacement_broadcast: SERVER_REPLACEMENT_FORWARDING.to_string(),
            operation_update_broadcast: OPERATION_UPDATE_FORWARDING.to_string(),
            old_release_deregistration: DEREGISTRATION_FORWARDING.to_string(),
        }
    }
}

/// Initial record of one endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointSeed {
    pub id: EndpointId,
    pub role: EndpointRole,
    #[serde(default)]
    pub attributes: SeedAttributes,
}

/// Initial attribute values; fields not matching the endpoint role are
/// rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedAttributes {
    pub application_name: Option<String>,
    pub release_number: Option<String>,
    pub remote_address: Option<Address>,
    pub remote_port: Option<u16>,
    pub remote_protocol: Option<Protocol>,
    pub operation_name: Option<String>,
    pub local_address: Option<Address>,
    pub local_port: Option<u16>,
}

impl SeedAttributes {
    pub fn to_pairs(&self) -> Vec<(Attribute, AttributeValue)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.application_name {
            pairs.push((Attribute::ApplicationName, AttributeValue::text(v.clone())));
        }
        if let Some(v) = &self.release_number {
            pairs.push((Attribute::ReleaseNumber, AttributeValue::text(v.clone())));
        }
        if let Some(v) = &self.remote_address {
            pairs.push((Attribute::RemoteAddress, AttributeValue::Address(v.clone())));
        }
        if let Some(v) = self.remote_port {
            pairs.push((Attribute::RemotePort, AttributeValue::Port(v)));
        }
        if let Some(v) = self.remote_protocol {
            pairs.push((Attribute::RemoteProtocol, AttributeValue::Protocol(v)));
        }
        if let Some(v) = &self.operation_name {
            pairs.push((Attribute::OperationName, AttributeValue::text(v.clone())));
        }
        if let Some(v) = &self.local_address {
            pairs.push((Attribute::LocalAddress, AttributeValue::Address(v.clone())));
        }
        if let Some(v) = self.local_port {
            pairs.push((Attribute::LocalPort, AttributeValue::Port(v)));
        }
        pairs
    }
}

/// One named endpoint stack, at most one endpoint per role.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackConfig {
    pub name: String,
    pub identity: Option<EndpointId>,
    pub network: Option<EndpointId>,
    pub operation: Option<EndpointId>,
    pub local_server: Option<EndpointId>,
}

impl StackConfig {
    /// Filled slots as `(role, endpoint)` pairs.
    pub fn members(&self) -> Vec<(EndpointRole, &EndpointId)> {
        [
            (EndpointRole::Identity, self.identity.as_ref()),
            (EndpointRole::Network, self.network.as_ref()),
            (EndpointRole::Operation, self.operation.as_ref()),
            (EndpointRole::LocalServer, self.local_server.as_ref()),
        ]
        .into_iter()
        .filter_map(|(role, id)| id.map(|id| (role, id)))
        .collect()
    }

    pub fn to_stack(&self) -> EndpointStack {
        self.members()
            .into_iter()
            .fold(EndpointStack::new(self.name.clone()), |stack, (role, id)| {
                stack.with_member(role, id.clone())
            })
    }
}

/// Response script for the demo dispatcher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub default_status: u16,
    pub responses: HashMap<EndpointId, u16>,
    pub unreachable: Vec<EndpointId>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_status: DEFAULT_SIMULATED_STATUS,
            responses: HashMap::new(),
            unreachable: Vec::new(),
        }
    }
}

/// Config file formats accepted by [`load_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(extension)),
        }
    }
}

/// Parse a config document without touching the filesystem
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let cfg = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    Ok(cfg)
}

/// Load a config from a YAML or TOML file, chosen by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_config(&content, format)
}

/// Load and validate a config file
///
/// Warnings are logged; errors are collected into [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    check_config(&cfg)?;
    Ok(cfg)
}

/// Validate an already parsed config, logging warnings
pub fn check_config(cfg: &Config) -> Result<(), ConfigError> {
    for warning in crate::config::config_warnings(cfg) {
        ValidationWarning { warning: &warning }.log();
    }

    crate::config::validate_config(cfg).map_err(|errors| {
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        ConfigError::Invalid(errors)
    })
}
