// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of a peer-facing endpoint record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointId(pub String);

impl EndpointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EndpointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EndpointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The protocol role an endpoint plays inside a peer interaction.
///
/// Each role owns a fixed set of attributes (see [`Attribute::role`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRole {
    /// Carries the peer's application name and release number.
    Identity,
    /// Carries the peer's remote address, port and transport protocol.
    Network,
    /// Carries the name of the operation invoked on the peer.
    Operation,
    /// Carries this instance's own listening address and port.
    LocalServer,
}

impl EndpointRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointRole::Identity => "identity",
            EndpointRole::Network => "network",
            EndpointRole::Operation => "operation",
            EndpointRole::LocalServer => "local_server",
        }
    }
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute held by an endpoint record.
///
/// Declaration order is the order in which reconciliation evaluates
/// attributes of a [`DesiredConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attribute {
    ApplicationName,
    ReleaseNumber,
    RemoteAddress,
    RemotePort,
    RemoteProtocol,
    OperationName,
    LocalAddress,
    LocalPort,
}

impl Attribute {
    /// The role of the endpoint that owns this attribute.
    pub fn role(&self) -> EndpointRole {
        match self {
            Attribute::ApplicationName | Attribute::ReleaseNumber => EndpointRole::Identity,
            Attribute::RemoteAddress | Attribute::RemotePort | Attribute::RemoteProtocol => {
                EndpointRole::Network
            }
            Attribute::OperationName => EndpointRole::Operation,
            Attribute::LocalAddress | Attribute::LocalPort => EndpointRole::LocalServer,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::ApplicationName => "application-name",
            Attribute::ReleaseNumber => "release-number",
            Attribute::RemoteAddress => "remote-address",
            Attribute::RemotePort => "remote-port",
            Attribute::RemoteProtocol => "remote-protocol",
            Attribute::OperationName => "operation-name",
            Attribute::LocalAddress => "local-address",
            Attribute::LocalPort => "local-port",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transport protocol spoken by a remote peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Http,
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => f.write_str("HTTP"),
            Protocol::Https => f.write_str("HTTPS"),
        }
    }
}

/// IPv4 wrapper as it appears on the wire: `{"ipv-4-address": "10.0.0.1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddress {
    #[serde(rename = "ipv-4-address")]
    pub ipv4_address: String,
}

/// Structured network address.
///
/// Reads and writes as a single-key map, either
/// `{"ip-address": {"ipv-4-address": "…"}}` or `{"domain-name": "…"}`.
/// The map goes through a plain struct so YAML, TOML and JSON all accept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AddressFields", into = "AddressFields")]
pub enum Address {
    IpAddress(IpAddress),
    DomainName(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct AddressFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip_address: Option<IpAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain_name: Option<String>,
}

impl TryFrom<AddressFields> for Address {
    type Error = String;

    fn try_from(fields: AddressFields) -> Result<Self, Self::Error> {
        match (fields.ip_address, fields.domain_name) {
            (Some(ip), None) => Ok(Address::IpAddress(ip)),
            (None, Some(name)) => Ok(Address::DomainName(name)),
            _ => Err("address needs exactly one of 'ip-address' or 'domain-name'".to_string()),
        }
    }
}

impl From<Address> for AddressFields {
    fn from(address: Address) -> Self {
        match address {
            Address::IpAddress(ip) => AddressFields {
                ip_address: Some(ip),
                ..AddressFields::default()
            },
            Address::DomainName(name) => AddressFields {
                domain_name: Some(name),
                ..AddressFields::default()
            },
        }
    }
}

impl Address {
    pub fn ipv4(address: impl Into<String>) -> Self {
        Address::IpAddress(IpAddress {
            ipv4_address: address.into(),
        })
    }

    pub fn domain(name: impl Into<String>) -> Self {
        Address::DomainName(name.into())
    }

    /// The textual host part, whichever form the address takes.
    pub fn host(&self) -> &str {
        match self {
            Address::IpAddress(ip) => &ip.ipv4_address,
            Address::DomainName(name) => name,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host())
    }
}

/// Value of an endpoint attribute.
///
/// Equality is structural: two addresses are equal when every nested field
/// is equal, and no coercion happens between variants (`Text("8443")` never
/// equals `Port(8443)`).
/// Written untagged for payloads; never read back, since seeds and events
/// carry typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Port(u16),
    Address(Address),
    Protocol(Protocol),
    Text(String),
}

impl AttributeValue {
    pub fn text(value: impl Into<String>) -> Self {
        AttributeValue::Text(value.into())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => f.write_str(text),
            AttributeValue::Port(port) => write!(f, "{}", port),
            AttributeValue::Address(address) => write!(f, "{}", address),
            AttributeValue::Protocol(protocol) => write!(f, "{}", protocol),
        }
    }
}

impl From<Address> for AttributeValue {
    fn from(address: Address) -> Self {
        AttributeValue::Address(address)
    }
}

impl From<Protocol> for AttributeValue {
    fn from(protocol: Protocol) -> Self {
        AttributeValue::Protocol(protocol)
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        AttributeValue::Text(text)
    }
}

impl From<u16> for AttributeValue {
    fn from(port: u16) -> Self {
        AttributeValue::Port(port)
    }
}

/// Sparse desired state: only attributes supplied by the triggering event.
///
/// Backed by a `BTreeMap` so iteration follows [`Attribute`] declaration
/// order and repeated cycles evaluate attributes identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesiredConfig(pub BTreeMap<Attribute, AttributeValue>);

impl DesiredConfig {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, attribute: Attribute, value: impl Into<AttributeValue>) -> Self {
        self.0.insert(attribute, value.into());
        self
    }

    /// Insert only when the event actually supplied the field.
    pub fn set_if_present<V: Into<AttributeValue>>(&mut self, attribute: Attribute, value: Option<V>) {
        if let Some(value) = value {
            self.0.insert(attribute, value.into());
        }
    }

    pub fn get(&self, attribute: Attribute) -> Option<&AttributeValue> {
        self.0.get(&attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Attribute, &AttributeValue)> {
        self.0.iter()
    }
}

/// Named grouping of endpoints that jointly describe one peer interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointStack {
    pub name: String,
    pub members: BTreeMap<EndpointRole, EndpointId>,
}

impl EndpointStack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    pub fn with_member(mut self, role: EndpointRole, endpoint: impl Into<EndpointId>) -> Self {
        self.members.insert(role, endpoint.into());
        self
    }

    pub fn endpoint_for(&self, role: EndpointRole) -> Option<&EndpointId> {
        self.members.get(&role)
    }

    /// Reverse lookup used when grouping changes by role.
    pub fn role_of(&self, endpoint: &EndpointId) -> Option<EndpointRole> {
        self.members
            .iter()
            .find(|(_, id)| *id == endpoint)
            .map(|(role, _)| *role)
    }
}
