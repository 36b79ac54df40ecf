// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::model::EndpointId;

/// Direction of a forwarding-construct port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    Input,
    Output,
    Management,
}

/// A port of a forwarding construct, pointing at one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub direction: PortDirection,
    pub endpoint: EndpointId,
}

impl Port {
    pub fn output(endpoint: impl Into<EndpointId>) -> Self {
        Self {
            direction: PortDirection::Output,
            endpoint: endpoint.into(),
        }
    }

    pub fn input(endpoint: impl Into<EndpointId>) -> Self {
        Self {
            direction: PortDirection::Input,
            endpoint: endpoint.into(),
        }
    }

    pub fn management(endpoint: impl Into<EndpointId>) -> Self {
        Self {
            direction: PortDirection::Management,
            endpoint: endpoint.into(),
        }
    }
}

/// Named routing node whose OUTPUT ports determine dispatch targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingConstruct {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub ports: Vec<Port>,
}

impl ForwardingConstruct {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            ports: Vec::new(),
        }
    }

    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    /// Targets of the OUTPUT ports, in declared port order.
    pub fn output_targets(&self) -> impl Iterator<Item = &EndpointId> {
        self.ports
            .iter()
            .filter(|port| port.direction == PortDirection::Output)
            .map(|port| &port.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_output_ports_are_targets() {
        let construct = ForwardingConstruct::new("fc-1", "ServiceRequestCausesLtpUpdateRequest")
            .with_port(Port::management("self-op-s"))
            .with_port(Port::input("self-op-s-2"))
            .with_port(Port::output("alt-op-c"))
            .with_port(Port::output("okm-op-c"));

        let targets: Vec<&str> = construct.output_targets().map(|id| id.as_str()).collect();
        assert_eq!(targets, vec!["alt-op-c", "okm-op-c"]);
    }

    #[test]
    fn construct_parses_from_yaml() {
        let yaml = r#"
uuid: fc-1
name: PromptForRegisteringCausesRegistrationRequest
ports:
  - direction: input
    endpoint: self-op-s
  - direction: output
    endpoint: ro-op-c
"#;
        let construct: ForwardingConstruct = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(construct.ports.len(), 2);
        assert_eq!(construct.output_targets().count(), 1);
    }
}
