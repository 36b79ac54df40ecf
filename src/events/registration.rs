// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::EventError;
use crate::events::{check_address, check_port, check_text};
use crate::model::{Address, Attribute, DesiredConfig, Protocol};

/// Instruction to register this instance at the registry office.
///
/// Carries the registry office coordinates, this instance's own HTTP server
/// and, when this instance replaces an older release, the predecessor's
/// identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistrationEvent {
    #[serde(rename = "registry-office-application")]
    pub registry_office_application: Option<String>,
    #[serde(rename = "registry-office-application-release-number")]
    pub registry_office_release_number: Option<String>,
    pub registration_operation: Option<String>,
    pub registry_office_protocol: Option<Protocol>,
    pub registry_office_address: Option<Address>,
    pub registry_office_port: Option<u16>,
    pub http_address: Option<Address>,
    pub http_port: Option<u16>,
    pub preceding_application_name: Option<String>,
    pub preceding_release_number: Option<String>,
}

impl RegistrationEvent {
    pub fn validate(&self) -> Result<(), EventError> {
        check_text("registry-office-application", &self.registry_office_application)?;
        check_text(
            "registry-office-application-release-number",
            &self.registry_office_release_number,
        )?;
        check_text("registration-operation", &self.registration_operation)?;
        check_address("registry-office-address", &self.registry_office_address)?;
        check_port("registry-office-port", self.registry_office_port)?;
        check_address("http-address", &self.http_address)?;
        check_port("http-port", self.http_port)?;
        check_text("preceding-application-name", &self.preceding_application_name)?;
        check_text("preceding-release-number", &self.preceding_release_number)?;
        Ok(())
    }

    /// Identity, network and registration operation of the registry office.
    pub fn registry_office_config(&self) -> DesiredConfig {
        let mut desired = DesiredConfig::new();
        desired.set_if_present(Attribute::ApplicationName, self.registry_office_application.clone());
        desired.set_if_present(Attribute::ReleaseNumber, self.registry_office_release_number.clone());
        desired.set_if_present(Attribute::RemoteAddress, self.registry_office_address.clone());
        desired.set_if_present(Attribute::RemotePort, self.registry_office_port);
        desired.set_if_present(Attribute::RemoteProtocol, self.registry_office_protocol);
        desired.set_if_present(Attribute::OperationName, self.registration_operation.clone());
        desired
    }

    /// This instance's own HTTP server.
    pub fn local_server_config(&self) -> DesiredConfig {
        let mut desired = DesiredConfig::new();
        desired.set_if_present(Attribute::LocalAddress, self.http_address.clone());
        desired.set_if_present(Attribute::LocalPort, self.http_port);
        desired
    }

    pub fn predecessor_config(&self) -> DesiredConfig {
        let mut desired = DesiredConfig::new();
        desired.set_if_present(Attribute::ApplicationName, self.preceding_application_name.clone());
        desired.set_if_present(Attribute::ReleaseNumber, self.preceding_release_number.clone());
        desired
    }
}
