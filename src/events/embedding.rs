// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::EventError;
use crate::events::{check_address, check_port, check_text};
use crate::model::{Address, Attribute, DesiredConfig, Protocol};

/// Instruction to take over from an older release.
///
/// Names the registry office operations used to announce the replacement and
/// where the old release can still be reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmbeddingEvent {
    #[serde(rename = "registry-office-application")]
    pub registry_office_application: Option<String>,
    #[serde(rename = "registry-office-application-release-number")]
    pub registry_office_release_number: Option<String>,
    pub registry_office_protocol: Option<Protocol>,
    pub registry_office_address: Option<Address>,
    pub registry_office_port: Option<u16>,
    pub deregistration_operation: Option<String>,
    pub relay_operation_update_operation: Option<String>,
    pub relay_server_replacement_operation: Option<String>,
    pub old_release_protocol: Option<Protocol>,
    pub old_release_address: Option<Address>,
    pub old_release_port: Option<u16>,
}

impl EmbeddingEvent {
    pub fn validate(&self) -> Result<(), EventError> {
        check_text("registry-office-application", &self.registry_office_application)?;
        check_text(
            "registry-office-application-release-number",
            &self.registry_office_release_number,
        )?;
        check_address("registry-office-address", &self.registry_office_address)?;
        check_port("registry-office-port", self.registry_office_port)?;
        check_text("deregistration-operation", &self.deregistration_operation)?;
        check_text(
            "relay-operation-update-operation",
            &self.relay_operation_update_operation,
        )?;
        check_text(
            "relay-server-replacement-operation",
            &self.relay_server_replacement_operation,
        )?;
        check_address("old-release-address", &self.old_release_address)?;
        check_port("old-release-port", self.old_release_port)?;
        Ok(())
    }

    /// Registry office reached through the server-replacement broadcast.
    pub fn server_replacement_config(&self) -> DesiredConfig {
        let mut desired = DesiredConfig::new();
        desired.set_if_present(Attribute::ApplicationName, self.registry_office_application.clone());
        desired.set_if_present(Attribute::ReleaseNumber, self.registry_office_release_number.clone());
        desired.set_if_present(Attribute::RemoteAddress, self.registry_office_address.clone());
        desired.set_if_present(Attribute::RemotePort, self.registry_office_port);
        desired.set_if_present(Attribute::RemoteProtocol, self.registry_office_protocol);
        desired.set_if_present(
            Attribute::OperationName,
            self.relay_server_replacement_operation.clone(),
        );
        desired
    }

    pub fn operation_update_config(&self) -> DesiredConfig {
        let mut desired = DesiredConfig::new();
        desired.set_if_present(
            Attribute::OperationName,
            self.relay_operation_update_operation.clone(),
        );
        desired
    }

    pub fn deregistration_config(&self) -> DesiredConfig {
        let mut desired = DesiredConfig::new();
        desired.set_if_present(Attribute::OperationName, self.deregistration_operation.clone());
        desired
    }

    /// Where the predecessor release still listens.
    pub fn old_release_config(&self) -> DesiredConfig {
        let mut desired = DesiredConfig::new();
        desired.set_if_present(Attribute::RemoteAddress, self.old_release_address.clone());
        desired.set_if_present(Attribute::RemotePort, self.old_release_port);
        desired.set_if_present(Attribute::RemoteProtocol, self.old_release_protocol);
        desired
    }
}
