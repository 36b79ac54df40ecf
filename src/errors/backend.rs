// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported by the external collaborators: the endpoint store, the
//! forwarding resolver and the event dispatcher.

use thiserror::Error;

use crate::model::{Attribute, EndpointId, EndpointRole};

/// Failure reading or writing an endpoint attribute.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(EndpointId),

    #[error("Attribute '{attribute}' is not held by {role} endpoint '{endpoint}'")]
    AttributeNotApplicable {
        endpoint: EndpointId,
        role: EndpointRole,
        attribute: Attribute,
    },

    #[error("Endpoint store unavailable: {0}")]
    Unavailable(String),
}

/// The forwarding graph is configured but could not be consulted.
///
/// A name that simply is not configured is not an error; resolvers return
/// `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    #[error("Forwarding graph unreachable while resolving '{name}': {reason}")]
    Unreachable { name: String, reason: String },
}

/// Transport-level failure sending a notification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Failed to send to '{target}': {reason}")]
    Transport { target: EndpointId, reason: String },

    #[error("Dispatch to '{0}' was abandoned")]
    Abandoned(EndpointId),
}
