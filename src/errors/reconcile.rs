// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

use crate::errors::{ResolverError, StoreError};
use crate::model::{Attribute, EndpointId};

/// Which half of a read-compare-write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePhase {
    Read,
    Write,
}

impl fmt::Display for FailurePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePhase::Read => f.write_str("read"),
            FailurePhase::Write => f.write_str("write"),
        }
    }
}

/// Partial-reconciliation warning recorded while bringing a stack in line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileFailure {
    /// A single attribute could not be read or written. Siblings were still evaluated.
    #[error("Failed to {phase} '{attribute}' on '{endpoint}': {source}")]
    Attribute {
        endpoint: EndpointId,
        attribute: Attribute,
        phase: FailurePhase,
        #[source]
        source: StoreError,
    },

    /// The stack is configured but the forwarding graph could not be consulted.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}
