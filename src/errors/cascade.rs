// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::{DispatchError, ResolverError};
use crate::model::{EndpointId, StatusClass};

/// Error recorded against one cascade step. Never aborts the cascade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("No forwarding construct named '{0}'")]
    ConstructNotFound(String),

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Target '{target}' answered with status '{status}'")]
    UnsuccessfulStatus {
        target: EndpointId,
        status: StatusClass,
    },
}
