// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Rejection of an inbound event at the boundary, before it reaches the core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Field '{0}' must not be blank")]
    BlankField(&'static str),

    #[error("Field '{0}' must be a port between 1 and 65535")]
    InvalidPort(&'static str),

    #[error("Malformed event body: {0}")]
    Malformed(String),
}
