// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation warnings and errors.

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Non-fatal validation finding.
///
/// # Log Level
/// `warn!` - Configuration smell that does not block loading
pub struct ValidationWarning<'a> {
    pub warning: &'a ValidationError,
}

impl Display for ValidationWarning<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Configuration warning: {}", self.warning)
    }
}

impl StructuredLog for ValidationWarning<'_> {
    fn log(&self) {
        tracing::warn!(warning = %self.warning, "{}", self);
    }
}

/// Configuration rejected.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use peer_cascade::observability::messages::validation::ValidationFailed;
///
/// let msg = ValidationFailed { error_count: 3 };
/// assert_eq!(msg.to_string(), "Configuration validation failed with 3 error(s)");
/// ```
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation failed with {} error(s)",
            self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }
}
