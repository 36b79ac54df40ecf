// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for reconciliation events.
//!
//! This module contains message types for logging events related to:
//! * Stack resolution (not configured, unreachable)
//! * Attribute diff-and-write outcomes
//! * Per-stack reconciliation summaries

use crate::errors::{ReconcileFailure, ResolverError};
use crate::model::{Attribute, EndpointId, EndpointRole};
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Stack name resolved to nothing; the interaction is optional this cycle.
///
/// # Log Level
/// `debug!` - Expected outcome, useful when tracing configuration
pub struct StackNotConfigured<'a> {
    pub stack: &'a str,
}

impl Display for StackNotConfigured<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stack '{}' is not configured; skipping reconciliation", self.stack)
    }
}

impl StructuredLog for StackNotConfigured<'_> {
    fn log(&self) {
        tracing::debug!(stack = self.stack, "{}", self);
    }
}

/// Stack is configured but the forwarding graph could not be consulted.
///
/// # Log Level
/// `warn!` - Partial-reconciliation signal
pub struct StackResolutionFailed<'a> {
    pub stack: &'a str,
    pub error: &'a ResolverError,
}

impl Display for StackResolutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to resolve stack '{}': {}", self.stack, self.error)
    }
}

impl StructuredLog for StackResolutionFailed<'_> {
    fn log(&self) {
        tracing::warn!(stack = self.stack, error = %self.error, "{}", self);
    }
}

/// Desired attribute has no endpoint of the owning role in the stack.
///
/// # Log Level
/// `debug!` - Expected for partial stacks
pub struct AttributeSkipped<'a> {
    pub stack: &'a str,
    pub attribute: Attribute,
    pub role: EndpointRole,
}

impl Display for AttributeSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stack '{}' has no {} endpoint; '{}' left untouched",
            self.stack, self.role, self.attribute
        )
    }
}

impl StructuredLog for AttributeSkipped<'_> {
    fn log(&self) {
        tracing::debug!(
            stack = self.stack,
            attribute = self.attribute.name(),
            role = self.role.as_str(),
            "{}", self
        );
    }
}

/// Attribute value differed and was written.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct AttributeUpdated<'a> {
    pub stack: &'a str,
    pub endpoint: &'a EndpointId,
    pub attribute: Attribute,
}

impl Display for AttributeUpdated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Updated '{}' on endpoint '{}' (stack '{}')",
            self.attribute, self.endpoint, self.stack
        )
    }
}

impl StructuredLog for AttributeUpdated<'_> {
    fn log(&self) {
        tracing::debug!(
            stack = self.stack,
            endpoint = self.endpoint.as_str(),
            attribute = self.attribute.name(),
            "{}", self
        );
    }
}

/// A read or write failed; evaluation of siblings continues.
///
/// # Log Level
/// `warn!` - Partial failure
pub struct AttributeReconcileFailed<'a> {
    pub stack: &'a str,
    pub failure: &'a ReconcileFailure,
}

impl Display for AttributeReconcileFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stack '{}': {}", self.stack, self.failure)
    }
}

impl StructuredLog for AttributeReconcileFailed<'_> {
    fn log(&self) {
        tracing::warn!(stack = self.stack, error = %self.failure, "{}", self);
    }
}

/// Per-stack reconciliation summary.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use peer_cascade::observability::messages::reconcile::StackReconciled;
///
/// let msg = StackReconciled {
///     stack: "PromptForRegisteringCausesRegistrationRequest",
///     changed_endpoints: 2,
///     failures: 0,
/// };
///
/// assert!(msg.to_string().contains("2 endpoint(s) changed"));
/// ```
pub struct StackReconciled<'a> {
    pub stack: &'a str,
    pub changed_endpoints: usize,
    pub failures: usize,
}

impl Display for StackReconciled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reconciled stack '{}': {} endpoint(s) changed, {} failure(s)",
            self.stack, self.changed_endpoints, self.failures
        )
    }
}

impl StructuredLog for StackReconciled<'_> {
    fn log(&self) {
        if self.failures > 0 {
            tracing::warn!(
                stack = self.stack,
                changed_endpoints = self.changed_endpoints,
                failures = self.failures,
                "{}", self
            );
        } else {
            tracing::info!(
                stack = self.stack,
                changed_endpoints = self.changed_endpoints,
                "{}", self
            );
        }
    }
}
