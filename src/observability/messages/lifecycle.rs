// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for register/embed cycles.

use crate::errors::StoreError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A lifecycle operation started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct LifecycleStarted<'a> {
    pub operation: &'a str,
    pub correlation_id: &'a str,
    pub desired_attributes: usize,
}

impl Display for LifecycleStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} started with {} supplied attribute(s) (x-correlator={})",
            self.operation, self.desired_attributes, self.correlation_id
        )
    }
}

impl StructuredLog for LifecycleStarted<'_> {
    fn log(&self) {
        tracing::info!(
            operation = self.operation,
            correlation_id = self.correlation_id,
            desired_attributes = self.desired_attributes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "lifecycle",
            span_name = name,
            operation = self.operation,
            correlation_id = self.correlation_id,
        )
    }
}

/// A lifecycle operation finished.
///
/// # Log Level
/// `info!` - Important operational event
pub struct LifecycleCompleted<'a> {
    pub operation: &'a str,
    pub changed_endpoints: usize,
    pub reconcile_failures: usize,
    pub steps: usize,
    pub state: &'a str,
}

impl Display for LifecycleCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} finished: {} endpoint(s) changed, {} reconcile failure(s), {} step(s) planned, cascade {}",
            self.operation, self.changed_endpoints, self.reconcile_failures, self.steps, self.state
        )
    }
}

impl StructuredLog for LifecycleCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            operation = self.operation,
            changed_endpoints = self.changed_endpoints,
            reconcile_failures = self.reconcile_failures,
            steps = self.steps,
            state = self.state,
            "{}", self
        );
    }
}

/// The predecessor's application name could not be read, so the handoff
/// notification goes out without it.
///
/// # Log Level
/// `warn!` - Partial information
pub struct PredecessorNameUnavailable<'a> {
    pub stack: &'a str,
    pub error: &'a StoreError,
}

impl Display for PredecessorNameUnavailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Could not read the application name of predecessor stack '{}': {}",
            self.stack, self.error
        )
    }
}

impl StructuredLog for PredecessorNameUnavailable<'_> {
    fn log(&self) {
        tracing::warn!(stack = self.stack, error = %self.error, "{}", self);
    }
}
