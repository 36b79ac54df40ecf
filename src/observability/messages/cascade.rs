// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for cascade execution.
//!
//! This module contains message types for logging events related to:
//! * Cascade start and completion
//! * Per-step dispatch, failures and early settlement
//! * Caller-initiated cancellation

use crate::errors::StepError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cascade execution started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct CascadeStarted<'a> {
    pub step_count: usize,
    pub correlation_id: &'a str,
    pub trace_indicator: &'a str,
}

impl Display for CascadeStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting cascade of {} step(s) (x-correlator={}, trace={})",
            self.step_count, self.correlation_id, self.trace_indicator
        )
    }
}

impl StructuredLog for CascadeStarted<'_> {
    fn log(&self) {
        tracing::info!(
            step_count = self.step_count,
            correlation_id = self.correlation_id,
            trace_indicator = self.trace_indicator,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "cascade",
            span_name = name,
            step_count = self.step_count,
            correlation_id = self.correlation_id,
            trace_indicator = self.trace_indicator,
        )
    }
}

/// A step is about to dispatch.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct StepStarted<'a> {
    pub position: usize,
    pub forwarding_name: &'a str,
    pub trace_indicator: &'a str,
}

impl Display for StepStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step {} '{}' dispatching (trace={})",
            self.position, self.forwarding_name, self.trace_indicator
        )
    }
}

impl StructuredLog for StepStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            position = self.position,
            forwarding_name = self.forwarding_name,
            trace_indicator = self.trace_indicator,
            "{}", self
        );
    }
}

/// A step recorded an error; the cascade continues.
///
/// # Log Level
/// `warn!` - Isolated failure
pub struct StepFailed<'a> {
    pub position: usize,
    pub forwarding_name: &'a str,
    pub error: &'a StepError,
}

impl Display for StepFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step {} '{}' failed: {}",
            self.position, self.forwarding_name, self.error
        )
    }
}

impl StructuredLog for StepFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            position = self.position,
            forwarding_name = self.forwarding_name,
            error = %self.error,
            "{}", self
        );
    }
}

/// The construct has no OUTPUT port, so the step notifies nobody.
///
/// # Log Level
/// `warn!` - Configuration gap
pub struct StepWithoutTargets<'a> {
    pub position: usize,
    pub forwarding_name: &'a str,
}

impl Display for StepWithoutTargets<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step {} '{}' has no output targets",
            self.position, self.forwarding_name
        )
    }
}

impl StructuredLog for StepWithoutTargets<'_> {
    fn log(&self) {
        tracing::warn!(
            position = self.position,
            forwarding_name = self.forwarding_name,
            "{}", self
        );
    }
}

/// Terminal success observed; remaining steps are skipped.
///
/// # Log Level
/// `info!` - Important operational event
pub struct CascadeSettledEarly<'a> {
    pub position: usize,
    pub forwarding_name: &'a str,
    pub skipped: usize,
}

impl Display for CascadeSettledEarly<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step {} '{}' reported terminal success; skipping {} remaining step(s)",
            self.position, self.forwarding_name, self.skipped
        )
    }
}

impl StructuredLog for CascadeSettledEarly<'_> {
    fn log(&self) {
        tracing::info!(
            position = self.position,
            forwarding_name = self.forwarding_name,
            skipped = self.skipped,
            "{}", self
        );
    }
}

/// Caller cancelled; remaining steps abandoned.
///
/// # Log Level
/// `warn!` - Interrupted work
pub struct CascadeCancelled {
    pub position: usize,
    pub abandoned: usize,
}

impl Display for CascadeCancelled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cascade cancelled at step {}; {} step(s) abandoned",
            self.position, self.abandoned
        )
    }
}

impl StructuredLog for CascadeCancelled {
    fn log(&self) {
        tracing::warn!(
            position = self.position,
            abandoned = self.abandoned,
            "{}", self
        );
    }
}

/// Cascade finished.
///
/// # Log Level
/// `info!` when settled, `warn!` otherwise
pub struct CascadeCompleted<'a> {
    pub state: &'a str,
    pub executed: usize,
    pub failed: usize,
    pub duration: std::time::Duration,
}

impl Display for CascadeCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cascade {}: {} step(s) executed, {} failed, in {:?}",
            self.state, self.executed, self.failed, self.duration
        )
    }
}

impl StructuredLog for CascadeCompleted<'_> {
    fn log(&self) {
        if self.failed > 0 {
            tracing::warn!(
                state = self.state,
                executed = self.executed,
                failed = self.failed,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        } else {
            tracing::info!(
                state = self.state,
                executed = self.executed,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        }
    }
}
