// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for automation planning.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A change group has no entry in the routing table and produces no step.
///
/// # Log Level
/// `warn!` - Configuration gap
pub struct UnroutedGroup<'a> {
    pub group: &'a str,
}

impl Display for UnroutedGroup<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Change group '{}' has no routing entry; no notification planned",
            self.group
        )
    }
}

impl StructuredLog for UnroutedGroup<'_> {
    fn log(&self) {
        tracing::warn!(group = self.group, "{}", self);
    }
}

/// Plan constructed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PlanBuilt<'a> {
    pub step_count: usize,
    pub groups: &'a [&'a str],
}

impl Display for PlanBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Automation plan built: {} step(s) [{}]",
            self.step_count,
            self.groups.join(" -> ")
        )
    }
}

impl StructuredLog for PlanBuilt<'_> {
    fn log(&self) {
        tracing::info!(
            step_count = self.step_count,
            groups = self.groups.join(","),
            "{}", self
        );
    }
}
