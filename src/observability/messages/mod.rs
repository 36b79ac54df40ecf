// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for a consistent human-readable line
//! and [`StructuredLog`] to emit the same event with typed fields.
//!
//! # Organization
//!
//! * `reconcile` - stack resolution and attribute reconciliation
//! * `planner` - automation plan construction
//! * `cascade` - cascade execution lifecycle and per-step outcomes
//! * `lifecycle` - register/embed cycles end to end
//! * `validation` - configuration validation warnings and errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use peer_cascade::observability::messages::StructuredLog;
//! use peer_cascade::observability::messages::planner::PlanBuilt;
//!
//! let groups = ["network", "operation"];
//! let msg = PlanBuilt {
//!     step_count: 2,
//!     groups: &groups,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod cascade;
pub mod lifecycle;
pub mod planner;
pub mod reconcile;
pub mod validation;

/// A log message that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event at its documented level.
    fn log(&self);

    /// A span carrying the message fields, for messages that open a scope.
    fn span(&self, name: &str) -> Span {
        tracing::info_span!("structured", span_name = name)
    }
}
