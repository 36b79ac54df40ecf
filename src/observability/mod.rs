// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with `Display` and
//! [`messages::StructuredLog`] so that log lines are not magic strings spread
//! through the engine.
//!
//! Messages are organized by subsystem:
//! * `messages::reconcile` - stack resolution and attribute writes
//! * `messages::planner` - plan construction
//! * `messages::cascade` - cascade execution
//! * `messages::lifecycle` - register/embed cycles
//! * `messages::validation` - configuration validation

use tracing_subscriber::EnvFilter;

pub mod messages;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
