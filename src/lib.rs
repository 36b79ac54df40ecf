// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // store, resolver and dispatcher backends
pub mod config;     // config + runtime wiring
pub mod engine;     // reconcile, plan, cascade
pub mod errors;     // error handling
pub mod events;     // inbound lifecycle events
pub mod model;      // endpoints, changes, plans
pub mod observability;
pub mod traits;     // backend seams
