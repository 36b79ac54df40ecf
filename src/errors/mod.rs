// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod backend;
mod cascade;
mod config;
mod event;
mod reconcile;

pub use backend::{DispatchError, ResolverError, StoreError};
pub use cascade::StepError;
pub use config::{ConfigError, ValidationError};
pub use event::EventError;
pub use reconcile::{FailurePhase, ReconcileFailure};
