// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::{InMemoryEndpointStore, ScriptedDispatcher, StaticForwardingResolver};
use crate::config::Config;
use crate::engine::factory::CoordinatorFactory;
use crate::engine::LifecycleCoordinator;

/// A ready-to-run engine over the in-memory reference backends.
///
/// The concrete backends stay reachable so callers can inspect store
/// contents and sent notifications after a cycle.
pub struct Runtime {
    pub store: Arc<InMemoryEndpointStore>,
    pub resolver: Arc<StaticForwardingResolver>,
    pub dispatcher: Arc<ScriptedDispatcher>,
    pub coordinator: LifecycleCoordinator,
}

/// Runtime builder - wires backends and the lifecycle coordinator from configuration.
///
/// # Examples
///
/// ```
/// use peer_cascade::config::{Config, RuntimeBuilder};
///
/// let runtime = RuntimeBuilder::from_config(&Config::default());
///
/// assert_eq!(runtime.store.write_count(), 0);
/// assert_eq!(
///     runtime.coordinator.interactions().registration,
///     "PromptForRegisteringCausesRegistrationRequest"
/// );
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the runtime from an already validated configuration.
    ///
    /// Creates:
    /// - an `InMemoryEndpointStore` seeded from `endpoints`
    /// - a `StaticForwardingResolver` over `stacks` and `constructs`
    /// - a `ScriptedDispatcher` answering per `simulation`
    /// - the `LifecycleCoordinator` using `routing`, `settle_policy` and `interactions`
    pub fn from_config(cfg: &Config) -> Runtime {
        let store = Arc::new(InMemoryEndpointStore::from_seeds(&cfg.endpoints));
        let resolver = Arc::new(StaticForwardingResolver::from_config(cfg));
        let dispatcher = Arc::new(ScriptedDispatcher::from_simulation(&cfg.simulation));

        let coordinator = CoordinatorFactory::from_config(
            cfg,
            store.clone(),
            resolver.clone(),
            dispatcher.clone(),
        );

        Runtime {
            store,
            resolver,
            dispatcher,
            coordinator,
        }
    }
}
