// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::Config;
use crate::engine::cascade::CascadeDispatcher;
use crate::engine::lifecycle::LifecycleCoordinator;
use crate::engine::planner::AutomationPlanner;
use crate::engine::reconcile::ReconciliationEngine;
use crate::traits::{EndpointStore, EventDispatcher, ForwardingResolver};

/// Factory for wiring the engine stages from configuration
pub struct CoordinatorFactory;

impl CoordinatorFactory {
    /// Create a lifecycle coordinator over the given collaborators, using the
    /// routing table, settle policy and interaction names of `cfg`
    pub fn from_config(
        cfg: &Config,
        store: Arc<dyn EndpointStore>,
        resolver: Arc<dyn ForwardingResolver>,
        dispatcher: Arc<dyn EventDispatcher>,
    ) -> LifecycleCoordinator {
        let engine = ReconciliationEngine::new(Arc::clone(&store), Arc::clone(&resolver));
        let planner = AutomationPlanner::new(cfg.routing.clone());
        let cascade = CascadeDispatcher::new(resolver, dispatcher, cfg.settle_policy);

        LifecycleCoordinator::new(store, engine, planner, cascade, cfg.interactions.clone())
    }
}
