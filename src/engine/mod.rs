// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod cascade;
pub mod factory;
pub mod lifecycle;
pub mod planner;
pub mod reconcile;
#[cfg(test)]
pub mod integration_tests;

pub use cascade::{CascadeDispatcher, CascadeReport, CascadeState, StepOutcome, StepStatus, TargetOutcome};
pub use factory::CoordinatorFactory;
pub use lifecycle::{LifecycleCoordinator, LifecycleOperation, LifecycleReport};
pub use planner::{AuxiliaryFact, AutomationPlanner, PlanContext};
pub use reconcile::{ReconcileOutcome, ReconcileTarget, ReconciliationEngine};
