// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Register and embed cycles: reconcile, plan, cascade.
//!
//! Each operation translates its event into per-stack desired state,
//! reconciles every stack independently, groups the resulting changes,
//! plans notifications and runs the cascade. One event yields one plan.

use std::sync::Arc;

use tracing::Instrument;

use crate::config::consts::{
    FACT_OLD_APPLICATION_NAME, FACT_PRECEDING_APPLICATION_NAME, FACT_PRECEDING_RELEASE_NUMBER,
    GROUP_HANDOFF, GROUP_IDENTITY, GROUP_NETWORK, GROUP_OPERATION, GROUP_PREDECESSOR,
    GROUP_REGISTRATION, GROUP_SERVER,
};
use crate::config::InteractionNames;
use crate::engine::cascade::{CascadeDispatcher, CascadeReport};
use crate::engine::planner::{AutomationPlanner, PlanContext};
use crate::engine::reconcile::{ReconcileOutcome, ReconcileTarget, ReconciliationEngine};
use crate::errors::EventError;
use crate::events::{EmbeddingEvent, RegistrationEvent};
use crate::model::{
    Attribute, AttributeValue, AutomationPlan, ChangeSet, Correlation, EndpointRole,
    EndpointStack,
};
use crate::observability::messages::lifecycle::{
    LifecycleCompleted, LifecycleStarted, PredecessorNameUnavailable,
};
use crate::observability::messages::StructuredLog;
use crate::traits::EndpointStore;

/// Change group label for changes on an endpoint of `role`.
pub fn group_for_role(role: EndpointRole) -> &'static str {
    match role {
        EndpointRole::Identity => GROUP_IDENTITY,
        EndpointRole::Network => GROUP_NETWORK,
        EndpointRole::Operation => GROUP_OPERATION,
        EndpointRole::LocalServer => GROUP_SERVER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOperation {
    Register,
    Embed,
}

impl LifecycleOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleOperation::Register => "register-yourself",
            LifecycleOperation::Embed => "embed-yourself",
        }
    }
}

impl std::fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one lifecycle operation did.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleReport {
    pub operation: LifecycleOperation,
    /// One outcome per reconciled stack, in reconciliation order.
    pub outcomes: Vec<ReconcileOutcome>,
    pub plan: AutomationPlan,
    pub cascade: CascadeReport,
}

impl LifecycleReport {
    pub fn changed_endpoints(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.change_set.len()).sum()
    }

    pub fn reconcile_failures(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.failures.len()).sum()
    }

    pub fn outcome_for(&self, stack: &str) -> Option<&ReconcileOutcome> {
        self.outcomes.iter().find(|outcome| outcome.stack_name == stack)
    }
}

/// Drives register/embed events through the reconcile, plan and cascade stages.
pub struct LifecycleCoordinator {
    store: Arc<dyn EndpointStore>,
    engine: ReconciliationEngine,
    planner: AutomationPlanner,
    cascade: CascadeDispatcher,
    interactions: InteractionNames,
}

impl LifecycleCoordinator {
    pub fn new(
        store: Arc<dyn EndpointStore>,
        engine: ReconciliationEngine,
        planner: AutomationPlanner,
        cascade: CascadeDispatcher,
        interactions: InteractionNames,
    ) -> Self {
        Self {
            store,
            engine,
            planner,
            cascade,
            interactions,
        }
    }

    pub fn interactions(&self) -> &InteractionNames {
        &self.interactions
    }

    /// Register at the registry office, using the configured predecessor interaction.
    pub async fn register_yourself(
        &self,
        event: &RegistrationEvent,
        correlation: &Correlation,
    ) -> Result<LifecycleReport, EventError> {
        self.register_yourself_with_predecessor(event, correlation, &self.interactions.predecessor)
            .await
    }

    /// Register at the registry office, reconciling the predecessor identity
    /// on the stack named `predecessor`.
    pub async fn register_yourself_with_predecessor(
        &self,
        event: &RegistrationEvent,
        correlation: &Correlation,
        predecessor: &str,
    ) -> Result<LifecycleReport, EventError> {
        event.validate()?;

        let targets = vec![
            ReconcileTarget::new(&self.interactions.registration, event.registry_office_config()),
            ReconcileTarget::new(&self.interactions.local_http_server, event.local_server_config()),
            ReconcileTarget::new(predecessor, event.predecessor_config())
                .with_group(GROUP_PREDECESSOR),
        ];

        // The registration request is sent on every registration
        let mut context = PlanContext::new().announce(GROUP_REGISTRATION);
        if let Some(name) = &event.preceding_application_name {
            context = context.with_fact(
                GROUP_REGISTRATION,
                FACT_PRECEDING_APPLICATION_NAME,
                AttributeValue::text(name.clone()),
                true,
            );
        }
        if let Some(release) = &event.preceding_release_number {
            context = context.with_fact(
                GROUP_REGISTRATION,
                FACT_PRECEDING_RELEASE_NUMBER,
                AttributeValue::text(release.clone()),
                true,
            );
        }

        Ok(self
            .run(LifecycleOperation::Register, &targets, correlation, |_| context)
            .await)
    }

    /// Take over from the predecessor release.
    pub async fn embed_yourself(
        &self,
        event: &EmbeddingEvent,
        correlation: &Correlation,
    ) -> Result<LifecycleReport, EventError> {
        event.validate()?;

        let predecessor = self.interactions.predecessor.clone();
        let targets = vec![
            ReconcileTarget::new(
                &self.interactions.server_replacement_broadcast,
                event.server_replacement_config(),
            ),
            ReconcileTarget::new(
                &self.interactions.operation_update_broadcast,
                event.operation_update_config(),
            ),
            ReconcileTarget::new(
                &self.interactions.old_release_deregistration,
                event.deregistration_config(),
            ),
            ReconcileTarget::new(&predecessor, event.old_release_config())
                .with_group(GROUP_PREDECESSOR),
        ];

        let store = Arc::clone(&self.store);
        let report = self
            .run_async_context(LifecycleOperation::Embed, &targets, correlation, |outcomes| {
                let stack = outcomes
                    .iter()
                    .find(|outcome| outcome.stack_name == predecessor)
                    .and_then(|outcome| outcome.stack.clone());
                async move { handoff_context(store.as_ref(), stack).await }
            })
            .await;

        Ok(report)
    }

    async fn run<F>(
        &self,
        operation: LifecycleOperation,
        targets: &[ReconcileTarget],
        correlation: &Correlation,
        context: F,
    ) -> LifecycleReport
    where
        F: FnOnce(&[ReconcileOutcome]) -> PlanContext,
    {
        self.run_async_context(operation, targets, correlation, |outcomes| {
            std::future::ready(context(outcomes))
        })
        .await
    }

    async fn run_async_context<F, Fut>(
        &self,
        operation: LifecycleOperation,
        targets: &[ReconcileTarget],
        correlation: &Correlation,
        context: F,
    ) -> LifecycleReport
    where
        F: FnOnce(&[ReconcileOutcome]) -> Fut,
        Fut: std::future::Future<Output = PlanContext>,
    {
        let started = LifecycleStarted {
            operation: operation.as_str(),
            correlation_id: &correlation.correlation_id,
            desired_attributes: targets.iter().map(|target| target.desired.len()).sum(),
        };
        started.log();
        let span = started.span("lifecycle");

        async move {
            let outcomes = self.engine.reconcile_all(targets).await;
            let groups = group_changes(targets, &outcomes);
            let context = context(&outcomes).await;
            let plan = self.planner.plan(&groups, &context);
            let cascade = self.cascade.execute(&plan, correlation).await;

            let report = LifecycleReport {
                operation,
                outcomes,
                plan,
                cascade,
            };
            LifecycleCompleted {
                operation: operation.as_str(),
                changed_endpoints: report.changed_endpoints(),
                reconcile_failures: report.reconcile_failures(),
                steps: report.plan.len(),
                state: report.cascade.state.as_str(),
            }
            .log();
            report
        }
        .instrument(span)
        .await
    }
}

/// Split each outcome's changes into labelled groups. Targets with a fixed
/// group keep it; all others are labelled by the changed endpoint's role.
fn group_changes(
    targets: &[ReconcileTarget],
    outcomes: &[ReconcileOutcome],
) -> Vec<(String, ChangeSet)> {
    let mut groups = Vec::new();

    for (target, outcome) in targets.iter().zip(outcomes) {
        if outcome.change_set.is_empty() {
            continue;
        }
        if let Some(group) = &target.group {
            groups.push((group.clone(), outcome.change_set.clone()));
            continue;
        }
        let Some(stack) = &outcome.stack else {
            continue;
        };
        for (endpoint, changes) in outcome.change_set.iter() {
            let Some(role) = stack.role_of(endpoint) else {
                continue;
            };
            let mut change_set = ChangeSet::new();
            for change in changes {
                change_set.record(endpoint.clone(), change.clone());
            }
            groups.push((group_for_role(role).to_string(), change_set));
        }
    }

    groups
}

/// The predecessor's application name rides along with the handoff step.
/// It only justifies a step on its own when the predecessor is configured
/// and its name is known.
async fn handoff_context(store: &dyn EndpointStore, predecessor: Option<EndpointStack>) -> PlanContext {
    let context = PlanContext::new();
    let Some(stack) = predecessor else {
        return context;
    };
    let Some(identity) = stack.endpoint_for(EndpointRole::Identity) else {
        return context;
    };

    match store.get(identity, Attribute::ApplicationName).await {
        Ok(Some(name)) => context.with_fact(GROUP_HANDOFF, FACT_OLD_APPLICATION_NAME, name, true),
        Ok(None) => context,
        Err(error) => {
            PredecessorNameUnavailable {
                stack: &stack.name,
                error: &error,
            }
            .log();
            context
        }
    }
}
