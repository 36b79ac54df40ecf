// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Diff-and-write reconciliation of endpoint stacks.
//!
//! The engine resolves a named stack, compares every supplied attribute with
//! the stored value and writes only what differs. The outcome lists the
//! endpoints that really changed, which is what later drives notification.
//!
//! # Failure Semantics
//!
//! * A stack that is not configured yields an empty, unresolved outcome
//! * A resolver failure yields an empty outcome carrying the failure
//! * A failed read or write is recorded against its attribute; the remaining
//!   attributes are still evaluated
//!
//! Nothing here is retried and nothing aborts the caller.

use std::sync::Arc;

use crate::errors::{FailurePhase, ReconcileFailure};
use crate::model::{
    Attribute, AttributeChange, AttributeValue, ChangeSet, DesiredConfig, EndpointId,
    EndpointStack,
};
use crate::observability::messages::reconcile::{
    AttributeReconcileFailed, AttributeSkipped, AttributeUpdated, StackNotConfigured,
    StackReconciled, StackResolutionFailed,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{EndpointStore, ForwardingResolver};

/// One stack to reconcile as part of a batch.
#[derive(Debug, Clone)]
pub struct ReconcileTarget {
    pub stack: String,
    pub desired: DesiredConfig,
    /// Fixed change-group label for the whole stack. `None` means the group
    /// is derived from each changed endpoint's role.
    pub group: Option<String>,
}

impl ReconcileTarget {
    pub fn new(stack: impl Into<String>, desired: DesiredConfig) -> Self {
        Self {
            stack: stack.into(),
            desired,
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Result of reconciling a single stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    pub stack_name: String,
    /// The resolved stack; `None` when it was not configured or unreachable.
    pub stack: Option<EndpointStack>,
    pub change_set: ChangeSet,
    pub failures: Vec<ReconcileFailure>,
    /// Desired attributes whose owning role has no member in the stack.
    pub skipped: Vec<Attribute>,
}

impl ReconcileOutcome {
    fn empty(stack_name: &str) -> Self {
        Self {
            stack_name: stack_name.to_string(),
            stack: None,
            change_set: ChangeSet::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.stack.is_some()
    }

    /// At least one read, write or resolution failed.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        !self.change_set.is_empty()
    }
}

/// Brings endpoint stacks in line with desired configuration.
pub struct ReconciliationEngine {
    store: Arc<dyn EndpointStore>,
    resolver: Arc<dyn ForwardingResolver>,
}

impl ReconciliationEngine {
    pub fn new(store: Arc<dyn EndpointStore>, resolver: Arc<dyn ForwardingResolver>) -> Self {
        Self { store, resolver }
    }

    /// Reconcile one stack against a sparse desired configuration.
    ///
    /// Attributes are evaluated in [`Attribute`] order. An attribute absent
    /// from `desired` is never read nor written.
    pub async fn reconcile(&self, stack_name: &str, desired: &DesiredConfig) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::empty(stack_name);

        let stack = match self.resolver.resolve_stack(stack_name).await {
            Ok(Some(stack)) => stack,
            Ok(None) => {
                StackNotConfigured { stack: stack_name }.log();
                return outcome;
            }
            Err(error) => {
                StackResolutionFailed {
                    stack: stack_name,
                    error: &error,
                }
                .log();
                outcome.failures.push(error.into());
                return outcome;
            }
        };

        for (attribute, value) in desired.iter() {
            let attribute = *attribute;
            let Some(endpoint) = stack.endpoint_for(attribute.role()) else {
                AttributeSkipped {
                    stack: stack_name,
                    attribute,
                    role: attribute.role(),
                }
                .log();
                outcome.skipped.push(attribute);
                continue;
            };

            match self.apply(endpoint, attribute, value).await {
                Ok(Some(change)) => {
                    AttributeUpdated {
                        stack: stack_name,
                        endpoint,
                        attribute,
                    }
                    .log();
                    outcome.change_set.record(endpoint.clone(), change);
                }
                Ok(None) => {}
                Err(failure) => {
                    AttributeReconcileFailed {
                        stack: stack_name,
                        failure: &failure,
                    }
                    .log();
                    outcome.failures.push(failure);
                }
            }
        }

        StackReconciled {
            stack: stack_name,
            changed_endpoints: outcome.change_set.len(),
            failures: outcome.failures.len(),
        }
        .log();

        outcome.stack = Some(stack);
        outcome
    }

    /// Reconcile several stacks one after another. A failure in one stack
    /// never prevents the next from being evaluated.
    pub async fn reconcile_all(&self, targets: &[ReconcileTarget]) -> Vec<ReconcileOutcome> {
        let mut outcomes = Vec::with_capacity(targets.len());
        for target in targets {
            outcomes.push(self.reconcile(&target.stack, &target.desired).await);
        }
        outcomes
    }

    /// Read, compare, write. `Ok(None)` when the stored value already matches
    /// or the store reports the write as a no-op.
    async fn apply(
        &self,
        endpoint: &EndpointId,
        attribute: Attribute,
        desired: &AttributeValue,
    ) -> Result<Option<AttributeChange>, ReconcileFailure> {
        let previous = self
            .store
            .get(endpoint, attribute)
            .await
            .map_err(|source| ReconcileFailure::Attribute {
                endpoint: endpoint.clone(),
                attribute,
                phase: FailurePhase::Read,
                source,
            })?;

        if previous.as_ref() == Some(desired) {
            return Ok(None);
        }

        let changed = self
            .store
            .set(endpoint, attribute, desired.clone())
            .await
            .map_err(|source| ReconcileFailure::Attribute {
                endpoint: endpoint.clone(),
                attribute,
                phase: FailurePhase::Write,
                source,
            })?;

        Ok(changed.then(|| AttributeChange {
            attribute,
            previous,
            current: desired.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{FaultyStore, InMemoryEndpointStore, StaticForwardingResolver, UnreachableResolver};
    use crate::errors::StoreError;
    use crate::model::{Address, EndpointRole, Protocol};

    fn registry_office() -> (Arc<InMemoryEndpointStore>, Arc<StaticForwardingResolver>) {
        let store = InMemoryEndpointStore::new()
            .with_endpoint(
                "ro-http-c",
                EndpointRole::Identity,
                vec![(Attribute::ApplicationName, AttributeValue::text("RegistryOffice"))],
            )
            .with_endpoint(
                "ro-tcp-c",
                EndpointRole::Network,
                vec![
                    (Attribute::RemoteAddress, Address::ipv4("10.0.0.1").into()),
                    (Attribute::RemotePort, AttributeValue::Port(8443)),
                    (Attribute::RemoteProtocol, Protocol::Https.into()),
                ],
            );
        let resolver = StaticForwardingResolver::new().with_stack(
            EndpointStack::new("ro")
                .with_member(EndpointRole::Identity, "ro-http-c")
                .with_member(EndpointRole::Network, "ro-tcp-c"),
        );
        (Arc::new(store), Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_only_differing_attributes_are_written() {
        let (store, resolver) = registry_office();
        let engine = ReconciliationEngine::new(store.clone(), resolver);

        let desired = DesiredConfig::new()
            .with(Attribute::RemoteAddress, Address::ipv4("10.0.0.9"))
            .with(Attribute::RemotePort, 8443u16);
        let outcome = engine.reconcile("ro", &desired).await;

        assert!(outcome.is_resolved());
        assert!(!outcome.is_partial());
        assert_eq!(outcome.change_set.len(), 1);
        let changes = outcome.change_set.changes_for(&"ro-tcp-c".into()).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].attribute, Attribute::RemoteAddress);
        assert_eq!(changes[0].previous, Some(Address::ipv4("10.0.0.1").into()));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_changes_on_one_endpoint_coalesce() {
        let (store, resolver) = registry_office();
        let engine = ReconciliationEngine::new(store, resolver);

        let desired = DesiredConfig::new()
            .with(Attribute::RemoteAddress, Address::domain("ro.example"))
            .with(Attribute::RemotePort, 9443u16)
            .with(Attribute::RemoteProtocol, Protocol::Http);
        let outcome = engine.reconcile("ro", &desired).await;

        assert_eq!(outcome.change_set.len(), 1);
        assert_eq!(outcome.change_set.changes_for(&"ro-tcp-c".into()).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unconfigured_stack_is_not_an_error() {
        let (store, resolver) = registry_office();
        let engine = ReconciliationEngine::new(store.clone(), resolver);

        let desired = DesiredConfig::new().with(Attribute::RemotePort, 1u16);
        let outcome = engine.reconcile("missing", &desired).await;

        assert!(!outcome.is_resolved());
        assert!(!outcome.is_partial());
        assert!(outcome.change_set.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_resolver_marks_outcome_partial() {
        let (store, resolver) = registry_office();
        let resolver = Arc::new(UnreachableResolver::new(resolver).unreachable("ro"));
        let engine = ReconciliationEngine::new(store, resolver);

        let desired = DesiredConfig::new().with(Attribute::RemotePort, 1u16);
        let outcome = engine.reconcile("ro", &desired).await;

        assert!(!outcome.is_resolved());
        assert!(outcome.is_partial());
        assert!(matches!(outcome.failures[0], ReconcileFailure::Resolver(_)));
    }

    #[tokio::test]
    async fn test_missing_role_is_skipped() {
        let (store, resolver) = registry_office();
        let engine = ReconciliationEngine::new(store, resolver);

        let desired = DesiredConfig::new()
            .with(Attribute::OperationName, AttributeValue::text("/v1/register-application"))
            .with(Attribute::ApplicationName, AttributeValue::text("RegistryOffice2"));
        let outcome = engine.reconcile("ro", &desired).await;

        assert_eq!(outcome.skipped, vec![Attribute::OperationName]);
        assert!(outcome.change_set.contains(&"ro-http-c".into()));
    }

    #[tokio::test]
    async fn test_failed_read_does_not_stop_siblings() {
        let (store, resolver) = registry_office();
        let faulty = Arc::new(FaultyStore::new(store.clone()).fail_read("ro-tcp-c", Attribute::RemoteAddress));
        let engine = ReconciliationEngine::new(faulty, resolver);

        let desired = DesiredConfig::new()
            .with(Attribute::RemoteAddress, Address::ipv4("10.0.0.9"))
            .with(Attribute::RemotePort, 9443u16);
        let outcome = engine.reconcile("ro", &desired).await;

        assert!(outcome.is_partial());
        assert_eq!(
            outcome.failures,
            vec![ReconcileFailure::Attribute {
                endpoint: "ro-tcp-c".into(),
                attribute: Attribute::RemoteAddress,
                phase: FailurePhase::Read,
                source: StoreError::Unavailable("simulated read failure".to_string()),
            }]
        );
        let changes = outcome.change_set.changes_for(&"ro-tcp-c".into()).unwrap();
        assert_eq!(changes[0].attribute, Attribute::RemotePort);
    }

    #[tokio::test]
    async fn test_reconcile_all_keeps_input_order() {
        let (store, resolver) = registry_office();
        let engine = ReconciliationEngine::new(store, resolver);

        let targets = vec![
            ReconcileTarget::new("missing", DesiredConfig::new()),
            ReconcileTarget::new(
                "ro",
                DesiredConfig::new().with(Attribute::RemotePort, 9443u16),
            )
            .with_group("network"),
        ];
        let outcomes = engine.reconcile_all(&targets).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].stack_name, "missing");
        assert!(outcomes[1].has_changes());
    }
}
