// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end scenarios across reconcile, plan and cascade, using the
//! in-memory backends.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::backends::{FaultyStore, InMemoryEndpointStore, ScriptedDispatcher, StaticForwardingResolver};
    use crate::config::consts::{
        BEQUEATH_FORWARDING, GROUP_HANDOFF, GROUP_IDENTITY, GROUP_NETWORK, GROUP_OPERATION,
        GROUP_PREDECESSOR, GROUP_REGISTRATION, LTP_UPDATE_FORWARDING, REGISTRATION_FORWARDING,
    };
    use crate::config::{load_and_validate_config, Config, RoutingTable, Runtime, RuntimeBuilder, SettlePolicy};
    use crate::engine::{
        AutomationPlanner, CascadeDispatcher, CascadeState, CoordinatorFactory, PlanContext,
        ReconciliationEngine, StepStatus,
    };
    use crate::errors::EventError;
    use crate::events::{EmbeddingEvent, RegistrationEvent};
    use crate::model::{
        Address, Attribute, AttributeValue, ChangeSet, Correlation, DesiredConfig, EndpointId,
        EndpointRole, EndpointStack, ForwardingConstruct, Port, Protocol,
    };

    const RO_OPERATION: &str = "ro-2-0-1-op-c-bm-ro-2-0-1-000";
    const RO_NETWORK: &str = "ro-2-0-1-tcp-c-or-1-0-0-000";
    const ALT_OPERATION: &str = "alt-2-0-1-op-c-im-ro-2-0-1-000";
    const OLD_NETWORK: &str = "old-1-0-0-tcp-c-or-1-0-0-000";
    const OLD_OPERATION: &str = "old-1-0-0-op-c-bm-or-1-0-0-000";

    fn correlation() -> Correlation {
        Correlation::new("operator", "7a1c4d52-3a5e-4d7e-9a55-0c8f3f6e2b11", "1", "fleet-rollout")
    }

    fn fleet() -> Runtime {
        let config = load_and_validate_config("configs/fleet.yaml").unwrap();
        RuntimeBuilder::from_config(&config)
    }

    /// Network endpoint at {10.0.0.1, 8443} inside a one-stack topology.
    fn network_only() -> (Arc<InMemoryEndpointStore>, Arc<StaticForwardingResolver>) {
        let store = InMemoryEndpointStore::new()
            .with_endpoint(
                "peer-http-c",
                EndpointRole::Identity,
                vec![(Attribute::ApplicationName, AttributeValue::text("Peer"))],
            )
            .with_endpoint(
                "peer-tcp-c",
                EndpointRole::Network,
                vec![
                    (Attribute::RemoteAddress, Address::ipv4("10.0.0.1").into()),
                    (Attribute::RemotePort, AttributeValue::Port(8443)),
                ],
            )
            .with_endpoint(
                "peer-op-c",
                EndpointRole::Operation,
                vec![(Attribute::OperationName, AttributeValue::text("/v1/start"))],
            );
        let resolver = StaticForwardingResolver::new()
            .with_stack(
                EndpointStack::new("peer")
                    .with_member(EndpointRole::Identity, "peer-http-c")
                    .with_member(EndpointRole::Network, "peer-tcp-c")
                    .with_member(EndpointRole::Operation, "peer-op-c"),
            )
            .with_construct(
                ForwardingConstruct::new("fc-ltp", LTP_UPDATE_FORWARDING).with_port(Port::output("alt-op-c")),
            );
        (Arc::new(store), Arc::new(resolver))
    }

    fn by_role(stack: &EndpointStack, change_set: &ChangeSet) -> Vec<(String, ChangeSet)> {
        change_set
            .iter()
            .map(|(endpoint, changes)| {
                let mut single = ChangeSet::new();
                for change in changes {
                    single.record(endpoint.clone(), change.clone());
                }
                let label = crate::engine::lifecycle::group_for_role(stack.role_of(endpoint).unwrap());
                (label.to_string(), single)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_address_change_plans_single_network_step() {
        let (store, resolver) = network_only();
        let engine = ReconciliationEngine::new(store.clone(), resolver);
        let planner = AutomationPlanner::new(RoutingTable::default());

        let desired = DesiredConfig::new()
            .with(Attribute::RemoteAddress, Address::ipv4("10.0.0.9"))
            .with(Attribute::RemotePort, 8443u16);
        let outcome = engine.reconcile("peer", &desired).await;

        let endpoints: Vec<&EndpointId> = outcome.change_set.endpoints().collect();
        assert_eq!(endpoints, vec![&EndpointId::from("peer-tcp-c")]);

        let groups = by_role(outcome.stack.as_ref().unwrap(), &outcome.change_set);
        let plan = planner.plan(&groups, &PlanContext::new());

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps()[0].group, GROUP_NETWORK);
        assert_eq!(plan.steps()[0].payload.attribute_names(), vec!["remote-address"]);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let (store, resolver) = network_only();
        let engine = ReconciliationEngine::new(store.clone(), resolver);
        let desired = DesiredConfig::new()
            .with(Attribute::RemoteAddress, Address::domain("peer.example"))
            .with(Attribute::OperationName, AttributeValue::text("/v2/start"));

        let first = engine.reconcile("peer", &desired).await;
        let second = engine.reconcile("peer", &desired).await;

        assert_eq!(first.change_set.len(), 2);
        assert!(second.change_set.is_empty());
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_matching_values_issue_no_writes() {
        let (store, resolver) = network_only();
        let engine = ReconciliationEngine::new(store.clone(), resolver);
        let desired = DesiredConfig::new()
            .with(Attribute::ApplicationName, AttributeValue::text("Peer"))
            .with(Attribute::RemoteAddress, Address::ipv4("10.0.0.1"))
            .with(Attribute::RemotePort, 8443u16)
            .with(Attribute::OperationName, AttributeValue::text("/v1/start"));

        let outcome = engine.reconcile("peer", &desired).await;

        assert!(outcome.change_set.is_empty());
        assert_eq!(store.write_count(), 0);
        let plan = AutomationPlanner::new(RoutingTable::default()).plan(
            &by_role(outcome.stack.as_ref().unwrap(), &outcome.change_set),
            &PlanContext::new(),
        );
        assert!(plan.is_empty());
    }

    #[tokio::test]
    async fn test_absent_fields_leave_stored_values_alone() {
        let (store, resolver) = network_only();
        let engine = ReconciliationEngine::new(store.clone(), resolver);

        engine
            .reconcile("peer", &DesiredConfig::new().with(Attribute::RemotePort, 9443u16))
            .await;

        let snapshot = store.snapshot(&"peer-tcp-c".into()).await.unwrap();
        assert_eq!(snapshot.get(&Attribute::RemotePort), Some(&AttributeValue::Port(9443)));
        assert_eq!(
            snapshot.get(&Attribute::RemoteAddress),
            Some(&AttributeValue::Address(Address::ipv4("10.0.0.1")))
        );
    }

    #[tokio::test]
    async fn test_plan_orders_identity_network_operation() {
        let (store, resolver) = network_only();
        let engine = ReconciliationEngine::new(store, resolver);
        let desired = DesiredConfig::new()
            .with(Attribute::OperationName, AttributeValue::text("/v2/start"))
            .with(Attribute::RemotePort, 1u16)
            .with(Attribute::ReleaseNumber, AttributeValue::text("3.0.0"));

        let outcome = engine.reconcile("peer", &desired).await;
        let mut groups = by_role(outcome.stack.as_ref().unwrap(), &outcome.change_set);
        groups.reverse();
        let plan = AutomationPlanner::new(RoutingTable::default()).plan(&groups, &PlanContext::new());

        let order: Vec<&str> = plan.steps().iter().map(|step| step.group.as_str()).collect();
        assert_eq!(order, vec![GROUP_IDENTITY, GROUP_NETWORK, GROUP_OPERATION]);
    }

    #[tokio::test]
    async fn test_store_failure_is_isolated_to_its_attribute() {
        let (store, resolver) = network_only();
        let faulty = Arc::new(FaultyStore::new(store.clone()).fail_write("peer-tcp-c", Attribute::RemotePort));
        let engine = ReconciliationEngine::new(faulty, resolver);
        let desired = DesiredConfig::new()
            .with(Attribute::RemotePort, 1u16)
            .with(Attribute::RemoteProtocol, Protocol::Https)
            .with(Attribute::ApplicationName, AttributeValue::text("Peer2"));

        let outcome = engine.reconcile("peer", &desired).await;

        assert!(outcome.is_partial());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.change_set.len(), 2);
        let network = outcome.change_set.changes_for(&"peer-tcp-c".into()).unwrap();
        assert_eq!(network[0].attribute, Attribute::RemoteProtocol);
    }

    #[tokio::test]
    async fn test_register_yourself_against_fleet() {
        let runtime = fleet();
        let event = RegistrationEvent {
            registry_office_application: Some("RegistryOffice".to_string()),
            registry_office_release_number: Some("2.0.1".to_string()),
            registration_operation: Some("/v2/register-application".to_string()),
            registry_office_address: Some(Address::ipv4("10.118.125.157")),
            registry_office_port: Some(1020),
            registry_office_protocol: Some(Protocol::Http),
            preceding_application_name: Some("OldRelease".to_string()),
            ..RegistrationEvent::default()
        };

        let report = runtime
            .coordinator
            .register_yourself(&event, &correlation())
            .await
            .unwrap();

        assert_eq!(report.changed_endpoints(), 1);
        let groups: Vec<&str> = report.plan.steps().iter().map(|step| step.group.as_str()).collect();
        assert_eq!(groups, vec![GROUP_OPERATION, GROUP_REGISTRATION]);
        assert_eq!(
            report.plan.forwarding_names(),
            vec![LTP_UPDATE_FORWARDING, REGISTRATION_FORWARDING]
        );
        assert_eq!(
            report.plan.steps()[1].payload.attribute_names(),
            vec!["preceding-application-name"]
        );
        assert_eq!(report.cascade.state, CascadeState::Settled);

        let sent = runtime.dispatcher.sent().await;
        let targets: Vec<&str> = sent.iter().map(|n| n.target.as_str()).collect();
        assert_eq!(targets, vec![ALT_OPERATION, RO_OPERATION]);
        assert_eq!(sent[0].correlation.trace_indicator, "1.1");
        assert_eq!(sent[1].correlation.trace_indicator, "1.2");
    }

    #[tokio::test]
    async fn test_repeated_registration_only_sends_registration() {
        let runtime = fleet();
        let event = RegistrationEvent {
            registry_office_port: Some(1021),
            ..RegistrationEvent::default()
        };

        runtime.coordinator.register_yourself(&event, &correlation()).await.unwrap();
        let writes = runtime.store.write_count();
        let again = runtime.coordinator.register_yourself(&event, &correlation()).await.unwrap();

        assert_eq!(runtime.store.write_count(), writes);
        assert_eq!(again.changed_endpoints(), 0);
        assert_eq!(again.plan.forwarding_names(), vec![REGISTRATION_FORWARDING]);
    }

    #[tokio::test]
    async fn test_register_with_overridden_predecessor() {
        let runtime = fleet();
        let event = RegistrationEvent {
            preceding_release_number: Some("1.0.1".to_string()),
            ..RegistrationEvent::default()
        };

        let untouched = runtime
            .coordinator
            .register_yourself_with_predecessor(&event, &correlation(), "NotConfigured")
            .await
            .unwrap();
        assert_eq!(untouched.changed_endpoints(), 0);
        assert!(!untouched.outcome_for("NotConfigured").unwrap().is_resolved());

        let updated = runtime
            .coordinator
            .register_yourself(&event, &correlation())
            .await
            .unwrap();
        let groups: Vec<&str> = updated.plan.steps().iter().map(|step| step.group.as_str()).collect();
        assert_eq!(groups, vec![GROUP_PREDECESSOR, GROUP_REGISTRATION]);
    }

    #[tokio::test]
    async fn test_invalid_event_is_rejected_before_reconciliation() {
        let runtime = fleet();
        let event = RegistrationEvent {
            http_port: Some(0),
            ..RegistrationEvent::default()
        };

        let result = runtime.coordinator.register_yourself(&event, &correlation()).await;

        assert_eq!(result.unwrap_err(), EventError::InvalidPort("http-port"));
        assert_eq!(runtime.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_embed_yourself_against_fleet() {
        let runtime = fleet();
        let event = EmbeddingEvent {
            registry_office_address: Some(Address::ipv4("10.118.125.158")),
            relay_server_replacement_operation: Some("/v1/relay-server-replacement".to_string()),
            old_release_port: Some(1026),
            ..EmbeddingEvent::default()
        };

        let report = runtime.coordinator.embed_yourself(&event, &correlation()).await.unwrap();

        let groups: Vec<&str> = report.plan.steps().iter().map(|step| step.group.as_str()).collect();
        assert_eq!(groups, vec![GROUP_NETWORK, GROUP_PREDECESSOR, GROUP_HANDOFF]);
        assert_eq!(report.plan.steps()[2].forwarding_name, BEQUEATH_FORWARDING);
        assert_eq!(
            report.plan.steps()[2].payload.iter().next().map(|a| a.value.clone()),
            Some(AttributeValue::text("OldRelease"))
        );
        assert_eq!(report.cascade.state, CascadeState::Settled);

        let snapshot = runtime.store.snapshot(&RO_NETWORK.into()).await.unwrap();
        assert_eq!(
            snapshot.get(&Attribute::RemoteAddress),
            Some(&AttributeValue::Address(Address::ipv4("10.118.125.158")))
        );
        let old = runtime.store.snapshot(&OLD_NETWORK.into()).await.unwrap();
        assert_eq!(old.get(&Attribute::RemotePort), Some(&AttributeValue::Port(1026)));
        assert_eq!(
            runtime.dispatcher.sent_targets().await.last(),
            Some(&EndpointId::from(OLD_OPERATION))
        );
    }

    #[tokio::test]
    async fn test_embed_without_changes_still_hands_off() {
        let runtime = fleet();

        let report = runtime
            .coordinator
            .embed_yourself(&EmbeddingEvent::default(), &correlation())
            .await
            .unwrap();

        assert_eq!(report.plan.forwarding_names(), vec![BEQUEATH_FORWARDING]);
        assert_eq!(runtime.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_ltp_update_success_does_not_skip_registration() {
        let mut config = load_and_validate_config("configs/fleet.yaml").unwrap();
        config.simulation.responses.insert(ALT_OPERATION.into(), 204);
        let runtime = RuntimeBuilder::from_config(&config);
        let event = RegistrationEvent {
            registry_office_port: Some(1021),
            ..RegistrationEvent::default()
        };

        let report = runtime.coordinator.register_yourself(&event, &correlation()).await.unwrap();

        assert_eq!(
            report.plan.forwarding_names(),
            vec![LTP_UPDATE_FORWARDING, REGISTRATION_FORWARDING]
        );
        assert_eq!(report.cascade.state, CascadeState::Settled);
        assert_eq!(report.cascade.steps[1].status, StepStatus::Completed);
        assert_eq!(
            runtime.dispatcher.sent_targets().await,
            vec![EndpointId::from(ALT_OPERATION), EndpointId::from(RO_OPERATION)]
        );
    }

    #[tokio::test]
    async fn test_registration_success_settles_before_handoff() {
        let mut config = load_and_validate_config("configs/fleet.yaml").unwrap();
        config.simulation.responses.insert(RO_OPERATION.into(), 204);
        let runtime = RuntimeBuilder::from_config(&config);
        let planner = AutomationPlanner::new(config.routing.clone());
        let context = PlanContext::new()
            .announce(GROUP_REGISTRATION)
            .announce(GROUP_HANDOFF);

        let plan = planner.plan(&[], &context);
        let cascade = CascadeDispatcher::new(
            runtime.resolver.clone(),
            runtime.dispatcher.clone(),
            config.settle_policy,
        );
        let report = cascade.execute(&plan, &correlation()).await;

        assert_eq!(plan.forwarding_names(), vec![REGISTRATION_FORWARDING, BEQUEATH_FORWARDING]);
        assert_eq!(report.state, CascadeState::Settled);
        assert_eq!(report.steps[1].status, StepStatus::NotSent);
        assert_eq!(runtime.dispatcher.sent_targets().await, vec![EndpointId::from(RO_OPERATION)]);
    }

    #[tokio::test]
    async fn test_dispatch_failure_does_not_stop_registration() {
        let mut config = load_and_validate_config("configs/fleet.yaml").unwrap();
        config.simulation.unreachable.push(ALT_OPERATION.into());
        let runtime = RuntimeBuilder::from_config(&config);
        let event = RegistrationEvent {
            registration_operation: Some("/v3/register-application".to_string()),
            ..RegistrationEvent::default()
        };

        let report = runtime.coordinator.register_yourself(&event, &correlation()).await.unwrap();

        assert_eq!(report.cascade.state, CascadeState::PartiallyFailed);
        assert_eq!(report.cascade.steps[0].status, StepStatus::Failed);
        assert_eq!(report.cascade.steps[1].status, StepStatus::Completed);
        assert_eq!(
            runtime.dispatcher.sent_targets().await,
            vec![EndpointId::from(ALT_OPERATION), EndpointId::from(RO_OPERATION)]
        );
    }

    #[tokio::test]
    async fn test_factory_wires_custom_collaborators() {
        let (store, resolver) = network_only();
        let dispatcher = Arc::new(ScriptedDispatcher::new(202));
        let config = Config {
            settle_policy: SettlePolicy::AllTerminal,
            ..Config::default()
        };
        let coordinator = CoordinatorFactory::from_config(&config, store, resolver.clone(), dispatcher.clone());

        // registry office stack is not configured in this topology
        let report = coordinator
            .register_yourself(&RegistrationEvent::default(), &correlation())
            .await
            .unwrap();

        assert_eq!(report.plan.forwarding_names(), vec![REGISTRATION_FORWARDING]);
        assert_eq!(report.cascade.state, CascadeState::PartiallyFailed);
        assert!(dispatcher.sent().await.is_empty());

        // a standalone dispatcher over the same resolver
        let cascade = CascadeDispatcher::new(resolver, dispatcher, SettlePolicy::AnyTerminal);
        assert_eq!(cascade.policy(), SettlePolicy::AnyTerminal);
    }
}
