// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns grouped change sets into an ordered automation plan.
//!
//! Ordering comes exclusively from the injected [`RoutingTable`]: each change
//! group label maps to a forwarding name and a priority, and steps are sorted
//! by ascending priority. The planner performs no I/O.

use std::collections::HashMap;

use crate::config::RoutingTable;
use crate::model::{
    AttributeValue, AutomationPlan, AutomationStep, ChangeSet, PayloadAttribute, StepPayload,
};
use crate::observability::messages::planner::{PlanBuilt, UnroutedGroup};
use crate::observability::messages::StructuredLog;

/// A value learned outside of reconciliation that rides along with a group.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryFact {
    pub group: String,
    pub name: String,
    pub value: AttributeValue,
    /// Whether this fact alone justifies a step when its group has no changes.
    pub notify_worthy: bool,
}

/// Extra inputs to planning besides the change sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanContext {
    facts: Vec<AuxiliaryFact>,
    announced: Vec<String>,
}

impl PlanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fact(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
        notify_worthy: bool,
    ) -> Self {
        self.facts.push(AuxiliaryFact {
            group: group.into(),
            name: name.into(),
            value: value.into(),
            notify_worthy,
        });
        self
    }

    /// Force a step for `group` even when it has neither changes nor facts.
    pub fn announce(mut self, group: impl Into<String>) -> Self {
        self.announced.push(group.into());
        self
    }

    fn facts_for<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a AuxiliaryFact> + 'a {
        self.facts.iter().filter(move |fact| fact.group == group)
    }

    fn is_announced(&self, group: &str) -> bool {
        self.announced.iter().any(|announced| announced == group)
    }
}

/// Builds [`AutomationPlan`]s from change groups.
#[derive(Debug, Clone)]
pub struct AutomationPlanner {
    routing: RoutingTable,
}

impl AutomationPlanner {
    pub fn new(routing: RoutingTable) -> Self {
        Self { routing }
    }

    /// Build a plan from `(group label, change set)` pairs.
    ///
    /// Entries sharing a label are merged. A group produces a step when it
    /// has changes, has a notify-worthy fact, or is announced in `context`;
    /// labels missing from the routing table produce nothing and are logged.
    pub fn plan(&self, groups: &[(String, ChangeSet)], context: &PlanContext) -> AutomationPlan {
        // Labels in first-seen order so equal input always yields equal output
        let mut labels: Vec<&str> = Vec::new();
        let mut merged: HashMap<&str, ChangeSet> = HashMap::new();

        for (label, change_set) in groups {
            if !merged.contains_key(label.as_str()) {
                labels.push(label);
            }
            merged
                .entry(label.as_str())
                .or_default()
                .merge(change_set.clone());
        }
        for label in context
            .facts
            .iter()
            .map(|fact| fact.group.as_str())
            .chain(context.announced.iter().map(String::as_str))
        {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }

        let mut steps: Vec<(u32, AutomationStep)> = Vec::new();
        for label in labels {
            let change_set = merged.remove(label).unwrap_or_default();
            let wanted = !change_set.is_empty()
                || context.facts_for(label).any(|fact| fact.notify_worthy)
                || context.is_announced(label);
            if !wanted {
                continue;
            }

            let Some(route) = self.routing.route_for(label) else {
                UnroutedGroup { group: label }.log();
                continue;
            };

            steps.push((
                route.priority,
                AutomationStep {
                    group: label.to_string(),
                    forwarding_name: route.forwarding_name.clone(),
                    settles: route.settles,
                    payload: Self::payload(&change_set, context.facts_for(label)),
                },
            ));
        }

        steps.sort_by_key(|(priority, _)| *priority);
        let steps: Vec<AutomationStep> = steps.into_iter().map(|(_, step)| step).collect();

        let group_names: Vec<&str> = steps.iter().map(|step| step.group.as_str()).collect();
        PlanBuilt {
            step_count: steps.len(),
            groups: &group_names,
        }
        .log();

        AutomationPlan::new(steps)
    }

    fn payload<'a>(
        change_set: &ChangeSet,
        facts: impl Iterator<Item = &'a AuxiliaryFact>,
    ) -> StepPayload {
        let mut payload = StepPayload::new();
        for (endpoint, changes) in change_set.iter() {
            for change in changes {
                payload.push(PayloadAttribute {
                    endpoint: Some(endpoint.clone()),
                    name: change.attribute.name().to_string(),
                    value: change.current.clone(),
                });
            }
        }
        for fact in facts {
            payload.push(PayloadAttribute {
                endpoint: None,
                name: fact.name.clone(),
                value: fact.value.clone(),
            });
        }
        payload
    }
}
