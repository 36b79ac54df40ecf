// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::model::{AttributeValue, EndpointId};

/// One name/value pair carried by a notification.
///
/// `endpoint` is set for attributes that come from a reconciled endpoint and
/// left empty for auxiliary facts learned out of band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointId>,
    pub name: String,
    pub value: AttributeValue,
}

/// Opaque body sent to every OUTPUT-port target of a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StepPayload(pub Vec<PayloadAttribute>);

impl StepPayload {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, attribute: PayloadAttribute) {
        self.0.push(attribute);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.0.iter().map(|attribute| attribute.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PayloadAttribute> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationStep {
    pub group: String,
    pub forwarding_name: String,
    /// Terminal success on this step may end the cascade.
    pub settles: bool,
    pub payload: StepPayload,
}

/// Ordered notification steps. The order is fixed when the plan is built and
/// nothing downstream reorders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutomationPlan {
    steps: Vec<AutomationStep>,
}

impl AutomationPlan {
    pub fn new(steps: Vec<AutomationStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[AutomationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn forwarding_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.forwarding_name.as_str()).collect()
    }
}
