// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

use crate::config::SimulationConfig;
use crate::errors::DispatchError;
use crate::model::{Correlation, DispatchResult, EndpointId, StepPayload};
use crate::traits::EventDispatcher;

/// A notification as it was handed to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub target: EndpointId,
    pub payload: StepPayload,
    pub correlation: Correlation,
}

/// Dispatcher that answers from a script instead of a network.
///
/// Each target answers with its scripted HTTP status, or the default one;
/// targets marked unreachable fail at the transport level. Every call is
/// recorded in order, including the ones that fail.
#[derive(Debug)]
pub struct ScriptedDispatcher {
    default_status: u16,
    responses: HashMap<EndpointId, u16>,
    unreachable: HashSet<EndpointId>,
    sent: Mutex<Vec<SentNotification>>,
}

impl ScriptedDispatcher {
    pub fn new(default_status: u16) -> Self {
        Self {
            default_status,
            responses: HashMap::new(),
            unreachable: HashSet::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, target: impl Into<EndpointId>, status: u16) -> Self {
        self.responses.insert(target.into(), status);
        self
    }

    pub fn unreachable(mut self, target: impl Into<EndpointId>) -> Self {
        self.unreachable.insert(target.into());
        self
    }

    pub fn from_simulation(simulation: &SimulationConfig) -> Self {
        let dispatcher = simulation
            .responses
            .iter()
            .fold(Self::new(simulation.default_status), |d, (target, status)| {
                d.respond(target.clone(), *status)
            });
        simulation
            .unreachable
            .iter()
            .fold(dispatcher, |d, target| d.unreachable(target.clone()))
    }

    pub async fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_targets(&self) -> Vec<EndpointId> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|notification| notification.target.clone())
            .collect()
    }
}

impl Default for ScriptedDispatcher {
    fn default() -> Self {
        Self::new(200)
    }
}

#[async_trait]
impl EventDispatcher for ScriptedDispatcher {
    async fn send(
        &self,
        target: &EndpointId,
        payload: &StepPayload,
        correlation: &Correlation,
    ) -> Result<DispatchResult, DispatchError> {
        self.sent.lock().await.push(SentNotification {
            target: target.clone(),
            payload: payload.clone(),
            correlation: correlation.clone(),
        });

        let body = serde_json::to_string(payload).unwrap_or_default();
        tracing::debug!(
            target_endpoint = target.as_str(),
            trace_indicator = correlation.trace_indicator.as_str(),
            body = body.as_str(),
            "Scripted dispatch"
        );

        if self.unreachable.contains(target) {
            return Err(DispatchError::Transport {
                target: target.clone(),
                reason: "connection refused".to_string(),
            });
        }

        let status = self
            .responses
            .get(target)
            .copied()
            .unwrap_or(self.default_status);
        Ok(DispatchResult::from_http_status(status))
    }
}
