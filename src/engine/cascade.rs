// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential cascade execution with early stop on terminal success.
//!
//! Steps run strictly in plan order. For each step the forwarding construct
//! is resolved by name and the payload is sent to every OUTPUT port target,
//! one target after another. Every call carries the step-derived trace
//! indicator `"{base}.{n}"`.
//!
//! ```text
//! Pending -> Running(1) -> Running(2) -> ... -> Settled
//!                 |                         \-> PartiallyFailed
//!                 \-> Settled (terminal success observed)
//!                 \-> Cancelled (token fired)
//! ```
//!
//! Errors are recorded against their step and never abort the cascade.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::SettlePolicy;
use crate::errors::{DispatchError, StepError};
use crate::model::{AutomationPlan, AutomationStep, Correlation, DispatchResult, EndpointId};
use crate::observability::messages::cascade::{
    CascadeCancelled, CascadeCompleted, CascadeSettledEarly, CascadeStarted, StepFailed,
    StepStarted, StepWithoutTargets,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{EventDispatcher, ForwardingResolver};

/// Lifecycle of one cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    Pending,
    /// Executing the step at this 1-based position.
    Running(usize),
    /// Terminal success was reached, or every step completed without error.
    Settled,
    /// The plan was exhausted and at least one step recorded an error.
    PartiallyFailed,
    /// The caller cancelled before the plan was exhausted.
    Cancelled,
}

impl CascadeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CascadeState::Pending => "pending",
            CascadeState::Running(_) => "running",
            CascadeState::Settled => "settled",
            CascadeState::PartiallyFailed => "partially_failed",
            CascadeState::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for CascadeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CascadeState::Running(position) => write!(f, "running({})", position),
            other => f.write_str(other.as_str()),
        }
    }
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Every dispatch was sent and none failed.
    Completed,
    /// At least one error was recorded.
    Failed,
    /// Never attempted: the cascade settled or was cancelled first.
    NotSent,
}

/// Result of sending the step payload to one OUTPUT target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOutcome {
    pub target: EndpointId,
    pub result: Result<DispatchResult, DispatchError>,
}

impl TargetOutcome {
    fn is_terminal(&self) -> bool {
        matches!(&self.result, Ok(result) if result.status.is_terminal())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// 1-based position in the plan.
    pub position: usize,
    pub forwarding_name: String,
    pub trace_indicator: String,
    pub status: StepStatus,
    pub targets: Vec<TargetOutcome>,
    pub errors: Vec<StepError>,
}

impl StepOutcome {
    fn not_sent(position: usize, step: &AutomationStep, correlation: &Correlation) -> Self {
        Self {
            position,
            forwarding_name: step.forwarding_name.clone(),
            trace_indicator: correlation.for_step(position).trace_indicator,
            status: StepStatus::NotSent,
            targets: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Everything that happened during one cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeReport {
    pub state: CascadeState,
    /// One entry per plan step, in plan order.
    pub steps: Vec<StepOutcome>,
}

impl CascadeReport {
    /// Steps that were actually attempted.
    pub fn executed(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status != StepStatus::NotSent)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Failed)
            .count()
    }
}

/// Executes automation plans against the forwarding graph.
pub struct CascadeDispatcher {
    resolver: Arc<dyn ForwardingResolver>,
    dispatcher: Arc<dyn EventDispatcher>,
    policy: SettlePolicy,
}

impl CascadeDispatcher {
    pub fn new(
        resolver: Arc<dyn ForwardingResolver>,
        dispatcher: Arc<dyn EventDispatcher>,
        policy: SettlePolicy,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
            policy,
        }
    }

    pub fn policy(&self) -> SettlePolicy {
        self.policy
    }

    pub async fn execute(&self, plan: &AutomationPlan, correlation: &Correlation) -> CascadeReport {
        self.execute_with_cancellation(plan, correlation, CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), abandoning remaining steps once
    /// `cancel` fires. A dispatch in flight when the token fires is recorded
    /// as [`DispatchError::Abandoned`].
    pub async fn execute_with_cancellation(
        &self,
        plan: &AutomationPlan,
        correlation: &Correlation,
        cancel: CancellationToken,
    ) -> CascadeReport {
        let started = CascadeStarted {
            step_count: plan.len(),
            correlation_id: &correlation.correlation_id,
            trace_indicator: &correlation.trace_indicator,
        };
        started.log();
        let span = started.span("cascade_execution");

        self.run(plan, correlation, &cancel).instrument(span).await
    }

    async fn run(
        &self,
        plan: &AutomationPlan,
        correlation: &Correlation,
        cancel: &CancellationToken,
    ) -> CascadeReport {
        let start_time = Instant::now();
        let mut state = CascadeState::Pending;
        let mut outcomes: Vec<StepOutcome> = Vec::with_capacity(plan.len());

        for (index, step) in plan.steps().iter().enumerate() {
            let position = index + 1;

            if cancel.is_cancelled() {
                state = CascadeState::Cancelled;
                break;
            }
            state = CascadeState::Running(position);

            let outcome = self.run_step(position, step, correlation, cancel).await;
            let settled = step.settles && self.is_settled(&outcome);
            outcomes.push(outcome);

            if cancel.is_cancelled() {
                state = CascadeState::Cancelled;
                break;
            }
            if settled {
                CascadeSettledEarly {
                    position,
                    forwarding_name: &step.forwarding_name,
                    skipped: plan.len() - position,
                }
                .log();
                state = CascadeState::Settled;
                break;
            }
        }

        if state == CascadeState::Cancelled {
            CascadeCancelled {
                position: outcomes.len() + 1,
                abandoned: plan.len() - outcomes.len(),
            }
            .log();
        }

        let attempted = outcomes.len();
        for (index, step) in plan.steps().iter().enumerate().skip(attempted) {
            outcomes.push(StepOutcome::not_sent(index + 1, step, correlation));
        }

        // Plan exhausted, or empty
        if matches!(state, CascadeState::Pending | CascadeState::Running(_)) {
            let any_failed = outcomes.iter().any(|step| step.status == StepStatus::Failed);
            state = if any_failed {
                CascadeState::PartiallyFailed
            } else {
                CascadeState::Settled
            };
        }

        let report = CascadeReport {
            state,
            steps: outcomes,
        };
        CascadeCompleted {
            state: state.as_str(),
            executed: report.executed(),
            failed: report.failed(),
            duration: start_time.elapsed(),
        }
        .log();

        report
    }

    async fn run_step(
        &self,
        position: usize,
        step: &AutomationStep,
        correlation: &Correlation,
        cancel: &CancellationToken,
    ) -> StepOutcome {
        let step_correlation = correlation.for_step(position);
        StepStarted {
            position,
            forwarding_name: &step.forwarding_name,
            trace_indicator: &step_correlation.trace_indicator,
        }
        .log();

        let mut outcome = StepOutcome {
            position,
            forwarding_name: step.forwarding_name.clone(),
            trace_indicator: step_correlation.trace_indicator.clone(),
            status: StepStatus::Completed,
            targets: Vec::new(),
            errors: Vec::new(),
        };

        let construct = match self.resolver.resolve_construct(&step.forwarding_name).await {
            Ok(Some(construct)) => construct,
            Ok(None) => {
                self.record_error(
                    &mut outcome,
                    StepError::ConstructNotFound(step.forwarding_name.clone()),
                );
                return outcome;
            }
            Err(error) => {
                self.record_error(&mut outcome, error.into());
                return outcome;
            }
        };

        let targets: Vec<&EndpointId> = construct.output_targets().collect();
        if targets.is_empty() {
            StepWithoutTargets {
                position,
                forwarding_name: &step.forwarding_name,
            }
            .log();
        }

        for target in targets {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(DispatchError::Abandoned(target.clone())),
                result = self.dispatcher.send(target, &step.payload, &step_correlation) => result,
            };

            match &result {
                Err(error) => self.record_error(&mut outcome, error.clone().into()),
                Ok(response) if response.status.is_failure() => self.record_error(
                    &mut outcome,
                    StepError::UnsuccessfulStatus {
                        target: target.clone(),
                        status: response.status,
                    },
                ),
                Ok(_) => {}
            }

            let abandoned = matches!(result, Err(DispatchError::Abandoned(_)));
            outcome.targets.push(TargetOutcome {
                target: target.clone(),
                result,
            });
            if abandoned {
                break;
            }
        }

        outcome
    }

    fn record_error(&self, outcome: &mut StepOutcome, error: StepError) {
        StepFailed {
            position: outcome.position,
            forwarding_name: &outcome.forwarding_name,
            error: &error,
        }
        .log();
        outcome.status = StepStatus::Failed;
        outcome.errors.push(error);
    }

    fn is_settled(&self, outcome: &StepOutcome) -> bool {
        match self.policy {
            SettlePolicy::AnyTerminal => outcome.targets.iter().any(TargetOutcome::is_terminal),
            SettlePolicy::AllTerminal => {
                !outcome.targets.is_empty() && outcome.targets.iter().all(TargetOutcome::is_terminal)
            }
        }
    }
}
