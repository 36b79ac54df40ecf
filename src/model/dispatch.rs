// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single dispatch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// The peer is fully satisfied; nothing more to do for this cascade.
    TerminalSuccess,
    /// Accepted, but later steps may still be needed.
    Accepted,
    /// The peer refused the request.
    Rejected,
    /// The peer failed to handle the request.
    Failed,
}

impl StatusClass {
    /// 204 is the canonical "fully accepted" answer of a peer.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            204 => StatusClass::TerminalSuccess,
            200..=299 => StatusClass::Accepted,
            400..=499 => StatusClass::Rejected,
            _ => StatusClass::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusClass::TerminalSuccess)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StatusClass::Rejected | StatusClass::Failed)
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusClass::TerminalSuccess => "terminal_success",
            StatusClass::Accepted => "accepted",
            StatusClass::Rejected => "rejected",
            StatusClass::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub status: StatusClass,
}

impl DispatchResult {
    pub fn new(status: StatusClass) -> Self {
        Self { status }
    }

    pub fn from_http_status(status: u16) -> Self {
        Self::new(StatusClass::from_http_status(status))
    }
}

/// Request context passed through every outbound call of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Correlation {
    /// User or system that started the cycle.
    #[serde(rename = "user")]
    pub actor: String,
    #[serde(rename = "x-correlator")]
    pub correlation_id: String,
    pub trace_indicator: String,
    pub customer_journey: String,
}

impl Correlation {
    pub fn new(
        actor: impl Into<String>,
        correlation_id: impl Into<String>,
        trace_indicator: impl Into<String>,
        customer_journey: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            correlation_id: correlation_id.into(),
            trace_indicator: trace_indicator.into(),
            customer_journey: customer_journey.into(),
        }
    }

    /// Context for the n-th step (1-based): same actor, correlation id and
    /// journey, trace indicator extended with `.n`.
    pub fn for_step(&self, position: usize) -> Self {
        Self {
            trace_indicator: format!("{}.{}", self.trace_indicator, position),
            ..self.clone()
        }
    }
}
