// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::DispatchError;
use crate::model::{Correlation, DispatchResult, EndpointId, StepPayload};

/// Outbound notification transport.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Send `payload` to `target`. Payloads are idempotent, so a caller may
    /// re-send after a failure without harm.
    async fn send(
        &self,
        target: &EndpointId,
        payload: &StepPayload,
        correlation: &Correlation,
    ) -> Result<DispatchResult, DispatchError>;
}
