// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::model::{Attribute, AttributeValue, EndpointId};

/// Typed access to endpoint attributes.
///
/// Implementations are expected to serialize conflicting writes to the same
/// endpoint; the engine does not coordinate concurrent cycles.
#[async_trait]
pub trait EndpointStore: Send + Sync {
    /// Current value, or `None` when the attribute was never set.
    async fn get(
        &self,
        endpoint: &EndpointId,
        attribute: Attribute,
    ) -> Result<Option<AttributeValue>, StoreError>;

    /// Idempotent write. Returns `true` only when the stored value changed.
    async fn set(
        &self,
        endpoint: &EndpointId,
        attribute: Attribute,
        value: AttributeValue,
    ) -> Result<bool, StoreError>;
}
