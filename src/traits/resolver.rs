// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::ResolverError;
use crate::model::{EndpointStack, ForwardingConstruct};

/// Lookup into the forwarding graph by symbolic interaction name.
///
/// `Ok(None)` means "not configured" and is a normal outcome. `Err` means
/// the graph is configured but could not be consulted.
#[async_trait]
pub trait ForwardingResolver: Send + Sync {
    async fn resolve_stack(&self, name: &str) -> Result<Option<EndpointStack>, ResolverError>;

    async fn resolve_construct(
        &self,
        name: &str,
    ) -> Result<Option<ForwardingConstruct>, ResolverError>;
}
