// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fault-injecting wrappers for exercising failure isolation.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::{ResolverError, StoreError};
use crate::model::{Attribute, AttributeValue, EndpointId, EndpointStack, ForwardingConstruct};
use crate::traits::{EndpointStore, ForwardingResolver};

/// A store that fails selected reads or writes and delegates everything else
pub struct FaultyStore {
    inner: Arc<dyn EndpointStore>,
    failing_reads: HashSet<(EndpointId, Attribute)>,
    failing_writes: HashSet<(EndpointId, Attribute)>,
}

impl FaultyStore {
    pub fn new(inner: Arc<dyn EndpointStore>) -> Self {
        Self {
            inner,
            failing_reads: HashSet::new(),
            failing_writes: HashSet::new(),
        }
    }

    pub fn fail_read(mut self, endpoint: impl Into<EndpointId>, attribute: Attribute) -> Self {
        self.failing_reads.insert((endpoint.into(), attribute));
        self
    }

    pub fn fail_write(mut self, endpoint: impl Into<EndpointId>, attribute: Attribute) -> Self {
        self.failing_writes.insert((endpoint.into(), attribute));
        self
    }
}

#[async_trait]
impl EndpointStore for FaultyStore {
    async fn get(
        &self,
        endpoint: &EndpointId,
        attribute: Attribute,
    ) -> Result<Option<AttributeValue>, StoreError> {
        if self.failing_reads.contains(&(endpoint.clone(), attribute)) {
            return Err(StoreError::Unavailable("simulated read failure".to_string()));
        }
        self.inner.get(endpoint, attribute).await
    }

    async fn set(
        &self,
        endpoint: &EndpointId,
        attribute: Attribute,
        value: AttributeValue,
    ) -> Result<bool, StoreError> {
        if self.failing_writes.contains(&(endpoint.clone(), attribute)) {
            return Err(StoreError::Unavailable("simulated write failure".to_string()));
        }
        self.inner.set(endpoint, attribute, value).await
    }
}

/// A resolver for which some names are configured but unreachable
pub struct UnreachableResolver {
    inner: Arc<dyn ForwardingResolver>,
    unreachable: HashSet<String>,
}

impl UnreachableResolver {
    pub fn new(inner: Arc<dyn ForwardingResolver>) -> Self {
        Self {
            inner,
            unreachable: HashSet::new(),
        }
    }

    pub fn unreachable(mut self, name: impl Into<String>) -> Self {
        self.unreachable.insert(name.into());
        self
    }

    fn check(&self, name: &str) -> Result<(), ResolverError> {
        if self.unreachable.contains(name) {
            Err(ResolverError::Unreachable {
                name: name.to_string(),
                reason: "simulated outage".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ForwardingResolver for UnreachableResolver {
    async fn resolve_stack(&self, name: &str) -> Result<Option<EndpointStack>, ResolverError> {
        self.check(name)?;
        self.inner.resolve_stack(name).await
    }

    async fn resolve_construct(
        &self,
        name: &str,
    ) -> Result<Option<ForwardingConstruct>, ResolverError> {
        self.check(name)?;
        self.inner.resolve_construct(name).await
    }
}
