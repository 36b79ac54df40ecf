// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;

use crate::config::Config;
use crate::errors::ResolverError;
use crate::model::{EndpointStack, ForwardingConstruct};
use crate::traits::ForwardingResolver;

/// Forwarding graph fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticForwardingResolver {
    stacks: HashMap<String, EndpointStack>,
    constructs: HashMap<String, ForwardingConstruct>,
}

impl StaticForwardingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack(mut self, stack: EndpointStack) -> Self {
        self.stacks.insert(stack.name.clone(), stack);
        self
    }

    pub fn with_construct(mut self, construct: ForwardingConstruct) -> Self {
        self.constructs.insert(construct.name.clone(), construct);
        self
    }

    pub fn from_config(cfg: &Config) -> Self {
        let resolver = cfg
            .stacks
            .iter()
            .fold(Self::new(), |resolver, stack| resolver.with_stack(stack.to_stack()));
        cfg.constructs
            .iter()
            .cloned()
            .fold(resolver, |resolver, construct| resolver.with_construct(construct))
    }
}

#[async_trait]
impl ForwardingResolver for StaticForwardingResolver {
    async fn resolve_stack(&self, name: &str) -> Result<Option<EndpointStack>, ResolverError> {
        Ok(self.stacks.get(name).cloned())
    }

    async fn resolve_construct(
        &self,
        name: &str,
    ) -> Result<Option<ForwardingConstruct>, ResolverError> {
        Ok(self.constructs.get(name).cloned())
    }
}
