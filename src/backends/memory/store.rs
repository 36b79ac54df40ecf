// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::config::EndpointSeed;
use crate::errors::StoreError;
use crate::model::{Attribute, AttributeValue, EndpointId, EndpointRole};
use crate::traits::EndpointStore;

#[derive(Debug, Clone)]
struct EndpointRecord {
    role: EndpointRole,
    attributes: HashMap<Attribute, AttributeValue>,
}

/// Endpoint records held in process memory.
///
/// Every call to [`EndpointStore::set`] is counted, whether or not it changed
/// anything, so tests can assert that reconciliation issued no writes at all.
#[derive(Debug, Default)]
pub struct InMemoryEndpointStore {
    records: RwLock<HashMap<EndpointId, EndpointRecord>>,
    writes: AtomicUsize,
}

impl InMemoryEndpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint with its initial attributes.
    pub fn with_endpoint<I>(mut self, id: impl Into<EndpointId>, role: EndpointRole, attributes: I) -> Self
    where
        I: IntoIterator<Item = (Attribute, AttributeValue)>,
    {
        self.records.get_mut().insert(
            id.into(),
            EndpointRecord {
                role,
                attributes: attributes.into_iter().collect(),
            },
        );
        self
    }

    pub fn from_seeds(seeds: &[EndpointSeed]) -> Self {
        seeds.iter().fold(Self::new(), |store, seed| {
            store.with_endpoint(seed.id.clone(), seed.role, seed.attributes.to_pairs())
        })
    }

    /// Number of `set` calls received so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of an endpoint's attributes, for inspection.
    pub async fn snapshot(&self, id: &EndpointId) -> Option<HashMap<Attribute, AttributeValue>> {
        let records = self.records.read().await;
        records.get(id).map(|record| record.attributes.clone())
    }
}

fn check_role(
    id: &EndpointId,
    record: &EndpointRecord,
    attribute: Attribute,
) -> Result<(), StoreError> {
    if attribute.role() == record.role {
        Ok(())
    } else {
        Err(StoreError::AttributeNotApplicable {
            endpoint: id.clone(),
            role: record.role,
            attribute,
        })
    }
}

#[async_trait]
impl EndpointStore for InMemoryEndpointStore {
    async fn get(
        &self,
        endpoint: &EndpointId,
        attribute: Attribute,
    ) -> Result<Option<AttributeValue>, StoreError> {
        let records = self.records.read().await;
        let record = records
            .get(endpoint)
            .ok_or_else(|| StoreError::UnknownEndpoint(endpoint.clone()))?;
        check_role(endpoint, record, attribute)?;
        Ok(record.attributes.get(&attribute).cloned())
    }

    async fn set(
        &self,
        endpoint: &EndpointId,
        attribute: Attribute,
        value: AttributeValue,
    ) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.write().await;
        let record = records
            .get_mut(endpoint)
            .ok_or_else(|| StoreError::UnknownEndpoint(endpoint.clone()))?;
        check_role(endpoint, record, attribute)?;

        if record.attributes.get(&attribute) == Some(&value) {
            return Ok(false);
        }
        record.attributes.insert(attribute, value);
        Ok(true)
    }
}
