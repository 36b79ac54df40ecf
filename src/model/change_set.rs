// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::model::{Attribute, AttributeValue, EndpointId};

/// One attribute write that actually changed the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeChange {
    pub attribute: Attribute,
    pub previous: Option<AttributeValue>,
    pub current: AttributeValue,
}

/// Endpoints mutated during one reconciliation cycle.
///
/// An endpoint only ever enters the set through [`ChangeSet::record`], which
/// is called after the store confirmed a write, so every entry has at least
/// one attribute whose value really differs from before. Several changed
/// attributes on the same endpoint coalesce into one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: BTreeMap<EndpointId, Vec<AttributeChange>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, endpoint: EndpointId, change: AttributeChange) {
        self.changes.entry(endpoint).or_default().push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of distinct endpoints changed.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn contains(&self, endpoint: &EndpointId) -> bool {
        self.changes.contains_key(endpoint)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointId> {
        self.changes.keys()
    }

    pub fn changes_for(&self, endpoint: &EndpointId) -> Option<&[AttributeChange]> {
        self.changes.get(endpoint).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EndpointId, &[AttributeChange])> {
        self.changes.iter().map(|(id, changes)| (id, changes.as_slice()))
    }

    /// Fold another change set into this one, keeping per-endpoint order.
    pub fn merge(&mut self, other: ChangeSet) {
        for (endpoint, changes) in other.changes {
            self.changes.entry(endpoint).or_default().extend(changes);
        }
    }
}
