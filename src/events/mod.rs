// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed bodies of the inbound lifecycle events.
//!
//! Every field is optional: an absent field means "leave the stored value
//! alone". Events are validated once with `validate()` before they reach the
//! engine, and then translated into sparse [`DesiredConfig`](crate::model::DesiredConfig)s.

mod embedding;
mod envelope;
mod registration;

pub use embedding::EmbeddingEvent;
pub use envelope::{parse_event, EventEnvelope};
pub use registration::RegistrationEvent;

use crate::errors::EventError;
use crate::model::Address;

fn check_text(field: &'static str, value: &Option<String>) -> Result<(), EventError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(EventError::BlankField(field)),
        _ => Ok(()),
    }
}

fn check_port(field: &'static str, value: Option<u16>) -> Result<(), EventError> {
    match value {
        Some(0) => Err(EventError::InvalidPort(field)),
        _ => Ok(()),
    }
}

fn check_address(field: &'static str, value: &Option<Address>) -> Result<(), EventError> {
    match value {
        Some(address) if address.host().trim().is_empty() => Err(EventError::BlankField(field)),
        _ => Ok(()),
    }
}
