// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::EventError;
use crate::model::Correlation;

pub const DEFAULT_USER: &str = "peer-cascade";
pub const DEFAULT_TRACE_INDICATOR: &str = "1";
pub const DEFAULT_CUSTOMER_JOURNEY: &str = "unknown";

/// Request context as it may appear in an event body. Missing fields get
/// defaults; a missing correlator gets a fresh v4 UUID.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CorrelationHeader {
    user: Option<String>,
    x_correlator: Option<String>,
    trace_indicator: Option<String>,
    customer_journey: Option<String>,
}

impl CorrelationHeader {
    fn into_correlation(self) -> Correlation {
        Correlation::new(
            self.user.unwrap_or_else(|| DEFAULT_USER.to_string()),
            self.x_correlator
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            self.trace_indicator
                .unwrap_or_else(|| DEFAULT_TRACE_INDICATOR.to_string()),
            self.customer_journey
                .unwrap_or_else(|| DEFAULT_CUSTOMER_JOURNEY.to_string()),
        )
    }
}

/// An event body together with the request context it arrived with.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope<T> {
    pub correlation: Correlation,
    pub event: T,
}

/// Parse a JSON event body. The optional `correlation` object carries the
/// request context; every other key belongs to the event itself.
pub fn parse_event<T: DeserializeOwned>(body: &str) -> Result<EventEnvelope<T>, EventError> {
    let mut value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| EventError::Malformed(e.to_string()))?;

    let header = match value.as_object_mut() {
        Some(object) => object.remove("correlation"),
        None => return Err(EventError::Malformed("event body must be a JSON object".to_string())),
    };
    let header: CorrelationHeader = match header {
        Some(header) => {
            serde_json::from_value(header).map_err(|e| EventError::Malformed(e.to_string()))?
        }
        None => CorrelationHeader::default(),
    };

    let event = serde_json::from_value(value).map_err(|e| EventError::Malformed(e.to_string()))?;

    Ok(EventEnvelope {
        correlation: header.into_correlation(),
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EmbeddingEvent, RegistrationEvent};

    #[test]
    fn test_correlation_block_is_split_off() {
        let body = r#"{
            "correlation": { "user": "ops", "x-correlator": "abc", "trace-indicator": "3" },
            "http-port": 1024
        }"#;

        let envelope: EventEnvelope<RegistrationEvent> = parse_event(body).unwrap();

        assert_eq!(envelope.correlation.actor, "ops");
        assert_eq!(envelope.correlation.correlation_id, "abc");
        assert_eq!(envelope.correlation.trace_indicator, "3");
        assert_eq!(envelope.correlation.customer_journey, DEFAULT_CUSTOMER_JOURNEY);
        assert_eq!(envelope.event.http_port, Some(1024));
    }

    #[test]
    fn test_missing_correlation_gets_defaults() {
        let envelope: EventEnvelope<EmbeddingEvent> = parse_event("{}").unwrap();

        assert_eq!(envelope.correlation.actor, DEFAULT_USER);
        assert_eq!(envelope.correlation.trace_indicator, DEFAULT_TRACE_INDICATOR);
        assert!(uuid::Uuid::parse_str(&envelope.correlation.correlation_id).is_ok());
        assert_eq!(envelope.event, EmbeddingEvent::default());
    }

    #[test]
    fn test_malformed_bodies_are_rejected() {
        assert!(matches!(
            parse_event::<RegistrationEvent>("[1, 2]"),
            Err(EventError::Malformed(_))
        ));
        assert!(matches!(
            parse_event::<RegistrationEvent>(r#"{"http-port": "eighty"}"#),
            Err(EventError::Malformed(_))
        ));
        assert!(matches!(
            parse_event::<RegistrationEvent>("not json"),
            Err(EventError::Malformed(_))
        ));
    }

    #[test]
    fn test_bundled_event_files_parse() {
        let register = std::fs::read_to_string("configs/events/register.json").unwrap();
        let embed = std::fs::read_to_string("configs/events/embed.json").unwrap();

        let register: EventEnvelope<RegistrationEvent> = parse_event(&register).unwrap();
        let embed: EventEnvelope<EmbeddingEvent> = parse_event(&embed).unwrap();

        assert_eq!(register.correlation.actor, "operator");
        assert!(register.event.validate().is_ok());
        assert!(embed.event.validate().is_ok());
    }
}
