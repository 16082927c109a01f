//! Event decoding
//!
//! Turns JSON events into `EventRecord`s. Accepts a single object, an array
//! of objects, or newline-delimited objects.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{CustomerProfile, DecodeError, EventPayload, EventRecord, Verb};

/// Wire shape of an event. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: Option<String>,
    verb: Option<String>,
    key: Option<String>,
    event_time: Option<String>,
    customer_id: Option<String>,
    total_amount: Option<String>,
    last_name: Option<String>,
    adr_city: Option<String>,
    adr_state: Option<String>,
}

/// Decode one JSON event
pub fn decode_event(input: &str) -> Result<EventRecord, DecodeError> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    decode_value(value)
}

/// Decode one already-parsed JSON event
pub fn decode_value(value: Value) -> Result<EventRecord, DecodeError> {
    if !value.is_object() {
        return Err(DecodeError::Malformed("event must be a JSON object".to_string()));
    }
    let raw: RawEvent =
        serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let event_type = raw.event_type.ok_or(DecodeError::MissingField("type"))?;
    let verb = raw.verb.ok_or(DecodeError::MissingField("verb"))?;
    let key = raw.key.ok_or(DecodeError::MissingField("key"))?;
    let event_time = parse_event_time(
        raw.event_time
            .as_deref()
            .ok_or(DecodeError::MissingField("event_time"))?,
    )?;

    let payload = match event_type.as_str() {
        "CUSTOMER" => EventPayload::Customer {
            profile: CustomerProfile {
                last_name: raw.last_name,
                city: raw.adr_city,
                state: raw.adr_state,
            },
        },
        "ORDER" => EventPayload::Order {
            customer_id: raw.customer_id.ok_or(DecodeError::MissingField("customer_id"))?,
            total_amount: raw.total_amount,
        },
        "SITE_VISIT" => EventPayload::SiteVisit {
            customer_id: raw.customer_id.ok_or(DecodeError::MissingField("customer_id"))?,
        },
        "IMAGE" => EventPayload::Image {
            customer_id: raw.customer_id.ok_or(DecodeError::MissingField("customer_id"))?,
        },
        _ => EventPayload::Unrecognized { event_type },
    };

    Ok(EventRecord::new(Verb::parse(&verb), key, event_time, payload))
}

/// Decode a batch of events. Each element decodes independently.
pub fn decode_batch(input: &str) -> Vec<Result<EventRecord, DecodeError>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => items.into_iter().map(decode_value).collect(),
        Ok(value) => vec![decode_value(value)],
        // not a single document: try one event per line
        Err(_) => trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(decode_event)
            .collect(),
    }
}

/// Parse an RFC 3339 timestamp such as `2017-01-06T12:46:46.384Z` into UTC
pub fn parse_event_time(value: &str) -> Result<DateTime<Utc>, DecodeError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DecodeError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
