//! Ingestion Error Types
//!
//! Per-event failures. None of them stop the stream: the caller is told and
//! moves on to the next event.

use thiserror::Error;

use super::amount::AmountError;

/// The event could not be turned into an `EventRecord`.
///
/// Nothing in the ledgers is touched for an event that fails to decode.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// Payload is not valid JSON or not a JSON object
    #[error("Malformed event: {0}")]
    Malformed(String),

    /// A required field is absent or not a string
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// event_time could not be parsed
    #[error("Invalid event_time {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// Failure reported by the reducer for a single event
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestError {
    /// Event rejected outright
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// ORDER event with an unusable total. The visit still counts.
    #[error("Invalid amount on order {order_key}: {source}")]
    InvalidAmount {
        order_key: String,
        #[source]
        source: AmountError,
    },
}

impl IngestError {
    pub fn invalid_amount(order_key: impl Into<String>, source: AmountError) -> Self {
        Self::InvalidAmount {
            order_key: order_key.into(),
            source,
        }
    }

    /// Check if the event was rejected with no state change
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if the event was partially applied (visit counted, amount skipped)
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::InvalidAmount { .. })
    }
}
