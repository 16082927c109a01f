//! Event Records
//!
//! Already-decoded business events. A record is an immutable fact; the
//! reducer reads it and never keeps it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event verb
///
/// `New` is authoritative: it marks a customer registration or the
/// creation of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verb {
    New,
    Update,
    Upload,
    Other(String),
}

impl Verb {
    /// Parse a verb from its wire name
    pub fn parse(raw: &str) -> Self {
        match raw {
            "NEW" => Verb::New,
            "UPDATE" => Verb::Update,
            "UPLOAD" => Verb::Upload,
            other => Verb::Other(other.to_string()),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Verb::New)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verb::New => write!(f, "NEW"),
            Verb::Update => write!(f, "UPDATE"),
            Verb::Upload => write!(f, "UPLOAD"),
            Verb::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Profile fields carried by CUSTOMER events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Type-specific part of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventPayload {
    /// Customer registration or profile update; `key` is the customer id
    Customer { profile: CustomerProfile },

    /// Order creation or correction; `key` is the order id
    Order {
        customer_id: String,
        /// Raw total as sent, e.g. "12.34 USD". Parsed by the reducer.
        total_amount: Option<String>,
    },

    /// Site visit; `key` is an opaque event id
    SiteVisit { customer_id: String },

    /// Image upload; `key` is an opaque event id
    Image { customer_id: String },

    /// Any event type this engine does not track
    Unrecognized { event_type: String },
}

/// A normalized, already-parsed input event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub verb: Verb,
    pub key: String,
    pub event_time: DateTime<Utc>,
    pub payload: EventPayload,
}

impl EventRecord {
    pub fn new(
        verb: Verb,
        key: impl Into<String>,
        event_time: DateTime<Utc>,
        payload: EventPayload,
    ) -> Self {
        Self {
            verb,
            key: key.into(),
            event_time,
            payload,
        }
    }

    /// Get the event type as its wire name
    pub fn event_type(&self) -> &str {
        match &self.payload {
            EventPayload::Customer { .. } => "CUSTOMER",
            EventPayload::Order { .. } => "ORDER",
            EventPayload::SiteVisit { .. } => "SITE_VISIT",
            EventPayload::Image { .. } => "IMAGE",
            EventPayload::Unrecognized { event_type } => event_type,
        }
    }

    /// Get the customer this event refers to, if any
    pub fn customer_id(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Customer { .. } => Some(&self.key),
            EventPayload::Order { customer_id, .. }
            | EventPayload::SiteVisit { customer_id }
            | EventPayload::Image { customer_id } => Some(customer_id),
            EventPayload::Unrecognized { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_verb_parse() {
        assert_eq!(Verb::parse("NEW"), Verb::New);
        assert_eq!(Verb::parse("UPDATE"), Verb::Update);
        assert_eq!(Verb::parse("UPLOAD"), Verb::Upload);
        assert_eq!(Verb::parse("DELETE"), Verb::Other("DELETE".to_string()));
        assert!(Verb::New.is_new());
        assert!(!Verb::parse("new").is_new());
    }

    #[test]
    fn test_customer_id_resolution() {
        let customer = EventRecord::new(
            Verb::New,
            "c1",
            at("2017-01-06T12:46:46.384Z"),
            EventPayload::Customer { profile: CustomerProfile::default() },
        );
        assert_eq!(customer.customer_id(), Some("c1"));
        assert_eq!(customer.event_type(), "CUSTOMER");

        let order = EventRecord::new(
            Verb::New,
            "o1",
            at("2017-01-06T12:46:46.384Z"),
            EventPayload::Order {
                customer_id: "c1".to_string(),
                total_amount: Some("1.00 USD".to_string()),
            },
        );
        assert_eq!(order.customer_id(), Some("c1"));

        let other = EventRecord::new(
            Verb::New,
            "x1",
            at("2017-01-06T12:46:46.384Z"),
            EventPayload::Unrecognized { event_type: "REVIEW".to_string() },
        );
        assert_eq!(other.customer_id(), None);
        assert_eq!(other.event_type(), "REVIEW");
    }
}
