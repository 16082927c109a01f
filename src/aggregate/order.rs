//! Order Record
//!
//! Latest reconciled state of a single order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Money;

/// Order Record
///
/// `amount` always belongs to the event with the latest event time applied
/// so far, not to the latest arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    order_key: String,
    customer_id: String,
    last_event_time: DateTime<Utc>,
    amount: Money,
}

impl OrderRecord {
    pub(crate) fn new(
        order_key: impl Into<String>,
        customer_id: impl Into<String>,
        event_time: DateTime<Utc>,
        amount: Money,
    ) -> Self {
        Self {
            order_key: order_key.into(),
            customer_id: customer_id.into(),
            last_event_time: event_time,
            amount,
        }
    }

    /// Replace the amount with a strictly newer one
    pub(crate) fn revise(&mut self, event_time: DateTime<Utc>, amount: Money) {
        self.last_event_time = event_time;
        self.amount = amount;
    }

    pub fn order_key(&self) -> &str {
        &self.order_key
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn last_event_time(&self) -> DateTime<Utc> {
        self.last_event_time
    }

    pub fn amount(&self) -> Money {
        self.amount
    }
}
