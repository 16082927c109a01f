//! Order Ledger
//!
//! Order id -> latest reconciled order. Resolves NEW/UPDATE events that
//! arrive in any order by comparing event times.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::aggregate::OrderRecord;
use crate::domain::{Money, Verb};

/// Result of reconciling one ORDER event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// First event for the order; the full amount counts
    Opened { amount: Decimal },

    /// Strictly newer correction; only the difference counts
    Revised { delta: Decimal },

    /// Not newer than the stored record, or a late NEW. Nothing changes.
    Stale,
}

impl Reconciliation {
    /// Change to apply to the owning customer's expenditure
    pub fn delta(&self) -> Decimal {
        match self {
            Reconciliation::Opened { amount } => *amount,
            Reconciliation::Revised { delta } => *delta,
            Reconciliation::Stale => Decimal::ZERO,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Reconciliation::Stale)
    }
}

/// Order Ledger
#[derive(Debug, Default, Clone)]
pub struct OrderLedger {
    orders: HashMap<String, OrderRecord>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome `reconcile` would produce for this event, without storing
    /// anything.
    pub fn assess(
        &self,
        order_key: &str,
        event_time: DateTime<Utc>,
        amount: Money,
        verb: &Verb,
    ) -> Reconciliation {
        match self.orders.get(order_key) {
            None => Reconciliation::Opened {
                amount: amount.value(),
            },
            Some(record) if !verb.is_new() && event_time > record.last_event_time() => {
                Reconciliation::Revised {
                    delta: amount.delta_from(&record.amount()),
                }
            }
            Some(_) => Reconciliation::Stale,
        }
    }

    /// Reconcile an ORDER event against the stored record.
    ///
    /// An existing record is only replaced by a non-NEW event whose time is
    /// strictly after the stored one. Anything else is a zero-delta no-op.
    pub fn reconcile(
        &mut self,
        order_key: &str,
        customer_id: &str,
        event_time: DateTime<Utc>,
        amount: Money,
        verb: &Verb,
    ) -> Reconciliation {
        let outcome = self.assess(order_key, event_time, amount, verb);
        match outcome {
            Reconciliation::Opened { .. } => {
                self.orders.insert(
                    order_key.to_string(),
                    OrderRecord::new(order_key, customer_id, event_time, amount),
                );
            }
            Reconciliation::Revised { .. } => {
                if let Some(record) = self.orders.get_mut(order_key) {
                    record.revise(event_time, amount);
                }
            }
            Reconciliation::Stale => {}
        }
        outcome
    }

    pub fn get(&self, order_key: &str) -> Option<&OrderRecord> {
        self.orders.get(order_key)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
