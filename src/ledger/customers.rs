//! Customer Ledger
//!
//! Customer id -> aggregate. Aggregates are created lazily by whichever
//! event first names the customer and are never removed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::aggregate::CustomerAggregate;
use crate::domain::{AmountError, CustomerProfile};

/// Customer Ledger
#[derive(Debug, Default, Clone)]
pub struct CustomerLedger {
    customers: HashMap<String, CustomerAggregate>,
}

impl CustomerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a visit for `customer_id`, creating the aggregate if this is
    /// the first reference. Creation counts as the first visit.
    pub fn get_or_create(
        &mut self,
        customer_id: &str,
        event_time: DateTime<Utc>,
    ) -> &CustomerAggregate {
        match self.customers.get_mut(customer_id) {
            Some(customer) => {
                customer.record_visit();
            }
            None => {
                tracing::debug!(customer_id, "First reference to customer");
                self.customers.insert(
                    customer_id.to_string(),
                    CustomerAggregate::new(customer_id, event_time),
                );
            }
        }
        // present in both branches
        &self.customers[customer_id]
    }

    /// Apply an authoritative registration. Overwrites the start date and
    /// profile regardless of how many earlier events created the aggregate.
    /// Creates the aggregate without counting a visit when absent.
    pub fn apply_registration(
        &mut self,
        customer_id: &str,
        registered_at: DateTime<Utc>,
        profile: CustomerProfile,
    ) {
        self.customers
            .entry(customer_id.to_string())
            .or_insert_with(|| CustomerAggregate::new(customer_id, registered_at))
            .register(registered_at, profile);
    }

    /// Add an order delta to a customer's expenditure. An absent customer
    /// is created as on first reference.
    ///
    /// # Errors
    /// - `AmountError::Overflow` if the new total does not fit; nothing changes
    pub fn add_expenditure(
        &mut self,
        customer_id: &str,
        event_time: DateTime<Utc>,
        delta: Decimal,
    ) -> Result<(), AmountError> {
        self.customers
            .entry(customer_id.to_string())
            .or_insert_with(|| CustomerAggregate::new(customer_id, event_time))
            .add_expenditure(delta)
    }

    pub fn get(&self, customer_id: &str) -> Option<&CustomerAggregate> {
        self.customers.get(customer_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomerAggregate> {
        self.customers.values()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
