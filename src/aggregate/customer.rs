//! Customer Aggregate
//!
//! Running per-customer totals derived from every event that names the
//! customer. Owned by the `CustomerLedger`; mutation happens only through
//! the ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{AmountError, CustomerProfile};

/// Customer Aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAggregate {
    /// Customer id (ledger key)
    customer_id: String,

    /// Start of the customer's life: first reference, or the registration
    /// time once a CUSTOMER/NEW event has been seen
    start_date: DateTime<Utc>,

    /// Number of events referencing this customer
    visits: u64,

    /// Running total of order amounts, net of corrections
    expenditure: Decimal,

    /// Profile, written only by registrations
    profile: CustomerProfile,

    /// Whether a registration has been applied
    registered: bool,
}

impl CustomerAggregate {
    /// Create an aggregate on first reference. The creating event is the
    /// first visit.
    pub(crate) fn new(customer_id: impl Into<String>, first_seen: DateTime<Utc>) -> Self {
        Self {
            customer_id: customer_id.into(),
            start_date: first_seen,
            visits: 1,
            expenditure: Decimal::ZERO,
            profile: CustomerProfile::default(),
            registered: false,
        }
    }

    pub(crate) fn record_visit(&mut self) {
        self.visits += 1;
    }

    /// Registration always wins: it carries the true start date and the
    /// canonical profile, however late it arrives.
    pub(crate) fn register(&mut self, registered_at: DateTime<Utc>, profile: CustomerProfile) {
        self.start_date = registered_at;
        self.profile = profile;
        self.registered = true;
    }

    /// Leaves the total untouched when the sum does not fit.
    pub(crate) fn add_expenditure(&mut self, delta: Decimal) -> Result<(), AmountError> {
        self.expenditure = self
            .expenditure
            .checked_add(delta)
            .ok_or(AmountError::Overflow)?;
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn expenditure(&self) -> Decimal {
        self.expenditure
    }

    pub fn profile(&self) -> &CustomerProfile {
        &self.profile
    }

    pub fn last_name(&self) -> Option<&str> {
        self.profile.last_name.as_deref()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}
