//! Reducer
//!
//! Applies events one at a time to the customer and order ledgers and keeps
//! the watermark (latest observed event time). Every failure is local to
//! its event; ingestion never halts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::{CustomerAggregate, OrderRecord};
use crate::analytics::{self, CustomerSummary};
use crate::decode;
use crate::domain::{DecodeError, EventPayload, EventRecord, IngestError, Money};
use crate::ledger::{CustomerLedger, OrderLedger, Reconciliation};

/// What a successfully ingested event did
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Customer whose aggregate was touched, if any
    pub customer_id: Option<String>,

    /// Order reconciliation, for ORDER events carrying a usable amount
    pub reconciliation: Option<Reconciliation>,
}

impl IngestOutcome {
    fn untouched() -> Self {
        Self {
            customer_id: None,
            reconciliation: None,
        }
    }

    fn visit(customer_id: &str) -> Self {
        Self {
            customer_id: Some(customer_id.to_string()),
            reconciliation: None,
        }
    }
}

/// Summary of a batch ingestion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Events fully applied
    pub accepted: usize,

    /// Events rejected with no state change
    pub decode_errors: usize,

    /// Events applied without their amount
    pub data_errors: usize,

    /// One message per failed event
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.accepted + self.decode_errors + self.data_errors
    }

    fn record(&mut self, result: Result<IngestOutcome, IngestError>) {
        match result {
            Ok(_) => self.accepted += 1,
            Err(err) => {
                if err.is_data_error() {
                    self.data_errors += 1;
                } else {
                    self.decode_errors += 1;
                }
                self.errors.push(err.to_string());
            }
        }
    }
}

/// Event-reduction engine
#[derive(Debug, Default, Clone)]
pub struct Reducer {
    customers: CustomerLedger,
    orders: OrderLedger,
    watermark: Option<DateTime<Utc>>,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Apply one event.
    ///
    /// An `Err` is a data error: the visit was counted but the order amount
    /// could not be used.
    pub fn ingest(&mut self, record: &EventRecord) -> Result<IngestOutcome, IngestError> {
        // event time is valid by construction, so it always counts
        self.advance_watermark(record.event_time);

        match &record.payload {
            EventPayload::Customer { profile } => {
                self.customers.get_or_create(&record.key, record.event_time);
                if record.verb.is_new() {
                    self.customers
                        .apply_registration(&record.key, record.event_time, profile.clone());
                    tracing::debug!(customer_id = %record.key, "Customer registered");
                }
                Ok(IngestOutcome::visit(&record.key))
            }

            EventPayload::Order {
                customer_id,
                total_amount,
            } => {
                self.customers.get_or_create(customer_id, record.event_time);

                let Some(raw) = total_amount else {
                    return Ok(IngestOutcome::visit(customer_id));
                };
                let amount: Money = raw.parse().map_err(|e| {
                    tracing::warn!(
                        order_key = %record.key,
                        customer_id = %customer_id,
                        total_amount = %raw,
                        "Unusable order amount: {}", e
                    );
                    IngestError::invalid_amount(&record.key, e)
                })?;

                // expenditure is applied first so a rejected delta leaves the
                // order ledger untouched
                let assessed = self
                    .orders
                    .assess(&record.key, record.event_time, amount, &record.verb);
                if !assessed.is_stale() {
                    self.customers
                        .add_expenditure(customer_id, record.event_time, assessed.delta())
                        .map_err(|e| {
                            tracing::warn!(
                                order_key = %record.key,
                                customer_id = %customer_id,
                                delta = %assessed.delta(),
                                "Order amount not applied: {}", e
                            );
                            IngestError::invalid_amount(&record.key, e)
                        })?;
                }

                let reconciliation = self.orders.reconcile(
                    &record.key,
                    customer_id,
                    record.event_time,
                    amount,
                    &record.verb,
                );
                if reconciliation.is_stale() {
                    tracing::info!(
                        order_key = %record.key,
                        verb = %record.verb,
                        event_time = %record.event_time,
                        "Discarding stale order event"
                    );
                } else {
                    tracing::debug!(
                        order_key = %record.key,
                        customer_id = %customer_id,
                        delta = %reconciliation.delta(),
                        "Order reconciled"
                    );
                }

                Ok(IngestOutcome {
                    customer_id: Some(customer_id.clone()),
                    reconciliation: Some(reconciliation),
                })
            }

            EventPayload::SiteVisit { customer_id } | EventPayload::Image { customer_id } => {
                self.customers.get_or_create(customer_id, record.event_time);
                Ok(IngestOutcome::visit(customer_id))
            }

            EventPayload::Unrecognized { event_type } => {
                tracing::debug!(event_type = %event_type, key = %record.key, "Ignoring event type");
                Ok(IngestOutcome::untouched())
            }
        }
    }

    /// Decode and apply one JSON event. Decode failures change nothing.
    pub fn ingest_json(&mut self, input: &str) -> Result<IngestOutcome, IngestError> {
        let record = decode::decode_event(input).map_err(|e| {
            tracing::warn!("Rejected event: {}", e);
            e
        })?;
        self.ingest(&record)
    }

    /// Apply a sequence of decode results, counting failures without
    /// stopping.
    pub fn ingest_batch<I>(&mut self, events: I) -> BatchReport
    where
        I: IntoIterator<Item = Result<EventRecord, DecodeError>>,
    {
        let mut report = BatchReport::default();
        for event in events {
            let result = match event {
                Ok(record) => self.ingest(&record),
                Err(e) => {
                    tracing::warn!("Rejected event: {}", e);
                    Err(IngestError::from(e))
                }
            };
            report.record(result);
        }

        tracing::debug!(
            accepted = report.accepted,
            decode_errors = report.decode_errors,
            data_errors = report.data_errors,
            "Batch ingested"
        );
        report
    }

    fn advance_watermark(&mut self, event_time: DateTime<Utc>) {
        if self.watermark.map_or(true, |current| event_time > current) {
            self.watermark = Some(event_time);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Top `k` customers by LTV as of the watermark, highest first
    pub fn top_k(&self, k: usize) -> Vec<CustomerSummary> {
        match self.watermark {
            Some(now) => analytics::top_k(self.customers.iter(), now, k),
            None => Vec::new(),
        }
    }

    /// One customer's summary as of the watermark
    pub fn summary(&self, customer_id: &str) -> Option<CustomerSummary> {
        let now = self.watermark?;
        self.customers
            .get(customer_id)
            .map(|customer| analytics::summarize(customer, now))
    }

    pub fn customer(&self, customer_id: &str) -> Option<&CustomerAggregate> {
        self.customers.get(customer_id)
    }

    pub fn order(&self, order_key: &str) -> Option<&OrderRecord> {
        self.orders.get(order_key)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn watermark(&self) -> Option<DateTime<Utc>> {
        self.watermark
    }
}
