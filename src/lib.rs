//! customer_ltv Library
//!
//! Reduces out-of-order customer, order, visit and image events into
//! per-customer aggregates and ranks customers by projected lifetime value.

pub mod aggregate;
pub mod analytics;
pub mod api;
pub mod config;
pub mod decode;
pub mod domain;
pub mod ledger;
pub mod reducer;
pub mod replay;

mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use domain::{DecodeError, EventPayload, EventRecord, IngestError, Money, Verb};
pub use reducer::{BatchReport, IngestOutcome, Reducer};
