//! Domain module
//!
//! Core domain types: event records, money and ingestion errors.

pub mod amount;
pub mod error;
pub mod events;

pub use amount::{AmountError, Money, MAX_AMOUNT};
pub use error::{DecodeError, IngestError};
pub use events::{CustomerProfile, EventPayload, EventRecord, Verb};
