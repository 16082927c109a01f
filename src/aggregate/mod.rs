//! Aggregate module
//!
//! Entity state derived from the event stream.

pub mod customer;
pub mod order;

pub use customer::CustomerAggregate;
pub use order::OrderRecord;
