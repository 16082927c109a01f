//! Ledger module
//!
//! Keyed stores owning all customer and order state. Callers mutate state
//! only through the ledger methods, which enforce the reconciliation rules.

mod customers;
mod orders;

pub use customers::CustomerLedger;
pub use orders::{OrderLedger, Reconciliation};
