//! Analytics module
//!
//! Derived metrics computed on demand from the customer ledger.

pub mod ltv;
pub mod top_k;

pub use top_k::{summarize, top_k, CustomerSummary};
