//! Lifetime value
//!
//! `ltv = expenditure * 7 / age_days * 52 * 20`: the observed weekly spend
//! rate, annualized and projected over a twenty year horizon.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::aggregate::CustomerAggregate;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const DAYS_PER_WEEK: i64 = 7;
const WEEKS_PER_YEAR: i64 = 52;
const PROJECTION_YEARS: i64 = 20;

/// Whole days between the customer's start date and `reference`, plus one.
/// Never zero, so a same-day customer has a valid rate.
pub fn age_days(customer: &CustomerAggregate, reference: DateTime<Utc>) -> i64 {
    let elapsed = (reference - customer.start_date()).num_milliseconds().abs();
    elapsed / MILLIS_PER_DAY + 1
}

/// Compute a customer's LTV as of `reference`.
///
/// Saturates at `Decimal::MAX` (or `MIN`) when the projection does not fit.
pub fn compute(customer: &CustomerAggregate, reference: DateTime<Utc>) -> Decimal {
    let expenditure = customer.expenditure();
    let days = Decimal::from(age_days(customer, reference));

    expenditure
        .checked_mul(Decimal::from(DAYS_PER_WEEK))
        .and_then(|spend| spend.checked_div(days))
        .and_then(|rate| rate.checked_mul(Decimal::from(WEEKS_PER_YEAR * PROJECTION_YEARS)))
        .unwrap_or(if expenditure.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}
