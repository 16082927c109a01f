//! Top-K selection
//!
//! Bounded min-heap over LTV: push every candidate, evict the smallest
//! whenever the heap grows past `k`. O(N log K) for N customers.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::CustomerAggregate;

use super::ltv;

/// Ranked view of one customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub visits: u64,
    pub expenditure: Decimal,
    pub ltv: Decimal,
}

impl CustomerSummary {
    fn new(customer: &CustomerAggregate, ltv: Decimal) -> Self {
        Self {
            customer_id: customer.customer_id().to_string(),
            last_name: customer.last_name().map(str::to_string),
            visits: customer.visits(),
            expenditure: customer.expenditure(),
            ltv,
        }
    }
}

/// Summarize a single customer as of `reference`.
pub fn summarize(customer: &CustomerAggregate, reference: DateTime<Utc>) -> CustomerSummary {
    CustomerSummary::new(customer, ltv::compute(customer, reference))
}

/// Heap entry borrowing the aggregate it ranks
struct Candidate<'a> {
    ltv: Decimal,
    customer: &'a CustomerAggregate,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // equal LTV: the smaller customer id ranks higher
        self.ltv
            .cmp(&other.ltv)
            .then_with(|| other.customer.customer_id().cmp(self.customer.customer_id()))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

/// Return the `k` highest-LTV customers as of `reference`, in descending
/// LTV order. Length is `min(k, number of customers)`.
pub fn top_k<'a, I>(customers: I, reference: DateTime<Utc>, k: usize) -> Vec<CustomerSummary>
where
    I: IntoIterator<Item = &'a CustomerAggregate>,
{
    if k == 0 {
        return Vec::new();
    }

    let customers = customers.into_iter();
    // never reserve more than the population can fill
    let capacity = k.min(customers.size_hint().0).saturating_add(1);
    let mut heap: BinaryHeap<Reverse<Candidate<'a>>> = BinaryHeap::with_capacity(capacity);
    for customer in customers {
        heap.push(Reverse(Candidate {
            ltv: ltv::compute(customer, reference),
            customer,
        }));
        if heap.len() > k {
            heap.pop();
        }
    }

    // ascending by Reverse == descending by LTV
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(candidate)| CustomerSummary::new(candidate.customer, candidate.ltv))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn customer(id: &str, expenditure: Decimal) -> CustomerAggregate {
        let mut customer = CustomerAggregate::new(id, at("2017-01-06T00:00:00Z"));
        customer.add_expenditure(expenditure).unwrap();
        customer
    }

    #[test]
    fn test_top_k_orders_descending() {
        let customers = vec![
            customer("a", dec!(5)),
            customer("b", dec!(50)),
            customer("c", dec!(20)),
            customer("d", dec!(1)),
        ];

        let top = top_k(&customers, at("2017-01-06T12:00:00Z"), 2);

        let ids: Vec<&str> = top.iter().map(|s| s.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(top[0].ltv > top[1].ltv);
    }

    #[test]
    fn test_top_k_bounded_by_population() {
        let customers = vec![customer("a", dec!(5)), customer("b", dec!(6))];
        let top = top_k(&customers, at("2017-01-06T12:00:00Z"), 10);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_top_k_zero() {
        let customers = vec![customer("a", dec!(5))];
        assert!(top_k(&customers, at("2017-01-06T12:00:00Z"), 0).is_empty());
    }

    #[test]
    fn test_top_k_excluded_are_not_larger() {
        let reference = at("2017-01-09T00:00:00Z");
        let customers: Vec<CustomerAggregate> = (0..50)
            .map(|i| customer(&format!("c{i:02}"), Decimal::from((i * 37) % 101)))
            .collect();

        let top = top_k(&customers, reference, 5);
        assert_eq!(top.len(), 5);

        let floor = top.iter().map(|s| s.ltv).min().unwrap();
        let chosen: Vec<&str> = top.iter().map(|s| s.customer_id.as_str()).collect();
        for c in customers.iter().filter(|c| !chosen.contains(&c.customer_id())) {
            assert!(ltv::compute(c, reference) <= floor);
        }
    }

    #[test]
    fn test_top_k_tie_break_by_id() {
        let customers = vec![
            customer("z", dec!(10)),
            customer("m", dec!(10)),
            customer("a", dec!(10)),
        ];
        let top = top_k(&customers, at("2017-01-06T12:00:00Z"), 2);
        let ids: Vec<&str> = top.iter().map(|s| s.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "m"]);
    }

    #[test]
    fn test_summarize() {
        let c = customer("a", dec!(10));
        let summary = summarize(&c, at("2017-01-06T12:00:00Z"));
        assert_eq!(summary.customer_id, "a");
        assert_eq!(summary.visits, 1);
        assert_eq!(summary.ltv, dec!(72800));
        assert!(summary.last_name.is_none());
    }

    #[test]
    fn test_top_k_unbounded_k_returns_everyone() {
        let customers = vec![
            customer("a", dec!(5)),
            customer("b", dec!(50)),
            customer("c", dec!(20)),
        ];
        let top = top_k(&customers, at("2017-01-06T12:00:00Z"), usize::MAX);
        let ids: Vec<&str> = top.iter().map(|s| s.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let none: Vec<CustomerAggregate> = Vec::new();
        assert!(top_k(&none, at("2017-01-06T12:00:00Z"), usize::MAX).is_empty());
    }

    #[test]
    fn test_top_k_saturated_ltv_ranks_first() {
        let customers = vec![customer("a", dec!(5)), customer("huge", Decimal::MAX)];
        let top = top_k(&customers, at("2017-01-06T12:00:00Z"), 2);
        assert_eq!(top[0].customer_id, "huge");
        assert_eq!(top[0].ltv, Decimal::MAX);
        assert_eq!(top[1].customer_id, "a");
    }
}
