//! Delivery verification over recorded consumer sequences
//!
//! Checks that the consumed tags are exactly the accepted tags (no duplicates,
//! nothing missing, nothing invented) and that each producer's items reach
//! every consumer in the order they were pushed.

use crate::pipeline::item::Item;
use crate::pipeline::task::{ConsumerReport, ProducerReport};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Items delivered more than once (extra deliveries counted)
    pub duplicates: u64,
    /// Accepted items never delivered
    pub missing: u64,
    /// Delivered items that no producer had accepted
    pub unexpected: u64,
    /// Places where a consumer saw a producer's items out of push order
    pub order_violations: u64,
}

impl Verification {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    /// Compare what consumers received against what producers got accepted
    ///
    /// Returns `None` unless every consumer recorded its items. A producer's
    /// accepted items are always the prefix `0..accepted` of its sequence,
    /// because once a push is dropped the queue is stopped for good.
    pub fn compute(producers: &[ProducerReport], consumers: &[ConsumerReport]) -> Option<Self> {
        let accepted: HashMap<usize, u64> = producers.iter().map(|p| (p.id, p.accepted)).collect();
        let is_expected = |item: &Item| {
            accepted
                .get(&item.producer)
                .is_some_and(|count| item.seq < *count)
        };

        let mut result = Self::default();
        let mut seen: HashSet<Item> = HashSet::new();

        for consumer in consumers {
            let received = consumer.received.as_ref()?;
            let mut last_seq: HashMap<usize, u64> = HashMap::new();

            for item in received {
                if !seen.insert(*item) {
                    result.duplicates += 1;
                }
                if !is_expected(item) {
                    result.unexpected += 1;
                }
                if let Some(previous) = last_seq.insert(item.producer, item.seq) {
                    if item.seq <= previous {
                        result.order_violations += 1;
                    }
                }
            }
        }

        let expected_total: u64 = accepted.values().sum();
        let delivered_expected = seen.iter().filter(|item| is_expected(*item)).count() as u64;
        result.missing = expected_total - delivered_expected;

        Some(result)
    }
}
