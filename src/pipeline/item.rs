//! Producer-tagged payload carried through the queue

use serde::Serialize;
use std::fmt;

/// A value tagged with the producer that created it and its position in that
/// producer's sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Item {
    pub producer: usize,
    pub seq: u64,
}

impl Item {
    pub fn new(producer: usize, seq: u64) -> Self {
        Self { producer, seq }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}#{}", self.producer, self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_display() {
        assert_eq!(Item::new(3, 42).to_string(), "p3#42");
    }

    #[test]
    fn test_items_order_by_producer_then_sequence() {
        let mut items = vec![Item::new(1, 0), Item::new(0, 5), Item::new(0, 1)];
        items.sort();
        assert_eq!(items, vec![Item::new(0, 1), Item::new(0, 5), Item::new(1, 0)]);
    }
}
