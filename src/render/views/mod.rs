//! View renderers: each owns one visual surface and derives it purely
//! from the filtered snapshot.

pub mod charts;
pub mod controls;
pub mod heat;
pub mod indicators;
pub mod list;
pub mod markers;

use crate::prelude::HashMap;

/// Category counter preserving first-seen order, matching how the
/// aggregate charts list their buckets.
#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryCounts {
    order: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<f64>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&i) => self.counts[i] += amount,
            None => {
                self.index.insert(category.to_string(), self.order.len());
                self.order.push(category.to_string());
                self.counts.push(amount);
            }
        }
    }

    pub fn bump(&mut self, category: &str) {
        self.add(category, 1.0);
    }

    /// (category, total) pairs in first-seen order
    pub fn into_pairs(self) -> Vec<(String, f64)> {
        self.order.into_iter().zip(self.counts).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut counts = CategoryCounts::new();
        counts.bump("b");
        counts.bump("a");
        counts.bump("b");
        counts.add("c", 2.5);

        assert_eq!(
            counts.into_pairs(),
            vec![
                ("b".to_string(), 2.0),
                ("a".to_string(), 1.0),
                ("c".to_string(), 2.5)
            ]
        );
    }
}
