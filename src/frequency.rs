use std::collections::BTreeMap;

use log::{debug, trace};

/// Occurrence count of every symbol of a text, kept in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        debug!("Counted {} unique symbols", counts.len());
        FrequencyTable { counts }
    }

    /// Builds a table from already known counts. Zero counts are dropped so
    /// that absent symbols never appear in the table.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let counts = counts
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .collect();
        FrequencyTable { counts }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Total number of symbols in the counted text.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Shannon entropy in bits per symbol, the lower bound for any prefix code.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total_f = total as f64;

        let entropy: f64 = self
            .counts
            .values()
            .map(|&count| {
                let p = count as f64 / total_f;
                -p * p.log2()
            })
            .sum();

        trace!(
            "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
            entropy, total
        );
        entropy
    }
}
