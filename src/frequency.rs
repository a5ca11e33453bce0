//! Symbol model: per-unit occurrence counts.

use std::collections::HashMap;

/// One symbol of the coded alphabet: a char's scalar value, or several
/// ASCII chars folded together by [`crate::chunking`].
pub type Unit = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub unit: Unit,
    pub count: u64,
}

/// Unit counts kept in first-occurrence order.
///
/// Order matters: the tree builder breaks weight ties by position, so a
/// table rebuilt from a key must list its entries exactly as the encoder saw
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    index: HashMap<Unit, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: &[Unit]) -> Self {
        let mut table = Self::new();
        for &unit in units {
            table.increment(unit);
        }
        table
    }

    pub fn increment(&mut self, unit: Unit) {
        match self.index.get(&unit) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(unit, self.entries.len());
                self.entries.push(FrequencyEntry { unit, count: 1 });
            }
        }
    }

    /// Appends an entry with an explicit count. Returns `false` if the unit
    /// is already present or the count is zero.
    pub fn insert(&mut self, unit: Unit, count: u64) -> bool {
        if count == 0 || self.index.contains_key(&unit) {
            return false;
        }
        self.index.insert(unit, self.entries.len());
        self.entries.push(FrequencyEntry { unit, count });
        true
    }

    pub fn get(&self, unit: Unit) -> Option<u64> {
        self.index.get(&unit).map(|&i| self.entries[i].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of units counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }
}
