use std::collections::HashMap;

use crate::record::{value_key, CaseRecord, KeyPath};

/// An occurrence count per distinct key, ordered by first appearance in
/// the input. Chart segment order (and therefore palette assignment)
/// follows this order, so it must stay deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn increment(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }
}

/// Count occurrences of the value at `path` across `records`. Records
/// where the path resolves to nothing (or `null`) are skipped silently.
/// There is no limit on distinct keys; trimming long tails is a
/// presentation concern, not this function's.
pub fn tally_by<'a, I>(records: I, path: &KeyPath) -> Tally
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut tally = Tally::default();
    for record in records {
        if let Some(key) = record.resolve(path).and_then(value_key) {
            tally.increment(key);
        }
    }
    tally
}
