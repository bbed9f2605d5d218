//! Character-frequency histograms.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Count of each non-whitespace character of a text, case-sensitive.
///
/// Absent characters have count 0 and zero counts are never stored, so the
/// histogram of an empty or whitespace-only text is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "BTreeMap<char, u64>")]
pub struct FrequencyHistogram {
    counts: BTreeMap<char, u64>,
}

impl FrequencyHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the histogram of `text`, skipping whitespace.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            *counts.entry(c).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Build the histogram of an optional value; a missing value is empty.
    pub fn from_optional(text: Option<&str>) -> Self {
        text.map(Self::from_text).unwrap_or_default()
    }

    pub fn count(&self, c: char) -> u64 {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Sum of squared counts.
    pub fn squared_norm(&self) -> u128 {
        self.counts
            .values()
            .map(|&n| u128::from(n) * u128::from(n))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// Add every count of `other` into `self`.
    pub fn merge(&mut self, other: &FrequencyHistogram) {
        for (&c, &n) in &other.counts {
            *self.counts.entry(c).or_insert(0) += n;
        }
    }

    /// Add `n` occurrences of `c`. Adding zero is a no-op.
    pub fn add(&mut self, c: char, n: u64) {
        if n > 0 {
            *self.counts.entry(c).or_insert(0) += n;
        }
    }
}

impl FromIterator<(char, u64)> for FrequencyHistogram {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (c, n) in iter {
            histogram.add(c, n);
        }
        histogram
    }
}

impl From<BTreeMap<char, u64>> for FrequencyHistogram {
    fn from(counts: BTreeMap<char, u64>) -> Self {
        counts.into_iter().collect()
    }
}

impl Serialize for FrequencyHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a FrequencyHistogram {
    type Item = (&'a char, &'a u64);
    type IntoIter = btree_map::Iter<'a, char, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl fmt::Display for FrequencyHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (c, n)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}:{n}")?;
        }
        f.write_str("}")
    }
}
