//! Symbol occurrence counts for a byte buffer.

use std::collections::BTreeMap;

/// Per-byte occurrence counts. Built once from an input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
  counts: [usize; 256],
  total: usize,
}

impl FrequencyTable {
  /// Count every byte of `data` in a single pass
  pub fn build(data: &[u8]) -> Self {
    let mut counts = [0usize; 256];
    for &byte in data.iter() {
      counts[byte as usize] += 1;
    }
    Self {
      counts,
      total: data.len(),
    }
  }

  /// Construct a table directly from (symbol, count) pairs. Repeated symbols
  /// have their counts summed.
  pub fn from_counts<I>(counts: I) -> Self
  where
    I: IntoIterator<Item = (u8, usize)>,
  {
    let mut table = [0usize; 256];
    let mut total = 0;
    for (sym, ct) in counts {
      table[sym as usize] += ct;
      total += ct;
    }
    Self {
      counts: table,
      total,
    }
  }

  pub fn get(&self, sym: u8) -> usize {
    self.counts[sym as usize]
  }

  /// Sum of all counts, i.e. the length of the counted input
  pub fn total(&self) -> usize {
    self.total
  }

  /// Number of distinct symbols that occurred at least once
  pub fn distinct(&self) -> usize {
    self.counts.iter().filter(|&&c| c > 0).count()
  }

  pub fn is_empty(&self) -> bool {
    self.total == 0
  }

  /// Iterate over present symbols in ascending symbol order
  pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
    self
      .counts
      .iter()
      .enumerate()
      .filter(|&(_, &c)| c > 0)
      .map(|(sym, &c)| (sym as u8, c))
  }

  pub fn to_map(&self) -> BTreeMap<u8, usize> {
    self.iter().collect()
  }

  /// Shannon entropy of the distribution in bits per symbol. Zero for an
  /// empty table.
  pub fn entropy(&self) -> f64 {
    if self.total == 0 {
      return 0.0;
    }
    let total = self.total as f64;
    self
      .iter()
      .map(|(_, c)| {
        let p = c as f64 / total;
        -p * p.log2()
      })
      .sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn freqcount_1() {
    let freqs = FrequencyTable::build(b"aaaabbcc");
    let expect: BTreeMap<u8, usize> = vec![(b'a', 4), (b'b', 2), (b'c', 2)]
      .into_iter()
      .collect();
    assert_eq!(freqs.to_map(), expect);
    assert_eq!(freqs.total(), 8);
    assert_eq!(freqs.distinct(), 3);
  }

  #[test]
  fn empty_input_has_no_symbols() {
    let freqs = FrequencyTable::build(b"");
    assert!(freqs.is_empty());
    assert_eq!(freqs.iter().count(), 0);
    assert_eq!(freqs.entropy(), 0.0);
  }

  #[test]
  fn from_counts_matches_build() {
    let built = FrequencyTable::build(b"aaabbbbcc");
    let given = FrequencyTable::from_counts(vec![(b'c', 2), (b'b', 4), (b'a', 3)]);
    assert_eq!(built, given);
  }

  #[test]
  fn entropy_of_uniform_distribution() {
    let freqs = FrequencyTable::build(b"abcdabcd");
    assert!((freqs.entropy() - 2.0).abs() < 1e-12);
    let single = FrequencyTable::build(b"zzzz");
    assert_eq!(single.entropy(), 0.0);
  }
}
