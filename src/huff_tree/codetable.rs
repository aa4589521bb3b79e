/*! Mapping from symbols to their bit codes, and its on-disk form.

The serialized form is a JSON object from decimal symbol to a string of
`'0'`/`'1'` characters, e.g. `{"97":"11","98":"0","99":"10"}`. Codes are kept
as explicit bit strings rather than integers, since `"01"` and `"1"` are
different codes. */

use super::HuffTree;

use log::debug;
use thiserror::Error;

use std::collections::BTreeMap;

#[derive(Error, Debug)]
pub enum CodeTableError {
  #[error("Code table is not a JSON object of strings: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Code table key {0:?} is not a symbol in 0-255")]
  InvalidSymbol(String),
  #[error("Code for symbol {0} contains {1:?}, which is not a bit")]
  InvalidBit(u8, String),
  #[error("Symbol {0} has a zero-length code")]
  EmptyCode(u8),
  #[error("Code for symbol {0} is a prefix of (or equal to) the code for symbol {1}")]
  NotPrefixFree(u8, u8),
  #[error("Code table is empty but the payload holds {0} bits")]
  EmptyTable(usize),
}

/// A validated, prefix-free set of codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
  codes: BTreeMap<u8, Vec<u8>>,
}

impl CodeTable {
  /// Read the codes off a finished tree
  pub fn from_tree(tree: &HuffTree) -> Self {
    let codes: BTreeMap<u8, Vec<u8>> = tree.codes().into_iter().collect();
    debug!(
      "Assigned {} codes, longest is {} bits",
      codes.len(),
      codes.values().map(Vec::len).max().unwrap_or(0)
    );
    Self { codes }
  }

  /// Build a table from explicit (symbol, 0-1 bits) pairs, rejecting any set
  /// of codes that could not be decoded unambiguously.
  pub fn from_codes<I>(dict: I) -> Result<Self, CodeTableError>
  where
    I: IntoIterator<Item = (u8, Vec<u8>)>,
  {
    let mut codes = BTreeMap::new();
    for (sym, code) in dict {
      if let Some(b) = code.iter().find(|&&b| b > 1) {
        return Err(CodeTableError::InvalidBit(sym, b.to_string()));
      }
      codes.insert(sym, code);
    }
    let table = Self { codes };
    table.validate()?;
    Ok(table)
  }

  pub fn get(&self, sym: u8) -> Option<&[u8]> {
    self.codes.get(&sym).map(|c| &c[..])
  }

  /// Iterate over (symbol, code) in ascending symbol order
  pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> + '_ {
    self.codes.iter().map(|(s, c)| (*s, &c[..]))
  }

  pub fn len(&self) -> usize {
    self.codes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.codes.is_empty()
  }

  pub fn max_code_len(&self) -> usize {
    self.codes.values().map(Vec::len).max().unwrap_or(0)
  }

  /// The codes rendered as strings of '0' and '1'
  pub fn code_strings(&self) -> BTreeMap<u8, String> {
    self
      .codes
      .iter()
      .map(|(sym, code)| {
        let s = code.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect();
        (*sym, s)
      })
      .collect()
  }

  /// Serialize to the JSON wire form, keys in ascending symbol order
  pub fn serialize(&self) -> Result<Vec<u8>, CodeTableError> {
    Ok(serde_json::to_vec(&self.code_strings())?)
  }

  /// Strictly parse the JSON wire form. Keys must be canonical decimal
  /// symbols and values non-empty strings of '0'/'1' forming a prefix-free
  /// code.
  pub fn deserialize(bytes: &[u8]) -> Result<Self, CodeTableError> {
    let raw: BTreeMap<String, String> = serde_json::from_slice(bytes)?;

    let mut codes = BTreeMap::new();
    for (key, val) in raw.into_iter() {
      let sym = match key.parse::<u8>() {
        Ok(s) if s.to_string() == key => s,
        _ => return Err(CodeTableError::InvalidSymbol(key)),
      };
      let mut code = Vec::with_capacity(val.len());
      for ch in val.chars() {
        match ch {
          '0' => code.push(0u8),
          '1' => code.push(1u8),
          x => return Err(CodeTableError::InvalidBit(sym, x.to_string())),
        }
      }
      codes.insert(sym, code);
    }

    let table = Self { codes };
    table.validate()?;
    Ok(table)
  }

  /// Check that no code is empty and no code is a prefix of another.
  fn validate(&self) -> Result<(), CodeTableError> {
    if let Some((sym, _)) = self.codes.iter().find(|(_, c)| c.is_empty()) {
      return Err(CodeTableError::EmptyCode(*sym));
    }

    // In lexicographic order, a code that prefixes any other code also
    // prefixes its immediate successor.
    let mut by_code: Vec<(&Vec<u8>, u8)> = self.codes.iter().map(|(s, c)| (c, *s)).collect();
    by_code.sort();
    for pair in by_code.windows(2) {
      let (short, s1) = pair[0];
      let (long, s2) = pair[1];
      if long.starts_with(short) {
        return Err(CodeTableError::NotPrefixFree(s1, s2));
      }
    }
    Ok(())
  }
}
