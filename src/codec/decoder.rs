use crate::bitstream::BitReader;
use crate::container::Container;
use crate::huff_tree::{CodeTable, CodeTableError};

use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
  #[error("Malformed header: {0}")]
  MalformedHeader(String),
  #[error("Invalid code table: {0}")]
  InvalidCodeTable(#[from] CodeTableError),
  #[error("Padding count {0} is invalid for a payload of {1} bytes")]
  InvalidPadding(u32, usize),
  #[error("Payload bits from offset {0} onward do not resolve to a symbol")]
  UnresolvableBits(usize),
  #[error("Other IO error: {0}")]
  IOError(#[from] std::io::Error),
}

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
  children: [Option<usize>; 2],
  sym: Option<u8>,
}

/// A binary trie over the codes of a table. Leaves carry symbols; following
/// one bit per step from the root reaches a leaf exactly when a whole code
/// has been read.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
  nodes: Vec<TrieNode>,
}

impl DecodeTrie {
  /// Tables are prefix-free by construction, so every code ends on a fresh
  /// leaf.
  pub fn new(table: &CodeTable) -> Self {
    let mut nodes = vec![TrieNode::default()];
    for (sym, code) in table.iter() {
      let mut cur = ROOT;
      for &bit in code.iter() {
        let b = bit as usize;
        cur = match nodes[cur].children[b] {
          Some(next) => next,
          None => {
            nodes.push(TrieNode::default());
            let next = nodes.len() - 1;
            nodes[cur].children[b] = Some(next);
            next
          }
        };
      }
      nodes[cur].sym = Some(sym);
    }
    Self { nodes }
  }

  fn child(&self, node: usize, bit: bool) -> Option<usize> {
    self.nodes[node].children[bit as usize]
  }

  fn symbol(&self, node: usize) -> Option<u8> {
    self.nodes[node].sym
  }
}

/// Turns a payload back into bytes using a fixed code table.
#[derive(Debug, Clone)]
pub struct Decoder {
  trie: DecodeTrie,
}

impl Decoder {
  pub fn new(table: &CodeTable) -> Self {
    Self {
      trie: DecodeTrie::new(table),
    }
  }

  /// Greedily decode a bit sequence from the front. Every bit must be used:
  /// running off the trie, or ending partway through a code, is an error.
  pub fn decode_bits<I>(&self, bits: I) -> Result<Vec<u8>, DecodeError>
  where
    I: IntoIterator<Item = bool>,
  {
    let mut decoded = Vec::new();
    let mut node = ROOT;
    let mut code_start = 0usize;

    for (i, bit) in bits.into_iter().enumerate() {
      node = self
        .trie
        .child(node, bit)
        .ok_or(DecodeError::UnresolvableBits(code_start))?;
      if let Some(sym) = self.trie.symbol(node) {
        decoded.push(sym);
        node = ROOT;
        code_start = i + 1;
      }
    }

    if node != ROOT {
      return Err(DecodeError::UnresolvableBits(code_start));
    }
    Ok(decoded)
  }

  /// Decode the payload of a container whose table has already been parsed
  pub fn decode_payload(&self, container: &Container) -> Result<Vec<u8>, DecodeError> {
    let mut bits = BitReader::from_bytes(container.payload()).read_all_bits()?;
    bits.truncate(container.payload_bits());
    self.decode_bits(bits.iter())
  }
}

/// Parse a container and recover the original bytes
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
  let container = Container::new_from_container_data(data)?;
  let table = CodeTable::deserialize(container.table_bytes())?;
  debug!(
    "Read code table with {} symbols; {} payload bits after dropping {} padding bits",
    table.len(),
    container.payload_bits(),
    container.padding()
  );

  if table.is_empty() {
    if container.padding_overruns() {
      return Err(DecodeError::InvalidPadding(
        u32::from(container.padding()),
        container.payload().len(),
      ));
    }
    if container.payload_bits() == 0 {
      return Ok(Vec::new());
    }
    return Err(CodeTableError::EmptyTable(container.payload_bits()).into());
  }

  // A non-empty table means at least one symbol was encoded
  if container.payload_bits() == 0 {
    return Err(DecodeError::UnresolvableBits(0));
  }

  let decoded = Decoder::new(&table).decode_payload(&container)?;
  debug!("Decoded {} bytes", decoded.len());
  Ok(decoded)
}
