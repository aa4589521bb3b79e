use crate::bitstream::BitWriter;
use crate::container::Container;
use crate::huff_tree::{CodeTable, CodeTableError, FrequencyTable, HuffTree};

use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
  #[error("Symbol {0} has no code in the table")]
  MissingCode(u8),
  #[error("Could not serialize the code table: {0}")]
  TableError(#[from] CodeTableError),
  #[error("Other IO Error: {0}")]
  IOError(#[from] std::io::Error),
}

/// Packs bytes into a payload using a fixed code table.
#[derive(Debug, Clone)]
pub struct Encoder {
  table: CodeTable,
}

impl Encoder {
  pub fn new(table: CodeTable) -> Self {
    Self { table }
  }

  /// Count `data`, build its tree and take the resulting code table
  pub fn from_data(data: &[u8]) -> Self {
    let freqs = FrequencyTable::build(data);
    debug!(
      "Counted {} bytes, {} distinct symbols",
      freqs.total(),
      freqs.distinct()
    );
    let tree = HuffTree::build(&freqs);
    Self::new(CodeTable::from_tree(&tree))
  }

  pub fn table(&self) -> &CodeTable {
    &self.table
  }

  /// Feed the code of every byte in `data` through a bit writer. Returns the
  /// packed bytes and the number of padding bits in the final byte.
  pub fn encode_payload(&self, data: &[u8]) -> Result<(Vec<u8>, u8), EncodeError> {
    let mut bit_sink = BitWriter::new();
    for &byte in data.iter() {
      let code = self.table.get(byte).ok_or(EncodeError::MissingCode(byte))?;
      bit_sink.write_bits(code)?;
    }
    debug!("Encoded {} bytes into {} bits", data.len(), bit_sink.bit_count());
    Ok(bit_sink.finish()?)
  }

  /// Encode `data` and wrap it together with the serialized table
  pub fn encode(&self, data: &[u8]) -> Result<Container, EncodeError> {
    let (payload, padding) = self.encode_payload(data)?;
    let table = self.table.serialize()?;
    debug!(
      "Container: {} padding bits, {} table bytes, {} payload bytes",
      padding,
      table.len(),
      payload.len()
    );
    Ok(Container::new(padding, table, payload))
  }
}

/// Compress a whole buffer into a self-describing container
pub fn compress(data: &[u8]) -> Result<Vec<u8>, EncodeError> {
  let container = Encoder::from_data(data).encode(data)?;
  Ok(container.to_bytes()?)
}
