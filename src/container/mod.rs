use crate::codec::decoder::DecodeError;

use bitstream_io::{BigEndian, ByteRead, ByteReader, ByteWrite, ByteWriter};

use std::convert::TryFrom;
use std::fmt::{self, Write};
use std::io::{self, Write as IOWrite};

/* Container layout. Integers are unsigned big-endian.

   +---+---+---+---+---+---+---+---+===========+=============+
   |    PADDING    |   TABLE_LEN   |...TABLE...|...PAYLOAD...|
   +---+---+---+---+---+---+---+---+===========+=============+

PADDING   number of zero bits (0-7) appended to the last payload byte
TABLE_LEN length in bytes of the serialized code table
TABLE     JSON object mapping symbol -> code string
PAYLOAD   MSB-first packed codes, running to the end of the container
*/

pub const HEADER_LEN: usize = 8;
pub const MAX_PADDING: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
  padding: u8,
  table: Vec<u8>,
  payload: Vec<u8>,
}

impl Container {
  pub fn new(padding: u8, table: Vec<u8>, payload: Vec<u8>) -> Self {
    Self {
      padding,
      table,
      payload,
    }
  }

  /// Split a container into its parts. Only the framing is checked here: the
  /// table bytes are not parsed, and a padding count in range is accepted even
  /// when the payload is too short to hold it, since whether that is a
  /// truncated payload depends on the table.
  pub fn new_from_container_data(data: &[u8]) -> Result<Self, DecodeError> {
    if data.len() < HEADER_LEN {
      return Err(DecodeError::MalformedHeader(format!(
        "container is {} bytes, but the header alone needs {}",
        data.len(),
        HEADER_LEN
      )));
    }

    let mut header = ByteReader::endian(&data[..HEADER_LEN], BigEndian);
    let padding = header.read::<u32>()?;
    let table_len = header.read::<u32>()?;

    let rest = &data[HEADER_LEN..];
    let table_len = match usize::try_from(table_len) {
      Ok(n) if n <= rest.len() => n,
      _ => {
        return Err(DecodeError::MalformedHeader(format!(
          "code table claims {} bytes, but only {} follow the header",
          table_len,
          rest.len()
        )))
      }
    };
    let (table, payload) = rest.split_at(table_len);

    if padding > MAX_PADDING {
      return Err(DecodeError::InvalidPadding(padding, payload.len()));
    }

    Ok(Self {
      padding: padding as u8,
      table: table.to_vec(),
      payload: payload.to_vec(),
    })
  }

  pub fn write_to<W: IOWrite>(&self, out: W) -> io::Result<W> {
    let table_len = u32::try_from(self.table.len()).map_err(|_| {
      io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("Code table of {} bytes does not fit the header", self.table.len()),
      )
    })?;

    let mut bytesout: ByteWriter<W, BigEndian> = ByteWriter::new(out);
    bytesout.write(u32::from(self.padding))?;
    bytesout.write(table_len)?;
    bytesout.write_bytes(&self.table[..])?;
    bytesout.write_bytes(&self.payload[..])?;
    Ok(bytesout.into_writer())
  }

  pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
    let buf = Vec::with_capacity(HEADER_LEN + self.table.len() + self.payload.len());
    self.write_to(buf)
  }

  pub fn padding(&self) -> u8 {
    self.padding
  }

  pub fn table_bytes(&self) -> &[u8] {
    &self.table[..]
  }

  pub fn payload(&self) -> &[u8] {
    &self.payload[..]
  }

  /// Number of meaningful payload bits, i.e. with padding removed. Zero when
  /// the padding claims more bits than the payload has.
  pub fn payload_bits(&self) -> usize {
    (self.payload.len() * 8).saturating_sub(self.padding as usize)
  }

  /// True when the padding count exceeds the payload's size in bits
  pub fn padding_overruns(&self) -> bool {
    self.padding as usize > self.payload.len() * 8
  }

  /// Total size of the container once written
  pub fn encoded_len(&self) -> usize {
    HEADER_LEN + self.table.len() + self.payload.len()
  }

  pub fn fmt_header<W: Write>(&self, f: &mut W) -> fmt::Result {
    write!(
      f,
      r#"Huffman container:
   +---+---+---+---+---+---+---+---+
   |    PADDING    |   TABLE_LEN   |
   +---+---+---+---+---+---+---+---+
   {:^15} {:^15}
"#,
      self.padding,
      self.table.len()
    )?;
    writeln!(f, "Payload: {} bytes", self.payload.len())?;
    writeln!(f, "Payload bits: {}", self.payload_bits())
  }
}

impl fmt::Display for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.fmt_header(f)
  }
}
