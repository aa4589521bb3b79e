/*! Bit-level sink and source over in-memory byte buffers.

Bits are packed most-significant-bit first, so the first bit written lands in
bit 7 of byte 0. The writer remembers how many bits it has been handed, which
is what lets it report how much zero padding `finish` had to add. */

use bit_vec::BitVec;
use bitstream_io::{BigEndian, BitRead, BitWrite};

use std::io;

/// Appends bits to a growing byte buffer.
pub struct BitWriter {
  sink: bitstream_io::BitWriter<Vec<u8>, BigEndian>,
  nbits: usize,
}

impl BitWriter {
  pub fn new() -> Self {
    Self {
      sink: bitstream_io::BitWriter::endian(Vec::new(), BigEndian),
      nbits: 0,
    }
  }

  /// Append a sequence of 0-1 bits. Any nonzero value is written as a 1.
  pub fn write_bits(&mut self, bits: &[u8]) -> io::Result<()> {
    for b in bits.iter() {
      self.sink.write_bit(*b != 0)?;
    }
    self.nbits += bits.len();
    Ok(())
  }

  /// Number of bits written so far, not counting padding
  pub fn bit_count(&self) -> usize {
    self.nbits
  }

  /// Flush the final partial byte with zero bits. Returns the packed bytes
  /// and the number of padding bits (0-7) that were added.
  pub fn finish(mut self) -> io::Result<(Vec<u8>, u8)> {
    let padding = ((8 - self.nbits % 8) % 8) as u8;
    // Partial bytes are dropped by into_writer unless we align first
    self.sink.byte_align()?;
    Ok((self.sink.into_writer(), padding))
  }
}

impl Default for BitWriter {
  fn default() -> Self {
    Self::new()
  }
}

/// Exposes every bit of a byte buffer, trailing padding included.
pub struct BitReader<'a> {
  src: bitstream_io::BitReader<&'a [u8], BigEndian>,
  nbits: usize,
}

impl<'a> BitReader<'a> {
  pub fn from_bytes(bytes: &'a [u8]) -> Self {
    Self {
      src: bitstream_io::BitReader::endian(bytes, BigEndian),
      nbits: bytes.len() * 8,
    }
  }

  /// Read every remaining bit. The caller strips padding.
  pub fn read_all_bits(mut self) -> io::Result<BitVec> {
    let mut bits = BitVec::with_capacity(self.nbits);
    for _ in 0..self.nbits {
      bits.push(self.src.read_bit()?);
    }
    Ok(bits)
  }
}
