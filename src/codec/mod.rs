/*! Whole-buffer Huffman compression.

Compression counts the input, builds a tree and code table from the counts,
and packs the input through the table. The container written out carries the
table alongside the payload, so decompression needs nothing but the container
itself. */

pub mod decoder;
pub mod encoder;

pub use decoder::{decompress, DecodeError, DecodeTrie, Decoder};
pub use encoder::{compress, EncodeError, Encoder};

#[cfg(test)]
mod tests {
  use super::*;

  use quickcheck_macros::quickcheck;
  use rand::Rng;

  fn roundtrip(data: &[u8]) -> Vec<u8> {
    let encoded = compress(data).unwrap();
    decompress(&encoded).unwrap()
  }

  #[test]
  pub fn toplevel_roundtrip_1() {
    let data: Vec<u8> = "hellohellohelloIamGeronimohello".into();
    assert_eq!(roundtrip(&data), data);
  }

  #[test]
  pub fn toplevel_roundtrip_2() {
    let data: Vec<u8> = "Entire any had depend and figure winter. Change stairs and men likely wisdom new happen piqued six. Now taken him timed sex world get. Enjoyed married an feeling delight pursuit as offered. As admire roused length likely played pretty to no. Means had joy miles her merry solid order.".into();
    assert_eq!(roundtrip(&data), data);
  }

  #[test]
  pub fn toplevel_roundtrip_3() {
    let data = vec![
      0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 13, 14, 15, 16, 17, 18,
    ];
    assert_eq!(roundtrip(&data), data);
  }

  #[test]
  fn every_byte_value() {
    let data: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
    assert_eq!(roundtrip(&data), data);
  }

  #[test]
  fn round_trip_randomlike() {
    let mut rng = rand::thread_rng();
    for _ in 0..10 {
      let len = rng.gen_range(0..4096);
      let testvec: Vec<u8> = (0..len).map(|_| rng.gen::<u8>()).collect();
      assert_eq!(roundtrip(&testvec), testvec);
    }
  }

  #[test]
  fn round_trip_skewed() {
    // Long runs of a few symbols produce deep, lopsided trees
    let mut rng = rand::thread_rng();
    let mut testvec = Vec::new();
    for i in 0..20u32 {
      let run = 1usize << (i % 12);
      testvec.extend(std::iter::repeat(i as u8).take(run));
      testvec.push(rng.gen::<u8>());
    }
    assert_eq!(roundtrip(&testvec), testvec);
  }

  #[test]
  fn known_vector_container() {
    let packed = compress(b"aaabbbbcc").unwrap();
    let table = br#"{"97":"11","98":"0","99":"10"}"#;
    let mut expect = vec![0, 0, 0, 2, 0, 0, 0, table.len() as u8];
    expect.extend_from_slice(table);
    expect.extend_from_slice(&[0b1111_1100, 0b0010_1000]);
    assert_eq!(packed, expect);
    assert_eq!(decompress(&packed).unwrap(), b"aaabbbbcc".to_vec());
  }

  #[test]
  fn single_symbol_container() {
    let packed = compress(b"aaaa").unwrap();
    let container = crate::container::Container::new_from_container_data(&packed).unwrap();
    let table = crate::huff_tree::CodeTable::deserialize(container.table_bytes()).unwrap();
    assert_eq!(table.get(b'a'), Some(&[0u8][..]));
    assert_eq!(container.payload_bits(), 4);
    assert_eq!(decompress(&packed).unwrap(), b"aaaa".to_vec());
  }

  #[test]
  fn empty_roundtrip() {
    assert_eq!(roundtrip(b""), Vec::<u8>::new());
  }

  #[test]
  fn truncated_payload_is_detected() {
    // b=0 a=11 c=10. Without the last byte, the two padding bits come off the
    // first byte instead, which cuts the c after its first bit.
    let data = b"baacbbbac";
    let packed = compress(data).unwrap();
    assert_eq!(&packed[packed.len() - 2..], &[0b0111_1100, 0b0011_1000][..]);
    let truncated = &packed[..packed.len() - 1];
    assert!(matches!(
      decompress(truncated),
      Err(DecodeError::UnresolvableBits(5))
    ));
  }

  #[test]
  fn dropping_a_lone_payload_byte_is_detected() {
    // Each of these packs into exactly one payload byte
    let cases: [(&[u8], u8); 4] = [
      (b"aaaaaaaa", 0),
      (b"abababab", 0),
      (b"aaaa", 4),
      (b"ab", 6),
    ];
    for &(data, padding) in cases.iter() {
      let packed = compress(data).unwrap();
      let container = crate::container::Container::new_from_container_data(&packed).unwrap();
      assert_eq!(container.payload().len(), 1);
      assert_eq!(container.padding(), padding);

      let truncated = &packed[..packed.len() - 1];
      assert!(
        matches!(decompress(truncated), Err(DecodeError::UnresolvableBits(0))),
        "input {:?}",
        data
      );
    }
  }

  #[test]
  fn header_faults() {
    let packed = compress(b"hellohello").unwrap();
    assert!(matches!(
      decompress(&packed[..5]),
      Err(DecodeError::MalformedHeader(_))
    ));

    let mut long_table = packed.clone();
    long_table[7] = long_table[7].wrapping_add(100);
    assert!(matches!(
      decompress(&long_table),
      Err(DecodeError::MalformedHeader(_))
    ));

    let mut bad_padding = packed;
    bad_padding[3] = 9;
    assert!(matches!(
      decompress(&bad_padding),
      Err(DecodeError::InvalidPadding(9, _))
    ));
  }

  #[quickcheck]
  fn prop_roundtrip(data: Vec<u8>) -> bool {
    roundtrip(&data) == data
  }

  #[quickcheck]
  fn prop_single_symbol_roundtrip(sym: u8, n: u8) -> bool {
    let data = vec![sym; n as usize];
    roundtrip(&data) == data
  }

  #[quickcheck]
  fn prop_truncation_never_yields_the_input(data: Vec<u8>) -> bool {
    if data.is_empty() {
      return true;
    }
    let packed = compress(&data).unwrap();
    let truncated = &packed[..packed.len() - 1];
    match decompress(truncated) {
      Ok(out) => out != data,
      Err(_) => true,
    }
  }

  #[quickcheck]
  fn prop_output_ignores_input_order(mut data: Vec<u8>) -> bool {
    // The table depends only on the counts
    let forward = Encoder::from_data(&data).table().serialize().unwrap();
    data.reverse();
    let backward = Encoder::from_data(&data).table().serialize().unwrap();
    data.sort_unstable();
    let sorted = Encoder::from_data(&data).table().serialize().unwrap();
    forward == backward && backward == sorted
  }
}
