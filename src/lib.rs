/*! Byte-oriented Huffman compression into a self-describing container.

```
let packed = huffzip::compress(b"aaabbbbcc").unwrap();
assert_eq!(huffzip::decompress(&packed).unwrap(), b"aaabbbbcc".to_vec());
```
*/

pub mod bitstream;
pub mod codec;
pub mod container;
pub mod huff_tree;

pub use codec::{compress, decompress, DecodeError, EncodeError};
