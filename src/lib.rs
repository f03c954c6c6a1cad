//! Huffman compression of UTF-8 text.
//!
//! ```
//! let bytes = huffman_coding::compress("abbcccd")?;
//! assert_eq!(huffman_coding::decompress(&bytes)?, "abbcccd");
//! # Ok::<(), huffman_coding::HuffmanError>(())
//! ```

pub mod bits;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod stats;

pub use codec::{compress, decode, decompress, encode};
pub use container::Artifact;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman::{Code, CodeTable, PrefixTree, build_code_table, build_huffman_tree};
pub use stats::CompressionStats;
