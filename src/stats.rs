//! Figures reported by the command line tools after a run.

use std::fmt;

use crate::container::Artifact;
use crate::huffman::{CodeTable, build_code_table, build_huffman_tree, format_code};

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
    pub unique_symbols: usize,
    /// Size of the UTF-8 source in bytes.
    pub original_size: usize,
    /// Size of the serialized artifact in bytes, header included.
    pub compressed_size: usize,
    /// Number of symbols in the source.
    pub symbol_count: u64,
    /// Payload bits actually used by the codes.
    pub encoded_bits: usize,
    /// Length of the longest code, i.e. the depth of the tree.
    pub max_code_len: usize,
    pub entropy: f64,
}

impl CompressionStats {
    pub fn new(text: &str, artifact: &Artifact) -> Self {
        CompressionStats {
            unique_symbols: artifact.frequencies.len(),
            original_size: text.len(),
            compressed_size: artifact.byte_len(),
            symbol_count: artifact.frequencies.total(),
            encoded_bits: artifact.encoded_bit_len(),
            max_code_len: build_huffman_tree(&artifact.frequencies)
                .map_or(0, |tree| tree.depth()),
            entropy: artifact.frequencies.entropy(),
        }
    }

    /// Compressed size divided by original size; 0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.compressed_size as f64 / self.original_size as f64
    }

    /// Average code length in bits per symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbol_count == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.symbol_count as f64
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unique symbols:          {}", self.unique_symbols)?;
        writeln!(f, "Original size (bytes):   {}", self.original_size)?;
        writeln!(f, "Compressed size (bytes): {}", self.compressed_size)?;
        writeln!(f, "Compression ratio:       {:.3}", self.ratio())?;
        writeln!(f, "Longest code (bits):     {}", self.max_code_len)?;
        writeln!(f, "Average code:            {:.4} bits/symbol", self.bits_per_symbol())?;
        write!(f, "Entropy:                 {:.4} bits/symbol", self.entropy)
    }
}

/// Code table of an artifact as `(symbol, code)` lines, shortest codes first,
/// ties in symbol order.
pub fn code_listing(artifact: &Artifact) -> Vec<(char, String)> {
    let table = match build_huffman_tree(&artifact.frequencies) {
        Some(tree) => build_code_table(&tree),
        None => CodeTable::new(),
    };
    let mut listing: Vec<(char, String)> = table
        .iter()
        .map(|(&symbol, code)| (symbol, format_code(code)))
        .collect();
    listing.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then(a.0.cmp(&b.0)));
    listing
}
