use log::{debug, error, trace};

use crate::bits::{self, Bits};
use crate::container::Artifact;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::{CodeTable, Node, NodeId, PrefixTree, build_code_table, build_huffman_tree};

/// Compresses `text` into an artifact. Empty text gives an artifact without symbols.
pub fn encode(text: &str) -> Result<Artifact> {
    let frequencies = FrequencyTable::from_text(text);
    let Some(tree) = build_huffman_tree(&frequencies) else {
        debug!("Empty input, nothing to encode");
        return Ok(Artifact::default());
    };
    let table = build_code_table(&tree);

    let (payload, padding) = encode_data(text, &table)?;
    Ok(Artifact {
        frequencies,
        padding,
        payload,
    })
}

fn encode_data(text: &str, table: &CodeTable) -> Result<(Vec<u8>, u8)> {
    debug!("Starting data encoding...");
    let codes = text
        .chars()
        .map(|symbol| {
            table.get(&symbol).map(Vec::as_slice).ok_or_else(|| {
                error!("Symbol {:?} found in data but not in code table", symbol);
                HuffmanError::UnknownSymbol { symbol }
            })
        })
        .collect::<Result<Vec<&[bool]>>>()?;
    Ok(bits::pack(codes))
}

/// Restores the text stored in `artifact`.
pub fn decode(artifact: &Artifact) -> Result<String> {
    if artifact.padding > 7 {
        return Err(HuffmanError::malformed(format!(
            "padding {} is out of range 0..=7",
            artifact.padding
        )));
    }
    let Some(tree) = build_huffman_tree(&artifact.frequencies) else {
        if artifact.payload.is_empty() && artifact.padding == 0 {
            return Ok(String::new());
        }
        return Err(HuffmanError::malformed(
            "no symbols declared but payload is present",
        ));
    };

    let bits = bits::unpack(&artifact.payload, artifact.padding);
    debug!("Starting bitstream decoding of {} bits...", bits.len());
    let text = decode_data(&tree, bits, artifact.frequencies.total())?;
    debug!("Final decoded size: {} characters.", text.chars().count());
    Ok(text)
}

/// Position of the decoder in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    AtInternal(NodeId),
    AtLeaf(char),
}

impl Cursor {
    fn enter(tree: &PrefixTree, id: NodeId) -> Result<Cursor> {
        match *tree.node(id) {
            Node::Internal { .. } => Ok(Cursor::AtInternal(id)),
            Node::Leaf { symbol, .. } => Ok(Cursor::AtLeaf(symbol)),
            Node::Placeholder => Err(HuffmanError::malformed(
                "bitstream addresses the unused leaf of a single-symbol tree",
            )),
        }
    }

    /// Follows one bit. A cursor resting on a leaf starts over from the root.
    fn step(self, tree: &PrefixTree, bit: bool) -> Result<Cursor> {
        let id = match self {
            Cursor::AtInternal(id) => id,
            Cursor::AtLeaf(_) => tree.root(),
        };
        match *tree.node(id) {
            Node::Internal { left, right, .. } => {
                Cursor::enter(tree, if bit { right } else { left })
            }
            _ => Err(HuffmanError::malformed("tree root is not an internal node")),
        }
    }
}

fn decode_data(tree: &PrefixTree, bits: Bits<'_>, expected: u64) -> Result<String> {
    // every symbol costs at least one bit
    let capacity = usize::try_from(expected).unwrap_or(usize::MAX).min(bits.len());
    let mut text = String::with_capacity(capacity);
    let mut decoded: u64 = 0;
    let mut cursor = Cursor::AtInternal(tree.root());

    for bit in bits {
        cursor = cursor.step(tree, bit)?;
        if let Cursor::AtLeaf(symbol) = cursor {
            trace!("Decoded {:?}", symbol);
            text.push(symbol);
            decoded += 1;
        }
    }

    if matches!(cursor, Cursor::AtInternal(id) if id != tree.root()) {
        return Err(HuffmanError::TruncatedBitstream { decoded });
    }
    if decoded != expected {
        return Err(HuffmanError::malformed(format!(
            "decoded {} symbols but the frequency table accounts for {}",
            decoded, expected
        )));
    }
    Ok(text)
}

/// [`encode`] followed by serialization of the artifact.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    Ok(encode(text)?.to_bytes())
}

/// Parses an artifact from `bytes` and [`decode`]s it.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    decode(&Artifact::from_bytes(bytes)?)
}
