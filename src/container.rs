//! The `.huff` container: symbol frequencies, padding count and packed payload.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! [symbol count: u32]
//! [symbol: u32 scalar value][frequency: u64]   x symbol count, ascending symbols
//! [padding bits: u8, 0..=7]
//! [payload: remaining bytes]
//! ```
//!
//! The decoder rebuilds the tree from the stored frequencies, so the
//! frequencies (not the codes) are the format.

use log::{debug, warn};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

const COUNT_LEN: usize = 4;
const ENTRY_LEN: usize = 4 + 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    pub frequencies: FrequencyTable,
    pub padding: u8,
    pub payload: Vec<u8>,
}

impl Artifact {
    /// Number of meaningful payload bits.
    pub fn encoded_bit_len(&self) -> usize {
        (self.payload.len() * 8).saturating_sub(self.padding as usize)
    }

    pub fn header_len(&self) -> usize {
        COUNT_LEN + self.frequencies.len() * ENTRY_LEN + 1
    }

    /// Size of the serialized artifact in bytes.
    pub fn byte_len(&self) -> usize {
        self.header_len() + self.payload.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());

        bytes.extend_from_slice(&(self.frequencies.len() as u32).to_be_bytes());
        for (symbol, freq) in self.frequencies.iter() {
            bytes.extend_from_slice(&u32::from(symbol).to_be_bytes());
            bytes.extend_from_slice(&freq.to_be_bytes());
        }
        bytes.push(self.padding);
        bytes.extend_from_slice(&self.payload);

        debug!(
            "Artifact written: {} header bytes, {} payload bytes",
            self.header_len(),
            self.payload.len()
        );
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Artifact> {
        let mut reader = ByteReader { bytes, pos: 0 };

        let count = u32::from_be_bytes(reader.take_array("symbol count")?) as usize;
        debug!("Frequency entries to process: {}", count);
        if count.saturating_mul(ENTRY_LEN) > reader.remaining() {
            return Err(HuffmanError::malformed(format!(
                "header declares {} symbols but only {} bytes follow",
                count,
                reader.remaining()
            )));
        }

        let mut entries = Vec::with_capacity(count);
        let mut total: u64 = 0;
        let mut previous: Option<char> = None;
        for i in 0..count {
            let raw = u32::from_be_bytes(reader.take_array("symbol")?);
            let symbol = char::from_u32(raw).ok_or_else(|| {
                HuffmanError::malformed(format!("entry {} is not a valid symbol: {:#x}", i, raw))
            })?;
            let freq = u64::from_be_bytes(reader.take_array("frequency")?);

            if freq == 0 {
                return Err(HuffmanError::malformed(format!(
                    "symbol {:?} has zero frequency",
                    symbol
                )));
            }
            if previous.is_some_and(|p| p >= symbol) {
                return Err(HuffmanError::malformed(format!(
                    "symbol {:?} is out of order or repeated",
                    symbol
                )));
            }
            total = total.checked_add(freq).ok_or_else(|| {
                HuffmanError::malformed("frequency total overflows".to_string())
            })?;
            previous = Some(symbol);
            entries.push((symbol, freq));
        }

        let [padding] = reader.take_array::<1>("padding")?;
        if padding > 7 {
            return Err(HuffmanError::malformed(format!(
                "padding {} is out of range 0..=7",
                padding
            )));
        }

        let payload = reader.rest().to_vec();
        if count == 0 && (padding != 0 || !payload.is_empty()) {
            warn!("Empty symbol table followed by {} payload bytes", payload.len());
            return Err(HuffmanError::malformed(
                "no symbols declared but payload is present",
            ));
        }
        if count > 0 && payload.is_empty() {
            return Err(HuffmanError::malformed(format!(
                "{} symbols declared but payload is empty",
                count
            )));
        }

        debug!(
            "Read artifact: {} symbols, {} total, {} payload bytes, {} padding bits",
            count,
            total,
            payload.len(),
            padding
        );
        Ok(Artifact {
            frequencies: FrequencyTable::from_counts(entries),
            padding,
            payload,
        })
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let end = self.pos + N;
        let slice = self.bytes.get(self.pos..end).ok_or_else(|| {
            HuffmanError::malformed(format!("truncated header while reading {}", what))
        })?;
        self.pos = end;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}
