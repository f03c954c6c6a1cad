//! Bit-level packing of variable-length codes into bytes, most significant bit first.

use log::trace;

#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: &[bool]) {
        for &bit in code {
            self.push_bit(bit);
        }
    }

    /// Returns the bytes and the number of zero bits padding the last one (0-7).
    pub fn finish(self) -> (Vec<u8>, u8) {
        let padding = ((8 - self.bit_count % 8) % 8) as u8;
        trace!(
            "Packed {} bits into {} bytes ({} padding bits)",
            self.bit_count,
            self.bytes.len(),
            padding
        );
        (self.bytes, padding)
    }
}

/// Concatenates `codes` in order and packs them, returning the bytes and the padding count.
pub fn pack<'a, I>(codes: I) -> (Vec<u8>, u8)
where
    I: IntoIterator<Item = &'a [bool]>,
{
    let mut writer = BitWriter::new();
    for code in codes {
        writer.push_code(code);
    }
    writer.finish()
}

/// Lazy sequence of the meaningful bits of a packed buffer.
/// Clone it to restart from the same position.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl Bits<'_> {
    /// Bits left to read.
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        let byte = self.bytes[self.pos / 8];
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bits<'_> {}

/// Reads `bytes` back as bits, dropping the last `padding` bits of the final byte.
pub fn unpack(bytes: &[u8], padding: u8) -> Bits<'_> {
    let end = (bytes.len() * 8).saturating_sub(padding as usize);
    Bits {
        bytes,
        pos: 0,
        end,
    }
}
