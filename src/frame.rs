//! Stream framing and hex formatting.
//!
//! Every LLC message starts with `Type u16, Len u16` where `Len` covers the
//! whole message including its header, in both API revisions. Transports
//! that deliver datagrams hand complete messages to the codec directly;
//! stream transports run the bytes through a [`FrameSplitter`] first.

use std::fmt;

use tracing::warn;

/// Offset of the little-endian `Len` field in every message header.
const LEN_OFFSET: usize = 2;

/// Splits a byte stream into individual messages. Buffers partial data
/// across calls, so it can be fed arbitrary read boundaries.
pub struct FrameSplitter {
    buf: Vec<u8>,
    header_len: usize,
    discarded: u64,
}

impl FrameSplitter {
    /// `header_len` is the header size of the active revision: a `Len`
    /// smaller than that cannot start a valid message.
    pub fn new(header_len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(2048),
            header_len,
            discarded: 0,
        }
    }

    /// Feed new data and extract any complete messages.
    ///
    /// Partial messages are buffered for the next call. A `Len` field smaller
    /// than the header drops one byte and rescans.
    pub fn feed(&mut self, data: &[u8]) -> Vec<Vec<u8>> {
        self.buf.extend_from_slice(data);
        let mut frames = Vec::new();
        let mut dropped = 0u64;

        loop {
            if self.buf.len() < LEN_OFFSET + 2 {
                break;
            }
            let len = u16::from_le_bytes([self.buf[LEN_OFFSET], self.buf[LEN_OFFSET + 1]]) as usize;
            if len < self.header_len {
                self.buf.drain(..1);
                dropped += 1;
                continue;
            }
            if self.buf.len() < len {
                break;
            }
            frames.push(self.buf.drain(..len).collect());
        }

        if dropped > 0 {
            self.discarded += dropped;
            warn!(dropped, header_len = self.header_len, "dropped bytes with impossible Len");
        }
        frames
    }

    /// Bytes buffered waiting for the rest of a message.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Bytes dropped while resynchronising.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

/// Hex rendering of a byte slice, `Debug` and `Display` alike.
///
/// Long slices are cut after `limit` bytes with a trailing `...`.
pub struct Hex<'a> {
    bytes: &'a [u8],
    limit: usize,
}

impl<'a> Hex<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, limit: usize::MAX }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bytes.iter().take(self.limit) {
            write!(f, "{b:02X}")?;
        }
        if self.bytes.len() > self.limit {
            write!(f, "...")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Parse a hex string, ignoring ASCII whitespace, `:` and `-` separators.
pub fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':' && *b != b'-')
        .collect();
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
