//! Field codecs for the LLC wire protocol.
//!
//! All multi-byte integers are little-endian and every structure is packed:
//! there is no implicit padding, every reserved byte is an explicit field.

use bytes::BufMut;

use crate::error::{Result, WireError};

// ---------------------------------------------------------------------------
// Read helpers
// ---------------------------------------------------------------------------

/// Read an unsigned 8-bit integer.
pub fn read_uint8(data: &[u8], offset: usize) -> Result<u8> {
    check_len(data, offset, 1, "UINT8")?;
    Ok(data[offset])
}

/// Read a signed 8-bit integer.
pub fn read_int8(data: &[u8], offset: usize) -> Result<i8> {
    check_len(data, offset, 1, "INT8")?;
    Ok(data[offset] as i8)
}

/// Read a little-endian unsigned 16-bit integer.
pub fn read_uint16(data: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(read_bytes(data, offset, "UINT16")?))
}

/// Read a little-endian signed 16-bit integer.
pub fn read_int16(data: &[u8], offset: usize) -> Result<i16> {
    Ok(i16::from_le_bytes(read_bytes(data, offset, "INT16")?))
}

/// Read a little-endian unsigned 32-bit integer.
pub fn read_uint32(data: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(read_bytes(data, offset, "UINT32")?))
}

/// Read a little-endian signed 32-bit integer.
pub fn read_int32(data: &[u8], offset: usize) -> Result<i32> {
    Ok(i32::from_le_bytes(read_bytes(data, offset, "INT32")?))
}

/// Read a little-endian unsigned 64-bit integer (TSF, expiry, UTC).
pub fn read_uint64(data: &[u8], offset: usize) -> Result<u64> {
    Ok(u64::from_le_bytes(read_bytes(data, offset, "UINT64")?))
}

/// Copy a fixed-size byte array out of `data`.
pub fn read_bytes<const N: usize>(data: &[u8], offset: usize, what: &'static str) -> Result<[u8; N]> {
    check_len(data, offset, N, what)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Sequential reader over a packed record.
///
/// Each accessor advances past the field it reads and fails with
/// `TruncatedInput` instead of reading past the end.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    strict: bool,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, strict: false }
    }

    /// Enable strict checks on must-be-zero padding.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn u8(&mut self) -> Result<u8> {
        let v = read_uint8(self.data, self.pos)?;
        self.pos += 1;
        Ok(v)
    }

    pub fn i8(&mut self) -> Result<i8> {
        let v = read_int8(self.data, self.pos)?;
        self.pos += 1;
        Ok(v)
    }

    pub fn u16(&mut self) -> Result<u16> {
        let v = read_uint16(self.data, self.pos)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn i16(&mut self) -> Result<i16> {
        let v = read_int16(self.data, self.pos)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn u32(&mut self) -> Result<u32> {
        let v = read_uint32(self.data, self.pos)?;
        self.pos += 4;
        Ok(v)
    }

    pub fn i32(&mut self) -> Result<i32> {
        let v = read_int32(self.data, self.pos)?;
        self.pos += 4;
        Ok(v)
    }

    pub fn u64(&mut self) -> Result<u64> {
        let v = read_uint64(self.data, self.pos)?;
        self.pos += 8;
        Ok(v)
    }

    pub fn bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let v = read_bytes::<N>(self.data, self.pos, "BYTES")?;
        self.pos += N;
        Ok(v)
    }

    /// Borrow the next `len` bytes.
    pub fn take(&mut self, len: usize, what: &'static str) -> Result<&'a [u8]> {
        check_len(self.data, self.pos, len, what)?;
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Borrow everything after the cursor.
    pub fn rest(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos.min(self.data.len())..];
        self.pos = self.data.len();
        out
    }

    /// Read an array of `N` records.
    pub fn array<T: Record, const N: usize>(&mut self) -> Result<[T; N]> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::read(self)?);
        }
        items
            .try_into()
            .map_err(|_| WireError::truncated(T::NAME, T::WIRE_LEN * N, self.remaining()))
    }

    /// Read `N` little-endian signed 32-bit integers.
    pub fn i32_array<const N: usize>(&mut self) -> Result<[i32; N]> {
        let mut out = [0i32; N];
        for v in out.iter_mut() {
            *v = self.i32()?;
        }
        Ok(out)
    }

    /// Read `N` little-endian unsigned 32-bit integers.
    pub fn u32_array<const N: usize>(&mut self) -> Result<[u32; N]> {
        let mut out = [0u32; N];
        for v in out.iter_mut() {
            *v = self.u32()?;
        }
        Ok(out)
    }

    /// Read `N` little-endian unsigned 64-bit integers.
    pub fn u64_array<const N: usize>(&mut self) -> Result<[u64; N]> {
        let mut out = [0u64; N];
        for v in out.iter_mut() {
            *v = self.u64()?;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Fixed records
// ---------------------------------------------------------------------------

/// A packed structure with a fixed wire size.
pub trait Record: Sized {
    /// Name used in error messages.
    const NAME: &'static str;
    /// Exact encoded size in bytes.
    const WIRE_LEN: usize;

    fn read(r: &mut Reader<'_>) -> Result<Self>;

    fn write<B: BufMut>(&self, buf: &mut B);

    /// Decode from the start of `payload`. Extra bytes are left alone.
    fn decode(payload: &[u8]) -> Result<Self> {
        Self::read(&mut Reader::new(payload)).map_err(|e| e.with_raw(payload))
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::WIRE_LEN);
        self.write(&mut buf);
        buf
    }
}

/// Decode a fixed record that must fill `payload`.
///
/// Bytes past the record are handed back when `allow_trailing` is set and
/// are a `MalformedMessage` otherwise.
pub fn decode_exact<T: Record>(
    payload: &[u8],
    strict: bool,
    allow_trailing: bool,
) -> Result<(T, &[u8])> {
    let got = payload.len();
    if got < T::WIRE_LEN || (got > T::WIRE_LEN && !allow_trailing) {
        return Err(WireError::malformed(T::NAME, "payload length", T::WIRE_LEN, got).with_raw(payload));
    }
    let mut r = Reader::new(payload).strict(strict);
    let record = T::read(&mut r).map_err(|e| e.with_raw(payload))?;
    Ok((record, r.rest()))
}

/// Write every record of a fixed array in order.
pub fn write_array<T: Record, B: BufMut>(buf: &mut B, items: &[T]) {
    for item in items {
        item.write(buf);
    }
}

// ---------------------------------------------------------------------------
// Write helpers
// ---------------------------------------------------------------------------

/// Write an unsigned 8-bit integer.
pub fn write_uint8<B: BufMut>(buf: &mut B, val: u8) {
    buf.put_u8(val);
}

/// Write a signed 8-bit integer.
pub fn write_int8<B: BufMut>(buf: &mut B, val: i8) {
    buf.put_i8(val);
}

/// Write a little-endian unsigned 16-bit integer.
pub fn write_uint16<B: BufMut>(buf: &mut B, val: u16) {
    buf.put_u16_le(val);
}

/// Write a little-endian signed 16-bit integer.
pub fn write_int16<B: BufMut>(buf: &mut B, val: i16) {
    buf.put_i16_le(val);
}

/// Write a little-endian unsigned 32-bit integer.
pub fn write_uint32<B: BufMut>(buf: &mut B, val: u32) {
    buf.put_u32_le(val);
}

/// Write a little-endian signed 32-bit integer.
pub fn write_int32<B: BufMut>(buf: &mut B, val: i32) {
    buf.put_i32_le(val);
}

/// Write a little-endian unsigned 64-bit integer.
pub fn write_uint64<B: BufMut>(buf: &mut B, val: u64) {
    buf.put_u64_le(val);
}

/// Write raw bytes verbatim.
pub fn write_bytes<B: BufMut>(buf: &mut B, val: &[u8]) {
    buf.put_slice(val);
}

pub fn write_int32_array<B: BufMut>(buf: &mut B, vals: &[i32]) {
    for &v in vals {
        buf.put_i32_le(v);
    }
}

pub fn write_uint32_array<B: BufMut>(buf: &mut B, vals: &[u32]) {
    for &v in vals {
        buf.put_u32_le(v);
    }
}

pub fn write_uint64_array<B: BufMut>(buf: &mut B, vals: &[u64]) {
    for &v in vals {
        buf.put_u64_le(v);
    }
}

// ---------------------------------------------------------------------------
// Address-matching words
// ---------------------------------------------------------------------------

/// Low 48 bits of a packed address-matching word.
pub const ADDR_MASK_48: u64 = 0x0000_FFFF_FFFF_FFFF;

/// Pack a 48-bit address (or mask) and a control byte into one 64-bit word.
///
/// Bits 0..48 carry the address, bits 48..56 the control byte. Bits 56..64
/// are padding and always written as zero.
pub fn pack_addr_word(addr: u64, ctrl: u8) -> u64 {
    (addr & ADDR_MASK_48) | (u64::from(ctrl) << 48)
}

/// Split a packed address-matching word into `(addr, ctrl, padding)`.
pub fn unpack_addr_word(word: u64) -> (u64, u8, u8) {
    (word & ADDR_MASK_48, (word >> 48) as u8, (word >> 56) as u8)
}

/// Interpret six MAC bytes, in transmission order, as a 48-bit wire value.
pub fn mac_to_u48(mac: [u8; 6]) -> u64 {
    let mut word = [0u8; 8];
    word[..6].copy_from_slice(&mac);
    u64::from_le_bytes(word)
}

/// Inverse of [`mac_to_u48`].
pub fn u48_to_mac(value: u64) -> [u8; 6] {
    let word = value.to_le_bytes();
    [word[0], word[1], word[2], word[3], word[4], word[5]]
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

/// Serialize a fixed byte array of any length as a byte string.
#[cfg(feature = "serde")]
pub(crate) fn serialize_bytes<S: serde::Serializer, const N: usize>(
    bytes: &[u8; N],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_bytes(bytes)
}

// ---------------------------------------------------------------------------
// Internal
// ---------------------------------------------------------------------------

fn check_len(data: &[u8], offset: usize, need: usize, name: &'static str) -> Result<()> {
    if data.len() < offset + need {
        Err(WireError::truncated(name, offset + need, data.len()))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int16_round_trip() {
        for val in [0i16, 1, -1, i16::MAX, i16::MIN, 0x7FFF, -0x8000] {
            let mut buf = Vec::new();
            write_int16(&mut buf, val);
            assert_eq!(read_int16(&buf, 0).unwrap(), val);
        }
    }

    #[test]
    fn little_endian_layout() {
        let mut buf = Vec::new();
        write_uint16(&mut buf, 0xC0DA);
        write_uint32(&mut buf, 0x1122_3344);
        write_uint64(&mut buf, 0x0102_0304_0506_0708);
        assert_eq!(
            buf,
            vec![
                0xDA, 0xC0, 0x44, 0x33, 0x22, 0x11, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01
            ]
        );
        assert_eq!(read_uint16(&buf, 0).unwrap(), 0xC0DA);
        assert_eq!(read_uint32(&buf, 2).unwrap(), 0x1122_3344);
        assert_eq!(read_uint64(&buf, 6).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn truncated_reads_fail() {
        let buf = [0x01, 0x02, 0x03];
        assert!(matches!(
            read_uint32(&buf, 0),
            Err(WireError::TruncatedInput { what: "UINT32", need: 4, got: 3, .. })
        ));
        assert!(read_uint16(&buf, 2).is_err());
        assert!(read_uint8(&buf, 3).is_err());
        assert!(read_uint8(&buf, 2).is_ok());
    }

    #[test]
    fn reader_advances_and_stops() {
        let buf = [0x34, 0x12, 0xFF, 0x78, 0x56, 0x34, 0x12];
        let mut r = Reader::new(&buf);
        assert_eq!(r.u16().unwrap(), 0x1234);
        assert_eq!(r.i8().unwrap(), -1);
        assert_eq!(r.u32().unwrap(), 0x1234_5678);
        assert_eq!(r.remaining(), 0);
        assert!(r.u8().is_err());
        assert_eq!(r.position(), 7);
    }

    #[test]
    fn reader_take_and_rest() {
        let buf = [1, 2, 3, 4, 5];
        let mut r = Reader::new(&buf);
        assert_eq!(r.take(2, "head").unwrap(), &[1, 2]);
        assert!(r.take(4, "tail").is_err());
        assert_eq!(r.rest(), &[3, 4, 5]);
        assert!(r.rest().is_empty());
    }

    #[test]
    fn addr_word_reference_values() {
        let addr = pack_addr_word(0xAB89_6745_2301, 0x01);
        let mask = pack_addr_word(0xFFFF_FFFF_FFFF, 0x00);
        assert_eq!(addr.to_le_bytes(), [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0x01, 0x00]);
        assert_eq!(mask.to_le_bytes(), [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00]);
        assert_eq!(unpack_addr_word(addr), (0xAB89_6745_2301, 0x01, 0));
        assert_eq!(unpack_addr_word(mask).0, 0xFFFF_FFFF_FFFF);
    }

    #[test]
    fn addr_word_padding_is_cleared_and_reported() {
        // Bits above 48 in the address never leak into the control byte.
        let word = pack_addr_word(u64::MAX, 0x08);
        assert_eq!(word >> 56, 0);
        assert_eq!(unpack_addr_word(word), (ADDR_MASK_48, 0x08, 0));
        assert_eq!(unpack_addr_word(0xEE08_0000_0000_0001), (1, 0x08, 0xEE));
    }

    #[test]
    fn mac_byte_order() {
        let mac = [0x04, 0xE5, 0x48, 0x00, 0x00, 0x01];
        let v = mac_to_u48(mac);
        assert_eq!(v, 0x0100_0048_E504);
        assert_eq!(u48_to_mac(v), mac);
        assert_eq!(pack_addr_word(v, 0).to_le_bytes()[..6], mac);
    }

    #[derive(Debug, PartialEq)]
    struct Pair(u16, u16);

    impl Record for Pair {
        const NAME: &'static str = "Pair";
        const WIRE_LEN: usize = 4;

        fn read(r: &mut Reader<'_>) -> Result<Self> {
            Ok(Self(r.u16()?, r.u16()?))
        }

        fn write<B: BufMut>(&self, buf: &mut B) {
            write_uint16(buf, self.0);
            write_uint16(buf, self.1);
        }
    }

    #[test]
    fn decode_exact_enforces_length() {
        let bytes = [1, 0, 2, 0, 0xEE];
        assert!(matches!(
            decode_exact::<Pair>(&bytes, false, false),
            Err(WireError::MalformedMessage { msg_type: "Pair", expected: 4, got: 5, .. })
        ));
        let (pair, rest) = decode_exact::<Pair>(&bytes, false, true).unwrap();
        assert_eq!(pair, Pair(1, 2));
        assert_eq!(rest, &[0xEE]);
        assert!(decode_exact::<Pair>(&bytes[..3], false, true).is_err());
        assert_eq!(Pair(1, 2).encode(), bytes[..4].to_vec());
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn addr_word_round_trip(addr in 0u64..=ADDR_MASK_48, ctrl: u8) {
                let word = pack_addr_word(addr, ctrl);
                prop_assert_eq!(unpack_addr_word(word), (addr, ctrl, 0));
            }

            #[test]
            fn u64_round_trip(val: u64) {
                let mut buf = Vec::new();
                write_uint64(&mut buf, val);
                prop_assert_eq!(buf.len(), 8);
                prop_assert_eq!(read_uint64(&buf, 0).unwrap(), val);
            }

            #[test]
            fn reader_never_panics(data in proptest::collection::vec(any::<u8>(), 0..16)) {
                let mut r = Reader::new(&data);
                while r.u32().is_ok() {}
                prop_assert!(r.remaining() < 4);
            }
        }
    }
}
