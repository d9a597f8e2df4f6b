//! r17.1 message envelope.
//!
//! Wire format (12 bytes, little-endian):
//! ```text
//! [Type:u16][Len:u16][Seq:u16][Ref:u16][Reserved:u16][Ret:i16][payload...]
//! ```
//! `Len` counts the header and the payload.

use bytes::BufMut;

use crate::codec::{self, Reader};
use crate::error::{Result, WireError};

use super::REVISION;
use super::status::Ret;

/// Size of the r17.1 header.
pub const HEADER_LEN: usize = 12;

/// `MKX_API_MAGIC`: value of `Reserved`, and of `Ret` on host requests.
pub const MKX_API_MAGIC: u16 = 0xC0DA;

wire_enum! {
    /// Message type tag (`MKXIF_*`).
    pub enum MsgType(u16) {
        ApiVersion = 0,
        TxPacket = 1,
        RxPacket = 2,
        SetTsf = 3,
        TxEvent = 4,
        RadioACfg = 5,
        RadioBCfg = 6,
        RadioAStats = 7,
        RadioBStats = 8,
        FlushQ = 9,
        Debug = 10,
        C2xSec = 11,
        Calibration = 12,
        Temp = 13,
        GetTsf = 14,
        AuxAdc = 15,
        AuxAdcCfg = 16,
        Error = 17,
        Warning = 18,
        Log = 19,
        Gpio = 20,
        Reset = 21,
        Loopback = 22,
        Fault = 23,
    }
}

/// Number of defined message types.
pub const MSG_TYPE_COUNT: u16 = 24;

/// Decoded message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    pub msg_type: MsgType,
    pub len: u16,
    pub seq: u16,
    /// Pairs a request with the device's response.
    pub reference: u16,
    pub reserved: u16,
    pub ret: i16,
}

impl Header {
    /// Header for an outbound host request.
    pub fn request(msg_type: MsgType, payload_len: u16, seq: u16, reference: u16) -> Self {
        Self {
            msg_type,
            len: HEADER_LEN as u16 + payload_len,
            seq,
            reference,
            reserved: MKX_API_MAGIC,
            ret: MKX_API_MAGIC as i16,
        }
    }

    /// Parse and validate the header at the start of `bytes`.
    ///
    /// `Len` must cover at least the header and must not run past the end
    /// of `bytes`. Bytes after `Len` are not part of the message.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(WireError::truncated("r17 header", HEADER_LEN, bytes.len()).with_raw(bytes));
        }
        let mut r = Reader::new(bytes);
        let type_id = r.u16()?;
        let len = r.u16()?;
        let seq = r.u16()?;
        let reference = r.u16()?;
        let reserved = r.u16()?;
        let ret = r.i16()?;

        if usize::from(len) < HEADER_LEN {
            return Err(WireError::malformed("r17 header", "Len below header size", HEADER_LEN, usize::from(len))
                .with_raw(bytes));
        }
        if usize::from(len) > bytes.len() {
            return Err(WireError::malformed("r17 header", "Len exceeds buffer", usize::from(len), bytes.len())
                .with_raw(bytes));
        }
        let msg_type = MsgType::from_raw(type_id)
            .ok_or(WireError::UnsupportedType { type_id, revision: REVISION })?;
        Ok(Self { msg_type, len, seq, reference, reserved, ret })
    }

    pub fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.msg_type.as_raw());
        codec::write_uint16(buf, self.len);
        codec::write_uint16(buf, self.seq);
        codec::write_uint16(buf, self.reference);
        codec::write_uint16(buf, self.reserved);
        codec::write_int16(buf, self.ret);
    }

    pub fn payload_len(&self) -> usize {
        usize::from(self.len) - HEADER_LEN
    }

    /// `Ret` read in the namespace its message type uses.
    pub fn ret_code(&self) -> Ret {
        Ret::interpret(self.msg_type, self.ret)
    }
}

/// One message split into header and payload. Borrows the input buffer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub header: Header,
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Split one complete message. `bytes` must hold exactly `Len` bytes;
    /// byte streams go through a [`FrameSplitter`](crate::frame::FrameSplitter)
    /// first.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let header = Header::decode(bytes)?;
        let len = usize::from(header.len);
        if len != bytes.len() {
            return Err(WireError::malformed("r17 header", "bytes past Len", len, bytes.len()).with_raw(bytes));
        }
        Ok(Self { header, payload: &bytes[HEADER_LEN..] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r17::status::{Status, StatusCode};

    const GET_TSF_REQ: [u8; 12] = [0x0E, 0x00, 0x0C, 0x00, 0x01, 0x00, 0x02, 0x00, 0xDA, 0xC0, 0xDA, 0xC0];

    #[test]
    fn header_layout() {
        let hdr = Header::decode(&GET_TSF_REQ).unwrap();
        assert_eq!(hdr.msg_type, MsgType::GetTsf);
        assert_eq!(hdr.len, 12);
        assert_eq!(hdr.seq, 1);
        assert_eq!(hdr.reference, 2);
        assert_eq!(hdr.reserved, MKX_API_MAGIC);
        assert_eq!(hdr.ret_code(), Ret::Status(Status::Known(StatusCode::Reserved)));
        assert_eq!(hdr, Header::request(MsgType::GetTsf, 0, 1, 2));

        let mut out = Vec::new();
        hdr.write(&mut out);
        assert_eq!(out, GET_TSF_REQ);
    }

    #[test]
    fn header_errors() {
        assert!(matches!(
            Header::decode(&GET_TSF_REQ[..11]),
            Err(WireError::TruncatedInput { need: 12, got: 11, .. })
        ));

        let mut short = GET_TSF_REQ;
        short[2] = 8;
        assert!(matches!(
            Header::decode(&short),
            Err(WireError::MalformedMessage { detail: "Len below header size", .. })
        ));

        let mut long = GET_TSF_REQ;
        long[2] = 20;
        assert!(matches!(
            Header::decode(&long),
            Err(WireError::MalformedMessage { detail: "Len exceeds buffer", expected: 20, got: 12, .. })
        ));
    }

    #[test]
    fn every_undefined_tag_is_unsupported() {
        for tag in [MSG_TYPE_COUNT, 99, 0x8000, u16::MAX] {
            let mut bytes = GET_TSF_REQ;
            bytes[..2].copy_from_slice(&tag.to_le_bytes());
            assert!(matches!(
                Header::decode(&bytes),
                Err(WireError::UnsupportedType { type_id, revision: "r17.1" }) if type_id == tag
            ));
        }
        for tag in 0..MSG_TYPE_COUNT {
            assert!(MsgType::from_raw(tag).is_some());
        }
    }

    #[test]
    fn frame_rejects_bytes_past_len() {
        let mut bytes = Vec::new();
        Header::request(MsgType::AuxAdcCfg, 4, 9, 3).write(&mut bytes);
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        let frame = Frame::parse(&bytes).unwrap();
        assert_eq!(frame.payload, &[1, 2, 3, 4]);
        assert_eq!(frame.header.payload_len(), 4);

        bytes.extend_from_slice(&[0xEE, 0xEE]);
        assert!(matches!(
            Frame::parse(&bytes),
            Err(WireError::MalformedMessage { detail: "bytes past Len", expected: 16, got: 18, .. })
        ));
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn header_round_trip(tag in 0u16..MSG_TYPE_COUNT, payload_len in 0u16..1000, seq: u16, reference: u16, ret: i16) {
                let mut hdr = Header::request(MsgType::from_raw(tag).unwrap(), payload_len, seq, reference);
                hdr.ret = ret;
                let mut bytes = Vec::new();
                hdr.write(&mut bytes);
                bytes.resize(usize::from(hdr.len), 0);
                prop_assert_eq!(Header::decode(&bytes).unwrap(), hdr);
            }

            #[test]
            fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
                let _ = Header::decode(&bytes);
            }
        }
    }
}
