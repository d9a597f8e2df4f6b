//! r16 message envelope.
//!
//! Wire format (8 bytes, little-endian):
//! ```text
//! [Type:u16][Len:u16][Seq:u16][Ret:i16][payload...]
//! ```
//! `Len` counts the header and the payload. There is no `Ref` and no
//! `Reserved` field.

use bytes::BufMut;

use crate::codec::{self, Reader};
use crate::error::{Result, WireError};

use super::REVISION;
use super::status::Status;

/// Size of the r16 header.
pub const HEADER_LEN: usize = 8;

/// Value of `Ret` on host requests (`MKXSTATUS_RESERVED`).
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
    }
}

/// Number of defined message types.
pub const MSG_TYPE_COUNT: u16 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    pub msg_type: MsgType,
    pub len: u16,
    pub seq: u16,
    pub ret: i16,
}

impl Header {
    /// Header for an outbound host request.
    pub fn request(msg_type: MsgType, payload_len: u16, seq: u16) -> Self {
        Self {
            msg_type,
            len: HEADER_LEN as u16 + payload_len,
            seq,
            ret: MKX_API_MAGIC as i16,
        }
    }

    /// Parse and validate the header at the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(WireError::truncated("r16 header", HEADER_LEN, bytes.len()).with_raw(bytes));
        }
        let mut r = Reader::new(bytes);
        let type_id = r.u16()?;
        let len = r.u16()?;
        let seq = r.u16()?;
        let ret = r.i16()?;

        if usize::from(len) < HEADER_LEN {
            return Err(WireError::malformed("r16 header", "Len below header size", HEADER_LEN, usize::from(len))
                .with_raw(bytes));
        }
        if usize::from(len) > bytes.len() {
            return Err(WireError::malformed("r16 header", "Len exceeds buffer", usize::from(len), bytes.len())
                .with_raw(bytes));
        }
        let msg_type = MsgType::from_raw(type_id)
            .ok_or(WireError::UnsupportedType { type_id, revision: REVISION })?;
        Ok(Self { msg_type, len, seq, ret })
    }

    pub fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.msg_type.as_raw());
        codec::write_uint16(buf, self.len);
        codec::write_uint16(buf, self.seq);
        codec::write_int16(buf, self.ret);
    }

    pub fn payload_len(&self) -> usize {
        usize::from(self.len) - HEADER_LEN
    }

    /// `Ret` is a status for every r16 message type.
    pub fn ret_code(&self) -> Status {
        Status::from_raw(self.ret)
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
            return Err(WireError::malformed("r16 header", "bytes past Len", len, bytes.len()).with_raw(bytes));
        }
        Ok(Self { header, payload: &bytes[HEADER_LEN..] })
    }
}
