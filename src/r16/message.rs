//! r16 message catalog and envelope.

use std::fmt;

use bytes::BufMut;
use tracing::trace;

use crate::addr::Radio;
use crate::codec::{self, Record};
use crate::error::{Result, WireError};
use crate::frame::Hex;
use crate::session::{ApiVersion, DecodePolicy};

use super::c2x::C2xApdu;
use super::calibration::CalibrationData;
use super::device::{AuxAdc, AuxAdcCfg, FlushQueue, SetTsf, Temp};
use super::header::{Frame, HEADER_LEN, Header, MsgType};
use super::packet::{RxPacket, TxEvent, TxPacket};
use super::radio::{RadioConfig, RadioStats};

/// A decoded r16 payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Message {
    ApiVersion(Option<ApiVersion>),
    TxPacket(TxPacket),
    RxPacket(RxPacket),
    SetTsf(SetTsf),
    TxEvent(TxEvent),
    RadioConfig(Radio, RadioConfig),
    RadioStats(Radio, RadioStats),
    FlushQueue(FlushQueue),
    Debug(Vec<u8>),
    C2xSec(C2xApdu),
    Calibration(CalibrationData),
    Temp(Temp),
    GetTsf(Option<u64>),
    AuxAdc(AuxAdc),
    AuxAdcCfg(AuxAdcCfg),
}

fn fixed<'a, T: Record>(payload: &'a [u8], policy: &DecodePolicy) -> Result<(T, &'a [u8])> {
    codec::decode_exact(payload, policy.strict_padding, policy.allow_trailing)
}

impl Message {
    /// Decode `payload` as the message kind named by `msg_type`, returning
    /// any tolerated extension bytes.
    pub fn decode<'a>(msg_type: MsgType, payload: &'a [u8], policy: &DecodePolicy) -> Result<(Self, &'a [u8])> {
        const NONE: &[u8] = &[];
        Ok(match msg_type {
            MsgType::ApiVersion if payload.is_empty() => (Self::ApiVersion(None), NONE),
            MsgType::ApiVersion => {
                let (v, t) = fixed(payload, policy)?;
                (Self::ApiVersion(Some(v)), t)
            }
            MsgType::TxPacket => (Self::TxPacket(TxPacket::decode(payload)?), NONE),
            MsgType::RxPacket => (Self::RxPacket(RxPacket::decode(payload)?), NONE),
            MsgType::SetTsf => {
                let (m, t) = fixed(payload, policy)?;
                (Self::SetTsf(m), t)
            }
            MsgType::TxEvent => {
                let (m, t) = fixed(payload, policy)?;
                (Self::TxEvent(m), t)
            }
            MsgType::RadioACfg | MsgType::RadioBCfg => {
                let (m, t) = fixed(payload, policy)?;
                (Self::RadioConfig(radio_of(msg_type), m), t)
            }
            MsgType::RadioAStats | MsgType::RadioBStats => {
                let (m, t) = fixed(payload, policy)?;
                (Self::RadioStats(radio_of(msg_type), m), t)
            }
            MsgType::FlushQ => {
                let (m, t) = fixed(payload, policy)?;
                (Self::FlushQueue(m), t)
            }
            MsgType::Debug => (Self::Debug(payload.to_vec()), NONE),
            MsgType::C2xSec => (Self::C2xSec(C2xApdu::decode(payload, policy.direction)?), NONE),
            MsgType::Calibration => {
                let (m, t) = fixed(payload, policy)?;
                (Self::Calibration(m), t)
            }
            MsgType::Temp => {
                let (m, t) = fixed(payload, policy)?;
                (Self::Temp(m), t)
            }
            MsgType::GetTsf if payload.is_empty() => (Self::GetTsf(None), NONE),
            MsgType::GetTsf => {
                let (tsf, t) = fixed::<Tsf>(payload, policy)?;
                (Self::GetTsf(Some(tsf.0)), t)
            }
            MsgType::AuxAdc => {
                let (m, t) = fixed(payload, policy)?;
                (Self::AuxAdc(m), t)
            }
            MsgType::AuxAdcCfg => {
                let (m, t) = fixed(payload, policy)?;
                (Self::AuxAdcCfg(m), t)
            }
        })
    }

    pub fn msg_type(&self) -> MsgType {
        match self {
            Self::ApiVersion(_) => MsgType::ApiVersion,
            Self::TxPacket(_) => MsgType::TxPacket,
            Self::RxPacket(_) => MsgType::RxPacket,
            Self::SetTsf(_) => MsgType::SetTsf,
            Self::TxEvent(_) => MsgType::TxEvent,
            Self::RadioConfig(Radio::A, _) => MsgType::RadioACfg,
            Self::RadioConfig(Radio::B, _) => MsgType::RadioBCfg,
            Self::RadioStats(Radio::A, _) => MsgType::RadioAStats,
            Self::RadioStats(Radio::B, _) => MsgType::RadioBStats,
            Self::FlushQueue(_) => MsgType::FlushQ,
            Self::Debug(_) => MsgType::Debug,
            Self::C2xSec(_) => MsgType::C2xSec,
            Self::Calibration(_) => MsgType::Calibration,
            Self::Temp(_) => MsgType::Temp,
            Self::GetTsf(_) => MsgType::GetTsf,
            Self::AuxAdc(_) => MsgType::AuxAdc,
            Self::AuxAdcCfg(_) => MsgType::AuxAdcCfg,
        }
    }

    pub fn wire_len(&self) -> usize {
        match self {
            Self::ApiVersion(v) => v.map_or(0, |_| ApiVersion::WIRE_LEN),
            Self::TxPacket(m) => m.wire_len(),
            Self::RxPacket(m) => m.wire_len(),
            Self::SetTsf(_) => SetTsf::WIRE_LEN,
            Self::TxEvent(_) => TxEvent::WIRE_LEN,
            Self::RadioConfig(..) => RadioConfig::WIRE_LEN,
            Self::RadioStats(..) => RadioStats::WIRE_LEN,
            Self::FlushQueue(_) => FlushQueue::WIRE_LEN,
            Self::Debug(p) => p.len(),
            Self::C2xSec(m) => m.wire_len(),
            Self::Calibration(_) => CalibrationData::WIRE_LEN,
            Self::Temp(_) => Temp::WIRE_LEN,
            Self::GetTsf(t) => t.map_or(0, |_| Tsf::WIRE_LEN),
            Self::AuxAdc(_) => AuxAdc::WIRE_LEN,
            Self::AuxAdcCfg(_) => AuxAdcCfg::WIRE_LEN,
        }
    }

    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        match self {
            Self::ApiVersion(v) => {
                if let Some(v) = v {
                    v.write(buf);
                }
            }
            Self::TxPacket(m) => m.write(buf),
            Self::RxPacket(m) => m.write(buf),
            Self::SetTsf(m) => m.write(buf),
            Self::TxEvent(m) => m.write(buf),
            Self::RadioConfig(_, m) => m.write(buf),
            Self::RadioStats(_, m) => m.write(buf),
            Self::FlushQueue(m) => m.write(buf),
            Self::Debug(p) => codec::write_bytes(buf, p),
            Self::C2xSec(m) => m.write(buf),
            Self::Calibration(m) => m.write(buf),
            Self::Temp(m) => m.write(buf),
            Self::GetTsf(t) => {
                if let Some(t) = t {
                    Tsf(*t).write(buf);
                }
            }
            Self::AuxAdc(m) => m.write(buf),
            Self::AuxAdcCfg(m) => m.write(buf),
        }
    }
}

fn radio_of(msg_type: MsgType) -> Radio {
    match msg_type {
        MsgType::RadioBCfg | MsgType::RadioBStats => Radio::B,
        _ => Radio::A,
    }
}

struct Tsf(u64);

impl Record for Tsf {
    const NAME: &'static str = "GetTsf";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut codec::Reader<'_>) -> Result<Self> {
        Ok(Self(r.u64()?))
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint64(buf, self.0);
    }
}

/// A complete r16 message.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Envelope {
    pub header: Header,
    pub message: Message,
    pub trailing: Vec<u8>,
}

impl Envelope {
    pub fn new(message: Message, seq: u16) -> Self {
        let header = Header::request(message.msg_type(), 0, seq);
        Self { header, message, trailing: Vec::new() }
    }

    pub fn with_ret(mut self, ret: i16) -> Self {
        self.header.ret = ret;
        self
    }

    pub fn decode(bytes: &[u8], policy: &DecodePolicy) -> Result<Self> {
        let frame = Frame::parse(bytes)?;
        Self::from_frame(&frame, policy)
    }

    pub fn from_frame(frame: &Frame<'_>, policy: &DecodePolicy) -> Result<Self> {
        let (message, trailing) = Message::decode(frame.header.msg_type, frame.payload, policy)?;
        trace!(
            msg_type = ?frame.header.msg_type,
            seq = frame.header.seq,
            len = frame.header.len,
            "decoded r16 message"
        );
        Ok(Self { header: frame.header, message, trailing: trailing.to_vec() })
    }

    pub fn wire_len(&self) -> usize {
        HEADER_LEN + self.message.wire_len() + self.trailing.len()
    }

    fn wire_header(&self) -> Result<Header> {
        let len = self.wire_len();
        let len = u16::try_from(len).map_err(|_| WireError::TooLong { what: "r16 message", len })?;
        Ok(Header { msg_type: self.message.msg_type(), len, ..self.header })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = self.wire_header()?;
        let mut buf = Vec::with_capacity(usize::from(header.len));
        self.write_with(header, &mut buf);
        Ok(buf)
    }

    /// Encode into `out`, returning the number of bytes written. Nothing is
    /// written when `out` is too small.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize> {
        let header = self.wire_header()?;
        let need = usize::from(header.len);
        if out.len() < need {
            return Err(WireError::BufferTooSmall { need, got: out.len() });
        }
        let mut dst = &mut out[..need];
        self.write_with(header, &mut dst);
        Ok(need)
    }

    fn write_with<B: BufMut>(&self, header: Header, buf: &mut B) {
        header.write(buf);
        self.message.write(buf);
        codec::write_bytes(buf, &self.trailing);
        trace!(msg_type = ?header.msg_type, seq = header.seq, len = header.len, "encoded r16 message");
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.message)?;
        let h = &self.header;
        write!(f, " [{:?} seq={} ret={} len={}", h.msg_type, h.seq, h.ret, h.len)?;
        if !self.trailing.is_empty() {
            write!(f, " | +{}", Hex::new(&self.trailing).limit(16))?;
        }
        write!(f, "]")
    }
}
