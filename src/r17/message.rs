//! r17.1 message catalog and envelope.
//!
//! [`Message`] is one variant per message tag, each wrapping the decoded
//! payload. [`Envelope`] pairs a message with its header and any extension
//! bytes a newer-minor peer appended.

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
use super::device::{AuxAdc, AuxAdcCfg, Fault, FlushQueue, Gpio, Log, Loopback, Reset, SetTsf, Temp};
use super::header::{Frame, HEADER_LEN, Header, MsgType};
use super::packet::{RxPacket, TxEvent, TxPacket};
use super::radio::{RadioConfig, RadioStats};

/// A decoded r17.1 payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Message {
    /// `None` on the host's (empty) request.
    ApiVersion(Option<ApiVersion>),
    TxPacket(TxPacket),
    RxPacket(RxPacket),
    SetTsf(SetTsf),
    TxEvent(TxEvent),
    /// `RadioACfg` / `RadioBCfg`: the radio comes from the tag.
    RadioConfig(Radio, RadioConfig),
    RadioStats(Radio, RadioStats),
    FlushQueue(FlushQueue),
    /// Opaque debug payload.
    Debug(Vec<u8>),
    C2xSec(C2xApdu),
    Calibration(CalibrationData),
    Temp(Temp),
    /// `None` on the host's request, the current TSF in the reply.
    GetTsf(Option<u64>),
    AuxAdc(AuxAdc),
    AuxAdcCfg(AuxAdcCfg),
    /// Device error report. `Ret` holds the fault code, the payload is opaque.
    Error(Vec<u8>),
    Warning(Vec<u8>),
    Log(Log),
    Gpio(Gpio),
    Reset(Reset),
    Loopback(Loopback),
    Fault(Fault),
}

/// Decode a fixed record, returning any tolerated extension bytes.
fn fixed<'a, T: Record>(payload: &'a [u8], policy: &DecodePolicy) -> Result<(T, &'a [u8])> {
    codec::decode_exact(payload, policy.strict_padding, policy.allow_trailing)
}

/// Decode a payload that is either empty (request) or a fixed record.
fn optional<'a, T: Record>(payload: &'a [u8], policy: &DecodePolicy) -> Result<(Option<T>, &'a [u8])> {
    if payload.is_empty() {
        return Ok((None, payload));
    }
    let (record, trailing) = fixed(payload, policy)?;
    Ok((Some(record), trailing))
}

impl Message {
    /// Decode `payload` as the message kind named by `msg_type`.
    ///
    /// Returns the message and the bytes past its fixed record (empty unless
    /// `policy.allow_trailing` is set).
    pub fn decode<'a>(msg_type: MsgType, payload: &'a [u8], policy: &DecodePolicy) -> Result<(Self, &'a [u8])> {
        const NONE: &[u8] = &[];
        Ok(match msg_type {
            MsgType::ApiVersion => {
                let (v, t) = optional(payload, policy)?;
                (Self::ApiVersion(v), t)
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
            MsgType::GetTsf => {
                if payload.is_empty() {
                    (Self::GetTsf(None), NONE)
                } else {
                    let (tsf, t) = fixed::<Tsf>(payload, policy)?;
                    (Self::GetTsf(Some(tsf.0)), t)
                }
            }
            MsgType::AuxAdc => {
                let (m, t) = fixed(payload, policy)?;
                (Self::AuxAdc(m), t)
            }
            MsgType::AuxAdcCfg => {
                let (m, t) = fixed(payload, policy)?;
                (Self::AuxAdcCfg(m), t)
            }
            MsgType::Error => (Self::Error(payload.to_vec()), NONE),
            MsgType::Warning => (Self::Warning(payload.to_vec()), NONE),
            MsgType::Log => {
                let (m, t) = fixed(payload, policy)?;
                (Self::Log(m), t)
            }
            MsgType::Gpio => {
                let (m, t) = fixed(payload, policy)?;
                (Self::Gpio(m), t)
            }
            MsgType::Reset => {
                let (m, t) = fixed(payload, policy)?;
                (Self::Reset(m), t)
            }
            MsgType::Loopback => (Self::Loopback(Loopback::decode(payload)?), NONE),
            MsgType::Fault => {
                let (m, t) = fixed(payload, policy)?;
                (Self::Fault(m), t)
            }
        })
    }

    /// Tag this message is sent under.
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
            Self::Error(_) => MsgType::Error,
            Self::Warning(_) => MsgType::Warning,
            Self::Log(_) => MsgType::Log,
            Self::Gpio(_) => MsgType::Gpio,
            Self::Reset(_) => MsgType::Reset,
            Self::Loopback(_) => MsgType::Loopback,
            Self::Fault(_) => MsgType::Fault,
        }
    }

    /// Encoded payload size.
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
            Self::Debug(p) | Self::Error(p) | Self::Warning(p) => p.len(),
            Self::C2xSec(m) => m.wire_len(),
            Self::Calibration(_) => CalibrationData::WIRE_LEN,
            Self::Temp(_) => Temp::WIRE_LEN,
            Self::GetTsf(t) => t.map_or(0, |_| Tsf::WIRE_LEN),
            Self::AuxAdc(_) => AuxAdc::WIRE_LEN,
            Self::AuxAdcCfg(_) => AuxAdcCfg::WIRE_LEN,
            Self::Log(_) => Log::WIRE_LEN,
            Self::Gpio(_) => Gpio::WIRE_LEN,
            Self::Reset(_) => Reset::WIRE_LEN,
            Self::Loopback(m) => m.wire_len(),
            Self::Fault(_) => Fault::WIRE_LEN,
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
            Self::Debug(p) | Self::Error(p) | Self::Warning(p) => codec::write_bytes(buf, p),
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
            Self::Log(m) => m.write(buf),
            Self::Gpio(m) => m.write(buf),
            Self::Reset(m) => m.write(buf),
            Self::Loopback(m) => m.write(buf),
            Self::Fault(m) => m.write(buf),
        }
    }
}

fn radio_of(msg_type: MsgType) -> Radio {
    match msg_type {
        MsgType::RadioBCfg | MsgType::RadioBStats => Radio::B,
        _ => Radio::A,
    }
}

/// `GetTsf` reply payload.
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

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A complete r17.1 message: header, decoded payload, and extension bytes.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Envelope {
    pub header: Header,
    pub message: Message,
    /// Bytes a newer-minor peer appended after a fixed record. Re-emitted
    /// unchanged on encode.
    pub trailing: Vec<u8>,
}

impl Envelope {
    /// Host request carrying `message`. `Len` is filled in on encode.
    pub fn new(message: Message, seq: u16, reference: u16) -> Self {
        let header = Header::request(message.msg_type(), 0, seq, reference);
        Self { header, message, trailing: Vec::new() }
    }

    /// Replace `Ret` (device-side replies and tests).
    pub fn with_ret(mut self, ret: i16) -> Self {
        self.header.ret = ret;
        self
    }

    /// Decode one message from the start of `bytes`.
    pub fn decode(bytes: &[u8], policy: &DecodePolicy) -> Result<Self> {
        let frame = Frame::parse(bytes)?;
        Self::from_frame(&frame, policy)
    }

    pub fn from_frame(frame: &Frame<'_>, policy: &DecodePolicy) -> Result<Self> {
        let (message, trailing) = Message::decode(frame.header.msg_type, frame.payload, policy)?;
        trace!(
            msg_type = ?frame.header.msg_type,
            seq = frame.header.seq,
            reference = frame.header.reference,
            len = frame.header.len,
            "decoded r17 message"
        );
        Ok(Self { header: frame.header, message, trailing: trailing.to_vec() })
    }

    /// Total encoded size, header included.
    pub fn wire_len(&self) -> usize {
        HEADER_LEN + self.message.wire_len() + self.trailing.len()
    }

    /// Header as it will be written: tag from the message, `Len` computed.
    fn wire_header(&self) -> Result<Header> {
        let len = self.wire_len();
        let len = u16::try_from(len).map_err(|_| WireError::TooLong { what: "r17 message", len })?;
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
        trace!(msg_type = ?header.msg_type, seq = header.seq, len = header.len, "encoded r17 message");
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "Temp(Temp { .. }) [Temp seq=3 ref=1 ret=0 len=16]"
        write!(f, "{:?}", self.message)?;
        let h = &self.header;
        write!(
            f,
            " [{:?} seq={} ref={} ret={} len={}",
            h.msg_type, h.seq, h.reference, h.ret, h.len,
        )?;
        if !self.trailing.is_empty() {
            write!(f, " | +{}", Hex::new(&self.trailing).limit(16))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::Channel;
    use crate::r17::device::{GpioCmd, TxQueue};
    use crate::r17::radio::AddressMatching;
    use crate::types::MatchCtrl;

    const MAC: [u8; 6] = [0x04, 0xE5, 0x48, 0x00, 0x10, 0x20];

    #[test]
    fn len_counts_header_and_payload() {
        let env = Envelope::new(Message::Temp(Temp { temp_pa_ant1: 41, temp_pa_ant2: -3 }), 3, 1);
        let bytes = env.encode().unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 4);
        assert_eq!(&bytes[..4], &[13, 0, 16, 0]);
        assert_eq!(&bytes[12..], &[41, 0, 0xFD, 0xFF]);

        let back = Envelope::decode(&bytes, &DecodePolicy::default()).unwrap();
        assert_eq!(back.header.len, 16);
        assert_eq!(back.message, env.message);
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let mut bytes = Envelope::new(Message::GetTsf(None), 1, 1).encode().unwrap();
        bytes[0] = 24;
        assert!(matches!(
            Envelope::decode(&bytes, &DecodePolicy::default()),
            Err(WireError::UnsupportedType { type_id: 24, revision: "r17.1" })
        ));
    }

    #[test]
    fn empty_requests_and_replies() {
        let policy = DecodePolicy::default();
        let req = Envelope::new(Message::GetTsf(None), 1, 1).encode().unwrap();
        assert_eq!(req.len(), HEADER_LEN);
        assert_eq!(Envelope::decode(&req, &policy).unwrap().message, Message::GetTsf(None));

        let reply = Envelope::new(Message::GetTsf(Some(0x0102_0304)), 2, 1).with_ret(0).encode().unwrap();
        let back = Envelope::decode(&reply, &policy).unwrap();
        assert_eq!(back.message, Message::GetTsf(Some(0x0102_0304)));
        assert!(back.header.ret_code().is_success());

        let version = Envelope::new(Message::ApiVersion(Some(ApiVersion::new(6, 0))), 1, 0).encode().unwrap();
        assert_eq!(&version[12..], &[6, 0, 0, 0]);
    }

    #[test]
    fn radio_tag_follows_radio() {
        let cfg = RadioConfig::default_for(Channel::One, 5900, MAC);
        let env = Envelope::new(Message::RadioConfig(Radio::B, cfg), 4, 2);
        let bytes = env.encode().unwrap();
        assert_eq!(bytes[0], MsgType::RadioBCfg.as_raw() as u8);
        assert_eq!(bytes.len(), HEADER_LEN + RadioConfig::WIRE_LEN);
        let back = Envelope::decode(&bytes, &DecodePolicy::default()).unwrap();
        assert_eq!(back.message, Message::RadioConfig(Radio::B, cfg));
    }

    #[test]
    fn address_matching_padding_policy() {
        let cfg = RadioConfig::default_for(Channel::Zero, 5890, MAC);
        let mut bytes = Envelope::new(Message::RadioConfig(Radio::A, cfg), 1, 1).encode().unwrap();
        // Padding byte of the first address-matching entry in channel 0.
        let pad = HEADER_LEN + 4 + 8 + 60 + 15;
        assert_eq!(bytes[pad], 0);
        bytes[pad] = 0x5A;

        let lenient = Envelope::decode(&bytes, &DecodePolicy::default()).unwrap();
        let Message::RadioConfig(_, back) = &lenient.message else { panic!("not a config") };
        assert_eq!(back.chan[0].mac.ams_table[0], cfg.chan[0].mac.ams_table[0]);
        assert_eq!(lenient.encode().unwrap()[pad], 0);

        let strict = DecodePolicy { strict_padding: true, ..DecodePolicy::default() };
        assert!(matches!(
            Envelope::decode(&bytes, &strict),
            Err(WireError::MalformedMessage { msg_type: "AddressMatching", detail: "non-zero padding", .. })
        ));
        assert!(back.chan[0].mac.ams_table[3].matches(MAC));
    }

    #[test]
    fn trailing_bytes_need_tolerance() {
        let mut bytes = Envelope::new(Message::Gpio(Gpio { cmd: GpioCmd::Read, pin_number: 3, value: 0 }), 9, 9)
            .encode()
            .unwrap();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let len = bytes.len() as u16;
        bytes[2..4].copy_from_slice(&len.to_le_bytes());

        assert!(matches!(
            Envelope::decode(&bytes, &DecodePolicy::default()),
            Err(WireError::MalformedMessage { msg_type: "Gpio", expected: 8, got: 10, .. })
        ));

        let tolerant = DecodePolicy { allow_trailing: true, ..DecodePolicy::default() };
        let env = Envelope::decode(&bytes, &tolerant).unwrap();
        assert_eq!(env.trailing, vec![0xAA, 0xBB]);
        assert_eq!(env.encode().unwrap(), bytes);
        assert!(format!("{env:?}").ends_with("| +AABB]"));
    }

    #[test]
    fn encode_into_checks_room_first() {
        let env = Envelope::new(Message::FlushQueue(FlushQueue::new(Radio::A, Channel::Zero, TxQueue::AcBe)), 1, 1);
        let mut small = [0u8; 15];
        assert!(matches!(
            env.encode_into(&mut small),
            Err(WireError::BufferTooSmall { need: 16, got: 15 })
        ));
        assert_eq!(small, [0u8; 15]);

        let mut out = [0u8; 32];
        assert_eq!(env.encode_into(&mut out).unwrap(), 16);
        assert_eq!(&out[..16], env.encode().unwrap().as_slice());
    }

    #[test]
    fn oversized_message_is_too_long() {
        let env = Envelope::new(Message::Debug(vec![0; usize::from(u16::MAX)]), 1, 1);
        assert!(matches!(env.encode(), Err(WireError::TooLong { .. })));
    }

    #[test]
    fn error_message_ret_is_a_fault_code() {
        let bytes = Envelope::new(Message::Error(vec![1, 2]), 0, 0).with_ret(-10404).encode().unwrap();
        let env = Envelope::decode(&bytes, &DecodePolicy::default()).unwrap();
        assert_eq!(
            env.header.ret_code(),
            crate::r17::status::Ret::Fault(crate::saf::SafErrorCode::EepromReadFailed)
        );
        assert_eq!(env.message, Message::Error(vec![1, 2]));
    }

    #[test]
    fn address_matching_entry_round_trip() {
        let entry = AddressMatching::exact(MAC, MatchCtrl::RESPONSE_ENABLE | MatchCtrl::LAST_ENTRY);
        let mut cfg = RadioConfig::default_for(Channel::Zero, 5890, MAC);
        cfg.chan[1].mac.ams_table[0] = entry;
        let bytes = Envelope::new(Message::RadioConfig(Radio::A, cfg), 1, 1).encode().unwrap();
        let env = Envelope::decode(&bytes, &DecodePolicy::default()).unwrap();
        let Message::RadioConfig(_, back) = env.message else { panic!("not a config") };
        assert_eq!(back.chan[1].mac.ams_table[0], entry);
        assert!(back.chan[1].mac.ams_table[0].is_last());
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
                let _ = Envelope::decode(&bytes, &DecodePolicy::default());
                let _ = Envelope::decode(&bytes, &DecodePolicy::to_device());
            }

            #[test]
            fn debug_round_trip(seq: u16, reference: u16, data in proptest::collection::vec(any::<u8>(), 0..256)) {
                let env = Envelope::new(Message::Debug(data), seq, reference);
                let bytes = env.encode().unwrap();
                let back = Envelope::decode(&bytes, &DecodePolicy::default()).unwrap();
                prop_assert_eq!(back.header.seq, seq);
                prop_assert_eq!(back.header.reference, reference);
                prop_assert_eq!(back.message, env.message);
            }
        }
    }
}
