//! r16 session driver.
//!
//! Same shape as the r17.1 driver without `Ref` correlation. C2X responses
//! carry no instruction, so the dispatcher remembers the instruction of each
//! outstanding command by USN and checks the response against it.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::addr::Radio;
use crate::codec::{self, Record};
use crate::error::{Result, WireError};
use crate::seq::{SeqCheck, SeqTracker};
use crate::session::{
    ApiVersion, DecodePolicy, DropCounters, HeapAllocator, RxAllocator, SessionConfig, VersionGate,
};
use crate::types::Notif;

use super::API_VERSION;
use super::c2x::{C2xApdu, C2xCommand, C2xResponse, Instruction};
use super::calibration::CalibrationData;
use super::device::{AuxAdc, AuxAdcCfg, FlushQueue, SetTsf, Temp};
use super::header::{Frame, Header, MKX_API_MAGIC, MsgType};
use super::message::{Envelope, Message};
use super::packet::{RxPacket, TxEvent, TxPacket};
use super::radio::{RadioConfig, RadioStats};

/// Callbacks for inbound messages. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Handler {
    fn api_version(&mut self, header: &Header, version: ApiVersion) {}
    /// Transmit confirmation. `header.ret_code()` is the Tx status.
    fn tx_cnf(&mut self, header: &Header, event: &TxEvent) {}
    fn rx_ind(&mut self, header: &Header, packet: RxPacket) {}
    fn notif(&mut self, notif: Notif) {}
    fn debug_ind(&mut self, header: &Header, data: &[u8]) {}
    fn tsf(&mut self, header: &Header, tsf: u64) {}
    fn c2x(&mut self, header: &Header, apdu: &C2xApdu) {}
    fn aux_adc(&mut self, header: &Header, values: &AuxAdc) {}
    fn aux_adc_cfg(&mut self, header: &Header, cfg: &AuxAdcCfg) {}
    fn temp(&mut self, header: &Header, temp: &Temp) {}
    fn stats(&mut self, header: &Header, radio: Radio, stats: &RadioStats) {}
    fn config(&mut self, header: &Header, radio: Radio, config: &RadioConfig) {}
    fn calibration(&mut self, header: &Header, cal: &CalibrationData) {}
    fn other(&mut self, header: &Header, message: &Message) {}
}

/// One r16 host session.
pub struct Dispatcher<A: RxAllocator = HeapAllocator> {
    config: SessionConfig,
    gate: VersionGate,
    seq: SeqTracker,
    counters: DropCounters,
    alloc: A,
    /// Instruction of each C2X command still waiting for its response.
    pending_c2x: HashMap<[u8; 2], Instruction>,
}

impl Dispatcher<HeapAllocator> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_allocator(config, HeapAllocator)
    }
}

impl<A: RxAllocator> Dispatcher<A> {
    pub fn with_allocator(config: SessionConfig, alloc: A) -> Self {
        Self {
            config,
            gate: VersionGate::new(API_VERSION),
            seq: SeqTracker::new(),
            counters: DropCounters::default(),
            alloc,
            pending_c2x: HashMap::new(),
        }
    }

    pub fn gate(&self) -> &VersionGate {
        &self.gate
    }

    pub fn counters(&self) -> &DropCounters {
        &self.counters
    }

    pub fn seq(&self) -> &SeqTracker {
        &self.seq
    }

    /// Number of C2X commands sent and not yet answered.
    pub fn pending_c2x(&self) -> usize {
        self.pending_c2x.len()
    }

    pub fn policy(&self) -> DecodePolicy {
        let mut policy = self.config.policy;
        policy.allow_trailing |= self.gate.tolerates_trailing();
        policy
    }

    /// Decode one inbound message and hand it to `handler`.
    ///
    /// Returns the delivered message type, or `None` when the message was
    /// dropped without error.
    pub fn dispatch<H: Handler>(&mut self, bytes: &[u8], handler: &mut H) -> Result<Option<MsgType>> {
        match self.dispatch_inner(bytes, handler) {
            Ok(delivered) => Ok(delivered),
            Err(WireError::UnsupportedType { type_id, .. }) if self.config.drop_unsupported => {
                self.counters.unsupported += 1;
                warn!(type_id, "dropping r16 message with unknown type");
                Ok(None)
            }
            Err(e) => {
                self.counters.count(&e);
                if !matches!(e, WireError::VersionMismatch { .. }) {
                    warn!(error = %e, "dropping r16 message");
                }
                Err(e)
            }
        }
    }

    fn dispatch_inner<H: Handler>(&mut self, bytes: &[u8], handler: &mut H) -> Result<Option<MsgType>> {
        self.gate.check()?;
        let frame = Frame::parse(bytes)?;
        let header = frame.header;

        if let SeqCheck::Gap { expected, got } = self.seq.observe_rx(header.seq) {
            debug!(expected, got, msg_type = ?header.msg_type, "r16 seq gap");
        }

        if let Some(peer) = r17_version_reply(&frame) {
            warn!(%peer, "r17.1 version reply on an r16 session");
            self.gate.observe(peer)?;
            return Err(WireError::malformed(
                "ApiVersion",
                "r17.1 header on an r16 session",
                ApiVersion::WIRE_LEN,
                frame.payload.len(),
            )
            .with_raw(bytes));
        }

        if header.msg_type == MsgType::RxPacket {
            return self.deliver_rx(&frame, handler);
        }

        let policy = self.policy();
        let mut env = Envelope::from_frame(&frame, &policy)?;
        if !env.trailing.is_empty() {
            debug!(msg_type = ?header.msg_type, extra = env.trailing.len(), "ignoring extension bytes");
        }

        let pending = match &env.message {
            Message::C2xSec(C2xApdu::Response(rsp)) => self.pending_c2x.remove(&rsp.usn),
            _ => None,
        };
        if let Some(ins) = pending {
            env.message = Message::C2xSec(C2xApdu::Response(C2xResponse::decode_for(frame.payload, ins)?));
        }

        match &env.message {
            Message::ApiVersion(Some(peer)) => {
                self.gate.observe(*peer)?;
                handler.api_version(&header, *peer);
            }
            Message::TxEvent(event) => handler.tx_cnf(&header, event),
            Message::Debug(data) => handler.debug_ind(&header, data),
            Message::GetTsf(Some(tsf)) => handler.tsf(&header, *tsf),
            Message::C2xSec(apdu) => handler.c2x(&header, apdu),
            Message::AuxAdc(values) => {
                handler.aux_adc(&header, values);
                handler.notif(Notif::AUXADC);
            }
            Message::AuxAdcCfg(cfg) => {
                handler.aux_adc_cfg(&header, cfg);
                handler.notif(Notif::AUXADCCFG);
            }
            Message::Temp(temp) => {
                handler.temp(&header, temp);
                handler.notif(Notif::TEMP);
            }
            Message::RadioStats(radio, stats) => {
                handler.stats(&header, *radio, stats);
                handler.notif(Notif::STATS | Notif::radio(*radio));
            }
            Message::RadioConfig(radio, cfg) => handler.config(&header, *radio, cfg),
            Message::Calibration(cal) => {
                handler.calibration(&header, cal);
                handler.notif(Notif::CALIBRATION);
            }
            other => handler.other(&header, other),
        }
        Ok(Some(header.msg_type))
    }

    fn deliver_rx<H: Handler>(&mut self, frame: &Frame<'_>, handler: &mut H) -> Result<Option<MsgType>> {
        let frame_len = RxPacket::peek_frame_len(frame.payload).map_err(|e| e.with_raw(frame.payload))?;
        let Some(buf) = self.alloc.alloc(frame_len) else {
            self.counters.rx_alloc_failures += 1;
            warn!(frame_len, "no rx buffer, dropping packet");
            return Ok(None);
        };
        let packet = RxPacket::decode_into(frame.payload, buf)?;
        handler.rx_ind(&frame.header, packet);
        Ok(Some(MsgType::RxPacket))
    }

    // -----------------------------------------------------------------------
    // Outbound
    // -----------------------------------------------------------------------

    /// Encode `message` as a host request with the next `Seq`.
    pub fn request(&mut self, message: Message) -> Result<Vec<u8>> {
        self.gate.check()?;
        let seq = self.seq.next_tx();
        Envelope::new(message, seq).encode()
    }

    pub fn api_version_request(&mut self) -> Result<Vec<u8>> {
        self.request(Message::ApiVersion(None))
    }

    pub fn tx_packet(&mut self, packet: TxPacket) -> Result<Vec<u8>> {
        self.request(Message::TxPacket(packet))
    }

    pub fn config(&mut self, radio: Radio, config: RadioConfig) -> Result<Vec<u8>> {
        self.request(Message::RadioConfig(radio, config))
    }

    pub fn set_tsf(&mut self, set: SetTsf) -> Result<Vec<u8>> {
        self.request(Message::SetTsf(set))
    }

    pub fn get_tsf(&mut self) -> Result<Vec<u8>> {
        self.request(Message::GetTsf(None))
    }

    pub fn flush(&mut self, flush: FlushQueue) -> Result<Vec<u8>> {
        self.request(Message::FlushQueue(flush))
    }

    /// Send a C2X command and remember its instruction until the response
    /// with the same USN arrives.
    pub fn c2x_command(&mut self, command: C2xCommand) -> Result<Vec<u8>> {
        let bytes = self.request(Message::C2xSec(C2xApdu::Command(command)))?;
        self.pending_c2x.insert(command.usn, command.request.instruction());
        Ok(bytes)
    }

    pub fn calibration(&mut self, cal: CalibrationData) -> Result<Vec<u8>> {
        if cal.version != super::CALIBRATION_VERSION {
            return Err(WireError::CalibrationVersion { expected: super::CALIBRATION_VERSION, got: cal.version });
        }
        self.request(Message::Calibration(cal))
    }

    pub fn temp(&mut self, temp: Temp) -> Result<Vec<u8>> {
        self.request(Message::Temp(temp))
    }

    pub fn aux_adc_cfg(&mut self, cfg: AuxAdcCfg) -> Result<Vec<u8>> {
        self.request(Message::AuxAdcCfg(cfg))
    }

    pub fn debug(&mut self, data: Vec<u8>) -> Result<Vec<u8>> {
        self.request(Message::Debug(data))
    }
}

/// An r17.1 `ApiVersion` reply read through the r16 header. The r17.1
/// header is four bytes longer, so its `Reserved` magic and `Ret` open the
/// payload, followed by `Major` and `Minor`.
fn r17_version_reply(frame: &Frame<'_>) -> Option<ApiVersion> {
    let payload = frame.payload;
    if frame.header.msg_type != MsgType::ApiVersion || payload.len() != 8 {
        return None;
    }
    if codec::read_uint16(payload, 0).ok()? != MKX_API_MAGIC {
        return None;
    }
    let major = codec::read_uint16(payload, 4).ok()?;
    let minor = codec::read_uint16(payload, 6).ok()?;
    Some(ApiVersion::new(major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::Channel;
    use crate::codec::Record;
    use crate::r16::c2x::{CurveId, Pair, Request, ResponseBody, StatusWord, VerifyResult};
    use crate::r16::header::HEADER_LEN;
    use crate::r16::status::{Status, StatusCode};
    use crate::types::Mcs;

    #[derive(Default)]
    struct Recorder {
        tx: Vec<Status>,
        rx: Vec<Vec<u8>>,
        notifs: Vec<Notif>,
        c2x: Vec<C2xApdu>,
        configs: Vec<Radio>,
    }

    impl Handler for Recorder {
        fn tx_cnf(&mut self, header: &Header, _event: &TxEvent) {
            self.tx.push(header.ret_code());
        }
        fn rx_ind(&mut self, _header: &Header, packet: RxPacket) {
            self.rx.push(packet.frame);
        }
        fn notif(&mut self, notif: Notif) {
            self.notifs.push(notif);
        }
        fn c2x(&mut self, _header: &Header, apdu: &C2xApdu) {
            self.c2x.push(*apdu);
        }
        fn config(&mut self, _header: &Header, radio: Radio, _config: &RadioConfig) {
            self.configs.push(radio);
        }
    }

    fn device(message: Message, seq: u16) -> Vec<u8> {
        Envelope::new(message, seq).with_ret(0).encode().unwrap()
    }

    fn vsoh(usn: [u8; 2]) -> C2xCommand {
        C2xCommand::new(
            usn,
            Request::VerifySignatureOfHash {
                pub_key: Pair { x: [1; 32], y: [2; 32] },
                e: [3; 32],
                r: [4; 32],
                s: [5; 32],
                curve: CurveId::BrainpoolP256r1,
            },
        )
    }

    #[test]
    fn outbound_stamps_seq() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let first = d.get_tsf().unwrap();
        let second = d.api_version_request().unwrap();
        assert_eq!(&first[4..6], &[1, 0]);
        assert_eq!(&second[4..6], &[2, 0]);
        assert_eq!(&second[6..8], &[0xDA, 0xC0]);
        assert_eq!(second.len(), HEADER_LEN);
    }

    #[test]
    fn tx_status_uses_r16_numbering() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let event = TxEvent::decode(&[0; 40]).unwrap();
        let bytes = Envelope::new(Message::TxEvent(event), 0).with_ret(-775).encode().unwrap();
        d.dispatch(&bytes, &mut h).unwrap();
        assert_eq!(h.tx, vec![Status::Known(StatusCode::TxFailPacketTooLong)]);
    }

    #[test]
    fn config_readback_has_no_notification() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let cfg = RadioConfig::default_for(Channel::Zero, 5890, [0; 6]);
        d.dispatch(&device(Message::RadioConfig(Radio::A, cfg), 0), &mut h).unwrap();
        d.dispatch(&device(Message::RadioStats(Radio::A, RadioStats::default()), 1), &mut h).unwrap();
        assert_eq!(h.configs, vec![Radio::A]);
        assert_eq!(h.notifs, vec![Notif::STATS | Notif::RADIOA]);
    }

    #[test]
    fn c2x_response_is_checked_against_pending_command() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let cmd = d.c2x_command(vsoh([0, 1])).unwrap();
        let echo = Envelope::decode(&cmd, &DecodePolicy::to_device()).unwrap();
        assert!(matches!(echo.message, Message::C2xSec(C2xApdu::Command(_))));
        assert_eq!(d.pending_c2x(), 1);

        let rsp = C2xResponse::new([0, 1], ResponseBody::Verify(VerifyResult::Success), StatusWord::NoError);
        d.dispatch(&device(Message::C2xSec(C2xApdu::Response(rsp)), 0), &mut h).unwrap();
        assert_eq!(h.c2x, vec![C2xApdu::Response(rsp)]);
        assert_eq!(d.pending_c2x(), 0);

        d.c2x_command(vsoh([0, 2])).unwrap();
        let wrong = C2xResponse::new([0, 2], ResponseBody::PublicKey(Pair { x: [0; 32], y: [0; 32] }), StatusWord::NoError);
        assert!(matches!(
            d.dispatch(&device(Message::C2xSec(C2xApdu::Response(wrong)), 1), &mut h),
            Err(WireError::InvalidLength { what: "C2X response payload", expected: 1, got: 64 })
        ));
        assert_eq!(d.counters().invalid_length, 1);
    }

    #[test]
    fn rx_uses_allocator() {
        let mut d = Dispatcher::with_allocator(SessionConfig::default(), |_len: usize| -> Option<Vec<u8>> { None });
        let mut h = Recorder::default();
        let packet = RxPacket {
            radio: Radio::B,
            channel: Channel::One,
            mcs: Mcs::R12Qpsk,
            fcs_pass: 1,
            rx_power_ant1: -100,
            rx_power_ant2: -100,
            rx_noise_ant1: -190,
            rx_noise_ant2: -190,
            freq_offset: 0,
            rx_tsf: 1,
            channel_freq: 0,
            reserved: [0; 4],
            frame: vec![1, 2, 3],
        };
        assert_eq!(d.dispatch(&device(Message::RxPacket(packet), 0), &mut h).unwrap(), None);
        assert!(h.rx.is_empty());
        assert_eq!(d.counters().rx_alloc_failures, 1);
    }

    #[test]
    fn other_major_is_blocked() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let reply = device(Message::ApiVersion(Some(ApiVersion::new(4, 0))), 0);
        assert!(matches!(d.dispatch(&reply, &mut h), Err(WireError::VersionMismatch { peer_major: 4, .. })));
        assert!(matches!(d.get_tsf(), Err(WireError::Blocked)));
    }

    #[test]
    fn r17_version_reply_blocks_the_session() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        // Type, Len=16, Seq, Ref, Reserved, Ret, Major=6, Minor=0
        let reply = [0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x01, 0x00, 0xDA, 0xC0, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00];
        assert!(matches!(
            d.dispatch(&reply, &mut h),
            Err(WireError::VersionMismatch { local_major: 3, peer_major: 6, peer_minor: 0, .. })
        ));
        assert!(d.gate().is_blocked());
        assert_eq!(d.counters().blocked, 1);

        // Debug [1, 2, 3] with the r17.1 header.
        let debug = [0x0A, 0x00, 0x0F, 0x00, 0x01, 0x00, 0x02, 0x00, 0xDA, 0xC0, 0x00, 0x00, 1, 2, 3];
        assert!(matches!(d.dispatch(&debug, &mut h), Err(WireError::Blocked)));
        assert!(matches!(d.api_version_request(), Err(WireError::Blocked)));
    }

    #[test]
    fn junk_after_len_is_rejected() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let mut bytes = device(Message::Temp(Temp { temp_pa_ant1: 40, temp_pa_ant2: 41 }), 0);
        bytes.push(0xEE);
        assert!(matches!(
            d.dispatch(&bytes, &mut h),
            Err(WireError::MalformedMessage { detail: "bytes past Len", expected: 10, got: 11, .. })
        ));
        assert_eq!(d.counters().malformed, 1);
        assert!(h.notifs.is_empty());
    }

    #[test]
    fn calibration_upload_checks_version() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut cal = CalibrationData::uncalibrated();
        assert!(d.calibration(cal).is_ok());
        cal.version = 3;
        assert!(matches!(
            d.calibration(cal),
            Err(WireError::CalibrationVersion { expected: 1, got: 3 })
        ));
    }
}
