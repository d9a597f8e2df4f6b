//! r17.1 session driver.
//!
//! [`Dispatcher`] turns inbound byte buffers into [`Handler`] calls and
//! builds outbound requests with `Seq` and `Ref` stamped. It owns the
//! session state: version gate, sequence tracking, drop counters and the Rx
//! frame allocator.

use tracing::{debug, warn};

use crate::addr::Radio;
use crate::codec::Record;
use crate::error::{Result, WireError};
use crate::seq::{RefCounter, SeqCheck, SeqTracker};
use crate::session::{
    ApiVersion, DecodePolicy, DropCounters, HeapAllocator, RxAllocator, SessionConfig, VersionGate,
};
use crate::types::Notif;

use super::API_VERSION;
use super::c2x::{C2xApdu, C2xCommand};
use super::calibration::CalibrationData;
use super::device::{AuxAdc, AuxAdcCfg, Fault, FlushQueue, Gpio, Log, Loopback, Reset, SetTsf, Temp};
use super::header::{Frame, HEADER_LEN, Header, MKX_API_MAGIC, MsgType};
use super::message::{Envelope, Message};
use super::packet::{RxPacket, TxEvent, TxPacket};
use super::radio::{RadioConfig, RadioStats};
use super::status::Ret;

/// Callbacks for inbound messages. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Handler {
    /// Peer API version reply, after the version gate accepted it.
    fn api_version(&mut self, header: &Header, version: ApiVersion) {}
    /// Transmit confirmation. `header.ret_code()` is the Tx status.
    fn tx_cnf(&mut self, header: &Header, event: &TxEvent) {}
    /// Received frame, in a buffer from the session's allocator.
    fn rx_ind(&mut self, header: &Header, packet: RxPacket) {}
    fn notif(&mut self, notif: Notif) {}
    fn debug_ind(&mut self, header: &Header, data: &[u8]) {}
    fn tsf(&mut self, header: &Header, tsf: u64) {}
    fn c2x(&mut self, header: &Header, apdu: &C2xApdu) {}
    fn aux_adc(&mut self, header: &Header, values: &AuxAdc) {}
    fn aux_adc_cfg(&mut self, header: &Header, cfg: &AuxAdcCfg) {}
    fn temp(&mut self, header: &Header, temp: &Temp) {}
    fn stats(&mut self, header: &Header, radio: Radio, stats: &RadioStats) {}
    /// Radio configuration read back from the device.
    fn config(&mut self, header: &Header, radio: Radio, config: &RadioConfig) {}
    fn calibration(&mut self, header: &Header, cal: &CalibrationData) {}
    fn log(&mut self, header: &Header, log: &Log) {}
    fn loopback(&mut self, header: &Header, loopback: &Loopback) {}
    fn fault(&mut self, header: &Header, fault: &Fault) {}
    fn gpio(&mut self, header: &Header, gpio: &Gpio) {}
    /// Device error report. `ret` holds the fault code.
    fn error(&mut self, header: &Header, ret: Ret, data: &[u8]) {}
    fn warning(&mut self, header: &Header, ret: Ret, data: &[u8]) {}
    /// Any other message sent back to the host (request echoes).
    fn other(&mut self, header: &Header, message: &Message) {}
}

/// One r17.1 host session.
pub struct Dispatcher<A: RxAllocator = HeapAllocator> {
    config: SessionConfig,
    gate: VersionGate,
    seq: SeqTracker,
    refs: RefCounter,
    counters: DropCounters,
    alloc: A,
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
            refs: RefCounter::new(),
            counters: DropCounters::default(),
            alloc,
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

    /// `Ref` of the most recent outbound request.
    pub fn last_reference(&self) -> u16 {
        self.refs.last()
    }

    /// Policy in effect: the configured one, plus trailing-field tolerance
    /// once a newer-minor peer has been seen.
    pub fn policy(&self) -> DecodePolicy {
        let mut policy = self.config.policy;
        policy.allow_trailing |= self.gate.tolerates_trailing();
        policy
    }

    /// Decode one inbound message and hand it to `handler`.
    ///
    /// Returns the delivered message type, or `None` when the message was
    /// dropped without error (unknown tag with `drop_unsupported`, or no Rx
    /// buffer available). Every error is counted before it is returned.
    pub fn dispatch<H: Handler>(&mut self, bytes: &[u8], handler: &mut H) -> Result<Option<MsgType>> {
        match self.dispatch_inner(bytes, handler) {
            Ok(delivered) => Ok(delivered),
            Err(WireError::UnsupportedType { type_id, .. }) if self.config.drop_unsupported => {
                self.counters.unsupported += 1;
                warn!(type_id, "dropping r17 message with unknown type");
                Ok(None)
            }
            Err(e) => {
                self.counters.count(&e);
                if !matches!(e, WireError::VersionMismatch { .. }) {
                    warn!(error = %e, "dropping r17 message");
                }
                Err(e)
            }
        }
    }

    fn dispatch_inner<H: Handler>(&mut self, bytes: &[u8], handler: &mut H) -> Result<Option<MsgType>> {
        self.gate.check()?;
        let frame = Frame::parse(bytes)?;
        let header = frame.header;

        // The device sends some Error reports outside the Seq stream.
        let check = if header.msg_type == MsgType::Error && header.seq == 0 {
            SeqCheck::Ignored
        } else {
            self.seq.observe_rx(header.seq)
        };
        if let SeqCheck::Gap { expected, got } = check {
            debug!(expected, got, msg_type = ?header.msg_type, "r17 seq gap");
        }

        if let Some(peer) = r16_version_reply(&header) {
            warn!(%peer, "r16 version reply on an r17.1 session");
            self.gate.observe(peer)?;
            return Err(WireError::malformed(
                "ApiVersion",
                "r16 header on an r17.1 session",
                HEADER_LEN + ApiVersion::WIRE_LEN,
                usize::from(header.len),
            )
            .with_raw(bytes));
        }

        if header.msg_type == MsgType::RxPacket {
            return self.deliver_rx(&frame, handler);
        }

        let policy = self.policy();
        let env = Envelope::from_frame(&frame, &policy)?;
        if !env.trailing.is_empty() {
            debug!(msg_type = ?header.msg_type, extra = env.trailing.len(), "ignoring extension bytes");
        }

        match &env.message {
            Message::ApiVersion(Some(peer)) => {
                let before = self.gate.tolerates_trailing();
                self.gate.observe(*peer)?;
                if self.gate.tolerates_trailing() != before {
                    debug!(peer = %peer, "trailing-field tolerance changed");
                }
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
            Message::RadioConfig(radio, cfg) => {
                handler.config(&header, *radio, cfg);
                handler.notif(Notif::CONFIG | Notif::radio(*radio));
            }
            Message::Calibration(cal) => {
                handler.calibration(&header, cal);
                handler.notif(Notif::CALIBRATION);
            }
            Message::Log(log) => handler.log(&header, log),
            Message::Loopback(lb) => handler.loopback(&header, lb),
            Message::Fault(fault) => handler.fault(&header, fault),
            Message::Gpio(gpio) => handler.gpio(&header, gpio),
            Message::Error(data) => {
                handler.error(&header, header.ret_code(), data);
                handler.notif(Notif::ERROR);
            }
            Message::Warning(data) => handler.warning(&header, header.ret_code(), data),
            other => handler.other(&header, other),
        }
        Ok(Some(header.msg_type))
    }

    /// Rx frames go into a buffer from the allocator instead of a fresh
    /// `Vec`. No buffer means the packet is dropped and counted.
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

    /// Encode `message` as a host request with the next `Seq` and `Ref`.
    pub fn request(&mut self, message: Message) -> Result<Vec<u8>> {
        self.gate.check()?;
        let seq = self.seq.next_tx();
        let reference = self.refs.next();
        Envelope::new(message, seq, reference).encode()
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

    pub fn c2x_command(&mut self, command: C2xCommand) -> Result<Vec<u8>> {
        self.request(Message::C2xSec(C2xApdu::Command(command)))
    }

    /// Upload calibration data. The version is checked before encoding.
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

    pub fn log_control(&mut self, enable: bool) -> Result<Vec<u8>> {
        self.request(Message::Log(Log::control(enable)))
    }

    pub fn gpio(&mut self, gpio: Gpio) -> Result<Vec<u8>> {
        self.request(Message::Gpio(gpio))
    }

    pub fn reset(&mut self) -> Result<Vec<u8>> {
        self.request(Message::Reset(Reset::default()))
    }

    pub fn loopback(&mut self, loopback: Loopback) -> Result<Vec<u8>> {
        self.request(Message::Loopback(loopback))
    }

    pub fn fault(&mut self, fault: Fault) -> Result<Vec<u8>> {
        self.request(Message::Fault(fault))
    }

    pub fn debug(&mut self, data: Vec<u8>) -> Result<Vec<u8>> {
        self.request(Message::Debug(data))
    }
}

/// An r16 `ApiVersion` reply read through the r17.1 header. The r16 reply
/// is twelve bytes: its `Ret`, `Major` and `Minor` land on `Ref`,
/// `Reserved` and `Ret`, leaving no payload. A genuine r17.1 header carries
/// the magic in `Reserved`.
fn r16_version_reply(header: &Header) -> Option<ApiVersion> {
    if header.msg_type != MsgType::ApiVersion || header.payload_len() != 0 || header.reserved == MKX_API_MAGIC {
        return None;
    }
    Some(ApiVersion::new(header.reserved, header.ret as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::Channel;
    use crate::saf::SafErrorCode;
    use crate::types::Mcs;

    #[derive(Default)]
    struct Recorder {
        versions: Vec<ApiVersion>,
        tx: Vec<(u16, i16)>,
        rx: Vec<Vec<u8>>,
        notifs: Vec<Notif>,
        errors: Vec<Ret>,
        temps: Vec<Temp>,
        tsf: Vec<u64>,
    }

    impl Handler for Recorder {
        fn api_version(&mut self, _header: &Header, version: ApiVersion) {
            self.versions.push(version);
        }
        fn tx_cnf(&mut self, header: &Header, event: &TxEvent) {
            self.tx.push((header.reference, event.tx_status));
        }
        fn rx_ind(&mut self, _header: &Header, packet: RxPacket) {
            self.rx.push(packet.frame);
        }
        fn notif(&mut self, notif: Notif) {
            self.notifs.push(notif);
        }
        fn error(&mut self, _header: &Header, ret: Ret, _data: &[u8]) {
            self.errors.push(ret);
        }
        fn temp(&mut self, _header: &Header, temp: &Temp) {
            self.temps.push(*temp);
        }
        fn tsf(&mut self, _header: &Header, tsf: u64) {
            self.tsf.push(tsf);
        }
    }

    fn device(message: Message, seq: u16) -> Vec<u8> {
        Envelope::new(message, seq, 0).with_ret(0).encode().unwrap()
    }

    fn rx_packet(frame: Vec<u8>) -> RxPacket {
        RxPacket {
            radio: Radio::A,
            channel: Channel::Zero,
            mcs: Mcs::R12Qpsk,
            fcs_pass: 1,
            rx_power_ant1: -120,
            rx_power_ant2: -130,
            rx_noise_ant1: -190,
            rx_noise_ant2: -190,
            freq_offset: 0,
            rx_tsf: 42,
            channel_freq: 5890,
            reserved: [0; 4],
            frame,
        }
    }

    #[test]
    fn outbound_stamps_seq_and_ref() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let first = d.get_tsf().unwrap();
        let second = d.api_version_request().unwrap();
        assert_eq!(&first[4..8], &[1, 0, 1, 0]);
        assert_eq!(&second[4..8], &[2, 0, 2, 0]);
        assert_eq!(d.last_reference(), 2);
        assert_eq!(&second[8..12], &[0xDA, 0xC0, 0xDA, 0xC0]);
        assert_eq!(second.len(), HEADER_LEN);
    }

    #[test]
    fn routes_by_type_and_emits_notifs() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let temp = Temp { temp_pa_ant1: 40, temp_pa_ant2: 41 };
        assert_eq!(d.dispatch(&device(Message::Temp(temp), 0), &mut h).unwrap(), Some(MsgType::Temp));
        d.dispatch(&device(Message::GetTsf(Some(99)), 1), &mut h).unwrap();
        d.dispatch(&device(Message::RadioStats(Radio::B, RadioStats::default()), 2), &mut h).unwrap();

        assert_eq!(h.temps, vec![temp]);
        assert_eq!(h.tsf, vec![99]);
        assert_eq!(h.notifs, vec![Notif::TEMP, Notif::STATS | Notif::RADIOB]);
        assert_eq!(d.seq().gaps(), 0);
    }

    #[test]
    fn tx_confirmation_carries_reference() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let event = TxEvent::decode(&[0; 40]).unwrap();
        let bytes = Envelope::new(Message::TxEvent(event), 0, 7).with_ret(-771).encode().unwrap();
        d.dispatch(&bytes, &mut h).unwrap();
        assert_eq!(h.tx, vec![(7, 0)]);
    }

    #[test]
    fn version_mismatch_blocks_session() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let reply = device(Message::ApiVersion(Some(ApiVersion::new(3, 0))), 0);
        assert!(matches!(d.dispatch(&reply, &mut h), Err(WireError::VersionMismatch { peer_major: 3, .. })));
        assert!(h.versions.is_empty());

        let temp = device(Message::Temp(Temp::default()), 1);
        let err = d.dispatch(&temp, &mut h).unwrap_err();
        assert!(err.is_session_fatal());
        assert!(matches!(d.get_tsf(), Err(WireError::Blocked)));
        assert_eq!(d.counters().blocked, 2);
    }

    #[test]
    fn r16_version_reply_blocks_the_session() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        // Type, Len=12, Seq, Ret=0, Major=3, Minor=0
        let reply = [0x00, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00];
        assert!(matches!(
            d.dispatch(&reply, &mut h),
            Err(WireError::VersionMismatch { local_major: 6, peer_major: 3, peer_minor: 0, .. })
        ));
        assert!(d.gate().is_blocked());
        assert!(h.versions.is_empty());
        assert!(matches!(d.get_tsf(), Err(WireError::Blocked)));
    }

    #[test]
    fn empty_version_request_is_not_a_reply() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let request = Envelope::new(Message::ApiVersion(None), 0, 1).encode().unwrap();
        assert_eq!(d.dispatch(&request, &mut h).unwrap(), Some(MsgType::ApiVersion));
        assert!(!d.gate().is_blocked());
    }

    #[test]
    fn junk_after_len_is_rejected() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let mut bytes = device(Message::Temp(Temp::default()), 0);
        bytes.extend_from_slice(&[0xEE, 0xEE]);
        assert!(matches!(
            d.dispatch(&bytes, &mut h),
            Err(WireError::MalformedMessage { detail: "bytes past Len", expected: 16, got: 18, .. })
        ));
        assert_eq!(d.counters().malformed, 1);
        assert!(h.temps.is_empty());
    }

    #[test]
    fn newer_minor_enables_trailing_fields() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        d.dispatch(&device(Message::ApiVersion(Some(ApiVersion::new(6, 3))), 0), &mut h).unwrap();
        assert_eq!(h.versions, vec![ApiVersion::new(6, 3)]);
        assert!(d.policy().allow_trailing);

        let mut bytes = device(Message::Temp(Temp::default()), 1);
        bytes.extend_from_slice(&[1, 2]);
        let len = bytes.len() as u16;
        bytes[2..4].copy_from_slice(&len.to_le_bytes());
        assert_eq!(d.dispatch(&bytes, &mut h).unwrap(), Some(MsgType::Temp));
    }

    #[test]
    fn rx_uses_allocator_and_counts_failures() {
        let mut budget = 1;
        let alloc = move |len: usize| {
            if budget == 0 {
                return None;
            }
            budget -= 1;
            Some(Vec::with_capacity(len))
        };
        let mut d = Dispatcher::with_allocator(SessionConfig::default(), alloc);
        let mut h = Recorder::default();
        let bytes = device(Message::RxPacket(rx_packet(vec![0xAA; 10])), 0);
        assert_eq!(d.dispatch(&bytes, &mut h).unwrap(), Some(MsgType::RxPacket));
        let bytes = device(Message::RxPacket(rx_packet(vec![0xBB; 10])), 1);
        assert_eq!(d.dispatch(&bytes, &mut h).unwrap(), None);
        assert_eq!(h.rx, vec![vec![0xAA; 10]]);
        assert_eq!(d.counters().rx_alloc_failures, 1);
    }

    #[test]
    fn unknown_types_are_dropped_or_returned() {
        let mut bytes = device(Message::Reset(Reset::default()), 0);
        bytes[0] = 77;
        let mut h = Recorder::default();

        let mut d = Dispatcher::new(SessionConfig::default());
        assert_eq!(d.dispatch(&bytes, &mut h).unwrap(), None);
        assert_eq!(d.counters().unsupported, 1);

        let config = SessionConfig { drop_unsupported: false, ..SessionConfig::default() };
        let mut d = Dispatcher::new(config);
        assert!(matches!(d.dispatch(&bytes, &mut h), Err(WireError::UnsupportedType { type_id: 77, .. })));
        assert_eq!(d.counters().unsupported, 1);
    }

    #[test]
    fn error_with_zero_seq_is_outside_the_stream() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        d.dispatch(&device(Message::Temp(Temp::default()), 0), &mut h).unwrap();
        let err = Envelope::new(Message::Error(vec![]), 0, 0).with_ret(-10404).encode().unwrap();
        d.dispatch(&err, &mut h).unwrap();
        d.dispatch(&device(Message::Temp(Temp::default()), 1), &mut h).unwrap();
        assert_eq!(d.seq().gaps(), 0);
        assert_eq!(h.errors, vec![Ret::Fault(SafErrorCode::EepromReadFailed)]);
        assert!(h.notifs.contains(&Notif::ERROR));
    }

    #[test]
    fn malformed_messages_are_counted() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut h = Recorder::default();
        let mut bytes = device(Message::Temp(Temp::default()), 0);
        bytes.push(0);
        bytes[2] += 1;
        assert!(matches!(d.dispatch(&bytes, &mut h), Err(WireError::MalformedMessage { .. })));
        assert_eq!(d.counters().malformed, 1);
        assert!(h.temps.is_empty());
    }

    #[test]
    fn calibration_upload_checks_version() {
        let mut d = Dispatcher::new(SessionConfig::default());
        let mut cal = CalibrationData::uncalibrated();
        assert!(d.calibration(cal).is_ok());
        cal.version = 1;
        assert!(matches!(
            d.calibration(cal),
            Err(WireError::CalibrationVersion { expected: 3, got: 1 })
        ));
    }
}
