//! Tx/Rx packet descriptors and the Tx confirmation event.
//!
//! Packet messages are a fixed control header immediately followed by the
//! raw 802.11 frame. The frame length comes from the header's own length
//! field and must account for every byte after the fixed part.

use bytes::BufMut;

use crate::addr::{Channel, Radio};
use crate::codec::{self, Reader, Record};
use crate::error::{Result, WireError};
use crate::types::{Antenna, Mcs, TxCtrlFlags, power};

/// Check that a declared frame length matches the bytes that follow the
/// fixed part.
fn check_frame_len(what: &'static str, declared: u16, payload: &[u8], fixed: usize) -> Result<()> {
    let actual = payload.len() - fixed;
    if usize::from(declared) != actual {
        return Err(WireError::malformed(what, "frame length field", usize::from(declared), actual)
            .with_raw(payload));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TxPacket
// ---------------------------------------------------------------------------

/// Transmit request: control header plus the frame to send.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TxPacket {
    pub radio: Radio,
    pub channel: Channel,
    pub antenna: Antenna,
    pub mcs: Mcs,
    /// 0.5 dBm units, or one of the [`power`] sentinels.
    pub power: i16,
    pub ctrl_flags: TxCtrlFlags,
    pub reserved0: u8,
    /// TSF after which the packet is discarded (0 = never).
    pub expiry: u64,
    pub reserved1: u16,
    pub frame: Vec<u8>,
}

impl TxPacket {
    /// Size of the control header in front of the frame.
    pub const FIXED_LEN: usize = 20;

    /// Packet using the channel defaults for antenna, MCS and power.
    pub fn new(radio: Radio, channel: Channel, frame: Vec<u8>) -> Self {
        Self {
            radio,
            channel,
            antenna: Antenna::Default,
            mcs: Mcs::Default,
            power: power::TX_DEFAULT,
            ctrl_flags: TxCtrlFlags::REGULAR,
            reserved0: 0,
            expiry: 0,
            reserved1: 0,
            frame,
        }
    }

    pub fn decode(payload: &[u8]) -> Result<Self> {
        Self::parse(payload).map_err(|e| e.with_raw(payload))
    }

    fn parse(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let radio = Radio::read(&mut r, "TxPacket.RadioID")?;
        let channel = Channel::read(&mut r, "TxPacket.ChannelID")?;
        let antenna = Antenna::read(&mut r, "TxAntenna")?;
        let mcs = Mcs::read(&mut r, "TxPacket.MCS")?;
        let power = r.i16()?;
        let ctrl_flags = TxCtrlFlags::read(&mut r)?;
        let reserved0 = r.u8()?;
        let expiry = r.u64()?;
        let frame_len = r.u16()?;
        let reserved1 = r.u16()?;
        check_frame_len("TxPacket", frame_len, payload, Self::FIXED_LEN)?;
        Ok(Self {
            radio,
            channel,
            antenna,
            mcs,
            power,
            ctrl_flags,
            reserved0,
            expiry,
            reserved1,
            frame: r.rest().to_vec(),
        })
    }

    pub fn wire_len(&self) -> usize {
        Self::FIXED_LEN + self.frame.len()
    }

    /// Caller guarantees the frame fits a 16-bit length.
    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.radio.as_raw());
        codec::write_uint8(buf, self.channel.as_raw());
        codec::write_uint8(buf, self.antenna.as_raw());
        codec::write_uint8(buf, self.mcs.as_raw());
        codec::write_int16(buf, self.power);
        codec::write_uint8(buf, self.ctrl_flags.0);
        codec::write_uint8(buf, self.reserved0);
        codec::write_uint64(buf, self.expiry);
        codec::write_uint16(buf, self.frame.len() as u16);
        codec::write_uint16(buf, self.reserved1);
        codec::write_bytes(buf, &self.frame);
    }
}

// ---------------------------------------------------------------------------
// RxPacket
// ---------------------------------------------------------------------------

/// Receive indication: reception metadata plus the received frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RxPacket {
    pub radio: Radio,
    pub channel: Channel,
    pub mcs: Mcs,
    /// Non-zero when the FCS check passed.
    pub fcs_pass: u8,
    /// 0.5 dBm units; [`power::RX_DISABLED`] when the antenna is off.
    pub rx_power_ant1: i16,
    pub rx_power_ant2: i16,
    pub rx_noise_ant1: i16,
    pub rx_noise_ant2: i16,
    /// Estimated frequency offset in Hz.
    pub freq_offset: i32,
    pub rx_tsf: u64,
    /// Channel centre frequency in MHz. Reserved (zero) on r16 firmware.
    pub channel_freq: u16,
    pub reserved: [u32; 4],
    pub frame: Vec<u8>,
}

impl RxPacket {
    pub const FIXED_LEN: usize = 44;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        Self::decode_into(payload, Vec::new())
    }

    /// Decode, copying the frame into `buf` (cleared first).
    pub fn decode_into(payload: &[u8], buf: Vec<u8>) -> Result<Self> {
        Self::parse(payload, buf).map_err(|e| e.with_raw(payload))
    }

    fn parse(payload: &[u8], mut buf: Vec<u8>) -> Result<Self> {
        let mut r = Reader::new(payload);
        let radio = Radio::read(&mut r, "RxPacket.RadioID")?;
        let channel = Channel::read(&mut r, "RxPacket.ChannelID")?;
        let mcs = Mcs::read(&mut r, "RxPacket.MCS")?;
        let fcs_pass = r.u8()?;
        let rx_power_ant1 = r.i16()?;
        let rx_power_ant2 = r.i16()?;
        let rx_noise_ant1 = r.i16()?;
        let rx_noise_ant2 = r.i16()?;
        let freq_offset = r.i32()?;
        let rx_tsf = r.u64()?;
        let frame_len = r.u16()?;
        let channel_freq = r.u16()?;
        let reserved = r.u32_array::<4>()?;
        check_frame_len("RxPacket", frame_len, payload, Self::FIXED_LEN)?;
        buf.clear();
        buf.extend_from_slice(r.rest());
        Ok(Self {
            radio,
            channel,
            mcs,
            fcs_pass,
            rx_power_ant1,
            rx_power_ant2,
            rx_noise_ant1,
            rx_noise_ant2,
            freq_offset,
            rx_tsf,
            channel_freq,
            reserved,
            frame: buf,
        })
    }

    /// Frame length declared by an Rx payload, read without decoding it.
    pub fn peek_frame_len(payload: &[u8]) -> Result<usize> {
        Ok(usize::from(codec::read_uint16(payload, 24)?))
    }

    pub fn fcs_ok(&self) -> bool {
        self.fcs_pass != 0
    }

    pub fn wire_len(&self) -> usize {
        Self::FIXED_LEN + self.frame.len()
    }

    /// Caller guarantees the frame fits a 16-bit length.
    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.radio.as_raw());
        codec::write_uint8(buf, self.channel.as_raw());
        codec::write_uint8(buf, self.mcs.as_raw());
        codec::write_uint8(buf, self.fcs_pass);
        codec::write_int16(buf, self.rx_power_ant1);
        codec::write_int16(buf, self.rx_power_ant2);
        codec::write_int16(buf, self.rx_noise_ant1);
        codec::write_int16(buf, self.rx_noise_ant2);
        codec::write_int32(buf, self.freq_offset);
        codec::write_uint64(buf, self.rx_tsf);
        codec::write_uint16(buf, self.frame.len() as u16);
        codec::write_uint16(buf, self.channel_freq);
        codec::write_uint32_array(buf, &self.reserved);
        codec::write_bytes(buf, &self.frame);
    }
}

// ---------------------------------------------------------------------------
// TxEvent
// ---------------------------------------------------------------------------

/// Transmit confirmation.
///
/// `tx_status` is kept raw: its namespace depends on the API revision, see
/// `r16::Status` and `r17::Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TxEvent {
    pub tx_status: i16,
    pub mac_sequence_number: u16,
    pub tx_time: u64,
    pub ack_response_delay_ps: u32,
    pub cts_response_delay_ps: u32,
    /// Time spent waiting to transmit, in microseconds.
    pub mac_dwell_time: u32,
    pub num_short_retries: u8,
    pub num_long_retries: u8,
    pub dest_address: [u8; 6],
    pub reserved0: u32,
    pub reserved1: u32,
}

impl Record for TxEvent {
    const NAME: &'static str = "TxEvent";
    const WIRE_LEN: usize = 40;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            tx_status: r.i16()?,
            mac_sequence_number: r.u16()?,
            tx_time: r.u64()?,
            ack_response_delay_ps: r.u32()?,
            cts_response_delay_ps: r.u32()?,
            mac_dwell_time: r.u32()?,
            num_short_retries: r.u8()?,
            num_long_retries: r.u8()?,
            dest_address: r.bytes::<6>()?,
            reserved0: r.u32()?,
            reserved1: r.u32()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_int16(buf, self.tx_status);
        codec::write_uint16(buf, self.mac_sequence_number);
        codec::write_uint64(buf, self.tx_time);
        codec::write_uint32(buf, self.ack_response_delay_ps);
        codec::write_uint32(buf, self.cts_response_delay_ps);
        codec::write_uint32(buf, self.mac_dwell_time);
        codec::write_uint8(buf, self.num_short_retries);
        codec::write_uint8(buf, self.num_long_retries);
        codec::write_bytes(buf, &self.dest_address);
        codec::write_uint32(buf, self.reserved0);
        codec::write_uint32(buf, self.reserved1);
    }
}
