//! r17.1 device management messages: queue flush, temperature, logging,
//! GPIO, reset, loopback and fail-safe faults.

use bytes::BufMut;

use crate::addr::{Channel, Radio};
use crate::codec::{self, Reader, Record};
use crate::error::{Result, WireError};
use crate::saf::SafErrorCode;

pub use crate::common::device::{AuxAdc, AuxAdcCfg, SetTsf};

/// Bytes of log text carried by a `Log` message.
pub const MAX_LOG_TEXT_BYTES: usize = 48;
/// Parameter slots in a `Log` message.
pub const MAX_NUM_LOG_PARAMETERS: usize = 16;

wire_enum! {
    /// Tx queue selector.
    pub enum TxQueue(u8) {
        NonQos = 0,
        AcVo = 1,
        AcVi = 2,
        AcBe = 3,
        AcBk = 4,
        /// Flush every queue (`FlushQueue` only).
        FlushAll = 5,
    }
}

/// Discard every packet pending in a Tx queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlushQueue {
    pub radio: Radio,
    pub channel: Channel,
    pub tx_queue: TxQueue,
    pub pad: u8,
}

impl FlushQueue {
    pub fn new(radio: Radio, channel: Channel, tx_queue: TxQueue) -> Self {
        Self { radio, channel, tx_queue, pad: 0 }
    }
}

impl Record for FlushQueue {
    const NAME: &'static str = "FlushQueue";
    const WIRE_LEN: usize = 4;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            radio: Radio::read(r, "FlushQueue.RadioID")?,
            channel: Channel::read(r, "FlushQueue.ChannelID")?,
            tx_queue: TxQueue::decode(r.u8()?, "FlushQueue.TxQueue")?,
            pad: r.u8()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.radio.as_raw());
        codec::write_uint8(buf, self.channel.as_raw());
        codec::write_uint8(buf, self.tx_queue.as_raw());
        codec::write_uint8(buf, self.pad);
    }
}

/// PA temperatures in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Temp {
    pub temp_pa_ant1: i16,
    pub temp_pa_ant2: i16,
}

impl Record for Temp {
    const NAME: &'static str = "Temp";
    const WIRE_LEN: usize = 4;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { temp_pa_ant1: r.i16()?, temp_pa_ant2: r.i16()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_int16(buf, self.temp_pa_ant1);
        codec::write_int16(buf, self.temp_pa_ant2);
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

wire_enum! {
    pub enum LogType(u32) {
        Error = 0,
        Warning = 2,
        Info = 4,
        /// Host request: turn device logging on.
        Enable = 64,
        /// Host request: turn device logging off.
        Disable = 128,
    }
}

/// Formatted device log line: printf-style text plus integer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Log {
    pub log_type: LogType,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub text: [u8; MAX_LOG_TEXT_BYTES],
    pub num_parameters: u32,
    pub parameters: [i32; MAX_NUM_LOG_PARAMETERS],
}

impl Log {
    /// Host request that switches device logging on or off.
    pub fn control(enable: bool) -> Self {
        Self {
            log_type: if enable { LogType::Enable } else { LogType::Disable },
            text: [0; MAX_LOG_TEXT_BYTES],
            num_parameters: 0,
            parameters: [0; MAX_NUM_LOG_PARAMETERS],
        }
    }

    /// Text up to the first NUL, lossily decoded.
    pub fn text(&self) -> String {
        let end = self.text.iter().position(|&b| b == 0).unwrap_or(self.text.len());
        String::from_utf8_lossy(&self.text[..end]).into_owned()
    }

    /// The parameters actually in use.
    pub fn params(&self) -> &[i32] {
        let n = (self.num_parameters as usize).min(MAX_NUM_LOG_PARAMETERS);
        &self.parameters[..n]
    }
}

impl Record for Log {
    const NAME: &'static str = "Log";
    const WIRE_LEN: usize = 120;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let log_type = LogType::decode(r.u32()?, "Log.LogType")?;
        let text = r.bytes::<MAX_LOG_TEXT_BYTES>()?;
        let num_parameters = r.u32()?;
        if num_parameters as usize > MAX_NUM_LOG_PARAMETERS {
            return Err(WireError::out_of_range("Log.NumParameters", i64::from(num_parameters)));
        }
        Ok(Self { log_type, text, num_parameters, parameters: r.i32_array()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.log_type.as_raw());
        codec::write_bytes(buf, &self.text);
        codec::write_uint32(buf, self.num_parameters);
        codec::write_int32_array(buf, &self.parameters);
    }
}

// ---------------------------------------------------------------------------
// GPIO
// ---------------------------------------------------------------------------

wire_enum! {
    pub enum GpioCmd(u16) {
        Config = 0,
        Set = 1,
        Read = 2,
        Status = 3,
    }
}

/// GPIO request, or the device's answer to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Gpio {
    pub cmd: GpioCmd,
    pub pin_number: u16,
    pub value: u32,
}

impl Record for Gpio {
    const NAME: &'static str = "Gpio";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { cmd: GpioCmd::decode(r.u16()?, "Gpio.Cmd")?, pin_number: r.u16()?, value: r.u32()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.cmd.as_raw());
        codec::write_uint16(buf, self.pin_number);
        codec::write_uint32(buf, self.value);
    }
}

/// Reset the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reset {
    pub reserved: u32,
}

impl Record for Reset {
    const NAME: &'static str = "Reset";
    const WIRE_LEN: usize = 4;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { reserved: r.u32()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.reserved);
    }
}

/// Host-to-device echo test. The device returns the payload unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Loopback {
    pub timestamp_sec: u32,
    pub timestamp_microsec: u32,
    pub data: Vec<u8>,
}

impl Loopback {
    pub const FIXED_LEN: usize = 8;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut r = Reader::new(payload);
        let timestamp_sec = r.u32().map_err(|e| e.with_raw(payload))?;
        let timestamp_microsec = r.u32().map_err(|e| e.with_raw(payload))?;
        Ok(Self { timestamp_sec, timestamp_microsec, data: r.rest().to_vec() })
    }

    pub fn wire_len(&self) -> usize {
        Self::FIXED_LEN + self.data.len()
    }

    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.timestamp_sec);
        codec::write_uint32(buf, self.timestamp_microsec);
        codec::write_bytes(buf, &self.data);
    }
}

// ---------------------------------------------------------------------------
// Fault
// ---------------------------------------------------------------------------

wire_enum! {
    pub enum FaultCmd(u16) {
        /// Query the fail-safe state.
        State = 0,
        /// Inject a fault.
        Set = 1,
        /// Clear faults and leave the fail-safe state.
        Clear = 2,
    }
}

/// Fail-safe fault state query, injection, or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fault {
    pub cmd: FaultCmd,
    /// Outcome of the command, in the device fault namespace.
    pub command_error_code: i16,
    /// Non-zero while the radio is in the fail-safe state.
    pub fail_safe_state: u32,
    pub fault_count: u32,
    /// Most recent fault, in the device fault namespace.
    pub fault_error_code: i32,
}

impl Fault {
    pub fn query() -> Self {
        Self { cmd: FaultCmd::State, command_error_code: 0, fail_safe_state: 0, fault_count: 0, fault_error_code: 0 }
    }

    pub fn in_fail_safe(&self) -> bool {
        self.fail_safe_state != 0
    }

    pub fn command_error(&self) -> Option<SafErrorCode> {
        SafErrorCode::from_raw(self.command_error_code)
    }

    pub fn last_fault(&self) -> Option<SafErrorCode> {
        i16::try_from(self.fault_error_code).ok().and_then(SafErrorCode::from_raw)
    }
}

impl Record for Fault {
    const NAME: &'static str = "Fault";
    const WIRE_LEN: usize = 16;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            cmd: FaultCmd::decode(r.u16()?, "Fault.Cmd")?,
            command_error_code: r.i16()?,
            fail_safe_state: r.u32()?,
            fault_count: r.u32()?,
            fault_error_code: r.i32()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.cmd.as_raw());
        codec::write_int16(buf, self.command_error_code);
        codec::write_uint32(buf, self.fail_safe_state);
        codec::write_uint32(buf, self.fault_count);
        codec::write_int32(buf, self.fault_error_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_queue_layout() {
        let fq = FlushQueue::new(Radio::B, Channel::One, TxQueue::FlushAll);
        assert_eq!(fq.encode(), vec![1, 1, 5, 0]);
        assert!(matches!(
            FlushQueue::decode(&[0, 0, 6, 0]),
            Err(WireError::OutOfRangeField { field: "FlushQueue.TxQueue", value: 6 })
        ));
    }

    #[test]
    fn log_text_and_params() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2u32.to_le_bytes());
        let mut text = [0u8; MAX_LOG_TEXT_BYTES];
        text[..11].copy_from_slice(b"tx fail %d\n");
        bytes.extend_from_slice(&text);
        bytes.extend_from_slice(&2u32.to_le_bytes());
        for p in 0..MAX_NUM_LOG_PARAMETERS as i32 {
            bytes.extend_from_slice(&(p - 1).to_le_bytes());
        }
        assert_eq!(bytes.len(), Log::WIRE_LEN);

        let log = Log::decode(&bytes).unwrap();
        assert_eq!(log.log_type, LogType::Warning);
        assert_eq!(log.text(), "tx fail %d\n");
        assert_eq!(log.params(), &[-1, 0]);
        assert_eq!(log.encode(), bytes);
    }

    #[test]
    fn log_parameter_count_is_bounded() {
        let mut bytes = Log::control(true).encode();
        assert_eq!(&bytes[0..4], &64u32.to_le_bytes());
        bytes[52..56].copy_from_slice(&17u32.to_le_bytes());
        assert!(matches!(
            Log::decode(&bytes),
            Err(WireError::OutOfRangeField { field: "Log.NumParameters", value: 17 })
        ));
    }

    #[test]
    fn gpio_and_reset() {
        let gpio = Gpio { cmd: GpioCmd::Set, pin_number: 12, value: 1 };
        assert_eq!(gpio.encode(), vec![1, 0, 12, 0, 1, 0, 0, 0]);
        assert_eq!(Gpio::decode(&gpio.encode()).unwrap(), gpio);
        assert!(Gpio::decode(&[4, 0, 0, 0, 0, 0, 0, 0]).is_err());
        assert_eq!(Reset::default().encode(), vec![0; 4]);
    }

    #[test]
    fn loopback_keeps_data() {
        let lb = Loopback { timestamp_sec: 10, timestamp_microsec: 500, data: vec![9, 8, 7] };
        let mut bytes = Vec::new();
        lb.write(&mut bytes);
        assert_eq!(bytes.len(), lb.wire_len());
        assert_eq!(Loopback::decode(&bytes).unwrap(), lb);
        assert!(matches!(Loopback::decode(&bytes[..6]), Err(WireError::TruncatedInput { .. })));
    }

    #[test]
    fn fault_codes() {
        let fault = Fault {
            cmd: FaultCmd::State,
            command_error_code: 0,
            fail_safe_state: 1,
            fault_count: 3,
            fault_error_code: -10404,
        };
        let bytes = fault.encode();
        assert_eq!(bytes.len(), 16);
        let back = Fault::decode(&bytes).unwrap();
        assert!(back.in_fail_safe());
        assert_eq!(back.command_error(), Some(SafErrorCode::Success));
        assert_eq!(back.last_fault(), Some(SafErrorCode::EepromReadFailed));
        assert_eq!(Fault { fault_error_code: -100_000, ..back }.last_fault(), None);
    }
}
