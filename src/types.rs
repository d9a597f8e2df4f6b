//! Enumerations and constants whose wire values are identical in both API
//! revisions.

use std::fmt;

use crate::codec::Reader;
use crate::error::{Result, WireError};

wire_enum! {
    /// Modulation and coding scheme.
    pub enum Mcs(u8) {
        /// Use the channel's default MCS.
        Default = 0x0,
        /// Transmit rate control.
        Trc = 0x1,
        R23Qam64 = 0x8,
        R12Qam16 = 0x9,
        R12Qpsk = 0xA,
        R12Bpsk = 0xB,
        R34Qam64 = 0xC,
        R34Qam16 = 0xD,
        R34Qpsk = 0xE,
        R34Bpsk = 0xF,
    }
}

wire_enum! {
    /// Antenna selection. `None` is named `INVALID` in r17.1.
    pub enum Antenna(u8) {
        None = 0,
        Ant1 = 1,
        Ant2 = 2,
        Both = 3,
        Default = 4,
    }
}

wire_enum! {
    /// Dual-radio transmit control.
    pub enum DualTxControl(u8) {
        /// Do not prevent transmissions.
        None = 0,
        /// Prevent transmissions while the other radio transmits.
        Tx = 1,
        /// Prevent transmissions while the other radio receives.
        Rx = 2,
        TxRx = 3,
    }
}

wire_enum! {
    /// Channel bandwidth in MHz.
    pub enum Bandwidth(u8) {
        Mhz10 = 10,
        Mhz20 = 20,
    }
}

wire_enum! {
    /// How a SetTSF request relates UTC to the MAC clock.
    pub enum SetTsfCmd(u8) {
        /// UTC applies at the last 1PPS event.
        UtcAt1Pps = 1,
        /// UTC applies at the given TSF.
        UtcAtTsf = 2,
    }
}

wire_enum! {
    /// Auxiliary ADC input.
    pub enum AuxAdcIndex(u8) {
        Vin0 = 0,
        Vin1 = 1,
        Vin2 = 2,
        Vin3 = 3,
        Vin4 = 4,
        /// `VIN5` on r17.1, `RCAL` on r16.
        Vin5 = 5,
        /// `VIN6` on r17.1, `TEMPERATURE` on r16.
        Vin6 = 6,
        Invalid = 8,
    }
}

/// Number of AuxADC inputs reported per measurement.
pub const AUXADC_INDEX_COUNT: usize = 7;

wire_enum! {
    /// Whether an antenna uses an external compensator.
    pub enum CompensatorSel(u8) {
        NoCompensator = 0,
        Compensator = 1,
    }
}

wire_enum! {
    /// Tx power calibration mode.
    pub enum PowerCalMode(u8) {
        Off = 0,
        TempOnly = 1,
        PowerDet = 2,
    }
}

wire_enum! {
    /// RSSI calibration mode.
    pub enum RssiCalMode(u8) {
        Off = 0,
        On = 1,
    }
}

wire_enum! {
    /// UART used by the compensator return path.
    pub enum CompensatorReturn(u32) {
        Uart0 = 0,
        Uart1 = 1,
        Uart2 = 2,
        Uart3 = 3,
    }
}

impl Mcs {
    pub(crate) fn read(r: &mut Reader<'_>, field: &'static str) -> Result<Self> {
        Self::decode(r.u8()?, field)
    }
}

impl Antenna {
    pub(crate) fn read(r: &mut Reader<'_>, field: &'static str) -> Result<Self> {
        Self::decode(r.u8()?, field)
    }
}

// ---------------------------------------------------------------------------
// Bit masks
// ---------------------------------------------------------------------------

/// Per-packet transmitter control flags (zero for normal operation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TxCtrlFlags(pub u8);

impl TxCtrlFlags {
    pub const REGULAR: Self = Self(0x00);
    pub const DISABLE_SEQCTRL_UPDATE: Self = Self(0x01);
    pub const DISABLE_DURATIONID_UPDATE: Self = Self(0x02);
    pub const DISABLE_ACKPOLICY_UPDATE: Self = Self(0x04);
    pub const DISABLE_RETRY_UPDATE: Self = Self(0x08);
    pub const FORCE_RTSCTS: Self = Self(0x10);

    const DEFINED: u8 = 0x1F;

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self> {
        let raw = r.u8()?;
        if raw & !Self::DEFINED != 0 {
            return Err(WireError::out_of_range("TxCtrlFlags", i64::from(raw)));
        }
        Ok(Self(raw))
    }
}

impl std::ops::BitOr for TxCtrlFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Address-matching control bits (`MatchCtrl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchCtrl(pub u8);

impl MatchCtrl {
    /// Respond with ACK when a DATA frame is matched.
    pub const RESPONSE_ENABLE: Self = Self(1 << 0);
    /// Match control frames.
    pub const ENABLE_CTRL: Self = Self(1 << 1);
    /// Match frames with a bad FCS.
    pub const ENABLE_BAD_FCS: Self = Self(1 << 2);
    /// Last entry of the table.
    pub const LAST_ENTRY: Self = Self(1 << 3);
    /// Entry is a duplicate used for anonymous matching.
    pub const DUPLICATE: Self = Self(1 << 4);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for MatchCtrl {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Notification bits delivered to the handler's `notif` callback.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Notif(pub u32);

impl Notif {
    pub const NONE: Self = Self(0);
    pub const CHANNEL0: Self = Self(0x000_0001);
    pub const CHANNEL1: Self = Self(0x000_0002);
    pub const RADIOA: Self = Self(0x000_0010);
    pub const RADIOB: Self = Self(0x000_0020);
    pub const CALIBRATION: Self = Self(0x000_0040);
    pub const TEMP: Self = Self(0x000_0080);
    pub const AUXADC: Self = Self(0x000_0100);
    pub const AUXADCCFG: Self = Self(0x000_0200);
    /// Only raised by r17.1 firmware.
    pub const CONFIG: Self = Self(0x080_0000);
    pub const ACTIVE: Self = Self(0x100_0000);
    pub const STATS: Self = Self(0x200_0000);
    pub const UTC: Self = Self(0x400_0000);
    pub const ERROR: Self = Self(0x800_0000);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Radio bit for `radio`.
    pub fn radio(radio: crate::addr::Radio) -> Self {
        match radio {
            crate::addr::Radio::A => Self::RADIOA,
            crate::addr::Radio::B => Self::RADIOB,
        }
    }

    /// Channel bit for `channel`.
    pub fn channel(channel: crate::addr::Channel) -> Self {
        match channel {
            crate::addr::Channel::Zero => Self::CHANNEL0,
            crate::addr::Channel::One => Self::CHANNEL1,
        }
    }
}

impl std::ops::BitOr for Notif {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for Notif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Notif, &str); 13] = [
            (Notif::ERROR, "ERROR"),
            (Notif::UTC, "UTC"),
            (Notif::STATS, "STATS"),
            (Notif::ACTIVE, "ACTIVE"),
            (Notif::CONFIG, "CONFIG"),
            (Notif::RADIOA, "RADIOA"),
            (Notif::RADIOB, "RADIOB"),
            (Notif::CHANNEL0, "CHANNEL0"),
            (Notif::CHANNEL1, "CHANNEL1"),
            (Notif::CALIBRATION, "CALIBRATION"),
            (Notif::TEMP, "TEMP"),
            (Notif::AUXADC, "AUXADC"),
            (Notif::AUXADCCFG, "AUXADCCFG"),
        ];
        if self.0 == 0 {
            return write!(f, "Notif(NONE)");
        }
        let names: Vec<&str> =
            NAMES.iter().filter(|(bit, _)| self.contains(*bit)).map(|(_, n)| *n).collect();
        write!(f, "Notif({})", names.join("|"))
    }
}

/// Rate-set bits used by rate masks.
pub mod rate_mask {
    pub const R12BPSK: u8 = 0x01;
    pub const R34BPSK: u8 = 0x02;
    pub const R12QPSK: u8 = 0x04;
    pub const R34QPSK: u8 = 0x08;
    pub const R12QAM16: u8 = 0x10;
    pub const R23QAM64: u8 = 0x20;
    pub const R34QAM16: u8 = 0x40;
}

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

/// Tx/Rx power in 0.5 dBm units, with sentinel values.
pub mod power {
    /// Maximum the radio can deliver.
    pub const TX_MAX: i16 = i16::MAX;
    /// Minimum the radio can deliver.
    pub const TX_MIN: i16 = i16::MIN;
    /// Use the channel's default Tx power.
    pub const TX_DEFAULT: i16 = i16::MIN + 1;
    /// Receive power reported when the antenna is disabled.
    pub const RX_DISABLED: i16 = i16::MIN;

    /// Convert 0.5 dBm units to dBm. Sentinels are not special-cased.
    pub fn half_dbm_to_dbm(raw: i16) -> f64 {
        f64::from(raw) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Fixed point
// ---------------------------------------------------------------------------

/// Scaling for fixed-point calibration fields. The codec keeps raw integers.
pub mod fixed {
    /// Signed 15.16 fixed point.
    pub fn s15q16(raw: i32) -> f64 {
        f64::from(raw) / 65536.0
    }

    /// Signed 23.8 fixed point.
    pub fn s23q8(raw: i32) -> f64 {
        f64::from(raw) / 256.0
    }

    /// 8.8 fixed point.
    pub fn q8_8(raw: u16) -> f64 {
        f64::from(raw) / 256.0
    }
}

// ---------------------------------------------------------------------------
// Channel numbers
// ---------------------------------------------------------------------------

/// Centre frequency in MHz of a 10 MHz ITS-G5 / DSRC channel number (172..=184).
pub fn channel_to_freq(channel: u8) -> Option<u16> {
    match channel {
        172..=184 if channel % 2 == 0 => Some(5000 + 5 * u16::from(channel)),
        _ => None,
    }
}

/// Inverse of [`channel_to_freq`].
pub fn freq_to_channel(freq_mhz: u16) -> Option<u8> {
    match freq_mhz {
        5860..=5920 if freq_mhz % 10 == 0 => Some(((freq_mhz - 5000) / 5) as u8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::{Channel, Radio};

    #[test]
    fn mcs_values() {
        assert_eq!(Mcs::R12Qpsk.as_raw(), 0x0A);
        assert_eq!(Mcs::from_raw(0x0F), Some(Mcs::R34Bpsk));
        assert_eq!(Mcs::from_raw(0x02), None);
        assert!(matches!(
            Mcs::read(&mut Reader::new(&[0x07]), "MCS"),
            Err(WireError::OutOfRangeField { field: "MCS", value: 7 })
        ));
    }

    #[test]
    fn antenna_both_is_union() {
        assert_eq!(Antenna::Both.as_raw(), Antenna::Ant1.as_raw() | Antenna::Ant2.as_raw());
    }

    #[test]
    fn tx_ctrl_flags_reject_undefined_bits() {
        assert_eq!(TxCtrlFlags::read(&mut Reader::new(&[0x11])).unwrap().0, 0x11);
        assert!(TxCtrlFlags::read(&mut Reader::new(&[0x20])).is_err());
        let f = TxCtrlFlags::FORCE_RTSCTS | TxCtrlFlags::DISABLE_RETRY_UPDATE;
        assert!(f.contains(TxCtrlFlags::FORCE_RTSCTS));
        assert!(!f.contains(TxCtrlFlags::DISABLE_SEQCTRL_UPDATE));
    }

    #[test]
    fn notif_debug_lists_bits() {
        let n = Notif::STATS | Notif::radio(Radio::B) | Notif::channel(Channel::One);
        assert_eq!(format!("{n:?}"), "Notif(STATS|RADIOB|CHANNEL1)");
        assert_eq!(format!("{:?}", Notif::NONE), "Notif(NONE)");
    }

    #[test]
    fn channel_frequencies() {
        assert_eq!(channel_to_freq(172), Some(5860));
        assert_eq!(channel_to_freq(180), Some(5900));
        assert_eq!(channel_to_freq(184), Some(5920));
        assert_eq!(channel_to_freq(173), None);
        assert_eq!(channel_to_freq(186), None);
        assert_eq!(freq_to_channel(5890), Some(178));
        assert_eq!(freq_to_channel(5895), None);
    }

    #[test]
    fn fixed_point_scaling() {
        assert_eq!(fixed::s15q16(0x0001_8000), 1.5);
        assert_eq!(fixed::s23q8(-512), -2.0);
        assert_eq!(fixed::q8_8(0x0180), 1.5);
        assert_eq!(power::half_dbm_to_dbm(46), 23.0);
    }
}
