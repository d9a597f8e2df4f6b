//! Per-antenna calibration records.
//!
//! All fixed-point fields stay raw. Scaling helpers are provided where the
//! unit is documented, see [`crate::types::fixed`].

use bytes::BufMut;

use crate::codec::{self, Reader, Record};
use crate::error::Result;
use crate::types::{
    AuxAdcIndex, CompensatorReturn, CompensatorSel, PowerCalMode, RssiCalMode, fixed,
};

/// Channels with a per-channel calibration entry.
pub const CAL_CHANNEL_COUNT: usize = 10;
/// Points in a two-point calibration curve.
pub const CAL_POINT_COUNT: usize = 2;
/// Antennas carrying calibration.
pub const ANT_COUNT: usize = 2;

/// Linear temperature compensation: one slope, one intercept per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemperatureComp {
    /// S15Q16.
    pub slope: i32,
    /// S23Q8, one per calibration channel.
    pub zero_intercept: [i32; CAL_CHANNEL_COUNT],
}

impl TemperatureComp {
    pub fn slope_f64(&self) -> f64 {
        fixed::s15q16(self.slope)
    }
}

impl Record for TemperatureComp {
    const NAME: &'static str = "TemperatureComp";
    const WIRE_LEN: usize = 44;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { slope: r.i32()?, zero_intercept: r.i32_array()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_int32(buf, self.slope);
        codec::write_int32_array(buf, &self.zero_intercept);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PowerDetCalPoint {
    pub power_det: i32,
    pub power_constant: i32,
    pub power_rate: i32,
}

impl Record for PowerDetCalPoint {
    const NAME: &'static str = "PowerDetCalPoint";
    const WIRE_LEN: usize = 12;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { power_det: r.i32()?, power_constant: r.i32()?, power_rate: r.i32()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_int32(buf, self.power_det);
        codec::write_int32(buf, self.power_constant);
        codec::write_int32(buf, self.power_rate);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PowerDetTempCalPoint {
    pub cal_temp: i32,
    pub temp_offset_rate: i32,
}

impl Record for PowerDetTempCalPoint {
    const NAME: &'static str = "PowerDetTempCalPoint";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { cal_temp: r.i32()?, temp_offset_rate: r.i32()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_int32(buf, self.cal_temp);
        codec::write_int32(buf, self.temp_offset_rate);
    }
}

/// Two-point power detector curve plus its temperature correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PowerDetCal {
    pub cal_point: [PowerDetCalPoint; CAL_POINT_COUNT],
    pub temp_cal_point: PowerDetTempCalPoint,
}

impl Record for PowerDetCal {
    const NAME: &'static str = "PowerDetCal";
    const WIRE_LEN: usize = 32;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { cal_point: r.array()?, temp_cal_point: PowerDetTempCalPoint::read(r)? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_array(buf, &self.cal_point);
        self.temp_cal_point.write(buf);
    }
}

/// Auto-regression filter coefficients (8Q8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AutoReg {
    pub alpha: u16,
    pub beta: u16,
}

impl AutoReg {
    pub fn alpha_f64(&self) -> f64 {
        fixed::q8_8(self.alpha)
    }

    pub fn beta_f64(&self) -> f64 {
        fixed::q8_8(self.beta)
    }
}

impl Record for AutoReg {
    const NAME: &'static str = "AutoReg";
    const WIRE_LEN: usize = 4;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { alpha: r.u16()?, beta: r.u16()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.alpha);
        codec::write_uint16(buf, self.beta);
    }
}

/// Settings for an antenna driven through an external compensator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompensatorConfig {
    pub tx_pa_on_delay: u32,
    pub debug_enable: u32,
    pub compensator_return: CompensatorReturn,
    pub tx_power_thresh: i32,
    pub auto_reg: AutoReg,
    pub tx_rf_gain: i32,
    pub cable_loss: i32,
    pub rx_rf_gain: i32,
    pub rssi_cal: TemperatureComp,
}

impl Record for CompensatorConfig {
    const NAME: &'static str = "CompensatorConfig";
    const WIRE_LEN: usize = 76;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            tx_pa_on_delay: r.u32()?,
            debug_enable: r.u32()?,
            compensator_return: CompensatorReturn::decode(
                r.u32()?,
                "CompensatorConfig.CompensatorReturn",
            )?,
            tx_power_thresh: r.i32()?,
            auto_reg: AutoReg::read(r)?,
            tx_rf_gain: r.i32()?,
            cable_loss: r.i32()?,
            rx_rf_gain: r.i32()?,
            rssi_cal: TemperatureComp::read(r)?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.tx_pa_on_delay);
        codec::write_uint32(buf, self.debug_enable);
        codec::write_uint32(buf, self.compensator_return.as_raw());
        codec::write_int32(buf, self.tx_power_thresh);
        self.auto_reg.write(buf);
        codec::write_int32(buf, self.tx_rf_gain);
        codec::write_int32(buf, self.cable_loss);
        codec::write_int32(buf, self.rx_rf_gain);
        self.rssi_cal.write(buf);
    }
}

/// Settings for an antenna with a local PA/LNA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LocalPalnaConfig {
    pub tx_pa_on_delay: u32,
    pub tx_power_det_input: AuxAdcIndex,
    pub debug_enable: u8,
    pub reserved: [u8; 2],
    pub tx_power_det_cal: PowerDetCal,
    pub tx_power_temp_cal: TemperatureComp,
    pub auto_reg: AutoReg,
    pub tx_rf_gain: i32,
    pub rssi_cal: TemperatureComp,
}

impl Record for LocalPalnaConfig {
    const NAME: &'static str = "LocalPalnaConfig";
    const WIRE_LEN: usize = 136;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            tx_pa_on_delay: r.u32()?,
            tx_power_det_input: AuxAdcIndex::decode(r.u8()?, "LocalPalnaConfig.TxPowerDetInput")?,
            debug_enable: r.u8()?,
            reserved: r.bytes::<2>()?,
            tx_power_det_cal: PowerDetCal::read(r)?,
            tx_power_temp_cal: TemperatureComp::read(r)?,
            auto_reg: AutoReg::read(r)?,
            tx_rf_gain: r.i32()?,
            rssi_cal: TemperatureComp::read(r)?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.tx_pa_on_delay);
        codec::write_uint8(buf, self.tx_power_det_input.as_raw());
        codec::write_uint8(buf, self.debug_enable);
        codec::write_bytes(buf, &self.reserved);
        self.tx_power_det_cal.write(buf);
        self.tx_power_temp_cal.write(buf);
        self.auto_reg.write(buf);
        codec::write_int32(buf, self.tx_rf_gain);
        self.rssi_cal.write(buf);
    }
}

/// Calibration for one antenna.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AntCalibration {
    pub compensator_sel: CompensatorSel,
    pub tx_power_cal_mode: PowerCalMode,
    pub rssi_cal_mode: RssiCalMode,
    pub reserved: u8,
    pub compensator: CompensatorConfig,
    pub local_palna: LocalPalnaConfig,
    /// 0.5 dB units, per calibration channel.
    pub tx_power_extra_drive: [i32; CAL_CHANNEL_COUNT],
    /// Degrees Celsius above which Tx power is limited.
    pub tx_power_limit_max_temp: i16,
    /// 0.5 dBm units.
    pub tx_power_limit_max_power: i16,
    pub tx_lo_search_freq: i32,
}

impl AntCalibration {
    /// Conservative starting point: no compensator, calibration off.
    pub fn uncalibrated() -> Self {
        let rssi_cal = TemperatureComp::default();
        Self {
            compensator_sel: CompensatorSel::NoCompensator,
            tx_power_cal_mode: PowerCalMode::Off,
            rssi_cal_mode: RssiCalMode::Off,
            reserved: 0,
            compensator: CompensatorConfig {
                tx_pa_on_delay: 0,
                debug_enable: 0,
                compensator_return: CompensatorReturn::Uart0,
                tx_power_thresh: 0,
                auto_reg: AutoReg::default(),
                tx_rf_gain: 0,
                cable_loss: 0,
                rx_rf_gain: 0,
                rssi_cal,
            },
            local_palna: LocalPalnaConfig {
                tx_pa_on_delay: 0,
                tx_power_det_input: AuxAdcIndex::Invalid,
                debug_enable: 0,
                reserved: [0; 2],
                tx_power_det_cal: PowerDetCal::default(),
                tx_power_temp_cal: TemperatureComp::default(),
                auto_reg: AutoReg::default(),
                tx_rf_gain: 0,
                rssi_cal,
            },
            tx_power_extra_drive: [0; CAL_CHANNEL_COUNT],
            tx_power_limit_max_temp: 0,
            tx_power_limit_max_power: 0,
            tx_lo_search_freq: 0,
        }
    }
}

impl Record for AntCalibration {
    const NAME: &'static str = "AntCalibration";
    const WIRE_LEN: usize = 264;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            compensator_sel: CompensatorSel::decode(r.u8()?, "AntCalibration.CompensatorSel")?,
            tx_power_cal_mode: PowerCalMode::decode(r.u8()?, "AntCalibration.TxPowerCalMode")?,
            rssi_cal_mode: RssiCalMode::decode(r.u8()?, "AntCalibration.RSSICalMode")?,
            reserved: r.u8()?,
            compensator: CompensatorConfig::read(r)?,
            local_palna: LocalPalnaConfig::read(r)?,
            tx_power_extra_drive: r.i32_array()?,
            tx_power_limit_max_temp: r.i16()?,
            tx_power_limit_max_power: r.i16()?,
            tx_lo_search_freq: r.i32()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.compensator_sel.as_raw());
        codec::write_uint8(buf, self.tx_power_cal_mode.as_raw());
        codec::write_uint8(buf, self.rssi_cal_mode.as_raw());
        codec::write_uint8(buf, self.reserved);
        self.compensator.write(buf);
        self.local_palna.write(buf);
        codec::write_int32_array(buf, &self.tx_power_extra_drive);
        codec::write_int16(buf, self.tx_power_limit_max_temp);
        codec::write_int16(buf, self.tx_power_limit_max_power);
        codec::write_int32(buf, self.tx_lo_search_freq);
    }
}

/// Receive acquisition detection thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AcquisitionConfig {
    pub rx_acq_detect_thresh_sing_ant1: u32,
    pub rx_acq_detect_thresh_sing_ant2: u32,
    pub rx_acq_detect_thresh_dual_ant: u32,
}

impl Record for AcquisitionConfig {
    const NAME: &'static str = "AcquisitionConfig";
    const WIRE_LEN: usize = 12;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            rx_acq_detect_thresh_sing_ant1: r.u32()?,
            rx_acq_detect_thresh_sing_ant2: r.u32()?,
            rx_acq_detect_thresh_dual_ant: r.u32()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.rx_acq_detect_thresh_sing_ant1);
        codec::write_uint32(buf, self.rx_acq_detect_thresh_sing_ant2);
        codec::write_uint32(buf, self.rx_acq_detect_thresh_dual_ant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WireError;

    #[test]
    fn ant_calibration_size_and_offsets() {
        let mut ant = AntCalibration::uncalibrated();
        ant.compensator.cable_loss = -3;
        ant.local_palna.tx_rf_gain = 0x1234;
        ant.tx_lo_search_freq = 7;
        let bytes = ant.encode();
        assert_eq!(bytes.len(), AntCalibration::WIRE_LEN);
        // Header (4) + TxPAOnDelay..TxRFGain (24) puts CableLoss at 28.
        assert_eq!(&bytes[28..32], &(-3i32).to_le_bytes());
        // LocalPALNA starts at 80; TxRFGain sits after 4+4+32+44+4 bytes.
        assert_eq!(&bytes[168..172], &0x1234i32.to_le_bytes());
        assert_eq!(&bytes[260..264], &7i32.to_le_bytes());
        assert_eq!(bytes[84], AuxAdcIndex::Invalid.as_raw());
        assert_eq!(AntCalibration::decode(&bytes).unwrap(), ant);
    }

    #[test]
    fn ant_calibration_rejects_bad_modes() {
        let mut bytes = AntCalibration::uncalibrated().encode();
        bytes[1] = 3;
        assert!(matches!(
            AntCalibration::decode(&bytes),
            Err(WireError::OutOfRangeField { field: "AntCalibration.TxPowerCalMode", value: 3 })
        ));
        let mut bytes = AntCalibration::uncalibrated().encode();
        bytes[12..16].copy_from_slice(&9u32.to_le_bytes());
        assert!(matches!(
            AntCalibration::decode(&bytes),
            Err(WireError::OutOfRangeField { field: "CompensatorConfig.CompensatorReturn", value: 9 })
        ));
    }

    #[test]
    fn fixed_point_accessors() {
        let comp = TemperatureComp { slope: -0x8000, zero_intercept: [0; CAL_CHANNEL_COUNT] };
        assert_eq!(comp.slope_f64(), -0.5);
        let ar = AutoReg { alpha: 0x0100, beta: 0x0040 };
        assert_eq!(ar.alpha_f64(), 1.0);
        assert_eq!(ar.beta_f64(), 0.25);
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn power_det_cal_round_trip(bytes in proptest::collection::vec(any::<u8>(), 32)) {
                prop_assert_eq!(PowerDetCal::decode(&bytes).unwrap().encode(), bytes);
            }

            #[test]
            fn temperature_comp_round_trip(slope: i32, intercept: [i32; 10]) {
                let comp = TemperatureComp { slope, zero_intercept: intercept };
                prop_assert_eq!(TemperatureComp::decode(&comp.encode()).unwrap(), comp);
            }
        }
    }
}
