//! r17.1 calibration data (version 3).
//!
//! Adds GPIO pin assignment and analog temperature sensor calibration to the
//! r16 layout, and renames the I2C sensor addresses.

use bytes::BufMut;

use crate::codec::{self, Reader, Record};
use crate::error::{Result, WireError};
use crate::types::AuxAdcIndex;

pub use crate::common::calibration::{
    ANT_COUNT, AcquisitionConfig, AntCalibration, AutoReg, CAL_CHANNEL_COUNT, CAL_POINT_COUNT,
    CompensatorConfig, LocalPalnaConfig, PowerDetCal, PowerDetCalPoint, PowerDetTempCalPoint,
    TemperatureComp,
};

use super::CALIBRATION_VERSION;

wire_enum! {
    /// Where the PA temperature comes from.
    pub enum TempSource(u16) {
        /// Supplied by the host through `Temp` messages.
        Manual = 0,
        I2cSingle = 1,
        I2cDual = 2,
        AnalogSingle = 3,
        AnalogDual = 4,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TempConfig {
    pub sensor_source: TempSource,
    pub i2c_addr_sensor1: u8,
    pub i2c_addr_sensor2: u8,
    /// Sampling period in milliseconds.
    pub sensor_period: u32,
}

impl Record for TempConfig {
    const NAME: &'static str = "TempConfig";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            sensor_source: TempSource::decode(r.u16()?, "TempConfig.SensorSource")?,
            i2c_addr_sensor1: r.u8()?,
            i2c_addr_sensor2: r.u8()?,
            sensor_period: r.u32()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.sensor_source.as_raw());
        codec::write_uint8(buf, self.i2c_addr_sensor1);
        codec::write_uint8(buf, self.i2c_addr_sensor2);
        codec::write_uint32(buf, self.sensor_period);
    }
}

/// RF front-end GPIO assignment for one antenna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RfPinConfig {
    pub pa_enable_gpio: u16,
    pub lna_enable_gpio: u16,
    pub remote_pa_enable_gpio: u16,
    pub c1_gpio: u16,
    pub tx_claim_gpio: u16,
    pub compensator_enable_gpio: u16,
}

impl Record for RfPinConfig {
    const NAME: &'static str = "RfPinConfig";
    const WIRE_LEN: usize = 12;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            pa_enable_gpio: r.u16()?,
            lna_enable_gpio: r.u16()?,
            remote_pa_enable_gpio: r.u16()?,
            c1_gpio: r.u16()?,
            tx_claim_gpio: r.u16()?,
            compensator_enable_gpio: r.u16()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        for v in [
            self.pa_enable_gpio,
            self.lna_enable_gpio,
            self.remote_pa_enable_gpio,
            self.c1_gpio,
            self.tx_claim_gpio,
            self.compensator_enable_gpio,
        ] {
            codec::write_uint16(buf, v);
        }
    }
}

/// RF switching delays, in 1/120 MHz ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RfTimingConfig {
    pub pa_enable_lna_disable: u16,
    pub baseband_start: u16,
    pub auxillary_adc: u16,
    pub remote_pa_disable: u16,
    pub pa_disable: u16,
    pub lna_enable: u16,
}

impl Record for RfTimingConfig {
    const NAME: &'static str = "RfTimingConfig";
    const WIRE_LEN: usize = 12;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            pa_enable_lna_disable: r.u16()?,
            baseband_start: r.u16()?,
            auxillary_adc: r.u16()?,
            remote_pa_disable: r.u16()?,
            pa_disable: r.u16()?,
            lna_enable: r.u16()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        for v in [
            self.pa_enable_lna_disable,
            self.baseband_start,
            self.auxillary_adc,
            self.remote_pa_disable,
            self.pa_disable,
            self.lna_enable,
        ] {
            codec::write_uint16(buf, v);
        }
    }
}

/// Coexistence signalling pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoexistPinConfig {
    pub tx_active_gpio: u16,
    pub rx_active_gpio: u16,
    pub other_radio_tx_active_gpio: u16,
    pub other_radio_rx_active_gpio: u16,
}

impl Record for CoexistPinConfig {
    const NAME: &'static str = "CoexistPinConfig";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            tx_active_gpio: r.u16()?,
            rx_active_gpio: r.u16()?,
            other_radio_tx_active_gpio: r.u16()?,
            other_radio_rx_active_gpio: r.u16()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.tx_active_gpio);
        codec::write_uint16(buf, self.rx_active_gpio);
        codec::write_uint16(buf, self.other_radio_tx_active_gpio);
        codec::write_uint16(buf, self.other_radio_rx_active_gpio);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinConfig {
    pub rf: [RfPinConfig; ANT_COUNT],
    pub timing: RfTimingConfig,
    pub one_pps_gpio: u16,
    pub cca_gpio: u16,
    pub coexistence: CoexistPinConfig,
}

impl Record for PinConfig {
    const NAME: &'static str = "PinConfig";
    const WIRE_LEN: usize = 48;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            rf: r.array()?,
            timing: RfTimingConfig::read(r)?,
            one_pps_gpio: r.u16()?,
            cca_gpio: r.u16()?,
            coexistence: CoexistPinConfig::read(r)?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_array(buf, &self.rf);
        self.timing.write(buf);
        codec::write_uint16(buf, self.one_pps_gpio);
        codec::write_uint16(buf, self.cca_gpio);
        self.coexistence.write(buf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuxAdcCalPoint {
    pub aux_adc_val: i32,
    pub temp_rate: i32,
    pub temp_offset: i32,
}

impl Record for AuxAdcCalPoint {
    const NAME: &'static str = "AuxAdcCalPoint";
    const WIRE_LEN: usize = 12;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { aux_adc_val: r.i32()?, temp_rate: r.i32()?, temp_offset: r.i32()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_int32(buf, self.aux_adc_val);
        codec::write_int32(buf, self.temp_rate);
        codec::write_int32(buf, self.temp_offset);
    }
}

/// Two-point calibration of one analog temperature sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnalogTempCalib {
    pub aux_adc_input: AuxAdcIndex,
    pub pad: [u8; 3],
    pub cal_point: [AuxAdcCalPoint; CAL_POINT_COUNT],
}

impl Record for AnalogTempCalib {
    const NAME: &'static str = "AnalogTempCalib";
    const WIRE_LEN: usize = 28;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            aux_adc_input: AuxAdcIndex::decode(r.u8()?, "AnalogTempCalib.AuxADCInput")?,
            pad: r.bytes::<3>()?,
            cal_point: r.array()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.aux_adc_input.as_raw());
        codec::write_bytes(buf, &self.pad);
        codec::write_array(buf, &self.cal_point);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnalogTempConfig {
    pub sensor: [AnalogTempCalib; ANT_COUNT],
}

impl Record for AnalogTempConfig {
    const NAME: &'static str = "AnalogTempConfig";
    const WIRE_LEN: usize = 56;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { sensor: r.array()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_array(buf, &self.sensor);
    }
}

/// Full calibration record (payload of `Calibration`).
///
/// The device applies it immediately and does not double-buffer it, so it
/// must not be updated while transmissions are in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalibrationData {
    pub version: u32,
    pub ant: [AntCalibration; ANT_COUNT],
    pub acquisition: AcquisitionConfig,
    pub temp_config: TempConfig,
    pub acquisition_20mhz: AcquisitionConfig,
    pub pin_config: PinConfig,
    pub analog_temp: AnalogTempConfig,
}

impl CalibrationData {
    /// Calibration with every correction disabled and a manual temperature
    /// source.
    pub fn uncalibrated() -> Self {
        let sensor = AnalogTempCalib {
            aux_adc_input: AuxAdcIndex::Invalid,
            pad: [0; 3],
            cal_point: [AuxAdcCalPoint::default(); CAL_POINT_COUNT],
        };
        Self {
            version: CALIBRATION_VERSION,
            ant: [AntCalibration::uncalibrated(); ANT_COUNT],
            acquisition: AcquisitionConfig::default(),
            temp_config: TempConfig {
                sensor_source: TempSource::Manual,
                i2c_addr_sensor1: 0,
                i2c_addr_sensor2: 0,
                sensor_period: 0,
            },
            acquisition_20mhz: AcquisitionConfig::default(),
            pin_config: PinConfig::default(),
            analog_temp: AnalogTempConfig { sensor: [sensor; ANT_COUNT] },
        }
    }
}

impl Record for CalibrationData {
    const NAME: &'static str = "CalibrationData";
    const WIRE_LEN: usize = 668;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let version = r.u32()?;
        if version != CALIBRATION_VERSION {
            return Err(WireError::CalibrationVersion { expected: CALIBRATION_VERSION, got: version });
        }
        Ok(Self {
            version,
            ant: r.array()?,
            acquisition: AcquisitionConfig::read(r)?,
            temp_config: TempConfig::read(r)?,
            acquisition_20mhz: AcquisitionConfig::read(r)?,
            pin_config: PinConfig::read(r)?,
            analog_temp: AnalogTempConfig::read(r)?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.version);
        codec::write_array(buf, &self.ant);
        self.acquisition.write(buf);
        self.temp_config.write(buf);
        self.acquisition_20mhz.write(buf);
        self.pin_config.write(buf);
        self.analog_temp.write(buf);
    }
}
