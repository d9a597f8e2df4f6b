//! r16 calibration data (version 1).

use bytes::BufMut;

use crate::codec::{self, Reader, Record};
use crate::error::{Result, WireError};

pub use crate::common::calibration::{
    ANT_COUNT, AcquisitionConfig, AntCalibration, AutoReg, CAL_CHANNEL_COUNT, CAL_POINT_COUNT,
    CompensatorConfig, LocalPalnaConfig, PowerDetCal, PowerDetCalPoint, PowerDetTempCalPoint,
    TemperatureComp,
};

use super::CALIBRATION_VERSION;

wire_enum! {
    pub enum TempSource(u16) {
        Manual = 0,
        /// I2C sensor on the antenna 1 PA only.
        Pa1Only = 1,
        Both = 2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TempConfig {
    pub sensor_source: TempSource,
    pub i2c_addr_pa_ant1: u8,
    pub i2c_addr_pa_ant2: u8,
    pub sensor_period: u32,
}

impl Record for TempConfig {
    const NAME: &'static str = "TempConfig";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            sensor_source: TempSource::decode(r.u16()?, "TempConfig.SensorSource")?,
            i2c_addr_pa_ant1: r.u8()?,
            i2c_addr_pa_ant2: r.u8()?,
            sensor_period: r.u32()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.sensor_source.as_raw());
        codec::write_uint8(buf, self.i2c_addr_pa_ant1);
        codec::write_uint8(buf, self.i2c_addr_pa_ant2);
        codec::write_uint32(buf, self.sensor_period);
    }
}

/// Per-antenna RF calibration, acquisition thresholds and temperature
/// sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalibrationData {
    pub version: u32,
    pub ant: [AntCalibration; ANT_COUNT],
    pub acquisition: AcquisitionConfig,
    pub temp_config: TempConfig,
}

impl CalibrationData {
    pub fn uncalibrated() -> Self {
        Self {
            version: CALIBRATION_VERSION,
            ant: [AntCalibration::uncalibrated(); ANT_COUNT],
            acquisition: AcquisitionConfig::default(),
            temp_config: TempConfig {
                sensor_source: TempSource::Manual,
                i2c_addr_pa_ant1: 0,
                i2c_addr_pa_ant2: 0,
                sensor_period: 0,
            },
        }
    }
}

impl Record for CalibrationData {
    const NAME: &'static str = "CalibrationData";
    const WIRE_LEN: usize = 552;

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
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.version);
        codec::write_array(buf, &self.ant);
        self.acquisition.write(buf);
        self.temp_config.write(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_layout() {
        let mut cal = CalibrationData::uncalibrated();
        cal.temp_config.sensor_source = TempSource::Both;
        cal.temp_config.sensor_period = 1000;
        let bytes = cal.encode();
        assert_eq!(bytes.len(), 552);
        assert_eq!(&bytes[0..4], &1u32.to_le_bytes());
        assert_eq!(&bytes[544..546], &2u16.to_le_bytes());
        assert_eq!(&bytes[548..552], &1000u32.to_le_bytes());
        assert_eq!(CalibrationData::decode(&bytes).unwrap(), cal);
    }

    #[test]
    fn r17_version_is_rejected() {
        let mut bytes = CalibrationData::uncalibrated().encode();
        bytes[0] = 3;
        assert!(matches!(
            CalibrationData::decode(&bytes),
            Err(WireError::CalibrationVersion { expected: 1, got: 3 })
        ));
    }

    #[test]
    fn analog_sources_do_not_exist() {
        let mut bytes = CalibrationData::uncalibrated().encode();
        bytes[544] = 3;
        assert!(matches!(
            CalibrationData::decode(&bytes),
            Err(WireError::OutOfRangeField { field: "TempConfig.SensorSource", value: 3 })
        ));
    }
}
