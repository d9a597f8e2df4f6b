//! TSF, AuxADC and AuxADC configuration records.

use bytes::BufMut;

use crate::codec::{self, Reader, Record};
use crate::error::Result;
use crate::types::{AUXADC_INDEX_COUNT, SetTsfCmd};

/// Set the MAC clock from UTC.
///
/// Sent by the host to set the TSF, and by the device to report the
/// UTC/TSF pair captured at a 1PPS event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetTsf {
    pub cmd: SetTsfCmd,
    pub reserved: [u8; 3],
    /// UTC in microseconds since the epoch.
    pub utc: u64,
    /// TSF the UTC value applies at (ignored for `UtcAt1Pps`).
    pub tsf: u64,
}

impl SetTsf {
    pub fn at_1pps(utc: u64) -> Self {
        Self { cmd: SetTsfCmd::UtcAt1Pps, reserved: [0; 3], utc, tsf: 0 }
    }

    pub fn at_tsf(utc: u64, tsf: u64) -> Self {
        Self { cmd: SetTsfCmd::UtcAtTsf, reserved: [0; 3], utc, tsf }
    }
}

impl Record for SetTsf {
    const NAME: &'static str = "SetTsf";
    const WIRE_LEN: usize = 20;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            cmd: SetTsfCmd::decode(r.u8()?, "SetTsf.Cmd")?,
            reserved: r.bytes::<3>()?,
            utc: r.u64()?,
            tsf: r.u64()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.cmd.as_raw());
        codec::write_bytes(buf, &self.reserved);
        codec::write_uint64(buf, self.utc);
        codec::write_uint64(buf, self.tsf);
    }
}

/// One AuxADC sample per input with the TSF it was taken at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuxAdc {
    pub values: [u32; AUXADC_INDEX_COUNT],
    pub timestamps: [u64; AUXADC_INDEX_COUNT],
}

impl Record for AuxAdc {
    const NAME: &'static str = "AuxAdc";
    const WIRE_LEN: usize = 84;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { values: r.u32_array()?, timestamps: r.u64_array()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32_array(buf, &self.values);
        codec::write_uint64_array(buf, &self.timestamps);
    }
}

/// AuxADC configuration register, passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuxAdcCfg {
    pub config_register: u32,
}

impl Record for AuxAdcCfg {
    const NAME: &'static str = "AuxAdcCfg";
    const WIRE_LEN: usize = 4;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { config_register: r.u32()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.config_register);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WireError;

    #[test]
    fn set_tsf_layout() {
        let msg = SetTsf::at_tsf(0x0102_0304_0506_0708, 0x1000);
        let bytes = msg.encode();
        assert_eq!(bytes.len(), SetTsf::WIRE_LEN);
        assert_eq!(bytes[0], 2);
        assert_eq!(&bytes[1..4], &[0, 0, 0]);
        assert_eq!(&bytes[4..12], &0x0102_0304_0506_0708u64.to_le_bytes());
        assert_eq!(SetTsf::decode(&bytes).unwrap(), msg);
    }

    #[test]
    fn set_tsf_rejects_unknown_cmd() {
        let mut bytes = SetTsf::at_1pps(5).encode();
        bytes[0] = 0;
        assert!(matches!(
            SetTsf::decode(&bytes),
            Err(WireError::OutOfRangeField { field: "SetTsf.Cmd", value: 0 })
        ));
    }

    #[test]
    fn aux_adc_layout() {
        let mut adc = AuxAdc::default();
        adc.values[6] = 0xABCD;
        adc.timestamps[0] = 77;
        let bytes = adc.encode();
        assert_eq!(bytes.len(), 84);
        assert_eq!(&bytes[24..28], &0xABCDu32.to_le_bytes());
        assert_eq!(&bytes[28..36], &77u64.to_le_bytes());
        assert_eq!(AuxAdc::decode(&bytes).unwrap(), adc);
        assert_eq!(AuxAdcCfg { config_register: 0x7F }.encode(), vec![0x7F, 0, 0, 0]);
    }
}
