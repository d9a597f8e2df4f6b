//! API call status (`MKxStatus`) for r16.

use std::fmt;

use crate::error::{Result, WireError};

wire_enum! {
    /// Named status values. The numbering differs from r17.1.
    pub enum StatusCode(i16) {
        Success = 0,
        InternalError = -256,
        InvalidHandle = -257,
        InvalidConfig = -258,
        InvalidLength = -259,
        InvalidParam = -260,
        AutocalRejectSimultaneous = -261,
        AutocalRejectUnconfigured = -262,
        InvalidCalibration = -263,
        InvalidCalibrationVersion = -264,
        /// Upper end of the radio-config error block.
        RadioconfigMax = -513,
        /// Lower end of the radio-config error block.
        RadioconfigMin = -768,
        TxFailTtl = -769,
        TxFailRetries = -770,
        TxFailQueuefull = -771,
        TxFailRadioNotPresent = -772,
        TxFailMalformed = -773,
        TxFailRadioUnconfigured = -774,
        TxFailPacketTooLong = -775,
        SecurityAcceleratorNotPresent = -1024,
        SecurityFifoFull = -1025,
        /// `MKXSTATUS_RESERVED`, placed in `Ret` of host requests.
        Reserved = -16166,
    }
}

/// Lowest value of the OS errno passthrough range.
pub const ERRNO_MIN: i16 = -255;

/// Outcome carried in `Ret` of every r16 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Status {
    Known(StatusCode),
    /// Negated OS errno (`-1..=-255`).
    Errno(i16),
    Unknown(i16),
}

impl Status {
    pub const SUCCESS: Self = Self::Known(StatusCode::Success);

    pub fn from_raw(raw: i16) -> Self {
        match StatusCode::from_raw(raw) {
            Some(code) => Self::Known(code),
            None if (ERRNO_MIN..0).contains(&raw) => Self::Errno(raw),
            None => Self::Unknown(raw),
        }
    }

    pub fn decode_strict(raw: i16, field: &'static str) -> Result<Self> {
        match Self::from_raw(raw) {
            Self::Unknown(v) => Err(WireError::out_of_range(field, i64::from(v))),
            status => Ok(status),
        }
    }

    pub fn as_raw(self) -> i16 {
        match self {
            Self::Known(code) => code.as_raw(),
            Self::Errno(v) | Self::Unknown(v) => v,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    pub fn is_tx_failure(self) -> bool {
        (StatusCode::TxFailPacketTooLong.as_raw()..=StatusCode::TxFailTtl.as_raw()).contains(&self.as_raw())
    }

    /// True inside the radio-config error block.
    pub fn is_radio_config_error(self) -> bool {
        (StatusCode::RadioconfigMin.as_raw()..=StatusCode::RadioconfigMax.as_raw()).contains(&self.as_raw())
    }
}

impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        Self::Known(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(code) => write!(f, "{code:?} ({})", code.as_raw()),
            Self::Errno(v) => write!(f, "errno {}", -v),
            Self::Unknown(v) => write!(f, "unknown status {v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_differs_from_r17() {
        assert_eq!(Status::from_raw(-259), Status::Known(StatusCode::InvalidLength));
        assert_eq!(Status::from_raw(-266), Status::Unknown(-266));
        assert_eq!(Status::from_raw(-775), Status::Known(StatusCode::TxFailPacketTooLong));
        assert_eq!(Status::from_raw(0xC0DAu16 as i16), Status::Known(StatusCode::Reserved));
    }

    #[test]
    fn ranges() {
        assert!(Status::from(StatusCode::TxFailRetries).is_tx_failure());
        assert!(!Status::from(StatusCode::SecurityFifoFull).is_tx_failure());
        assert!(Status::from_raw(-600).is_radio_config_error());
        assert!(!Status::from_raw(-769).is_radio_config_error());
        assert_eq!(Status::from_raw(-1), Status::Errno(-1));
        assert!(matches!(
            Status::decode_strict(-600, "Ret"),
            Err(WireError::OutOfRangeField { value: -600, .. })
        ));
    }
}
