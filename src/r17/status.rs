//! API call status (`MKxStatus`) for r17.1, and how to read a header's `Ret`.

use std::fmt;

use crate::error::{Result, WireError};
use crate::saf::SafErrorCode;

use super::header::MsgType;

wire_enum! {
    /// Named status values. The numbering differs from r16.
    pub enum StatusCode(i16) {
        Success = 0,
        InvalidMkxifType = -256,
        InternalError = -257,
        InvalidHandle = -258,
        InvalidLength = -260,
        InvalidParam = -261,
        AutocalRejectSimultaneous = -262,
        AutocalRejectUnconfigured = -263,
        InvalidCalibration = -264,
        InvalidCalibrationVersion = -265,
        InvalidRadio = -266,
        RejectedFailSafeState = -267,
        /// Upper end of the radio-config error block.
        RadioconfigMax = -513,
        RadioconfigGeneric = -766,
        /// Lower end of the radio-config error block.
        RadioconfigMin = -768,
        TxFailTtl = -769,
        TxFailRetries = -770,
        TxFailQueuefull = -771,
        TxFailRadioNotPresent = -772,
        TxFailMalformed = -773,
        TxFailMalformedAtPhy = -774,
        TxFailRadioUnconfigured = -775,
        TxFailPacketTooLong = -776,
        TxFailDma = -777,
        TxFailInvalidAntenna = -778,
        TxFailFailSafeState = -779,
        TxFailHostRadioInterfaceProblem = -780,
        TxEventUploadFailDsp = -800,
        I2cTempAnt1Failure = -810,
        I2cTempAnt2Failure = -811,
        AnalogTempAnt1Failure = -812,
        AnalogTempAnt2Failure = -813,
        InternalTempFailure = -814,
        RxMacBufferOverflowDsp = -832,
        SecurityAcceleratorNotPresent = -1024,
        SecurityFifoFull = -1025,
        SecurityInternalError = -1026,
        SecurityMsgTooShort = -1027,
        GpioInvalidCmd = -1100,
        GpioFifoFull = -1101,
        InvalidDebugmsgType = -1102,
        /// `MKX_API_MAGIC`, placed in `Ret` of host requests.
        Reserved = -16166,
    }
}

/// Lowest value of the OS errno passthrough range.
pub const ERRNO_MIN: i16 = -255;

/// Outcome carried in `Ret` of every message except `Error`, `Warning` and
/// `Fault`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Status {
    Known(StatusCode),
    /// Negated OS errno (`-1..=-255`).
    Errno(i16),
    /// Any other value. Only [`Status::from_raw`] produces this.
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

    /// Like [`from_raw`](Self::from_raw) but undefined values are an error.
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

    /// True for any of the transmit failure codes.
    pub fn is_tx_failure(self) -> bool {
        (StatusCode::TxFailHostRadioInterfaceProblem.as_raw()..=StatusCode::TxFailTtl.as_raw())
            .contains(&self.as_raw())
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

/// A header's `Ret` field, interpreted for its message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Ret {
    Status(Status),
    /// `Ret` of `Error`, `Warning` and `Fault` messages.
    Fault(SafErrorCode),
    /// Device fault value missing from the fault table.
    UnknownFault(i16),
}

impl Ret {
    pub fn interpret(msg_type: MsgType, raw: i16) -> Self {
        match msg_type {
            MsgType::Error | MsgType::Warning | MsgType::Fault => match SafErrorCode::from_raw(raw) {
                Some(code) => Self::Fault(code),
                None => Self::UnknownFault(raw),
            },
            _ => Self::Status(Status::from_raw(raw)),
        }
    }

    pub fn is_success(self) -> bool {
        match self {
            Self::Status(s) => s.is_success(),
            Self::Fault(code) => code.is_success(),
            Self::UnknownFault(_) => false,
        }
    }
}
