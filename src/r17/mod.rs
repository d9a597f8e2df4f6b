//! LLC API r17.1 (API version 6.0), the current revision.
//!
//! Adds a `Ref` request/response correlator and the `Reserved` magic to the
//! header, widens several records, and adds the `Error`, `Warning`, `Log`,
//! `Gpio`, `Reset`, `Loopback` and `Fault` messages. The C2X APDU uses the
//! USN/INS/CurveID framing.

pub mod c2x;
pub mod calibration;
pub mod device;
pub mod dispatch;
pub mod header;
pub mod message;
pub mod radio;
pub mod status;

pub use crate::common::packet;

pub use dispatch::{Dispatcher, Handler};
pub use header::{Frame, HEADER_LEN, Header, MsgType};
pub use message::{Envelope, Message};
pub use status::{Ret, Status, StatusCode};

use crate::session::ApiVersion;

/// Revision name used in errors and logs.
pub const REVISION: &str = "r17.1";

/// API version this codec speaks.
pub const API_VERSION: ApiVersion = ApiVersion::new(6, 0);

/// Calibration data layout version (`MKX_CALIBRATION_VERSION`).
pub const CALIBRATION_VERSION: u32 = 3;
