//! LLC API r16 (API version 3.0), the legacy revision.
//!
//! 8-byte header without `Ref`, 17 message types, byte-wide temperature
//! readings and the CLA/INS/LC/LE C2X APDU framing.

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
pub use status::{Status, StatusCode};

use crate::session::ApiVersion;

/// Revision name used in errors and logs.
pub const REVISION: &str = "r16";

/// API version this codec speaks.
pub const API_VERSION: ApiVersion = ApiVersion::new(3, 0);

/// Calibration data layout version.
pub const CALIBRATION_VERSION: u32 = 1;

