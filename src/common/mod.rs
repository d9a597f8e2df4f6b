//! Records whose byte layout is identical in r16 and r17.1.
//!
//! Each revision module re-exports what it uses from here, so callers only
//! ever name `r16::...` or `r17::...`.

pub mod calibration;
pub mod device;
pub mod packet;
pub mod radio;
