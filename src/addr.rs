//! Radio and channel selectors.
//!
//! The modem has two radios, each time-sharing two logical channels. Both
//! selectors are single bytes on the wire.

use std::fmt;

use crate::codec::Reader;
use crate::error::Result;

/// Number of radios on the modem.
pub const RADIO_COUNT: usize = 2;
/// Number of logical channels per radio.
pub const CHANNEL_COUNT: usize = 2;

wire_enum! {
    /// Physical radio.
    pub enum Radio(u8) {
        A = 0,
        B = 1,
    }
}

wire_enum! {
    /// Logical channel on a radio.
    pub enum Channel(u8) {
        Zero = 0,
        One = 1,
    }
}

impl Radio {
    pub(crate) fn read(r: &mut Reader<'_>, field: &'static str) -> Result<Self> {
        Self::decode(r.u8()?, field)
    }

    /// Index into per-radio arrays.
    pub fn index(self) -> usize {
        self.as_raw() as usize
    }
}

impl Channel {
    pub(crate) fn read(r: &mut Reader<'_>, field: &'static str) -> Result<Self> {
        Self::decode(r.u8()?, field)
    }

    /// Index into per-channel arrays.
    pub fn index(self) -> usize {
        self.as_raw() as usize
    }
}

impl fmt::Display for Radio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radio::A => write!(f, "radio A"),
            Radio::B => write!(f, "radio B"),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel {}", self.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WireError;

    #[test]
    fn round_trip() {
        for radio in [Radio::A, Radio::B] {
            assert_eq!(Radio::from_raw(radio.as_raw()), Some(radio));
        }
        for chan in [Channel::Zero, Channel::One] {
            assert_eq!(Channel::from_raw(chan.as_raw()), Some(chan));
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(Radio::from_raw(2), None);
        let err = Channel::read(&mut Reader::new(&[7]), "ChannelID").unwrap_err();
        assert!(matches!(err, WireError::OutOfRangeField { field: "ChannelID", value: 7 }));
    }

    #[test]
    fn display() {
        assert_eq!(Radio::B.to_string(), "radio B");
        assert_eq!(Channel::One.to_string(), "channel 1");
    }
}
