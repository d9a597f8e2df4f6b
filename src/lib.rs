//! Codec for the MKx / SAF5x00 LLC message protocol between a V2X host and
//! its radio, API revisions r16 and r17.1.
//!
//! The two revisions are independent codecs under [`r16`] and [`r17`]; a
//! session picks one and never mixes them.

#[macro_use]
mod macros;

pub mod addr;
pub mod codec;
pub mod common;
pub mod error;
pub mod frame;
pub mod r16;
pub mod r17;
pub mod saf;
pub mod seq;
pub mod session;
pub mod types;

pub use addr::{Channel, Radio};
pub use error::{Result, WireError};
pub use frame::{FrameSplitter, Hex};
pub use session::{ApiVersion, DecodePolicy, Direction, SessionConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r17_envelopes_never_decode_as_r16() {
        let policy = DecodePolicy::default();
        // Tag 19 (Log) is outside the r16 catalog.
        let log = r17::Envelope::new(r17::Message::Log(r17::device::Log::control(true)), 1, 1).encode().unwrap();
        assert!(matches!(
            r16::Envelope::decode(&log, &policy),
            Err(WireError::UnsupportedType { type_id: 19, revision: "r16" })
        ));

        // The 12-byte header shifts the payload, so the sizes disagree.
        let temp = r17::Envelope::new(r17::Message::Temp(Default::default()), 1, 1).with_ret(0).encode().unwrap();
        assert!(matches!(r16::Envelope::decode(&temp, &policy), Err(WireError::MalformedMessage { .. })));
    }

    #[test]
    fn version_reply_from_the_other_revision_blocks() {
        let r17_reply = r17::Envelope::new(r17::Message::ApiVersion(Some(ApiVersion::new(6, 0))), 1, 1)
            .with_ret(0)
            .encode()
            .unwrap();
        let mut r16_session = r16::Dispatcher::new(SessionConfig::default());
        assert!(matches!(
            r16_session.dispatch(&r17_reply, &mut NoopR16),
            Err(WireError::VersionMismatch { local_major: 3, peer_major: 6, .. })
        ));
        let debug = r17::Envelope::new(r17::Message::Debug(vec![1, 2, 3]), 2, 2).encode().unwrap();
        assert!(matches!(r16_session.dispatch(&debug, &mut NoopR16), Err(WireError::Blocked)));

        let r16_reply = r16::Envelope::new(r16::Message::ApiVersion(Some(ApiVersion::new(3, 0))), 1)
            .with_ret(0)
            .encode()
            .unwrap();
        let mut r17_session = r17::Dispatcher::new(SessionConfig::default());
        assert!(matches!(
            r17_session.dispatch(&r16_reply, &mut NoopR17),
            Err(WireError::VersionMismatch { local_major: 6, peer_major: 3, .. })
        ));
        assert!(r17_session.gate().is_blocked());
        assert!(matches!(r17_session.get_tsf(), Err(WireError::Blocked)));
    }

    struct NoopR16;
    impl r16::Handler for NoopR16 {}

    struct NoopR17;
    impl r17::Handler for NoopR17 {}

    #[test]
    fn stream_of_mixed_messages_splits_on_len() {
        let mut bytes = r16::Envelope::new(r16::Message::GetTsf(None), 1).encode().unwrap();
        bytes.extend(r16::Envelope::new(r16::Message::GetTsf(Some(5)), 2).encode().unwrap());
        let mut splitter = FrameSplitter::new(r16::HEADER_LEN);
        let frames = splitter.feed(&bytes[..10]);
        assert_eq!(frames.len(), 1);
        let frames = splitter.feed(&bytes[10..]);
        assert_eq!(frames.len(), 1);
        let env = r16::Envelope::decode(&frames[0], &DecodePolicy::default()).unwrap();
        assert_eq!(env.message, r16::Message::GetTsf(Some(5)));
        assert_eq!(splitter.pending(), 0);
    }
}
