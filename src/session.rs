//! Session state shared by both API revisions.
//!
//! The codec itself is stateless. Everything that lives for the duration of
//! a host/device session sits here: the decode policy, the API version gate,
//! the inbound buffer allocator, and drop counters.

use bytes::BufMut;
use tracing::{debug, error};

use crate::codec::{Reader, Record, write_uint16};
use crate::error::{Result, WireError};

// ---------------------------------------------------------------------------
// API version record
// ---------------------------------------------------------------------------

/// `Major.Minor` pair carried by an `ApiVersion` reply (same layout in both
/// revisions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl Record for ApiVersion {
    const NAME: &'static str = "ApiVersion";
    const WIRE_LEN: usize = 4;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { major: r.u16()?, minor: r.u16()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        write_uint16(buf, self.major);
        write_uint16(buf, self.minor);
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Which side of the link produced the bytes being decoded.
///
/// Only the C2X security message needs it: its command and response APDUs
/// share one message tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Host to device (commands).
    ToDevice,
    /// Device to host (responses, indications).
    #[default]
    ToHost,
}

/// Knobs that change how strictly payloads are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodePolicy {
    /// Reject non-zero must-be-zero padding (address-matching words).
    pub strict_padding: bool,
    /// Keep bytes past a fixed record instead of rejecting the message.
    /// Enabled by the version gate when the peer has a newer minor version.
    pub allow_trailing: bool,
    pub direction: Direction,
}

impl DecodePolicy {
    pub fn to_device() -> Self {
        Self { direction: Direction::ToDevice, ..Self::default() }
    }

    pub fn to_host() -> Self {
        Self::default()
    }
}

/// Session-wide configuration for a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub policy: DecodePolicy,
    /// Count and drop unknown message tags instead of returning
    /// `UnsupportedType` to the caller.
    pub drop_unsupported: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { policy: DecodePolicy::default(), drop_unsupported: true }
    }
}

// ---------------------------------------------------------------------------
// Version gate
// ---------------------------------------------------------------------------

/// Where the API version handshake stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No version reply seen yet; traffic is decoded normally.
    Pending,
    /// Peer has the same major version.
    Open { peer: ApiVersion },
    /// Peer major differs; all further traffic is refused.
    Blocked { peer: ApiVersion },
}

/// Enforces the major/minor compatibility rule for one session.
#[derive(Debug, Clone)]
pub struct VersionGate {
    local: ApiVersion,
    state: GateState,
}

impl VersionGate {
    pub fn new(local: ApiVersion) -> Self {
        Self { local, state: GateState::Pending }
    }

    pub fn local(&self) -> ApiVersion {
        self.local
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Record the peer's version.
    ///
    /// A different major blocks the session and returns `VersionMismatch`.
    /// Once blocked, every call returns `Blocked`.
    pub fn observe(&mut self, peer: ApiVersion) -> Result<GateState> {
        self.check()?;
        if peer.major != self.local.major {
            error!(local = %self.local, %peer, "LLC API version mismatch");
            self.state = GateState::Blocked { peer };
            return Err(WireError::VersionMismatch {
                local_major: self.local.major,
                local_minor: self.local.minor,
                peer_major: peer.major,
                peer_minor: peer.minor,
            });
        }
        if peer.minor != self.local.minor {
            debug!(local = %self.local, %peer, "minor version differs");
        }
        self.state = GateState::Open { peer };
        Ok(self.state)
    }

    /// `Err(Blocked)` once a major mismatch has been seen.
    pub fn check(&self) -> Result<()> {
        match self.state {
            GateState::Blocked { .. } => Err(WireError::Blocked),
            _ => Ok(()),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.state, GateState::Blocked { .. })
    }

    /// True when the peer may append fields this side does not know.
    pub fn tolerates_trailing(&self) -> bool {
        match self.state {
            GateState::Open { peer } => peer.minor > self.local.minor,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound buffers
// ---------------------------------------------------------------------------

/// Supplies the buffer an inbound Rx frame is copied into.
///
/// Returning `None` makes the dispatcher drop the packet and count it; it is
/// not a codec error.
pub trait RxAllocator {
    fn alloc(&mut self, len: usize) -> Option<Vec<u8>>;
}

/// Allocates every frame on the heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl RxAllocator for HeapAllocator {
    fn alloc(&mut self, len: usize) -> Option<Vec<u8>> {
        Some(Vec::with_capacity(len))
    }
}

impl<F> RxAllocator for F
where
    F: FnMut(usize) -> Option<Vec<u8>>,
{
    fn alloc(&mut self, len: usize) -> Option<Vec<u8>> {
        self(len)
    }
}

/// Messages the dispatcher did not deliver, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropCounters {
    pub rx_alloc_failures: u64,
    pub malformed: u64,
    pub unsupported: u64,
    pub invalid_length: u64,
    pub out_of_range: u64,
    pub blocked: u64,
}

impl DropCounters {
    /// Bump the counter matching `err`.
    pub fn count(&mut self, err: &WireError) {
        match err {
            WireError::TruncatedInput { .. }
            | WireError::MalformedMessage { .. }
            | WireError::CalibrationVersion { .. }
            | WireError::TooLong { .. }
            | WireError::BufferTooSmall { .. } => self.malformed += 1,
            WireError::UnsupportedType { .. }
            | WireError::UnsupportedInstruction { .. }
            | WireError::InvalidCurve { .. } => self.unsupported += 1,
            WireError::InvalidLength { .. } => self.invalid_length += 1,
            WireError::OutOfRangeField { .. } => self.out_of_range += 1,
            WireError::VersionMismatch { .. } | WireError::Blocked => self.blocked += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.rx_alloc_failures
            + self.malformed
            + self.unsupported
            + self.invalid_length
            + self.out_of_range
            + self.blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCAL: ApiVersion = ApiVersion::new(6, 0);

    #[test]
    fn api_version_layout() {
        let v = ApiVersion::new(6, 1);
        assert_eq!(v.encode(), vec![0x06, 0x00, 0x01, 0x00]);
        assert_eq!(ApiVersion::decode(&[0x03, 0x00, 0x00, 0x00]).unwrap(), ApiVersion::new(3, 0));
        assert_eq!(v.to_string(), "6.1");
    }

    #[test]
    fn gate_opens_on_same_major() {
        let mut gate = VersionGate::new(LOCAL);
        assert_eq!(gate.state(), GateState::Pending);
        assert!(gate.check().is_ok());
        let state = gate.observe(ApiVersion::new(6, 0)).unwrap();
        assert_eq!(state, GateState::Open { peer: ApiVersion::new(6, 0) });
        assert!(!gate.tolerates_trailing());
    }

    #[test]
    fn newer_minor_tolerates_trailing() {
        let mut gate = VersionGate::new(LOCAL);
        gate.observe(ApiVersion::new(6, 2)).unwrap();
        assert!(gate.tolerates_trailing());
        // An older peer minor never appends anything.
        gate.observe(ApiVersion::new(6, 0)).unwrap();
        assert!(!gate.tolerates_trailing());
    }

    #[test]
    fn major_mismatch_blocks_for_good() {
        let mut gate = VersionGate::new(LOCAL);
        let err = gate.observe(ApiVersion::new(3, 0)).unwrap_err();
        assert!(matches!(
            err,
            WireError::VersionMismatch { local_major: 6, peer_major: 3, .. }
        ));
        assert!(gate.is_blocked());
        assert!(matches!(gate.check(), Err(WireError::Blocked)));
        assert!(matches!(gate.observe(ApiVersion::new(6, 0)), Err(WireError::Blocked)));
    }

    #[test]
    fn closure_allocator() {
        let mut budget = 1;
        let mut alloc = |len: usize| {
            if budget == 0 {
                return None;
            }
            budget -= 1;
            Some(vec![0u8; len])
        };
        assert_eq!(RxAllocator::alloc(&mut alloc, 4).map(|b| b.len()), Some(4));
        assert!(RxAllocator::alloc(&mut alloc, 4).is_none());
        assert!(HeapAllocator.alloc(16).is_some());
    }

    #[test]
    fn drop_counters_by_cause() {
        let mut c = DropCounters::default();
        c.count(&WireError::UnsupportedType { type_id: 99, revision: "r16" });
        c.count(&WireError::InvalidLength { what: "VSOH", expected: 168, got: 160 });
        c.count(&WireError::malformed("TxEvent", "payload length", 40, 2));
        c.count(&WireError::Blocked);
        c.rx_alloc_failures += 1;
        assert_eq!(c.unsupported, 1);
        assert_eq!(c.invalid_length, 1);
        assert_eq!(c.malformed, 1);
        assert_eq!(c.blocked, 1);
        assert_eq!(c.total(), 5);
    }

    #[test]
    fn default_policy_decodes_device_traffic() {
        let p = DecodePolicy::default();
        assert_eq!(p.direction, Direction::ToHost);
        assert!(!p.strict_padding && !p.allow_trailing);
        assert_eq!(DecodePolicy::to_device().direction, Direction::ToDevice);
        assert!(SessionConfig::default().drop_unsupported);
    }
}
