use thiserror::Error;

/// Errors arising from LLC message decoding, encoding and session gating.
///
/// Per-message errors (everything except [`VersionMismatch`] and
/// [`Blocked`]) only invalidate the message that produced them.
///
/// [`VersionMismatch`]: WireError::VersionMismatch
/// [`Blocked`]: WireError::Blocked
#[derive(Debug, Error)]
pub enum WireError {
    #[error("truncated input for {what}: need {need} bytes, got {got}{}", format_raw_suffix(raw))]
    TruncatedInput {
        what: &'static str,
        need: usize,
        got: usize,
        /// Raw payload bytes for debug context.
        raw: Vec<u8>,
    },

    #[error("malformed {msg_type}: {detail} (expected {expected}, got {got}){}", format_raw_suffix(raw))]
    MalformedMessage {
        msg_type: &'static str,
        detail: &'static str,
        expected: usize,
        got: usize,
        /// Raw payload bytes for debug context.
        raw: Vec<u8>,
    },

    #[error("unsupported message type {type_id} for API {revision}")]
    UnsupportedType { type_id: u16, revision: &'static str },

    #[error("unsupported C2X instruction 0x{ins:02X}")]
    UnsupportedInstruction { ins: u16 },

    #[error("invalid C2X curve id {curve}")]
    InvalidCurve { curve: u16 },

    #[error("invalid C2X length for {what}: expected {expected}, got {got}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("field {field} has undefined value {value}")]
    OutOfRangeField { field: &'static str, value: i64 },

    #[error("calibration version mismatch (expected {expected}, got {got})")]
    CalibrationVersion { expected: u32, got: u32 },

    #[error("API version mismatch (local {local_major}.{local_minor}, peer {peer_major}.{peer_minor})")]
    VersionMismatch {
        local_major: u16,
        local_minor: u16,
        peer_major: u16,
        peer_minor: u16,
    },

    #[error("session blocked after API version mismatch")]
    Blocked,

    #[error("output buffer too small: need {need} bytes, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    #[error("{what} too long for a 16-bit length field ({len} bytes)")]
    TooLong { what: &'static str, len: usize },
}

impl WireError {
    /// Create a `TruncatedInput` error (raw bytes filled in later via `with_raw`).
    pub(crate) fn truncated(what: &'static str, need: usize, got: usize) -> Self {
        Self::TruncatedInput { what, need, got, raw: Vec::new() }
    }

    /// Create a `MalformedMessage` error (raw bytes filled in later via `with_raw`).
    pub(crate) fn malformed(
        msg_type: &'static str,
        detail: &'static str,
        expected: usize,
        got: usize,
    ) -> Self {
        Self::MalformedMessage { msg_type, detail, expected, got, raw: Vec::new() }
    }

    pub(crate) fn out_of_range(field: &'static str, value: i64) -> Self {
        Self::OutOfRangeField { field, value }
    }

    /// Attach raw payload bytes to decode-phase errors for diagnostics.
    pub fn with_raw(self, payload: &[u8]) -> Self {
        match self {
            Self::TruncatedInput { what, need, got, .. } => {
                Self::TruncatedInput { what, need, got, raw: payload.to_vec() }
            }
            Self::MalformedMessage { msg_type, detail, expected, got, .. } => {
                Self::MalformedMessage { msg_type, detail, expected, got, raw: payload.to_vec() }
            }
            other => other,
        }
    }

    /// True for errors that end the session rather than a single message.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::VersionMismatch { .. } | Self::Blocked)
    }
}

/// Format raw bytes as a suffix like " | 0400340A..." (empty if no bytes).
fn format_raw_suffix(raw: &[u8]) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let limit = 16;
    let hex: String = raw.iter().take(limit).map(|b| format!("{b:02X}")).collect();
    let ellipsis = if raw.len() > limit { "..." } else { "" };
    format!(" | {hex}{ellipsis}")
}

pub type Result<T> = std::result::Result<T, WireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_suffix_truncates_long_payloads() {
        let err = WireError::malformed("TxEvent", "payload length", 40, 20).with_raw(&[0xAB; 20]);
        let text = err.to_string();
        assert!(text.starts_with("malformed TxEvent: payload length (expected 40, got 20) | ABAB"));
        assert!(text.ends_with("..."));
    }

    #[test]
    fn with_raw_leaves_other_variants_alone() {
        let err = WireError::InvalidCurve { curve: 7 }.with_raw(&[1, 2, 3]);
        assert_eq!(err.to_string(), "invalid C2X curve id 7");
    }

    #[test]
    fn only_version_errors_are_session_fatal() {
        assert!(WireError::Blocked.is_session_fatal());
        assert!(
            WireError::VersionMismatch { local_major: 6, local_minor: 0, peer_major: 5, peer_minor: 1 }
                .is_session_fatal()
        );
        assert!(!WireError::truncated("UINT16", 2, 1).is_session_fatal());
        assert!(!WireError::UnsupportedType { type_id: 99, revision: "r17.1" }.is_session_fatal());
    }
}
