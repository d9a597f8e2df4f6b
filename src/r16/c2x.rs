//! C2X security APDU, r16 framing.
//!
//! Command: `[pad:3][CLA:u8][INS:u8][USN:2][LC:u8][payload:LC][LE:u8]`,
//! response: `[pad:6][USN:2][payload][SW:2]`. The leading pad bytes align
//! the APDU body on 8 bytes inside the message. Every field element is 32
//! bytes; the curve id is the last payload byte. `SW` is big-endian, the
//! rest of the APDU is byte-oriented.

use bytes::BufMut;

use crate::codec::{self, Reader};
use crate::error::{Result, WireError};
use crate::session::Direction;

/// Alignment bytes before a command.
pub const CMD_PAD_LEN: usize = 3;
/// Alignment bytes before a response.
pub const RSP_PAD_LEN: usize = 6;
/// Command bytes outside the payload: padding, CLA, INS, USN, LC and LE.
pub const CMD_OVERHEAD: usize = CMD_PAD_LEN + 5 + 1;
/// Response bytes outside the payload: padding, USN and SW.
pub const RSP_OVERHEAD: usize = RSP_PAD_LEN + 2 + 2;

/// Size of a field element.
pub const FIELD_LEN: usize = 32;

pub const CMD_VSOH_LC: u8 = 161;
pub const CMD_DPK_LC: u8 = 34;
pub const CMD_REPK_LC: u8 = 161;

/// Response payload sizes.
pub const RSP_VER_LEN: usize = 1;
pub const RSP_PUBKEY_LEN: usize = 64;

wire_enum! {
    pub enum Instruction(u8) {
        VerifySignatureOfHash = 0,
        DecompressPublicKey = 1,
        ReconstructPublicKey = 2,
    }
}

impl Instruction {
    /// `LC` of a command carrying this instruction.
    pub fn lc(self) -> u8 {
        match self {
            Self::VerifySignatureOfHash => CMD_VSOH_LC,
            Self::DecompressPublicKey => CMD_DPK_LC,
            Self::ReconstructPublicKey => CMD_REPK_LC,
        }
    }

    /// Payload size of a successful response.
    pub fn response_len(self) -> usize {
        match self {
            Self::VerifySignatureOfHash => RSP_VER_LEN,
            Self::DecompressPublicKey | Self::ReconstructPublicKey => RSP_PUBKEY_LEN,
        }
    }
}

wire_enum! {
    pub enum CurveId(u8) {
        Nist256 = 0,
        BrainpoolP256r1 = 1,
        BrainpoolP256t1 = 2,
    }
}

wire_enum! {
    /// ISO 7816 style status word.
    pub enum StatusWord(u16) {
        NoError = 0x9000,
        ClaNotSupported = 0x6E00,
        InsNotSupported = 0x6D00,
        IncorrectP1P2 = 0x6A86,
        WrongLength = 0x6700,
        WrongData = 0x6A80,
        FileFull = 0x6A84,
        ExeErrNvramUnchanged = 0x6400,
        ExeErrNvramChanged = 0x6500,
        NoPreciseDiagnosis = 0x6F00,
        ConditionsNotSatisfied = 0x6985,
    }
}

wire_enum! {
    pub enum VerifyResult(u8) {
        Success = 0,
        Failure = 1,
    }
}

/// Uncompressed curve point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pair {
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub x: [u8; FIELD_LEN],
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub y: [u8; FIELD_LEN],
}

impl Pair {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { x: r.bytes()?, y: r.bytes()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_bytes(buf, &self.x);
        codec::write_bytes(buf, &self.y);
    }
}

/// Command payload, selected by `INS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Request {
    VerifySignatureOfHash {
        pub_key: Pair,
        #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
        e: [u8; FIELD_LEN],
        #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
        r: [u8; FIELD_LEN],
        #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
        s: [u8; FIELD_LEN],
        curve: CurveId,
    },
    DecompressPublicKey {
        #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
        x: [u8; FIELD_LEN],
        y_bit: u8,
        curve: CurveId,
    },
    ReconstructPublicKey {
        #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
        hvij: [u8; FIELD_LEN],
        rvij: Pair,
        spca: Pair,
        curve: CurveId,
    },
}

impl Request {
    pub fn instruction(&self) -> Instruction {
        match self {
            Self::VerifySignatureOfHash { .. } => Instruction::VerifySignatureOfHash,
            Self::DecompressPublicKey { .. } => Instruction::DecompressPublicKey,
            Self::ReconstructPublicKey { .. } => Instruction::ReconstructPublicKey,
        }
    }

    pub fn curve(&self) -> CurveId {
        match self {
            Self::VerifySignatureOfHash { curve, .. }
            | Self::DecompressPublicKey { curve, .. }
            | Self::ReconstructPublicKey { curve, .. } => *curve,
        }
    }

    fn read(ins: Instruction, r: &mut Reader<'_>) -> Result<Self> {
        Ok(match ins {
            Instruction::VerifySignatureOfHash => Self::VerifySignatureOfHash {
                pub_key: Pair::read(r)?,
                e: r.bytes()?,
                r: r.bytes()?,
                s: r.bytes()?,
                curve: read_curve(r)?,
            },
            Instruction::DecompressPublicKey => Self::DecompressPublicKey {
                x: r.bytes()?,
                y_bit: r.u8()?,
                curve: read_curve(r)?,
            },
            Instruction::ReconstructPublicKey => Self::ReconstructPublicKey {
                hvij: r.bytes()?,
                rvij: Pair::read(r)?,
                spca: Pair::read(r)?,
                curve: read_curve(r)?,
            },
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        match self {
            Self::VerifySignatureOfHash { pub_key, e, r, s, .. } => {
                pub_key.write(buf);
                codec::write_bytes(buf, e);
                codec::write_bytes(buf, r);
                codec::write_bytes(buf, s);
            }
            Self::DecompressPublicKey { x, y_bit, .. } => {
                codec::write_bytes(buf, x);
                codec::write_uint8(buf, *y_bit);
            }
            Self::ReconstructPublicKey { hvij, rvij, spca, .. } => {
                codec::write_bytes(buf, hvij);
                rvij.write(buf);
                spca.write(buf);
            }
        }
        codec::write_uint8(buf, self.curve().as_raw());
    }
}

fn read_curve(r: &mut Reader<'_>) -> Result<CurveId> {
    let raw = r.u8()?;
    CurveId::from_raw(raw).ok_or(WireError::InvalidCurve { curve: u16::from(raw) })
}

/// Host request to the security accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct C2xCommand {
    pub padding: [u8; CMD_PAD_LEN],
    pub cla: u8,
    /// Correlation token echoed in the response.
    pub usn: [u8; 2],
    pub request: Request,
    /// Expected response payload size.
    pub le: u8,
}

impl C2xCommand {
    pub fn new(usn: [u8; 2], request: Request) -> Self {
        Self {
            padding: [0; CMD_PAD_LEN],
            cla: 0,
            usn,
            le: request.instruction().response_len() as u8,
            request,
        }
    }

    pub fn lc(&self) -> u8 {
        self.request.instruction().lc()
    }

    /// Decode a command APDU, alignment bytes included.
    ///
    /// Checked in order: fixed fields present, known instruction, `LC`
    /// matching the instruction, byte count matching `LC`, then the curve
    /// id at the end of the payload.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < CMD_OVERHEAD {
            return Err(WireError::truncated("C2X command", CMD_OVERHEAD, payload.len()).with_raw(payload));
        }
        let mut r = Reader::new(payload);
        let padding = r.bytes()?;
        let cla = r.u8()?;
        let raw_ins = r.u8()?;
        let usn = r.bytes()?;
        let lc = r.u8()?;

        let ins = Instruction::from_raw(raw_ins)
            .ok_or(WireError::UnsupportedInstruction { ins: u16::from(raw_ins) })?;
        if lc != ins.lc() {
            return Err(WireError::InvalidLength {
                what: "C2X command LC",
                expected: usize::from(ins.lc()),
                got: usize::from(lc),
            });
        }
        if payload.len() != CMD_OVERHEAD + usize::from(lc) {
            return Err(WireError::InvalidLength {
                what: "C2X command payload",
                expected: CMD_OVERHEAD + usize::from(lc),
                got: payload.len(),
            });
        }
        let request = Request::read(ins, &mut r)?;
        let le = r.u8()?;
        Ok(Self { padding, cla, usn, request, le })
    }

    pub fn wire_len(&self) -> usize {
        CMD_OVERHEAD + usize::from(self.lc())
    }

    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_bytes(buf, &self.padding);
        codec::write_uint8(buf, self.cla);
        codec::write_uint8(buf, self.request.instruction().as_raw());
        codec::write_bytes(buf, &self.usn);
        codec::write_uint8(buf, self.lc());
        self.request.write(buf);
        codec::write_uint8(buf, self.le);
    }
}

/// Response payload. The APDU carries no instruction, so the shape comes
/// from the caller or from the payload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResponseBody {
    Empty,
    Verify(VerifyResult),
    PublicKey(Pair),
}

impl ResponseBody {
    fn wire_len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Verify(_) => RSP_VER_LEN,
            Self::PublicKey(_) => RSP_PUBKEY_LEN,
        }
    }
}

/// Accelerator response to a [`C2xCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct C2xResponse {
    pub padding: [u8; RSP_PAD_LEN],
    pub usn: [u8; 2],
    pub body: ResponseBody,
    pub sw: StatusWord,
}

impl C2xResponse {
    pub fn new(usn: [u8; 2], body: ResponseBody, sw: StatusWord) -> Self {
        Self { padding: [0; RSP_PAD_LEN], usn, body, sw }
    }

    pub fn is_success(&self) -> bool {
        self.sw == StatusWord::NoError
    }

    pub fn verified(&self) -> Option<VerifyResult> {
        match self.body {
            ResponseBody::Verify(res) => Some(res),
            _ => None,
        }
    }

    pub fn public_key(&self) -> Option<&Pair> {
        match &self.body {
            ResponseBody::PublicKey(key) => Some(key),
            _ => None,
        }
    }

    /// Decode a response, taking its shape from the payload size.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        Self::decode_with(payload, None)
    }

    /// Decode a response to a command that carried `ins`. A successful
    /// response must carry that instruction's payload, a failed one none.
    pub fn decode_for(payload: &[u8], ins: Instruction) -> Result<Self> {
        Self::decode_with(payload, Some(ins))
    }

    fn decode_with(payload: &[u8], ins: Option<Instruction>) -> Result<Self> {
        if payload.len() < RSP_OVERHEAD {
            return Err(WireError::truncated("C2X response", RSP_OVERHEAD, payload.len()).with_raw(payload));
        }
        let body_len = payload.len() - RSP_OVERHEAD;
        let raw_sw = u16::from_be_bytes([payload[payload.len() - 2], payload[payload.len() - 1]]);
        let sw = StatusWord::decode(raw_sw, "C2xSec.SW")?;

        let expected = match ins {
            Some(_) if sw != StatusWord::NoError => Some(0),
            Some(ins) => Some(ins.response_len()),
            None => None,
        };
        let valid = match expected {
            Some(len) => body_len == len,
            None => matches!(body_len, 0 | RSP_VER_LEN | RSP_PUBKEY_LEN),
        };
        if !valid {
            return Err(WireError::InvalidLength {
                what: "C2X response payload",
                expected: expected.unwrap_or(RSP_PUBKEY_LEN),
                got: body_len,
            });
        }

        let mut r = Reader::new(&payload[..payload.len() - 2]);
        let padding = r.bytes()?;
        let usn = r.bytes()?;
        let body = match body_len {
            RSP_VER_LEN => ResponseBody::Verify(VerifyResult::decode(r.u8()?, "C2xSec.VerResult")?),
            RSP_PUBKEY_LEN => ResponseBody::PublicKey(Pair::read(&mut r)?),
            _ => ResponseBody::Empty,
        };
        Ok(Self { padding, usn, body, sw })
    }

    pub fn wire_len(&self) -> usize {
        RSP_OVERHEAD + self.body.wire_len()
    }

    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_bytes(buf, &self.padding);
        codec::write_bytes(buf, &self.usn);
        match &self.body {
            ResponseBody::Empty => {}
            ResponseBody::Verify(res) => codec::write_uint8(buf, res.as_raw()),
            ResponseBody::PublicKey(key) => key.write(buf),
        }
        buf.put_u16(self.sw.as_raw());
    }
}

/// One C2X APDU; the session direction decides which shape a payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum C2xApdu {
    Command(C2xCommand),
    Response(C2xResponse),
}

impl C2xApdu {
    pub fn decode(payload: &[u8], direction: Direction) -> Result<Self> {
        match direction {
            Direction::ToDevice => C2xCommand::decode(payload).map(Self::Command),
            Direction::ToHost => C2xResponse::decode(payload).map(Self::Response),
        }
    }

    pub fn usn(&self) -> [u8; 2] {
        match self {
            Self::Command(c) => c.usn,
            Self::Response(r) => r.usn,
        }
    }

    pub fn wire_len(&self) -> usize {
        match self {
            Self::Command(c) => c.wire_len(),
            Self::Response(r) => r.wire_len(),
        }
    }

    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        match self {
            Self::Command(c) => c.write(buf),
            Self::Response(r) => r.write(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dpk(curve: CurveId) -> C2xCommand {
        C2xCommand::new([0xAB, 0xCD], Request::DecompressPublicKey { x: [7; 32], y_bit: 1, curve })
    }

    fn encode<F: FnOnce(&mut Vec<u8>)>(f: F) -> Vec<u8> {
        let mut bytes = Vec::new();
        f(&mut bytes);
        bytes
    }

    #[test]
    fn command_layout() {
        let cmd = dpk(CurveId::BrainpoolP256t1);
        let bytes = encode(|b| cmd.write(b));
        assert_eq!(bytes.len(), CMD_OVERHEAD + 34);
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 1, 0xAB, 0xCD, 34]);
        assert_eq!(bytes[8], 7);
        assert_eq!(bytes[40], 1);
        assert_eq!(bytes[41], 2);
        assert_eq!(bytes[42], 64);
        assert_eq!(C2xCommand::decode(&bytes).unwrap(), cmd);
    }

    #[test]
    fn vsoh_command_round_trip() {
        let cmd = C2xCommand::new(
            [1, 2],
            Request::VerifySignatureOfHash {
                pub_key: Pair { x: [1; 32], y: [2; 32] },
                e: [3; 32],
                r: [4; 32],
                s: [5; 32],
                curve: CurveId::Nist256,
            },
        );
        let bytes = encode(|b| cmd.write(b));
        assert_eq!(bytes.len(), cmd.wire_len());
        assert_eq!(bytes[7], CMD_VSOH_LC);
        assert_eq!(*bytes.last().unwrap(), 1);
        assert_eq!(C2xCommand::decode(&bytes).unwrap(), cmd);
    }

    #[test]
    fn command_errors() {
        let good = encode(|b| dpk(CurveId::Nist256).write(b));

        let mut bad_ins = good.clone();
        bad_ins[4] = 9;
        assert!(matches!(C2xCommand::decode(&bad_ins), Err(WireError::UnsupportedInstruction { ins: 9 })));

        let mut bad_lc = good.clone();
        bad_lc[7] = 33;
        assert!(matches!(
            C2xCommand::decode(&bad_lc),
            Err(WireError::InvalidLength { what: "C2X command LC", expected: 34, got: 33 })
        ));

        assert!(matches!(
            C2xCommand::decode(&good[..good.len() - 1]),
            Err(WireError::InvalidLength { what: "C2X command payload", .. })
        ));

        let mut bad_curve = good.clone();
        bad_curve[41] = 3;
        assert!(matches!(C2xCommand::decode(&bad_curve), Err(WireError::InvalidCurve { curve: 3 })));

        assert!(matches!(
            C2xCommand::decode(&good[..8]),
            Err(WireError::TruncatedInput { need: 9, got: 8, .. })
        ));
    }

    #[test]
    fn status_word_is_big_endian() {
        let rsp = C2xResponse::new([3, 4], ResponseBody::Verify(VerifyResult::Failure), StatusWord::NoError);
        let bytes = encode(|b| rsp.write(b));
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 3, 4, 1, 0x90, 0x00]);
        let back = C2xResponse::decode(&bytes).unwrap();
        assert_eq!(back, rsp);
        assert_eq!(back.verified(), Some(VerifyResult::Failure));
    }

    #[test]
    fn response_shape_from_instruction() {
        let key = C2xResponse::new([0, 1], ResponseBody::PublicKey(Pair { x: [8; 32], y: [9; 32] }), StatusWord::NoError);
        let bytes = encode(|b| key.write(b));
        assert_eq!(C2xResponse::decode_for(&bytes, Instruction::ReconstructPublicKey).unwrap(), key);
        assert!(matches!(
            C2xResponse::decode_for(&bytes, Instruction::VerifySignatureOfHash),
            Err(WireError::InvalidLength { what: "C2X response payload", expected: 1, got: 64 })
        ));

        let failed = C2xResponse::new([0, 1], ResponseBody::Empty, StatusWord::WrongData);
        let bytes = encode(|b| failed.write(b));
        assert_eq!(&bytes[8..], &[0x6A, 0x80]);
        let back = C2xResponse::decode_for(&bytes, Instruction::DecompressPublicKey).unwrap();
        assert!(!back.is_success());
        assert_eq!(back.body, ResponseBody::Empty);
    }

    #[test]
    fn response_errors() {
        let mut odd = vec![0u8; RSP_OVERHEAD + 5];
        let n = odd.len();
        odd[n - 2] = 0x90;
        assert!(matches!(
            C2xResponse::decode(&odd),
            Err(WireError::InvalidLength { what: "C2X response payload", got: 5, .. })
        ));

        let unknown_sw = [0, 0, 0, 0, 0, 0, 0, 0, 0x12, 0x34];
        assert!(matches!(
            C2xResponse::decode(&unknown_sw),
            Err(WireError::OutOfRangeField { field: "C2xSec.SW", value: 0x1234 })
        ));
    }

    #[test]
    fn apdu_direction_selects_shape() {
        let bytes = encode(|b| dpk(CurveId::Nist256).write(b));
        assert!(matches!(C2xApdu::decode(&bytes, Direction::ToDevice), Ok(C2xApdu::Command(_))));
        assert!(C2xApdu::decode(&bytes, Direction::ToHost).is_err());
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
                let _ = C2xCommand::decode(&bytes);
                let _ = C2xResponse::decode(&bytes);
            }

            #[test]
            fn reconstruct_round_trip(usn: [u8; 2], fill: u8, curve in 0u8..3) {
                let cmd = C2xCommand::new(usn, Request::ReconstructPublicKey {
                    hvij: [fill; 32],
                    rvij: Pair { x: [fill ^ 1; 32], y: [fill ^ 2; 32] },
                    spca: Pair { x: [fill ^ 3; 32], y: [fill ^ 4; 32] },
                    curve: CurveId::from_raw(curve).unwrap(),
                });
                let mut bytes = Vec::new();
                cmd.write(&mut bytes);
                prop_assert_eq!(bytes.len(), cmd.wire_len());
                prop_assert_eq!(C2xCommand::decode(&bytes).unwrap(), cmd);
            }
        }
    }
}
