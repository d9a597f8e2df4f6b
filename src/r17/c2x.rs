//! C2X security APDU, r17.1 framing.
//!
//! Command: `[USN:u16][INS:u16][CurveID:u16][LC:u16][payload]`, response:
//! `[USN:u16][INS:u16][ErrorCode:u16][LenRsp:u16][payload]`. `LC` and
//! `LenRsp` count the whole APDU including its 8-byte header. The payload
//! layout is selected by the (INS, CurveID) pair; curve points are opaque
//! byte strings sized by the curve's field width.

use bytes::BufMut;

use crate::codec::{self, Reader};
use crate::error::{Result, WireError};
use crate::session::Direction;

/// Size of the command and response headers.
pub const APDU_HEADER_LEN: usize = 8;

pub const CMD_VSOH256_LC: u16 = 168;
pub const CMD_VSOH384_LC: u16 = 248;
pub const CMD_DPKVSOH256_LC: u16 = 140;
pub const CMD_DPKVSOH384_LC: u16 = 204;
pub const CMD_DPK256_LC: u16 = 44;
pub const CMD_DPK384_LC: u16 = 60;
pub const CMD_REPK256_LC: u16 = 168;
pub const CMD_REPK384_LC: u16 = 248;

pub const RSP_ERR_LR: u16 = 8;
pub const RSP_VER_LR: u16 = 12;
pub const RSP_PK256_LR: u16 = 72;
pub const RSP_PK384_LR: u16 = 104;
pub const RSP_VERPK256_LR: u16 = 76;
pub const RSP_VERPK384_LR: u16 = 108;

wire_enum! {
    pub enum Instruction(u16) {
        VerifySignatureOfHash = 0,
        DecompressPublicKey = 1,
        ReconstructPublicKey = 2,
        DecompressPublicKeyAndVerify = 3,
    }
}

wire_enum! {
    pub enum CurveId(u16) {
        Nist256 = 0,
        BrainpoolP256r1 = 1,
        BrainpoolP384r1 = 2,
    }
}

impl CurveId {
    /// Size of one field element (coordinate, hash, signature half).
    pub fn field_len(self) -> usize {
        match self {
            Self::Nist256 | Self::BrainpoolP256r1 => 32,
            Self::BrainpoolP384r1 => 48,
        }
    }
}

wire_enum! {
    pub enum C2xErrorCode(u16) {
        Success = 0,
        InsNotSupported = 1,
        InvalidLength = 2,
        CurveIdInvalid = 3,
        WrongData = 4,
        NoPreciseDiagnosis = 5,
    }
}

wire_enum! {
    pub enum VerifyResult(u32) {
        Success = 0,
        Failure = 1,
    }
}

/// Expected command `LC` for an instruction on a curve.
pub fn command_lc(ins: Instruction, curve: CurveId) -> u16 {
    let wide = curve.field_len() == 48;
    match (ins, wide) {
        (Instruction::VerifySignatureOfHash, false) => CMD_VSOH256_LC,
        (Instruction::VerifySignatureOfHash, true) => CMD_VSOH384_LC,
        (Instruction::DecompressPublicKey, false) => CMD_DPK256_LC,
        (Instruction::DecompressPublicKey, true) => CMD_DPK384_LC,
        (Instruction::ReconstructPublicKey, false) => CMD_REPK256_LC,
        (Instruction::ReconstructPublicKey, true) => CMD_REPK384_LC,
        (Instruction::DecompressPublicKeyAndVerify, false) => CMD_DPKVSOH256_LC,
        (Instruction::DecompressPublicKeyAndVerify, true) => CMD_DPKVSOH384_LC,
    }
}

// ---------------------------------------------------------------------------
// Payload building blocks
// ---------------------------------------------------------------------------

/// Uncompressed curve point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point<const N: usize> {
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub x: [u8; N],
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub y: [u8; N],
}

impl<const N: usize> Point<N> {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { x: r.bytes()?, y: r.bytes()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_bytes(buf, &self.x);
        codec::write_bytes(buf, &self.y);
    }
}

/// Compressed public key followed by three alignment bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompressedKey<const N: usize> {
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub x: [u8; N],
    pub y_bit: u8,
    pub padding: [u8; 3],
}

impl<const N: usize> CompressedKey<N> {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { x: r.bytes()?, y_bit: r.u8()?, padding: r.bytes()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_bytes(buf, &self.x);
        codec::write_uint8(buf, self.y_bit);
        codec::write_bytes(buf, &self.padding);
    }
}

/// ECDSA hash and signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Signed<const N: usize> {
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub e: [u8; N],
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub r: [u8; N],
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
    pub s: [u8; N],
}

impl<const N: usize> Signed<N> {
    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { e: r.bytes()?, r: r.bytes()?, s: r.bytes()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_bytes(buf, &self.e);
        codec::write_bytes(buf, &self.r);
        codec::write_bytes(buf, &self.s);
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Command payload for a curve with `N`-byte field elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Request<const N: usize> {
    VerifySignatureOfHash { pub_key: Point<N>, sig: Signed<N> },
    DecompressPublicKey { key: CompressedKey<N> },
    ReconstructPublicKey {
        #[cfg_attr(feature = "serde", serde(serialize_with = "crate::codec::serialize_bytes"))]
        hvij: [u8; N],
        rvij: Point<N>,
        spca: Point<N>,
    },
    DecompressPublicKeyAndVerify { key: CompressedKey<N>, sig: Signed<N> },
}

impl<const N: usize> Request<N> {
    pub fn instruction(&self) -> Instruction {
        match self {
            Self::VerifySignatureOfHash { .. } => Instruction::VerifySignatureOfHash,
            Self::DecompressPublicKey { .. } => Instruction::DecompressPublicKey,
            Self::ReconstructPublicKey { .. } => Instruction::ReconstructPublicKey,
            Self::DecompressPublicKeyAndVerify { .. } => Instruction::DecompressPublicKeyAndVerify,
        }
    }

    fn read(ins: Instruction, r: &mut Reader<'_>) -> Result<Self> {
        Ok(match ins {
            Instruction::VerifySignatureOfHash => {
                Self::VerifySignatureOfHash { pub_key: Point::read(r)?, sig: Signed::read(r)? }
            }
            Instruction::DecompressPublicKey => Self::DecompressPublicKey { key: CompressedKey::read(r)? },
            Instruction::ReconstructPublicKey => Self::ReconstructPublicKey {
                hvij: r.bytes()?,
                rvij: Point::read(r)?,
                spca: Point::read(r)?,
            },
            Instruction::DecompressPublicKeyAndVerify => {
                Self::DecompressPublicKeyAndVerify { key: CompressedKey::read(r)?, sig: Signed::read(r)? }
            }
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        match self {
            Self::VerifySignatureOfHash { pub_key, sig } => {
                pub_key.write(buf);
                sig.write(buf);
            }
            Self::DecompressPublicKey { key } => key.write(buf),
            Self::ReconstructPublicKey { hvij, rvij, spca } => {
                codec::write_bytes(buf, hvij);
                rvij.write(buf);
                spca.write(buf);
            }
            Self::DecompressPublicKeyAndVerify { key, sig } => {
                key.write(buf);
                sig.write(buf);
            }
        }
    }
}

/// The curve of a command together with its payload of matching width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CommandBody {
    Nist256(Request<32>),
    BrainpoolP256r1(Request<32>),
    BrainpoolP384r1(Request<48>),
}

impl CommandBody {
    pub fn curve(&self) -> CurveId {
        match self {
            Self::Nist256(_) => CurveId::Nist256,
            Self::BrainpoolP256r1(_) => CurveId::BrainpoolP256r1,
            Self::BrainpoolP384r1(_) => CurveId::BrainpoolP384r1,
        }
    }

    pub fn instruction(&self) -> Instruction {
        match self {
            Self::Nist256(req) | Self::BrainpoolP256r1(req) => req.instruction(),
            Self::BrainpoolP384r1(req) => req.instruction(),
        }
    }
}

/// Host request to the security accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct C2xCommand {
    /// Correlation token echoed in the response.
    pub usn: u16,
    pub body: CommandBody,
}

impl C2xCommand {
    pub fn new(usn: u16, body: CommandBody) -> Self {
        Self { usn, body }
    }

    /// Value of `LC`, which is also the encoded size.
    pub fn lc(&self) -> u16 {
        command_lc(self.body.instruction(), self.body.curve())
    }

    /// Decode a command APDU.
    ///
    /// Checked in order: header present, known instruction, known curve,
    /// `LC` matching the (instruction, curve) pair, then the byte count
    /// matching `LC`.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < APDU_HEADER_LEN {
            return Err(WireError::truncated("C2X command", APDU_HEADER_LEN, payload.len()).with_raw(payload));
        }
        let mut r = Reader::new(payload);
        let usn = r.u16()?;
        let raw_ins = r.u16()?;
        let raw_curve = r.u16()?;
        let lc = r.u16()?;

        let ins = Instruction::from_raw(raw_ins).ok_or(WireError::UnsupportedInstruction { ins: raw_ins })?;
        let curve = CurveId::from_raw(raw_curve).ok_or(WireError::InvalidCurve { curve: raw_curve })?;
        let expected = command_lc(ins, curve);
        if lc != expected {
            return Err(WireError::InvalidLength {
                what: "C2X command LC",
                expected: usize::from(expected),
                got: usize::from(lc),
            });
        }
        if payload.len() != usize::from(lc) {
            return Err(WireError::InvalidLength {
                what: "C2X command payload",
                expected: usize::from(lc),
                got: payload.len(),
            });
        }

        let body = match curve {
            CurveId::Nist256 => CommandBody::Nist256(Request::read(ins, &mut r)?),
            CurveId::BrainpoolP256r1 => CommandBody::BrainpoolP256r1(Request::read(ins, &mut r)?),
            CurveId::BrainpoolP384r1 => CommandBody::BrainpoolP384r1(Request::read(ins, &mut r)?),
        };
        Ok(Self { usn, body })
    }

    pub fn wire_len(&self) -> usize {
        usize::from(self.lc())
    }

    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.usn);
        codec::write_uint16(buf, self.body.instruction().as_raw());
        codec::write_uint16(buf, self.body.curve().as_raw());
        codec::write_uint16(buf, self.lc());
        match &self.body {
            CommandBody::Nist256(req) | CommandBody::BrainpoolP256r1(req) => req.write(buf),
            CommandBody::BrainpoolP384r1(req) => req.write(buf),
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Recovered public key. The response carries no curve id, so the width is
/// taken from `LenRsp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PublicKey {
    P256(Point<32>),
    P384(Point<48>),
}

impl PublicKey {
    fn read(wide: bool, r: &mut Reader<'_>) -> Result<Self> {
        Ok(if wide { Self::P384(Point::read(r)?) } else { Self::P256(Point::read(r)?) })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        match self {
            Self::P256(p) => p.write(buf),
            Self::P384(p) => p.write(buf),
        }
    }

    fn is_wide(&self) -> bool {
        matches!(self, Self::P384(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResponseBody {
    /// Failed command: header only.
    Empty,
    Verify(VerifyResult),
    PublicKey(PublicKey),
    VerifyAndKey(VerifyResult, PublicKey),
}

impl ResponseBody {
    fn len_rsp(&self) -> u16 {
        match self {
            Self::Empty => RSP_ERR_LR,
            Self::Verify(_) => RSP_VER_LR,
            Self::PublicKey(key) if key.is_wide() => RSP_PK384_LR,
            Self::PublicKey(_) => RSP_PK256_LR,
            Self::VerifyAndKey(_, key) if key.is_wide() => RSP_VERPK384_LR,
            Self::VerifyAndKey(..) => RSP_VERPK256_LR,
        }
    }
}

/// Accelerator response to a [`C2xCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct C2xResponse {
    pub usn: u16,
    /// `INS` echoed from the command. A refused instruction comes back as
    /// sent, so this may lie outside [`Instruction`].
    pub ins: u16,
    pub error_code: C2xErrorCode,
    pub body: ResponseBody,
}

impl C2xResponse {
    pub fn failed(usn: u16, ins: u16, error_code: C2xErrorCode) -> Self {
        Self { usn, ins, error_code, body: ResponseBody::Empty }
    }

    pub fn instruction(&self) -> Option<Instruction> {
        Instruction::from_raw(self.ins)
    }

    pub fn is_success(&self) -> bool {
        self.error_code == C2xErrorCode::Success
    }

    pub fn verified(&self) -> Option<VerifyResult> {
        match self.body {
            ResponseBody::Verify(res) | ResponseBody::VerifyAndKey(res, _) => Some(res),
            _ => None,
        }
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        match &self.body {
            ResponseBody::PublicKey(key) | ResponseBody::VerifyAndKey(_, key) => Some(key),
            _ => None,
        }
    }

    /// Value of `LenRsp`, which is also the encoded size.
    pub fn len_rsp(&self) -> u16 {
        self.body.len_rsp()
    }

    /// Decode a response APDU.
    ///
    /// The instruction only selects a payload shape on success. A failed
    /// response is header-only and keeps whatever `INS` the device echoed.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < APDU_HEADER_LEN {
            return Err(WireError::truncated("C2X response", APDU_HEADER_LEN, payload.len()).with_raw(payload));
        }
        let mut r = Reader::new(payload);
        let usn = r.u16()?;
        let ins = r.u16()?;
        let error_code = r.u16()?;
        let len_rsp = r.u16()?;

        let error_code = C2xErrorCode::decode(error_code, "C2xSec.ErrorCode")?;
        let shape = match error_code {
            C2xErrorCode::Success => {
                Some(Instruction::from_raw(ins).ok_or(WireError::UnsupportedInstruction { ins })?)
            }
            _ => None,
        };
        let accepted: &[u16] = match shape {
            Some(Instruction::VerifySignatureOfHash) => &[RSP_VER_LR],
            Some(Instruction::DecompressPublicKey | Instruction::ReconstructPublicKey) => {
                &[RSP_PK256_LR, RSP_PK384_LR]
            }
            Some(Instruction::DecompressPublicKeyAndVerify) => &[RSP_VERPK256_LR, RSP_VERPK384_LR],
            None => &[RSP_ERR_LR],
        };
        if !accepted.contains(&len_rsp) {
            return Err(WireError::InvalidLength {
                what: "C2X response LenRsp",
                expected: usize::from(accepted[0]),
                got: usize::from(len_rsp),
            });
        }
        if payload.len() != usize::from(len_rsp) {
            return Err(WireError::InvalidLength {
                what: "C2X response payload",
                expected: usize::from(len_rsp),
                got: payload.len(),
            });
        }

        let wide = len_rsp == RSP_PK384_LR || len_rsp == RSP_VERPK384_LR;
        let body = match shape {
            Some(Instruction::VerifySignatureOfHash) => {
                ResponseBody::Verify(VerifyResult::decode(r.u32()?, "C2xSec.VerResult")?)
            }
            Some(Instruction::DecompressPublicKey | Instruction::ReconstructPublicKey) => {
                ResponseBody::PublicKey(PublicKey::read(wide, &mut r)?)
            }
            Some(Instruction::DecompressPublicKeyAndVerify) => {
                let res = VerifyResult::decode(r.u32()?, "C2xSec.VerResult")?;
                ResponseBody::VerifyAndKey(res, PublicKey::read(wide, &mut r)?)
            }
            None => ResponseBody::Empty,
        };
        Ok(Self { usn, ins, error_code, body })
    }

    pub fn wire_len(&self) -> usize {
        usize::from(self.len_rsp())
    }

    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.usn);
        codec::write_uint16(buf, self.ins);
        codec::write_uint16(buf, self.error_code.as_raw());
        codec::write_uint16(buf, self.len_rsp());
        match &self.body {
            ResponseBody::Empty => {}
            ResponseBody::Verify(res) => codec::write_uint32(buf, res.as_raw()),
            ResponseBody::PublicKey(key) => key.write(buf),
            ResponseBody::VerifyAndKey(res, key) => {
                codec::write_uint32(buf, res.as_raw());
                key.write(buf);
            }
        }
    }
}

/// One C2X APDU. Commands and responses share a message tag, so the
/// session direction decides which one a payload holds.
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

    pub fn usn(&self) -> u16 {
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
