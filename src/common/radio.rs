//! Radio configuration and statistics pieces shared by both revisions.
//!
//! The MAC section, the per-queue parameters and the whole-radio records
//! differ between r16 and r17.1 and live in the revision modules. The PHY
//! and LLC sections, the address-matching entries and the per-queue
//! counters have the same layout everywhere.

use bytes::BufMut;

use crate::codec::{self, ADDR_MASK_48, Reader, Record};
use crate::error::{Result, WireError};
use crate::types::{Antenna, Bandwidth, MatchCtrl, Mcs};

/// Number of Tx queues (EDCA access categories plus non-QoS).
pub const TXQ_COUNT: usize = 5;
/// Entries in a channel's address-matching table.
pub const AMS_TABLE_COUNT: usize = 8;

// ---------------------------------------------------------------------------
// Address matching
// ---------------------------------------------------------------------------

/// One receive address filter.
///
/// On the wire this is two little-endian 64-bit words: `Mask:48, Pad:16`
/// then `Addr:48, MatchCtrl:8, Pad:8`. Both values hold the address bytes
/// in transmission order in their low 48 bits (see [`codec::mac_to_u48`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AddressMatching {
    pub mask: u64,
    pub addr: u64,
    pub match_ctrl: MatchCtrl,
}

impl AddressMatching {
    /// Match `mac` exactly.
    pub fn exact(mac: [u8; 6], match_ctrl: MatchCtrl) -> Self {
        Self { mask: ADDR_MASK_48, addr: codec::mac_to_u48(mac), match_ctrl }
    }

    /// Match every address whose masked bits equal those of `mac`.
    pub fn masked(mask: [u8; 6], mac: [u8; 6], match_ctrl: MatchCtrl) -> Self {
        Self { mask: codec::mac_to_u48(mask), addr: codec::mac_to_u48(mac), match_ctrl }
    }

    /// True when `mac` passes this filter.
    pub fn matches(&self, mac: [u8; 6]) -> bool {
        let mask = self.mask & ADDR_MASK_48;
        codec::mac_to_u48(mac) & mask == self.addr & mask
    }

    pub fn is_last(&self) -> bool {
        self.match_ctrl.contains(MatchCtrl::LAST_ENTRY)
    }
}

impl Record for AddressMatching {
    const NAME: &'static str = "AddressMatching";
    const WIRE_LEN: usize = 16;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let mask_word = r.u64()?;
        let addr_word = r.u64()?;
        let mask_pad = mask_word >> 48;
        let (addr, ctrl, addr_pad) = codec::unpack_addr_word(addr_word);
        if r.is_strict() && (mask_pad != 0 || addr_pad != 0) {
            return Err(WireError::malformed(
                Self::NAME,
                "non-zero padding",
                0,
                (mask_pad | u64::from(addr_pad)) as usize,
            ));
        }
        Ok(Self { mask: mask_word & ADDR_MASK_48, addr, match_ctrl: MatchCtrl(ctrl) })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint64(buf, self.mask & ADDR_MASK_48);
        codec::write_uint64(buf, codec::pack_addr_word(self.addr, self.match_ctrl.0));
    }
}

/// Default receive filters: broadcast, anonymous, IPv6 multicast and the
/// station's own address (which ends the table).
pub fn default_ams_table(own_mac: [u8; 6]) -> [AddressMatching; AMS_TABLE_COUNT] {
    let mut table = [AddressMatching::default(); AMS_TABLE_COUNT];
    table[0] = AddressMatching::exact([0xFF; 6], MatchCtrl::default());
    table[1] = AddressMatching::exact([0x00; 6], MatchCtrl::default());
    table[2] = AddressMatching::masked(
        [0xFF, 0xFF, 0, 0, 0, 0],
        [0x33, 0x33, 0, 0, 0, 0],
        MatchCtrl::default(),
    );
    table[3] = AddressMatching::exact(own_mac, MatchCtrl::RESPONSE_ENABLE | MatchCtrl::LAST_ENTRY);
    table
}

/// Default EDCA parameters as `(AIFS, CWMIN, CWMAX)`, indexed by queue:
/// non-QoS, AC_VO, AC_VI, AC_BE, AC_BK.
pub const DEFAULT_EDCA: [(u8, u16, u16); TXQ_COUNT] =
    [(2, 15, 1023), (2, 3, 7), (3, 7, 15), (6, 15, 1023), (9, 15, 1023)];

/// Largest AIFS the MAC accepts.
pub const AIFS_MAX: u8 = 16;

pub(crate) fn check_aifs(aifs: u8) -> Result<u8> {
    if aifs > AIFS_MAX {
        return Err(WireError::out_of_range("TxQConfig.AIFS", i64::from(aifs)));
    }
    Ok(aifs)
}

// ---------------------------------------------------------------------------
// PHY / LLC channel sections
// ---------------------------------------------------------------------------

/// PHY section of a channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChanConfigPhy {
    /// Centre frequency in MHz.
    pub channel_freq: u16,
    pub bandwidth: Bandwidth,
    pub tx_antenna: Antenna,
    pub rx_antenna: Antenna,
    pub default_mcs: Mcs,
    /// 0.5 dBm units.
    pub default_tx_power: i16,
}

impl ChanConfigPhy {
    /// 10 MHz, both antennas, R12QPSK at 32 dBm.
    pub fn default_for(channel_freq: u16) -> Self {
        Self {
            channel_freq,
            bandwidth: Bandwidth::Mhz10,
            tx_antenna: Antenna::Both,
            rx_antenna: Antenna::Both,
            default_mcs: Mcs::R12Qpsk,
            default_tx_power: 64,
        }
    }
}

impl Record for ChanConfigPhy {
    const NAME: &'static str = "ChanConfigPhy";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            channel_freq: r.u16()?,
            bandwidth: Bandwidth::decode(r.u8()?, "ChanConfigPhy.Bandwidth")?,
            tx_antenna: Antenna::read(r, "ChanConfigPhy.TxAntenna")?,
            rx_antenna: Antenna::read(r, "ChanConfigPhy.RxAntenna")?,
            default_mcs: Mcs::read(r, "ChanConfigPhy.DefaultMCS")?,
            default_tx_power: r.i16()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.channel_freq);
        codec::write_uint8(buf, self.bandwidth.as_raw());
        codec::write_uint8(buf, self.tx_antenna.as_raw());
        codec::write_uint8(buf, self.rx_antenna.as_raw());
        codec::write_uint8(buf, self.default_mcs.as_raw());
        codec::write_int16(buf, self.default_tx_power);
    }
}

/// LLC section: channel switching interval and guard, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChanConfigLlc {
    pub interval_duration: u32,
    pub guard_duration: u32,
}

impl Default for ChanConfigLlc {
    fn default() -> Self {
        Self { interval_duration: 50_000, guard_duration: 0 }
    }
}

impl Record for ChanConfigLlc {
    const NAME: &'static str = "ChanConfigLlc";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { interval_duration: r.u32()?, guard_duration: r.u32()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.interval_duration);
        codec::write_uint32(buf, self.guard_duration);
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Counters for one Tx queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TxQueueStats {
    pub tx_req_count: u32,
    pub tx_cnf_count: u32,
    pub tx_err_count: u32,
    pub tx_valid: u32,
    pub internal_collisions: u32,
    pub tx_pending: u32,
}

impl Record for TxQueueStats {
    const NAME: &'static str = "TxQueueStats";
    const WIRE_LEN: usize = 24;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            tx_req_count: r.u32()?,
            tx_cnf_count: r.u32()?,
            tx_err_count: r.u32()?,
            tx_valid: r.u32()?,
            internal_collisions: r.u32()?,
            tx_pending: r.u32()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32(buf, self.tx_req_count);
        codec::write_uint32(buf, self.tx_cnf_count);
        codec::write_uint32(buf, self.tx_err_count);
        codec::write_uint32(buf, self.tx_valid);
        codec::write_uint32(buf, self.internal_collisions);
        codec::write_uint32(buf, self.tx_pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_matching_reference_values() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0xFF; 6]);
        bytes.extend_from_slice(&[0xAA, 0x55]); // mask padding
        bytes.extend_from_slice(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB]);
        bytes.push(0x01);
        bytes.push(0xEE); // addr padding

        let am = AddressMatching::decode(&bytes).unwrap();
        assert_eq!(am.addr, 0xAB89_6745_2301);
        assert_eq!(am.mask, 0xFFFF_FFFF_FFFF);
        assert_eq!(am.match_ctrl, MatchCtrl::RESPONSE_ENABLE);

        // Padding is zeroed on the way back out.
        let out = am.encode();
        assert_eq!(&out[6..8], &[0, 0]);
        assert_eq!(out[15], 0);
        assert_eq!(&out[8..15], &bytes[8..15]);
    }

    #[test]
    fn strict_padding_rejects() {
        let mut bytes = AddressMatching::exact([1, 2, 3, 4, 5, 6], MatchCtrl::LAST_ENTRY).encode();
        let mut r = Reader::new(&bytes).strict(true);
        assert!(AddressMatching::read(&mut r).is_ok());

        bytes[15] = 0x01;
        let mut r = Reader::new(&bytes).strict(true);
        assert!(matches!(
            AddressMatching::read(&mut r),
            Err(WireError::MalformedMessage { msg_type: "AddressMatching", .. })
        ));
        assert!(AddressMatching::decode(&bytes).is_ok());
    }

    #[test]
    fn default_table() {
        let mac = [0x04, 0xE5, 0x48, 0x00, 0x00, 0x01];
        let table = default_ams_table(mac);
        assert!(table[0].matches([0xFF; 6]));
        assert!(!table[0].matches(mac));
        assert!(table[2].matches([0x33, 0x33, 0x00, 0x00, 0x00, 0x16]));
        assert!(table[3].matches(mac));
        assert!(table[3].is_last());
        assert!(table[3].match_ctrl.contains(MatchCtrl::RESPONSE_ENABLE));
        assert_eq!(table[4..], [AddressMatching::default(); 4]);
        assert_eq!(&table[2].encode()[..8], &[0xFF, 0xFF, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn phy_section_layout() {
        let phy = ChanConfigPhy::default_for(5900);
        assert_eq!(phy.encode(), vec![0x0C, 0x17, 10, 3, 3, 0x0A, 64, 0]);
        let mut bad = phy.encode();
        bad[2] = 40;
        assert!(matches!(
            ChanConfigPhy::decode(&bad),
            Err(WireError::OutOfRangeField { field: "ChanConfigPhy.Bandwidth", value: 40 })
        ));
    }

    #[test]
    fn aifs_range() {
        assert!(check_aifs(16).is_ok());
        assert!(check_aifs(17).is_err());
        assert!(DEFAULT_EDCA.iter().all(|(aifs, _, _)| *aifs <= AIFS_MAX));
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn address_matching_round_trip(mask in 0u64..=ADDR_MASK_48, addr in 0u64..=ADDR_MASK_48, ctrl: u8) {
                let am = AddressMatching { mask, addr, match_ctrl: MatchCtrl(ctrl) };
                let bytes = am.encode();
                prop_assert_eq!(bytes.len(), AddressMatching::WIRE_LEN);
                prop_assert_eq!(AddressMatching::read(&mut Reader::new(&bytes).strict(true)).unwrap(), am);
            }

            #[test]
            fn queue_stats_round_trip(bytes in proptest::collection::vec(any::<u8>(), 24)) {
                prop_assert_eq!(TxQueueStats::decode(&bytes).unwrap().encode(), bytes);
            }
        }
    }
}
