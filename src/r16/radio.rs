//! r16 radio configuration and statistics.
//!
//! Same building blocks as r17.1 but packed tighter: byte-wide `CWMIN`, no
//! CBR threshold, retry limits after the address-matching table, and no
//! padding after the channel statistics.

use bytes::BufMut;

use crate::addr::{CHANNEL_COUNT, Channel};
use crate::codec::{self, Reader, Record};
use crate::error::Result;
use crate::types::DualTxControl;

pub use crate::common::radio::{
    AMS_TABLE_COUNT, AddressMatching, ChanConfigLlc, ChanConfigPhy, DEFAULT_EDCA, TXQ_COUNT,
    TxQueueStats, default_ams_table,
};
use crate::common::radio::check_aifs;

/// EDCA parameters for one Tx queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TxQConfig {
    /// Arbitration inter-frame space, 0..=16.
    pub aifs: u8,
    pub cwmin: u8,
    pub cwmax: u16,
    pub txop: u16,
}

impl Record for TxQConfig {
    const NAME: &'static str = "TxQConfig";
    const WIRE_LEN: usize = 6;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { aifs: check_aifs(r.u8()?)?, cwmin: r.u8()?, cwmax: r.u16()?, txop: r.u16()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.aifs);
        codec::write_uint8(buf, self.cwmin);
        codec::write_uint16(buf, self.cwmax);
        codec::write_uint16(buf, self.txop);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChanConfigMac {
    pub dual_tx_control: DualTxControl,
    /// dBm.
    pub cs_threshold: i8,
    pub slot_time: u16,
    pub difs_time: u16,
    pub sifs_time: u16,
    pub eifs_time: u16,
    pub tx_queue: [TxQConfig; TXQ_COUNT],
    pub ams_table: [AddressMatching; AMS_TABLE_COUNT],
    pub short_retry_limit: u16,
    pub long_retry_limit: u16,
    pub rts_cts_threshold: u16,
}

impl ChanConfigMac {
    pub fn default_for(own_mac: [u8; 6]) -> Self {
        // CWMIN is one byte here; every default fits.
        let tx_queue =
            DEFAULT_EDCA.map(|(aifs, cwmin, cwmax)| TxQConfig { aifs, cwmin: cwmin as u8, cwmax, txop: 0 });
        Self {
            dual_tx_control: DualTxControl::TxRx,
            cs_threshold: -65,
            slot_time: 13,
            difs_time: 58,
            sifs_time: 32,
            eifs_time: 178,
            tx_queue,
            ams_table: default_ams_table(own_mac),
            short_retry_limit: 4,
            long_retry_limit: 7,
            rts_cts_threshold: 0x7FFF,
        }
    }
}

impl Record for ChanConfigMac {
    const NAME: &'static str = "ChanConfigMac";
    const WIRE_LEN: usize = 174;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            dual_tx_control: DualTxControl::decode(r.u8()?, "ChanConfigMac.DualTxControl")?,
            cs_threshold: r.i8()?,
            slot_time: r.u16()?,
            difs_time: r.u16()?,
            sifs_time: r.u16()?,
            eifs_time: r.u16()?,
            tx_queue: r.array()?,
            ams_table: r.array()?,
            short_retry_limit: r.u16()?,
            long_retry_limit: r.u16()?,
            rts_cts_threshold: r.u16()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.dual_tx_control.as_raw());
        codec::write_int8(buf, self.cs_threshold);
        codec::write_uint16(buf, self.slot_time);
        codec::write_uint16(buf, self.difs_time);
        codec::write_uint16(buf, self.sifs_time);
        codec::write_uint16(buf, self.eifs_time);
        codec::write_array(buf, &self.tx_queue);
        codec::write_array(buf, &self.ams_table);
        codec::write_uint16(buf, self.short_retry_limit);
        codec::write_uint16(buf, self.long_retry_limit);
        codec::write_uint16(buf, self.rts_cts_threshold);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChanConfig {
    pub phy: ChanConfigPhy,
    pub mac: ChanConfigMac,
    pub llc: ChanConfigLlc,
}

impl ChanConfig {
    pub fn default_for(channel_freq: u16, own_mac: [u8; 6]) -> Self {
        Self {
            phy: ChanConfigPhy::default_for(channel_freq),
            mac: ChanConfigMac::default_for(own_mac),
            llc: ChanConfigLlc::default(),
        }
    }
}

impl Record for ChanConfig {
    const NAME: &'static str = "ChanConfig";
    const WIRE_LEN: usize = 190;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { phy: ChanConfigPhy::read(r)?, mac: ChanConfigMac::read(r)?, llc: ChanConfigLlc::read(r)? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        self.phy.write(buf);
        self.mac.write(buf);
        self.llc.write(buf);
    }
}

wire_enum! {
    pub enum RadioMode(u16) {
        Off = 0,
        Channel0 = 1,
        Channel1 = 2,
        Switched = 3,
    }
}

impl RadioMode {
    pub fn single(channel: Channel) -> Self {
        match channel {
            Channel::Zero => Self::Channel0,
            Channel::One => Self::Channel1,
        }
    }

    pub fn includes(self, channel: Channel) -> bool {
        matches!(
            (self, channel),
            (Self::Switched, _) | (Self::Channel0, Channel::Zero) | (Self::Channel1, Channel::One)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RadioConfig {
    pub mode: RadioMode,
    pub system_tick_rate_mhz: u16,
    pub chan: [ChanConfig; CHANNEL_COUNT],
}

impl RadioConfig {
    /// Single-channel configuration; only the selected slot gets the
    /// frequency.
    pub fn default_for(channel: Channel, channel_freq: u16, own_mac: [u8; 6]) -> Self {
        let mut chan = [ChanConfig::default_for(0, own_mac); CHANNEL_COUNT];
        chan[channel.index()].phy.channel_freq = channel_freq;
        Self { mode: RadioMode::single(channel), system_tick_rate_mhz: 0, chan }
    }

    pub fn channel(&self, channel: Channel) -> &ChanConfig {
        &self.chan[channel.index()]
    }
}

impl Record for RadioConfig {
    const NAME: &'static str = "RadioConfig";
    const WIRE_LEN: usize = 384;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            mode: RadioMode::decode(r.u16()?, "RadioConfig.Mode")?,
            system_tick_rate_mhz: r.u16()?,
            chan: r.array()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint16(buf, self.mode.as_raw());
        codec::write_uint16(buf, self.system_tick_rate_mhz);
        codec::write_array(buf, &self.chan);
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelStats {
    pub tx_req: u32,
    pub tx_fail: u32,
    pub tx_cnf: u32,
    pub tx_err: u32,
    pub tx_valid: u32,
    pub rx_ind: u32,
    pub rx_fail: u32,
    pub rx_dup: u32,
    pub tx_queue: [TxQueueStats; TXQ_COUNT],
    pub medium_busy_time: u32,
    pub channel_busy_ratio: u8,
    pub average_idle_power: i8,
}

impl Record for ChannelStats {
    const NAME: &'static str = "ChannelStats";
    const WIRE_LEN: usize = 158;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        let [tx_req, tx_fail, tx_cnf, tx_err, tx_valid, rx_ind, rx_fail, rx_dup] = r.u32_array::<8>()?;
        Ok(Self {
            tx_req,
            tx_fail,
            tx_cnf,
            tx_err,
            tx_valid,
            rx_ind,
            rx_fail,
            rx_dup,
            tx_queue: r.array()?,
            medium_busy_time: r.u32()?,
            channel_busy_ratio: r.u8()?,
            average_idle_power: r.i8()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint32_array(
            buf,
            &[
                self.tx_req,
                self.tx_fail,
                self.tx_cnf,
                self.tx_err,
                self.tx_valid,
                self.rx_ind,
                self.rx_fail,
                self.rx_dup,
            ],
        );
        codec::write_array(buf, &self.tx_queue);
        codec::write_uint32(buf, self.medium_busy_time);
        codec::write_uint8(buf, self.channel_busy_ratio);
        codec::write_int8(buf, self.average_idle_power);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RadioStats {
    pub chan: [ChannelStats; CHANNEL_COUNT],
    pub tsf: u64,
}

impl Record for RadioStats {
    const NAME: &'static str = "RadioStats";
    const WIRE_LEN: usize = 324;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { chan: r.array()?, tsf: r.u64()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_array(buf, &self.chan);
        codec::write_uint64(buf, self.tsf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WireError;
    use crate::types::MatchCtrl;

    const MAC: [u8; 6] = [0x04, 0xE5, 0x48, 0x00, 0x10, 0x20];

    #[test]
    fn radio_config_layout() {
        let cfg = RadioConfig::default_for(Channel::Zero, 5890, MAC);
        let bytes = cfg.encode();
        assert_eq!(bytes.len(), 384);
        assert_eq!(&bytes[4..6], &5890u16.to_le_bytes());
        assert_eq!(bytes[12], DualTxControl::TxRx.as_raw());
        assert_eq!(bytes[13] as i8, -65);
        assert_eq!(&bytes[14..16], &13u16.to_le_bytes());
        // TxQueue[0]: AIFS, CWMIN (one byte), CWMAX.
        assert_eq!(&bytes[22..26], &[2, 15, 0xFF, 0x03]);
        // Retry limits follow the 128-byte address-matching table.
        assert_eq!(&bytes[52 + 128..52 + 134], &[4, 0, 7, 0, 0xFF, 0x7F]);
        // Channel 1 starts after 190 bytes.
        assert_eq!(&bytes[194..196], &0u16.to_le_bytes());
        assert_eq!(RadioConfig::decode(&bytes).unwrap(), cfg);
        assert_eq!(
            cfg.channel(Channel::Zero).mac.ams_table[3].match_ctrl,
            MatchCtrl::RESPONSE_ENABLE | MatchCtrl::LAST_ENTRY
        );
    }

    #[test]
    fn no_read_only_mode() {
        let mut bytes = RadioConfig::default_for(Channel::One, 5900, MAC).encode();
        assert_eq!(&bytes[0..2], &[2, 0]);
        bytes[0..2].copy_from_slice(&0x8080u16.to_le_bytes());
        assert!(matches!(
            RadioConfig::decode(&bytes),
            Err(WireError::OutOfRangeField { field: "RadioConfig.Mode", value: 0x8080 })
        ));
    }

    #[test]
    fn stats_layout() {
        let mut stats = RadioStats::default();
        stats.chan[0].average_idle_power = -95;
        stats.chan[1].rx_ind = 42;
        stats.tsf = 7;
        let bytes = stats.encode();
        assert_eq!(bytes.len(), 324);
        assert_eq!(bytes[157] as i8, -95);
        assert_eq!(&bytes[158 + 20..158 + 24], &42u32.to_le_bytes());
        assert_eq!(&bytes[316..], &7u64.to_le_bytes());
        assert_eq!(RadioStats::decode(&bytes).unwrap(), stats);
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn radio_stats_round_trip(bytes in proptest::collection::vec(any::<u8>(), 324)) {
                prop_assert_eq!(RadioStats::decode(&bytes).unwrap().encode(), bytes);
            }

            #[test]
            fn tx_queue_round_trip(aifs in 0u8..=16, cwmin: u8, cwmax: u16, txop: u16) {
                let q = TxQConfig { aifs, cwmin, cwmax, txop };
                prop_assert_eq!(TxQConfig::decode(&q.encode()).unwrap(), q);
            }
        }
    }
}
