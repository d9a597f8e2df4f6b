//! r17.1 radio configuration and statistics.

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
    pub pad: u8,
    pub cwmin: u16,
    pub cwmax: u16,
    /// TXOP limit in microseconds (0 = one frame).
    pub txop: u16,
}

impl Record for TxQConfig {
    const NAME: &'static str = "TxQConfig";
    const WIRE_LEN: usize = 8;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            aifs: check_aifs(r.u8()?)?,
            pad: r.u8()?,
            cwmin: r.u16()?,
            cwmax: r.u16()?,
            txop: r.u16()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.aifs);
        codec::write_uint8(buf, self.pad);
        codec::write_uint16(buf, self.cwmin);
        codec::write_uint16(buf, self.cwmax);
        codec::write_uint16(buf, self.txop);
    }
}

/// MAC section of a channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChanConfigMac {
    pub dual_tx_control: DualTxControl,
    /// Carrier sense threshold in dBm.
    pub cs_threshold: i8,
    /// Channel busy ratio threshold in dBm.
    pub cbr_threshold: i8,
    pub padding: [u8; 3],
    /// Microseconds.
    pub slot_time: u16,
    pub difs_time: u16,
    pub sifs_time: u16,
    pub eifs_time: u16,
    pub rts_cts_threshold: u16,
    pub short_retry_limit: u16,
    pub long_retry_limit: u16,
    pub tx_queue: [TxQConfig; TXQ_COUNT],
    pub ams_table: [AddressMatching; AMS_TABLE_COUNT],
}

impl ChanConfigMac {
    pub fn default_for(own_mac: [u8; 6]) -> Self {
        let tx_queue = DEFAULT_EDCA.map(|(aifs, cwmin, cwmax)| TxQConfig { aifs, pad: 0, cwmin, cwmax, txop: 0 });
        Self {
            dual_tx_control: DualTxControl::TxRx,
            cs_threshold: -65,
            cbr_threshold: -85,
            padding: [0; 3],
            slot_time: 13,
            difs_time: 58,
            sifs_time: 32,
            eifs_time: 178,
            rts_cts_threshold: 0x7FFF,
            short_retry_limit: 4,
            long_retry_limit: 7,
            tx_queue,
            ams_table: default_ams_table(own_mac),
        }
    }
}

impl Record for ChanConfigMac {
    const NAME: &'static str = "ChanConfigMac";
    const WIRE_LEN: usize = 188;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            dual_tx_control: DualTxControl::decode(r.u8()?, "ChanConfigMac.DualTxControl")?,
            cs_threshold: r.i8()?,
            cbr_threshold: r.i8()?,
            padding: r.bytes::<3>()?,
            slot_time: r.u16()?,
            difs_time: r.u16()?,
            sifs_time: r.u16()?,
            eifs_time: r.u16()?,
            rts_cts_threshold: r.u16()?,
            short_retry_limit: r.u16()?,
            long_retry_limit: r.u16()?,
            tx_queue: r.array()?,
            ams_table: r.array()?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.dual_tx_control.as_raw());
        codec::write_int8(buf, self.cs_threshold);
        codec::write_int8(buf, self.cbr_threshold);
        codec::write_bytes(buf, &self.padding);
        codec::write_uint16(buf, self.slot_time);
        codec::write_uint16(buf, self.difs_time);
        codec::write_uint16(buf, self.sifs_time);
        codec::write_uint16(buf, self.eifs_time);
        codec::write_uint16(buf, self.rts_cts_threshold);
        codec::write_uint16(buf, self.short_retry_limit);
        codec::write_uint16(buf, self.long_retry_limit);
        codec::write_array(buf, &self.tx_queue);
        codec::write_array(buf, &self.ams_table);
    }
}

/// Complete configuration of one logical channel.
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
    const WIRE_LEN: usize = 204;

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
    /// Which channels a radio services.
    pub enum RadioMode(u16) {
        Off = 0,
        Channel0 = 1,
        Channel1 = 2,
        /// Alternates between both channels.
        Switched = 3,
        /// Config readback only, the device ignores it as a request.
        ReadOnly = 0x8080,
    }
}

impl RadioMode {
    /// Mode that services only `channel`.
    pub fn single(channel: Channel) -> Self {
        match channel {
            Channel::Zero => Self::Channel0,
            Channel::One => Self::Channel1,
        }
    }

    /// True when `channel` is active in this mode.
    pub fn includes(self, channel: Channel) -> bool {
        matches!(
            (self, channel),
            (Self::Switched, _) | (Self::Channel0, Channel::Zero) | (Self::Channel1, Channel::One)
        )
    }
}

/// Whole-radio configuration (payload of `RadioACfg` / `RadioBCfg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RadioConfig {
    pub mode: RadioMode,
    /// 0 lets the firmware choose.
    pub system_tick_rate_mhz: u16,
    pub chan: [ChanConfig; CHANNEL_COUNT],
}

impl RadioConfig {
    /// Single-channel configuration on `channel` at `channel_freq` MHz.
    ///
    /// Both channel slots carry the defaults; only the selected slot gets
    /// the frequency.
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
    const WIRE_LEN: usize = 412;

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

/// Counters for one logical channel.
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
    /// Microseconds the medium was busy.
    pub medium_busy_time: u32,
    /// Percent.
    pub channel_busy_ratio: u8,
    /// dBm.
    pub average_idle_power: i8,
    pub pad: u16,
}

impl Record for ChannelStats {
    const NAME: &'static str = "ChannelStats";
    const WIRE_LEN: usize = 160;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            tx_req: r.u32()?,
            tx_fail: r.u32()?,
            tx_cnf: r.u32()?,
            tx_err: r.u32()?,
            tx_valid: r.u32()?,
            rx_ind: r.u32()?,
            rx_fail: r.u32()?,
            rx_dup: r.u32()?,
            tx_queue: r.array()?,
            medium_busy_time: r.u32()?,
            channel_busy_ratio: r.u8()?,
            average_idle_power: r.i8()?,
            pad: r.u16()?,
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
        codec::write_uint16(buf, self.pad);
    }
}

/// Statistics for both channels of a radio plus the TSF they were read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RadioStats {
    pub chan: [ChannelStats; CHANNEL_COUNT],
    pub tsf: u64,
}

impl Record for RadioStats {
    const NAME: &'static str = "RadioStats";
    const WIRE_LEN: usize = 328;

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
    use crate::types::{Antenna, Bandwidth, MatchCtrl, Mcs};

    const MAC: [u8; 6] = [0x04, 0xE5, 0x48, 0x00, 0x10, 0x20];

    #[test]
    fn default_config_values() {
        let cfg = RadioConfig::default_for(Channel::One, 5900, MAC);
        assert_eq!(cfg.mode, RadioMode::Channel1);
        assert_eq!(cfg.channel(Channel::One).phy.channel_freq, 5900);
        assert_eq!(cfg.channel(Channel::Zero).phy.channel_freq, 0);

        let chan = cfg.channel(Channel::One);
        assert_eq!(chan.phy.bandwidth, Bandwidth::Mhz10);
        assert_eq!(chan.phy.tx_antenna, Antenna::Both);
        assert_eq!(chan.phy.default_mcs, Mcs::R12Qpsk);
        assert_eq!(chan.mac.cbr_threshold, -85);
        assert_eq!(chan.mac.rts_cts_threshold, 32767);
        assert_eq!(chan.mac.tx_queue[1], TxQConfig { aifs: 2, pad: 0, cwmin: 3, cwmax: 7, txop: 0 });
        assert_eq!(chan.mac.tx_queue[4].aifs, 9);
        assert_eq!(chan.mac.ams_table[3].match_ctrl, MatchCtrl::RESPONSE_ENABLE | MatchCtrl::LAST_ENTRY);
        assert_eq!(chan.llc.interval_duration, 50_000);
    }

    #[test]
    fn radio_config_layout() {
        let cfg = RadioConfig::default_for(Channel::Zero, 5860, MAC);
        let bytes = cfg.encode();
        assert_eq!(bytes.len(), 412);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        // Channel 0 PHY starts right after Mode and SystemTickRate.
        assert_eq!(&bytes[4..6], &5860u16.to_le_bytes());
        // MAC: DualTx, CS, CBR, 3 pad, then SlotTime at 12 + 6.
        assert_eq!(bytes[12], DualTxControl::TxRx.as_raw());
        assert_eq!(bytes[13] as i8, -65);
        assert_eq!(&bytes[18..20], &13u16.to_le_bytes());
        // First TxQueue entry after seven u16 timing fields.
        assert_eq!(bytes[32], 2);
        assert_eq!(&bytes[34..36], &15u16.to_le_bytes());
        // Channel 1 begins after 204 bytes.
        assert_eq!(&bytes[208..210], &0u16.to_le_bytes());
        assert_eq!(RadioConfig::decode(&bytes).unwrap(), cfg);
    }

    #[test]
    fn read_only_mode_and_aifs_range() {
        let mut bytes = RadioConfig::default_for(Channel::Zero, 5860, MAC).encode();
        bytes[0..2].copy_from_slice(&0x8080u16.to_le_bytes());
        assert_eq!(RadioConfig::decode(&bytes).unwrap().mode, RadioMode::ReadOnly);

        bytes[32] = 17;
        assert!(matches!(
            RadioConfig::decode(&bytes),
            Err(WireError::OutOfRangeField { field: "TxQConfig.AIFS", value: 17 })
        ));
    }

    #[test]
    fn radio_mode_channels() {
        assert!(RadioMode::Switched.includes(Channel::One));
        assert!(RadioMode::Channel0.includes(Channel::Zero));
        assert!(!RadioMode::Channel0.includes(Channel::One));
        assert!(!RadioMode::Off.includes(Channel::Zero));
        assert_eq!(
            RadioMode::Switched.as_raw(),
            RadioMode::Channel0.as_raw() | RadioMode::Channel1.as_raw()
        );
    }

    #[test]
    fn stats_layout() {
        let mut stats = RadioStats::default();
        stats.chan[1].rx_ind = 42;
        stats.chan[1].tx_queue[3].tx_pending = 5;
        stats.chan[0].average_idle_power = -95;
        stats.tsf = 0x0102_0304;
        let bytes = stats.encode();
        assert_eq!(bytes.len(), 328);
        assert_eq!(&bytes[160 + 20..160 + 24], &42u32.to_le_bytes());
        assert_eq!(&bytes[160 + 32 + 3 * 24 + 20..160 + 32 + 3 * 24 + 24], &5u32.to_le_bytes());
        assert_eq!(bytes[157] as i8, -95);
        assert_eq!(RadioStats::decode(&bytes).unwrap(), stats);
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn radio_stats_round_trip(bytes in proptest::collection::vec(any::<u8>(), 328)) {
                prop_assert_eq!(RadioStats::decode(&bytes).unwrap().encode(), bytes);
            }

            #[test]
            fn chan_config_round_trip(freq: u16, cs: i8, cbr: i8, slot: u16, interval: u32, aifs in 0u8..=16) {
                let mut cfg = ChanConfig::default_for(freq, [2, 0, 0, 0, 0, 1]);
                cfg.mac.cs_threshold = cs;
                cfg.mac.cbr_threshold = cbr;
                cfg.mac.slot_time = slot;
                cfg.mac.tx_queue[0].aifs = aifs;
                cfg.llc.interval_duration = interval;
                let bytes = cfg.encode();
                prop_assert_eq!(bytes.len(), ChanConfig::WIRE_LEN);
                prop_assert_eq!(ChanConfig::decode(&bytes).unwrap(), cfg);
            }
        }
    }
}
