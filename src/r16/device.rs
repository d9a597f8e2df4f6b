//! r16 device management records: queue flush and temperature.

use bytes::BufMut;

use crate::addr::{Channel, Radio};
use crate::codec::{self, Reader, Record};
use crate::error::Result;

pub use crate::common::device::{AuxAdc, AuxAdcCfg, SetTsf};

wire_enum! {
    /// Tx queue selector.
    pub enum TxQueue(u8) {
        NonQos = 0,
        AcVo = 1,
        AcVi = 2,
        AcBe = 3,
        AcBk = 4,
    }
}

/// Discard every packet pending in a Tx queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlushQueue {
    pub radio: Radio,
    pub channel: Channel,
    pub tx_queue: TxQueue,
}

impl FlushQueue {
    pub fn new(radio: Radio, channel: Channel, tx_queue: TxQueue) -> Self {
        Self { radio, channel, tx_queue }
    }
}

impl Record for FlushQueue {
    const NAME: &'static str = "FlushQueue";
    const WIRE_LEN: usize = 3;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            radio: Radio::read(r, "FlushQueue.RadioID")?,
            channel: Channel::read(r, "FlushQueue.ChannelID")?,
            tx_queue: TxQueue::decode(r.u8()?, "FlushQueue.TxQueue")?,
        })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_uint8(buf, self.radio.as_raw());
        codec::write_uint8(buf, self.channel.as_raw());
        codec::write_uint8(buf, self.tx_queue.as_raw());
    }
}

/// PA temperatures in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Temp {
    pub temp_pa_ant1: i8,
    pub temp_pa_ant2: i8,
}

impl Record for Temp {
    const NAME: &'static str = "Temp";
    const WIRE_LEN: usize = 2;

    fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { temp_pa_ant1: r.i8()?, temp_pa_ant2: r.i8()? })
    }

    fn write<B: BufMut>(&self, buf: &mut B) {
        codec::write_int8(buf, self.temp_pa_ant1);
        codec::write_int8(buf, self.temp_pa_ant2);
    }
}
