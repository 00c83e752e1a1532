use super::{read_prefix, BlockCodec, CodecError, MetaCodec, COUNT_LEN};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use shared::{Candle, CandleSet, DataSetMeta, Slots};

/// Bytes per candle: eight 8-byte fields and the missing flag.
pub const CANDLE_STRIDE: usize = 8 * 8 + 1;

impl<C: MetaCodec> BlockCodec<C> {
    pub fn encode_candles(&self, set: &CandleSet) -> Result<Bytes, CodecError> {
        let meta = self.meta.encode_meta(&set.meta)?;
        let candles = &set.candles;

        let mut buf = BytesMut::with_capacity(COUNT_LEN + CANDLE_STRIDE * candles.len() + meta.len());
        buf.put_u64(candles.len() as u64);
        for candle in candles {
            buf.put_f64(candle.open);
            buf.put_f64(candle.high);
            buf.put_f64(candle.low);
            buf.put_f64(candle.close);
            buf.put_f64(candle.volume);
            buf.put_f64(candle.taker_volume);
            buf.put_i64(candle.number_of_trades);
            buf.put_i64(candle.time);
            buf.put_u8(candle.missing as u8);
        }
        buf.put_slice(&meta);

        tracing::debug!(uid = %set.meta.uid, block = set.meta.block, bytes = buf.len(), "Encoded candle set");
        Ok(buf.freeze())
    }

    pub fn decode_candles(&self, data: &[u8]) -> Result<CandleSet, CodecError> {
        let (count, prefix) = read_prefix(data, CANDLE_STRIDE)?;

        let mut records = &data[COUNT_LEN..prefix];
        let mut candles = Vec::with_capacity(count);
        for _ in 0..count {
            candles.push(Candle {
                open: records.get_f64(),
                high: records.get_f64(),
                low: records.get_f64(),
                close: records.get_f64(),
                volume: records.get_f64(),
                taker_volume: records.get_f64(),
                number_of_trades: records.get_i64(),
                time: records.get_i64(),
                missing: records.get_u8() == 1,
            });
        }
        let candles = Slots::try_from(candles)?;
        let meta: DataSetMeta = self.meta.decode_meta(&data[prefix..])?;

        tracing::debug!(uid = %meta.uid, block = meta.block, bytes = data.len(), "Decoded candle set");
        Ok(CandleSet { candles, meta })
    }
}
