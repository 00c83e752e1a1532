// Fixed-layout binary codecs for candle and indicator blocks.
//
// Layout, big-endian throughout:
//
//   offset 0                 u64 record count
//   offset 8                 count * stride bytes of fixed-width records
//   offset 8 + count*stride  metadata header, up to the end of the buffer
pub mod candle;
pub mod error;
pub mod indicator;
pub mod meta;

pub use candle::CANDLE_STRIDE;
pub use error::CodecError;
pub use indicator::{SERIES_STRIDE, TEXT_FIELD_LEN};
pub use meta::{JsonMetaCodec, MetaCodec};

use bytes::{Buf, Bytes};
use shared::{CandleSet, Indicator};

const COUNT_LEN: usize = 8;

/// Candle and indicator codec with an injected metadata encoding.
#[derive(Debug, Clone, Default)]
pub struct BlockCodec<C = JsonMetaCodec> {
    meta: C,
}

impl BlockCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: MetaCodec> BlockCodec<C> {
    pub fn with_meta_codec(meta: C) -> Self {
        BlockCodec { meta }
    }
}

/// Reads the record count and checks that `data` holds every record.
/// Returns the count and the length of the fixed-layout prefix.
fn read_prefix(data: &[u8], stride: usize) -> Result<(usize, usize), CodecError> {
    if data.len() < COUNT_LEN {
        return Err(CodecError::BufferTooShort { needed: COUNT_LEN, actual: data.len() });
    }
    let count = (&data[..COUNT_LEN]).get_u64();
    let prefix = usize::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(stride))
        .and_then(|records| records.checked_add(COUNT_LEN));
    match prefix {
        Some(prefix) if prefix <= data.len() => Ok((count as usize, prefix)),
        Some(prefix) => Err(CodecError::BufferTooShort { needed: prefix, actual: data.len() }),
        None => Err(CodecError::BufferTooShort { needed: usize::MAX, actual: data.len() }),
    }
}

pub fn encode_candle_set(set: &CandleSet) -> Result<Bytes, CodecError> {
    BlockCodec::new().encode_candles(set)
}

pub fn decode_candle_set(data: &[u8]) -> Result<CandleSet, CodecError> {
    BlockCodec::new().decode_candles(data)
}

pub fn encode_indicator_set(indicator: &Indicator) -> Result<Bytes, CodecError> {
    BlockCodec::new().encode_indicator(indicator)
}

pub fn decode_indicator_set(data: &[u8]) -> Result<Indicator, CodecError> {
    BlockCodec::new().decode_indicator(data)
}
