// Engine library root: block codecs and the producer tooling around them.

pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod services;

pub use codec::{
    decode_candle_set, decode_indicator_set, encode_candle_set, encode_indicator_set, BlockCodec, CodecError,
    JsonMetaCodec, MetaCodec,
};
pub use error::EngineError;
