// Encoding of the metadata header that trails every block.
use super::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Turns a header struct into self-describing bytes and back.
///
/// The fixed-layout codecs append whatever `encode_meta` returns after the
/// records and hand the remaining bytes of the buffer to `decode_meta`, so an
/// implementation must consume its input up to EOF.
pub trait MetaCodec {
    fn encode_meta<M: Serialize>(&self, meta: &M) -> Result<Vec<u8>, CodecError>;

    fn decode_meta<M: DeserializeOwned>(&self, bytes: &[u8]) -> Result<M, CodecError>;
}

/// JSON headers via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMetaCodec;

impl MetaCodec for JsonMetaCodec {
    fn encode_meta<M: Serialize>(&self, meta: &M) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(meta).map_err(|e| CodecError::MetadataEncode(e.into()))
    }

    fn decode_meta<M: DeserializeOwned>(&self, bytes: &[u8]) -> Result<M, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::MetadataDecode(e.into()))
    }
}
