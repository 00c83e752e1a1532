use shared::SlotCountError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("buffer too short: fixed layout needs {needed} bytes, got {actual}")]
    BufferTooShort { needed: usize, actual: usize },

    #[error("metadata decode failure: {0}")]
    MetadataDecode(#[source] BoxError),

    #[error("metadata encode failure: {0}")]
    MetadataEncode(#[source] BoxError),

    #[error("series record {record}: {field} field has no null terminator")]
    MissingTerminator { record: usize, field: &'static str },

    #[error("{field} '{value}' is {len} bytes, at most {max} fit a text field")]
    FieldTooLong { field: &'static str, value: String, len: usize, max: usize },

    #[error("{field} '{value}' contains a null byte")]
    FieldContainsNul { field: &'static str, value: String },

    #[error(transparent)]
    SlotCount(#[from] SlotCountError),
}
