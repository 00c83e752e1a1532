use crate::codec::CodecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Block codec error: {source}")]
    CodecError {
        #[from]
        source: CodecError,
    },

    #[error("Unrecognized block file: {0}")]
    UnknownBlockFile(String),

    #[error("Indicator calculation error: {0}")]
    IndicatorError(String),
}
