// Producer side: raw candle input and block assembly
pub mod block_builder;
pub mod csv_parser;
