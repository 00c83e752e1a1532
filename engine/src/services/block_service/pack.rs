// Handler for packing a CSV export into block files
use super::{PackRequest, PackSummary, CANDLE_EXTENSION, INDICATOR_EXTENSION};
use crate::codec::BlockCodec;
use crate::config::EngineSettings;
use crate::data::block_builder::CandleBlockBuilder;
use crate::data::csv_parser::BrazilianCsvParser;
use crate::error::EngineError;
use crate::indicators;
use std::path::{Path, PathBuf};

pub fn handle_pack(
    request: &PackRequest,
    settings: &EngineSettings,
    codec: &BlockCodec,
    now: i64,
) -> Result<PackSummary, EngineError> {
    let candles = BrazilianCsvParser::load_candles_from_csv(&request.csv_path)?;
    if candles.is_empty() {
        tracing::warn!(path = %request.csv_path.display(), "CSV contained no candles, nothing to pack");
    }

    let mut summary = PackSummary { candles_loaded: candles.len(), ..Default::default() };
    let mut builder = CandleBlockBuilder::new(&request.symbol, request.interval.seconds());
    builder.extend(candles);

    std::fs::create_dir_all(&request.out_dir)?;
    let calculators = indicators::from_settings(&settings.indicators);

    for set in builder.finish(now) {
        let bytes = codec.encode_candles(&set)?;
        summary.files.push(write_block(&request.out_dir, set.uid(), CANDLE_EXTENSION, &bytes)?);
        summary.candle_blocks += 1;

        for calculator in &calculators {
            let indicator = indicators::build_indicator(&set, calculator.as_ref())?;
            let bytes = codec.encode_indicator(&indicator)?;
            summary.files.push(write_block(&request.out_dir, indicator.uid(), INDICATOR_EXTENSION, &bytes)?);
            summary.indicator_blocks += 1;
        }
    }

    tracing::info!(
        symbol = %request.symbol,
        candles = summary.candles_loaded,
        candle_blocks = summary.candle_blocks,
        indicator_blocks = summary.indicator_blocks,
        "Packed CSV into blocks"
    );
    Ok(summary)
}

fn write_block(dir: &Path, uid: &str, extension: &str, bytes: &[u8]) -> Result<PathBuf, EngineError> {
    let path = dir.join(format!("{}.{}", uid, extension));
    std::fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote block file");
    Ok(path)
}
