// Handler for decoding a block file back into a summary
use super::{BlockSummary, CANDLE_EXTENSION, INDICATOR_EXTENSION};
use crate::codec::BlockCodec;
use crate::error::EngineError;
use std::path::Path;

pub fn handle_inspect(path: &Path, codec: &BlockCodec) -> Result<BlockSummary, EngineError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if extension != CANDLE_EXTENSION && extension != INDICATOR_EXTENSION {
        return Err(EngineError::UnknownBlockFile(path.display().to_string()));
    }

    let data = std::fs::read(path)?;
    let summary = if extension == CANDLE_EXTENSION {
        let set = codec.decode_candles(&data)?;
        let filled = set.candles.iter().filter(|c| !c.missing).count();
        BlockSummary::Candles {
            missing: set.candles.len() - filled,
            filled,
            bytes: data.len(),
            meta: set.meta,
        }
    } else {
        let indicator = codec.decode_indicator(&data)?;
        let mut series: Vec<(String, usize)> = indicator
            .series
            .iter()
            .map(|(name, s)| (name.clone(), s.values.iter().filter(|v| !v.missing).count()))
            .collect();
        series.sort();
        BlockSummary::Indicator { meta: indicator.meta, bytes: data.len(), series }
    };
    Ok(summary)
}
