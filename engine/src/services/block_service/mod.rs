// Block service: turns CSV exports into encoded block files and reads
// them back.
use crate::codec::BlockCodec;
use crate::config::EngineSettings;
use crate::error::EngineError;
use shared::{DataSetMeta, IndicatorMeta, TimeFrame};
use std::path::{Path, PathBuf};

pub mod inspect;
pub mod pack;

pub const CANDLE_EXTENSION: &str = "candles";
pub const INDICATOR_EXTENSION: &str = "indicator";

#[derive(Debug, Clone)]
pub struct PackRequest {
    pub csv_path: PathBuf,
    pub symbol: String,
    pub interval: TimeFrame,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct PackSummary {
    pub candles_loaded: usize,
    pub candle_blocks: usize,
    pub indicator_blocks: usize,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum BlockSummary {
    Candles {
        meta: DataSetMeta,
        bytes: usize,
        filled: usize,
        missing: usize,
    },
    Indicator {
        meta: IndicatorMeta,
        bytes: usize,
        /// Series name with its count of non-missing values.
        series: Vec<(String, usize)>,
    },
}

pub struct BlockService {
    settings: EngineSettings,
    codec: BlockCodec,
}

impl BlockService {
    pub fn new(settings: EngineSettings) -> Self {
        BlockService { settings, codec: BlockCodec::new() }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Packs the CSV at `request.csv_path`; `now` decides which blocks are
    /// complete.
    pub fn pack_csv(&self, request: &PackRequest, now: i64) -> Result<PackSummary, EngineError> {
        tracing::info!(
            symbol = %request.symbol,
            interval = %request.interval,
            path = %request.csv_path.display(),
            "Packing CSV into blocks"
        );
        pack::handle_pack(request, &self.settings, &self.codec, now)
    }

    pub fn inspect(&self, path: &Path) -> Result<BlockSummary, EngineError> {
        tracing::info!(path = %path.display(), "Inspecting block file");
        inspect::handle_inspect(path, &self.codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorSettings;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const CSV: &str = "\
Ativo;Data;Hora;Abertura;Máximo;Mínimo;Fechamento;Volume;Quantidade
WINFUT;30/12/2024;18:20:00;124.080;124.090;123.938;123.983;600.822.115,84;24.228
WINFUT;30/12/2024;18:21:00;123.983;124.000;123.900;123.950;100,00;10
WINFUT;30/12/2024;18:23:00;123.950;124.100;123.950;124.050;200,00;20";

    fn service() -> BlockService {
        BlockService::new(EngineSettings {
            indicators: IndicatorSettings {
                sma_periods: vec![2],
                ema_periods: vec![],
                rsi_enabled: true,
                rsi_period: 2,
            },
            ..Default::default()
        })
    }

    fn pack_sample(out_dir: &Path) -> PackSummary {
        let mut csv = NamedTempFile::new().unwrap();
        writeln!(csv, "{}", CSV).unwrap();
        let request = PackRequest {
            csv_path: csv.path().to_path_buf(),
            symbol: "WINFUT".to_string(),
            interval: TimeFrame::Minute1,
            out_dir: out_dir.to_path_buf(),
        };
        service().pack_csv(&request, 1_735_582_800).unwrap()
    }

    #[test]
    fn test_pack_writes_candle_and_indicator_blocks() {
        let dir = tempdir().unwrap();
        let summary = pack_sample(dir.path());

        assert_eq!(summary.candles_loaded, 3);
        assert_eq!(summary.candle_blocks, 1);
        assert_eq!(summary.indicator_blocks, 2);
        assert_eq!(summary.files.len(), 3);
        assert!(summary.files.iter().all(|f| f.exists()));

        // 1_735_582_800 / 300_000 = 5785
        let candle_file = dir.path().join("WINFUT_60_5785.candles");
        assert_eq!(summary.files[0], candle_file);
        assert!(dir.path().join("WINFUT_60_5785_sma2.indicator").exists());
        assert!(dir.path().join("WINFUT_60_5785_rsi2.indicator").exists());
    }

    #[test]
    fn test_inspect_round_trips_packed_files() {
        let dir = tempdir().unwrap();
        pack_sample(dir.path());
        let service = service();

        match service.inspect(&dir.path().join("WINFUT_60_5785.candles")).unwrap() {
            BlockSummary::Candles { meta, filled, missing, .. } => {
                assert_eq!(meta.symbol, "WINFUT");
                assert_eq!(meta.block, 5785);
                assert!(!meta.complete);
                assert_eq!(filled, 3);
                assert_eq!(missing, 4997);
            }
            other => panic!("unexpected summary {:?}", other),
        }

        match service.inspect(&dir.path().join("WINFUT_60_5785_sma2.indicator")).unwrap() {
            BlockSummary::Indicator { meta, series, .. } => {
                assert_eq!(meta.name, "SMA(2)");
                assert_eq!(meta.parameters, vec![2]);
                assert_eq!(series, vec![("SMA(2)".to_string(), 2)]);
            }
            other => panic!("unexpected summary {:?}", other),
        }
    }

    #[test]
    fn test_inspect_rejects_unknown_extension() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(service().inspect(file.path()), Err(EngineError::UnknownBlockFile(_))));
    }

    #[test]
    fn test_inspect_reports_corrupt_block() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.candles");
        std::fs::write(&path, [0u8, 0, 0, 0, 0, 0, 0, 9, 1, 2, 3]).unwrap();
        assert!(matches!(service().inspect(&path), Err(EngineError::CodecError { .. })));
    }
}
