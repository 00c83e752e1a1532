// Engine settings, loaded from an optional JSON file
use crate::error::EngineError;
use serde::Deserialize;
use shared::TimeFrame;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Directory encoded block files are written to.
    pub data_dir: PathBuf,
    pub default_symbol: String,
    pub interval: TimeFrame,
    pub indicators: IndicatorSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub sma_periods: Vec<usize>,
    pub ema_periods: Vec<usize>,
    pub rsi_enabled: bool,
    pub rsi_period: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_dir: PathBuf::from("blocks"),
            default_symbol: "WINFUT".to_string(),
            interval: TimeFrame::Minute1,
            indicators: IndicatorSettings::default(),
        }
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            sma_periods: vec![20],
            ema_periods: vec![9],
            rsi_enabled: true,
            rsi_period: 14,
        }
    }
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw).map_err(|e| EngineError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings =
            serde_json::from_str(raw).map_err(|e| EngineError::ConfigError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), EngineError> {
        let indicators = &self.indicators;
        let zero_period = indicators.sma_periods.contains(&0)
            || indicators.ema_periods.contains(&0)
            || (indicators.rsi_enabled && indicators.rsi_period == 0);
        if zero_period {
            return Err(EngineError::ConfigError("Indicator period cannot be 0".to_string()));
        }
        Ok(())
    }
}
