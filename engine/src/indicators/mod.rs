// Technical indicators computed over one candle block
pub mod ema;
pub mod rsi;
pub mod sma;

pub use ema::Ema;
pub use rsi::Rsi;
pub use sma::Sma;

use crate::config::IndicatorSettings;
use crate::error::EngineError;
use shared::{AxisKind, Candle, CandleSet, Indicator, IndicatorMeta, IndicatorSeries, IndicatorValue, SeriesKind, Slots};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Vec<i64>;
    fn axis(&self) -> AxisKind;
    fn kind(&self) -> SeriesKind {
        SeriesKind::LINE_CHART
    }
    /// One entry per input candle; `None` where the indicator is undefined,
    /// including every missing candle.
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>>;
}

/// Calculators enabled by `settings`, in a stable order.
pub fn from_settings(settings: &IndicatorSettings) -> Vec<Box<dyn IndicatorCalculator>> {
    let mut calculators: Vec<Box<dyn IndicatorCalculator>> = Vec::new();
    for &period in &settings.sma_periods {
        calculators.push(Box::new(Sma::new(period)));
    }
    for &period in &settings.ema_periods {
        calculators.push(Box::new(Ema::new(period)));
    }
    if settings.rsi_enabled {
        calculators.push(Box::new(Rsi::new(settings.rsi_period)));
    }
    calculators
}

/// Lowercase alphanumeric form of an indicator name, e.g. `SMA(20)` -> `sma20`.
pub fn slug(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).map(|c| c.to_ascii_lowercase()).collect()
}

/// Runs `calculator` over the block and wraps the result as a single-series
/// indicator block sharing the candle block's grid position.
pub fn build_indicator(candles: &CandleSet, calculator: &dyn IndicatorCalculator) -> Result<Indicator, EngineError> {
    let values: Vec<IndicatorValue> =
        calculator.calculate(&candles.candles).into_iter().map(IndicatorValue::from).collect();
    let values = Slots::try_from(values)
        .map_err(|e| EngineError::IndicatorError(format!("{}: {}", calculator.name(), e)))?;

    let meta = IndicatorMeta {
        uid: format!("{}_{}", candles.uid(), slug(calculator.name())),
        block: candles.block_number(),
        complete: candles.is_complete(),
        last_update: candles.last_update(),
        symbol: candles.symbol().to_string(),
        interval: candles.interval(),
        base_interval: candles.interval(),
        name: calculator.name().to_string(),
        parameters: calculator.parameters(),
    };
    let mut indicator = Indicator::new(meta);
    indicator.series.insert(
        calculator.name().to_string(),
        IndicatorSeries::new(values, calculator.kind(), calculator.axis()),
    );
    Ok(indicator)
}
