// Relative Strength Index (RSI) indicator implementation
use super::IndicatorCalculator;
use shared::{AxisKind, Candle};

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("RSI period must be greater than 0");
        }
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }

    fn rsi(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            // No losses in the window
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Vec<i64> {
        vec![self.period as i64]
    }

    fn axis(&self) -> AxisKind {
        AxisKind::CUSTOM_AXIS
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let period = self.period as f64;
        let mut previous_close: Option<f64> = None;
        let mut changes = 0;
        let (mut avg_gain, mut avg_loss) = (0.0, 0.0);

        data.iter()
            .map(|candle| {
                if candle.missing {
                    return None;
                }
                let previous = previous_close.replace(candle.close)?;
                let change = candle.close - previous;
                let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };
                changes += 1;

                if changes <= self.period {
                    // Simple average over the first `period` changes
                    avg_gain += gain / period;
                    avg_loss += loss / period;
                    return (changes == self.period).then(|| Self::rsi(avg_gain, avg_loss));
                }
                // Wilder's smoothing
                avg_gain = (avg_gain * (period - 1.0) + gain) / period;
                avg_loss = (avg_loss * (period - 1.0) + loss) / period;
                Some(Self::rsi(avg_gain, avg_loss))
            })
            .collect()
    }
}
