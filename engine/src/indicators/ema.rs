// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use shared::{AxisKind, Candle};

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("EMA period must be greater than 0");
        }
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Vec<i64> {
        vec![self.period as i64]
    }

    fn axis(&self) -> AxisKind {
        AxisKind::PRICE_AXIS
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let multiplier = 2.0 / (self.period as f64 + 1.0);
        let mut seen = 0;
        // Seeded with the SMA of the first `period` closes
        let mut seed_sum = 0.0;
        let mut previous_ema: Option<f64> = None;

        data.iter()
            .map(|candle| {
                if candle.missing {
                    return None;
                }
                match previous_ema {
                    Some(previous) => {
                        let ema = (candle.close - previous) * multiplier + previous;
                        previous_ema = Some(ema);
                    }
                    None => {
                        seen += 1;
                        seed_sum += candle.close;
                        if seen == self.period {
                            previous_ema = Some(seed_sum / self.period as f64);
                        }
                    }
                }
                previous_ema
            })
            .collect()
    }
}
