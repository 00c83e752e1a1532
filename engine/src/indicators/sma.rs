// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use shared::{AxisKind, Candle};
use std::collections::VecDeque;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("SMA period must be greater than 0");
        }
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
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
        let mut window = VecDeque::with_capacity(self.period);
        let mut sum = 0.0;

        data.iter()
            .map(|candle| {
                if candle.missing {
                    return None;
                }
                window.push_back(candle.close);
                sum += candle.close;
                if window.len() > self.period {
                    sum -= window.pop_front().unwrap_or_default();
                }
                (window.len() == self.period).then(|| sum / self.period as f64)
            })
            .collect()
    }
}
