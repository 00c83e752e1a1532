// Data model and time-grid arithmetic shared by the block codecs and their
// producers.

pub mod block;
pub mod models;
pub mod slots;
pub mod timeframe;

pub use block::BLOCK_SIZE;
pub use models::{
    AxisKind, Candle, CandleSet, DataSetMeta, Indicator, IndicatorMeta, IndicatorSeries, IndicatorValue,
    SeriesKind,
};
pub use slots::{SlotCountError, Slots};
pub use timeframe::TimeFrame;
