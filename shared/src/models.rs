use crate::block;
use crate::slots::Slots;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
    #[serde(rename = "tv")]
    pub taker_volume: f64,
    #[serde(rename = "not")]
    pub number_of_trades: i64,
    #[serde(rename = "t")]
    pub time: i64,
    /// Synthesized placeholder for a slot with no market data.
    #[serde(rename = "m")]
    pub missing: bool,
}

impl Candle {
    pub fn placeholder(time: i64) -> Self {
        Candle { time, missing: true, ..Default::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetMeta {
    pub uid: String,
    pub block: i64,
    pub complete: bool,
    pub last_update: i64,
    pub symbol: String,
    pub interval: i64,
}

/// One block of `BLOCK_SIZE` candles; the candle at slot `i` covers
/// `unix_first() + i * interval`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSet {
    pub candles: Slots<Candle>,
    pub meta: DataSetMeta,
}

impl CandleSet {
    /// A block whose every slot is a missing candle stamped with its slot time.
    pub fn placeholder(meta: DataSetMeta) -> Self {
        let candles = Slots::from_fn(|slot| {
            Candle::placeholder(block::timestamp_at_index(meta.block, meta.interval, slot as i64))
        });
        CandleSet { candles, meta }
    }

    pub fn uid(&self) -> &str {
        &self.meta.uid
    }

    pub fn block_number(&self) -> i64 {
        self.meta.block
    }

    pub fn is_complete(&self) -> bool {
        self.meta.complete
    }

    pub fn last_update(&self) -> i64 {
        self.meta.last_update
    }

    pub fn symbol(&self) -> &str {
        &self.meta.symbol
    }

    pub fn interval(&self) -> i64 {
        self.meta.interval
    }

    pub fn unix_first(&self) -> i64 {
        block::unix_first(self.meta.block, self.meta.interval)
    }

    pub fn unix_last(&self) -> i64 {
        block::unix_last(self.meta.block, self.meta.interval)
    }

    pub fn timestamp_at_index(&self, slot: i64) -> i64 {
        block::timestamp_at_index(self.meta.block, self.meta.interval, slot)
    }

    pub fn index(&self, unix_time: i64) -> i64 {
        block::index_for_time(self.meta.block, self.meta.interval, unix_time)
    }

    pub fn at_index(&self, slot: i64) -> Option<&Candle> {
        slot_offset(slot).and_then(|i| self.candles.get(i))
    }

    pub fn at_index_mut(&mut self, slot: i64) -> Option<&mut Candle> {
        slot_offset(slot).and_then(|i| self.candles.get_mut(i))
    }

    pub fn at_time(&self, unix_time: i64) -> Option<&Candle> {
        if !block::contains(self.meta.block, self.meta.interval, unix_time) {
            return None;
        }
        self.at_index(self.index(unix_time))
    }

    pub fn at_time_mut(&mut self, unix_time: i64) -> Option<&mut Candle> {
        if !block::contains(self.meta.block, self.meta.interval, unix_time) {
            return None;
        }
        let slot = self.index(unix_time);
        self.at_index_mut(slot)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    #[serde(rename = "v")]
    pub value: f64,
    #[serde(rename = "m")]
    pub missing: bool,
}

impl IndicatorValue {
    pub const MISSING: IndicatorValue = IndicatorValue { value: 0.0, missing: true };

    pub fn new(value: f64) -> Self {
        IndicatorValue { value, missing: false }
    }
}

impl From<Option<f64>> for IndicatorValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(IndicatorValue::MISSING, IndicatorValue::new)
    }
}

/// Rendering hint for a series. Any short tag is accepted; the well-known
/// ones are provided as constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKind(pub Cow<'static, str>);

impl SeriesKind {
    pub const BAR_CHART: SeriesKind = SeriesKind(Cow::Borrowed("BAR_CHART"));
    pub const LINE_CHART: SeriesKind = SeriesKind(Cow::Borrowed("LINE_CHART"));
    pub const PATH_CHART: SeriesKind = SeriesKind(Cow::Borrowed("PATH_CHART"));

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which axis a series is plotted against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisKind(pub Cow<'static, str>);

impl AxisKind {
    pub const PRICE_AXIS: AxisKind = AxisKind(Cow::Borrowed("PRICE_AXIS"));
    pub const CUSTOM_AXIS: AxisKind = AxisKind(Cow::Borrowed("CUSTOM_AXIS"));

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SeriesKind {
    fn from(tag: String) -> Self {
        SeriesKind(Cow::Owned(tag))
    }
}

impl From<String> for AxisKind {
    fn from(tag: String) -> Self {
        AxisKind(Cow::Owned(tag))
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub values: Slots<IndicatorValue>,
    pub kind: SeriesKind,
    pub axis: AxisKind,
}

impl IndicatorSeries {
    pub fn new(values: Slots<IndicatorValue>, kind: SeriesKind, axis: AxisKind) -> Self {
        IndicatorSeries { values, kind, axis }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorMeta {
    pub uid: String,
    pub block: i64,
    pub complete: bool,
    pub last_update: i64,
    pub symbol: String,
    pub interval: i64,
    /// Interval of the candles the indicator was computed from.
    pub base_interval: i64,
    pub name: String,
    pub parameters: Vec<i64>,
}

/// Named indicator series for one block. Series are addressed by name;
/// their order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub series: HashMap<String, IndicatorSeries>,
    pub meta: IndicatorMeta,
}

impl Indicator {
    pub fn new(meta: IndicatorMeta) -> Self {
        Indicator { series: HashMap::new(), meta }
    }

    pub fn uid(&self) -> &str {
        &self.meta.uid
    }

    pub fn block_number(&self) -> i64 {
        self.meta.block
    }

    pub fn is_complete(&self) -> bool {
        self.meta.complete
    }

    pub fn last_update(&self) -> i64 {
        self.meta.last_update
    }

    pub fn symbol(&self) -> &str {
        &self.meta.symbol
    }

    pub fn interval(&self) -> i64 {
        self.meta.interval
    }

    pub fn unix_first(&self) -> i64 {
        block::unix_first(self.meta.block, self.meta.interval)
    }

    pub fn unix_last(&self) -> i64 {
        block::unix_last(self.meta.block, self.meta.interval)
    }

    pub fn timestamp_at_index(&self, slot: i64) -> i64 {
        block::timestamp_at_index(self.meta.block, self.meta.interval, slot)
    }

    pub fn index(&self, unix_time: i64) -> i64 {
        block::index_for_time(self.meta.block, self.meta.interval, unix_time)
    }

    pub fn at_index(&self, series: &str, slot: i64) -> Option<&IndicatorValue> {
        let values = &self.series.get(series)?.values;
        slot_offset(slot).and_then(|i| values.get(i))
    }

    pub fn at_time(&self, series: &str, unix_time: i64) -> Option<&IndicatorValue> {
        if !block::contains(self.meta.block, self.meta.interval, unix_time) {
            return None;
        }
        self.at_index(series, self.index(unix_time))
    }
}

fn slot_offset(slot: i64) -> Option<usize> {
    usize::try_from(slot).ok()
}
