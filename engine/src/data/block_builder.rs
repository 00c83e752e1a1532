// Assembles a candle stream into fixed-size blocks
use shared::block::{self, BLOCK_SIZE};
use shared::{Candle, CandleSet, DataSetMeta};
use std::collections::BTreeMap;

pub fn block_uid(symbol: &str, interval: i64, block: i64) -> String {
    format!("{}_{}_{}", symbol, interval, block)
}

/// Buckets candles of one symbol and interval into `CandleSet` blocks.
/// Slots that never receive a candle stay as missing placeholders.
pub struct CandleBlockBuilder {
    symbol: String,
    interval: i64,
    blocks: BTreeMap<i64, CandleSet>,
}

impl CandleBlockBuilder {
    pub fn new(symbol: &str, interval: i64) -> Self {
        assert!(interval > 0, "block interval must be positive");
        CandleBlockBuilder {
            symbol: symbol.to_string(),
            interval,
            blocks: BTreeMap::new(),
        }
    }

    /// Places `candle` into its slot, snapping its time down to the slot
    /// start. A later candle for the same slot replaces the earlier one.
    pub fn push(&mut self, candle: Candle) {
        let number = block::unix_to_block(candle.time, self.interval);
        let slot = block::index_for_time(number, self.interval, candle.time);
        let (symbol, interval) = (&self.symbol, self.interval);
        let set = self.blocks.entry(number).or_insert_with(|| {
            CandleSet::placeholder(DataSetMeta {
                uid: block_uid(symbol, interval, number),
                block: number,
                complete: false,
                last_update: 0,
                symbol: symbol.clone(),
                interval,
            })
        });

        if let Some(target) = set.at_index_mut(slot) {
            *target = Candle {
                time: block::timestamp_at_index(number, interval, slot),
                ..candle
            };
        }
    }

    pub fn extend(&mut self, candles: impl IntoIterator<Item = Candle>) {
        for candle in candles {
            self.push(candle);
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Finalizes every block in ascending block order. A block is complete
    /// once `now` lies past its last slot.
    pub fn finish(self, now: i64) -> Vec<CandleSet> {
        self.blocks
            .into_values()
            .map(|mut set| {
                set.meta.complete = now > set.unix_last();
                set.meta.last_update = now;
                let filled = set.candles.iter().filter(|c| !c.missing).count();
                tracing::debug!(
                    uid = %set.meta.uid,
                    filled,
                    missing = BLOCK_SIZE as usize - filled,
                    complete = set.meta.complete,
                    "Assembled candle block"
                );
                set
            })
            .collect()
    }
}
