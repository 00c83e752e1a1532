// Block/time arithmetic for the fixed-size time grid.
//
// A block of `BLOCK_SIZE` slots at a given interval covers
// `[block * BLOCK_SIZE * interval, (block + 1) * BLOCK_SIZE * interval)`.
// Block numbers extend below zero and are obtained by floor division.

/// Number of slots in every candle and indicator block.
pub const BLOCK_SIZE: i64 = 5000;

/// `BLOCK_SIZE` as a slot count.
pub const BLOCK_LEN: usize = BLOCK_SIZE as usize;

pub fn block_to_unix(block: i64, interval: i64) -> i64 {
    block * BLOCK_SIZE * interval
}

/// Block containing `unix_time`. Rounds toward negative infinity so that
/// block numbering is continuous across zero.
pub fn unix_to_block(unix_time: i64, interval: i64) -> i64 {
    let span = BLOCK_SIZE * interval;
    let block = unix_time / span;
    if unix_time < 0 && unix_time % span != 0 {
        block - 1
    } else {
        block
    }
}

/// Timestamp of the first slot of `block`.
pub fn unix_first(block: i64, interval: i64) -> i64 {
    block_to_unix(block, interval)
}

/// Timestamp of the last slot of `block`.
pub fn unix_last(block: i64, interval: i64) -> i64 {
    unix_first(block, interval) + (BLOCK_SIZE - 1) * interval
}

pub fn timestamp_at_index(block: i64, interval: i64, slot: i64) -> i64 {
    unix_first(block, interval) + slot * interval
}

/// Whether `unix_time` falls inside `block`.
pub fn contains(block: i64, interval: i64, unix_time: i64) -> bool {
    unix_to_block(unix_time, interval) == block
}

/// Slot of `unix_time` inside `block`. Truncating; a time outside the block
/// yields a slot outside `0..BLOCK_SIZE`.
pub fn index_for_time(block: i64, interval: i64, unix_time: i64) -> i64 {
    (unix_time - unix_first(block, interval)) / interval
}
