// Services built on top of the block codecs
pub mod block_service;

pub use block_service::{BlockService, BlockSummary, PackRequest, PackSummary};
