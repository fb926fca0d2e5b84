//! Construction-time configuration.

use crate::error::Error;
use crate::error::Result;

/// Number of blocks a list starts with when nothing else is requested.
pub const DEFAULT_BLOCK_COUNT: usize = 1;

/// Capacity of each block when nothing else is requested.
pub const DEFAULT_BLOCK_SIZE: usize = 32;

/// Shape of a new [`BlockList`](crate::BlockList).
///
/// `block_size` is fixed for the lifetime of the list. `initial_blocks` only
/// pre-allocates: blocks past the first sit in reserve until an insertion
/// needs fresh capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockListConfig {
    pub initial_blocks: usize,
    pub block_size: usize,
}

impl BlockListConfig {
    pub fn new(initial_blocks: usize, block_size: usize) -> BlockListConfig {
        return BlockListConfig {
            initial_blocks,
            block_size,
        };
    }

    pub fn with_initial_blocks(mut self, initial_blocks: usize) -> BlockListConfig {
        self.initial_blocks = initial_blocks;
        return self;
    }

    pub fn with_block_size(mut self, block_size: usize) -> BlockListConfig {
        self.block_size = block_size;
        return self;
    }

    /// Check that both parameters are positive and that the block size fits
    /// the snapshot's 32-bit field.
    pub fn validate(&self) -> Result<()> {
        if self.initial_blocks == 0 {
            return Err(Error::invalid_config("initial block count must be positive"));
        }
        if self.block_size == 0 {
            return Err(Error::invalid_config("block size must be positive"));
        }
        if self.block_size > i32::MAX as usize {
            return Err(Error::invalid_config(format!(
                "block size {} exceeds {}",
                self.block_size,
                i32::MAX
            )));
        }
        return Ok(());
    }
}

impl Default for BlockListConfig {
    fn default() -> Self {
        return BlockListConfig::new(DEFAULT_BLOCK_COUNT, DEFAULT_BLOCK_SIZE);
    }
}
