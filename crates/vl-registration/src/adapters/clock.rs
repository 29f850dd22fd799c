//! Manually driven block clock.

use crate::domain::value_objects::BlockHeight;
use crate::ports::outbound::BlockClock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Block clock whose height is set by its owner.
#[derive(Debug, Default)]
pub struct ManualClock {
    height: AtomicU64,
}

impl ManualClock {
    /// Clock starting at `height`.
    #[must_use]
    pub fn new(height: BlockHeight) -> Self {
        Self {
            height: AtomicU64::new(height),
        }
    }

    /// Jump to `height`.
    pub fn set(&self, height: BlockHeight) {
        self.height.store(height, Ordering::SeqCst);
    }

    /// Advance by `blocks` and return the new height. Saturates at `u64::MAX`.
    pub fn advance(&self, blocks: u64) -> BlockHeight {
        let previous = self
            .height
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |h| {
                Some(h.saturating_add(blocks))
            })
            .unwrap_or_else(|h| h);
        previous.saturating_add(blocks)
    }
}

impl BlockClock for ManualClock {
    fn block_height(&self) -> BlockHeight {
        self.height.load(Ordering::SeqCst)
    }
}
