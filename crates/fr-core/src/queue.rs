//! Fixed-capacity symbol FIFO used for the serial receive/transmit paths.

use std::collections::VecDeque;

use thiserror::Error;

/// Rejection returned by the checked push when the queue is at capacity.
///
/// The submitted symbol is handed back so the caller can log or discard it
/// exactly as the modeled hardware would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue at capacity {capacity}, symbol {symbol:#06X} rejected")]
pub struct QueueFull {
    /// Configured capacity at the time of rejection.
    pub capacity: usize,
    /// Symbol that was not enqueued.
    pub symbol: u16,
}

/// Bounded FIFO of pending 5-to-9-bit symbols.
///
/// Capacity is fixed at construction and survives [`clear`](Self::clear);
/// resets never replace the container.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BoundedSymbolQueue {
    symbols: VecDeque<u16>,
    capacity: usize,
}

impl BoundedSymbolQueue {
    /// New empty queue with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            symbols: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a symbol, rejecting it when the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`QueueFull`] carrying the rejected symbol; queue contents
    /// are unchanged in that case.
    pub fn push(&mut self, symbol: u16) -> Result<(), QueueFull> {
        if self.symbols.len() >= self.capacity {
            return Err(QueueFull {
                capacity: self.capacity,
                symbol,
            });
        }
        self.symbols.push_back(symbol);
        Ok(())
    }

    /// Appends a symbol without a capacity check.
    ///
    /// The transmit path uses this: the hardware accepts writes into a full
    /// transmit FIFO and leaves overflow avoidance to the firmware.
    pub fn push_unchecked(&mut self, symbol: u16) {
        self.symbols.push_back(symbol);
    }

    /// Removes and returns the oldest symbol.
    pub fn pop(&mut self) -> Option<u16> {
        self.symbols.pop_front()
    }

    /// Drops all pending symbols; capacity is unchanged.
    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    /// Count of pending symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when no symbols are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
