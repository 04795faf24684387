//! On-chip peripheral models.
//!
//! Every peripheral follows the same contract: masked register accessors on
//! the bus side, explicit `receive`/`take_transmitted_value` data paths on
//! the device side, and a clock-tick callback for deferred work. Timers,
//! DMA and GPIO would slot in next to [`sio`] under the same shape.

pub mod sio;
