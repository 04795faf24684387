//! Cooperative clock scheduling for peripherals.
//!
//! Peripherals register themselves when they have deferred work (a pending
//! transmission, typically) and deregister by returning [`TickOutcome::Done`]
//! from their tick. There are no background threads and no timers; the host
//! drives [`MasterClock::step`] at the global emulation rate, which keeps
//! single-stepped emulation deterministic.

use tracing::trace;

use crate::interrupt::InterruptController;

/// Identifies one schedulable unit to the scheduler.
pub type UnitId = usize;

/// Continuation result of a unit's tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick again on the next scheduler step.
    Continue,
    /// Deregister; the unit will re-register itself when it next has work.
    Done,
}

/// Contract of a schedulable unit.
///
/// The scheduler holds ids, not references; the host resolves each id to
/// its unit and forwards the tick through [`MasterClock::step`]'s callback.
pub trait ClockedUnit {
    /// Called once per scheduler step while registered. May signal the
    /// interrupt controller; the return value decides whether the unit
    /// stays registered.
    fn on_clock_tick(&mut self, irq: &mut dyn InterruptController) -> TickOutcome;
}

/// Registration surface peripherals see.
///
/// Registering an already-registered unit is a no-op; a unit never appears
/// twice in one step.
pub trait ClockScheduler {
    /// Adds a unit to the set ticked on every scheduler step.
    fn register(&mut self, unit: UnitId);
}

/// Shared-clock scheduler driving all registered units in lockstep.
#[derive(Debug, Clone, Default)]
pub struct MasterClock {
    registered: Vec<UnitId>,
}

impl MasterClock {
    /// New scheduler with no registered units.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registered: Vec::new(),
        }
    }

    /// True when the unit is currently registered.
    #[must_use]
    pub fn is_registered(&self, unit: UnitId) -> bool {
        self.registered.contains(&unit)
    }

    /// Units currently registered, in registration order.
    #[must_use]
    pub fn registered_units(&self) -> &[UnitId] {
        &self.registered
    }

    /// Advances the clock one step: ticks every registered unit once, in
    /// registration order, and drops the ones reporting
    /// [`TickOutcome::Done`].
    pub fn step<F>(&mut self, mut tick: F)
    where
        F: FnMut(UnitId) -> TickOutcome,
    {
        self.registered.retain(|&unit| match tick(unit) {
            TickOutcome::Continue => true,
            TickOutcome::Done => {
                trace!(unit, "unit deregistered from master clock");
                false
            }
        });
    }
}

impl ClockScheduler for MasterClock {
    fn register(&mut self, unit: UnitId) {
        if !self.registered.contains(&unit) {
            trace!(unit, "unit registered with master clock");
            self.registered.push(unit);
        }
    }
}

/// Source of the prescaler input frequency the baud-rate generator taps.
pub trait ClockGenerator {
    /// Prescaler input clock `fT0`, in hertz.
    fn ft0_hz(&self) -> u32;
}

/// Clock generator pinned to one frequency, enough for timing derivation
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FixedClockGenerator {
    ft0_hz: u32,
}

impl FixedClockGenerator {
    /// New generator reporting the given `fT0` frequency.
    #[must_use]
    pub const fn new(ft0_hz: u32) -> Self {
        Self { ft0_hz }
    }
}

impl ClockGenerator for FixedClockGenerator {
    fn ft0_hz(&self) -> u32 {
        self.ft0_hz
    }
}
