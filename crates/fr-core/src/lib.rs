//! Emulation core for an FR-family embedded CPU: bit-accurate instruction
//! decode plus clock-driven peripheral register behavior, so unmodified
//! firmware images can be executed and inspected.
//!
//! Two subsystems carry the weight. [`OpcodeTable`] maps every possible
//! 16-bit instruction word to a resolved [`InstructionDescriptor`] by
//! expanding masked patterns from ordered descriptor layers; lookup is a
//! pure array index and total, so corrupt firmware never crashes the
//! decoder. [`SerialInterface`] reproduces the on-chip serial channel's
//! register, FIFO and interrupt semantics exactly, driven by a cooperative
//! [`MasterClock`].
//!
//! ```
//! use fr_core::{OpcodeTable, TableOptions};
//!
//! let table = OpcodeTable::build(TableOptions::default())?;
//! assert_eq!(table.lookup(0x9FA0).mnemonic, "NOP");
//! assert_eq!(table.lookup(0x9FA1).mnemonic, "UNK");
//! # Ok::<(), fr_core::TableBuildError>(())
//! ```

/// Cooperative clock scheduling and frequency sources.
pub mod clock;
pub use clock::{
    ClockGenerator, ClockScheduler, ClockedUnit, FixedClockGenerator, MasterClock, TickOutcome,
    UnitId,
};

/// Decode metadata types and operand parsing.
pub mod descriptor;
pub use descriptor::{
    ActionOp, DedicatedRegister, DescriptorSpec, DisplayOp, FlowClass, InstructionDescriptor,
    InstructionFormat,
};

/// Build-time and configuration error taxonomy.
pub mod error;
pub use error::{ConfigError, TableBuildError};

/// Interrupt request surface and a recording controller.
pub mod interrupt;
pub use interrupt::{InterruptController, LatchedInterrupts};

/// Static descriptor layers for the instruction set.
pub mod isa;

/// Exhaustive instruction-word lookup table.
pub mod opcode_table;
pub use opcode_table::{OpcodeTable, TableOptions};

/// On-chip peripheral models.
pub mod peripherals;
pub use peripherals::sio::{SerialCapabilities, SerialInterface};

/// Fixed-capacity symbol FIFO.
pub mod queue;
pub use queue::{BoundedSymbolQueue, QueueFull};

/// Register cells with writable-bit masks.
pub mod registers;
pub use registers::MaskedRegister;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
