//! Serial I/O channel, modeled bit-for-bit after the on-chip SIO block.
//!
//! The channel composes masked registers, a single-slot buffer pair and a
//! FIFO pair into one state machine. Firmware talks to it through the
//! register accessors; an external device (or test harness) injects symbols
//! with [`SerialInterface::receive`] and observes transmissions through the
//! output slot filled by the clock tick. Chip-family variants differ only
//! in their [`SerialCapabilities`], never in control flow.
//!
//! Only I/O interface mode is modeled faithfully. Selecting a UART mode
//! logs a warning and proceeds with I/O-mode behavior; parity and 9-bit
//! data handling are a documented gap, not approximated.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::clock::{ClockGenerator, ClockScheduler, ClockedUnit, TickOutcome, UnitId};
use crate::error::ConfigError;
use crate::interrupt::InterruptController;
use crate::queue::BoundedSymbolQueue;
use crate::registers::MaskedRegister;

const EN_SIOE: u8 = 0b0000_0001;

const CR_IOC: u8 = 0b0000_0001;
const CR_FERR: u8 = 0b0000_0100;
const CR_PERR: u8 = 0b0000_1000;
const CR_OERR: u8 = 0b0001_0000;
const CR_WRITABLE: u8 = 0b0110_0011;
const CR_READ_CLEAR: u8 = CR_FERR | CR_PERR | CR_OERR;

const MOD0_SM: u8 = 0b0000_1100;
const MOD0_RXE: u8 = 0b0010_0000;

const MOD1_SINT: u8 = 0b0000_1110;
const MOD1_TXE: u8 = 0b0001_0000;
const MOD1_FDPX: u8 = 0b0110_0000;
const MOD1_FDPX_RX: u8 = 0b0010_0000;
const MOD1_FDPX_TX: u8 = 0b0100_0000;

const MOD2_SWRST: u8 = 0b0000_0011;
const MOD2_WRITABLE: u8 = 0b0001_1111;
const MOD2_TXRUN: u8 = 0b0010_0000;
const MOD2_RBFLL: u8 = 0b0100_0000;
const MOD2_TBEMP: u8 = 0b1000_0000;

const BRCR_BRS: u8 = 0b0000_1111;
const BRCR_BRCK: u8 = 0b0011_0000;
const BRCR_BRADDE: u8 = 0b0100_0000;
const BRADD_BRK: u8 = 0b0000_1111;

const RFC_RFIS: u8 = 0b0100_0000;
const RFC_RFCS: u8 = 0b1000_0000;
const RFC_READABLE: u8 = 0b0101_1111;

const TFC_TFIS: u8 = 0b0100_0000;
const TFC_TFCS: u8 = 0b1000_0000;
const TFC_READABLE: u8 = 0b0111_1111;

const RST_ROR: u8 = 0b1000_0000;
const RST_FILL: u8 = 0b0000_0111;

const FCNF_CNFG: u8 = 0b0000_0001;
const FCNF_RXTXCNT: u8 = 0b0000_0010;
const FCNF_RFIE: u8 = 0b0000_0100;
const FCNF_RFST: u8 = 0b0001_0000;

/// Bits per transferred symbol in I/O interface mode.
const SYMBOL_BITS: u32 = 8;

/// Inter-symbol gap in serial clock units, indexed by the 3-bit SINT field.
const SINT_INTERVALS: [u32; 8] = [0, 1, 2, 4, 8, 16, 32, 64];

/// Per-channel configuration distinguishing chip-family variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SerialCapabilities {
    /// Channel number on the chip; doubles as the scheduler unit id.
    pub channel: u8,
    /// Hardware FIFO depth in symbols.
    pub fifo_size: usize,
    /// Interrupt number raised on receive events.
    pub rx_interrupt: u8,
    /// Interrupt number raised on transmit events.
    pub tx_interrupt: u8,
    /// Whether the FIFO is split between directions in full duplex,
    /// halving usable depth and narrowing the fill-level fields to one
    /// bit. The high-speed channel variant keeps full depth either way.
    pub duplex_scaled_fifo: bool,
    /// Whether a transmit-FIFO underrun sets the parity/underrun error
    /// flag like the single-slot path does. The datasheet is silent for
    /// the FIFO path, so this stays a policy knob instead of a guess.
    pub fifo_underrun_sets_error: bool,
}

impl SerialCapabilities {
    /// First receive interrupt number; channels interleave rx/tx pairs
    /// upward from here.
    pub const RX_INTERRUPT_BASE: u8 = 80;
    /// First transmit interrupt number.
    pub const TX_INTERRUPT_BASE: u8 = 81;

    /// Standard channel profile: 4-deep FIFO shared between directions,
    /// interleaved interrupt pair, no error flag on FIFO underrun.
    #[must_use]
    pub const fn channel(channel: u8) -> Self {
        Self {
            channel,
            fifo_size: 4,
            rx_interrupt: Self::RX_INTERRUPT_BASE + 2 * channel,
            tx_interrupt: Self::TX_INTERRUPT_BASE + 2 * channel,
            duplex_scaled_fifo: true,
            fifo_underrun_sets_error: false,
        }
    }
}

/// One serial I/O channel.
///
/// Created disabled with all buffers empty. Registers mutate under
/// firmware/register-bus calls; the channel registers itself with the
/// shared clock scheduler when a transmission is pending and deregisters by
/// returning [`TickOutcome::Done`] from its tick.
#[derive(Debug)]
pub struct SerialInterface {
    caps: SerialCapabilities,
    en: MaskedRegister,
    cr: MaskedRegister,
    mod0: MaskedRegister,
    mod1: MaskedRegister,
    mod2: MaskedRegister,
    brcr: MaskedRegister,
    bradd: MaskedRegister,
    rfc: MaskedRegister,
    tfc: MaskedRegister,
    rst: MaskedRegister,
    tst: MaskedRegister,
    fcnf: MaskedRegister,
    rx_buf: u16,
    tx_buf: u16,
    rx_fifo: BoundedSymbolQueue,
    tx_fifo: BoundedSymbolQueue,
    rx_fill_level: usize,
    tx_fill_level: usize,
    output: VecDeque<u16>,
}

impl SerialInterface {
    /// New channel with the given capabilities, disabled, buffers empty.
    #[must_use]
    pub fn new(caps: SerialCapabilities) -> Self {
        let mut sio = Self {
            caps,
            en: MaskedRegister::new(0, EN_SIOE),
            cr: MaskedRegister::new(0, CR_WRITABLE),
            mod0: MaskedRegister::new(0, 0xFF),
            mod1: MaskedRegister::new(0, 0xFF),
            mod2: MaskedRegister::new(MOD2_TBEMP, MOD2_WRITABLE),
            brcr: MaskedRegister::new(0, 0xFF),
            bradd: MaskedRegister::new(0, BRADD_BRK),
            rfc: MaskedRegister::new(0, 0xFF),
            tfc: MaskedRegister::new(0, 0xFF),
            rst: MaskedRegister::new(0, 0),
            tst: MaskedRegister::new(0b1000_0000, 0),
            fcnf: MaskedRegister::new(0, 0xFF),
            rx_buf: 0,
            tx_buf: 0,
            rx_fifo: BoundedSymbolQueue::new(caps.fifo_size),
            tx_fifo: BoundedSymbolQueue::new(caps.fifo_size),
            rx_fill_level: 0,
            tx_fill_level: 0,
            output: VecDeque::new(),
        };
        sio.recompute_fill_levels();
        sio
    }

    /// Capabilities this channel was built with.
    #[must_use]
    pub const fn capabilities(&self) -> SerialCapabilities {
        self.caps
    }

    /// Scheduler identity of this channel.
    #[must_use]
    pub fn unit_id(&self) -> UnitId {
        UnitId::from(self.caps.channel)
    }

    // ------------------------------------------------------------------
    // Register bus surface

    /// Reads the enable register.
    #[must_use]
    pub const fn read_en(&self) -> u8 {
        self.en.read()
    }

    /// Writes the enable register; only the SIOE bit is writable.
    pub fn write_en(&mut self, value: u8) {
        self.en.write(value);
    }

    /// Reads the control register and clears the sticky framing, parity/
    /// underrun and overrun error flags as a side effect, per the
    /// hardware's read-then-clear contract.
    pub fn read_cr(&mut self) -> u8 {
        let value = self.cr.read();
        self.cr.clear_bits(CR_READ_CLEAR);
        value
    }

    /// Writes the control register; error flags and RB8 are untouched.
    pub fn write_cr(&mut self, value: u8) {
        self.cr.write(value);
    }

    /// Reads mode control register 0.
    #[must_use]
    pub const fn read_mod0(&self) -> u8 {
        self.mod0.read()
    }

    /// Writes mode control register 0.
    pub fn write_mod0(&mut self, value: u8) {
        self.mod0.write(value);
        if self.mod0.read() & MOD0_SM != 0 {
            warn!(
                channel = self.caps.channel,
                "UART mode selected but unsupported, proceeding in I/O interface mode"
            );
        }
    }

    /// Reads mode control register 1.
    #[must_use]
    pub const fn read_mod1(&self) -> u8 {
        self.mod1.read()
    }

    /// Writes mode control register 1, recomputing the fill-level
    /// thresholds (the duplex field may have changed). A rising edge on
    /// TXE with symbols already waiting schedules a transmission.
    pub fn write_mod1(&mut self, value: u8, scheduler: &mut dyn ClockScheduler) {
        let was_tx_enabled = self.is_tx_enabled();
        self.mod1.write(value);
        self.recompute_fill_levels();
        if self.is_tx_enabled() && !was_tx_enabled && self.pending_tx_symbols() > 0 {
            scheduler.register(self.unit_id());
        }
    }

    /// Reads mode control register 2.
    #[must_use]
    pub const fn read_mod2(&self) -> u8 {
        self.mod2.read()
    }

    /// Writes mode control register 2. A `10` then `01` sequence in the
    /// low SWRST bits triggers the soft reset before the write lands;
    /// TBEMP, RBFLL and TXRUN stay read-only throughout.
    pub fn write_mod2(&mut self, value: u8) {
        if self.mod2.read() & MOD2_SWRST == 0b10 && value & MOD2_SWRST == 0b01 {
            self.soft_reset();
        }
        self.mod2.write(value);
    }

    /// Reads the baud-rate generator control register.
    #[must_use]
    pub const fn read_brcr(&self) -> u8 {
        self.brcr.read()
    }

    /// Writes the baud-rate generator control register.
    pub fn write_brcr(&mut self, value: u8) {
        self.brcr.write(value);
    }

    /// Reads the fine-adjust register.
    #[must_use]
    pub const fn read_bradd(&self) -> u8 {
        self.bradd.read()
    }

    /// Writes the fine-adjust register; only the K field is writable.
    pub fn write_bradd(&mut self, value: u8) {
        self.bradd.write(value);
    }

    /// Reads the receive-FIFO control register.
    #[must_use]
    pub const fn read_rfc(&self) -> u8 {
        self.rfc.read() & RFC_READABLE
    }

    /// Writes the receive-FIFO control register. A set RFCS bit clears
    /// the receive FIFO; the fill-level threshold is recomputed.
    pub fn write_rfc(&mut self, value: u8) {
        if value & RFC_RFCS != 0 {
            self.rx_fifo.clear();
        }
        self.rfc.write(value);
        self.recompute_fill_levels();
    }

    /// Reads the transmit-FIFO control register.
    #[must_use]
    pub const fn read_tfc(&self) -> u8 {
        self.tfc.read() & TFC_READABLE
    }

    /// Writes the transmit-FIFO control register. A set TFCS bit clears
    /// the transmit FIFO; the fill-level threshold is recomputed.
    pub fn write_tfc(&mut self, value: u8) {
        self.tfc.write(value);
        if value & TFC_TFCS != 0 {
            self.tx_fifo.clear();
        }
        self.recompute_fill_levels();
    }

    /// Reads the receive-FIFO status register: overrun flag plus the live
    /// FIFO fill count in the low bits.
    #[must_use]
    pub fn read_rst(&self) -> u8 {
        let fill = self.rx_fifo.len().min(usize::from(RST_FILL));
        self.rst.read() | u8::try_from(fill).unwrap_or(RST_FILL)
    }

    /// Rejects writes; the receive-FIFO status register is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ConfigError::ReadOnlyRegister`].
    pub fn write_rst(&mut self, _value: u8) -> Result<(), ConfigError> {
        Err(ConfigError::ReadOnlyRegister("rst"))
    }

    /// Reads the transmit-FIFO status register.
    #[must_use]
    pub const fn read_tst(&self) -> u8 {
        self.tst.read()
    }

    /// Rejects writes; the transmit-FIFO status register is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ConfigError::ReadOnlyRegister`].
    pub fn write_tst(&mut self, _value: u8) -> Result<(), ConfigError> {
        Err(ConfigError::ReadOnlyRegister("tst"))
    }

    /// Reads the FIFO configuration register.
    #[must_use]
    pub const fn read_fcnf(&self) -> u8 {
        self.fcnf.read()
    }

    /// Writes the FIFO configuration register.
    pub fn write_fcnf(&mut self, value: u8) {
        self.fcnf.write(value);
    }

    /// Firmware read of received data: single-slot buffer when the FIFO is
    /// disabled (clearing RBFLL), FIFO head otherwise (clearing the FIFO
    /// overrun flag). An empty FIFO reads as 0.
    pub fn read_buf(&mut self) -> u16 {
        if self.fifo_enabled() {
            self.rst.clear_bits(RST_ROR);
            self.rx_fifo.pop().unwrap_or_else(|| {
                debug!(channel = self.caps.channel, "read from empty receive fifo");
                0
            })
        } else {
            self.mod2.clear_bits(MOD2_RBFLL);
            self.rx_buf
        }
    }

    /// Firmware write of data to send. While the channel is disabled the
    /// raw buffer is still updated (a documented way to pre-load it) but
    /// nothing is transmitted. While enabled, the symbol lands in the
    /// single-slot buffer or the transmit FIFO, and a pending transmit
    /// schedules this channel for a deferred tick, modeling propagation
    /// delay before the value leaves the pin.
    pub fn write_buf(&mut self, value: u16, scheduler: &mut dyn ClockScheduler) {
        if !self.is_enabled() {
            self.tx_buf = value;
            return;
        }
        if self.fifo_enabled() {
            // hardware accepts writes into a full transmit FIFO
            self.tx_fifo.push_unchecked(value);
        } else {
            self.tx_buf = value;
            self.mod2.clear_bits(MOD2_TBEMP);
        }
        if self.is_tx_enabled() {
            scheduler.register(self.unit_id());
        }
    }

    // ------------------------------------------------------------------
    // Device-side data path

    /// Symbol arriving from the remote device. Dropped (with a log) unless
    /// the channel is enabled, the receive path is enabled and the duplex
    /// direction permits reception.
    pub fn receive(&mut self, value: u16, irq: &mut dyn InterruptController) {
        if !(self.is_enabled() && self.is_rx_enabled() && self.duplex_allows_rx()) {
            debug!(
                channel = self.caps.channel,
                value, "symbol dropped, receive path not accepting"
            );
            return;
        }
        if self.fifo_enabled() {
            self.receive_into_fifo(value, irq);
        } else {
            self.receive_into_buffer(value, irq);
        }
    }

    fn receive_into_buffer(&mut self, value: u16, irq: &mut dyn InterruptController) {
        if self.mod2.is_set(MOD2_RBFLL) {
            // unread data still in the buffer: new symbol is lost
            debug!(channel = self.caps.channel, "receive buffer overrun");
            self.cr.set_bits(CR_OERR);
            return;
        }
        self.rx_buf = value;
        self.mod2.set_bits(MOD2_RBFLL);
        irq.request_interrupt(self.caps.rx_interrupt);
    }

    fn receive_into_fifo(&mut self, value: u16, irq: &mut dyn InterruptController) {
        if self.rx_fifo.len() >= self.usable_rx_fifo_size() {
            debug!(channel = self.caps.channel, "receive fifo overrun");
            self.flag_rx_overrun();
            return;
        }
        match self.rx_fifo.push(value) {
            Ok(()) => {
                let reached = if self.rfc.is_set(RFC_RFIS) {
                    self.rx_fifo.len() >= self.rx_fill_level
                } else {
                    self.rx_fifo.len() == self.rx_fill_level
                };
                if reached {
                    if self.fcnf.is_set(FCNF_RFIE) {
                        irq.request_interrupt(self.caps.rx_interrupt);
                    }
                    if self.fcnf.is_set(FCNF_RXTXCNT) {
                        self.mod0.clear_bits(MOD0_RXE);
                    }
                }
            }
            Err(rejected) => {
                debug!(channel = self.caps.channel, %rejected, "receive fifo overrun");
                self.flag_rx_overrun();
            }
        }
    }

    fn flag_rx_overrun(&mut self) {
        self.cr.set_bits(CR_OERR);
        self.rst.set_bits(RST_ROR);
    }

    /// Symbol leaving towards the remote device, or `None` when the
    /// transmit path is gated off or has nothing to send (underrun).
    pub fn take_transmitted_value(&mut self, irq: &mut dyn InterruptController) -> Option<u16> {
        if !(self.is_enabled() && self.is_tx_enabled() && self.duplex_allows_tx()) {
            debug!(
                channel = self.caps.channel,
                "transmit path not active, nothing taken"
            );
            return None;
        }
        if self.fifo_enabled() {
            self.take_from_fifo(irq)
        } else {
            self.take_from_buffer(irq)
        }
    }

    fn take_from_buffer(&mut self, irq: &mut dyn InterruptController) -> Option<u16> {
        if self.mod2.is_set(MOD2_TBEMP) {
            debug!(channel = self.caps.channel, "transmit buffer underrun");
            // Underrun is only observable with SCLK as input: the remote
            // keeps clocking an empty buffer. Driving SCLK ourselves, the
            // clock simply stops, so no error flag.
            if self.cr.is_set(CR_IOC) {
                self.cr.set_bits(CR_PERR);
            }
            return None;
        }
        self.mod2.set_bits(MOD2_TBEMP);
        irq.request_interrupt(self.caps.tx_interrupt);
        Some(self.tx_buf)
    }

    fn take_from_fifo(&mut self, irq: &mut dyn InterruptController) -> Option<u16> {
        let Some(value) = self.tx_fifo.pop() else {
            debug!(channel = self.caps.channel, "transmit fifo underrun");
            if self.caps.fifo_underrun_sets_error && self.cr.is_set(CR_IOC) {
                self.cr.set_bits(CR_PERR);
            }
            return None;
        };
        let reached = if self.tfc.is_set(TFC_TFIS) {
            self.tx_fifo.len() <= self.tx_fill_level
        } else {
            self.tx_fifo.len() == self.tx_fill_level
        };
        if reached {
            irq.request_interrupt(self.caps.tx_interrupt);
            if self.fcnf.is_set(FCNF_RXTXCNT) {
                self.mod1.clear_bits(MOD1_TXE);
            }
        }
        Some(value)
    }

    /// Next symbol the channel has put on the wire, if any.
    pub fn pop_output(&mut self) -> Option<u16> {
        self.output.pop_front()
    }

    // ------------------------------------------------------------------
    // Timing derivation

    /// Baud-rate divide ratio N; the encoded value 0 means 16.
    #[must_use]
    pub const fn divide_ratio(&self) -> u8 {
        let brs = self.brcr.read() & BRCR_BRS;
        if brs == 0 {
            16
        } else {
            brs
        }
    }

    /// Baud rate derived from the selected prescaler tap and divide
    /// ratio, with optional fine adjustment.
    ///
    /// # Errors
    ///
    /// Fine adjustment combined with `K = 0` or `N ∈ {1, 16}` is
    /// undefined on the hardware and rejected as a [`ConfigError`].
    pub fn baud_rate(&self, clocks: &dyn ClockGenerator) -> Result<u32, ConfigError> {
        let n = self.divide_ratio();
        let input = self.baud_input_clock(clocks);
        if !self.brcr.is_set(BRCR_BRADDE) {
            return Ok(input / u32::from(n));
        }
        if n == 1 || n == 16 {
            return Err(ConfigError::FineAdjustDivideRatio { n });
        }
        let k = self.bradd.read() & BRADD_BRK;
        if k == 0 {
            return Err(ConfigError::FineAdjustZeroK);
        }
        // divider is N + (16 - K)/16, kept in integer form
        let divider_sixteenths = 16 * u64::from(n) + 16 - u64::from(k);
        Ok(u32::try_from(u64::from(input) * 16 / divider_sixteenths).unwrap_or(u32::MAX))
    }

    /// Serial clock in I/O interface mode: 0 with SCLK as input (the
    /// remote drives the clock), half the baud rate when driving SCLK.
    ///
    /// # Errors
    ///
    /// Propagates baud-rate configuration errors.
    pub fn sio_clk(&self, clocks: &dyn ClockGenerator) -> Result<u32, ConfigError> {
        if self.cr.is_set(CR_IOC) {
            Ok(0)
        } else {
            Ok(self.baud_rate(clocks)? / 2)
        }
    }

    /// Effective symbol rate: serial clock over bits-per-symbol plus the
    /// configured inter-symbol gap.
    ///
    /// # Errors
    ///
    /// Propagates baud-rate configuration errors.
    pub fn symbol_rate(&self, clocks: &dyn ClockGenerator) -> Result<u32, ConfigError> {
        Ok(self.sio_clk(clocks)? / (SYMBOL_BITS + self.interval_time_in_sclk()))
    }

    fn baud_input_clock(&self, clocks: &dyn ClockGenerator) -> u32 {
        match (self.brcr.read() & BRCR_BRCK) >> 4 {
            0b00 => clocks.ft0_hz() / 2,
            0b01 => clocks.ft0_hz() / 8,
            0b10 => clocks.ft0_hz() / 32,
            _ => clocks.ft0_hz() / 128,
        }
    }

    fn interval_time_in_sclk(&self) -> u32 {
        SINT_INTERVALS[usize::from((self.mod1.read() & MOD1_SINT) >> 1)]
    }

    // ------------------------------------------------------------------
    // Internal state machine helpers

    fn soft_reset(&mut self) {
        self.mod0.clear_bits(MOD0_RXE);
        self.mod1.clear_bits(MOD1_TXE);
        self.mod2.clear_bits(MOD2_TBEMP | MOD2_RBFLL | MOD2_TXRUN);
        self.cr.clear_bits(CR_FERR | CR_PERR | CR_OERR);
    }

    fn recompute_fill_levels(&mut self) {
        // the fill-level fields are exactly wide enough to index the
        // usable depth, so the field mask is depth - 1
        let max = self.max_fifo_size();
        let field = u8::try_from(max - 1).unwrap_or(0b11);
        let rx = usize::from(self.rfc.read() & field);
        self.rx_fill_level = if rx == 0 { max } else { rx };
        self.tx_fill_level = usize::from(self.tfc.read() & field);
    }

    fn max_fifo_size(&self) -> usize {
        if self.caps.duplex_scaled_fifo && self.is_full_duplex() {
            self.caps.fifo_size / 2
        } else {
            self.caps.fifo_size
        }
    }

    fn usable_rx_fifo_size(&self) -> usize {
        if self.fcnf.is_set(FCNF_RFST) {
            self.rx_fill_level
        } else {
            self.max_fifo_size()
        }
    }

    fn pending_tx_symbols(&self) -> usize {
        if self.fifo_enabled() {
            self.tx_fifo.len()
        } else {
            usize::from(!self.mod2.is_set(MOD2_TBEMP))
        }
    }

    fn is_enabled(&self) -> bool {
        self.en.is_set(EN_SIOE)
    }

    fn fifo_enabled(&self) -> bool {
        self.fcnf.is_set(FCNF_CNFG)
    }

    fn is_tx_enabled(&self) -> bool {
        self.mod1.is_set(MOD1_TXE)
    }

    fn is_rx_enabled(&self) -> bool {
        self.mod0.is_set(MOD0_RXE)
    }

    fn duplex_allows_rx(&self) -> bool {
        self.mod1.is_set(MOD1_FDPX_RX)
    }

    fn duplex_allows_tx(&self) -> bool {
        self.mod1.is_set(MOD1_FDPX_TX)
    }

    fn is_full_duplex(&self) -> bool {
        self.mod1.read() & MOD1_FDPX == MOD1_FDPX
    }
}

impl ClockedUnit for SerialInterface {
    /// Moves one transmitted symbol to the output slot per tick. The
    /// channel stays registered while transmit-enable holds and more data
    /// may follow, and deregisters on underrun or auto-disable.
    fn on_clock_tick(&mut self, irq: &mut dyn InterruptController) -> TickOutcome {
        match self.take_transmitted_value(irq) {
            Some(value) => {
                self.output.push_back(value);
                if self.is_tx_enabled() {
                    TickOutcome::Continue
                } else {
                    TickOutcome::Done
                }
            }
            None => TickOutcome::Done,
        }
    }
}
