//! Peripheral register cells with per-register writable-bit masks.

/// One 8-bit hardware register.
///
/// External writes only land in the writable bits; everything else (status
/// and sticky error flags) is preserved and may only change through the
/// internal `set_bits`/`clear_bits` transitions the owning peripheral
/// performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MaskedRegister {
    value: u8,
    writable: u8,
}

impl MaskedRegister {
    /// New register holding `reset` with the given writable-bit mask.
    #[must_use]
    pub const fn new(reset: u8, writable: u8) -> Self {
        Self {
            value: reset,
            writable,
        }
    }

    /// Current raw value.
    #[must_use]
    pub const fn read(self) -> u8 {
        self.value
    }

    /// External write: writable bits take the new value, the rest keep
    /// their current state.
    pub fn write(&mut self, value: u8) {
        self.value = (self.value & !self.writable) | (value & self.writable);
    }

    /// Internal transition: force the given bits set, ignoring the
    /// writable mask.
    pub fn set_bits(&mut self, bits: u8) {
        self.value |= bits;
    }

    /// Internal transition: force the given bits clear, ignoring the
    /// writable mask.
    pub fn clear_bits(&mut self, bits: u8) {
        self.value &= !bits;
    }

    /// True when any of the given bits is set.
    #[must_use]
    pub const fn is_set(self, bits: u8) -> bool {
        self.value & bits != 0
    }

    /// Writable-bit mask this register was built with.
    #[must_use]
    pub const fn writable_mask(self) -> u8 {
        self.writable
    }
}

#[cfg(test)]
mod tests {
    use super::MaskedRegister;

    #[test]
    fn write_is_confined_to_writable_bits() {
        let mut reg = MaskedRegister::new(0b1000_0000, 0b0001_1111);
        reg.write(0xFF);
        assert_eq!(reg.read(), 0b1001_1111);
        reg.write(0x00);
        assert_eq!(reg.read(), 0b1000_0000);
    }

    #[test]
    fn write_all_ones_reads_back_writable_mask_from_zero() {
        let mut reg = MaskedRegister::new(0, 0b0110_0011);
        reg.write(0xFF);
        assert_eq!(reg.read(), reg.writable_mask());
    }

    #[test]
    fn internal_transitions_ignore_the_mask() {
        let mut reg = MaskedRegister::new(0, 0b0000_0001);
        reg.set_bits(0b1001_0000);
        assert!(reg.is_set(0b1000_0000));
        reg.clear_bits(0b0001_0000);
        assert_eq!(reg.read(), 0b1000_0000);
    }
}
