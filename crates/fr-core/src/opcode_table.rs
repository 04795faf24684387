//! Exhaustive instruction-word lookup table.
//!
//! The table is built once from ordered descriptor layers and is immutable
//! afterwards, so it can be shared freely between emulation contexts. Each
//! masked pattern is expanded into every concrete instruction word it
//! matches; later layers overwrite earlier ones slot by slot, which is how
//! the alternate naming layers replace canonical entries deterministically.

use tracing::debug;

use crate::descriptor::{DescriptorSpec, InstructionDescriptor};
use crate::error::TableBuildError;
use crate::isa;

const SLOT_COUNT: usize = 1 << 16;

/// Selects which alternate naming layers overwrite the canonical layer.
///
/// Every combination yields a fully defined table; the options only change
/// which descriptor a contested slot resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct TableOptions {
    /// Present stack-related loads and stores as `PUSH`/`POP`.
    pub stack_aliases: bool,
    /// Fold the `+16`-biased shift encodings under the unbiased mnemonics.
    pub shift_aliases: bool,
    /// Present direct-addressing accumulator moves as loads and stores.
    pub dmov_aliases: bool,
    /// Present dedicated `ILM`/`CCR`/`SP` operations as two-operand forms.
    pub special_aliases: bool,
}

/// 65,536-entry mapping from instruction word to decode metadata.
///
/// Slots store indices into an owned descriptor pool rather than copies, so
/// overlapping patterns share one resolved descriptor each.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    options: TableOptions,
    descriptors: Vec<InstructionDescriptor>,
    slots: Box<[u16]>,
}

impl OpcodeTable {
    /// Builds the table for one configuration: catch-all first, canonical
    /// layer next, then whichever alternate layers the options select.
    ///
    /// # Errors
    ///
    /// Returns a [`TableBuildError`] when a layer row fails to parse. The
    /// shipped layers cannot fail; the error path exists because rows are
    /// validated here, once, instead of on the decode path.
    pub fn build(options: TableOptions) -> Result<Self, TableBuildError> {
        let mut layers: Vec<&[DescriptorSpec]> = vec![isa::CATCH_ALL, isa::BASE];
        if options.stack_aliases {
            layers.push(isa::ALT_STACK);
        }
        if options.shift_aliases {
            layers.push(isa::ALT_SHIFT);
        }
        if options.dmov_aliases {
            layers.push(isa::ALT_DMOV);
        }
        if options.special_aliases {
            layers.push(isa::ALT_SPECIAL);
        }
        let mut table = Self::from_layers(&layers)?;
        table.options = options;
        Ok(table)
    }

    /// Builds a table from caller-supplied layers, applied strictly in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TableBuildError::MissingCatchAll`] unless the first layer
    /// opens with a mask-0 descriptor (anything else could leave slots
    /// undefined), [`TableBuildError::TooManyDescriptors`] when the layers
    /// hold more rows than slots can index, or a parse error from a bad
    /// spec string.
    pub fn from_layers(layers: &[&[DescriptorSpec]]) -> Result<Self, TableBuildError> {
        match layers.first().and_then(|layer| layer.first()) {
            Some(first) if first.mask == 0 && first.encoding == 0 => {}
            _ => return Err(TableBuildError::MissingCatchAll),
        }

        let mut descriptors = Vec::new();
        let mut slots = vec![0_u16; SLOT_COUNT].into_boxed_slice();
        for layer in layers {
            for spec in *layer {
                let index = u16::try_from(descriptors.len())
                    .map_err(|_| TableBuildError::TooManyDescriptors)?;
                descriptors.push(InstructionDescriptor::from_spec(spec)?);
                expand_pattern(&mut slots, spec.encoding, spec.mask, index);
            }
        }
        debug!(
            layers = layers.len(),
            descriptors = descriptors.len(),
            "opcode table built"
        );
        Ok(Self {
            options: TableOptions::default(),
            descriptors,
            slots,
        })
    }

    /// Resolves one instruction word. Pure array index; never fails, worst
    /// case the catch-all descriptor.
    #[must_use]
    pub fn lookup(&self, word: u16) -> &InstructionDescriptor {
        &self.descriptors[usize::from(self.slots[usize::from(word)])]
    }

    /// Options this table was built with.
    #[must_use]
    pub const fn options(&self) -> TableOptions {
        self.options
    }

    /// Count of distinct descriptors backing the table.
    #[must_use]
    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }
}

/// Writes `index` into every slot `encoding | x` where `x` ranges over the
/// subsets of the mask's zero bits. The `(x - free) & free` step walks those
/// subsets directly, so patterns with non-contiguous operand fields cost
/// exactly `2^popcount(!mask)` writes.
fn expand_pattern(slots: &mut [u16], encoding: u16, mask: u16, index: u16) {
    let free = !mask;
    let mut x: u16 = 0;
    loop {
        slots[usize::from(encoding | x)] = index;
        x = x.wrapping_sub(free) & free;
        if x == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_pattern, OpcodeTable, TableOptions};
    use crate::descriptor::{DescriptorSpec, FlowClass, InstructionFormat};
    use crate::error::TableBuildError;

    fn pattern(encoding: u16, mask: u16, mnemonic: &'static str) -> DescriptorSpec {
        DescriptorSpec {
            encoding,
            mask,
            format: InstructionFormat::W,
            extra_words_x: 0,
            extra_words_y: 0,
            mnemonic,
            display: "",
            action: "",
            flow: FlowClass::None,
            is_conditional: false,
            has_delay_slot: false,
        }
    }

    #[test]
    fn every_word_resolves_after_default_build() {
        let table = OpcodeTable::build(TableOptions::default()).expect("layers are valid");
        for word in 0_u16..=u16::MAX {
            // lookup never panics and never hands back an empty slot
            let _ = table.lookup(word).mnemonic;
        }
    }

    #[test]
    fn uncovered_words_fall_back_to_catch_all() {
        let table = OpcodeTable::build(TableOptions::default()).expect("layers are valid");
        // 0x9FA0 is exact-match NOP; its neighbors stay unknown
        assert_eq!(table.lookup(0x9FA0).mnemonic, "NOP");
        assert_eq!(table.lookup(0x9FA1).mnemonic, "UNK");
        assert_eq!(table.lookup(0x9FBF).mnemonic, "UNK");
    }

    #[test]
    fn masked_pattern_claims_its_full_word_range() {
        let table = OpcodeTable::build(TableOptions::default()).expect("layers are valid");
        for word in 0xC000_u16..=0xCFFF {
            assert_eq!(table.lookup(word).mnemonic, "LDI:8");
        }
    }

    #[test]
    fn alias_layers_overwrite_contested_slots_only() {
        let canonical = OpcodeTable::build(TableOptions::default()).expect("layers are valid");
        let aliased = OpcodeTable::build(TableOptions {
            stack_aliases: true,
            ..TableOptions::default()
        })
        .expect("layers are valid");

        assert_eq!(canonical.lookup(0x0703).mnemonic, "LD");
        assert_eq!(aliased.lookup(0x0703).mnemonic, "POP");
        assert_eq!(aliased.lookup(0x1712).mnemonic, "PUSH");
        // a slot no alias layer claims is untouched
        assert_eq!(aliased.lookup(0x8B42).mnemonic, "MOV");
    }

    #[test]
    fn later_layer_wins_within_and_across_layers() {
        let layers: &[&[DescriptorSpec]] = &[
            &[pattern(0x0000, 0x0000, "FALLBACK")],
            &[
                pattern(0x4000, 0xF000, "WIDE"),
                pattern(0x4200, 0xFF00, "NARROW"),
            ],
            &[pattern(0x4242, 0xFFFF, "EXACT")],
        ];
        let table = OpcodeTable::from_layers(layers).expect("valid layers");
        assert_eq!(table.lookup(0x4100).mnemonic, "WIDE");
        assert_eq!(table.lookup(0x4201).mnemonic, "NARROW");
        assert_eq!(table.lookup(0x4242).mnemonic, "EXACT");
        assert_eq!(table.lookup(0x0123).mnemonic, "FALLBACK");
    }

    #[test]
    fn build_rejects_layers_without_leading_catch_all() {
        let layers: &[&[DescriptorSpec]] = &[&[pattern(0x4000, 0xF000, "WIDE")]];
        assert_eq!(
            OpcodeTable::from_layers(layers).expect_err("no catch-all"),
            TableBuildError::MissingCatchAll,
        );
        assert_eq!(
            OpcodeTable::from_layers(&[]).expect_err("no layers"),
            TableBuildError::MissingCatchAll,
        );
    }

    #[test]
    fn expansion_handles_non_contiguous_free_bits() {
        let mut slots = vec![u16::MAX; 1 << 16].into_boxed_slice();
        // operand bits split across 0x0F00 and 0x000F
        expand_pattern(&mut slots, 0x5000, 0xF0F0, 1);
        let mut claimed = 0_usize;
        for (word, &slot) in slots.iter().enumerate() {
            let word = u16::try_from(word).expect("slot index fits");
            let matches = word & 0xF0F0 == 0x5000;
            assert_eq!(slot == 1, matches, "word {word:#06X}");
            claimed += usize::from(matches);
        }
        assert_eq!(claimed, 256);
    }

    #[test]
    fn rebuild_with_same_options_is_deterministic() {
        let options = TableOptions {
            stack_aliases: true,
            shift_aliases: true,
            dmov_aliases: false,
            special_aliases: true,
        };
        let first = OpcodeTable::build(options).expect("layers are valid");
        let second = OpcodeTable::build(options).expect("layers are valid");
        assert_eq!(first.options(), second.options());
        for word in 0_u16..=u16::MAX {
            assert_eq!(first.lookup(word), second.lookup(word));
        }
    }
}
