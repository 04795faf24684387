//! Decode conformance: total coverage, layer overrides, determinism.

#![allow(clippy::pedantic, clippy::nursery)]

use std::sync::OnceLock;

use fr_core::{
    DescriptorSpec, FlowClass, InstructionFormat, OpcodeTable, TableBuildError, TableOptions,
};
use proptest::prelude::*;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;

static TABLE: OnceLock<OpcodeTable> = OnceLock::new();

fn canonical_table() -> &'static OpcodeTable {
    TABLE.get_or_init(|| OpcodeTable::build(TableOptions::default()).expect("layers are valid"))
}

const fn pattern(encoding: u16, mask: u16, mnemonic: &'static str) -> DescriptorSpec {
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
fn lookup_is_total_over_all_instruction_words() {
    let table = canonical_table();
    for word in 0_u16..=u16::MAX {
        let descriptor = table.lookup(word);
        assert!(!descriptor.mnemonic.is_empty());
        assert_eq!(
            word & descriptor.mask,
            descriptor.encoding,
            "word {word:#06X} resolved to a non-matching pattern {}",
            descriptor.mnemonic,
        );
    }
}

#[test]
fn exact_mask_claims_exactly_one_slot() {
    let table = canonical_table();
    let claimed = (0_u16..=u16::MAX)
        .filter(|&word| table.lookup(word).mnemonic == "RET")
        .count();
    assert_eq!(claimed, 1);
    assert_eq!(table.lookup(0x9720).mnemonic, "RET");
}

#[test]
fn later_layer_overrides_only_the_slots_it_claims() {
    // the second layer's narrow pattern punches a hole in the wide one
    let layers: &[&[DescriptorSpec]] = &[
        &[pattern(0x0000, 0x0000, "FALLBACK")],
        &[pattern(0x6000, 0xF000, "WIDE")],
        &[pattern(0x6300, 0xFF00, "NARROW")],
    ];
    let table = OpcodeTable::from_layers(layers).expect("valid layers");
    for word in 0x6000_u16..=0x6FFF {
        let expected = if word & 0xFF00 == 0x6300 {
            "NARROW"
        } else {
            "WIDE"
        };
        assert_eq!(table.lookup(word).mnemonic, expected, "word {word:#06X}");
    }
}

#[test]
fn identical_configuration_builds_identical_tables() {
    let options = TableOptions {
        stack_aliases: true,
        shift_aliases: false,
        dmov_aliases: true,
        special_aliases: false,
    };
    let first = OpcodeTable::build(options).expect("layers are valid");
    let second = OpcodeTable::build(options).expect("layers are valid");
    for word in 0_u16..=u16::MAX {
        assert_eq!(first.lookup(word), second.lookup(word), "word {word:#06X}");
    }
}

#[test]
fn build_without_catch_all_is_rejected() {
    let layers: &[&[DescriptorSpec]] = &[&[pattern(0x6000, 0xF000, "WIDE")]];
    assert_eq!(
        OpcodeTable::from_layers(layers).expect_err("missing catch-all"),
        TableBuildError::MissingCatchAll,
    );
}

#[rstest]
#[case::stack_pop(
    TableOptions { stack_aliases: true, ..TableOptions::default() }, 0x0703, "LD", "POP"
)]
#[case::stack_push(
    TableOptions { stack_aliases: true, ..TableOptions::default() }, 0x8E42, "STM0", "PUSH"
)]
#[case::shift(
    TableOptions { shift_aliases: true, ..TableOptions::default() }, 0xB1A5, "LSR2", "LSR"
)]
#[case::dmov(
    TableOptions { dmov_aliases: true, ..TableOptions::default() }, 0x0842, "DMOV", "LD"
)]
#[case::special_ccr(
    TableOptions { special_aliases: true, ..TableOptions::default() }, 0x8344, "ANDCCR", "AND"
)]
#[case::special_sp(
    TableOptions { special_aliases: true, ..TableOptions::default() }, 0xA377, "ADDSP", "ADD"
)]
fn alias_layers_rename_without_moving_boundaries(
    #[case] options: TableOptions,
    #[case] word: u16,
    #[case] canonical: &str,
    #[case] aliased: &str,
) {
    assert_eq!(canonical_table().lookup(word).mnemonic, canonical);
    let table = OpcodeTable::build(options).expect("layers are valid");
    assert_eq!(table.lookup(word).mnemonic, aliased);
    // a word outside every alias layer keeps its canonical descriptor
    assert_eq!(table.lookup(0xAA31).mnemonic, "CMP");
}

#[test]
fn control_transfer_metadata_survives_expansion() {
    let table = canonical_table();

    let beq = table.lookup(0xE27F);
    assert_eq!(beq.mnemonic, "BEQ");
    assert_eq!(beq.flow, FlowClass::Branch);
    assert!(beq.is_conditional);
    assert!(!beq.has_delay_slot);

    let call_delayed = table.lookup(0xDBEE);
    assert_eq!(call_delayed.mnemonic, "CALL:D");
    assert_eq!(call_delayed.flow, FlowClass::Call);
    assert!(call_delayed.has_delay_slot);

    let ldi32 = table.lookup(0x9F83);
    assert_eq!(ldi32.mnemonic, "LDI:32");
    assert_eq!(ldi32.extra_word_count(), 2);
}

proptest! {
    #[test]
    fn prop_resolved_descriptor_pattern_matches_the_word(word in any::<u16>()) {
        let descriptor = canonical_table().lookup(word);
        prop_assert_eq!(word & descriptor.mask, descriptor.encoding);
        prop_assert!(descriptor.extra_word_count() <= 2);
    }

    #[test]
    fn prop_alias_builds_stay_total(word in any::<u16>(), stack in any::<bool>(), shift in any::<bool>()) {
        let table = OpcodeTable::build(TableOptions {
            stack_aliases: stack,
            shift_aliases: shift,
            ..TableOptions::default()
        }).expect("layers are valid");
        prop_assert!(!table.lookup(word).mnemonic.is_empty());
    }
}
