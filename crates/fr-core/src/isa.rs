//! Descriptor layers for the FR-family 16-bit instruction set.
//!
//! Each layer is an ordered list of masked patterns. The canonical layer
//! carries the official mnemonics from the architecture manual; the
//! alternate layers re-present selected encodings under friendlier names
//! (stack pushes/pops, biased shifts, accumulator moves) without changing
//! execution semantics. Layer order is what resolves overlaps: the opcode
//! table applies [`CATCH_ALL`] first, then [`BASE`], then whichever
//! alternates the build options select.

use crate::descriptor::{DescriptorSpec, FlowClass, InstructionFormat};

use InstructionFormat::{A, B, C, D, E, F, W, Z};

const fn row(
    encoding: u16,
    mask: u16,
    format: InstructionFormat,
    mnemonic: &'static str,
    display: &'static str,
    action: &'static str,
) -> DescriptorSpec {
    DescriptorSpec {
        encoding,
        mask,
        format,
        extra_words_x: 0,
        extra_words_y: 0,
        mnemonic,
        display,
        action,
        flow: FlowClass::None,
        is_conditional: false,
        has_delay_slot: false,
    }
}

const fn wide(
    encoding: u16,
    mask: u16,
    format: InstructionFormat,
    extra_words_x: u8,
    mnemonic: &'static str,
    display: &'static str,
    action: &'static str,
) -> DescriptorSpec {
    DescriptorSpec {
        extra_words_x,
        ..row(encoding, mask, format, mnemonic, display, action)
    }
}

// Coprocessor transfers consume one extra word as the y operand.
const fn cop(
    encoding: u16,
    mnemonic: &'static str,
    display: &'static str,
    action: &'static str,
) -> DescriptorSpec {
    DescriptorSpec {
        extra_words_y: 1,
        ..row(encoding, 0xFFF0, E, mnemonic, display, action)
    }
}

/// Control-transfer row. The delay-slot flag follows from the action
/// sequence (`_` prefix) and conditionality from the flow class; the layer
/// data holds no combination where either rule misfires.
const fn flow_row(
    encoding: u16,
    mask: u16,
    format: InstructionFormat,
    mnemonic: &'static str,
    display: &'static str,
    action: &'static str,
    flow: FlowClass,
) -> DescriptorSpec {
    let bytes = action.as_bytes();
    DescriptorSpec {
        flow,
        is_conditional: matches!(flow, FlowClass::Branch),
        has_delay_slot: !bytes.is_empty() && bytes[0] == b'_',
        ..row(encoding, mask, format, mnemonic, display, action)
    }
}

/// Safety-net layer, applied before everything else.
///
/// Mask 0 with encoding 0 claims every slot, so any word no later layer
/// touches decodes to `UNK` instead of leaving a hole in the table.
pub const CATCH_ALL: &[DescriptorSpec] = &[row(0x0000, 0x0000, W, "UNK", "", "")];

/// Canonical instruction layer, official mnemonics.
pub const BASE: &[DescriptorSpec] = &[
    row(0x0000, 0xFF00, A, "LD", "@(A&j),i", "iw"),
    row(0x0100, 0xFF00, A, "LDUH", "@(A&j),i", "iw"),
    row(0x0200, 0xFF00, A, "LDUB", "@(A&j),i", "iw"),
    row(0x0300, 0xFF00, C, "LD", "@(S&4u),i", "iw"),
    row(0x0400, 0xFF00, A, "LD", "@j,i;Ju", "iw"),
    row(0x0500, 0xFF00, A, "LDUH", "@j,i;Ju", "iw"),
    row(0x0600, 0xFF00, A, "LDUB", "@j,i;Ju", "iw"),
    row(0x0700, 0xFFF0, E, "LD", "@S+,i", "iwSw"),
    row(0x0710, 0xFFF0, E, "MOV", "i,P", "Pw"),
    row(0x0780, 0xFFFF, E, "LD", "@S+,g", "Sw"),
    row(0x0781, 0xFFFF, E, "LD", "@S+,g", "Sw"),
    row(0x0782, 0xFFFF, E, "LD", "@S+,g", "Sw"),
    row(0x0783, 0xFFFF, E, "LD", "@S+,g", "Sw"),
    row(0x0784, 0xFFFF, E, "LD", "@S+,g", "Sw"),
    row(0x0785, 0xFFFF, E, "LD", "@S+,g", "Sw"),
    row(0x0790, 0xFFFF, Z, "LD", "@S+,P", "Sw"),
    row(0x0800, 0xFF00, D, "DMOV", "@4u,A", "Aw"),
    row(0x0900, 0xFF00, D, "DMOVH", "@2u,A", "Aw"),
    row(0x0A00, 0xFF00, D, "DMOVB", "@u,A", "Aw"),
    row(0x0B00, 0xFF00, D, "DMOV", "@4u,@-S", "Sw"),
    row(0x0C00, 0xFF00, D, "DMOV", "@4u,@A+", "Aw"),
    row(0x0D00, 0xFF00, D, "DMOVH", "@2u,@A+", "Aw"),
    row(0x0E00, 0xFF00, D, "DMOVB", "@u,@A+", "Aw"),
    row(0x0F00, 0xFF00, D, "ENTER", "#4u", "SwFw"),
    row(0x1000, 0xFF00, A, "ST", "i,@(A&j)", ""),
    row(0x1100, 0xFF00, A, "STH", "i,@(A&j)", ""),
    row(0x1200, 0xFF00, A, "STB", "i,@(A&j)", ""),
    row(0x1300, 0xFF00, C, "ST", "i,@(S&4u)", ""),
    row(0x1400, 0xFF00, A, "ST", "i,@j;Ju", ""),
    row(0x1500, 0xFF00, A, "STH", "i,@j;Ju", ""),
    row(0x1600, 0xFF00, A, "STB", "i,@j;Ju", ""),
    row(0x1700, 0xFFF0, E, "ST", "i,@-S", "Sw"),
    row(0x1710, 0xFFF0, E, "MOV", "P,i", "iw"),
    row(0x1780, 0xFFFF, E, "ST", "g,@-S", "Sw"),
    row(0x1781, 0xFFFF, E, "ST", "g,@-S", "Sw"),
    row(0x1782, 0xFFFF, E, "ST", "g,@-S", "Sw"),
    row(0x1783, 0xFFFF, E, "ST", "g,@-S", "Sw"),
    row(0x1784, 0xFFFF, E, "ST", "g,@-S", "Sw"),
    row(0x1785, 0xFFFF, E, "ST", "g,@-S", "Sw"),
    row(0x1790, 0xFFFF, Z, "ST", "P,@-S", "Sw"),
    row(0x1800, 0xFF00, D, "DMOV", "A,@4u", ""),
    row(0x1900, 0xFF00, D, "DMOVH", "A,@2u", ""),
    row(0x1A00, 0xFF00, D, "DMOVB", "A,@u", ""),
    row(0x1B00, 0xFF00, D, "DMOV", "@S+,@4u", "Sw"),
    row(0x1C00, 0xFF00, D, "DMOV", "@A+,@4u", "Aw"),
    row(0x1D00, 0xFF00, D, "DMOVH", "@A+,@2u", "Aw"),
    row(0x1E00, 0xFF00, D, "DMOVB", "@A+,@u", "Aw"),
    flow_row(0x1F00, 0xFF00, D, "INT", "#u", "(", FlowClass::Interrupt),
    row(0x2000, 0xF000, B, "LD", "@(F&4s),i", "iw"),
    row(0x3000, 0xF000, B, "ST", "i,@(F&4s)", ""),
    row(0x4000, 0xF000, B, "LDUH", "@(F&2s),i", "iw"),
    row(0x5000, 0xF000, B, "STH", "i,@(F&2s)", ""),
    row(0x6000, 0xF000, B, "LDUB", "@(F&s),i", "iw"),
    row(0x7000, 0xF000, B, "STB", "i,@(F&s)", ""),
    row(0x8000, 0xFF00, C, "BANDL", "#u,@i;Iu", ""),
    row(0x8100, 0xFF00, C, "BANDH", "#u,@i;Iu", ""),
    row(0x8200, 0xFF00, A, "AND", "j,i", "iw"),
    row(0x8300, 0xFF00, D, "ANDCCR", "#u", ""),
    row(0x8400, 0xFF00, A, "AND", "j,@i;Iu", ""),
    row(0x8500, 0xFF00, A, "ANDH", "j,@i;Iu", ""),
    row(0x8600, 0xFF00, A, "ANDB", "j,@i;Iu", ""),
    row(0x8700, 0xFF00, D, "STILM", "#u", ""),
    row(0x8800, 0xFF00, C, "BTSTL", "#u,@i;Iu", ""),
    row(0x8900, 0xFF00, C, "BTSTH", "#u,@i;Iu", ""),
    row(0x8A00, 0xFF00, A, "XCHB", "@j,i;Ju", "iw"),
    row(0x8B00, 0xFF00, A, "MOV", "j,i", "iw"),
    row(0x8C00, 0xFF00, D, "LDM0", "z", "Sw"),
    row(0x8D00, 0xFF00, D, "LDM1", "y", "Sw"),
    row(0x8E00, 0xFF00, D, "STM0", "xz", "Sw"),
    row(0x8F00, 0xFF00, D, "STM1", "xy", "Sw"),
    row(0x9000, 0xFF00, C, "BORL", "#u,@i;Iu", ""),
    row(0x9100, 0xFF00, C, "BORH", "#u,@i;Iu", ""),
    row(0x9200, 0xFF00, A, "OR", "j,i", "iw"),
    row(0x9300, 0xFF00, D, "ORCCR", "#u", ""),
    row(0x9400, 0xFF00, A, "OR", "j,@i;Iu", ""),
    row(0x9500, 0xFF00, A, "ORH", "j,@i;Iu", ""),
    row(0x9600, 0xFF00, A, "ORB", "j,@i;Iu", ""),
    flow_row(0x9700, 0xFFF0, E, "JMP", "@i;Iu", "!", FlowClass::Jump),
    flow_row(0x9710, 0xFFF0, E, "CALL", "@i;Iu", "(", FlowClass::Call),
    flow_row(0x9720, 0xFFFF, Z, "RET", "", ")", FlowClass::Ret),
    flow_row(0x9730, 0xFFFF, Z, "RETI", "", ")", FlowClass::Ret),
    row(0x9740, 0xFFF0, E, "DIV0S", "i", "iw"),
    row(0x9750, 0xFFF0, E, "DIV0U", "i", "iw"),
    row(0x9760, 0xFFF0, E, "DIV1", "i", "iw"),
    row(0x9770, 0xFFF0, E, "DIV2", "i", "iw"),
    row(0x9780, 0xFFF0, E, "EXTSB", "i", "iw"),
    row(0x9790, 0xFFF0, E, "EXTUB", "i", "iw"),
    row(0x97A0, 0xFFF0, E, "EXTSH", "i", "iw"),
    row(0x97B0, 0xFFF0, E, "EXTUH", "i", "iw"),
    // SRCH0/SRCH1/SRCHC exist on the FR80/FR81 cores only.
    row(0x97C0, 0xFFF0, E, "SRCH0", "i", "iw"),
    row(0x97D0, 0xFFF0, E, "SRCH1", "i", "iw"),
    row(0x97E0, 0xFFF0, E, "SRCHC", "i", "iw"),
    row(0x9800, 0xFF00, C, "BEORL", "#u,@i;Iu", ""),
    row(0x9900, 0xFF00, C, "BEORH", "#u,@i;Iu", ""),
    row(0x9A00, 0xFF00, A, "EOR", "j,i", "iw"),
    wide(0x9B00, 0xFF00, C, 1, "LDI:20", "#u,i", "iv"),
    row(0x9C00, 0xFF00, A, "EOR", "j,@i;Iu", ""),
    row(0x9D00, 0xFF00, A, "EORH", "j,@i;Iu", ""),
    row(0x9E00, 0xFF00, A, "EORB", "j,@i;Iu", ""),
    flow_row(0x9F00, 0xFFF0, E, "JMP:D", "@i;Iu", "_!", FlowClass::Jump),
    flow_row(0x9F10, 0xFFF0, E, "CALL:D", "@i;Iu", "_(", FlowClass::Call),
    flow_row(0x9F20, 0xFFFF, Z, "RET:D", "", "_)", FlowClass::Ret),
    flow_row(0x9F30, 0xFFFF, Z, "INTE", "", "", FlowClass::InterruptEnable),
    row(0x9F60, 0xFFFF, Z, "DIV3", "", ""),
    row(0x9F70, 0xFFFF, Z, "DIV4S", "", ""),
    wide(0x9F80, 0xFFF0, E, 2, "LDI:32", "#u,i", "iv"),
    row(0x9F90, 0xFFFF, Z, "LEAVE", "", ""),
    row(0x9FA0, 0xFFFF, Z, "NOP", "", ""),
    // Coprocessor transfers are absent from the FR80/FR81 cores.
    cop(0x9FC0, "COPOP", "#u,#c,l,k", ""),
    cop(0x9FD0, "COPLD", "#u,#c,j,k", ""),
    cop(0x9FE0, "COPST", "#u,#c,l,i", "iw"),
    cop(0x9FF0, "COPSV", "#u,#c,l,i", "iw"),
    row(0xA000, 0xFF00, C, "ADDN", "#u,i", "iw"),
    row(0xA100, 0xFF00, C, "ADDN2", "#n,i", "iw"),
    row(0xA200, 0xFF00, A, "ADDN", "j,i", "iw"),
    row(0xA300, 0xFF00, D, "ADDSP", "#4s", "Sw"),
    row(0xA400, 0xFF00, C, "ADD", "#u,i", "iw"),
    row(0xA500, 0xFF00, C, "ADD2", "#n,i", "iw"),
    row(0xA600, 0xFF00, A, "ADD", "j,i", "iw"),
    row(0xA700, 0xFF00, A, "ADDC", "j,i", "iw"),
    row(0xA800, 0xFF00, C, "CMP", "#u,i", "iw"),
    row(0xA900, 0xFF00, C, "CMP2", "#n,i", "iw"),
    row(0xAA00, 0xFF00, A, "CMP", "j,i", "iw"),
    row(0xAB00, 0xFF00, A, "MULU", "j,i", "iw"),
    row(0xAC00, 0xFF00, A, "SUB", "j,i", "iw"),
    row(0xAD00, 0xFF00, A, "SUBC", "j,i", "iw"),
    row(0xAE00, 0xFF00, A, "SUBN", "j,i", "iw"),
    row(0xAF00, 0xFF00, A, "MUL", "j,i", "iw"),
    row(0xB000, 0xFF00, C, "LSR", "#d,i", "iw"),
    row(0xB100, 0xFF00, C, "LSR2", "#d,i", "iw"),
    row(0xB200, 0xFF00, A, "LSR", "j,i", "iw"),
    row(0xB300, 0xFFF0, A, "MOV", "i,h", ""),
    row(0xB310, 0xFFF0, A, "MOV", "i,h", ""),
    row(0xB320, 0xFFF0, A, "MOV", "i,h", ""),
    row(0xB330, 0xFFF0, A, "MOV", "i,h", ""),
    row(0xB340, 0xFFF0, A, "MOV", "i,h", ""),
    row(0xB350, 0xFFF0, A, "MOV", "i,h", ""),
    row(0xB400, 0xFF00, C, "LSL", "#d,i", "iw"),
    row(0xB500, 0xFF00, C, "LSL2", "#d,i", "iw"),
    row(0xB600, 0xFF00, A, "LSL", "j,i", "iw"),
    row(0xB700, 0xFFF0, A, "MOV", "h,i", "iw"),
    row(0xB710, 0xFFF0, A, "MOV", "h,i", "iw"),
    row(0xB720, 0xFFF0, A, "MOV", "h,i", "iw"),
    row(0xB730, 0xFFF0, A, "MOV", "h,i", "iw"),
    row(0xB740, 0xFFF0, A, "MOV", "h,i", "iw"),
    row(0xB750, 0xFFF0, A, "MOV", "h,i", "iw"),
    row(0xB800, 0xFF00, C, "ASR", "#d,i", "iw"),
    row(0xB900, 0xFF00, C, "ASR2", "#d,i", "iw"),
    row(0xBA00, 0xFF00, A, "ASR", "j,i", "iw"),
    row(0xBB00, 0xFF00, A, "MULUH", "j,i", "iw"),
    row(0xBC00, 0xFF00, C, "LDRES", "@i+,#u;Iu", ""),
    row(0xBD00, 0xFF00, C, "STRES", "#u,@i+;Iu", ""),
    row(0xBF00, 0xFF00, A, "MULH", "j,i", "iw"),
    row(0xC000, 0xF000, B, "LDI:8", "#u,i", "iv"),
    flow_row(0xD000, 0xF800, F, "CALL", "2ru", "(", FlowClass::Call),
    flow_row(0xD800, 0xF800, F, "CALL:D", "2ru", "_(", FlowClass::Call),
    flow_row(0xE000, 0xFF00, D, "BRA", "2ru", "!", FlowClass::Jump),
    row(0xE100, 0xFF00, D, "BNO", "2ru", "?"),
    flow_row(0xE200, 0xFF00, D, "BEQ", "2ru", "?", FlowClass::Branch),
    flow_row(0xE300, 0xFF00, D, "BNE", "2ru", "?", FlowClass::Branch),
    flow_row(0xE400, 0xFF00, D, "BC", "2ru", "?", FlowClass::Branch),
    flow_row(0xE500, 0xFF00, D, "BNC", "2ru", "?", FlowClass::Branch),
    flow_row(0xE600, 0xFF00, D, "BN", "2ru", "?", FlowClass::Branch),
    flow_row(0xE700, 0xFF00, D, "BP", "2ru", "?", FlowClass::Branch),
    flow_row(0xE800, 0xFF00, D, "BV", "2ru", "?", FlowClass::Branch),
    flow_row(0xE900, 0xFF00, D, "BNV", "2ru", "?", FlowClass::Branch),
    flow_row(0xEA00, 0xFF00, D, "BLT", "2ru", "?", FlowClass::Branch),
    flow_row(0xEB00, 0xFF00, D, "BGE", "2ru", "?", FlowClass::Branch),
    flow_row(0xEC00, 0xFF00, D, "BLE", "2ru", "?", FlowClass::Branch),
    flow_row(0xED00, 0xFF00, D, "BGT", "2ru", "?", FlowClass::Branch),
    flow_row(0xEE00, 0xFF00, D, "BLS", "2ru", "?", FlowClass::Branch),
    flow_row(0xEF00, 0xFF00, D, "BHI", "2ru", "?", FlowClass::Branch),
    flow_row(0xF000, 0xFF00, D, "BRA:D", "2ru", "_!", FlowClass::Jump),
    flow_row(0xF100, 0xFF00, D, "BNO:D", "2ru", "_?", FlowClass::None),
    flow_row(0xF200, 0xFF00, D, "BEQ:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xF300, 0xFF00, D, "BNE:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xF400, 0xFF00, D, "BC:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xF500, 0xFF00, D, "BNC:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xF600, 0xFF00, D, "BN:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xF700, 0xFF00, D, "BP:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xF800, 0xFF00, D, "BV:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xF900, 0xFF00, D, "BNV:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xFA00, 0xFF00, D, "BLT:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xFB00, 0xFF00, D, "BGE:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xFC00, 0xFF00, D, "BLE:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xFD00, 0xFF00, D, "BGT:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xFE00, 0xFF00, D, "BLS:D", "2ru", "_?", FlowClass::Branch),
    flow_row(0xFF00, 0xFF00, D, "BHI:D", "2ru", "_?", FlowClass::Branch),
];

/// Alternate layer renaming every stack-related operation to `PUSH`/`POP`.
pub const ALT_STACK: &[DescriptorSpec] = &[
    row(0x0700, 0xFFF0, E, "POP", "i", ""),
    row(0x0780, 0xFFFF, E, "POP", "g", ""),
    row(0x0781, 0xFFFF, E, "POP", "g", ""),
    row(0x0782, 0xFFFF, E, "POP", "g", ""),
    row(0x0783, 0xFFFF, E, "POP", "g", ""),
    row(0x0784, 0xFFFF, E, "POP", "g", ""),
    row(0x0785, 0xFFFF, E, "POP", "g", ""),
    row(0x0790, 0xFFFF, Z, "POP", "P", ""),
    row(0x0B00, 0xFF00, D, "PUSH", "@4u", ""),
    row(0x1700, 0xFFF0, E, "PUSH", "i", ""),
    row(0x1780, 0xFFFF, E, "PUSH", "g", ""),
    row(0x1781, 0xFFFF, E, "PUSH", "g", ""),
    row(0x1782, 0xFFFF, E, "PUSH", "g", ""),
    row(0x1783, 0xFFFF, E, "PUSH", "g", ""),
    row(0x1784, 0xFFFF, E, "PUSH", "g", ""),
    row(0x1785, 0xFFFF, E, "PUSH", "g", ""),
    row(0x1790, 0xFFFF, Z, "PUSH", "P", ""),
    row(0x1B00, 0xFF00, D, "POP", "@u", ""),
    row(0x8C00, 0xFF00, D, "POP", "z", ""),
    row(0x8D00, 0xFF00, D, "POP", "y", ""),
    row(0x8E00, 0xFF00, D, "PUSH", "xz", ""),
    row(0x8F00, 0xFF00, D, "PUSH", "xy", ""),
];

/// Alternate layer folding the `+16`-biased shift encodings back under the
/// unbiased mnemonics.
pub const ALT_SHIFT: &[DescriptorSpec] = &[
    row(0xB100, 0xFF00, C, "LSR", "#bd,i", "iw"),
    row(0xB500, 0xFF00, C, "LSL", "#bd,i", "iw"),
    row(0xB900, 0xFF00, C, "ASR", "#bd,i", "iw"),
];

/// Alternate layer re-presenting direct-addressing accumulator moves as
/// plain loads and stores.
pub const ALT_DMOV: &[DescriptorSpec] = &[
    row(0x0800, 0xFF00, D, "LD", "@4u,A", ""),
    row(0x0900, 0xFF00, D, "LDUH", "@2u,A", ""),
    row(0x0A00, 0xFF00, D, "LDUB", "@u,A", ""),
    row(0x1800, 0xFF00, D, "ST", "A,@4u", ""),
    row(0x1900, 0xFF00, D, "STUH", "A,@2u", ""),
    row(0x1A00, 0xFF00, D, "STUB", "A,@u", ""),
];

/// Alternate layer re-presenting the dedicated `ILM`/`CCR`/`SP` operations
/// in the shape of the general two-operand forms.
pub const ALT_SPECIAL: &[DescriptorSpec] = &[
    row(0x8300, 0xFF00, D, "AND", "#u,C", "Cw"),
    row(0x8700, 0xFF00, D, "MOV", "#u,M", ""),
    row(0x9300, 0xFF00, D, "OR", "#u,C", "Cw"),
    row(0xA300, 0xFF00, D, "ADD", "#4s,S", ""),
];

/// Pseudo-descriptors for rendering raw data words (`DW`/`DL`/`DR`); never
/// installed in the opcode table, used when a region is known to hold data.
pub const DATA_PSEUDO: &[DescriptorSpec] = &[
    wide(0x0000, 0x0000, W, 0, "DW", "u;a", ""),
    wide(0x0000, 0x0000, W, 1, "DL", "u;a", ""),
    wide(0x0000, 0x0000, W, 1, "DL", "u;a", ""),
    wide(0x0000, 0x0000, W, 1, "DL", "u;T #v", ""),
    wide(0x0000, 0x0000, W, 1, "DR", "q;f", ""),
];

#[cfg(test)]
mod tests {
    use super::{ALT_DMOV, ALT_SHIFT, ALT_SPECIAL, ALT_STACK, BASE, CATCH_ALL, DATA_PSEUDO};
    use crate::descriptor::{FlowClass, InstructionDescriptor};

    #[test]
    fn every_layer_row_parses() {
        for layer in [
            CATCH_ALL,
            BASE,
            ALT_STACK,
            ALT_SHIFT,
            ALT_DMOV,
            ALT_SPECIAL,
            DATA_PSEUDO,
        ] {
            for spec in layer {
                InstructionDescriptor::from_spec(spec)
                    .unwrap_or_else(|e| panic!("row {} failed: {e}", spec.mnemonic));
            }
        }
    }

    #[test]
    fn encodings_have_no_stray_operand_bits() {
        for spec in BASE {
            assert_eq!(
                spec.encoding & spec.mask,
                spec.encoding,
                "{} encoding {:#06X} has bits outside mask {:#06X}",
                spec.mnemonic,
                spec.encoding,
                spec.mask,
            );
        }
    }

    #[test]
    fn delay_slot_variants_are_flagged() {
        for spec in BASE {
            let marked = spec.mnemonic.ends_with(":D");
            assert_eq!(
                spec.has_delay_slot, marked,
                "{} delay-slot flag disagrees with mnemonic",
                spec.mnemonic,
            );
        }
    }

    #[test]
    fn conditional_rows_are_exactly_the_branch_rows() {
        for spec in BASE {
            assert_eq!(
                spec.is_conditional,
                matches!(spec.flow, FlowClass::Branch),
                "{} conditionality disagrees with flow class",
                spec.mnemonic,
            );
        }
    }
}
