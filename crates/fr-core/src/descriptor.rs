//! Immutable decode metadata for one instruction variant.
//!
//! Layer data (see [`crate::isa`]) carries the compact spec strings of the
//! original instruction set documentation. Both mini-languages are parsed
//! exactly once while the opcode table is built, producing typed
//! [`DisplayOp`] / [`ActionOp`] sequences so the decode hot path never
//! interprets strings.

use crate::error::TableBuildError;

/// Instruction word layout kinds.
///
/// The layout determines how the bits left variable by the mask split into
/// operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum InstructionFormat {
    /// `[   op          |  Rj   |  Ri   ]`
    A,
    /// `[   op  |       x       |  Ri   ]`
    B,
    /// `[   op          |   x   |  Ri   ]`
    C,
    /// `[   op          |       x       ]`
    D,
    /// `[   op                  |  Ri   ]`
    E,
    /// `[   op    |     offset / 2      ]`
    F,
    /// `[   op                          ]`
    Z,
    /// `[               x               ]` (raw data word)
    W,
}

/// Control-flow classification of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FlowClass {
    /// Sequential execution.
    None,
    /// Unconditional jump.
    Jump,
    /// Subroutine call.
    Call,
    /// Subroutine or interrupt return.
    Ret,
    /// Conditional branch.
    Branch,
    /// Software interrupt entry.
    Interrupt,
    /// Interrupt-for-emulation entry (`INTE`).
    InterruptEnable,
}

/// Dedicated (non-general-purpose) registers named by spec strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DedicatedRegister {
    /// Accumulator `AC`.
    Ac,
    /// Condition code register `CCR`.
    Ccr,
    /// Frame pointer `FP`.
    Fp,
    /// Interrupt level mask `ILM`.
    Ilm,
    /// Program status `PS`.
    Ps,
    /// Stack pointer `SP`.
    Sp,
}

/// One operand-rendering operation decoded from a display spec string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayOp {
    /// Constant operand is an address of 16-bit data; multiply by 2.
    Scale2,
    /// Constant operand is an address of 32-bit data; multiply by 4.
    Scale4,
    /// Constant operand is a relative address.
    Relative,
    /// Operand value is taken from `Ri` when that register is known.
    LoadFromRi,
    /// Operand value is taken from `Rj` when that register is known.
    LoadFromRj,
    /// Shift amount carries the `+16` bias of the second shift group.
    Shift2Bias,
    /// Register bitmap operand is stored most-significant-first.
    BitmapReversed,
    /// Register bitmap operand names `R8..R15` instead of `R0..R7`.
    BitmapHighBank,
    /// Punctuation or sigil copied verbatim into the rendering.
    Literal(char),
    /// Render the constant operand as signed hex.
    SignedHex,
    /// Render the constant operand as unsigned hex.
    UnsignedHex,
    /// Render the constant operand as negated hex.
    NegativeHex,
    /// Render the constant operand as decimal.
    Decimal,
    /// Render the constant operand as ASCII characters.
    Ascii,
    /// Render the constant operand as a float (high half / low half).
    Float,
    /// Render the constant operand as a ratio of its halves.
    Ratio,
    /// Render the constant operand as a pair of hex halves.
    HexPair,
    /// Render the constant operand as a register-ID bitmap.
    RegisterBitmap,
    /// Render a dedicated register name.
    Dedicated(DedicatedRegister),
    /// Render the general register selected by the `i` field.
    RegisterI,
    /// Render the general register selected by the `j` field.
    RegisterJ,
    /// Render the dedicated register selected by the `i` field.
    DedicatedI,
    /// Render the dedicated register selected by the `j` field.
    DedicatedJ,
    /// Render the coprocessor register selected by the `i` field.
    CoprocessorI,
    /// Render the coprocessor register selected by the `j` field.
    CoprocessorJ,
    /// Render the current address as an interrupt vector id.
    VectorId,
    /// Render the coprocessor operation number.
    CoprocessorOp,
}

/// One execution-semantics operation decoded from an action spec string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionOp {
    /// Transfers control unconditionally.
    Jump,
    /// Transfers control when the branch condition holds.
    Branch,
    /// Pushes a return address and transfers control.
    Call,
    /// Pops a return address and transfers control.
    Ret,
    /// The following transfer executes one more instruction first.
    DelaySlot,
    /// Selects a dedicated register as the current tracking target.
    Select(DedicatedRegister),
    /// Selects `Ri` as the current tracking target.
    SelectRi,
    /// Selects `Rj` as the current tracking target.
    SelectRj,
    /// Marks the current tracking target as holding an unknown value.
    MarkInvalid,
    /// Marks the current tracking target as holding the decoded value.
    MarkValid,
    /// Marks the current tracking target as architecturally undefined.
    MarkUndefined,
}

/// Compact static definition of one instruction pattern inside a layer.
///
/// Rows keep the spec-string form of the original data set; they are only
/// ever read through [`InstructionDescriptor::from_spec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorSpec {
    /// Instruction word value with all variable fields zero.
    pub encoding: u16,
    /// Fixed-bit mask; zero bits are operand fields.
    pub mask: u16,
    /// Operand field layout.
    pub format: InstructionFormat,
    /// Additional 16-bit words consumed as the `x` operand.
    pub extra_words_x: u8,
    /// Additional 16-bit words consumed as the `y` operand.
    pub extra_words_y: u8,
    /// Symbolic name.
    pub mnemonic: &'static str,
    /// Operand-rendering spec string.
    pub display: &'static str,
    /// Execution-semantics spec string.
    pub action: &'static str,
    /// Control-flow classification.
    pub flow: FlowClass,
    /// True when the transfer depends on condition codes.
    pub is_conditional: bool,
    /// True when the instruction provides a delay slot.
    pub has_delay_slot: bool,
}

/// Fully resolved decode metadata for one instruction variant.
///
/// Immutable once constructed; the opcode table hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDescriptor {
    /// Instruction word value with all variable fields zero.
    pub encoding: u16,
    /// Fixed-bit mask; zero bits are operand fields.
    pub mask: u16,
    /// Operand field layout.
    pub format: InstructionFormat,
    /// Additional 16-bit words consumed as the `x` operand.
    pub extra_words_x: u8,
    /// Additional 16-bit words consumed as the `y` operand.
    pub extra_words_y: u8,
    /// Symbolic name.
    pub mnemonic: &'static str,
    /// Operand-rendering sequence, decided at table construction.
    pub display: Vec<DisplayOp>,
    /// Execution-semantics sequence, decided at table construction.
    pub action: Vec<ActionOp>,
    /// Control-flow classification.
    pub flow: FlowClass,
    /// True when the transfer depends on condition codes.
    pub is_conditional: bool,
    /// True when the instruction provides a delay slot.
    pub has_delay_slot: bool,
}

impl InstructionDescriptor {
    /// Resolves a static layer row into a descriptor, parsing both spec
    /// strings.
    ///
    /// # Errors
    ///
    /// Returns a [`TableBuildError`] when either spec string contains a
    /// character with no assigned meaning.
    pub fn from_spec(spec: &DescriptorSpec) -> Result<Self, TableBuildError> {
        Ok(Self {
            encoding: spec.encoding,
            mask: spec.mask,
            format: spec.format,
            extra_words_x: spec.extra_words_x,
            extra_words_y: spec.extra_words_y,
            mnemonic: spec.mnemonic,
            display: parse_display(spec.mnemonic, spec.display)?,
            action: parse_action(spec.mnemonic, spec.action)?,
            flow: spec.flow,
            is_conditional: spec.is_conditional,
            has_delay_slot: spec.has_delay_slot,
        })
    }

    /// Total count of 16-bit words consumed beyond the instruction word.
    #[must_use]
    pub const fn extra_word_count(&self) -> u8 {
        self.extra_words_x + self.extra_words_y
    }
}

/// Parses an operand-rendering spec string into typed operations.
///
/// # Errors
///
/// Returns [`TableBuildError::UnknownDisplayCode`] on any unassigned code
/// character.
pub fn parse_display(
    mnemonic: &'static str,
    spec: &str,
) -> Result<Vec<DisplayOp>, TableBuildError> {
    spec.chars()
        .map(|code| match code {
            '2' => Ok(DisplayOp::Scale2),
            '4' => Ok(DisplayOp::Scale4),
            'r' => Ok(DisplayOp::Relative),
            'I' => Ok(DisplayOp::LoadFromRi),
            'J' => Ok(DisplayOp::LoadFromRj),
            'b' => Ok(DisplayOp::Shift2Bias),
            'x' => Ok(DisplayOp::BitmapReversed),
            'y' => Ok(DisplayOp::BitmapHighBank),
            '#' | '(' | ')' | '+' | ',' | '-' | ';' | '@' | ' ' | 'T' => {
                Ok(DisplayOp::Literal(code))
            }
            // Historical alias for a comma separator.
            '&' => Ok(DisplayOp::Literal(',')),
            's' => Ok(DisplayOp::SignedHex),
            'u' => Ok(DisplayOp::UnsignedHex),
            'n' => Ok(DisplayOp::NegativeHex),
            'd' => Ok(DisplayOp::Decimal),
            'a' => Ok(DisplayOp::Ascii),
            'f' => Ok(DisplayOp::Float),
            'q' => Ok(DisplayOp::Ratio),
            'p' => Ok(DisplayOp::HexPair),
            'z' => Ok(DisplayOp::RegisterBitmap),
            'A' => Ok(DisplayOp::Dedicated(DedicatedRegister::Ac)),
            'C' => Ok(DisplayOp::Dedicated(DedicatedRegister::Ccr)),
            'F' => Ok(DisplayOp::Dedicated(DedicatedRegister::Fp)),
            'M' => Ok(DisplayOp::Dedicated(DedicatedRegister::Ilm)),
            'P' => Ok(DisplayOp::Dedicated(DedicatedRegister::Ps)),
            'S' => Ok(DisplayOp::Dedicated(DedicatedRegister::Sp)),
            'i' => Ok(DisplayOp::RegisterI),
            'j' => Ok(DisplayOp::RegisterJ),
            'g' => Ok(DisplayOp::DedicatedI),
            'h' => Ok(DisplayOp::DedicatedJ),
            'k' => Ok(DisplayOp::CoprocessorI),
            'l' => Ok(DisplayOp::CoprocessorJ),
            'v' => Ok(DisplayOp::VectorId),
            'c' => Ok(DisplayOp::CoprocessorOp),
            _ => Err(TableBuildError::UnknownDisplayCode { mnemonic, code }),
        })
        .collect()
}

/// Parses an execution-semantics spec string into typed operations.
///
/// # Errors
///
/// Returns [`TableBuildError::UnknownActionCode`] on any unassigned code
/// character.
pub fn parse_action(mnemonic: &'static str, spec: &str) -> Result<Vec<ActionOp>, TableBuildError> {
    spec.chars()
        .map(|code| match code {
            '!' => Ok(ActionOp::Jump),
            '?' => Ok(ActionOp::Branch),
            '(' => Ok(ActionOp::Call),
            ')' => Ok(ActionOp::Ret),
            '_' => Ok(ActionOp::DelaySlot),
            'A' => Ok(ActionOp::Select(DedicatedRegister::Ac)),
            'C' => Ok(ActionOp::Select(DedicatedRegister::Ccr)),
            'F' => Ok(ActionOp::Select(DedicatedRegister::Fp)),
            'P' => Ok(ActionOp::Select(DedicatedRegister::Ps)),
            'S' => Ok(ActionOp::Select(DedicatedRegister::Sp)),
            'i' => Ok(ActionOp::SelectRi),
            'j' => Ok(ActionOp::SelectRj),
            'w' => Ok(ActionOp::MarkInvalid),
            'v' => Ok(ActionOp::MarkValid),
            'x' => Ok(ActionOp::MarkUndefined),
            _ => Err(TableBuildError::UnknownActionCode { mnemonic, code }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        parse_action, parse_display, ActionOp, DedicatedRegister, DescriptorSpec, DisplayOp,
        FlowClass, InstructionDescriptor, InstructionFormat,
    };
    use crate::error::TableBuildError;

    #[test]
    fn display_spec_parses_to_typed_sequence() {
        let ops = parse_display("LD", "@(A&j),i").expect("valid spec");
        assert_eq!(
            ops,
            vec![
                DisplayOp::Literal('@'),
                DisplayOp::Literal('('),
                DisplayOp::Dedicated(DedicatedRegister::Ac),
                DisplayOp::Literal(','),
                DisplayOp::RegisterJ,
                DisplayOp::Literal(')'),
                DisplayOp::Literal(','),
                DisplayOp::RegisterI,
            ]
        );
    }

    #[test]
    fn action_spec_parses_to_typed_sequence() {
        let ops = parse_action("LD", "iwSw").expect("valid spec");
        assert_eq!(
            ops,
            vec![
                ActionOp::SelectRi,
                ActionOp::MarkInvalid,
                ActionOp::Select(DedicatedRegister::Sp),
                ActionOp::MarkInvalid,
            ]
        );
    }

    #[test]
    fn delay_slot_call_action_parses() {
        let ops = parse_action("CALL:D", "_(").expect("valid spec");
        assert_eq!(ops, vec![ActionOp::DelaySlot, ActionOp::Call]);
    }

    #[test]
    fn unknown_display_code_is_rejected_with_context() {
        let err = parse_display("BOGUS", "u%").expect_err("invalid spec");
        assert_eq!(
            err,
            TableBuildError::UnknownDisplayCode {
                mnemonic: "BOGUS",
                code: '%',
            }
        );
    }

    #[test]
    fn unknown_action_code_is_rejected_with_context() {
        let err = parse_action("BOGUS", "M").expect_err("invalid spec");
        assert_eq!(
            err,
            TableBuildError::UnknownActionCode {
                mnemonic: "BOGUS",
                code: 'M',
            }
        );
    }

    #[test]
    fn descriptor_resolves_from_spec_row() {
        let spec = DescriptorSpec {
            encoding: 0x9F80,
            mask: 0xFFF0,
            format: InstructionFormat::E,
            extra_words_x: 2,
            extra_words_y: 0,
            mnemonic: "LDI:32",
            display: "#u,i",
            action: "iv",
            flow: FlowClass::None,
            is_conditional: false,
            has_delay_slot: false,
        };
        let descriptor = InstructionDescriptor::from_spec(&spec).expect("valid row");
        assert_eq!(descriptor.mnemonic, "LDI:32");
        assert_eq!(descriptor.extra_word_count(), 2);
        assert_eq!(
            descriptor.action,
            vec![ActionOp::SelectRi, ActionOp::MarkValid]
        );
    }
}
