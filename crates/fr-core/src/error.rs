use thiserror::Error;

/// Configuration errors reported immediately to the caller.
///
/// These indicate a bug in the emulated firmware or in the emulator's own
/// setup, never a recoverable runtime condition. Hardware-modeled errors
/// (overrun, underrun, framing) are sticky status bits instead, observable
/// only through subsequent register reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// Write attempted on a register the hardware defines as read-only.
    #[error("register {0} is read-only")]
    ReadOnlyRegister(&'static str),
    /// Fine baud-rate adjustment enabled with `K = 0`, which the hardware
    /// leaves undefined.
    #[error("baud fine adjust requires K in 1..=15, got 0")]
    FineAdjustZeroK,
    /// Fine baud-rate adjustment enabled with a divide ratio of 1 or 16,
    /// which the hardware leaves undefined.
    #[error("baud fine adjust is undefined with divide ratio N={n}")]
    FineAdjustDivideRatio {
        /// Decoded divide ratio that triggered the rejection.
        n: u8,
    },
}

/// Errors raised while expanding descriptor layers into an opcode table.
///
/// Layer data carries compact spec strings for operand rendering and
/// execution semantics; both are parsed exactly once at build time, so a
/// bad code character surfaces here and never on the decode hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TableBuildError {
    /// A display spec string contained a character with no assigned meaning.
    #[error("unknown display code {code:?} in descriptor {mnemonic}")]
    UnknownDisplayCode {
        /// Mnemonic of the descriptor whose spec failed to parse.
        mnemonic: &'static str,
        /// Offending code character.
        code: char,
    },
    /// An action spec string contained a character with no assigned meaning.
    #[error("unknown action code {code:?} in descriptor {mnemonic}")]
    UnknownActionCode {
        /// Mnemonic of the descriptor whose spec failed to parse.
        mnemonic: &'static str,
        /// Offending code character.
        code: char,
    },
    /// The first layer did not open with a mask-0 catch-all descriptor, so
    /// some slots could stay undefined.
    #[error("first layer must open with a mask-0 catch-all descriptor")]
    MissingCatchAll,
    /// More descriptors than table slots can index.
    #[error("descriptor capacity exceeded")]
    TooManyDescriptors,
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, TableBuildError};

    #[test]
    fn config_errors_render_stable_messages() {
        assert_eq!(
            ConfigError::ReadOnlyRegister("tst").to_string(),
            "register tst is read-only"
        );
        assert_eq!(
            ConfigError::FineAdjustDivideRatio { n: 16 }.to_string(),
            "baud fine adjust is undefined with divide ratio N=16"
        );
    }

    #[test]
    fn build_errors_carry_offending_code() {
        let err = TableBuildError::UnknownDisplayCode {
            mnemonic: "LD",
            code: '%',
        };
        assert!(err.to_string().contains('%'));
        assert!(err.to_string().contains("LD"));
    }
}
