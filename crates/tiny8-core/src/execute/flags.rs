//! FLAGS update behaviors for different instruction classes.

use crate::Registers;

/// Describes how FLAGS should be updated after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagsUpdate {
    /// No change to FLAGS.
    #[default]
    None,
    /// Replace the whole FLAGS byte (`stf`).
    Set(u8),
    /// Overwrite bit 0 only.
    Zero(bool),
}

impl FlagsUpdate {
    /// Applies this update to a register file.
    pub const fn apply(self, regs: &mut Registers) {
        match self {
            Self::None => {}
            Self::Set(value) => regs.set_flags(value),
            Self::Zero(zero) => regs.set_zero_flag(zero),
        }
    }
}
