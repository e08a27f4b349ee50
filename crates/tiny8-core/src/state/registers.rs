/// `FLAGS` bit for zero/equal result.
pub const FLAGS_ZERO: u8 = 1 << 0;

/// Register file for the tiny8 core.
///
/// Only bit 0 of `FLAGS` has architectural meaning. Bits 1..=7 are stored as
/// written and only observable through `ldf`/`stf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Registers {
    pc: u8,
    acc: u8,
    flags: u8,
}

impl Registers {
    /// Reads the `PC` register.
    #[must_use]
    pub const fn pc(&self) -> u8 {
        self.pc
    }

    /// Writes the `PC` register.
    pub const fn set_pc(&mut self, value: u8) {
        self.pc = value;
    }

    /// Reads the accumulator.
    #[must_use]
    pub const fn acc(&self) -> u8 {
        self.acc
    }

    /// Writes the accumulator.
    pub const fn set_acc(&mut self, value: u8) {
        self.acc = value;
    }

    /// Reads the full `FLAGS` byte.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Writes the full `FLAGS` byte, including the opaque upper bits.
    pub const fn set_flags(&mut self, value: u8) {
        self.flags = value;
    }

    /// Returns `true` when the zero flag is set.
    #[must_use]
    pub const fn zero_flag(&self) -> bool {
        (self.flags & FLAGS_ZERO) != 0
    }

    /// Overwrites bit 0 of `FLAGS`, leaving bits 1..=7 untouched.
    pub const fn set_zero_flag(&mut self, enabled: bool) {
        if enabled {
            self.flags |= FLAGS_ZERO;
        } else {
            self.flags &= !FLAGS_ZERO;
        }
    }

    /// Zeroes every register.
    pub const fn clear(&mut self) {
        self.pc = 0;
        self.acc = 0;
        self.flags = 0;
    }
}
