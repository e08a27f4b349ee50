//! Architectural CPU state: register file plus the owned machine state.

/// Register file and `FLAGS` bit definitions.
pub mod registers;

pub use registers::{Registers, FLAGS_ZERO};

use crate::Memory;

/// Complete machine state: registers and the 256-byte memory image.
///
/// Owned by the host and passed by reference into the engine, so any number
/// of independent machines may coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CpuState {
    /// Register file.
    pub regs: Registers,
    /// Flat 256-byte memory image.
    pub memory: Memory,
}

impl CpuState {
    /// Creates a machine with zeroed registers and memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes `PC`, `ACC` and `FLAGS`. Memory is left untouched.
    pub const fn reset(&mut self) {
        self.regs.clear();
    }

    /// Executes exactly one instruction.
    pub fn step(&mut self) {
        crate::step_one(self, &mut crate::NullTrace);
    }

    /// Reads one memory cell directly, bypassing the engine.
    #[must_use]
    pub fn read_memory(&self, addr: u8) -> u8 {
        self.memory.read(addr)
    }

    /// Writes one memory cell directly, bypassing the engine.
    pub fn write_memory(&mut self, addr: u8, value: u8) {
        self.memory.write(addr, value);
    }

    /// Current program counter.
    #[must_use]
    pub const fn pc(&self) -> u8 {
        self.regs.pc()
    }

    /// Current accumulator.
    #[must_use]
    pub const fn acc(&self) -> u8 {
        self.regs.acc()
    }

    /// Current `FLAGS` byte.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        self.regs.flags()
    }

    /// Current zero flag.
    #[must_use]
    pub const fn zero_flag(&self) -> bool {
        self.regs.zero_flag()
    }
}

#[cfg(test)]
mod tests {
    use super::CpuState;

    #[test]
    fn reset_zeroes_registers_and_preserves_memory() {
        let mut state = CpuState::new();
        state.regs.set_pc(0x45);
        state.regs.set_acc(0x67);
        state.regs.set_flags(0x89);
        state.write_memory(0x00, 0xDE);
        state.write_memory(0x80, 0xAD);
        state.write_memory(0xFF, 0xBE);

        state.reset();

        assert_eq!(state.pc(), 0);
        assert_eq!(state.acc(), 0);
        assert_eq!(state.flags(), 0);
        assert_eq!(state.read_memory(0x00), 0xDE);
        assert_eq!(state.read_memory(0x80), 0xAD);
        assert_eq!(state.read_memory(0xFF), 0xBE);
    }

    #[test]
    fn step_on_zeroed_memory_only_advances_pc() {
        let mut state = CpuState::new();
        state.step();

        assert_eq!(state.pc(), 1);
        assert_eq!(state.acc(), 0);
        assert_eq!(state.flags(), 0);
    }

    #[test]
    fn independent_states_do_not_share_memory() {
        let mut first = CpuState::new();
        let second = CpuState::new();

        first.write_memory(0x10, 0x42);

        assert_eq!(first.read_memory(0x10), 0x42);
        assert_eq!(second.read_memory(0x10), 0x00);
    }
}
