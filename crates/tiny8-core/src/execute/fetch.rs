//! Instruction-stream fetch unit.

use crate::CpuState;

/// Program counter that follows `pc` after one fetch.
///
/// The top address does not advance sequentially; it restarts at zero.
#[must_use]
pub const fn next_pc(pc: u8) -> u8 {
    if pc == u8::MAX {
        0
    } else {
        pc + 1
    }
}

/// Reads the byte at `PC` and advances `PC`.
///
/// Opcode and operand bytes both go through here, so an operand that would
/// sit past address 255 is read from address 0.
pub fn fetch(state: &mut CpuState) -> u8 {
    let pc = state.regs.pc();
    let byte = state.memory.read(pc);
    state.regs.set_pc(next_pc(pc));
    byte
}
