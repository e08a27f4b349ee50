//! Core execution engine for the tiny8 8-bit virtual CPU.

/// Flat 256-byte memory model.
pub mod memory;
pub use memory::{Memory, MemoryImageError, MEMORY_BYTES};

/// Architectural CPU state model primitives.
pub mod state;
pub use state::{CpuState, Registers, FLAGS_ZERO};

/// Opcode assignments and operand classification table.
pub mod encoding;
pub use encoding::{Opcode, OperandKind, UnknownOpcode, OPCODE_TABLE};

/// Step reporting and deterministic trace hooks.
pub mod api;
pub use api::{NullTrace, RunOutcome, StepOutcome, TraceEvent, TraceSink};

/// Fetch unit and instruction execution pipeline.
pub mod execute;
pub use execute::{execute_instruction, fetch, next_pc, run, step_one, FlagsUpdate};

/// Instruction disassembly.
pub mod disasm;
pub use disasm::{disassemble_one, disassemble_window, DisassemblyRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use serde_json as _;
