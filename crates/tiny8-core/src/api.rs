//! Host-facing step reporting and trace hook types.

use crate::Opcode;

/// Report from one instruction step.
///
/// Informational only: stepping never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// An assigned instruction executed.
    Retired {
        /// Executed opcode.
        opcode: Opcode,
        /// Whether `PC` was redirected by a jump.
        branch_taken: bool,
    },
    /// The fetched byte has no assigned instruction and was skipped.
    Ignored {
        /// The undecodable byte.
        raw: u8,
    },
}

impl StepOutcome {
    /// Returns the executed opcode, if the step retired one.
    #[must_use]
    pub const fn opcode(self) -> Option<Opcode> {
        match self {
            Self::Retired { opcode, .. } => Some(opcode),
            Self::Ignored { .. } => None,
        }
    }
}

/// Aggregated outcome from running several steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Number of steps executed.
    pub steps: u32,
    /// Report from the last step, `None` when no step ran.
    pub final_step: Option<StepOutcome>,
}

/// Deterministic trace events emitted in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// Opcode byte fetched.
    InstructionStart {
        /// Address the opcode byte was fetched from.
        pc: u8,
        /// Raw opcode byte.
        raw: u8,
    },
    /// Memory cell written by `sta`.
    MemoryWrite {
        /// Target address.
        addr: u8,
        /// Value written.
        value: u8,
    },
    /// `FLAGS` overwritten in bulk by `stf`.
    FlagsWrite {
        /// New `FLAGS` value.
        value: u8,
    },
    /// `PC` redirected by a jump.
    Jump {
        /// New program counter.
        target: u8,
    },
    /// Undecodable opcode byte skipped.
    UnknownOpcode {
        /// Address of the skipped byte.
        pc: u8,
        /// Raw byte.
        raw: u8,
    },
    /// Instruction finished.
    InstructionRetired {
        /// Address of the instruction's opcode byte.
        pc: u8,
        /// Executed opcode.
        opcode: Opcode,
    },
}

/// Sink trait for deterministic trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn on_event(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
