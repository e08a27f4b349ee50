//! Instruction execution pipeline for the tiny8 ISA.
//!
//! One step is:
//! 1. Fetch the opcode byte through the fetch unit
//! 2. Decode it against the opcode table (undecodable bytes end the step)
//! 3. Fetch the operand byte, if the instruction has one
//! 4. Apply register, memory and FLAGS effects
//! 5. Redirect `PC` when a jump is taken
//!
//! Stepping never fails. Arithmetic wraps modulo 256.

mod fetch;
mod flags;

pub use fetch::{fetch, next_pc};
pub use flags::FlagsUpdate;

use crate::{CpuState, Opcode, RunOutcome, StepOutcome, TraceEvent, TraceSink};

/// Where an instruction's data operand comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// The operand byte itself.
    Immediate,
    /// The memory cell addressed by the operand byte.
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AluOp {
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JumpCondition {
    Always,
    ZeroSet,
    ZeroClear,
}

impl JumpCondition {
    const fn holds(self, zero: bool) -> bool {
        match self {
            Self::Always => true,
            Self::ZeroSet => zero,
            Self::ZeroClear => !zero,
        }
    }
}

/// Executes one instruction and reports what happened.
pub fn step_one(state: &mut CpuState, sink: &mut dyn TraceSink) -> StepOutcome {
    let pc = state.regs.pc();
    let raw = fetch(state);
    sink.on_event(TraceEvent::InstructionStart { pc, raw });

    let Some(opcode) = Opcode::from_u8(raw) else {
        sink.on_event(TraceEvent::UnknownOpcode { pc, raw });
        return StepOutcome::Ignored { raw };
    };

    let branch_taken = execute_instruction(opcode, state, sink);
    sink.on_event(TraceEvent::InstructionRetired { pc, opcode });

    StepOutcome::Retired {
        opcode,
        branch_taken,
    }
}

/// Executes `steps` instructions back to back.
pub fn run(state: &mut CpuState, steps: u32, sink: &mut dyn TraceSink) -> RunOutcome {
    let mut final_step = None;
    for _ in 0..steps {
        final_step = Some(step_one(state, sink));
    }

    RunOutcome { steps, final_step }
}

/// Executes an already-fetched opcode. `PC` must point just past the opcode
/// byte. Returns `true` when a jump redirected `PC`.
pub fn execute_instruction(opcode: Opcode, state: &mut CpuState, sink: &mut dyn TraceSink) -> bool {
    let (source, condition) = match opcode {
        Opcode::Jmi => (Source::Immediate, JumpCondition::Always),
        Opcode::Jmp => (Source::Memory, JumpCondition::Always),
        Opcode::Jiz => (Source::Immediate, JumpCondition::ZeroSet),
        Opcode::Jmz => (Source::Memory, JumpCondition::ZeroSet),
        Opcode::Jin => (Source::Immediate, JumpCondition::ZeroClear),
        Opcode::Jmn => (Source::Memory, JumpCondition::ZeroClear),
        Opcode::Ldi => return execute_load(state, Source::Immediate),
        Opcode::Lda => return execute_load(state, Source::Memory),
        Opcode::Sta => return execute_store(state, sink),
        Opcode::Ldf => {
            let flags = state.regs.flags();
            state.regs.set_acc(flags);
            return false;
        }
        Opcode::Stf => {
            let acc = state.regs.acc();
            FlagsUpdate::Set(acc).apply(&mut state.regs);
            sink.on_event(TraceEvent::FlagsWrite { value: acc });
            return false;
        }
        Opcode::Cmp => return execute_cmp(state),
        Opcode::Adi | Opcode::Sui => return execute_alu(state, Source::Immediate, AluOp::Add),
        Opcode::Add => return execute_alu(state, Source::Memory, AluOp::Add),
        Opcode::Sub => return execute_alu(state, Source::Memory, AluOp::Sub),
        Opcode::Ldp => {
            let pc = state.regs.pc();
            state.regs.set_acc(pc);
            return false;
        }
    };

    execute_jump(state, source, condition, sink)
}

fn read_operand(state: &mut CpuState, source: Source) -> u8 {
    let operand = fetch(state);
    match source {
        Source::Immediate => operand,
        Source::Memory => state.memory.read(operand),
    }
}

fn execute_load(state: &mut CpuState, source: Source) -> bool {
    let value = read_operand(state, source);
    state.regs.set_acc(value);
    false
}

fn execute_store(state: &mut CpuState, sink: &mut dyn TraceSink) -> bool {
    let addr = fetch(state);
    let value = state.regs.acc();
    state.memory.write(addr, value);
    sink.on_event(TraceEvent::MemoryWrite { addr, value });
    false
}

fn execute_cmp(state: &mut CpuState) -> bool {
    let data = read_operand(state, Source::Immediate);
    FlagsUpdate::Zero(data == state.regs.acc()).apply(&mut state.regs);
    false
}

fn execute_alu(state: &mut CpuState, source: Source, op: AluOp) -> bool {
    let operand = read_operand(state, source);
    let acc = state.regs.acc();
    let result = match op {
        AluOp::Add => acc.wrapping_add(operand),
        AluOp::Sub => acc.wrapping_sub(operand),
    };

    state.regs.set_acc(result);
    FlagsUpdate::Zero(result == 0).apply(&mut state.regs);
    false
}

/// The operand byte is consumed whether or not the jump is taken.
fn execute_jump(
    state: &mut CpuState,
    source: Source,
    condition: JumpCondition,
    sink: &mut dyn TraceSink,
) -> bool {
    if !condition.holds(state.regs.zero_flag()) {
        fetch(state);
        return false;
    }

    let target = read_operand(state, source);
    state.regs.set_pc(target);
    sink.on_event(TraceEvent::Jump { target });
    true
}
