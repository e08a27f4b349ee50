//! Per-opcode register, memory and FLAGS semantics.

use proptest as _;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;
use tiny8_core::{step_one, CpuState, NullTrace, Opcode, StepOutcome, FLAGS_ZERO};

/// Places `bytes` at address `0x00`, sets registers, runs one step.
fn run_one(bytes: &[u8], acc: u8, flags: u8) -> (CpuState, StepOutcome) {
    let mut state = CpuState::new();
    for (addr, byte) in (0_u8..).zip(bytes.iter().copied()) {
        state.write_memory(addr, byte);
    }
    state.regs.set_acc(acc);
    state.regs.set_flags(flags);

    let outcome = step_one(&mut state, &mut NullTrace);
    (state, outcome)
}

#[test]
fn ldi_loads_immediate() {
    let (state, _) = run_one(&[0x01, 0x9C], 0x00, 0x00);
    assert_eq!(state.acc(), 0x9C);
    assert_eq!(state.pc(), 2);
    assert_eq!(state.flags(), 0x00);
}

#[test]
fn lda_loads_from_memory() {
    let mut state = CpuState::new();
    state.write_memory(0x00, 0x02);
    state.write_memory(0x01, 0x80);
    state.write_memory(0x80, 0x3C);

    state.step();

    assert_eq!(state.acc(), 0x3C);
    assert_eq!(state.pc(), 2);
}

#[test]
fn sta_stores_accumulator() {
    let (state, _) = run_one(&[0x03, 0x40], 0x5E, 0x00);
    assert_eq!(state.read_memory(0x40), 0x5E);
    assert_eq!(state.acc(), 0x5E);
    assert_eq!(state.pc(), 2);
}

#[test]
fn sta_can_overwrite_its_own_operand() {
    let (state, _) = run_one(&[0x03, 0x01], 0xAA, 0x00);
    assert_eq!(state.read_memory(0x01), 0xAA);
}

#[test]
fn ldf_copies_all_flag_bits() {
    let (state, _) = run_one(&[0x04], 0x00, 0b1100_0101);
    assert_eq!(state.acc(), 0b1100_0101);
    assert_eq!(state.flags(), 0b1100_0101);
    assert_eq!(state.pc(), 1);
}

#[test]
fn stf_replaces_all_flag_bits() {
    let (state, _) = run_one(&[0x05], 0b0111_1110, 0xFF);
    assert_eq!(state.flags(), 0b0111_1110);
    assert!(!state.zero_flag());
    assert_eq!(state.pc(), 1);
}

#[rstest]
#[case::equal(0x05, 0x05, true)]
#[case::different(0x05, 0x06, false)]
#[case::equal_zero(0x00, 0x00, true)]
#[case::zero_vs_nonzero(0x00, 0x01, false)]
fn cmp_sets_zero_flag_on_equality_only(
    #[case] acc: u8,
    #[case] imm: u8,
    #[case] expect_zero: bool,
) {
    for prior in [0x00, FLAGS_ZERO, 0xFE, 0xFF] {
        let (state, _) = run_one(&[0x10, imm], acc, prior);
        assert_eq!(state.acc(), acc);
        assert_eq!(state.zero_flag(), expect_zero);
        assert_eq!(state.flags() & !FLAGS_ZERO, prior & !FLAGS_ZERO);
        assert_eq!(state.pc(), 2);
    }
}

#[rstest]
#[case::adi_simple(0x11, 0x10, 0x05, 0x15, false)]
#[case::adi_wraps_to_zero(0x11, 0xFF, 0x01, 0x00, true)]
#[case::adi_wraps_past_zero(0x11, 0xF0, 0x20, 0x10, false)]
#[case::adi_zero_plus_zero(0x11, 0x00, 0x00, 0x00, true)]
#[case::sui_adds(0x13, 0x10, 0x05, 0x15, false)]
#[case::sui_wraps_to_zero(0x13, 0x01, 0xFF, 0x00, true)]
fn immediate_arithmetic(
    #[case] opcode: u8,
    #[case] acc: u8,
    #[case] imm: u8,
    #[case] expected: u8,
    #[case] expect_zero: bool,
) {
    let (state, outcome) = run_one(&[opcode, imm], acc, 0b1010_1010);
    assert_eq!(state.acc(), expected);
    assert_eq!(state.zero_flag(), expect_zero);
    assert_eq!(state.flags() & !FLAGS_ZERO, 0b1010_1010);
    assert_eq!(state.pc(), 2);
    assert!(matches!(outcome, StepOutcome::Retired { .. }));
}

#[rstest]
#[case::add_simple(0x12, 0x10, 0x05, 0x15, false)]
#[case::add_wraps_to_zero(0x12, 0x80, 0x80, 0x00, true)]
#[case::sub_simple(0x14, 0x10, 0x05, 0x0B, false)]
#[case::sub_to_zero(0x14, 0x42, 0x42, 0x00, true)]
#[case::sub_borrows(0x14, 0x00, 0x01, 0xFF, false)]
fn memory_arithmetic(
    #[case] opcode: u8,
    #[case] acc: u8,
    #[case] cell: u8,
    #[case] expected: u8,
    #[case] expect_zero: bool,
) {
    let mut state = CpuState::new();
    state.write_memory(0x00, opcode);
    state.write_memory(0x01, 0x90);
    state.write_memory(0x90, cell);
    state.regs.set_acc(acc);
    state.regs.set_flags(if expect_zero { 0x00 } else { FLAGS_ZERO });

    state.step();

    assert_eq!(state.acc(), expected);
    assert_eq!(state.zero_flag(), expect_zero);
    assert_eq!(state.read_memory(0x90), cell);
    assert_eq!(state.pc(), 2);
}

#[test]
fn sui_is_additive_not_subtractive() {
    let (state, _) = run_one(&[0x13, 0x03], 0x0A, 0x00);
    assert_eq!(state.acc(), 0x0D);
}

#[test]
fn ldp_loads_pc_after_opcode_fetch() {
    let mut state = CpuState::new();
    state.write_memory(0x30, 0x20);
    state.regs.set_pc(0x30);

    state.step();

    assert_eq!(state.acc(), 0x31);
    assert_eq!(state.pc(), 0x31);
}

#[test]
fn ldp_at_top_address_loads_wrapped_pc() {
    let mut state = CpuState::new();
    state.write_memory(0xFF, 0x20);
    state.regs.set_pc(0xFF);
    state.regs.set_acc(0x77);

    state.step();

    assert_eq!(state.acc(), 0x00);
    assert_eq!(state.pc(), 0x00);
}

#[test]
fn jmi_jumps_to_immediate() {
    let (state, outcome) = run_one(&[0x21, 0x40], 0x00, 0x00);
    assert_eq!(state.pc(), 0x40);
    assert_eq!(
        outcome,
        StepOutcome::Retired {
            opcode: Opcode::Jmi,
            branch_taken: true
        }
    );
}

#[test]
fn jmp_jumps_to_memory_content() {
    let mut state = CpuState::new();
    state.write_memory(0x00, 0x22);
    state.write_memory(0x01, 0x50);
    state.write_memory(0x50, 0xC0);

    state.step();

    assert_eq!(state.pc(), 0xC0);
}

#[rstest]
#[case::jiz_taken(0x23, FLAGS_ZERO, true)]
#[case::jiz_not_taken(0x23, 0x00, false)]
#[case::jin_taken(0x25, 0x00, true)]
#[case::jin_not_taken(0x25, FLAGS_ZERO, false)]
fn immediate_conditional_jumps(#[case] opcode: u8, #[case] flags: u8, #[case] taken: bool) {
    let mut state = CpuState::new();
    state.write_memory(0x10, opcode);
    state.write_memory(0x11, 0x40);
    state.regs.set_pc(0x10);
    state.regs.set_flags(flags);
    state.regs.set_acc(0x33);

    let outcome = step_one(&mut state, &mut NullTrace);

    let expected_pc = if taken { 0x40 } else { 0x12 };
    assert_eq!(state.pc(), expected_pc);
    assert_eq!(state.acc(), 0x33);
    assert_eq!(state.flags(), flags);
    assert!(matches!(
        outcome,
        StepOutcome::Retired { branch_taken, .. } if branch_taken == taken
    ));
}

#[rstest]
#[case::jmz_taken(0x24, FLAGS_ZERO, true)]
#[case::jmz_not_taken(0x24, 0x00, false)]
#[case::jmn_taken(0x26, 0x00, true)]
#[case::jmn_not_taken(0x26, FLAGS_ZERO, false)]
fn indirect_conditional_jumps(#[case] opcode: u8, #[case] flags: u8, #[case] taken: bool) {
    let mut state = CpuState::new();
    state.write_memory(0x10, opcode);
    state.write_memory(0x11, 0x80);
    state.write_memory(0x80, 0xE0);
    state.regs.set_pc(0x10);
    state.regs.set_flags(flags);

    state.step();

    let expected_pc = if taken { 0xE0 } else { 0x12 };
    assert_eq!(state.pc(), expected_pc);
}

#[test]
fn conditional_jumps_test_only_bit_zero() {
    // Upper bits set but zero flag clear: jiz falls through, jin jumps.
    let (state, _) = run_one(&[0x23, 0x40], 0x00, 0xFE);
    assert_eq!(state.pc(), 2);

    let (state, _) = run_one(&[0x25, 0x40], 0x00, 0xFE);
    assert_eq!(state.pc(), 0x40);
}

#[test]
fn not_taken_jump_then_next_instruction_stays_aligned() {
    let mut state = CpuState::new();
    // jiz 0x40 (not taken) ; ldi 0x07
    for (addr, byte) in (0_u8..).zip([0x23, 0x40, 0x01, 0x07]) {
        state.write_memory(addr, byte);
    }

    state.step();
    state.step();

    assert_eq!(state.acc(), 0x07);
    assert_eq!(state.pc(), 4);
}

#[test]
fn every_unassigned_byte_is_a_one_byte_no_op() {
    for raw in 0_u8..=u8::MAX {
        if Opcode::from_u8(raw).is_some() {
            continue;
        }

        let mut state = CpuState::new();
        state.write_memory(0x00, raw);
        state.write_memory(0x01, 0x01);
        state.regs.set_acc(0x5A);
        state.regs.set_flags(0xA5);
        let memory_before = state.memory.clone();

        let outcome = step_one(&mut state, &mut NullTrace);

        assert_eq!(outcome, StepOutcome::Ignored { raw });
        assert_eq!(state.pc(), 1);
        assert_eq!(state.acc(), 0x5A);
        assert_eq!(state.flags(), 0xA5);
        assert_eq!(state.memory, memory_before);
    }
}
