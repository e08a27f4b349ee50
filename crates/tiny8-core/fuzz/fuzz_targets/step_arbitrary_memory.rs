#![no_main]

use libfuzzer_sys::fuzz_target;
use tiny8_core::{disassemble_window, run, CpuState, NullTrace};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let mut state = CpuState::default();
    state.regs.set_pc(data[0]);
    state.regs.set_acc(data[1]);
    state.regs.set_flags(data[2]);
    for (addr, byte) in (0_u8..=u8::MAX).zip(data[3..].iter().copied()) {
        state.write_memory(addr, byte);
    }

    let _ = disassemble_window(state.pc(), 16, &state.memory);
    let _ = run(&mut state, 1024, &mut NullTrace);
});
