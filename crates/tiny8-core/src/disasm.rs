//! Instruction disassembly for the tiny8 ISA.
//!
//! Operand bytes are located with the same wrap rule as the fetch unit, so a
//! two-byte instruction at `0xFF` shows the byte at `0x00` as its operand.

use std::fmt;

use crate::execute::next_pc;
use crate::{Memory, Opcode, OperandKind};

/// A single disassembled instruction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassemblyRow {
    /// Address of the opcode byte.
    pub addr: u8,
    /// Length in bytes (1 or 2).
    pub len_bytes: u8,
    /// Raw bytes in fetch order; only the first `len_bytes` are meaningful.
    pub raw: [u8; 2],
    /// The instruction mnemonic, or `.byte` for undecodable bytes.
    pub mnemonic: &'static str,
    /// Formatted operand (`#$xx`, `[$xx]`, or empty).
    pub operands: String,
    /// Whether the opcode byte has no assigned instruction.
    pub is_unknown: bool,
}

impl fmt::Display for DisassemblyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = if self.len_bytes == 2 {
            format!("{:02x} {:02x}", self.raw[0], self.raw[1])
        } else {
            format!("{:02x}", self.raw[0])
        };

        write!(f, "{:02x}: {bytes:<6} {}", self.addr, self.mnemonic)?;
        if !self.operands.is_empty() {
            write!(f, " {}", self.operands)?;
        }
        Ok(())
    }
}

/// Disassembles the instruction whose opcode byte sits at `addr`.
#[must_use]
pub fn disassemble_one(addr: u8, memory: &Memory) -> DisassemblyRow {
    let raw_opcode = memory.read(addr);

    let Some(opcode) = Opcode::from_u8(raw_opcode) else {
        return DisassemblyRow {
            addr,
            len_bytes: 1,
            raw: [raw_opcode, 0],
            mnemonic: ".byte",
            operands: format!("${raw_opcode:02x}"),
            is_unknown: true,
        };
    };

    let (len_bytes, operand_byte) = match opcode.operand() {
        OperandKind::None => (1, 0),
        OperandKind::Immediate | OperandKind::Address => (2, memory.read(next_pc(addr))),
    };

    let operands = match opcode.operand() {
        OperandKind::None => String::new(),
        OperandKind::Immediate => format!("#${operand_byte:02x}"),
        OperandKind::Address => format!("[${operand_byte:02x}]"),
    };

    DisassemblyRow {
        addr,
        len_bytes,
        raw: [raw_opcode, operand_byte],
        mnemonic: opcode.mnemonic(),
        operands,
        is_unknown: false,
    }
}

/// Disassembles `count` consecutive instructions starting at `start`.
///
/// Rows follow the linear byte stream; jumps are not followed.
#[must_use]
pub fn disassemble_window(start: u8, count: usize, memory: &Memory) -> Vec<DisassemblyRow> {
    let mut rows = Vec::with_capacity(count);
    let mut addr = start;

    for _ in 0..count {
        let row = disassemble_one(addr, memory);
        for _ in 0..row.len_bytes {
            addr = next_pc(addr);
        }
        rows.push(row);
    }

    rows
}
