//! Opcode assignments and operand classification.

use thiserror::Error;

/// How an instruction's second byte is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// Single-byte instruction.
    None,
    /// Operand byte is used directly as data or as a jump target.
    Immediate,
    /// Operand byte is a memory address whose content is the operand.
    Address,
}

impl OperandKind {
    /// Instruction length in bytes for this operand kind.
    #[must_use]
    pub const fn instruction_len(self) -> u8 {
        match self {
            Self::None => 1,
            Self::Immediate | Self::Address => 2,
        }
    }
}

/// Assigned tiny8 opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Opcode {
    /// `ldi imm`: load accumulator immediate.
    Ldi = 0x01,
    /// `lda addr`: load accumulator from memory.
    Lda = 0x02,
    /// `sta addr`: store accumulator to memory.
    Sta = 0x03,
    /// `ldf`: load accumulator with flags.
    Ldf = 0x04,
    /// `stf`: store accumulator to flags.
    Stf = 0x05,
    /// `cmp imm`: compare accumulator with immediate.
    Cmp = 0x10,
    /// `adi imm`: add immediate.
    Adi = 0x11,
    /// `add addr`: add memory.
    Add = 0x12,
    /// `sui imm`: adds the immediate, despite the mnemonic.
    Sui = 0x13,
    /// `sub addr`: subtract memory.
    Sub = 0x14,
    /// `ldp`: load accumulator with program counter.
    Ldp = 0x20,
    /// `jmi imm`: unconditional immediate jump.
    Jmi = 0x21,
    /// `jmp addr`: unconditional indirect jump.
    Jmp = 0x22,
    /// `jiz imm`: immediate jump if zero flag set.
    Jiz = 0x23,
    /// `jmz addr`: indirect jump if zero flag set.
    Jmz = 0x24,
    /// `jin imm`: immediate jump if zero flag clear.
    Jin = 0x25,
    /// `jmn addr`: indirect jump if zero flag clear.
    Jmn = 0x26,
}

/// Opcode byte that has no assigned instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("unknown opcode 0x{0:02x}")]
pub struct UnknownOpcode(pub u8);

/// Single source-of-truth opcode table.
///
/// Any byte not present here executes as a one-byte no-op.
pub const OPCODE_TABLE: &[(u8, Opcode)] = &[
    (0x01, Opcode::Ldi),
    (0x02, Opcode::Lda),
    (0x03, Opcode::Sta),
    (0x04, Opcode::Ldf),
    (0x05, Opcode::Stf),
    (0x10, Opcode::Cmp),
    (0x11, Opcode::Adi),
    (0x12, Opcode::Add),
    (0x13, Opcode::Sui),
    (0x14, Opcode::Sub),
    (0x20, Opcode::Ldp),
    (0x21, Opcode::Jmi),
    (0x22, Opcode::Jmp),
    (0x23, Opcode::Jiz),
    (0x24, Opcode::Jmz),
    (0x25, Opcode::Jin),
    (0x26, Opcode::Jmn),
];

impl Opcode {
    /// Decodes an opcode byte.
    #[must_use]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Ldi),
            0x02 => Some(Self::Lda),
            0x03 => Some(Self::Sta),
            0x04 => Some(Self::Ldf),
            0x05 => Some(Self::Stf),
            0x10 => Some(Self::Cmp),
            0x11 => Some(Self::Adi),
            0x12 => Some(Self::Add),
            0x13 => Some(Self::Sui),
            0x14 => Some(Self::Sub),
            0x20 => Some(Self::Ldp),
            0x21 => Some(Self::Jmi),
            0x22 => Some(Self::Jmp),
            0x23 => Some(Self::Jiz),
            0x24 => Some(Self::Jmz),
            0x25 => Some(Self::Jin),
            0x26 => Some(Self::Jmn),
            _ => None,
        }
    }

    /// Encoded opcode byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lowercase assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ldi => "ldi",
            Self::Lda => "lda",
            Self::Sta => "sta",
            Self::Ldf => "ldf",
            Self::Stf => "stf",
            Self::Cmp => "cmp",
            Self::Adi => "adi",
            Self::Add => "add",
            Self::Sui => "sui",
            Self::Sub => "sub",
            Self::Ldp => "ldp",
            Self::Jmi => "jmi",
            Self::Jmp => "jmp",
            Self::Jiz => "jiz",
            Self::Jmz => "jmz",
            Self::Jin => "jin",
            Self::Jmn => "jmn",
        }
    }

    /// Operand interpretation for this opcode.
    #[must_use]
    pub const fn operand(self) -> OperandKind {
        match self {
            Self::Ldf | Self::Stf | Self::Ldp => OperandKind::None,
            Self::Ldi | Self::Cmp | Self::Adi | Self::Sui | Self::Jmi | Self::Jiz | Self::Jin => {
                OperandKind::Immediate
            }
            Self::Lda
            | Self::Sta
            | Self::Add
            | Self::Sub
            | Self::Jmp
            | Self::Jmz
            | Self::Jmn => OperandKind::Address,
        }
    }

    /// Instruction length in bytes.
    #[must_use]
    pub const fn instruction_len(self) -> u8 {
        self.operand().instruction_len()
    }

    /// Returns `true` for the conditional jump family.
    #[must_use]
    pub const fn is_conditional_jump(self) -> bool {
        matches!(self, Self::Jiz | Self::Jmz | Self::Jin | Self::Jmn)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = UnknownOpcode;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_u8(byte).ok_or(UnknownOpcode(byte))
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode.as_u8()
    }
}
