use super::addressing::AddressingMode;
use super::opcode::Mnemonic;

/// Text emitted in place of the whole instruction for an unknown opcode.
pub const UNKNOWN_INSTRUCTION: &str = "???";
/// Text emitted in place of the operand for an illegal addressing mode.
pub const UNKNOWN_OPERAND: &str = "???";
/// Text emitted in place of an operand cut off by the end of the range.
pub const TRUNCATED_OPERAND: &str = "END";
/// Terminal sentinel returned once the decode range is exhausted.
pub const END_OF_RANGE: &str = ".END";

/// Operand value read from the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand bytes (implied, accumulator, unknown opcode).
    None,
    /// One operand byte.
    Byte(u8),
    /// Two operand bytes, already assembled little-endian.
    Word(u16),
    /// Addressing-mode bits not valid for the family; nothing was read.
    Illegal,
    /// The range ended before the operand bytes were available.
    Truncated,
}

/// One decoded 6502 instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Offset of the opcode byte within the byte stream.
    pub offset: usize,
    /// The opcode byte.
    pub opcode: u8,
    /// `None` for an unknown opcode.
    pub mnemonic: Option<Mnemonic>,
    /// `None` for an unknown opcode or an illegal addressing mode.
    pub mode: Option<AddressingMode>,
    pub operand: Operand,
    /// Bytes the cursor moved over for this instruction.
    pub raw_bytes: Vec<u8>,
}

impl Instruction {
    /// Number of bytes this instruction consumed from the stream.
    pub fn size_bytes(&self) -> usize {
        self.raw_bytes.len()
    }

    pub fn is_unknown(&self) -> bool {
        self.mnemonic.is_none()
    }

    pub fn is_truncated(&self) -> bool {
        self.operand == Operand::Truncated
    }

    /// Operand text, or `None` when the instruction prints as a bare mnemonic.
    pub fn operand_text(&self) -> Option<String> {
        if self.mnemonic.is_none() {
            return None;
        }
        match self.operand {
            Operand::Illegal => Some(UNKNOWN_OPERAND.to_string()),
            Operand::Truncated => Some(TRUNCATED_OPERAND.to_string()),
            Operand::None => self.mode.and_then(|mode| mode.render(0)),
            Operand::Byte(value) => self.mode.and_then(|mode| mode.render(u16::from(value))),
            Operand::Word(value) => self.mode.and_then(|mode| mode.render(value)),
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(mnemonic) = self.mnemonic else {
            return f.write_str(UNKNOWN_INSTRUCTION);
        };
        match self.operand_text() {
            Some(operand) => write!(f, "{mnemonic} {operand}"),
            None => write!(f, "{mnemonic}"),
        }
    }
}
