//! MOS 6502 instruction decoding.
//!
//! Opcodes are classified by a fixed table for the irregular single-byte
//! instructions and branches, and by the `aaabbbcc` bit layout for
//! everything else. Operand widths come from a precomputed length table
//! so the cursor can always advance, even over bytes that are not code.

pub mod addressing;
pub mod decode;
pub mod instruction;
pub mod length;
pub mod opcode;

pub use addressing::AddressingMode;
pub use decode::{disassemble, DecodeRange, Decoder};
pub use instruction::{Instruction, Operand, END_OF_RANGE};
pub use length::{instruction_length, INSTRUCTION_LENGTHS};
pub use opcode::{classify, Family, Mnemonic, Opcode};
