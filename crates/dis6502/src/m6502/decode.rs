use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::addressing::AddressingMode;
use super::instruction::{Instruction, Operand, END_OF_RANGE};
use super::length::instruction_length;
use super::opcode::{classify, Opcode};

/// Half-open `[start, end)` window over a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeRange {
    pub start: usize,
    pub end: usize,
}

impl DecodeRange {
    /// Build a range for a buffer of `len` bytes.
    ///
    /// `end` defaults to `len` and `start` to 0. Both are clamped to the
    /// buffer, and `start` never exceeds `end`.
    pub fn new(start: Option<usize>, end: Option<usize>, len: usize) -> Self {
        let end = end.map_or(len, |end| end.min(len));
        let start = start.unwrap_or(0).min(end);
        DecodeRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Forward-only 6502 decoder over a borrowed byte stream.
///
/// The program counter is the decoder's only mutable state. It starts at
/// `range.start` and only moves forward; once it reaches `range.end` the
/// decoder is exhausted and every further step yields the end sentinel.
/// Build a new decoder to start over.
#[derive(Debug)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    range: DecodeRange,
    pc: usize,
}

impl<'a> Decoder<'a> {
    /// Decode the whole buffer.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_range(bytes, None, None)
    }

    /// Decode `bytes[start..end]`, with offsets clamped to the buffer.
    pub fn with_range(bytes: &'a [u8], start: Option<usize>, end: Option<usize>) -> Self {
        let range = DecodeRange::new(start, end, bytes.len());
        Decoder {
            bytes,
            range,
            pc: range.start,
        }
    }

    /// Current read position.
    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn range(&self) -> DecodeRange {
        self.range
    }

    pub fn is_exhausted(&self) -> bool {
        self.pc >= self.range.end
    }

    /// Bytes left between the cursor and the end of the range.
    pub fn remaining(&self) -> usize {
        self.range.end.saturating_sub(self.pc)
    }

    /// Byte at `at`, or `None` at or past the end of the range.
    fn byte_at(&self, at: usize) -> Option<u8> {
        if at < self.range.end {
            self.bytes.get(at).copied()
        } else {
            None
        }
    }

    fn read_operand(&self, at: usize, mode: AddressingMode) -> Operand {
        match mode.operand_width() {
            0 => Operand::None,
            1 => self.byte_at(at).map_or(Operand::Truncated, Operand::Byte),
            _ => match (self.byte_at(at), self.byte_at(at + 1)) {
                (Some(lo), Some(hi)) => Operand::Word(u16::from_le_bytes([lo, hi])),
                _ => Operand::Truncated,
            },
        }
    }

    /// Decode one instruction and advance the cursor past it.
    ///
    /// Returns `None` once the range is exhausted, without moving the
    /// cursor. An operand cut off by the end of the range is reported as
    /// [`Operand::Truncated`] and exhausts the decoder.
    pub fn decode_next(&mut self) -> Option<Instruction> {
        let offset = self.pc;
        let opcode = self.byte_at(offset)?;

        let (mnemonic, mode, operand) = match classify(opcode) {
            Opcode::Known {
                mnemonic,
                mode: Some(mode),
            } => (Some(mnemonic), Some(mode), self.read_operand(offset + 1, mode)),
            Opcode::Known {
                mnemonic,
                mode: None,
            } => {
                debug!(offset, opcode, %mnemonic, "illegal addressing mode");
                (Some(mnemonic), None, Operand::Illegal)
            }
            Opcode::Unknown => {
                debug!(offset, opcode, "unknown opcode");
                (None, None, Operand::None)
            }
        };

        self.pc = if operand == Operand::Truncated {
            debug!(offset, opcode, end = self.range.end, "operand truncated by end of range");
            self.range.end
        } else {
            (offset + instruction_length(opcode) as usize).min(self.range.end)
        };

        let inst = Instruction {
            offset,
            opcode,
            mnemonic,
            mode,
            operand,
            raw_bytes: self.bytes[offset..self.pc].to_vec(),
        };
        trace!(offset, opcode, text = %inst, "decoded");
        Some(inst)
    }

    /// Decode one instruction as text, or [`END_OF_RANGE`] once exhausted.
    pub fn decode_one(&mut self) -> String {
        match self.decode_next() {
            Some(inst) => inst.to_string(),
            None => END_OF_RANGE.to_string(),
        }
    }

    /// Decode the rest of the range. The last entry is always [`END_OF_RANGE`].
    pub fn decode_all(mut self) -> Vec<String> {
        let mut texts: Vec<String> = self.by_ref().map(|inst| inst.to_string()).collect();
        texts.push(END_OF_RANGE.to_string());
        texts
    }
}

impl Iterator for Decoder<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        self.decode_next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Decoder<'_> {}

/// Disassemble `bytes[start..end]` into instruction texts followed by
/// [`END_OF_RANGE`].
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn disassemble(bytes: &[u8], start: Option<usize>, end: Option<usize>) -> Vec<String> {
    Decoder::with_range(bytes, start, end).decode_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m6502::opcode::Mnemonic;
    use tracing_test::traced_test;

    fn decode(bytes: &[u8]) -> Instruction {
        Decoder::new(bytes).decode_next().unwrap()
    }

    #[test]
    fn decode_nop() {
        let inst = decode(&[0xEA]);
        assert_eq!(inst.mnemonic, Some(Mnemonic::Nop));
        assert_eq!(inst.size_bytes(), 1);
        assert_eq!(inst.to_string(), "NOP");
    }

    #[test]
    fn decode_lda_immediate() {
        let inst = decode(&[0xA9, 0x2A]);
        assert_eq!(inst.mode, Some(AddressingMode::Immediate));
        assert_eq!(inst.operand, Operand::Byte(0x2A));
        assert_eq!(inst.to_string(), "LDA #$2A");
    }

    #[test]
    fn decode_jsr_little_endian() {
        let inst = decode(&[0x20, 0x34, 0x12]);
        assert_eq!(inst.operand, Operand::Word(0x1234));
        assert_eq!(inst.raw_bytes, vec![0x20, 0x34, 0x12]);
        assert_eq!(inst.to_string(), "JSR $1234");
    }

    #[test]
    fn decode_branch_prints_raw_offset() {
        // BNE -2
        assert_eq!(decode(&[0xD0, 0xFE]).to_string(), "BNE $FE");
    }

    #[test]
    fn decode_rol_accumulator() {
        assert_eq!(decode(&[0x2A]).to_string(), "ROL A");
    }

    #[test]
    fn cursor_tracks_instruction_lengths() {
        let bytes = [0xA9, 0x01, 0x8D, 0x00, 0x02, 0x60];
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(decoder.decode_one(), "LDA #$01");
        assert_eq!(decoder.pc(), 2);
        assert_eq!(decoder.decode_one(), "STA $0200");
        assert_eq!(decoder.pc(), 5);
        assert_eq!(decoder.decode_one(), "RTS");
        assert!(decoder.is_exhausted());
        assert_eq!(decoder.decode_one(), ".END");
        assert_eq!(decoder.decode_one(), ".END");
        assert_eq!(decoder.pc(), 6);
    }

    #[test]
    fn brk_skips_padding_byte() {
        let mut decoder = Decoder::new(&[0x00, 0xFF, 0xEA]);
        assert_eq!(decoder.decode_one(), "BRK");
        assert_eq!(decoder.pc(), 2);
        assert_eq!(decoder.decode_one(), "NOP");
    }

    #[test]
    fn lone_brk_terminates() {
        let mut decoder = Decoder::new(&[0x00]);
        let inst = decoder.decode_next().unwrap();
        assert_eq!(inst.to_string(), "BRK");
        assert_eq!(inst.size_bytes(), 1);
        assert_eq!(decoder.pc(), 1);
        assert!(decoder.decode_next().is_none());
    }

    #[test]
    fn truncated_operand_exhausts() {
        let mut decoder = Decoder::new(&[0x6D, 0x0F]);
        let inst = decoder.decode_next().unwrap();
        assert!(inst.is_truncated());
        assert_eq!(inst.to_string(), "ADC END");
        assert_eq!(inst.raw_bytes, vec![0x6D, 0x0F]);
        assert!(decoder.is_exhausted());
        assert_eq!(decoder.decode_one(), ".END");
    }

    #[test]
    fn range_end_limits_reads() {
        // The operand byte exists in the buffer but lies outside the range.
        let bytes = [0xA9, 0x01];
        assert_eq!(disassemble(&bytes, None, Some(1)), vec!["LDA END", ".END"]);
    }

    #[test]
    fn range_is_clamped() {
        let decoder = Decoder::with_range(&[0xEA, 0xEA], Some(5), Some(100));
        assert_eq!(decoder.range(), DecodeRange { start: 2, end: 2 });
        assert!(decoder.is_exhausted());
    }

    #[test]
    fn size_hint_bounds() {
        let decoder = Decoder::new(&[0xEA, 0xEA, 0xEA]);
        assert_eq!(decoder.size_hint(), (1, Some(3)));
        assert_eq!(decoder.count(), 3);
    }

    #[test]
    #[traced_test]
    fn unknown_opcode_is_logged() {
        assert_eq!(disassemble(&[0xFF], None, None), vec!["???", ".END"]);
        assert!(logs_contain("unknown opcode"));
    }

    #[test]
    #[traced_test]
    fn truncation_is_logged() {
        let _ = disassemble(&[0x4C, 0x00], None, None);
        assert!(logs_contain("operand truncated"));
    }
}
