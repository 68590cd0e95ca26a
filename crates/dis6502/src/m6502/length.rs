use super::opcode::{classify, Opcode};

/// BRK opcode. The byte after it is a padding/signature byte, so BRK
/// occupies two bytes even though it has no operand.
pub const BRK: u8 = 0x00;

const BRK_PADDING: u8 = 1;

/// Total instruction length (opcode + operand bytes) for every opcode.
///
/// Unknown opcodes and illegal addressing modes count as one byte so the
/// decoder can step over data bytes.
pub static INSTRUCTION_LENGTHS: [u8; 256] = build_length_table();

const fn build_length_table() -> [u8; 256] {
    let mut table = [1u8; 256];
    let mut opcode = 0usize;
    while opcode < table.len() {
        table[opcode] = length_of(opcode as u8);
        opcode += 1;
    }
    table
}

const fn length_of(opcode: u8) -> u8 {
    match classify(opcode) {
        Opcode::Known {
            mode: Some(mode), ..
        } => {
            let padding = if opcode == BRK { BRK_PADDING } else { 0 };
            1 + mode.operand_width() + padding
        }
        Opcode::Known { mode: None, .. } | Opcode::Unknown => 1,
    }
}

/// Length in bytes of the instruction starting with `opcode`.
#[inline]
pub fn instruction_length(opcode: u8) -> u8 {
    INSTRUCTION_LENGTHS[opcode as usize]
}
