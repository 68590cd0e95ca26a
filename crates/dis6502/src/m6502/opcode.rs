use super::addressing::{resolve, AddressingMode};

/// Mask selecting the instruction family (bits 1-0).
pub const FAMILY_MASK: u8 = 0b11;
/// Mask applied after shifting out bits 4-0 to select the instruction index.
pub const INSTRUCTION_MASK: u8 = 0b111;
/// Mask applied after shifting out bits 1-0 to select the addressing mode.
pub const ADDRESSING_MODE_MASK: u8 = 0b111;

/// Instruction family encoded in the low two bits of an opcode.
///
/// The regular part of the 6502 opcode space is laid out as `aaabbbcc`:
/// `cc` picks one of these families, `aaa` the instruction inside it and
/// `bbb` the addressing mode. Family `11` holds no documented instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `cc = 00` — BIT, JMP, STY, LDY, CPY, CPX.
    Group00,
    /// `cc = 01` — the accumulator ALU group.
    Group01,
    /// `cc = 10` — shifts, rotates, X-register loads and stores, INC/DEC.
    Group10,
    /// `cc = 11` — unused.
    Group11,
}

impl Family {
    pub const fn from_opcode(opcode: u8) -> Self {
        match opcode & FAMILY_MASK {
            0b00 => Family::Group00,
            0b01 => Family::Group01,
            0b10 => Family::Group10,
            _ => Family::Group11,
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::Group00 => f.write_str("00"),
            Family::Group01 => f.write_str("01"),
            Family::Group10 => f.write_str("10"),
            Family::Group11 => f.write_str("11"),
        }
    }
}

/// Bits 7-5: instruction within the family.
pub const fn instruction_index(opcode: u8) -> u8 {
    (opcode >> 5) & INSTRUCTION_MASK
}

/// Bits 4-2: addressing mode within the family.
pub const fn mode_index(opcode: u8) -> u8 {
    (opcode >> 2) & ADDRESSING_MODE_MASK
}

/// All documented NMOS 6502 mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // Load/store
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,

    // Arithmetic and logic
    Adc,
    Sbc,
    And,
    Ora,
    Eor,
    Bit,
    Cmp,
    Cpx,
    Cpy,

    // Shifts and rotates
    Asl,
    Lsr,
    Rol,
    Ror,

    // Increment/decrement
    Inc,
    Dec,
    Inx,
    Iny,
    Dex,
    Dey,

    // Register transfers
    Tax,
    Txa,
    Tay,
    Tya,
    Tsx,
    Txs,

    // Stack
    Pha,
    Pla,
    Php,
    Plp,

    // Flags
    Clc,
    Sec,
    Cli,
    Sei,
    Clv,
    Cld,
    Sed,

    // Branches
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,

    // Jumps and control
    Jmp,
    Jsr,
    Rts,
    Rti,
    Brk,
    Nop,
}

impl Mnemonic {
    /// Upper-case assembler name.
    pub fn name(&self) -> &'static str {
        match self {
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Adc => "ADC",
            Mnemonic::Sbc => "SBC",
            Mnemonic::And => "AND",
            Mnemonic::Ora => "ORA",
            Mnemonic::Eor => "EOR",
            Mnemonic::Bit => "BIT",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Asl => "ASL",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Inc => "INC",
            Mnemonic::Dec => "DEC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tya => "TYA",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txs => "TXS",
            Mnemonic::Pha => "PHA",
            Mnemonic::Pla => "PLA",
            Mnemonic::Php => "PHP",
            Mnemonic::Plp => "PLP",
            Mnemonic::Clc => "CLC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Cli => "CLI",
            Mnemonic::Sei => "SEI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cld => "CLD",
            Mnemonic::Sed => "SED",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Bne => "BNE",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Rts => "RTS",
            Mnemonic::Rti => "RTI",
            Mnemonic::Brk => "BRK",
            Mnemonic::Nop => "NOP",
        }
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const FAMILY_00: [Option<Mnemonic>; 8] = [
    None,
    Some(Mnemonic::Bit),
    Some(Mnemonic::Jmp),
    Some(Mnemonic::Jmp),
    Some(Mnemonic::Sty),
    Some(Mnemonic::Ldy),
    Some(Mnemonic::Cpy),
    Some(Mnemonic::Cpx),
];

const FAMILY_01: [Mnemonic; 8] = [
    Mnemonic::Ora,
    Mnemonic::And,
    Mnemonic::Eor,
    Mnemonic::Adc,
    Mnemonic::Sta,
    Mnemonic::Lda,
    Mnemonic::Cmp,
    Mnemonic::Sbc,
];

const FAMILY_10: [Mnemonic; 8] = [
    Mnemonic::Asl,
    Mnemonic::Rol,
    Mnemonic::Lsr,
    Mnemonic::Ror,
    Mnemonic::Stx,
    Mnemonic::Ldx,
    Mnemonic::Dec,
    Mnemonic::Inc,
];

/// Result of classifying one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// A documented instruction. `mode` is `None` when the addressing-mode
    /// bits are not valid for the instruction's family.
    Known {
        mnemonic: Mnemonic,
        mode: Option<AddressingMode>,
    },
    /// No instruction is defined for this byte.
    Unknown,
}

impl Opcode {
    pub const fn mnemonic(&self) -> Option<Mnemonic> {
        match self {
            Opcode::Known { mnemonic, .. } => Some(*mnemonic),
            Opcode::Unknown => None,
        }
    }

    pub const fn mode(&self) -> Option<AddressingMode> {
        match self {
            Opcode::Known { mode, .. } => *mode,
            Opcode::Unknown => None,
        }
    }
}

/// Opcodes that do not follow the `aaabbbcc` layout: single-byte
/// instructions, the conditional branches and JSR.
///
/// These are checked before the family tables, which is why family 00
/// instruction index 0 never reaches [`classify`]'s generic path for
/// BRK/PHP/BPL/CLC.
pub const fn fixed_opcode(opcode: u8) -> Option<(Mnemonic, AddressingMode)> {
    use AddressingMode::{Absolute, Implied, Relative};

    let entry = match opcode {
        0x00 => (Mnemonic::Brk, Implied),
        0x40 => (Mnemonic::Rti, Implied),
        0x60 => (Mnemonic::Rts, Implied),
        0x08 => (Mnemonic::Php, Implied),
        0x28 => (Mnemonic::Plp, Implied),
        0x48 => (Mnemonic::Pha, Implied),
        0x68 => (Mnemonic::Pla, Implied),
        0x88 => (Mnemonic::Dey, Implied),
        0xA8 => (Mnemonic::Tay, Implied),
        0xC8 => (Mnemonic::Iny, Implied),
        0xE8 => (Mnemonic::Inx, Implied),
        0x18 => (Mnemonic::Clc, Implied),
        0x38 => (Mnemonic::Sec, Implied),
        0x58 => (Mnemonic::Cli, Implied),
        0x78 => (Mnemonic::Sei, Implied),
        0x98 => (Mnemonic::Tya, Implied),
        0xB8 => (Mnemonic::Clv, Implied),
        0xD8 => (Mnemonic::Cld, Implied),
        0xF8 => (Mnemonic::Sed, Implied),
        0x8A => (Mnemonic::Txa, Implied),
        0x9A => (Mnemonic::Txs, Implied),
        0xAA => (Mnemonic::Tax, Implied),
        0xBA => (Mnemonic::Tsx, Implied),
        0xCA => (Mnemonic::Dex, Implied),
        0xEA => (Mnemonic::Nop, Implied),
        0x10 => (Mnemonic::Bpl, Relative),
        0x30 => (Mnemonic::Bmi, Relative),
        0x50 => (Mnemonic::Bvc, Relative),
        0x70 => (Mnemonic::Bvs, Relative),
        0x90 => (Mnemonic::Bcc, Relative),
        0xB0 => (Mnemonic::Bcs, Relative),
        0xD0 => (Mnemonic::Bne, Relative),
        0xF0 => (Mnemonic::Beq, Relative),
        0x20 => (Mnemonic::Jsr, Absolute),
        _ => return None,
    };
    Some(entry)
}

/// Classify an opcode byte. Total over all 256 values.
pub const fn classify(opcode: u8) -> Opcode {
    if let Some((mnemonic, mode)) = fixed_opcode(opcode) {
        return Opcode::Known {
            mnemonic,
            mode: Some(mode),
        };
    }

    let family = Family::from_opcode(opcode);
    let index = instruction_index(opcode) as usize;
    let mnemonic = match family {
        Family::Group00 => FAMILY_00[index],
        Family::Group01 => Some(FAMILY_01[index]),
        Family::Group10 => Some(FAMILY_10[index]),
        Family::Group11 => None,
    };

    match mnemonic {
        Some(mnemonic) => Opcode::Known {
            mnemonic,
            mode: resolve(family, mode_index(opcode)),
        },
        None => Opcode::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_fields() {
        // ADC abs = 011 011 01
        assert_eq!(Family::from_opcode(0x6D), Family::Group01);
        assert_eq!(instruction_index(0x6D), 0b011);
        assert_eq!(mode_index(0x6D), 0b011);
    }

    #[test]
    fn fixed_table_wins_over_families() {
        // 0x8A sits where STX A would be; 0x0A has no fixed entry and stays ASL A
        assert_eq!(classify(0x8A).mnemonic(), Some(Mnemonic::Txa));
        assert_eq!(
            classify(0x0A),
            Opcode::Known {
                mnemonic: Mnemonic::Asl,
                mode: Some(AddressingMode::Accumulator)
            }
        );
        assert_eq!(classify(0x20).mode(), Some(AddressingMode::Absolute));
    }

    #[test]
    fn family_01_instructions() {
        let expected = [
            Mnemonic::Ora,
            Mnemonic::And,
            Mnemonic::Eor,
            Mnemonic::Adc,
            Mnemonic::Sta,
            Mnemonic::Lda,
            Mnemonic::Cmp,
            Mnemonic::Sbc,
        ];
        for (aaa, mnemonic) in expected.iter().enumerate() {
            let opcode = ((aaa as u8) << 5) | 0b0_0101;
            assert_eq!(classify(opcode).mnemonic(), Some(*mnemonic), "{opcode:02X}");
        }
    }

    #[test]
    fn family_00_index_zero_is_unknown() {
        assert_eq!(classify(0x04), Opcode::Unknown);
        assert_eq!(classify(0x0C), Opcode::Unknown);
        assert_eq!(classify(0x1C), Opcode::Unknown);
    }

    #[test]
    fn family_11_is_unknown() {
        for opcode in (0u8..=255).filter(|op| op & 0b11 == 0b11) {
            assert_eq!(classify(opcode), Opcode::Unknown, "{opcode:02X}");
        }
    }

    #[test]
    fn illegal_mode_keeps_mnemonic() {
        // STX with bbb = 100
        assert_eq!(
            classify(0x92),
            Opcode::Known {
                mnemonic: Mnemonic::Stx,
                mode: None
            }
        );
    }

    #[test]
    fn jmp_appears_twice_in_family_00() {
        assert_eq!(classify(0x4C).mnemonic(), Some(Mnemonic::Jmp));
        assert_eq!(classify(0x6C).mnemonic(), Some(Mnemonic::Jmp));
    }
}
