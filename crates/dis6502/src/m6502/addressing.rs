use super::opcode::Family;

/// 6502 addressing modes.
///
/// Each mode fixes how many operand bytes follow the opcode and how the
/// operand is written in assembler syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand.
    Implied,
    /// `A` — operates on the accumulator.
    Accumulator,
    /// `#$nn`
    Immediate,
    /// `$nn`
    ZeroPage,
    /// `$nn,X`
    ZeroPageX,
    /// `$nn,Y`
    ZeroPageY,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X`
    AbsoluteX,
    /// `$nnnn,Y`
    AbsoluteY,
    /// `($nn,X)` — indexed indirect.
    IndexedIndirect,
    /// `($nn),Y` — indirect indexed.
    IndirectIndexed,
    /// `$nn` — signed branch offset, printed raw.
    Relative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_width(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute | AddressingMode::AbsoluteX | AddressingMode::AbsoluteY => 2,
        }
    }

    /// Render the operand text for `value`.
    ///
    /// One-byte modes print two hex digits, absolute modes four. Returns
    /// `None` for implied mode, which has no operand text at all.
    pub fn render(self, value: u16) -> Option<String> {
        let text = match self {
            AddressingMode::Implied => return None,
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Immediate => format!("#${value:02X}"),
            AddressingMode::ZeroPage | AddressingMode::Relative => format!("${value:02X}"),
            AddressingMode::ZeroPageX => format!("${value:02X},X"),
            AddressingMode::ZeroPageY => format!("${value:02X},Y"),
            AddressingMode::Absolute => format!("${value:04X}"),
            AddressingMode::AbsoluteX => format!("${value:04X},X"),
            AddressingMode::AbsoluteY => format!("${value:04X},Y"),
            AddressingMode::IndexedIndirect => format!("(${value:02X},X)"),
            AddressingMode::IndirectIndexed => format!("(${value:02X}),Y"),
        };
        Some(text)
    }
}

impl std::fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AddressingMode::Implied => "implied",
            AddressingMode::Accumulator => "accumulator",
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zero-page",
            AddressingMode::ZeroPageX => "zero-page,X",
            AddressingMode::ZeroPageY => "zero-page,Y",
            AddressingMode::Absolute => "absolute",
            AddressingMode::AbsoluteX => "absolute,X",
            AddressingMode::AbsoluteY => "absolute,Y",
            AddressingMode::IndexedIndirect => "(indirect,X)",
            AddressingMode::IndirectIndexed => "(indirect),Y",
            AddressingMode::Relative => "relative",
        };
        f.write_str(name)
    }
}

// ─── Per-family mode tables, indexed by bits 4-2 ─────────────────────

const FAMILY_00_MODES: [Option<AddressingMode>; 8] = [
    Some(AddressingMode::Immediate),
    Some(AddressingMode::ZeroPage),
    None,
    Some(AddressingMode::Absolute),
    None,
    Some(AddressingMode::ZeroPageX),
    None,
    Some(AddressingMode::AbsoluteX),
];

const FAMILY_01_MODES: [Option<AddressingMode>; 8] = [
    Some(AddressingMode::IndexedIndirect),
    Some(AddressingMode::ZeroPage),
    Some(AddressingMode::Immediate),
    Some(AddressingMode::Absolute),
    Some(AddressingMode::IndirectIndexed),
    Some(AddressingMode::ZeroPageX),
    Some(AddressingMode::AbsoluteY),
    Some(AddressingMode::AbsoluteX),
];

const FAMILY_10_MODES: [Option<AddressingMode>; 8] = [
    Some(AddressingMode::Immediate),
    Some(AddressingMode::ZeroPage),
    Some(AddressingMode::Accumulator),
    Some(AddressingMode::Absolute),
    None,
    Some(AddressingMode::ZeroPageX),
    None,
    Some(AddressingMode::AbsoluteX),
];

/// Resolve a 3-bit addressing-mode index for `family`.
///
/// Returns `None` for bit patterns that have no meaning in the family;
/// callers render those as an unknown operand instead of failing.
pub const fn resolve(family: Family, index: u8) -> Option<AddressingMode> {
    let index = (index & 0b111) as usize;
    match family {
        Family::Group00 => FAMILY_00_MODES[index],
        Family::Group01 => FAMILY_01_MODES[index],
        Family::Group10 => FAMILY_10_MODES[index],
        Family::Group11 => None,
    }
}
