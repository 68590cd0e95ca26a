use crate::m6502::instruction::{Instruction, UNKNOWN_INSTRUCTION};

/// Options controlling assembly output formatting.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Use lowercase mnemonics (lda instead of LDA). Hex digits stay uppercase.
    pub lowercase: bool,
}

/// A formatted instruction split into listing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedInstruction {
    /// Hex bytes column (e.g., "6D 0F F0").
    pub hex_bytes: String,
    /// Mnemonic (e.g., "ADC"), or the unknown-instruction marker.
    pub mnemonic: String,
    /// Operand text (e.g., "$F00F"); empty for bare mnemonics.
    pub operands: String,
}

/// Format a decoded instruction into 6502 assembler syntax.
pub fn format_instruction(inst: &Instruction, opts: &FormatOptions) -> FormattedInstruction {
    let hex_bytes = inst
        .raw_bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut mnemonic = inst
        .mnemonic
        .map_or(UNKNOWN_INSTRUCTION, |m| m.name())
        .to_string();
    if opts.lowercase {
        mnemonic = mnemonic.to_lowercase();
    }

    let operands = inst.operand_text().unwrap_or_default();

    FormattedInstruction {
        hex_bytes,
        mnemonic,
        operands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m6502::decode::Decoder;

    fn format(bytes: &[u8], lowercase: bool) -> FormattedInstruction {
        let inst = Decoder::new(bytes).decode_next().unwrap();
        format_instruction(&inst, &FormatOptions { lowercase })
    }

    #[test]
    fn columns() {
        let f = format(&[0x6D, 0x0F, 0xF0], false);
        assert_eq!(f.hex_bytes, "6D 0F F0");
        assert_eq!(f.mnemonic, "ADC");
        assert_eq!(f.operands, "$F00F");
    }

    #[test]
    fn lowercase_keeps_hex_uppercase() {
        let f = format(&[0xA9, 0xAB], true);
        assert_eq!(f.mnemonic, "lda");
        assert_eq!(f.operands, "#$AB");
    }

    #[test]
    fn unknown_opcode_has_no_operand() {
        let f = format(&[0x03], false);
        assert_eq!(f.hex_bytes, "03");
        assert_eq!(f.mnemonic, "???");
        assert!(f.operands.is_empty());
    }
}
