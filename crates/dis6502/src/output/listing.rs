use crate::m6502::decode::Decoder;
use crate::m6502::instruction::END_OF_RANGE;

use super::formatter::{format_instruction, FormatOptions};

/// Options controlling the listing output.
#[derive(Debug, Clone)]
pub struct ListingOptions {
    pub show_hex: bool,
    pub show_addresses: bool,
    pub show_line_numbers: bool,
    pub lowercase: bool,
    /// Address of byte 0 of the buffer; addresses wrap at 64K.
    pub base_address: u16,
}

impl Default for ListingOptions {
    fn default() -> Self {
        ListingOptions {
            show_hex: true,
            show_addresses: true,
            show_line_numbers: true,
            lowercase: false,
            base_address: 0,
        }
    }
}

/// A single line of the disassembly listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub line_number: u32,
    pub text: String,
}

/// Generate a disassembly listing by draining `decoder`.
///
/// Emits a short header, one line per decoded instruction with its
/// address and raw bytes, and a closing `.END` line at the address where
/// decoding stopped.
#[tracing::instrument(level = "debug", skip_all, fields(start = decoder.range().start, end = decoder.range().end))]
pub fn generate_listing(decoder: Decoder<'_>, options: &ListingOptions) -> Vec<ListingLine> {
    let mut lines = Vec::new();
    let mut line_num: u32 = 1;

    let fmt_opts = FormatOptions {
        lowercase: options.lowercase,
    };

    let range = decoder.range();
    push_line(
        &mut lines,
        &mut line_num,
        options,
        "; 6502 Disassembly".to_string(),
    );
    push_line(
        &mut lines,
        &mut line_num,
        options,
        format!(
            "; Range: ${:04X}-${:04X} ({} bytes)",
            address_of(range.start, options),
            address_of(range.end, options),
            range.len()
        ),
    );
    push_line(&mut lines, &mut line_num, options, String::new());

    let mut end = range.start;
    for inst in decoder {
        let formatted = format_instruction(&inst, &fmt_opts);
        let text = format_code_line(
            address_of(inst.offset, options),
            &formatted.hex_bytes,
            &formatted.mnemonic,
            &formatted.operands,
            options,
        );
        push_line(&mut lines, &mut line_num, options, text);
        end = inst.offset + inst.size_bytes();
    }

    let text = format_code_line(address_of(end, options), "", END_OF_RANGE, "", options);
    push_line(&mut lines, &mut line_num, options, text);

    lines
}

fn address_of(offset: usize, options: &ListingOptions) -> u16 {
    options.base_address.wrapping_add(offset as u16)
}

fn format_code_line(
    address: u16,
    hex: &str,
    mnemonic: &str,
    operands: &str,
    options: &ListingOptions,
) -> String {
    let mut parts = Vec::new();

    if options.show_addresses {
        parts.push(format!("{address:04X}"));
    }

    if options.show_hex {
        parts.push(format!("{hex:<8}"));
    }

    if operands.is_empty() {
        parts.push(mnemonic.to_string());
    } else {
        parts.push(format!("{mnemonic} {operands}"));
    }

    parts.join("  ")
}

fn push_line(
    lines: &mut Vec<ListingLine>,
    line_num: &mut u32,
    options: &ListingOptions,
    text: String,
) {
    let display_text = if options.show_line_numbers {
        format!("{:5}  {text}", *line_num)
    } else {
        text
    };
    lines.push(ListingLine {
        line_number: *line_num,
        text: display_text.trim_end().to_string(),
    });
    *line_num += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare() -> ListingOptions {
        ListingOptions {
            show_hex: false,
            show_addresses: false,
            show_line_numbers: false,
            ..ListingOptions::default()
        }
    }

    fn body(lines: &[ListingLine]) -> Vec<&str> {
        lines[3..].iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn bare_listing_matches_decode_all() {
        let bytes = [0xA2, 0x00, 0xE8, 0xD0, 0xFD, 0x00];
        let lines = generate_listing(Decoder::new(&bytes), &bare());
        assert_eq!(
            body(&lines),
            Decoder::new(&bytes).decode_all().iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn full_columns() {
        let bytes = [0xA9, 0x01, 0x60];
        let options = ListingOptions {
            base_address: 0xC000,
            ..ListingOptions::default()
        };
        let lines = generate_listing(Decoder::new(&bytes), &options);
        assert_eq!(lines[1].text, "    2  ; Range: $C000-$C003 (3 bytes)");
        assert_eq!(lines[3].text, "    4  C000  A9 01     LDA #$01");
        assert_eq!(lines[4].text, "    5  C002  60        RTS");
        assert_eq!(lines[5].text, "    6  C003            .END");
        assert_eq!(lines[5].line_number, 6);
    }

    #[test]
    fn addresses_follow_sub_range() {
        let bytes = [0xEA, 0xEA, 0xE8, 0xC8];
        let options = ListingOptions {
            show_hex: false,
            show_line_numbers: false,
            ..ListingOptions::default()
        };
        let lines = generate_listing(Decoder::with_range(&bytes, Some(2), None), &options);
        assert_eq!(body(&lines), vec!["0002  INX", "0003  INY", "0004  .END"]);
    }

    #[test]
    fn addresses_wrap() {
        let options = ListingOptions {
            base_address: 0xFFFF,
            show_hex: false,
            show_line_numbers: false,
            ..ListingOptions::default()
        };
        let lines = generate_listing(Decoder::new(&[0xEA, 0xEA]), &options);
        assert_eq!(body(&lines), vec!["FFFF  NOP", "0000  NOP", "0001  .END"]);
    }

    #[test]
    fn empty_range_lists_only_end() {
        let lines = generate_listing(Decoder::new(&[]), &bare());
        assert_eq!(body(&lines), vec![".END"]);
    }
}
