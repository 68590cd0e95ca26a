use std::num::IntErrorKind;

use tracing::debug;

use super::error::RomError;

/// A ROM image stored as signed 32-bit words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedRom {
    words: Vec<i32>,
}

impl PackedRom {
    pub fn new(words: Vec<i32>) -> Self {
        PackedRom { words }
    }

    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Size of the unpacked image in bytes.
    pub fn byte_len(&self) -> usize {
        self.words.len() * 4
    }

    /// Reinterpret the words as raw bytes, each word little-endian.
    ///
    /// `-99` unpacks to `9D FF FF FF`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    /// Parse a textual word list such as `[0x6069, -99, 1234]`.
    ///
    /// Words are separated by commas and/or whitespace. Brackets, `//`
    /// line comments and `/* */` block comments are ignored. Each word is
    /// decimal or `0x` hexadecimal with an optional sign; unsigned hex
    /// words up to `0xFFFFFFFF` are taken as two's complement.
    pub fn parse(text: &str) -> Result<Self, RomError> {
        let code = strip_comments(text)?;
        let words = code
            .split(|c: char| c == ',' || c == '[' || c == ']' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .enumerate()
            .map(|(index, token)| parse_word(index, token))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(words = words.len(), "parsed packed ROM");
        Ok(PackedRom { words })
    }
}

impl From<Vec<i32>> for PackedRom {
    fn from(words: Vec<i32>) -> Self {
        PackedRom::new(words)
    }
}

fn strip_comments(text: &str) -> Result<String, RomError> {
    let mut code = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let (start, block) = match (rest.find("//"), rest.find("/*")) {
            (None, None) => break,
            (Some(line), Some(block)) if block < line => (block, true),
            (Some(line), _) => (line, false),
            (None, Some(block)) => (block, true),
        };
        code.push_str(&rest[..start]);
        code.push(' ');

        let after = &rest[start + 2..];
        rest = if block {
            let close = after.find("*/").ok_or(RomError::UnterminatedComment)?;
            &after[close + 2..]
        } else {
            after.find('\n').map_or("", |newline| &after[newline..])
        };
    }

    code.push_str(rest);
    Ok(code)
}

fn parse_word(index: usize, token: &str) -> Result<i32, RomError> {
    let invalid = || RomError::InvalidWord {
        index,
        token: token.to_string(),
    };
    let out_of_range = || RomError::WordOutOfRange {
        index,
        token: token.to_string(),
    };

    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => out_of_range(),
        _ => invalid(),
    })?;

    let value = if negative {
        i64::try_from(magnitude)
            .ok()
            .and_then(|m| i32::try_from(-m).ok())
    } else if radix == 16 {
        // Reinterpret as two's complement, e.g. 0xFFFFFF9D == -99.
        u32::try_from(magnitude).ok().map(|v| v as i32)
    } else {
        i32::try_from(magnitude).ok()
    };
    value.ok_or_else(out_of_range)
}
