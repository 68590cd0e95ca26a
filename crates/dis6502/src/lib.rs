pub mod error;
pub mod m6502;
pub mod output;
pub mod rom;

pub use error::Error;
pub use m6502::addressing::AddressingMode;
pub use m6502::decode::{disassemble, DecodeRange, Decoder};
pub use m6502::instruction::{Instruction, Operand, END_OF_RANGE};
pub use m6502::opcode::{classify, Family, Mnemonic, Opcode};
pub use output::listing::{generate_listing, ListingLine, ListingOptions};
pub use rom::{PackedRom, RomError};

/// Unpack a textual packed-ROM word list straight into image bytes.
pub fn unpack_rom(text: &str) -> Result<Vec<u8>, Error> {
    Ok(PackedRom::parse(text)?.to_bytes())
}
