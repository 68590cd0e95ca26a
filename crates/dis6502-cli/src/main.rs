use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dis6502::{generate_listing, Decoder, ListingOptions, PackedRom};

/// MOS 6502 machine code disassembler
#[derive(Parser)]
#[command(name = "dis6502", version, about)]
struct Cli {
    /// Input image: raw binary, or a word list with --packed
    input: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the input as a text list of signed 32-bit words (little-endian)
    #[arg(long)]
    packed: bool,

    /// First byte offset to decode (decimal or 0x hex)
    #[arg(long, value_parser = parse_offset)]
    start: Option<usize>,

    /// Offset one past the last byte to decode (decimal or 0x hex)
    #[arg(long, value_parser = parse_offset)]
    end: Option<usize>,

    /// Load address of the first byte of the image
    #[arg(long, value_parser = parse_address, default_value = "0")]
    base: u16,

    /// Print bare instruction text only, ending with .END
    #[arg(long)]
    plain: bool,

    /// Hide hex byte dump column
    #[arg(long)]
    no_hex: bool,

    /// Hide line numbers
    #[arg(long)]
    no_line_numbers: bool,

    /// Hide the address column
    #[arg(long)]
    no_addresses: bool,

    /// Use lowercase mnemonics (lda instead of LDA)
    #[arg(long)]
    lowercase: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_offset(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid offset '{s}': {e}"))
}

fn parse_address(s: &str) -> Result<u16, String> {
    let value = parse_offset(s)?;
    u16::try_from(value).map_err(|_| format!("address '{s}' does not fit in 16 bits"))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_image(cli: &Cli) -> Result<Vec<u8>> {
    let path = cli.input.display();
    if cli.packed {
        let text = std::fs::read_to_string(&cli.input)
            .with_context(|| format!("reading '{path}'"))?;
        let rom = PackedRom::parse(&text).with_context(|| format!("parsing '{path}'"))?;
        info!(words = rom.words().len(), "unpacked ROM");
        Ok(rom.to_bytes())
    } else {
        std::fs::read(&cli.input).with_context(|| format!("reading '{path}'"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data = load_image(&cli)?;
    info!(path = %cli.input.display(), bytes = data.len(), "loaded image");

    let decoder = Decoder::with_range(&data, cli.start, cli.end);

    let output_text: String = if cli.plain {
        decoder
            .decode_all()
            .iter()
            .map(|text| format!("{text}\n"))
            .collect()
    } else {
        let options = ListingOptions {
            show_hex: !cli.no_hex,
            show_addresses: !cli.no_addresses,
            show_line_numbers: !cli.no_line_numbers,
            lowercase: cli.lowercase,
            base_address: cli.base,
        };
        generate_listing(decoder, &options)
            .iter()
            .map(|l| format!("{}\n", l.text))
            .collect()
    };

    if let Some(path) = &cli.output {
        std::fs::write(path, &output_text)
            .with_context(|| format!("writing '{}'", path.display()))?;
    } else {
        print!("{output_text}");
    }

    Ok(())
}
