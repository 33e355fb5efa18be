use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use duocore_asm::{load_raw_bin, Report};
use duocore_rs::disasm::disassemble;
use duocore_rs::dump::{hex_bytes, hex_dump};
use duocore_rs::Unit;

#[derive(Parser, Debug)]
#[command(author, version, about = "duocore assembler toolbox", long_about = None)]
struct Cli {
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a source file into a raw byte image
    Assemble {
        /// Input assembly file
        #[arg(value_name = "ASMFILE")]
        input: PathBuf,
        /// Output binary file (default: input with .bin extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also print the bytes as `0x..` values
        #[arg(long)]
        print: bool,
    },
    /// List label addresses
    Symbols {
        #[arg(value_name = "ASMFILE")]
        input: PathBuf,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Address/byte listing of every source line
    Listing {
        #[arg(value_name = "ASMFILE")]
        input: PathBuf,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Hex/ASCII dump of a binary
    Dump {
        #[arg(value_name = "BINFILE")]
        input: PathBuf,
        /// Skip N bytes at start of file
        #[arg(long, default_value_t = 0usize)]
        skip: usize,
        /// Limit bytes loaded (default: to EOF after --skip)
        #[arg(long)]
        len: Option<usize>,
    },
    /// Disassemble a binary as code for one unit
    Disasm {
        #[arg(value_name = "BINFILE")]
        input: PathBuf,
        /// Unit whose opcode table is used (cpu or gpu)
        #[arg(long, default_value = "cpu")]
        unit: Unit,
        /// Skip N bytes at start of file
        #[arg(long, default_value_t = 0usize)]
        skip: usize,
        /// Limit bytes loaded (default: to EOF after --skip)
        #[arg(long)]
        len: Option<usize>,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn report_for(path: &Path) -> Result<Report> {
    let source = std::fs::read_to_string(path)?;
    Ok(Report::from_source(&source)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Assemble { input, output, print } => {
            let report = report_for(&input)?;
            let output = output.unwrap_or_else(|| input.with_extension("bin"));
            std::fs::write(&output, &report.bytes)?;
            if print {
                println!("{}", hex_bytes(&report.bytes));
            }
        }
        Command::Symbols { input, format } => {
            let report = report_for(&input)?;
            match format {
                OutputFormat::Text => print!("{}", report.render_symbols()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.symbols)?),
            }
        }
        Command::Listing { input, show_bytes, format, out } => {
            let report = report_for(&input)?;
            let buf = match format {
                OutputFormat::Text => report.render_listing(show_bytes),
                OutputFormat::Json => serde_json::to_string_pretty(&report.listing)?,
            };
            if let Some(path) = out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
        }
        Command::Dump { input, skip, len } => {
            let img = load_raw_bin(&input, skip, len)?;
            print!("{}", hex_dump(&img.bytes));
        }
        Command::Disasm { input, unit, skip, len, show_bytes } => {
            let img = load_raw_bin(&input, skip, len)?;
            let mut buf = String::new();
            for line in disassemble(&img.bytes, unit) {
                let pc = img.base + line.addr;
                if show_bytes {
                    let _ = write!(buf, "{pc:#06x}: ");
                    for b in &line.bytes { let _ = write!(buf, "{:02x} ", b); }
                    let _ = writeln!(buf, "  {}", line.text);
                } else {
                    let _ = writeln!(buf, "{pc:#06x}: {}", line.text);
                }
            }
            print!("{}", buf);
        }
    }
    Ok(())
}
