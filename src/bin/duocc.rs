use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use duocore_rs::{build, dump::hex_dump, Compiler, CompilerConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compile a high-level program to a CPU/GPU byte image"
)]
struct Opts {
    /// High-level source file
    #[arg(value_name = "SRCFILE")]
    input: PathBuf,
    /// Output binary file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write the generated assembly text here
    #[arg(long, value_name = "FILE")]
    emit_asm: Option<PathBuf>,
    /// Compiler settings as JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Fail when any statement was dropped
    #[arg(long)]
    strict: bool,
    /// Print a hex/ASCII dump of the result
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let cfg: CompilerConfig = match &opts.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => CompilerConfig::default(),
    };

    let source = std::fs::read_to_string(&opts.input)?;
    let out = build(&Compiler::new(cfg), &source)?;

    for d in &out.diagnostics {
        eprintln!("{}:{}: {:?}: {}", opts.input.display(), d.line, d.kind, d.text);
    }
    anyhow::ensure!(
        !opts.strict || out.diagnostics.is_empty(),
        "{} statement(s) dropped",
        out.diagnostics.len()
    );

    if let Some(path) = &opts.emit_asm {
        std::fs::write(path, &out.assembly)?;
    }
    let output = opts.output.unwrap_or_else(|| opts.input.with_extension("bin"));
    std::fs::write(&output, &out.bytes)?;
    if opts.dump {
        print!("{}", hex_dump(&out.bytes));
    }
    Ok(())
}
