use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "replac")]
#[command(author = "NellowTCS")]
#[command(version)]
#[command(about = "Lossless converter between 8 kHz 8-bit mono WAV and PLAC", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// File to convert: .wav is encoded to .plac, .plac is decoded to .wav
    input: PathBuf,
    /// Show information about a .plac file instead of converting it
    #[arg(long)]
    info: bool,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if shows_help(&e) => {
            let _ = Cli::command().print_help();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// wrong number of positionals gets the full help instead of a one-line error
fn shows_help(e: &clap::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::UnknownArgument | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if cli.info {
        info(cli)
    } else {
        convert(cli)
    }
}

fn convert(cli: &Cli) -> Result<()> {
    if !cli.json {
        println!("Reading {}...", cli.input.display());
    }

    let report = replac::convert_file(&cli.input)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    let (label, ratio_name) = match report.session.direction {
        replac::Direction::Encode => ("Encoded", "compressed/original"),
        replac::Direction::Decode => ("Decoded", "original/compressed"),
    };
    println!("{} {} samples", label, report.session.original_bytes);
    println!("  Output:  {}", report.output.display());
    println!("  Time:    {:.3}s", report.elapsed_secs);
    println!("  Ratio:   {:.3} ({})", report.ratio, ratio_name);

    Ok(())
}

fn info(cli: &Cli) -> Result<()> {
    let info = replac::inspect_file(&cli.input)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize info")?;
        println!("{}", json);
        return Ok(());
    }

    println!("PLAC Audio File");
    println!("───────────────────────────────");
    println!("  Version:       {}", info.version);
    println!("  Sample rate:   {} Hz", info.sample_rate);
    println!("  Duration:      {:.2}s", info.duration_secs);
    println!("  Frames:        {}", info.frames);
    println!("  Raw tail:      {} bytes", info.tail_len);
    println!("  Original:      {} bytes", info.original_data_size);
    println!("  Compressed:    {} bytes", info.compressed_data_size);
    println!("  File size:     {} bytes", info.file_size);
    println!("  Compression:   {:.2}x", info.compression_ratio);

    Ok(())
}
