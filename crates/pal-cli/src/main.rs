//! pal - palette and gradient file converter
//!
//! Reads and writes swatch files in every format `pal-codec` knows.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pal_core::ColorSpace;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pal")]
#[command(author, version, about = "Palette and gradient file converter")]
#[command(long_about = "
Reads, inspects and converts color palettes and gradients.

Examples:
  pal info swatches.ase                     # Show palette contents
  pal info colors.txt --from rgb            # Read a .txt file as a hex list
  pal convert swatches.ase swatches.gpl     # Convert formats
  pal convert in.aco out.xml --colorspace cmyk
  pal gradient sunset.gpl -o sunset.ggr     # Palette to gradient
  pal gradient sunrise.ggr --samples 8      # Sample a gradient
  pal formats                               # List supported formats
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Display palette contents
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert a palette between formats
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Build, convert or sample gradients
    #[command(visible_alias = "g")]
    Gradient(GradientArgs),

    /// List supported formats
    Formats,
}

#[derive(Args)]
struct InfoArgs {
    /// Input palette(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Read with the coder for this extension instead of the file's own
    #[arg(long)]
    from: Option<String>,

    /// Pick the coder from the file contents, falling back to the extension
    #[arg(short, long, conflicts_with = "from")]
    auto: bool,

    /// List every color
    #[arg(short, long)]
    colors: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input palette
    input: PathBuf,

    /// Output palette
    output: PathBuf,

    /// Read with the coder for this extension
    #[arg(long)]
    from: Option<String>,

    /// Write with the coder for this extension
    #[arg(long)]
    to: Option<String>,

    /// Convert every color first: rgb, cmyk, gray
    #[arg(long, value_parser = parse_colorspace)]
    colorspace: Option<ColorSpace>,
}

#[derive(Args)]
struct GradientArgs {
    /// Input gradient, or a palette to spread evenly into one
    input: PathBuf,

    /// Output gradient file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read with the coder for this extension
    #[arg(long)]
    from: Option<String>,

    /// Print this many evenly spaced samples per gradient
    #[arg(short, long)]
    samples: Option<usize>,

    /// Fold transparency stops into the color stops before writing
    #[arg(long)]
    merge_alpha: bool,
}

fn parse_colorspace(s: &str) -> std::result::Result<ColorSpace, String> {
    ColorSpace::from_str(s).ok_or_else(|| format!("unknown colorspace '{s}' (rgb, cmyk, gray, lab)"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Gradient(args) => commands::gradient::run(args, cli.verbose),
        Commands::Formats => commands::formats::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from(["pal", "-vv", "convert", "a.ase", "b.gpl", "--colorspace", "CMYK"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.colorspace, Some(ColorSpace::Cmyk));
                assert!(args.from.is_none());
            }
            _ => panic!("expected convert"),
        }
        assert!(Cli::try_parse_from(["pal", "convert", "a", "b", "--colorspace", "hsv"]).is_err());
    }

    #[test]
    fn test_from_conflicts_with_auto() {
        assert!(Cli::try_parse_from(["pal", "info", "x.txt", "--auto", "--from", "rgb"]).is_err());
    }
}
