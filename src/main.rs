//! IWI CLI - Command-line tool for Call of Duty IWI textures.
//!
//! This is the main entry point for the `iwi` command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn, Level};
use walkdir::WalkDir;

use iwi::{Iwi, MipTable};

/// IWI - Call of Duty texture extraction tool
#[derive(Parser)]
#[command(name = "iwi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log level, overrides -v and -q (error, warn, info, debug, trace)
    #[arg(long, env = "IWI_LOG", global = true)]
    log_level: Option<Level>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header, pixel format and mip table of an IWI file
    Info {
        /// Input IWI file
        #[arg(short, long, env = "IWI_INPUT")]
        input: PathBuf,
    },

    /// Extract the largest mip level of an IWI file
    Extract {
        /// Input IWI file
        #[arg(short, long, env = "IWI_INPUT")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, env = "IWI_OUTPUT")]
        output: PathBuf,

        /// Wrap the payload in a DDS container
        #[arg(long)]
        dds: bool,
    },

    /// Extract every IWI file below a directory
    Batch {
        /// Input directory
        #[arg(short, long, env = "IWI_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "IWI_OUTPUT")]
        output: PathBuf,

        /// Filter pattern (glob-style, relative to the input directory)
        #[arg(short, long)]
        filter: Option<String>,

        /// Wrap payloads in DDS containers
        #[arg(long)]
        dds: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Extract { input, output, dds } => {
            cmd_extract(&input, &output, dds)?;
        }
        Commands::Batch {
            input,
            output,
            filter,
            dds,
        } => {
            cmd_batch(&input, &output, filter.as_deref(), dds)?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = cli.log_level.unwrap_or(match (cli.quiet, cli.verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    });

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let (image, table) = Iwi::parse_with_mips(&data).context("Failed to decode IWI")?;

    let header = image.header();
    let games: Vec<&str> = header.games().map(|g| g.name()).collect();
    let info = image.info();

    println!("File:    {}", input.display());
    println!("Version: {:#04x} ({})", header.version, games.join(", "));
    println!(
        "Layout:  {} (table at {:#x}, {} entries)",
        table.layout,
        table.table_start,
        table.raw_offsets.len()
    );
    match info.format() {
        Some(format) => println!("Format:  {} ({:#04x})", format, info.format),
        None => println!("Format:  unknown ({:#04x})", info.format),
    }
    println!("Usage:   {:#04x}", info.usage);
    println!("Size:    {}x{}x{}", info.width, info.height, info.depth);

    print_mip_table(&table);

    println!("\nData: {} bytes", image.data().len());

    Ok(())
}

fn print_mip_table(table: &MipTable) {
    println!("\n{:>3} {:>12} {:>12} {:>12}", "#", "raw", "offset", "size");
    for (index, (raw, entry)) in table.raw_offsets.iter().zip(&table.entries).enumerate() {
        println!(
            "{:>3} {:>12} {:>12} {:>12}{}",
            index,
            raw,
            entry.offset,
            entry.size,
            if index == table.selected { "  *" } else { "" }
        );
    }
}

fn cmd_extract(input: &Path, output: &Path, dds: bool) -> Result<()> {
    println!("Extracting: {} -> {}", input.display(), output.display());

    let bytes = extract_file(input, output, dds)?;

    println!("Wrote {} bytes", bytes);

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, filter: Option<&str>, dds: bool) -> Result<()> {
    let pattern = filter
        .map(glob::Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;

    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_iwi_path(entry.path()))
        .map(|entry| entry.into_path())
        .filter(|path| {
            pattern
                .as_ref()
                .map_or(true, |p| p.matches_path(relative_to(path, input)))
        })
        .collect();

    println!("Extracting {} files to {}...", files.len(), output.display());

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let errors = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let extension = if dds { "dds" } else { "bin" };
        let output_path = output.join(relative_to(path, input)).with_extension(extension);

        match extract_file(path, &output_path, dds) {
            Ok(bytes) => debug!("Extracted {} ({} bytes)", path.display(), bytes),
            Err(e) => {
                warn!("Error extracting {}: {:#}", path.display(), e);
                errors.fetch_add(1, Ordering::Relaxed);
            }
        }

        pb.inc(1);
    });

    pb.finish_with_message("Done");

    let errors = errors.into_inner();
    println!(
        "Extracted {} files in {:?} ({} errors)",
        files.len() - errors,
        start.elapsed(),
        errors
    );

    Ok(())
}

/// Decode `input` and write its largest mip level to `output`.
fn extract_file(input: &Path, output: &Path, dds: bool) -> Result<usize> {
    let image = Iwi::open(input).with_context(|| format!("Failed to decode {}", input.display()))?;

    let bytes = if dds {
        image.to_dds().context("Failed to build DDS")?
    } else {
        image.into_data()
    };

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &bytes).context("Failed to write output file")?;

    Ok(bytes.len())
}

fn is_iwi_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("iwi"))
}

/// Path of `path` below `base`, or its file name when `base` is the file
/// itself or not a prefix.
fn relative_to<'a>(path: &'a Path, base: &Path) -> &'a Path {
    match path.strip_prefix(base) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => path.file_name().map(Path::new).unwrap_or(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_iwi_path() {
        assert!(is_iwi_path(Path::new("images/hud.iwi")));
        assert!(is_iwi_path(Path::new("images/HUD.IWI")));
        assert!(!is_iwi_path(Path::new("images/hud.dds")));
        assert!(!is_iwi_path(Path::new("images/iwi")));
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/game/images");
        assert_eq!(relative_to(Path::new("/game/images/ui/a.iwi"), base), Path::new("ui/a.iwi"));
        assert_eq!(relative_to(Path::new("/other/a.iwi"), base), Path::new("a.iwi"));
    }

    #[test]
    fn test_relative_to_single_file() {
        let input = Path::new("/game/images/hud.iwi");
        let relative = relative_to(input, input);
        assert_eq!(relative, Path::new("hud.iwi"));

        let output = Path::new("/out").join(relative).with_extension("bin");
        assert_eq!(output, Path::new("/out/hud.bin"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["iwi", "-vv", "extract", "-i", "a.iwi", "-o", "a.dds", "--dds"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Extract { dds: true, .. }));

        let cli = Cli::try_parse_from(["iwi", "batch", "-i", "in", "-o", "out", "-f", "ui/*.iwi"]).unwrap();
        assert!(matches!(cli.command, Commands::Batch { filter: Some(ref f), dds: false, .. } if f == "ui/*.iwi"));
    }
}
