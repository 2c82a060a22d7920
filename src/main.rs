use cacao_geotag::scan::{RecordStatus, ScanSummary};
use cacao_geotag::{GpsStatus, config, extract, output, scan};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cacao-geotag")]
#[command(version)]
#[command(about = "Read GPS coordinates from JPEG EXIF metadata")]
#[command(long_about = "\
Read GPS coordinates from JPEG EXIF metadata

Field photos taken with a phone or camera usually carry the plot location in
their EXIF GPS tags. This tool reads them without decoding the image and
reports signed decimal degrees (negative = South/West).

Files without GPS metadata are normal: they are reported, not treated as
errors. Only JPEG files are inspected; other image types are listed as
skipped.

Settings are read from geotag.toml in the scanned directory (or the current
directory for 'extract'). Run 'cacao-geotag gen-config' for a documented
template.")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). Otherwise RUST_LOG applies.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the GPS coordinate of each file
    Extract {
        /// Image files to read
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print records as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Say why a JPEG has no usable GPS block
        #[arg(long)]
        explain: bool,
    },
    /// Scan a directory of uploads into a JSON manifest
    Scan {
        /// Directory to scan
        #[arg(long, default_value = ".")]
        source: PathBuf,
        /// Where to write the manifest
        #[arg(long, default_value = "geotag-manifest.json")]
        output: PathBuf,
    },
    /// Print a stock geotag.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract {
            files,
            json,
            explain,
        } => {
            let config = config::load_config(Path::new("."))?;
            init_thread_pool(&config.processing);
            let records = scan::extract_files(&files, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                output::print_records(&records, |record| {
                    if !explain || record.gps != RecordStatus::Extracted(GpsStatus::NotFound) {
                        return None;
                    }
                    extract::explain_file(Path::new(&record.path))
                        .ok()
                        .flatten()
                        .map(|reason| reason.to_string())
                });
                println!();
                println!("{}", ScanSummary::from_records(&records));
            }
        }
        Command::Scan {
            source,
            output: manifest_path,
        } => {
            let config = config::load_config(&source)?;
            init_thread_pool(&config.processing);
            println!("==> Scanning {}", source.display());
            let manifest = scan::scan(&source, &config)?;
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
            println!("==> Manifest written to {}", manifest_path.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Send tracing events to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("cacao_geotag=debug"),
        _ => EnvFilter::new("cacao_geotag=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
