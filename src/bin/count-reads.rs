//! A binary that counts the reads in a BAM file overlapping each region of a
//! region table and writes the results as JSON.
//!
//! ```shell
//! cargo run --release --bin=count-reads --features=binaries -- \
//!     --bam sample.bam --bed regions.bed --json counts.json
//! ```
//!
//! If the BAM file has no index alongside it, one is written to
//! `<sample.bam>.bai` before counting.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use clap_verbosity_flag::WarnLevel;
use regioncount::record::CountedRegion;
use regioncount::store::BamStore;
use tracing::error;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The exit code when an input file does not exist.
const EXIT_MISSING_INPUT: u8 = 2;

/// Counts the reads overlapping each region of a region table.
#[derive(Parser)]
struct Args {
    /// The coordinate-sorted BAM file to count reads from.
    #[arg(long = "bam", value_name = "FILE_BAM")]
    bam: PathBuf,

    /// The region table (`.bed` or `.bed.gz`) with the regions to count.
    #[arg(long = "bed", value_name = "FILE_BED")]
    bed: PathBuf,

    /// The file to write the counted regions to.
    #[arg(long = "json", value_name = "FILE_JSON")]
    json: PathBuf,

    /// Writes the JSON on a single line instead of pretty-printing it.
    #[arg(long, default_value_t = false)]
    compact: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// Writes the counted regions to `dst` as a JSON array.
fn write_json(dst: &Path, counted: &[CountedRegion], compact: bool) -> Result<()> {
    let file = File::create(dst).with_context(|| format!("creating {}", dst.display()))?;
    let mut writer = BufWriter::new(file);

    if compact {
        serde_json::to_writer(&mut writer, counted)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, counted)?;
    }

    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Counts the reads and writes the results.
fn run(args: &Args) -> Result<()> {
    let mut store = BamStore::open(&args.bam)
        .with_context(|| format!("opening alignment file {}", args.bam.display()))?;

    let counted = regioncount::count_reads(&args.bed, &mut store)
        .with_context(|| format!("counting reads for regions in {}", args.bed.display()))?;

    info!(
        regions = counted.len(),
        dst = %args.json.display(),
        "writing counted regions"
    );

    write_json(&args.json, &counted, args.compact)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    for (flag, path) in [("--bam", &args.bam), ("--bed", &args.bed)] {
        if !path.is_file() {
            error!("the file given to `{flag}` does not exist: {}", path.display());
            return ExitCode::from(EXIT_MISSING_INPUT);
        }
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
