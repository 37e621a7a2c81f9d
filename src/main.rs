use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use flate2::bufread::GzDecoder;
use flate2::{Compression, GzBuilder};
use fxprof_collapsed_stacks::{convert_with_stats, is_collapsed_stacks_format, ImportProps, Profile};

// Same trade-off between compression time and size as samply's profile output.
const GZIP_COMPRESSION_LEVEL: u32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "fxprof-collapsed",
    version,
    about = r#"
Convert a collapsed stack profile into a profile for the Firefox Profiler.

EXAMPLES:
    # Convert the output of stackcollapse-perf.pl:
    perf script | stackcollapse-perf.pl > out.folded
    fxprof-collapsed out.folded -o profile.json

    # Write a compressed profile:
    fxprof-collapsed out.folded.gz -o profile.json.gz
"#
)]
struct Opt {
    /// Path to the collapsed stack file. Files ending in .gz are decompressed.
    input: PathBuf,

    /// Save the profile to this file. It is gzip-compressed if the name ends in .gz.
    #[arg(short, long, default_value = "profile.json")]
    output: PathBuf,

    /// The product name stored in the profile.
    #[arg(long)]
    product: Option<String>,

    /// The name of the converted thread.
    #[arg(long)]
    thread_name: Option<String>,

    /// The sampling interval stored in the profile, in milliseconds.
    #[arg(long)]
    interval: Option<f64>,

    /// Skip lines whose sample count would push the profile past this many samples.
    #[arg(long)]
    max_samples: Option<u64>,

    /// Convert the input even if its first line does not look like a collapsed stack.
    #[arg(long)]
    force: bool,
}

impl Opt {
    fn import_props(&self) -> ImportProps {
        let defaults = ImportProps::default();
        ImportProps {
            product: self.product.clone().unwrap_or(defaults.product),
            thread_name: self.thread_name.clone().unwrap_or(defaults.thread_name),
            interval_ms: self.interval.unwrap_or(defaults.interval_ms),
            max_samples: self.max_samples.unwrap_or(defaults.max_samples),
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not write the profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Conversion failed: {0}")]
    Convert(#[from] fxprof_collapsed_stacks::Error),

    #[error("{0:?} does not look like a collapsed stack profile; use --force to convert it anyway")]
    NotCollapsedStacks(PathBuf),
}

fn main() {
    env_logger::init();

    let opt = Opt::parse();
    if let Err(err) = run(&opt) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<(), CliError> {
    let text = read_input(&opt.input)?;
    if !opt.force && !is_collapsed_stacks_format(&text) {
        return Err(CliError::NotCollapsedStacks(opt.input.clone()));
    }

    let (profile, stats) = convert_with_stats(&text, &opt.import_props())?;
    if stats.skipped_lines > 0 {
        eprintln!(
            "Skipped {} of {} lines which were not in the collapsed stack format.",
            stats.skipped_lines, stats.lines
        );
    }

    save_profile_to_file(&profile, &opt.output)?;
    log::info!("Saved profile with {} samples to {:?}", stats.samples, opt.output);
    Ok(())
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let reader = BufReader::new(File::open(path)?);
    let mut bytes = Vec::new();
    if path.extension() == Some(OsStr::new("gz")) {
        GzDecoder::new(reader).read_to_end(&mut bytes)?;
    } else {
        let mut reader = reader;
        reader.read_to_end(&mut bytes)?;
    }
    // Invalid UTF-8 sequences turn into U+FFFD instead of failing the whole import.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn save_profile_to_file(profile: &Profile, output_path: &Path) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    if output_path.extension() == Some(OsStr::new("gz")) {
        let name_without_gz = output_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let builder = GzBuilder::new().filename(name_without_gz.as_bytes());
        let gz = builder.write(writer, Compression::new(GZIP_COMPRESSION_LEVEL));
        let mut gz = BufWriter::new(gz);
        serde_json::to_writer(&mut gz, profile)?;
        let gz = gz.into_inner().map_err(|err| err.into_error())?;
        gz.finish()?.flush()?;
    } else {
        serde_json::to_writer(&mut writer, profile)?;
        writer.flush()?;
    }
    Ok(())
}
