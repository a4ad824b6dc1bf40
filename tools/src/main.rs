// Convert the colormap of drought-index metadata files (e.g.
// `VHI.json`) to GDAL color-relief tables, written next to them as
// `VHI-colormap.txt`.  Use the result with
//     gdaldem color-relief -alpha VHI.tif VHI-colormap.txt VHI-rgba.tif

use std::{ffi::OsString,
          fs::{self, File},
          io::{self, BufWriter, Write},
          path::{Path, PathBuf},
          process::ExitCode};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{error::ErrorKind, CommandFactory, Parser};
use color_relief::{convert, parse_timestamp, try_parse_color,
                   ColorMetadata, ColorRelief};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "color-relief", version)]
#[command(about = "Convert drought-index colormap metadata to GDAL color-relief tables")]
struct Args {
    /// Metadata JSON files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input only) [default: <short_name>-colormap.txt
    /// next to the input]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the table instead of writing it
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Date written in the header (RFC 3339) [default: now]
    #[arg(long)]
    date: Option<String>,

    /// Date as seconds since the epoch, used when --date is absent
    #[arg(long, env = "SOURCE_DATE_EPOCH", hide = true)]
    source_date_epoch: Option<i64>,

    /// Log level
    #[arg(long, env = "COLOR_RELIEF_LOG", default_value = "warn")]
    log_level: String,
}

fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("color-relief: cannot install logger: {e}");
    }
}

/// The header date: `--date`, then `SOURCE_DATE_EPOCH`, then the clock.
fn header_date(args: &Args) -> Result<DateTime<Utc>> {
    if let Some(d) = &args.date {
        return Ok(parse_timestamp(d)?)
    }
    if let Some(secs) = args.source_date_epoch {
        return DateTime::from_timestamp(secs, 0)
            .with_context(|| format!("SOURCE_DATE_EPOCH out of range: {secs}"))
    }
    Ok(Utc::now())
}

fn missing_inputs(args: &Args) -> Vec<&Path> {
    args.inputs.iter().map(PathBuf::as_path).filter(|p| !p.is_file()).collect()
}

fn convert_file(path: &Path, now: DateTime<Utc>) -> Result<ColorRelief> {
    let bytes = fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let metadata = ColorMetadata::from_slice(&bytes)?;
    for s in metadata.stops.iter() {
        if try_parse_color(&s.color).is_none() {
            warn!(input = %path.display(), value = %s.value, color = %s.color,
                  "unrecognized color, using opaque black");
        }
    }
    let source = path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(convert(&metadata, &source, now)?)
}

fn write_relief(relief: &ColorRelief, path: &Path) -> io::Result<()> {
    let mut fh = BufWriter::new(File::create(path)?);
    write!(fh, "{relief}")?;
    fh.flush()
}

/// Convert all inputs, reporting on `out`.  Returns `false` if some
/// input could not be converted or written; the others are still
/// processed.
fn run(args: &Args, out: &mut impl Write) -> Result<bool> {
    if args.output.is_some() && args.inputs.len() > 1 {
        bail!("--output requires a single input");
    }
    let now = header_date(args)?;
    debug!(date = %now, "header date");
    let mut all_ok = true;
    for input in &args.inputs {
        let relief = match convert_file(input, now) {
            Ok(r) => r,
            Err(e) => {
                error!(input = %input.display(), "{e:#}");
                eprintln!("Error: {e:#}");
                all_ok = false;
                continue
            }
        };
        if args.stdout {
            writeln!(out, "{relief}")?;
            continue
        }
        let output = match &args.output {
            Some(o) => o.clone(),
            None => relief.output_path(input),
        };
        if let Err(e) = write_relief(&relief, &output) {
            error!(input = %input.display(), output = %output.display(), "{e}");
            eprintln!("Error: writing {}: {e}", output.display());
            all_ok = false;
            continue
        }
        info!(input = %input.display(), output = %output.display(),
              stops = relief.len(), "color relief written");
        writeln!(out, "✓ Converted colormap for {}\n  \
                       Input: {}\n  \
                       Output: {}\n  \
                       Color stops: {}",
                 relief.short_name(), input.display(), output.display(),
                 relief.len())?;
    }
    Ok(all_ok)
}

/// Parse `argv` and convert, returning the exit status: 0 on success,
/// 1 on bad usage, missing inputs or failed conversions.
fn real_main<I, T>(argv: I, out: &mut impl Write) -> u8
where I: IntoIterator<Item = T>, T: Into<OsString> + Clone {
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(),
                           ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return 0
        }
        Err(e) => {
            eprintln!("{e}");
            return 1
        }
    };
    init_tracing(&args.log_level);

    let missing = missing_inputs(&args);
    if !missing.is_empty() {
        for p in missing {
            eprintln!("error: file not found: {}", p.display());
        }
        eprintln!("\n{}", Args::command().render_usage());
        return 1
    }

    match run(&args, out) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    }
}

fn main() -> ExitCode {
    let stdout = io::stdout();
    ExitCode::from(real_main(std::env::args_os(), &mut stdout.lock()))
}
