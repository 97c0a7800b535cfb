use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tilepack::{
    decoded_length, encoded_length,
    io_utils::{simple_cli_error, tilepack_cli_error, CliError},
    ByteSource, Config, TileReader, TileWriter, WidthPattern,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pack and unpack integers of repeating bit-widths.
#[derive(Parser)]
#[command(name = "tilepack")]
struct Cli {
    /// JSON config file holding the width pattern
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every byte range read or written
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode packed values from a file
    Decode {
        /// Packed input file
        input: PathBuf,
        /// Comma separated slot widths, e.g. 3,2,9
        #[arg(short, long)]
        pattern: Option<WidthPattern>,
        /// Bytes to decode (defaults to the config value, then the whole file)
        #[arg(short, long)]
        bytes: Option<u64>,
        /// Write one CSV record per pattern cycle to this file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Encode values into a packed file
    Encode {
        /// Packed output file
        output: PathBuf,
        #[arg(short, long)]
        pattern: Option<WidthPattern>,
        /// Comma separated values
        #[arg(long, conflicts_with = "values_file")]
        values: Option<String>,
        /// File of comma or whitespace separated values
        #[arg(long)]
        values_file: Option<PathBuf>,
    },
    /// Predict decoded and encoded lengths
    Lengths {
        #[arg(short, long)]
        pattern: Option<WidthPattern>,
        /// Input size in bytes for the decode prediction
        #[arg(long)]
        bytes: Option<usize>,
        /// Value count for the encode prediction
        #[arg(long)]
        values: Option<usize>,
    },
    /// Decode a file with pattern 3,2,9 and encode a fixed sample to another
    Demo {
        #[arg(short, long, default_value = "infileExample.bin")]
        input: PathBuf,
        #[arg(short, long, default_value = "outfileExample.bin")]
        output: PathBuf,
    },
}

const DEMO_PATTERN: [u8; 3] = [3, 2, 9];
const DEMO_VALUES: [u16; 6] = [7, 3, 483, 7, 2, 510];

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Some(
            Config::load(path).map_err(|e| tilepack_cli_error("loading config", path, e))?,
        ),
        None => None,
    };

    match cli.command {
        Commands::Decode {
            input,
            pattern,
            bytes,
            csv,
            json,
        } => {
            let pattern = resolve_pattern(pattern, config.as_ref())?;
            let bytes = bytes.or(config.as_ref().and_then(|c| c.byte_count));
            run_decode(&input, &pattern, bytes, csv.as_deref(), json)
        }
        Commands::Encode {
            output,
            pattern,
            values,
            values_file,
        } => {
            let pattern = resolve_pattern(pattern, config.as_ref())?;
            let text = match (values, values_file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .map_err(|e| tilepack_cli_error("reading values", &path, e.into()))?,
                (None, None) => {
                    return Err(
                        simple_cli_error("no values given; use --values or --values-file").into(),
                    )
                }
            };
            let values = parse_values(&text)?;
            run_encode(&output, &pattern, &values)
        }
        Commands::Lengths {
            pattern,
            bytes,
            values,
        } => {
            let pattern = resolve_pattern(pattern, config.as_ref())?;
            println!("pattern: {pattern} ({} bits per cycle)", pattern.cycle_bits());
            if let Some(n) = bytes {
                println!("decoded length of {n} bytes: {}", decoded_length(&pattern, n));
            }
            if let Some(n) = values {
                println!("encoded length of {n} values: {} bytes", encoded_length(&pattern, n));
            }
            Ok(())
        }
        Commands::Demo { input, output } => run_demo(&input, &output),
    }
}

/// `RUST_LOG` wins when set; otherwise `--verbose` picks the level.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "tilepack=debug" } else { "tilepack=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_pattern(
    flag: Option<WidthPattern>,
    config: Option<&Config>,
) -> Result<WidthPattern, CliError> {
    flag.or_else(|| config.map(|c| c.pattern.clone()))
        .ok_or_else(|| simple_cli_error("no width pattern given; use --pattern or --config"))
}

fn parse_values(text: &str) -> Result<Vec<u16>, CliError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u16>()
                .map_err(|_| simple_cli_error(&format!("invalid value '{part}'")))
        })
        .collect()
}

fn run_decode(
    input: &Path,
    pattern: &WidthPattern,
    bytes: Option<u64>,
    csv_path: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = |e| tilepack_cli_error("decoding", input, e);
    let mut reader = TileReader::open(input).map_err(ctx)?;
    let n = match bytes {
        Some(n) => n,
        None => reader.size().map_err(ctx)?,
    };
    let values = reader.read_tiles(n as usize, pattern).map_err(ctx)?;
    info!(bytes = n, values = values.len(), "decoded");

    if let Some(path) = csv_path {
        write_csv(path, pattern, &values)?;
    }
    if json {
        let out = serde_json::json!({
            "pattern": pattern.widths(),
            "bytes": n,
            "values": values,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let line: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn write_csv(path: &Path, pattern: &WidthPattern, values: &[u16]) -> Result<(), CliError> {
    let wrap = |e: csv::Error| simple_cli_error(&format!("Error writing CSV '{}': {e}", path.display()));
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .map_err(wrap)?;
    for cycle in values.chunks(pattern.len()) {
        writer
            .write_record(cycle.iter().map(|v| v.to_string()))
            .map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}

fn run_encode(
    output: &Path,
    pattern: &WidthPattern,
    values: &[u16],
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = |e| tilepack_cli_error("encoding", output, e);
    let mut writer = TileWriter::create(output).map_err(ctx)?;
    let written = writer.write_tiles(values, pattern).map_err(ctx)?;
    writer.close().map_err(ctx)?;
    info!(values = values.len(), bytes = written, "encoded");
    let bytes = fs::read(output).map_err(|e| tilepack_cli_error("reading back", output, e.into()))?;
    println!("{written} bytes: {}", hex::encode(bytes));
    Ok(())
}

fn run_demo(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pattern = WidthPattern::new(DEMO_PATTERN.to_vec())?;
    println!("infile: {}", input.display());
    println!("outfile: {}", output.display());

    let ctx = |e| tilepack_cli_error("decoding", input, e);
    let mut reader = TileReader::open(input).map_err(ctx)?;
    let size = reader.size().map_err(ctx)?;
    let decoded = reader.read_tiles(size as usize, &pattern).map_err(ctx)?;
    println!("input size: {size} bytes, decoded {} values", reader.last_len());
    let line: Vec<String> = decoded.iter().map(|v| v.to_string()).collect();
    println!("decoded: {}", line.join(" "));

    let ctx = |e| tilepack_cli_error("encoding", output, e);
    let mut writer = TileWriter::create(output).map_err(ctx)?;
    writer.write_tiles(&DEMO_VALUES, &pattern).map_err(ctx)?;
    let written = writer.last_len();
    writer.close().map_err(ctx)?;
    let encoded = tilepack::encode(&pattern, &DEMO_VALUES)?;
    println!("encoded {} values into {written} bytes: {}", DEMO_VALUES.len(), hex::encode(encoded));
    Ok(())
}
