use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use thump_core::analysis::AnalysisResult;
use thump_core::config::AppConfig;
use thump_core::decoder::{self, DecodeMode};
use thump_core::fixtures::{encode_wav, SyntheticThump};

/// Exit code for captures too weak or silent to judge
const EXIT_INCONCLUSIVE: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "thump_cli",
    about = "Offline thump ripeness analysis and fixture generation"
)]
struct Cli {
    /// JSON config with thresholds and pipeline settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a WAV recording and run the buffer pipeline
    AnalyzeWav {
        #[arg(long)]
        input: PathBuf,
        /// Validate RIFF chunks and format instead of skipping 44 bytes
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the metering pipeline on a JSON array of dB readings
    AnalyzeMetering {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a synthetic thump as a 16-bit mono 44.1 kHz WAV
    Synth {
        #[arg(long, default_value_t = 125.0)]
        frequency: f32,
        #[arg(long, default_value_t = 400.0)]
        decay_ms: f32,
        #[arg(long, default_value_t = 500.0)]
        duration_ms: f32,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli
        .config
        .as_deref()
        .map(AppConfig::load_from_file)
        .unwrap_or_default();

    match cli.command {
        Commands::AnalyzeWav {
            input,
            strict,
            output,
        } => run_analyze_wav(&config, &input, strict, output),
        Commands::AnalyzeMetering { input, output } => run_analyze_metering(&config, &input, output),
        Commands::Synth {
            frequency,
            decay_ms,
            duration_ms,
            output,
        } => run_synth(frequency, decay_ms, duration_ms, &output),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze_wav(
    config: &AppConfig,
    input: &Path,
    strict: bool,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let mode = if strict {
        DecodeMode::Strict
    } else {
        config.decoder.mode
    };

    let buffer = match mode {
        DecodeMode::Permissive => {
            let file =
                File::open(input).with_context(|| format!("opening {}", input.display()))?;
            decoder::decode_wav(BufReader::new(file))
        }
        DecodeMode::Strict => {
            let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
            decoder::decode_wav_strict(&bytes)
        }
    }
    .with_context(|| format!("decoding {}", input.display()))?;

    let samples = buffer.len();
    let duration_ms = buffer.duration_ms();

    let mut session = config.session();
    session.start_capture()?;
    let result = session.finish_with_samples(buffer.into_inner())?;

    emit_report(
        &ReportPayload {
            source: input.display().to_string(),
            pipeline: "buffer",
            samples,
            duration_ms,
            result: &result,
        },
        output,
    )?;
    Ok(exit_code(&result))
}

fn run_analyze_metering(
    config: &AppConfig,
    input: &Path,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let contents =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let readings: Vec<f32> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing dB readings from {}", input.display()))?;

    let mut session = config.session();
    session.start_capture()?;
    for &db in &readings {
        session.push_metering(db)?;
    }
    let result = session.finish_with_metering()?;

    emit_report(
        &ReportPayload {
            source: input.display().to_string(),
            pipeline: "metering",
            samples: readings.len(),
            duration_ms: readings.len() as f32 * config.metering.poll_interval_ms,
            result: &result,
        },
        output,
    )?;
    Ok(exit_code(&result))
}

fn run_synth(frequency: f32, decay_ms: f32, duration_ms: f32, output: &Path) -> Result<ExitCode> {
    let samples = SyntheticThump::new(frequency, decay_ms)
        .with_duration_ms(duration_ms)
        .render();
    let bytes = encode_wav(&samples).context("encoding WAV")?;
    fs::write(output, bytes).with_context(|| format!("writing {}", output.display()))?;
    println!("{} ({} samples)", output.display(), samples.len());
    Ok(ExitCode::from(0))
}

fn exit_code(result: &AnalysisResult) -> ExitCode {
    if result.is_inconclusive() {
        ExitCode::from(EXIT_INCONCLUSIVE)
    } else {
        ExitCode::from(0)
    }
}

fn emit_report(report: &ReportPayload<'_>, output_path: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(())
}

#[derive(Serialize)]
struct ReportPayload<'a> {
    source: String,
    pipeline: &'static str,
    samples: usize,
    duration_ms: f32,
    result: &'a AnalysisResult,
}
