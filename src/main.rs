use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use pitch_tracker::note::nearest_note;
use pitch_tracker::source::{SignalSource, WavSource};
use pitch_tracker::{AutocorrelationDetector, DetectorConfig, PitchTracker};

/// Track the pitch of a WAV file block by block.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// WAV file to analyze
    input: PathBuf,

    /// JSON detector configuration. The sample rate always comes from the input file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Samples per block, overriding the configuration
    #[arg(long)]
    block_size: Option<usize>,
}

fn load_config(path: Option<&PathBuf>) -> Result<DetectorConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(DetectorConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_ref())?;
    let source = WavSource::<f64>::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    config.sample_rate = source.sample_rate();
    if let Some(block_size) = args.block_size {
        config.block_size = block_size;
    }
    info!(
        "tracking {} ({} Hz, {} samples per block)",
        args.input.display(),
        config.sample_rate,
        config.block_size
    );

    let detector = AutocorrelationDetector::<f64>::new(config).context("invalid configuration")?;
    let tracker = PitchTracker::new(detector, source)?;

    let mut detected = 0;
    for (index, estimate) in tracker.enumerate() {
        let pitch = match estimate.with_context(|| format!("reading block {}", index))? {
            Some(pitch) => pitch,
            None => {
                debug!("block {}: no pitch", index);
                continue;
            }
        };
        detected += 1;
        match nearest_note(pitch.frequency) {
            Some(note) => println!(
                "{}\t{:.2}\t{}\t{:+.1}",
                index,
                pitch.frequency,
                note.name,
                note.cents_from(pitch.frequency)
            ),
            None => println!("{}\t{:.2}\t-\t-", index, pitch.frequency),
        }
    }
    info!("{} blocks with a pitch", detected);
    Ok(())
}
