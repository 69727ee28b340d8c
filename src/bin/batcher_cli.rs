// Smoke harness for the batching engine
//
// Synthesizes a deterministic in-memory corpus, builds the engine, and
// streams a few batches from the requested protocol, printing shapes and
// observable stream state. No storage, no model; this exists to exercise
// the full construction pipeline from the command line.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use audioset_batcher::{
    DataEngine, EngineConfig, EvalMode, SplitMode, TestCorpus, TrainCorpus,
};

const LABELS: [&str; 3] = ["hihat", "kick", "snare"];

#[derive(Parser, Debug)]
#[command(
    name = "batcher_cli",
    about = "Synthetic-corpus smoke harness for the audioset batching engine"
)]
struct Cli {
    /// Number of synthetic recordings
    #[arg(long, default_value_t = 24)]
    recordings: usize,
    /// Feature channels per frame
    #[arg(long, default_value_t = 8)]
    channels: usize,
    /// Chunk length L in frames
    #[arg(long, default_value_t = 64)]
    frames: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stream training batches and print their shapes
    Train {
        #[arg(long, default_value_t = 10)]
        steps: usize,
        #[arg(long, default_value_t = 8)]
        batch_size: usize,
    },
    /// Run one evaluation pass
    Eval {
        #[arg(long, default_value_t = false)]
        validation: bool,
        #[arg(long, default_value_t = false)]
        verified_only: bool,
        #[arg(long, default_value_t = false)]
        shuffle: bool,
    },
    /// Run the test stream over a second synthetic corpus
    Test,
}

fn main() -> ExitCode {
    env_logger::init();
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
    let batch_size = match &cli.command {
        Commands::Train { batch_size, .. } => *batch_size,
        _ => 8,
    };
    let config = EngineConfig {
        input_frames_number: cli.frames,
        batch_size,
        eval_audios_number: 8,
        ..EngineConfig::default()
    };

    let corpus = synth_train_corpus(cli.recordings, cli.channels, cli.frames, 0xC0FFEE);
    let folds: Vec<u32> = (0..cli.recordings).map(|i| (i % 4) as u32 + 1).collect();
    let mut engine = DataEngine::new(corpus, SplitMode::Holdout { folds }, config)
        .context("failed to build the engine")?;

    match cli.command {
        Commands::Train { steps, .. } => {
            let mut stream = engine.train_batches();
            println!("epoch length: {} iterations", stream.epoch_len());
            for step in 0..steps {
                let batch = stream
                    .next()
                    .context("training stream ended unexpectedly")??;
                println!(
                    "step {:>3}  epoch {}  cursor {:>4}  features {:?}",
                    step,
                    stream.epoch(),
                    stream.cursor(),
                    batch.features.dim()
                );
            }
        }
        Commands::Eval {
            validation,
            verified_only,
            shuffle,
        } => {
            let mode = if validation {
                EvalMode::Validation
            } else {
                EvalMode::Train
            };
            for item in engine.eval_batches(mode, verified_only, shuffle) {
                let item = item?;
                println!(
                    "recording label {:>2} ({})  chunks {:?}",
                    item.label,
                    engine
                        .vocabulary()
                        .name_of(item.label)
                        .unwrap_or("?"),
                    item.features.dim()
                );
            }
        }
        Commands::Test => {
            let test = synth_test_corpus(cli.recordings / 2, cli.channels, cli.frames, 0xBEEF);
            engine.load_test(test).context("failed to load test corpus")?;
            for item in engine.test_batches()? {
                let item = item?;
                println!(
                    "{}  label {:>2}  chunks {:?}",
                    item.filename,
                    item.label,
                    item.features.dim()
                );
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Deterministic ragged corpus: lengths vary from half a chunk to three
/// chunks so segmentation exercises both the tiling and the overlap paths.
fn synth_train_corpus(recordings: usize, channels: usize, frames: usize, seed: u64) -> TrainCorpus {
    let mut rng = StdRng::seed_from_u64(seed);
    let lengths: Vec<usize> = (0..recordings)
        .map(|_| rng.gen_range(frames / 2..frames * 3))
        .collect();
    let total: usize = lengths.iter().sum();

    let features = Array2::from_shape_fn((total, channels), |(_, c)| {
        rng.gen::<f32>() + c as f32
    });

    let mut begin_end = Vec::with_capacity(recordings);
    let mut cursor = 0;
    for &len in &lengths {
        begin_end.push((cursor, cursor + len));
        cursor += len;
    }

    TrainCorpus {
        features,
        filenames: (0..recordings).map(|i| format!("rec{i:04}.wav")).collect(),
        labels: (0..recordings)
            .map(|i| LABELS[i % LABELS.len()].to_string())
            .collect(),
        manually_verified: (0..recordings).map(|i| i % 3 != 0).collect(),
        begin_end,
    }
}

fn synth_test_corpus(recordings: usize, channels: usize, frames: usize, seed: u64) -> TestCorpus {
    let mut rng = StdRng::seed_from_u64(seed);
    let lengths: Vec<usize> = (0..recordings)
        .map(|_| rng.gen_range(frames / 2..frames * 2))
        .collect();
    let total: usize = lengths.iter().sum();

    let features = Array2::from_shape_fn((total, channels), |(_, c)| {
        rng.gen::<f32>() + c as f32
    });

    let mut begin_end = Vec::with_capacity(recordings);
    let mut cursor = 0;
    for &len in &lengths {
        begin_end.push((cursor, cursor + len));
        cursor += len;
    }

    TestCorpus {
        features,
        filenames: (0..recordings).map(|i| format!("test{i:04}.wav")).collect(),
        labels: (0..recordings)
            .map(|i| LABELS[(i + 1) % LABELS.len()].to_string())
            .collect(),
        begin_end,
    }
}
