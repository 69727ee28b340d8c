//! Configuration for the batching engine
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling fast iteration without recompilation. Chunk length, batch size,
//! and the RNG seeds can be adjusted via the config file for rapid
//! experimentation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Batching engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Target chunk length L in frames; every materialized input has exactly
    /// this many frames
    pub input_frames_number: usize,
    /// Number of chunks per training batch
    pub batch_size: usize,
    /// Maximum number of recordings consumed per evaluation pass
    pub eval_audios_number: usize,
    /// Fold id held out for validation when holdout splitting is requested
    pub holdout_fold: u32,
    /// Seed for the training shuffle RNG
    pub seed: u64,
    /// Seed for the evaluation shuffle RNG; a stream distinct from training
    /// so evaluation order never perturbs the training shuffle
    pub eval_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_frames_number: 128,
            batch_size: 32,
            eval_audios_number: 100,
            holdout_fold: 1,
            seed: 42,
            eval_seed: 0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file is missing or
    /// contains invalid JSON (a warning is logged in either case).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Reject parameter combinations the engine cannot run with
    ///
    /// A chunk length below 2 degenerates the overlap stride to zero, and a
    /// zero batch size breaks the epoch-length computation, so both fail
    /// here rather than deep inside a generator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_frames_number < 2 {
            return Err(ConfigError::ChunkLengthTooSmall {
                input_frames_number: self.input_frames_number,
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::BatchSizeZero);
        }
        Ok(())
    }
}
