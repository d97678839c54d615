// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Which characters a run processes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Every `.html` document in the input directory.
    All,
    Slugs(Vec<String>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Slugs(DEFAULT_CHARACTERS.iter().map(|s| s!(*s)).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub selection: Selection,
    pub workers: usize,
    /// Replacement rule table (JSON); built-in table when `None`.
    pub rules: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            selection: Selection::default(),
            workers: WORKERS,
            rules: None,
        }
    }
}
