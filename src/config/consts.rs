// src/config/consts.rs

// Directories
pub const DEFAULT_INPUT_DIR: &str = "html";
pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const INPUT_EXT: &str = "html";
pub const OUTPUT_SUFFIX: &str = "_frame_data_structured.json";

// Record
pub const DEFAULT_HEALTH: u32 = 10_000;

// Locator
pub const MIN_EMBEDDED_OBJECT_LEN: usize = 1000; // chars; also the inspect "large script" cut

// Concurrency
pub const WORKERS: usize = 4;

// Processed when neither --all nor --character is given
pub const DEFAULT_CHARACTERS: &[&str] = &["ken", "chunli"];
