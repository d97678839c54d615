// src/lib.rs
//! Frame data extraction for saved SF6 move-list pages.
//!
//! `pipeline::extract` turns one page into one `data::CharacterRecord`;
//! `scrape::run_batch` drives it over many characters with injected
//! `file::Loader` / `file::Writer` collaborators.

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod specs;

pub mod assemble;
pub mod data;
pub mod error;
pub mod file;
pub mod inspect;
pub mod log;
pub mod pipeline;
pub mod progress;
pub mod rules;
pub mod scrape;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::CharacterRecord;
pub use error::ExtractError;
pub use pipeline::extract;
pub use rules::RuleTable;
