// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use log::warn;

use crate::config::consts::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, WORKERS};
use crate::config::options::{RunOptions, Selection};
use crate::file::{DirLoader, Loader};
use crate::inspect::inspect;
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "sf6_scrape")]
#[command(about = "Extract structured frame data from saved SF6 frame-data pages")]
pub struct Cli {
    /// Directory holding `<slug>.html` pages
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Where `<slug>_frame_data_structured.json` files go
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Character slug to process (repeatable)
    #[arg(short = 'c', long = "character", conflicts_with = "all")]
    pub characters: Vec<String>,

    /// Process every page in the input directory
    #[arg(short, long)]
    pub all: bool,

    /// Survey the selected pages and write nothing
    #[arg(long)]
    pub inspect: bool,

    /// Replacement classification rule table (JSON)
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Worker threads
    #[arg(short, long, default_value_t = WORKERS)]
    pub workers: usize,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn options(&self) -> RunOptions {
        let selection = if self.all {
            Selection::All
        } else if self.characters.is_empty() {
            Selection::default()
        } else {
            Selection::Slugs(self.characters.clone())
        };
        RunOptions {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            selection,
            workers: self.workers.max(1),
            rules: self.rules.clone(),
        }
    }
}

/// Prints one line per character to stdout.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        println!("Processing {total} character(s)");
    }

    fn item_done(&mut self, slug: &str, moves: usize) {
        println!("  ok   {slug}: {moves} moves");
    }

    fn item_failed(&mut self, slug: &str, reason: &str) {
        println!("  FAIL {slug}: {reason}");
    }
}

pub fn run(cli: Cli) -> color_eyre::Result<()> {
    crate::log::init(cli.verbose);
    let opts = cli.options();

    if cli.inspect {
        run_inspect(&opts)?;
        return Ok(());
    }

    let progress: &mut dyn Progress = &mut ConsoleProgress;
    let summary = scrape::run(&opts, Some(progress)).wrap_err("could not start the run")?;
    report(&summary);

    if summary.all_ok() {
        Ok(())
    } else {
        let total = summary.failed.len() + summary.written.len();
        Err(eyre!("{} of {total} character(s) failed", summary.failed.len()))
    }
}

fn report(summary: &RunSummary) {
    println!("Written: {}", summary.written.len());
    for w in &summary.written {
        println!("  {}", w.path.display());
    }
    if !summary.failed.is_empty() {
        println!("Failed: {}", summary.failed.len());
        for (slug, e) in &summary.failed {
            println!("  {slug}: {e}");
        }
    }
}

/// Reports on every readable page; unreadable ones are skipped with a warning.
/// Returns how many pages were reported.
fn run_inspect(opts: &RunOptions) -> color_eyre::Result<usize> {
    let slugs = scrape::resolve_slugs(&opts.selection, &opts.input_dir)?;
    let loader = DirLoader::new(opts.input_dir.clone());
    let mut reported = 0;
    for slug in slugs {
        let doc = match loader.load(&slug) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Inspect: {} skipped: {e}", loader.path_for(&slug).display());
                continue;
            }
        };
        println!("{slug}:");
        print!("{}", inspect(&doc));
        reported += 1;
    }
    Ok(reported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_from_flags() {
        let cli = Cli::parse_from(["sf6_scrape"]);
        assert_eq!(cli.options().selection, Selection::default());

        let cli = Cli::parse_from(["sf6_scrape", "-c", "ryu", "--character", "juri"]);
        assert_eq!(cli.options().selection, Selection::Slugs(vec![s!("ryu"), s!("juri")]));

        let cli = Cli::parse_from(["sf6_scrape", "--all", "-w", "0"]);
        assert_eq!(cli.options().selection, Selection::All);
        assert_eq!(cli.options().workers, 1);
    }

    #[test]
    fn inspect_skips_missing_pages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ken.html"), "<script>var a = 1;</script>").unwrap();
        let opts = RunOptions {
            input_dir: dir.path().to_path_buf(),
            selection: Selection::Slugs(vec![s!("ryu"), s!("ken")]),
            ..RunOptions::default()
        };
        assert_eq!(run_inspect(&opts).unwrap(), 1);
    }

    #[test]
    fn all_conflicts_with_characters() {
        assert!(Cli::try_parse_from(["sf6_scrape", "--all", "-c", "ken"]).is_err());
    }
}
