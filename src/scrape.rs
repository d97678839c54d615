// src/scrape.rs
use std::{
    path::PathBuf,
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
};

use log::{info, warn};

use crate::{
    config::options::{RunOptions, Selection},
    data::CATEGORY_LABELS_VERSION,
    error::ExtractError,
    file::{self, DirLoader, JsonDirWriter, Loader, Writer},
    pipeline,
    progress::Progress,
    rules::RuleTable,
};

/// Outcome of a batch, in selection order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<Written>,
    pub failed: Vec<(String, ExtractError)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub slug: String,
    pub path: PathBuf,
    pub moves: usize,
}

impl RunSummary {
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Top-level: resolve selection and rules, then run the batch over files.
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary, ExtractError> {
    let rules = match &opts.rules {
        Some(path) => RuleTable::load(path)?,
        None => RuleTable::builtin().clone(),
    };
    info!("Scrape: rules version={} labels version={CATEGORY_LABELS_VERSION}", rules.version);

    let slugs = resolve_slugs(&opts.selection, &opts.input_dir)?;
    let loader = DirLoader::new(opts.input_dir.clone());
    let writer = JsonDirWriter::new(opts.output_dir.clone());

    Ok(run_batch(&slugs, &loader, &writer, &rules, opts.workers, progress))
}

pub fn resolve_slugs(sel: &Selection, input_dir: &std::path::Path) -> Result<Vec<String>, ExtractError> {
    match sel {
        Selection::All => file::list_slugs(input_dir),
        Selection::Slugs(v) => Ok(v.clone()),
    }
}

/// Transform every slug with a fixed pool of worker threads.
/// A failing character is recorded and never stops the others.
pub fn run_batch(
    slugs: &[String],
    loader: &dyn Loader,
    writer: &dyn Writer,
    rules: &RuleTable,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(slugs.len());
        p.log("Extracting frame data…");
    }
    info!("Scrape: Begin characters={} workers={workers}", slugs.len());

    type Outcome = (usize, Result<(PathBuf, usize), ExtractError>);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<Outcome>();
    let workers = workers.min(slugs.len()).max(1);

    let mut outcomes: Vec<Outcome> = Vec::with_capacity(slugs.len());

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    let Some(slug) = slugs.get(i) else {
                        break;
                    };
                    let _ = tx.send((i, process_one(slug, loader, writer, rules)));
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        // Aggregate results as they arrive
        for (i, result) in res_rx.iter() {
            let slug = &slugs[i];
            match &result {
                Ok((path, moves)) => {
                    info!("Scrape: {slug} moves={moves} -> {}", path.display());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(slug, *moves);
                    }
                }
                Err(e) => {
                    warn!("Scrape: {slug} skipped: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(slug, &e.to_string());
                    }
                }
            }
            outcomes.push((i, result));
        }
    });

    // back to selection order
    outcomes.sort_by_key(|(i, _)| *i);

    let mut summary = RunSummary::default();
    for (i, result) in outcomes {
        let slug = slugs[i].clone();
        match result {
            Ok((path, moves)) => summary.written.push(Written { slug, path, moves }),
            Err(e) => summary.failed.push((slug, e)),
        }
    }

    info!("Scrape: End written={} failed={}", summary.written.len(), summary.failed.len());
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    summary
}

fn process_one(
    slug: &str,
    loader: &dyn Loader,
    writer: &dyn Writer,
    rules: &RuleTable,
) -> Result<(PathBuf, usize), ExtractError> {
    let doc = loader.load(slug)?;
    let record = pipeline::extract(slug, &doc, rules)?;
    let path = writer.write(&record)?;
    Ok((path, record.moves.len()))
}
