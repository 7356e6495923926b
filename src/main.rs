// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use crawldex::cli::{display, Cli};
use crawldex::{
    ConcurrentIndexBuilder, Crawler, IndexBuilder, InvertedIndex, QueryEngine, Settings, WorkQueue,
};

fn main() -> ExitCode {
    let start = Instant::now();
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        display::warning(&format!("logging disabled: {:#}", e));
    }

    let settings = Settings::from_cli(&cli);
    tracing::debug!(?settings, "resolved settings");

    let mut pipeline = Pipeline::new(&settings);
    pipeline.run(&settings);

    display::elapsed(start.elapsed());
    pipeline.join();

    if pipeline.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("failed to set tracing subscriber")
}

/// The shared index plus the machinery for the chosen threading mode.
struct Pipeline {
    index: Arc<InvertedIndex>,
    queue: Option<WorkQueue>,
    queries: QueryEngine,
    failed: bool,
}

impl Pipeline {
    fn new(settings: &Settings) -> Self {
        match settings.threads {
            Some(threads) => {
                let index = Arc::new(InvertedIndex::concurrent());
                let queue = WorkQueue::new(threads);
                let queries = QueryEngine::concurrent(Arc::clone(&index), queue.handle());
                Self {
                    index,
                    queue: Some(queue),
                    queries,
                    failed: false,
                }
            }
            None => {
                let index = Arc::new(InvertedIndex::new());
                let queries = QueryEngine::new(Arc::clone(&index));
                Self {
                    index,
                    queue: None,
                    queries,
                    failed: false,
                }
            }
        }
    }

    /// Run every requested stage in order. A failed stage is reported once
    /// and the rest still run.
    fn run(&mut self, settings: &Settings) {
        if let Some(path) = &settings.text {
            let result = self.build(path);
            self.report("text", result);
        }
        if let Some(seed) = &settings.seed {
            let result = self.crawl(seed, settings.max);
            self.report("html", result);
        }
        if let Some(path) = &settings.index {
            let result = self
                .index
                .write_json(path)
                .map_err(anyhow::Error::from)
                .map(|()| display::wrote("index", path));
            self.report("index", result);
        }
        if let Some(path) = &settings.counts {
            let result = self
                .index
                .write_counts_json(path)
                .map_err(anyhow::Error::from)
                .map(|()| display::wrote("counts", path));
            self.report("counts", result);
        }
        if let Some(path) = &settings.query {
            let result = self
                .queries
                .parse_queries_in_file(path, settings.exact)
                .with_context(|| format!("failed to run queries from {}", path.display()))
                .map(|lines| display::success(&format!("ran {} query lines", lines)));
            self.report("query", result);
        }
        if let Some(path) = &settings.results {
            let result = self
                .queries
                .write_json(path)
                .map_err(anyhow::Error::from)
                .map(|()| display::wrote("results", path));
            self.report("results", result);
        }
    }

    fn build(&self, path: &Path) -> Result<()> {
        let summary = match &self.queue {
            Some(queue) => {
                ConcurrentIndexBuilder::new(Arc::clone(&self.index), queue.handle()).build(path)
            }
            None => IndexBuilder::new(&self.index).build(path),
        }
        .with_context(|| format!("failed to index {}", path.display()))?;

        if summary.failed > 0 {
            display::warning(&format!("skipped {} unreadable files", summary.failed));
        }
        display::success(&format!(
            "indexed {} files ({} terms)",
            summary.indexed(),
            self.index.term_count()
        ));
        Ok(())
    }

    fn crawl(&self, seed: &str, max: usize) -> Result<()> {
        let queue = self
            .queue
            .as_ref()
            .context("crawling needs the multithreaded pipeline")?;
        let crawler = Crawler::new(Arc::clone(&self.index), queue.handle())?;
        let summary = crawler
            .crawl(seed, max)
            .with_context(|| format!("failed to crawl {}", seed))?;

        display::success(&format!(
            "crawled {} of {} admitted pages",
            summary.pages_indexed,
            summary.admitted.len()
        ));
        Ok(())
    }

    fn report(&mut self, stage: &str, result: Result<()>) {
        if let Err(e) = result {
            display::failure(stage, &e);
            self.failed = true;
        }
    }

    fn join(&self) {
        if let Some(queue) = &self.queue {
            queue.join();
        }
    }
}
