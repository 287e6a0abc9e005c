//! Batch orchestration: catalog → generate → render → write → indexes.
//!
//! Topics are processed one at a time, in catalog order. A failure on one
//! topic is recorded in the [`BatchSummary`] and the batch moves on; only
//! preconditions (credential, output directory, unknown `--only` ids) abort
//! the run, and they do so before any topic is attempted.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{error, info, instrument, warn};

use topicpress_generator::{ContentRequester, OpenAiClient, RequestSettings, TextCompletion};
use topicpress_shared::{AppConfig, Catalog, Result, RunId, resolve_api_key};

use crate::indexes::build_indexes;
use crate::writer::{ensure_output_dir, write_document};

/// Per-run options, usually taken from CLI flags.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory that receives topic pages and index documents.
    pub output_dir: PathBuf,
    /// Restrict page generation to these output ids (empty = all).
    pub only: Vec<String>,
    /// Rebuild index pages and the nav snippet after the topic loop.
    pub write_indexes: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            only: Vec::new(),
            write_indexes: true,
        }
    }
}

/// Stage at which a topic failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Generation,
    Write,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generation => write!(f, "generation"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// A topic that did not produce a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTopic {
    pub output_id: String,
    pub title: String,
    pub kind: FailureKind,
    pub reason: String,
}

/// Outcome of one batch run. Lists are in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Output ids of pages written.
    pub generated: Vec<String>,
    pub failed: Vec<FailedTopic>,
    /// File names of index documents written.
    pub indexes_written: Vec<String>,
    /// Index file names that could not be written.
    pub index_failures: Vec<String>,
    /// Topics excluded by the `only` filter.
    pub skipped: usize,
}

impl BatchSummary {
    /// Titles of failed topics, for a manual retry.
    pub fn failed_titles(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.title.as_str()).collect()
    }

    /// Topics for which a generation call was made.
    pub fn attempted(&self) -> usize {
        self.generated.len() + self.failed.len()
    }

    /// At least one topic page was produced.
    pub fn is_success(&self) -> bool {
        !self.generated.is_empty()
    }
}

/// Index documents written by [`write_indexes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

/// Progress callback for reporting batch status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before a topic's generation request.
    fn topic_started(&self, title: &str, current: usize, total: usize);
    /// Called when a topic page was written.
    fn topic_written(&self, output_id: &str);
    /// Called when a topic failed at any stage.
    fn topic_failed(&self, failure: &FailedTopic);
    /// Called when the batch completes.
    fn done(&self, summary: &BatchSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn topic_started(&self, _title: &str, _current: usize, _total: usize) {}
    fn topic_written(&self, _output_id: &str) {}
    fn topic_failed(&self, _failure: &FailedTopic) {}
    fn done(&self, _summary: &BatchSummary) {}
}

/// Drives a whole catalog through generation, rendering, and writing.
pub struct BatchRunner<C> {
    requester: ContentRequester<C>,
    options: BatchOptions,
}

impl BatchRunner<OpenAiClient> {
    /// Build a runner backed by the configured OpenAI-compatible service.
    ///
    /// Fails with `MissingCredential` before anything touches the disk when
    /// the API key variable is unset.
    pub fn from_config(config: &AppConfig, catalog: &Catalog, options: BatchOptions) -> Result<Self> {
        let api_key = resolve_api_key(config)?;
        let client = OpenAiClient::new(&config.generation, api_key)?;
        let settings =
            RequestSettings::from_config(&config.generation, catalog.style, &catalog.site.subject);

        info!(
            model = %client.model(),
            style = %catalog.style,
            max_tokens = settings.max_tokens,
            "generation client ready"
        );

        Ok(Self::new(ContentRequester::new(client, settings), options))
    }
}

impl<C: TextCompletion> BatchRunner<C> {
    pub fn new(requester: ContentRequester<C>, options: BatchOptions) -> Self {
        Self { requester, options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Run the batch.
    ///
    /// 1. Validate `only` ids and create the output directory
    /// 2. Per topic: request prose, render, write
    /// 3. Build and write indexes over the full catalog
    #[instrument(skip_all, fields(run_id = %RunId::new(), topics = catalog.topics.len()))]
    pub async fn run(
        &self,
        catalog: &Catalog,
        date: NaiveDate,
        progress: &dyn ProgressReporter,
    ) -> Result<BatchSummary> {
        let start = Instant::now();
        let output_dir = &self.options.output_dir;

        catalog.check_ids(&self.options.only)?;
        ensure_output_dir(output_dir)?;

        let selected: Vec<_> = catalog
            .topics
            .iter()
            .filter(|t| self.options.only.is_empty() || self.options.only.contains(&t.output_id))
            .collect();

        let mut summary = BatchSummary {
            skipped: catalog.topics.len() - selected.len(),
            ..BatchSummary::default()
        };

        info!(
            selected = selected.len(),
            skipped = summary.skipped,
            output_dir = %output_dir.display(),
            "starting batch"
        );

        progress.phase("Generating topic pages");
        let total = selected.len();

        for (i, topic) in selected.into_iter().enumerate() {
            progress.topic_started(&topic.title, i + 1, total);

            let prose = match self.requester.request(topic).await {
                Ok(prose) => prose,
                Err(failure) => {
                    let failed = FailedTopic {
                        output_id: failure.output_id,
                        title: failure.title,
                        kind: FailureKind::Generation,
                        reason: failure.reason,
                    };
                    progress.topic_failed(&failed);
                    summary.failed.push(failed);
                    continue;
                }
            };

            let doc = topicpress_render::render_topic(&catalog.site, catalog.style, topic, &prose, date);

            match write_document(output_dir, &doc) {
                Ok(path) => {
                    info!(output_id = %topic.output_id, path = %path.display(), "topic page written");
                    progress.topic_written(&topic.output_id);
                    summary.generated.push(topic.output_id.clone());
                }
                Err(e) => {
                    error!(output_id = %topic.output_id, error = %e, "failed to write topic page");
                    let failed = FailedTopic {
                        output_id: topic.output_id.clone(),
                        title: topic.title.clone(),
                        kind: FailureKind::Write,
                        reason: e.to_string(),
                    };
                    progress.topic_failed(&failed);
                    summary.failed.push(failed);
                }
            }
        }

        if self.options.write_indexes {
            progress.phase("Writing index pages");
            let report = write_indexes(catalog, date, output_dir)?;
            summary.indexes_written = report.written;
            summary.index_failures = report.failed;
        }

        info!(
            generated = summary.generated.len(),
            failed = summary.failed.len(),
            indexes = summary.indexes_written.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch complete"
        );

        progress.done(&summary);
        Ok(summary)
    }
}

/// Build and write every index document for `catalog` into `output_dir`.
///
/// Individual write failures are logged and reported, never fatal. Only a
/// failure to create `output_dir` is returned as an error.
#[instrument(skip_all, fields(output_dir = %output_dir.display()))]
pub fn write_indexes(catalog: &Catalog, date: NaiveDate, output_dir: &Path) -> Result<IndexReport> {
    ensure_output_dir(output_dir)?;

    let mut report = IndexReport::default();
    for doc in build_indexes(catalog, date) {
        match write_document(output_dir, &doc) {
            Ok(_) => report.written.push(doc.file_name),
            Err(e) => {
                warn!(file = %doc.file_name, error = %e, "failed to write index document");
                report.failed.push(doc.file_name);
            }
        }
    }

    info!(written = report.written.len(), failed = report.failed.len(), "indexes written");
    Ok(report)
}
