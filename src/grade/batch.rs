//! Bounded-concurrency batch grading.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use super::Grader;
use crate::error::{Error, Result};
use crate::model::GradeResult;
use crate::scoring::{calculate_batch_stats, BatchStats};

/// A document waiting to be graded.
#[derive(Debug, Clone)]
pub enum BatchJob {
    /// A file read when the job runs
    File(PathBuf),
    /// A document already in memory
    Bytes {
        /// Original file name
        filename: String,
        /// Document content
        data: Vec<u8>,
    },
}

impl BatchJob {
    /// Job for a file on disk.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        BatchJob::File(path.into())
    }

    /// Job for an in-memory document.
    pub fn bytes(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        BatchJob::Bytes {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// File name reported in results and errors.
    pub fn filename(&self) -> String {
        match self {
            BatchJob::File(path) => file_name_of(path),
            BatchJob::Bytes { filename, .. } => filename.clone(),
        }
    }

    fn grade(&self, grader: &Grader) -> Result<GradeResult> {
        match self {
            BatchJob::File(path) => {
                let data = std::fs::read(path)?;
                let filename = file_name_of(path);
                grader.grade_bytes_as(&data, &filename, &filename)
            }
            BatchJob::Bytes { filename, data } => grader.grade_bytes_as(data, filename, filename),
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// A document that could not be graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    /// File name of the failed job
    pub filename: String,
    /// What went wrong
    pub message: String,
}

/// Outcome of one batch job.
pub type BatchOutcome = std::result::Result<GradeResult, BatchError>;

/// Results of a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Graded documents in job order
    pub results: Vec<GradeResult>,
    /// Failed documents in job order
    pub errors: Vec<BatchError>,
    /// Statistics over the graded documents
    pub stats: BatchStats,
}

impl BatchReport {
    /// Build a report from outcomes in job order.
    pub fn from_outcomes<I>(outcomes: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = BatchOutcome>,
    {
        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(result) => report.results.push(result),
                Err(error) => report.errors.push(error),
            }
        }
        report.stats = calculate_batch_stats(&report.results, threshold);
        report
    }

    /// Number of jobs, graded or failed.
    pub fn total(&self) -> usize {
        self.results.len() + self.errors.len()
    }
}

/// Grades many documents at once on a dedicated thread pool.
///
/// At most `concurrency` documents are graded at the same time. A failure
/// or panic while grading one document is reported as a [`BatchError`]
/// for that document and never affects the others.
#[derive(Debug, Clone)]
pub struct BatchGrader {
    grader: Arc<Grader>,
    concurrency: usize,
}

impl BatchGrader {
    /// Create a batch grader with one worker per available CPU.
    pub fn new(grader: Grader) -> Self {
        Self::from_shared(Arc::new(grader))
    }

    /// Create a batch grader around a shared grader.
    pub fn from_shared(grader: Arc<Grader>) -> Self {
        let concurrency = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            grader,
            concurrency,
        }
    }

    /// Limit the number of documents graded at once (at least 1).
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Concurrency limit.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// The grader used for every job.
    pub fn grader(&self) -> &Grader {
        &self.grader
    }

    fn pool(&self) -> Result<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .thread_name(|i| format!("docgrade-worker-{}", i))
            .build()
            .map_err(|e| Error::Other(format!("failed to start worker pool: {}", e)))
    }

    /// Grade every job and collect a report in job order.
    pub fn run(&self, jobs: Vec<BatchJob>) -> Result<BatchReport> {
        log::info!(
            "Grading batch of {} documents with {} workers",
            jobs.len(),
            self.concurrency
        );
        let pool = self.pool()?;
        let grader = &self.grader;
        let outcomes: Vec<BatchOutcome> =
            pool.install(|| jobs.par_iter().map(|job| grade_job(grader, job)).collect());

        let report = BatchReport::from_outcomes(outcomes, grader.options().pass_threshold);
        log::info!(
            "Batch finished: {} graded, {} failed, average {}%",
            report.results.len(),
            report.errors.len(),
            report.stats.average
        );
        Ok(report)
    }

    /// Grade jobs in the background, delivering each outcome as it finishes.
    ///
    /// Outcomes arrive in completion order. Dropping the receiver abandons
    /// jobs that have not started yet; outcomes already received stay valid.
    pub fn stream(&self, jobs: Vec<BatchJob>) -> Result<Receiver<BatchOutcome>> {
        Ok(self.spawn_stream(jobs)?.outcomes)
    }

    fn spawn_stream(&self, jobs: Vec<BatchJob>) -> Result<BatchStream> {
        let pool = self.pool()?;
        let grader = self.grader.clone();
        let (tx, rx) = crossbeam_channel::bounded(self.concurrency);
        let abandoned = Arc::new(AtomicBool::new(false));
        let graded = Arc::new(AtomicUsize::new(0));

        log::info!("Streaming batch of {} documents", jobs.len());
        let worker = {
            let abandoned = Arc::clone(&abandoned);
            let graded = Arc::clone(&graded);
            thread::Builder::new()
                .name("docgrade-batch".into())
                .spawn(move || {
                    pool.install(|| {
                        jobs.into_par_iter().for_each(|job| {
                            if abandoned.load(Ordering::Relaxed) {
                                return;
                            }
                            let outcome = grade_job(&grader, &job);
                            graded.fetch_add(1, Ordering::Relaxed);
                            if tx.send(outcome).is_err() {
                                abandoned.store(true, Ordering::Relaxed);
                            }
                        })
                    });
                    log::debug!("Batch stream finished");
                })?
        };

        Ok(BatchStream {
            outcomes: rx,
            worker,
            abandoned,
            graded,
        })
    }
}

/// A running streamed batch.
struct BatchStream {
    outcomes: Receiver<BatchOutcome>,
    // joined only in tests; detached otherwise
    #[cfg_attr(not(test), allow(dead_code))]
    worker: JoinHandle<()>,
    #[cfg_attr(not(test), allow(dead_code))]
    abandoned: Arc<AtomicBool>,
    #[cfg_attr(not(test), allow(dead_code))]
    graded: Arc<AtomicUsize>,
}

/// Grade one job, turning errors and panics into a [`BatchError`].
fn grade_job(grader: &Grader, job: &BatchJob) -> BatchOutcome {
    let filename = job.filename();
    match panic::catch_unwind(AssertUnwindSafe(|| job.grade(grader))) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(err)) => {
            log::warn!("Failed to grade {}: {}", filename, err);
            Err(BatchError {
                filename,
                message: err.to_string(),
            })
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::warn!("Grading {} panicked: {}", filename, message);
            Err(BatchError {
                filename,
                message: format!("panic while grading: {}", message),
            })
        }
    }
}
