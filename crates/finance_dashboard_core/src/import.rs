//! Bulk import: hold a selection of files, upload them all, then navigate back.
//!
//! `submit` launches one upload per pending file and waits for every one of
//! them to settle. A failed upload is logged and recorded in the report; it
//! never cancels its siblings and never blocks navigation.

use crate::api::Backend;
use crate::error::{DashboardError, Result};
use futures::stream::{self, StreamExt};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Import,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<F> Navigator for F
where
    F: Fn(Route) + Send + Sync,
{
    fn navigate(&self, route: Route) {
        self(route)
    }
}

/// A file picked by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, content })
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadEntry {
    pub file: ImportFile,
    pub name: String,
    pub readable_size: String,
}

impl From<ImportFile> for UploadEntry {
    fn from(file: ImportFile) -> Self {
        Self {
            name: file.name.clone(),
            readable_size: readable_size(file.size()),
            file,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedUpload {
    pub name: String,
    pub error: String,
}

/// Outcome of one `submit`, per file, in selection order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub uploaded: Vec<String>,
    pub failed: Vec<FailedUpload>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn partial_failure(&self) -> Option<DashboardError> {
        if self.failed.is_empty() {
            return None;
        }
        Some(DashboardError::PartialImport {
            failed: self.failed.len(),
            total: self.total,
        })
    }
}

pub struct ImportOrchestrator<B, N> {
    backend: B,
    navigator: N,
    pending: Vec<UploadEntry>,
    concurrency: Option<usize>,
}

impl<B: Backend, N: Navigator> ImportOrchestrator<B, N> {
    pub fn new(backend: B, navigator: N) -> Self {
        Self {
            backend,
            navigator,
            pending: Vec::new(),
            concurrency: None,
        }
    }

    /// Caps simultaneous uploads. `None` or `Some(0)` uploads every file at once.
    pub fn with_concurrency(mut self, limit: Option<usize>) -> Self {
        self.concurrency = limit.filter(|n| *n > 0);
        self
    }

    /// Replaces the pending batch. No filtering or deduplication.
    pub fn select_files(&mut self, files: Vec<ImportFile>) {
        self.pending = files.into_iter().map(UploadEntry::from).collect();
        log::debug!("import: {} files selected", self.pending.len());
    }

    pub fn pending(&self) -> &[UploadEntry] {
        &self.pending
    }

    /// Uploads every pending file, waits for all to settle, then navigates
    /// to the dashboard exactly once.
    pub async fn submit(&self) -> ImportReport {
        let total = self.pending.len();
        let limit = self.concurrency.unwrap_or(total).max(1);
        log::info!("import: submitting {} files (max {} in flight)", total, limit);

        let backend = &self.backend;
        let mut outcomes: Vec<(usize, Result<()>)> = stream::iter(self.pending.iter().enumerate())
            .map(move |(index, entry)| async move {
                let outcome = backend
                    .upload_file(&entry.name, entry.file.content.clone())
                    .await;
                (index, outcome)
            })
            .buffer_unordered(limit)
            .collect()
            .await;
        outcomes.sort_by_key(|(index, _)| *index);

        let mut report = ImportReport {
            total,
            ..ImportReport::default()
        };
        for (index, outcome) in outcomes {
            let name = self.pending[index].name.clone();
            match outcome {
                Ok(()) => {
                    log::info!("import: uploaded {}", name);
                    report.uploaded.push(name);
                }
                Err(e) => {
                    log::warn!("import: upload of {} failed: {}", name, e);
                    report.failed.push(FailedUpload {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        }

        if let Some(e) = report.partial_failure() {
            log::warn!("import: batch finished with failures: {}", e);
        } else {
            log::info!("import: batch finished, {} files uploaded", report.uploaded.len());
        }
        self.navigator.navigate(Route::Dashboard);
        report
    }
}

/// Human-readable byte count in SI units: `512 B`, `1.5 kB`, `2.35 MB`.
pub fn readable_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];
    if bytes < 1000 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    let mut rounded = format!("{:.2}", value);
    if rounded.starts_with("1000") && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
        rounded = format!("{:.2}", value);
    }
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
