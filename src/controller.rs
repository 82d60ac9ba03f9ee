//! View state for the analyze → pick quality → (simulated) download flow.

use std::sync::Arc;

use rand::Rng;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{error, info, warn};

use crate::gemini::{AnalyzeError, MetadataSource};
use crate::history;
use crate::model::{DownloadStatus, RecentDownload, VideoMetadata};
use crate::progress::ProgressSimulator;

/// The only failure text ever shown to the user
pub const ANALYSIS_FAILED: &str = "Failed to analyze the URL. Please ensure it is a valid video link.";

type AnalysisResult = Result<VideoMetadata, AnalyzeError>;

pub struct ViewController {
    source: Arc<dyn MetadataSource>,
    runtime: Handle,
    status: DownloadStatus,
    metadata: Option<VideoMetadata>,
    error: Option<String>,
    /// URL of the last accepted submission
    submitted_url: String,
    selected_quality: Option<String>,
    progress: ProgressSimulator,
    pending: Option<oneshot::Receiver<AnalysisResult>>,
}

impl ViewController {
    pub fn new(source: Arc<dyn MetadataSource>, runtime: Handle) -> Self {
        Self {
            source,
            runtime,
            status: DownloadStatus::Idle,
            metadata: None,
            error: None,
            submitted_url: String::new(),
            selected_quality: None,
            progress: ProgressSimulator::new(),
            pending: None,
        }
    }

    pub fn status(&self) -> DownloadStatus {
        self.status
    }

    pub fn metadata(&self) -> Option<&VideoMetadata> {
        self.metadata.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress_percent(&self) -> f32 {
        self.progress.percent()
    }

    pub fn selected_quality(&self) -> Option<&str> {
        self.selected_quality.as_deref()
    }

    /// Starts a metadata lookup. Blank input is ignored and returns false.
    pub fn submit_url(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }

        self.status = DownloadStatus::Analyzing;
        self.error = None;
        self.metadata = None;
        self.submitted_url = url.to_string();

        let (tx, rx) = oneshot::channel();
        self.pending = Some(rx);
        let source = Arc::clone(&self.source);
        let url = url.to_string();
        self.runtime.spawn(async move {
            let result = source.analyze(&url).await;
            let _ = tx.send(result);
        });
        info!(url = %self.submitted_url, "analysis started");
        true
    }

    /// Applies a finished lookup, if one has arrived. Called once per frame.
    pub fn poll(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                self.pending = None;
                warn!("analysis task ended without a result");
                self.fail();
                return;
            }
        };
        self.pending = None;

        match result {
            Ok(metadata) => {
                info!(title = %metadata.title, platform = %metadata.platform, "metadata ready");
                self.metadata = Some(metadata);
                self.status = DownloadStatus::Ready;
            }
            Err(e) => {
                error!(url = %self.submitted_url, error = %e, "analysis failed");
                self.fail();
            }
        }
    }

    fn fail(&mut self) {
        self.error = Some(ANALYSIS_FAILED.to_string());
        self.status = DownloadStatus::Error;
    }

    /// Starts the simulated download. Ignored when no metadata is loaded.
    pub fn select_quality(&mut self, label: &str) {
        if self.metadata.is_none() {
            return;
        }
        info!(quality = label, "simulated download started");
        self.selected_quality = Some(label.to_string());
        self.progress = ProgressSimulator::new();
        self.status = DownloadStatus::Downloading;
    }

    /// One timer tick of the simulation. Returns the history record to append
    /// when this tick completes the download.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RecentDownload> {
        if self.status != DownloadStatus::Downloading {
            return None;
        }
        if !self.progress.tick(rng) {
            return None;
        }

        self.status = DownloadStatus::Completed;
        let title = self.metadata.as_ref().map(|m| m.title.as_str())?;
        info!(title, "simulated download complete");
        Some(history::new_record(rng, &self.submitted_url, title))
    }

    /// Back to idle from any state. A lookup still in flight is dropped.
    pub fn reset(&mut self) {
        self.status = DownloadStatus::Idle;
        self.metadata = None;
        self.error = None;
        self.submitted_url.clear();
        self.selected_quality = None;
        self.progress = ProgressSimulator::new();
        self.pending = None;
    }
}
