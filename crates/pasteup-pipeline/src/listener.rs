//! Paste listener
//!
//! Hosts announce editable surfaces as they appear through a stream of
//! [`DiscoveredSurface`]. The listener keeps at most one attachment per surface and starts
//! a pipeline for every image paste it receives. An attachment ends when the surface's
//! paste channel closes, after which the surface can be discovered again.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::{pin_mut, Stream, StreamExt};
use tokio::sync::mpsc;

use crate::host::{EditableSurface, PasteEvent};
use crate::pipeline::{PastePipeline, PipelineReport};

/// A surface announced by the host, with the channel its paste events arrive on.
pub struct DiscoveredSurface {
    pub surface: Arc<dyn EditableSurface>,
    pub events: mpsc::Receiver<PasteEvent>,
}

impl DiscoveredSurface {
    pub fn new(surface: Arc<dyn EditableSurface>, events: mpsc::Receiver<PasteEvent>) -> Self {
        Self { surface, events }
    }
}

type AttachedSet = Arc<Mutex<HashSet<String>>>;

/// Holds a surface id in the attached set for as long as its listener task runs.
struct Attachment {
    attached: AttachedSet,
    id: String,
}

impl Drop for Attachment {
    fn drop(&mut self) {
        lock_set(&self.attached).remove(&self.id);
    }
}

#[derive(Clone)]
pub struct PasteListener {
    pipeline: PastePipeline,
    attached: AttachedSet,
    reports: Option<mpsc::UnboundedSender<PipelineReport>>,
}

impl PasteListener {
    pub fn new(pipeline: PastePipeline) -> Self {
        Self {
            pipeline,
            attached: Arc::new(Mutex::new(HashSet::new())),
            reports: None,
        }
    }

    /// Forward the report of every finished run to `sender`.
    pub fn with_reports(mut self, sender: mpsc::UnboundedSender<PipelineReport>) -> Self {
        self.reports = Some(sender);
        self
    }

    pub fn attached_count(&self) -> usize {
        self.lock().len()
    }

    /// Consume a discovery stream until it ends. Returns how many surfaces were newly
    /// attached.
    ///
    /// Per-surface listeners keep running after this returns; calling `run` again with
    /// a fresh stream only attaches surfaces that are not currently attached.
    pub async fn run<S>(&self, surfaces: S) -> usize
    where
        S: Stream<Item = DiscoveredSurface>,
    {
        pin_mut!(surfaces);
        let mut newly_attached = 0;

        while let Some(discovered) = surfaces.next().await {
            let id = discovered.surface.id().to_string();
            if !self.lock().insert(id.clone()) {
                tracing::debug!(surface = %id, "Paste listener already attached");
                continue;
            }

            tracing::debug!(surface = %id, "Attaching paste listener");
            newly_attached += 1;
            let attachment = Attachment {
                attached: self.attached.clone(),
                id,
            };
            tokio::spawn(Self::listen(
                self.pipeline.clone(),
                discovered,
                self.reports.clone(),
                attachment,
            ));
        }

        newly_attached
    }

    async fn listen(
        pipeline: PastePipeline,
        discovered: DiscoveredSurface,
        reports: Option<mpsc::UnboundedSender<PipelineReport>>,
        _attachment: Attachment,
    ) {
        let DiscoveredSurface {
            surface,
            mut events,
        } = discovered;

        while let Some(mut event) = events.recv().await {
            let Some(handle) = pipeline.spawn_paste(&mut event, surface.clone()) else {
                tracing::trace!(surface = %surface.id(), "Paste without image ignored");
                continue;
            };

            if let Some(sender) = &reports {
                let sender = sender.clone();
                tokio::spawn(async move {
                    match handle.await {
                        Ok(report) => {
                            let _ = sender.send(report);
                        }
                        Err(e) => tracing::error!(error = %e, "Paste task panicked"),
                    }
                });
            }
        }

        tracing::debug!(surface = %surface.id(), "Paste event channel closed");
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        lock_set(&self.attached)
    }
}

fn lock_set(attached: &AttachedSet) -> MutexGuard<'_, HashSet<String>> {
    attached.lock().unwrap_or_else(|e| e.into_inner())
}
