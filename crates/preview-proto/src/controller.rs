//! Fetch controller: turns target-address changes into fetch cycles.
//!
//! One cycle = Loading → one request → normalize (or fall back) → Idle.
//! Cycles are never cancelled.  When a new address arrives while a request is
//! outstanding both run to completion; `Sequencing` decides whether the stale
//! one may still write the record.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::MetadataSource;
use crate::config::{Config, Sequencing};
use crate::error::{FetchError, FetchResult};
use crate::normalize::{extract_data, normalize};
use crate::protocol::{FetchOutcome, PreviewEvent, PreviewRecord, PreviewState};
use crate::state::PreviewStore;
use crate::theme::ThemePolicy;

const EVENT_CAPACITY: usize = 64;

pub struct FetchController<S> {
    source: Arc<S>,
    store: Arc<PreviewStore>,
    theme: ThemePolicy,
    sequencing: Sequencing,
    events: broadcast::Sender<PreviewEvent>,
}

impl<S: MetadataSource> FetchController<S> {
    pub fn new(source: S, theme: ThemePolicy, sequencing: Sequencing) -> Self {
        Self::with_shared_source(Arc::new(source), theme, sequencing)
    }

    /// Like `new`, for a source the caller keeps a handle to.
    pub fn with_shared_source(source: Arc<S>, theme: ThemePolicy, sequencing: Sequencing) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            source,
            store: Arc::new(PreviewStore::new()),
            theme,
            sequencing,
            events,
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source, config.theme.clone(), config.fetch.sequencing)
    }

    pub fn store(&self) -> Arc<PreviewStore> {
        Arc::clone(&self.store)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PreviewEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> PreviewState {
        self.store.get_state().await
    }

    /// Assign the target address.  A change to a non-empty value marks the
    /// card Loading and spawns one fetch cycle; the handle resolves to how
    /// that cycle ended.  Anything else only records the assignment.
    pub async fn set_target_address(
        &self,
        address: impl Into<String>,
    ) -> Option<JoinHandle<FetchOutcome>> {
        let address = address.into();
        let ticket = self.store.assign_target(&address).await?;
        debug!(ticket, %address, "fetch cycle started");
        let _ = self.events.send(PreviewEvent::Loading {
            ticket,
            address: address.clone(),
        });

        let cycle = Cycle {
            ticket,
            address,
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            theme: self.theme.clone(),
            sequencing: self.sequencing,
            events: self.events.clone(),
        };
        Some(tokio::spawn(cycle.run()))
    }
}

/// Everything one spawned cycle needs, detached from the controller.
struct Cycle<S> {
    ticket: u64,
    address: String,
    source: Arc<S>,
    store: Arc<PreviewStore>,
    theme: ThemePolicy,
    sequencing: Sequencing,
    events: broadcast::Sender<PreviewEvent>,
}

impl<S: MetadataSource> Cycle<S> {
    async fn run(self) -> FetchOutcome {
        let fetched = AssertUnwindSafe(self.fetch_record())
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(FetchError::Aborted(panic_message(&*panic))));

        match fetched {
            Ok(record) => {
                if self.commit(record.clone(), None).await {
                    info!(ticket = self.ticket, address = %self.address, title = %record.title, "preview loaded");
                    let _ = self.events.send(PreviewEvent::Loaded {
                        ticket: self.ticket,
                        record: record.clone(),
                    });
                    FetchOutcome::Applied(record)
                } else {
                    self.discarded()
                }
            }
            Err(e) => {
                warn!(ticket = self.ticket, address = %self.address, error = %e, "metadata fetch failed");
                let error = e.to_string();
                let record = PreviewRecord::failed(self.theme.accent_for(&self.address));
                if self.commit(record.clone(), Some(error.clone())).await {
                    let _ = self.events.send(PreviewEvent::Failed {
                        ticket: self.ticket,
                        address: self.address.clone(),
                        error: error.clone(),
                    });
                    FetchOutcome::Failed { record, error }
                } else {
                    self.discarded()
                }
            }
        }
    }

    async fn fetch_record(&self) -> FetchResult<PreviewRecord> {
        let body = self.source.fetch(&self.address).await?;
        let data = extract_data(&body).ok_or(FetchError::MissingData)?;
        Ok(normalize(data, &self.address, &self.theme))
    }

    /// Single completion step: record, error and Idle land together.
    async fn commit(&self, record: PreviewRecord, error: Option<String>) -> bool {
        self.store
            .complete(self.ticket, record, error, self.sequencing)
            .await
    }

    fn discarded(&self) -> FetchOutcome {
        debug!(ticket = self.ticket, address = %self.address, "stale response discarded");
        let _ = self.events.send(PreviewEvent::Discarded {
            ticket: self.ticket,
        });
        FetchOutcome::Discarded {
            ticket: self.ticket,
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
