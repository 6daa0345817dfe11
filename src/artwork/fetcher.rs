use futures::FutureExt;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::port::ImagePort;
use super::source::ArtworkSource;
use super::types::{Artwork, ArtworkError, ArtworkEvent};
use crate::adapter::{ImageSlot, SlotId};

/// Default number of artworks kept in memory.
pub const DEFAULT_MEMORY_CACHE_SIZE: usize = 256;

type Sources = Arc<Vec<Arc<dyn ArtworkSource>>>;

/// Tokio-backed `ImagePort`.
///
/// At most one task runs per key; every slot that asks for a key while its
/// task is in flight gets its own completion event.
pub struct ArtworkFetcher {
    runtime: Handle,
    sources: Sources,
    memory: Arc<Mutex<LruCache<String, Arc<Artwork>>>>,
    in_flight: Arc<Mutex<HashMap<String, Vec<SlotId>>>>,
    events: mpsc::Sender<ArtworkEvent>,
}

impl ArtworkFetcher {
    /// Create a fetcher that spawns onto the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(
        sources: Vec<Arc<dyn ArtworkSource>>,
        memory_capacity: usize,
        events: mpsc::Sender<ArtworkEvent>,
    ) -> Self {
        Self::with_handle(Handle::current(), sources, memory_capacity, events)
    }

    pub fn with_handle(
        runtime: Handle,
        sources: Vec<Arc<dyn ArtworkSource>>,
        memory_capacity: usize,
        events: mpsc::Sender<ArtworkEvent>,
    ) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            runtime,
            sources: Arc::new(sources),
            memory: Arc::new(Mutex::new(LruCache::new(capacity))),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    /// Memory-cached artwork for `key`, if any.
    pub fn cached(&self, key: &str) -> Option<Arc<Artwork>> {
        self.memory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn cache_len(&self) -> usize {
        self.memory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of keys with a task still running.
    pub fn pending(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn spawn_fetch(&self, key: String) {
        let sources = Arc::clone(&self.sources);
        let memory = Arc::clone(&self.memory);
        let in_flight = Arc::clone(&self.in_flight);
        let tx = self.events.clone();

        tracing::debug!(key = %key, "Spawning artwork fetch");

        self.runtime.spawn(async move {
            let outcome = AssertUnwindSafe(resolve(&sources, &key))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(ArtworkError::Panicked(panic_message(&*panic))));

            if let Ok(artwork) = &outcome {
                memory
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .put(key.clone(), Arc::clone(artwork));
            }

            let waiting = in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key)
                .unwrap_or_default();

            for slot in waiting {
                let event = match &outcome {
                    Ok(artwork) => ArtworkEvent::Loaded {
                        slot,
                        key: key.clone(),
                        artwork: Arc::clone(artwork),
                    },
                    Err(e) => ArtworkEvent::Failed {
                        slot,
                        key: key.clone(),
                        error: e.to_string(),
                    },
                };
                if let Err(e) = tx.send(event).await {
                    tracing::warn!(error = %e, "Failed to send artwork event (receiver dropped)");
                    break;
                }
            }
        });
    }
}

impl ImagePort for ArtworkFetcher {
    fn load(&self, key: &str, target: &mut ImageSlot) {
        target.request(key);

        if let Some(artwork) = self.cached(key) {
            target.fill(key, artwork);
            return;
        }

        let first_request = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            let waiting = in_flight.entry(key.to_string()).or_default();
            if !waiting.contains(&target.id()) {
                waiting.push(target.id());
            }
            waiting.len() == 1
        };

        if first_request {
            self.spawn_fetch(key.to_string());
        }
    }

    fn is_configured(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// Walk the sources in order; the first hit wins, errors fall through to the next.
async fn resolve(sources: &[Arc<dyn ArtworkSource>], key: &str) -> Result<Arc<Artwork>, ArtworkError> {
    for source in sources {
        match source.fetch(key).await {
            Ok(Some(artwork)) => return Ok(Arc::new(artwork)),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(source = source.name(), key = %key, error = %e, "Artwork source failed");
            }
        }
    }
    Err(ArtworkError::NotFound(key.to_string()))
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
