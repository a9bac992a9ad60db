use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use database_traits::GenericDao;
use events_dao::{EventStore, InMemoryEventStore};
use events_errors::StoreError;
use events_models::Event;
use events_queries::EventQuery;
use tokio::sync::Notify;
use uuid::Uuid;

/// Handles for a paused `find_by_id`. `reached` fires once the row has been
/// read; the call returns after `release` is notified.
#[derive(Clone)]
pub struct ReadGate {
    pub reached: Arc<Notify>,
    pub release: Arc<Notify>,
}

/// [`InMemoryEventStore`] with switchable failure modes.
pub struct FlakyEventStore {
    inner: InMemoryEventStore,
    /// Reads fail with [`StoreError::Unavailable`].
    pub fail_reads: AtomicBool,
    /// Writes fail with [`StoreError::Unavailable`].
    pub fail_writes: AtomicBool,
    /// `add` and `update` report `false` without writing.
    pub reject_writes: AtomicBool,
    /// `add` and `update` report `true` without writing.
    pub lose_writes: AtomicBool,
    find_calls: AtomicUsize,
    query_calls: AtomicUsize,
    gate: Mutex<Option<ReadGate>>,
}

impl FlakyEventStore {
    pub fn new(inner: InMemoryEventStore) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            reject_writes: AtomicBool::new(false),
            lose_writes: AtomicBool::new(false),
            find_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &InMemoryEventStore { &self.inner }

    /// Number of `find_by_id` calls so far.
    pub fn find_calls(&self) -> usize { self.find_calls.load(Ordering::SeqCst) }

    /// Number of `all`, `count_matching` and `find_matching` calls so far.
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Pauses the next `find_by_id` after it has read its row.
    pub fn pause_next_find(&self) -> ReadGate {
        let gate = ReadGate {
            reached: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        if let Ok(mut slot) = self.gate.lock() {
            *slot = Some(gate.clone());
        }
        gate
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        Ok(())
    }

    /// `Some(result)` when the write must be short-circuited.
    fn intercept_write(&self) -> Option<bool> {
        if self.reject_writes.load(Ordering::SeqCst) {
            Some(false)
        }
        else if self.lose_writes.load(Ordering::SeqCst) {
            Some(true)
        }
        else {
            None
        }
    }
}

#[async_trait]
impl GenericDao for FlakyEventStore {
    type Error = StoreError;
    type ID = Uuid;
    type Model = Event;

    async fn add(&self, event: &Event) -> Result<bool, StoreError> {
        self.check_writes()?;
        match self.intercept_write() {
            Some(result) => Ok(result),
            None => self.inner.add(event).await,
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check_writes()?;
        self.inner.delete(id).await
    }

    async fn all(&self) -> Result<Vec<Event>, StoreError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        self.inner.all().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        let found = self.inner.find_by_id(id).await?;

        let gate = self.gate.lock().ok().and_then(|mut slot| slot.take());
        if let Some(gate) = gate {
            gate.reached.notify_one();
            gate.release.notified().await;
        }

        Ok(found)
    }

    async fn update(&self, event: &Event) -> Result<bool, StoreError> {
        self.check_writes()?;
        match self.intercept_write() {
            Some(result) => Ok(result),
            None => self.inner.update(event).await,
        }
    }
}

#[async_trait]
impl EventStore for FlakyEventStore {
    async fn count_matching(
        &self, query: &EventQuery,
    ) -> Result<u64, StoreError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        self.inner.count_matching(query).await
    }

    async fn find_matching(
        &self, query: &EventQuery,
    ) -> Result<Vec<Event>, StoreError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        self.inner.find_matching(query).await
    }
}
