use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use crate::enums::save_status::SaveStatus;
use crate::errors::HerovaultError;
use crate::structs::config::sync_config::SyncConfig;
use crate::structs::pending_change_set::PendingChangeSet;
use crate::traits::record_store::RecordStore;

type ErrorCallback = Box<dyn Fn(&HerovaultError) + Send + Sync>;

/// Coalesces a stream of per-field edits into the minimum number of
/// remote writes for one record.
///
/// Edits accumulate in a [`PendingChangeSet`] and are flushed after a
/// trailing debounce: every new edit resets the timer, so only the
/// final value of a burst is written. The set is snapshotted and
/// cleared before the request goes out, so edits arriving while a
/// flush is in flight land in the next set, never in the in-flight
/// request. One instance per editable record; dropping it cancels the
/// debounce timer but never an in-flight request.
pub struct MutationCoalescer {
    shared: Arc<CoalescerShared>,
}

struct CoalescerShared {
    store: Arc<dyn RecordStore>,
    timing: SyncConfig,
    record_key: Mutex<Option<String>>,
    pending: Mutex<PendingChangeSet>,
    last_failed: Mutex<Option<HashMap<String, Value>>>,
    debounce_timer: Mutex<Option<JoinHandle<()>>>,
    // Serializes flushes so one record never has two writes in flight.
    flush_gate: tokio::sync::Mutex<()>,
    status_tx: watch::Sender<SaveStatus>,
    status_epoch: Arc<AtomicU64>,
    on_error: Mutex<Option<ErrorCallback>>,
}

impl MutationCoalescer {

    pub fn new(store: Arc<dyn RecordStore>, timing: SyncConfig) -> Self {
        let (status_tx, _status_rx) = watch::channel(SaveStatus::Idle);
        Self {
            shared: Arc::new(CoalescerShared {
                store,
                timing,
                record_key: Mutex::new(None),
                pending: Mutex::new(PendingChangeSet::new()),
                last_failed: Mutex::new(None),
                debounce_timer: Mutex::new(None),
                flush_gate: tokio::sync::Mutex::new(()),
                status_tx,
                status_epoch: Arc::new(AtomicU64::new(0)),
                on_error: Mutex::new(None),
            }),
        }
    }

    pub fn for_record(store: Arc<dyn RecordStore>, key: &str, timing: SyncConfig) -> Self {
        let coalescer = Self::new(store, timing);
        coalescer.set_record_key(key);
        coalescer
    }

    /// Identity may resolve after editing controls mount; edits
    /// recorded before this is called are held until a flush finds a key.
    pub fn set_record_key(&self, key: &str) {
        *self.shared.record_key.lock().unwrap() = Some(key.to_string());
    }

    pub fn on_flush_error(&self, callback: ErrorCallback) {
        *self.shared.on_error.lock().unwrap() = Some(callback);
    }

    pub fn status(&self) -> SaveStatus {
        *self.shared.status_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.shared.status_tx.subscribe()
    }

    pub fn has_pending(&self) -> bool {
        !self.shared.pending.lock().unwrap().is_empty()
    }

    /// Merge one field edit and (re)schedule the debounce flush.
    /// Overwrites any prior unflushed value for the same field.
    pub fn record_field_change(&self, field: &str, value: Value) {
        self.shared.pending.lock().unwrap().merge_field(field, value);
        self.schedule_flush();
    }

    /// Merge several field edits in one call, e.g. an editing-mode commit.
    pub fn record_field_changes(&self, fields: HashMap<String, Value>) {
        if fields.is_empty() {
            return;
        }
        self.shared.pending.lock().unwrap().merge_fields(fields);
        self.schedule_flush();
    }

    /// Flush whatever is pending without waiting for the debounce.
    /// A no-op when nothing is pending or no record key is set.
    pub async fn flush_now(&self) {
        Arc::clone(&self.shared).flush().await;
    }

    /// Put the most recent failed snapshot back into the pending set
    /// and reschedule. Failed flushes are never retried automatically;
    /// this is the opt-in hook for callers that want to. Fields edited
    /// again since the failure keep their newer values.
    pub fn requeue_failed(&self) -> bool {
        let failed = self.shared.last_failed.lock().unwrap().take();
        match failed {
            Some(fields) => {
                {
                    let mut pending = self.shared.pending.lock().unwrap();
                    let newer = pending.take();
                    pending.merge_fields(fields);
                    pending.merge_fields(newer);
                }
                self.schedule_flush();
                true
            }
            None => false,
        }
    }

    /// Cancel a scheduled-but-not-dispatched flush. An in-flight
    /// request is left alone.
    pub fn cancel_scheduled_flush(&self) {
        if let Some(timer) = self.shared.debounce_timer.lock().unwrap().take() {
            timer.abort();
        }
    }

    fn schedule_flush(&self) {
        let shared = Arc::clone(&self.shared);
        let debounce = self.shared.timing.debounce();
        let mut slot = self.shared.debounce_timer.lock().unwrap();
        if let Some(timer) = slot.take() {
            timer.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // The flush runs detached so that aborting this timer on a
            // later edit can never cancel an in-flight request.
            tokio::spawn(async move {
                shared.flush().await;
            });
        }));
    }
}

impl Drop for MutationCoalescer {
    fn drop(&mut self) {
        self.cancel_scheduled_flush();
    }
}

impl CoalescerShared {

    async fn flush(self: Arc<Self>) {
        let _gate = self.flush_gate.lock().await;

        let key = match self.record_key.lock().unwrap().clone() {
            Some(key) => key,
            None => return,
        };
        let snapshot = {
            let mut pending = self.pending.lock().unwrap();
            if pending.is_empty() {
                return;
            }
            pending.take()
        };

        self.set_status(SaveStatus::Saving);
        match self.store.update_record(&key, snapshot.clone()).await {
            Ok(record) => {
                log::debug!("💾 Flushed {} fields for record {}", snapshot.len(), record.id);
                self.set_transient_status(SaveStatus::Saved, self.timing.saved_window());
            }
            Err(e) => {
                log::debug!("Flush failed for record {}: {}", key, e);
                *self.last_failed.lock().unwrap() = Some(snapshot);
                if let Some(callback) = self.on_error.lock().unwrap().as_ref() {
                    callback(&e);
                }
                self.set_transient_status(SaveStatus::Error, self.timing.error_window());
            }
        }
    }

    fn set_status(&self, status: SaveStatus) {
        self.status_epoch.fetch_add(1, Ordering::SeqCst);
        self.status_tx.send_replace(status);
    }

    /// Publish a terminal status and revert it to `Idle` after the
    /// display window, unless a newer transition has happened since.
    fn set_transient_status(&self, status: SaveStatus, window: Duration) {
        let epoch = self.status_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.status_tx.send_replace(status);

        let tx = self.status_tx.clone();
        let epoch_counter = Arc::clone(&self.status_epoch);
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if epoch_counter.load(Ordering::SeqCst) == epoch {
                tx.send_replace(SaveStatus::Idle);
            }
        });
    }
}
