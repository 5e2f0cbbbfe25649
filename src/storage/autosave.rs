use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::ledger::Ledger;
use crate::tracker::Subscriber;

use super::StorageBackend;

enum AutosaveMessage {
    Snapshot(Ledger),
    Shutdown,
}

/// Background thread that persists committed snapshots off the caller's path.
///
/// Queued snapshots are coalesced before each write, so a burst of changes
/// costs one save. A failed save is logged and the worker keeps running with
/// the in-memory state untouched.
pub struct AutosaveWorker {
    sender: Sender<AutosaveMessage>,
    handle: Option<JoinHandle<()>>,
}

impl AutosaveWorker {
    pub fn spawn(storage: Arc<dyn StorageBackend>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || {
            while let Ok(message) = receiver.recv() {
                let mut snapshot = match message {
                    AutosaveMessage::Snapshot(ledger) => ledger,
                    AutosaveMessage::Shutdown => break,
                };
                let mut stop = false;
                // Only the latest queued state matters.
                loop {
                    match receiver.try_recv() {
                        Ok(AutosaveMessage::Snapshot(newer)) => snapshot = newer,
                        Ok(AutosaveMessage::Shutdown) => {
                            stop = true;
                            break;
                        }
                        Err(_) => break,
                    }
                }
                if let Err(err) = storage.save(&snapshot) {
                    tracing::warn!("autosave failed, keeping in-memory state: {err}");
                }
                if stop {
                    break;
                }
            }
        });
        Self {
            sender,
            handle: Some(handle),
        }
    }

    /// Subscriber that forwards every committed state to the worker thread.
    pub fn subscriber(&self) -> Subscriber {
        let sender = self.sender.clone();
        Box::new(move |ledger: &Ledger| {
            let _ = sender.send(AutosaveMessage::Snapshot(ledger.clone()));
        })
    }

    /// Writes any pending snapshot and stops the worker.
    pub fn shutdown(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(AutosaveMessage::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for AutosaveWorker {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Result, TrackerError};
    use crate::storage::JsonStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn snapshots_reach_disk_before_shutdown_completes() {
        let temp = TempDir::new().expect("temp dir");
        let storage = Arc::new(JsonStorage::new(temp.path()));
        let worker = AutosaveWorker::spawn(Arc::clone(&storage) as Arc<dyn StorageBackend>);
        let subscriber = worker.subscriber();

        let mut ledger = Ledger::new();
        ledger.monthly_limit = 1250.0;
        subscriber(&ledger);
        drop(subscriber);
        worker.shutdown();

        let loaded = storage.load().expect("load state");
        assert_eq!(loaded.monthly_limit, 1250.0);
    }

    #[test]
    fn failed_saves_do_not_stop_the_worker() {
        struct FlakyBackend {
            inner: JsonStorage,
            attempts: AtomicUsize,
        }
        impl StorageBackend for FlakyBackend {
            fn save(&self, ledger: &Ledger) -> Result<()> {
                if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(TrackerError::Storage("disk briefly unavailable".into()));
                }
                self.inner.save(ledger)
            }
            fn load(&self) -> Result<Ledger> {
                self.inner.load()
            }
        }

        let temp = TempDir::new().expect("temp dir");
        let storage = Arc::new(FlakyBackend {
            inner: JsonStorage::new(temp.path()),
            attempts: AtomicUsize::new(0),
        });
        let worker = AutosaveWorker::spawn(Arc::clone(&storage) as Arc<dyn StorageBackend>);
        let subscriber = worker.subscriber();

        let mut first = Ledger::new();
        first.monthly_limit = 111.0;
        subscriber(&first);
        // Wait out the failing save so the next snapshot is not coalesced
        // into it.
        for _ in 0..200 {
            if storage.attempts.load(Ordering::SeqCst) >= 1 {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        let mut second = Ledger::new();
        second.monthly_limit = 222.0;
        subscriber(&second);
        drop(subscriber);
        worker.shutdown();

        assert!(storage.attempts.load(Ordering::SeqCst) >= 2);
        let loaded = storage.inner.load().expect("load state");
        assert_eq!(loaded.monthly_limit, 222.0);
    }
}
