//! Background write queue for durable state.
//!
//! # Responsibility
//! - Apply storage writes off the caller's thread, best-effort.
//! - Preserve enqueue order so the durable snapshot converges on the
//!   latest in-memory state.
//!
//! # Invariants
//! - Write failures are logged, never surfaced to the caller.
//! - Dropping the queue drains every pending command before returning.

use crate::kv::KvStore;
use log::{error, warn};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

enum WriteCommand {
    Set { key: String, value: String },
    Remove { key: String },
    /// Rendezvous: acknowledged once every prior command has been applied.
    Flush(mpsc::SyncSender<()>),
}

/// Order-preserving, fire-and-forget writer over a shared [`KvStore`].
pub(crate) struct WriteQueue {
    kv: Arc<dyn KvStore>,
    tx: Option<mpsc::Sender<WriteCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl WriteQueue {
    /// Starts the writer thread for the given backend.
    ///
    /// If the thread cannot be spawned the queue degrades to applying
    /// writes synchronously on the caller's thread, still best-effort.
    pub(crate) fn start(kv: Arc<dyn KvStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_kv = Arc::clone(&kv);

        let spawned = thread::Builder::new()
            .name("remindo-kv-writer".to_string())
            .spawn(move || run(worker_kv, rx));

        match spawned {
            Ok(handle) => Self {
                kv,
                tx: Some(tx),
                handle: Some(handle),
            },
            Err(err) => {
                error!(
                    "event=writer_start module=store status=error error={err} fallback=sync"
                );
                Self {
                    kv,
                    tx: None,
                    handle: None,
                }
            }
        }
    }

    pub(crate) fn enqueue_set(&self, key: &str, value: &str) {
        self.enqueue(WriteCommand::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    pub(crate) fn enqueue_remove(&self, key: &str) {
        self.enqueue(WriteCommand::Remove {
            key: key.to_string(),
        });
    }

    /// Blocks until every command enqueued before this call has been
    /// applied. Used by tests and orderly shutdown.
    pub(crate) fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::sync_channel(0);
        if tx.send(WriteCommand::Flush(ack_tx)).is_ok() {
            // A dropped ack sender means the worker exited; nothing left
            // to wait for either way.
            let _ = ack_rx.recv();
        }
    }

    fn enqueue(&self, command: WriteCommand) {
        match &self.tx {
            Some(tx) => {
                if tx.send(command).is_err() {
                    warn!("event=kv_write module=store status=error error=writer_gone");
                }
            }
            None => apply(self.kv.as_ref(), command),
        }
    }
}

impl Drop for WriteQueue {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(kv: Arc<dyn KvStore>, rx: mpsc::Receiver<WriteCommand>) {
    while let Ok(command) = rx.recv() {
        apply(kv.as_ref(), command);
    }
}

fn apply(kv: &dyn KvStore, command: WriteCommand) {
    match command {
        WriteCommand::Set { key, value } => {
            if let Err(err) = kv.set(&key, &value) {
                warn!("event=kv_write module=store status=error op=set key={key} error={err}");
            }
        }
        WriteCommand::Remove { key } => {
            if let Err(err) = kv.remove(&key) {
                warn!("event=kv_write module=store status=error op=remove key={key} error={err}");
            }
        }
        WriteCommand::Flush(ack) => {
            let _ = ack.send(());
        }
    }
}
