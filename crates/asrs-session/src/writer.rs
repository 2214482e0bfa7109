use std::sync::Arc;

use asrs_core::models::session::SessionState;
use asrs_storage::KeyValueStore;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::progress::ProgressStore;

enum Command {
    Save(SessionState),
    Clear,
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget handle onto the background progress writer.
///
/// Commands run one at a time in the order they were queued, so a newer
/// save always lands after an older one and a clear is never overtaken by a
/// save queued before it. Callers never wait on a write.
#[derive(Clone)]
pub struct ProgressWriter {
    tx: mpsc::UnboundedSender<Command>,
}

impl ProgressWriter {
    /// Start the writer task. Must be called inside a Tokio runtime. The task
    /// exits once every handle has been dropped and the queue is drained.
    pub fn spawn<S>(progress: Arc<ProgressStore<S>>) -> (Self, JoinHandle<()>)
    where
        S: KeyValueStore + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Save(session) => progress.save(&session).await,
                    Command::Clear => progress.clear().await,
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("progress writer stopped");
        });

        (Self { tx }, handle)
    }

    /// Queue a save of `session`. Returns immediately.
    pub fn save(&self, session: SessionState) {
        self.send(Command::Save(session));
    }

    /// Queue removal of the saved record. Returns immediately.
    pub fn clear(&self) {
        self.send(Command::Clear);
    }

    /// Wait until everything queued before this call has been written.
    /// For shutdown and tests; interaction paths never call this.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        self.send(Command::Flush(done));
        let _ = wait.await;
    }

    fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            warn!("progress writer has stopped; write dropped");
        }
    }
}
