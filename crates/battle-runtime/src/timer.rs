//! Cancellable delayed-command delivery.
//!
//! The battle core models its continuations as explicit suspend points; the
//! runtime turns each one into a spawned sleep that posts a [`Command`] back
//! into the app's event loop. The handle aborts its task on drop, so a
//! torn-down battle never fires a stale callback.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::command::Command;

/// Handle to one pending delayed command.
#[derive(Debug)]
pub struct DelayHandle {
    task: JoinHandle<()>,
}

impl DelayHandle {
    /// Schedules `command` for delivery on `tx` after `delay`.
    pub fn schedule(delay: Duration, tx: mpsc::Sender<Command>, command: Command) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(command).await.is_err() {
                tracing::debug!(?command, "command channel closed before delivery");
            }
        });
        Self { task }
    }

    /// Cancels the pending delivery.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for DelayHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
