//! Single-threaded delivery context for presentation updates.
//!
//! Background work never touches presentation state directly. It posts a job
//! through a [`UiHandle`], and the thread that owns the [`UiQueue`] runs the
//! job against its state when it next dispatches.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Job<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

/// Receiving side, owned by the presentation thread.
pub struct UiQueue<S> {
    rx: UnboundedReceiver<Job<S>>,
}

/// Cloneable sending side, handed to background tasks.
pub struct UiHandle<S> {
    tx: UnboundedSender<Job<S>>,
}

impl<S> Clone for UiHandle<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S> std::fmt::Debug for UiHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiHandle")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl<S> UiQueue<S> {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (UiQueue<S>, UiHandle<S>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (UiQueue { rx }, UiHandle { tx })
    }

    /// Run every job that is already queued, without waiting. Returns how many ran.
    pub fn try_dispatch(&mut self, state: &mut S) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job(state);
            ran += 1;
        }
        ran
    }

    /// Wait for the next job and run it.
    ///
    /// Returns `false` once every [`UiHandle`] has been dropped and the queue is empty.
    pub async fn dispatch_next(&mut self, state: &mut S) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job(state);
                true
            }
            None => false,
        }
    }
}

impl<S> UiHandle<S> {
    /// Queue `job` for the presentation thread.
    ///
    /// Returns `false` if the queue is gone; the job is dropped unrun.
    pub fn run_on_ui_thread<F>(&self, job: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        if self.tx.send(Box::new(job)).is_err() {
            tracing::debug!("presentation queue closed; dropping update");
            return false;
        }
        true
    }
}
