//! Auto-refresh Scheduler
//! Re-runs the snapshot pipeline on a fixed interval in a background thread.
//!
//! Control changes sent while the scheduler waits are kept, not discarded:
//! the latest controls win and are used at the next scheduled render. The
//! wait is not restarted by a control change. Turning `auto_refresh` off
//! stops the scheduler.

use super::controls::DashboardControls;
use super::snapshot::DashboardSnapshot;
use crate::data::Datasets;
use crate::error::Result;
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Commands sent from the shell to the scheduler thread
enum RefreshCommand {
    UpdateControls(DashboardControls),
    Stop,
}

/// Handle to a running scheduler. Dropping it stops the thread.
pub struct RefreshHandle {
    tx: Sender<RefreshCommand>,
    thread: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Replace the controls used by the next render.
    ///
    /// Returns `false` once the scheduler has stopped.
    pub fn update_controls(&self, controls: DashboardControls) -> bool {
        self.tx.send(RefreshCommand::UpdateControls(controls)).is_ok()
    }

    /// Stop the scheduler and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Block until the scheduler stops on its own.
    pub fn wait(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Refresh thread panicked");
            }
        }
    }

    fn shutdown(&mut self) {
        let _ = self.tx.send(RefreshCommand::Stop);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Refresh thread panicked");
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// `None` when `interval` cannot be represented as a point in time.
fn next_deadline(interval: Duration) -> Option<Instant> {
    let deadline = Instant::now().checked_add(interval);
    if deadline.is_none() {
        log::error!("Refresh interval {:?} is out of range, stopping scheduler", interval);
    }
    deadline
}

pub struct RefreshScheduler;

impl RefreshScheduler {
    /// Start re-rendering every `interval`. The first render happens after
    /// one full interval; the shell renders the initial page itself.
    pub fn start<F>(
        datasets: Arc<Datasets>,
        controls: DashboardControls,
        interval: Duration,
        on_render: F,
    ) -> RefreshHandle
    where
        F: FnMut(Result<DashboardSnapshot>) + Send + 'static,
    {
        let (tx, rx) = channel();

        let thread = thread::spawn(move || {
            let mut on_render = on_render;
            let mut controls = controls;
            let mut renders = 0usize;
            let Some(mut deadline) = next_deadline(interval) else {
                return;
            };

            loop {
                let wait = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(wait) {
                    Ok(RefreshCommand::UpdateControls(next)) => {
                        if !next.auto_refresh {
                            log::info!("Auto-refresh turned off, stopping scheduler");
                            break;
                        }
                        log::debug!("Controls updated, applied at next render");
                        controls = next;
                    }
                    Ok(RefreshCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        renders += 1;
                        log::info!("Auto-refresh render #{}", renders);
                        on_render(DashboardSnapshot::build(&datasets, &controls));
                        match next_deadline(interval) {
                            Some(next) => deadline = next,
                            None => break,
                        }
                    }
                }
            }

            log::debug!("Refresh scheduler exited after {} renders", renders);
        });

        RefreshHandle {
            tx,
            thread: Some(thread),
        }
    }
}
