// SPDX-License-Identifier: MPL-2.0
//! Tokio driver for the scheduler.
//!
//! The service owns a [`Scheduler`] inside a single task. It drains the
//! command channel and sleeps until the scheduler's next deadline, so the
//! scheduler itself never needs a lock or a clock.
//!
//! ```ignore
//! let (handle, task) = service::spawn(scheduler);
//! handle.enqueue(Message::new("Copied")).await?;
//! handle.shutdown()?;
//! let scheduler = task.await?;
//! ```

mod handle;

pub use handle::{SchedulerHandle, Status};

use crate::notifications::{Scheduler, Surface};
use handle::Command;
use std::future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Receiving end of a service channel, created before the scheduler when its
/// surface needs a [`SchedulerHandle`].
#[derive(Debug)]
pub struct Inbox {
    command_rx: mpsc::UnboundedReceiver<Command>,
}

impl Inbox {
    /// Starts serving `scheduler` on the current tokio runtime.
    pub fn serve<S>(self, scheduler: Scheduler<S>) -> JoinHandle<Scheduler<S>>
    where
        S: Surface + Send + 'static,
        S::Handle: Send,
    {
        tokio::spawn(run(scheduler, self.command_rx))
    }
}

/// Creates a command channel without starting a task.
#[must_use]
pub fn channel() -> (SchedulerHandle, Inbox) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    (SchedulerHandle::new(command_tx), Inbox { command_rx })
}

/// Spawns a task driving `scheduler`.
///
/// The task ends on [`SchedulerHandle::shutdown`] and returns the scheduler.
/// It also ends once every handle has been dropped, but a surface that keeps
/// its own handle, like [`ConsoleSurface`](crate::app::ConsoleSurface), holds
/// the channel open until shutdown.
pub fn spawn<S>(scheduler: Scheduler<S>) -> (SchedulerHandle, JoinHandle<Scheduler<S>>)
where
    S: Surface + Send + 'static,
    S::Handle: Send,
{
    let (handle, inbox) = channel();
    (handle, inbox.serve(scheduler))
}

fn now() -> std::time::Instant {
    Instant::now().into_std()
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}

async fn run<S: Surface>(
    mut scheduler: Scheduler<S>,
    mut command_rx: mpsc::UnboundedReceiver<Command>,
) -> Scheduler<S> {
    tracing::debug!("scheduler service started");
    loop {
        let deadline = scheduler.next_deadline();
        tokio::select! {
            biased;

            command = command_rx.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => handle_command(&mut scheduler, command),
            },
            () = sleep_until(deadline) => {
                if let Err(err) = scheduler.advance(now()) {
                    tracing::warn!(%err, "timer dispatch failed");
                }
            }
        }
    }
    tracing::debug!(?scheduler, "scheduler service stopped");
    scheduler
}

fn handle_command<S: Surface>(scheduler: &mut Scheduler<S>, command: Command) {
    let now = now();
    match command {
        Command::Enqueue { messages, reply } => {
            let _ = reply.send(scheduler.enqueue_all(messages, now));
        }
        Command::Show { reply } => {
            let _ = reply.send(scheduler.show(now));
        }
        Command::Clear { interrupt, reply } => {
            scheduler.clear(interrupt, now);
            let _ = reply.send(());
        }
        Command::Dismiss { key, reply } => {
            let _ = reply.send(scheduler.dismiss(key, now));
        }
        Command::Configure { settings, reply } => {
            let _ = reply.send(scheduler.configure(settings, now));
        }
        Command::Snapshot { reply } => {
            let _ = reply.send(scheduler.snapshot());
        }
        Command::Restore { snapshot, reply } => {
            scheduler.restore(snapshot, now);
            let _ = reply.send(());
        }
        Command::Status { reply } => {
            let _ = reply.send(Status {
                state: scheduler.state(),
                pending: scheduler.pending_len(),
                displayed: scheduler.displayed_len(),
                removal: scheduler.removal_len(),
                in_flight: scheduler.in_flight(),
            });
        }
        Command::EffectCompleted(ticket) => {
            if let Err(err) = scheduler.effect_completed(ticket, now) {
                tracing::warn!(%ticket, %err, "dispatch after completion failed");
            }
        }
        Command::EffectCancelled(ticket) => {
            if let Err(err) = scheduler.effect_cancelled(ticket, now) {
                tracing::warn!(%ticket, %err, "dispatch after cancellation failed");
            }
        }
        Command::Shutdown => {}
    }
}
