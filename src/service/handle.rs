// SPDX-License-Identifier: MPL-2.0
//! Client side of the scheduler service.

use crate::error::{Error, Result};
use crate::notifications::{
    Admission, EffectTicket, Message, MessageKey, SchedulerSnapshot, SchedulerState, Settings,
};
use tokio::sync::{mpsc, oneshot};

/// Point-in-time view of the scheduler, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub state: SchedulerState,
    pub pending: usize,
    pub displayed: usize,
    pub removal: usize,
    pub in_flight: Option<EffectTicket>,
}

/// Commands sent to the service task.
#[derive(Debug)]
pub(crate) enum Command {
    Enqueue {
        messages: Vec<Message>,
        reply: oneshot::Sender<Result<Vec<Admission>>>,
    },
    Show {
        reply: oneshot::Sender<Result<()>>,
    },
    Clear {
        interrupt: bool,
        reply: oneshot::Sender<()>,
    },
    Dismiss {
        key: MessageKey,
        reply: oneshot::Sender<Result<bool>>,
    },
    Configure {
        settings: Settings,
        reply: oneshot::Sender<Result<()>>,
    },
    Snapshot {
        reply: oneshot::Sender<SchedulerSnapshot>,
    },
    Restore {
        snapshot: SchedulerSnapshot,
        reply: oneshot::Sender<()>,
    },
    Status {
        reply: oneshot::Sender<Status>,
    },
    EffectCompleted(EffectTicket),
    EffectCancelled(EffectTicket),
    Shutdown,
}

/// Handle for talking to a running scheduler service.
///
/// This handle is cheap to clone and can be shared across tasks. Surfaces
/// keep one to report effect outcomes.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl SchedulerHandle {
    pub(crate) fn new(command_tx: mpsc::UnboundedSender<Command>) -> Self {
        Self { command_tx }
    }

    /// Submits one message.
    pub async fn enqueue(&self, message: Message) -> Result<Admission> {
        let admissions = self.enqueue_all(vec![message]).await?;
        admissions.into_iter().next().ok_or(Error::ServiceStopped)
    }

    /// Submits several messages in order.
    pub async fn enqueue_all(&self, messages: Vec<Message>) -> Result<Vec<Admission>> {
        self.request(|reply| Command::Enqueue { messages, reply })
            .await?
    }

    pub async fn show(&self) -> Result<()> {
        self.request(|reply| Command::Show { reply }).await?
    }

    pub async fn clear(&self, interrupt: bool) -> Result<()> {
        self.request(|reply| Command::Clear { interrupt, reply })
            .await
    }

    /// Returns whether the dismissal was honored.
    pub async fn dismiss(&self, key: MessageKey) -> Result<bool> {
        self.request(|reply| Command::Dismiss { key, reply }).await?
    }

    pub async fn configure(&self, settings: Settings) -> Result<()> {
        self.request(|reply| Command::Configure { settings, reply })
            .await?
    }

    pub async fn snapshot(&self) -> Result<SchedulerSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Replaces the scheduler state. Call [`Self::show`] afterwards.
    pub async fn restore(&self, snapshot: SchedulerSnapshot) -> Result<()> {
        self.request(|reply| Command::Restore { snapshot, reply })
            .await
    }

    pub async fn status(&self) -> Result<Status> {
        self.request(|reply| Command::Status { reply }).await
    }

    /// Reports that an awaited effect finished. Non-blocking.
    pub fn complete_effect(&self, ticket: EffectTicket) -> Result<()> {
        self.send(Command::EffectCompleted(ticket))
    }

    /// Reports that the host cancelled an awaited effect. Non-blocking.
    pub fn cancel_effect(&self, ticket: EffectTicket) -> Result<()> {
        self.send(Command::EffectCancelled(ticket))
    }

    /// Stops the service loop. The task then yields the scheduler back.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    /// Returns true once the service loop has exited.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::ServiceStopped)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.send(command(reply))?;
        response.await.map_err(|_| Error::ServiceStopped)
    }
}
