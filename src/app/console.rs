// SPDX-License-Identifier: MPL-2.0
//! Terminal stand-ins for a real presentation layer.
//!
//! [`ConsoleSurface`] logs every transition and reports it complete once its
//! duration hint has elapsed on a tokio timer. [`ConsoleListener`] forwards
//! lifecycle notifications to the demo loop.

use crate::notifications::{
    EffectKind, EffectTarget, EffectTicket, Listener, Message, MessageKey, Surface,
    TransitionRequest,
};
use crate::service::SchedulerHandle;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Rendered line for one displayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub key: MessageKey,
    pub line: String,
}

/// View type used by the demo for messages with a title line.
pub const VIEW_TITLED: i32 = 1;

fn render(message: &Message) -> String {
    match message.view_type() {
        VIEW_TITLED => format!("[title] {}", message.content()),
        _ => message.content().to_string(),
    }
}

#[derive(Debug)]
pub struct ConsoleSurface {
    handle: SchedulerHandle,
    running: HashMap<EffectTicket, JoinHandle<()>>,
}

impl ConsoleSurface {
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            running: HashMap::new(),
        }
    }
}

impl Surface for ConsoleSurface {
    type Handle = MessageView;

    fn is_attached(&self) -> bool {
        !self.handle.is_closed()
    }

    fn create_handle(&mut self, key: MessageKey, message: &Message) -> Self::Handle {
        MessageView {
            key,
            line: render(message),
        }
    }

    fn release_handle(&mut self, key: MessageKey, handle: Self::Handle) {
        tracing::trace!(%key, line = %handle.line, "view released");
    }

    fn request_effect(&mut self, request: &TransitionRequest) {
        self.running.retain(|_, task| !task.is_finished());

        for step in &request.steps {
            let target = match step.target {
                EffectTarget::Container => "container".to_string(),
                EffectTarget::Message(key) => key.to_string(),
            };
            match step.kind {
                EffectKind::Reflow => tracing::info!(ticket = %request.ticket, "  reflow"),
                kind => tracing::info!(
                    ticket = %request.ticket,
                    effect = ?step.effect.map(|e| e.value()),
                    "  {kind:?} {target}"
                ),
            }
        }

        if !request.awaited {
            return;
        }
        let handle = self.handle.clone();
        let ticket = request.ticket;
        let duration = request.duration;
        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Err(err) = handle.complete_effect(ticket) {
                tracing::debug!(%ticket, %err, "completion dropped");
            }
        });
        self.running.insert(ticket, task);
    }

    fn cancel_effect(&mut self, ticket: EffectTicket) {
        if let Some(task) = self.running.remove(&ticket) {
            task.abort();
            tracing::info!(%ticket, "effect cancelled");
        }
    }
}

/// Lifecycle notification forwarded to the demo loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Displayed(MessageKey),
    Removed(MessageKey),
}

#[derive(Debug, Clone)]
pub struct ConsoleListener {
    events: mpsc::UnboundedSender<Lifecycle>,
}

impl ConsoleListener {
    pub fn new(events: mpsc::UnboundedSender<Lifecycle>) -> Self {
        Self { events }
    }
}

impl Listener for ConsoleListener {
    fn on_displayed(&mut self, key: MessageKey, message: &Message) {
        tracing::info!(%key, "shown: {}", render(message));
        let _ = self.events.send(Lifecycle::Displayed(key));
    }

    fn on_removed(&mut self, key: MessageKey, message: &Message) {
        tracing::info!(%key, "gone: {}", render(message));
        let _ = self.events.send(Lifecycle::Removed(key));
    }
}
