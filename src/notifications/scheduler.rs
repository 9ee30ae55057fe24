// SPDX-License-Identifier: MPL-2.0
//! The display scheduler.
//!
//! The `Scheduler` decides, on every trigger, whether to start a removal, a
//! replacement or an addition. It never runs two transitions at once, it
//! never shows more messages than the concurrency cap allows, and it waits
//! for the cooldown between two removals so each change stays visible.
//!
//! It is a plain state machine: every entry point takes the current instant,
//! timers are deadlines read through [`Scheduler::next_deadline`] and fired
//! with [`Scheduler::advance`], and effect outcomes come back through
//! [`Scheduler::effect_completed`] and [`Scheduler::effect_cancelled`].

use super::message::{Message, MessageKey};
use super::queue::{DisplaySet, Entry, PendingQueue, RemovalQueue};
use super::settings::Settings;
use super::snapshot::SchedulerSnapshot;
use super::surface::{
    EffectKind, EffectStep, EffectTicket, Listener, Surface, TransitionRequest,
};
use super::timers::{Fired, Timers};
use crate::diagnostics::{CircularBuffer, TransitionKind, TransitionOutcome, TransitionRecord};
use crate::domain::scheduling::DisplayDuration;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Externally visible state of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing in flight, nothing throttled.
    Idle,
    /// One transition is in flight.
    Animating,
    /// A removal finished recently; the next removal has to wait.
    Cooling,
}

/// Outcome of submitting a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted(MessageKey),
    /// A message with the same non-zero id is already queued or shown.
    Duplicate,
}

impl Admission {
    #[must_use]
    pub fn key(self) -> Option<MessageKey> {
        match self {
            Admission::Accepted(key) => Some(key),
            Admission::Duplicate => None,
        }
    }

    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Admission::Accepted(_))
    }
}

/// What woke the dispatcher up. Only used for logging.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Enqueue,
    Show,
    Timer,
    Configure,
    Completed,
    Cancelled,
    Dismiss,
}

enum Plan<H> {
    Reveal {
        entering: MessageKey,
    },
    Add {
        entering: MessageKey,
    },
    /// The entering message joins the display set only on completion, so it
    /// lives here (with its handle) while the swap runs.
    Replace {
        leaving: MessageKey,
        entering: Entry,
        handle: H,
    },
    Remove {
        leaving: MessageKey,
    },
    Conceal {
        leaving: MessageKey,
    },
}

impl<H> Plan<H> {
    fn kind(&self) -> TransitionKind {
        match self {
            Plan::Reveal { .. } => TransitionKind::Reveal,
            Plan::Add { .. } => TransitionKind::Add,
            Plan::Replace { .. } => TransitionKind::Replace,
            Plan::Remove { .. } => TransitionKind::Remove,
            Plan::Conceal { .. } => TransitionKind::Conceal,
        }
    }

    fn leaving(&self) -> Option<MessageKey> {
        match self {
            Plan::Replace { leaving, .. }
            | Plan::Remove { leaving }
            | Plan::Conceal { leaving } => Some(*leaving),
            Plan::Reveal { .. } | Plan::Add { .. } => None,
        }
    }

    fn entering(&self) -> Option<MessageKey> {
        match self {
            Plan::Reveal { entering } | Plan::Add { entering } => Some(*entering),
            Plan::Replace { entering, .. } => Some(entering.key),
            Plan::Remove { .. } | Plan::Conceal { .. } => None,
        }
    }

    fn record(&self, started_at: Instant, finished_at: Instant, outcome: TransitionOutcome) -> TransitionRecord {
        TransitionRecord {
            kind: self.kind(),
            leaving: self.leaving(),
            entering: self.entering(),
            started_at,
            finished_at,
            outcome,
        }
    }
}

struct Transition<H> {
    ticket: EffectTicket,
    plan: Plan<H>,
    started_at: Instant,
}

/// Queues messages and paces their display on a [`Surface`].
pub struct Scheduler<S: Surface> {
    surface: S,
    settings: Settings,
    listener: Option<Box<dyn Listener + Send>>,
    pending: PendingQueue,
    current: DisplaySet,
    removal: RemovalQueue,
    handles: HashMap<MessageKey, S::Handle>,
    in_flight: Option<Transition<S::Handle>>,
    timers: Timers,
    history: CircularBuffer<TransitionRecord>,
    next_key: u64,
    next_ticket: u64,
}

impl<S: Surface> Scheduler<S> {
    pub fn new(surface: S, settings: Settings) -> Self {
        Self {
            surface,
            settings,
            listener: None,
            pending: PendingQueue::new(),
            current: DisplaySet::new(),
            removal: RemovalQueue::new(),
            handles: HashMap::new(),
            in_flight: None,
            timers: Timers::new(),
            history: CircularBuffer::new(settings.history_capacity),
            next_key: 1,
            next_ticket: 1,
        }
    }

    /// Sets the owner listener.
    #[must_use]
    pub fn with_listener(mut self, listener: impl Listener + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    /// Queues a message and tries to show it.
    ///
    /// A message whose non-zero id is already queued or shown is rejected
    /// without error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the surface is not attached. An
    /// accepted message stays queued in that case.
    pub fn enqueue(&mut self, message: Message, now: Instant) -> Result<Admission> {
        let admission = self.admit(message);
        self.dispatch(Trigger::Enqueue, now)?;
        Ok(admission)
    }

    /// Queues several messages in order, then tries to show them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the surface is not attached.
    pub fn enqueue_all(
        &mut self,
        messages: impl IntoIterator<Item = Message>,
        now: Instant,
    ) -> Result<Vec<Admission>> {
        let admissions = messages.into_iter().map(|m| self.admit(m)).collect();
        self.dispatch(Trigger::Enqueue, now)?;
        Ok(admissions)
    }

    /// Re-evaluates the queues, e.g. after a restore or re-attachment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the surface is not attached.
    pub fn show(&mut self, now: Instant) -> Result<()> {
        self.dispatch(Trigger::Show, now)
    }

    /// Empties the pending queue. With `interrupt`, also tears down what is
    /// displayed: the running transition is cancelled, every handle is
    /// released, and no notification fires for the discarded messages.
    pub fn clear(&mut self, interrupt: bool, now: Instant) {
        let dropped = self.pending.clear();
        if !interrupt {
            tracing::debug!(dropped, "pending queue cleared");
            return;
        }

        if let Some(Transition {
            ticket,
            plan,
            started_at,
        }) = self.in_flight.take()
        {
            self.surface.cancel_effect(ticket);
            self.history
                .push(plan.record(started_at, now, TransitionOutcome::Interrupted));
            if let Plan::Replace {
                entering, handle, ..
            } = plan
            {
                self.surface.release_handle(entering.key, handle);
            }
        }

        let displayed: Vec<MessageKey> = self.current.iter().map(|e| e.key).collect();
        for key in displayed {
            if let Some(handle) = self.handles.remove(&key) {
                self.surface.release_handle(key, handle);
            }
        }
        self.handles.clear();
        let discarded = self.current.clear();
        self.removal.clear();
        self.timers.clear();
        tracing::debug!(dropped, discarded, "scheduler interrupted");
    }

    /// Handles a manual dismiss signal.
    ///
    /// This is the fast path of the state machine: it bypasses the removal
    /// queue and the cooldown, and never occupies the transition slot. The
    /// handle is released at once, a fire-and-forget exit effect is
    /// requested, and `on_removed` fires before this returns.
    ///
    /// Returns whether the dismissal was honored; messages that are not
    /// dismissable or not displayed are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the surface is not attached. The
    /// message stays displayed in that case.
    pub fn dismiss(&mut self, key: MessageKey, now: Instant) -> Result<bool> {
        match self.current.get(key) {
            None => {
                tracing::trace!(%key, "dismiss ignored: not displayed");
                return Ok(false);
            }
            Some(entry) if !entry.message.is_dismissable() => {
                tracing::trace!(%key, "dismiss ignored: not dismissable");
                return Ok(false);
            }
            Some(_) => {}
        }
        if !self.surface.is_attached() {
            tracing::warn!(%key, "dismiss refused: surface is detached");
            return Err(Error::Detached);
        }

        self.dismiss_now(key, now);
        self.dispatch(Trigger::Dismiss, now)?;
        Ok(true)
    }

    /// Fires every timer due at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if a timer fired while the surface is not
    /// attached.
    pub fn advance(&mut self, now: Instant) -> Result<()> {
        let mut fired_any = false;
        while let Some(fired) = self.timers.pop_due(now) {
            fired_any = true;
            match fired {
                Fired::Expiry(key) => {
                    if self.current.contains(key) && self.removal.push_back(key) {
                        tracing::trace!(%key, "display time elapsed");
                    }
                }
                Fired::Cooldown => tracing::trace!("cooldown elapsed"),
            }
        }

        if fired_any {
            self.dispatch(Trigger::Timer, now)
        } else {
            Ok(())
        }
    }

    /// Reports that an awaited transition finished.
    ///
    /// Outcomes for tickets that are no longer in flight (for instance after
    /// an interrupting clear) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the surface is not attached.
    pub fn effect_completed(&mut self, ticket: EffectTicket, now: Instant) -> Result<()> {
        let Some(Transition {
            plan, started_at, ..
        }) = self.in_flight.take_if(|t| t.ticket == ticket)
        else {
            tracing::warn!(%ticket, "stale completion ignored");
            return Ok(());
        };

        let record = plan.record(started_at, now, TransitionOutcome::Completed);
        match plan {
            Plan::Reveal { entering } | Plan::Add { entering } => {
                self.finish_entering(entering, now);
            }
            Plan::Replace {
                leaving,
                entering,
                handle,
            } => {
                self.finish_leaving(leaving);
                let key = entering.key;
                self.handles.insert(key, handle);
                self.current.insert(entering);
                self.finish_entering(key, now);
                self.start_cooldown(now);
            }
            Plan::Remove { leaving } => {
                // A dismiss during the removal may have emptied the display.
                if self.finish_leaving(leaving) && self.current.is_empty() {
                    self.conceal_now();
                }
                self.start_cooldown(now);
            }
            Plan::Conceal { leaving } => {
                self.finish_leaving(leaving);
                self.start_cooldown(now);
            }
        }
        self.history.push(record);

        self.dispatch(Trigger::Completed, now)
    }

    /// Reports that the host cancelled an awaited transition.
    ///
    /// The machine goes back to idle without notifying anyone: an entering
    /// message returns to the head of the pending queue, a leaving message
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the surface is not attached.
    pub fn effect_cancelled(&mut self, ticket: EffectTicket, now: Instant) -> Result<()> {
        let Some(Transition {
            plan, started_at, ..
        }) = self.in_flight.take_if(|t| t.ticket == ticket)
        else {
            tracing::warn!(%ticket, "stale cancellation ignored");
            return Ok(());
        };

        self.history
            .push(plan.record(started_at, now, TransitionOutcome::Cancelled));
        match plan {
            Plan::Reveal { entering } | Plan::Add { entering } => self.requeue(entering),
            Plan::Replace {
                leaving,
                entering,
                handle,
            } => {
                self.surface.release_handle(entering.key, handle);
                self.pending.push_front(entering);
                if self.drop_silently(leaving) && self.current.is_empty() {
                    self.conceal_now();
                }
            }
            Plan::Remove { leaving } => {
                if self.drop_silently(leaving) && self.current.is_empty() {
                    self.conceal_now();
                }
            }
            Plan::Conceal { leaving } => {
                self.drop_silently(leaving);
            }
        }
        tracing::debug!(%ticket, "transition cancelled by host");

        self.dispatch(Trigger::Cancelled, now)
    }

    /// Replaces the tunables.
    ///
    /// A lower concurrency cap does not evict anything; the display set
    /// shrinks as messages expire. A running cooldown keeps its deadline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detached`] if the surface is not attached.
    pub fn configure(&mut self, settings: Settings, now: Instant) -> Result<()> {
        if settings.history_capacity != self.settings.history_capacity {
            self.history.set_capacity(settings.history_capacity);
        }
        self.settings = settings;
        self.dispatch(Trigger::Configure, now)
    }

    /// Captures the tunables plus every displayed and pending message.
    #[must_use]
    pub fn snapshot(&self) -> SchedulerSnapshot {
        let entering = match self.in_flight.as_ref().map(|t| &t.plan) {
            Some(Plan::Replace { entering, .. }) => Some(entering),
            _ => None,
        };
        let messages = self
            .current
            .iter()
            .chain(entering)
            .chain(self.pending.iter())
            .map(|e| &e.message);
        SchedulerSnapshot::capture(&self.settings, messages)
    }

    /// Tears the current state down (like an interrupting clear) and loads
    /// `snapshot`. Every restored message is pending; call [`Self::show`]
    /// to start displaying them.
    pub fn restore(&mut self, snapshot: SchedulerSnapshot, now: Instant) {
        self.clear(true, now);
        self.settings = snapshot.settings(self.settings);
        let restored = snapshot.messages.len();
        for record in snapshot.messages {
            self.admit(Message::from(record));
        }
        tracing::debug!(restored, pending = self.pending.len(), "snapshot restored");
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        if self.in_flight.is_some() {
            SchedulerState::Animating
        } else if self.is_cooling() {
            SchedulerState::Cooling
        } else {
            SchedulerState::Idle
        }
    }

    /// Ticket of the transition in flight.
    #[must_use]
    pub fn in_flight(&self) -> Option<EffectTicket> {
        self.in_flight.as_ref().map(|t| t.ticket)
    }

    /// Earliest instant at which [`Self::advance`] has something to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Displayed messages, in display order.
    pub fn displayed(&self) -> impl Iterator<Item = (MessageKey, &Message)> {
        self.current.iter().map(|e| (e.key, &e.message))
    }

    /// Pending messages, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = (MessageKey, &Message)> {
        self.pending.iter().map(|e| (e.key, &e.message))
    }

    /// Keys of expired messages waiting for their exit.
    pub fn removal(&self) -> impl Iterator<Item = MessageKey> + '_ {
        self.removal.iter().copied()
    }

    #[must_use]
    pub fn displayed_len(&self) -> usize {
        self.current.len()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn removal_len(&self) -> usize {
        self.removal.len()
    }

    #[must_use]
    pub fn is_displayed(&self, key: MessageKey) -> bool {
        self.current.contains(key)
    }

    #[must_use]
    pub fn has_handle(&self, key: MessageKey) -> bool {
        self.handles.contains_key(&key)
    }

    /// Returns true when nothing is queued, shown or in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.current.is_empty() && self.in_flight.is_none()
    }

    /// Finished transitions, oldest first.
    #[must_use]
    pub fn history(&self) -> &CircularBuffer<TransitionRecord> {
        &self.history
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    fn dispatch(&mut self, trigger: Trigger, now: Instant) -> Result<()> {
        if !self.surface.is_attached() {
            tracing::warn!(?trigger, "dispatch refused: surface is detached");
            return Err(Error::Detached);
        }
        if self.in_flight.is_some() {
            tracing::trace!(?trigger, "transition in flight, deferring");
            return Ok(());
        }

        // Removals free capacity before anything new is admitted.
        if !self.is_cooling() {
            while let Some(key) = self.removal.pop_front() {
                if self.current.contains(key) {
                    self.start_removal(key, now);
                    return Ok(());
                }
            }
        }

        if self
            .settings
            .concurrency_cap
            .has_room_for(self.current.len())
        {
            if let Some(entry) = self.pending.pop_front() {
                self.start_addition(entry, now);
            }
        }
        Ok(())
    }

    fn start_removal(&mut self, leaving: MessageKey, now: Instant) {
        let exit = self
            .current
            .get(leaving)
            .and_then(|e| e.message.exit_effect())
            .unwrap_or(self.settings.default_exit_effect);

        let (plan, steps) = if let Some(entering) = self.pending.pop_front() {
            let enter = entering
                .message
                .enter_effect()
                .unwrap_or(self.settings.default_enter_effect);
            let handle = self.surface.create_handle(entering.key, &entering.message);
            let steps = vec![
                EffectStep::message(EffectKind::Exit, leaving, exit),
                EffectStep::message(EffectKind::Enter, entering.key, enter),
                EffectStep::reflow(),
            ];
            (
                Plan::Replace {
                    leaving,
                    entering,
                    handle,
                },
                steps,
            )
        } else if self.current.len() <= 1 {
            let steps = vec![EffectStep::container(
                EffectKind::Conceal,
                self.settings.default_exit_effect,
            )];
            (Plan::Conceal { leaving }, steps)
        } else {
            let steps = vec![
                EffectStep::message(EffectKind::Exit, leaving, exit),
                EffectStep::reflow(),
            ];
            (Plan::Remove { leaving }, steps)
        };

        self.begin(plan, steps, now);
    }

    fn start_addition(&mut self, entry: Entry, now: Instant) {
        let key = entry.key;
        let first = self.current.is_empty();
        let enter = entry
            .message
            .enter_effect()
            .unwrap_or(self.settings.default_enter_effect);

        let handle = self.surface.create_handle(key, &entry.message);
        self.handles.insert(key, handle);
        self.current.insert(entry);

        let (plan, steps) = if first {
            let steps = vec![EffectStep::container(
                EffectKind::Reveal,
                self.settings.default_enter_effect,
            )];
            (Plan::Reveal { entering: key }, steps)
        } else {
            let steps = vec![
                EffectStep::message(EffectKind::Enter, key, enter),
                EffectStep::reflow(),
            ];
            (Plan::Add { entering: key }, steps)
        };

        self.begin(plan, steps, now);
    }

    fn begin(&mut self, plan: Plan<S::Handle>, steps: Vec<EffectStep>, now: Instant) {
        let ticket = self.allocate_ticket();
        let request = TransitionRequest {
            ticket,
            steps,
            duration: self.settings.transition_duration.value(),
            awaited: true,
        };
        tracing::debug!(
            %ticket,
            kind = ?plan.kind(),
            leaving = ?plan.leaving(),
            entering = ?plan.entering(),
            displayed = self.current.len(),
            pending = self.pending.len(),
            "starting transition"
        );
        self.in_flight = Some(Transition {
            ticket,
            plan,
            started_at: now,
        });
        self.surface.request_effect(&request);
    }

    // ------------------------------------------------------------------
    // Lifecycle helpers
    // ------------------------------------------------------------------

    fn dismiss_now(&mut self, key: MessageKey, now: Instant) {
        let Some(entry) = self.current.remove(key) else {
            return;
        };
        self.removal.remove(key);
        self.timers.cancel_expiry(key);

        let exit = entry
            .message
            .exit_effect()
            .unwrap_or(self.settings.default_exit_effect);
        let mut steps = vec![EffectStep::message(EffectKind::Exit, key, exit)];
        // A replace refills the display and a conceal already hides it.
        let container_handled = matches!(
            self.in_flight.as_ref().map(|t| &t.plan),
            Some(Plan::Replace { .. } | Plan::Conceal { .. })
        );
        if self.current.is_empty() && !container_handled {
            steps.push(EffectStep::container(
                EffectKind::Conceal,
                self.settings.default_exit_effect,
            ));
        }
        let request = TransitionRequest {
            ticket: self.allocate_ticket(),
            steps,
            duration: self.settings.transition_duration.value(),
            awaited: false,
        };
        self.surface.request_effect(&request);

        if let Some(handle) = self.handles.remove(&key) {
            self.surface.release_handle(key, handle);
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_removed(key, &entry.message);
        }
        self.history.push(TransitionRecord {
            kind: TransitionKind::Dismiss,
            leaving: Some(key),
            entering: None,
            started_at: now,
            finished_at: now,
            outcome: TransitionOutcome::Completed,
        });
        tracing::debug!(%key, "message dismissed");
    }

    fn conceal_now(&mut self) {
        let request = TransitionRequest {
            ticket: self.allocate_ticket(),
            steps: vec![EffectStep::container(
                EffectKind::Conceal,
                self.settings.default_exit_effect,
            )],
            duration: self.settings.transition_duration.value(),
            awaited: false,
        };
        tracing::debug!(ticket = %request.ticket, "display emptied, concealing container");
        self.surface.request_effect(&request);
    }

    fn finish_entering(&mut self, key: MessageKey, now: Instant) {
        // Dismissed while entering.
        let Some(entry) = self.current.get(key) else {
            return;
        };
        let duration = entry
            .message
            .display_duration()
            .map_or(self.settings.display_duration, DisplayDuration::new);

        if let Some(listener) = self.listener.as_mut() {
            listener.on_displayed(key, &entry.message);
        }
        if let Some(delay) = duration.expiry() {
            self.timers.arm_expiry(key, now + delay);
        }
    }

    /// Returns false if the message was dismissed while leaving.
    fn finish_leaving(&mut self, key: MessageKey) -> bool {
        self.removal.remove(key);
        self.timers.cancel_expiry(key);
        // Dismissed while leaving: already notified.
        let Some(entry) = self.current.remove(key) else {
            return false;
        };
        if let Some(handle) = self.handles.remove(&key) {
            self.surface.release_handle(key, handle);
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_removed(key, &entry.message);
        }
        true
    }

    fn requeue(&mut self, key: MessageKey) {
        self.timers.cancel_expiry(key);
        let Some(entry) = self.current.remove(key) else {
            return;
        };
        if let Some(handle) = self.handles.remove(&key) {
            self.surface.release_handle(key, handle);
        }
        self.pending.push_front(entry);
    }

    fn drop_silently(&mut self, key: MessageKey) -> bool {
        self.removal.remove(key);
        self.timers.cancel_expiry(key);
        if self.current.remove(key).is_none() {
            return false;
        }
        if let Some(handle) = self.handles.remove(&key) {
            self.surface.release_handle(key, handle);
        }
        true
    }

    fn start_cooldown(&mut self, now: Instant) {
        let cooldown = self.settings.cooldown_interval.value();
        if !cooldown.is_zero() {
            self.timers.arm_cooldown(now + cooldown);
        }
    }

    fn is_cooling(&self) -> bool {
        self.timers.cooldown().is_some()
    }

    fn admit(&mut self, message: Message) -> Admission {
        if message.has_identity() && self.holds_id(message.id()) {
            tracing::debug!(id = message.id(), "duplicate message rejected");
            return Admission::Duplicate;
        }
        let key = MessageKey::new(self.next_key);
        self.next_key += 1;
        self.pending.push_back(Entry::new(key, message));
        Admission::Accepted(key)
    }

    fn holds_id(&self, id: u32) -> bool {
        let entering = matches!(
            self.in_flight.as_ref().map(|t| &t.plan),
            Some(Plan::Replace { entering, .. }) if entering.same_identity(id)
        );
        entering || self.pending.contains_id(id) || self.current.contains_id(id)
    }

    fn allocate_ticket(&mut self) -> EffectTicket {
        let ticket = EffectTicket::new(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}

impl<S: Surface> fmt::Debug for Scheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("state", &self.state())
            .field("pending", &self.pending.len())
            .field("displayed", &self.current.len())
            .field("removal", &self.removal.len())
            .field("in_flight", &self.in_flight())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
