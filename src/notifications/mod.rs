// SPDX-License-Identifier: MPL-2.0
//! Paced display of short-lived messages.
//!
//! Hosts submit [`Message`]s to a [`Scheduler`], which shows at most
//! `concurrency_cap` of them at once on a [`Surface`], runs one transition at
//! a time, and throttles removals with a cooldown.
//!
//! # Example
//!
//! ```ignore
//! let mut scheduler = Scheduler::new(surface, Settings::default());
//! scheduler.enqueue(Message::new("Saved"), Instant::now())?;
//! ```
//!
//! The scheduler does not own a clock. Drive it with
//! [`Scheduler::next_deadline`] and [`Scheduler::advance`], or hand it to
//! [`crate::service::spawn`] to get a tokio task that does so.

mod message;
mod queue;
mod scheduler;
mod settings;
mod snapshot;
mod surface;
mod timers;

pub use message::{EffectId, Message, MessageKey};
pub use queue::{DisplaySet, Entry, PendingQueue, RemovalQueue};
pub use scheduler::{Admission, Scheduler, SchedulerState};
pub use settings::Settings;
pub use snapshot::{MessageRecord, SchedulerSnapshot};
pub use surface::{
    EffectKind, EffectStep, EffectTarget, EffectTicket, Listener, Surface, TransitionRequest,
};
pub use timers::{Fired, Timers};
