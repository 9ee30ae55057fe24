// SPDX-License-Identifier: MPL-2.0
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use torch_scheduler::config::{self, Config};
use torch_scheduler::diagnostics::{TransitionKind, TransitionOutcome};
use torch_scheduler::domain::scheduling::{CooldownInterval, DisplayDuration, TransitionDuration};
use torch_scheduler::error::Error;
use torch_scheduler::notifications::{
    Admission, EffectKind, EffectTicket, Message, Scheduler, SchedulerSnapshot, SchedulerState,
    Settings,
};
use torch_scheduler::test_utils::{ManualClock, RecordingListener, RecordingSurface};

const TRANSITION: Duration = Duration::from_millis(100);
const DISPLAY: Duration = Duration::from_millis(1_000);
const COOLDOWN: Duration = Duration::from_millis(300);

fn settings(cap: usize) -> Settings {
    Settings::default()
        .with_concurrency_cap(cap)
        .with_display_duration(DisplayDuration::new(DISPLAY))
        .with_cooldown(CooldownInterval::new(COOLDOWN))
        .with_transition_duration(TransitionDuration::from_millis(100))
}

/// Drives a scheduler the way a host would: effects finish after the
/// transition duration, timers fire at their deadline.
struct Harness {
    scheduler: Scheduler<RecordingSurface>,
    listener: RecordingListener,
    clock: ManualClock,
    started: HashMap<EffectTicket, Instant>,
}

impl Harness {
    fn new(settings: Settings) -> Self {
        let listener = RecordingListener::new();
        let scheduler =
            Scheduler::new(RecordingSurface::new(), settings).with_listener(listener.clone());
        Self {
            scheduler,
            listener,
            clock: ManualClock::new(),
            started: HashMap::new(),
        }
    }

    fn track(&mut self) {
        if let Some(ticket) = self.scheduler.in_flight() {
            let now = self.clock.now();
            self.started.entry(ticket).or_insert(now);
        }
    }

    fn enqueue(&mut self, message: Message) -> Admission {
        let admission = self
            .scheduler
            .enqueue(message, self.clock.now())
            .expect("enqueue should dispatch");
        self.track();
        admission
    }

    fn key(&mut self, message: Message) -> torch_scheduler::notifications::MessageKey {
        self.enqueue(message).key().expect("message should be accepted")
    }

    /// Processes the next event. Returns false once nothing is left to do.
    fn step(&mut self) -> bool {
        let completion = self
            .scheduler
            .in_flight()
            .map(|ticket| (ticket, self.started[&ticket] + TRANSITION));
        let deadline = self.scheduler.next_deadline();

        match (completion, deadline) {
            (Some((ticket, at)), deadline) if deadline.is_none_or(|d| at <= d) => {
                let now = self.clock.advance_to(at);
                self.scheduler
                    .effect_completed(ticket, now)
                    .expect("completion should dispatch");
            }
            (_, Some(deadline)) => {
                let now = self.clock.advance_to(deadline);
                self.scheduler.advance(now).expect("timers should dispatch");
            }
            _ => return false,
        }
        self.track();
        true
    }

    fn run_until_idle(&mut self) {
        let mut steps = 0;
        while self.step() {
            steps += 1;
            assert!(steps < 10_000, "scheduler never settled");
        }
    }

    /// Finishes whatever transition is currently in flight.
    fn finish(&mut self) {
        let ticket = self.scheduler.in_flight().expect("transition in flight");
        let now = self.clock.advance_to(self.started[&ticket] + TRANSITION);
        self.scheduler
            .effect_completed(ticket, now)
            .expect("completion should dispatch");
        self.track();
    }
}

#[test]
fn display_set_never_exceeds_cap() {
    for cap in 1..=4 {
        let mut harness = Harness::new(settings(cap));
        for n in 0..12 {
            harness.enqueue(Message::new(format!("message {n}")));
            assert!(harness.scheduler.displayed_len() <= cap);
            if n % 3 == 0 {
                harness.step();
            }
        }
        while harness.step() {
            assert!(harness.scheduler.displayed_len() <= cap);
        }
        assert_eq!(harness.listener.displayed().len(), 12);
        assert_eq!(harness.listener.removed().len(), 12);
        assert_eq!(harness.scheduler.surface().live_handles(), 0);
    }
}

#[test]
fn same_id_enqueued_twice_is_kept_once() {
    let mut harness = Harness::new(settings(1));
    harness.enqueue(Message::new("blocker"));

    assert!(harness.enqueue(Message::new("five").with_id(5)).is_accepted());
    assert_eq!(
        harness.enqueue(Message::new("five again").with_id(5)),
        Admission::Duplicate
    );
    assert_eq!(harness.scheduler.pending_len(), 1);
}

#[test]
fn zero_id_messages_are_never_deduplicated() {
    let mut harness = Harness::new(settings(2));
    let admissions = harness
        .scheduler
        .enqueue_all(
            (0..5).map(|_| Message::new("same text")),
            harness.clock.now(),
        )
        .expect("enqueue");
    assert!(admissions.iter().all(|a| a.is_accepted()));
}

#[test]
fn clear_without_interrupt_only_drops_pending() {
    let mut harness = Harness::new(settings(1));
    let shown = harness.key(Message::new("shown"));
    harness.finish();
    harness.enqueue(Message::new("waiting 1"));
    harness.enqueue(Message::new("waiting 2"));

    harness.scheduler.clear(false, harness.clock.now());

    assert_eq!(harness.scheduler.pending_len(), 0);
    assert!(harness.scheduler.is_displayed(shown));
    assert_eq!(harness.scheduler.removal_len(), 0);

    harness.run_until_idle();
    assert_eq!(harness.listener.removed(), vec!["shown"]);
}

#[test]
fn clear_with_interrupt_empties_everything_silently() {
    let mut harness = Harness::new(settings(2));
    harness.enqueue(Message::new("a"));
    harness.finish();
    harness.enqueue(Message::new("b"));
    harness.finish();
    harness.enqueue(Message::new("c"));
    // Let a expire so a replace is in flight.
    let deadline = harness.scheduler.next_deadline().expect("expiry");
    harness.clock.advance_to(deadline);
    harness
        .scheduler
        .advance(harness.clock.now())
        .expect("advance");
    harness.track();

    harness.scheduler.clear(true, harness.clock.now());

    assert!(harness.scheduler.is_empty());
    assert_eq!(harness.scheduler.removal_len(), 0);
    assert!(harness.scheduler.next_deadline().is_none());
    assert!(harness.listener.removed().is_empty());
    assert_eq!(harness.scheduler.surface().live_handles(), 0);
    assert_eq!(harness.scheduler.surface().cancelled().len(), 1);
    let last = harness.scheduler.history().last().expect("history");
    assert_eq!(last.outcome, TransitionOutcome::Interrupted);
}

#[test]
fn permanent_message_blocks_until_dismissed() {
    let mut harness = Harness::new(settings(1));
    let sticky = harness.key(
        Message::new("sticky")
            .with_display_duration(Duration::ZERO)
            .dismissable(true),
    );
    harness.finish();
    harness.enqueue(Message::new("next"));

    harness.clock.advance(Duration::from_secs(3_600));
    harness
        .scheduler
        .advance(harness.clock.now())
        .expect("advance");
    assert!(!harness.step(), "nothing can happen while the sticky message is up");
    assert_eq!(harness.scheduler.pending_len(), 1);

    assert!(harness
        .scheduler
        .dismiss(sticky, harness.clock.now())
        .expect("dismiss"));
    harness.track();
    harness.run_until_idle();

    assert_eq!(harness.listener.displayed(), vec!["sticky", "next"]);
}

#[test]
fn expiry_with_cap_two_replaces_oldest_and_leaves_the_other() {
    let mut harness = Harness::new(settings(2));
    let a = harness.key(Message::new("A"));
    let b = harness.key(Message::new("B"));
    let c = harness.key(Message::new("C"));
    harness.finish();
    harness.finish();

    assert!(harness.scheduler.is_displayed(a));
    assert!(harness.scheduler.is_displayed(b));
    assert_eq!(harness.scheduler.pending().map(|(k, _)| k).collect::<Vec<_>>(), vec![c]);

    let deadline = harness.scheduler.next_deadline().expect("A's expiry");
    let now = harness.clock.advance_to(deadline);
    harness.scheduler.advance(now).expect("advance");
    harness.track();

    let request = harness
        .scheduler
        .surface()
        .last_awaited()
        .expect("replace request");
    assert_eq!(request.target_of(EffectKind::Exit), Some(a));
    assert_eq!(request.target_of(EffectKind::Enter), Some(c));

    harness.finish();
    assert!(harness.scheduler.is_displayed(b));
    assert!(harness.scheduler.is_displayed(c));
    assert!(!harness.scheduler.is_displayed(a));
    assert_eq!(harness.listener.removed(), vec!["A"]);
}

#[test]
fn removals_are_spaced_by_the_cooldown() {
    let mut harness = Harness::new(settings(3));
    for n in 0..9 {
        harness.enqueue(Message::new(format!("m{n}")));
    }
    harness.run_until_idle();

    let mut removals: Vec<_> = harness
        .scheduler
        .history()
        .iter()
        .filter(|r| r.kind.is_removal() && r.outcome == TransitionOutcome::Completed)
        .map(|r| r.finished_at)
        .collect();
    removals.sort();
    assert_eq!(removals.len(), 9);
    for pair in removals.windows(2) {
        assert!(
            pair[1].duration_since(pair[0]) >= COOLDOWN,
            "removals {:?} apart",
            pair[1].duration_since(pair[0])
        );
    }
}

#[test]
fn back_to_back_expiries_wait_for_the_cooldown() {
    let mut harness = Harness::new(settings(2));
    harness.enqueue(Message::new("first"));
    harness.enqueue(Message::new("second"));
    harness.finish();
    harness.finish();

    // Both expiries are due by now.
    let now = harness.clock.advance(DISPLAY + TRANSITION);
    harness.scheduler.advance(now).expect("advance");
    harness.track();
    assert_eq!(harness.scheduler.removal_len(), 1);

    harness.finish();
    let first_done = harness.clock.now();
    assert_eq!(harness.scheduler.state(), SchedulerState::Cooling);
    assert!(harness.scheduler.in_flight().is_none());

    harness.run_until_idle();
    let conceal = harness
        .scheduler
        .history()
        .iter()
        .find(|r| r.kind == TransitionKind::Conceal)
        .expect("second removal conceals the container");
    assert!(conceal.started_at.duration_since(first_done) >= COOLDOWN);
}

#[test]
fn dispatch_on_detached_surface_is_an_error() {
    let mut scheduler = Scheduler::new(RecordingSurface::detached(), settings(1));
    let now = Instant::now();

    assert_eq!(
        scheduler.enqueue(Message::new("a"), now),
        Err(Error::Detached)
    );
    assert_eq!(scheduler.show(now), Err(Error::Detached));
    assert!(scheduler.in_flight().is_none());
    assert!(scheduler.surface().requests().is_empty());

    // Clearing never dispatches, so it works while detached.
    scheduler.clear(true, now);
    assert!(scheduler.is_empty());
}

#[test]
fn cancelled_effect_returns_to_idle_without_notifications() {
    let mut harness = Harness::new(settings(1));
    let key = harness.key(Message::new("a"));
    let ticket = harness.scheduler.in_flight().expect("reveal");

    harness.scheduler.surface_mut().set_attached(false);
    assert_eq!(
        harness.scheduler.effect_cancelled(ticket, harness.clock.now()),
        Err(Error::Detached)
    );

    assert_eq!(harness.scheduler.state(), SchedulerState::Idle);
    assert_eq!(harness.scheduler.pending().map(|(k, _)| k).next(), Some(key));
    assert!(harness.listener.notices().is_empty());

    harness.scheduler.surface_mut().set_attached(true);
    harness
        .scheduler
        .show(harness.clock.now())
        .expect("show");
    harness.track();
    harness.run_until_idle();
    assert_eq!(harness.listener.displayed(), vec!["a"]);
}

#[test]
fn snapshot_survives_a_restart() {
    let temp_dir = tempdir().expect("create temp dir");

    let mut before = Harness::new(settings(2));
    before.enqueue(Message::new("one").with_id(1));
    before.enqueue(Message::new("two").with_view_type(1).dismissable(true));
    before.enqueue(Message::new("three").with_display_duration(Duration::from_millis(250)));
    before.finish();
    before
        .scheduler
        .snapshot()
        .save_to(Some(temp_dir.path().to_path_buf()))
        .expect("save snapshot");

    let snapshot = SchedulerSnapshot::load_from(Some(temp_dir.path().to_path_buf()))
        .expect("load snapshot")
        .expect("snapshot exists");
    assert_eq!(snapshot.messages.len(), 3);

    let mut after = Harness::new(Settings::default());
    after.scheduler.restore(snapshot, after.clock.now());
    assert_eq!(after.scheduler.settings().concurrency_cap.value(), 2);
    assert_eq!(after.scheduler.pending_len(), 3);

    // The restored id still blocks duplicates.
    assert_eq!(
        after.enqueue(Message::new("one again").with_id(1)),
        Admission::Duplicate
    );

    after.scheduler.show(after.clock.now()).expect("show");
    after.track();
    after.run_until_idle();
    assert_eq!(after.listener.displayed(), vec!["one", "two", "three"]);
}

#[test]
fn config_file_drives_scheduler_settings() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("settings.toml");
    let saved = Config {
        concurrency_cap: Some(3),
        cooldown_ms: Some(50),
        display_duration_ms: Some(config::LENGTH_LONG_MS),
        ..Config::default()
    };
    config::save_to_path(&saved, &path).expect("save config");

    let loaded = config::load_from_path(&path).expect("load config");
    let mut harness = Harness::new(loaded.settings());
    for n in 0..3 {
        harness.enqueue(Message::new(format!("m{n}")));
        harness.finish();
    }
    assert_eq!(harness.scheduler.displayed_len(), 3);
    assert_eq!(
        harness.scheduler.settings().display_duration.value(),
        Duration::from_millis(config::LENGTH_LONG_MS)
    );
}
