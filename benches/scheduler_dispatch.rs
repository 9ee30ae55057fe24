// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for scheduler dispatch.
//!
//! Measures the performance of:
//! - Admission with duplicate-id checks against a long backlog
//! - A full display cycle (enter, expire, leave) for a batch of messages

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;
use torch_scheduler::domain::scheduling::CooldownInterval;
use torch_scheduler::notifications::{Message, Scheduler, Settings};
use torch_scheduler::test_utils::{ManualClock, RecordingSurface};

const TRANSITION: Duration = Duration::from_millis(300);

fn settings(cap: usize) -> Settings {
    Settings::default()
        .with_concurrency_cap(cap)
        .with_cooldown(CooldownInterval::from_millis(0))
}

/// Benchmark admission into a growing backlog.
///
/// Half the messages carry an id, so every admission scans the backlog.
fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_dispatch");

    for backlog in [16_usize, 256, 1024] {
        group.bench_with_input(
            BenchmarkId::new("enqueue_backlog", backlog),
            &backlog,
            |b, &backlog| {
                b.iter(|| {
                    let clock = ManualClock::new();
                    let mut scheduler = Scheduler::new(RecordingSurface::new(), settings(1));
                    for n in 0..backlog {
                        let message = Message::new("queued");
                        let message = if n % 2 == 0 {
                            message.with_id(u32::try_from(n + 1).unwrap_or(u32::MAX))
                        } else {
                            message
                        };
                        black_box(scheduler.enqueue(message, clock.now()).unwrap());
                    }
                    black_box(&scheduler);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a complete cycle: every message enters, expires and leaves.
fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_dispatch");

    for cap in [1_usize, 4] {
        group.bench_with_input(BenchmarkId::new("full_cycle_64", cap), &cap, |b, &cap| {
            b.iter(|| {
                let mut clock = ManualClock::new();
                let mut scheduler = Scheduler::new(RecordingSurface::new(), settings(cap));
                scheduler
                    .enqueue_all((0..64).map(|_| Message::new("cycle")), clock.now())
                    .unwrap();

                loop {
                    if let Some(ticket) = scheduler.in_flight() {
                        let now = clock.advance(TRANSITION);
                        scheduler.effect_completed(ticket, now).unwrap();
                    } else if let Some(deadline) = scheduler.next_deadline() {
                        let now = clock.advance_to(deadline);
                        scheduler.advance(now).unwrap();
                    } else {
                        break;
                    }
                }
                black_box(scheduler.history().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_enqueue, bench_full_cycle);
criterion_main!(benches);
