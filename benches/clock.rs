use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use timemachine::{Clock, SystemClock, TimeMachine};

/// Benchmark reading the time through the facade vs the bare clock
fn bench_now(c: &mut Criterion) {
    let mut group = c.benchmark_group("now");

    group.bench_function("system_clock", |b| {
        let clock = SystemClock::new();
        b.iter(|| black_box(clock.now()))
    });

    group.bench_function("machine_live", |b| {
        let machine = TimeMachine::new();
        b.iter(|| black_box(machine.now()))
    });

    group.bench_function("machine_frozen", |b| {
        let machine = TimeMachine::new();
        machine.freeze_now();
        b.iter(|| black_box(machine.now()))
    });

    group.finish();
}

/// Benchmark advancing the cached time
fn bench_mocked_sleep(c: &mut Criterion) {
    let mut group = c.benchmark_group("mocked_sleep");

    group.bench_function("sleep", |b| {
        let machine = TimeMachine::new();
        machine.freeze_now();
        b.iter(|| machine.sleep(black_box(Duration::from_nanos(1))))
    });

    group.bench_function("travel", |b| {
        let machine = TimeMachine::new();
        machine.freeze_now();
        b.iter(|| black_box(machine.travel(black_box(Duration::from_nanos(1)))))
    });

    group.finish();
}

criterion_group!(benches, bench_now, bench_mocked_sleep);
criterion_main!(benches);
