/*!
 * Scheduler Benchmarks
 *
 * Lazy text decoding versus pre-decoded programs, and quantum sensitivity
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rr_simulator::{decode, Instruction, Process, RoundRobin, SchedulerConfig};

const PROGRAM: [&str; 8] = [
    "INC AX",
    "ADD BX, AX",
    "MUL CX, 3",
    "SUB AX, 1",
    "NOP",
    "ADD CX, BX",
    "INC BX",
    "MUL AX, AX",
];

fn workload(count: u32, quantum: u32) -> Vec<Process> {
    (1..=count)
        .map(|pid| Process::new(pid, pid as i32, 0, 1, quantum))
        .collect()
}

fn text_programs(count: usize, repeat: usize) -> Vec<Vec<String>> {
    let program: Vec<String> = PROGRAM
        .iter()
        .cycle()
        .take(PROGRAM.len() * repeat)
        .map(|s| s.to_string())
        .collect();
    vec![program; count]
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_line", |b| {
        b.iter(|| {
            for line in PROGRAM {
                black_box(decode(black_box(line)).ok());
            }
        });
    });
}

fn bench_program_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("program_form");
    let scheduler = RoundRobin::with_config(SchedulerConfig::quiet());
    let text = text_programs(16, 32);
    let decoded: Vec<Vec<Instruction>> = text
        .iter()
        .map(|program| program.iter().filter_map(|line| decode(line).ok()).collect())
        .collect();

    group.bench_function("text", |b| {
        b.iter(|| {
            let mut processes = workload(16, 4);
            black_box(scheduler.schedule(&mut processes, &text).ok());
        });
    });

    group.bench_function("decoded", |b| {
        b.iter(|| {
            let mut processes = workload(16, 4);
            black_box(scheduler.schedule(&mut processes, &decoded).ok());
        });
    });

    group.finish();
}

fn bench_quantum(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantum");
    let scheduler = RoundRobin::with_config(SchedulerConfig::quiet());
    let programs = text_programs(32, 16);

    for quantum in [1u32, 4, 16, 128] {
        group.bench_with_input(
            BenchmarkId::from_parameter(quantum),
            &quantum,
            |b, &quantum| {
                b.iter(|| {
                    let mut processes = workload(32, quantum);
                    black_box(scheduler.schedule(&mut processes, &programs).ok());
                });
            },
        );
    }

    group.finish();
}

fn bench_trace_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_recording");
    let programs = text_programs(8, 16);

    for (name, config) in [
        ("quiet", SchedulerConfig::quiet()),
        ("recorded", SchedulerConfig::default()),
    ] {
        let scheduler = RoundRobin::with_config(config);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut processes = workload(8, 4);
                black_box(scheduler.schedule(&mut processes, &programs).ok());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_program_form,
    bench_quantum,
    bench_trace_recording
);
criterion_main!(benches);
