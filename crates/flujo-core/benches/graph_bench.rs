//! Criterion benchmarks for the data-flow engine.
//!
//! Measures engine overhead independently of DSP cost using trivial
//! passthrough nodes. Two axes:
//!
//! - **Pool** — allocate/release churn and fan-out reference counting
//! - **Tick** — `update_all()` throughput over chains of varying length
//!
//! Run with: `cargo bench -p flujo-core -- graph/`
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flujo_core::{
    AudioBlock, AudioContext, AudioNode, CycleCounter, MAX_POOL_BLOCKS, NodeId, UpdateContext,
};

const CHAIN_LENGTHS: &[usize] = &[2, 4, 8, 16, 32];
const FAN_OUTS: &[usize] = &[1, 2, 4, 8];

struct NullCounter;

impl CycleCounter for NullCounter {
    fn cycles(&self) -> u32 {
        0
    }
}

fn leak_storage(count: usize) -> &'static mut [AudioBlock] {
    let blocks: Vec<AudioBlock> = (0..count).map(|_| AudioBlock::EMPTY).collect();
    Box::leak(blocks.into_boxed_slice())
}

fn context_with(pool_blocks: usize) -> AudioContext {
    let mut ctx = AudioContext::new();
    ctx.init_pool(leak_storage(pool_blocks));
    ctx
}

// ---------------------------------------------------------------------------
// Trivial nodes — isolate engine overhead from DSP cost
// ---------------------------------------------------------------------------

/// Emits a silent block every tick.
struct Source;

impl AudioNode for Source {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        let Some(block) = io.allocate() else {
            return;
        };
        io.transmit(&block, 0);
        io.release(block);
    }
}

/// Forwards its input untouched.
struct Passthrough;

impl AudioNode for Passthrough {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        let Some(block) = io.receive_read_only(0) else {
            return;
        };
        io.transmit(&block, 0);
        io.release(block);
    }
}

/// Consumes and discards its input.
struct Sink;

impl AudioNode for Sink {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        if let Some(block) = io.receive_read_only(0) {
            io.release(block);
        }
    }
}

// ---------------------------------------------------------------------------
// Graph constructors
// ---------------------------------------------------------------------------

fn wire(ctx: &mut AudioContext, src: NodeId, dst: NodeId) {
    let id = ctx.add_connection(src, 0, dst, 0).unwrap();
    ctx.connect(id).unwrap();
}

fn make_chain(stages: usize) -> AudioContext {
    let mut ctx = context_with(MAX_POOL_BLOCKS);
    let mut prev = ctx.add_node(Box::new(Source), 0);
    for _ in 0..stages {
        let node = ctx.add_node(Box::new(Passthrough), 1);
        wire(&mut ctx, prev, node);
        prev = node;
    }
    let sink = ctx.add_node(Box::new(Sink), 1);
    wire(&mut ctx, prev, sink);
    ctx
}

fn make_fan_out(sinks: usize) -> AudioContext {
    let mut ctx = context_with(MAX_POOL_BLOCKS);
    let src = ctx.add_node(Box::new(Source), 0);
    for _ in 0..sinks {
        let sink = ctx.add_node(Box::new(Sink), 1);
        wire(&mut ctx, src, sink);
    }
    ctx
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/pool");

    group.bench_function("allocate_release", |b| {
        let mut ctx = context_with(MAX_POOL_BLOCKS);
        b.iter(|| {
            let block = ctx.allocate().unwrap();
            ctx.release(black_box(block));
        });
    });

    group.bench_function("allocate_full_pool", |b| {
        let mut ctx = context_with(MAX_POOL_BLOCKS);
        b.iter(|| {
            let mut held = Vec::with_capacity(MAX_POOL_BLOCKS);
            while let Some(block) = ctx.allocate() {
                held.push(block);
            }
            for block in held.drain(..) {
                ctx.release(block);
            }
        });
    });

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/tick");

    for &stages in CHAIN_LENGTHS {
        group.bench_with_input(BenchmarkId::new("chain", stages), &stages, |b, &n| {
            let mut ctx = make_chain(n);
            b.iter(|| ctx.update_all(black_box(&NullCounter)));
        });
    }

    for &sinks in FAN_OUTS {
        group.bench_with_input(BenchmarkId::new("fan_out", sinks), &sinks, |b, &n| {
            let mut ctx = make_fan_out(n);
            b.iter(|| ctx.update_all(black_box(&NullCounter)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pool, bench_tick);
criterion_main!(benches);
