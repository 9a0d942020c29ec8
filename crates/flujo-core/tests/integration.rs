//! Integration tests for the flujo-core data-flow engine.
//!
//! Drives full pipelines through `update_all` with real node
//! implementations: a constant source, an in-place gain stage, a
//! two-input mixer, and a recording sink. Verifies end-to-end sample
//! propagation, pool occupancy across ticks, graceful degradation under
//! pool exhaustion, and cycle accounting.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use flujo_core::{AudioBlock, AudioContext, AudioNode, CycleCounter, NodeId, UpdateContext};

fn leak_storage(count: usize) -> &'static mut [AudioBlock] {
    let blocks: Vec<AudioBlock> = (0..count).map(|_| AudioBlock::EMPTY).collect();
    Box::leak(blocks.into_boxed_slice())
}

fn context_with(pool_blocks: usize) -> AudioContext {
    let mut ctx = AudioContext::new();
    ctx.init_pool(leak_storage(pool_blocks));
    ctx
}

fn wire(ctx: &mut AudioContext, src: NodeId, src_port: u8, dst: NodeId, dst_port: u8) {
    let id = ctx.add_connection(src, src_port, dst, dst_port).unwrap();
    ctx.connect(id).unwrap();
}

/// Counter that advances by one per read; enough to make elapsed-cycle
/// figures non-zero and deterministic.
struct TickingCounter(std::cell::Cell<u32>);

impl TickingCounter {
    fn new() -> Self {
        Self(std::cell::Cell::new(0))
    }
}

impl CycleCounter for TickingCounter {
    fn cycles(&self) -> u32 {
        let v = self.0.get();
        self.0.set(v + 1);
        v
    }
}

// ============================================================================
// Node implementations
// ============================================================================

/// Emits a block filled with a constant value every tick. Counts the ticks
/// where allocation failed so tests can observe dropped frames.
struct Constant {
    value: i16,
    dropped: Arc<AtomicUsize>,
}

impl AudioNode for Constant {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        let Some(block) = io.allocate() else {
            self.dropped.fetch_add(1, Ordering::SeqCst);
            return;
        };
        io.block_samples_mut(&block).fill(self.value);
        io.transmit(&block, 0);
        io.release(block);
    }
}

/// Multiplies every sample by a fixed integer factor, in place when the
/// input block is exclusively owned.
struct Gain(i16);

impl AudioNode for Gain {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        let Some(block) = io.receive_writable(0) else {
            return;
        };
        for s in io.block_samples_mut(&block) {
            *s = s.saturating_mul(self.0);
        }
        io.transmit(&block, 0);
        io.release(block);
    }
}

/// Sums two inputs into a fresh output block. A missing input contributes
/// silence; a tick with both inputs missing produces nothing.
struct Mixer;

impl AudioNode for Mixer {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        let left = io.receive_read_only(0);
        let right = io.receive_read_only(1);
        if left.is_none() && right.is_none() {
            return;
        }
        let Some(out) = io.allocate() else {
            if let Some(b) = left {
                io.release(b);
            }
            if let Some(b) = right {
                io.release(b);
            }
            return;
        };
        io.block_samples_mut(&out).fill(0);
        for input in [left, right].into_iter().flatten() {
            let data = *io.block_samples(&input);
            for (acc, s) in io.block_samples_mut(&out).iter_mut().zip(data) {
                *acc = acc.saturating_add(s);
            }
            io.release(input);
        }
        io.transmit(&out, 0);
        io.release(out);
    }
}

/// Records the first sample of every block it receives.
struct Sink {
    log: Arc<Mutex<Vec<i16>>>,
}

impl AudioNode for Sink {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        let Some(block) = io.receive_read_only(0) else {
            return;
        };
        self.log.lock().unwrap().push(io.block_samples(&block)[0]);
        io.release(block);
    }
}

// ============================================================================
// 1. Linear pipeline
// ============================================================================

#[test]
fn samples_flow_through_a_source_gain_sink_chain() {
    let mut ctx = context_with(8);
    let log = Arc::new(Mutex::new(Vec::new()));
    let dropped = Arc::new(AtomicUsize::new(0));

    let src = ctx.add_node(
        Box::new(Constant {
            value: 100,
            dropped: Arc::clone(&dropped),
        }),
        0,
    );
    let gain = ctx.add_node(Box::new(Gain(3)), 1);
    let sink = ctx.add_node(Box::new(Sink { log: Arc::clone(&log) }), 1);
    wire(&mut ctx, src, 0, gain, 0);
    wire(&mut ctx, gain, 0, sink, 0);

    let counter = TickingCounter::new();
    for _ in 0..5 {
        ctx.update_all(&counter);
    }

    assert_eq!(*log.lock().unwrap(), vec![300; 5]);
    assert_eq!(dropped.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.pool().used(), 0, "every tick returns to baseline");
}

#[test]
fn gain_stage_mutates_in_place_for_a_sole_consumer() {
    let mut ctx = context_with(8);
    let log = Arc::new(Mutex::new(Vec::new()));
    let dropped = Arc::new(AtomicUsize::new(0));

    let src = ctx.add_node(
        Box::new(Constant {
            value: 7,
            dropped: Arc::clone(&dropped),
        }),
        0,
    );
    let gain = ctx.add_node(Box::new(Gain(2)), 1);
    let sink = ctx.add_node(Box::new(Sink { log: Arc::clone(&log) }), 1);
    wire(&mut ctx, src, 0, gain, 0);
    wire(&mut ctx, gain, 0, sink, 0);

    ctx.update_all(&TickingCounter::new());
    assert_eq!(*log.lock().unwrap(), vec![14]);
    // Peak occupancy of one tick: source block plus nothing extra, since
    // the gain stage wrote into the block it received.
    assert_eq!(ctx.pool().used_max(), 1);
}

// ============================================================================
// 2. Fan-out and mixing
// ============================================================================

#[test]
fn fan_out_into_a_mixer_doubles_the_signal() {
    let mut ctx = context_with(8);
    let log = Arc::new(Mutex::new(Vec::new()));
    let dropped = Arc::new(AtomicUsize::new(0));

    let src = ctx.add_node(
        Box::new(Constant {
            value: 25,
            dropped: Arc::clone(&dropped),
        }),
        0,
    );
    let mix = ctx.add_node(Box::new(Mixer), 2);
    let sink = ctx.add_node(Box::new(Sink { log: Arc::clone(&log) }), 1);
    wire(&mut ctx, src, 0, mix, 0);
    wire(&mut ctx, src, 0, mix, 1);
    wire(&mut ctx, mix, 0, sink, 0);

    let counter = TickingCounter::new();
    for _ in 0..3 {
        ctx.update_all(&counter);
    }

    assert_eq!(*log.lock().unwrap(), vec![50, 50, 50]);
    assert_eq!(ctx.pool().used(), 0);
}

#[test]
fn one_source_feeds_many_independent_sinks() {
    let mut ctx = context_with(8);
    let dropped = Arc::new(AtomicUsize::new(0));
    let logs: Vec<Arc<Mutex<Vec<i16>>>> = (0..4).map(|_| Arc::new(Mutex::new(Vec::new()))).collect();

    let src = ctx.add_node(
        Box::new(Constant {
            value: 9,
            dropped: Arc::clone(&dropped),
        }),
        0,
    );
    for log in &logs {
        let sink = ctx.add_node(Box::new(Sink { log: Arc::clone(log) }), 1);
        wire(&mut ctx, src, 0, sink, 0);
    }

    ctx.update_all(&TickingCounter::new());
    for log in &logs {
        assert_eq!(*log.lock().unwrap(), vec![9]);
    }
    // One shared block for all four sinks, never four copies.
    assert_eq!(ctx.pool().used_max(), 1);
}

// ============================================================================
// 3. Exhaustion and recovery
// ============================================================================

/// Receives blocks but never releases them until told, simulating a
/// consumer that falls behind (e.g. a slow USB endpoint).
struct Hoarder {
    held: Vec<flujo_core::BlockHandle>,
    hoarding: Arc<AtomicUsize>,
}

impl AudioNode for Hoarder {
    fn update(&mut self, io: &mut UpdateContext<'_>) {
        if self.hoarding.load(Ordering::SeqCst) == 0 {
            for held in self.held.drain(..) {
                io.release(held);
            }
        }
        let Some(block) = io.receive_read_only(0) else {
            return;
        };
        if self.hoarding.load(Ordering::SeqCst) != 0 {
            self.held.push(block);
        } else {
            io.release(block);
        }
    }
}

#[test]
fn pool_exhaustion_drops_frames_then_recovers() {
    let mut ctx = context_with(3);
    let dropped = Arc::new(AtomicUsize::new(0));
    let hoarding = Arc::new(AtomicUsize::new(1));

    let src = ctx.add_node(
        Box::new(Constant {
            value: 1,
            dropped: Arc::clone(&dropped),
        }),
        0,
    );
    let hoarder = ctx.add_node(
        Box::new(Hoarder {
            held: Vec::new(),
            hoarding: Arc::clone(&hoarding),
        }),
        1,
    );
    wire(&mut ctx, src, 0, hoarder, 0);

    let counter = TickingCounter::new();
    // Three ticks fill the pool, further ticks fail to allocate.
    for _ in 0..6 {
        ctx.update_all(&counter);
    }
    assert_eq!(ctx.pool().used(), 3);
    assert_eq!(dropped.load(Ordering::SeqCst), 3, "every extra tick dropped");

    // Consumer catches up. The first recovery tick still drops one frame:
    // the source runs before the hoarder returns its blocks.
    hoarding.store(0, Ordering::SeqCst);
    ctx.update_all(&counter);
    assert_eq!(dropped.load(Ordering::SeqCst), 4);
    assert_eq!(ctx.pool().used(), 0, "held blocks returned");

    ctx.update_all(&counter);
    assert_eq!(dropped.load(Ordering::SeqCst), 4, "allocating again");
    assert_eq!(ctx.pool().used(), 0);
    assert_eq!(ctx.pool().used_max(), 3);
}

// ============================================================================
// 4. Statistics
// ============================================================================

#[test]
fn cycle_and_pool_statistics_track_across_ticks() {
    let mut ctx = context_with(8);
    let log = Arc::new(Mutex::new(Vec::new()));
    let dropped = Arc::new(AtomicUsize::new(0));

    let src = ctx.add_node(
        Box::new(Constant {
            value: 5,
            dropped: Arc::clone(&dropped),
        }),
        0,
    );
    let sink = ctx.add_node(Box::new(Sink { log: Arc::clone(&log) }), 1);
    wire(&mut ctx, src, 0, sink, 0);

    ctx.update_all(&TickingCounter::new());
    assert!(ctx.cpu_cycles(src) > 0);
    assert!(ctx.cpu_cycles_total() > 0);
    assert_eq!(ctx.cpu_cycles_max(src), ctx.cpu_cycles(src));
    assert_eq!(ctx.cpu_cycles_total_max(), ctx.cpu_cycles_total());

    ctx.reset_cpu_stats();
    assert_eq!(ctx.cpu_cycles_total_max(), ctx.cpu_cycles_total());

    assert_eq!(ctx.pool().used_max(), 1);
    ctx.reset_pool_stats();
    assert_eq!(ctx.pool().used_max(), 0);
}
