//! Flujo Core — real-time audio data-flow for bare-metal targets
//!
//! This crate is the data-movement core of an embedded audio-processing
//! library: it owns no DSP and no hardware drivers, only the machinery that
//! moves fixed-size sample blocks between processing nodes under a periodic
//! interrupt.
//!
//! # Core Abstractions
//!
//! ## Block Pool
//!
//! - [`BlockPool`] - fixed-capacity arena over application-supplied storage,
//!   bitmap free list, O(1) interrupt-safe allocate/release
//! - [`AudioBlock`] - 128-sample block, the unit of data in the graph
//! - [`BlockHandle`] - one reference-counted ownership of a block
//!
//! ## Graph
//!
//! - [`AudioNode`] - the single-operation trait every processing unit
//!   implements; invoked once per tick
//! - [`AudioContext`] - process-wide context: node registry, connection
//!   arena, pool, scheduler state
//! - Connections are created once, then wired/unwired with
//!   `connect`/`disconnect`; `transmit` fans a block out to every wired
//!   destination by shared ownership
//!
//! ## Scheduler
//!
//! - `update_all` walks nodes in registration order each tick, skipping
//!   inactive ones, and records per-node and total cycle cost
//! - [`AudioSystem`] - `critical-section` wrapper sharing one context
//!   between foreground code and the timer ISR
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`) for embedded audio
//! applications. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! flujo-core = { version = "0.1", default-features = false, features = ["float"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use flujo_core::{AudioBlock, AudioContext, AudioNode, UpdateContext};
//!
//! /// Emits a constant DC level every tick.
//! struct Dc(i16);
//!
//! impl AudioNode for Dc {
//!     fn update(&mut self, io: &mut UpdateContext<'_>) {
//!         let Some(block) = io.allocate() else { return }; // dropped frame
//!         io.block_samples_mut(&block).fill(self.0);
//!         io.transmit(&block, 0);
//!         io.release(block);
//!     }
//! }
//!
//! /// Consumes its input and remembers the first sample.
//! struct Probe(i16);
//!
//! impl AudioNode for Probe {
//!     fn update(&mut self, io: &mut UpdateContext<'_>) {
//!         if let Some(block) = io.receive_read_only(0) {
//!             self.0 = io.block_samples(&block)[0];
//!             io.release(block);
//!         }
//!     }
//! }
//!
//! let mut ctx = AudioContext::new();
//! let storage: Vec<AudioBlock> = (0..8).map(|_| AudioBlock::EMPTY).collect();
//! ctx.init_pool(Box::leak(storage.into_boxed_slice()));
//!
//! let src = ctx.add_node(Box::new(Dc(1000)), 0);
//! let sink = ctx.add_node(Box::new(Probe(0)), 1);
//! let cord = ctx.add_connection(src, 0, sink, 0).unwrap();
//! ctx.connect(cord).unwrap();
//! ```
//!
//! # Design Principles
//!
//! - **Single core, one interrupt**: the tick preempts the foreground; a
//!   critical section is the only synchronization primitive needed
//! - **Graceful exhaustion**: an empty pool means dropped frames and a
//!   rising high-water mark, never a crash
//! - **Explicit ownership**: block handles are not `Clone`; every owner is
//!   minted by the pool and must flow back into `release`
//! - **No hidden globals**: all state lives in an explicit context value

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod block;
pub mod connection;
pub mod context;
pub mod node;
pub mod pool;
pub mod system;

// Re-export main types at crate root
pub use block::{AudioBlock, BLOCK_SAMPLES, BlockHandle};
#[cfg(feature = "float")]
pub use block::{BLOCK_FLOAT_SAMPLES, SampleKind, f32_to_q15, q15_to_f32};
pub use connection::ConnectionId;
pub use context::{AudioContext, GraphError, UpdateContext};
pub use node::{AudioNode, NodeId};
pub use pool::{BlockPool, MAX_POOL_BLOCKS};
pub use system::{AudioSystem, CycleCounter, UpdateTimer};
