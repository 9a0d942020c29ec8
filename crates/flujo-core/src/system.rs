//! Sharing the context between foreground code and the tick interrupt.
//!
//! The execution model is a single core with one periodic interrupt: the
//! ISR runs [`AudioContext::update_all`] to completion, foreground code
//! mutates the graph and pool in between. [`AudioSystem`] wraps the context
//! in a `critical_section::Mutex<RefCell<_>>` so both contexts get
//! serialized access — every operation is one short interrupt-masked
//! section, which is what makes the pool's bit-scan and the input-slot
//! writes atomic with respect to a concurrently firing tick.
//!
//! On Cortex-M targets the application enables a `critical-section`
//! implementation (e.g. `cortex-m` with `critical-section-single-core`);
//! host tests use the `std` one pulled in by this crate's `std` feature.
//!
//! ```ignore
//! static AUDIO: AudioSystem = AudioSystem::new();
//!
//! // startup
//! AUDIO.init_pool(STORAGE.init([AudioBlock::EMPTY; 24]));
//!
//! // timer ISR
//! fn on_block_timer() {
//!     AUDIO.update_all(&DwtCounter);
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use alloc::boxed::Box;

use crate::block::{AudioBlock, BlockHandle};
use crate::connection::ConnectionId;
use crate::context::{AudioContext, GraphError};
use crate::node::{AudioNode, NodeId};

/// Free-running cycle counter used for per-node CPU accounting.
///
/// On Cortex-M this is DWT CYCCNT; tests provide a fake. Wrapping is fine —
/// the scheduler uses wrapping subtraction.
pub trait CycleCounter {
    /// Current counter value.
    fn cycles(&self) -> u32;
}

/// The periodic interrupt source driving the tick.
///
/// The core never touches hardware directly; it asks the application's
/// timer to arm or disarm through this trait.
pub trait UpdateTimer {
    /// Start periodic tick interrupts at the fixed block period.
    fn arm(&mut self);
    /// Stop tick interrupts.
    fn disarm(&mut self);
}

/// Interrupt-safe wrapper around one [`AudioContext`].
///
/// Suitable for a `static`. Every method runs inside one critical section;
/// arbitrary multi-step foreground work can use [`with`](Self::with) to
/// batch under a single section.
pub struct AudioSystem {
    inner: Mutex<RefCell<AudioContext>>,
}

impl AudioSystem {
    /// A system around an empty context.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(AudioContext::new())),
        }
    }

    /// Runs `f` on the context inside one critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut AudioContext) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// See [`AudioContext::init_pool`].
    pub fn init_pool(&self, storage: &'static mut [AudioBlock]) {
        self.with(|ctx| ctx.init_pool(storage));
    }

    /// See [`AudioContext::allocate`].
    pub fn allocate(&self) -> Option<BlockHandle> {
        self.with(AudioContext::allocate)
    }

    /// See [`AudioContext::release`].
    pub fn release(&self, block: BlockHandle) {
        self.with(|ctx| ctx.release(block));
    }

    /// See [`AudioContext::add_node`].
    pub fn add_node(&self, node: Box<dyn AudioNode + Send>, num_inputs: usize) -> NodeId {
        self.with(|ctx| ctx.add_node(node, num_inputs))
    }

    /// See [`AudioContext::add_connection`].
    pub fn add_connection(
        &self,
        src: NodeId,
        src_port: u8,
        dst: NodeId,
        dst_port: u8,
    ) -> Result<ConnectionId, GraphError> {
        self.with(|ctx| ctx.add_connection(src, src_port, dst, dst_port))
    }

    /// See [`AudioContext::connect`].
    pub fn connect(&self, id: ConnectionId) -> Result<(), GraphError> {
        self.with(|ctx| ctx.connect(id))
    }

    /// See [`AudioContext::disconnect`].
    pub fn disconnect(&self, id: ConnectionId) -> Result<(), GraphError> {
        self.with(|ctx| ctx.disconnect(id))
    }

    /// Runs one tick; this is what the timer ISR calls.
    pub fn update_all<C: CycleCounter>(&self, counter: &C) {
        self.with(|ctx| ctx.update_all(counter));
    }

    /// See [`AudioContext::start_updates`].
    pub fn start_updates<T: UpdateTimer>(&self, timer: &mut T) -> bool {
        self.with(|ctx| ctx.start_updates(timer))
    }

    /// See [`AudioContext::stop_updates`].
    pub fn stop_updates<T: UpdateTimer>(&self, timer: &mut T) {
        self.with(|ctx| ctx.stop_updates(timer));
    }
}

impl Default for AudioSystem {
    fn default() -> Self {
        Self::new()
    }
}
