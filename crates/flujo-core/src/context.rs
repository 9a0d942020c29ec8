//! The audio context: graph mutation, ownership transfer, and the tick walk.
//!
//! [`AudioContext`] is the process-wide state of the data-flow core — block
//! pool, node arena, connection arena, and scheduler bookkeeping — as one
//! explicit value. Nothing here is a hidden singleton: tests build and
//! throw away contexts freely, firmware puts exactly one inside an
//! [`AudioSystem`](crate::AudioSystem) and shares it with the timer ISR.
//!
//! All methods take `&mut self`; exclusivity between foreground code and
//! the interrupt is the wrapper's job, not this type's. That keeps every
//! operation directly unit-testable.
//!
//! # Ownership rules
//!
//! - `allocate` hands out the single owning reference to a fresh block.
//! - `transmit` deposits one additional owning reference per connected,
//!   empty destination slot. The transmitter keeps its own reference and
//!   releases it once after transmitting to all desired ports — that is
//!   what makes one block fan out to many destinations cheaply.
//! - `receive_read_only` takes the pending reference out of an input slot;
//!   the contents may be shared and must not be written.
//! - `receive_writable` guarantees exclusivity, copying the block first if
//!   other owners exist.
//! - A destination slot that still holds an unconsumed block is never
//!   overwritten; `transmit` skips it and the frame is dropped for that
//!   destination only.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::block::{AudioBlock, BLOCK_SAMPLES, BlockHandle};
#[cfg(feature = "float")]
use crate::block::{BLOCK_FLOAT_SAMPLES, SampleKind, f32_to_q15, q15_to_f32};
use crate::connection::{Connection, ConnectionId};
use crate::node::{AudioNode, NodeId, StreamEntry};
use crate::pool::BlockPool;
use crate::system::{CycleCounter, UpdateTimer};

/// Errors from graph mutation operations.
///
/// Every failing operation leaves the graph untouched, so callers may treat
/// any of these as a no-op and carry on. Pool exhaustion is deliberately not
/// represented here: `allocate` returns `Option` and degrades to dropped
/// frames.
#[derive(Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The referenced node was never registered.
    NodeNotFound(NodeId),
    /// The referenced connection record does not exist.
    ConnectionNotFound(ConnectionId),
    /// The destination port index is outside the node's declared inputs.
    InvalidPort(u8),
    /// `connect` on a connection that is already wired.
    AlreadyConnected,
    /// `disconnect` on a connection that is not wired.
    NotConnected,
    /// Another wired connection already covers the same endpoint tuple.
    DuplicateConnection,
}

impl core::fmt::Display for GraphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node {id} not found"),
            Self::ConnectionNotFound(id) => write!(f, "connection {id} not found"),
            Self::InvalidPort(port) => write!(f, "input port {port} out of range"),
            Self::AlreadyConnected => write!(f, "connection is already wired"),
            Self::NotConnected => write!(f, "connection is not wired"),
            Self::DuplicateConnection => {
                write!(f, "these endpoints are already wired by another connection")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GraphError {}

/// Process-wide state of the data-flow core.
pub struct AudioContext {
    pool: BlockPool,
    streams: Vec<StreamEntry>,
    connections: Vec<Connection>,
    updates_armed: bool,
    cycles_total: u32,
    cycles_total_max: u32,
}

impl AudioContext {
    /// An empty context with an uninitialized pool.
    pub const fn new() -> Self {
        Self {
            pool: BlockPool::new(),
            streams: Vec::new(),
            connections: Vec::new(),
            updates_armed: false,
            cycles_total: 0,
            cycles_total_max: 0,
        }
    }

    // --- Pool ---

    /// Installs the pool's backing storage; see [`BlockPool::init`].
    pub fn init_pool(&mut self, storage: &'static mut [AudioBlock]) {
        self.pool.init(storage);
    }

    /// Allocates one block with this caller as sole owner, or `None` when
    /// the pool is exhausted (recoverable: skip output this tick).
    pub fn allocate(&mut self) -> Option<BlockHandle> {
        self.pool.allocate()
    }

    /// Allocates a linked float pair; see [`BlockPool::allocate_pair`].
    #[cfg(feature = "float")]
    pub fn allocate_pair(&mut self) -> Option<BlockHandle> {
        self.pool.allocate_pair()
    }

    /// Gives back one ownership reference; see [`BlockPool::release`].
    pub fn release(&mut self, block: BlockHandle) {
        self.pool.release(block);
    }

    /// Read-only access to pool diagnostics (`used`, `used_max`, capacity).
    pub fn pool(&self) -> &BlockPool {
        &self.pool
    }

    /// Resets the pool occupancy high-water mark.
    pub fn reset_pool_stats(&mut self) {
        self.pool.reset_used_max();
    }

    // --- Node registration ---

    /// Registers a PCM node with `num_inputs` input slots.
    ///
    /// Appends to the invocation list: the scheduler runs nodes in
    /// registration order every tick, so producers must be registered
    /// before their consumers.
    pub fn add_node(&mut self, node: Box<dyn AudioNode + Send>, num_inputs: usize) -> NodeId {
        self.push_entry(StreamEntry::new(
            node,
            num_inputs,
            #[cfg(feature = "float")]
            SampleKind::Pcm,
        ))
    }

    /// Registers a node whose ports carry float pairs.
    #[cfg(feature = "float")]
    pub fn add_float_node(&mut self, node: Box<dyn AudioNode + Send>, num_inputs: usize) -> NodeId {
        self.push_entry(StreamEntry::new(node, num_inputs, SampleKind::Float))
    }

    fn push_entry(&mut self, entry: StreamEntry) -> NodeId {
        let id = NodeId(self.streams.len() as u32);
        self.streams.push(entry);
        #[cfg(feature = "tracing")]
        tracing::debug!("add_node: {id}");
        id
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.streams.len()
    }

    /// Whether the node currently participates in the graph.
    pub fn is_active(&self, node: NodeId) -> bool {
        self.streams
            .get(node.0 as usize)
            .is_some_and(|entry| entry.active)
    }

    // --- Connections ---

    /// Creates an unwired connection record between two ports.
    ///
    /// The record persists for the life of the context; wire and unwire it
    /// with [`connect`](Self::connect) / [`disconnect`](Self::disconnect).
    pub fn add_connection(
        &mut self,
        src: NodeId,
        src_port: u8,
        dst: NodeId,
        dst_port: u8,
    ) -> Result<ConnectionId, GraphError> {
        if self.streams.get(src.0 as usize).is_none() {
            return Err(GraphError::NodeNotFound(src));
        }
        if self.streams.get(dst.0 as usize).is_none() {
            return Err(GraphError::NodeNotFound(dst));
        }
        let id = ConnectionId(self.connections.len() as u32);
        self.connections.push(Connection {
            src,
            src_port,
            dst,
            dst_port,
            connected: false,
        });
        Ok(id)
    }

    /// Wires a connection: splices it at the tail of the source's outgoing
    /// list and marks both endpoints active.
    ///
    /// Fails without side effects on an already-wired record, an
    /// out-of-range destination port, or a duplicate endpoint tuple.
    pub fn connect(&mut self, id: ConnectionId) -> Result<(), GraphError> {
        let conn = self
            .connections
            .get(id.0 as usize)
            .ok_or(GraphError::ConnectionNotFound(id))?;
        let (src, src_port) = (conn.src, conn.src_port);
        let (dst, dst_port) = (conn.dst, conn.dst_port);

        if conn.connected {
            return Err(GraphError::AlreadyConnected);
        }
        if usize::from(dst_port) >= self.streams[dst.0 as usize].inputs.len() {
            return Err(GraphError::InvalidPort(dst_port));
        }
        for &other in &self.streams[src.0 as usize].outgoing {
            let o = &self.connections[other.0 as usize];
            if o.src_port == src_port && o.dst == dst && o.dst_port == dst_port {
                return Err(GraphError::DuplicateConnection);
            }
        }

        self.streams[src.0 as usize].outgoing.push(id);
        self.connections[id.0 as usize].connected = true;

        let src_entry = &mut self.streams[src.0 as usize];
        src_entry.connection_count += 1;
        src_entry.active = true;
        let dst_entry = &mut self.streams[dst.0 as usize];
        dst_entry.connection_count += 1;
        dst_entry.active = true;

        #[cfg(feature = "tracing")]
        tracing::debug!("connect: {src}:{src_port} → {dst}:{dst_port}");
        Ok(())
    }

    /// Unwires a connection.
    ///
    /// Removes it from the source's outgoing list, releases any block still
    /// pending in the destination's input slot, and deactivates either
    /// endpoint whose connection count drops to zero.
    pub fn disconnect(&mut self, id: ConnectionId) -> Result<(), GraphError> {
        let conn = self
            .connections
            .get(id.0 as usize)
            .ok_or(GraphError::ConnectionNotFound(id))?;
        let (src, dst, dst_port) = (conn.src, conn.dst, conn.dst_port);

        if !conn.connected {
            return Err(GraphError::NotConnected);
        }
        if usize::from(dst_port) >= self.streams[dst.0 as usize].inputs.len() {
            return Err(GraphError::InvalidPort(dst_port));
        }

        let outgoing = &mut self.streams[src.0 as usize].outgoing;
        if let Some(pos) = outgoing.iter().position(|&c| c == id) {
            outgoing.remove(pos);
        }

        // A block the destination never consumed would otherwise be
        // stranded; release our deposit on its behalf.
        if let Some(pending) = self.streams[dst.0 as usize].inputs[usize::from(dst_port)].take() {
            self.pool.release(pending);
        }

        self.connections[id.0 as usize].connected = false;

        let src_entry = &mut self.streams[src.0 as usize];
        src_entry.connection_count -= 1;
        if src_entry.connection_count == 0 {
            src_entry.active = false;
        }
        let dst_entry = &mut self.streams[dst.0 as usize];
        dst_entry.connection_count -= 1;
        if dst_entry.connection_count == 0 {
            dst_entry.active = false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("disconnect: {src} → {dst}:{dst_port}");
        Ok(())
    }

    /// Number of connection records (wired or not).
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    // --- Ownership transfer ---

    /// Transmits a block from `node`'s output port to every wired
    /// connection on that port.
    ///
    /// Each destination whose input slot is empty gains one owning
    /// reference; occupied slots are skipped (an unconsumed input is never
    /// overwritten). The caller keeps its own reference and releases it
    /// separately after all transmits.
    ///
    /// With the `float` feature, a destination whose sample kind differs
    /// from the source node's gets a converted block instead. The first
    /// conversion per call is cached and re-shared with every later
    /// destination of the same kind; a failed conversion allocation leaves
    /// that one slot empty (dropped frame) and the walk continues.
    pub fn transmit(&mut self, node: NodeId, block: &BlockHandle, src_port: u8) {
        if self.streams.get(node.0 as usize).is_none() {
            return;
        }
        #[cfg(feature = "float")]
        let src_kind = self.streams[node.0 as usize].kind;
        #[cfg(feature = "float")]
        let mut cached_float: Option<u16> = None;
        #[cfg(feature = "float")]
        let mut cached_pcm: Option<u16> = None;

        let mut i = 0;
        loop {
            let Some(&cid) = self.streams[node.0 as usize].outgoing.get(i) else {
                break;
            };
            i += 1;

            let conn = &self.connections[cid.0 as usize];
            if conn.src_port != src_port {
                continue;
            }
            let (dst, dst_port) = (conn.dst, usize::from(conn.dst_port));
            if self.streams[dst.0 as usize].inputs[dst_port].is_some() {
                continue;
            }

            #[cfg(not(feature = "float"))]
            {
                let share = self.pool.retain(block.slot);
                self.streams[dst.0 as usize].inputs[dst_port] = Some(share);
            }

            #[cfg(feature = "float")]
            {
                let dst_kind = self.streams[dst.0 as usize].kind;
                let share = if dst_kind == src_kind {
                    Some(self.pool.retain(block.slot))
                } else if src_kind == SampleKind::Pcm {
                    self.shared_float_conversion(block.slot, &mut cached_float)
                } else {
                    self.shared_pcm_conversion(block.slot, &mut cached_pcm)
                };
                if let Some(share) = share {
                    self.streams[dst.0 as usize].inputs[dst_port] = Some(share);
                }
            }
        }
    }

    /// PCM → float pair, converting once and re-sharing the cached result.
    #[cfg(feature = "float")]
    fn shared_float_conversion(
        &mut self,
        src_slot: u16,
        cache: &mut Option<u16>,
    ) -> Option<BlockHandle> {
        if let Some(slot) = *cache {
            return Some(self.pool.retain(slot));
        }
        let pair = self.pool.allocate_pair()?;
        let data = self.pool.block_at(src_slot).data;
        let partner = self.pool.block_at(pair.slot).partner;

        let primary = self.pool.block_at_mut(pair.slot);
        for i in 0..BLOCK_FLOAT_SAMPLES {
            primary.set_float_at(i, q15_to_f32(data[i]));
        }
        if let Some(partner) = partner {
            let second = self.pool.block_at_mut(partner);
            for i in 0..BLOCK_FLOAT_SAMPLES {
                second.set_float_at(i, q15_to_f32(data[BLOCK_FLOAT_SAMPLES + i]));
            }
        }

        *cache = Some(pair.slot);
        // First destination consumes the allocation's own reference.
        Some(pair)
    }

    /// Float pair → PCM, converting once and re-sharing the cached result.
    #[cfg(feature = "float")]
    fn shared_pcm_conversion(
        &mut self,
        src_slot: u16,
        cache: &mut Option<u16>,
    ) -> Option<BlockHandle> {
        if let Some(slot) = *cache {
            return Some(self.pool.retain(slot));
        }
        let out = self.pool.allocate()?;

        let mut data = [0_i16; BLOCK_SAMPLES];
        let src = self.pool.block_at(src_slot);
        for i in 0..BLOCK_FLOAT_SAMPLES {
            data[i] = f32_to_q15(src.float_at(i));
        }
        if let Some(partner) = src.partner {
            let second = self.pool.block_at(partner);
            for i in 0..BLOCK_FLOAT_SAMPLES {
                data[BLOCK_FLOAT_SAMPLES + i] = f32_to_q15(second.float_at(i));
            }
        }
        self.pool.block_at_mut(out.slot).data = data;

        *cache = Some(out.slot);
        Some(out)
    }

    /// Takes the pending block from an input slot, if any.
    ///
    /// The block may be shared with other owners; its contents must not be
    /// written. Out-of-range ports yield `None`.
    pub fn receive_read_only(&mut self, node: NodeId, input: usize) -> Option<BlockHandle> {
        self.streams.get_mut(node.0 as usize)?.inputs.get_mut(input)?.take()
    }

    /// Takes the pending block from an input slot with exclusive ownership.
    ///
    /// A shared block is replaced by a fresh copy (the original keeps its
    /// other owners, minus this reference). Returns `None` when the slot is
    /// empty or when a required copy cannot be allocated — in that case the
    /// input is still consumed.
    pub fn receive_writable(&mut self, node: NodeId, input: usize) -> Option<BlockHandle> {
        let taken = self.receive_read_only(node, input)?;
        if self.pool.block(&taken).ref_count() <= 1 {
            return Some(taken);
        }

        let copy = self.pool.allocate();
        if let Some(copy) = &copy {
            let data = self.pool.block_at(taken.slot).data;
            self.pool.block_at_mut(copy.slot).data = data;
        }
        self.pool.release(taken);
        copy
    }

    /// Float-aware read: like [`receive_read_only`](Self::receive_read_only)
    /// but yields only float pairs. A PCM block found in the slot is
    /// released and `None` returned.
    #[cfg(feature = "float")]
    pub fn receive_read_only_float(&mut self, node: NodeId, input: usize) -> Option<BlockHandle> {
        let block = self.receive_read_only(node, input)?;
        if self.pool.block(&block).kind() == SampleKind::Float {
            Some(block)
        } else {
            self.pool.release(block);
            None
        }
    }

    /// Float-aware writable receive.
    ///
    /// A copy is made only when *both* halves of the pair are shared; a
    /// pair with at least one exclusive half is returned unchanged. On a
    /// required copy, both original halves lose this reference even if the
    /// copy allocation fails.
    #[cfg(feature = "float")]
    pub fn receive_writable_float(&mut self, node: NodeId, input: usize) -> Option<BlockHandle> {
        let taken = self.receive_read_only(node, input)?;

        let block = self.pool.block(&taken);
        let Some(partner) = block.partner else {
            return Some(taken);
        };
        let both_shared =
            block.ref_count() > 1 && self.pool.block_at(partner).ref_count() > 1;
        if !both_shared {
            return Some(taken);
        }

        let copy = self.pool.allocate_pair();
        if let Some(copy) = &copy {
            let data = self.pool.block_at(taken.slot).data;
            self.pool.block_at_mut(copy.slot).data = data;
            if let Some(copy_partner) = self.pool.block_at(copy.slot).partner {
                let data = self.pool.block_at(partner).data;
                self.pool.block_at_mut(copy_partner).data = data;
            }
        }
        self.pool.release(taken);
        copy
    }

    // --- Block data access ---

    /// PCM sample view of a block.
    pub fn block_samples(&self, block: &BlockHandle) -> &[i16; BLOCK_SAMPLES] {
        &self.pool.block(block).data
    }

    /// Mutable PCM sample view of a block.
    ///
    /// Only correct on exclusively-owned blocks (`allocate`,
    /// `receive_writable`).
    pub fn block_samples_mut(&mut self, block: &BlockHandle) -> &mut [i16; BLOCK_SAMPLES] {
        debug_assert_eq!(
            self.pool.block(block).ref_count(),
            1,
            "mutating a shared block"
        );
        &mut self.pool.block_mut(block).data
    }

    /// Reads float sample `idx` (0..[`BLOCK_SAMPLES`]) of a pair, crossing
    /// into the partner block for the upper half. Indices addressing a
    /// missing partner read as 0.0.
    #[cfg(feature = "float")]
    pub fn float_sample(&self, block: &BlockHandle, idx: usize) -> f32 {
        let primary = self.pool.block(block);
        if idx < BLOCK_FLOAT_SAMPLES {
            primary.float_at(idx)
        } else if let Some(partner) = primary.partner {
            self.pool.block_at(partner).float_at(idx - BLOCK_FLOAT_SAMPLES)
        } else {
            0.0
        }
    }

    /// Writes float sample `idx` (0..[`BLOCK_SAMPLES`]) of a pair. Writes
    /// addressing a missing partner are dropped.
    #[cfg(feature = "float")]
    pub fn set_float_sample(&mut self, block: &BlockHandle, idx: usize, value: f32) {
        if idx < BLOCK_FLOAT_SAMPLES {
            self.pool.block_mut(block).set_float_at(idx, value);
        } else if let Some(partner) = self.pool.block(block).partner {
            self.pool
                .block_at_mut(partner)
                .set_float_at(idx - BLOCK_FLOAT_SAMPLES, value);
        }
    }

    // --- Scheduler ---

    /// Runs one tick: every active node's `update`, in registration order,
    /// with per-node and total cycle accounting.
    ///
    /// Inactive nodes are skipped entirely — no invocation, no timing. On
    /// hardware this is called from the periodic timer ISR; tests call it
    /// directly with a fake counter.
    pub fn update_all<C: CycleCounter>(&mut self, counter: &C) {
        let tick_start = counter.cycles();

        for idx in 0..self.streams.len() {
            if !self.streams[idx].active {
                continue;
            }
            let Some(mut node) = self.streams[idx].node.take() else {
                continue;
            };

            let start = counter.cycles();
            node.update(&mut UpdateContext {
                ctx: self,
                node: NodeId(idx as u32),
            });
            let elapsed = counter.cycles().wrapping_sub(start);

            let entry = &mut self.streams[idx];
            entry.node = Some(node);
            entry.cycles = elapsed;
            if elapsed > entry.cycles_max {
                entry.cycles_max = elapsed;
            }
        }

        let total = counter.cycles().wrapping_sub(tick_start);
        self.cycles_total = total;
        if total > self.cycles_total_max {
            self.cycles_total_max = total;
        }
    }

    /// Arms the periodic tick source. Idempotent: only the first call arms
    /// the timer; returns whether this call newly armed it.
    pub fn start_updates<T: UpdateTimer>(&mut self, timer: &mut T) -> bool {
        if self.updates_armed {
            return false;
        }
        timer.arm();
        self.updates_armed = true;
        true
    }

    /// Disarms the periodic tick source.
    pub fn stop_updates<T: UpdateTimer>(&mut self, timer: &mut T) {
        timer.disarm();
        self.updates_armed = false;
    }

    /// Whether the periodic tick source is armed.
    pub fn updates_armed(&self) -> bool {
        self.updates_armed
    }

    // --- CPU diagnostics ---

    /// Cycle cost of the node's most recent update (0 for unknown nodes).
    pub fn cpu_cycles(&self, node: NodeId) -> u32 {
        self.streams.get(node.0 as usize).map_or(0, |e| e.cycles)
    }

    /// Highest update cost seen for the node since the last stats reset.
    pub fn cpu_cycles_max(&self, node: NodeId) -> u32 {
        self.streams.get(node.0 as usize).map_or(0, |e| e.cycles_max)
    }

    /// Total cycle cost of the most recent tick.
    pub fn cpu_cycles_total(&self) -> u32 {
        self.cycles_total
    }

    /// Highest total tick cost seen since the last stats reset.
    pub fn cpu_cycles_total_max(&self) -> u32 {
        self.cycles_total_max
    }

    /// Resets every maximum tracker to its current value.
    pub fn reset_cpu_stats(&mut self) {
        for entry in &mut self.streams {
            entry.cycles_max = entry.cycles;
        }
        self.cycles_total_max = self.cycles_total;
    }
}

impl Default for AudioContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped handle a node receives during its own `update` call.
///
/// Wraps the context with the node's identity so receive/transmit address
/// the right slots and edges. Everything a processing step needs — pool
/// access, ownership transfer, sample views — is reachable from here.
pub struct UpdateContext<'a> {
    ctx: &'a mut AudioContext,
    node: NodeId,
}

impl UpdateContext<'_> {
    /// The node being updated.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Number of input slots this node declared at registration.
    pub fn input_count(&self) -> usize {
        self.ctx.streams[self.node.0 as usize].inputs.len()
    }

    /// See [`AudioContext::allocate`].
    pub fn allocate(&mut self) -> Option<BlockHandle> {
        self.ctx.allocate()
    }

    /// See [`AudioContext::allocate_pair`].
    #[cfg(feature = "float")]
    pub fn allocate_pair(&mut self) -> Option<BlockHandle> {
        self.ctx.allocate_pair()
    }

    /// See [`AudioContext::release`].
    pub fn release(&mut self, block: BlockHandle) {
        self.ctx.release(block);
    }

    /// See [`AudioContext::transmit`].
    pub fn transmit(&mut self, block: &BlockHandle, output_port: u8) {
        self.ctx.transmit(self.node, block, output_port);
    }

    /// See [`AudioContext::receive_read_only`].
    pub fn receive_read_only(&mut self, input: usize) -> Option<BlockHandle> {
        self.ctx.receive_read_only(self.node, input)
    }

    /// See [`AudioContext::receive_writable`].
    pub fn receive_writable(&mut self, input: usize) -> Option<BlockHandle> {
        self.ctx.receive_writable(self.node, input)
    }

    /// See [`AudioContext::receive_read_only_float`].
    #[cfg(feature = "float")]
    pub fn receive_read_only_float(&mut self, input: usize) -> Option<BlockHandle> {
        self.ctx.receive_read_only_float(self.node, input)
    }

    /// See [`AudioContext::receive_writable_float`].
    #[cfg(feature = "float")]
    pub fn receive_writable_float(&mut self, input: usize) -> Option<BlockHandle> {
        self.ctx.receive_writable_float(self.node, input)
    }

    /// See [`AudioContext::block_samples`].
    pub fn block_samples(&self, block: &BlockHandle) -> &[i16; BLOCK_SAMPLES] {
        self.ctx.block_samples(block)
    }

    /// See [`AudioContext::block_samples_mut`].
    pub fn block_samples_mut(&mut self, block: &BlockHandle) -> &mut [i16; BLOCK_SAMPLES] {
        self.ctx.block_samples_mut(block)
    }

    /// See [`AudioContext::float_sample`].
    #[cfg(feature = "float")]
    pub fn float_sample(&self, block: &BlockHandle, idx: usize) -> f32 {
        self.ctx.float_sample(block, idx)
    }

    /// See [`AudioContext::set_float_sample`].
    #[cfg(feature = "float")]
    pub fn set_float_sample(&mut self, block: &BlockHandle, idx: usize, value: f32) {
        self.ctx.set_float_sample(block, idx, value);
    }
}
