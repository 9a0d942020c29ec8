//! Graph node abstraction and per-node bookkeeping.
//!
//! A node is any processing unit with input slots, output ports, and a
//! per-tick [`update`](AudioNode::update) step: I2S drivers, mixers,
//! filters, user queues. The core never knows concrete node types — the
//! scheduler holds `Box<dyn AudioNode + Send>` and invokes every active
//! node once per tick, in registration order. Registration order is the
//! processing order contract: construct producers before their consumers.

use alloc::{boxed::Box, vec::Vec};

use crate::block::BlockHandle;
#[cfg(feature = "float")]
use crate::block::SampleKind;
use crate::connection::ConnectionId;
use crate::context::UpdateContext;

/// Identifier of a registered node.
///
/// Assigned sequentially at registration and never reused; stable for the
/// life of the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A processing unit in the audio graph.
///
/// `update` is called once per scheduler tick, only while the node is
/// active (has at least one live connection). It must run to completion
/// without blocking — it executes in interrupt context and shares the block
/// period with every other node.
///
/// The failure convention is silent degradation: a node that cannot get a
/// block from the pool transmits nothing this tick and returns.
pub trait AudioNode {
    /// Process one tick: receive pending inputs, do work, transmit results,
    /// release whatever is no longer needed.
    fn update(&mut self, io: &mut UpdateContext<'_>);
}

/// Bookkeeping the context keeps for each registered node.
pub(crate) struct StreamEntry {
    /// The node itself; taken out of the slot while its own `update` runs.
    pub node: Option<Box<dyn AudioNode + Send>>,
    /// Pending input blocks, at most one per input port.
    pub inputs: Vec<Option<BlockHandle>>,
    /// Outgoing edges in connect order.
    pub outgoing: Vec<ConnectionId>,
    /// True iff at least one connection touches this node.
    pub active: bool,
    pub connection_count: u16,
    /// Cycle cost of the most recent update.
    pub cycles: u32,
    /// Highest cycle cost seen since the last stats reset.
    pub cycles_max: u32,
    /// Native sample representation of this node's ports.
    #[cfg(feature = "float")]
    pub kind: SampleKind,
}

impl StreamEntry {
    pub fn new(
        node: Box<dyn AudioNode + Send>,
        num_inputs: usize,
        #[cfg(feature = "float")] kind: SampleKind,
    ) -> Self {
        let mut inputs = Vec::with_capacity(num_inputs);
        inputs.resize_with(num_inputs, || None);
        Self {
            node: Some(node),
            inputs,
            outgoing: Vec::new(),
            active: false,
            connection_count: 0,
            cycles: 0,
            cycles_max: 0,
            #[cfg(feature = "float")]
            kind,
        }
    }
}
