//! Connections: directed edges from output ports to input ports.
//!
//! A connection record exists independently of being wired. The application
//! creates it once with `add_connection`, then wires and unwires it with
//! `connect`/`disconnect` as the patch changes. Records live in an arena on
//! the context and are referenced by [`ConnectionId`] — there are no
//! intrusive list pointers between nodes.

use crate::node::NodeId;

/// Identifier of a connection record.
///
/// Assigned sequentially at creation and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub(crate) u32);

impl ConnectionId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}

/// A directed edge: source node output port → destination node input port.
pub(crate) struct Connection {
    pub src: NodeId,
    pub src_port: u8,
    pub dst: NodeId,
    pub dst_port: u8,
    /// Whether the edge is currently spliced into the source's outgoing list.
    pub connected: bool,
}
