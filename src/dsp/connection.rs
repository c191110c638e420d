use super::node::NodeId;
use super::signal::SharedSignal;
use super::uniqueid::UniqueId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConnectionId(u64);

impl UniqueId for ConnectionId {
    fn value(&self) -> u64 {
        self.0
    }
    fn next(&self) -> ConnectionId {
        ConnectionId(self.0 + 1)
    }
}

/// One inlet-outlet edge (§4.7). Mediates the signal-sharing handshake
/// between the source outlet and the destination inlet: at most one
/// connection on a given outlet may hold a write acquisition, and a read
/// acquisition may not coexist with a write acquisition.
pub struct Connection {
    id: ConnectionId,
    src_node: NodeId,
    src_outlet: usize,
    dst_node: NodeId,
    dst_inlet: usize,
    read_acquired: bool,
    write_acquired: bool,
    /// True outside of prepare; `perform` skips locked connections and
    /// `get_signal` returns `None` while locked. Prevents stale traversal
    /// during an in-progress prepare.
    locked: bool,
    /// Deferred-removal marker: set by `disconnect`, compacted at the next
    /// prepare rather than removed immediately (§4.5, §4.9).
    disconnected: bool,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        src_node: NodeId,
        src_outlet: usize,
        dst_node: NodeId,
        dst_inlet: usize,
    ) -> Connection {
        Connection {
            id,
            src_node,
            src_outlet,
            dst_node,
            dst_inlet,
            read_acquired: false,
            write_acquired: false,
            // Starts locked: it only becomes traversable once the owning
            // inlet's prepare has chosen a pull strategy and unlocks it.
            locked: true,
            disconnected: false,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn src_node(&self) -> NodeId {
        self.src_node
    }

    pub fn src_outlet(&self) -> usize {
        self.src_outlet
    }

    pub fn dst_node(&self) -> NodeId {
        self.dst_node
    }

    pub fn dst_inlet(&self) -> usize {
        self.dst_inlet
    }

    pub fn matches(&self, src_node: NodeId, src_outlet: usize, dst_node: NodeId, dst_inlet: usize) -> bool {
        self.src_node == src_node
            && self.src_outlet == src_outlet
            && self.dst_node == dst_node
            && self.dst_inlet == dst_inlet
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    pub fn mark_disconnected(&mut self) {
        self.disconnected = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_read_acquired(&self) -> bool {
        self.read_acquired
    }

    pub fn is_write_acquired(&self) -> bool {
        self.write_acquired
    }

    /// Clears both acquisition flags. Called at the start of the owning
    /// inlet's prepare, before any acquisition attempt.
    pub fn reset(&mut self) {
        self.read_acquired = false;
        self.write_acquired = false;
    }

    /// Succeeds iff this connection is not disconnected, holds no
    /// acquisition of its own yet, and `sibling_write_acquired` (computed by
    /// the caller by scanning every other connection on the same outlet) is
    /// false.
    pub fn acquire_read_signal(
        &mut self,
        outlet_signal: &SharedSignal,
        sibling_write_acquired: bool,
    ) -> Option<SharedSignal> {
        if self.disconnected || self.read_acquired || self.write_acquired {
            return None;
        }
        if sibling_write_acquired {
            return None;
        }
        self.read_acquired = true;
        Some(outlet_signal.clone())
    }

    /// Succeeds iff this connection is not disconnected, holds no
    /// acquisition of its own yet, and `sibling_acquired` (read or write, on
    /// any other connection of the same outlet) is false.
    pub fn acquire_write_signal(
        &mut self,
        outlet_signal: &SharedSignal,
        sibling_acquired: bool,
    ) -> Option<SharedSignal> {
        if self.disconnected || self.read_acquired || self.write_acquired {
            return None;
        }
        if sibling_acquired {
            return None;
        }
        self.write_acquired = true;
        Some(outlet_signal.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dsp::signal::new_shared_signal;

    fn node(n: u64) -> NodeId {
        NodeId::from_raw(n)
    }

    #[test]
    fn read_acquire_refused_if_sibling_holds_write() {
        let sig = new_shared_signal(4, 0.0);
        let mut c = Connection::new(ConnectionId(0), node(1), 0, node(2), 0);
        assert!(c.acquire_read_signal(&sig, true).is_none());
        assert!(!c.is_read_acquired());
    }

    #[test]
    fn write_acquire_refused_if_sibling_holds_any() {
        let sig = new_shared_signal(4, 0.0);
        let mut c = Connection::new(ConnectionId(0), node(1), 0, node(2), 0);
        assert!(c.acquire_write_signal(&sig, true).is_none());
    }

    #[test]
    fn acquisitions_succeed_when_uncontended_and_are_mutually_exclusive() {
        let sig = new_shared_signal(4, 0.0);
        let mut c = Connection::new(ConnectionId(0), node(1), 0, node(2), 0);
        assert!(c.acquire_read_signal(&sig, false).is_some());
        // Already holds a read acquisition: a second attempt must fail.
        assert!(c.acquire_write_signal(&sig, false).is_none());
        c.reset();
        assert!(!c.is_read_acquired());
        assert!(!c.is_write_acquired());
    }

    #[test]
    fn disconnected_connection_never_acquires() {
        let sig = new_shared_signal(4, 0.0);
        let mut c = Connection::new(ConnectionId(0), node(1), 0, node(2), 0);
        c.mark_disconnected();
        assert!(c.acquire_read_signal(&sig, false).is_none());
        assert!(c.acquire_write_signal(&sig, false).is_none());
    }
}
