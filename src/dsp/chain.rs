use std::collections::HashMap;

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use super::buffer::Buffer;
use super::connection::{Connection, ConnectionId};
use super::error::{ChainError, ProcessorPhase};
use super::inlet::PullStrategy;
use super::link::Link;
use super::node::{Node, NodeId, PerformState, PrepareState, ReleaseState};
use super::prepareinfo::PrepareInfo;
use super::processor::SharedProcessor;
use super::signal::{new_shared_signal, SharedSignal};
use super::uniqueid::IdGenerator;

/// Owns every [`Node`] and [`Connection`] in one dataflow graph (§3, §4.9).
///
/// `Chain` is the only entry point external code uses: adding/removing
/// processors, declaring/retracting links, preparing, ticking, and
/// releasing all go through its methods. Every method locks the chain's
/// single internal mutex for its duration (§5's `tick_mutex`), so a `Chain`
/// can be shared behind an `Arc` between a control thread issuing edits and
/// an audio thread calling `tick`.
pub struct Chain {
    inner: Mutex<ChainInner>,
}

struct ChainInner {
    nodes: HashMap<NodeId, Node>,
    connections: HashMap<ConnectionId, Connection>,
    next_connection_id: IdGenerator<ConnectionId>,
    sample_rate: usize,
    block_size: usize,
    prepared: bool,
    /// The chain-wide scratch signal bound to every disconnected, non-in-place
    /// port. No meaningful data ever needs to survive in it: a disconnected
    /// inlet's `PrepareInfo::inputs_connected` flag tells the processor not
    /// to read it, and nothing downstream reads a disconnected outlet. Sharing
    /// one instance instead of allocating one per disconnected port is a
    /// pure memory optimization (§8 scenario 6).
    placeholder: SharedSignal,
}

impl ChainInner {
    fn new() -> ChainInner {
        ChainInner {
            nodes: HashMap::new(),
            connections: HashMap::new(),
            next_connection_id: IdGenerator::new(),
            sample_rate: 0,
            block_size: 0,
            prepared: false,
            placeholder: new_shared_signal(1, 0.0),
        }
    }

    fn add_processor(&mut self, id: NodeId, proc: SharedProcessor) -> Result<(), ChainError> {
        if self.nodes.contains_key(&id) {
            return Err(ChainError::DuplicateId(id));
        }
        debug!("adding node {:?}", id);
        self.nodes.insert(id, Node::new(id, proc));
        Ok(())
    }

    fn remove_processor(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            debug!("marking node {:?} for removal", id);
            node.mark_deleted();
        }
    }

    fn get_processor(&self, id: NodeId) -> Option<SharedProcessor> {
        self.nodes.get(&id).map(|n| n.processor().clone())
    }

    fn port_range_checked(&self, src: NodeId, outlet: usize, dst: NodeId, inlet: usize) -> Result<(), ChainError> {
        let src_node = self.nodes.get(&src).ok_or(ChainError::UnknownNode(src))?;
        if outlet >= src_node.num_outputs() {
            return Err(ChainError::PortOutOfRange {
                node: src,
                index: outlet,
                count: src_node.num_outputs(),
            });
        }
        let dst_node = self.nodes.get(&dst).ok_or(ChainError::UnknownNode(dst))?;
        if inlet >= dst_node.num_inputs() {
            return Err(ChainError::PortOutOfRange {
                node: dst,
                index: inlet,
                count: dst_node.num_inputs(),
            });
        }
        Ok(())
    }

    /// Marks `id` `NotPrepared` and cascades to every node reachable by
    /// following its outlets' active connections. A re-prepared node always
    /// reallocates a fresh buffer for a non-in-place connected outlet
    /// (`prepare_outlet`), so any downstream node left `Prepared` and
    /// skipped by `prepare`'s "already prepared" check would otherwise keep
    /// reading a buffer this node no longer writes into.
    fn invalidate_downstream(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = match self.nodes.get(&id) {
                Some(n) => n,
                None => continue,
            };
            if node.prepare_state() == PrepareState::NotPrepared {
                continue;
            }
            let num_out = node.num_outputs();
            let mut downstream = Vec::new();
            for o in 0..num_out {
                for cid in node.outlet(o).pin().connections() {
                    if let Some(c) = self.connections.get(cid) {
                        if !c.is_disconnected() {
                            downstream.push(c.dst_node());
                        }
                    }
                }
            }
            self.nodes
                .get_mut(&id)
                .unwrap()
                .set_prepare_state(PrepareState::NotPrepared);
            stack.extend(downstream);
        }
    }

    fn connect(&mut self, src: NodeId, outlet: usize, dst: NodeId, inlet: usize) -> Result<bool, ChainError> {
        self.port_range_checked(src, outlet, dst, inlet)?;

        let already_connected = self.nodes[&dst]
            .inlet(inlet)
            .pin()
            .connections()
            .iter()
            .filter_map(|cid| self.connections.get(cid))
            .any(|c| !c.is_disconnected() && c.matches(src, outlet, dst, inlet));
        if already_connected {
            return Ok(false);
        }

        if self.has_backward_path(src, dst) {
            warn!(
                "rejecting connection {:?}:{} -> {:?}:{}: would close a cycle",
                src, outlet, dst, inlet
            );
            return Err(ChainError::CycleDetected {
                src,
                outlet,
                dst,
                inlet,
            });
        }

        let id = self.next_connection_id.next_id();
        self.connections
            .insert(id, Connection::new(id, src, outlet, dst, inlet));
        self.nodes
            .get_mut(&dst)
            .unwrap()
            .inlet_mut(inlet)
            .pin_mut()
            .add_connection(id);
        self.nodes
            .get_mut(&src)
            .unwrap()
            .outlet_mut(outlet)
            .pin_mut()
            .add_connection(id);
        // Both endpoints' `PrepareInfo` connectivity flags may now be stale,
        // and either one reallocating its buffers on re-prepare can orphan
        // further downstream consumers, so invalidation cascades forward.
        self.invalidate_downstream(dst);
        self.invalidate_downstream(src);
        debug!("connected {:?}:{} -> {:?}:{}", src, outlet, dst, inlet);
        Ok(true)
    }

    fn disconnect(&mut self, src: NodeId, outlet: usize, dst: NodeId, inlet: usize) -> bool {
        let dst_node = match self.nodes.get(&dst) {
            Some(n) => n,
            None => return false,
        };
        if inlet >= dst_node.num_inputs() {
            return false;
        }
        let found = dst_node
            .inlet(inlet)
            .pin()
            .connections()
            .iter()
            .copied()
            .find(|cid| {
                self.connections
                    .get(cid)
                    .map(|c| !c.is_disconnected() && c.matches(src, outlet, dst, inlet))
                    .unwrap_or(false)
            });
        match found {
            Some(cid) => {
                self.connections.get_mut(&cid).unwrap().mark_disconnected();
                self.invalidate_downstream(dst);
                self.invalidate_downstream(src);
                debug!("disconnected {:?}:{} -> {:?}:{}", src, outlet, dst, inlet);
                true
            }
            None => false,
        }
    }

    /// True iff walking backward from `from` through active connections
    /// (outlet feeding inlet, followed toward its source) reaches `target`.
    /// Used both to reject a would-be cycle in `connect` and to sanity-check
    /// the graph during `prepare`. Visits every inlet of every node on the
    /// walk and ORs the results, fixing the single-inlet-only bug noted in
    /// the original source (§9).
    fn has_backward_path(&self, from: NodeId, target: NodeId) -> bool {
        let mut visited = std::collections::HashSet::new();
        self.has_backward_path_rec(from, target, &mut visited)
    }

    fn has_backward_path_rec(
        &self,
        node_id: NodeId,
        target: NodeId,
        visited: &mut std::collections::HashSet<NodeId>,
    ) -> bool {
        if node_id == target {
            return true;
        }
        if !visited.insert(node_id) {
            return false;
        }
        let node = match self.nodes.get(&node_id) {
            Some(n) => n,
            None => return false,
        };
        let mut found = false;
        for inlet in node.inlets() {
            for cid in inlet.pin().connections() {
                if let Some(c) = self.connections.get(cid) {
                    if !c.is_disconnected() {
                        found |= self.has_backward_path_rec(c.src_node(), target, visited);
                    }
                }
            }
        }
        found
    }

    fn purge_deleted(&mut self) {
        let dead_ids: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.is_deleted())
            .map(|(id, _)| *id)
            .collect();
        if dead_ids.is_empty() {
            return;
        }
        let dead_set: std::collections::HashSet<NodeId> = dead_ids.iter().copied().collect();

        let victim_conns: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|(_, c)| dead_set.contains(&c.src_node()) || dead_set.contains(&c.dst_node()))
            .map(|(id, _)| *id)
            .collect();

        let mut touched: std::collections::HashSet<NodeId> = std::collections::HashSet::new();
        for cid in victim_conns {
            if let Some(c) = self.connections.remove(&cid) {
                if !dead_set.contains(&c.src_node()) {
                    if let Some(n) = self.nodes.get_mut(&c.src_node()) {
                        n.outlet_mut(c.src_outlet()).pin_mut().remove_connection(cid);
                        touched.insert(c.src_node());
                    }
                }
                if !dead_set.contains(&c.dst_node()) {
                    if let Some(n) = self.nodes.get_mut(&c.dst_node()) {
                        n.inlet_mut(c.dst_inlet()).pin_mut().remove_connection(cid);
                        touched.insert(c.dst_node());
                    }
                }
            }
        }
        for id in touched {
            self.invalidate_downstream(id);
        }

        for id in dead_ids {
            if let Some(mut node) = self.nodes.remove(&id) {
                if let Err(e) = node.release() {
                    error!("node {:?} failed to release while being removed: {}", id, e);
                }
                info!("removed node {:?}", id);
            }
        }
    }

    /// Drops every `Connection` flagged disconnected, detaching it from both
    /// endpoints' pins. Deferred from `disconnect`'s call time to here so a
    /// structural edit never lands mid-tick (§4.5, §4.9).
    fn compact_disconnected(&mut self) {
        let dead: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|(_, c)| c.is_disconnected())
            .map(|(id, _)| *id)
            .collect();
        for cid in dead {
            if let Some(c) = self.connections.remove(&cid) {
                if let Some(n) = self.nodes.get_mut(&c.dst_node()) {
                    n.inlet_mut(c.dst_inlet()).pin_mut().remove_connection(cid);
                }
                if let Some(n) = self.nodes.get_mut(&c.src_node()) {
                    n.outlet_mut(c.src_outlet()).pin_mut().remove_connection(cid);
                }
            }
        }
    }

    fn links(&self) -> Vec<Link> {
        self.connections
            .values()
            .filter(|c| !c.is_disconnected())
            .map(|c| Link::new(c.src_node(), c.src_outlet(), c.dst_node(), c.dst_inlet()))
            .collect()
    }

    fn check_processor_reuse(&self) -> Result<(), ChainError> {
        let mut seen: HashMap<*const (), NodeId> = HashMap::new();
        for (id, node) in self.nodes.iter() {
            let ptr = node.processor_ptr();
            if let Some(existing) = seen.get(&ptr) {
                return Err(ChainError::ProcessorReused {
                    existing: *existing,
                    requested: *id,
                });
            }
            seen.insert(ptr, *id);
        }
        Ok(())
    }

    /// Post-order DFS over the "follows its inlets upstream" relation:
    /// a node is pushed onto the order only after every node it depends on
    /// is already on it, giving the ascending-index property §8 requires.
    /// Detects back-edges (a gray node revisited) as a cycle.
    fn topological_order(&self) -> Result<Vec<NodeId>, ChainError> {
        #[derive(Copy, Clone, PartialEq, Eq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        fn visit(
            chain: &ChainInner,
            id: NodeId,
            color: &mut HashMap<NodeId, Color>,
            order: &mut Vec<NodeId>,
        ) -> Result<(), ChainError> {
            color.insert(id, Color::Gray);
            let node = &chain.nodes[&id];
            for inlet in node.inlets() {
                for cid in inlet.pin().connections() {
                    let c = match chain.connections.get(cid) {
                        Some(c) => c,
                        None => continue,
                    };
                    if c.is_disconnected() {
                        continue;
                    }
                    let src = c.src_node();
                    match color.get(&src).copied() {
                        Some(Color::Gray) => {
                            return Err(ChainError::CycleDetected {
                                src,
                                outlet: c.src_outlet(),
                                dst: id,
                                inlet: c.dst_inlet(),
                            });
                        }
                        Some(Color::White) | None => visit(chain, src, color, order)?,
                        Some(Color::Black) => {}
                    }
                }
            }
            color.insert(id, Color::Black);
            order.push(id);
            Ok(())
        }

        let mut color: HashMap<NodeId, Color> =
            self.nodes.keys().map(|id| (*id, Color::White)).collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in ids {
            if color[&id] == Color::White {
                visit(self, id, &mut color, &mut order)?;
            }
        }
        Ok(order)
    }

    fn outlet_signal(&self, node: NodeId, outlet: usize) -> Option<SharedSignal> {
        self.nodes.get(&node)?.outlet(outlet).signal().cloned()
    }

    fn outlet_any_acquired_excluding(&self, node: NodeId, outlet: usize, excluding: ConnectionId) -> bool {
        let n = match self.nodes.get(&node) {
            Some(n) => n,
            None => return false,
        };
        n.outlet(outlet).pin().connections().iter().any(|cid| {
            *cid != excluding
                && self
                    .connections
                    .get(cid)
                    .map(|c| c.is_read_acquired() || c.is_write_acquired())
                    .unwrap_or(false)
        })
    }

    fn outlet_write_acquired_excluding(&self, node: NodeId, outlet: usize, excluding: ConnectionId) -> bool {
        let n = match self.nodes.get(&node) {
            Some(n) => n,
            None => return false,
        };
        n.outlet(outlet).pin().connections().iter().any(|cid| {
            *cid != excluding
                && self
                    .connections
                    .get(cid)
                    .map(|c| c.is_write_acquired())
                    .unwrap_or(false)
        })
    }

    fn try_acquire_read(&mut self, candidates: &[ConnectionId]) -> Option<(ConnectionId, SharedSignal)> {
        for &cid in candidates {
            let (src_node, src_outlet) = match self.connections.get(&cid) {
                Some(c) => (c.src_node(), c.src_outlet()),
                None => continue,
            };
            let sibling_write = self.outlet_write_acquired_excluding(src_node, src_outlet, cid);
            let signal = match self.outlet_signal(src_node, src_outlet) {
                Some(s) => s,
                None => continue,
            };
            let c = self.connections.get_mut(&cid).unwrap();
            if let Some(sig) = c.acquire_read_signal(&signal, sibling_write) {
                return Some((cid, sig));
            }
        }
        None
    }

    fn try_acquire_write(&mut self, candidates: &[ConnectionId]) -> Option<(ConnectionId, SharedSignal)> {
        for &cid in candidates {
            let (src_node, src_outlet) = match self.connections.get(&cid) {
                Some(c) => (c.src_node(), c.src_outlet()),
                None => continue,
            };
            let sibling_acquired = self.outlet_any_acquired_excluding(src_node, src_outlet, cid);
            let signal = match self.outlet_signal(src_node, src_outlet) {
                Some(s) => s,
                None => continue,
            };
            let c = self.connections.get_mut(&cid).unwrap();
            if let Some(sig) = c.acquire_write_signal(&signal, sibling_acquired) {
                return Some((cid, sig));
            }
        }
        None
    }

    /// The pull-strategy decision of §4.5, steps 3-6.
    fn prepare_inlet(&mut self, id: NodeId, i: usize, block_size: usize) {
        let conn_ids: Vec<ConnectionId> = self.nodes[&id].inlet(i).pin().connections().to_vec();
        for cid in &conn_ids {
            if let Some(c) = self.connections.get_mut(cid) {
                c.reset();
                c.lock();
            }
        }

        let inplace = self.nodes[&id].processor().lock().is_inlet_inplace(i);

        let (signal, owns, strategy) = if conn_ids.is_empty() {
            (self.placeholder.clone(), false, PullStrategy::None)
        } else if inplace.is_some() {
            match self.try_acquire_write(&conn_ids) {
                Some((acquired, sig)) => (sig, false, PullStrategy::AddIntoShared { acquired }),
                None => (new_shared_signal(block_size, 0.0), true, PullStrategy::CopyAndAdd),
            }
        } else if conn_ids.len() == 1 {
            match self.try_acquire_read(&conn_ids) {
                Some((_, sig)) => (sig, false, PullStrategy::PassThrough),
                None => (new_shared_signal(block_size, 0.0), true, PullStrategy::CopyAndAdd),
            }
        } else {
            match self.try_acquire_write(&conn_ids) {
                Some((acquired, sig)) => (sig, false, PullStrategy::AddIntoShared { acquired }),
                None => (new_shared_signal(block_size, 0.0), true, PullStrategy::CopyAndAdd),
            }
        };

        self.nodes.get_mut(&id).unwrap().inlet_mut(i).bind(signal, owns, strategy);

        for cid in &conn_ids {
            if let Some(c) = self.connections.get_mut(cid) {
                c.unlock();
            }
        }
    }

    fn prepare_outlet(&mut self, id: NodeId, o: usize, block_size: usize) {
        let inplace = self.nodes[&id].processor().lock().is_outlet_inplace(o);
        let num_in = self.nodes[&id].num_inputs();
        // Only alias the partner inlet's signal when that inlet is actually
        // connected: an unconnected inlet is bound to the chain-wide
        // placeholder, and aliasing it here would let this processor's
        // `perform` write through to that shared placeholder, corrupting it
        // for every other disconnected port in the chain.
        let inplace_partner = inplace
            .filter(|k| *k < num_in)
            .filter(|k| self.nodes[&id].inlet(*k).is_connected());

        let (signal, owns) = match inplace_partner {
            Some(k) => {
                let sig = self.nodes[&id]
                    .inlet(k)
                    .pin()
                    .signal()
                    .cloned()
                    .expect("inlet already prepared");
                (sig, false)
            }
            None => {
                if self.nodes[&id].outlet(o).is_connected() {
                    (new_shared_signal(block_size, 0.0), true)
                } else {
                    (self.placeholder.clone(), false)
                }
            }
        };

        self.nodes.get_mut(&id).unwrap().outlet_mut(o).bind(signal, owns);
    }

    fn prepare_node(&mut self, id: NodeId, sample_rate: usize, block_size: usize) -> Result<(), ChainError> {
        self.nodes
            .get_mut(&id)
            .unwrap()
            .set_prepare_state(PrepareState::Preparing);

        let (num_in, num_out) = {
            let n = &self.nodes[&id];
            (n.num_inputs(), n.num_outputs())
        };
        let inputs_connected: Vec<bool> = (0..num_in)
            .map(|i| !self.nodes[&id].inlet(i).pin().connections().is_empty())
            .collect();
        let outputs_connected: Vec<bool> = (0..num_out)
            .map(|o| self.nodes[&id].outlet(o).is_connected())
            .collect();
        let info = PrepareInfo::new(sample_rate, block_size, inputs_connected, outputs_connected);

        let processor = self.nodes[&id].processor().clone();
        let want_perform = match processor.lock().prepare(&info) {
            Ok(w) => w,
            Err(source) => {
                self.nodes
                    .get_mut(&id)
                    .unwrap()
                    .set_prepare_state(PrepareState::NotPrepared);
                error!("node {:?} failed to prepare: {}", id, source);
                return Err(ChainError::ProcessorFailure {
                    node: id,
                    phase: ProcessorPhase::Prepare,
                    source,
                });
            }
        };

        for i in 0..num_in {
            self.prepare_inlet(id, i, block_size);
        }
        for o in 0..num_out {
            self.prepare_outlet(id, o, block_size);
        }

        let input_signals: Vec<SharedSignal> = (0..num_in)
            .map(|i| self.nodes[&id].inlet(i).pin().signal().unwrap().clone())
            .collect();
        let output_signals: Vec<SharedSignal> = (0..num_out)
            .map(|o| self.nodes[&id].outlet(o).pin().signal().unwrap().clone())
            .collect();
        let input_buffer = Buffer::from_signals(input_signals)?;
        let output_buffer = Buffer::from_signals(output_signals)?;

        let node = self.nodes.get_mut(&id).unwrap();
        node.set_buffers(input_buffer, output_buffer);
        node.set_want_perform(want_perform);
        node.set_prepare_state(PrepareState::Prepared);
        node.set_perform_state(PerformState::Ready);
        node.set_release_state(ReleaseState::NotReleased);
        Ok(())
    }

    fn prepare(&mut self, sample_rate: usize, block_size: usize) -> Result<(), ChainError> {
        assert!(block_size > 0, "Chain::prepare: block_size must be positive");

        self.purge_deleted();
        self.compact_disconnected();

        if block_size != self.block_size {
            self.placeholder = new_shared_signal(block_size, 0.0);
            if self.prepared {
                for node in self.nodes.values_mut() {
                    node.set_prepare_state(PrepareState::NotPrepared);
                }
            }
        }

        self.check_processor_reuse()?;

        let order = match self.topological_order() {
            Ok(o) => o,
            Err(e) => {
                warn!("prepare rejected: {}", e);
                return Err(e);
            }
        };
        for (i, id) in order.iter().enumerate() {
            self.nodes.get_mut(id).unwrap().set_index(i + 1);
        }

        for id in &order {
            if self.nodes[id].prepare_state() == PrepareState::NotPrepared {
                self.prepare_node(*id, sample_rate, block_size)?;
            }
        }

        self.sample_rate = sample_rate;
        self.block_size = block_size;
        self.prepared = true;
        info!("chain prepared: {} live node(s), block_size={}", order.len(), block_size);
        Ok(())
    }

    fn perform_node(&mut self, id: NodeId) {
        let num_in = self.nodes[&id].num_inputs();
        for i in 0..num_in {
            let conn_ids: Vec<ConnectionId> = self.nodes[&id].inlet(i).pin().connections().to_vec();
            let active: Vec<(ConnectionId, SharedSignal)> = conn_ids
                .iter()
                .filter_map(|cid| {
                    let c = self.connections.get(cid)?;
                    let sig = self.outlet_signal(c.src_node(), c.src_outlet())?;
                    Some((*cid, sig))
                })
                .collect();
            self.nodes.get_mut(&id).unwrap().inlet_mut(i).perform(&active);
        }
        self.nodes.get_mut(&id).unwrap().perform();
    }

    fn ordered_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_by_key(|id| self.nodes[id].index());
        ids
    }

    fn tick(&mut self) {
        if !self.prepared {
            return;
        }
        let ids = self.ordered_ids();
        for id in &ids {
            self.nodes.get_mut(id).unwrap().clean();
        }
        for id in &ids {
            self.perform_node(*id);
        }
    }

    fn release(&mut self) -> Result<(), ChainError> {
        let mut ids = self.ordered_ids();
        ids.reverse();
        let mut first_err = None;
        for id in ids {
            if let Some(node) = self.nodes.get_mut(&id) {
                if let Err(e) = node.release() {
                    error!("node {:?} failed to release: {}", id, e);
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }
        self.prepared = false;
        info!("chain released");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Chain {
    pub fn new() -> Chain {
        Chain {
            inner: Mutex::new(ChainInner::new()),
        }
    }

    /// Fails with [`ChainError::DuplicateId`] if `id` is already present.
    pub fn add_processor(&self, id: NodeId, proc: SharedProcessor) -> Result<(), ChainError> {
        self.inner.lock().add_processor(id, proc)
    }

    /// Idempotent; marks the node for removal at the next `prepare`/`update`.
    pub fn remove_processor(&self, id: NodeId) {
        self.inner.lock().remove_processor(id);
    }

    pub fn get_processor(&self, id: NodeId) -> Option<SharedProcessor> {
        self.inner.lock().get_processor(id)
    }

    /// Returns `false` if the edge already existed. Fails with
    /// [`ChainError::PortOutOfRange`], [`ChainError::CycleDetected`], or
    /// [`ChainError::UnknownNode`].
    pub fn connect(&self, src: NodeId, outlet: usize, dst: NodeId, inlet: usize) -> Result<bool, ChainError> {
        self.inner.lock().connect(src, outlet, dst, inlet)
    }

    /// Returns `false` if the edge did not exist.
    pub fn disconnect(&self, src: NodeId, outlet: usize, dst: NodeId, inlet: usize) -> bool {
        self.inner.lock().disconnect(src, outlet, dst, inlet)
    }

    /// Every currently active link, in no particular order.
    pub fn links(&self) -> Vec<Link> {
        self.inner.lock().links()
    }

    pub fn prepare(&self, sample_rate: usize, block_size: usize) -> Result<(), ChainError> {
        self.inner.lock().prepare(sample_rate, block_size)
    }

    /// `prepare` using the last `sample_rate`/`block_size` passed to it.
    pub fn update(&self) -> Result<(), ChainError> {
        let (sr, bs) = {
            let inner = self.inner.lock();
            (inner.sample_rate, inner.block_size)
        };
        self.inner.lock().prepare(sr, bs)
    }

    /// No-op unless the chain is prepared.
    pub fn tick(&self) {
        self.inner.lock().tick();
    }

    pub fn release(&self) -> Result<(), ChainError> {
        self.inner.lock().release()
    }

    pub fn sample_rate(&self) -> usize {
        self.inner.lock().sample_rate
    }

    pub fn block_size(&self) -> usize {
        self.inner.lock().block_size
    }

    pub fn is_prepared(&self) -> bool {
        self.inner.lock().prepared
    }
}

impl Default for Chain {
    fn default() -> Chain {
        Chain::new()
    }
}
