use super::buffer::Buffer;
use super::error::{ChainError, ProcessorPhase};
use super::inlet::Inlet;
use super::outlet::Outlet;
use super::processor::SharedProcessor;

/// A stable, caller-assigned node identifier (§6: `NodeId: u64`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub fn from_raw(id: u64) -> NodeId {
        NodeId(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// §4.8: PrepareState → NotPrepared → Preparing → Prepared.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrepareState {
    NotPrepared,
    Preparing,
    Prepared,
}

/// §4.8: PerformState → NotReady → Ready → Performing → Performed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PerformState {
    NotReady,
    Ready,
    Performing,
    Performed,
}

/// §4.8: ReleaseState → Released → NotReleased → Releasing → Released.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReleaseState {
    Released,
    NotReleased,
    Releasing,
}

/// Wraps one [`Processor`]; owns its inlets/outlets and the buffers built
/// from them each prepare cycle (§3, §4.8).
///
/// The spec describes Node's three state variables as independent atomics
/// for lock-free observer queries from non-audio threads. This crate has no
/// such observer surface (the whole chain is already serialized behind one
/// mutex, §5), so per the design note in `SPEC_FULL.md` §9 they are
/// collapsed into plain enum fields read and written under that mutex.
pub struct Node {
    id: NodeId,
    processor: SharedProcessor,
    inlets: Vec<Inlet>,
    outlets: Vec<Outlet>,
    index: usize,
    want_perform: bool,
    deleted: bool,
    input_buffer: Option<Buffer>,
    output_buffer: Option<Buffer>,
    prepare_state: PrepareState,
    perform_state: PerformState,
    release_state: ReleaseState,
}

impl Node {
    pub fn new(id: NodeId, processor: SharedProcessor) -> Node {
        let (num_inputs, num_outputs) = {
            let p = processor.lock();
            (p.num_inputs(), p.num_outputs())
        };
        let inlets = (0..num_inputs).map(Inlet::new).collect();
        let outlets = (0..num_outputs).map(Outlet::new).collect();
        Node {
            id,
            processor,
            inlets,
            outlets,
            index: 0,
            want_perform: false,
            deleted: false,
            input_buffer: None,
            output_buffer: None,
            prepare_state: PrepareState::NotPrepared,
            perform_state: PerformState::NotReady,
            release_state: ReleaseState::Released,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn processor(&self) -> &SharedProcessor {
        &self.processor
    }

    /// Identity of the underlying processor instance, used to detect the
    /// same instance registered onto two live nodes (`ProcessorReused`).
    pub fn processor_ptr(&self) -> *const () {
        std::sync::Arc::as_ptr(&self.processor) as *const ()
    }

    pub fn num_inputs(&self) -> usize {
        self.inlets.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outlets.len()
    }

    pub fn inlet(&self, i: usize) -> &Inlet {
        &self.inlets[i]
    }

    pub fn inlet_mut(&mut self, i: usize) -> &mut Inlet {
        &mut self.inlets[i]
    }

    pub fn inlets(&self) -> &[Inlet] {
        &self.inlets
    }

    pub fn inlets_mut(&mut self) -> &mut [Inlet] {
        &mut self.inlets
    }

    pub fn outlet(&self, i: usize) -> &Outlet {
        &self.outlets[i]
    }

    pub fn outlet_mut(&mut self, i: usize) -> &mut Outlet {
        &mut self.outlets[i]
    }

    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    pub fn outlets_mut(&mut self) -> &mut [Outlet] {
        &mut self.outlets
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn want_perform(&self) -> bool {
        self.want_perform
    }

    pub fn set_want_perform(&mut self, w: bool) {
        self.want_perform = w;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    pub fn prepare_state(&self) -> PrepareState {
        self.prepare_state
    }

    pub fn set_prepare_state(&mut self, s: PrepareState) {
        self.prepare_state = s;
    }

    pub fn perform_state(&self) -> PerformState {
        self.perform_state
    }

    pub fn set_perform_state(&mut self, s: PerformState) {
        self.perform_state = s;
    }

    pub fn release_state(&self) -> ReleaseState {
        self.release_state
    }

    pub fn set_release_state(&mut self, s: ReleaseState) {
        self.release_state = s;
    }

    pub fn input_buffer(&self) -> Option<&Buffer> {
        self.input_buffer.as_ref()
    }

    pub fn output_buffer(&self) -> Option<&Buffer> {
        self.output_buffer.as_ref()
    }

    pub fn set_buffers(&mut self, input: Buffer, output: Buffer) {
        self.input_buffer = Some(input);
        self.output_buffer = Some(output);
    }

    pub fn clear_buffers(&mut self) {
        self.input_buffer = None;
        self.output_buffer = None;
    }

    /// `perform()`'s processor call: no-op unless `PerformState::Ready`,
    /// invoked by `Chain::tick` once this node's upstream dependencies have
    /// already run (§4.8).
    pub fn perform(&mut self) {
        if self.perform_state != PerformState::Ready {
            return;
        }
        self.perform_state = PerformState::Performing;
        if self.want_perform {
            let input = self.input_buffer.as_ref().expect("node prepared");
            let output = self.output_buffer.as_mut().expect("node prepared");
            self.processor.lock().perform(input, output);
        }
        self.perform_state = PerformState::Performed;
    }

    /// Per-tick reset done by the chain before starting the next tick
    /// (§4.8): zeroes owned signals and returns the node to `Ready`.
    pub fn clean(&mut self) {
        if self.perform_state != PerformState::Performed {
            return;
        }
        for inlet in self.inlets.iter_mut() {
            inlet.pin_mut().clean();
        }
        for outlet in self.outlets.iter_mut() {
            outlet.pin_mut().clean();
        }
        self.perform_state = PerformState::Ready;
    }

    /// Releases the processor's resources and drops this node's port
    /// bindings, returning it to the unprepared state (§4.8). No-op if
    /// already released. Called in reverse dependency order by
    /// `Chain::release`, and on individual nodes as they're purged after
    /// removal.
    pub fn release(&mut self) -> Result<(), ChainError> {
        if self.release_state == ReleaseState::Released {
            return Ok(());
        }
        self.release_state = ReleaseState::Releasing;
        let result = self.processor.lock().release();
        for inlet in self.inlets.iter_mut() {
            inlet.release();
        }
        for outlet in self.outlets.iter_mut() {
            outlet.release();
        }
        self.clear_buffers();
        self.prepare_state = PrepareState::NotPrepared;
        self.perform_state = PerformState::NotReady;
        self.release_state = ReleaseState::Released;
        result.map_err(|source| ChainError::ProcessorFailure {
            node: self.id,
            phase: ProcessorPhase::Release,
            source,
        })
    }
}
