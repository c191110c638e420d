use std::sync::Arc;

use parking_lot::Mutex;

use super::buffer::Buffer;
use super::prepareinfo::PrepareInfo;

/// A processor instance as the chain actually holds it: shared so that
/// attempting to register the same instance onto two nodes is expressible
/// at all (§4.3, §4.9 `ProcessorReused`), and mutex-guarded so `perform` can
/// take `&mut self` without the chain itself needing unique ownership.
pub type SharedProcessor = Arc<Mutex<dyn Processor>>;

/// Wraps a concrete processor into the shared handle [`Chain::add_processor`]
/// expects.
///
/// [`Chain::add_processor`]: super::chain::Chain::add_processor
pub fn new_shared_processor<P: Processor + 'static>(processor: P) -> SharedProcessor {
    Arc::new(Mutex::new(processor))
}

/// The contract a compute unit must satisfy to be wrapped into a [`super::node::Node`]
/// (§3, §4.3). This is the entire surface the chain calls into; what a
/// processor actually computes is out of scope for this crate.
pub trait Processor: Send {
    /// Fixed at construction; must not change for the processor's lifetime.
    fn num_inputs(&self) -> usize;

    /// Fixed at construction; must not change for the processor's lifetime.
    fn num_outputs(&self) -> usize;

    /// Called exactly once per prepare cycle. May allocate. Returns whether
    /// `perform` should be scheduled this cycle (`false` bypasses the node).
    fn prepare(
        &mut self,
        info: &PrepareInfo,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Must not allocate, must not block. Reads `input`, writes `output`.
    fn perform(&mut self, input: &Buffer, output: &mut Buffer);

    /// Called exactly once per release. Frees resources.
    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Default in-place policy: inlet `i` shares with outlet `i` whenever
    /// both ports exist. Override to reject specific pairs.
    fn is_inlet_inplace(&self, inlet: usize) -> Option<usize> {
        if inlet < self.num_outputs() {
            Some(inlet)
        } else {
            None
        }
    }

    /// Default in-place policy: outlet `i` shares with inlet `i` whenever
    /// both ports exist. Override to reject specific pairs.
    fn is_outlet_inplace(&self, outlet: usize) -> Option<usize> {
        if outlet < self.num_inputs() {
            Some(outlet)
        } else {
            None
        }
    }
}
