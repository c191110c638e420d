use std::sync::Arc;

use parking_lot::Mutex;

use crate::dsp::prepareinfo::PrepareInfo;
use crate::dsp::processor::Processor;
use crate::dsp::signal::SharedSignal;
use crate::dsp::Buffer;

/// Three inlets, one outlet. Does no signal processing; every `perform`
/// just snapshots the `SharedSignal` handles it was bound, so a test can
/// compare pointer identity across nodes and confirm the chain really
/// shares one signal across every disconnected, non-in-place port.
pub struct SharedSignalsChecker {
    captured_inputs: Arc<Mutex<Vec<SharedSignal>>>,
    captured_outputs: Arc<Mutex<Vec<SharedSignal>>>,
}

pub type Capture = Arc<Mutex<Vec<SharedSignal>>>;

impl SharedSignalsChecker {
    /// Returns the processor plus the two handles its captured inlet and
    /// outlet signals are written to on every `perform`.
    pub fn new() -> (SharedSignalsChecker, Capture, Capture) {
        let inputs: Capture = Arc::new(Mutex::new(Vec::new()));
        let outputs: Capture = Arc::new(Mutex::new(Vec::new()));
        (
            SharedSignalsChecker {
                captured_inputs: Arc::clone(&inputs),
                captured_outputs: Arc::clone(&outputs),
            },
            inputs,
            outputs,
        )
    }
}

impl Processor for SharedSignalsChecker {
    fn num_inputs(&self) -> usize {
        3
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(true)
    }

    fn perform(&mut self, input: &Buffer, output: &mut Buffer) {
        *self.captured_inputs.lock() = input.iter().cloned().collect();
        *self.captured_outputs.lock() = output.iter().cloned().collect();
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    // No in-place sharing: every port's binding is governed purely by its
    // own connectivity, so the captured pointers reflect only the chain's
    // unconnected-port sharing, not in-place aliasing.
    fn is_inlet_inplace(&self, _inlet: usize) -> Option<usize> {
        None
    }

    fn is_outlet_inplace(&self, _outlet: usize) -> Option<usize> {
        None
    }
}
