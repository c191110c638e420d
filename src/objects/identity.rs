use std::sync::Arc;

use crate::dsp::prepareinfo::PrepareInfo;
use crate::dsp::processor::Processor;
use crate::dsp::Buffer;

/// Copies inlet 0 to outlet 0. Cooperates with the chain's in-place
/// decision: if the two ports end up bound to the same shared signal, the
/// copy is skipped rather than locking the same signal twice.
pub struct Identity;

impl Identity {
    pub fn new() -> Identity {
        Identity
    }
}

impl Default for Identity {
    fn default() -> Identity {
        Identity::new()
    }
}

impl Processor for Identity {
    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(true)
    }

    fn perform(&mut self, input: &Buffer, output: &mut Buffer) {
        let src = input.get(0);
        let dst = output.get(0);
        if !Arc::ptr_eq(src, dst) {
            dst.lock().copy(&src.lock()).expect("matching block size");
        }
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
