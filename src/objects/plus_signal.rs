use std::sync::Arc;

use crate::dsp::prepareinfo::PrepareInfo;
use crate::dsp::processor::Processor;
use crate::dsp::Buffer;

/// Two inlets, one outlet: `outlet = inlet0 + inlet1`. Outlet 0 is
/// in-place compatible with inlet 0 (the default policy already gives this;
/// inlet 1 has no matching outlet and is never in-place).
pub struct PlusSignal;

impl PlusSignal {
    pub fn new() -> PlusSignal {
        PlusSignal
    }
}

impl Default for PlusSignal {
    fn default() -> PlusSignal {
        PlusSignal::new()
    }
}

impl Processor for PlusSignal {
    fn num_inputs(&self) -> usize {
        2
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(true)
    }

    fn perform(&mut self, input: &Buffer, output: &mut Buffer) {
        let a = input.get(0);
        let b = input.get(1);
        let out = output.get(0);
        if !Arc::ptr_eq(a, out) {
            out.lock().copy(&a.lock()).expect("matching block size");
        }
        out.lock().add(&b.lock()).expect("matching block size");
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
