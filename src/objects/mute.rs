use crate::dsp::prepareinfo::PrepareInfo;
use crate::dsp::processor::Processor;
use crate::dsp::signal::Sample;
use crate::dsp::Buffer;

/// No inlets, one outlet. `prepare` always reports `want_perform = false`,
/// so the chain never calls `perform` on it: a fixture for the bypass path
/// described by `Processor::prepare`'s return value.
pub struct Mute {
    value: Sample,
}

impl Mute {
    pub fn new(value: Sample) -> Mute {
        Mute { value }
    }
}

impl Processor for Mute {
    fn num_inputs(&self) -> usize {
        0
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(false)
    }

    fn perform(&mut self, _input: &Buffer, output: &mut Buffer) {
        output.get(0).lock().fill(self.value);
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
