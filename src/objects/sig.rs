use crate::dsp::prepareinfo::PrepareInfo;
use crate::dsp::processor::Processor;
use crate::dsp::signal::Sample;
use crate::dsp::Buffer;

/// A constant source: no inlets, one outlet held at `value` forever.
pub struct Sig {
    value: Sample,
}

impl Sig {
    pub fn new(value: Sample) -> Sig {
        Sig { value }
    }
}

impl Processor for Sig {
    fn num_inputs(&self) -> usize {
        0
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(true)
    }

    fn perform(&mut self, _input: &Buffer, output: &mut Buffer) {
        output.get(0).lock().fill(self.value);
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
