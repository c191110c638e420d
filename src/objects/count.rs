use crate::dsp::prepareinfo::PrepareInfo;
use crate::dsp::processor::Processor;
use crate::dsp::signal::Sample;
use crate::dsp::Buffer;

/// No inlets, one outlet. Emits consecutive integers starting at 0, one per
/// sample, continuing across ticks: block size 4 yields `[0,1,2,3]`,
/// `[4,5,6,7]`, ...
pub struct Count {
    next: Sample,
}

impl Count {
    pub fn new() -> Count {
        Count { next: 0.0 }
    }
}

impl Default for Count {
    fn default() -> Count {
        Count::new()
    }
}

impl Processor for Count {
    fn num_inputs(&self) -> usize {
        0
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        self.next = 0.0;
        Ok(true)
    }

    fn perform(&mut self, _input: &Buffer, output: &mut Buffer) {
        let mut sig = output.get(0).lock();
        for s in sig.as_mut_slice().iter_mut() {
            *s = self.next;
            self.next += 1.0;
        }
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
