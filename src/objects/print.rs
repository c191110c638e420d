use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::dsp::prepareinfo::PrepareInfo;
use crate::dsp::processor::Processor;
use crate::dsp::Buffer;

/// One inlet, no outlets. Formats the block it receives each tick as
/// `"[v0, v1, ...]"` into a handle the caller can inspect — the fixture's
/// stand-in for the console output a real object-factory layer would give
/// a processor named `Print`.
pub struct Print {
    captured: Arc<Mutex<String>>,
}

impl Print {
    /// Returns the processor together with the handle its captured output
    /// will be written to.
    pub fn new() -> (Print, Arc<Mutex<String>>) {
        let captured = Arc::new(Mutex::new(String::new()));
        (
            Print {
                captured: Arc::clone(&captured),
            },
            captured,
        )
    }
}

impl Processor for Print {
    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        0
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(true)
    }

    fn perform(&mut self, input: &Buffer, _output: &mut Buffer) {
        let signal = input.get(0).lock();
        let mut out = String::from("[");
        for (i, v) in signal.as_slice().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write!(out, "{:?}", v).unwrap();
        }
        out.push(']');
        *self.captured.lock() = out;
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
