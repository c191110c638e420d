use super::pin::Pin;
use super::signal::SharedSignal;

/// One output port of a [`super::node::Node`] (§4.6).
pub struct Outlet {
    index: usize,
    pin: Pin,
}

impl Outlet {
    pub fn new(index: usize) -> Outlet {
        Outlet {
            index,
            pin: Pin::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut Pin {
        &mut self.pin
    }

    pub fn is_connected(&self) -> bool {
        !self.pin.connections().is_empty()
    }

    pub fn signal(&self) -> Option<&SharedSignal> {
        self.pin.signal()
    }

    /// Binds the outlet's signal: either a borrowed in-place partner inlet's
    /// signal (`owns = false`) or a freshly allocated private one
    /// (`owns = true`) (§4.6).
    pub fn bind(&mut self, signal: SharedSignal, owns: bool) {
        self.pin.bind_signal(signal, owns);
    }

    pub fn release(&mut self) {
        self.pin.release();
    }
}
