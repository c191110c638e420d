use super::connection::ConnectionId;
use super::signal::SharedSignal;

/// Shared state common to an [`super::inlet::Inlet`] and an
/// [`super::outlet::Outlet`] (§4.4): the port's signal binding, whether the
/// pin owns that signal outright or merely borrows it from upstream, and
/// the set of connections attached to this port.
#[derive(Default)]
pub struct Pin {
    signal: Option<SharedSignal>,
    owns_signal: bool,
    connections: Vec<ConnectionId>,
}

impl Pin {
    pub fn new() -> Pin {
        Pin {
            signal: None,
            owns_signal: false,
            connections: Vec::new(),
        }
    }

    pub fn signal(&self) -> Option<&SharedSignal> {
        self.signal.as_ref()
    }

    pub fn owns_signal(&self) -> bool {
        self.owns_signal
    }

    pub fn bind_signal(&mut self, signal: SharedSignal, owns: bool) {
        self.signal = Some(signal);
        self.owns_signal = owns;
    }

    /// Drops the signal reference and returns to the released state.
    pub fn release(&mut self) {
        self.signal = None;
        self.owns_signal = false;
    }

    /// Zeroes the bound signal, but only when this pin owns it: a pin
    /// borrowing an upstream signal must never clear someone else's data.
    pub fn clean(&mut self) {
        if self.owns_signal {
            if let Some(sig) = &self.signal {
                sig.lock().clear();
            }
        }
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    /// Adds `c` to the connection set. Returns whether membership changed.
    pub fn add_connection(&mut self, c: ConnectionId) -> bool {
        if self.connections.contains(&c) {
            false
        } else {
            self.connections.push(c);
            true
        }
    }

    /// Removes `c` from the connection set. Returns whether membership changed.
    pub fn remove_connection(&mut self, c: ConnectionId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|x| *x != c);
        self.connections.len() != before
    }
}
