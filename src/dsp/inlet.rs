use super::connection::ConnectionId;
use super::pin::Pin;
use super::signal::SharedSignal;

/// The pull strategy an inlet commits to during `prepare` (§4.5) and
/// replays, unchanged, on every `perform` until the next prepare.
#[derive(Debug, Clone)]
pub enum PullStrategy {
    /// No active connection: the inlet owns a fresh, permanently silent
    /// signal. `perform` is a no-op.
    None,
    /// Exactly one active connection, read-acquired: downstream reads the
    /// upstream outlet's signal directly. `perform` is a no-op.
    PassThrough,
    /// Acquisition was refused (or there is genuine fan-in): the inlet owns
    /// a private signal. `perform` copies the first active connection's
    /// signal into it, then adds every subsequent one.
    CopyAndAdd,
    /// A writable signal was acquired from `acquired`: the inlet's bound
    /// signal *is* that upstream outlet's signal. `perform` adds every
    /// *other* active connection's signal into it; the acquired source's
    /// own contribution is already present by construction.
    AddIntoShared { acquired: ConnectionId },
}

/// One input port of a [`super::node::Node`] (§4.5).
pub struct Inlet {
    index: usize,
    pin: Pin,
    strategy: PullStrategy,
}

impl Inlet {
    pub fn new(index: usize) -> Inlet {
        Inlet {
            index,
            pin: Pin::new(),
            strategy: PullStrategy::None,
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

    pub fn strategy(&self) -> &PullStrategy {
        &self.strategy
    }

    pub fn is_connected(&self) -> bool {
        !self.pin.connections().is_empty()
    }

    /// Binds the inlet's signal and records the chosen strategy. Called by
    /// the chain once per prepare after walking this inlet's active
    /// connections and attempting acquisition (§4.5).
    pub fn bind(&mut self, signal: SharedSignal, owns: bool, strategy: PullStrategy) {
        self.pin.bind_signal(signal, owns);
        self.strategy = strategy;
    }

    pub fn release(&mut self) {
        self.pin.release();
        self.strategy = PullStrategy::None;
    }

    /// Executes the bound pull strategy. `active` lists every non-locked,
    /// non-disconnected connection's current source signal, in the same
    /// order as `self.pin().connections()`, tagged with its id so
    /// `AddIntoShared` can skip the one it already shares storage with.
    pub fn perform(&mut self, active: &[(ConnectionId, SharedSignal)]) {
        match &self.strategy {
            PullStrategy::None | PullStrategy::PassThrough => {}
            PullStrategy::CopyAndAdd => {
                let dst = match self.pin.signal() {
                    Some(s) => s.clone(),
                    None => return,
                };
                let mut iter = active.iter();
                if let Some((_, first)) = iter.next() {
                    dst.lock().copy(&first.lock()).expect("matching block size");
                }
                for (_, src) in iter {
                    dst.lock().add(&src.lock()).expect("matching block size");
                }
            }
            PullStrategy::AddIntoShared { acquired } => {
                let dst = match self.pin.signal() {
                    Some(s) => s.clone(),
                    None => return,
                };
                for (id, src) in active {
                    if id == acquired {
                        continue;
                    }
                    dst.lock().add(&src.lock()).expect("matching block size");
                }
            }
        }
    }
}
