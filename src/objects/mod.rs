//! Small fixture processors used by the `dsp` test suite and as worked
//! examples of the `Processor` trait. None of this is part of the graph
//! engine itself; a real host would supply its own processors.

mod count;
mod identity;
mod mute;
mod plus_signal;
mod print;
mod shared_signals_checker;
mod sig;

pub use count::Count;
pub use identity::Identity;
pub use mute::Mute;
pub use plus_signal::PlusSignal;
pub use print::Print;
pub use shared_signals_checker::SharedSignalsChecker;
pub use sig::Sig;
