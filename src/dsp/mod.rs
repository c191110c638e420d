//! The `Dsp` subsystem: a real-time audio signal-processing graph engine.
//!
//! A [`Chain`] owns a set of [`Node`]s, each wrapping a user-supplied
//! [`Processor`], connected by [`Connection`]s between [`Inlet`]s and
//! [`Outlet`]s. `Chain::prepare` validates the graph (cycle detection,
//! topological ordering) and decides, per connection, whether a downstream
//! inlet may read, write in place, or must copy an upstream signal.
//! `Chain::tick` then drives one audio block through the graph.

pub mod buffer;
pub mod chain;
pub mod connection;
pub mod error;
pub mod inlet;
pub mod link;
pub mod node;
pub mod outlet;
pub mod pin;
pub mod prepareinfo;
pub mod processor;
pub mod signal;
pub mod uniqueid;

pub use buffer::Buffer;
pub use chain::Chain;
pub use connection::ConnectionId;
pub use error::ChainError;
pub use link::Link;
pub use node::NodeId;
pub use prepareinfo::PrepareInfo;
pub use processor::Processor;
pub use signal::{Sample, Signal, SharedSignal};

#[cfg(test)]
mod test;
