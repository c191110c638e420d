//! End-to-end tests driving a [`super::chain::Chain`] purely through its
//! public API — no internal state is inspected directly, matching how any
//! other crate would exercise this engine.

use std::sync::Arc;

use super::chain::Chain;
use super::error::ChainError;
use super::node::NodeId;
use super::prepareinfo::PrepareInfo;
use super::processor::{new_shared_processor, Processor};
use super::Buffer;
use crate::objects::{Count, Identity, Mute, PlusSignal, Print, SharedSignalsChecker, Sig};

fn id(n: u64) -> NodeId {
    NodeId::from_raw(n)
}

/// A processor whose `prepare` always fails, for exercising
/// `ChainError::ProcessorFailure` (§7).
struct FailsToPrepare;

impl Processor for FailsToPrepare {
    fn num_inputs(&self) -> usize {
        0
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn prepare(&mut self, _info: &PrepareInfo) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Err("configuration mismatch".into())
    }

    fn perform(&mut self, _input: &Buffer, _output: &mut Buffer) {}

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

#[test]
fn empty_chain_prepare_and_tick_is_noop() {
    let chain = Chain::new();
    chain.prepare(44_100, 4).unwrap();
    assert!(chain.is_prepared());
    chain.tick();
}

#[test]
fn count_emits_consecutive_blocks() {
    let chain = Chain::new();
    let (print, captured) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Count::new())).unwrap();
    chain.add_processor(id(2), new_shared_processor(print)).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();

    chain.tick();
    assert_eq!(&*captured.lock(), "[0.0, 1.0, 2.0, 3.0]");
    chain.tick();
    assert_eq!(&*captured.lock(), "[4.0, 5.0, 6.0, 7.0]");
    chain.tick();
    assert_eq!(&*captured.lock(), "[8.0, 9.0, 10.0, 11.0]");
}

#[test]
fn sig_identity_print_round_trip() {
    let chain = Chain::new();
    let (print, captured) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(3.5))).unwrap();
    chain.add_processor(id(2), new_shared_processor(Identity::new())).unwrap();
    chain.add_processor(id(3), new_shared_processor(print)).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    chain.connect(id(2), 0, id(3), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[3.5, 3.5, 3.5, 3.5]");
}

#[test]
fn add_then_remove_processor_restores_chain() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.remove_processor(id(1));
    chain.prepare(44_100, 4).unwrap();
    assert!(chain.get_processor(id(1)).is_none());
}

#[test]
fn prepare_is_idempotent_without_edits() {
    let chain = Chain::new();
    let (print, captured) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(2.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(print)).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[2.0, 2.0, 2.0, 2.0]");
}

#[test]
fn connect_then_disconnect_restores_edge_set() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(Identity::new())).unwrap();
    let added = chain.connect(id(1), 0, id(2), 0).unwrap();
    assert!(added);
    let removed = chain.disconnect(id(1), 0, id(2), 0);
    assert!(removed);
    // Same edge can be declared again exactly as if it were new.
    let added_again = chain.connect(id(1), 0, id(2), 0).unwrap();
    assert!(added_again);
}

// Scenario 1 (§8): fan-in add.
#[test]
fn fan_in_add() {
    let chain = Chain::new();
    let (print, captured) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(Sig::new(2.0))).unwrap();
    chain.add_processor(id(3), new_shared_processor(Sig::new(3.0))).unwrap();
    chain.add_processor(id(4), new_shared_processor(print)).unwrap();
    chain.connect(id(1), 0, id(4), 0).unwrap();
    chain.connect(id(2), 0, id(4), 0).unwrap();
    chain.connect(id(3), 0, id(4), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[6.0, 6.0, 6.0, 6.0]");
}

// Scenario 2 (§8): fan-out copy.
#[test]
fn fan_out_copy() {
    let chain = Chain::new();
    let (print1, captured1) = Print::new();
    let (print2, captured2) = Print::new();
    let (print3, captured3) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.111111))).unwrap();
    chain.add_processor(id(2), new_shared_processor(print1)).unwrap();
    chain.add_processor(id(3), new_shared_processor(print2)).unwrap();
    chain.add_processor(id(4), new_shared_processor(print3)).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    chain.connect(id(1), 0, id(3), 0).unwrap();
    chain.connect(id(1), 0, id(4), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.tick();
    chain.tick();
    for captured in [&captured1, &captured2, &captured3] {
        assert_eq!(&*captured.lock(), "[1.111111, 1.111111, 1.111111, 1.111111]");
    }
}

// Scenario 3 (§8): cycle rejection.
#[test]
fn cycle_rejection() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(Identity::new())).unwrap();
    chain.add_processor(id(2), new_shared_processor(Identity::new())).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    let err = chain.connect(id(2), 0, id(1), 0).unwrap_err();
    assert!(matches!(err, ChainError::CycleDetected { .. }));
    assert!(!chain.is_prepared());
}

// Scenario 4 (§8): count doubler.
#[test]
fn count_doubler() {
    let chain = Chain::new();
    let (print, captured) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Count::new())).unwrap();
    chain.add_processor(id(2), new_shared_processor(PlusSignal::new())).unwrap();
    chain.add_processor(id(3), new_shared_processor(print)).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    chain.connect(id(1), 0, id(2), 1).unwrap();
    chain.connect(id(2), 0, id(3), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();

    chain.tick();
    assert_eq!(&*captured.lock(), "[0.0, 2.0, 4.0, 6.0]");
    chain.tick();
    assert_eq!(&*captured.lock(), "[8.0, 10.0, 12.0, 14.0]");
    chain.tick();
    assert_eq!(&*captured.lock(), "[16.0, 18.0, 20.0, 22.0]");
}

// Scenario 5 (§8): processor reused.
#[test]
fn processor_reused() {
    let chain = Chain::new();
    let proc = new_shared_processor(Sig::new(1.0));
    chain.add_processor(id(1), Arc::clone(&proc)).unwrap();
    chain.add_processor(id(2), proc).unwrap();
    let err = chain.prepare(44_100, 4).unwrap_err();
    assert!(matches!(err, ChainError::ProcessorReused { .. }));
}

// Scenario 6 (§8): unconnected ports share one signal chain-wide.
#[test]
fn unconnected_signals_are_shared() {
    let chain = Chain::new();
    let (checker_a, in_a, out_a) = SharedSignalsChecker::new();
    let (checker_b, in_b, out_b) = SharedSignalsChecker::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(9.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(checker_a)).unwrap();
    chain.add_processor(id(3), new_shared_processor(checker_b)).unwrap();
    chain.connect(id(1), 0, id(2), 1).unwrap();
    chain.connect(id(1), 0, id(3), 1).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.tick();

    let in_a = in_a.lock();
    let in_b = in_b.lock();
    let out_a = out_a.lock();
    let out_b = out_b.lock();

    assert!(Arc::ptr_eq(&in_a[0], &in_a[2]));
    assert!(Arc::ptr_eq(&in_a[0], &in_b[0]));
    assert!(Arc::ptr_eq(&in_a[0], &in_b[2]));
    assert!(!Arc::ptr_eq(&in_a[0], &in_a[1]));
    assert!(Arc::ptr_eq(&out_a[0], &out_b[0]));
}

#[test]
fn links_reflects_active_connections_only() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(Identity::new())).unwrap();
    assert!(chain.links().is_empty());

    chain.connect(id(1), 0, id(2), 0).unwrap();
    let links = chain.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].src_node, id(1));
    assert_eq!(links[0].src_outlet, 0);
    assert_eq!(links[0].dst_node, id(2));
    assert_eq!(links[0].dst_inlet, 0);

    chain.disconnect(id(1), 0, id(2), 0);
    assert!(chain.links().is_empty());
}

// `want_perform = false` bypasses the node: its output buffer never gets
// written, so a disconnected-inlet placeholder downstream of it stays silent
// even though the processor itself would otherwise fill it with a nonzero
// value.
#[test]
fn want_perform_false_bypasses_the_node() {
    let chain = Chain::new();
    let (print, captured) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Mute::new(9.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(print)).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[0.0, 0.0, 0.0, 0.0]");
}

#[test]
fn duplicate_id_is_rejected() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    let err = chain
        .add_processor(id(1), new_shared_processor(Sig::new(2.0)))
        .unwrap_err();
    assert!(matches!(err, ChainError::DuplicateId(n) if n == id(1)));
}

#[test]
fn connect_to_unknown_node_is_rejected() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    let err = chain.connect(id(1), 0, id(99), 0).unwrap_err();
    assert!(matches!(err, ChainError::UnknownNode(n) if n == id(99)));
}

#[test]
fn connect_with_out_of_range_port_is_rejected() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(Identity::new())).unwrap();
    let err = chain.connect(id(1), 5, id(2), 0).unwrap_err();
    assert!(matches!(
        err,
        ChainError::PortOutOfRange { node, index: 5, count: 1 } if node == id(1)
    ));
}

#[test]
fn processor_prepare_failure_leaves_chain_not_prepared() {
    let chain = Chain::new();
    chain.add_processor(id(1), new_shared_processor(FailsToPrepare)).unwrap();
    let err = chain.prepare(44_100, 4).unwrap_err();
    assert!(matches!(err, ChainError::ProcessorFailure { .. }));
    assert!(!chain.is_prepared());
}

// Scenario 7 (§8): incremental edits.
#[test]
fn incremental_edits() {
    let chain = Chain::new();
    let (print, captured) = Print::new();
    chain.add_processor(id(1), new_shared_processor(Sig::new(1.0))).unwrap();
    chain.add_processor(id(2), new_shared_processor(PlusSignal::new())).unwrap();
    chain.add_processor(id(3), new_shared_processor(print)).unwrap();
    chain.connect(id(1), 0, id(2), 0).unwrap();
    chain.connect(id(2), 0, id(3), 0).unwrap();
    chain.prepare(44_100, 4).unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[1.0, 1.0, 1.0, 1.0]");

    chain.add_processor(id(4), new_shared_processor(Sig::new(2.0))).unwrap();
    chain.connect(id(4), 0, id(2), 1).unwrap();
    chain.update().unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[3.0, 3.0, 3.0, 3.0]");

    chain.disconnect(id(1), 0, id(2), 0);
    chain.update().unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[2.0, 2.0, 2.0, 2.0]");

    chain.remove_processor(id(2));
    chain.update().unwrap();
    chain.tick();
    assert_eq!(&*captured.lock(), "[0.0, 0.0, 0.0, 0.0]");
}
