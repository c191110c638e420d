use std::fmt;

use super::node::NodeId;

/// The complete error taxonomy for chain construction and editing (§7).
///
/// `perform` never produces a `ChainError`: a processor that cannot
/// continue simply emits silence (§5). Every fallible edit or prepare/update
/// path returns one of these variants instead of panicking.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("connecting node {src:?} outlet {outlet} to node {dst:?} inlet {inlet} would close a cycle")]
    CycleDetected {
        src: NodeId,
        outlet: usize,
        dst: NodeId,
        inlet: usize,
    },

    #[error("port index {index} is out of range for node {node:?}, which has {count} ports")]
    PortOutOfRange {
        node: NodeId,
        index: usize,
        count: usize,
    },

    #[error("node {0:?} is not present in the chain")]
    UnknownNode(NodeId),

    #[error("processor instance already registered to node {existing:?}, cannot also register to {requested:?}")]
    ProcessorReused {
        existing: NodeId,
        requested: NodeId,
    },

    #[error("node id {0:?} is already present in the chain")]
    DuplicateId(NodeId),

    #[error("processor on node {node:?} failed during {phase}: {source}")]
    ProcessorFailure {
        node: NodeId,
        phase: ProcessorPhase,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("signal size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },
}

/// Which processor lifecycle call raised a [`ChainError::ProcessorFailure`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProcessorPhase {
    Prepare,
    Release,
}

impl fmt::Display for ProcessorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorPhase::Prepare => write!(f, "prepare"),
            ProcessorPhase::Release => write!(f, "release"),
        }
    }
}
