use super::node::NodeId;

/// An immutable descriptor of one requested point-to-point port connection
/// (§3): the public, caller-facing counterpart of the internal
/// [`super::connection::Connection`], which additionally carries prepare-time
/// acquisition and locking state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub src_node: NodeId,
    pub src_outlet: usize,
    pub dst_node: NodeId,
    pub dst_inlet: usize,
}

impl Link {
    pub fn new(src_node: NodeId, src_outlet: usize, dst_node: NodeId, dst_inlet: usize) -> Link {
        Link {
            src_node,
            src_outlet,
            dst_node,
            dst_inlet,
        }
    }
}
