/// Per-node context handed to [`super::processor::Processor::prepare`].
///
/// Built fresh by [`super::node::Node::prepare`] each prepare cycle from the
/// node's current connection state (§3, §4.8): which inlets and outlets
/// currently have at least one active (non-disconnected) connection.
#[derive(Debug, Clone)]
pub struct PrepareInfo {
    pub sample_rate: usize,
    pub block_size: usize,
    pub inputs_connected: Vec<bool>,
    pub outputs_connected: Vec<bool>,
}

impl PrepareInfo {
    pub fn new(
        sample_rate: usize,
        block_size: usize,
        inputs_connected: Vec<bool>,
        outputs_connected: Vec<bool>,
    ) -> PrepareInfo {
        PrepareInfo {
            sample_rate,
            block_size,
            inputs_connected,
            outputs_connected,
        }
    }
}
