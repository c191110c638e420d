use super::error::ChainError;
use super::signal::{new_shared_signal, Sample, SharedSignal};

/// An ordered tuple of shared signal references, one per port of a node
/// (§3, §4.2). Every contained signal shares the chain's current block
/// size; a `Buffer` with zero channels is a valid, empty buffer.
#[derive(Clone, Default)]
pub struct Buffer {
    signals: Vec<SharedSignal>,
    vector_size: usize,
}

impl Buffer {
    /// Builds an empty buffer with no channels.
    pub fn new_empty() -> Buffer {
        Buffer {
            signals: Vec::new(),
            vector_size: 0,
        }
    }

    /// Aggregates existing shared signals. All signals must already share
    /// the same size; that size becomes `vector_size`.
    pub fn from_signals(signals: Vec<SharedSignal>) -> Result<Buffer, ChainError> {
        let vector_size = match signals.first() {
            Some(s) => s.lock().size(),
            None => 0,
        };
        for s in &signals {
            let size = s.lock().size();
            if size != vector_size {
                return Err(ChainError::SizeMismatch {
                    expected: vector_size,
                    found: size,
                });
            }
        }
        Ok(Buffer {
            signals,
            vector_size,
        })
    }

    /// Allocates `n_channels` fresh signals of `n_samples` each, filled
    /// with `value`.
    pub fn new_filled(n_channels: usize, n_samples: usize, value: Sample) -> Buffer {
        let signals = (0..n_channels)
            .map(|_| new_shared_signal(n_samples, value))
            .collect();
        Buffer {
            signals,
            vector_size: n_samples,
        }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn get_vector_size(&self) -> usize {
        self.vector_size
    }

    pub fn get(&self, index: usize) -> &SharedSignal {
        &self.signals[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedSignal> {
        self.signals.iter()
    }
}

impl std::ops::Index<usize> for Buffer {
    type Output = SharedSignal;

    fn index(&self, index: usize) -> &SharedSignal {
        &self.signals[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_buffer() {
        let b = Buffer::new_empty();
        assert!(b.empty());
        assert_eq!(b.get_vector_size(), 0);
    }

    #[test]
    fn filled_buffer_shares_vector_size() {
        let b = Buffer::new_filled(2, 4, 0.0);
        assert_eq!(b.len(), 2);
        assert_eq!(b.get_vector_size(), 4);
    }

    #[test]
    fn mismatched_signals_rejected() {
        let a = new_shared_signal(4, 0.0);
        let b = new_shared_signal(5, 0.0);
        assert!(matches!(
            Buffer::from_signals(vec![a, b]),
            Err(ChainError::SizeMismatch { .. })
        ));
    }
}
