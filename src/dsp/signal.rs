use std::sync::Arc;

use parking_lot::Mutex;

use super::error::ChainError;

/// The floating-point type carried by every [`Signal`] in the graph.
///
/// Selected at build time via the `f64_samples` feature so that `perform`
/// stays monomorphic over a single concrete type; see `SPEC_FULL.md` §10.
#[cfg(not(feature = "f64_samples"))]
pub type Sample = f32;

#[cfg(feature = "f64_samples")]
pub type Sample = f64;

/// One contiguous, owned block of `size` audio samples.
///
/// A Signal's size is fixed for its lifetime (§4.1). Signals are shared
/// between nodes via [`SharedSignal`], never copied implicitly.
#[derive(Debug, Clone)]
pub struct Signal {
    data: Vec<Sample>,
}

impl Signal {
    /// Allocates a new signal of `size` samples, each initialized to `value`.
    ///
    /// Panics if `size == 0`: a zero-size signal is a precondition violation,
    /// not a recoverable error (§4.1).
    pub fn new(size: usize, value: Sample) -> Signal {
        assert!(size > 0, "Signal size must be positive");
        Signal {
            data: vec![value; size],
        }
    }

    /// Allocates a new zero-filled signal of `size` samples.
    pub fn new_zeroed(size: usize) -> Signal {
        Signal::new(size, 0.0)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Sample] {
        &mut self.data
    }

    pub fn fill(&mut self, value: Sample) {
        for s in self.data.iter_mut() {
            *s = value;
        }
    }

    pub fn clear(&mut self) {
        self.fill(0.0);
    }

    /// Copies `other` into `self`. Fails with [`ChainError::SizeMismatch`]
    /// when the sizes differ.
    pub fn copy(&mut self, other: &Signal) -> Result<(), ChainError> {
        if self.size() != other.size() {
            return Err(ChainError::SizeMismatch {
                expected: self.size(),
                found: other.size(),
            });
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Adds `other` into `self` elementwise. Fails with
    /// [`ChainError::SizeMismatch`] when the sizes differ.
    pub fn add(&mut self, other: &Signal) -> Result<(), ChainError> {
        if self.size() != other.size() {
            return Err(ChainError::SizeMismatch {
                expected: self.size(),
                found: other.size(),
            });
        }
        for (s, o) in self.data.iter_mut().zip(other.data.iter()) {
            *s += *o;
        }
        Ok(())
    }

    /// Elementwise `out = a + b`. All three signals must share the same size.
    pub fn add_into(a: &Signal, b: &Signal, out: &mut Signal) -> Result<(), ChainError> {
        if a.size() != b.size() || a.size() != out.size() {
            return Err(ChainError::SizeMismatch {
                expected: a.size(),
                found: b.size(),
            });
        }
        for ((o, x), y) in out.data.iter_mut().zip(a.data.iter()).zip(b.data.iter()) {
            *o = *x + *y;
        }
        Ok(())
    }
}

/// A reference-counted, lock-guarded handle to a [`Signal`].
///
/// Several pins across different nodes may hold the same `SharedSignal`
/// (§3). The lock is never contended in practice: all mutation happens
/// while the owning `Chain`'s tick mutex is held, so this is plain shared
/// ownership with no GC, not a concurrency primitive in its own right.
pub type SharedSignal = Arc<Mutex<Signal>>;

pub fn new_shared_signal(size: usize, value: Sample) -> SharedSignal {
    Arc::new(Mutex::new(Signal::new(size, value)))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fill_and_clear() {
        let mut s = Signal::new(4, 1.0);
        assert_eq!(s.as_slice(), &[1.0, 1.0, 1.0, 1.0]);
        s.clear();
        assert_eq!(s.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
        s.fill(2.5);
        assert_eq!(s.as_slice(), &[2.5, 2.5, 2.5, 2.5]);
    }

    #[test]
    fn copy_and_add() {
        let a = Signal::new(3, 1.0);
        let b = Signal::new(3, 2.0);
        let mut dst = Signal::new(3, 0.0);
        dst.copy(&a).unwrap();
        assert_eq!(dst.as_slice(), &[1.0, 1.0, 1.0]);
        dst.add(&b).unwrap();
        assert_eq!(dst.as_slice(), &[3.0, 3.0, 3.0]);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let a = Signal::new(3, 1.0);
        let mut b = Signal::new(4, 1.0);
        assert!(matches!(
            b.copy(&a),
            Err(ChainError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn static_add_into() {
        let a = Signal::new(2, 1.0);
        let b = Signal::new(2, 4.0);
        let mut out = Signal::new(2, 0.0);
        Signal::add_into(&a, &b, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[5.0, 5.0]);
    }

    #[test]
    #[should_panic]
    fn zero_size_is_rejected() {
        Signal::new(0, 0.0);
    }
}
