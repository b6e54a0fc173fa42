use crate::error::SolverError;

/// Accumulated impulses of a batch, in row order, for warm-starting a later
/// solve or shipping them across a process boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpulseSnapshot {
    impulses: Vec<f32>,
}

impl ImpulseSnapshot {
    pub fn from_impulses(impulses: Vec<f32>) -> Self {
        Self { impulses }
    }

    pub fn impulses(&self) -> &[f32] {
        &self.impulses
    }

    pub fn len(&self) -> usize {
        self.impulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impulses.is_empty()
    }

    /// Native-endian `f32` image of the impulses.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.impulses)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SolverError> {
        if bytes.len() % std::mem::size_of::<f32>() != 0 {
            return Err(SolverError::MalformedSnapshot { len: bytes.len() });
        }
        // Copies, so `bytes` needs no particular alignment.
        let impulses: Vec<f32> = bytemuck::allocation::pod_collect_to_vec(bytes);
        Ok(Self { impulses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_reload_to_the_same_impulses() {
        let snapshot = ImpulseSnapshot::from_impulses(vec![0.0, 3.25, -7.5]);
        let bytes = snapshot.as_bytes().to_vec();
        assert_eq!(bytes.len(), 12);

        let reloaded = ImpulseSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(reloaded, snapshot);
    }

    #[test]
    fn unaligned_slice_is_accepted() {
        let snapshot = ImpulseSnapshot::from_impulses(vec![1.0, 2.0]);
        let mut padded = vec![0u8];
        padded.extend_from_slice(snapshot.as_bytes());

        let reloaded = ImpulseSnapshot::from_bytes(&padded[1..]).unwrap();
        assert_eq!(reloaded.impulses(), &[1.0, 2.0]);
    }

    #[test]
    fn ragged_byte_image_is_rejected() {
        assert_eq!(
            ImpulseSnapshot::from_bytes(&[0u8; 7]),
            Err(SolverError::MalformedSnapshot { len: 7 })
        );
        assert!(ImpulseSnapshot::from_bytes(&[]).unwrap().is_empty());
    }
}
