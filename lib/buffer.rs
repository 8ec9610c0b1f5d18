use crate::config::ADC_MAX;

/// Raw codes of one acquisition.
///
/// The length is fixed to `LEN` and every stored code is within
/// `[0, ADC_MAX]`; the contents are overwritten in place by each capture.
pub struct SampleBuffer<const LEN: usize> {
    samples: [u16; LEN],
}

impl<const LEN: usize> SampleBuffer<LEN> {
    pub const fn new() -> Self {
        SampleBuffer { samples: [0; LEN] }
    }

    pub const fn len(&self) -> usize {
        LEN
    }

    pub const fn is_empty(&self) -> bool {
        LEN == 0
    }

    /// Stores `code` at `index`, saturating at [`ADC_MAX`].
    pub fn store(&mut self, index: usize, code: u16) {
        self.samples[index] = code.min(ADC_MAX);
    }

    pub fn get(&self, index: usize) -> Option<u16> {
        self.samples.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.samples.iter().copied()
    }
}

impl<const LEN: usize> Default for SampleBuffer<LEN> {
    fn default() -> Self {
        SampleBuffer::new()
    }
}
