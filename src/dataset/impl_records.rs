use super::{Float, Records, SampleSet};

/// Implement records for functional sample sets
impl<F: Float> Records for SampleSet<F> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.nsamples()
    }

    fn nfeatures(&self) -> usize {
        self.npoints()
    }
}
