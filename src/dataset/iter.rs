use super::{Curve, Float, SampleSet};

/// Iterator over the observations of a sample set
pub struct Curves<'a, F> {
    samples: &'a SampleSet<F>,
    idx: usize,
}

impl<'a, F: Float> Curves<'a, F> {
    pub fn new(samples: &'a SampleSet<F>) -> Curves<'a, F> {
        Curves { samples, idx: 0 }
    }
}

impl<'a, F: Float> Iterator for Curves<'a, F> {
    type Item = Curve<'a, F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.samples.nsamples() {
            return None;
        }

        let curve = self.samples.curve(self.idx);
        self.idx += 1;

        Some(curve)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.nsamples() - self.idx;
        (remaining, Some(remaining))
    }
}

impl<'a, F: Float> ExactSizeIterator for Curves<'a, F> {}
