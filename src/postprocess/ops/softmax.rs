pub(crate) trait Softmax {
    /// Normalize the scores in place, `e^z / sum(e^z)`.
    fn softmax(&mut self);
}

impl Softmax for [f32] {
    fn softmax(&mut self) {
        // shift by the max so exp never overflows, the result is unchanged
        let max = self.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if !max.is_finite() {
            return;
        }
        let mut sum = 0f32;
        for v in self.iter_mut() {
            *v = (*v - max).exp();
            sum += *v;
        }
        for v in self.iter_mut() {
            *v /= sum;
        }
    }
}
