use ndarray::Array1;

/// Probabilities for `logits`, or `None` when any logit is NaN or infinite.
pub(crate) fn softmax(logits: &Array1<f32>) -> Option<Array1<f32>> {
    if logits.iter().any(|x| !x.is_finite()) {
        return None;
    }
    if logits.is_empty() {
        return Some(Array1::zeros(0));
    }
    let max = logits.fold(f32::NEG_INFINITY, |acc, &x| acc.max(x));
    let exp = logits.mapv(|x| (x - max).exp());
    let sum = exp.sum();
    (sum > 0.0 && sum.is_finite()).then(|| exp / sum)
}
