use nalgebra::DVector;

/// Normalizes the per satellite weight vector in place: scaled by its own
/// mean and the configured UERE budget, so that `mean(w) == 1/uere^2`
/// afterwards. Both estimators consume the same normalized vector.
pub(crate) fn normalize_weights(weights: &mut DVector<f64>, uere: f64) {
    let mean = weights.mean();
    *weights /= mean * uere * uere;
}
