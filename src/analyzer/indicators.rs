/// Mean of the last `window` values, or `None` if there are fewer than `window`.
pub fn trailing_mean(data: &[f64], window: usize) -> Option<f64> {
    if window == 0 || data.len() < window {
        return None;
    }
    let tail = &data[data.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// How far `current` sits under `reference`, in percent of `reference`.
pub fn percent_below(reference: f64, current: f64) -> f64 {
    (reference - current) / reference * 100.0
}

/// Signed change from `previous` to `current` in percent.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}
