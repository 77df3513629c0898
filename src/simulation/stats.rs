//! Small order statistics over `f64` samples

/// Median of `values`; `None` when empty.
///
/// Even-length input averages the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut buf = values.to_vec();
    median_in_place(&mut buf)
}

/// Median that reorders `buf` instead of allocating
pub fn median_in_place(buf: &mut [f64]) -> Option<f64> {
    let n = buf.len();
    if n == 0 {
        return None;
    }
    buf.sort_unstable_by(|a, b| a.total_cmp(b));
    let mid = n / 2;
    if n % 2 == 1 {
        Some(buf[mid])
    } else {
        Some((buf[mid - 1] + buf[mid]) / 2.0)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let var = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Percentile of already-sorted data, linear interpolation between ranks.
/// `q` is in [0, 1].
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
