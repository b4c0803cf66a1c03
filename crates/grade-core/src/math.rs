//! Small numeric helpers shared across the analytics crates

/// Arithmetic mean, `None` for an empty iterator
pub fn mean_of<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// `numerator / denominator`, or 0 when the denominator is zero
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Share of `total` expressed as a percentage
pub fn percentage(count: usize, total: usize) -> f64 {
    ratio(count, total) * 100.0
}

/// Clamp to `[0, 1]`, mapping NaN to 0
pub fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
