//! Utility functions for protobench

/// `part / whole` clamped to `[0, 1]`, `None` when `whole` is zero
pub fn ratio(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some((part as f64 / whole as f64).min(1.0))
}

/// Mean of `total` over `count` iterations, zero when `count` is zero
pub fn per_op(total: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

/// Render a ratio as a two-decimal percentage, or `n/a`
pub fn format_percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "n/a".to_string(),
    }
}
