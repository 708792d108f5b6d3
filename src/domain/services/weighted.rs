//! Cumulative-weight sampling over ordered buckets

/// Pick the first bucket whose cumulative weight meets or exceeds `draw`.
///
/// Buckets are walked in the order given. `draw` is expected in `[0, 1)` and
/// the weights to sum to 1.0. When floating-point accumulation leaves the
/// total short of the draw, the last bucket is returned. `None` only for an
/// empty bucket list.
pub fn pick_weighted<K: Copy>(buckets: &[(K, f64)], draw: f64) -> Option<K> {
    let mut cumulative = 0.0;
    for (key, weight) in buckets {
        cumulative += weight;
        if draw <= cumulative {
            return Some(*key);
        }
    }

    // Overshoot: the draw landed beyond the accumulated total
    buckets.last().map(|(key, _)| *key)
}
