//! Pairwise forward differences and the scalar helpers shared by the
//! rate and ETA estimators.

/// Forward differences: `out[i] = seq[i + 1] - seq[i]`
///
/// Returns an empty vector when fewer than two values are supplied. Used
/// the same way for value columns and timestamp columns.
pub fn diff<I>(seq: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = seq.into_iter();
    let Some(mut prev) = iter.next() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(iter.size_hint().0);
    for next in iter {
        out.push(next - prev);
        prev = next;
    }
    out
}

/// Sign of `x` as -1, 0 or 1. NaN maps to 0.
///
/// `f64::signum` returns 1 for +0.0, which would turn a flat series into a
/// rising one.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
