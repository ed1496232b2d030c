//! Reduces every length of a problem by their greatest common divisor, so the
//! solvers work on the coarsest integer grid that loses nothing.

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Greatest common divisor of the magnitudes of `dims`, never 0.
pub fn common_scale(dims: &[i64]) -> u64 {
    let g = dims.iter().fold(0, |g, &d| gcd(g, d.unsigned_abs()));
    if g == 0 { 1 } else { g }
}

pub fn any_non_positive(dims: &[i64]) -> bool {
    dims.iter().any(|&d| d <= 0)
}

/// Divides all `dims` by their common scale. Signs are kept.
pub fn normalize<const N: usize>(dims: [i64; N]) -> (u64, [i64; N]) {
    let scale = common_scale(&dims);
    let reduced = dims.map(|d| (d as i128 / scale as i128) as i64);
    (scale, reduced)
}
