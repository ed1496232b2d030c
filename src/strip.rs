//! Column and row tilings for rectangles too large for the exact search.
//!
//! Each scan mixes two uniform strip kinds: strips as wide as the panel's
//! first side and strips as wide as its second. Panel counts per strip do not
//! depend on strip order, so a linear scan over the number of strips of the
//! first kind finds the best mix. The result is a lower bound on the optimum.

/// Best of the four scans (two directions, two panel orientations).
pub fn pack(a: u64, b: u64, x: u64, y: u64) -> u64 {
    [
        by_width(a, b, x, y),
        by_width(b, a, x, y),
        by_height(a, b, x, y),
        by_height(b, a, x, y),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// Full-height columns: `i` columns of `a`-wide panels, the remaining width in
/// columns of rotated `b`-wide panels.
pub fn by_width(a: u64, b: u64, x: u64, y: u64) -> u64 {
    let upright = y / b;
    let rotated = y / a;
    (0..=x / a)
        .map(|i| {
            let rem = x - i * a;
            i.saturating_mul(upright)
                .saturating_add((rem / b).saturating_mul(rotated))
        })
        .max()
        .unwrap_or(0)
}

/// Full-width rows: `j` rows of `b`-tall panels, the remaining height in rows of
/// rotated `a`-tall panels.
pub fn by_height(a: u64, b: u64, x: u64, y: u64) -> u64 {
    let upright = x / a;
    let rotated = x / b;
    (0..=y / b)
        .map(|j| {
            let rem = y - j * b;
            j.saturating_mul(upright)
                .saturating_add((rem / a).saturating_mul(rotated))
        })
        .max()
        .unwrap_or(0)
}
