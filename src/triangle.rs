//! Packing an isosceles triangle as a staircase of horizontal strips.
//!
//! A strip spanning heights `[t, t + s)` is only as wide as the triangle at
//! its top edge `t + s`, so every panel in the strip lies inside the triangle.
//! The count is optimal for this strip model, not for the true triangle.

/// Usable width at height `t` above the base: `floor(base * (height - t) / height)`.
pub fn width_at(base: u64, height: u64, t: u64) -> u64 {
    let t = t.min(height);
    ((base as u128 * (height - t) as u128) / height as u128) as u64
}

/// Panels of `a x b` cells in a triangle of `base x height` cells.
///
/// `dp[t]` holds the best count for the part of the triangle above height `t`.
pub fn pack(a: u64, b: u64, base: u64, height: u64) -> u64 {
    if base == 0 || height == 0 {
        return 0;
    }
    let top = height as usize;
    let (a_len, b_len) = (a as usize, b as usize);

    let mut dp = vec![0u64; top + 1];
    for t in (0..top).rev() {
        let mut best = dp[t + 1];

        // strip of height b holding a-wide panels
        if t + b_len <= top {
            let next = t + b_len;
            best = best.max(width_at(base, height, next as u64) / a + dp[next]);
        }
        // rotated strip of height a holding b-wide panels
        if t + a_len <= top {
            let next = t + a_len;
            best = best.max(width_at(base, height, next as u64) / b + dp[next]);
        }

        dp[t] = best;
    }
    dp[0]
}
