//! Rotation order generation and repair.
//!
//! Pure helpers behind sequential message selection: produce a uniformly
//! random permutation of message indices, and validate/repair a previously
//! stored one.

use rand::Rng;

/// Uniformly random permutation of `0..n` (Fisher-Yates, swapping from the
/// last index down to 1, each swap target drawn uniformly from `[0, i]`).
pub fn generate_order<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

/// Defensive copy of `candidate` iff it is a permutation of `0..n`.
///
/// Returns `None` for wrong length, out-of-range values, or duplicates;
/// `None` signals "regenerate". Stored orders arrive as raw `i64`s because
/// the settings document is outside our control.
pub fn sanitize_order(candidate: &[i64], n: usize) -> Option<Vec<usize>> {
    if candidate.len() != n {
        return None;
    }
    let mut seen = vec![false; n];
    let mut out = Vec::with_capacity(n);
    for &value in candidate {
        if value < 0 || value >= n as i64 {
            return None;
        }
        let idx = value as usize;
        if seen[idx] {
            return None;
        }
        seen[idx] = true;
        out.push(idx);
    }
    Some(out)
}
