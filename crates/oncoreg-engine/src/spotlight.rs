//! Cursor arithmetic for the single-patient spotlight.
//!
//! The cursor is an index into the filtered subset. All helpers return 0 for
//! an empty subset so callers never need to special-case it.

use rand::Rng;

/// Clamps `index` into `0..len`.
#[must_use]
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Moves the cursor by `delta`, wrapping around both ends.
///
/// ```
/// # use oncoreg_engine::spotlight::step_index;
/// assert_eq!(step_index(0, -1, 5), 4);
/// assert_eq!(step_index(4, 1, 5), 0);
/// assert_eq!(step_index(2, 0, 0), 0);
/// ```
#[must_use]
pub fn step_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len_i = isize::try_from(len).unwrap_or(isize::MAX);
    let current = isize::try_from(clamp_index(index, len)).unwrap_or(0);
    let next = (current + delta % len_i).rem_euclid(len_i);
    usize::try_from(next).unwrap_or(0)
}

/// Picks a random index different from `index`, when there is more than one
/// record to choose from.
pub fn shuffle_index<R>(rng: &mut R, index: usize, len: usize) -> usize
where
    R: Rng + ?Sized,
{
    if len <= 1 {
        return 0;
    }
    let current = clamp_index(index, len);
    // draw from len - 1 slots and skip over the current one
    let pick = rng.random_range(0..len - 1);
    if pick >= current { pick + 1 } else { pick }
}
