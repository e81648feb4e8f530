//! Order crossover (OX1), generalized to parents whose interior POI sets
//! may differ in size and membership (spec §4.5) — the classic OX1
//! assumes both parents are permutations of the same full set, which
//! doesn't hold here since a route may skip any POI.

use std::collections::HashSet;

use rand::Rng;

use crate::individual::Individual;

/// Produces one child interior sequence from two parent interiors.
///
/// Both parents are truncated to `size = min(|parent_a|, |parent_b|)`
/// before cutting; if `size < 2`, returns a copy of `parent_a` (already at
/// most `size` long). Otherwise copies a segment between two distinct
/// random cut points from (truncated) `parent_a` verbatim, then walks
/// (truncated) `parent_b` starting just past the segment's end (wrapping),
/// filling the remaining slots in `parent_b`'s relative order while
/// skipping ids already present. If `parent_b` runs out of unused ids
/// before every slot is filled, the child ends up shorter than `size` —
/// repair and mutation are expected to extend it again (spec §4.6).
pub fn ox1<R: Rng + ?Sized>(parent_a: &[usize], parent_b: &[usize], rng: &mut R) -> Vec<usize> {
    let len = parent_a.len().min(parent_b.len());
    if len < 2 {
        return parent_a.to_vec();
    }
    let parent_a = &parent_a[..len];
    let parent_b = &parent_b[..len];

    let cut1 = rng.random_range(0..len);
    let mut cut2 = rng.random_range(0..len);
    while cut2 == cut1 {
        cut2 = rng.random_range(0..len);
    }
    let (cut1, cut2) = if cut1 <= cut2 { (cut1, cut2) } else { (cut2, cut1) };

    let mut child: Vec<Option<usize>> = vec![None; len];
    let mut present: HashSet<usize> = HashSet::new();
    for idx in cut1..=cut2 {
        child[idx] = Some(parent_a[idx]);
        present.insert(parent_a[idx]);
    }

    let mut filled = cut2 - cut1 + 1;
    let mut child_cursor = (cut2 + 1) % len;

    for &candidate in parent_b {
        if filled == len {
            break;
        }
        if !present.insert(candidate) {
            continue;
        }
        while child[child_cursor].is_some() {
            child_cursor = (child_cursor + 1) % len;
        }
        child[child_cursor] = Some(candidate);
        filled += 1;
        child_cursor = (child_cursor + 1) % len;
    }

    child.into_iter().flatten().collect()
}

/// Recombines two parent individuals into one child, reattaching the
/// shared depot sentinel.
pub fn crossover<R: Rng + ?Sized>(parent_a: &Individual, parent_b: &Individual, rng: &mut R) -> Individual {
    let depot = parent_a.depot_id();
    let child_interior = if rng.random_bool(0.5) {
        ox1(parent_a.interior(), parent_b.interior(), rng)
    } else {
        ox1(parent_b.interior(), parent_a.interior(), rng)
    };
    let route = std::iter::once(depot)
        .chain(child_interior)
        .chain(std::iter::once(depot))
        .collect();
    Individual::new(route)
}
