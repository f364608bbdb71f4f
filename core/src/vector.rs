//! Sparse vector arithmetic over term-weight maps. Terms absent from a map
//! carry weight 0 and never contribute.

use crate::Term;
use std::collections::BTreeMap;

/// Dot product of two sparse weight vectors, restricted to terms present in
/// both. Iterates the smaller map and probes the larger.
pub fn dot(a: &BTreeMap<Term, f64>, b: &BTreeMap<Term, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum()
}

/// Euclidean norm of a sparse weight vector. Zero for the empty vector.
pub fn norm(v: &BTreeMap<Term, f64>) -> f64 {
    v.values().map(|w| w * w).sum::<f64>().sqrt()
}
