//! Cosine-similarity ranking of the collection against a tokenized query.

use crate::{vector, DocId, Index, Term};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Upper bound on the number of ranked results.
pub const MAX_RESULTS: usize = 10;

/// Score every document against the query terms and return at most
/// [`MAX_RESULTS`] hits, descending by score, positive scores only.
///
/// Out-of-vocabulary terms are dropped silently; an empty or fully
/// out-of-vocabulary query yields an empty result list. Ties keep the
/// documents' insertion order. Read-only over the index, so one index can
/// serve any number of queries.
pub fn execute_query(index: &Index, terms: &[Term]) -> Vec<(DocId, f64)> {
    let weights = query_weights(index, terms);
    let query_norm = vector::norm(&weights);

    let mut scored: Vec<(DocId, f64)> = Vec::new();
    for doc_id in index.doc_ids() {
        let score = score_document(index, doc_id, &weights, query_norm);
        if score > 0.0 {
            scored.push((doc_id.clone(), score));
        }
    }

    // sort_by is stable: equal scores keep document insertion order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(MAX_RESULTS);
    scored
}

/// `idf(t) * count(t) / maxCount` for each distinct query term found in the
/// vocabulary. The empty map stands for the all-zero query vector.
fn query_weights(index: &Index, terms: &[Term]) -> BTreeMap<Term, f64> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    let Some(&max_count) = counts.values().max() else {
        return BTreeMap::new();
    };

    counts
        .into_iter()
        .filter(|(term, _)| index.contains_term(term))
        .map(|(term, count)| {
            let weight = index.idf(term) * (count as f64 / max_count as f64);
            (term.to_string(), weight)
        })
        .collect()
}

/// Cosine similarity between the query vector and one document's tf-idf
/// vector. A zero norm on either side means score 0, never a division fault.
fn score_document(index: &Index, doc_id: &str, weights: &BTreeMap<Term, f64>, query_norm: f64) -> f64 {
    if query_norm == 0.0 {
        return 0.0;
    }
    let doc_norm = index.doc_norm(doc_id);
    if doc_norm == 0.0 {
        return 0.0;
    }
    let Some(doc_vector) = index.tf_idf_map(doc_id) else {
        return 0.0;
    };
    vector::dot(weights, doc_vector) / (query_norm * doc_norm)
}
