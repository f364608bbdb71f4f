use crate::{vector, DocId, Term};
use std::collections::{BTreeMap, HashMap};

/// Frozen TF-IDF index over a fixed document collection.
///
/// Built once, by [`crate::build_index`] from the corpus or by
/// [`crate::load_index`] from the persisted index files, and never mutated
/// afterward. All maps are sparse: a term absent from a map has weight 0,
/// read through the zero-default accessors below.
#[derive(Debug, Default)]
pub struct Index {
    /// Document ids in the order first encountered.
    pub(crate) doc_ids: Vec<DocId>,
    /// All terms of the collection, sorted ascending.
    pub(crate) vocabulary: Vec<Term>,
    /// Number of documents containing each term at least once.
    pub(crate) df: HashMap<Term, u32>,
    /// ln(N / df(term)) per vocabulary term.
    pub(crate) idf: BTreeMap<Term, f64>,
    /// Max-normalized term frequency per document, present terms only.
    pub(crate) tf: HashMap<DocId, BTreeMap<Term, f64>>,
    /// tf * idf per document, present terms only.
    pub(crate) tf_idf: HashMap<DocId, BTreeMap<Term, f64>>,
    /// Euclidean norm of each document's tf-idf vector.
    pub(crate) doc_norms: HashMap<DocId, f64>,
}

impl Index {
    /// Assemble an index from the insertion-ordered doc ids, the idf map and
    /// the per-document tf maps. Everything else is derived: the vocabulary
    /// is the idf key set, df counts tf-map membership (a document stored a
    /// tf for a term iff it contained that term), tf-idf is the product, and
    /// document norms are precomputed for query scoring.
    pub(crate) fn from_parts(
        doc_ids: Vec<DocId>,
        idf: BTreeMap<Term, f64>,
        tf: HashMap<DocId, BTreeMap<Term, f64>>,
    ) -> Self {
        let vocabulary: Vec<Term> = idf.keys().cloned().collect();

        let mut df: HashMap<Term, u32> = HashMap::new();
        for tf_map in tf.values() {
            for term in tf_map.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let mut tf_idf: HashMap<DocId, BTreeMap<Term, f64>> = HashMap::new();
        let mut doc_norms: HashMap<DocId, f64> = HashMap::new();
        for (doc_id, tf_map) in &tf {
            let weights: BTreeMap<Term, f64> = tf_map
                .iter()
                .map(|(term, tf_val)| {
                    let idf_val = idf.get(term).copied().unwrap_or(0.0);
                    (term.clone(), tf_val * idf_val)
                })
                .collect();
            doc_norms.insert(doc_id.clone(), vector::norm(&weights));
            tf_idf.insert(doc_id.clone(), weights);
        }

        Self {
            doc_ids,
            vocabulary,
            df,
            idf,
            tf,
            tf_idf,
            doc_norms,
        }
    }

    /// Total number of documents in the collection.
    pub fn doc_count(&self) -> usize {
        self.doc_ids.len()
    }

    /// Document ids in first-encounter order.
    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// All terms of the collection, sorted ascending.
    pub fn vocabulary(&self) -> &[Term] {
        &self.vocabulary
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.idf.contains_key(term)
    }

    /// Number of documents containing `term`; 0 if the term is unknown.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    /// Inverse document frequency of `term`; 0 if the term is unknown.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Max-normalized term frequency of `term` in `doc`; 0 if absent.
    pub fn term_frequency(&self, doc: &str, term: &str) -> f64 {
        self.tf
            .get(doc)
            .and_then(|m| m.get(term))
            .copied()
            .unwrap_or(0.0)
    }

    /// tf-idf weight of `term` in `doc`; 0 if absent.
    pub fn tf_idf(&self, doc: &str, term: &str) -> f64 {
        self.tf_idf
            .get(doc)
            .and_then(|m| m.get(term))
            .copied()
            .unwrap_or(0.0)
    }

    /// The sparse tf vector of a document, terms sorted ascending.
    pub fn tf_map(&self, doc: &str) -> Option<&BTreeMap<Term, f64>> {
        self.tf.get(doc)
    }

    /// The sparse tf-idf vector of a document, terms sorted ascending.
    pub fn tf_idf_map(&self, doc: &str) -> Option<&BTreeMap<Term, f64>> {
        self.tf_idf.get(doc)
    }

    /// Norm of a document's tf-idf vector; 0 for unknown or empty documents.
    pub fn doc_norm(&self, doc: &str) -> f64 {
        self.doc_norms.get(doc).copied().unwrap_or(0.0)
    }
}
