//! Index construction from the corpus: raw counts -> document frequency ->
//! idf -> max-normalized tf, then the one-shot persistence side effect.

use crate::corpus::Document;
use crate::persist::{write_idf_file, write_tf_file, CollectionPaths};
use crate::{DocId, Index, Result, Term};
use std::collections::{BTreeMap, HashMap};

/// Build the index from per-document token multisets.
///
/// Document frequency counts documents whose multiset contains a term at
/// least once, so every vocabulary term has df >= 1 and `ln(N/df)` never
/// divides by zero. A document with an empty multiset is legal: it keeps its
/// doc-id slot, contributes nothing to the vocabulary, and can never appear
/// in a ranked result.
pub fn build_index<I>(documents: I) -> Index
where
    I: IntoIterator<Item = Document>,
{
    let mut doc_ids: Vec<DocId> = Vec::new();
    let mut counts_by_doc: Vec<(DocId, BTreeMap<Term, u32>)> = Vec::new();
    let mut df: BTreeMap<Term, u32> = BTreeMap::new();

    for doc in documents {
        for term in doc.counts.keys() {
            *df.entry(term.clone()).or_insert(0) += 1;
        }
        doc_ids.push(doc.id.clone());
        counts_by_doc.push((doc.id, doc.counts));
    }

    let n = doc_ids.len() as f64;
    let idf: BTreeMap<Term, f64> = df
        .iter()
        .map(|(term, &df_t)| (term.clone(), (n / df_t as f64).ln()))
        .collect();

    let mut tf: HashMap<DocId, BTreeMap<Term, f64>> = HashMap::with_capacity(doc_ids.len());
    for (doc_id, counts) in counts_by_doc {
        let tf_map = match counts.values().max() {
            Some(&max_raw) => {
                let max_raw = max_raw as f64;
                counts
                    .iter()
                    .map(|(term, &raw)| (term.clone(), raw as f64 / max_raw))
                    .collect()
            }
            None => BTreeMap::new(),
        };
        tf.insert(doc_id, tf_map);
    }

    let index = Index::from_parts(doc_ids, idf, tf);
    tracing::info!(
        num_docs = index.doc_count(),
        num_terms = index.vocabulary().len(),
        "built index"
    );
    index
}

/// Build the index and persist it to `<collection>.idf` / `<collection>.tf`.
/// This is the builder's sole I/O; it never reads the files back.
pub fn build_and_persist<I>(documents: I, paths: &CollectionPaths) -> Result<Index>
where
    I: IntoIterator<Item = Document>,
{
    let index = build_index(documents);
    write_idf_file(&index, &paths.idf())?;
    write_tf_file(&index, &paths.tf())?;
    tracing::info!(
        idf = %paths.idf().display(),
        tf = %paths.tf().display(),
        "persisted index"
    );
    Ok(index)
}
