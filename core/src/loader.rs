//! Index reconstruction from the persisted `.idf` / `.tf` pair, without the
//! original corpus. Document frequency is not stored; it is recomputed from
//! tf-map membership, which matches the build-time value because a tf record
//! exists exactly for the terms a document contained.

use crate::error::Error;
use crate::persist::open_file;
use crate::{DocId, Index, Result, Term};
use std::collections::{BTreeMap, HashMap};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load an index from its two persisted files. The result is
/// observationally equivalent to building from the original corpus. Either
/// the whole load succeeds or an error is returned; no partial index exists.
pub fn load_index(idf_path: &Path, tf_path: &Path) -> Result<Index> {
    let idf = read_idf_file(idf_path)?;
    let (doc_ids, tf) = read_tf_file(tf_path, &idf)?;
    let index = Index::from_parts(doc_ids, idf, tf);
    tracing::info!(
        num_docs = index.doc_count(),
        num_terms = index.vocabulary().len(),
        "loaded index"
    );
    Ok(index)
}

fn read_idf_file(path: &Path) -> Result<BTreeMap<Term, f64>> {
    let reader = BufReader::new(open_file(path)?);
    let mut idf = BTreeMap::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let mut fields = line.split('\t');
        let (Some(term), Some(value), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::format(
                path,
                line_no,
                "expected 2 tab-separated fields",
            ));
        };
        let value: f64 = value.parse().map_err(|_| {
            Error::format(path, line_no, format!("invalid idf value `{value}`"))
        })?;
        idf.insert(term.to_string(), value);
    }
    Ok(idf)
}

type TfMaps = HashMap<DocId, BTreeMap<Term, f64>>;

/// Records for one document must be contiguous; a doc id recurring after its
/// run ended means the file was not written by the builder and is rejected.
fn read_tf_file(path: &Path, idf: &BTreeMap<Term, f64>) -> Result<(Vec<DocId>, TfMaps)> {
    let reader = BufReader::new(open_file(path)?);
    let mut doc_ids: Vec<DocId> = Vec::new();
    let mut tf: TfMaps = HashMap::new();
    let mut current: Option<DocId> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let mut fields = line.split('\t');
        let (Some(doc_id), Some(term), Some(value), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::format(
                path,
                line_no,
                "expected 3 tab-separated fields",
            ));
        };
        let value: f64 = value.parse().map_err(|_| {
            Error::format(path, line_no, format!("invalid tf value `{value}`"))
        })?;
        if !idf.contains_key(term) {
            return Err(Error::format(
                path,
                line_no,
                format!("term `{term}` is missing from the idf file"),
            ));
        }

        if current.as_deref() != Some(doc_id) {
            if tf.contains_key(doc_id) {
                return Err(Error::format(
                    path,
                    line_no,
                    format!("records for document `{doc_id}` are not contiguous"),
                ));
            }
            doc_ids.push(doc_id.to_string());
            tf.insert(doc_id.to_string(), BTreeMap::new());
            current = Some(doc_id.to_string());
        }
        tf.get_mut(doc_id)
            .expect("current document map exists")
            .insert(term.to_string(), value);
    }

    Ok((doc_ids, tf))
}
