//! Index file naming and the line-oriented writers. A collection named
//! `nytsmall` lives in `nytsmall.xml` and persists to `nytsmall.idf` and
//! `nytsmall.tf` next to it.

use crate::error::Error;
use crate::{Index, Result};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Maps a collection name to its corpus and index file paths.
pub struct CollectionPaths {
    base: PathBuf,
}

impl CollectionPaths {
    pub fn new(collection: impl AsRef<Path>) -> Self {
        Self {
            base: collection.as_ref().to_path_buf(),
        }
    }

    fn with_ext(&self, ext: &str) -> PathBuf {
        let mut os: OsString = self.base.clone().into_os_string();
        os.push(".");
        os.push(ext);
        PathBuf::from(os)
    }

    pub fn corpus(&self) -> PathBuf {
        self.with_ext("xml")
    }

    pub fn idf(&self) -> PathBuf {
        self.with_ext("idf")
    }

    pub fn tf(&self) -> PathBuf {
        self.with_ext("tf")
    }
}

/// Open a file for reading, mapping a missing file to `Error::FileNotFound`.
pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })
}

/// Write the idf file: `term<TAB>idf`, one vocabulary term per line, terms
/// ascending. No header. The float text is f64's shortest round-trip form.
pub fn write_idf_file(index: &Index, path: &Path) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for (term, idf) in &index.idf {
        writeln!(w, "{term}\t{idf}")?;
    }
    w.flush()?;
    Ok(())
}

/// Write the tf file: `docId<TAB>term<TAB>tf` per present term. One
/// document's records are contiguous, documents in first-encounter order,
/// terms ascending within a document. No header.
pub fn write_tf_file(index: &Index, path: &Path) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for doc_id in &index.doc_ids {
        if let Some(tf_map) = index.tf.get(doc_id) {
            for (term, tf) in tf_map {
                writeln!(w, "{doc_id}\t{term}\t{tf}")?;
            }
        }
    }
    w.flush()?;
    Ok(())
}
