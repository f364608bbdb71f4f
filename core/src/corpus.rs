//! Corpus reader for the SGML-style collection format: documents delimited
//! by `<DOC id="...">`, an optional `<HEADLINE>` block, and a `<TEXT>` body
//! whose `<P>` markers are skipped. Each document is emitted exactly once as
//! its id plus a bag of raw token counts.

use crate::error::Error;
use crate::tokenizer::tokenize;
use crate::{DocId, Result, Term};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref DOC_ID_RE: Regex = Regex::new(r#"<DOC id="([^"]+)""#).expect("valid regex");
}

/// One corpus document: its id and raw per-term token counts. An empty
/// counts map is legal (a document with no body text).
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub counts: BTreeMap<Term, u32>,
}

enum ScanState {
    SeekDocStart,
    ReadHeadline,
    SeekTextStart,
    ReadTextBody,
}

/// Line scanner over a collection file, yielding one [`Document`] per
/// `<DOC>` block in file order.
pub struct CorpusReader<R: BufRead> {
    lines: Lines<R>,
    path: PathBuf,
    line_no: usize,
}

impl CorpusReader<BufReader<File>> {
    /// Open a collection file; a missing file is `Error::FileNotFound`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = crate::persist::open_file(path)?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> CorpusReader<R> {
    /// Scan an already-open reader. `path` is used only to label errors.
    pub fn new(reader: R, path: impl AsRef<Path>) -> Self {
        Self {
            lines: reader.lines(),
            path: path.as_ref().to_path_buf(),
            line_no: 0,
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(Ok(line)) => {
                self.line_no += 1;
                Ok(Some(line))
            }
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    fn add_tokens(counts: &mut BTreeMap<Term, u32>, text: &str) {
        for term in tokenize(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut state = ScanState::SeekDocStart;
        let mut id: Option<DocId> = None;
        let mut counts: BTreeMap<Term, u32> = BTreeMap::new();

        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    return match state {
                        ScanState::SeekDocStart => None,
                        _ => Some(Err(Error::format(
                            &self.path,
                            self.line_no,
                            "end of file inside an unterminated document",
                        ))),
                    };
                }
                Err(e) => return Some(Err(e)),
            };

            match state {
                ScanState::SeekDocStart => {
                    if line.contains("<DOC id=") {
                        match DOC_ID_RE.captures(&line) {
                            Some(caps) => {
                                id = Some(caps[1].to_string());
                                state = ScanState::ReadHeadline;
                            }
                            None => {
                                return Some(Err(Error::format(
                                    &self.path,
                                    self.line_no,
                                    "document start without a parseable id",
                                )))
                            }
                        }
                    }
                }
                // The headline marker, when present, is the line right after
                // the document start; its text is the single following line.
                ScanState::ReadHeadline => {
                    if line.contains("<HEADLINE>") {
                        match self.read_line() {
                            Ok(Some(text)) => Self::add_tokens(&mut counts, &text),
                            Ok(None) => {
                                return Some(Err(Error::format(
                                    &self.path,
                                    self.line_no,
                                    "end of file inside an unterminated document",
                                )))
                            }
                            Err(e) => return Some(Err(e)),
                        }
                        state = ScanState::SeekTextStart;
                    } else if line.contains("<TEXT>") {
                        state = ScanState::ReadTextBody;
                    } else {
                        state = ScanState::SeekTextStart;
                    }
                }
                ScanState::SeekTextStart => {
                    if line.contains("<TEXT>") {
                        state = ScanState::ReadTextBody;
                    }
                }
                ScanState::ReadTextBody => {
                    if line.contains("</TEXT>") {
                        let id = id.take().expect("doc id set at document start");
                        return Some(Ok(Document { id, counts }));
                    }
                    if line.contains("<P>") || line.contains("</P>") {
                        continue;
                    }
                    Self::add_tokens(&mut counts, &line);
                }
            }
        }
    }
}

/// Read a whole collection file into memory, in document order.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    CorpusReader::open(path)?.collect()
}
