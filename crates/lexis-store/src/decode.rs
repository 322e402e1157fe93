//! Record decoding for JSON Lines sources.
//!
//! - [`decode`] turns one line into a validated record.
//! - [`probe_id`] extracts only the `offset` field, for the on-demand file index.
//! - [`LineReader`] walks a file line by line and reports the byte offset where
//!   each line starts.
//! - [`scan_records`] is the tolerant sequential pass shared by every loader:
//!   a missing file is an empty source and undecodable lines are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{DecodeError, LexisError, Result};
use crate::model::{ExceptionEntry, Sense, Synset, SynsetId};

/// A record type that can be decoded from one line.
pub trait Record: DeserializeOwned {
    fn validate(&self) -> std::result::Result<(), DecodeError>;
}

impl Record for Synset {
    fn validate(&self) -> std::result::Result<(), DecodeError> {
        Synset::validate(self)
    }
}

impl Record for Sense {
    fn validate(&self) -> std::result::Result<(), DecodeError> {
        Sense::validate(self)
    }
}

impl Record for ExceptionEntry {
    fn validate(&self) -> std::result::Result<(), DecodeError> {
        ExceptionEntry::validate(self)
    }
}

/// Decode and validate one record. Trailing newline/whitespace is accepted.
pub fn decode<T: Record>(line: &[u8]) -> std::result::Result<T, DecodeError> {
    let record: T = serde_json::from_slice(line)?;
    record.validate()?;
    Ok(record)
}

#[derive(Deserialize)]
struct IdProbe<'a> {
    #[serde(borrow, default)]
    offset: Option<&'a str>,
}

/// Identifier-only decode. Every other field is skipped without being
/// materialized.
pub fn probe_id(line: &[u8]) -> Option<SynsetId> {
    let probe: IdProbe<'_> = serde_json::from_slice(line).ok()?;
    probe.offset?.parse().ok()
}

pub(crate) fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// One non-blank line borrowed from a [`LineReader`].
#[derive(Debug, Clone, Copy)]
pub struct RawLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the first byte of the line.
    pub offset: u64,
    pub bytes: &'a [u8],
}

/// Byte-accurate line reader that skips blank lines.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    position: u64,
    number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(1024),
            position: 0,
            number: 0,
        }
    }

    pub fn next_line(&mut self) -> io::Result<Option<RawLine<'_>>> {
        loop {
            self.buf.clear();
            let start = self.position;
            let n = self.inner.read_until(b'\n', &mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.position += n as u64;
            self.number += 1;
            if is_blank(&self.buf) {
                continue;
            }
            return Ok(Some(RawLine {
                number: self.number,
                offset: start,
                bytes: &self.buf,
            }));
        }
    }
}

/// Open a file, mapping "not found" to `Ok(None)`.
pub(crate) fn open_optional(path: &Path) -> Result<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(LexisError::io(path, err)),
    }
}

/// Counters from one sequential pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub existed: bool,
    pub decoded: usize,
    pub skipped: usize,
}

/// Decode every line of `path`, handing each valid record to `sink` together
/// with its byte offset.
pub fn scan_records<T, F>(path: &Path, mut sink: F) -> Result<ScanOutcome>
where
    T: Record,
    F: FnMut(T, u64),
{
    let Some(file) = open_optional(path)? else {
        return Ok(ScanOutcome::default());
    };

    let mut outcome = ScanOutcome {
        existed: true,
        ..ScanOutcome::default()
    };
    let mut reader = LineReader::new(BufReader::new(file));
    while let Some(line) = reader
        .next_line()
        .map_err(|err| LexisError::io(path, err))?
    {
        match decode::<T>(line.bytes) {
            Ok(record) => {
                sink(record, line.offset);
                outcome.decoded += 1;
            }
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    line = line.number,
                    error = %err,
                    "skipping undecodable record"
                );
                outcome.skipped += 1;
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SYNSET: &str = r#"{"offset":"00001740","ss_type":"n","words":[{"lemma":"entity","lex_id":0}],"pointers":[],"gloss":"that which exists"}"#;

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let line = SYNSET.replace("\"gloss\"", "\"extra\":[1,2,3],\"gloss\"");
        let synset: Synset = decode(line.as_bytes()).unwrap();
        assert_eq!(synset.offset, SynsetId::new(1740));
        assert!(synset.frames.is_empty());
    }

    #[test]
    fn test_decode_rejects_missing_required_field() {
        let line = SYNSET.replace(",\"gloss\":\"that which exists\"", "");
        assert!(matches!(
            decode::<Synset>(line.as_bytes()),
            Err(DecodeError::Syntax(_))
        ));
    }

    #[test]
    fn test_decode_rejects_empty_words() {
        let line = SYNSET.replace(r#"[{"lemma":"entity","lex_id":0}]"#, "[]");
        assert!(matches!(
            decode::<Synset>(line.as_bytes()),
            Err(DecodeError::EmptyWords)
        ));
    }

    #[test]
    fn test_probe_id_reads_only_offset() {
        assert_eq!(probe_id(SYNSET.as_bytes()), Some(SynsetId::new(1740)));
        assert_eq!(probe_id(br#"{"gloss":"no id"}"#), None);
        assert_eq!(probe_id(br#"{"offset":"17"}"#), None);
        assert_eq!(probe_id(b"not json"), None);
    }

    #[test]
    fn test_line_reader_offsets_skip_blank_lines() {
        let data = b"first\n\n   \nsecond\nthird";
        let mut reader = LineReader::new(Cursor::new(&data[..]));

        let mut seen = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            seen.push((line.number, line.offset, line.bytes.to_vec()));
        }
        assert_eq!(
            seen,
            vec![
                (1, 0, b"first\n".to_vec()),
                (4, 11, b"second\n".to_vec()),
                (5, 18, b"third".to_vec()),
            ]
        );
    }
}
