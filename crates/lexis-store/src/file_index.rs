//! Byte-offset index over the primary data file.
//!
//! Built by one sequential scan that only probes each line's `offset` field.
//! Lookups then seek straight to the record and decode a single line.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use ahash::AHashMap;

use crate::decode::{open_optional, probe_id, LineReader, ScanOutcome};
use crate::error::{LexisError, Result};
use crate::model::SynsetId;

#[derive(Debug, Default)]
pub struct FileIndex {
    offsets: AHashMap<SynsetId, u64>,
}

impl FileIndex {
    /// Scan `path`. A missing file yields an empty index with
    /// `ScanOutcome::existed == false`. Duplicate ids keep the last offset.
    pub fn build(path: &Path) -> Result<(Self, ScanOutcome)> {
        let mut index = Self::default();
        let Some(file) = open_optional(path)? else {
            return Ok((index, ScanOutcome::default()));
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
            match probe_id(line.bytes) {
                Some(id) => {
                    index.offsets.insert(id, line.offset);
                    outcome.decoded += 1;
                }
                None => {
                    tracing::debug!(
                        path = %path.display(),
                        line = line.number,
                        "skipping line without a readable synset id"
                    );
                    outcome.skipped += 1;
                }
            }
        }
        Ok((index, outcome))
    }

    pub fn get(&self, id: &SynsetId) -> Option<u64> {
        self.offsets.get(id).copied()
    }

    pub fn contains(&self, id: &SynsetId) -> bool {
        self.offsets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Read exactly one line starting at byte `offset`. The file is opened and
/// closed within the call.
pub fn read_line_at(path: &Path, offset: u64) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|err| LexisError::io(path, err))?;
    file.seek(SeekFrom::Start(offset))
        .map_err(|err| LexisError::io(path, err))?;
    let mut line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut line)
        .map_err(|err| LexisError::io(path, err))?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_build_records_line_starts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        let first = r#"{"offset":"00000001","gloss":"one"}"#;
        let second = r#"{"offset":"00000002","gloss":"two"}"#;
        let mut f = File::create(&path).unwrap();
        writeln!(f, "{first}").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "garbage").unwrap();
        writeln!(f, "{second}").unwrap();
        drop(f);

        let (index, outcome) = FileIndex::build(&path).unwrap();
        assert!(outcome.existed);
        assert_eq!(outcome.decoded, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(index.get(&SynsetId::new(1)), Some(0));

        let second_offset = (first.len() + 1 + 1 + "garbage\n".len()) as u64;
        assert_eq!(index.get(&SynsetId::new(2)), Some(second_offset));

        let line = read_line_at(&path, second_offset).unwrap();
        assert_eq!(line, format!("{second}\n").into_bytes());
    }

    #[test]
    fn test_build_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let (index, outcome) = FileIndex::build(&dir.path().join("absent.jsonl")).unwrap();
        assert!(index.is_empty());
        assert!(!outcome.existed);
    }

    #[test]
    fn test_duplicate_id_keeps_last_offset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        let line = r#"{"offset":"00000007"}"#;
        std::fs::write(&path, format!("{line}\n{line}\n")).unwrap();

        let (index, _) = FileIndex::build(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&SynsetId::new(7)), Some((line.len() + 1) as u64));
    }
}
