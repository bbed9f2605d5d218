//! Line-oriented training corpus readers.
//!
//! A corpus holds one instance per line. Blank lines are skipped. Lines that
//! are not valid UTF-8 are reported as [`IngestError::MalformedLine`] and
//! reading continues with the next line; any other I/O failure ends the
//! corpus.
//!
//! # Usage
//!
//! ```ignore
//! use kashmir_ingest::CorpusReader;
//! use kashmir_model::SourceError;
//!
//! let reader = CorpusReader::open("corpus.txt")?;
//! for instance in reader {
//!     match instance {
//!         Ok(line) => println!("{line}"),
//!         Err(error) if error.is_recoverable() => eprintln!("skipped: {error}"),
//!         Err(error) => return Err(error.into()),
//!     }
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use kashmir_model::SourceError;

use crate::error::IngestError;

/// Iterator over the instances of a corpus.
///
/// The reader owns its input, so a file opened with [`CorpusReader::open`]
/// is closed when the reader is dropped.
#[derive(Debug)]
pub struct CorpusReader<R> {
    reader: R,
    buffer: Vec<u8>,
    line: usize,
    finished: bool,
}

impl CorpusReader<BufReader<File>> {
    /// Open a corpus file.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened corpus");
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> CorpusReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line: 0,
            finished: false,
        }
    }

    /// Number of physical lines read so far.
    pub fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<String, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.buffer.clear();
            let read = match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(read) => read,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(IngestError::Read {
                        line: self.line + 1,
                        source,
                    }));
                }
            };
            if read == 0 {
                self.finished = true;
                break;
            }
            self.line += 1;

            let mut bytes = self.buffer.as_slice();
            if let Some(stripped) = bytes.strip_suffix(b"\n") {
                bytes = stripped;
            }
            if let Some(stripped) = bytes.strip_suffix(b"\r") {
                bytes = stripped;
            }

            match std::str::from_utf8(bytes) {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => return Some(Ok(text.to_string())),
                Err(error) => {
                    return Some(Err(IngestError::MalformedLine {
                        line: self.line,
                        reason: error.to_string(),
                    }));
                }
            }
        }
        None
    }
}

/// Non-blank lines of an in-memory corpus.
pub fn lines_from_str(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Read every instance of a corpus file, skipping malformed lines.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a read fails.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Vec<String>, IngestError> {
    let mut instances = Vec::new();
    for item in CorpusReader::open(path)? {
        match item {
            Ok(line) => instances.push(line),
            Err(error) if error.is_recoverable() => {
                tracing::warn!(%error, "skipping corpus line");
            }
            Err(error) => return Err(error),
        }
    }
    Ok(instances)
}
