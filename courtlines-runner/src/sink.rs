//! Append-only CSV sink.
//!
//! The header is written only when the file is missing, empty, or its first
//! line does not begin with the expected leading column token. Otherwise the
//! existing header's column order wins and rows are appended under it.
//! The file is opened in append mode and never rewound.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("header must have at least one column")]
    EmptyHeader,
}

/// An open CSV output file.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    columns: Vec<String>,
    wrote_header: bool,
    rows_written: usize,
}

impl CsvSink {
    /// Open `path` for appending, writing `header` if the file lacks one.
    pub fn open(path: &Path, header: &[String]) -> Result<Self, SinkError> {
        let leading = header.first().ok_or(SinkError::EmptyHeader)?;
        let io_err = |source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        };

        let existing = existing_header(path, leading).map_err(io_err)?;
        let needs_newline = missing_trailing_newline(path).map_err(io_err)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;
        if needs_newline {
            file.write_all(b"\n").map_err(io_err)?;
        }

        let mut sink = Self {
            path: path.to_path_buf(),
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_writer(file),
            columns: Vec::new(),
            wrote_header: false,
            rows_written: 0,
        };

        match existing {
            Some(columns) => {
                tracing::debug!(path = %path.display(), "existing header found; appending");
                sink.columns = columns;
            }
            None => {
                sink.write(header)?;
                sink.flush()?;
                sink.columns = header.to_vec();
                sink.wrote_header = true;
            }
        }
        Ok(sink)
    }

    /// Column order rows must follow.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether `open` wrote a header line.
    pub fn wrote_header(&self) -> bool {
        self.wrote_header
    }

    /// Rows appended since `open`, header excluded.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn append(&mut self, row: &[String]) -> Result<(), SinkError> {
        self.write(row)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().map_err(|source| SinkError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&mut self, record: &[String]) -> Result<(), SinkError> {
        self.writer
            .write_record(record)
            .map_err(|source| SinkError::Csv {
                path: self.path.clone(),
                source,
            })
    }
}

impl Drop for CsvSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Columns of the file's first line, if it begins with `leading`.
fn existing_header(path: &Path, leading: &str) -> std::io::Result<Option<Vec<String>>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut first = String::new();
    BufReader::new(file).read_line(&mut first)?;
    if first.trim().is_empty() {
        return Ok(None);
    }
    if !first.starts_with(leading) {
        tracing::warn!(
            path = %path.display(),
            expected = leading,
            "first line is not a header; writing one"
        );
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(first.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => Ok(Some(record.iter().map(|s| s.to_string()).collect())),
        _ => Ok(None),
    }
}

fn missing_trailing_newline(path: &Path) -> std::io::Result<bool> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["Date", "Away-Name", "Home-Name"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(date: &str) -> Vec<String> {
        [date, "Boston", "Miami"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        {
            let mut sink = CsvSink::open(&path, &header()).unwrap();
            assert!(sink.wrote_header());
            assert_eq!(sink.rows_written(), 0);
            sink.append(&row("12-03-2017")).unwrap();
            assert_eq!(sink.rows_written(), 1);
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Date,Away-Name,Home-Name\n12-03-2017,Boston,Miami\n");
    }

    #[test]
    fn reopening_never_duplicates_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        for date in ["12-03-2017", "12-04-2017"] {
            let mut sink = CsvSink::open(&path, &header()).unwrap();
            sink.append(&row(date)).unwrap();
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Date,").count(), 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn existing_header_order_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.csv");
        std::fs::write(&path, "GameID,Home-Name,Home-Rebounds\n").unwrap();
        let sink = CsvSink::open(
            &path,
            &["GameID".to_string(), "Home-Name".to_string()],
        )
        .unwrap();
        assert!(!sink.wrote_header());
        assert_eq!(sink.columns(), &["GameID", "Home-Name", "Home-Rebounds"]);
    }

    #[test]
    fn file_without_header_gets_one_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        std::fs::write(&path, "12-01-2017,Boston,Miami").unwrap();
        let sink = CsvSink::open(&path, &header()).unwrap();
        assert!(sink.wrote_header());
        drop(sink);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "12-01-2017,Boston,Miami\nDate,Away-Name,Home-Name\n");
    }

    #[test]
    fn empty_header_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CsvSink::open(&dir.path().join("x.csv"), &[]),
            Err(SinkError::EmptyHeader)
        ));
    }
}
