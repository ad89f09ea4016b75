//! Reading documents into lines.
//!
//! The renderer only ever sees a complete `Vec<String>`; read failures are
//! reported here, before rendering starts.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("could not read file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

impl Source {
    /// `None` and `-` mean standard input.
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => Self::File(path),
            _ => Self::Stdin,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }

    /// Read every line of the document.
    ///
    /// # Errors
    /// Returns [`SourceError`] if the file cannot be opened or read.
    pub fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        match self {
            Self::File(path) => read_file(path),
            Self::Stdin => lines_from(io::stdin().lock()).map_err(|source| SourceError::Read {
                name: self.name(),
                source,
            }),
        }
    }
}

/// Read `path` into lines without their terminators.
///
/// # Errors
/// Returns [`SourceError::Open`] if the file cannot be opened and
/// [`SourceError::Read`] if reading fails part way.
pub fn read_file(path: &Path) -> Result<Vec<String>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    lines_from(BufReader::new(file)).map_err(|source| SourceError::Read {
        name: path.display().to_string(),
        source,
    })
}

/// Collect lines from a reader, dropping `\n` and `\r\n` terminators.
///
/// # Errors
/// Propagates I/O and UTF-8 errors from the reader.
pub fn lines_from<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader
        .lines()
        .map(|line| {
            line.map(|mut l| {
                if l.ends_with('\r') {
                    l.pop();
                }
                l
            })
        })
        .collect()
}
