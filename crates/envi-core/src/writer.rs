use crate::{ByteOrder, Value, FIXTURE_RECORDS};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Cannot open {path:?} for writing: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Short write: {written} of {expected} bytes transferred")]
    ShortWrite { expected: usize, written: usize },
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot move finished fixture onto {path:?}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a successful `write_fixture` call put on disk.
#[derive(Debug)]
pub struct FixtureReport {
    pub path: PathBuf,
    pub byte_order: ByteOrder,
    pub records: Vec<Value>,
    pub size: u64,
}

/// Encodes the marker and tagged records onto any sink, in host byte order.
pub struct FixtureWriter<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> FixtureWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn write_marker(&mut self, order: ByteOrder) -> Result<(), FixtureError> {
        self.put(&[order.marker()])
    }

    pub fn write_record(&mut self, value: &Value) -> Result<(), FixtureError> {
        self.put(&[value.data_type().code()])?;
        self.put(value.native_bytes())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // One write call per field; anything less than the full field is fatal.
    fn put(&mut self, bytes: &[u8]) -> Result<(), FixtureError> {
        let written = loop {
            match self.out.write(bytes) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if written != bytes.len() {
            return Err(FixtureError::ShortWrite {
                expected: bytes.len(),
                written,
            });
        }
        self.written += written as u64;
        Ok(())
    }
}

/// Writes the reader test fixture to `path`, replacing any existing file.
///
/// The data goes to a scratch file next to `path` first and is only moved
/// into place once complete. On error the scratch file is removed and `path`
/// is left untouched.
pub fn write_fixture<P: AsRef<Path>>(path: P) -> Result<FixtureReport, FixtureError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let scratch = NamedTempFile::new_in(dir).map_err(|source| FixtureError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let byte_order = ByteOrder::native();
    let mut writer = FixtureWriter::new(scratch);
    writer.write_marker(byte_order)?;
    for value in &FIXTURE_RECORDS {
        writer.write_record(value)?;
    }
    let size = writer.bytes_written();

    let mut scratch = writer.into_inner();
    scratch.flush()?;
    if let Some(perms) = target_permissions(path) {
        scratch.as_file().set_permissions(perms)?;
    }
    scratch.persist(path).map_err(|e| FixtureError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(FixtureReport {
        path: path.to_path_buf(),
        byte_order,
        records: FIXTURE_RECORDS.to_vec(),
        size,
    })
}

/// Mode the finished fixture should carry: the replaced file's, or the
/// usual 0644 for a new one.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
