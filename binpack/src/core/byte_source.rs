//! # binpack ByteSource Module
//!
//! The storage collaborator the packetizer reads from. A source only has to
//! open a named resource as something readable and seekable; sizing defaults
//! to a seek to the end and closing is the handle's `Drop`.
//!
//! ## Implementations
//! - [`FileSource`]: the local filesystem, opened read-only
//! - [`MemorySource`]: named in-memory buffers, handy for tests and for
//!   firmware images that are already resident
//!
//! A handle is opened once per load and once per packet request and is never
//! kept across calls, so a resource that changes between load and read is an
//! accepted race rather than something a source must prevent.
//!
//! Copyrights © 2025 binpack Contributors. All rights reserved.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::super::utils::stream_len;

pub trait ByteSource {
    type Handle: Read + Seek;

    /// Opens the resource named by `path` for reading.
    fn open(&self, path: &Path) -> io::Result<Self::Handle>;

    /// Size of an opened resource in bytes.
    fn size_of(&self, handle: &mut Self::Handle) -> io::Result<u64> {
        stream_len(handle)
    }
}

/// Read-only access to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl ByteSource for FileSource {
    type Handle = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }

    fn size_of(&self, handle: &mut File) -> io::Result<u64> {
        Ok(handle.metadata()?.len())
    }
}

/// Named, immutable in-memory resources.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: HashMap<PathBuf, Arc<[u8]>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the resource at `path`.
    pub fn insert<P: AsRef<Path>>(&mut self, path: P, data: impl Into<Arc<[u8]>>) {
        self.resources.insert(path.as_ref().to_path_buf(), data.into());
    }

    /// Returns `true` if something was removed
    pub fn remove<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.resources.remove(path.as_ref()).is_some()
    }
}

impl ByteSource for MemorySource {
    type Handle = Cursor<Arc<[u8]>>;

    fn open(&self, path: &Path) -> io::Result<Self::Handle> {
        self.resources
            .get(path)
            .map(|data| Cursor::new(Arc::clone(data)))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no resource named {}", path.display())))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::read_upto;
    use std::io::Write;

    #[test]
    fn file_source_sizes_without_reading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAB; 300]).unwrap();

        let source = FileSource;
        let mut handle = source.open(file.path()).unwrap();
        assert_eq!(source.size_of(&mut handle).unwrap(), 300);
        assert_eq!(read_upto(&mut handle, 290, 64).unwrap(), vec![0xAB; 10]);
    }

    #[test]
    fn file_source_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource.open(&dir.path().join("absent.bin")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn memory_source_round_trip() {
        let mut source = MemorySource::new();
        source.insert("image.bin", vec![1u8, 2, 3, 4, 5]);

        let mut handle = source.open(Path::new("image.bin")).unwrap();
        assert_eq!(source.size_of(&mut handle).unwrap(), 5);
        assert_eq!(read_upto(&mut handle, 3, 10).unwrap(), vec![4, 5]);

        assert!(source.remove("image.bin"));
        assert!(!source.remove("image.bin"));
        assert_eq!(source.open(Path::new("image.bin")).unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
