use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use std::path::Path;

use skinsift_core::{FileId, FileKind, IngestFile, KnownStatus};

/// Adapter exposing a local file to the ingest core.
///
/// This host has no hash database and no thumbnail service, so every file is
/// reported as unknown and not thumbnail-capable; eligibility always comes
/// from byte sniffing.
pub struct DiskFile {
    id: FileId,
    file: File,
    size: u64,
}

impl DiskFile {
    pub fn open(id: FileId, path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(false).open(path)?;
        let size = file.metadata()?.len();
        Ok(Self { id, file, size })
    }
}

impl IngestFile for DiskFile {
    fn id(&self) -> FileId {
        self.id
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn read(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let mut total = 0usize;
        while total < buf.len() {
            match self.file.read_at(&mut buf[total..], offset + total as u64) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(total)
    }

    fn known_status(&self) -> KnownStatus {
        KnownStatus::Unknown
    }

    fn kind(&self) -> FileKind {
        FileKind::FileSystem
    }

    fn thumbnail_capable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_at_offsets() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Hello, World!").unwrap();
        temp_file.flush().unwrap();

        let file = DiskFile::open(1, temp_file.path()).unwrap();
        assert_eq!(file.size(), 13);

        let mut buf = [0u8; 5];
        assert_eq!(file.read(&mut buf, 7).unwrap(), 5);
        assert_eq!(&buf, b"World");
    }

    #[test]
    fn read_past_end_returns_short_count() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Short").unwrap();
        temp_file.flush().unwrap();

        let file = DiskFile::open(2, temp_file.path()).unwrap();

        let mut buf = [0u8; 100];
        assert_eq!(file.read(&mut buf, 0).unwrap(), 5);
        assert_eq!(file.read(&mut buf, 50).unwrap(), 0);
    }
}
