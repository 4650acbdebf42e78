//! Buffered file copy.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use mediasift_core::OpsError;
use tracing::warn;

use crate::create::{make_dir_ex, DEFAULT_DIR_MODE};

/// Size of the buffer bytes are streamed through.
pub const COPY_BUFFER_SIZE: usize = 4 * 1024;

/// Copy `src` to `dst`, creating `dst`'s parent directories first.
///
/// Returns the number of bytes copied. An existing `dst` is truncated.
pub fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<u64, OpsError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());

    let result = copy_file_impl(src, dst);
    if let Err(ref err) = result {
        warn!(
            src = %src.display(),
            dst = %dst.display(),
            error = %err,
            "Copying failed"
        );
    }
    result
}

fn copy_file_impl(src: &Path, dst: &Path) -> Result<u64, OpsError> {
    make_dir_ex(dst, DEFAULT_DIR_MODE)?;

    let mut reader = File::open(src).map_err(|e| OpsError::io(src, e))?;
    let mut writer = File::create(dst).map_err(|e| OpsError::io(dst, e))?;

    copy_stream(&mut reader, &mut writer, src, dst)
}

/// Stream `reader` into `writer`, checking every byte read was written.
pub(crate) fn copy_stream(
    reader: &mut impl Read,
    writer: &mut impl Write,
    src: &Path,
    dst: &Path,
) -> Result<u64, OpsError> {
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    let mut read_total = 0u64;
    let mut written_total = 0u64;

    loop {
        let nread = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(OpsError::io(src, e)),
        };
        read_total += nread as u64;

        let nwritten = write_some(writer, &buf[..nread]).map_err(|e| OpsError::io(dst, e))?;
        written_total += nwritten as u64;
        if nwritten < nread {
            break;
        }
    }

    writer.flush().map_err(|e| OpsError::io(dst, e))?;

    if written_total != read_total {
        return Err(OpsError::ShortWrite {
            path: dst.to_path_buf(),
            read: read_total,
            written: written_total,
        });
    }
    Ok(written_total)
}

/// Write as much of `buf` as the writer accepts, stopping at a zero-length write.
fn write_some(writer: &mut impl Write, mut buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while !buf.is_empty() {
        match writer.write(buf) {
            Ok(0) => break,
            Ok(n) => {
                written += n;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Accepts a fixed number of bytes, then reports a full device as zero-length writes.
    struct FullDisk {
        capacity: usize,
        data: Vec<u8>,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.capacity - self.data.len());
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("song.mp3");
        let dst = temp.path().join("cache/art/song.mp3");
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &payload).unwrap();

        let copied = copy_file(&src, &dst).unwrap();
        assert_eq!(copied, payload.len() as u64);
        assert_eq!(fs::read(&dst).unwrap(), payload);
    }

    #[test]
    fn test_copy_empty_file() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("empty");
        fs::write(&src, b"").unwrap();

        assert_eq!(copy_file(&src, temp.path().join("out")).unwrap(), 0);
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = copy_file(temp.path().join("nope"), temp.path().join("out")).unwrap_err();
        assert!(matches!(err, OpsError::NotFound { .. }));
    }

    #[test]
    fn test_copy_stream_short_write() {
        let mut reader = Cursor::new(vec![7u8; COPY_BUFFER_SIZE * 2]);
        let mut writer = FullDisk {
            capacity: COPY_BUFFER_SIZE + 10,
            data: Vec::new(),
        };

        let err = copy_stream(&mut reader, &mut writer, Path::new("src"), Path::new("dst"))
            .unwrap_err();
        match err {
            OpsError::ShortWrite { read, written, .. } => {
                assert_eq!(read, (COPY_BUFFER_SIZE * 2) as u64);
                assert_eq!(written, (COPY_BUFFER_SIZE + 10) as u64);
            }
            other => panic!("expected ShortWrite, got {other:?}"),
        }
    }
}
