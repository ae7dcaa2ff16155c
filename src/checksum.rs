//! SHA-256 helpers for downloaded artifacts

use crate::error::{RelscoutError, RelscoutResult};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Writer adapter that hashes everything passing through it
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Flush the inner writer and return it with the lowercase hex digest
    pub fn finish(mut self) -> io::Result<(W, String)> {
        self.inner.flush()?;
        Ok((self.inner, hex::encode(self.hasher.finalize())))
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Hex SHA-256 of a file's contents
pub fn sha256_file(path: &Path) -> RelscoutResult<String> {
    let context = || format!("hashing {}", path.display());
    let mut file = File::open(path).map_err(|e| RelscoutError::io(context(), e))?;
    let mut writer = HashingWriter::new(io::sink());
    io::copy(&mut file, &mut writer).map_err(|e| RelscoutError::io(context(), e))?;
    let (_, digest) = writer.finish().map_err(|e| RelscoutError::io(context(), e))?;
    Ok(digest)
}
