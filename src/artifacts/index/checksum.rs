//! SHA-1 guarded reads and writes of the index file
//!
//! Every byte that passes through a [`Checksum`] is fed to a running digest, so the
//! trailer can be written (or verified) once the body is done.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::index::CHECKSUM_SIZE;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

#[derive(Debug)]
pub struct Checksum<S> {
    stream: S,
    digest: Sha1,
}

impl<S> Checksum<S> {
    pub fn new(stream: S) -> Self {
        Checksum {
            stream,
            digest: Sha1::new(),
        }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read> Checksum<S> {
    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.stream.read_exact(&mut buffer).map_err(|_| {
            TwigError::CorruptIndex("unexpected end-of-file while reading index".to_string())
        })?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    /// Compare the stored trailer with the digest of everything read so far
    ///
    /// The trailer must be the last thing in the stream.
    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.stream
            .read_exact(&mut expected_checksum)
            .map_err(|_| TwigError::CorruptIndex("missing checksum".to_string()))?;

        let actual_checksum = self.digest.clone().finalize();
        if expected_checksum != actual_checksum.as_slice() {
            anyhow::bail!(TwigError::CorruptIndex(
                "checksum does not match value stored on disk".to_string()
            ));
        }

        let mut trailing = [0u8; 1];
        if self.stream.read(&mut trailing)? != 0 {
            anyhow::bail!(TwigError::CorruptIndex(
                "unexpected data after checksum".to_string()
            ));
        }

        Ok(())
    }
}

impl<S: Write> Checksum<S> {
    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.stream.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.stream.write_all(checksum.as_slice())?;
        self.stream.flush()?;

        Ok(())
    }
}
