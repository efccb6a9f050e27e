use eventgate_types::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io;

/// Hex-encoded SHA-256 digest
pub type HashRef = String;

/// Running SHA-256 over replay artifacts.
///
/// Values are serialized straight into the hasher as compact JSON, so a
/// large tick log never has to be buffered. Equal values digest equal.
#[derive(Debug, Clone, Default)]
pub struct ReportDigest {
    hasher: Sha256,
}

impl ReportDigest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.hasher.update(bytes);
        self
    }

    pub fn update_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        serde_json::to_writer(HashWriter(&mut self.hasher), value)?;
        Ok(self)
    }

    pub fn finish(self) -> HashRef {
        hex::encode(self.hasher.finalize())
    }
}

/// Digest of one value's compact JSON encoding
pub fn json_digest<T: Serialize + ?Sized>(value: &T) -> Result<HashRef> {
    let mut digest = ReportDigest::new();
    digest.update_json(value)?;
    Ok(digest.finish())
}

struct HashWriter<'a>(&'a mut Sha256);

impl io::Write for HashWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
