use std::io::{self, Read};
use std::sync::{Arc, Mutex};

use url::Url;

use crate::domain::AppError;
use crate::ports::{PackageSource, PackageStream};

/// In-memory package source that records every URL it is asked to open.
#[derive(Clone, Default)]
pub struct FakePackageSource {
    payload: Arc<Vec<u8>>,
    chunk_size: usize,
    fail_after: Option<usize>,
    unreachable: bool,
    pub opened: Arc<Mutex<Vec<Url>>>,
}

impl FakePackageSource {
    pub fn serving(payload: Vec<u8>) -> Self {
        Self { payload: Arc::new(payload), chunk_size: 8192, ..Self::default() }
    }

    pub fn unreachable() -> Self {
        Self { unreachable: true, ..Self::default() }
    }

    /// Deliver at most `chunk_size` bytes per read.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Break the stream with an I/O error once `bytes` have been delivered.
    pub fn failing_after(mut self, bytes: usize) -> Self {
        self.fail_after = Some(bytes);
        self
    }

    pub fn opened_urls(&self) -> Vec<Url> {
        self.opened.lock().unwrap().clone()
    }
}

impl PackageSource for FakePackageSource {
    fn open(&self, url: &Url) -> Result<PackageStream, AppError> {
        self.opened.lock().unwrap().push(url.clone());
        if self.unreachable {
            return Err(AppError::download(url.as_str(), "connection refused", None));
        }
        Ok(Box::new(ChunkedReader {
            payload: Arc::clone(&self.payload),
            position: 0,
            chunk_size: self.chunk_size,
            fail_after: self.fail_after,
        }))
    }
}

struct ChunkedReader {
    payload: Arc<Vec<u8>>,
    position: usize,
    chunk_size: usize,
    fail_after: Option<usize>,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut limit = self.payload.len();
        if let Some(fail_after) = self.fail_after {
            if self.position >= fail_after {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
            }
            limit = limit.min(fail_after);
        }

        let end = limit.min(self.position + self.chunk_size.min(buf.len()));
        let count = end - self.position;
        buf[..count].copy_from_slice(&self.payload[self.position..end]);
        self.position = end;
        Ok(count)
    }
}

/// Deterministic xorshift byte stream for payload fixtures.
pub fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}
