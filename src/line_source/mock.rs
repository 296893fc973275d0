// src/line_source/mock.rs
//! A scripted byte stream standing in for a serial port.
use std::collections::VecDeque;
use std::io::{self, Read};

/// One step in the script played back by [`Reader`].
#[derive(Debug)]
pub(crate) enum Chunk {
    /// Bytes to return from `read`. Large chunks are split across as many reads as needed.
    Data(Vec<u8>),

    /// An error of the given kind to return from `read`.
    Error(io::ErrorKind),
}

impl Chunk {
    /// Shorthand for a [`Chunk::Data`] holding the bytes of `text`.
    pub(crate) fn data(text: &str) -> Self {
        Self::Data(text.as_bytes().to_vec())
    }
}

/// A mock byte stream.
///
/// Each call to `read` plays back the next [`Chunk`]. Once the script is exhausted every read
/// returns `Ok(0)`, i.e. end of stream.
pub(crate) struct Reader {
    chunks: VecDeque<Chunk>,
}

impl Reader {
    /// Create a new instance that will play back `chunks` in order.
    pub(crate) fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks: chunks.into(),
        }
    }
}

impl Read for Reader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            None => Ok(0),
            Some(Chunk::Error(kind)) => Err(io::Error::new(kind, "mock read error")),
            Some(Chunk::Data(mut data)) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                if len < data.len() {
                    self.chunks.push_front(Chunk::Data(data.split_off(len)));
                }
                Ok(len)
            }
        }
    }
}
